//! Pattern generators (emitters)
//!
//! A `Pattern` owns its bullets, emits a new wave every `emission_interval`
//! ticks, advances every bullet one tick, and drops whatever left the
//! playfield. One struct covers every law; the law only changes what
//! `spawn()` creates and, for the rotating diameter, the per-tick line angle.

use std::f64::consts::{PI, TAU};

use glam::DVec2;

use super::bezier::QuadBezier;
use super::projectile::Projectile;
use crate::error::ConfigResult;
use crate::settings::{PatternConfig, PatternLaw, Playfield};
use crate::{direction, normalize_angle, polar_to_cartesian};

#[derive(Debug, Clone)]
pub struct Pattern {
    name: String,
    law: PatternLaw,
    count: usize,
    speed: f64,
    bullet_radius: f64,
    interval: u32,
    origin: DVec2,
    playfield: Playfield,
    /// Ticks since the last emission
    timer: u32,
    /// Orbit emissions since the last fly-out burst
    emissions: u32,
    /// Current angle of the rotating diameter
    line_angle: f64,
    /// Updates run so far (drives the sweep phase)
    ticks: u64,
    projectiles: Vec<Projectile>,
}

impl Pattern {
    /// Build a generator, rejecting configurations that could not run
    pub fn new(config: &PatternConfig, playfield: Playfield) -> ConfigResult<Self> {
        playfield.validate()?;
        config.validate()?;

        let interval = config.emission_interval;
        Ok(Self {
            name: config.name.clone(),
            law: config.law.clone(),
            count: config.count,
            speed: config.speed,
            bullet_radius: config.bullet_radius,
            interval,
            origin: config.origin.unwrap_or_else(|| playfield.center()),
            playfield,
            // Primed so the first update fires
            timer: if config.emit_on_start { interval - 1 } else { 0 },
            emissions: 0,
            line_angle: 0.0,
            ticks: 0,
            projectiles: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn law(&self) -> &PatternLaw {
        &self.law
    }

    pub fn origin(&self) -> DVec2 {
        self.origin
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn live_count(&self) -> usize {
        self.projectiles.len()
    }

    pub fn timer(&self) -> u32 {
        self.timer
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    pub fn line_angle(&self) -> f64 {
        self.line_angle
    }

    /// Bullets one emission produces
    pub fn wave_size(&self) -> usize {
        match self.law {
            PatternLaw::RotatingDiameter { .. } => self.count * 2,
            _ => self.count,
        }
    }

    /// Advance one tick
    pub fn update(&mut self) {
        self.update_gated(true);
    }

    /// Advance one tick; a due emission is dropped when `allow_spawn` is false.
    /// Returns true if this tick emitted.
    pub fn update_gated(&mut self, allow_spawn: bool) -> bool {
        self.ticks += 1;

        // The line keeps turning between emissions
        if let PatternLaw::RotatingDiameter { rotation_speed, .. } = self.law {
            self.line_angle = normalize_angle(self.line_angle + rotation_speed);
        }

        let mut spawned = false;
        self.timer += 1;
        if self.timer >= self.interval {
            self.timer = 0;
            if allow_spawn {
                self.spawn();
                spawned = true;
            } else {
                log::debug!("{}: emission skipped (projectile cap)", self.name);
            }
        }

        for projectile in &mut self.projectiles {
            projectile.update();
        }
        let playfield = self.playfield;
        self.projectiles.retain(|p| playfield.contains(p.pos));

        spawned
    }

    /// Emit one wave. Returns the number of bullets created.
    pub fn spawn(&mut self) -> usize {
        match self.law {
            PatternLaw::Radial => self.spawn_radial(),
            PatternLaw::Orbiting {
                target_radius,
                cycle_limit,
                expand_speed,
                rotation_speed,
            } => self.spawn_orbiting(target_radius, cycle_limit, expand_speed, rotation_speed),
            PatternLaw::Sinusoidal {
                amplitude,
                frequency,
            } => self.spawn_sinusoidal(amplitude, frequency),
            PatternLaw::RotatingDiameter {
                radius,
                rotation_speed,
            } => self.spawn_diameter(radius, rotation_speed),
            PatternLaw::BezierArc {
                radius,
                travel_frames,
                control_angle_offset,
            } => self.spawn_curves(radius, travel_frames, control_angle_offset),
            PatternLaw::Sweep {
                center_angle,
                sweep_amplitude,
                sweep_rate,
                cone_width,
            } => self.spawn_sweep(center_angle, sweep_amplitude, sweep_rate, cone_width),
        }
    }

    /// Drop every live bullet (timers are untouched)
    pub fn clear(&mut self) {
        self.projectiles.clear();
    }

    /// Angle of spoke `i` in an evenly spaced ring
    fn spoke(&self, i: usize) -> f64 {
        TAU * i as f64 / self.count as f64
    }

    fn spawn_radial(&mut self) -> usize {
        for i in 0..self.count {
            let velocity = direction(self.spoke(i)) * self.speed;
            self.projectiles
                .push(Projectile::straight(self.origin, velocity, self.bullet_radius));
        }
        self.count
    }

    fn spawn_orbiting(
        &mut self,
        target_radius: f64,
        cycle_limit: u32,
        expand_speed: f64,
        rotation_speed: f64,
    ) -> usize {
        for i in 0..self.count {
            self.projectiles.push(Projectile::orbiting(
                self.origin,
                self.spoke(i),
                target_radius,
                expand_speed,
                rotation_speed,
                self.speed,
                self.bullet_radius,
            ));
        }

        self.emissions += 1;
        if self.emissions >= cycle_limit {
            let released = self
                .projectiles
                .iter_mut()
                .map(|p| p.fly_out())
                .filter(|&changed| changed)
                .count();
            log::debug!("{}: orbit burst released {} bullets", self.name, released);
            self.emissions = 0;
        }
        self.count
    }

    fn spawn_sinusoidal(&mut self, amplitude: f64, frequency: f64) -> usize {
        for i in 0..self.count {
            self.projectiles.push(Projectile::sinusoidal(
                self.origin,
                self.spoke(i),
                self.speed,
                amplitude,
                frequency,
                self.bullet_radius,
            ));
        }
        self.count
    }

    /// Replace the whole line; t runs from -1 to 1 along the diameter
    fn spawn_diameter(&mut self, radius: f64, rotation_speed: f64) -> usize {
        self.projectiles.clear();
        let total = self.count * 2;
        let last = (total - 1) as f64;
        for i in 0..total {
            let t = -1.0 + 2.0 * i as f64 / last;
            let angle = if t >= 0.0 {
                self.line_angle
            } else {
                self.line_angle + PI
            };
            self.projectiles.push(Projectile::on_line(
                self.origin,
                t.abs() * radius,
                angle,
                rotation_speed,
                self.bullet_radius,
            ));
        }
        total
    }

    fn spawn_curves(&mut self, radius: f64, travel_frames: u32, control_angle_offset: f64) -> usize {
        for i in 0..self.count {
            let angle = self.spoke(i);
            let end = self.origin + polar_to_cartesian(radius, angle);
            let control = self.origin + polar_to_cartesian(radius * 0.5, angle + control_angle_offset);
            self.projectiles.push(Projectile::curved(
                QuadBezier::new(self.origin, control, end),
                travel_frames,
                self.speed,
                self.bullet_radius,
            ));
        }
        self.count
    }

    fn spawn_sweep(
        &mut self,
        center_angle: f64,
        sweep_amplitude: f64,
        sweep_rate: f64,
        cone_width: f64,
    ) -> usize {
        let aim = center_angle + sweep_amplitude * (self.ticks as f64 * sweep_rate).sin();
        for i in 0..self.count {
            let angle = if self.count == 1 {
                aim
            } else {
                aim - cone_width / 2.0 + cone_width * i as f64 / (self.count - 1) as f64
            };
            let velocity = direction(angle) * self.speed;
            self.projectiles
                .push(Projectile::straight(self.origin, velocity, self.bullet_radius));
        }
        self.count
    }
}
