//! Projectiles and their motion laws
//!
//! Every projectile carries one `Motion` record and advances by exactly one
//! fixed tick per `update()`. Two motions have one-way phase machines:
//! - Orbiting: Expanding -> Rotating -> FlyingOut (fly-out may skip Rotating)
//! - BezierArc: Curve -> Linear
//!
//! Transitions never run backwards; calling `fly_out()` twice is a no-op.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::bezier::QuadBezier;
use crate::{direction, polar_to_cartesian};

/// Motion-law tag reported to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MotionLaw {
    Straight,
    Orbiting,
    Sinusoidal,
    RotatingDiameter,
    BezierArc,
}

/// Orbit phase
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum OrbitPhase {
    /// Radius growing toward the target, angle fixed
    Expanding,
    /// Radius held at the target, angle advancing
    Rotating,
    /// Released: straight flight with a fixed velocity
    FlyingOut { velocity: DVec2 },
}

/// Orbiting bullet state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Orbit {
    pub center: DVec2,
    pub angle: f64,
    pub radius: f64,
    pub target_radius: f64,
    pub expand_speed: f64,
    pub rotation_speed: f64,
    /// Speed used when released
    pub fly_out_speed: f64,
    pub phase: OrbitPhase,
}

impl Orbit {
    fn advance(&mut self, pos: &mut DVec2) {
        match self.phase {
            OrbitPhase::Expanding => {
                self.radius = (self.radius + self.expand_speed).min(self.target_radius);
                if self.radius >= self.target_radius {
                    self.phase = OrbitPhase::Rotating;
                }
                *pos = self.center + polar_to_cartesian(self.radius, self.angle);
            }
            OrbitPhase::Rotating => {
                self.angle += self.rotation_speed;
                *pos = self.center + polar_to_cartesian(self.radius, self.angle);
            }
            OrbitPhase::FlyingOut { velocity } => *pos += velocity,
        }
    }

    /// Release along the current angle, even mid-expansion
    fn fly_out(&mut self) -> bool {
        if matches!(self.phase, OrbitPhase::FlyingOut { .. }) {
            return false;
        }
        self.phase = OrbitPhase::FlyingOut {
            velocity: direction(self.angle) * self.fly_out_speed,
        };
        true
    }
}

/// Straight flight with a sine-wave lateral offset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wiggle {
    pub velocity: DVec2,
    /// Unit vector perpendicular to the flight direction
    pub perp: DVec2,
    pub amplitude: f64,
    pub frequency: f64,
    pub frame: u64,
}

impl Wiggle {
    fn advance(&mut self, pos: &mut DVec2) {
        *pos += self.velocity;
        self.frame += 1;
        let offset = self.amplitude * (self.frame as f64 * self.frequency).sin();
        *pos += self.perp * offset;
    }
}

/// A point riding a rotating diameter line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinePoint {
    pub center: DVec2,
    /// Distance from the center (never negative; the far half uses angle + π)
    pub radius: f64,
    pub angle: f64,
    /// Shared by every point of one line so it turns rigidly
    pub speed: f64,
}

impl LinePoint {
    fn advance(&mut self, pos: &mut DVec2) {
        self.angle += self.speed;
        *pos = self.center + polar_to_cartesian(self.radius, self.angle);
    }
}

/// Bézier arc phase
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ArcPhase {
    Curve,
    Linear { velocity: DVec2 },
}

/// Curved bullet following a quadratic Bézier, then flying straight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveFlight {
    pub curve: QuadBezier,
    pub travel_frames: u32,
    pub frame: u32,
    /// Straight speed after the curve ends
    pub speed: f64,
    pub phase: ArcPhase,
}

impl CurveFlight {
    fn advance(&mut self, pos: &mut DVec2) {
        match self.phase {
            ArcPhase::Curve => {
                self.frame = self.frame.saturating_add(1);
                let t = (self.frame as f64 / self.travel_frames as f64).min(1.0);
                *pos = self.curve.point_at(t);
                if t >= 1.0 {
                    self.release();
                }
            }
            ArcPhase::Linear { velocity } => *pos += velocity,
        }
    }

    fn release(&mut self) -> bool {
        if matches!(self.phase, ArcPhase::Linear { .. }) {
            return false;
        }
        self.phase = ArcPhase::Linear {
            velocity: self.curve.exit_direction() * self.speed,
        };
        true
    }
}

/// Law-specific state, one fixed record per law
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Motion {
    Straight { velocity: DVec2 },
    Orbiting(Orbit),
    Sinusoidal(Wiggle),
    RotatingDiameter(LinePoint),
    BezierArc(CurveFlight),
}

/// A single bullet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: DVec2,
    /// Draw and collision radius
    pub radius: f64,
    pub motion: Motion,
}

impl Projectile {
    pub fn straight(pos: DVec2, velocity: DVec2, radius: f64) -> Self {
        Self {
            pos,
            radius,
            motion: Motion::Straight { velocity },
        }
    }

    /// Orbiting bullet starting at the center with zero radius
    pub fn orbiting(
        center: DVec2,
        angle: f64,
        target_radius: f64,
        expand_speed: f64,
        rotation_speed: f64,
        fly_out_speed: f64,
        radius: f64,
    ) -> Self {
        Self {
            pos: center,
            radius,
            motion: Motion::Orbiting(Orbit {
                center,
                angle,
                radius: 0.0,
                target_radius,
                expand_speed,
                rotation_speed,
                fly_out_speed,
                phase: OrbitPhase::Expanding,
            }),
        }
    }

    pub fn sinusoidal(
        origin: DVec2,
        angle: f64,
        speed: f64,
        amplitude: f64,
        frequency: f64,
        radius: f64,
    ) -> Self {
        Self {
            pos: origin,
            radius,
            motion: Motion::Sinusoidal(Wiggle {
                velocity: direction(angle) * speed,
                perp: DVec2::new(-angle.sin(), angle.cos()),
                amplitude,
                frequency,
                frame: 0,
            }),
        }
    }

    pub fn on_line(center: DVec2, offset: f64, angle: f64, speed: f64, radius: f64) -> Self {
        Self {
            pos: center + polar_to_cartesian(offset, angle),
            radius,
            motion: Motion::RotatingDiameter(LinePoint {
                center,
                radius: offset,
                angle,
                speed,
            }),
        }
    }

    pub fn curved(curve: QuadBezier, travel_frames: u32, speed: f64, radius: f64) -> Self {
        Self {
            pos: curve.p0,
            radius,
            motion: Motion::BezierArc(CurveFlight {
                curve,
                travel_frames,
                frame: 0,
                speed,
                phase: ArcPhase::Curve,
            }),
        }
    }

    /// Advance one tick
    #[inline]
    pub fn update(&mut self) {
        match &mut self.motion {
            Motion::Straight { velocity } => self.pos += *velocity,
            Motion::Orbiting(orbit) => orbit.advance(&mut self.pos),
            Motion::Sinusoidal(wiggle) => wiggle.advance(&mut self.pos),
            Motion::RotatingDiameter(point) => point.advance(&mut self.pos),
            Motion::BezierArc(arc) => arc.advance(&mut self.pos),
        }
    }

    /// Switch to straight flight. Returns false if nothing changed.
    ///
    /// Only orbiting and curved bullets have a fly-out; for the other laws this
    /// is always a no-op.
    pub fn fly_out(&mut self) -> bool {
        match &mut self.motion {
            Motion::Orbiting(orbit) => orbit.fly_out(),
            Motion::BezierArc(arc) => arc.release(),
            _ => false,
        }
    }

    pub fn is_flying_out(&self) -> bool {
        match &self.motion {
            Motion::Orbiting(orbit) => matches!(orbit.phase, OrbitPhase::FlyingOut { .. }),
            Motion::BezierArc(arc) => matches!(arc.phase, ArcPhase::Linear { .. }),
            _ => false,
        }
    }

    /// Current motion law; a released orbiter reports `Straight`
    pub fn law(&self) -> MotionLaw {
        match &self.motion {
            Motion::Straight { .. } => MotionLaw::Straight,
            Motion::Orbiting(orbit) => match orbit.phase {
                OrbitPhase::FlyingOut { .. } => MotionLaw::Straight,
                _ => MotionLaw::Orbiting,
            },
            Motion::Sinusoidal(_) => MotionLaw::Sinusoidal,
            Motion::RotatingDiameter(_) => MotionLaw::RotatingDiameter,
            Motion::BezierArc(_) => MotionLaw::BezierArc,
        }
    }

    /// Constant velocity while in straight flight
    pub fn velocity(&self) -> Option<DVec2> {
        match &self.motion {
            Motion::Straight { velocity } => Some(*velocity),
            Motion::Orbiting(Orbit {
                phase: OrbitPhase::FlyingOut { velocity },
                ..
            }) => Some(*velocity),
            Motion::BezierArc(CurveFlight {
                phase: ArcPhase::Linear { velocity },
                ..
            }) => Some(*velocity),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    const EPS: f64 = 1e-9;

    fn orbit_of(p: &Projectile) -> &Orbit {
        match &p.motion {
            Motion::Orbiting(orbit) => orbit,
            other => panic!("expected orbit, got {other:?}"),
        }
    }

    #[test]
    fn test_straight_motion() {
        let mut p = Projectile::straight(DVec2::new(10.0, 20.0), DVec2::new(1.5, -0.25), 4.0);
        for _ in 0..10 {
            p.update();
        }
        assert!((p.pos - DVec2::new(25.0, 17.5)).length() < EPS);
        assert_eq!(p.law(), MotionLaw::Straight);
        assert!(!p.fly_out());
        assert!(!p.is_flying_out());
    }

    #[test]
    fn test_orbit_expands_then_rotates() {
        let center = DVec2::new(100.0, 100.0);
        let mut p = Projectile::orbiting(center, 0.0, 10.0, 3.0, 0.1, 5.0, 4.0);

        // 3, 6, 9, then clamped to 10
        for _ in 0..3 {
            p.update();
        }
        assert!((orbit_of(&p).radius - 9.0).abs() < EPS);
        assert_eq!(orbit_of(&p).phase, OrbitPhase::Expanding);
        p.update();
        assert_eq!(orbit_of(&p).radius, 10.0);
        assert_eq!(orbit_of(&p).phase, OrbitPhase::Rotating);
        assert_eq!(orbit_of(&p).angle, 0.0);
        assert!((p.pos - DVec2::new(110.0, 100.0)).length() < EPS);

        p.update();
        let orbit = orbit_of(&p);
        assert!((orbit.angle - 0.1).abs() < EPS);
        assert_eq!(orbit.radius, 10.0);
        assert!(((p.pos - center).length() - 10.0).abs() < EPS);
        assert_eq!(p.law(), MotionLaw::Orbiting);
    }

    #[test]
    fn test_fly_out_is_idempotent() {
        let mut p = Projectile::orbiting(DVec2::ZERO, 0.0, 4.0, 2.0, 0.5, 5.0, 4.0);
        for _ in 0..6 {
            p.update();
        }
        assert!(p.fly_out());
        let v1 = p.velocity().unwrap();
        assert!((v1.length() - 5.0).abs() < EPS);
        assert_eq!(p.law(), MotionLaw::Straight);

        p.update();
        assert!(!p.fly_out());
        assert_eq!(p.velocity().unwrap(), v1);
    }

    #[test]
    fn test_fly_out_during_expansion_uses_current_angle() {
        let mut p = Projectile::orbiting(DVec2::ZERO, FRAC_PI_2, 100.0, 2.0, 0.03, 5.0, 4.0);
        p.update();
        assert_eq!(orbit_of(&p).phase, OrbitPhase::Expanding);
        assert!(p.fly_out());

        let v = p.velocity().unwrap();
        assert!(v.x.abs() < EPS);
        assert!((v.y - 5.0).abs() < EPS);

        let before = p.pos;
        p.update();
        assert!((p.pos - (before + v)).length() < EPS);
    }

    #[test]
    fn test_sine_offset() {
        let (amp, freq, speed) = (10.0, 0.2, 5.0);
        let mut p = Projectile::sinusoidal(DVec2::ZERO, 0.0, speed, amp, freq, 4.0);

        let mut expected_y = 0.0;
        for frame in 1..=20u64 {
            p.update();
            expected_y += amp * (frame as f64 * freq).sin();
            assert!((p.pos.x - speed * frame as f64).abs() < EPS);
            assert!((p.pos.y - expected_y).abs() < EPS);
        }
        assert_eq!(p.law(), MotionLaw::Sinusoidal);
        assert!(!p.fly_out());
    }

    #[test]
    fn test_line_point_rotates_about_center() {
        let center = DVec2::new(50.0, 50.0);
        let mut p = Projectile::on_line(center, 20.0, PI, 0.25, 4.0);
        assert!((p.pos - DVec2::new(30.0, 50.0)).length() < EPS);
        for _ in 0..4 {
            p.update();
        }
        let Motion::RotatingDiameter(point) = &p.motion else {
            panic!("expected line point");
        };
        assert!((point.angle - (PI + 1.0)).abs() < EPS);
        assert!(((p.pos - center).length() - 20.0).abs() < EPS);
    }

    #[test]
    fn test_curve_then_linear() {
        let curve = QuadBezier::new(
            DVec2::new(0.0, 0.0),
            DVec2::new(0.0, 50.0),
            DVec2::new(100.0, 50.0),
        );
        let mut p = Projectile::curved(curve, 4, 5.0, 4.0);
        assert_eq!(p.pos, curve.p0);

        for _ in 0..3 {
            p.update();
            assert!(!p.is_flying_out());
        }
        p.update();
        assert_eq!(p.pos, curve.p2);
        assert!(p.is_flying_out());
        assert_eq!(p.law(), MotionLaw::BezierArc);

        // Exit leg p1 -> p2 points along +x
        let v = p.velocity().unwrap();
        assert!((v - DVec2::new(5.0, 0.0)).length() < EPS);

        for n in 1..=10 {
            p.update();
            assert!((p.pos - (curve.p2 + v * n as f64)).length() < EPS);
        }
        assert!(!p.fly_out());
        assert_eq!(p.velocity().unwrap(), v);
    }

    #[test]
    fn test_curve_early_release() {
        let curve = QuadBezier::new(DVec2::ZERO, DVec2::new(0.0, 10.0), DVec2::new(0.0, 20.0));
        let mut p = Projectile::curved(curve, 60, 3.0, 4.0);
        p.update();
        assert!(p.fly_out());
        assert!(!p.fly_out());
        let v = p.velocity().unwrap();
        assert!((v - DVec2::new(0.0, 3.0)).length() < EPS);
    }

    proptest! {
        #[test]
        fn prop_straight_after_n_ticks(
            x0 in 0.0f64..1000.0, y0 in 0.0f64..1000.0,
            vx in -10.0f64..10.0, vy in -10.0f64..10.0,
            n in 0usize..300,
        ) {
            let mut p = Projectile::straight(DVec2::new(x0, y0), DVec2::new(vx, vy), 4.0);
            for _ in 0..n {
                p.update();
            }
            prop_assert!((p.pos.x - (x0 + n as f64 * vx)).abs() < EPS);
            prop_assert!((p.pos.y - (y0 + n as f64 * vy)).abs() < EPS);
        }

        #[test]
        fn prop_fly_out_twice_keeps_velocity(angle in -PI..PI, ticks in 0usize..80) {
            let mut p = Projectile::orbiting(DVec2::new(500.0, 500.0), angle, 100.0, 2.0, 0.03, 5.0, 4.0);
            for _ in 0..ticks {
                p.update();
            }
            prop_assert!(p.fly_out());
            let v = p.velocity().unwrap();
            prop_assert!(!p.fly_out());
            prop_assert_eq!(p.velocity().unwrap(), v);
        }
    }
}
