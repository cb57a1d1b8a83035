//! Simulation state and per-frame snapshot

use serde::{Deserialize, Serialize};

use super::manager::PatternManager;
use crate::error::ConfigResult;
use crate::settings::{Playfield, Settings};

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimState {
    pub playfield: Playfield,
    pub patterns: PatternManager,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Hitbox overlapped a bullet on the latest tick
    pub player_hit: bool,
    /// Ticks on which the hitbox was hit, cumulative
    pub hit_ticks: u64,
}

impl SimState {
    pub fn new(settings: &Settings) -> ConfigResult<Self> {
        let patterns = PatternManager::from_settings(settings)?;
        log::info!(
            "Simulation ready on {}x{} playfield",
            settings.playfield.width,
            settings.playfield.height
        );
        Ok(Self {
            playfield: settings.playfield,
            patterns,
            time_ticks: 0,
            player_hit: false,
            hit_ticks: 0,
        })
    }

    pub fn live_count(&self) -> usize {
        self.patterns.total_live_count()
    }

    /// Everything a renderer or HUD needs for the current frame
    pub fn snapshot(&self) -> FrameSnapshot {
        let projectiles: Vec<ProjectileSnapshot> = self
            .patterns
            .projectiles()
            .map(|lp| ProjectileSnapshot {
                x: lp.projectile.pos.x,
                y: lp.projectile.pos.y,
                radius: lp.projectile.radius,
                pattern: lp.pattern.to_string(),
            })
            .collect();

        FrameSnapshot {
            tick: self.time_ticks,
            live_count: projectiles.len(),
            projectiles,
            player_hit: self.player_hit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileSnapshot {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub pattern: String,
}

/// Read-only view of one frame, in manager enumeration order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub projectiles: Vec<ProjectileSnapshot>,
    pub live_count: usize,
    pub player_hit: bool,
}
