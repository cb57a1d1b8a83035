//! Fixed timestep simulation tick
//!
//! Advances the pattern set deterministically by one step.

use super::collision::{Hitbox, player_hit};
use super::manager::PatternCommand;
use super::state::SimState;

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Player hitbox this tick; no hitbox means no collision test
    pub hitbox: Option<Hitbox>,
    /// Pattern toggles, applied in order before the update
    pub commands: Vec<PatternCommand>,
}

impl TickInput {
    pub fn with_hitbox(hitbox: Hitbox) -> Self {
        Self {
            hitbox: Some(hitbox),
            commands: Vec::new(),
        }
    }
}

/// Advance the simulation by one fixed timestep
pub fn tick(state: &mut SimState, input: &TickInput) {
    for command in &input.commands {
        state.patterns.apply(command);
    }

    state.patterns.update();
    state.time_ticks += 1;

    state.player_hit = match &input.hitbox {
        Some(hitbox) => player_hit(hitbox, state.patterns.projectiles().map(|lp| lp.projectile)),
        None => false,
    };
    if state.player_hit {
        state.hit_ticks += 1;
    }
}
