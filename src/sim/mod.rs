//! Deterministic simulation module
//!
//! All pattern logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - No randomness
//! - Stable iteration order (manager insertion order, then spawn order)
//! - No rendering or platform dependencies

pub mod bezier;
pub mod collision;
pub mod manager;
pub mod pattern;
pub mod projectile;
pub mod state;
pub mod tick;

pub use bezier::QuadBezier;
pub use collision::{Hitbox, count_hits, first_hit, player_hit};
pub use manager::{LiveProjectile, PatternCommand, PatternManager};
pub use pattern::Pattern;
pub use projectile::{ArcPhase, Motion, MotionLaw, OrbitPhase, Projectile};
pub use state::{FrameSnapshot, ProjectileSnapshot, SimState};
pub use tick::{TickInput, tick};
