//! Danmaku core - bullet-pattern engine for a shoot-'em-up prototype
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion laws, emitters, collision, tick)
//! - `clock`: Fixed-timestep accumulator for the external frame loop
//! - `cube`: 3D rotation utility for the decorative cube
//! - `settings`: Data-driven pattern configuration
//! - `error`: Construction-time configuration errors

pub mod clock;
pub mod cube;
pub mod error;
pub mod settings;
pub mod sim;

pub use clock::FixedClock;
pub use error::{ConfigError, ConfigResult};
pub use settings::{PatternConfig, PatternLaw, Playfield, Settings};

use glam::DVec2;

/// Engine configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f64 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the clock will account for (seconds)
    pub const MAX_FRAME_TIME: f64 = 0.1;

    /// Default playfield
    pub const PLAYFIELD_WIDTH: f64 = 900.0;
    pub const PLAYFIELD_HEIGHT: f64 = 900.0;

    /// Bullet defaults
    pub const BULLET_RADIUS: f64 = 4.0;
    /// Straight-line speed (pixels/tick)
    pub const STRAIGHT_SPEED: f64 = 5.0;
    /// Frames between emissions
    pub const EMISSION_INTERVAL: u32 = 30;

    /// Orbit defaults
    pub const ORBIT_EXPAND_SPEED: f64 = 2.0;
    /// Base angular speed (radians/tick)
    pub const BASE_ROT_SPEED: f64 = 0.03;
    pub const ORBIT_TARGET_RADIUS: f64 = 100.0;
    pub const ORBIT_CYCLE_LIMIT: u32 = 3;

    /// Sine wiggle defaults
    pub const SINE_AMPLITUDE: f64 = 10.0;
    pub const SINE_FREQUENCY: f64 = 0.2;

    /// Rotating line spins this many times faster than the orbit
    pub const LINE_SPEED_MUL: f64 = 3.0;

    /// Curve defaults
    pub const CURVE_TRAVEL_FRAMES: u32 = 90;
    pub const CURVE_CTRL_ANGLE_OFFSET: f64 = std::f64::consts::FRAC_PI_4;
}

/// Normalized angle to [-π, π), constant time for any finite input
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    use std::f64::consts::{PI, TAU};
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    // rem_euclid may round up to TAU itself
    if wrapped >= PI { wrapped - TAU } else { wrapped }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f64, theta: f64) -> DVec2 {
    DVec2::new(r * theta.cos(), r * theta.sin())
}

/// Unit vector pointing along `theta`
#[inline]
pub fn direction(theta: f64) -> DVec2 {
    polar_to_cartesian(1.0, theta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{PI, TAU};

    #[test]
    fn test_normalize_angle_wraps() {
        assert!((normalize_angle(3.0 * PI + 0.5) - (-PI + 0.5)).abs() < 1e-12);
        assert!((normalize_angle(-3.5 * PI) - 0.5 * PI).abs() < 1e-12);
        assert!((normalize_angle(0.25) - 0.25).abs() < 1e-15);
        assert!((normalize_angle(-0.25) + 0.25).abs() < 1e-15);
    }

    #[test]
    fn test_normalize_angle_huge_input() {
        for angle in [1e6, -1e6, 1e300, -1e300, f64::MAX, f64::MIN] {
            let a = normalize_angle(angle);
            assert!((-PI..PI).contains(&a), "{angle} -> {a}");
        }
        // 1e6 rad is 159154 full turns plus a remainder
        let expected = 1e6 - (1e6 / TAU).floor() * TAU - TAU;
        assert!((normalize_angle(1e6) - normalize_angle(expected)).abs() < 1e-6);
    }

    #[test]
    fn test_polar_to_cartesian() {
        let p = polar_to_cartesian(10.0, PI / 2.0);
        assert!(p.x.abs() < 1e-12);
        assert!((p.y - 10.0).abs() < 1e-12);
    }
}
