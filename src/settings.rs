//! Engine settings and pattern configuration
//!
//! Everything here is fixed at construction time. Settings can be built in
//! code, taken from the defaults, or loaded from JSON.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, PI};
use std::path::Path;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, ConfigResult};

/// The rectangle projectiles live in: [0, width] x [0, height]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f64,
    pub height: f64,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
        }
    }
}

impl Playfield {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Closed-rectangle test; the boundary itself is inside
    #[inline]
    pub fn contains(&self, pos: DVec2) -> bool {
        pos.x >= 0.0 && pos.x <= self.width && pos.y >= 0.0 && pos.y <= self.height
    }

    /// Half the longer side, the reach of the line and curve patterns
    pub fn edge_radius(&self) -> f64 {
        self.width.max(self.height) / 2.0
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(ConfigError::Playfield {
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// Emission law and its law-specific parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "law", rename_all = "snake_case")]
pub enum PatternLaw {
    /// Straight bullets evenly spaced around a full circle
    Radial,
    /// Bullets expand to a ring, spin, and burst outward every `cycle_limit` emissions
    Orbiting {
        target_radius: f64,
        cycle_limit: u32,
        expand_speed: f64,
        rotation_speed: f64,
    },
    /// Radial bullets with a sine-wave lateral wiggle
    Sinusoidal { amplitude: f64, frequency: f64 },
    /// A full diameter of bullets that rotates rigidly; replaced on every emission
    RotatingDiameter { radius: f64, rotation_speed: f64 },
    /// Bullets fanning out along quadratic Bézier arcs, then flying straight
    BezierArc {
        radius: f64,
        travel_frames: u32,
        control_angle_offset: f64,
    },
    /// A cone of straight bullets whose aim swings back and forth
    Sweep {
        center_angle: f64,
        sweep_amplitude: f64,
        sweep_rate: f64,
        cone_width: f64,
    },
}

impl PatternLaw {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternLaw::Radial => "radial",
            PatternLaw::Orbiting { .. } => "orbiting",
            PatternLaw::Sinusoidal { .. } => "sinusoidal",
            PatternLaw::RotatingDiameter { .. } => "rotating_diameter",
            PatternLaw::BezierArc { .. } => "bezier_arc",
            PatternLaw::Sweep { .. } => "sweep",
        }
    }

    /// Smallest `count` this law can be built with
    pub fn min_count(&self) -> usize {
        match self {
            // Diameter placement divides by (count - 1)
            PatternLaw::RotatingDiameter { .. } => 2,
            _ => 1,
        }
    }

    pub fn default_orbiting() -> Self {
        PatternLaw::Orbiting {
            target_radius: ORBIT_TARGET_RADIUS,
            cycle_limit: ORBIT_CYCLE_LIMIT,
            expand_speed: ORBIT_EXPAND_SPEED,
            rotation_speed: BASE_ROT_SPEED,
        }
    }

    pub fn default_sinusoidal() -> Self {
        PatternLaw::Sinusoidal {
            amplitude: SINE_AMPLITUDE,
            frequency: SINE_FREQUENCY,
        }
    }

    pub fn default_diameter(radius: f64) -> Self {
        PatternLaw::RotatingDiameter {
            radius,
            rotation_speed: BASE_ROT_SPEED * LINE_SPEED_MUL,
        }
    }

    pub fn default_bezier(radius: f64) -> Self {
        PatternLaw::BezierArc {
            radius,
            travel_frames: CURVE_TRAVEL_FRAMES,
            control_angle_offset: CURVE_CTRL_ANGLE_OFFSET,
        }
    }

    /// Downward cone swinging ±30° at a quarter turn per second
    pub fn default_sweep() -> Self {
        PatternLaw::Sweep {
            center_angle: FRAC_PI_2,
            sweep_amplitude: PI / 6.0,
            sweep_rate: PI / 120.0,
            cone_width: FRAC_PI_3,
        }
    }
}

fn default_speed() -> f64 {
    STRAIGHT_SPEED
}

fn default_bullet_radius() -> f64 {
    BULLET_RADIUS
}

fn default_interval() -> u32 {
    EMISSION_INTERVAL
}

fn default_true() -> bool {
    true
}

/// One named pattern generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternConfig {
    /// Unique name used for toggling
    pub name: String,
    #[serde(flatten)]
    pub law: PatternLaw,
    /// Bullets per emission (per half-line for the rotating diameter)
    pub count: usize,
    /// Straight-flight speed in pixels/tick (radial, sine, sweep, fly-outs)
    #[serde(default = "default_speed")]
    pub speed: f64,
    #[serde(default = "default_bullet_radius")]
    pub bullet_radius: f64,
    /// Ticks between emissions
    #[serde(default = "default_interval")]
    pub emission_interval: u32,
    /// Emission point; the playfield center when absent
    #[serde(default)]
    pub origin: Option<DVec2>,
    /// Whether the manager starts with this pattern active
    #[serde(default)]
    pub enabled: bool,
    /// Fire on the first tick instead of after a full interval
    #[serde(default = "default_true")]
    pub emit_on_start: bool,
}

impl PatternConfig {
    pub fn new(name: impl Into<String>, law: PatternLaw, count: usize) -> Self {
        Self {
            name: name.into(),
            law,
            count,
            speed: STRAIGHT_SPEED,
            bullet_radius: BULLET_RADIUS,
            emission_interval: EMISSION_INTERVAL,
            origin: None,
            enabled: false,
            emit_on_start: true,
        }
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_interval(mut self, ticks: u32) -> Self {
        self.emission_interval = ticks;
        self
    }

    pub fn with_origin(mut self, origin: DVec2) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn with_bullet_radius(mut self, radius: f64) -> Self {
        self.bullet_radius = radius;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn emit_on_start(mut self, emit: bool) -> Self {
        self.emit_on_start = emit;
        self
    }

    /// Reject configurations that would divide by zero or never fire
    pub fn validate(&self) -> ConfigResult<()> {
        let name = self.name.as_str();
        let min = self.law.min_count();
        // The diameter places two points per count
        let fits = match self.law {
            PatternLaw::RotatingDiameter { .. } => self.count.checked_mul(2).is_some(),
            _ => true,
        };
        if self.count < min || !fits {
            return Err(ConfigError::Count {
                pattern: name.to_string(),
                count: self.count,
                min,
            });
        }
        ticks(name, "emission_interval", self.emission_interval)?;
        positive(name, "speed", self.speed)?;
        positive(name, "bullet_radius", self.bullet_radius)?;
        if let Some(origin) = self.origin {
            finite(name, "origin.x", origin.x)?;
            finite(name, "origin.y", origin.y)?;
        }

        match self.law {
            PatternLaw::Radial => {}
            PatternLaw::Orbiting {
                target_radius,
                cycle_limit,
                expand_speed,
                rotation_speed,
            } => {
                positive(name, "target_radius", target_radius)?;
                ticks(name, "cycle_limit", cycle_limit)?;
                positive(name, "expand_speed", expand_speed)?;
                finite(name, "rotation_speed", rotation_speed)?;
            }
            PatternLaw::Sinusoidal {
                amplitude,
                frequency,
            } => {
                finite(name, "amplitude", amplitude)?;
                finite(name, "frequency", frequency)?;
            }
            PatternLaw::RotatingDiameter {
                radius,
                rotation_speed,
            } => {
                positive(name, "radius", radius)?;
                finite(name, "rotation_speed", rotation_speed)?;
            }
            PatternLaw::BezierArc {
                radius,
                travel_frames,
                control_angle_offset,
            } => {
                positive(name, "radius", radius)?;
                ticks(name, "travel_frames", travel_frames)?;
                finite(name, "control_angle_offset", control_angle_offset)?;
            }
            PatternLaw::Sweep {
                center_angle,
                sweep_amplitude,
                sweep_rate,
                cone_width,
            } => {
                finite(name, "center_angle", center_angle)?;
                finite(name, "sweep_amplitude", sweep_amplitude)?;
                finite(name, "sweep_rate", sweep_rate)?;
                finite(name, "cone_width", cone_width)?;
            }
        }
        Ok(())
    }
}

fn positive(pattern: &str, field: &'static str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive {
            pattern: pattern.to_string(),
            field,
            value,
        })
    }
}

fn finite(pattern: &str, field: &'static str, value: f64) -> ConfigResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite {
            pattern: pattern.to_string(),
            field,
            value,
        })
    }
}

fn ticks(pattern: &str, field: &'static str, value: u32) -> ConfigResult<()> {
    if value == 0 {
        Err(ConfigError::ZeroTicks {
            pattern: pattern.to_string(),
            field,
        })
    } else {
        Ok(())
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub playfield: Playfield,
    /// Emissions are skipped while the enabled live total is at or above this
    #[serde(default)]
    pub max_live: Option<usize>,
    /// Named patterns, in update order
    pub patterns: Vec<PatternConfig>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::for_playfield(Playfield::default())
    }
}

impl Settings {
    /// Default pattern set sized to a playfield. Only "straight" starts active.
    pub fn for_playfield(playfield: Playfield) -> Self {
        let edge = playfield.edge_radius();
        let sweep_origin = DVec2::new(playfield.width / 2.0, 0.0);

        Self {
            playfield,
            max_live: None,
            patterns: vec![
                PatternConfig::new("straight", PatternLaw::Radial, 36).enabled(true),
                PatternConfig::new("orbiting", PatternLaw::default_orbiting(), 36),
                PatternConfig::new("sine", PatternLaw::default_sinusoidal(), 36),
                PatternConfig::new("line", PatternLaw::default_diameter(edge), 36),
                PatternConfig::new("curve", PatternLaw::default_bezier(edge), 12),
                PatternConfig::new("sweep", PatternLaw::default_sweep(), 7)
                    .with_interval(10)
                    .with_bullet_radius(3.0)
                    .with_origin(sweep_origin),
            ],
        }
    }

    /// Names in the order the default key bindings (1..=6) toggle them
    pub fn toggle_order(&self) -> Vec<&str> {
        self.patterns.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.playfield.validate()?;
        for (i, pattern) in self.patterns.iter().enumerate() {
            if self.patterns[..i].iter().any(|p| p.name == pattern.name) {
                return Err(ConfigError::DuplicateName(pattern.name.clone()));
            }
            pattern.validate()?;
        }
        Ok(())
    }

    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!(
            "Loaded {} patterns from {}",
            settings.patterns.len(),
            path.display()
        );
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(
            settings.toggle_order(),
            vec!["straight", "orbiting", "sine", "line", "curve", "sweep"]
        );
        let enabled: Vec<_> = settings
            .patterns
            .iter()
            .filter(|p| p.enabled)
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(enabled, vec!["straight"]);
    }

    #[test]
    fn test_json_round_trip_defaults() {
        let settings = Settings::default();
        let json = settings.to_json().unwrap();
        let parsed = Settings::from_json(&json).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn test_json_fills_defaults() {
        let json = r#"{
            "playfield": { "width": 640, "height": 480 },
            "patterns": [
                { "name": "ring", "law": "radial", "count": 12 },
                { "name": "wiggle", "law": "sinusoidal", "count": 8,
                  "amplitude": 4.0, "frequency": 0.5, "enabled": true }
            ]
        }"#;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.max_live, None);
        assert_eq!(settings.patterns[0].speed, STRAIGHT_SPEED);
        assert_eq!(settings.patterns[0].emission_interval, EMISSION_INTERVAL);
        assert!(settings.patterns[0].emit_on_start);
        assert!(!settings.patterns[0].enabled);
        assert!(settings.patterns[1].enabled);
        assert_eq!(
            settings.patterns[1].law,
            PatternLaw::Sinusoidal {
                amplitude: 4.0,
                frequency: 0.5
            }
        );
    }

    #[test]
    fn test_rejects_zero_count() {
        let cfg = PatternConfig::new("ring", PatternLaw::Radial, 0);
        assert!(matches!(cfg.validate(), Err(ConfigError::Count { min: 1, .. })));
    }

    #[test]
    fn test_rejects_single_point_diameter() {
        let cfg = PatternConfig::new("line", PatternLaw::default_diameter(300.0), 1);
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Count { count: 1, min: 2, .. })
        ));
    }

    #[test]
    fn test_rejects_overflowing_diameter_count() {
        let count = usize::MAX / 2 + 1;
        let cfg = PatternConfig::new("line", PatternLaw::default_diameter(300.0), count);
        assert!(matches!(cfg.validate(), Err(ConfigError::Count { count: c, .. }) if c == count));

        let cfg = PatternConfig::new("line", PatternLaw::default_diameter(300.0), usize::MAX / 2);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_interval_and_travel() {
        let cfg = PatternConfig::new("ring", PatternLaw::Radial, 4).with_interval(0);
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::ZeroTicks {
                field: "emission_interval",
                ..
            })
        ));

        let cfg = PatternConfig::new(
            "curve",
            PatternLaw::BezierArc {
                radius: 100.0,
                travel_frames: 0,
                control_angle_offset: 0.5,
            },
            4,
        );
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::ZeroTicks {
                field: "travel_frames",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_bad_playfield_and_duplicates() {
        let mut settings = Settings::default();
        settings.playfield = Playfield::new(0.0, 100.0);
        assert!(matches!(settings.validate(), Err(ConfigError::Playfield { .. })));

        let mut settings = Settings::default();
        let dup = settings.patterns[0].clone();
        settings.patterns.push(dup);
        assert!(matches!(settings.validate(), Err(ConfigError::DuplicateName(n)) if n == "straight"));
    }

    #[test]
    fn test_rejects_nan_speed() {
        let cfg = PatternConfig::new("ring", PatternLaw::Radial, 4).with_speed(f64::NAN);
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NotPositive { field: "speed", .. })
        ));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Settings::load("/nonexistent/danmaku/settings.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_playfield_contains_is_closed() {
        let pf = Playfield::new(100.0, 50.0);
        assert!(pf.contains(DVec2::new(0.0, 0.0)));
        assert!(pf.contains(DVec2::new(100.0, 50.0)));
        assert!(!pf.contains(DVec2::new(100.0001, 10.0)));
        assert!(!pf.contains(DVec2::new(10.0, -0.0001)));
    }
}
