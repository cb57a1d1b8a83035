//! Configuration errors
//!
//! The simulation itself never fails once built; everything that can go wrong
//! is caught while turning `Settings` into patterns.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("pattern `{pattern}`: count {count} is out of range (at least {min}, and the wave size must fit in usize)")]
    Count {
        pattern: String,
        count: usize,
        min: usize,
    },

    #[error("pattern `{pattern}`: `{field}` must be at least 1")]
    ZeroTicks {
        pattern: String,
        field: &'static str,
    },

    #[error("pattern `{pattern}`: `{field}` must be a finite positive number, got {value}")]
    NotPositive {
        pattern: String,
        field: &'static str,
        value: f64,
    },

    #[error("pattern `{pattern}`: `{field}` must be finite, got {value}")]
    NotFinite {
        pattern: String,
        field: &'static str,
        value: f64,
    },

    #[error("playfield must have finite positive size, got {width}x{height}")]
    Playfield { width: f64, height: f64 },

    #[error("duplicate pattern name `{0}`")]
    DuplicateName(String),

    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
