//! Error types for game configuration
//!
//! Once a [`Game`](crate::Game) is built from a valid config nothing else fails.

use thiserror::Error;

/// Errors raised while loading or validating a [`GameConfig`](crate::GameConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("surface must be finite and positive, got {width}x{height}")]
    InvalidSurface { width: f32, height: f32 },

    #[error("surface {width}x{height} leaves no room inside a spawn margin of {margin}")]
    SurfaceTooSmall { width: f32, height: f32, margin: f32 },

    #[error("spawn margin must be finite and non-negative, got {0}")]
    InvalidMargin(f32),

    #[error("session length must be at least one second")]
    ZeroDuration,

    #[error("{name} period must be non-zero")]
    ZeroPeriod { name: &'static str },

    #[error("{name} period of {value_ms}ms exceeds the {max_ms}ms limit")]
    PeriodTooLong {
        name: &'static str,
        value_ms: u64,
        max_ms: u64,
    },

    #[error("target radius range [{min}, {max}] is invalid")]
    InvalidRadiusRange { min: f32, max: f32 },

    #[error("failed to parse game config")]
    Parse {
        #[source]
        source: serde_json::Error,
    },
}
