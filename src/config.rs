//! Game configuration
//!
//! Supplied by the host at construction. Partial JSON documents are accepted;
//! missing fields fall back to the defaults in [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Host-supplied game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Surface ===
    /// Surface width in surface units
    pub width: f32,
    /// Surface height in surface units
    pub height: f32,

    // === Timing ===
    /// Countdown start value in seconds
    pub session_seconds: u32,
    /// Countdown tick period (ms)
    pub clock_period_ms: u64,
    /// Spawner tick period (ms)
    pub spawn_period_ms: u64,
    /// Target lifetime (ms)
    pub target_ttl_ms: u64,

    // === Spawn geometry ===
    /// Fixed distance from each edge for spawn centers
    pub spawn_margin: f32,
    pub radius_min: f32,
    pub radius_max: f32,

    /// Spawner RNG seed
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: SURFACE_WIDTH,
            height: SURFACE_HEIGHT,

            session_seconds: SESSION_SECONDS,
            clock_period_ms: CLOCK_PERIOD_MS,
            spawn_period_ms: SPAWN_PERIOD_MS,
            target_ttl_ms: TARGET_TTL_MS,

            spawn_margin: SPAWN_MARGIN,
            radius_min: TARGET_RADIUS_MIN,
            radius_max: TARGET_RADIUS_MAX,

            seed: 0,
        }
    }
}

impl GameConfig {
    /// Default config on a surface of the given size
    pub fn with_surface(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Parse a JSON document and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|source| ConfigError::Parse { source })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations no session can run under
    pub fn validate(&self) -> Result<(), ConfigError> {
        let surface_ok = self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0;
        if !surface_ok {
            return Err(ConfigError::InvalidSurface {
                width: self.width,
                height: self.height,
            });
        }

        if !self.spawn_margin.is_finite() || self.spawn_margin < 0.0 {
            return Err(ConfigError::InvalidMargin(self.spawn_margin));
        }
        // The spawn range [margin, size - margin] must not be empty
        if self.width < 2.0 * self.spawn_margin || self.height < 2.0 * self.spawn_margin {
            return Err(ConfigError::SurfaceTooSmall {
                width: self.width,
                height: self.height,
                margin: self.spawn_margin,
            });
        }

        if self.session_seconds == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        for (name, period) in [
            ("clock", self.clock_period_ms),
            ("spawn", self.spawn_period_ms),
            ("target ttl", self.target_ttl_ms),
        ] {
            if period == 0 {
                return Err(ConfigError::ZeroPeriod { name });
            }
            if period > MAX_PERIOD_MS {
                return Err(ConfigError::PeriodTooLong {
                    name,
                    value_ms: period,
                    max_ms: MAX_PERIOD_MS,
                });
            }
        }

        let radii_ok = self.radius_min.is_finite()
            && self.radius_max.is_finite()
            && self.radius_min > 0.0
            && self.radius_min <= self.radius_max;
        if !radii_ok {
            return Err(ConfigError::InvalidRadiusRange {
                min: self.radius_min,
                max: self.radius_max,
            });
        }

        Ok(())
    }
}
