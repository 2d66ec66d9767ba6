//! Target Rush - a timed target-shooting reaction game
//!
//! Core modules:
//! - `sim`: Deterministic game core (session, countdown, spawner, target pool)
//! - `config`: Game configuration and validation
//! - `error`: Configuration errors
//!
//! Rendering and pointer capture live in the host; this crate only owns state.

pub mod config;
pub mod error;
pub mod sim;

pub use config::GameConfig;
pub use error::ConfigError;
pub use sim::{Game, GameEvent, HitOutcome, SessionPhase, Snapshot, Target, TargetId};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Session length in whole seconds
    pub const SESSION_SECONDS: u32 = 30;
    /// Countdown tick period (1 Hz)
    pub const CLOCK_PERIOD_MS: u64 = 1_000;
    /// Target spawn period
    pub const SPAWN_PERIOD_MS: u64 = 1_500;
    /// How long a target stays live if nobody hits it
    pub const TARGET_TTL_MS: u64 = 2_000;

    /// Distance kept between a target center and the surface edge.
    /// Constant, not radius-dependent.
    pub const SPAWN_MARGIN: f32 = 60.0;
    pub const TARGET_RADIUS_MIN: f32 = 30.0;
    pub const TARGET_RADIUS_MAX: f32 = 50.0;

    /// Longest accepted period or target lifetime (one day)
    pub const MAX_PERIOD_MS: u64 = 24 * 60 * 60 * 1_000;

    /// Events kept between drains before the oldest are dropped
    pub const MAX_PENDING_EVENTS: usize = 256;

    /// Score awarded per hit
    pub const POINTS_PER_HIT: u64 = 10;

    /// Default surface dimensions
    pub const SURFACE_WIDTH: f32 = 800.0;
    pub const SURFACE_HEIGHT: f32 = 600.0;
}

/// Signed distance from `p` to the edge of a circle (negative inside)
#[inline]
pub fn sd_circle(p: Vec2, center: Vec2, radius: f32) -> f32 {
    (p - center).length() - radius
}
