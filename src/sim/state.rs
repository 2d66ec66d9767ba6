//! Game state types
//!
//! Plain data shared between the core and whatever renders it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sd_circle;

/// Target identifier, unique for the lifetime of a [`Game`](super::Game)
pub type TargetId = u32;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SessionPhase {
    /// Created, never started
    #[default]
    Idle,
    /// Countdown running, targets spawning
    Running,
    /// Countdown reached zero
    Ended,
}

/// A transient circular target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: TargetId,
    /// Center in surface coordinates
    pub pos: Vec2,
    pub radius: f32,
    /// Logical time the target appeared (ms)
    pub spawned_at_ms: u64,
    /// Logical time the target disappears (ms, exclusive)
    pub expires_at_ms: u64,
}

impl Target {
    pub fn new(id: TargetId, pos: Vec2, radius: f32, spawned_at_ms: u64, ttl_ms: u64) -> Self {
        Self {
            id,
            pos,
            radius,
            spawned_at_ms,
            expires_at_ms: spawned_at_ms.saturating_add(ttl_ms),
        }
    }

    /// Whether `point` lies on or inside the circle
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        sd_circle(point, self.pos, self.radius) <= 0.0
    }

    #[inline]
    pub fn is_live_at(&self, now_ms: u64) -> bool {
        now_ms < self.expires_at_ms
    }
}

/// Things that happened inside the core, in order, for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    SessionStarted { seconds: u32 },
    TargetSpawned { id: TargetId },
    TargetHit { id: TargetId, score: u64 },
    TargetExpired { id: TargetId },
    SessionEnded { final_score: u64 },
}

/// Result of a hit query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitOutcome {
    pub hit: bool,
    /// Score after the query
    pub new_score: u64,
    /// The credited target, if any
    pub target: Option<TargetId>,
}

impl HitOutcome {
    pub fn miss(score: u64) -> Self {
        Self {
            hit: false,
            new_score: score,
            target: None,
        }
    }
}

/// Prompt shown next to the play surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Banner {
    /// Waiting for the first start
    Ready,
    /// Session in progress
    Playing,
    /// Countdown over, offer a replay
    GameOver { final_score: u64 },
}

impl Banner {
    pub fn from_phase(phase: SessionPhase, score: u64) -> Self {
        match phase {
            SessionPhase::Idle => Banner::Ready,
            SessionPhase::Running => Banner::Playing,
            SessionPhase::Ended => Banner::GameOver { final_score: score },
        }
    }
}

/// Read-only view for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: SessionPhase,
    pub score: u64,
    pub time_remaining: u32,
    pub banner: Banner,
    pub surface: (f32, f32),
    /// Live targets, oldest first
    pub targets: Vec<Target>,
}
