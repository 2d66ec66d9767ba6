//! Target spawner
//!
//! Places one target per fire at a uniformly random position inside the spawn
//! margin, with a uniformly random radius. The margin does not grow with the
//! radius: a config whose radius exceeds its margin lets targets overhang the edge.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::interval::Interval;
use super::state::{Target, TargetId};
use crate::config::GameConfig;

#[derive(Debug, Clone)]
pub struct Spawner {
    trigger: Interval,
    rng: Pcg32,
    /// Spawn window for centers: [min, max] on each axis
    min: Vec2,
    max: Vec2,
    radius_min: f32,
    radius_max: f32,
    ttl_ms: u64,
}

impl Spawner {
    /// Build a spawner from a validated config
    pub fn new(config: &GameConfig) -> Self {
        let margin = config.spawn_margin;
        Self {
            trigger: Interval::new(config.spawn_period_ms),
            rng: Pcg32::seed_from_u64(config.seed),
            min: Vec2::splat(margin),
            max: Vec2::new(config.width - margin, config.height - margin),
            radius_min: config.radius_min,
            radius_max: config.radius_max,
            ttl_ms: config.target_ttl_ms,
        }
    }

    pub fn arm(&mut self, now_ms: u64) {
        self.trigger.arm(now_ms);
    }

    pub fn stop(&mut self) {
        self.trigger.cancel();
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.trigger.is_armed()
    }

    #[inline]
    pub fn ttl_ms(&self) -> u64 {
        self.ttl_ms
    }

    pub fn trigger(&self) -> &Interval {
        &self.trigger
    }

    pub(crate) fn trigger_mut(&mut self) -> &mut Interval {
        &mut self.trigger
    }

    /// Draw a new target. Only the geometry is random; id and time come from the caller.
    pub fn spawn(&mut self, id: TargetId, now_ms: u64) -> Target {
        let x = self.rng.random_range(self.min.x..=self.max.x);
        let y = self.rng.random_range(self.min.y..=self.max.y);
        let radius = self.rng.random_range(self.radius_min..=self.radius_max);
        Target::new(id, Vec2::new(x, y), radius, now_ms, self.ttl_ms)
    }
}
