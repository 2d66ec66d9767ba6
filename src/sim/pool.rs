//! Live target set
//!
//! Targets are kept in insertion order, which is also the hit-test order:
//! when circles overlap, the oldest target wins. Removal by id is idempotent
//! so a stale expiry after a hit (or a second expiry) is a harmless no-op.

use glam::Vec2;

use super::state::{Target, TargetId};

#[derive(Debug, Clone, Default)]
pub struct TargetPool {
    /// Live targets, oldest first
    targets: Vec<Target>,
}

impl TargetPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a target. Returns false (and leaves the pool untouched) if a live
    /// target already carries the same id.
    pub fn insert(&mut self, target: Target) -> bool {
        if self.contains(target.id) {
            log::warn!("Refusing duplicate target id {}", target.id);
            return false;
        }
        self.targets.push(target);
        true
    }

    /// Remove a target after a confirmed hit. Returns whether it was present.
    pub fn remove(&mut self, id: TargetId) -> bool {
        match self.targets.iter().position(|t| t.id == id) {
            Some(index) => {
                // `remove`, not `swap_remove`: insertion order is the tie-break
                self.targets.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove a target whose lifetime ran out. Same semantics as [`remove`](Self::remove).
    pub fn expire(&mut self, id: TargetId) -> bool {
        self.remove(id)
    }

    /// Oldest live target containing `point`. Does not mutate the pool.
    pub fn hit_test(&self, point: Vec2) -> Option<&Target> {
        self.targets.iter().find(|t| t.contains(point))
    }

    /// Drop every target whose lifetime ended at or before `now_ms`,
    /// returning their ids oldest first
    pub fn reap_expired(&mut self, now_ms: u64) -> Vec<TargetId> {
        let mut reaped = Vec::new();
        self.targets.retain(|t| {
            if t.is_live_at(now_ms) {
                true
            } else {
                reaped.push(t.id);
                false
            }
        });
        reaped
    }

    /// Earliest expiry among live targets
    pub fn next_expiry(&self) -> Option<u64> {
        self.targets.iter().map(|t| t.expires_at_ms).min()
    }

    pub fn clear(&mut self) {
        self.targets.clear();
    }

    pub fn contains(&self, id: TargetId) -> bool {
        self.targets.iter().any(|t| t.id == id)
    }

    pub fn get(&self, id: TargetId) -> Option<&Target> {
        self.targets.iter().find(|t| t.id == id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Live targets in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Target> {
        self.targets.iter()
    }

    pub fn as_slice(&self) -> &[Target] {
        &self.targets
    }
}
