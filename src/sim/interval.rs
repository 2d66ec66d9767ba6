//! Cancellable periodic trigger on the logical timeline
//!
//! Stands in for a host `setInterval`: armed at some instant, it is due every
//! `period_ms` after that until cancelled. Cancelling clears the pending due
//! time, so a tick scheduled before the cancel can never fire afterwards.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    period_ms: u64,
    next_due_ms: Option<u64>,
}

impl Interval {
    pub fn new(period_ms: u64) -> Self {
        Self {
            period_ms,
            next_due_ms: None,
        }
    }

    /// (Re)arm so the first fire is one period after `now_ms`
    pub fn arm(&mut self, now_ms: u64) {
        self.next_due_ms = Some(now_ms.saturating_add(self.period_ms));
    }

    pub fn cancel(&mut self) {
        self.next_due_ms = None;
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.next_due_ms.is_some()
    }

    #[inline]
    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    /// Next instant this trigger fires, if armed
    #[inline]
    pub fn next_due(&self) -> Option<u64> {
        self.next_due_ms
    }

    /// Whether a fire is pending at or before `now_ms`
    pub fn is_due(&self, now_ms: u64) -> bool {
        self.next_due_ms.is_some_and(|due| due <= now_ms)
    }

    /// Consume the pending fire and schedule the next one
    pub fn fire(&mut self) {
        if let Some(due) = self.next_due_ms {
            self.next_due_ms = Some(due.saturating_add(self.period_ms));
        }
    }
}
