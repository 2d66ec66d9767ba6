//! Session countdown
//!
//! Counts whole seconds down from the configured total. Reaching zero disarms
//! the countdown, so the end signal is reported exactly once per session.

use serde::{Deserialize, Serialize};

use super::interval::Interval;

/// Result of a single countdown tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockTick {
    /// Countdown is not armed; nothing happened
    Stopped,
    /// One second elapsed, this many remain
    Ticked(u32),
    /// The countdown just reached zero
    Expired,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Countdown {
    total_seconds: u32,
    remaining: u32,
    trigger: Interval,
}

impl Countdown {
    pub fn new(total_seconds: u32, period_ms: u64) -> Self {
        Self {
            total_seconds,
            remaining: total_seconds,
            trigger: Interval::new(period_ms),
        }
    }

    /// Reset to the full duration and start ticking from `now_ms`
    pub fn arm(&mut self, now_ms: u64) {
        self.remaining = self.total_seconds;
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
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[inline]
    pub fn total_seconds(&self) -> u32 {
        self.total_seconds
    }

    pub fn trigger(&self) -> &Interval {
        &self.trigger
    }

    pub(crate) fn trigger_mut(&mut self) -> &mut Interval {
        &mut self.trigger
    }

    /// Decrement by one second, clamping at zero
    pub fn tick(&mut self) -> ClockTick {
        if !self.is_running() {
            return ClockTick::Stopped;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.trigger.cancel();
            ClockTick::Expired
        } else {
            ClockTick::Ticked(self.remaining)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_countdown_ignores_ticks() {
        let mut clock = Countdown::new(30, 1000);
        assert_eq!(clock.tick(), ClockTick::Stopped);
        assert_eq!(clock.remaining(), 30);
    }

    #[test]
    fn test_counts_down_to_zero_once() {
        let mut clock = Countdown::new(3, 1000);
        clock.arm(0);
        assert_eq!(clock.tick(), ClockTick::Ticked(2));
        assert_eq!(clock.tick(), ClockTick::Ticked(1));
        assert_eq!(clock.tick(), ClockTick::Expired);
        assert!(!clock.is_running());

        // Stale ticks after expiry are ignored
        assert_eq!(clock.tick(), ClockTick::Stopped);
        assert_eq!(clock.remaining(), 0);
    }

    #[test]
    fn test_single_second_session() {
        let mut clock = Countdown::new(1, 1000);
        clock.arm(0);
        assert_eq!(clock.tick(), ClockTick::Expired);
    }

    #[test]
    fn test_stop_cancels_pending_tick() {
        let mut clock = Countdown::new(30, 1000);
        clock.arm(0);
        clock.tick();
        clock.stop();
        assert_eq!(clock.tick(), ClockTick::Stopped);
        assert_eq!(clock.remaining(), 29);
        assert!(!clock.trigger().is_due(10_000));
    }

    #[test]
    fn test_rearm_resets_remaining() {
        let mut clock = Countdown::new(30, 1000);
        clock.arm(0);
        for _ in 0..10 {
            clock.tick();
        }
        clock.arm(10_000);
        assert_eq!(clock.remaining(), 30);
        assert_eq!(clock.trigger().next_due(), Some(11_000));
    }
}
