//! Logical-time scheduler
//!
//! Replaces host timers: moving time forward dispatches every due target
//! expiry, countdown tick and spawner tick in chronological order. Events at
//! the same millisecond run expiry first, then clock, then spawner, so the
//! clock can end a session before a coincident spawn.

use super::session::Game;

/// Longest frame the driver will simulate in one update (seconds)
pub const MAX_FRAME_SECS: f32 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Due {
    Expiry,
    Clock,
    Spawn,
}

/// Earliest pending event at or before `until_ms`
fn next_due(game: &Game, until_ms: u64) -> Option<(u64, Due)> {
    [
        (game.pool().next_expiry(), Due::Expiry),
        (game.clock().trigger().next_due(), Due::Clock),
        (game.spawner().trigger().next_due(), Due::Spawn),
    ]
    .into_iter()
    .filter_map(|(at, kind)| at.map(|at| (at, kind)))
    .filter(|&(at, _)| at <= until_ms)
    .min()
}

/// Advance logical time by `dt_ms`, dispatching everything that falls due.
/// Returns the number of events dispatched.
pub fn advance_time(game: &mut Game, dt_ms: u64) -> usize {
    let until_ms = game.now_ms().saturating_add(dt_ms);
    let mut dispatched = 0;

    while let Some((at, kind)) = next_due(game, until_ms) {
        // Clock and spawner ticks move time to their own due instant
        match kind {
            Due::Expiry => {
                game.reap_expired(at);
            }
            Due::Clock => game.advance_clock(),
            Due::Spawn => game.advance_spawner(),
        }
        dispatched += 1;
    }

    game.set_now(until_ms);
    dispatched
}

/// Converts real frame time into logical milliseconds, carrying the fraction
#[derive(Debug, Clone, Default)]
pub struct FrameDriver {
    carry_ms: f64,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one frame of real time (seconds). Long stalls are clamped.
    pub fn update(&mut self, game: &mut Game, dt_secs: f32) -> usize {
        if !dt_secs.is_finite() || dt_secs <= 0.0 {
            return 0;
        }
        let dt_secs = dt_secs.min(MAX_FRAME_SECS);

        self.carry_ms += f64::from(dt_secs) * 1000.0;
        let whole_ms = self.carry_ms.floor();
        self.carry_ms -= whole_ms;

        advance_time(game, whole_ms as u64)
    }
}
