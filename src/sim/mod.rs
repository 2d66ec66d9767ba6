//! Deterministic game core
//!
//! All gameplay logic lives here. Given a config (seed included) and a
//! sequence of calls, the outcome is always the same:
//! - Logical time only, moved by the host via `tick::advance_time`
//! - Seeded RNG only
//! - Stable iteration order (insertion order of targets)
//! - No rendering or platform dependencies

pub mod clock;
pub mod interval;
pub mod pool;
pub mod session;
pub mod spawner;
pub mod state;
pub mod tick;

pub use clock::{ClockTick, Countdown};
pub use interval::Interval;
pub use pool::TargetPool;
pub use session::Game;
pub use spawner::Spawner;
pub use state::{Banner, GameEvent, HitOutcome, SessionPhase, Snapshot, Target, TargetId};
pub use tick::{FrameDriver, advance_time};
