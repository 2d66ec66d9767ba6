//! Session controller
//!
//! `Game` owns every piece of mutable state: phase, score, countdown, spawner
//! and the live target pool. All mutation goes through `&mut self`, so a host
//! that shares a `Game` across threads has to put it behind one lock, which
//! also serializes clock ticks, spawner ticks, expiries and hit queries.

use std::collections::VecDeque;

use glam::Vec2;

use super::clock::{ClockTick, Countdown};
use super::pool::TargetPool;
use super::spawner::Spawner;
use super::state::{Banner, GameEvent, HitOutcome, SessionPhase, Snapshot, Target, TargetId};
use crate::config::GameConfig;
use crate::consts::{MAX_PENDING_EVENTS, POINTS_PER_HIT};
use crate::error::ConfigError;

#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    phase: SessionPhase,
    score: u64,
    clock: Countdown,
    spawner: Spawner,
    pool: TargetPool,
    /// Logical time (ms). Only moves forward, never reset by `start`.
    now_ms: u64,
    /// Pending events for the presentation layer, oldest dropped when full
    events: VecDeque<GameEvent>,
    /// Next target id
    next_id: TargetId,
}

impl Game {
    /// Create an idle game. Fails only on a degenerate config.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            clock: Countdown::new(config.session_seconds, config.clock_period_ms),
            spawner: Spawner::new(&config),
            config,
            phase: SessionPhase::Idle,
            score: 0,
            pool: TargetPool::new(),
            now_ms: 0,
            events: VecDeque::with_capacity(MAX_PENDING_EVENTS),
            next_id: 1,
        })
    }

    /// Allocate a new target ID
    fn next_target_id(&mut self) -> TargetId {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    fn record(&mut self, event: GameEvent) {
        if self.events.len() == MAX_PENDING_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Start (or restart) a session. Allowed from any phase; a running
    /// session is simply reset.
    pub fn start(&mut self) {
        if self.phase == SessionPhase::Running {
            log::info!("Restarting running session (score was {})", self.score);
        }

        self.phase = SessionPhase::Running;
        self.score = 0;
        self.pool.clear();
        self.clock.arm(self.now_ms);
        self.spawner.arm(self.now_ms);

        log::info!(
            "Session started: {}s on {}x{} surface",
            self.clock.remaining(),
            self.config.width,
            self.config.height
        );
        self.record(GameEvent::SessionStarted {
            seconds: self.clock.remaining(),
        });
    }

    /// Credit at most one target under the pointer. No effect unless running.
    pub fn register_hit(&mut self, point: Vec2) -> HitOutcome {
        if self.phase != SessionPhase::Running {
            log::trace!("Ignoring hit query at {point} while {:?}", self.phase);
            return HitOutcome::miss(self.score);
        }

        let Some(id) = self.pool.hit_test(point).map(|t| t.id) else {
            return HitOutcome::miss(self.score);
        };

        self.pool.remove(id);
        self.score += POINTS_PER_HIT;
        log::debug!("Hit target {id} at {point}, score {}", self.score);
        self.record(GameEvent::TargetHit {
            id,
            score: self.score,
        });

        HitOutcome {
            hit: true,
            new_score: self.score,
            target: Some(id),
        }
    }

    /// Convenience for hosts that deal in bare coordinates
    pub fn submit_hit_query(&mut self, x: f32, y: f32) -> HitOutcome {
        self.register_hit(Vec2::new(x, y))
    }

    /// One countdown tick. Ends the session when time runs out.
    ///
    /// Logical time moves to the instant this tick was due, and targets whose
    /// lifetime ended by then are reaped before the countdown decrements.
    pub fn advance_clock(&mut self) {
        if self.phase != SessionPhase::Running {
            log::trace!("Clock tick ignored while {:?}", self.phase);
            return;
        }

        if let Some(due) = self.clock.trigger().next_due() {
            self.set_now(due);
        }
        self.clock.trigger_mut().fire();
        self.sweep_expired();

        match self.clock.tick() {
            ClockTick::Stopped => {}
            ClockTick::Ticked(remaining) => log::trace!("Clock: {remaining}s left"),
            ClockTick::Expired => self.on_clock_zero(),
        }
    }

    /// One spawner tick: adds exactly one target while running.
    /// Moves logical time to the instant the tick was due, like `advance_clock`.
    pub fn advance_spawner(&mut self) {
        if self.phase != SessionPhase::Running || !self.spawner.is_running() {
            log::trace!("Spawner tick ignored while {:?}", self.phase);
            return;
        }

        if let Some(due) = self.spawner.trigger().next_due() {
            self.set_now(due);
        }
        self.spawner.trigger_mut().fire();
        self.sweep_expired();

        let id = self.next_target_id();
        let target = self.spawner.spawn(id, self.now_ms);
        self.insert_target(target);
    }

    /// Place a target by hand with the configured lifetime. Running only;
    /// the radius must be finite and positive.
    pub fn place_target(&mut self, center: Vec2, radius: f32) -> Option<TargetId> {
        if self.phase != SessionPhase::Running {
            return None;
        }
        if !radius.is_finite() || radius <= 0.0 {
            log::warn!("Refusing target with radius {radius}");
            return None;
        }

        let id = self.next_target_id();
        let target = Target::new(id, center, radius, self.now_ms, self.spawner.ttl_ms());
        self.insert_target(target).then_some(id)
    }

    fn insert_target(&mut self, target: Target) -> bool {
        let id = target.id;
        log::debug!(
            "Spawned target {id} at {} r={:.1}, expires at {}ms",
            target.pos,
            target.radius,
            target.expires_at_ms
        );
        let inserted = self.pool.insert(target);
        if inserted {
            self.record(GameEvent::TargetSpawned { id });
        }
        inserted
    }

    /// Transition to `Ended` and cancel both periodic triggers. Idempotent.
    pub fn on_clock_zero(&mut self) {
        if self.phase == SessionPhase::Ended {
            return;
        }

        self.clock.stop();
        self.spawner.stop();
        self.phase = SessionPhase::Ended;

        log::info!("Session ended, final score {}", self.score);
        self.record(GameEvent::SessionEnded {
            final_score: self.score,
        });
    }

    /// Expire one target by id. No-op if it is already gone.
    pub fn expire(&mut self, id: TargetId) -> bool {
        let removed = self.pool.expire(id);
        if removed {
            log::debug!("Target {id} expired");
            self.record(GameEvent::TargetExpired { id });
        }
        removed
    }

    /// Move logical time to `now_ms` (host time) and drop every target whose
    /// lifetime has ended. Runs in every phase: expiry is independent of the
    /// session triggers. Returns how many targets were reaped.
    pub fn reap_expired(&mut self, now_ms: u64) -> usize {
        self.set_now(now_ms);
        self.sweep_expired()
    }

    fn sweep_expired(&mut self) -> usize {
        let reaped = self.pool.reap_expired(self.now_ms);
        for &id in &reaped {
            log::debug!("Target {id} expired");
            self.record(GameEvent::TargetExpired { id });
        }
        reaped.len()
    }

    /// Move logical time forward without dispatching anything.
    /// Time is monotonic: an instant earlier than the current one is ignored.
    pub(crate) fn set_now(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    /// Take all events recorded since the last drain, oldest first.
    /// At most `MAX_PENDING_EVENTS` are kept between drains.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    // === Read accessors ===

    pub fn state(&self) -> SessionPhase {
        self.phase
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn time_remaining(&self) -> u32 {
        self.clock.remaining()
    }

    /// Live targets, oldest first
    pub fn live_targets(&self) -> &[Target] {
        self.pool.as_slice()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn clock(&self) -> &Countdown {
        &self.clock
    }

    pub fn spawner(&self) -> &Spawner {
        &self.spawner
    }

    pub fn pool(&self) -> &TargetPool {
        &self.pool
    }

    pub fn banner(&self) -> Banner {
        Banner::from_phase(self.phase, self.score)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            score: self.score,
            time_remaining: self.time_remaining(),
            banner: self.banner(),
            surface: (self.config.width, self.config.height),
            targets: self.pool.as_slice().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running_game() -> Game {
        let mut game = Game::new(GameConfig::default()).unwrap();
        game.start();
        game
    }

    #[test]
    fn test_new_game_is_idle() {
        let game = Game::new(GameConfig::default()).unwrap();
        assert_eq!(game.state(), SessionPhase::Idle);
        assert_eq!(game.score(), 0);
        assert_eq!(game.time_remaining(), 30);
        assert!(game.live_targets().is_empty());
        assert_eq!(game.banner(), Banner::Ready);
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let config = GameConfig::with_surface(0.0, 0.0);
        assert!(Game::new(config).is_err());
    }

    #[test]
    fn test_idle_ignores_ticks_and_hits() {
        let mut game = Game::new(GameConfig::default()).unwrap();
        game.advance_clock();
        game.advance_spawner();
        assert_eq!(game.time_remaining(), 30);
        assert!(game.live_targets().is_empty());
        assert!(!game.submit_hit_query(400.0, 300.0).hit);
        assert!(game.place_target(Vec2::new(100.0, 100.0), 30.0).is_none());
    }

    #[test]
    fn test_hit_scores_and_removes() {
        let mut game = running_game();
        let id = game.place_target(Vec2::new(100.0, 100.0), 30.0).unwrap();

        let outcome = game.submit_hit_query(100.0, 100.0);
        assert_eq!(
            outcome,
            HitOutcome {
                hit: true,
                new_score: 10,
                target: Some(id)
            }
        );
        assert!(game.live_targets().is_empty());

        let again = game.submit_hit_query(100.0, 100.0);
        assert!(!again.hit);
        assert_eq!(again.new_score, 10);
    }

    #[test]
    fn test_overlap_credits_one_target() {
        let mut game = running_game();
        let first = game.place_target(Vec2::new(200.0, 200.0), 40.0).unwrap();
        let second = game.place_target(Vec2::new(210.0, 200.0), 40.0).unwrap();

        let outcome = game.submit_hit_query(205.0, 200.0);
        assert_eq!(outcome.target, Some(first));
        assert_eq!(game.score(), 10);
        assert_eq!(game.live_targets().len(), 1);
        assert_eq!(game.live_targets()[0].id, second);
    }

    #[test]
    fn test_spawner_adds_one_target_per_tick() {
        let mut game = running_game();
        game.advance_spawner();
        game.advance_spawner();
        assert_eq!(game.live_targets().len(), 2);
        let ids: Vec<_> = game.live_targets().iter().map(|t| t.id).collect();
        assert!(ids[0] < ids[1]);
    }

    #[test]
    fn test_clock_zero_ends_once() {
        let config = GameConfig {
            session_seconds: 2,
            ..Default::default()
        };
        let mut game = Game::new(config).unwrap();
        game.start();
        game.drain_events();

        game.advance_clock();
        assert_eq!(game.state(), SessionPhase::Running);
        game.advance_clock();
        assert_eq!(game.state(), SessionPhase::Ended);
        game.advance_clock();
        game.on_clock_zero();

        let ended = game
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::SessionEnded { .. }))
            .count();
        assert_eq!(ended, 1);
        assert!(!game.clock().is_running());
        assert!(!game.spawner().is_running());
    }

    #[test]
    fn test_ended_session_is_frozen() {
        let mut game = running_game();
        game.place_target(Vec2::new(100.0, 100.0), 30.0);
        game.on_clock_zero();

        game.advance_spawner();
        assert_eq!(game.live_targets().len(), 1);
        assert!(!game.submit_hit_query(100.0, 100.0).hit);
        assert_eq!(game.score(), 0);
        assert_eq!(game.banner(), Banner::GameOver { final_score: 0 });
    }

    #[test]
    fn test_restart_from_ended() {
        let mut game = running_game();
        game.place_target(Vec2::new(100.0, 100.0), 30.0);
        game.submit_hit_query(100.0, 100.0);
        game.place_target(Vec2::new(300.0, 300.0), 30.0);
        game.on_clock_zero();

        game.start();
        assert_eq!(game.state(), SessionPhase::Running);
        assert_eq!(game.score(), 0);
        assert_eq!(game.time_remaining(), 30);
        assert!(game.live_targets().is_empty());
        assert!(game.clock().is_running());
        assert!(game.spawner().is_running());
    }

    #[test]
    fn test_expire_is_idempotent() {
        let mut game = running_game();
        let id = game.place_target(Vec2::new(100.0, 100.0), 30.0).unwrap();
        game.drain_events();

        assert!(game.expire(id));
        assert!(!game.expire(id));
        assert_eq!(game.drain_events(), vec![GameEvent::TargetExpired { id }]);
    }

    #[test]
    fn test_direct_ticks_expire_targets() {
        let mut game = running_game();
        game.advance_spawner();
        let first = game.live_targets()[0].clone();
        assert_eq!(first.spawned_at_ms, 1_500);

        // Clock ticks due at 1s, 2s and 3s: the target is still live at 3s
        for _ in 0..3 {
            game.advance_clock();
        }
        assert_eq!(game.now_ms(), 3_000);
        assert!(game.pool().contains(first.id));

        // The 4s tick is past its 3.5s expiry
        game.advance_clock();
        assert!(!game.pool().contains(first.id));
    }

    #[test]
    fn test_host_cadence_keeps_pool_small() {
        let mut game = running_game();
        for step in 1..=20 {
            game.advance_clock();
            if step % 3 != 0 {
                game.advance_spawner();
            }
            game.reap_expired(game.now_ms());
            assert!(game.live_targets().len() <= 2, "step {step}");
        }
        let now = game.now_ms();
        assert!(game.live_targets().iter().all(|t| t.is_live_at(now)));
    }

    #[test]
    fn test_reap_expired_uses_host_time() {
        let mut game = running_game();
        let id = game.place_target(Vec2::new(100.0, 100.0), 30.0).unwrap();

        assert_eq!(game.reap_expired(1_999), 0);
        assert!(game.pool().contains(id));
        assert_eq!(game.reap_expired(2_000), 1);
        assert!(!game.pool().contains(id));

        // Time never runs backwards
        assert_eq!(game.reap_expired(500), 0);
        assert_eq!(game.now_ms(), 2_000);
    }

    #[test]
    fn test_undrained_events_stay_bounded() {
        let mut game = Game::new(GameConfig::default()).unwrap();
        for _ in 0..1_000 {
            game.start();
            for _ in 0..30 {
                game.advance_spawner();
                game.advance_clock();
            }
            assert!(game.pending_events() <= MAX_PENDING_EVENTS);
        }

        let events = game.drain_events();
        assert_eq!(events.len(), MAX_PENDING_EVENTS);
        assert!(matches!(events.last(), Some(GameEvent::SessionEnded { .. })));
        assert_eq!(game.pending_events(), 0);
    }

    #[test]
    fn test_place_target_rejects_bad_radius() {
        let mut game = running_game();
        for radius in [0.0, -5.0, f32::NAN, f32::INFINITY] {
            assert!(game.place_target(Vec2::new(100.0, 100.0), radius).is_none());
        }
        assert!(game.live_targets().is_empty());
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut game = running_game();
        game.place_target(Vec2::new(100.0, 100.0), 30.0);
        let snapshot = game.snapshot();
        assert_eq!(snapshot.targets.len(), 1);

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
