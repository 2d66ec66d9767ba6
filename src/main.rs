//! Target Rush headless driver
//!
//! Plays one full session in logical time with a scripted pointer that clicks
//! the oldest target once it has been visible for a reaction delay, then
//! prints the final snapshot as JSON.
//!
//! Usage: `target-rush [config.json]` (log level via `RUST_LOG`)

/// Simulated frame length (60 Hz)
#[cfg(not(target_arch = "wasm32"))]
const FRAME_SECS: f32 = 1.0 / 60.0;
/// How long the scripted pointer waits before clicking a fresh target
#[cfg(not(target_arch = "wasm32"))]
const REACTION_MS: u64 = 450;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use target_rush::sim::FrameDriver;
    use target_rush::{Game, GameConfig, GameEvent, SessionPhase};

    env_logger::init();
    log::info!("Target Rush (headless) starting...");

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let loaded = std::fs::read_to_string(&path)
                .map_err(|e| e.to_string())
                .and_then(|json| GameConfig::from_json(&json).map_err(|e| e.to_string()));
            match loaded {
                Ok(config) => {
                    log::info!("Loaded config from {path}");
                    config
                }
                Err(e) => {
                    log::error!("Invalid config {path}: {e}");
                    std::process::exit(2);
                }
            }
        }
        None => GameConfig::default(),
    };

    let mut game = match Game::new(config) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Cannot create game: {e}");
            std::process::exit(2);
        }
    };
    let mut driver = FrameDriver::new();

    game.start();
    while game.state() == SessionPhase::Running {
        driver.update(&mut game, FRAME_SECS);

        let now = game.now_ms();
        let aim = game
            .live_targets()
            .first()
            .filter(|t| now >= t.spawned_at_ms + REACTION_MS)
            .map(|t| t.pos);
        if let Some(point) = aim {
            game.register_hit(point);
        }

        for event in game.drain_events() {
            match event {
                GameEvent::TargetHit { id, score } => log::info!("Hit #{id} -> {score}"),
                GameEvent::TargetExpired { id } => log::info!("Missed #{id}"),
                GameEvent::SessionEnded { final_score } => {
                    log::info!("Game over! Final score: {final_score}")
                }
                other => log::debug!("{other:?}"),
            }
        }
    }

    match serde_json::to_string_pretty(&game.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize snapshot: {e}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host drives `target_rush::Game` directly
}
