//! Santa's Bag Run entry point
//!
//! The browser build is driven by `platform::web::WebGame`. Natively this is a
//! headless runner: an autopilot plays one round at the nominal frame rate
//! and prints a JSON summary.
//!
//! Usage: `bag-run [seed]`. Set `BAG_RUN_TUNING` to a JSON file to override
//! game balance.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use bag_run::consts::{PLAYER_WIDTH, PLAYER_X, TICK_MS};
    use bag_run::sim::Round;
    use bag_run::{App, MemoryStore, Tuning};

    /// Ticks of lead before an obstacle reaches the player
    const JUMP_LEAD_TICKS: f32 = 18.0;

    pub fn run() {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

        let seed = match std::env::args().nth(1) {
            Some(arg) => arg.parse().unwrap_or_else(|_| {
                log::warn!("Seed {:?} is not a number, picking one", arg);
                rand::random()
            }),
            None => rand::random(),
        };

        let mut app = App::new(load_tuning(), MemoryStore::new());
        app.start(seed);

        let mut now_ms = 0.0;
        while app.is_running() {
            if should_jump(app.simulation().round()) {
                app.jump();
            }
            app.frame(now_ms);
            now_ms += TICK_MS;
        }

        let round = app.simulation().round();
        let summary = serde_json::json!({
            "seed": seed,
            "reason": app.end_reason(),
            "collected": app.collected(),
            "ticks": round.ticks,
            "speed": round.speed,
            "high_score": app.high_score(),
        });
        println!("{}", summary);
    }

    fn load_tuning() -> Tuning {
        let Ok(path) = std::env::var("BAG_RUN_TUNING") else {
            return Tuning::default();
        };
        let loaded = std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()));
        match loaded {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning file {}: {}", path, e);
                Tuning::default()
            }
        }
    }

    /// Jump when grounded and the nearest building ahead is about to arrive
    fn should_jump(round: &Round) -> bool {
        if round.player.jumping {
            return false;
        }
        let front = PLAYER_X + PLAYER_WIDTH;
        round
            .obstacles
            .iter()
            .map(|o| o.x - front)
            .filter(|gap| *gap >= 0.0)
            .any(|gap| gap <= round.speed * JUMP_LEAD_TICKS)
    }
}
