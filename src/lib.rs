//! Santa's Bag Run - a side-scrolling runner
//!
//! Core modules:
//! - `sim`: Simulation core (physics, spawning, collisions, difficulty, round state machine)
//! - `tuning`: Data-driven game balance
//! - `app`: Countdown, collected counter and high score around the simulation
//! - `persistence`: Key-value storage abstraction
//! - `platform`: Browser host (requestAnimationFrame loop, input, LocalStorage)

pub mod app;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use app::{App, Countdown};
pub use highscores::HighScore;
pub use persistence::{KeyValueStore, MemoryStore};
pub use tuning::{Tuning, TuningError};

/// Play-area geometry and timing constants
pub mod consts {
    /// Nominal display refresh rate the simulation is tuned for
    pub const TICK_HZ: f64 = 60.0;
    /// Milliseconds per nominal tick
    pub const TICK_MS: f64 = 1000.0 / TICK_HZ;

    /// Play-area dimensions (pixels, y grows downward)
    pub const GAME_WIDTH: f32 = 800.0;
    pub const GAME_HEIGHT: f32 = 400.0;
    /// Height of the ground strip at the bottom of the play area
    pub const GROUND_THICKNESS: f32 = 60.0;
    /// y of the ground surface (tops of buildings are measured from here)
    pub const GROUND_SURFACE_Y: f32 = GAME_HEIGHT - GROUND_THICKNESS;

    /// Player sprite bounds
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    /// Fixed horizontal position of the player's left edge
    pub const PLAYER_X: f32 = 50.0;

    /// Round length owned by the application shell
    pub const ROUND_DURATION_SECS: u32 = 60;

    /// LocalStorage key for the persisted high score
    pub const HIGH_SCORE_KEY: &str = "santasBagRunHighScore_v7_1min_files";
}
