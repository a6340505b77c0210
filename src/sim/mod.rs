//! Simulation core
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - One tick per display refresh, one unit time step per tick
//! - Seeded RNG only
//! - Round state owned by [`Simulation`]; renderers only read a [`Snapshot`]

pub mod collision;
pub mod difficulty;
pub mod driver;
pub mod physics;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{CollisionReport, Rect, player_hitbox};
pub use driver::{Simulation, Snapshot};
pub use state::{
    Collectible, CollectibleKind, EndReason, FileStyle, GameEvent, Obstacle, Phase, Player, Round,
    ShootingStar, SpawnSchedule,
};
pub use tick::{TickInput, TickOutcome, tick};
