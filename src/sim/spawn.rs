//! Entity spawning
//!
//! Each entity class keeps its own "next spawn" tick. Once the round's tick
//! counter reaches it, one entity is emitted and the threshold is redrawn.
//! Building and file intervals shrink as speed rises so the spatial gap stays
//! roughly constant; shooting-star intervals ignore speed.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Collectible, CollectibleKind, Obstacle, Round, ShootingStar, SpawnSchedule};
use crate::consts::GAME_WIDTH;
use crate::tuning::Tuning;

/// Thresholds for a fresh round, drawn from the unscaled ranges
pub fn initial_schedule(rng: &mut Pcg32, tuning: &Tuning) -> SpawnSchedule {
    SpawnSchedule {
        next_obstacle: draw_gap(rng, tuning.obstacle_interval_min, tuning.obstacle_interval_max),
        next_collectible: draw_gap(
            rng,
            tuning.collectible_interval_min,
            tuning.collectible_interval_max,
        ),
        next_shooting_star: draw_gap(rng, tuning.star_interval_min, tuning.star_interval_max),
    }
}

/// Unscaled tick gap in `[min, max)`, at least 1
fn draw_gap(rng: &mut Pcg32, min: u32, max: u32) -> u64 {
    (rng.random_range(min..max) as u64).max(1)
}

/// Random tick gap in `[min, max)` divided by the speed ratio, floored, at least 1
pub fn scaled_interval(rng: &mut Pcg32, min: u32, max: u32, speed: f32, initial_speed: f32) -> u64 {
    let base = rng.random_range(min..max) as f32;
    let ratio = speed / initial_speed;
    ((base / ratio).floor() as u64).max(1)
}

/// Run all three spawners for the current tick
pub fn run(round: &mut Round, tuning: &Tuning) {
    if round.ticks >= round.schedule.next_obstacle {
        spawn_obstacle(round, tuning);
        let gap = scaled_interval(
            &mut round.rng,
            tuning.obstacle_interval_min,
            tuning.obstacle_interval_max,
            round.speed,
            tuning.initial_speed,
        );
        round.schedule.next_obstacle = round.ticks + gap;
    }

    if round.ticks >= round.schedule.next_collectible {
        spawn_collectible(round, tuning);
        let gap = scaled_interval(
            &mut round.rng,
            tuning.collectible_interval_min,
            tuning.collectible_interval_max,
            round.speed,
            tuning.initial_speed,
        );
        round.schedule.next_collectible = round.ticks + gap;
    }

    // At the cap the threshold stays armed; a star appears as soon as a slot frees
    if round.ticks >= round.schedule.next_shooting_star
        && round.shooting_stars.len() < tuning.max_shooting_stars
    {
        spawn_shooting_star(round, tuning);
        let gap = draw_gap(&mut round.rng, tuning.star_interval_min, tuning.star_interval_max);
        round.schedule.next_shooting_star = round.ticks + gap;
    }
}

/// New building at the right edge
pub fn spawn_obstacle(round: &mut Round, tuning: &Tuning) {
    let width = round
        .rng
        .random_range(tuning.obstacle_min_width..=tuning.obstacle_max_width) as f32;
    let id = round.next_entity_id();
    round.obstacles.push(Obstacle {
        id,
        x: GAME_WIDTH,
        width,
        height: tuning.obstacle_height,
    });
    log::debug!("tick {}: building {} ({}px wide)", round.ticks, id, width);
}

/// New file at the right edge, at the round's fixed height
pub fn spawn_collectible(round: &mut Round, tuning: &Tuning) {
    let index = round.rng.random_range(0..CollectibleKind::ALL.len());
    let kind = CollectibleKind::ALL[index];
    let id = round.next_entity_id();
    round.collectibles.push(Collectible {
        id,
        kind,
        x: GAME_WIDTH,
        y: round.collectible_y,
        width: tuning.collectible_width,
        height: tuning.collectible_height,
        consumed: false,
    });
    log::debug!("tick {}: {} file {}", round.ticks, kind.id(), id);
}

/// New streak just above the visible sky
pub fn spawn_shooting_star(round: &mut Round, tuning: &Tuning) {
    let rng = &mut round.rng;
    let x = rng.random_range(0.0..GAME_WIDTH);
    let length = rng.random_range(tuning.star_min_length..tuning.star_max_length);
    let angle_deg = tuning.star_min_angle_deg + rng.random_range(0.0..tuning.star_angle_spread_deg);
    let speed = rng.random_range(tuning.star_min_speed..tuning.star_max_speed);

    let id = round.next_entity_id();
    round.shooting_stars.push(ShootingStar {
        id,
        pos: Vec2::new(x, tuning.star_spawn_y),
        length,
        angle_deg,
        speed,
        opacity: 1.0,
        life: tuning.star_lifetime_ticks,
    });
}
