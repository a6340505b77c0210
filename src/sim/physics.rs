//! Player integration and entity scrolling
//!
//! One tick is one unit time step (explicit Euler, no sub-stepping). The tick
//! rate is whatever the display refresh delivers, nominally 60 Hz.

use super::state::{Collectible, Obstacle, Player, ShootingStar};
use crate::tuning::Tuning;

/// Whether a jump may start from the player's current state
#[inline]
pub fn can_jump(player: &Player, tuning: &Tuning) -> bool {
    !player.jumping && player.y >= tuning.ground_y() - tuning.jump_ground_tolerance
}

/// Apply the jump impulse if eligible. Returns true if the jump happened.
pub fn try_jump(player: &mut Player, tuning: &Tuning) -> bool {
    if !can_jump(player, tuning) {
        return false;
    }
    player.velocity_y = -tuning.jump_impulse;
    player.jumping = true;
    true
}

/// Advance the player one tick under gravity and clamp to the play area.
/// Returns true when an airborne player touches down this tick.
pub fn integrate_player(player: &mut Player, tuning: &Tuning) -> bool {
    let ground = tuning.ground_y();
    let was_jumping = player.jumping;

    player.velocity_y += tuning.gravity;
    player.y += player.velocity_y;

    if player.y >= ground {
        player.y = ground;
        player.velocity_y = 0.0;
        player.jumping = false;
    }
    if player.y <= 0.0 {
        player.y = 0.0;
        if player.velocity_y < 0.0 {
            player.velocity_y = 0.0;
        }
    }

    was_jumping && !player.jumping
}

/// Scroll buildings left and drop the ones fully past the left edge
pub fn scroll_obstacles(obstacles: &mut Vec<Obstacle>, speed: f32) {
    for obstacle in obstacles.iter_mut() {
        obstacle.x -= speed;
    }
    obstacles.retain(|o| o.x + o.width > 0.0);
}

/// Scroll collectibles left. Ones consumed on an earlier tick are dropped here,
/// so a pickup stays visible for exactly the tick it happened on.
pub fn scroll_collectibles(collectibles: &mut Vec<Collectible>, speed: f32) {
    collectibles.retain(|c| !c.consumed);
    for item in collectibles.iter_mut() {
        item.x -= speed;
    }
    collectibles.retain(|c| c.x + c.width > 0.0);
}

/// Move, age and fade shooting stars; remove expired or off-screen ones
pub fn advance_shooting_stars(stars: &mut Vec<ShootingStar>, tuning: &Tuning, area_height: f32) {
    for star in stars.iter_mut() {
        star.pos += star.direction() * star.speed;
        star.life = star.life.saturating_sub(1);
        star.opacity = (star.opacity - tuning.star_fade_per_tick).max(0.0);
    }
    stars.retain(|s| s.life > 0 && s.pos.x > -s.length && s.pos.y < area_height + s.length);
}
