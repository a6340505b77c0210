//! Axis-aligned hit-box tests
//!
//! The player's hit-box is tighter than the sprite so near misses feel fair.
//! Buildings are anchored to the ground surface.

use serde::{Deserialize, Serialize};

use super::state::{CollectibleKind, Obstacle, Player, Round};
use crate::consts::{GROUND_SURFACE_Y, PLAYER_HEIGHT, PLAYER_WIDTH, PLAYER_X};
use crate::tuning::Tuning;

/// Screen-space rectangle, y grows downward
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Strict overlap; shared edges do not count
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

/// Forgiving sub-rectangle of the player sprite
pub fn player_hitbox(player: &Player, tuning: &Tuning) -> Rect {
    Rect::new(
        PLAYER_X + PLAYER_WIDTH * tuning.hitbox_inset_x,
        player.y + PLAYER_HEIGHT * tuning.hitbox_inset_y,
        PLAYER_WIDTH * tuning.hitbox_width,
        PLAYER_HEIGHT * tuning.hitbox_height,
    )
}

pub fn obstacle_hitbox(obstacle: &Obstacle) -> Rect {
    Rect::new(
        obstacle.x,
        GROUND_SURFACE_Y - obstacle.height,
        obstacle.width,
        obstacle.height,
    )
}

/// Result of one collision pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    /// Player overlapped a building; the round is over
    pub fatal: bool,
    /// Collectibles picked up this tick, in list order
    pub consumed: Vec<(u32, CollectibleKind)>,
}

/// Test the player against every live building, then every unconsumed
/// collectible. A fatal hit short-circuits: nothing is picked up that tick.
/// Consumed collectibles are flagged in place.
pub fn detect(round: &mut Round, tuning: &Tuning) -> CollisionReport {
    let player = player_hitbox(&round.player, tuning);

    if round
        .obstacles
        .iter()
        .any(|o| player.overlaps(&obstacle_hitbox(o)))
    {
        return CollisionReport {
            fatal: true,
            consumed: Vec::new(),
        };
    }

    let mut report = CollisionReport::default();
    for item in round.collectibles.iter_mut().filter(|c| !c.consumed) {
        let rect = Rect::new(item.x, item.y, item.width, item.height);
        if player.overlaps(&rect) {
            item.consumed = true;
            report.consumed.push((item.id, item.kind));
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Collectible;

    fn collectible(id: u32, x: f32, y: f32) -> Collectible {
        Collectible {
            id,
            kind: CollectibleKind::Word,
            x,
            y,
            width: 35.0,
            height: 28.0,
            consumed: false,
        }
    }

    #[test]
    fn test_rect_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        // Touching edges only
        assert!(!a.overlaps(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(0.0, 10.0, 10.0, 10.0)));
        // Separated on one axis
        assert!(!a.overlaps(&Rect::new(20.0, 5.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(5.0, -20.0, 10.0, 10.0)));
    }

    #[test]
    fn test_player_hitbox_is_inset() {
        let tuning = Tuning::default();
        let player = Player::grounded(&tuning);
        let hitbox = player_hitbox(&player, &tuning);
        let expected = Rect::new(54.0, 283.0, 26.0, 54.0);
        for (got, want) in [
            (hitbox.x, expected.x),
            (hitbox.y, expected.y),
            (hitbox.w, expected.w),
            (hitbox.h, expected.h),
        ] {
            assert!((got - want).abs() < 1e-3, "expected {want}, got {got}");
        }
    }

    #[test]
    fn test_obstacle_hit_is_fatal_and_skips_pickups() {
        let tuning = Tuning::default();
        let mut round = Round::new(1, 1, &tuning);
        round.obstacles.push(Obstacle {
            id: 10,
            x: 60.0,
            width: 40.0,
            height: 60.0,
        });
        round.collectibles.push(collectible(11, 55.0, 290.0));

        let report = detect(&mut round, &tuning);
        assert!(report.fatal);
        assert!(report.consumed.is_empty());
        assert!(!round.collectibles[0].consumed);
    }

    #[test]
    fn test_building_just_past_player_is_safe() {
        let tuning = Tuning::default();
        let mut round = Round::new(1, 1, &tuning);
        // Right edge at 54 meets the hit-box's left edge exactly
        round.obstacles.push(Obstacle {
            id: 10,
            x: 14.0,
            width: 40.0,
            height: 60.0,
        });
        assert!(!detect(&mut round, &tuning).fatal);
    }

    #[test]
    fn test_multiple_pickups_in_one_tick() {
        let tuning = Tuning::default();
        let mut round = Round::new(1, 1, &tuning);
        round.collectibles.push(collectible(1, 50.0, 290.0));
        round.collectibles.push(collectible(2, 60.0, 300.0));
        round.collectibles.push(collectible(3, 400.0, 300.0));

        let report = detect(&mut round, &tuning);
        assert!(!report.fatal);
        assert_eq!(
            report.consumed,
            vec![(1, CollectibleKind::Word), (2, CollectibleKind::Word)]
        );
        assert!(round.collectibles[0].consumed);
        assert!(!round.collectibles[2].consumed);

        // Already consumed items are never reported again
        let again = detect(&mut round, &tuning);
        assert!(again.consumed.is_empty());
    }

    #[test]
    fn test_grounded_player_misses_floating_files() {
        let tuning = Tuning::default();
        let mut round = Round::new(1, 1, &tuning);
        let y = round.collectible_y;
        round.collectibles.push(collectible(1, 54.0, y));
        assert!(detect(&mut round, &tuning).consumed.is_empty());
    }
}
