//! Fixed-step simulation tick
//!
//! Order within a tick: clock, difficulty, player physics, spawning,
//! scrolling, collision. Collision runs last so it sees final positions.

use super::collision;
use super::difficulty;
use super::physics;
use super::spawn;
use super::state::{EndReason, GameEvent, Round};
use crate::consts::GAME_HEIGHT;
use crate::tuning::Tuning;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// A jump was requested since the last tick
    pub jump: bool,
}

/// What a tick produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    pub events: Vec<GameEvent>,
    /// Set when the tick ended the round
    pub ended: Option<EndReason>,
}

/// Advance the round by one tick
pub fn tick(round: &mut Round, input: &TickInput, tuning: &Tuning) -> TickOutcome {
    let mut outcome = TickOutcome::default();

    round.ticks += 1;

    difficulty::apply_time_boost(round, tuning);

    if input.jump && physics::try_jump(&mut round.player, tuning) {
        outcome.events.push(GameEvent::Jumped);
    }
    if physics::integrate_player(&mut round.player, tuning) {
        outcome.events.push(GameEvent::Landed);
    }

    spawn::run(round, tuning);

    physics::scroll_obstacles(&mut round.obstacles, round.speed);
    physics::scroll_collectibles(&mut round.collectibles, round.speed);
    physics::advance_shooting_stars(&mut round.shooting_stars, tuning, GAME_HEIGHT);

    let report = collision::detect(round, tuning);
    if report.fatal {
        outcome.events.push(GameEvent::RoundEnded {
            reason: EndReason::Collision,
        });
        outcome.ended = Some(EndReason::Collision);
        return outcome;
    }

    for (id, kind) in report.consumed {
        difficulty::apply_pickup_boost(round, tuning);
        outcome
            .events
            .push(GameEvent::CollectibleConsumed { id, kind });
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Collectible, CollectibleKind, Obstacle};

    fn file_on_player(round: &mut Round) {
        let id = round.next_entity_id();
        // One tick of scrolling still leaves it over the hit-box
        let x = 54.0 + round.speed;
        round.collectibles.push(Collectible {
            id,
            kind: CollectibleKind::Ppt,
            x,
            y: 290.0,
            width: 35.0,
            height: 28.0,
            consumed: false,
        });
    }

    #[test]
    fn test_tick_advances_clock() {
        let tuning = Tuning::default();
        let mut round = Round::new(1, 1, &tuning);
        let outcome = tick(&mut round, &TickInput::default(), &tuning);
        assert_eq!(round.ticks, 1);
        assert!(outcome.events.is_empty());
        assert!(outcome.ended.is_none());
    }

    #[test]
    fn test_jump_event_then_landing() {
        let tuning = Tuning::default();
        let mut round = Round::new(1, 1, &tuning);
        let outcome = tick(&mut round, &TickInput { jump: true }, &tuning);
        assert_eq!(outcome.events, vec![GameEvent::Jumped]);
        assert!(round.player.jumping);

        let mut landed = false;
        for _ in 0..100 {
            let outcome = tick(&mut round, &TickInput { jump: true }, &tuning);
            assert!(!outcome.events.contains(&GameEvent::Jumped) || landed);
            if outcome.events.contains(&GameEvent::Landed) {
                landed = true;
                break;
            }
        }
        assert!(landed);
    }

    #[test]
    fn test_consumed_file_visible_for_one_tick() {
        let tuning = Tuning::default();
        let mut round = Round::new(1, 1, &tuning);
        file_on_player(&mut round);

        let outcome = tick(&mut round, &TickInput::default(), &tuning);
        assert!(matches!(
            outcome.events.as_slice(),
            [GameEvent::CollectibleConsumed { kind: CollectibleKind::Ppt, .. }]
        ));
        assert_eq!(round.collectibles.len(), 1);
        assert!(round.collectibles[0].consumed);

        let outcome = tick(&mut round, &TickInput::default(), &tuning);
        assert!(outcome.events.is_empty());
        assert!(round.collectibles.iter().all(|c| !c.consumed));
    }

    #[test]
    fn test_five_pickups_raise_speed_exactly() {
        let tuning = Tuning::default();
        let mut round = Round::new(1, 1, &tuning);
        let mut consumed = 0;
        for _ in 0..5 {
            file_on_player(&mut round);
            let outcome = tick(&mut round, &TickInput::default(), &tuning);
            consumed += outcome
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::CollectibleConsumed { .. }))
                .count();
        }
        assert_eq!(consumed, 5);
        let expected = tuning.initial_speed + 5.0 * tuning.pickup_boost_amount;
        assert!((round.speed - expected).abs() < 1e-5, "speed {}", round.speed);
    }

    #[test]
    fn test_building_collision_ends_round() {
        let tuning = Tuning::default();
        let mut round = Round::new(1, 1, &tuning);
        round.obstacles.push(Obstacle {
            id: 99,
            x: 60.0,
            width: 40.0,
            height: 60.0,
        });
        file_on_player(&mut round);

        let outcome = tick(&mut round, &TickInput::default(), &tuning);
        assert_eq!(outcome.ended, Some(EndReason::Collision));
        assert_eq!(
            outcome.events,
            vec![GameEvent::RoundEnded {
                reason: EndReason::Collision
            }]
        );
        assert_eq!(round.speed, tuning.initial_speed);
    }
}
