//! Scroll speed progression
//!
//! Speed only grows within a round: a small step every fixed number of ticks,
//! and a smaller one per collectible picked up. Both clamp at `max_speed`.

use super::state::Round;
use crate::tuning::Tuning;

/// `speed + amount`, never above `max` and never below `speed`
#[inline]
pub fn boosted(speed: f32, amount: f32, max: f32) -> f32 {
    (speed + amount.max(0.0)).min(max).max(speed)
}

/// Time-based increase. Returns true if the interval elapsed this tick.
pub fn apply_time_boost(round: &mut Round, tuning: &Tuning) -> bool {
    if round.ticks - round.last_speed_boost_tick < tuning.time_boost_interval_ticks {
        return false;
    }
    round.speed = boosted(round.speed, tuning.time_boost_amount, tuning.max_speed);
    round.last_speed_boost_tick = round.ticks;
    log::debug!("tick {}: speed now {:.2}", round.ticks, round.speed);
    true
}

/// Per-pickup increase, applied immediately
pub fn apply_pickup_boost(round: &mut Round, tuning: &Tuning) {
    round.speed = boosted(round.speed, tuning.pickup_boost_amount, tuning.max_speed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_boost_every_interval() {
        let tuning = Tuning::default();
        let mut round = Round::new(1, 1, &tuning);

        round.ticks = tuning.time_boost_interval_ticks - 1;
        assert!(!apply_time_boost(&mut round, &tuning));
        assert_eq!(round.speed, tuning.initial_speed);

        round.ticks = tuning.time_boost_interval_ticks;
        assert!(apply_time_boost(&mut round, &tuning));
        assert!((round.speed - (tuning.initial_speed + tuning.time_boost_amount)).abs() < 1e-6);

        // Next one is measured from the last boost
        round.ticks += 1;
        assert!(!apply_time_boost(&mut round, &tuning));
        round.ticks = tuning.time_boost_interval_ticks * 2;
        assert!(apply_time_boost(&mut round, &tuning));
    }

    #[test]
    fn test_pickups_clamp_at_max() {
        let tuning = Tuning::default();
        let mut round = Round::new(1, 1, &tuning);
        for _ in 0..10_000 {
            let before = round.speed;
            apply_pickup_boost(&mut round, &tuning);
            assert!(round.speed >= before);
            assert!(round.speed <= tuning.max_speed);
        }
        assert_eq!(round.speed, tuning.max_speed);
    }

    #[test]
    fn test_boosted_never_decreases() {
        assert_eq!(boosted(5.0, -1.0, 14.0), 5.0);
        assert_eq!(boosted(13.99, 0.1, 14.0), 14.0);
        assert_eq!(boosted(14.0, 0.1, 14.0), 14.0);
    }
}
