//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`]. Defaults reproduce the
//! shipped game feel; a JSON override can replace any subset of fields.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{GROUND_SURFACE_Y, PLAYER_HEIGHT, ROUND_DURATION_SECS};

/// Rejected tuning data
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },
    #[error("{field}: min {min} must be below max {max}")]
    EmptyRange {
        field: &'static str,
        min: f32,
        max: f32,
    },
    #[error("max_speed {max} is below initial_speed {initial}")]
    SpeedCap { initial: f32, max: f32 },
}

/// Gameplay balance. Units are pixels and ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Length of a round, counted down by the application shell
    pub round_duration_secs: u32,

    // === Player physics ===
    /// Downward acceleration added to vertical velocity every tick
    pub gravity: f32,
    /// Upward velocity applied by a jump
    pub jump_impulse: f32,
    /// How close to the ground line a jump may start
    pub jump_ground_tolerance: f32,

    // === Scroll speed ===
    pub initial_speed: f32,
    pub max_speed: f32,
    /// Ticks between time-based speed increases
    pub time_boost_interval_ticks: u64,
    pub time_boost_amount: f32,
    /// Speed added per collectible picked up
    pub pickup_boost_amount: f32,

    // === Obstacles (buildings) ===
    pub obstacle_min_width: u32,
    pub obstacle_max_width: u32,
    pub obstacle_height: f32,
    pub obstacle_interval_min: u32,
    pub obstacle_interval_max: u32,

    // === Collectibles (files) ===
    pub collectible_width: f32,
    pub collectible_height: f32,
    pub collectible_interval_min: u32,
    pub collectible_interval_max: u32,

    // === Shooting stars (decorative) ===
    pub max_shooting_stars: usize,
    pub star_interval_min: u32,
    pub star_interval_max: u32,
    pub star_min_speed: f32,
    pub star_max_speed: f32,
    pub star_min_length: f32,
    pub star_max_length: f32,
    /// Shallowest travel angle below horizontal (degrees)
    pub star_min_angle_deg: f32,
    /// Spread added on top of `star_min_angle_deg` (degrees)
    pub star_angle_spread_deg: f32,
    pub star_lifetime_ticks: u32,
    pub star_fade_per_tick: f32,
    pub star_spawn_y: f32,

    // === Player hit-box, as fractions of the sprite ===
    pub hitbox_inset_x: f32,
    pub hitbox_inset_y: f32,
    pub hitbox_width: f32,
    pub hitbox_height: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            round_duration_secs: ROUND_DURATION_SECS,

            gravity: 0.45,
            jump_impulse: 11.5,
            jump_ground_tolerance: 5.0,

            initial_speed: 5.5,
            max_speed: 14.0,
            time_boost_interval_ticks: 300, // ~5s at 60 Hz
            time_boost_amount: 0.1,
            pickup_boost_amount: 0.05,

            obstacle_min_width: 40,
            obstacle_max_width: 60,
            obstacle_height: PLAYER_HEIGHT,
            obstacle_interval_min: 150,
            obstacle_interval_max: 250,

            collectible_width: 35.0,
            collectible_height: 28.0,
            collectible_interval_min: 180,
            collectible_interval_max: 280,

            max_shooting_stars: 3,
            star_interval_min: 100,
            star_interval_max: 300,
            star_min_speed: 3.0,
            star_max_speed: 6.0,
            star_min_length: 40.0,
            star_max_length: 80.0,
            star_min_angle_deg: 20.0,
            star_angle_spread_deg: 45.0,
            star_lifetime_ticks: 100,
            star_fade_per_tick: 0.01,
            star_spawn_y: -20.0,

            hitbox_inset_x: 0.1,
            hitbox_inset_y: 0.05,
            hitbox_width: 0.65,
            hitbox_height: 0.9,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON override. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check that every range can be sampled and every rate makes progress
    pub fn validate(&self) -> Result<(), TuningError> {
        for (field, value) in [
            ("gravity", self.gravity),
            ("jump_impulse", self.jump_impulse),
            ("initial_speed", self.initial_speed),
            ("obstacle_height", self.obstacle_height),
            ("collectible_width", self.collectible_width),
            ("collectible_height", self.collectible_height),
            ("star_fade_per_tick", self.star_fade_per_tick),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(TuningError::NotPositive { field, value });
            }
        }
        for (field, value) in [
            ("time_boost_amount", self.time_boost_amount),
            ("pickup_boost_amount", self.pickup_boost_amount),
        ] {
            if value.is_nan() || value < 0.0 {
                return Err(TuningError::Negative { field, value });
            }
        }
        if self.round_duration_secs == 0 {
            return Err(TuningError::NotPositive {
                field: "round_duration_secs",
                value: 0.0,
            });
        }
        if self.time_boost_interval_ticks == 0 {
            return Err(TuningError::NotPositive {
                field: "time_boost_interval_ticks",
                value: 0.0,
            });
        }

        if self.max_speed < self.initial_speed {
            return Err(TuningError::SpeedCap {
                initial: self.initial_speed,
                max: self.max_speed,
            });
        }

        // Widths are sampled inclusively, everything else half-open
        if self.obstacle_min_width > self.obstacle_max_width {
            return Err(TuningError::EmptyRange {
                field: "obstacle_width",
                min: self.obstacle_min_width as f32,
                max: self.obstacle_max_width as f32,
            });
        }
        for (field, min, max) in [
            (
                "obstacle_interval",
                self.obstacle_interval_min as f32,
                self.obstacle_interval_max as f32,
            ),
            (
                "collectible_interval",
                self.collectible_interval_min as f32,
                self.collectible_interval_max as f32,
            ),
            (
                "star_interval",
                self.star_interval_min as f32,
                self.star_interval_max as f32,
            ),
            ("star_speed", self.star_min_speed, self.star_max_speed),
            ("star_length", self.star_min_length, self.star_max_length),
            ("star_angle", 0.0, self.star_angle_spread_deg),
        ] {
            // NaN bounds compare as None and are rejected too
            if min.partial_cmp(&max) != Some(Ordering::Less) {
                return Err(TuningError::EmptyRange { field, min, max });
            }
        }
        Ok(())
    }

    /// y of the player's top edge when standing on the ground
    #[inline]
    pub fn ground_y(&self) -> f32 {
        GROUND_SURFACE_Y - PLAYER_HEIGHT
    }

    /// Height above the ground line reached by a single jump: v²/(2g)
    #[inline]
    pub fn peak_jump_height(&self) -> f32 {
        self.jump_impulse * self.jump_impulse / (2.0 * self.gravity)
    }

    /// y at which every collectible of a round spawns
    #[inline]
    pub fn collectible_y(&self) -> f32 {
        self.ground_y() - self.peak_jump_height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_collectible_height_matches_jump_peak() {
        let tuning = Tuning::default();
        assert_eq!(tuning.ground_y(), 280.0);
        // 11.5² / 0.9
        assert!((tuning.peak_jump_height() - 146.944).abs() < 0.01);
        assert!((tuning.collectible_y() - 133.056).abs() < 0.01);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "max_speed": 20.0, "gravity": 0.5 }"#).unwrap();
        assert_eq!(tuning.max_speed, 20.0);
        assert_eq!(tuning.gravity, 0.5);
        assert_eq!(tuning.initial_speed, Tuning::default().initial_speed);
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_empty_interval() {
        let json = r#"{ "obstacle_interval_min": 300, "obstacle_interval_max": 300 }"#;
        let err = Tuning::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            TuningError::EmptyRange {
                field: "obstacle_interval",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_cap_below_initial() {
        let err = Tuning::from_json(r#"{ "max_speed": 1.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::SpeedCap { .. }));
    }

    #[test]
    fn test_rejects_negative_boost() {
        let err = Tuning::from_json(r#"{ "pickup_boost_amount": -0.5 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Negative {
                field: "pickup_boost_amount",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_zero_gravity() {
        let err = Tuning::from_json(r#"{ "gravity": 0.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::NotPositive { field: "gravity", .. }));
    }

    #[test]
    fn test_rejects_nan_star_range() {
        let tuning = Tuning {
            star_max_speed: f32::NAN,
            ..Tuning::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::EmptyRange {
                field: "star_speed",
                ..
            })
        ));
    }
}
