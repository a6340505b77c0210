//! Round state and entity records
//!
//! Everything a round mutates lives in [`Round`]. Starting a new round throws
//! the old one away; nothing carries over except the externally stored high
//! score.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::spawn;
use crate::tuning::Tuning;

/// Why a round stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// Player ran into a building
    Collision,
    /// The application's countdown reached zero
    TimeUp,
}

/// Simulation lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum Phase {
    /// Before the first round, or after teardown
    Idle,
    /// Ticking once per display refresh
    Running,
    /// Terminal outcome recorded, waiting for a restart
    Ended(EndReason),
}

/// Something the surrounding application may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    Jumped,
    Landed,
    CollectibleConsumed { id: u32, kind: CollectibleKind },
    RoundEnded { reason: EndReason },
}

/// Player vertical state. Horizontal position is fixed at [`crate::consts::PLAYER_X`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top edge, pixels from the top of the play area
    pub y: f32,
    /// Downward positive
    pub velocity_y: f32,
    pub jumping: bool,
}

impl Player {
    /// Standing on the ground line, at rest
    pub fn grounded(tuning: &Tuning) -> Self {
        Self {
            y: tuning.ground_y(),
            velocity_y: 0.0,
            jumping: false,
        }
    }
}

/// A building scrolling toward the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge
    pub x: f32,
    pub width: f32,
    pub height: f32,
}

/// Visual file type of a collectible. Only affects rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectibleKind {
    Ppt,
    Excel,
    Pdf,
    Word,
    Image,
}

/// Render colors and caption for a file icon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStyle {
    pub label: &'static str,
    pub base_color: &'static str,
    pub icon_color: &'static str,
    pub tab_color: &'static str,
}

impl CollectibleKind {
    pub const ALL: [CollectibleKind; 5] = [
        CollectibleKind::Ppt,
        CollectibleKind::Excel,
        CollectibleKind::Pdf,
        CollectibleKind::Word,
        CollectibleKind::Image,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            CollectibleKind::Ppt => "ppt",
            CollectibleKind::Excel => "excel",
            CollectibleKind::Pdf => "pdf",
            CollectibleKind::Word => "word",
            CollectibleKind::Image => "image",
        }
    }

    /// Look up a tag by id. Unknown tags yield `None` and the renderer skips them.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }

    pub fn style(&self) -> FileStyle {
        match self {
            CollectibleKind::Ppt => FileStyle {
                label: "PPT",
                base_color: "#D04424",
                icon_color: "#FFFFFF",
                tab_color: "#B0341A",
            },
            CollectibleKind::Excel => FileStyle {
                label: "XLS",
                base_color: "#107C41",
                icon_color: "#FFFFFF",
                tab_color: "#0C5C2F",
            },
            CollectibleKind::Pdf => FileStyle {
                label: "PDF",
                base_color: "#AE0F0A",
                icon_color: "#FFFFFF",
                tab_color: "#8E0C08",
            },
            CollectibleKind::Word => FileStyle {
                label: "DOC",
                base_color: "#2B579A",
                icon_color: "#FFFFFF",
                tab_color: "#1F3F7A",
            },
            CollectibleKind::Image => FileStyle {
                label: "IMG",
                base_color: "#753BBD",
                icon_color: "#FFFFFF",
                tab_color: "#5D2E9A",
            },
        }
    }
}

/// A file floating at jump-peak height
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub kind: CollectibleKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Set on pickup; the entity is dropped on the following tick
    pub consumed: bool,
}

/// Decorative streak across the sky. Never collides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShootingStar {
    pub id: u32,
    /// Head of the streak
    pub pos: Vec2,
    pub length: f32,
    /// Degrees below horizontal, travelling leftward
    pub angle_deg: f32,
    /// Pixels per tick
    pub speed: f32,
    pub opacity: f32,
    /// Ticks remaining
    pub life: u32,
}

impl ShootingStar {
    /// Unit travel direction (left and down)
    pub fn direction(&self) -> Vec2 {
        let theta = self.angle_deg.to_radians();
        Vec2::new(-theta.cos(), theta.sin())
    }
}

/// Tick thresholds at which the next entity of each class appears
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnSchedule {
    pub next_obstacle: u64,
    pub next_collectible: u64,
    pub next_shooting_star: u64,
}

/// All mutable state of one round
#[derive(Debug, Clone)]
pub struct Round {
    /// Increments on every start
    pub id: u32,
    pub seed: u64,
    /// Ticks elapsed since the round started
    pub ticks: u64,
    /// Current scroll speed (pixels per tick)
    pub speed: f32,
    /// Tick of the last time-based speed increase
    pub last_speed_boost_tick: u64,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub collectibles: Vec<Collectible>,
    pub shooting_stars: Vec<ShootingStar>,
    pub schedule: SpawnSchedule,
    /// Collectible spawn height, fixed for the round
    pub collectible_y: f32,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl Round {
    /// Fresh round: player on the ground, no entities, thresholds drawn from the unscaled ranges
    pub fn new(id: u32, seed: u64, tuning: &Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let schedule = spawn::initial_schedule(&mut rng, tuning);
        Self {
            id,
            seed,
            ticks: 0,
            speed: tuning.initial_speed,
            last_speed_boost_tick: 0,
            player: Player::grounded(tuning),
            obstacles: Vec::new(),
            collectibles: Vec::new(),
            shooting_stars: Vec::new(),
            schedule,
            collectible_y: tuning.collectible_y(),
            rng,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_round_is_clean() {
        let tuning = Tuning::default();
        let round = Round::new(3, 42, &tuning);
        assert_eq!(round.id, 3);
        assert_eq!(round.ticks, 0);
        assert_eq!(round.speed, tuning.initial_speed);
        assert_eq!(round.player, Player::grounded(&tuning));
        assert!(round.obstacles.is_empty());
        assert!(round.collectibles.is_empty());
        assert!(round.shooting_stars.is_empty());
        assert!(round.schedule.next_obstacle >= tuning.obstacle_interval_min as u64);
        assert!(round.schedule.next_obstacle < tuning.obstacle_interval_max as u64);
    }

    #[test]
    fn test_entity_ids_increase() {
        let mut round = Round::new(1, 7, &Tuning::default());
        let a = round.next_entity_id();
        let b = round.next_entity_id();
        assert!(b > a);
    }

    #[test]
    fn test_collectible_kind_lookup() {
        for kind in CollectibleKind::ALL {
            assert_eq!(CollectibleKind::from_id(kind.id()), Some(kind));
        }
        assert_eq!(CollectibleKind::from_id("zip"), None);
        assert_eq!(CollectibleKind::Excel.style().label, "XLS");
    }

    #[test]
    fn test_shooting_star_heads_left_and_down() {
        let star = ShootingStar {
            id: 1,
            pos: Vec2::ZERO,
            length: 50.0,
            angle_deg: 30.0,
            speed: 4.0,
            opacity: 1.0,
            life: 100,
        };
        let dir = star.direction();
        assert!(dir.x < 0.0);
        assert!(dir.y > 0.0);
        assert!((dir.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_phase_serializes_with_reason() {
        let json = serde_json::to_string(&Phase::Ended(EndReason::TimeUp)).unwrap();
        assert_eq!(json, r#"{"state":"ended","reason":"time_up"}"#);
    }
}
