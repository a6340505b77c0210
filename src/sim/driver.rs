//! Round lifecycle: Idle -> Running -> Ended
//!
//! [`Simulation`] owns the round exclusively. Hosts call `tick` once per
//! display refresh and read back a [`Snapshot`]; input arrives between ticks
//! as `jump`/`start`/`time_up` and is buffered until the next tick.

use serde::Serialize;

use super::state::{
    Collectible, EndReason, GameEvent, Obstacle, Phase, Player, Round, ShootingStar,
};
use super::tick::{TickInput, tick};
use crate::tuning::Tuning;

/// Read-only view of the round for renderers
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub phase: Phase,
    pub round_id: u32,
    pub ticks: u64,
    pub speed: f32,
    pub player: &'a Player,
    pub obstacles: &'a [Obstacle],
    /// Includes items consumed on the latest tick
    pub collectibles: &'a [Collectible],
    pub shooting_stars: &'a [ShootingStar],
}

/// The simulation core and its state machine
#[derive(Debug, Clone)]
pub struct Simulation {
    tuning: Tuning,
    phase: Phase,
    round: Round,
    /// At most one jump waits for the next tick
    jump_pending: bool,
}

impl Simulation {
    /// Idle simulation showing an empty round. Tuning that fails
    /// [`Tuning::validate`] is replaced by the defaults.
    pub fn new(tuning: Tuning) -> Self {
        let tuning = match tuning.validate() {
            Ok(()) => tuning,
            Err(e) => {
                log::warn!("Rejected tuning, using defaults: {}", e);
                Tuning::default()
            }
        };
        let round = Round::new(0, 0, &tuning);
        Self {
            tuning,
            phase: Phase::Idle,
            round,
            jump_pending: false,
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        match self.phase {
            Phase::Ended(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    #[cfg(test)]
    pub(crate) fn round_mut(&mut self) -> &mut Round {
        &mut self.round
    }

    /// Discard all round state and begin a new round. Valid from any phase;
    /// a running round is forcibly reset. Returns the new round id.
    pub fn start(&mut self, seed: u64) -> u32 {
        let id = self.round.id.wrapping_add(1);
        self.round = Round::new(id, seed, &self.tuning);
        self.jump_pending = false;
        self.phase = Phase::Running;
        log::info!("Round {} started (seed {})", id, seed);
        id
    }

    /// Request a jump on the next tick. Repeated calls coalesce, and the
    /// airborne guard decides whether it happens. No-op unless running.
    pub fn jump(&mut self) {
        if self.is_running() {
            self.jump_pending = true;
        }
    }

    /// The host's countdown ran out. Ends a running round with `TimeUp`;
    /// ignored in any other phase.
    pub fn time_up(&mut self) -> Option<GameEvent> {
        if !self.is_running() {
            return None;
        }
        self.finish(EndReason::TimeUp);
        Some(GameEvent::RoundEnded {
            reason: EndReason::TimeUp,
        })
    }

    /// Teardown: stop ticking and return to Idle. Idempotent.
    pub fn stop(&mut self) {
        if self.phase != Phase::Idle {
            log::info!("Simulation stopped at tick {}", self.round.ticks);
        }
        self.phase = Phase::Idle;
        self.jump_pending = false;
    }

    /// Advance one tick. Outside Running nothing changes and no events are produced.
    pub fn tick(&mut self) -> Vec<GameEvent> {
        if !self.is_running() {
            return Vec::new();
        }

        let input = TickInput {
            jump: std::mem::take(&mut self.jump_pending),
        };
        let outcome = tick(&mut self.round, &input, &self.tuning);
        if let Some(reason) = outcome.ended {
            self.finish(reason);
        }
        outcome.events
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.phase,
            round_id: self.round.id,
            ticks: self.round.ticks,
            speed: self.round.speed,
            player: &self.round.player,
            obstacles: &self.round.obstacles,
            collectibles: &self.round.collectibles,
            shooting_stars: &self.round.shooting_stars,
        }
    }

    fn finish(&mut self, reason: EndReason) {
        self.phase = Phase::Ended(reason);
        self.jump_pending = false;
        log::info!(
            "Round {} ended: {:?} after {} ticks (speed {:.2})",
            self.round.id,
            reason,
            self.round.ticks,
            self.round.speed
        );
    }
}
