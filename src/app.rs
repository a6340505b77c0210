//! Application shell around the simulation
//!
//! Owns what the simulation deliberately does not: the round countdown, the
//! running count of collected files, and the persisted high score. Hosts feed
//! it frame timestamps; it decides whether the frame is a tick or the end of
//! the round.

use crate::highscores::HighScore;
use crate::persistence::KeyValueStore;
use crate::sim::{EndReason, GameEvent, Phase, Simulation};
use crate::tuning::Tuning;

/// Wall-clock countdown in whole seconds, driven by frame timestamps
#[derive(Debug, Clone)]
pub struct Countdown {
    duration_secs: u32,
    remaining_secs: u32,
    carry_ms: f64,
    last_frame_ms: Option<f64>,
}

impl Countdown {
    pub fn new(duration_secs: u32) -> Self {
        Self {
            duration_secs,
            remaining_secs: duration_secs,
            carry_ms: 0.0,
            last_frame_ms: None,
        }
    }

    /// Back to full time; the next frame establishes the time base
    pub fn reset(&mut self) {
        self.remaining_secs = self.duration_secs;
        self.carry_ms = 0.0;
        self.last_frame_ms = None;
    }

    pub fn remaining(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_secs == 0
    }

    /// Account for time elapsed since the previous frame. Returns true once expired.
    pub fn advance(&mut self, now_ms: f64) -> bool {
        if let Some(last) = self.last_frame_ms {
            self.carry_ms += (now_ms - last).max(0.0);
        }
        self.last_frame_ms = Some(now_ms);

        while self.carry_ms >= 1000.0 && self.remaining_secs > 0 {
            self.carry_ms -= 1000.0;
            self.remaining_secs -= 1;
        }
        self.is_expired()
    }
}

/// The game as a host sees it
#[derive(Debug)]
pub struct App<S: KeyValueStore> {
    sim: Simulation,
    countdown: Countdown,
    high_score: HighScore<S>,
    collected: u32,
}

impl<S: KeyValueStore> App<S> {
    /// Idle app; reads the stored high score immediately. Invalid tuning
    /// falls back to the defaults, countdown included.
    pub fn new(tuning: Tuning, store: S) -> Self {
        let sim = Simulation::new(tuning);
        let countdown = Countdown::new(sim.tuning().round_duration_secs);
        Self {
            sim,
            countdown,
            high_score: HighScore::load(store),
            collected: 0,
        }
    }

    /// Start (or restart) a round from any state
    pub fn start(&mut self, seed: u64) {
        self.collected = 0;
        self.countdown.reset();
        self.sim.start(seed);
    }

    pub fn jump(&mut self) {
        self.sim.jump();
    }

    /// Teardown; no further frames advance anything
    pub fn stop(&mut self) {
        self.sim.stop();
    }

    /// One display refresh. The countdown is checked first: if it has run
    /// out the round ends with `TimeUp` and no tick is simulated.
    pub fn frame(&mut self, now_ms: f64) -> Vec<GameEvent> {
        if !self.sim.is_running() {
            return Vec::new();
        }

        if self.countdown.advance(now_ms) {
            return self.sim.time_up().into_iter().collect();
        }

        let events = self.sim.tick();
        for event in &events {
            if let GameEvent::CollectibleConsumed { .. } = event {
                self.collected += 1;
                self.high_score.submit(self.collected);
            }
        }
        events
    }

    pub fn is_running(&self) -> bool {
        self.sim.is_running()
    }

    pub fn phase(&self) -> Phase {
        self.sim.phase()
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.sim.end_reason()
    }

    pub fn collected(&self) -> u32 {
        self.collected
    }

    pub fn high_score(&self) -> u32 {
        self.high_score.best()
    }

    pub fn time_left(&self) -> u32 {
        self.countdown.remaining()
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    #[cfg(test)]
    pub(crate) fn simulation_mut(&mut self) -> &mut Simulation {
        &mut self.sim
    }

    pub fn storage(&self) -> &S {
        self.high_score.store()
    }
}
