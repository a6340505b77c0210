//! Persisted high score
//!
//! A single number: the most files collected in any round. Stored as a
//! decimal string under [`HIGH_SCORE_KEY`].

use crate::consts::HIGH_SCORE_KEY;
use crate::persistence::KeyValueStore;

/// Best score tracker backed by a key-value store
#[derive(Debug, Clone)]
pub struct HighScore<S: KeyValueStore> {
    store: S,
    best: u32,
}

impl<S: KeyValueStore> HighScore<S> {
    /// Read the stored best. Missing or corrupt values count as 0.
    pub fn load(store: S) -> Self {
        let best = match store.get(HIGH_SCORE_KEY) {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(score) => {
                    log::info!("Loaded high score {}", score);
                    score
                }
                Err(_) => {
                    log::warn!("Ignoring unreadable high score {:?}", raw);
                    0
                }
            },
            None => {
                log::info!("No high score found, starting fresh");
                0
            }
        };
        Self { store, best }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Record `score` if it strictly beats the stored best.
    /// Returns true when the store was written.
    pub fn submit(&mut self, score: u32) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        self.store.set(HIGH_SCORE_KEY, &score.to_string());
        log::info!("New high score: {}", score);
        true
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
