//! Score and high score
//!
//! The high score is a single number persisted in the key-value store
//! (LocalStorage on the web) and only ever moves up.

use crate::platform::KeyValueStore;

#[derive(Debug, Clone, Default)]
pub struct ScoreTracker {
    score: u64,
    high_score: u64,
    /// A new high score has been reached but not yet written out
    unsaved_high: bool,
}

impl ScoreTracker {
    /// Storage key for the high score
    pub const STORAGE_KEY: &'static str = "plane_panic_hiscore";

    /// Create a tracker with no history
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tracker seeded with the persisted high score
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let high_score = match store.get(Self::STORAGE_KEY) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(value) => {
                    log::info!("Loaded high score {}", value);
                    value
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
        Self {
            score: 0,
            high_score,
            unsaved_high: false,
        }
    }

    /// Add points; returns true if this set a new high score
    pub fn add_score(&mut self, points: u64) -> bool {
        self.score = self.score.saturating_add(points);
        if self.score > self.high_score {
            self.high_score = self.score;
            self.unsaved_high = true;
            return true;
        }
        false
    }

    /// Start a new run (the high score is kept)
    pub fn reset(&mut self) {
        self.score = 0;
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    /// Write the high score out if it changed since the last save
    pub fn persist(&mut self, store: &mut dyn KeyValueStore) {
        if self.unsaved_high {
            store.set(Self::STORAGE_KEY, &self.high_score.to_string());
            self.unsaved_high = false;
            log::info!("High score saved ({})", self.high_score);
        }
    }
}
