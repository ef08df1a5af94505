//! Personal records
//!
//! Best score and longest wave reached, persisted through a [`RecordStore`]
//! under the same keys the browser build used.

use serde::{Deserialize, Serialize};

use crate::persistence::RecordStore;

pub const HIGH_SCORE_KEY: &str = "td_highScore";
pub const LONGEST_WAVE_KEY: &str = "td_longestWave";

/// Best results across runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HighScores {
    pub high_score: u64,
    pub longest_wave: u32,
}

/// Which records a finished run beat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecordOutcome {
    pub new_high_score: bool,
    pub new_longest_wave: bool,
}

impl RecordOutcome {
    pub fn any(&self) -> bool {
        self.new_high_score || self.new_longest_wave
    }
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load records. Missing or unparsable values count as zero.
    pub fn load(store: &dyn RecordStore) -> Self {
        let high_score = read_value(store, HIGH_SCORE_KEY);
        let longest_wave = read_value(store, LONGEST_WAVE_KEY);
        log::info!(
            "Loaded records: high score {}, longest wave {}",
            high_score,
            longest_wave
        );
        Self {
            high_score,
            longest_wave,
        }
    }

    /// Fold a finished run into the records
    pub fn record_run(&mut self, score: u64, wave: u32) -> RecordOutcome {
        let mut outcome = RecordOutcome::default();
        if score > self.high_score {
            self.high_score = score;
            outcome.new_high_score = true;
        }
        if wave > self.longest_wave {
            self.longest_wave = wave;
            outcome.new_longest_wave = true;
        }
        outcome
    }

    pub fn save(&self, store: &mut dyn RecordStore) {
        store.set(HIGH_SCORE_KEY, &self.high_score.to_string());
        store.set(LONGEST_WAVE_KEY, &self.longest_wave.to_string());
        log::info!(
            "Records saved (high score {}, longest wave {})",
            self.high_score,
            self.longest_wave
        );
    }
}

fn read_value<T: std::str::FromStr + Default>(store: &dyn RecordStore, key: &str) -> T {
    match store.get(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("Ignoring malformed record {key}={raw:?}");
            T::default()
        }),
        None => T::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_empty_store_loads_zeroes() {
        let store = MemoryStore::new();
        assert_eq!(HighScores::load(&store), HighScores::new());
    }

    #[test]
    fn test_only_better_runs_replace_records() {
        let mut records = HighScores {
            high_score: 500,
            longest_wave: 4,
        };
        let outcome = records.record_run(300, 6);
        assert!(!outcome.new_high_score);
        assert!(outcome.new_longest_wave);
        assert_eq!(records.high_score, 500);
        assert_eq!(records.longest_wave, 6);

        let outcome = records.record_run(500, 6);
        assert!(!outcome.any());
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let records = HighScores {
            high_score: 1234,
            longest_wave: 9,
        };
        records.save(&mut store);
        assert_eq!(store.get(HIGH_SCORE_KEY).as_deref(), Some("1234"));
        assert_eq!(HighScores::load(&store), records);
    }

    #[test]
    fn test_malformed_value_counts_as_zero() {
        let mut store = MemoryStore::new();
        store.set(HIGH_SCORE_KEY, "lots");
        store.set(LONGEST_WAVE_KEY, "3");
        let records = HighScores::load(&store);
        assert_eq!(records.high_score, 0);
        assert_eq!(records.longest_wave, 3);
    }
}
