//! Best score per variant
//!
//! Persisted through the key-value store. Only replaced when beaten.

use serde::{Deserialize, Serialize};

use crate::persistence::KeyValueStore;
use crate::settings::Variant;

/// Stored best score for one variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HighScore {
    pub variant: Variant,
    pub score: u64,
}

impl HighScore {
    pub fn new(variant: Variant) -> Self {
        Self { variant, score: 0 }
    }

    /// Storage key for a variant
    pub fn storage_key(variant: Variant) -> &'static str {
        match variant {
            Variant::Endless => "doodlejump_highscore",
            Variant::Phoneme => "croco_jump_phoneme_highscore",
        }
    }

    /// Check if a score beats the stored best
    pub fn beaten_by(&self, score: u64) -> bool {
        score > self.score
    }

    /// Record a final score. Returns true if it became the new best.
    pub fn submit(&mut self, score: u64) -> bool {
        if !self.beaten_by(score) {
            return false;
        }
        self.score = score;
        true
    }

    /// Load the best score. The value is a bare integer string; anything
    /// unparsable counts as no score yet.
    pub fn load(store: &dyn KeyValueStore, variant: Variant) -> Self {
        let key = Self::storage_key(variant);
        match store.get(key) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(score) => {
                    log::info!("Loaded {} high score: {}", variant.as_str(), score);
                    Self { variant, score }
                }
                Err(_) => {
                    log::warn!("Ignoring unreadable high score {:?}", raw);
                    Self::new(variant)
                }
            },
            None => {
                log::info!("No {} high score found, starting fresh", variant.as_str());
                Self::new(variant)
            }
        }
    }

    /// Save the best score (write-through)
    pub fn save(&self, store: &mut dyn KeyValueStore) {
        store.set(Self::storage_key(self.variant), &self.score.to_string());
        log::info!("High score saved ({})", self.score);
    }
}
