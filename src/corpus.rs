//! Phoneme word catalogue
//!
//! Each set pairs two similar-sounding phonemes with words that contain
//! them. A run draws a shuffled queue of up to `MAX_WORDS_PER_RUN` words
//! from one set.

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use serde::{Deserialize, Serialize};

use crate::consts::MAX_WORDS_PER_RUN;
use crate::error::CorpusError;
use crate::sim::{PhonemeSide, WordEntry};

const BUILTIN_SETS: &str = include_str!("../data/phoneme_sets.json");

/// One phoneme pair and its practice words
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhonemeSet {
    /// Display label, e.g. "С-Ш"
    pub pair: String,
    pub phoneme1: String,
    pub phoneme2: String,
    pub words1: Vec<String>,
    pub words2: Vec<String>,
}

impl PhonemeSet {
    /// Phoneme shown on platforms of the given side
    pub fn phoneme(&self, side: PhonemeSide) -> &str {
        match side {
            PhonemeSide::First => &self.phoneme1,
            PhonemeSide::Second => &self.phoneme2,
        }
    }

    pub fn word_count(&self) -> usize {
        self.words1.len() + self.words2.len()
    }

    /// Join both word lists, shuffle and keep at most `limit` words
    pub fn build_queue<R: Rng + ?Sized>(&self, rng: &mut R, limit: usize) -> Vec<WordEntry> {
        let mut words: Vec<WordEntry> = self
            .words1
            .iter()
            .map(|w| WordEntry::new(w.clone(), PhonemeSide::First))
            .chain(
                self.words2
                    .iter()
                    .map(|w| WordEntry::new(w.clone(), PhonemeSide::Second)),
            )
            .collect();
        words.shuffle(rng);
        words.truncate(limit);
        words
    }

    /// Queue with the default run length
    pub fn run_queue<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<WordEntry> {
        self.build_queue(rng, MAX_WORDS_PER_RUN)
    }
}

/// The full catalogue
#[derive(Debug, Clone)]
pub struct Corpus {
    sets: Vec<PhonemeSet>,
}

impl Corpus {
    /// Catalogue shipped with the game
    pub fn builtin() -> Result<Self, CorpusError> {
        Self::from_json(BUILTIN_SETS)
    }

    /// Parse and check a catalogue
    pub fn from_json(json: &str) -> Result<Self, CorpusError> {
        let sets: Vec<PhonemeSet> = serde_json::from_str(json)?;
        if sets.is_empty() {
            return Err(CorpusError::EmptySet("corpus".to_string()));
        }
        if let Some(empty) = sets.iter().find(|s| s.word_count() == 0) {
            return Err(CorpusError::EmptySet(empty.pair.clone()));
        }
        log::info!("Loaded {} phoneme sets", sets.len());
        Ok(Self { sets })
    }

    pub fn sets(&self) -> &[PhonemeSet] {
        &self.sets
    }

    /// Pair labels in catalogue order
    pub fn pairs(&self) -> impl Iterator<Item = &str> {
        self.sets.iter().map(|s| s.pair.as_str())
    }

    /// Look up a set by its pair label
    pub fn find(&self, pair: &str) -> Result<&PhonemeSet, CorpusError> {
        self.sets
            .iter()
            .find(|s| s.pair == pair)
            .ok_or_else(|| CorpusError::UnknownPair(pair.to_string()))
    }

    /// Set by label, or a random one when no label is given
    pub fn pick<R: Rng + ?Sized>(
        &self,
        pair: Option<&str>,
        rng: &mut R,
    ) -> Result<&PhonemeSet, CorpusError> {
        match pair {
            Some(pair) => self.find(pair),
            None => self
                .sets
                .choose(rng)
                .ok_or_else(|| CorpusError::EmptySet("corpus".to_string())),
        }
    }
}
