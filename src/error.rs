//! Error types for the fallible edges (tuning, word corpus, session setup)
//!
//! The simulation itself never fails; these only surface while building a run.

use thiserror::Error;

/// Invalid game tuning
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Platform gap is higher than the player can jump
    #[error("platform gap {gap} exceeds max jump height {max_jump:.1}")]
    UnreachableGap { gap: f32, max_jump: f32 },

    /// Platform does not fit on the canvas
    #[error("platform width {width} exceeds canvas width {canvas_width}")]
    PlatformTooWide { width: f32, canvas_width: f32 },

    /// Player does not fit on the canvas
    #[error("player width {width} exceeds canvas width {canvas_width}")]
    PlayerTooWide { width: f32, canvas_width: f32 },

    /// Field must hold at least one platform
    #[error("platform field must hold at least one platform")]
    EmptyField,

    /// Gravity must pull down and jumps must go up
    #[error("invalid physics: gravity {gravity}, jump velocity {jump_velocity}")]
    InvalidPhysics { gravity: f32, jump_velocity: f32 },

    /// Endless mode needs at least one platform kind with a positive weight
    #[error("platform kind weights sum to zero")]
    ZeroWeights,

    /// Variant name not recognised
    #[error("unknown game variant: {0:?}")]
    UnknownVariant(String),
}

/// Word corpus errors
#[derive(Debug, Error)]
pub enum CorpusError {
    /// Corpus JSON failed to parse
    #[error("corpus parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Requested phoneme pair is not in the corpus
    #[error("unknown phoneme pair: {0}")]
    UnknownPair(String),

    /// Corpus (or a set in it) has no words
    #[error("phoneme set is empty: {0}")]
    EmptySet(String),
}

/// Failure to set up a session
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Corpus(#[from] CorpusError),
}
