//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per call, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod field;
pub mod state;
pub mod task;
pub mod tick;

pub use collision::{Landing, find_landing, landing_depth};
pub use state::{
    GameEvent, GameOverReason, GamePhase, GameState, PhonemeSide, Platform, PlatformKind, Player,
    Verdict,
};
pub use task::{WordEntry, WordTask};
pub use tick::{TickInput, autopilot, tick};
