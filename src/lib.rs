//! Croco Jump - A vertical platformer with a phoneme-practice mode
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, platform field, word task)
//! - `session`: Lifecycle controller that owns the frame loop
//! - `renderer`: Canvas 2D draw command generation
//! - `platform`: Speech and frame scheduling ports
//! - `persistence`: Key-value storage port
//! - `settings`: Data-driven game tuning
//! - `corpus`: Phoneme pairs and their practice words

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod corpus;
pub mod error;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, CorpusError, SessionError};
pub use highscores::HighScore;
pub use session::{Session, SessionOptions, UiSnapshot};
pub use settings::{GameConfig, Variant};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 5;

    /// Logical canvas dimensions (the driver scales to the real canvas)
    pub const CANVAS_WIDTH: f32 = 400.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Platform thickness, shared by both variants
    pub const PLATFORM_HEIGHT: f32 = 15.0;
    /// Extra depth below the platform band that still counts as a landing
    pub const LANDING_TOLERANCE: f32 = 0.0;

    /// Horizontal speed of moving platforms (px/tick)
    pub const MOVING_PLATFORM_SPEED: f32 = 2.0;

    /// Velocity damping per tick when no horizontal key is held (endless)
    pub const HORIZONTAL_DAMPING: f32 = 0.85;

    /// Lives at the start of a phoneme run
    pub const STARTING_LIVES: u8 = 3;
    /// Points for landing on the correct phoneme
    pub const CORRECT_LANDING_POINTS: u64 = 10;
    /// Pixels climbed per point in endless mode
    pub const HEIGHT_PER_POINT: f32 = 10.0;

    /// Maximum words drawn from a phoneme set per run
    pub const MAX_WORDS_PER_RUN: usize = 30;
    /// Speech rate used when pronouncing the target word
    pub const WORD_SPEECH_RATE: f32 = 0.9;
}

/// Wrap a horizontal position so an object leaving one edge re-enters at the other.
///
/// `x` is the left edge, `width` the object's width. The object is allowed to
/// slide fully off-screen before it reappears.
#[inline]
pub fn wrap_horizontal(x: f32, width: f32, canvas_width: f32) -> f32 {
    if x < -width {
        canvas_width
    } else if x > canvas_width {
        -width
    } else {
        x
    }
}

/// Clamp a horizontal position so the object stays fully on-screen
#[inline]
pub fn clamp_horizontal(x: f32, width: f32, canvas_width: f32) -> f32 {
    x.clamp(0.0, (canvas_width - width).max(0.0))
}

/// Maximum height gained from a jump with the given launch velocity and gravity
#[inline]
pub fn max_jump_height(jump_velocity: f32, gravity: f32) -> f32 {
    if gravity <= 0.0 {
        return f32::INFINITY;
    }
    jump_velocity * jump_velocity / (2.0 * gravity)
}
