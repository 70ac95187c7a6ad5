//! Game state and core simulation types
//!
//! Everything the tick mutates lives here. The session owns one `GameState`
//! per run and throws it away on restart.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::task::{WordEntry, WordTask};
use crate::consts::*;
use crate::settings::{GameConfig, Variant};

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first key press
    NotStarted,
    /// Active gameplay
    Running,
    /// Game is paused
    Paused,
    /// Run ended
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// Fell below the bottom of the screen
    Fell,
    /// Lost every life on wrong platforms or falls
    OutOfLives,
    /// Every word in the queue was answered (the win condition)
    WordsExhausted,
}

/// Which phoneme of the active pair a platform carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhonemeSide {
    First,
    Second,
}

/// Platform kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlatformKind {
    #[default]
    Normal,
    /// Slides horizontally, reversing at the canvas edges
    Moving,
    /// Bounces once, then breaks
    Crumbling,
    /// Never bounces
    Passthrough,
    /// Launches higher than a normal bounce
    Spring,
    /// Unjudged platform under the player at the start of a phoneme run
    Start,
    /// Judged against the target phoneme
    Phoneme(PhonemeSide),
}

impl PlatformKind {
    /// Whether landing on this kind can ever bounce
    pub fn is_solid(&self) -> bool {
        !matches!(self, PlatformKind::Passthrough)
    }
}

/// Outcome of landing on a phoneme platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Correct,
    Wrong,
}

/// The player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Player {
    /// Player standing centered on the start platform, already jumping
    pub fn spawn(config: &GameConfig) -> Self {
        Self {
            pos: Vec2::new(
                CANVAS_WIDTH / 2.0 - config.player_width / 2.0,
                config.player_start_y,
            ),
            vel: Vec2::new(0.0, config.jump_velocity),
            width: config.player_width,
            height: config.player_height,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.height
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.width
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn is_falling(&self) -> bool {
        self.vel.y > 0.0
    }
}

/// A platform entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub kind: PlatformKind,
    /// Crumbled or answered wrong; no longer bounces
    pub broken: bool,
    /// Phoneme judgement, once landed on
    pub verdict: Option<Verdict>,
    /// Horizontal direction (+1/-1) for moving platforms
    pub direction: Option<f32>,
}

impl Platform {
    pub fn new(id: u32, pos: Vec2, width: f32, kind: PlatformKind) -> Self {
        Self {
            id,
            pos,
            width,
            kind,
            broken: false,
            verdict: None,
            direction: None,
        }
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.width
    }

    /// Whether a falling player can land on it right now
    pub fn can_land(&self) -> bool {
        !self.broken && self.kind.is_solid()
    }

    /// Slide a moving platform one tick, bouncing off the canvas edges
    pub fn drift(&mut self, canvas_width: f32) {
        let Some(dir) = self.direction else {
            return;
        };
        self.pos.x += dir * MOVING_PLATFORM_SPEED;
        let max_x = canvas_width - self.width;
        if self.pos.x <= 0.0 {
            self.pos.x = 0.0;
            self.direction = Some(dir.abs());
        } else if self.pos.x >= max_x {
            self.pos.x = max_x;
            self.direction = Some(-dir.abs());
        }
    }
}

/// Things that happened during a tick, drained by the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player bounced off a platform
    Bounced { platform_id: u32 },
    /// A crumbling platform broke after its single bounce
    PlatformCrumbled { platform_id: u32 },
    /// Landed on the phoneme of the current word
    CorrectLanding { platform_id: u32 },
    /// Landed on the other phoneme
    WrongLanding { platform_id: u32 },
    /// New target word; the session pronounces it
    WordAdvanced { word: String },
    /// A life was lost
    LifeLost { remaining: u8 },
    /// Run ended
    GameOver { reason: GameOverReason },
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Placement and kind RNG
    pub rng: Pcg32,
    pub config: GameConfig,
    pub phase: GamePhase,
    pub game_over_reason: Option<GameOverReason>,
    /// Score (height-based in endless, correct landings in phoneme)
    pub score: u64,
    /// Lives left (phoneme only)
    pub lives: Option<u8>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Total world scroll, drives the endless score
    pub cumulative_shift: f32,
    pub player: Player,
    /// Live platforms, ordered by id
    pub platforms: Vec<Platform>,
    /// Word queue (phoneme only)
    pub task: Option<WordTask>,
    /// Events from the latest ticks, not yet handled
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new endless run
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self::with_words(config, seed, Vec::new())
    }

    /// Create a new run. `words` feeds the phoneme task and is ignored by
    /// the endless variant.
    pub fn with_words(config: GameConfig, seed: u64, words: Vec<WordEntry>) -> Self {
        let variant = config.variant;
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::spawn(&config),
            config,
            phase: if variant.waits_for_input() {
                GamePhase::NotStarted
            } else {
                GamePhase::Running
            },
            game_over_reason: None,
            score: 0,
            lives: match variant {
                Variant::Endless => None,
                Variant::Phoneme => Some(STARTING_LIVES),
            },
            time_ticks: 0,
            cumulative_shift: 0.0,
            platforms: Vec::new(),
            task: match variant {
                Variant::Endless => None,
                Variant::Phoneme => Some(WordTask::new(words)),
            },
            events: Vec::new(),
            next_id: 1,
        };

        super::field::populate(&mut state);

        // First word is announced before the player moves
        if state.task.is_some() {
            super::tick::advance_word(&mut state);
        }

        state
    }

    pub fn variant(&self) -> Variant {
        self.config.variant
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Current target word (phoneme only)
    pub fn current_word(&self) -> Option<&WordEntry> {
        self.task.as_ref().and_then(|t| t.current())
    }

    /// Take the events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// End the run. Only the first call has an effect.
    pub fn end(&mut self, reason: GameOverReason) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        log::info!("Game over ({:?}) with score {}", reason, self.score);
        self.phase = GamePhase::GameOver;
        self.game_over_reason = Some(reason);
        self.events.push(GameEvent::GameOver { reason });
    }

    /// Ensure platforms are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.platforms.sort_by_key(|p| p.id);
    }
}
