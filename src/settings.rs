//! Game tuning per variant
//!
//! Persisted separately from high scores in the key-value store. Every value
//! is validated before a run is built from it.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::error::ConfigError;
use crate::max_jump_height;
use crate::persistence::KeyValueStore;

/// Game variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Variant {
    /// Score by height, categorized platform physics
    #[default]
    Endless,
    /// Land on the platform carrying the phoneme of the spoken word
    Phoneme,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Endless => "endless",
            Variant::Phoneme => "phoneme",
        }
    }

    /// Whether the player wraps around the horizontal edges (otherwise clamps)
    pub fn wraps_horizontally(&self) -> bool {
        matches!(self, Variant::Endless)
    }

    /// Whether horizontal movement keeps momentum between ticks
    pub fn has_horizontal_inertia(&self) -> bool {
        matches!(self, Variant::Endless)
    }

    /// Whether the run starts on the first key press instead of immediately
    pub fn waits_for_input(&self) -> bool {
        matches!(self, Variant::Phoneme)
    }
}

impl FromStr for Variant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "endless" | "classic" => Ok(Variant::Endless),
            "phoneme" | "phonemes" | "words" => Ok(Variant::Phoneme),
            _ => Err(ConfigError::UnknownVariant(s.to_string())),
        }
    }
}

/// Relative spawn weights for endless platform kinds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformWeights {
    pub normal: u32,
    pub moving: u32,
    pub crumbling: u32,
    pub passthrough: u32,
    #[serde(default)]
    pub spring: u32,
}

impl Default for PlatformWeights {
    fn default() -> Self {
        Self {
            normal: 65,
            moving: 15,
            crumbling: 10,
            passthrough: 5,
            spring: 5,
        }
    }
}

impl PlatformWeights {
    pub fn total(&self) -> u32 {
        self.normal + self.moving + self.crumbling + self.passthrough + self.spring
    }
}

/// Tuning for one variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub variant: Variant,

    // === Physics (px/tick units) ===
    /// Added to vertical velocity every tick
    pub gravity: f32,
    /// Vertical velocity after a bounce (negative is up)
    pub jump_velocity: f32,
    /// Vertical velocity after a spring pad bounce
    pub spring_velocity: f32,
    /// Horizontal speed while a direction key is held
    pub move_speed: f32,

    // === Sizes ===
    pub player_width: f32,
    pub player_height: f32,
    pub platform_width: f32,

    // === Field ===
    /// Live platform count kept in the field
    pub platform_count: usize,
    /// Vertical distance between consecutive platforms
    pub platform_gap: f32,
    /// Player y above which the world scrolls
    pub scroll_threshold: f32,
    /// Endless platform kind weights
    #[serde(default)]
    pub weights: PlatformWeights,

    // === Start ===
    /// Player top edge at the start of a run
    pub player_start_y: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::endless()
    }
}

impl GameConfig {
    /// Endless platformer tuning
    pub fn endless() -> Self {
        Self {
            variant: Variant::Endless,
            gravity: 0.33,
            jump_velocity: -11.0,
            spring_velocity: -17.6,
            move_speed: 5.0,
            player_width: 50.0,
            player_height: 50.0,
            platform_width: 65.0,
            platform_count: 12,
            platform_gap: 50.0,
            scroll_threshold: CANVAS_HEIGHT / 2.0,
            weights: PlatformWeights::default(),
            player_start_y: CANVAS_HEIGHT - 150.0,
        }
    }

    /// Phoneme practice tuning
    pub fn phoneme() -> Self {
        Self {
            variant: Variant::Phoneme,
            gravity: 0.4,
            jump_velocity: -11.0,
            spring_velocity: -11.0,
            move_speed: 5.0,
            player_width: 55.0,
            player_height: 55.0,
            platform_width: 70.0,
            platform_count: 7,
            platform_gap: 85.0,
            scroll_threshold: CANVAS_HEIGHT / 3.0,
            weights: PlatformWeights::default(),
            player_start_y: CANVAS_HEIGHT - 150.0,
        }
    }

    /// Default tuning for a variant
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Endless => Self::endless(),
            Variant::Phoneme => Self::phoneme(),
        }
    }

    /// Highest point a normal bounce can reach above the platform
    pub fn max_jump_height(&self) -> f32 {
        max_jump_height(self.jump_velocity, self.gravity)
    }

    /// Check that a run built from this tuning is playable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gravity <= 0.0 || self.jump_velocity >= 0.0 {
            return Err(ConfigError::InvalidPhysics {
                gravity: self.gravity,
                jump_velocity: self.jump_velocity,
            });
        }
        if self.platform_count == 0 {
            return Err(ConfigError::EmptyField);
        }
        if self.platform_width > CANVAS_WIDTH {
            return Err(ConfigError::PlatformTooWide {
                width: self.platform_width,
                canvas_width: CANVAS_WIDTH,
            });
        }
        if self.player_width > CANVAS_WIDTH {
            return Err(ConfigError::PlayerTooWide {
                width: self.player_width,
                canvas_width: CANVAS_WIDTH,
            });
        }
        let max_jump = self.max_jump_height();
        if self.platform_gap > max_jump {
            return Err(ConfigError::UnreachableGap {
                gap: self.platform_gap,
                max_jump,
            });
        }
        if self.variant == Variant::Endless && self.weights.total() == 0 {
            return Err(ConfigError::ZeroWeights);
        }
        Ok(())
    }

    fn storage_key(variant: Variant) -> String {
        format!("croco_jump_config_{}", variant.as_str())
    }

    /// Load tuning from the store, falling back to the variant defaults when
    /// the stored value is missing, unparsable or fails validation
    pub fn load(store: &dyn KeyValueStore, variant: Variant) -> Self {
        if let Some(json) = store.get(&Self::storage_key(variant)) {
            match serde_json::from_str::<GameConfig>(&json) {
                Ok(config) if config.variant == variant => match config.validate() {
                    Ok(()) => {
                        log::info!("Loaded {} tuning from storage", variant.as_str());
                        return config;
                    }
                    Err(e) => log::warn!("Stored {} tuning rejected: {}", variant.as_str(), e),
                },
                Ok(_) => log::warn!("Stored tuning is for a different variant, ignoring"),
                Err(e) => log::warn!("Stored {} tuning unreadable: {}", variant.as_str(), e),
            }
        }

        log::info!("Using default {} tuning", variant.as_str());
        Self::for_variant(variant)
    }

    /// Save tuning to the store
    pub fn save(&self, store: &mut dyn KeyValueStore) {
        if let Ok(json) = serde_json::to_string(self) {
            store.set(&Self::storage_key(self.variant), &json);
            log::info!("{} tuning saved", self.variant.as_str());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(GameConfig::endless().validate(), Ok(()));
        assert_eq!(GameConfig::phoneme().validate(), Ok(()));
    }

    #[test]
    fn test_unreachable_gap_rejected() {
        let mut config = GameConfig::endless();
        config.platform_gap = 400.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnreachableGap { .. })
        ));
    }

    #[test]
    fn test_oversize_platform_rejected() {
        let mut config = GameConfig::phoneme();
        config.platform_width = 500.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PlatformTooWide { .. })
        ));
    }

    #[test]
    fn test_zero_weights_only_matter_for_endless() {
        let weights = PlatformWeights {
            normal: 0,
            moving: 0,
            crumbling: 0,
            passthrough: 0,
            spring: 0,
        };
        let mut endless = GameConfig::endless();
        endless.weights = weights;
        assert_eq!(endless.validate(), Err(ConfigError::ZeroWeights));

        let mut phoneme = GameConfig::phoneme();
        phoneme.weights = weights;
        assert_eq!(phoneme.validate(), Ok(()));
    }

    #[test]
    fn test_variant_parse() {
        assert_eq!("Endless".parse::<Variant>(), Ok(Variant::Endless));
        assert_eq!("phoneme".parse::<Variant>(), Ok(Variant::Phoneme));
        assert_eq!(" words ".parse::<Variant>(), Ok(Variant::Phoneme));
        assert_eq!(
            "filword".parse::<Variant>(),
            Err(ConfigError::UnknownVariant("filword".to_string()))
        );
        for variant in [Variant::Endless, Variant::Phoneme] {
            assert_eq!(variant.as_str().parse::<Variant>(), Ok(variant));
        }
    }

    #[test]
    fn test_load_save_roundtrip_and_fallback() {
        let mut store = MemoryStore::new();
        assert_eq!(GameConfig::load(&store, Variant::Endless), GameConfig::endless());

        let mut tuned = GameConfig::endless();
        tuned.move_speed = 4.5;
        tuned.save(&mut store);
        assert_eq!(GameConfig::load(&store, Variant::Endless).move_speed, 4.5);

        // Invalid tuning falls back to defaults
        let mut broken = GameConfig::endless();
        broken.platform_gap = 1000.0;
        broken.save(&mut store);
        assert_eq!(GameConfig::load(&store, Variant::Endless), GameConfig::endless());

        store.set("croco_jump_config_phoneme", "not json");
        assert_eq!(GameConfig::load(&store, Variant::Phoneme), GameConfig::phoneme());
    }
}
