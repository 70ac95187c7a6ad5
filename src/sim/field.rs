//! Platform field: procedural generation and scrolling
//!
//! The field always holds `config.platform_count` platforms. When the player
//! climbs past the scroll threshold the world shifts down, platforms that
//! fall off the bottom are dropped and replacements spawn above the highest
//! one at a fixed gap.

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, PhonemeSide, Platform, PlatformKind};
use crate::consts::*;
use crate::settings::{GameConfig, PlatformWeights, Variant};

/// Top edge of the start platform, shared by both variants
pub const START_PLATFORM_Y: f32 = CANVAS_HEIGHT - 100.0;

/// Build the initial field: a start platform under the player, the rest
/// stacked above it
pub fn populate(state: &mut GameState) {
    state.platforms.clear();

    let width = state.config.platform_width;
    let start_y = START_PLATFORM_Y;
    let start_kind = match state.variant() {
        Variant::Endless => PlatformKind::Normal,
        Variant::Phoneme => PlatformKind::Start,
    };
    let id = state.next_entity_id();
    state.platforms.push(Platform::new(
        id,
        Vec2::new(CANVAS_WIDTH / 2.0 - width / 2.0, start_y),
        width,
        start_kind,
    ));

    for i in 1..state.config.platform_count {
        let y = start_y - i as f32 * state.config.platform_gap;
        spawn_platform(state, y);
    }

    log::debug!(
        "Field populated with {} platforms (seed {})",
        state.platforms.len(),
        state.seed
    );
}

/// Generate one platform at height `y` and add it to the field
pub fn spawn_platform(state: &mut GameState, y: f32) {
    let config = &state.config;
    let width = config.platform_width;
    let max_x = (CANVAS_WIDTH - width).max(0.0);
    let x = state.rng.random_range(0.0..=max_x);

    let kind = match config.variant {
        Variant::Endless => {
            let roll = state.rng.random_range(0..config.weights.total().max(1));
            choose_kind(&config.weights, roll)
        }
        Variant::Phoneme => {
            if state.rng.random_bool(0.5) {
                PlatformKind::Phoneme(PhonemeSide::First)
            } else {
                PlatformKind::Phoneme(PhonemeSide::Second)
            }
        }
    };

    let direction = if kind == PlatformKind::Moving {
        Some(if state.rng.random_bool(0.5) { 1.0 } else { -1.0 })
    } else {
        None
    };

    let id = state.next_entity_id();
    let mut platform = Platform::new(id, Vec2::new(x, y), width, kind);
    platform.direction = direction;
    state.platforms.push(platform);
}

/// Pick an endless platform kind from a roll in `0..weights.total()`
pub fn choose_kind(weights: &PlatformWeights, roll: u32) -> PlatformKind {
    let mut threshold = weights.normal;
    if roll < threshold {
        return PlatformKind::Normal;
    }
    threshold += weights.moving;
    if roll < threshold {
        return PlatformKind::Moving;
    }
    threshold += weights.crumbling;
    if roll < threshold {
        return PlatformKind::Crumbling;
    }
    threshold += weights.passthrough;
    if roll < threshold {
        return PlatformKind::Passthrough;
    }
    threshold += weights.spring;
    if roll < threshold {
        return PlatformKind::Spring;
    }
    PlatformKind::Normal
}

/// Slide every moving platform one tick
pub fn drift_platforms(state: &mut GameState) {
    for platform in &mut state.platforms {
        platform.drift(CANVAS_WIDTH);
    }
}

/// Scroll the world if the player is above the threshold, then recycle
/// platforms. Returns the applied shift (0 when nothing scrolled).
pub fn scroll(state: &mut GameState) -> f32 {
    let threshold = state.config.scroll_threshold;
    if state.player.pos.y >= threshold {
        return 0.0;
    }

    let shift = threshold - state.player.pos.y;
    state.player.pos.y = threshold;
    state.cumulative_shift += shift;

    for platform in &mut state.platforms {
        platform.pos.y += shift;
    }
    state.platforms.retain(|p| p.pos.y <= CANVAS_HEIGHT);

    refill(state);
    shift
}

/// Spawn platforms above the highest one until the field is full again
pub fn refill(state: &mut GameState) {
    let target = state.config.platform_count;
    while state.platforms.len() < target {
        let y = match highest_y(state) {
            Some(min_y) => min_y - state.config.platform_gap,
            None => START_PLATFORM_Y,
        };
        spawn_platform(state, y);
    }
    debug_assert!(
        is_reachable(&state.platforms, &state.config),
        "refilled field has a gap above the jump height"
    );
}

/// Top edge of the highest platform (smallest y)
pub fn highest_y(state: &GameState) -> Option<f32> {
    state
        .platforms
        .iter()
        .map(|p| p.pos.y)
        .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
}

/// Whether consecutive platforms (sorted by height) are never farther apart
/// than a jump can reach
pub fn is_reachable(platforms: &[Platform], config: &GameConfig) -> bool {
    let mut ys: Vec<f32> = platforms.iter().map(|p| p.pos.y).collect();
    ys.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let max_jump = config.max_jump_height();
    ys.windows(2).all(|w| w[1] - w[0] <= max_jump)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choose_kind_buckets() {
        let weights = PlatformWeights::default();
        assert_eq!(choose_kind(&weights, 0), PlatformKind::Normal);
        assert_eq!(choose_kind(&weights, 64), PlatformKind::Normal);
        assert_eq!(choose_kind(&weights, 65), PlatformKind::Moving);
        assert_eq!(choose_kind(&weights, 79), PlatformKind::Moving);
        assert_eq!(choose_kind(&weights, 80), PlatformKind::Crumbling);
        assert_eq!(choose_kind(&weights, 90), PlatformKind::Passthrough);
        assert_eq!(choose_kind(&weights, 95), PlatformKind::Spring);
        assert_eq!(choose_kind(&weights, 99), PlatformKind::Spring);
    }

    #[test]
    fn test_kind_distribution_roughly_matches_weights() {
        let mut state = GameState::new(GameConfig::endless(), 2024);
        state.platforms.clear();
        for i in 0..2000 {
            spawn_platform(&mut state, -(i as f32));
        }
        let normal = state
            .platforms
            .iter()
            .filter(|p| p.kind == PlatformKind::Normal)
            .count();
        let moving = state
            .platforms
            .iter()
            .filter(|p| p.kind == PlatformKind::Moving)
            .count();
        assert!((1100..1500).contains(&normal), "normal = {}", normal);
        assert!((200..400).contains(&moving), "moving = {}", moving);
        assert!(
            state
                .platforms
                .iter()
                .filter(|p| p.kind == PlatformKind::Moving)
                .all(|p| p.direction.is_some())
        );
    }

    #[test]
    fn test_populate_layout() {
        let state = GameState::new(GameConfig::endless(), 5);
        let start = &state.platforms[0];
        assert_eq!(start.kind, PlatformKind::Normal);
        assert_eq!(start.pos.y, state.player.bottom());
        assert_eq!(start.pos.x, CANVAS_WIDTH / 2.0 - 65.0 / 2.0);
        for (i, p) in state.platforms.iter().enumerate() {
            assert_eq!(p.pos.y, 500.0 - i as f32 * 50.0);
            assert!(p.pos.x >= 0.0 && p.right() <= CANVAS_WIDTH);
        }
        assert!(is_reachable(&state.platforms, &state.config));
    }

    #[test]
    fn test_phoneme_field_uses_tags() {
        let state = GameState::with_words(GameConfig::phoneme(), 5, Vec::new());
        assert_eq!(state.platforms[0].kind, PlatformKind::Start);
        assert_eq!(state.platforms[0].pos.y, START_PLATFORM_Y);
        // Taller player: feet start below the top, the opening jump clears it
        assert!(state.player.bottom() > START_PLATFORM_Y);
        for (i, p) in state.platforms.iter().enumerate() {
            assert_eq!(p.pos.y, 500.0 - i as f32 * 85.0);
        }
        assert!(
            state.platforms[1..]
                .iter()
                .all(|p| matches!(p.kind, PlatformKind::Phoneme(_)))
        );
    }

    #[test]
    fn test_scroll_shifts_drops_and_refills() {
        let mut state = GameState::new(GameConfig::endless(), 11);
        state.player.pos.y = 250.0;

        let shift = scroll(&mut state);
        assert_eq!(shift, 50.0);
        assert_eq!(state.player.pos.y, 300.0);
        assert_eq!(state.cumulative_shift, 50.0);
        assert_eq!(state.platforms.len(), 12);
        assert!(state.platforms.iter().all(|p| p.pos.y <= CANVAS_HEIGHT));
        assert!(is_reachable(&state.platforms, &state.config));

        // Start platform went from 500 to 550 and survives
        assert!(state.platforms.iter().any(|p| p.id == 1 && p.pos.y == 550.0));
    }

    #[test]
    fn test_scroll_below_threshold_is_noop() {
        let mut state = GameState::new(GameConfig::endless(), 11);
        let before: Vec<f32> = state.platforms.iter().map(|p| p.pos.y).collect();
        assert_eq!(scroll(&mut state), 0.0);
        let after: Vec<f32> = state.platforms.iter().map(|p| p.pos.y).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_big_scroll_recycles_whole_field() {
        let mut state = GameState::new(GameConfig::endless(), 3);
        let old_ids: Vec<u32> = state.platforms.iter().map(|p| p.id).collect();
        state.player.pos.y = -2000.0;
        scroll(&mut state);
        assert_eq!(state.platforms.len(), 12);
        assert!(state.platforms.iter().all(|p| !old_ids.contains(&p.id)));
        assert!(is_reachable(&state.platforms, &state.config));
    }

    #[test]
    fn test_refill_empty_field_restarts_at_start_height() {
        let mut state = GameState::new(GameConfig::endless(), 9);
        state.platforms.clear();
        refill(&mut state);
        assert_eq!(state.platforms.len(), 12);
        assert_eq!(highest_y(&state), Some(START_PLATFORM_Y - 11.0 * 50.0));
        assert!(state.platforms.iter().any(|p| p.pos.y == START_PLATFORM_Y));
    }

    #[test]
    fn test_reachability_rejects_wide_gap() {
        let config = GameConfig::endless();
        let gap = config.max_jump_height() + 1.0;
        let platforms = vec![
            Platform::new(1, Vec2::new(0.0, 500.0), 65.0, PlatformKind::Normal),
            Platform::new(2, Vec2::new(0.0, 500.0 - gap), 65.0, PlatformKind::Normal),
        ];
        assert!(!is_reachable(&platforms, &config));
        assert!(is_reachable(&platforms[..1], &config));
    }
}
