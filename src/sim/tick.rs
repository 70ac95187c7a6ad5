//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically:
//! input → physics → landing → scroll/regeneration → fall check.

use super::collision::find_landing;
use super::field;
use super::state::{
    GameEvent, GameOverReason, GamePhase, GameState, Platform, PlatformKind, Verdict,
};
use crate::consts::*;
use crate::settings::Variant;
use crate::{clamp_horizontal, wrap_horizontal};

/// Held keys sampled for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Left held (ArrowLeft / A)
    pub left: bool,
    /// Right held (ArrowRight / D)
    pub right: bool,
}

impl TickInput {
    /// Horizontal direction: -1, 0 or +1. Left wins if both are held.
    pub fn direction(&self) -> f32 {
        if self.left {
            -1.0
        } else if self.right {
            1.0
        } else {
            0.0
        }
    }
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    // Don't tick unless running
    if state.phase != GamePhase::Running {
        return;
    }

    state.time_ticks += 1;

    apply_horizontal(state, input);

    // Gravity
    state.player.vel.y += state.config.gravity;
    state.player.pos.y += state.player.vel.y;

    field::drift_platforms(state);

    resolve_landing(state);
    if state.phase != GamePhase::Running {
        return;
    }

    let shift = field::scroll(state);
    if shift > 0.0 && state.variant() == Variant::Endless {
        let height_score = (state.cumulative_shift / HEIGHT_PER_POINT).floor() as u64;
        state.score = state.score.max(height_score);
    }

    check_fall(state);

    // Ensure deterministic ordering
    state.normalize_order();
}

/// Horizontal control and edge handling
fn apply_horizontal(state: &mut GameState, input: &TickInput) {
    let speed = state.config.move_speed;
    let player = &mut state.player;
    let dir = input.direction();

    if state.config.variant.has_horizontal_inertia() {
        if dir != 0.0 {
            player.vel.x = dir * speed;
        } else {
            player.vel.x *= HORIZONTAL_DAMPING;
        }
    } else {
        // Direct control, no momentum carried between ticks
        player.vel.x = dir * speed;
    }

    player.pos.x += player.vel.x;
    player.pos.x = if state.config.variant.wraps_horizontally() {
        wrap_horizontal(player.pos.x, player.width, CANVAS_WIDTH)
    } else {
        clamp_horizontal(player.pos.x, player.width, CANVAS_WIDTH)
    };
}

/// Apply the effect of the platform landed on this tick, if any
fn resolve_landing(state: &mut GameState) {
    let Some(landing) = find_landing(&state.player, &state.platforms) else {
        return;
    };

    let platform = &state.platforms[landing.index];
    let (id, kind, verdict) = (platform.id, platform.kind, platform.verdict);
    let jump = state.config.jump_velocity;

    match kind {
        PlatformKind::Normal | PlatformKind::Moving | PlatformKind::Start => {
            bounce(state, id, jump);
        }
        PlatformKind::Spring => {
            let spring = state.config.spring_velocity;
            bounce(state, id, spring);
        }
        PlatformKind::Crumbling => {
            bounce(state, id, jump);
            state.platforms[landing.index].broken = true;
            state.events.push(GameEvent::PlatformCrumbled { platform_id: id });
        }
        // Never qualifies for a landing
        PlatformKind::Passthrough => {}
        PlatformKind::Phoneme(side) => {
            if verdict.is_some() {
                // Already answered correctly: plain bounce, no points
                bounce(state, id, jump);
                return;
            }

            let Some(target) = state.task.as_ref().and_then(|t| t.target()) else {
                bounce(state, id, jump);
                return;
            };

            if side == target {
                state.platforms[landing.index].verdict = Some(Verdict::Correct);
                bounce(state, id, jump);
                state.score += CORRECT_LANDING_POINTS;
                state.events.push(GameEvent::CorrectLanding { platform_id: id });
                log::debug!("Correct landing on platform {}, score {}", id, state.score);
                advance_word(state);
            } else {
                let platform = &mut state.platforms[landing.index];
                platform.verdict = Some(Verdict::Wrong);
                platform.broken = true;
                state.events.push(GameEvent::WrongLanding { platform_id: id });
                log::debug!("Wrong landing on platform {}", id);
                lose_life(state);
            }
        }
    }
}

fn bounce(state: &mut GameState, platform_id: u32, velocity: f32) {
    state.player.vel.y = velocity;
    state.events.push(GameEvent::Bounced { platform_id });
}

/// Hand out the next word; ends the run (won) when the queue is empty
pub(crate) fn advance_word(state: &mut GameState) {
    let Some(task) = state.task.as_mut() else {
        return;
    };
    match task.advance().map(|w| w.word.clone()) {
        Some(word) => {
            log::debug!("Next word: {} ({} left)", word, task.remaining());
            state.events.push(GameEvent::WordAdvanced { word });
        }
        None => state.end(GameOverReason::WordsExhausted),
    }
}

fn lose_life(state: &mut GameState) {
    let Some(lives) = state.lives.as_mut() else {
        return;
    };
    *lives = lives.saturating_sub(1);
    let remaining = *lives;
    state.events.push(GameEvent::LifeLost { remaining });
    if remaining == 0 {
        state.end(GameOverReason::OutOfLives);
    }
}

/// Falling below the screen ends an endless run and costs a life otherwise
fn check_fall(state: &mut GameState) {
    if state.player.pos.y <= CANVAS_HEIGHT {
        return;
    }

    match state.variant() {
        Variant::Endless => state.end(GameOverReason::Fell),
        Variant::Phoneme => {
            lose_life(state);
            if state.phase == GamePhase::Running {
                let player = &mut state.player;
                player.pos.x = CANVAS_WIDTH / 2.0 - player.width / 2.0;
                player.pos.y = CANVAS_HEIGHT / 2.0;
                player.vel.x = 0.0;
                player.vel.y = state.config.jump_velocity;
            }
        }
    }
}

/// Demo/headless pilot: steer toward the next platform worth landing on
pub fn autopilot(state: &GameState) -> TickInput {
    let player = &state.player;
    let feet = player.bottom();
    let target_side = state.task.as_ref().and_then(|t| t.target());

    let worth_landing = |p: &&Platform| {
        p.can_land()
            && match p.kind {
                PlatformKind::Phoneme(side) => p.verdict.is_some() || Some(side) == target_side,
                _ => true,
            }
    };

    // Nearest platform above the feet while rising, nearest below while falling
    let above = state
        .platforms
        .iter()
        .filter(worth_landing)
        .filter(|p| p.top() < feet)
        .max_by(|a, b| a.top().total_cmp(&b.top()));
    let below = state
        .platforms
        .iter()
        .filter(worth_landing)
        .filter(|p| p.top() >= feet)
        .min_by(|a, b| a.top().total_cmp(&b.top()));

    let target = if player.is_falling() {
        below.or(above)
    } else {
        above.or(below)
    };

    let Some(target) = target else {
        return TickInput::default();
    };

    let dx = (target.pos.x + target.width / 2.0) - player.center().x;
    let dead_zone = state.config.move_speed / 2.0;
    TickInput {
        left: dx < -dead_zone,
        right: dx > dead_zone,
    }
}
