//! Canvas 2D rendering
//!
//! The render pass is a pure function of the game state: it produces draw
//! commands in logical pixels (400×600) and the browser driver replays them on
//! a scaled 2D context. Nothing here touches the DOM, so it runs (and is
//! tested) natively.

pub mod shapes;

use glam::Vec2;

pub use shapes::{Color, DrawCommand, TextAlign};

use crate::consts::*;
use crate::corpus::PhonemeSet;
use crate::settings::Variant;
use crate::sim::{GameOverReason, GamePhase, GameState, Platform, PlatformKind, Player, Verdict};
use shapes::palette;

/// Everything a frame shows
pub struct Scene<'a> {
    pub state: &'a GameState,
    /// Active phoneme pair (labels on phoneme platforms)
    pub phonemes: Option<&'a PhonemeSet>,
    pub high_score: u64,
}

/// Build the draw list for one frame
pub fn render(scene: &Scene) -> Vec<DrawCommand> {
    let state = scene.state;
    let mut commands = Vec::with_capacity(64);

    background(state.variant(), &mut commands);

    for platform in &state.platforms {
        draw_platform(platform, scene.phonemes, &mut commands);
    }

    match state.variant() {
        Variant::Endless => draw_doodler(&state.player, &mut commands),
        Variant::Phoneme => draw_croco(&state.player, &mut commands),
    }

    hud(scene, &mut commands);
    overlay(scene, &mut commands);

    commands
}

fn background(variant: Variant, out: &mut Vec<DrawCommand>) {
    match variant {
        Variant::Endless => {
            out.push(DrawCommand::Fill {
                color: palette::ENDLESS_BG,
            });
            out.extend(shapes::checker(
                CANVAS_WIDTH,
                CANVAS_HEIGHT,
                palette::ENDLESS_CHECKER,
            ));
        }
        Variant::Phoneme => out.push(DrawCommand::VerticalGradient {
            top: palette::SKY_TOP,
            bottom: palette::SKY_BOTTOM,
        }),
    }
}

/// Fill color for a platform, or `None` when it should not be drawn
pub fn platform_color(platform: &Platform) -> Option<Color> {
    match (platform.kind, platform.verdict) {
        // Wrong answers stay visible (faded) so the mistake reads on screen
        (_, Some(Verdict::Wrong)) => Some(palette::WRONG.with_alpha(0.5)),
        (_, Some(Verdict::Correct)) => Some(palette::CORRECT),
        _ if platform.broken => None,
        (PlatformKind::Normal, _) => Some(palette::NORMAL),
        (PlatformKind::Moving, _) => Some(palette::MOVING),
        (PlatformKind::Crumbling, _) => Some(palette::CRUMBLING),
        (PlatformKind::Spring, _) => Some(palette::SPRING),
        (PlatformKind::Passthrough, _) => Some(palette::PASSTHROUGH),
        (PlatformKind::Start, _) => Some(palette::START),
        (PlatformKind::Phoneme(_), _) => Some(palette::UNJUDGED),
    }
}

fn draw_platform(platform: &Platform, phonemes: Option<&PhonemeSet>, out: &mut Vec<DrawCommand>) {
    let Some(color) = platform_color(platform) else {
        return;
    };
    let size = Vec2::new(platform.width, PLATFORM_HEIGHT);

    match platform.kind {
        PlatformKind::Phoneme(side) => {
            out.push(shapes::rect(platform.pos, size, color));
            if let Some(set) = phonemes {
                out.push(shapes::text(
                    Vec2::new(platform.pos.x + platform.width / 2.0, platform.pos.y - 5.0),
                    format!("[{}]", set.phoneme(side)),
                    16.0,
                    palette::BLACK,
                    TextAlign::Center,
                ));
            }
        }
        PlatformKind::Start => out.push(shapes::rect(platform.pos, size, color)),
        _ => out.push(shapes::rounded_rect(
            platform.pos,
            size,
            5.0,
            color,
            palette::WHITE,
        )),
    }
}

/// Yellow block with eyes and a smile
fn draw_doodler(player: &Player, out: &mut Vec<DrawCommand>) {
    let p = player.pos;
    let w = player.width;
    let h = player.height;
    out.push(shapes::rect(p, Vec2::new(w, h), palette::DOODLER));
    out.push(shapes::circle(p + Vec2::new(w * 0.3, h * 0.3), 4.0, palette::BLACK));
    out.push(shapes::circle(p + Vec2::new(w * 0.9, h * 0.3), 4.0, palette::BLACK));
    out.push(shapes::half_circle(
        p + Vec2::new(w * 0.6, h * 0.7),
        8.0,
        palette::DOODLER_MOUTH,
    ));
}

fn draw_croco(player: &Player, out: &mut Vec<DrawCommand>) {
    out.push(DrawCommand::Sprite {
        center: player.center(),
        radius: player.width / 2.0,
        fallback: palette::CORRECT,
        glyph: "🐊",
    });
}

fn hud(scene: &Scene, out: &mut Vec<DrawCommand>) {
    let state = scene.state;
    out.push(shapes::text(
        Vec2::new(20.0, 40.0),
        state.score.to_string(),
        24.0,
        palette::BLACK,
        TextAlign::Left,
    ));
    out.push(shapes::text(
        Vec2::new(20.0, 62.0),
        format!("Рекорд: {}", scene.high_score),
        14.0,
        palette::BLACK,
        TextAlign::Left,
    ));

    if let Some(lives) = state.lives {
        let hearts: String = "❤".repeat(lives as usize);
        out.push(shapes::text(
            Vec2::new(CANVAS_WIDTH - 20.0 - 18.0 * STARTING_LIVES as f32, 40.0),
            hearts,
            18.0,
            palette::WRONG,
            TextAlign::Left,
        ));
    }
}

fn overlay(scene: &Scene, out: &mut Vec<DrawCommand>) {
    let state = scene.state;
    let (title, subtitle) = match state.phase {
        GamePhase::Running => return,
        GamePhase::NotStarted => (
            "Нажми ← или →".to_string(),
            "чтобы начать".to_string(),
        ),
        GamePhase::Paused => ("Пауза".to_string(), "Esc — продолжить".to_string()),
        GamePhase::GameOver => {
            let title = match state.game_over_reason {
                Some(GameOverReason::WordsExhausted) => "Победа!",
                _ => "Игра окончена",
            };
            (title.to_string(), format!("Счёт: {}", state.score))
        }
    };

    out.push(DrawCommand::Rect {
        pos: Vec2::ZERO,
        size: Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT),
        radius: 0.0,
        color: palette::SHADE,
        outline: None,
    });
    out.push(shapes::text(
        Vec2::new(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0 - 10.0),
        title,
        32.0,
        palette::WHITE,
        TextAlign::Center,
    ));
    out.push(shapes::text(
        Vec2::new(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0 + 24.0),
        subtitle,
        18.0,
        palette::WHITE,
        TextAlign::Center,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Corpus;
    use crate::settings::GameConfig;
    use crate::sim::{PhonemeSide, WordEntry};

    fn texts(commands: &[DrawCommand]) -> Vec<String> {
        commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_endless_frame_has_every_platform_and_score() {
        let mut state = GameState::new(GameConfig::endless(), 12);
        state.score = 77;
        let commands = render(&Scene {
            state: &state,
            phonemes: None,
            high_score: 120,
        });

        assert!(matches!(commands[0], DrawCommand::Fill { .. }));
        let platforms = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Rect { radius, .. } if *radius == 5.0))
            .count();
        assert_eq!(platforms, state.platforms.len());
        let labels = texts(&commands);
        assert!(labels.contains(&"77".to_string()));
        assert!(labels.iter().any(|t| t.contains("120")));
        // Running: no overlay
        assert!(!labels.iter().any(|t| t.contains("Пауза")));
    }

    #[test]
    fn test_platform_colors() {
        let mut platform = Platform::new(1, Vec2::ZERO, 65.0, PlatformKind::Crumbling);
        assert_eq!(platform_color(&platform), Some(palette::CRUMBLING));
        platform.broken = true;
        assert_eq!(platform_color(&platform), None);

        let mut phoneme = Platform::new(2, Vec2::ZERO, 70.0, PlatformKind::Phoneme(PhonemeSide::First));
        assert_eq!(platform_color(&phoneme), Some(palette::UNJUDGED));
        phoneme.verdict = Some(Verdict::Correct);
        assert_eq!(platform_color(&phoneme), Some(palette::CORRECT));
        phoneme.verdict = Some(Verdict::Wrong);
        phoneme.broken = true;
        assert_eq!(platform_color(&phoneme), Some(palette::WRONG.with_alpha(0.5)));

        let start = Platform::new(3, Vec2::ZERO, 70.0, PlatformKind::Start);
        assert_eq!(platform_color(&start), Some(palette::START));
    }

    #[test]
    fn test_phoneme_frame_labels_and_lives() {
        let corpus = Corpus::builtin().unwrap();
        let set = corpus.find("С-Ш").unwrap();
        let state = GameState::with_words(
            GameConfig::phoneme(),
            3,
            vec![WordEntry::new("сок", PhonemeSide::First)],
        );
        let commands = render(&Scene {
            state: &state,
            phonemes: Some(set),
            high_score: 0,
        });

        assert!(matches!(commands[0], DrawCommand::VerticalGradient { .. }));
        assert!(commands.iter().any(|c| matches!(c, DrawCommand::Sprite { .. })));
        let labels = texts(&commands);
        let tagged = labels.iter().filter(|t| *t == "[с]" || *t == "[ш]").count();
        assert_eq!(tagged, state.config.platform_count - 1);
        assert!(labels.contains(&"❤❤❤".to_string()));
        // Waiting for the first key
        assert!(labels.iter().any(|t| t.contains("чтобы начать")));
    }

    #[test]
    fn test_game_over_overlay_shows_result() {
        let mut state = GameState::new(GameConfig::endless(), 1);
        state.score = 15;
        state.end(GameOverReason::Fell);
        let labels = texts(&render(&Scene {
            state: &state,
            phonemes: None,
            high_score: 15,
        }));
        assert!(labels.contains(&"Игра окончена".to_string()));
        assert!(labels.contains(&"Счёт: 15".to_string()));

        let mut won = GameState::with_words(GameConfig::phoneme(), 1, Vec::new());
        won.end(GameOverReason::WordsExhausted);
        let labels = texts(&render(&Scene {
            state: &won,
            phonemes: None,
            high_score: 0,
        }));
        assert!(labels.contains(&"Победа!".to_string()));
    }
}
