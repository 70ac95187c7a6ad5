//! 2D primitives for the canvas driver

use glam::Vec2;
use serde::Serialize;

/// RGBA color, 0-255 per channel plus float alpha
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    /// Opaque color from a 0xRRGGBB literal
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
            a: 1.0,
        }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// CSS color string for `fillStyle`
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {:.2})", self.r, self.g, self.b, self.a)
        }
    }
}

pub mod palette {
    use super::Color;

    pub const BLACK: Color = Color::hex(0x000000);
    pub const WHITE: Color = Color::hex(0xffffff);

    // Endless variant
    pub const ENDLESS_BG: Color = Color::hex(0xF0F8FF);
    pub const ENDLESS_CHECKER: Color = Color::hex(0xE8F4FF);
    pub const NORMAL: Color = Color::hex(0x7AC74F);
    pub const MOVING: Color = Color::hex(0x4F9FD9);
    pub const CRUMBLING: Color = Color::hex(0x8B6F47);
    pub const SPRING: Color = Color::hex(0xFF6B6B);
    pub const PASSTHROUGH: Color = Color::hex(0xB8C4CE).with_alpha(0.5);
    pub const DOODLER: Color = Color::hex(0xFFE135);
    pub const DOODLER_MOUTH: Color = Color::hex(0xFF4757);

    // Phoneme variant
    pub const SKY_TOP: Color = Color::hex(0x87CEEB);
    pub const SKY_BOTTOM: Color = Color::hex(0xE0F6FF);
    pub const CORRECT: Color = Color::hex(0x22c55e);
    pub const WRONG: Color = Color::hex(0xef4444);
    pub const START: Color = Color::hex(0x94a3b8);
    pub const UNJUDGED: Color = Color::hex(0xf59e0b);

    /// Dimmed layer behind overlay text
    pub const SHADE: Color = Color::hex(0x000000).with_alpha(0.55);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextAlign {
    Left,
    Center,
}

impl TextAlign {
    pub fn as_css(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        }
    }
}

/// One canvas operation in logical pixels
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCommand {
    /// Fill the whole canvas
    Fill { color: Color },
    /// Fill the whole canvas with a top-to-bottom gradient
    VerticalGradient { top: Color, bottom: Color },
    /// Filled rectangle, optionally rounded and outlined
    Rect {
        pos: Vec2,
        size: Vec2,
        radius: f32,
        color: Color,
        outline: Option<Color>,
    },
    /// Filled circle, or a half disc opening downwards
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
        half: bool,
    },
    Text {
        pos: Vec2,
        text: String,
        size: f32,
        color: Color,
        align: TextAlign,
    },
    /// Player sprite clipped to a circle. The driver draws `fallback` with
    /// `glyph` on top until the image has loaded.
    Sprite {
        center: Vec2,
        radius: f32,
        fallback: Color,
        glyph: &'static str,
    },
}

pub fn rect(pos: Vec2, size: Vec2, color: Color) -> DrawCommand {
    DrawCommand::Rect {
        pos,
        size,
        radius: 0.0,
        color,
        outline: None,
    }
}

pub fn rounded_rect(pos: Vec2, size: Vec2, radius: f32, color: Color, outline: Color) -> DrawCommand {
    DrawCommand::Rect {
        pos,
        size,
        radius,
        color,
        outline: Some(outline),
    }
}

pub fn circle(center: Vec2, radius: f32, color: Color) -> DrawCommand {
    DrawCommand::Circle {
        center,
        radius,
        color,
        half: false,
    }
}

pub fn half_circle(center: Vec2, radius: f32, color: Color) -> DrawCommand {
    DrawCommand::Circle {
        center,
        radius,
        color,
        half: true,
    }
}

pub fn text(pos: Vec2, text: impl Into<String>, size: f32, color: Color, align: TextAlign) -> DrawCommand {
    DrawCommand::Text {
        pos,
        text: text.into(),
        size,
        color,
        align,
    }
}

/// Checkerboard dots of the endless background (every other 20 px cell)
pub fn checker(width: f32, height: f32, color: Color) -> Vec<DrawCommand> {
    let mut commands = Vec::new();
    let mut x = 0;
    while (x as f32) < width {
        let mut y = 0;
        while (y as f32) < height {
            if (x + y) % 40 == 0 {
                commands.push(rect(
                    Vec2::new(x as f32, y as f32),
                    Vec2::splat(10.0),
                    color,
                ));
            }
            y += 20;
        }
        x += 20;
    }
    commands
}
