//! Particles for the win screen: falling chess pieces, bursts and sparkles

use crossterm::style::Color;
use nqueens_core::FigureKind;
use rand::Rng;

const GRAVITY: f32 = 0.15;
/// Lifetime lost per frame at ~30 FPS
const DECAY: f32 = 0.016;

const SPARKLE_CHARS: &[char] = &['✦', '✧', '★', '☆', '*'];

#[derive(Clone)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    vx: f32,
    vy: f32,
    pub char: char,
    pub color: Color,
    lifetime: f32,
}

impl Particle {
    /// A piece of the solved kind dropping in from above the screen
    pub fn falling_piece(kind: FigureKind, width: u16, hue: f32) -> Self {
        let mut rng = rand::thread_rng();
        Self {
            x: rng.gen_range(0.0..width.max(1) as f32),
            y: -1.0,
            vx: rng.gen_range(-0.3..0.3),
            vy: rng.gen_range(0.3..1.0),
            char: kind.symbol(),
            color: hue_to_rgb(hue),
            lifetime: rng.gen_range(3.0..6.0),
        }
    }

    /// One spark of a firework bursting at (x, y)
    pub fn burst(x: f32, y: f32, hue: f32) -> Self {
        let mut rng = rand::thread_rng();
        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let speed = rng.gen_range(0.5..2.0);
        Self {
            x,
            y,
            vx: angle.cos() * speed,
            vy: angle.sin() * speed,
            char: '●',
            color: hue_to_rgb(hue),
            lifetime: rng.gen_range(1.0..2.5),
        }
    }

    pub fn sparkle(width: u16, height: u16) -> Self {
        let mut rng = rand::thread_rng();
        Self {
            x: rng.gen_range(0.0..width.max(1) as f32),
            y: rng.gen_range(0.0..height.max(1) as f32),
            vx: rng.gen_range(-0.2..0.2),
            vy: rng.gen_range(-0.2..0.2),
            char: SPARKLE_CHARS[rng.gen_range(0..SPARKLE_CHARS.len())],
            color: hue_to_rgb(rng.gen_range(0.0..1.0)),
            lifetime: rng.gen_range(0.5..1.5),
        }
    }

    /// Advance one frame; false once the particle is spent or below the screen
    pub fn step(&mut self, height: u16) -> bool {
        self.x += self.vx;
        self.y += self.vy;
        self.vy += GRAVITY;
        self.lifetime -= DECAY;
        self.lifetime > 0.0 && self.y < height as f32 + 5.0
    }

    pub fn is_visible(&self, width: u16, height: u16) -> bool {
        self.x >= 0.0
            && self.x < width as f32
            && self.y >= 0.0
            && self.y < height as f32
            && self.lifetime > 0.0
    }
}

/// Particle effects for the win screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectType {
    PieceRain,
    Fireworks,
    Sparkles,
}

impl EffectType {
    pub fn random() -> Self {
        match rand::thread_rng().gen_range(0..3) {
            0 => EffectType::PieceRain,
            1 => EffectType::Fireworks,
            _ => EffectType::Sparkles,
        }
    }
}

/// Convert hue (wrapped into 0.0-1.0) to an RGB color
pub fn hue_to_rgb(hue: f32) -> Color {
    let h = hue.rem_euclid(1.0) * 6.0;
    let x = ((1.0 - (h % 2.0 - 1.0).abs()) * 255.0) as u8;

    let (r, g, b) = match h as i32 % 6 {
        0 => (255, x, 0),
        1 => (x, 255, 0),
        2 => (0, 255, x),
        3 => (0, x, 255),
        4 => (x, 0, 255),
        _ => (255, 0, x),
    };

    Color::Rgb { r, g, b }
}
