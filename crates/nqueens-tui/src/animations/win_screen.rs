use rand::Rng;

use super::particles::{EffectType, Particle};
use nqueens_core::FigureKind;

const WIN_MESSAGES: &[&str] = &[
    "No figure attacks another!",
    "Perfect placement!",
    "The board is at peace.",
    "Every square accounted for.",
    "Checkmate to the puzzle!",
];

pub const BANNER: &str = r#"
  ____   ___  _ __     _______ ____  _
 / ___| / _ \| |\ \   / / ____|  _ \| |
 \___ \| | | | | \ \ / /|  _| | | | | |
  ___) | |_| | |__\ V / | |___| |_| |_|
 |____/ \___/|_____\_/  |_____|____/(_)
"#;

/// The animated win screen
pub struct WinScreen {
    particles: Vec<Particle>,
    effect_type: EffectType,
    /// Kind of the solved board, rained down by `PieceRain`
    kind: FigureKind,
    frame_count: u32,
    rainbow_offset: f32,
    message_index: usize,
    firework_cooldown: u32,
    pub width: u16,
    pub height: u16,
}

impl WinScreen {
    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
            effect_type: EffectType::random(),
            kind: FigureKind::Queen,
            frame_count: 0,
            rainbow_offset: 0.0,
            message_index: rand::thread_rng().gen_range(0..WIN_MESSAGES.len()),
            firework_cooldown: 0,
            width: 80,
            height: 24,
        }
    }

    /// Start a fresh celebration for a board solved with `kind`
    pub fn reset(&mut self, kind: FigureKind) {
        self.particles.clear();
        self.kind = kind;
        self.frame_count = 0;
        self.rainbow_offset = 0.0;
        self.effect_type = EffectType::random();
        self.message_index = rand::thread_rng().gen_range(0..WIN_MESSAGES.len());
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    pub fn update(&mut self) {
        self.frame_count += 1;
        self.rainbow_offset += 0.05;

        if self.frame_count % 300 == 0 {
            self.effect_type = EffectType::random();
        }

        let height = self.height;
        self.particles.retain_mut(|p| p.step(height));

        match self.effect_type {
            EffectType::PieceRain => {
                let mut rng = rand::thread_rng();
                for _ in 0..2 {
                    let hue = self.rainbow_offset + rng.gen_range(0.0..1.0);
                    self.particles
                        .push(Particle::falling_piece(self.kind, self.width, hue));
                }
            }
            EffectType::Fireworks => self.spawn_firework(),
            EffectType::Sparkles => {
                for _ in 0..4 {
                    self.particles.push(Particle::sparkle(self.width, self.height));
                }
            }
        }
    }

    fn spawn_firework(&mut self) {
        if self.firework_cooldown > 0 {
            self.firework_cooldown -= 1;
            return;
        }

        let mut rng = rand::thread_rng();
        if self.width < 24 || self.height < 4 || !rng.gen_bool(0.08) {
            return;
        }

        let x = rng.gen_range(10.0..(self.width as f32 - 10.0));
        let y = rng.gen_range(2.0..(self.height as f32 / 2.0).max(3.0));
        let hue = rng.gen_range(0.0..1.0);
        self.particles
            .extend((0..25).map(|_| Particle::burst(x, y, hue)));
        self.firework_cooldown = 15;
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn current_message(&self) -> &str {
        WIN_MESSAGES[self.message_index]
    }

    pub fn rainbow_offset(&self) -> f32 {
        self.rainbow_offset
    }
}

impl Default for WinScreen {
    fn default() -> Self {
        Self::new()
    }
}
