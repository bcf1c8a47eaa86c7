//! Short-lived visuals driven by simulation events.
//!
//! This is a binary-only module: it turns the `GameEvent`s returned by each
//! tick into things the renderer can draw for a few frames.

use crossterm::style::Color;

use pigeons::entities::PowerUpKind;
use pigeons::events::GameEvent;

const EXPLOSION_FRAMES: u32 = 12;
const THROW_FRAMES: u32 = 8;
const BANNER_FRAMES: u32 = 90;

/// A burst drawn where a bird was downed.
#[derive(Clone, Debug)]
pub struct Explosion {
    pub x: f64,
    pub y: f64,
    /// Remaining frames to display.
    pub frames: u32,
}

#[derive(Clone, Debug)]
pub struct Banner {
    pub text: String,
    pub color: Color,
    pub frames: u32,
}

#[derive(Clone, Debug, Default)]
pub struct Effects {
    pub explosions: Vec<Explosion>,
    /// Frames left in the thrower's arm swing.
    pub throw_frames: u32,
    pub banner: Option<Banner>,
    bell: bool,
}

pub fn power_up_color(kind: PowerUpKind) -> Color {
    match kind {
        PowerUpKind::DoublePoints => Color::Red,
        PowerUpKind::BigProjectiles => Color::Blue,
        PowerUpKind::ExtraAmmo => Color::Green,
        PowerUpKind::SlowMotion => Color::Yellow,
    }
}

impl Effects {
    pub fn absorb(&mut self, events: &[GameEvent]) {
        for event in events {
            log::debug!("event {:?}", event);
            match event {
                GameEvent::Throw => self.throw_frames = THROW_FRAMES,
                GameEvent::Explosion { x, y } => self.explosions.push(Explosion {
                    x: *x,
                    y: *y,
                    frames: EXPLOSION_FRAMES,
                }),
                GameEvent::PowerUpCollected(kind) => {
                    self.banner = Some(Banner {
                        text: format!("+ {}", kind.label()),
                        color: power_up_color(*kind),
                        frames: BANNER_FRAMES,
                    });
                }
                GameEvent::HighScore => {
                    self.banner = Some(Banner {
                        text: "NEW HIGH SCORE!".to_string(),
                        color: Color::Yellow,
                        frames: BANNER_FRAMES,
                    });
                    self.bell = true;
                }
                GameEvent::RoundOver { .. } => self.bell = true,
            }
        }
    }

    /// Age everything by one frame.
    pub fn step(&mut self) {
        self.throw_frames = self.throw_frames.saturating_sub(1);
        self.explosions = self
            .explosions
            .iter()
            .filter(|e| e.frames > 1)
            .map(|e| Explosion {
                frames: e.frames - 1,
                ..e.clone()
            })
            .collect();
        self.banner = self.banner.take().filter(|b| b.frames > 1).map(|b| Banner {
            frames: b.frames - 1,
            ..b
        });
    }

    /// Whether an audible cue is pending; clears it.
    pub fn take_bell(&mut self) -> bool {
        std::mem::take(&mut self.bell)
    }
}
