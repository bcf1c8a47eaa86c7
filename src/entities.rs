//! All game entity types — data plus the closed-form motion they own.

use crate::config::{
    GameConfig, BIRD_FRAME_COUNT, BIRD_FRAME_TIME, INITIAL_ANGLE, INITIAL_SPEED, PROJECTILE_STEP,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    /// Hits score double while active.
    DoublePoints,
    /// Stones are drawn at twice their size while active.
    BigProjectiles,
    /// One extra stone, granted once when collected.
    ExtraAmmo,
    /// Birds fly at half speed while active.
    SlowMotion,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::DoublePoints,
        PowerUpKind::BigProjectiles,
        PowerUpKind::ExtraAmmo,
        PowerUpKind::SlowMotion,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PowerUpKind::DoublePoints => "2x Points",
            PowerUpKind::BigProjectiles => "Big Stones",
            PowerUpKind::ExtraAmmo => "Extra Stones",
            PowerUpKind::SlowMotion => "Slow Motion",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum GameStatus {
    Playing,
    RoundOver,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

/// A thrown stone. Position is always derived from launch parameters and
/// flight time; it is never moved directly.
#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub origin_x: f64,
    pub origin_y: f64,
    pub x: f64,
    pub y: f64,
    /// Launch angle in radians.
    pub angle: f64,
    pub speed: f64,
    pub gravity: f64,
    /// Flight time in whole `PROJECTILE_STEP`s.
    pub steps: u32,
    /// Draw scale (2.0 while BigProjectiles is active).
    pub scale: f64,
}

impl Projectile {
    pub fn launch(origin: (f64, f64), angle_deg: u32, speed: u32, gravity: f64, scale: f64) -> Self {
        Projectile {
            origin_x: origin.0,
            origin_y: origin.1,
            x: origin.0,
            y: origin.1,
            angle: (angle_deg as f64).to_radians(),
            speed: speed as f64,
            gravity,
            steps: 0,
            scale,
        }
    }

    pub fn elapsed(&self) -> f64 {
        self.steps as f64 * PROJECTILE_STEP
    }

    /// Closed-form position after `t` time-units of flight (y grows downward).
    pub fn position_at(&self, t: f64) -> (f64, f64) {
        ballistic_position(
            (self.origin_x, self.origin_y),
            self.angle,
            self.speed,
            self.gravity,
            t,
        )
    }

    /// Advance by one fixed flight step.
    pub fn advance(&self) -> Projectile {
        let steps = self.steps + 1;
        let (x, y) = self.position_at(steps as f64 * PROJECTILE_STEP);
        Projectile {
            x,
            y,
            steps,
            ..self.clone()
        }
    }

    pub fn is_off_screen(&self, width: f64, height: f64) -> bool {
        self.x > width || self.y > height || self.y < 0.0
    }
}

/// x(t) = x0 + v·cos(θ)·t,  y(t) = y0 − (v·sin(θ)·t − ½·g·t²)
pub fn ballistic_position(
    origin: (f64, f64),
    angle: f64,
    speed: f64,
    gravity: f64,
    t: f64,
) -> (f64, f64) {
    let x = origin.0 + speed * angle.cos() * t;
    let y = origin.1 - (speed * angle.sin() * t - 0.5 * gravity * t * t);
    (x, y)
}

// ── Birds ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BirdKind {
    Regular,
    PowerUp(PowerUpKind),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bird {
    /// Left edge of the sprite.
    pub x: f64,
    /// Top edge of the sprite.
    pub y: f64,
    /// Speed before any slow-motion multiplier.
    pub base_speed: f64,
    pub frame: usize,
    /// Seconds since the last animation frame change.
    pub anim_timer: f64,
    pub kind: BirdKind,
}

impl Bird {
    pub fn new(x: f64, y: f64, base_speed: f64, kind: BirdKind) -> Self {
        Bird {
            x,
            y,
            base_speed,
            frame: 0,
            anim_timer: 0.0,
            kind,
        }
    }

    pub fn speed(&self, multiplier: f64) -> f64 {
        self.base_speed * multiplier
    }

    /// Move left one tick and run the wing animation on wall-clock time `dt`.
    /// Power-up birds keep their single static frame.
    pub fn advance(&self, multiplier: f64, dt: f64) -> Bird {
        let x = self.x - self.speed(multiplier);
        let (frame, anim_timer) = match self.kind {
            BirdKind::PowerUp(_) => (self.frame, self.anim_timer),
            BirdKind::Regular => {
                let timer = self.anim_timer + dt;
                if timer > BIRD_FRAME_TIME {
                    ((self.frame + 1) % BIRD_FRAME_COUNT, 0.0)
                } else {
                    (self.frame, timer)
                }
            }
        };
        Bird {
            x,
            frame,
            anim_timer,
            ..self.clone()
        }
    }

    pub fn power_up(&self) -> Option<PowerUpKind> {
        match self.kind {
            BirdKind::Regular => None,
            BirdKind::PowerUp(kind) => Some(kind),
        }
    }
}

// ── Power-up effects ──────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct PowerUpEffect {
    pub kind: PowerUpKind,
    /// Session clock (seconds) at activation.
    pub started_at: f64,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// One round of play. Cloneable so pure update functions can return a new
/// copy without mutating the original; resetting is just building a new one.
#[derive(Clone, Debug)]
pub struct GameSession {
    pub config: GameConfig,
    /// Aim angle in degrees.
    pub angle: u32,
    /// Aim speed.
    pub speed: u32,
    pub ammo: u32,
    pub score: u32,
    /// Best persisted score when the round started.
    pub best_score: u32,
    /// Set once the "new high score" cue has fired this round.
    pub high_score_announced: bool,
    pub projectiles: Vec<Projectile>,
    pub birds: Vec<Bird>,
    pub effects: Vec<PowerUpEffect>,
    pub spawn_timer: u32,
    /// Seconds of play so far.
    pub clock: f64,
    pub frame: u64,
    pub status: GameStatus,
}

impl GameSession {
    pub fn new(config: GameConfig, best_score: u32) -> Self {
        GameSession {
            config,
            angle: INITIAL_ANGLE,
            speed: INITIAL_SPEED,
            ammo: config.starting_ammo,
            score: 0,
            best_score,
            high_score_announced: false,
            projectiles: Vec::new(),
            birds: Vec::new(),
            effects: Vec::new(),
            spawn_timer: 0,
            clock: 0.0,
            frame: 0,
            status: GameStatus::Playing,
        }
    }

    /// The round ends once the last stone is thrown and has landed.
    pub fn is_terminal(&self) -> bool {
        self.ammo == 0 && self.projectiles.is_empty()
    }
}
