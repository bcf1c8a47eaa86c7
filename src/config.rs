//! Tuning constants and the user-overridable game configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PigeonsError, Result};

// ── Field ────────────────────────────────────────────────────────────────────

pub const FIELD_WIDTH: f64 = 1280.0;
pub const FIELD_HEIGHT: f64 = 720.0;

/// Where the thrower stands (top-left of the sprite). The sprite top sits
/// `THROWER_LIFT` above the bottom of the field.
pub const THROWER_X: f64 = 100.0;
pub const THROWER_LIFT: f64 = 120.0;

/// Stones leave the thrower's hand, not the sprite corner.
pub const HAND_OFFSET_X: f64 = 90.0;
pub const HAND_OFFSET_Y: f64 = 7.0;

pub const GRAVITY: f64 = 9.8;

// ── Aim ──────────────────────────────────────────────────────────────────────

pub const INITIAL_ANGLE: u32 = 45;
pub const MIN_ANGLE: u32 = 1;
pub const MAX_ANGLE: u32 = 90;

pub const INITIAL_SPEED: u32 = 50;
pub const MIN_SPEED: u32 = 10;
pub const MAX_SPEED: u32 = 150;

// ── Projectiles ──────────────────────────────────────────────────────────────

pub const STARTING_AMMO: u32 = 20;

/// Flight time added per tick. Fixed so arc shape does not depend on frame rate.
pub const PROJECTILE_STEP: f64 = 0.1;

/// A new throw is allowed once the previous stone has flown longer than this.
pub const FIRE_THROTTLE: f64 = 0.5;

/// Preview sampling step, finer than the flight step.
pub const PREVIEW_STEP: f64 = 0.05;
pub const PREVIEW_MAX_POINTS: usize = 4096;

// ── Birds ────────────────────────────────────────────────────────────────────

/// A bird spawns once the timer exceeds this many ticks.
pub const SPAWN_INTERVAL: u32 = 90;
pub const BIRD_MIN_Y: i32 = 100;
pub const BIRD_MAX_Y: i32 = 300;
pub const BIRD_MIN_SPEED: f64 = 2.0;
pub const BIRD_MAX_SPEED: f64 = 5.0;
pub const POWERUP_CHANCE: f64 = 0.2;

/// Birds are dropped once they are this far past the left edge.
pub const BIRD_EXIT_X: f64 = -50.0;

pub const BIRD_FRAME_COUNT: usize = 8;
/// Seconds between animation frames.
pub const BIRD_FRAME_TIME: f64 = 0.08;

// ── Scoring & power-ups ──────────────────────────────────────────────────────

pub const HIT_POINTS: u32 = 100;
pub const POWERUP_DURATION: f64 = 5.0;
pub const LEADERBOARD_SIZE: usize = 5;
pub const MAX_NAME_LEN: usize = 10;

// ── Files ────────────────────────────────────────────────────────────────────

pub const DATA_DIR_NAME: &str = ".pigeons";
pub const CONFIG_ENV: &str = "PIGEONS_CONFIG";
pub const LEADERBOARD_ENV: &str = "PIGEONS_LEADERBOARD";

/// Get the data directory (~/.pigeons).
pub fn data_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or(PigeonsError::NoHomeDir)?;
    Ok(home.join(DATA_DIR_NAME))
}

/// Get the config file path, honouring `PIGEONS_CONFIG`.
pub fn config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }
    Ok(data_dir()?.join("config.json"))
}

/// Values a player may override from `config.json`. Anything omitted keeps
/// its default.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: f64,
    pub height: f64,
    pub gravity: f64,
    pub starting_ammo: u32,
    pub spawn_interval: u32,
    pub powerup_chance: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            gravity: GRAVITY,
            starting_ammo: STARTING_AMMO,
            spawn_interval: SPAWN_INTERVAL,
            powerup_chance: POWERUP_CHANCE,
        }
    }
}

impl GameConfig {
    /// Top-left of the thrower sprite for this field height.
    pub fn thrower_pos(&self) -> (f64, f64) {
        (THROWER_X, self.height - THROWER_LIFT)
    }

    /// Launch point for stones and the trajectory preview.
    pub fn launch_point(&self) -> (f64, f64) {
        let (x, y) = self.thrower_pos();
        (x + HAND_OFFSET_X, y + HAND_OFFSET_Y)
    }

    /// Parse a config file. Errors are returned so the caller can decide
    /// whether to warn.
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&json)?;
        Ok(config.sanitized())
    }

    /// Load the config, falling back to defaults when the file is missing or
    /// unreadable.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(config) => {
                log::info!("loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("ignoring config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Replace values the simulation cannot work with by their defaults.
    fn sanitized(self) -> Self {
        let defaults = Self::default();
        let positive = |v: f64, d: f64| if v.is_finite() && v > 0.0 { v } else { d };
        Self {
            width: positive(self.width, defaults.width),
            height: positive(self.height, defaults.height),
            gravity: positive(self.gravity, defaults.gravity),
            starting_ammo: self.starting_ammo,
            spawn_interval: self.spawn_interval,
            powerup_chance: if (0.0..=1.0).contains(&self.powerup_chance) {
                self.powerup_chance
            } else {
                defaults.powerup_chance
            },
        }
    }
}
