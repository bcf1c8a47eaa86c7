//! Active power-up bookkeeping.
//!
//! Effects are plain records with an activation time. Everything they change
//! (score multiplier, stone size, bird speed) is folded fresh from the live
//! list, so nothing is ever "undone" when an effect runs out.

use crate::config::POWERUP_DURATION;
use crate::entities::{PowerUpEffect, PowerUpKind};

pub fn activate(kind: PowerUpKind, now: f64) -> PowerUpEffect {
    PowerUpEffect {
        kind,
        started_at: now,
    }
}

pub fn is_expired(effect: &PowerUpEffect, now: f64) -> bool {
    now - effect.started_at > POWERUP_DURATION
}

/// Seconds left before the effect expires, floored at zero.
pub fn remaining(effect: &PowerUpEffect, now: f64) -> f64 {
    (POWERUP_DURATION - (now - effect.started_at)).max(0.0)
}

/// Drop every expired effect.
pub fn prune(effects: &[PowerUpEffect], now: f64) -> Vec<PowerUpEffect> {
    effects
        .iter()
        .filter(|e| !is_expired(e, now))
        .cloned()
        .collect()
}

/// Multipliers derived from the live effects. Several effects of one kind
/// count the same as a single one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Modifiers {
    pub score_multiplier: u32,
    pub projectile_scale: f64,
    pub speed_multiplier: f64,
}

impl Default for Modifiers {
    fn default() -> Self {
        Modifiers {
            score_multiplier: 1,
            projectile_scale: 1.0,
            speed_multiplier: 1.0,
        }
    }
}

impl Modifiers {
    /// Fold over the effects still live at `now`.
    pub fn from_effects(effects: &[PowerUpEffect], now: f64) -> Self {
        effects
            .iter()
            .filter(|e| !is_expired(e, now))
            .fold(Modifiers::default(), |mods, effect| match effect.kind {
                PowerUpKind::DoublePoints => Modifiers {
                    score_multiplier: 2,
                    ..mods
                },
                PowerUpKind::BigProjectiles => Modifiers {
                    projectile_scale: 2.0,
                    ..mods
                },
                PowerUpKind::SlowMotion => Modifiers {
                    speed_multiplier: 0.5,
                    ..mods
                },
                // Paid out once at collection time.
                PowerUpKind::ExtraAmmo => mods,
            })
    }
}
