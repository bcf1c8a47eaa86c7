//! Events emitted by the simulation for the presentation layer.
//!
//! The core never touches the terminal or audio. Each update returns the
//! events it produced and the front end decides how to show them.

use crate::entities::PowerUpKind;

#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    /// A stone left the thrower's hand.
    Throw,
    /// A stone hit a bird at this field position.
    Explosion { x: f64, y: f64 },
    /// A power-up bird was downed and its effect started.
    PowerUpCollected(PowerUpKind),
    /// The score passed the best persisted score for the first time this round.
    HighScore,
    /// Out of stones with none in flight.
    RoundOver { score: u32 },
}
