//! Error types for the pigeons crate.

use thiserror::Error;

/// Errors raised by the persistence layer (leaderboard and config files).
///
/// None of these are fatal to a running session: callers log them and fall
/// back to an empty leaderboard or the default configuration.
#[derive(Error, Debug)]
pub enum PigeonsError {
    /// The user's home directory could not be resolved
    #[error("could not determine home directory")]
    NoHomeDir,

    /// Reading or writing a file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A file existed but did not hold the expected JSON
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for pigeons operations
pub type Result<T> = std::result::Result<T, PigeonsError>;
