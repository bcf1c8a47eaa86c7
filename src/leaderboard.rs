//! Top-5 leaderboard and its JSON file (~/.pigeons/leaderboard.json).
//!
//! Reading never fails: a missing or corrupt file is an empty board. Writing
//! returns an error but the game only logs it.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::config::{data_dir, LEADERBOARD_ENV, LEADERBOARD_SIZE};
use crate::error::Result;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
    #[serde(default = "unknown_date")]
    pub date: String,
}

fn unknown_date() -> String {
    "N/A".to_string()
}

/// Entries ordered by score, highest first. Equal scores keep the order they
/// were added in.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<LeaderboardEntry>", into = "Vec<LeaderboardEntry>")]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl From<Vec<LeaderboardEntry>> for Leaderboard {
    fn from(mut entries: Vec<LeaderboardEntry>) -> Self {
        // Stable, so ties stay in insertion order.
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(LEADERBOARD_SIZE);
        Leaderboard { entries }
    }
}

impl From<Leaderboard> for Vec<LeaderboardEntry> {
    fn from(board: Leaderboard) -> Self {
        board.entries
    }
}

impl Leaderboard {
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn best_score(&self) -> u32 {
        self.entries.first().map_or(0, |e| e.score)
    }

    /// Whether `score` would earn a place (and so a name prompt).
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        match self.entries.last() {
            Some(lowest) if self.entries.len() >= LEADERBOARD_SIZE => score > lowest.score,
            _ => true,
        }
    }

    /// Add an entry and return its 1-based rank, or `None` if it fell off the
    /// bottom.
    pub fn insert(&mut self, name: &str, score: u32, date: String) -> Option<usize> {
        let position = self
            .entries
            .iter()
            .position(|e| e.score < score)
            .unwrap_or(self.entries.len());
        if position >= LEADERBOARD_SIZE {
            return None;
        }
        self.entries.insert(
            position,
            LeaderboardEntry {
                name: name.to_string(),
                score,
                date,
            },
        );
        self.entries.truncate(LEADERBOARD_SIZE);
        Some(position + 1)
    }

    /// Add an entry stamped with the current local time.
    pub fn record(&mut self, name: &str, score: u32) -> Option<usize> {
        let date = Local::now().format("%Y-%m-%d %H:%M").to_string();
        self.insert(name, score, date)
    }
}

/// Get the leaderboard path, honouring `PIGEONS_LEADERBOARD`.
pub fn leaderboard_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(LEADERBOARD_ENV) {
        return Ok(PathBuf::from(path));
    }
    Ok(data_dir()?.join("leaderboard.json"))
}

/// Load the leaderboard, treating anything unreadable as empty.
pub fn load(path: &Path) -> Leaderboard {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) => {
            log::debug!("no leaderboard at {}: {}", path.display(), e);
            return Leaderboard::default();
        }
    };
    match serde_json::from_str(&json) {
        Ok(board) => board,
        Err(e) => {
            log::warn!("discarding corrupt leaderboard {}: {}", path.display(), e);
            Leaderboard::default()
        }
    }
}

/// Save the leaderboard to disk.
pub fn save(path: &Path, board: &Leaderboard) -> Result<()> {
    // Ensure directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(board)?;
    fs::write(path, json)?;
    Ok(())
}

/// Save, logging instead of failing.
pub fn save_best_effort(path: &Path, board: &Leaderboard) {
    if let Err(e) = save(path, board) {
        log::warn!("could not save leaderboard to {}: {}", path.display(), e);
    }
}
