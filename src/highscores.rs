//! High score leaderboard
//!
//! In-memory top-10 run records with JSON persistence. The simulation
//! never touches this; the shell records a run when it ends.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single finished-run record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u32,
    /// Level reached when the run ended
    pub level: u32,
    /// Best coin combo of the run
    pub best_combo: u32,
}

/// High score leaderboard, sorted descending by score
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add a run record if it qualifies. Returns the rank achieved
    /// (1-indexed) or None.
    pub fn add_score(&mut self, score: u32, level: u32, best_combo: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            score,
            level,
            best_combo,
        };

        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Load the leaderboard from a JSON file, empty on a missing or
    /// malformed file.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(scores) => scores,
                Err(err) => {
                    log::warn!("malformed high score file {}: {err}", path.display());
                    Self::new()
                }
            },
            Err(_) => Self::new(),
        }
    }

    /// Save the leaderboard to a JSON file
    pub fn save_to(&self, path: &Path) {
        let json = match serde_json::to_string_pretty(self) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("failed to serialize high scores: {err}");
                return;
            }
        };
        match fs::write(path, json) {
            Ok(()) => log::info!(
                "high scores saved to {} ({} entries)",
                path.display(),
                self.entries.len()
            ),
            Err(err) => log::warn!("failed to write {}: {err}", path.display()),
        }
    }
}
