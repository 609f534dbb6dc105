//! Leaderboard persistence: player name mapped to most recent session score.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Leaderboard error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Leaderboard error: {} at {}:{}", message, file, line)]
pub struct LeaderboardError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl LeaderboardError {
    /// Creates a new leaderboard error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for LeaderboardError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", err))
    }
}

impl From<serde_json::Error> for LeaderboardError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("Serialize error: {}", err))
    }
}

/// Player name to session score, persisted as a single JSON object.
///
/// The board is loaded once at startup, updated once per session, and
/// saved once at shutdown; it is an explicit value handed through the
/// session rather than ambient state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    scores: BTreeMap<String, i64>,
}

impl Leaderboard {
    /// Creates an empty leaderboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the leaderboard from a file.
    ///
    /// A missing file, unreadable file, or corrupt contents all yield an
    /// empty board; load failure is never surfaced as an error.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Self {
        let text = match std::fs::read_to_string(path.as_ref()) {
            Ok(text) => text,
            Err(err) => {
                debug!(error = %err, "No readable leaderboard, starting empty");
                return Self::new();
            }
        };
        match serde_json::from_str::<Self>(&text) {
            Ok(board) => {
                info!(entries = board.scores.len(), "Leaderboard loaded");
                board
            }
            Err(err) => {
                warn!(error = %err, "Corrupt leaderboard, starting empty");
                Self::new()
            }
        }
    }

    /// Saves the leaderboard, fully overwriting any prior contents.
    ///
    /// # Errors
    ///
    /// Returns [`LeaderboardError`] if serialization or the write fails.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display(), entries = self.scores.len()))]
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), LeaderboardError> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), text)?;
        info!("Leaderboard saved");
        Ok(())
    }

    /// Sets the score for a player, overwriting any previous entry.
    #[instrument(skip(self, name))]
    pub fn record(&mut self, name: impl Into<String>, score: i64) {
        let name = name.into();
        debug!(name = %name, score, "Recording score");
        self.scores.insert(name, score);
    }

    /// Looks up a player's score.
    pub fn get(&self, name: &str) -> Option<i64> {
        self.scores.get(name).copied()
    }

    /// Whether the board has no entries.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Entries sorted by score descending, ties broken by name ascending.
    pub fn standings(&self) -> Vec<(&str, i64)> {
        let mut entries: Vec<(&str, i64)> = self
            .scores
            .iter()
            .map(|(name, score)| (name.as_str(), *score))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        entries
    }
}
