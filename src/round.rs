//! Per-round state machine: grid, guesses, lives, and two-phase scoring.

use derive_more::{Display, Error};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeSet;
use strum::Display as StrumDisplay;
use tracing::{debug, info, instrument};

use crate::generator::Category;

/// Phase of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
pub enum RoundPhase {
    /// Grid guessing: the player partitions the grid under a life budget.
    Active,
    /// Connection guessing: one prompt per category for bonus points.
    Reveal,
    /// Round complete; the score is final.
    Done,
}

/// Error returned when an operation is invoked in the wrong phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("round is in the {} phase, expected {}", actual, expected)]
pub struct RoundError {
    /// Phase the round is actually in.
    pub actual: RoundPhase,
    /// Phase the operation requires.
    pub expected: RoundPhase,
}

/// Result of one grid guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// The guess matched an unfound category.
    Correct {
        /// Whether this guess left exactly one category, which was then
        /// completed automatically without a further guess.
        auto_resolved: bool,
    },
    /// The guess matched nothing; a life was spent.
    Incorrect {
        /// Lives left after this guess.
        lives_remaining: u32,
    },
}

/// Result of one connection guess during the reveal phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionOutcome {
    /// The connection was named correctly.
    Correct,
    /// The guess was wrong; carries the actual connection for display.
    Incorrect {
        /// The connection the player failed to name.
        connection: String,
    },
}

/// Owns the state of a single round.
///
/// The round moves `Active` → `Reveal` → `Done`. During `Active` the player
/// submits clue-set guesses against a shuffled grid; during `Reveal` the
/// player names each category's connection for bonus points. The final
/// score is `found categories + correct connections`, so a solved category
/// is worth at most 2 points and an unsolved one at most 1.
#[derive(Debug, Clone)]
pub struct RoundController {
    clues_per_category: usize,
    grid: Vec<String>,
    unfound: Vec<Category>,
    found: Vec<Category>,
    lives: u32,
    phase: RoundPhase,
    reveal_cursor: usize,
    bonus: u32,
}

impl RoundController {
    /// Starts a round over the given category batch.
    ///
    /// The grid concatenates each category's clues in sorted order, then is
    /// shuffled once; the display order never matches the category order.
    /// A batch of one category skips straight to the reveal phase with the
    /// category unfound, and a zero-life budget skips the grid entirely.
    #[instrument(skip(batch, rng), fields(categories = batch.len(), lives))]
    pub fn new(batch: Vec<Category>, lives: u32, rng: &mut impl Rng) -> Self {
        let clues_per_category = batch.first().map(|c| c.clues().len()).unwrap_or(0);
        let mut grid: Vec<String> = batch
            .iter()
            .flat_map(|category| category.clues().iter().cloned())
            .collect();
        grid.shuffle(rng);

        let phase = if batch.is_empty() {
            RoundPhase::Done
        } else if batch.len() == 1 || lives == 0 {
            RoundPhase::Reveal
        } else {
            RoundPhase::Active
        };

        info!(grid_words = grid.len(), ?phase, "Round started");
        Self {
            clues_per_category,
            grid,
            unfound: batch,
            found: Vec::new(),
            lives,
            phase,
            reveal_cursor: 0,
            bonus: 0,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Lives remaining.
    pub fn lives(&self) -> u32 {
        self.lives
    }

    /// Categories solved so far, in solve order.
    pub fn found(&self) -> &[Category] {
        &self.found
    }

    /// Categories not yet solved, in original batch order.
    pub fn unfound(&self) -> &[Category] {
        &self.unfound
    }

    /// Number of clue words per grid row.
    pub fn clues_per_category(&self) -> usize {
        self.clues_per_category
    }

    /// The grid reshaped into rows, with fully blanked rows dropped.
    ///
    /// Matched words are blanked in place rather than removed, so column
    /// positions stay fixed; a row disappears only once every word in it
    /// has been matched.
    pub fn grid_rows(&self) -> Vec<Vec<String>> {
        if self.clues_per_category == 0 {
            return Vec::new();
        }
        self.grid
            .chunks(self.clues_per_category)
            .filter(|row| row.iter().any(|word| !word.is_empty()))
            .map(|row| row.to_vec())
            .collect()
    }

    /// Submits one grid guess: a set of words compared against each unfound
    /// category's clue set.
    ///
    /// The scan runs in unfound-list order and the first structurally equal
    /// match wins. A match moves the category to the found list and blanks
    /// its words on the grid; anything else, malformed input included, costs
    /// a life. When exactly one category remains afterwards it is completed
    /// automatically, and the round leaves the active phase once lives run
    /// out or no unfound categories remain.
    ///
    /// # Errors
    ///
    /// Returns [`RoundError`] if the round is not in the active phase.
    #[instrument(skip(self, guess), fields(lives = self.lives, unfound = self.unfound.len()))]
    pub fn submit_guess(&mut self, guess: &BTreeSet<String>) -> Result<GuessOutcome, RoundError> {
        self.expect_phase(RoundPhase::Active)?;

        let outcome = match self.unfound.iter().position(|c| c.clues() == guess) {
            Some(index) => {
                let category = self.unfound.remove(index);
                debug!(connection = %category.connection(), "Category found");
                self.found.push(category);

                for slot in &mut self.grid {
                    if guess.contains(slot) {
                        slot.clear();
                    }
                }

                let auto_resolved = self.auto_resolve();
                GuessOutcome::Correct { auto_resolved }
            }
            None => {
                self.lives -= 1;
                debug!(lives = self.lives, "Wrong guess");
                GuessOutcome::Incorrect {
                    lives_remaining: self.lives,
                }
            }
        };

        if self.lives == 0 || self.unfound.len() <= 1 {
            info!(found = self.found.len(), lives = self.lives, "Entering reveal phase");
            self.phase = RoundPhase::Reveal;
        }

        Ok(outcome)
    }

    /// Moves the last unfound category to found when it is the only one left.
    fn auto_resolve(&mut self) -> bool {
        if self.unfound.len() == 1 {
            let last = self.unfound.remove(0);
            debug!(connection = %last.connection(), "Auto-resolving final category");
            self.found.push(last);
            true
        } else {
            false
        }
    }

    /// Clues of the category currently up for a connection guess, or `None`
    /// outside the reveal phase.
    ///
    /// Reveal order is solved categories first, in solve order, then the
    /// rest in original batch order.
    pub fn current_reveal_clues(&self) -> Option<&BTreeSet<String>> {
        if self.phase != RoundPhase::Reveal {
            return None;
        }
        self.reveal_category(self.reveal_cursor).map(|c| c.clues())
    }

    /// Submits a guess for the current category's connection.
    ///
    /// Comparison is case-insensitive. Correct guesses add one bonus point.
    /// After the last category the round is done.
    ///
    /// # Errors
    ///
    /// Returns [`RoundError`] if the round is not in the reveal phase.
    #[instrument(skip(self, guess), fields(cursor = self.reveal_cursor))]
    pub fn submit_connection_guess(
        &mut self,
        guess: &str,
    ) -> Result<ConnectionOutcome, RoundError> {
        self.expect_phase(RoundPhase::Reveal)?;

        let category = self
            .reveal_category(self.reveal_cursor)
            .ok_or(RoundError {
                actual: RoundPhase::Done,
                expected: RoundPhase::Reveal,
            })?;

        let connection = category.connection().clone();
        let outcome = if guess.to_lowercase() == connection {
            self.bonus += 1;
            debug!(connection = %connection, "Connection named");
            ConnectionOutcome::Correct
        } else {
            ConnectionOutcome::Incorrect { connection }
        };

        self.reveal_cursor += 1;
        if self.reveal_cursor >= self.found.len() + self.unfound.len() {
            info!(score = self.score(), "Round complete");
            self.phase = RoundPhase::Done;
        }

        Ok(outcome)
    }

    /// Round score: one point per found category plus one per correctly
    /// named connection.
    pub fn score(&self) -> u32 {
        self.found.len() as u32 + self.bonus
    }

    fn reveal_category(&self, index: usize) -> Option<&Category> {
        if index < self.found.len() {
            self.found.get(index)
        } else {
            self.unfound.get(index - self.found.len())
        }
    }

    fn expect_phase(&self, expected: RoundPhase) -> Result<(), RoundError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(RoundError {
                actual: self.phase,
                expected,
            })
        }
    }
}
