//! Synogrid library - procedurally generated word-association puzzles.
//!
//! # Architecture
//!
//! - **Lexicon**: vocabulary and synonym lookup ([`LexicalSource`] trait
//!   with a JSON-backed implementation)
//! - **Generator**: rejection sampling of (connection, clues) categories,
//!   batch deduplication by connection
//! - **Round**: the per-round state machine (grid guessing, lives,
//!   auto-resolve, reveal-phase bonus scoring)
//! - **Session**: N rounds over generic I/O streams, with leaderboard
//!   load/update/save
//!
//! # Example
//!
//! ```no_run
//! use rand::SeedableRng;
//! use synogrid::{CategoryGenerator, Lexicon, RoundController};
//!
//! # fn example() -> Result<(), synogrid::GeneratorError> {
//! let lexicon = Lexicon::builtin();
//! let generator = CategoryGenerator::new(&lexicon, 10_000);
//! let mut rng = rand_pcg::Pcg64::seed_from_u64(7);
//!
//! let batch = generator.generate_batch(4, 4, &mut rng, &mut |_| {})?;
//! let round = RoundController::new(batch, 3, &mut rng);
//! assert_eq!(round.lives(), 3);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod cli;
mod generator;
mod leaderboard;
mod lexicon;
mod render;
mod round;
mod session;

// Crate-level exports - CLI
pub use cli::Cli;

// Crate-level exports - Category generation
pub use generator::{Category, CategoryGenerator, GeneratorError, Tick};

// Crate-level exports - Leaderboard persistence
pub use leaderboard::{Leaderboard, LeaderboardError};

// Crate-level exports - Lexical database
pub use lexicon::{LexicalSource, Lexicon, LexiconError, Meaning};

// Crate-level exports - Rendering
pub use render::{format_grid, format_standings, format_summary, format_table};

// Crate-level exports - Round state machine
pub use round::{ConnectionOutcome, GuessOutcome, RoundController, RoundError, RoundPhase};

// Crate-level exports - Session loop
pub use session::{run_session, SessionConfig, SessionError};
