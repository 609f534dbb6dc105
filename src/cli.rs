//! Command-line interface for synogrid.

use clap::Parser;
use std::path::PathBuf;

/// Synogrid - console word-association puzzle game
#[derive(Parser, Debug)]
#[command(name = "synogrid")]
#[command(about = "Group the synonyms, then name what connects them", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Number of rounds per session
    #[arg(long, default_value_t = 5)]
    pub rounds: u32,

    /// Starting lives per round
    #[arg(long, default_value_t = 3)]
    pub lives: u32,

    /// Grid size (category count and clues per category); prompted when omitted
    #[arg(long)]
    pub grid_size: Option<usize>,

    /// Player name; prompted when omitted
    #[arg(long)]
    pub name: Option<String>,

    /// Path to a JSON lexicon file; the built-in vocabulary is used when omitted
    #[arg(long)]
    pub lexicon: Option<PathBuf>,

    /// Path to the leaderboard file
    #[arg(long, default_value = "leaderboard.json")]
    pub leaderboard: PathBuf,

    /// RNG seed; drawn from entropy when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Maximum sampling attempts before category generation gives up
    #[arg(long, default_value_t = 10_000)]
    pub max_attempts: u32,
}
