//! Synogrid - console word-association puzzle game.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use std::io;
use tracing::info;
use tracing_subscriber::EnvFilter;

use synogrid::{run_session, Cli, Lexicon, SessionConfig};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    info!("Starting synogrid");

    let lexicon = match &cli.lexicon {
        Some(path) => Lexicon::from_path(path)?,
        None => Lexicon::builtin(),
    };

    let seed = cli.seed.unwrap_or_else(rand::random);
    let config = SessionConfig::new(
        cli.name,
        cli.grid_size,
        cli.rounds,
        cli.lives,
        cli.max_attempts,
        seed,
        cli.leaderboard,
    );

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let score = run_session(&config, &lexicon, &mut input, &mut output)?;
    info!(score, "Session complete");

    Ok(())
}
