//! Interactive session: rounds, prompts, score accumulation, and the
//! leaderboard lifecycle (load once, update once, save once).

use derive_getters::Getters;
use derive_more::{Display, Error, From};
use derive_new::new;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg64;
use std::collections::BTreeSet;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{info, instrument};

use crate::generator::{Category, CategoryGenerator, GeneratorError, Tick};
use crate::leaderboard::{Leaderboard, LeaderboardError};
use crate::lexicon::LexicalSource;
use crate::render::{format_grid, format_standings, format_summary};
use crate::round::{ConnectionOutcome, GuessOutcome, RoundController, RoundError, RoundPhase};

/// Errors that can end a session early.
#[derive(Debug, Display, Error, From)]
pub enum SessionError {
    /// The input stream reached end-of-file mid-session.
    #[display("input stream closed")]
    InputClosed,
    /// Console read or write failure.
    #[from]
    #[display("I/O error: {_0}")]
    Io(std::io::Error),
    /// Category generation failed.
    #[from]
    #[display("{_0}")]
    Generator(GeneratorError),
    /// The round state machine was driven out of phase.
    #[from]
    #[display("{_0}")]
    Round(RoundError),
    /// The leaderboard could not be saved.
    #[from]
    #[display("{_0}")]
    Leaderboard(LeaderboardError),
}

/// Parameters for one interactive session.
///
/// `player_name` and `grid_size` are optional; when absent the session
/// prompts for them on the console.
#[derive(Debug, Clone, Getters, new)]
pub struct SessionConfig {
    /// Player name, or `None` to prompt.
    player_name: Option<String>,
    /// Grid size (category count and clues per category), or `None` to prompt.
    grid_size: Option<usize>,
    /// Rounds per session.
    rounds: u32,
    /// Starting lives per round.
    lives: u32,
    /// Attempt budget for category generation.
    max_attempts: u32,
    /// RNG seed for sampling and shuffling.
    seed: u64,
    /// Leaderboard file location.
    leaderboard_path: PathBuf,
}

/// Runs a full session: leaderboard display, `rounds` rounds of play,
/// score accumulation, and leaderboard update/save. Returns the final
/// session score.
///
/// Generic over the input and output streams so tests can script a whole
/// session against in-memory buffers.
///
/// # Errors
///
/// Returns [`SessionError`] on console I/O failure, input exhaustion,
/// category generation failure, or leaderboard save failure.
#[instrument(skip_all, fields(rounds = config.rounds, lives = config.lives))]
pub fn run_session<L: LexicalSource, R: BufRead, W: Write>(
    config: &SessionConfig,
    lexicon: &L,
    input: &mut R,
    output: &mut W,
) -> Result<i64, SessionError> {
    writeln!(output, "Let's play connections!")?;

    let mut board = Leaderboard::load(config.leaderboard_path());
    if !board.is_empty() {
        writeln!(output, "Leaderboard:")?;
        write!(output, "{}", format_standings(&board))?;
    }

    let name = match config.player_name() {
        Some(name) => name.clone(),
        None => prompt(input, output, "What's your name? ")?,
    };

    let grid_size = match config.grid_size() {
        Some(size) => *size,
        None => loop {
            let line = prompt(input, output, "What grid size do you want to play? ")?;
            match line.trim().parse::<usize>() {
                Ok(size) if size > 0 => break size,
                _ => writeln!(output, "Please enter a positive number.")?,
            }
        },
    };

    let generator = CategoryGenerator::new(lexicon, *config.max_attempts());
    let mut rng = Pcg64::seed_from_u64(*config.seed());

    let mut score: i64 = 0;
    let rounds = *config.rounds();
    for round_number in 1..=rounds {
        writeln!(output, "ROUND {round_number} OF {rounds}")?;

        write!(output, "Loading categories")?;
        output.flush()?;
        let batch = {
            let mut on_tick = |tick: Tick| {
                let symbol = match tick {
                    Tick::Accepted => ':',
                    Tick::Rejected | Tick::Duplicate => '.',
                };
                let _ = write!(output, "{symbol}");
                let _ = output.flush();
            };
            generator.generate_batch(grid_size, grid_size, &mut rng, &mut on_tick)?
        };
        writeln!(output)?;

        score += i64::from(play_round(batch, *config.lives(), &mut rng, input, output)?);
        writeln!(output)?;

        if round_number < rounds {
            writeln!(output, "End of round {round_number}, current score: {score}")?;
        }
        writeln!(output)?;
    }

    writeln!(output, "Final score: {score}")?;

    board.record(name.clone(), score);
    write!(output, "{}", format_standings(&board))?;
    board.save(config.leaderboard_path())?;

    info!(player = %name, score, "Session complete");
    Ok(score)
}

/// Plays one round to completion and returns its score.
fn play_round<R: BufRead, W: Write>(
    batch: Vec<Category>,
    lives: u32,
    rng: &mut impl Rng,
    input: &mut R,
    output: &mut W,
) -> Result<u32, SessionError> {
    let mut round = RoundController::new(batch, lives, rng);
    let width = round.clues_per_category();

    while round.phase() == RoundPhase::Active {
        write!(output, "{}", format_grid(&round.grid_rows()))?;
        writeln!(output, "Enter a {width} word set, separated by \", \"")?;

        let line = read_line(input)?;
        let guess: BTreeSet<String> = line.split(", ").map(str::to_string).collect();

        match round.submit_guess(&guess)? {
            GuessOutcome::Correct { auto_resolved } => {
                writeln!(output, "Correct!\n")?;
                if auto_resolved {
                    writeln!(output, "All categories found!\n")?;
                }
            }
            GuessOutcome::Incorrect { lives_remaining } => {
                writeln!(output, "Wrong! {lives_remaining} lives remaining\n")?;
            }
        }
    }

    while round.phase() == RoundPhase::Reveal {
        let clue_list = round
            .current_reveal_clues()
            .map(|clues| {
                clues
                    .iter()
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();

        let answer = prompt(
            input,
            output,
            &format!("What connects the category \"{clue_list}\"? "),
        )?;

        match round.submit_connection_guess(&answer)? {
            ConnectionOutcome::Correct => writeln!(output, "Correct!")?,
            ConnectionOutcome::Incorrect { connection } => {
                writeln!(output, "Wrong! The connection was {connection}\n")?;
            }
        }
    }

    if !round.found().is_empty() {
        writeln!(output, "You found:")?;
        write!(output, "{}", format_summary(round.found()))?;
    }
    if !round.unfound().is_empty() {
        writeln!(output, "You missed:")?;
        write!(output, "{}", format_summary(round.unfound()))?;
    }

    Ok(round.score())
}

/// Writes a prompt and reads one line of input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    text: &str,
) -> Result<String, SessionError> {
    write!(output, "{text}")?;
    output.flush()?;
    read_line(input)
}

/// Reads one line, stripping the trailing newline. End-of-file is an error
/// rather than an empty line so a closed stream cannot spin a prompt loop.
fn read_line<R: BufRead>(input: &mut R) -> Result<String, SessionError> {
    let mut buf = String::new();
    let n = input.read_line(&mut buf)?;
    if n == 0 {
        return Err(SessionError::InputClosed);
    }
    Ok(buf.trim_end_matches(['\r', '\n']).to_string())
}
