//! Scripted end-to-end session tests over in-memory I/O.

use std::collections::BTreeSet;
use std::io::Cursor;
use std::path::PathBuf;
use synogrid::{run_session, Leaderboard, Lexicon, SessionConfig, SessionError};
use tempfile::{tempdir, TempDir};

fn set(words: &[&str]) -> BTreeSet<String> {
    words.iter().map(|w| w.to_string()).collect()
}

/// Two words with exactly two synonyms each, so every generated clue set
/// is fully determined and a 2x2 batch always uses both connections.
fn tiny_lexicon() -> Lexicon {
    Lexicon::from_entries(vec![
        ("fast".to_string(), vec![set(&["quick", "speedy"])]),
        ("cold".to_string(), vec![set(&["chilly", "icy"])]),
    ])
}

fn config(dir: &TempDir, grid_size: Option<usize>) -> (SessionConfig, PathBuf) {
    let path = dir.path().join("leaderboard.json");
    let config = SessionConfig::new(
        None,      // prompt for the name
        grid_size, // prompt when None
        1,         // rounds
        3,         // lives
        1000,      // max attempts
        9,         // seed
        path.clone(),
    );
    (config, path)
}

fn run(config: &SessionConfig, script: &str) -> (Result<i64, SessionError>, String) {
    let lexicon = tiny_lexicon();
    let mut input = Cursor::new(script.as_bytes().to_vec());
    let mut output: Vec<u8> = Vec::new();
    let result = run_session(config, &lexicon, &mut input, &mut output);
    (result, String::from_utf8(output).expect("Output not UTF-8"))
}

#[test]
fn test_perfect_session_scores_double_and_persists() {
    let dir = tempdir().expect("Failed to create temp dir");
    let (config, path) = config(&dir, Some(2));

    // Name; one correct grid guess (the second category auto-resolves);
    // then both connections named in solve order.
    let script = "tester\nquick, speedy\nfast\ncold\n";
    let (result, output) = run(&config, script);

    assert_eq!(result.expect("Session failed"), 4);
    assert!(output.contains("Correct!"));
    assert!(output.contains("All categories found!"));
    assert!(output.contains("Final score: 4"));

    let board = Leaderboard::load(&path);
    assert_eq!(board.get("tester"), Some(4));
}

#[test]
fn test_wrong_guess_costs_a_life_but_not_points() {
    let dir = tempdir().expect("Failed to create temp dir");
    let (config, _path) = config(&dir, Some(2));

    let script = "tester\nutterly, wrong\nquick, speedy\nfast\ncold\n";
    let (result, output) = run(&config, script);

    assert_eq!(result.expect("Session failed"), 4);
    assert!(output.contains("Wrong! 2 lives remaining"));
}

#[test]
fn test_exhausted_lives_still_run_the_reveal() {
    let dir = tempdir().expect("Failed to create temp dir");
    let (config, path) = config(&dir, Some(2));

    // Three misses end the grid; both reveal guesses are wrong too.
    let script = "tester\na, b\nc, d\ne, f\nx\nx\n";
    let (result, output) = run(&config, script);

    assert_eq!(result.expect("Session failed"), 0);
    assert!(output.contains("Wrong! 0 lives remaining"));
    assert!(output.contains("You missed:"));
    assert!(!output.contains("You found:"));

    let board = Leaderboard::load(&path);
    assert_eq!(board.get("tester"), Some(0));
}

#[test]
fn test_existing_entry_overwritten_and_displayed() {
    let dir = tempdir().expect("Failed to create temp dir");
    let (config, path) = config(&dir, Some(2));

    let mut board = Leaderboard::new();
    board.record("tester", 99);
    board.save(&path).expect("Save failed");

    let script = "tester\nquick, speedy\nfast\ncold\n";
    let (result, output) = run(&config, script);

    assert_eq!(result.expect("Session failed"), 4);
    assert!(output.contains("Leaderboard:"));
    assert!(output.contains("99"), "prior standings shown at startup");
    assert_eq!(Leaderboard::load(&path).get("tester"), Some(4));
}

#[test]
fn test_grid_size_prompt_rejects_bad_input() {
    let dir = tempdir().expect("Failed to create temp dir");
    let (config, _path) = config(&dir, None);

    let script = "tester\n0\nbanana\n2\nquick, speedy\nfast\ncold\n";
    let (result, output) = run(&config, script);

    assert_eq!(result.expect("Session failed"), 4);
    assert!(output.contains("What grid size do you want to play?"));
    assert!(output.contains("Please enter a positive number."));
}

#[test]
fn test_input_exhaustion_is_an_error_not_a_hang() {
    let dir = tempdir().expect("Failed to create temp dir");
    let (config, _path) = config(&dir, Some(2));

    let (result, _output) = run(&config, "tester\n");
    assert!(matches!(result, Err(SessionError::InputClosed)));
}

#[test]
fn test_loading_ticks_shown_while_generating() {
    let dir = tempdir().expect("Failed to create temp dir");
    let (config, _path) = config(&dir, Some(2));

    let script = "tester\nquick, speedy\nfast\ncold\n";
    let (_result, output) = run(&config, script);

    // One ':' per accepted category follows the loading banner.
    assert!(output.contains("Loading categories"));
    assert!(output.contains(':'));
}
