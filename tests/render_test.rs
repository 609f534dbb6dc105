//! Tests for plain-text table rendering.

use std::collections::BTreeSet;
use synogrid::{format_standings, format_summary, format_table, Category, Leaderboard};

fn rows(cells: &[&[&str]]) -> Vec<Vec<String>> {
    cells
        .iter()
        .map(|row| row.iter().map(|c| c.to_string()).collect())
        .collect()
}

#[test]
fn test_columns_padded_to_widest_cell() {
    let table = format_table(&rows(&[&["a", "bb"], &["ccc", "d"]]));
    assert_eq!(table, "a    bb\nccc  d\n");
}

#[test]
fn test_empty_input_renders_nothing() {
    assert_eq!(format_table(&[]), "");
}

#[test]
fn test_blanked_cells_keep_their_column() {
    let table = format_table(&rows(&[&["", "bb"], &["ccc", "d"]]));
    assert_eq!(table, "     bb\nccc  d\n");
}

#[test]
fn test_summary_lists_connection_and_clues() {
    let clues: BTreeSet<String> = ["quick", "speedy"].iter().map(|w| w.to_string()).collect();
    let categories = vec![Category::new("fast".to_string(), clues)];

    let summary = format_summary(&categories);
    assert!(summary.contains("fast"));
    assert!(summary.contains("quick, speedy"));
}

#[test]
fn test_standings_rendered_highest_first() {
    let mut board = Leaderboard::new();
    board.record("amy", 3);
    board.record("bob", 9);

    let standings = format_standings(&board);
    let bob = standings.find("bob").expect("bob missing");
    let amy = standings.find("amy").expect("amy missing");
    assert!(bob < amy, "higher score listed first");
}
