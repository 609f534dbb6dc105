//! Plain-text table rendering for grids, summaries, and standings.

use crate::generator::Category;
use crate::leaderboard::Leaderboard;

/// Formats rows of cells as a column-aligned table.
///
/// Each column is padded to the width of its widest cell; empty cells keep
/// their column's width so blanked grid words leave a visible gap.
pub fn format_table(rows: &[Vec<String>]) -> String {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for row in rows {
        let mut line = String::new();
        for (i, cell) in row.iter().enumerate() {
            if i > 0 {
                line.push_str("  ");
            }
            line.push_str(cell);
            // Pad all but the last column
            if i + 1 < row.len() {
                for _ in cell.chars().count()..widths[i] {
                    line.push(' ');
                }
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Formats the round grid for display.
pub fn format_grid(rows: &[Vec<String>]) -> String {
    format_table(rows)
}

/// Formats categories as a two-column table of connection and clues,
/// used for the solved/missed reports after a round.
pub fn format_summary(categories: &[Category]) -> String {
    let rows: Vec<Vec<String>> = categories
        .iter()
        .map(|category| {
            let clues: Vec<&str> = category.clues().iter().map(String::as_str).collect();
            vec![category.connection().clone(), clues.join(", ")]
        })
        .collect();
    format_table(&rows)
}

/// Formats the leaderboard, highest score first.
pub fn format_standings(board: &Leaderboard) -> String {
    let rows: Vec<Vec<String>> = board
        .standings()
        .into_iter()
        .map(|(name, score)| vec![name.to_string(), score.to_string()])
        .collect();
    format_table(&rows)
}
