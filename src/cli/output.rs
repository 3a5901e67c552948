//! Output formatting for CLI

use std::{fs::File, io::BufWriter, path::Path};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use crate::{analysis::MoveValuation, tictactoe::Board};

/// Create a spinner for work with no natural length
pub fn create_spinner(message: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(message.to_string());
    Ok(pb)
}

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Print statistics table
pub fn print_stats_table(stats: &[(&str, &str)]) {
    for (key, value) in stats {
        print_kv(key, value);
    }
}

/// Print a board as a 3x3 grid with row/column labels
pub fn print_board(board: &Board) {
    println!("    0 1 2");
    for (row, line) in board.to_string().lines().enumerate() {
        let cells: Vec<String> = line.chars().map(String::from).collect();
        println!("  {row} {}", cells.join(" "));
    }
}

/// Print one line per empty cell, best moves starred
pub fn print_move_values(valuation: &MoveValuation) {
    for mv in &valuation.values {
        let marker = if valuation.best.contains(&mv.position) {
            "*"
        } else {
            " "
        };
        println!("  {marker} ({}) {:>8.4}", mv.position, mv.value);
    }
    if let Some(note) = &valuation.tie_note {
        println!("  {note}");
    }
}

/// Write `value` as pretty JSON to `path`, or to stdout without a path
pub fn write_json<T: Serialize>(value: &T, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
            serde_json::to_writer_pretty(BufWriter::new(file), value)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        None => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(294_778), "294,778");
        assert_eq!(format_number(1_000_000), "1,000,000");
    }

    #[test]
    fn test_write_json_to_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("board.json");
        write_json(&Board::new(), Some(&path)).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let back: Board = serde_json::from_str(&text).unwrap();
        assert_eq!(back, Board::new());
    }
}
