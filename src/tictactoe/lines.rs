//! Winning line analysis for Tic-Tac-Toe

use super::{Cell, GameOutcome, Player};

/// Winning line indices on the 3x3 board
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Decide the state of the game for a set of cells.
///
/// Rows, columns and diagonals are checked for three in a row first; a full
/// board without one is a draw, anything else is still in progress (`None`).
/// Every winner check in the crate (board, enumerator, decision tree) goes
/// through this function.
pub fn evaluate_winner(cells: &[Cell; 9]) -> Option<GameOutcome> {
    for line in &WINNING_LINES {
        let first = cells[line[0]];
        if cells[line[1]] != first || cells[line[2]] != first {
            continue;
        }
        if let Some(player) = first.to_player() {
            return Some(GameOutcome::Win(player));
        }
    }

    if cells.iter().all(|&cell| cell != Cell::Empty) {
        Some(GameOutcome::Draw)
    } else {
        None
    }
}

/// Piece counts along a single winning line, seen from one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineCounts {
    pub own: usize,
    pub opponent: usize,
    pub empty: usize,
}

/// Line statistics used by the positional heuristic
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Count own, opponent and empty cells on every winning line
    pub fn line_counts(cells: &[Cell; 9], player: Player) -> [LineCounts; 8] {
        let own = player.to_cell();
        let mut counts = [LineCounts::default(); 8];
        for (line, count) in WINNING_LINES.iter().zip(counts.iter_mut()) {
            for &idx in line {
                match cells[idx] {
                    Cell::Empty => count.empty += 1,
                    c if c == own => count.own += 1,
                    _ => count.opponent += 1,
                }
            }
        }
        counts
    }
}
