//! Static positional evaluation for positions missing from a value table

use crate::tictactoe::{Board, Cell, LineAnalyzer, Player};

pub const OWN_TWO: f64 = 0.5;
pub const OWN_ONE: f64 = 0.1;
pub const OPPONENT_TWO: f64 = -0.6;
pub const OPPONENT_ONE: f64 = -0.1;
pub const CENTER: f64 = 0.2;

pub const MIN_VALUE: f64 = 0.001;
pub const MAX_VALUE: f64 = 0.999;

const CENTER_INDEX: usize = 4;

/// Raw line score of `board` for `player`, before scaling.
///
/// Per winning line: two own markers and an empty cell +0.5, one own marker
/// and two empty +0.1, two opponent markers and an empty cell −0.6, one
/// opponent marker and two empty −0.1. Holding the center adds 0.2, the
/// opponent holding it subtracts 0.2.
pub fn line_score(board: &Board, player: Player) -> f64 {
    let mut score = 0.0;

    for counts in LineAnalyzer::line_counts(&board.cells, player) {
        score += match (counts.own, counts.opponent, counts.empty) {
            (2, 0, 1) => OWN_TWO,
            (1, 0, 2) => OWN_ONE,
            (0, 2, 1) => OPPONENT_TWO,
            (0, 1, 2) => OPPONENT_ONE,
            _ => 0.0,
        };
    }

    match board.cells[CENTER_INDEX] {
        c if c == player.to_cell() => score += CENTER,
        Cell::Empty => {}
        _ => score -= CENTER,
    }

    score
}

/// Heuristic value of `board` for `player`, mapped into `[0.001, 0.999]`.
pub fn evaluate_position(board: &Board, player: Player) -> f64 {
    (0.5 + line_score(board, player) * 0.2).clamp(MIN_VALUE, MAX_VALUE)
}
