//! Per-cell valuation snapshot of the agent's next move

use serde::Serialize;

use crate::{tictactoe::Board, td::Agent, types::Position};

/// Value the agent assigns to one empty cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoveValue {
    pub position: Position,
    /// Table value rounded to 4 decimals for display
    pub value: f64,
}

/// Values for every empty cell, plus the cells sharing the maximum
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MoveValuation {
    pub values: Vec<MoveValue>,
    /// Cells whose (unrounded) value equals the maximum
    pub best: Vec<Position>,
    /// Set when several cells tie and the agent will pick among them at random
    pub tie_note: Option<String>,
}

impl MoveValuation {
    pub fn is_tied(&self) -> bool {
        self.best.len() > 1
    }

    pub fn value_at(&self, position: Position) -> Option<f64> {
        self.values
            .iter()
            .find(|mv| mv.position == position)
            .map(|mv| mv.value)
    }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Value every empty cell of `board` as the agent would for its own move.
///
/// Uses [`Agent::lookup`], so unseen positions are added with their initial
/// value. A finished game yields an empty valuation.
pub fn move_values(agent: &mut Agent, board: &Board) -> MoveValuation {
    if board.is_terminal() {
        return MoveValuation::default();
    }

    let player = agent.player();
    let mut valuation = MoveValuation::default();
    let mut best_value = f64::NEG_INFINITY;

    for position in board.empty_positions() {
        let value = agent.lookup(&board.with_move(position, player));
        valuation.values.push(MoveValue {
            position,
            value: round4(value),
        });

        if value > best_value {
            best_value = value;
            valuation.best.clear();
            valuation.best.push(position);
        } else if value == best_value {
            valuation.best.push(position);
        }
    }

    if valuation.is_tied() {
        let cells: Vec<String> = valuation.best.iter().map(Position::to_string).collect();
        valuation.tie_note = Some(format!(
            "tied moves: {}; one is chosen at random",
            cells.join(" ")
        ));
    }

    valuation
}
