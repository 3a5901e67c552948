//! Exhaustive state enumeration used to seed a fresh value table
//!
//! The walk assigns every cell value (empty, X, O) to cells 0..8 depth-first,
//! 3^9 raw assignments in total. Before descending into a cell the board built
//! so far (unassigned cells empty) is checked with the shared winner routine,
//! and the branch is dropped if a line is already complete. At the leaves the
//! turn-parity rule decides who placed the last marker; only positions where
//! that is the agent's player are kept. These are exactly the after-move
//! positions the agent evaluates when choosing a move.

use serde::{Deserialize, Serialize};

use super::value_table::{ValueTable, outcome_value};
use crate::tictactoe::{Board, Cell, Player, evaluate_winner};

/// Counters collected while seeding a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumerationStats {
    /// Fully assigned boards reached by the walk
    pub leaves_visited: usize,
    /// Leaves where the agent moved last and that were registered
    pub registered: usize,
    /// Registered positions that are already won, lost or drawn
    pub decided: usize,
    /// Registered positions with the game still in progress
    pub undecided: usize,
}

/// Walks all cell assignments and yields positions where `player` moved last.
#[derive(Debug, Clone, Copy)]
pub struct StateEnumerator {
    player: Player,
    loss_value: f64,
}

impl StateEnumerator {
    pub fn new(player: Player, loss_value: f64) -> Self {
        Self { player, loss_value }
    }

    /// All positions the enumerator would register, in walk order.
    pub fn states(&self) -> Vec<Board> {
        let mut states = Vec::new();
        self.walk(|board| states.push(*board));
        states
    }

    /// Register every enumerated position in `table` with its initial value.
    ///
    /// Existing entries are overwritten with the initializer value.
    pub fn seed(&self, table: &mut ValueTable) -> EnumerationStats {
        let mut stats = EnumerationStats::default();
        let player = self.player;
        let loss_value = self.loss_value;

        let leaves = self.walk(|board| {
            let outcome = board.winner();
            if outcome.is_some() {
                stats.decided += 1;
            } else {
                stats.undecided += 1;
            }
            stats.registered += 1;
            table.insert(board.canonical_key(), outcome_value(outcome, player, loss_value));
        });
        stats.leaves_visited = leaves;

        stats
    }

    /// Run the walk, calling `visit` for each registered leaf.
    /// Returns the number of leaves reached.
    fn walk(&self, mut visit: impl FnMut(&Board)) -> usize {
        let mut cells = [Cell::Empty; 9];
        let mut leaves = 0;
        self.walk_from(&mut cells, 0, &mut leaves, &mut visit);
        leaves
    }

    fn walk_from(
        &self,
        cells: &mut [Cell; 9],
        idx: usize,
        leaves: &mut usize,
        visit: &mut impl FnMut(&Board),
    ) {
        if idx == cells.len() {
            *leaves += 1;
            let board = Board::from_cells(*cells);
            if board.last_mover() == Some(self.player) {
                visit(&board);
            }
            return;
        }

        // Cells idx.. are empty here, so only a completed line can end the game.
        if evaluate_winner(cells).is_some() {
            return;
        }

        for value in Cell::ALL {
            cells[idx] = value;
            self.walk_from(cells, idx + 1, leaves, visit);
        }
        cells[idx] = Cell::Empty;
    }
}
