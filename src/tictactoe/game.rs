//! Game records

use serde::{Deserialize, Serialize};

use super::board::{Board, Player};
use crate::types::Position;

/// A move in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub position: Position,
    pub player: Player,
}

/// Outcome of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

impl GameOutcome {
    pub fn winner(self) -> Option<Player> {
        match self {
            GameOutcome::Win(player) => Some(player),
            GameOutcome::Draw => None,
        }
    }
}

/// A game played from the empty board, X first, with its move history
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Game {
    pub board: Board,
    pub moves: Vec<Move>,
    pub outcome: Option<GameOutcome>,
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    /// The player whose turn it is
    pub fn to_move(&self) -> Player {
        match self.moves.last() {
            Some(last) => last.player.opponent(),
            None => Player::X,
        }
    }

    /// Play a move for the player whose turn it is.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::GameOver`] once the game has an outcome and
    /// [`crate::Error::InvalidMove`] for an occupied cell.
    pub fn play(&mut self, position: Position) -> Result<Option<GameOutcome>, crate::Error> {
        if self.outcome.is_some() {
            return Err(crate::Error::GameOver);
        }

        let player = self.to_move();
        let (row, col) = position.row_col();
        self.board.apply_move(row, col, player)?;
        self.moves.push(Move { position, player });
        self.outcome = self.board.winner();

        Ok(self.outcome)
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }
}
