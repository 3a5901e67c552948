//! Newtype wrappers for board coordinates and value-table keys.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tictactoe::Cell;

/// A position on the game board (0-8, row-major).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position(usize);

impl Position {
    /// Create a new position, validating it's within board bounds.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidPosition`] if the position is >= 9.
    pub fn new(value: usize) -> Result<Self, crate::Error> {
        if value < 9 {
            Ok(Position(value))
        } else {
            Err(crate::Error::InvalidPosition { position: value })
        }
    }

    /// Create a position from row and column coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidMove`] if either coordinate is >= 3.
    pub fn from_row_col(row: usize, col: usize) -> Result<Self, crate::Error> {
        if row < 3 && col < 3 {
            Ok(Position(row * 3 + col))
        } else {
            Err(crate::Error::InvalidMove { row, col })
        }
    }

    /// Iterate over all nine positions in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..9).map(Position)
    }

    /// Get the inner value.
    pub fn value(&self) -> usize {
        self.0
    }

    pub fn row(&self) -> usize {
        self.0 / 3
    }

    pub fn col(&self) -> usize {
        self.0 % 3
    }

    pub fn row_col(&self) -> (usize, usize) {
        (self.row(), self.col())
    }
}

impl From<Position> for usize {
    fn from(pos: Position) -> Self {
        pos.0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row(), self.col())
    }
}

/// Canonical key addressing a value-table entry.
///
/// The key is the nine cell characters of a board in row-major order
/// (`.`, `X`, `O`), so equal contents give equal keys and different
/// contents never collide. Value tables are only ever addressed through
/// this type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StateKey(String);

impl StateKey {
    pub(crate) fn from_cells(cells: &[Cell; 9]) -> Self {
        Self(cells.iter().map(|cell| cell.to_char()).collect())
    }

    /// Parse a key from its nine-character encoding.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidStateKey`] if the string is not exactly
    /// nine characters drawn from `.`, `X` and `O`.
    pub fn parse(value: &str) -> Result<Self, crate::Error> {
        let invalid = || crate::Error::InvalidStateKey {
            key: value.to_string(),
        };

        if value.chars().count() != 9 {
            return Err(invalid());
        }
        if !value.chars().all(|c| matches!(c, '.' | 'X' | 'O')) {
            return Err(invalid());
        }

        Ok(Self(value.to_string()))
    }

    /// Decode the key back into board cells.
    pub fn to_cells(&self) -> [Cell; 9] {
        let mut cells = [Cell::Empty; 9];
        for (cell, c) in cells.iter_mut().zip(self.0.chars()) {
            *cell = Cell::from_char(c).unwrap_or(Cell::Empty);
        }
        cells
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StateKey {
    type Error = crate::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<StateKey> for String {
    fn from(key: StateKey) -> Self {
        key.0
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
