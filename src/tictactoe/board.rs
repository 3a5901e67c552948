//! Board representation and basic operations

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{GameOutcome, lines::evaluate_winner};
use crate::types::{Position, StateKey};

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    X,
    O,
}

impl Cell {
    /// All cell values, in the order the state enumerator assigns them
    pub const ALL: [Cell; 3] = [Cell::Empty, Cell::X, Cell::O];

    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | ' ' | '_' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }

    pub fn to_player(self) -> Option<Player> {
        match self {
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
            Cell::Empty => None,
        }
    }
}

/// A player in the game. X always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_cell().to_char())
    }
}

/// A 3x3 board of cells.
///
/// The board carries no turn counter. Whose turn it is follows from the piece
/// counts (see [`Board::next_to_move`]) or is passed explicitly by the caller.
///
/// This type implements `Copy`, so hypothetical moves are evaluated on a fresh
/// value (see [`Board::with_move`]) rather than by mutating and restoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    pub cells: [Cell; 9],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: [Cell; 9]) -> Self {
        Self { cells }
    }

    /// Create a board from a string of 9 cell characters.
    ///
    /// Whitespace and `|` separators are ignored, so both `"X.O......"` and
    /// `"X.O|...|..."` are accepted.
    ///
    /// # Errors
    ///
    /// Returns error if fewer than 9 cells are present or any character is
    /// not a valid cell representation.
    pub fn from_string(s: &str) -> Result<Self, crate::Error> {
        let chars: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '|')
            .collect();

        if chars.len() != 9 {
            return Err(crate::Error::InvalidBoardLength {
                expected: 9,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut cells = [Cell::Empty; 9];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: s.to_string(),
            })?;
        }

        Ok(Self { cells })
    }

    /// Get the cell at a position
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.value()]
    }

    /// Check whether `(row, col)` is on the board and empty
    pub fn is_valid_move(&self, row: usize, col: usize) -> bool {
        row < 3 && col < 3 && self.cells[row * 3 + col] == Cell::Empty
    }

    /// Place `player`'s marker at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidMove`] when the coordinates are out of
    /// range or the cell is occupied. The board is left untouched in that case.
    pub fn apply_move(&mut self, row: usize, col: usize, player: Player) -> Result<(), crate::Error> {
        if !self.is_valid_move(row, col) {
            return Err(crate::Error::InvalidMove { row, col });
        }
        self.cells[row * 3 + col] = player.to_cell();
        Ok(())
    }

    /// Return a copy of the board with `player` placed at `pos`.
    ///
    /// Used for hypothetical moves; the caller is responsible for `pos` being
    /// empty (it always comes from [`Board::empty_positions`]).
    #[must_use = "with_move returns a new board; the original is unchanged"]
    pub fn with_move(&self, pos: Position, player: Player) -> Board {
        let mut next = *self;
        next.cells[pos.value()] = player.to_cell();
        next
    }

    /// Get all empty positions in row-major order
    pub fn empty_positions(&self) -> Vec<Position> {
        Position::all()
            .filter(|&pos| self.get(pos) == Cell::Empty)
            .collect()
    }

    /// Winner of the game, if decided: a win, a draw, or `None` while in progress
    pub fn winner(&self) -> Option<GameOutcome> {
        evaluate_winner(&self.cells)
    }

    pub fn is_terminal(&self) -> bool {
        self.winner().is_some()
    }

    /// Deterministic, collision-free key for this board's contents
    pub fn canonical_key(&self) -> StateKey {
        StateKey::from_cells(&self.cells)
    }

    fn piece_counts(&self) -> (usize, usize) {
        self.cells.iter().fold((0, 0), |(x, o), cell| match cell {
            Cell::X => (x + 1, o),
            Cell::O => (x, o + 1),
            Cell::Empty => (x, o),
        })
    }

    /// The player whose marker was placed last, derived from piece counts.
    ///
    /// Equal counts mean O moved last (or nobody has, on an empty board);
    /// one extra X means X moved last. Any other count is unreachable in real
    /// play and yields `None`.
    pub fn last_mover(&self) -> Option<Player> {
        let (x, o) = self.piece_counts();
        if x == o {
            Some(Player::O)
        } else if x == o + 1 {
            Some(Player::X)
        } else {
            None
        }
    }

    /// The player to move next, derived from piece counts
    pub fn next_to_move(&self) -> Option<Player> {
        self.last_mover().map(Player::opponent)
    }

    /// Count the number of occupied cells on the board
    pub fn occupied_count(&self) -> usize {
        let (x, o) = self.piece_counts();
        x + o
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                write!(f, "{}", self.cells[row * 3 + col].to_char())?;
            }
            if row < 2 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board() {
        let board = Board::new();
        assert_eq!(board.empty_positions().len(), 9);
        assert_eq!(board.next_to_move(), Some(Player::X));
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn test_apply_move() {
        let mut board = Board::new();
        board.apply_move(1, 1, Player::X).unwrap();
        assert_eq!(board.cells[4], Cell::X);
        assert_eq!(board.next_to_move(), Some(Player::O));
    }

    #[test]
    fn test_invalid_move_leaves_board_untouched() {
        let mut board = Board::new();
        board.apply_move(0, 0, Player::X).unwrap();
        let before = board;

        assert!(matches!(
            board.apply_move(0, 0, Player::O),
            Err(crate::Error::InvalidMove { row: 0, col: 0 })
        ));
        assert!(board.apply_move(3, 0, Player::O).is_err());
        assert!(board.apply_move(0, 7, Player::O).is_err());
        assert_eq!(board, before);
    }

    #[test]
    fn test_is_valid_move() {
        let board = Board::from_string("X........").unwrap();
        assert!(!board.is_valid_move(0, 0));
        assert!(board.is_valid_move(0, 1));
        assert!(!board.is_valid_move(3, 3));
    }

    #[test]
    fn test_with_move_does_not_mutate() {
        let board = Board::from_string("X...O....").unwrap();
        let next = board.with_move(Position::new(8).unwrap(), Player::X);
        assert_eq!(board.cells[8], Cell::Empty);
        assert_eq!(next.cells[8], Cell::X);
    }

    #[test]
    fn test_draw_detection() {
        // X O X
        // X O O
        // O X X
        let board = Board::from_string("XOX XOO OXX").unwrap();
        assert_eq!(board.winner(), Some(GameOutcome::Draw));
        assert!(board.is_terminal());
    }

    #[test]
    fn test_last_mover_parity() {
        assert_eq!(Board::new().last_mover(), Some(Player::O));
        assert_eq!(
            Board::from_string("X........").unwrap().last_mover(),
            Some(Player::X)
        );
        assert_eq!(
            Board::from_string("XO.......").unwrap().last_mover(),
            Some(Player::O)
        );
        assert_eq!(Board::from_string("XX.......").unwrap().last_mover(), None);
        assert_eq!(Board::from_string("OO.......").unwrap().next_to_move(), None);
    }

    #[test]
    fn test_canonical_key_distinguishes_contents() {
        let a = Board::from_string("X........").unwrap();
        let b = Board::from_string(".X.......").unwrap();
        assert_ne!(a.canonical_key(), b.canonical_key());
        assert_eq!(a.canonical_key(), a.canonical_key());
        assert_eq!(a.canonical_key().as_str(), "X........");
    }

    #[test]
    fn test_length_error_names_both_directions() {
        for input in ["XO", "XO.XO.XO.."] {
            let message = Board::from_string(input).unwrap_err().to_string();
            assert!(message.starts_with("wrong board length"), "{message}");
            assert!(!message.contains("too short"), "{message}");
        }
    }

    #[test]
    fn test_from_string_rejects_bad_input() {
        assert!(matches!(
            Board::from_string("XO"),
            Err(crate::Error::InvalidBoardLength { got: 2, .. })
        ));
        assert!(matches!(
            Board::from_string("XO.XO.XO.."),
            Err(crate::Error::InvalidBoardLength { got: 10, .. })
        ));
        assert!(matches!(
            Board::from_string("XO.?....."),
            Err(crate::Error::InvalidCellCharacter { character: '?', .. })
        ));
    }

    #[test]
    fn test_display() {
        let board = Board::from_string("X.O|.X.|..O").unwrap();
        assert_eq!(board.to_string(), "X.O\n.X.\n..O");
    }
}
