//! Full-depth decision tree explaining how moves are valued
//!
//! Every candidate move gets a value from one of two sources: the exact table
//! entry when the resulting position has one, otherwise the outcome of the
//! move (win, draw, loss) or the static heuristic for unfinished positions.
//! Candidates are sorted by descending value at every node, whichever player
//! is to move there; opponent nodes are not re-sorted from the opponent's
//! point of view.

use serde::{Deserialize, Serialize};

use super::heuristic::evaluate_position;
use crate::{
    td::{Agent, ValueTable},
    tictactoe::{Board, GameOutcome, Player},
    types::Position,
};

/// Value assigned to an unfinished, untrained position whose heuristic is 0
pub const HEURISTIC_FLOOR: f64 = 0.001;

/// Where a candidate move's value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueSource {
    /// Exact entry from the value table
    Trained,
    /// The move completes a line for the mover
    ImmediateWin,
    /// The move fills the board without a line
    Draw,
    /// The move ends the game in the mover's loss
    Loss,
    /// Unfinished and untrained; scored by the positional heuristic
    Heuristic,
}

/// One board position in the tree and the moves available from it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeNode {
    pub board: Board,
    /// Player to move at this position
    pub player: Player,
    pub depth: usize,
    /// Presentation hint: only the root starts expanded
    pub expanded: bool,
    /// Candidate moves, highest value first
    pub moves: Vec<CandidateMove>,
}

/// A move from a [`TreeNode`] with its value and the subtree it leads to
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateMove {
    pub position: Position,
    /// Board after the move
    pub board: Board,
    pub player: Player,
    pub value: f64,
    pub source: ValueSource,
    /// Absent once the game is over or the depth bound is reached
    pub child: Option<Box<TreeNode>>,
    pub has_children: bool,
}

impl TreeNode {
    pub fn has_children(&self) -> bool {
        !self.moves.is_empty()
    }

    /// Highest-valued candidate, first in row-major order among equals
    pub fn best_move(&self) -> Option<&CandidateMove> {
        self.moves.first()
    }

    pub fn find_move(&self, position: Position) -> Option<&CandidateMove> {
        self.moves.iter().find(|mv| mv.position == position)
    }

    /// Number of nodes in this subtree, including this one
    pub fn node_count(&self) -> usize {
        1 + self
            .moves
            .iter()
            .filter_map(|mv| mv.child.as_deref())
            .map(TreeNode::node_count)
            .sum::<usize>()
    }

    /// Deepest node depth in this subtree
    pub fn max_depth(&self) -> usize {
        self.moves
            .iter()
            .filter_map(|mv| mv.child.as_deref())
            .map(TreeNode::max_depth)
            .max()
            .unwrap_or(self.depth)
    }
}

/// Builds [`TreeNode`] trees from a read-only value table.
#[derive(Debug, Clone, Copy)]
pub struct TreeGenerator<'a> {
    table: &'a ValueTable,
    loss_value: f64,
    max_depth: Option<usize>,
}

impl<'a> TreeGenerator<'a> {
    pub fn new(table: &'a ValueTable, loss_value: f64) -> Self {
        Self {
            table,
            loss_value,
            max_depth: None,
        }
    }

    /// Generator reading `agent`'s table and loss value
    pub fn for_agent(agent: &'a Agent) -> Self {
        Self::new(agent.values(), agent.loss_value())
    }

    /// Stop expanding below `depth` (the root is depth 0)
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Build the tree rooted at `root` with `player` to move.
    ///
    /// Returns `None` when `root` is already decided.
    pub fn generate(&self, root: &Board, player: Player) -> Option<TreeNode> {
        self.build(root, player, 0)
    }

    fn build(&self, board: &Board, player: Player, depth: usize) -> Option<TreeNode> {
        if board.is_terminal() {
            return None;
        }
        if self.max_depth.is_some_and(|max| depth > max) {
            return None;
        }

        let mut moves: Vec<CandidateMove> = board
            .empty_positions()
            .into_iter()
            .map(|position| {
                let next = board.with_move(position, player);
                let (value, source) = self.evaluate_move(&next, player);
                let child = self
                    .build(&next, player.opponent(), depth + 1)
                    .map(Box::new);
                let has_children = child.as_ref().is_some_and(|node| node.has_children());

                CandidateMove {
                    position,
                    board: next,
                    player,
                    value,
                    source,
                    child,
                    has_children,
                }
            })
            .collect();

        moves.sort_by(|a, b| b.value.total_cmp(&a.value));

        Some(TreeNode {
            board: *board,
            player,
            depth,
            expanded: depth == 0,
            moves,
        })
    }

    /// Value of the position `next`, reached by `mover`'s move.
    pub fn evaluate_move(&self, next: &Board, mover: Player) -> (f64, ValueSource) {
        if let Some(value) = self.table.get(&next.canonical_key()) {
            return (value, ValueSource::Trained);
        }

        match next.winner() {
            Some(GameOutcome::Win(winner)) if winner == mover => (1.0, ValueSource::ImmediateWin),
            Some(GameOutcome::Draw) => (0.0, ValueSource::Draw),
            Some(GameOutcome::Win(_)) => (self.loss_value, ValueSource::Loss),
            None => {
                let value = evaluate_position(next, mover);
                let value = if value == 0.0 { HEURISTIC_FLOOR } else { value };
                (value, ValueSource::Heuristic)
            }
        }
    }
}
