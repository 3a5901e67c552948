//! Tools for explaining how a trained table values moves
//!
//! - [`heuristic`] scores positions the table has never seen.
//! - [`decision_tree`] expands every continuation from a position.
//! - [`move_values`] snapshots the agent's view of its next move.

pub mod decision_tree;
pub mod heuristic;
pub mod move_values;

pub use decision_tree::{CandidateMove, TreeGenerator, TreeNode, ValueSource};
pub use heuristic::evaluate_position;
pub use move_values::{MoveValuation, MoveValue, move_values};
