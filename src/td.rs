//! Temporal-difference learning over a tabular value function
//!
//! - [`StateEnumerator`] walks every cell assignment and seeds a fresh table.
//! - [`ValueTable`] maps [`crate::types::StateKey`]s to expected outcome values.
//! - [`Agent`] plays epsilon-greedy over the table and applies TD(0) backups.
//! - [`SavedValueTable`] is the versioned on-disk form of a table.
//!
//! ## Usage Example
//!
//! ```no_run
//! use tdtoe::app::AgentConfig;
//! use tdtoe::td::Agent;
//! use tdtoe::tictactoe::{Board, Player};
//!
//! let mut agent = Agent::new(AgentConfig::new(Player::O).with_seed(42))?;
//! let mut board = Board::new();
//! board.apply_move(1, 1, Player::X)?;
//!
//! let reply = agent.action(&board)?;
//! board.apply_move(reply.row(), reply.col(), Player::O)?;
//! # Ok::<(), tdtoe::Error>(())
//! ```

pub mod agent;
pub mod enumerator;
pub mod serialization;
pub mod value_table;

pub use agent::Agent;
pub use enumerator::{EnumerationStats, StateEnumerator};
pub use serialization::SavedValueTable;
pub use value_table::{ValueTable, outcome_value};
