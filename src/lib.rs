//! Tic-tac-toe agent trained by temporal-difference learning
//!
//! This crate provides:
//! - Board representation, winner detection and game records
//! - Exhaustive enumeration that seeds a tabular value function
//! - An epsilon-greedy TD(0) agent and a self-play trainer
//! - Decision trees and move valuations explaining the agent's choices
//! - Versioned persistence of trained tables and interactive game sessions

pub mod adapters;
pub mod analysis;
pub mod app;
pub mod cli;
pub mod error;
pub mod ports;
pub mod session;
pub mod td;
pub mod tictactoe;
pub mod training;
pub mod types;

pub use error::{Error, Result};
pub use td::{Agent, ValueTable};
pub use tictactoe::{Board, GameOutcome, Player};
pub use types::{Position, StateKey};
