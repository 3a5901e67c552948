//! Subcommand implementations

pub mod inspect;
pub mod play;
pub mod train;
pub mod tree;
pub mod values;
