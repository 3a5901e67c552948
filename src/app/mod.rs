//! Application layer: agent configuration and the dependency container.
//!
//! ```text
//!   App ──owns──▶ ValueTableRepository (MsgPackRepository | InMemoryRepository)
//!    │
//!    └──creates──▶ Agent (enumerated defaults, optionally overlaid by a saved table)
//! ```

pub mod config;
pub mod container;

pub use config::AgentConfig;
pub use container::{App, AppBuilder, LoadOutcome};
