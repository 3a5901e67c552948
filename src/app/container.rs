//! Dependency injection container for the tdtoe application.
//!
//! The container owns the persistence adapter and hands out agents that are
//! either freshly enumerated or enumerated and then overlaid with a saved
//! table.

use std::{path::Path, sync::Arc};

use super::config::AgentConfig;
use crate::{
    Error, Result,
    adapters::MsgPackRepository,
    ports::ValueTableRepository,
    td::Agent,
};

/// What happened when an agent was asked to pick up a saved table
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// Saved entries were applied on top of the defaults
    Loaded { entries: usize },
    /// Nothing stored at the path; defaults kept
    Missing,
    /// The stored table was unreadable or incompatible; defaults kept
    Rejected { reason: String },
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded { .. })
    }
}

/// Application with dependency injection.
///
/// # Examples
///
/// ## Production usage
///
/// ```no_run
/// use tdtoe::app::{App, AgentConfig};
/// use tdtoe::tictactoe::Player;
///
/// let app = App::new();
/// let agent = app.create_agent(AgentConfig::new(Player::O).with_seed(42))?;
/// # Ok::<(), tdtoe::Error>(())
/// ```
///
/// ## Testing with dependency injection
///
/// ```
/// use tdtoe::app::App;
/// use tdtoe::adapters::InMemoryRepository;
///
/// let app = App::for_testing()
///     .with_repository(InMemoryRepository::new())
///     .with_default_seed(42)
///     .build();
/// ```
pub struct App {
    repository: Arc<dyn ValueTableRepository + Send + Sync>,
    /// Default random seed (None = non-deterministic)
    default_seed: Option<u64>,
}

impl App {
    /// Create a new app backed by [`MsgPackRepository`] and no default seed.
    pub fn new() -> Self {
        Self {
            repository: Arc::new(MsgPackRepository::new()),
            default_seed: None,
        }
    }

    /// Builder for an app with injected dependencies.
    pub fn for_testing() -> AppBuilder {
        AppBuilder::new()
    }

    pub fn repository(&self) -> Arc<dyn ValueTableRepository + Send + Sync> {
        Arc::clone(&self.repository)
    }

    /// Create an agent with a freshly enumerated table.
    ///
    /// A seed in `config` wins over the app's default seed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for an invalid configuration.
    pub fn create_agent(&self, mut config: AgentConfig) -> Result<Agent> {
        if config.seed.is_none() {
            config.seed = self.default_seed;
        }
        Agent::new(config)
    }

    /// Create an agent and overlay the table saved at `path`.
    ///
    /// A missing, corrupt or incompatible file is not fatal: a one-line
    /// diagnostic goes to stderr and the agent keeps its enumerated defaults.
    ///
    /// # Errors
    ///
    /// Only configuration errors are returned.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use tdtoe::app::{App, AgentConfig};
    /// use tdtoe::tictactoe::Player;
    /// use std::path::Path;
    ///
    /// let app = App::new();
    /// let (agent, outcome) =
    ///     app.load_agent(AgentConfig::inference(Player::O), Path::new("values.msgpack"))?;
    /// # Ok::<(), tdtoe::Error>(())
    /// ```
    pub fn load_agent(&self, config: AgentConfig, path: &Path) -> Result<(Agent, LoadOutcome)> {
        let mut agent = self.create_agent(config)?;

        let outcome = match self
            .repository
            .load(path)
            .and_then(|saved| agent.load_table(saved))
        {
            Ok(entries) => LoadOutcome::Loaded { entries },
            Err(Error::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
                eprintln!("No value table at {path:?}; using enumerated defaults");
                LoadOutcome::Missing
            }
            Err(e) => {
                eprintln!("Could not load value table from {path:?} ({e}); using enumerated defaults");
                LoadOutcome::Rejected {
                    reason: e.to_string(),
                }
            }
        };

        Ok((agent, outcome))
    }

    /// Persist `agent`'s table through the configured repository.
    ///
    /// # Errors
    ///
    /// Propagates repository errors.
    pub fn save_agent(&self, agent: &Agent, path: &Path) -> Result<()> {
        self.repository.save(&agent.to_saved(), path)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing an app with custom dependencies.
pub struct AppBuilder {
    repository: Option<Arc<dyn ValueTableRepository + Send + Sync>>,
    default_seed: Option<u64>,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            repository: None,
            default_seed: None,
        }
    }

    pub fn with_repository<R: ValueTableRepository + Send + Sync + 'static>(
        mut self,
        repo: R,
    ) -> Self {
        self.repository = Some(Arc::new(repo));
        self
    }

    /// Seed every agent whose configuration carries no seed of its own.
    pub fn with_default_seed(mut self, seed: u64) -> Self {
        self.default_seed = Some(seed);
        self
    }

    /// Build the app; falls back to [`MsgPackRepository`] without a repository.
    pub fn build(self) -> App {
        App {
            repository: self
                .repository
                .unwrap_or_else(|| Arc::new(MsgPackRepository::new())),
            default_seed: self.default_seed,
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}
