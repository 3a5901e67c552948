//! In-memory value-table repository for testing.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::{Result, error::Error, ports::ValueTableRepository, td::SavedValueTable};

/// In-memory repository for testing.
///
/// Stores encoded tables in a shared map keyed by path, avoiding file system
/// I/O entirely. Clones share the same storage.
///
/// # Examples
///
/// ```
/// use tdtoe::adapters::InMemoryRepository;
/// use tdtoe::app::AgentConfig;
/// use tdtoe::ports::ValueTableRepository;
/// use tdtoe::td::Agent;
/// use tdtoe::tictactoe::Player;
/// use std::path::Path;
///
/// let repo = InMemoryRepository::new();
/// let agent = Agent::new(AgentConfig::new(Player::O))?;
///
/// repo.save(&agent.to_saved(), Path::new("values"))?;
/// let loaded = repo.load(Path::new("values"))?;
/// assert_eq!(loaded.len(), agent.values().len());
/// # Ok::<(), tdtoe::Error>(())
/// ```
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    storage: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn storage(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.storage.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of tables currently stored.
    pub fn count(&self) -> usize {
        self.storage().len()
    }

    /// Check if a table exists at the given path.
    pub fn contains(&self, path: &Path) -> bool {
        self.storage().contains_key(path.to_string_lossy().as_ref())
    }

    /// Store raw bytes at `path`, bypassing encoding.
    ///
    /// Lets tests plant truncated or corrupt tables.
    pub fn put_raw(&self, path: &Path, bytes: Vec<u8>) {
        self.storage()
            .insert(path.to_string_lossy().into_owned(), bytes);
    }
}

impl ValueTableRepository for InMemoryRepository {
    fn save(&self, table: &SavedValueTable, path: &Path) -> Result<()> {
        let bytes = table.to_msgpack()?;
        self.put_raw(path, bytes);
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<SavedValueTable> {
        let storage = self.storage();
        let bytes = storage
            .get(path.to_string_lossy().as_ref())
            .ok_or_else(|| Error::Io {
                operation: format!("load value table from in-memory storage at {path:?}"),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "key not found in memory"),
            })?;

        SavedValueTable::from_msgpack(bytes)
    }
}
