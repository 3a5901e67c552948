//! MessagePack implementation of the value-table repository.

use std::{fs, path::Path};

use crate::{Result, error::Error, ports::ValueTableRepository, td::SavedValueTable};

/// MessagePack-based value-table repository.
///
/// Saving writes to a sibling temporary file and renames it over the target,
/// so readers see either the old table or the new one.
///
/// # Examples
///
/// ```no_run
/// use tdtoe::adapters::MsgPackRepository;
/// use tdtoe::app::AgentConfig;
/// use tdtoe::ports::ValueTableRepository;
/// use tdtoe::td::Agent;
/// use tdtoe::tictactoe::Player;
/// use std::path::Path;
///
/// let repo = MsgPackRepository;
/// let agent = Agent::new(AgentConfig::new(Player::O))?;
///
/// repo.save(&agent.to_saved(), Path::new("values.msgpack"))?;
/// let loaded = repo.load(Path::new("values.msgpack"))?;
/// # Ok::<(), tdtoe::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackRepository;

impl MsgPackRepository {
    pub fn new() -> Self {
        Self
    }
}

impl ValueTableRepository for MsgPackRepository {
    fn save(&self, table: &SavedValueTable, path: &Path) -> Result<()> {
        let bytes = table.to_msgpack()?;

        let mut staging = path.as_os_str().to_owned();
        staging.push(".tmp");
        let staging = Path::new(&staging);

        let staged = fs::write(staging, &bytes)
            .map_err(|source| Error::Io {
                operation: format!("write file {staging:?}"),
                source,
            })
            .and_then(|()| {
                fs::rename(staging, path).map_err(|source| Error::Io {
                    operation: format!("replace file {path:?}"),
                    source,
                })
            });

        if staged.is_err() {
            // Best-effort cleanup; the save error is returned either way.
            let _ = fs::remove_file(staging);
        }
        staged
    }

    fn load(&self, path: &Path) -> Result<SavedValueTable> {
        let bytes = fs::read(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;

        SavedValueTable::from_msgpack(&bytes)
    }
}
