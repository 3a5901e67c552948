//! Repository port for value-table persistence.
//!
//! Storage is an opaque save/load pair: a table is always written and read as
//! one whole snapshot, never merged piecewise.

use std::path::Path;

use crate::{Result, td::SavedValueTable};

/// Port for persisting and loading trained value tables.
///
/// # Examples
///
/// ```no_run
/// use tdtoe::ports::ValueTableRepository;
/// use tdtoe::td::SavedValueTable;
/// use std::path::Path;
///
/// fn backup_table<R: ValueTableRepository>(
///     repo: &R,
///     table: &SavedValueTable,
///     path: &Path,
/// ) -> tdtoe::Result<()> {
///     repo.save(table, path)
/// }
/// ```
pub trait ValueTableRepository {
    /// Save a table snapshot, replacing whatever was stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the location cannot be
    /// written.
    fn save(&self, table: &SavedValueTable, path: &Path) -> Result<()>;

    /// Load a table snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is stored at `path` or the stored bytes do
    /// not decode.
    fn load(&self, path: &Path) -> Result<SavedValueTable>;
}
