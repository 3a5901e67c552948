//! Persisted form of a trained value table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::value_table::ValueTable;
use crate::{Error, Result, tictactoe::Player, types::StateKey};

/// Versioned snapshot of an agent's value table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedValueTable {
    pub version: u32,
    /// Marker the table's values are written for
    pub player: Player,
    pub loss_value: f64,
    entries: BTreeMap<StateKey, f64>,
}

impl SavedValueTable {
    pub const VERSION: u32 = 1;

    pub fn new(player: Player, loss_value: f64, table: &ValueTable) -> Self {
        Self {
            version: Self::VERSION,
            player,
            loss_value,
            entries: table.sorted_entries().into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &StateKey) -> Option<f64> {
        self.entries.get(key).copied()
    }

    /// Check that this snapshot can be loaded into an agent playing `player`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormatVersion`] for an unknown version,
    /// [`Error::PlayerMismatch`] when the table was written for the other
    /// marker and [`Error::InvalidConfiguration`] for a non-finite loss value.
    pub fn check_compatible(&self, player: Player) -> Result<()> {
        if self.version != Self::VERSION {
            return Err(Error::UnsupportedFormatVersion {
                found: self.version,
                expected: Self::VERSION,
            });
        }
        if self.player != player {
            return Err(Error::PlayerMismatch {
                expected: player,
                found: self.player,
            });
        }
        if !self.loss_value.is_finite() {
            return Err(Error::InvalidConfiguration {
                message: format!("saved loss value must be finite, got {}", self.loss_value),
            });
        }
        Ok(())
    }

    pub fn into_entries(self) -> BTreeMap<StateKey, f64> {
        self.entries
    }

    /// Encode as MessagePack.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SerializationContext`] if encoding fails.
    pub fn to_msgpack(&self) -> Result<Vec<u8>> {
        rmp_serde::to_vec(self).map_err(|e| Error::SerializationContext {
            operation: "serialize value table to MessagePack".to_string(),
            message: e.to_string(),
        })
    }

    /// Decode from MessagePack.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SerializationContext`] for truncated or corrupt input.
    pub fn from_msgpack(bytes: &[u8]) -> Result<Self> {
        rmp_serde::from_slice(bytes).map_err(|e| Error::SerializationContext {
            operation: "deserialize value table from MessagePack".to_string(),
            message: e.to_string(),
        })
    }
}
