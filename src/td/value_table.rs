//! Value table mapping canonical state keys to expected outcome values

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    tictactoe::{GameOutcome, Player},
    types::StateKey,
};

/// Value of a position for an untrained, undecided state
pub const UNDECIDED_VALUE: f64 = 0.5;
/// Value of a position the agent has won
pub const WIN_VALUE: f64 = 1.0;
/// Value of a drawn position
pub const DRAW_VALUE: f64 = 0.0;

/// Map a game state to its initial value from `player`'s point of view.
///
/// Shared by table seeding, lazy insertion on lookup, and terminal backups.
pub fn outcome_value(outcome: Option<GameOutcome>, player: Player, loss_value: f64) -> f64 {
    match outcome {
        Some(GameOutcome::Win(winner)) if winner == player => WIN_VALUE,
        Some(GameOutcome::Win(_)) => loss_value,
        Some(GameOutcome::Draw) => DRAW_VALUE,
        None => UNDECIDED_VALUE,
    }
}

/// Expected outcome values for one agent's player, keyed by [`StateKey`].
///
/// Entries are added in bulk by the state enumerator or lazily on lookup and
/// are never removed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueTable {
    values: HashMap<StateKey, f64>,
}

impl ValueTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &StateKey) -> Option<f64> {
        self.values.get(key).copied()
    }

    pub fn contains(&self, key: &StateKey) -> bool {
        self.values.contains_key(key)
    }

    pub fn insert(&mut self, key: StateKey, value: f64) {
        self.values.insert(key, value);
    }

    /// Return the stored value, inserting `init()` first if the key is absent
    pub fn get_or_insert_with(&mut self, key: StateKey, init: impl FnOnce() -> f64) -> f64 {
        *self.values.entry(key).or_insert_with(init)
    }

    pub(crate) fn get_mut(&mut self, key: &StateKey) -> Option<&mut f64> {
        self.values.get_mut(key)
    }

    /// Overwrite or add every entry from `entries`
    pub fn extend(&mut self, entries: impl IntoIterator<Item = (StateKey, f64)>) {
        self.values.extend(entries);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StateKey, f64)> {
        self.values.iter().map(|(key, &value)| (key, value))
    }

    /// Entries sorted by key, for stable output
    pub fn sorted_entries(&self) -> Vec<(StateKey, f64)> {
        let mut entries: Vec<_> = self
            .values
            .iter()
            .map(|(key, &value)| (key.clone(), value))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(StateKey, f64)> for ValueTable {
    fn from_iter<I: IntoIterator<Item = (StateKey, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> StateKey {
        StateKey::parse(s).unwrap()
    }

    #[test]
    fn test_outcome_value_mapping() {
        assert_eq!(outcome_value(Some(GameOutcome::Win(Player::O)), Player::O, -1.0), 1.0);
        assert_eq!(outcome_value(Some(GameOutcome::Win(Player::X)), Player::O, -1.0), -1.0);
        assert_eq!(outcome_value(Some(GameOutcome::Draw), Player::O, -1.0), 0.0);
        assert_eq!(outcome_value(None, Player::O, -1.0), 0.5);
    }

    #[test]
    fn test_get_or_insert_keeps_existing() {
        let mut table = ValueTable::new();
        table.insert(key("X........"), 0.25);

        assert_eq!(table.get_or_insert_with(key("X........"), || 0.9), 0.25);
        assert_eq!(table.get_or_insert_with(key(".X......."), || 0.9), 0.9);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_extend_overwrites() {
        let mut table: ValueTable = [(key("X........"), 0.5), (key("XO......."), 0.5)]
            .into_iter()
            .collect();
        table.extend([(key("X........"), 0.75), (key("XOX......"), 0.1)]);

        assert_eq!(table.get(&key("X........")), Some(0.75));
        assert_eq!(table.get(&key("XO.......")), Some(0.5));
        assert_eq!(table.get(&key("XOX......")), Some(0.1));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_sorted_entries() {
        let table: ValueTable = [(key("O........"), 0.1), (key("......X.."), 0.2)]
            .into_iter()
            .collect();
        let entries = table.sorted_entries();
        assert_eq!(entries[0].0.as_str(), "......X..");
        assert_eq!(entries[1].0.as_str(), "O........");
    }
}
