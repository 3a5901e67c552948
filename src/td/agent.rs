//! Tabular TD(0) agent
//!
//! The agent values *after-move* positions: to choose a move it places its own
//! marker on each empty cell, looks up the resulting position and takes the
//! best. Between its own moves it nudges the value of the position it left
//! toward the value of the position it reached next (one-step temporal
//! difference backup).

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use super::{
    enumerator::{EnumerationStats, StateEnumerator},
    serialization::SavedValueTable,
    value_table::{ValueTable, outcome_value},
};
use crate::{
    Error, Result,
    app::AgentConfig,
    tictactoe::{Board, GameOutcome, Player},
    types::{Position, StateKey},
};

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Position the agent moved into last, with the value it had at the time
#[derive(Debug, Clone, PartialEq)]
struct PreviousState {
    key: StateKey,
    value: f64,
}

/// Epsilon-greedy agent with a TD(0)-trained value table
#[derive(Debug, Clone)]
pub struct Agent {
    values: ValueTable,
    player: Player,
    alpha: f64,
    epsilon: f64,
    loss_value: f64,
    learning: bool,
    previous: Option<PreviousState>,
    enumeration: EnumerationStats,
    rng: StdRng,
    rng_seed: Option<u64>,
}

impl Agent {
    /// Create an agent and seed its value table by exhaustive enumeration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the configuration is invalid.
    pub fn new(config: AgentConfig) -> Result<Self> {
        config.validate()?;

        let mut values = ValueTable::new();
        let enumeration =
            StateEnumerator::new(config.player, config.loss_value).seed(&mut values);

        Ok(Self {
            values,
            player: config.player,
            alpha: config.alpha,
            epsilon: config.epsilon,
            loss_value: config.loss_value,
            learning: config.learning,
            previous: None,
            enumeration,
            rng: build_rng(config.seed),
            rng_seed: config.seed,
        })
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn set_epsilon(&mut self, epsilon: f64) {
        self.epsilon = epsilon;
    }

    pub fn loss_value(&self) -> f64 {
        self.loss_value
    }

    pub fn is_learning(&self) -> bool {
        self.learning
    }

    pub fn set_learning(&mut self, learning: bool) {
        self.learning = learning;
    }

    pub fn values(&self) -> &ValueTable {
        &self.values
    }

    /// Counters from the enumeration that seeded this agent's table
    pub fn enumeration_stats(&self) -> EnumerationStats {
        self.enumeration
    }

    /// The position recorded for the next backup and its value, if any
    pub fn previous_state(&self) -> Option<(&StateKey, f64)> {
        self.previous.as_ref().map(|prev| (&prev.key, prev.value))
    }

    /// Seed the random source was last built from, if it was seeded
    pub fn rng_seed(&self) -> Option<u64> {
        self.rng_seed
    }

    /// Reseed the random source used for exploration and tie-breaking
    pub fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
    }

    /// Value of a game state from this agent's point of view
    pub fn outcome_value(&self, outcome: Option<GameOutcome>) -> f64 {
        outcome_value(outcome, self.player, self.loss_value)
    }

    /// Value of `board`, inserting the initializer value if it was never seen.
    pub fn lookup(&mut self, board: &Board) -> f64 {
        let outcome = board.winner();
        let initial = outcome_value(outcome, self.player, self.loss_value);
        self.values
            .get_or_insert_with(board.canonical_key(), || initial)
    }

    /// Choose a move: uniformly random with probability ε, greedy otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoValidMoves`] if the board has no empty cell.
    pub fn action(&mut self, board: &Board) -> Result<Position> {
        if self.rng.random::<f64>() < self.epsilon {
            self.explore(board)
        } else {
            self.greedy(board)
        }
    }

    /// Pick the highest-valued move, breaking ties uniformly at random.
    ///
    /// Backs up the previous position toward the chosen move's value, then
    /// records the chosen position for the next backup.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoValidMoves`] if the board has no empty cell.
    pub fn greedy(&mut self, board: &Board) -> Result<Position> {
        let mut best_value = f64::NEG_INFINITY;
        let mut best_moves = Vec::new();

        for pos in board.empty_positions() {
            let value = self.lookup(&board.with_move(pos, self.player));
            if value > best_value {
                best_value = value;
                best_moves.clear();
                best_moves.push(pos);
            } else if value == best_value {
                best_moves.push(pos);
            }
        }

        let chosen = *best_moves.choose(&mut self.rng).ok_or(Error::NoValidMoves)?;

        self.backup(best_value);
        self.record(board.with_move(chosen, self.player), best_value);

        Ok(chosen)
    }

    /// Exploratory move: any empty cell with equal probability.
    ///
    /// Neither backs up nor records, so the next greedy move still backs up
    /// the position the last greedy move reached.
    fn explore(&mut self, board: &Board) -> Result<Position> {
        let chosen = *board
            .empty_positions()
            .choose(&mut self.rng)
            .ok_or(Error::NoValidMoves)?;

        self.lookup(&board.with_move(chosen, self.player));

        Ok(chosen)
    }

    fn record(&mut self, board: Board, value: f64) {
        self.previous = Some(PreviousState {
            key: board.canonical_key(),
            value,
        });
    }

    /// TD(0) update: `V(prev) += α · (next_value − prev_value)`.
    ///
    /// No-op without a recorded previous position or with learning disabled.
    pub fn backup(&mut self, next_value: f64) {
        if !self.learning {
            return;
        }
        let Some(prev) = &self.previous else {
            return;
        };
        if let Some(value) = self.values.get_mut(&prev.key) {
            *value += self.alpha * (next_value - prev.value);
        }
    }

    /// Final backup toward the outcome's value; starts a fresh trajectory.
    pub fn episode_over(&mut self, outcome: GameOutcome) {
        self.backup(self.outcome_value(Some(outcome)));
        self.previous = None;
    }

    /// Snapshot of the table in its persisted form
    pub fn to_saved(&self) -> SavedValueTable {
        SavedValueTable::new(self.player, self.loss_value, &self.values)
    }

    /// Overwrite or extend the table with every entry of `saved`.
    ///
    /// The agent adopts the saved loss value. When it differs from the
    /// current one the defaults are re-enumerated with it first, so decided
    /// positions the file does not cover agree with the loaded entries.
    /// Nothing is applied unless the whole file checks out.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormatVersion`], [`Error::PlayerMismatch`]
    /// or [`Error::InvalidConfiguration`] (non-finite loss value) when `saved`
    /// cannot belong to this agent.
    pub fn load_table(&mut self, saved: SavedValueTable) -> Result<usize> {
        saved.check_compatible(self.player)?;

        if saved.loss_value != self.loss_value {
            self.loss_value = saved.loss_value;
            self.values = ValueTable::new();
            self.enumeration =
                StateEnumerator::new(self.player, self.loss_value).seed(&mut self.values);
            self.previous = None;
        }

        let entries = saved.into_entries();
        let count = entries.len();
        self.values.extend(entries);
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent(player: Player) -> Agent {
        Agent::new(AgentConfig::new(player).with_epsilon(0.0).with_seed(7)).unwrap()
    }

    fn board(s: &str) -> Board {
        Board::from_string(s).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        assert!(Agent::new(AgentConfig::new(Player::X).with_alpha(2.0)).is_err());
    }

    #[test]
    fn test_lookup_inserts_missing_state() {
        let mut agent = agent(Player::X);
        // Two X and no O is not an X-moved-last position, so it was not seeded.
        let odd = board("XX.......");
        assert!(!agent.values().contains(&odd.canonical_key()));

        assert_eq!(agent.lookup(&odd), 0.5);
        assert!(agent.values().contains(&odd.canonical_key()));
    }

    #[test]
    fn test_lookup_inserts_terminal_values() {
        let mut agent =
            Agent::new(AgentConfig::new(Player::O).with_loss_value(-1.0).with_seed(1)).unwrap();
        assert_eq!(agent.lookup(&board("XXXOO....")), -1.0);
        assert_eq!(agent.lookup(&board("OOOXX.X..")), 1.0);
    }

    #[test]
    fn test_greedy_takes_winning_move() {
        let mut agent = agent(Player::X);
        // X X .
        // O O .
        // . . .
        let chosen = agent.greedy(&board("XX.OO....")).unwrap();
        assert_eq!(chosen.value(), 2);
    }

    #[test]
    fn test_greedy_records_previous_state() {
        let mut agent = agent(Player::X);
        let chosen = agent.greedy(&board("XX.OO....")).unwrap();
        let expected = board("XX.OO....").with_move(chosen, Player::X).canonical_key();

        let (key, value) = agent.previous_state().unwrap();
        assert_eq!(key, &expected);
        assert_eq!(value, 1.0);
    }

    #[test]
    fn test_backup_moves_previous_value() {
        let mut agent = Agent::new(
            AgentConfig::new(Player::X)
                .with_alpha(0.5)
                .with_epsilon(0.0)
                .with_seed(3),
        )
        .unwrap();

        agent.greedy(&Board::new()).unwrap();
        let (key, prev_value) = agent.previous_state().map(|(k, v)| (k.clone(), v)).unwrap();
        assert_eq!(prev_value, 0.5);

        agent.backup(1.0);
        assert_eq!(agent.values().get(&key), Some(0.75));
    }

    #[test]
    fn test_backup_without_previous_is_noop() {
        let mut agent = agent(Player::X);
        let before = agent.values().clone();
        agent.backup(1.0);
        assert_eq!(agent.values(), &before);
    }

    #[test]
    fn test_episode_over_clears_trajectory() {
        let mut agent = agent(Player::O);
        agent.greedy(&board("X........")).unwrap();
        assert!(agent.previous_state().is_some());

        agent.episode_over(GameOutcome::Draw);
        assert!(agent.previous_state().is_none());
    }

    #[test]
    fn test_no_moves_on_full_board() {
        let mut agent = agent(Player::O);
        let full = board("XOXXOOOXX");
        assert!(matches!(agent.greedy(&full), Err(Error::NoValidMoves)));
        assert!(matches!(agent.action(&full), Err(Error::NoValidMoves)));
    }

    #[test]
    fn test_exploration_picks_empty_cells() {
        let mut agent = Agent::new(
            AgentConfig::new(Player::O)
                .with_epsilon(1.0)
                .with_seed(11),
        )
        .unwrap();
        let position = board("XOX.X.O..");
        for _ in 0..50 {
            let chosen = agent.action(&position).unwrap();
            assert!(position.is_valid_move(chosen.row(), chosen.col()));
        }
    }

    #[test]
    fn test_saved_roundtrip_into_fresh_agent() {
        let mut trained = agent(Player::O);
        trained.greedy(&board("X........")).unwrap();
        trained.episode_over(GameOutcome::Win(Player::O));

        let mut fresh = agent(Player::O);
        let loaded = fresh.load_table(trained.to_saved()).unwrap();
        assert_eq!(loaded, trained.values().len());
        assert_eq!(fresh.values(), trained.values());
    }

    #[test]
    fn test_load_table_adopts_saved_loss_value() {
        let trained =
            Agent::new(AgentConfig::new(Player::O).with_loss_value(-1.0).with_seed(1)).unwrap();
        let mut fresh = agent(Player::O);
        assert_eq!(fresh.loss_value(), 0.0);

        fresh.load_table(trained.to_saved()).unwrap();

        assert_eq!(fresh.loss_value(), -1.0);
        assert_eq!(fresh.to_saved().loss_value, -1.0);
        assert_eq!(fresh.values(), trained.values());
    }

    #[test]
    fn test_partial_table_reseeds_defaults_with_saved_loss() {
        let reference =
            Agent::new(AgentConfig::new(Player::O).with_loss_value(-1.0).with_seed(1)).unwrap();
        let lost = reference
            .values()
            .iter()
            .find(|(_, value)| *value == -1.0)
            .map(|(key, _)| key.clone())
            .unwrap();

        let mut fresh = agent(Player::O);
        assert_eq!(fresh.values().get(&lost), Some(0.0));
        fresh
            .load_table(SavedValueTable::new(Player::O, -1.0, &ValueTable::new()))
            .unwrap();

        assert_eq!(fresh.values().get(&lost), Some(-1.0));
        assert_eq!(fresh.values(), reference.values());
        assert!(fresh.previous_state().is_none());
    }

    #[test]
    fn test_load_table_rejects_non_finite_loss() {
        let mut saved = agent(Player::O).to_saved();
        saved.loss_value = f64::NAN;
        let mut fresh = agent(Player::O);
        let before = fresh.values().clone();

        assert!(matches!(
            fresh.load_table(saved),
            Err(Error::InvalidConfiguration { .. })
        ));
        assert_eq!(fresh.values(), &before);
        assert_eq!(fresh.loss_value(), 0.0);
    }

    #[test]
    fn test_load_table_rejects_other_player() {
        let x_agent = agent(Player::X);
        let mut o_agent = agent(Player::O);
        let before = o_agent.values().clone();

        assert!(matches!(
            o_agent.load_table(x_agent.to_saved()),
            Err(Error::PlayerMismatch { .. })
        ));
        assert_eq!(o_agent.values(), &before);
    }
}
