//! Configuration types for agent creation.

use serde::{Deserialize, Serialize};

use crate::{Error, Result, tictactoe::Player};

/// Configuration for creating a TD agent.
///
/// # Examples
///
/// ```
/// use tdtoe::app::AgentConfig;
/// use tdtoe::tictactoe::Player;
///
/// let config = AgentConfig::new(Player::O)
///     .with_alpha(0.5)
///     .with_epsilon(0.2)
///     .with_loss_value(-1.0)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Marker the agent plays
    pub player: Player,
    /// Learning rate α
    pub alpha: f64,
    /// Exploration rate ε
    pub epsilon: f64,
    /// Value of a position the agent has lost
    pub loss_value: f64,
    /// Whether backups modify the value table
    pub learning: bool,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl AgentConfig {
    pub const DEFAULT_ALPHA: f64 = 0.99;
    pub const DEFAULT_EPSILON: f64 = 0.1;

    /// Create a configuration for `player` with default parameters:
    /// α = 0.99, ε = 0.1, loss value 0, learning enabled, no seed.
    pub fn new(player: Player) -> Self {
        Self {
            player,
            alpha: Self::DEFAULT_ALPHA,
            epsilon: Self::DEFAULT_EPSILON,
            loss_value: 0.0,
            learning: true,
            seed: None,
        }
    }

    /// Configuration for a deployed agent: greedy (ε = 0) and never learning.
    pub fn inference(player: Player) -> Self {
        Self::new(player).with_epsilon(0.0).with_learning(false)
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_loss_value(mut self, loss_value: f64) -> Self {
        self.loss_value = loss_value;
        self
    }

    pub fn with_learning(mut self, learning: bool) -> Self {
        self.learning = learning;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check that rates lie in `[0, 1]` and the loss value is finite.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        let check_rate = |name: &str, value: f64| {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(Error::InvalidConfiguration {
                    message: format!("{name} must be within [0, 1], got {value}"),
                })
            }
        };

        check_rate("alpha", self.alpha)?;
        check_rate("epsilon", self.epsilon)?;

        if !self.loss_value.is_finite() {
            return Err(Error::InvalidConfiguration {
                message: format!("loss value must be finite, got {}", self.loss_value),
            });
        }

        Ok(())
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new(Player::O)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AgentConfig::new(Player::X);
        assert_eq!(config.alpha, 0.99);
        assert_eq!(config.epsilon, 0.1);
        assert_eq!(config.loss_value, 0.0);
        assert!(config.learning);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_inference_preset() {
        let config = AgentConfig::inference(Player::O);
        assert_eq!(config.epsilon, 0.0);
        assert!(!config.learning);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        assert!(AgentConfig::new(Player::X).with_alpha(1.5).validate().is_err());
        assert!(
            AgentConfig::new(Player::X)
                .with_epsilon(-0.1)
                .validate()
                .is_err()
        );
        assert!(
            AgentConfig::new(Player::X)
                .with_epsilon(f64::NAN)
                .validate()
                .is_err()
        );
        assert!(
            AgentConfig::new(Player::X)
                .with_loss_value(f64::INFINITY)
                .validate()
                .is_err()
        );
        assert!(
            AgentConfig::new(Player::X)
                .with_loss_value(-1.0)
                .validate()
                .is_ok()
        );
    }
}
