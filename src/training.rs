//! Self-play training
//!
//! Two agents, X and O, play each other for a fixed number of episodes. Both
//! learn from every game; the O table is the one the play service deploys.

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    app::AgentConfig,
    td::Agent,
    tictactoe::{Game, GameOutcome, Player},
};

/// Self-play configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    pub episodes: usize,
    pub alpha: f64,
    /// Exploration rate both agents start with
    pub initial_epsilon: f64,
    /// Decay applies to episodes after this index
    pub decay_start: usize,
    pub decay_factor: f64,
    pub min_epsilon: f64,
    pub loss_value: f64,
    pub seed: Option<u64>,
    pub progress: bool,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: 100_000,
            alpha: AgentConfig::DEFAULT_ALPHA,
            initial_epsilon: 0.3,
            decay_start: 50_000,
            decay_factor: 0.99,
            min_epsilon: 0.1,
            loss_value: -1.0,
            seed: None,
            progress: false,
        }
    }
}

impl TrainingConfig {
    /// Exploration rate for `episode` given the rate used before it.
    pub fn next_epsilon(&self, episode: usize, current: f64) -> f64 {
        if episode > self.decay_start {
            (current * self.decay_factor).max(self.min_epsilon)
        } else {
            current
        }
    }

    fn agent_config(&self, player: Player, seed_offset: u64) -> AgentConfig {
        let config = AgentConfig::new(player)
            .with_alpha(self.alpha)
            .with_epsilon(self.initial_epsilon)
            .with_loss_value(self.loss_value);
        match self.seed {
            Some(seed) => config.with_seed(seed.wrapping_add(seed_offset)),
            None => config,
        }
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for out-of-range parameters.
    pub fn validate(&self) -> Result<()> {
        self.agent_config(Player::X, 0).validate()?;
        if !(0.0..=1.0).contains(&self.decay_factor) {
            return Err(Error::InvalidConfiguration {
                message: format!("decay factor must be within [0, 1], got {}", self.decay_factor),
            });
        }
        if !(0.0..=1.0).contains(&self.min_epsilon) {
            return Err(Error::InvalidConfiguration {
                message: format!("minimum epsilon must be within [0, 1], got {}", self.min_epsilon),
            });
        }
        Ok(())
    }
}

/// Tally of a training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSummary {
    pub episodes: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
    pub final_epsilon: f64,
    /// Entries in the O agent's table after training
    pub table_size: usize,
}

impl TrainingSummary {
    fn record(&mut self, outcome: GameOutcome) {
        self.episodes += 1;
        match outcome {
            GameOutcome::Win(Player::X) => self.x_wins += 1,
            GameOutcome::Win(Player::O) => self.o_wins += 1,
            GameOutcome::Draw => self.draws += 1,
        }
    }
}

/// Both agents after training, and the tally
#[derive(Debug, Clone)]
pub struct TrainingRun {
    pub x_agent: Agent,
    pub o_agent: Agent,
    pub summary: TrainingSummary,
}

/// Play one game, X first, then let both agents learn from the result.
///
/// # Errors
///
/// Returns an error if either agent produces an illegal move, which a
/// correctly constructed agent never does.
pub fn play_episode(x_agent: &mut Agent, o_agent: &mut Agent) -> Result<Game> {
    let mut game = Game::new();

    let outcome = loop {
        let agent = match game.to_move() {
            Player::X => &mut *x_agent,
            Player::O => &mut *o_agent,
        };
        let position = agent.action(&game.board)?;
        if let Some(outcome) = game.play(position)? {
            break outcome;
        }
    };

    x_agent.episode_over(outcome);
    o_agent.episode_over(outcome);
    Ok(game)
}

fn progress_bar(episodes: usize) -> Result<ProgressBar> {
    let pb = ProgressBar::new(episodes as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
            .map_err(|e| Error::ProgressBarTemplate {
                message: e.to_string(),
            })?
            .progress_chars("=>-"),
    );
    Ok(pb)
}

/// Train a fresh X/O pair by self-play.
///
/// # Errors
///
/// Returns [`Error::InvalidConfiguration`] for an invalid configuration.
///
/// # Examples
///
/// ```no_run
/// use tdtoe::training::{TrainingConfig, train};
///
/// let config = TrainingConfig {
///     episodes: 1_000,
///     seed: Some(7),
///     ..TrainingConfig::default()
/// };
/// let run = train(&config)?;
/// println!("{} draws", run.summary.draws);
/// # Ok::<(), tdtoe::Error>(())
/// ```
pub fn train(config: &TrainingConfig) -> Result<TrainingRun> {
    config.validate()?;

    let mut x_agent = Agent::new(config.agent_config(Player::X, 0))?;
    let mut o_agent = Agent::new(config.agent_config(Player::O, 1))?;
    let mut summary = TrainingSummary {
        episodes: 0,
        x_wins: 0,
        o_wins: 0,
        draws: 0,
        final_epsilon: config.initial_epsilon,
        table_size: 0,
    };

    let pb = if config.progress {
        Some(progress_bar(config.episodes)?)
    } else {
        None
    };

    let mut epsilon = config.initial_epsilon;
    for episode in 0..config.episodes {
        epsilon = config.next_epsilon(episode, epsilon);
        x_agent.set_epsilon(epsilon);
        o_agent.set_epsilon(epsilon);

        let game = play_episode(&mut x_agent, &mut o_agent)?;
        if let Some(outcome) = game.outcome {
            summary.record(outcome);
        }

        if let Some(pb) = &pb {
            pb.inc(1);
            if episode % 1_000 == 0 {
                pb.set_message(format!("ε {epsilon:.3}"));
            }
        }
    }

    summary.final_epsilon = epsilon;
    summary.table_size = o_agent.values().len();

    if let Some(pb) = &pb {
        pb.finish_with_message(format!(
            "X {} / O {} / draw {}",
            summary.x_wins, summary.o_wins, summary.draws
        ));
    }

    Ok(TrainingRun {
        x_agent,
        o_agent,
        summary,
    })
}
