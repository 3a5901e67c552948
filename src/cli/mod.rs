//! Command-line interface for training, playing and inspecting TD agents

pub mod commands;
pub mod output;

use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};

use crate::{
    app::{AgentConfig, App, LoadOutcome},
    td::Agent,
    tictactoe::{Board, Player},
};

/// Default location of the trained O table
pub const DEFAULT_TABLE_PATH: &str = "trained_agent_values.msgpack";

pub fn default_table_path() -> PathBuf {
    PathBuf::from(DEFAULT_TABLE_PATH)
}

pub(crate) fn parse_player_token(value: &str, flag: &str) -> Result<Player> {
    match value.trim().to_ascii_lowercase().as_str() {
        "x" | "first" | "p1" => Ok(Player::X),
        "o" | "second" | "p2" => Ok(Player::O),
        other => Err(anyhow!(
            "Invalid value '{other}' for {flag} (expected 'x' or 'o')"
        )),
    }
}

pub(crate) fn parse_board(value: &str) -> Result<Board> {
    Board::from_string(value).map_err(|e| anyhow!("Invalid board '{value}': {e}"))
}

/// Inference agent for `player` with the table at `path` laid over the defaults.
pub(crate) fn load_inference_agent(
    player: Player,
    path: &Path,
    seed: Option<u64>,
) -> Result<(Agent, LoadOutcome)> {
    let mut config = AgentConfig::inference(player);
    config.seed = seed;
    Ok(App::new().load_agent(config, path)?)
}
