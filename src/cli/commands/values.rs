//! Values command - how the agent rates each empty cell

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;

use crate::{
    analysis::move_values,
    cli::{
        default_table_path, load_inference_agent,
        output::{print_board, print_move_values, write_json},
        parse_board,
    },
    tictactoe::Player,
};

#[derive(Parser, Debug)]
#[command(about = "Show the agent's value for each empty cell")]
pub struct ValuesArgs {
    /// Board with O to move, as nine cells of '.', 'X', 'O'
    pub board: String,

    /// Trained O table
    #[arg(long, short = 't', default_value_os_t = default_table_path())]
    pub table: PathBuf,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: ValuesArgs) -> Result<()> {
    let board = parse_board(&args.board)?;
    if board.is_terminal() {
        bail!("Board '{}' is already decided", args.board);
    }

    let (mut agent, _) = load_inference_agent(Player::O, &args.table, None)?;
    let valuation = move_values(&mut agent, &board);

    if args.json {
        write_json(&valuation, None)?;
    } else {
        print_board(&board);
        println!();
        print_move_values(&valuation);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decided_board_rejected() {
        let args = ValuesArgs::parse_from(["values", "XXXOO...."]);
        assert!(execute(args).is_err());
    }

    #[test]
    fn test_invalid_board_rejected() {
        let args = ValuesArgs::parse_from(["values", "XX?......"]);
        assert!(execute(args).is_err());
    }
}
