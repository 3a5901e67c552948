//! Play command - interactive game against a trained O agent

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{Result, anyhow};
use clap::Parser;

use crate::{
    Error,
    cli::{
        default_table_path, load_inference_agent,
        output::{print_board, print_move_values, print_section, write_json},
    },
    session::{DEFAULT_TREE_DEPTH, GameStatus, SessionId, SessionStore, Winner},
    tictactoe::Player,
};

#[derive(Parser, Debug)]
#[command(about = "Play X against the trained agent")]
pub struct PlayArgs {
    /// Trained O table
    #[arg(long, short = 't', default_value_os_t = default_table_path())]
    pub table: PathBuf,

    /// Seed for the agent's tie-breaking
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the agent's move valuations after each reply
    #[arg(long)]
    pub show_values: bool,
}

enum Command {
    Move(usize, usize),
    Tree(usize),
    Quit,
}

fn parse_command(line: &str) -> Result<Command> {
    let mut parts = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty());

    match parts.next() {
        None => Err(anyhow!("Enter a move as 'row col'")),
        Some("q" | "quit" | "exit") => Ok(Command::Quit),
        Some("tree") => {
            let depth = parts
                .next()
                .map(str::parse::<usize>)
                .transpose()?
                .unwrap_or(DEFAULT_TREE_DEPTH);
            Ok(Command::Tree(depth))
        }
        Some(row) => {
            let col = parts
                .next()
                .ok_or_else(|| anyhow!("Enter a move as 'row col'"))?;
            Ok(Command::Move(row.parse()?, col.parse()?))
        }
    }
}

fn announce(winner: Winner) {
    match winner {
        Winner::Human => println!("\nYou win!"),
        Winner::Agent => println!("\nThe agent wins."),
        Winner::Draw => println!("\nDraw."),
    }
}

/// Drive one game from `input` until it finishes, the user quits or input ends.
pub(crate) fn run_game<R: BufRead>(
    store: &mut SessionStore,
    id: SessionId,
    input: R,
    show_values: bool,
) -> Result<Option<Winner>> {
    print_board(&store.board(id)?);
    print!("\nYour move (row col, 'tree [depth]', 'q'): ");
    io::stdout().flush()?;

    for line in input.lines() {
        let line = line?;
        match parse_command(line.trim()) {
            Ok(Command::Quit) => return Ok(None),
            Ok(Command::Tree(depth)) => {
                let tree = store.game_tree(id, Some(depth))?;
                write_json(&tree, None)?;
            }
            Ok(Command::Move(row, col)) => match store.make_move(id, row, col) {
                Ok(reply) => {
                    if let Some(position) = reply.agent_move {
                        println!("\nAgent plays {position}");
                    }
                    if let Some(values) = reply.move_values.as_ref().filter(|_| show_values) {
                        print_move_values(values);
                    }
                    print_board(&reply.board);

                    if reply.status == GameStatus::Finished {
                        if let Some(winner) = reply.winner {
                            announce(winner);
                        }
                        return Ok(reply.winner);
                    }
                }
                Err(e @ Error::InvalidMove { .. }) => println!("{e}"),
                Err(e) => return Err(e.into()),
            },
            Err(e) => println!("{e}"),
        }

        print!("\nYour move (row col, 'tree [depth]', 'q'): ");
        io::stdout().flush()?;
    }

    Ok(None)
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let (agent, outcome) = load_inference_agent(Player::O, &args.table, args.seed)?;
    if outcome.is_loaded() {
        println!("Loaded trained table from {}", args.table.display());
    }

    let mut store = SessionStore::new(agent)?;
    let game = store.new_game();

    print_section("You are X; the agent is O");
    let stdin = io::stdin();
    run_game(&mut store, game.id, stdin.lock(), args.show_values)?;
    store.end_game(game.id)?;

    Ok(())
}
