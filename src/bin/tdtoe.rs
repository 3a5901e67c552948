//! tdtoe CLI - train, play against and explain a TD-learning tic-tac-toe agent

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tdtoe")]
#[command(version, about = "Temporal-difference tic-tac-toe agent", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train X and O agents by self-play and save the O table
    Train(tdtoe::cli::commands::train::TrainArgs),

    /// Play X against the trained O agent
    Play(tdtoe::cli::commands::play::PlayArgs),

    /// Build the valued decision tree below a board
    Tree(tdtoe::cli::commands::tree::TreeArgs),

    /// Show the agent's value for each empty cell
    Values(tdtoe::cli::commands::values::ValuesArgs),

    /// Summarize a saved value table
    Inspect(tdtoe::cli::commands::inspect::InspectArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => tdtoe::cli::commands::train::execute(args),
        Commands::Play(args) => tdtoe::cli::commands::play::execute(args),
        Commands::Tree(args) => tdtoe::cli::commands::tree::execute(args),
        Commands::Values(args) => tdtoe::cli::commands::values::execute(args),
        Commands::Inspect(args) => tdtoe::cli::commands::inspect::execute(args),
    }
}
