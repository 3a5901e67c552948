//! Tree command - export the decision tree below a position

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    analysis::TreeGenerator,
    cli::{
        default_table_path, load_inference_agent,
        output::{format_number, print_kv, print_section, write_json},
        parse_board, parse_player_token,
    },
};

#[derive(Parser, Debug)]
#[command(about = "Build the valued decision tree below a board")]
pub struct TreeArgs {
    /// Board as nine cells of '.', 'X', 'O' ('|' and spaces ignored)
    #[arg(default_value = ".........")]
    pub board: String,

    /// Trained table to read values from
    #[arg(long, short = 't', default_value_os_t = default_table_path())]
    pub table: PathBuf,

    /// Player to move at the root, which is also the table's player
    #[arg(long, short = 'p', default_value = "o")]
    pub player: String,

    /// Stop expanding below this depth (root is 0)
    #[arg(long, short = 'd')]
    pub depth: Option<usize>,

    /// Write JSON here instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Print node counts only
    #[arg(long)]
    pub stats: bool,
}

pub fn execute(args: TreeArgs) -> Result<()> {
    let board = parse_board(&args.board)?;
    let player = parse_player_token(&args.player, "--player")?;
    let (agent, _) = load_inference_agent(player, &args.table, None)?;

    let mut generator = TreeGenerator::for_agent(&agent);
    if let Some(depth) = args.depth {
        generator = generator.with_max_depth(depth);
    }

    let Some(tree) = generator.generate(&board, player) else {
        println!("Position is already decided; no tree to build.");
        return Ok(());
    };

    if args.stats {
        print_section("Decision tree");
        print_kv("Root moves", &tree.moves.len().to_string());
        print_kv("Nodes", &format_number(tree.node_count()));
        print_kv("Max depth", &tree.max_depth().to_string());
        if let Some(best) = tree.best_move() {
            print_kv("Best move", &format!("({}) {:.4}", best.position, best.value));
        }
        return Ok(());
    }

    write_json(&tree, args.output.as_deref())?;
    if let Some(path) = &args.output {
        eprintln!("Tree written to {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exports_json() {
        let dir = tempfile::TempDir::new().unwrap();
        let output = dir.path().join("tree.json");

        let args = TreeArgs::parse_from([
            "tree",
            "XX..O....",
            "--table",
            dir.path().join("missing.msgpack").to_str().unwrap(),
            "--depth",
            "1",
            "--output",
            output.to_str().unwrap(),
        ]);
        execute(args).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(output).unwrap()).unwrap();
        assert_eq!(json["moves"].as_array().unwrap().len(), 6);
        assert_eq!(json["expanded"], true);
    }

    #[test]
    fn test_decided_board_is_not_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let args = TreeArgs::parse_from([
            "tree",
            "XOXXOOOXX",
            "--table",
            dir.path().join("missing.msgpack").to_str().unwrap(),
        ]);
        assert!(execute(args).is_ok());
    }
}
