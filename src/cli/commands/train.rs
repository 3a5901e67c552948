//! Train command - self-play training of an X/O agent pair

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    app::App,
    cli::{
        default_table_path,
        output::{format_number, print_kv, print_section, write_json},
    },
    training::{TrainingConfig, train},
};

#[derive(Parser, Debug)]
#[command(about = "Train X and O agents by self-play", allow_negative_numbers = true)]
pub struct TrainArgs {
    /// Number of self-play episodes
    #[arg(long, short = 'e', default_value_t = 100_000)]
    pub episodes: usize,

    /// Output file for the trained O table
    #[arg(long, short = 'O', default_value_os_t = default_table_path())]
    pub output: PathBuf,

    /// Also save the X table here
    #[arg(long)]
    pub x_output: Option<PathBuf>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Learning rate
    #[arg(long, default_value_t = 0.99)]
    pub alpha: f64,

    /// Exploration rate at the start of training
    #[arg(long, default_value_t = 0.3)]
    pub epsilon: f64,

    /// Episode index after which epsilon decays
    #[arg(long, default_value_t = 50_000)]
    pub decay_start: usize,

    /// Value both agents give a lost position
    #[arg(long, default_value_t = -1.0)]
    pub loss_value: f64,

    /// Hide the progress bar
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

impl TrainArgs {
    fn training_config(&self) -> TrainingConfig {
        TrainingConfig {
            episodes: self.episodes,
            alpha: self.alpha,
            initial_epsilon: self.epsilon,
            decay_start: self.decay_start,
            loss_value: self.loss_value,
            seed: self.seed,
            progress: !self.quiet,
            ..TrainingConfig::default()
        }
    }
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let config = args.training_config();
    let run = train(&config).context("Training failed")?;
    let summary = &run.summary;

    let app = App::new();
    app.save_agent(&run.o_agent, &args.output)
        .with_context(|| format!("Failed to save O table to {}", args.output.display()))?;
    if let Some(path) = &args.x_output {
        app.save_agent(&run.x_agent, path)
            .with_context(|| format!("Failed to save X table to {}", path.display()))?;
    }

    print_section("Training complete");
    print_kv("Episodes", &format_number(summary.episodes));
    print_kv("X wins", &format_number(summary.x_wins));
    print_kv("O wins", &format_number(summary.o_wins));
    print_kv("Draws", &format_number(summary.draws));
    print_kv("Final epsilon", &format!("{:.3}", summary.final_epsilon));
    print_kv("Learned states", &format_number(summary.table_size));
    print_kv("Saved to", &args.output.display().to_string());

    if let Some(path) = &args.summary {
        write_json(summary, Some(path))?;
        println!("\nSummary written to {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_map_to_config() {
        let args = TrainArgs::parse_from(["train", "--episodes", "10", "--loss-value", "-0.5", "-q"]);
        let config = args.training_config();

        assert_eq!(config.episodes, 10);
        assert_eq!(config.loss_value, -0.5);
        assert!(!config.progress);
        assert_eq!(config.min_epsilon, 0.1);
        assert_eq!(args.output, default_table_path());
    }

    #[test]
    fn test_execute_writes_tables() {
        let dir = tempfile::TempDir::new().unwrap();
        let output = dir.path().join("o.msgpack");
        let x_output = dir.path().join("x.msgpack");
        let summary = dir.path().join("summary.json");

        let args = TrainArgs {
            episodes: 20,
            output: output.clone(),
            x_output: Some(x_output.clone()),
            summary: Some(summary.clone()),
            seed: Some(3),
            alpha: 0.99,
            epsilon: 0.3,
            decay_start: 50_000,
            loss_value: -1.0,
            quiet: true,
        };
        execute(args).unwrap();

        assert!(output.exists());
        assert!(x_output.exists());
        let text = std::fs::read_to_string(summary).unwrap();
        assert!(text.contains("\"episodes\": 20"));
    }
}
