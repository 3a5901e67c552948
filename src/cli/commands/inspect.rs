//! Inspect command - summarize a saved value table

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    adapters::MsgPackRepository,
    cli::{
        default_table_path,
        output::{
            create_spinner, format_number, print_kv, print_section, print_stats_table,
            print_subsection,
        },
    },
    ports::ValueTableRepository,
    td::{StateEnumerator, ValueTable},
    tictactoe::Board,
};

#[derive(Parser, Debug)]
#[command(about = "Summarize a saved value table")]
pub struct InspectArgs {
    /// Table to inspect
    #[arg(default_value_os_t = default_table_path())]
    pub table: PathBuf,

    /// Number of highest and lowest entries to list
    #[arg(long, short = 'n', default_value_t = 10)]
    pub top: usize,
}

/// Summary counts of a table's values
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct TableStats {
    pub entries: usize,
    pub wins: usize,
    pub losses: usize,
    pub untouched: usize,
    pub mean: f64,
}

pub(crate) fn table_stats(table: &ValueTable, loss_value: f64) -> TableStats {
    let mut stats = TableStats {
        entries: table.len(),
        wins: 0,
        losses: 0,
        untouched: 0,
        mean: 0.0,
    };
    let mut sum = 0.0;
    for (_, value) in table.iter() {
        sum += value;
        if value == 1.0 {
            stats.wins += 1;
        } else if value == loss_value {
            stats.losses += 1;
        } else if value == 0.5 {
            stats.untouched += 1;
        }
    }
    if stats.entries > 0 {
        stats.mean = sum / stats.entries as f64;
    }
    stats
}

pub fn execute(args: InspectArgs) -> Result<()> {
    let spinner = create_spinner("Loading value table...")?;
    let saved = MsgPackRepository::new()
        .load(&args.table)
        .with_context(|| format!("Failed to load {}", args.table.display()))?;
    spinner.finish_and_clear();

    let player = saved.player;
    let loss_value = saved.loss_value;
    let version = saved.version;
    let table: ValueTable = saved.into_entries().into_iter().collect();
    let stats = table_stats(&table, loss_value);

    let mut defaults = ValueTable::new();
    let enumeration = StateEnumerator::new(player, loss_value).seed(&mut defaults);
    let beyond_defaults = table.iter().filter(|(key, _)| !defaults.contains(key)).count();

    let version = version.to_string();
    let player_name = player.to_string();
    let loss = loss_value.to_string();
    let entries = format_number(stats.entries);
    let mean = format!("{:.4}", stats.mean);

    print_section(&format!("Value table {}", args.table.display()));
    print_stats_table(&[
        ("Format version", version.as_str()),
        ("Player", player_name.as_str()),
        ("Loss value", loss.as_str()),
        ("Entries", entries.as_str()),
        ("Mean value", mean.as_str()),
    ]);

    print_subsection("Value distribution");
    print_kv("Wins (1.0)", &format_number(stats.wins));
    print_kv("Losses", &format_number(stats.losses));
    print_kv("Untouched (0.5)", &format_number(stats.untouched));

    print_subsection("Against enumerated defaults");
    print_kv("Default entries", &format_number(enumeration.registered));
    print_kv("Undecided defaults", &format_number(enumeration.undecided));
    print_kv("Entries beyond", &format_number(beyond_defaults));

    let sorted = table.sorted_entries();
    let mut ranked: Vec<_> = sorted.iter().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    print_subsection(&format!("Top {} entries", args.top));
    for (key, value) in ranked.iter().take(args.top) {
        println!("  {key}  {value:>8.4}");
    }
    print_subsection(&format!("Bottom {} entries", args.top));
    for (key, value) in ranked.iter().rev().take(args.top) {
        println!("  {key}  {value:>8.4}");
    }

    if let Some((key, _)) = ranked.first() {
        print_subsection("Best entry");
        println!("{}", Board::from_cells(key.to_cells()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        app::{AgentConfig, App},
        tictactoe::Player,
        types::StateKey,
    };

    #[test]
    fn test_table_stats() {
        let table: ValueTable = [
            (StateKey::parse("XXXOO....").unwrap(), -1.0),
            (StateKey::parse("OOOXX.X..").unwrap(), 1.0),
            (StateKey::parse("X...O....").unwrap(), 0.5),
            (StateKey::parse("X..XO....").unwrap(), 0.2),
        ]
        .into_iter()
        .collect();

        let stats = table_stats(&table, -1.0);
        assert_eq!(stats.entries, 4);
        assert_eq!(stats.wins, 1);
        assert_eq!(stats.losses, 1);
        assert_eq!(stats.untouched, 1);
        assert!((stats.mean - 0.175).abs() < 1e-12);
    }

    #[test]
    fn test_inspect_saved_table() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("o.msgpack");
        let app = App::new();
        let agent = app.create_agent(AgentConfig::new(Player::O)).unwrap();
        app.save_agent(&agent, &path).unwrap();

        let args = InspectArgs { table: path, top: 3 };
        assert!(execute(args).is_ok());
    }

    #[test]
    fn test_inspect_missing_table_fails() {
        let args = InspectArgs {
            table: PathBuf::from("/nonexistent_tdtoe/table.msgpack"),
            top: 3,
        };
        assert!(execute(args).is_err());
    }
}
