//! Command-line interface for penalty-tracker.
//!
//! This module provides the CLI structure for the `penalty` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AthleteCommand, ConfigCommand, ExportCommand, FootArg, HistoryCommand, KickCommand,
    OutputFormat, SortArg, StatsCommand, ZoneArg,
};

/// penalty - Penalty-kick training log
///
/// Register each kick's zone and outcome during practice and review
/// per-athlete conversion rates and preferred zones.
#[derive(Debug, Parser)]
#[command(name = "penalty")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage the athlete roster
    #[command(subcommand)]
    Athlete(AthleteCommand),

    /// Register a scored kick
    Goal(KickCommand),

    /// Register a missed kick
    Miss(KickCommand),

    /// Show per-athlete statistics
    Stats(StatsCommand),

    /// Export the statistics report as CSV
    Export(ExportCommand),

    /// List registered kicks
    History(HistoryCommand),

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        crate::logging::Verbosity::from_flags(self.verbose, self.quiet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::Verbosity;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "penalty");
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(parse(&["penalty", "stats"]).verbosity(), Verbosity::Normal);
        assert_eq!(parse(&["penalty", "-v", "stats"]).verbosity(), Verbosity::Verbose);
        assert_eq!(parse(&["penalty", "-vv", "stats"]).verbosity(), Verbosity::Trace);
        assert_eq!(parse(&["penalty", "-q", "-v", "stats"]).verbosity(), Verbosity::Quiet);
    }

    #[test]
    fn test_quiet_only_affects_logging() {
        let cmd = Cli::command();
        let quiet = cmd.get_arguments().find(|a| a.get_id() == "quiet").unwrap();
        assert_eq!(quiet.get_help().unwrap().to_string(), "Only log errors");
    }

    #[test]
    fn test_parse_athlete_add() {
        let cli = parse(&["penalty", "athlete", "add", "Ana", "--foot", "left"]);
        match cli.command {
            Command::Athlete(AthleteCommand::Add { name, foot }) => {
                assert_eq!(name, "Ana");
                assert_eq!(foot, FootArg::Left);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_athlete_add_default_foot() {
        let cli = parse(&["penalty", "athlete", "add", "Ana"]);
        assert!(matches!(
            cli.command,
            Command::Athlete(AthleteCommand::Add {
                foot: FootArg::Right,
                ..
            })
        ));
    }

    #[test]
    fn test_parse_goal_and_miss() {
        let cli = parse(&["penalty", "goal", "-a", "Bia", "-z", "bottom-left"]);
        match cli.command {
            Command::Goal(kick) => {
                assert_eq!(kick.athlete, "Bia");
                assert_eq!(kick.zone, ZoneArg::BottomLeft);
                assert!(kick.date.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }

        let cli = parse(&[
            "penalty", "miss", "--athlete", "Bia", "--zone", "center", "--date", "2024-01-02",
        ]);
        assert!(matches!(cli.command, Command::Miss(ref k) if k.date.as_deref() == Some("2024-01-02")));
    }

    #[test]
    fn test_kick_requires_zone() {
        assert!(Cli::try_parse_from(["penalty", "goal", "--athlete", "Bia"]).is_err());
        assert!(Cli::try_parse_from(["penalty", "goal", "-a", "Bia", "-z", "crossbar"]).is_err());
    }

    #[test]
    fn test_parse_stats() {
        let cli = parse(&["penalty", "stats", "--sort", "misses", "--format", "json"]);
        match cli.command {
            Command::Stats(stats) => {
                assert_eq!(stats.sort, Some(SortArg::Misses));
                assert_eq!(stats.format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_format_defaults_to_table() {
        match parse(&["penalty", "stats"]).command {
            Command::Stats(stats) => assert_eq!(stats.format, OutputFormat::default()),
            other => panic!("unexpected command: {other:?}"),
        }
        match parse(&["penalty", "history"]).command {
            Command::History(history) => assert_eq!(history.format, OutputFormat::Table),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_export_to_stdout() {
        let cli = parse(&["penalty", "export", "-o", "-"]);
        assert!(matches!(
            cli.command,
            Command::Export(ExportCommand { output: Some(ref p) }) if p == &PathBuf::from("-")
        ));
    }

    #[test]
    fn test_parse_with_config() {
        let cli = parse(&["penalty", "-c", "/custom/config.toml", "stats"]);
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_list_names_conflicts_with_json() {
        assert!(Cli::try_parse_from(["penalty", "athlete", "list", "--names", "--json"]).is_err());
    }
}
