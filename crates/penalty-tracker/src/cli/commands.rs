//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::model::{Foot, Zone};
use crate::stats::SortKey;

/// Roster management commands.
#[derive(Debug, Subcommand)]
pub enum AthleteCommand {
    /// Register a new athlete
    Add {
        /// Athlete name (must be unique)
        name: String,

        /// Dominant foot
        #[arg(short, long, value_enum, default_value = "right")]
        foot: FootArg,
    },

    /// Remove an athlete from the roster (kick history is kept)
    Remove {
        /// Exact athlete name
        name: String,
    },

    /// List registered athletes
    List {
        /// Only print the sorted list of names
        #[arg(short, long)]
        names: bool,

        /// Output as JSON
        #[arg(short, long, conflicts_with = "names")]
        json: bool,
    },
}

/// Arguments shared by the `goal` and `miss` commands.
#[derive(Debug, Args)]
pub struct KickCommand {
    /// Athlete who took the kick
    #[arg(short, long)]
    pub athlete: String,

    /// Zone the kick was aimed at
    #[arg(short, long, value_enum)]
    pub zone: ZoneArg,

    /// Training date as YYYY-MM-DD (defaults to today)
    #[arg(short, long)]
    pub date: Option<String>,
}

/// Stats command arguments.
#[derive(Debug, Args)]
pub struct StatsCommand {
    /// Order of the listing (defaults to the configured order)
    #[arg(short, long, value_enum)]
    pub sort: Option<SortArg>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Export command arguments.
#[derive(Debug, Args)]
pub struct ExportCommand {
    /// Output file, or `-` for stdout (defaults to the configured file name)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// History command arguments.
#[derive(Debug, Args)]
pub struct HistoryCommand {
    /// Only show kicks by this athlete
    #[arg(short, long)]
    pub athlete: Option<String>,

    /// Only show the last N kicks
    #[arg(short, long)]
    pub last: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Dominant foot argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FootArg {
    /// Right-footed
    Right,
    /// Left-footed
    Left,
    /// Two-footed
    Both,
}

impl From<FootArg> for Foot {
    fn from(arg: FootArg) -> Self {
        match arg {
            FootArg::Right => Self::Right,
            FootArg::Left => Self::Left,
            FootArg::Both => Self::Both,
        }
    }
}

/// Goal zone argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ZoneArg {
    /// Alto Esquerdo
    TopLeft,
    /// Alto Direito
    TopRight,
    /// MA Esquerdo
    MidLeft,
    /// MA Direito
    MidRight,
    /// Canto Esquerdo
    BottomLeft,
    /// Canto Direito
    BottomRight,
    /// Centro
    Center,
}

impl From<ZoneArg> for Zone {
    fn from(arg: ZoneArg) -> Self {
        match arg {
            ZoneArg::TopLeft => Self::TopLeft,
            ZoneArg::TopRight => Self::TopRight,
            ZoneArg::MidLeft => Self::MidLeft,
            ZoneArg::MidRight => Self::MidRight,
            ZoneArg::BottomLeft => Self::BottomLeft,
            ZoneArg::BottomRight => Self::BottomRight,
            ZoneArg::Center => Self::Center,
        }
    }
}

/// Sort key argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    /// Highest conversion rate first
    ConversionRate,
    /// Alphabetical by name
    Name,
    /// Fewest misses first
    Misses,
    /// Most goals first
    Goals,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::ConversionRate => Self::ConversionRate,
            SortArg::Name => Self::Name,
            SortArg::Misses => Self::Misses,
            SortArg::Goals => Self::Goals,
        }
    }
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    Plain,
    /// Formatted table
    #[default]
    Table,
    /// JSON output
    Json,
}
