//! `penalty-tracker` - Penalty-kick training log
//!
//! This library keeps a roster of athletes and a history of penalty kicks in
//! a pluggable table store (CSV files or `SQLite`), and computes per-athlete
//! conversion statistics from them.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod stats;
pub mod storage;
pub mod table;
pub mod tracker;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use model::{Athlete, Foot, Outcome, SessionRecord, Zone};
pub use stats::{compute_stats, AthleteStats, SortKey};
pub use storage::{Backend, CsvStore, SqliteStore, TableStore};
pub use table::Table;
pub use tracker::{AddOutcome, AppState, TableNames, Tracker};
