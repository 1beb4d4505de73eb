//! Table storage for penalty-tracker.
//!
//! A [`TableStore`] persists named [`Table`]s. Two backends exist:
//!
//! - [`CsvStore`]: one comma-separated file per table in a data directory
//! - [`SqliteStore`]: one SQL table per named table in a single database file
//!
//! Loading never fails: anything that goes wrong while reading gives back an
//! empty table with the caller's default columns. Saving replaces the whole
//! stored table and reports failures.

mod csv;
pub mod schema;
mod sqlite;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::Result;
use crate::table::Table;

pub use self::csv::CsvStore;
pub use self::sqlite::SqliteStore;

/// Which storage backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// One CSV file per table.
    #[default]
    Csv,
    /// A single `SQLite` database.
    Sqlite,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Sqlite => write!(f, "sqlite"),
        }
    }
}

/// A backend that can read and write whole named tables.
pub trait TableStore: fmt::Debug {
    /// The backend kind (for logging and status output).
    fn backend(&self) -> Backend;

    /// Read a table exactly as stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is missing or can't be parsed.
    fn read(&self, name: &str) -> Result<Table>;

    /// Replace the stored table with `data`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails.
    fn write(&self, name: &str, data: &Table) -> Result<()>;

    /// Load a table, falling back to an empty one shaped by `default_columns`.
    ///
    /// Blank rows are dropped and missing default columns are appended.
    fn load(&self, name: &str, default_columns: &[&str]) -> Table {
        match self.read(name) {
            Ok(mut data) if !data.columns().is_empty() => {
                let dropped = data.drop_blank_rows();
                if dropped > 0 {
                    debug!("Dropped {} blank rows from {}", dropped, name);
                }
                if data.is_empty() {
                    return Table::new(default_columns.iter().copied());
                }
                data.ensure_columns(default_columns);
                debug!("Loaded {} rows from {} table {}", data.len(), self.backend(), name);
                data
            }
            Ok(_) => {
                debug!("Table {} is empty, using default columns", name);
                Table::new(default_columns.iter().copied())
            }
            Err(e) if e.is_not_found() => {
                debug!("Table {} not found, starting empty", name);
                Table::new(default_columns.iter().copied())
            }
            Err(e) => {
                warn!("Could not read table {}: {}; starting empty", name, e);
                Table::new(default_columns.iter().copied())
            }
        }
    }

    /// Save a table, overwriting whatever was stored under `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails.
    fn save(&self, data: &Table, name: &str) -> Result<()> {
        debug!("Saving {} rows to {} table {}", data.len(), self.backend(), name);
        self.write(name, data)
    }
}

/// Open the store selected by the configuration.
///
/// # Errors
///
/// Returns an error if the `SQLite` database can't be opened.
pub fn open_store(config: &Config) -> Result<Box<dyn TableStore>> {
    match config.storage.backend {
        Backend::Csv => Ok(Box::new(CsvStore::new(config.data_dir()))),
        Backend::Sqlite => Ok(Box::new(SqliteStore::open(config.database_path())?)),
    }
}
