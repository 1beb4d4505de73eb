//! `SQLite`-backed table store.

use std::path::{Path, PathBuf};

use rusqlite::types::ValueRef;
use rusqlite::{params_from_iter, Connection};
use tracing::{debug, info};

use super::{schema, Backend, TableStore};
use crate::error::{Error, Result};
use crate::table::Table;

/// Stores each named table as a SQL table in one database file.
#[derive(Debug)]
pub struct SqliteStore {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl SqliteStore {
    /// Open or create a database at the given path.
    ///
    /// Creates the parent directories if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or database cannot be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        info!("Database opened at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory store for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TableStore for SqliteStore {
    fn backend(&self) -> Backend {
        Backend::Sqlite
    }

    fn read(&self, name: &str) -> Result<Table> {
        let mut stmt = self.conn.prepare(&schema::select_all(name))?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let width = columns.len();

        let rows = stmt
            .query_map([], |row| {
                (0..width)
                    .map(|i| row.get_ref(i).map(cell_to_string))
                    .collect::<rusqlite::Result<Vec<_>>>()
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Table::from_parts(columns, rows)
    }

    fn write(&self, name: &str, data: &Table) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(&schema::drop_table(name), [])?;

        if !data.columns().is_empty() {
            tx.execute(&schema::create_table(name, data.columns()), [])?;
            let mut insert = tx.prepare(&schema::insert_row(name, data.columns()))?;
            for row in data.rows() {
                insert.execute(params_from_iter(row.values()))?;
            }
        }

        tx.commit()?;
        debug!("Wrote {} rows to {}", data.len(), name);
        Ok(())
    }
}

/// Render any stored cell as text; `NULL` becomes blank.
fn cell_to_string(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(t) | ValueRef::Blob(t) => String::from_utf8_lossy(t).into_owned(),
    }
}
