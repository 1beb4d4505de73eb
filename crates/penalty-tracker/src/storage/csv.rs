//! Flat-file table store: one `<name>.csv` per table.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{Backend, TableStore};
use crate::error::{Error, Result};
use crate::table::Table;

/// Stores each named table as a CSV file inside a directory.
#[derive(Debug, Clone)]
pub struct CsvStore {
    dir: PathBuf,
}

impl CsvStore {
    /// Create a store rooted at `dir`. The directory is created on first save.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The data directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing the named table.
    #[must_use]
    pub fn table_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.csv"))
    }
}

impl TableStore for CsvStore {
    fn backend(&self) -> Backend {
        Backend::Csv
    }

    fn read(&self, name: &str) -> Result<Table> {
        let path = self.table_path(name);
        debug!("Reading {}", path.display());
        let text = fs::read_to_string(&path)?;
        Table::from_csv(&text)
    }

    fn write(&self, name: &str, data: &Table) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(|source| Error::DirectoryCreate {
                path: self.dir.clone(),
                source,
            })?;
        }

        // Write beside the target and rename, so a failed write leaves the
        // previous file in place.
        let path = self.table_path(name);
        let tmp = self.dir.join(format!(".{name}.csv.tmp"));
        fs::write(&tmp, data.to_csv())?;
        fs::rename(&tmp, &path)?;

        debug!("Wrote {} rows to {}", data.len(), path.display());
        Ok(())
    }
}
