//! Error types for penalty-tracker.
//!
//! Read failures in the table stores never reach the caller (they degrade to
//! an empty table), so most variants here describe write, configuration or
//! input problems that the CLI reports to the user.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for penalty-tracker operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Stored comma-separated text could not be parsed.
    #[error("malformed table at line {line}: {message}")]
    MalformedTable {
        /// 1-based line number where parsing failed.
        line: usize,
        /// Description of what went wrong.
        message: String,
    },

    // === Domain Errors ===
    /// A cell or argument held a value that doesn't parse.
    #[error("invalid {field}: '{value}'")]
    InvalidValue {
        /// Name of the field being parsed.
        field: &'static str,
        /// The offending value.
        value: String,
    },

    /// A kick was registered before any athlete exists.
    #[error("no athletes registered; add one with `penalty athlete add`")]
    EmptyRoster,

    /// A kick was registered for a name that isn't in the roster.
    #[error("unknown athlete: {name}")]
    UnknownAthlete {
        /// The name that was not found.
        name: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// A specialized Result type for penalty-tracker operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an invalid value error.
    #[must_use]
    pub fn invalid_value(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            value: value.into(),
        }
    }

    /// Create a malformed table error.
    #[must_use]
    pub fn malformed_table(line: usize, message: impl Into<String>) -> Self {
        Self::MalformedTable {
            line,
            message: message.into(),
        }
    }

    /// Create an unknown athlete error.
    #[must_use]
    pub fn unknown_athlete(name: impl Into<String>) -> Self {
        Self::UnknownAthlete { name: name.into() }
    }

    /// Check if this error means the stored table doesn't exist yet.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Io(e) => e.kind() == std::io::ErrorKind::NotFound,
            Self::DatabaseQuery(e) => e.to_string().contains("no such table"),
            _ => false,
        }
    }

    /// Check if this error was caused by user input rather than the backend.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidValue { .. } | Self::EmptyRoster | Self::UnknownAthlete { .. }
        )
    }
}
