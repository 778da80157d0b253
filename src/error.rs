//! Error handling for Sparkify ETL operations.
//!
//! Provides error types with context for file discovery, record parsing,
//! bulk loading, and reconciliation failures.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Staging CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Directory traversal failed under {path}")]
    Discovery {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Invalid NDJSON in file: {path} - {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("No files matching '{pattern}' found under {path}")]
    CorpusEmpty { path: PathBuf, pattern: String },

    #[error("Bulk load into table '{table}' failed: {source}")]
    Load {
        table: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error(
        "{table} table: {actual} rows do not match {expected} unique source keys - table has been reset"
    )]
    DataIntegrity {
        table: String,
        expected: usize,
        actual: usize,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl EtlError {
    /// Create a parse error with context
    pub fn parse(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a bulk-load error for a destination table
    pub fn load(table: impl Into<String>, source: rusqlite::Error) -> Self {
        Self::Load {
            table: table.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
