//! Configuration for a pipeline run.
//!
//! Connection parameters and corpus locations are supplied here rather than
//! hardcoded in the pipeline stages. The staging directory holds the
//! disposable CSV artifacts written by the bulk loader.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// File-name pattern for corpus discovery.
pub const RECORD_FILE_PATTERN: &str = "*.json";

/// Configuration for one ETL run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EtlConfig {
    /// Root directory of the song-catalog corpus
    pub song_data: PathBuf,

    /// Root directory of the listening-log corpus
    pub log_data: PathBuf,

    /// Directory for disposable CSV staging artifacts
    pub staging_dir: PathBuf,

    /// Path to the destination SQLite database
    pub database: PathBuf,
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            song_data: PathBuf::from("data/song_data"),
            log_data: PathBuf::from("data/log_data"),
            staging_dir: PathBuf::from("data/csv_files"),
            database: PathBuf::from("sparkify.db"),
        }
    }
}

impl EtlConfig {
    /// Set the song corpus root
    pub fn with_song_data(mut self, path: impl Into<PathBuf>) -> Self {
        self.song_data = path.into();
        self
    }

    /// Set the log corpus root
    pub fn with_log_data(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_data = path.into();
        self
    }

    /// Set the staging directory
    pub fn with_staging_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.staging_dir = path.into();
        self
    }

    /// Set the destination database path
    pub fn with_database(mut self, path: impl Into<PathBuf>) -> Self {
        self.database = path.into();
        self
    }
}
