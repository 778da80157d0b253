//! Sparkify ETL Library
//!
//! A batch ETL pipeline that reads newline-delimited JSON song-catalog and
//! listening-log records from a file tree, reshapes them into a small
//! relational star schema, and bulk-loads them into SQLite through a CSV
//! staging artifact.
//!
//! This library provides tools for:
//! - Discovering NDJSON files with a recursive, pattern-filtered traversal
//! - Aggregating a whole corpus into one unified DataFrame
//! - Deriving the per-table shapes (songs, artists, time, users, songplays)
//! - Bulk-loading shapes with explicit conflict policies
//! - Reconciling destination row counts against source unique-key counts

pub mod config;
pub mod error;
pub mod pipeline;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod catalog;
        pub mod checker;
        pub mod corpus;
        pub mod discovery;
        pub mod loader;
        pub mod shapes;
    }
}

// Database access modules
pub mod db {
    pub mod queries;
    pub mod schema;

    use crate::error::Result;
    use rusqlite::Connection;
    use std::path::Path;

    /// Open a connection to the destination database.
    pub fn connect(path: &Path) -> Result<Connection> {
        Ok(Connection::open(path)?)
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{ConflictPolicy, Table};
pub use config::EtlConfig;
pub use error::{EtlError, Result};
