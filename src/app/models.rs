//! Core data structures and types for the ETL pipeline.
//!
//! Defines the destination tables of the star schema, conflict policies for
//! the bulk loader, and statistics objects used throughout the library.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Destination tables of the star schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Table {
    Songplays,
    SongplaysFill,
    Users,
    Songs,
    Artists,
    Time,
}

impl Table {
    /// All tables, in schema-bootstrap order.
    pub const ALL: [Table; 6] = [
        Table::Songplays,
        Table::SongplaysFill,
        Table::Users,
        Table::Songs,
        Table::Artists,
        Table::Time,
    ];

    /// The table name as it appears in the database.
    pub fn name(&self) -> &'static str {
        match self {
            Table::Songplays => "songplays",
            Table::SongplaysFill => "songplays_fill",
            Table::Users => "users",
            Table::Songs => "songs",
            Table::Artists => "artists",
            Table::Time => "time",
        }
    }

    /// The primary-key column used for conflict resolution.
    pub fn key_column(&self) -> &'static str {
        match self {
            Table::Songplays | Table::SongplaysFill => "songplay_id",
            Table::Users => "user_id",
            Table::Songs => "song_id",
            Table::Artists => "artist_id",
            Table::Time => "start_time",
        }
    }

    /// Destination column set, in physical order.
    ///
    /// Staging CSVs written by the bulk loader must carry exactly these
    /// columns in exactly this order.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Table::Songplays => &[
                "songplay_id",
                "start_time",
                "user_id",
                "level",
                "song_id",
                "artist_id",
                "session_id",
                "location",
                "user_agent",
            ],
            Table::SongplaysFill => &[
                "songplay_id",
                "start_time",
                "user_id",
                "level",
                "song_name",
                "artist_name",
                "session_id",
                "location",
                "user_agent",
            ],
            Table::Users => &["user_id", "first_name", "last_name", "gender", "level"],
            Table::Songs => &["song_id", "title", "artist_id", "year", "duration"],
            Table::Artists => &["artist_id", "name", "location", "latitude", "longitude"],
            Table::Time => &[
                "start_time",
                "hour",
                "day",
                "week",
                "month",
                "year",
                "weekday",
            ],
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Conflict policy applied when merging staging rows into a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Rows whose unique key already exists are skipped.
    Ignore,
    /// Rows whose unique key already exists overwrite one designated
    /// mutable column. Duplicate keys inside the staging batch are resolved
    /// by physical position: the last-occurring row wins, so callers must
    /// feed rows in recency order.
    UpdateColumn(&'static str),
}

/// Statistics reported by the corpus aggregator.
#[derive(Debug, Default, Clone)]
pub struct CorpusStats {
    pub files_found: usize,
    pub files_processed: usize,
    pub rows: usize,
}

/// Statistics for a complete pipeline run.
#[derive(Debug, Default)]
pub struct RunStats {
    pub tables_loaded: usize,
    pub checks_passed: usize,
    pub rows_loaded: usize,
    pub processing_time_ms: u128,
}

/// Outcome of one reconciliation check. Purely descriptive; resetting a
/// mismatched table is the driver's decision.
#[derive(Debug, Clone, Copy)]
pub struct CheckReport {
    pub table: Table,
    pub expected: usize,
    pub actual: usize,
}

impl CheckReport {
    pub fn passed(&self) -> bool {
        self.expected == self.actual
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_names() {
        assert_eq!(Table::Songplays.name(), "songplays");
        assert_eq!(Table::SongplaysFill.name(), "songplays_fill");
        assert_eq!(Table::Time.name(), "time");
    }

    #[test]
    fn test_key_column_is_first_column() {
        for table in Table::ALL {
            assert_eq!(
                table.columns()[0],
                table.key_column(),
                "{} key column should lead its column order",
                table
            );
        }
    }

    #[test]
    fn test_check_report_passed() {
        let report = CheckReport {
            table: Table::Songs,
            expected: 3,
            actual: 3,
        };
        assert!(report.passed());

        let report = CheckReport {
            table: Table::Songs,
            expected: 3,
            actual: 2,
        };
        assert!(!report.passed());
    }
}
