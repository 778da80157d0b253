//! Statement registry for the star schema.
//!
//! All SQL text lives here, owned by a registry instance that is passed by
//! reference into the bulk loader, the reconciliation checker, and the
//! schema bootstrap. No module-level statement state.

use crate::app::models::Table;

/// Name of the per-call staging table. Created TEMP, so it is private to
/// the loading connection and never collides with destination tables.
pub const STAGING_TABLE: &str = "etl_staging";

/// Registry of the SQL statements used against the destination database.
#[derive(Debug, Clone, Default)]
pub struct StatementRegistry;

impl StatementRegistry {
    pub fn new() -> Self {
        Self
    }

    /// Idempotent CREATE TABLE statement for a destination table.
    pub fn create_table(&self, table: Table) -> &'static str {
        match table {
            Table::Songplays => {
                "CREATE TABLE IF NOT EXISTS songplays (
                    songplay_id INTEGER PRIMARY KEY,
                    start_time  TEXT NOT NULL,
                    user_id     INTEGER NOT NULL,
                    level       TEXT NOT NULL,
                    song_id     TEXT,
                    artist_id   TEXT,
                    session_id  INTEGER NOT NULL,
                    location    TEXT,
                    user_agent  TEXT NOT NULL
                )"
            }
            Table::SongplaysFill => {
                "CREATE TABLE IF NOT EXISTS songplays_fill (
                    songplay_id INTEGER PRIMARY KEY,
                    start_time  TEXT NOT NULL,
                    user_id     INTEGER NOT NULL,
                    level       TEXT NOT NULL,
                    song_name   TEXT,
                    artist_name TEXT,
                    session_id  INTEGER NOT NULL,
                    location    TEXT,
                    user_agent  TEXT NOT NULL
                )"
            }
            Table::Users => {
                "CREATE TABLE IF NOT EXISTS users (
                    user_id    INTEGER PRIMARY KEY,
                    first_name TEXT NOT NULL,
                    last_name  TEXT NOT NULL,
                    gender     TEXT NOT NULL,
                    level      TEXT NOT NULL
                )"
            }
            Table::Songs => {
                "CREATE TABLE IF NOT EXISTS songs (
                    song_id   TEXT PRIMARY KEY,
                    title     TEXT NOT NULL,
                    artist_id TEXT NOT NULL,
                    year      INTEGER NOT NULL,
                    duration  REAL NOT NULL
                )"
            }
            Table::Artists => {
                "CREATE TABLE IF NOT EXISTS artists (
                    artist_id TEXT PRIMARY KEY,
                    name      TEXT NOT NULL,
                    location  TEXT,
                    latitude  REAL,
                    longitude REAL
                )"
            }
            Table::Time => {
                "CREATE TABLE IF NOT EXISTS time (
                    start_time TEXT PRIMARY KEY,
                    hour       INTEGER NOT NULL,
                    day        INTEGER NOT NULL,
                    week       INTEGER NOT NULL,
                    month      INTEGER NOT NULL,
                    year       INTEGER NOT NULL,
                    weekday    INTEGER NOT NULL
                )"
            }
        }
    }

    /// DROP TABLE statement for a destination table.
    pub fn drop_table(&self, table: Table) -> String {
        format!("DROP TABLE IF EXISTS {}", table.name())
    }

    /// Row count over a destination table.
    pub fn count_rows(&self, table: Table) -> String {
        format!("SELECT COUNT(*) FROM {}", table.name())
    }

    /// Create the temp staging table as a zero-row clone of the destination,
    /// inheriting column names, order, and affinities.
    pub fn create_staging(&self, table: Table) -> String {
        format!(
            "CREATE TEMPORARY TABLE {} AS SELECT * FROM {} LIMIT 0",
            STAGING_TABLE,
            table.name()
        )
    }

    /// Drop the temp staging table.
    pub fn drop_staging(&self) -> String {
        format!("DROP TABLE IF EXISTS {STAGING_TABLE}")
    }

    /// Parameterized insert of one staging CSV row.
    pub fn insert_staging(&self, table: Table) -> String {
        let columns = table.columns();
        let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{i}")).collect();
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            STAGING_TABLE,
            columns.join(", "),
            placeholders.join(", ")
        )
    }

    /// Remove duplicate-key staging rows, keeping the physically-last
    /// occurrence per key.
    pub fn dedup_staging(&self, table: Table) -> String {
        format!(
            "DELETE FROM {staging} WHERE rowid NOT IN \
             (SELECT MAX(rowid) FROM {staging} GROUP BY {key})",
            staging = STAGING_TABLE,
            key = table.key_column()
        )
    }

    /// Merge staging into the destination, skipping rows whose key exists.
    pub fn merge_ignore(&self, table: Table) -> String {
        format!(
            "INSERT OR IGNORE INTO {} SELECT * FROM {}",
            table.name(),
            STAGING_TABLE
        )
    }

    /// Merge staging into the destination, overwriting one mutable column
    /// on key conflict.
    ///
    /// The `WHERE true` is required by SQLite to disambiguate the upsert
    /// clause from a join when the insert source is a SELECT.
    pub fn merge_update(&self, table: Table, column: &str) -> String {
        format!(
            "INSERT INTO {} SELECT * FROM {} WHERE true \
             ON CONFLICT({}) DO UPDATE SET {column} = excluded.{column}",
            table.name(),
            STAGING_TABLE,
            table.key_column()
        )
    }
}
