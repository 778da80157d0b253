//! Pipeline driver.
//!
//! Sequences the full run: song corpus (songs, artists), then log corpus
//! (time, users, songplays), then the denormalized filled songplays. Every
//! bulk load commits before the reconciliation check reads the table, and
//! a failed check resets the affected table and aborts the run.

use crate::app::models::{ConflictPolicy, RunStats, Table};
use crate::app::services::catalog::CatalogResolver;
use crate::app::services::loader::BulkLoader;
use crate::app::services::{checker, corpus, shapes};
use crate::config::{EtlConfig, RECORD_FILE_PATTERN};
use crate::db;
use crate::db::queries::StatementRegistry;
use crate::db::schema;
use crate::error::{EtlError, Result};

use colored::*;
use polars::prelude::DataFrame;
use rusqlite::Connection;
use std::time::Instant;
use tracing::info;

/// Driver for one complete ETL run.
pub struct Pipeline {
    config: EtlConfig,
    conn: Connection,
    registry: StatementRegistry,
    loader: BulkLoader,
}

impl Pipeline {
    /// Open the destination database and prepare the loader.
    pub fn new(config: EtlConfig) -> Result<Self> {
        let conn = db::connect(&config.database)?;
        let loader = BulkLoader::new(config.staging_dir.clone());
        Ok(Self {
            config,
            conn,
            registry: StatementRegistry::new(),
            loader,
        })
    }

    /// Run the full pipeline: song corpus, log corpus, filled songplays.
    pub fn run(&mut self) -> Result<RunStats> {
        let start_time = Instant::now();
        let mut stats = RunStats::default();

        println!("{}", "Starting Sparkify ETL run".bright_green().bold());
        println!(
            "  {} {}",
            "Database:".bright_cyan(),
            self.config.database.display()
        );

        self.process_song_corpus(&mut stats)?;
        self.process_log_corpus(&mut stats)?;

        stats.processing_time_ms = start_time.elapsed().as_millis();
        println!("\n{}", "Run Summary".bright_green().bold());
        println!(
            "  {} {}",
            "Tables loaded:".bright_cyan(),
            stats.tables_loaded.to_string().bright_white()
        );
        println!(
            "  {} {}",
            "Checks passed:".bright_cyan(),
            stats.checks_passed.to_string().bright_white()
        );
        println!(
            "  {} {}ms",
            "Time elapsed:".bright_cyan(),
            stats.processing_time_ms.to_string().bright_white()
        );

        Ok(stats)
    }

    /// Song corpus: aggregate, shape songs and artists, load, reconcile.
    fn process_song_corpus(&mut self, stats: &mut RunStats) -> Result<()> {
        println!("\n{}", "Processing song corpus...".bright_yellow());
        let (corpus_df, _) = corpus::aggregate(&self.config.song_data, RECORD_FILE_PATTERN)?;

        let songs = shapes::song_shape(&corpus_df)?;
        let artists = shapes::artist_shape(&corpus_df)?;

        let expected_songs = n_unique(&corpus_df, "song_id")?;
        let expected_artists = n_unique(&corpus_df, "artist_id")?;

        self.load_and_check(&songs, Table::Songs, ConflictPolicy::Ignore, expected_songs, stats)?;
        self.load_and_check(
            &artists,
            Table::Artists,
            ConflictPolicy::Ignore,
            expected_artists,
            stats,
        )?;
        Ok(())
    }

    /// Log corpus: aggregate, filter, shape time/users/songplays, load,
    /// reconcile, then the filled songplay view.
    fn process_log_corpus(&mut self, stats: &mut RunStats) -> Result<()> {
        println!("\n{}", "Processing log corpus...".bright_yellow());
        let (corpus_df, _) = corpus::aggregate(&self.config.log_data, RECORD_FILE_PATTERN)?;
        let filtered = shapes::filter_log_events(&corpus_df)?;
        info!(
            "{} of {} log events are song plays",
            filtered.height(),
            corpus_df.height()
        );

        let time = shapes::time_shape(&filtered)?;
        let expected_time = n_unique(&time, "start_time")?;
        self.load_and_check(&time, Table::Time, ConflictPolicy::Ignore, expected_time, stats)?;

        let users = shapes::user_shape(&filtered)?;
        let expected_users = n_unique(&users, "user_id")?;
        self.load_and_check(
            &users,
            Table::Users,
            ConflictPolicy::UpdateColumn("level"),
            expected_users,
            stats,
        )?;

        // Each filtered event is its own songplay, so the expected key
        // count is the filtered row count
        let expected_songplays = filtered.height();
        let songplays = {
            let resolver = CatalogResolver::new(&self.conn);
            shapes::songplay_shape(&filtered, &resolver)?
        };
        self.load_and_check(
            &songplays,
            Table::Songplays,
            ConflictPolicy::Ignore,
            expected_songplays,
            stats,
        )?;

        let filled = shapes::songplay_filled_shape(&filtered)?;
        self.load_and_check(
            &filled,
            Table::SongplaysFill,
            ConflictPolicy::Ignore,
            expected_songplays,
            stats,
        )?;
        Ok(())
    }

    /// Load one shape, then reconcile the destination row count. On
    /// mismatch the table is reset (emptied) and the run aborts.
    fn load_and_check(
        &mut self,
        shape: &DataFrame,
        table: Table,
        policy: ConflictPolicy,
        expected: usize,
        stats: &mut RunStats,
    ) -> Result<()> {
        let staged = self
            .loader
            .load(&mut self.conn, &self.registry, shape, table, policy)?;
        stats.tables_loaded += 1;
        stats.rows_loaded += staged;

        let report = checker::check(&self.conn, &self.registry, table, expected)?;
        println!(
            "{} total rows in {} table, {} unique keys from the json files.",
            report.actual, table, report.expected
        );
        if !report.passed() {
            schema::reset_table(&self.conn, &self.registry, table)?;
            return Err(EtlError::DataIntegrity {
                table: table.name().to_string(),
                expected: report.expected,
                actual: report.actual,
            });
        }
        println!("  {}", "Check passed".bright_green());
        stats.checks_passed += 1;
        Ok(())
    }
}

/// Unique-value count over one column of a source frame.
fn n_unique(df: &DataFrame, column: &str) -> Result<usize> {
    Ok(df.column(column)?.as_materialized_series().n_unique()?)
}
