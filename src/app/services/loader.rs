//! Bulk loader for shaped DataFrames.
//!
//! Loading is a four-step sequence executed as one unit per call:
//! 1. serialize the shape to a disposable header-bearing CSV staging file;
//! 2. bulk-insert the CSV into a temp staging table cloned from the
//!    destination, inside a single transaction;
//! 3. for the update policy, drop duplicate-key staging rows keeping the
//!    physically-last occurrence per key;
//! 4. merge staging into the destination under the requested conflict
//!    policy.
//!
//! The transaction commits before the call returns, so a subsequent row
//! count always observes the merged state.

use crate::app::models::{ConflictPolicy, Table};
use crate::db::queries::StatementRegistry;
use crate::error::{EtlError, Result};
use polars::prelude::*;
use rusqlite::Connection;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Bulk loader writing staging CSVs into a fixed staging directory.
#[derive(Debug)]
pub struct BulkLoader {
    staging_dir: PathBuf,
}

impl BulkLoader {
    pub fn new(staging_dir: impl Into<PathBuf>) -> Self {
        Self {
            staging_dir: staging_dir.into(),
        }
    }

    /// Load one shape into its destination table.
    ///
    /// The shape's column names and order must match the destination
    /// exactly. Returns the number of staged rows.
    pub fn load(
        &self,
        conn: &mut Connection,
        registry: &StatementRegistry,
        shape: &DataFrame,
        table: Table,
        policy: ConflictPolicy,
    ) -> Result<usize> {
        self.validate_columns(shape, table)?;

        let staging_path = self.write_staging_csv(shape, table)?;
        debug!(
            "Staged {} rows for {} at {}",
            shape.height(),
            table,
            staging_path.display()
        );

        let tx = conn
            .transaction()
            .map_err(|e| EtlError::load(table.name(), e))?;
        {
            let run = || -> std::result::Result<(), rusqlite::Error> {
                tx.execute(&registry.drop_staging(), [])?;
                tx.execute(&registry.create_staging(table), [])?;
                Ok(())
            };
            run().map_err(|e| EtlError::load(table.name(), e))?;

            self.copy_csv_into_staging(&tx, registry, &staging_path, table)?;

            let merge = match policy {
                ConflictPolicy::Ignore => registry.merge_ignore(table),
                ConflictPolicy::UpdateColumn(column) => {
                    // Staging may hold several rows per key; the merge
                    // upsert must see only one, the last-occurring
                    tx.execute(&registry.dedup_staging(table), [])
                        .map_err(|e| EtlError::load(table.name(), e))?;
                    registry.merge_update(table, column)
                }
            };
            tx.execute(&merge, [])
                .map_err(|e| EtlError::load(table.name(), e))?;
            tx.execute(&registry.drop_staging(), [])
                .map_err(|e| EtlError::load(table.name(), e))?;
        }
        tx.commit().map_err(|e| EtlError::load(table.name(), e))?;

        info!("Loaded {} staged rows into {}", shape.height(), table);
        Ok(shape.height())
    }

    /// Serialize the shape to the per-table staging CSV, header included,
    /// recreating the file on every call.
    fn write_staging_csv(&self, shape: &DataFrame, table: Table) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.staging_dir)?;
        let path = self.staging_dir.join(format!("{}_df.csv", table.name()));

        let mut file = File::create(&path)?;
        let mut df = shape.clone();
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut df)?;
        Ok(path)
    }

    /// Bulk-copy the staging CSV into the temp staging table with one
    /// prepared statement. Empty fields bind as NULL, matching how the
    /// CSV writer renders nulls.
    fn copy_csv_into_staging(
        &self,
        tx: &rusqlite::Transaction<'_>,
        registry: &StatementRegistry,
        staging_path: &Path,
        table: Table,
    ) -> Result<usize> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(staging_path)?;

        let header = reader.headers()?;
        let expected = table.columns();
        if header.len() != expected.len() {
            return Err(EtlError::configuration(format!(
                "staging CSV for {} has {} columns, expected {}",
                table,
                header.len(),
                expected.len()
            )));
        }

        let sql = registry.insert_staging(table);
        let mut stmt = tx
            .prepare(&sql)
            .map_err(|e| EtlError::load(table.name(), e))?;

        let mut copied = 0usize;
        for record in reader.records() {
            let record = record?;
            let params = rusqlite::params_from_iter(
                record
                    .iter()
                    .map(|field| if field.is_empty() { None } else { Some(field) }),
            );
            stmt.execute(params)
                .map_err(|e| EtlError::load(table.name(), e))?;
            copied += 1;
        }
        Ok(copied)
    }

    /// The staging CSV column order must match the destination exactly.
    fn validate_columns(&self, shape: &DataFrame, table: Table) -> Result<()> {
        let names: Vec<String> = shape
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        if names != table.columns() {
            return Err(EtlError::configuration(format!(
                "shape columns {:?} do not match {} destination columns {:?}",
                names,
                table,
                table.columns()
            )));
        }
        Ok(())
    }
}
