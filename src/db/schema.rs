//! Schema bootstrap for the destination database.
//!
//! Exposes idempotent create/drop over all six destination tables plus the
//! per-table reset used by the driver after a failed reconciliation check.

use crate::app::models::Table;
use crate::db::queries::StatementRegistry;
use crate::error::Result;
use rusqlite::Connection;
use tracing::debug;

/// Create every destination table that does not already exist.
pub fn create_schema(conn: &Connection, registry: &StatementRegistry) -> Result<()> {
    for table in Table::ALL {
        debug!("Creating table if absent: {}", table);
        conn.execute(registry.create_table(table), [])?;
    }
    Ok(())
}

/// Drop every destination table that exists.
pub fn drop_schema(conn: &Connection, registry: &StatementRegistry) -> Result<()> {
    for table in Table::ALL {
        debug!("Dropping table if present: {}", table);
        conn.execute(&registry.drop_table(table), [])?;
    }
    Ok(())
}

/// Destructively reset one table: drop it and recreate it empty.
///
/// Existing contents are irrevocably discarded. Invoked by the pipeline
/// driver after a failed reconciliation check, never by the checker itself.
pub fn reset_table(conn: &Connection, registry: &StatementRegistry, table: Table) -> Result<()> {
    debug!("Resetting table: {}", table);
    conn.execute(&registry.drop_table(table), [])?;
    conn.execute(registry.create_table(table), [])?;
    Ok(())
}
