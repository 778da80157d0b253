//! Row-count reconciliation.
//!
//! A check is pure and read-only: it compares the live destination row
//! count against the unique-key count derived from source data and returns
//! a report. Resetting a mismatched table is a separate, destructive
//! operation owned by `db::schema` and invoked by the pipeline driver.

use crate::app::models::{CheckReport, Table};
use crate::db::queries::StatementRegistry;
use crate::error::Result;
use rusqlite::Connection;
use tracing::debug;

/// Compare the destination table's row count against the expected
/// unique-key count.
pub fn check(
    conn: &Connection,
    registry: &StatementRegistry,
    table: Table,
    expected: usize,
) -> Result<CheckReport> {
    let actual: i64 = conn.query_row(&registry.count_rows(table), [], |row| row.get(0))?;
    let report = CheckReport {
        table,
        expected,
        actual: actual as usize,
    };
    debug!(
        "Reconciliation for {}: {} rows vs {} unique source keys",
        table, report.actual, report.expected
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema;

    fn setup() -> (Connection, StatementRegistry) {
        let conn = Connection::open_in_memory().unwrap();
        let registry = StatementRegistry::new();
        schema::create_schema(&conn, &registry).unwrap();
        conn.execute_batch(
            "INSERT INTO songs VALUES ('S1', 'Alpha', 'A1', 2001, 200.5);
             INSERT INTO songs VALUES ('S2', 'Beta', 'A2', 2002, 180.25);",
        )
        .unwrap();
        (conn, registry)
    }

    #[test]
    fn test_check_passes_on_matching_counts() {
        let (conn, registry) = setup();
        let report = check(&conn, &registry, Table::Songs, 2).unwrap();
        assert!(report.passed());
        assert_eq!(report.actual, 2);
    }

    #[test]
    fn test_check_reports_mismatch_without_side_effects() {
        let (conn, registry) = setup();
        let report = check(&conn, &registry, Table::Songs, 3).unwrap();
        assert!(!report.passed());

        // The check itself never mutates the table
        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM songs", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 2);
    }

    #[test]
    fn test_failed_check_then_reset_leaves_table_empty() {
        let (conn, registry) = setup();

        let report = check(&conn, &registry, Table::Songs, 1).unwrap();
        assert!(!report.passed());

        // Driver-side consequence of a failed check
        schema::reset_table(&conn, &registry, Table::Songs).unwrap();
        let report = check(&conn, &registry, Table::Songs, 0).unwrap();
        assert!(report.passed());
        assert_eq!(report.actual, 0);
    }
}
