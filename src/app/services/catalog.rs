//! Catalog resolution for songplay events.
//!
//! Resolves a log event's (song title, artist name, duration) against the
//! loaded songs and artists tables. Exact multi-field equality only: no
//! fuzzy matching and no ranking among multiple matches. Matches rarely in
//! practice, which is what motivates the filled songplay shape.

use crate::error::Result;
use rusqlite::{Connection, params};

const RESOLVE_SQL: &str = "SELECT s.song_id, a.artist_id \
     FROM songs s JOIN artists a ON s.artist_id = a.artist_id \
     WHERE s.title = ?1 AND a.name = ?2 AND s.duration = ?3";

/// Resolver over the loaded song/artist catalog.
pub struct CatalogResolver<'conn> {
    conn: &'conn Connection,
}

impl<'conn> CatalogResolver<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Look up the (song_id, artist_id) pair for an exact
    /// (title, artist name, duration) triple.
    ///
    /// Returns `Some` only when exactly one catalog entry matches; zero or
    /// multiple matches resolve to `None`.
    pub fn resolve(
        &self,
        title: &str,
        artist: &str,
        duration: f64,
    ) -> Result<Option<(String, String)>> {
        let mut stmt = self.conn.prepare_cached(RESOLVE_SQL)?;
        let mut rows = stmt.query(params![title, artist, duration])?;

        let hit = match rows.next()? {
            Some(row) => Some((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
            None => return Ok(None),
        };
        if rows.next()?.is_some() {
            // Ambiguous triple: refuse to pick among multiple matches
            return Ok(None);
        }
        Ok(hit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_with(rows: &[(&str, &str, &str, f64)]) -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE songs (song_id TEXT PRIMARY KEY, title TEXT, artist_id TEXT, year INTEGER, duration REAL);
             CREATE TABLE artists (artist_id TEXT PRIMARY KEY, name TEXT, location TEXT, latitude REAL, longitude REAL);",
        )
        .unwrap();
        for (i, (title, artist, artist_id, duration)) in rows.iter().enumerate() {
            conn.execute(
                "INSERT OR IGNORE INTO artists VALUES (?1, ?2, NULL, NULL, NULL)",
                params![artist_id, artist],
            )
            .unwrap();
            conn.execute(
                "INSERT INTO songs VALUES (?1, ?2, ?3, 2000, ?4)",
                params![format!("S{i}"), title, artist_id, duration],
            )
            .unwrap();
        }
        conn
    }

    #[test]
    fn test_exact_triple_resolves() {
        let conn = catalog_with(&[("Setanta matins", "Elena", "A1", 269.58)]);
        let resolver = CatalogResolver::new(&conn);

        let hit = resolver.resolve("Setanta matins", "Elena", 269.58).unwrap();
        assert_eq!(hit, Some(("S0".to_string(), "A1".to_string())));
    }

    #[test]
    fn test_near_miss_resolves_to_none() {
        let conn = catalog_with(&[("Setanta matins", "Elena", "A1", 269.58)]);
        let resolver = CatalogResolver::new(&conn);

        // Wrong duration: never a nearest match
        assert!(
            resolver
                .resolve("Setanta matins", "Elena", 269.57)
                .unwrap()
                .is_none()
        );
        // Wrong artist
        assert!(
            resolver
                .resolve("Setanta matins", "Helena", 269.58)
                .unwrap()
                .is_none()
        );
        // Unknown title
        assert!(resolver.resolve("Unknown", "Elena", 269.58).unwrap().is_none());
    }

    #[test]
    fn test_ambiguous_triple_resolves_to_none() {
        // Two songs by the same artist with identical title and duration
        let conn = catalog_with(&[
            ("Same Song", "Elena", "A1", 100.0),
            ("Same Song", "Elena", "A1", 100.0),
        ]);
        let resolver = CatalogResolver::new(&conn);

        assert!(resolver.resolve("Same Song", "Elena", 100.0).unwrap().is_none());
    }
}
