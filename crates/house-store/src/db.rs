//! Database connection management
//!
//! Provides utilities for opening SQLite connections and checking that the
//! database is usable before the service starts serving.

#![allow(clippy::result_large_err)]

use crate::errors::{from_rusqlite, io_error, store_unreachable, Result};
use crate::migrations::apply_migrations;
use rusqlite::Connection;
use std::path::Path;

/// Open a SQLite database at the given path
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    Connection::open(path).map_err(from_rusqlite)
}

/// Open an in-memory SQLite database (for testing)
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory().map_err(from_rusqlite)
}

/// Configure a connection with the settings the repository relies on
pub fn configure(conn: &Connection) -> Result<()> {
    // Enforce Doors.RoomID -> Rooms.RoomID
    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(from_rusqlite)?;

    // journal_mode answers with a row, so it goes through execute_batch too
    conn.execute_batch("PRAGMA journal_mode = WAL;")
        .map_err(from_rusqlite)?;

    Ok(())
}

/// Check that the database answers a trivial query
pub fn ping(conn: &Connection) -> Result<()> {
    conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
        .map_err(|e| from_rusqlite(e).with_op("ping"))?;
    Ok(())
}

/// Open, configure, ping and migrate the database at `path`
///
/// Creates the parent directory when missing. Any failure is reported as
/// `Unavailable` with the underlying error as its source; the caller treats
/// it as fatal.
pub fn connect<P: AsRef<Path>>(path: P) -> Result<Connection> {
    let path = path.as_ref();

    let prepare = || -> Result<Connection> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| io_error("create_db_dir", e))?;
        }
        let mut conn = open(path)?;
        configure(&conn)?;
        ping(&conn)?;
        apply_migrations(&mut conn)?;
        Ok(conn)
    };

    prepare().map_err(|e| store_unreachable(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ping_in_memory() {
        let conn = open_in_memory().unwrap();
        configure(&conn).unwrap();
        assert!(ping(&conn).is_ok());
    }

    #[test]
    fn test_configure_enables_foreign_keys() {
        let conn = open_in_memory().unwrap();
        configure(&conn).unwrap();

        let enabled: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 1);
    }
}
