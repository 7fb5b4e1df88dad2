//! SQL schema migrations and connection setup for the SQLite backends.
//!
//! Uses `rusqlite_migration` to manage schema migrations via SQLite's
//! `user_version` pragma. Migrations are embedded at compile time via
//! `include_str!`, so opening a database creates its schema idempotently.
//!
//! The flow-editor database and the legacy graph database are separate
//! files with separate migration sets (both define a `nodes` table).

use rusqlite::Connection;
use rusqlite_migration::{Migrations, M};

use crate::error::StorageError;

/// Flow-editor schema migrations, applied in order via `user_version` tracking.
fn flow_migrations() -> Migrations<'static> {
    Migrations::new(vec![M::up(include_str!("migrations/001_flow_schema.sql"))])
}

/// Legacy graph schema migrations.
fn graph_migrations() -> Migrations<'static> {
    Migrations::new(vec![M::up(include_str!("migrations/001_graph_schema.sql"))])
}

/// Opens (or creates) the flow-editor database at `path` with WAL mode and
/// all pending migrations applied.
pub fn open_database(path: &str) -> Result<Connection, StorageError> {
    let mut conn = Connection::open(path)?;
    configure(&conn, true)?;
    migrate(&mut conn, &flow_migrations())?;
    Ok(conn)
}

/// Opens an in-memory flow-editor database with all migrations applied.
pub fn open_in_memory() -> Result<Connection, StorageError> {
    let mut conn = Connection::open_in_memory()?;
    configure(&conn, true)?;
    migrate(&mut conn, &flow_migrations())?;
    Ok(conn)
}

/// Opens (or creates) the legacy graph database at `path`.
///
/// Foreign keys stay disabled: edges may name nodes that do not exist.
pub fn open_graph_database(path: &str) -> Result<Connection, StorageError> {
    let mut conn = Connection::open(path)?;
    configure(&conn, false)?;
    migrate(&mut conn, &graph_migrations())?;
    Ok(conn)
}

/// Configures pragmas.
fn configure(conn: &Connection, foreign_keys: bool) -> Result<(), StorageError> {
    // WAL lets readers proceed while a single writer holds the lock.
    conn.pragma_update(None, "journal_mode", "WAL")?;
    // NORMAL synchronous is safe with WAL mode.
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    conn.pragma_update(None, "foreign_keys", if foreign_keys { "ON" } else { "OFF" })?;
    Ok(())
}

/// Applies pending migrations.
fn migrate(conn: &mut Connection, migrations: &Migrations<'static>) -> Result<(), StorageError> {
    migrations
        .to_latest(conn)
        .map_err(|e| StorageError::Migration(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_valid() {
        assert!(flow_migrations().validate().is_ok());
        assert!(graph_migrations().validate().is_ok());
    }

    #[test]
    fn in_memory_database_has_flow_tables() {
        let conn = open_in_memory().unwrap();
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('nodes', 'flows')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn reopening_is_idempotent() {
        let path = std::env::temp_dir().join(format!("krok_schema_{}.db", uuid::Uuid::new_v4()));
        let path = path.to_string_lossy().to_string();
        drop(open_database(&path).unwrap());
        let conn = open_database(&path).unwrap();
        let version: i64 = conn
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .unwrap();
        assert_eq!(version, 1);
        drop(conn);
        let _ = std::fs::remove_file(&path);
    }
}
