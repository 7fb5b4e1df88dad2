//! Storage error types for krok-storage.
//!
//! [`StorageError`] covers database and serialization failures, absent
//! entities, identifier collisions, and payload validation failures raised
//! by krok-core.

use thiserror::Error;

/// Errors produced by storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The underlying SQLite call failed.
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// JSON serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Applying schema migrations failed.
    #[error("migration error: {0}")]
    Migration(String),

    /// A payload failed validation.
    #[error(transparent)]
    Core(#[from] krok_core::CoreError),

    /// No node with the given id.
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// No flow with the given id.
    #[error("flow not found: {0}")]
    FlowNotFound(String),

    /// A node with the given id already exists.
    #[error("node already exists: {0}")]
    DuplicateNode(String),

    /// A flow with the given id already exists.
    #[error("flow already exists: {0}")]
    DuplicateFlow(String),

    /// A legacy graph node with the given id already exists.
    #[error("graph node already exists: {0}")]
    DuplicateGraphNode(String),

    /// A legacy graph edge with the given id already exists.
    #[error("graph edge already exists: {0}")]
    DuplicateGraphEdge(String),
}

/// Returns `true` if `err` is a primary-key or unique constraint violation.
pub(crate) fn is_duplicate_key(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(failure, _) => matches!(
            failure.extended_code,
            rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY | rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
        ),
        _ => false,
    }
}
