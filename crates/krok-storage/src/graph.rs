//! Persistent storage for the legacy node/edge graph.
//!
//! [`GraphStore`] holds only the database path. Every call opens its own
//! connection, runs one statement, and drops the connection on return, so
//! the store is freely cloneable and needs no locking.

use rusqlite::{params, OptionalExtension};
use serde_json::Value;

use krok_core::{GraphEdge, GraphNode};

use crate::error::{is_duplicate_key, StorageError};

#[derive(Debug, Clone)]
pub struct GraphStore {
    db_path: String,
}

impl GraphStore {
    /// Creates a store for the database at `db_path`, creating the schema if
    /// needed.
    pub fn new(db_path: &str) -> Result<Self, StorageError> {
        let store = Self {
            db_path: db_path.to_string(),
        };
        // Ensure DB exists and migrations are applied.
        let _conn = store.open_conn()?;
        tracing::info!(path = db_path, "opened graph database");
        Ok(store)
    }

    /// Creates a store backed by a fresh file in the system temp directory.
    pub fn temporary() -> Result<Self, StorageError> {
        let temp_path = std::env::temp_dir()
            .join(format!("krok_graph_{}.db", uuid::Uuid::new_v4()))
            .to_string_lossy()
            .to_string();
        Self::new(&temp_path)
    }

    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    pub fn insert_node(&self, node: &GraphNode) -> Result<(), StorageError> {
        node.validate()?;
        let conn = self.open_conn()?;
        let data = serde_json::to_string(&node.data)?;
        match conn.execute(
            "INSERT INTO nodes (id, data) VALUES (?1, ?2)",
            params![node.id, data],
        ) {
            Ok(_) => Ok(()),
            Err(err) if is_duplicate_key(&err) => {
                Err(StorageError::DuplicateGraphNode(node.id.clone()))
            }
            Err(err) => Err(err.into()),
        }
    }

    pub fn get_node(&self, id: &str) -> Result<Option<GraphNode>, StorageError> {
        let conn = self.open_conn()?;
        let data: Option<String> = conn
            .query_row(
                "SELECT data FROM nodes WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()?;
        match data {
            Some(data) => Ok(Some(GraphNode {
                id: id.to_string(),
                data: serde_json::from_str(&data)?,
            })),
            None => Ok(None),
        }
    }

    /// Inserts an edge. `source` and `target` are stored as given, without
    /// checking that those nodes exist.
    pub fn insert_edge(&self, edge: &GraphEdge) -> Result<(), StorageError> {
        edge.validate()?;
        let conn = self.open_conn()?;
        let data = serde_json::to_string(&edge.data)?;
        match conn.execute(
            "INSERT INTO edges (id, source, target, data) VALUES (?1, ?2, ?3, ?4)",
            params![edge.id, edge.source, edge.target, data],
        ) {
            Ok(_) => Ok(()),
            Err(err) if is_duplicate_key(&err) => {
                Err(StorageError::DuplicateGraphEdge(edge.id.clone()))
            }
            Err(err) => Err(err.into()),
        }
    }

    pub fn get_edge(&self, id: &str) -> Result<Option<GraphEdge>, StorageError> {
        let conn = self.open_conn()?;
        let row: Option<(String, String, String)> = conn
            .query_row(
                "SELECT source, target, data FROM edges WHERE id = ?1",
                params![id],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()?;
        match row {
            Some((source, target, data)) => {
                let data: Value = serde_json::from_str(&data)?;
                Ok(Some(GraphEdge {
                    id: id.to_string(),
                    source,
                    target,
                    data,
                }))
            }
            None => Ok(None),
        }
    }

    fn open_conn(&self) -> Result<rusqlite::Connection, StorageError> {
        crate::schema::open_graph_database(&self.db_path)
    }
}
