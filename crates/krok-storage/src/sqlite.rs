//! SQLite implementation of [`FlowStore`].
//!
//! [`SqliteStore`] keeps one connection open for its lifetime. Property maps
//! are stored as JSON TEXT via serde_json; timestamps as RFC 3339 TEXT.
//! Listings are ordered by `rowid`, which follows insertion order.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use krok_core::{Flow, FlowCreate, FlowUpdate, Node, NodeCreate, NodeUpdate, Properties};

use crate::error::{is_duplicate_key, StorageError};
use crate::traits::FlowStore;
use crate::types::Page;

const NODE_COLUMNS: &str = "node_id, flow_id, node_type, name, properties_json, position_x, \
                            position_y, status, health, created_at, updated_at";

const FLOW_COLUMNS: &str = "flow_id, name, description, created_at, updated_at";

/// SQLite-backed implementation of [`FlowStore`].
pub struct SqliteStore {
    conn: Connection,
}

/// A node row before its property JSON is decoded.
struct NodeRow {
    node_id: String,
    flow_id: String,
    node_type: String,
    name: String,
    properties_json: String,
    position_x: i64,
    position_y: i64,
    status: String,
    health: i64,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl NodeRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(NodeRow {
            node_id: row.get(0)?,
            flow_id: row.get(1)?,
            node_type: row.get(2)?,
            name: row.get(3)?,
            properties_json: row.get(4)?,
            position_x: row.get(5)?,
            position_y: row.get(6)?,
            status: row.get(7)?,
            health: row.get(8)?,
            created_at: row.get(9)?,
            updated_at: row.get(10)?,
        })
    }

    fn into_node(self) -> Result<Node, StorageError> {
        let properties: Properties = serde_json::from_str(&self.properties_json)?;
        Ok(Node {
            node_id: self.node_id,
            flow_id: self.flow_id,
            node_type: self.node_type,
            name: self.name,
            properties,
            position_x: self.position_x,
            position_y: self.position_y,
            status: self.status,
            health: self.health,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn read_flow(row: &Row<'_>) -> rusqlite::Result<Flow> {
    Ok(Flow {
        flow_id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}

impl SqliteStore {
    /// Opens (or creates) a SQLite database at `path`.
    pub fn new(path: &str) -> Result<Self, StorageError> {
        let conn = crate::schema::open_database(path)?;
        tracing::info!(path, "opened flow database");
        Ok(SqliteStore { conn })
    }

    /// Opens an in-memory SQLite database.
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = crate::schema::open_in_memory()?;
        Ok(SqliteStore { conn })
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    fn select_node(conn: &Connection, node_id: &str) -> Result<Option<Node>, StorageError> {
        let row = conn
            .query_row(
                &format!("SELECT {NODE_COLUMNS} FROM nodes WHERE node_id = ?1"),
                params![node_id],
                NodeRow::read,
            )
            .optional()?;
        row.map(NodeRow::into_node).transpose()
    }

    fn select_flow(conn: &Connection, flow_id: &str) -> Result<Option<Flow>, StorageError> {
        let flow = conn
            .query_row(
                &format!("SELECT {FLOW_COLUMNS} FROM flows WHERE flow_id = ?1"),
                params![flow_id],
                read_flow,
            )
            .optional()?;
        Ok(flow)
    }

    fn collect_nodes(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<Node>, StorageError> {
        let mut stmt = self.conn.prepare_cached(sql)?;
        let rows = stmt.query_map(params, NodeRow::read)?;
        let mut result = Vec::new();
        for row in rows {
            result.push(row?.into_node()?);
        }
        Ok(result)
    }
}

impl FlowStore for SqliteStore {
    // -------------------------------------------------------------------
    // Node repository
    // -------------------------------------------------------------------

    fn get_node(&self, node_id: &str) -> Result<Option<Node>, StorageError> {
        Self::select_node(&self.conn, node_id)
    }

    fn list_nodes(&self, page: Page) -> Result<Vec<Node>, StorageError> {
        self.collect_nodes(
            &format!("SELECT {NODE_COLUMNS} FROM nodes ORDER BY rowid LIMIT ?1 OFFSET ?2"),
            params![page.limit, page.skip],
        )
    }

    fn list_nodes_by_flow(&self, flow_id: &str, page: Page) -> Result<Vec<Node>, StorageError> {
        self.collect_nodes(
            &format!(
                "SELECT {NODE_COLUMNS} FROM nodes WHERE flow_id = ?1 ORDER BY rowid LIMIT ?2 OFFSET ?3"
            ),
            params![flow_id, page.limit, page.skip],
        )
    }

    fn create_node(&mut self, node: NodeCreate) -> Result<Node, StorageError> {
        node.validate()?;
        let node = Node::from_create(node, Utc::now());
        let properties_json = serde_json::to_string(&node.properties)?;
        let result = self.conn.execute(
            &format!(
                "INSERT INTO nodes ({NODE_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)"
            ),
            params![
                node.node_id,
                node.flow_id,
                node.node_type,
                node.name,
                properties_json,
                node.position_x,
                node.position_y,
                node.status,
                node.health,
                node.created_at,
                node.updated_at,
            ],
        );
        match result {
            Ok(_) => Ok(node),
            Err(err) if is_duplicate_key(&err) => Err(StorageError::DuplicateNode(node.node_id)),
            Err(err) => Err(err.into()),
        }
    }

    fn update_node(&mut self, node_id: &str, update: NodeUpdate) -> Result<Node, StorageError> {
        update.validate()?;
        let tx = self.conn.transaction()?;
        let Some(mut node) = Self::select_node(&tx, node_id)? else {
            return Err(StorageError::NodeNotFound(node_id.to_string()));
        };
        node.apply(update, Utc::now());
        let properties_json = serde_json::to_string(&node.properties)?;
        tx.execute(
            "UPDATE nodes SET name = ?2, properties_json = ?3, position_x = ?4, position_y = ?5, \
             status = ?6, health = ?7, updated_at = ?8 WHERE node_id = ?1",
            params![
                node.node_id,
                node.name,
                properties_json,
                node.position_x,
                node.position_y,
                node.status,
                node.health,
                node.updated_at,
            ],
        )?;
        tx.commit()?;
        Ok(node)
    }

    fn delete_node(&mut self, node_id: &str) -> Result<bool, StorageError> {
        let rows = self
            .conn
            .execute("DELETE FROM nodes WHERE node_id = ?1", params![node_id])?;
        Ok(rows > 0)
    }

    fn delete_nodes_by_flow(&mut self, flow_id: &str) -> Result<usize, StorageError> {
        let rows = self
            .conn
            .execute("DELETE FROM nodes WHERE flow_id = ?1", params![flow_id])?;
        Ok(rows)
    }

    // -------------------------------------------------------------------
    // Flow repository
    // -------------------------------------------------------------------

    fn get_flow(&self, flow_id: &str) -> Result<Option<Flow>, StorageError> {
        Self::select_flow(&self.conn, flow_id)
    }

    fn list_flows(&self, page: Page) -> Result<Vec<Flow>, StorageError> {
        let mut stmt = self.conn.prepare_cached(&format!(
            "SELECT {FLOW_COLUMNS} FROM flows ORDER BY rowid LIMIT ?1 OFFSET ?2"
        ))?;
        let rows = stmt.query_map(params![page.limit, page.skip], read_flow)?;
        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }
        Ok(result)
    }

    fn create_flow(&mut self, flow: FlowCreate) -> Result<Flow, StorageError> {
        let flow = Flow::from_create(flow, Utc::now());
        let result = self.conn.execute(
            &format!("INSERT INTO flows ({FLOW_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5)"),
            params![
                flow.flow_id,
                flow.name,
                flow.description,
                flow.created_at,
                flow.updated_at,
            ],
        );
        match result {
            Ok(_) => Ok(flow),
            Err(err) if is_duplicate_key(&err) => Err(StorageError::DuplicateFlow(flow.flow_id)),
            Err(err) => Err(err.into()),
        }
    }

    fn update_flow(&mut self, flow_id: &str, update: FlowUpdate) -> Result<Flow, StorageError> {
        let tx = self.conn.transaction()?;
        let Some(mut flow) = Self::select_flow(&tx, flow_id)? else {
            return Err(StorageError::FlowNotFound(flow_id.to_string()));
        };
        flow.apply(update, Utc::now());
        tx.execute(
            "UPDATE flows SET name = ?2, description = ?3, updated_at = ?4 WHERE flow_id = ?1",
            params![flow.flow_id, flow.name, flow.description, flow.updated_at],
        )?;
        tx.commit()?;
        Ok(flow)
    }

    fn delete_flow(&mut self, flow_id: &str) -> Result<bool, StorageError> {
        let rows = self
            .conn
            .execute("DELETE FROM flows WHERE flow_id = ?1", params![flow_id])?;
        Ok(rows > 0)
    }
}
