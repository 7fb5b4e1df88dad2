//! The [`FlowStore`] trait defining the repository contract for nodes and
//! flows.
//!
//! Every method maps to one logical statement against storage: a single-row
//! read or write, or a filtered multi-row read/delete. Listings return rows
//! in insertion order. Timestamps are assigned by the store.
//!
//! Both backends ([`SqliteStore`](crate::SqliteStore) and
//! [`InMemoryStore`](crate::InMemoryStore)) implement this trait with
//! identical semantics, so they are swappable behind `Box<dyn FlowStore>`.

use krok_core::{Flow, FlowCreate, FlowUpdate, Node, NodeCreate, NodeUpdate};

use crate::error::StorageError;
use crate::types::Page;

/// The storage contract for flow-editor entities.
///
/// The trait is synchronous; callers serialize access to a store instance.
pub trait FlowStore: Send {
    // -------------------------------------------------------------------
    // Node repository
    // -------------------------------------------------------------------

    /// Retrieves a node by id, or `None` if absent.
    fn get_node(&self, node_id: &str) -> Result<Option<Node>, StorageError>;

    /// Lists nodes across all flows.
    fn list_nodes(&self, page: Page) -> Result<Vec<Node>, StorageError>;

    /// Lists the nodes whose `flow_id` equals `flow_id`.
    fn list_nodes_by_flow(&self, flow_id: &str, page: Page) -> Result<Vec<Node>, StorageError>;

    /// Persists a new node.
    ///
    /// Fails with [`StorageError::DuplicateNode`] if the id is taken.
    fn create_node(&mut self, node: NodeCreate) -> Result<Node, StorageError>;

    /// Merges the supplied fields into an existing node.
    ///
    /// Fails with [`StorageError::NodeNotFound`] if the id is absent.
    fn update_node(&mut self, node_id: &str, update: NodeUpdate) -> Result<Node, StorageError>;

    /// Deletes a node. Returns `false` if it did not exist.
    fn delete_node(&mut self, node_id: &str) -> Result<bool, StorageError>;

    /// Deletes every node of a flow and returns how many were removed.
    fn delete_nodes_by_flow(&mut self, flow_id: &str) -> Result<usize, StorageError>;

    // -------------------------------------------------------------------
    // Flow repository
    // -------------------------------------------------------------------

    /// Retrieves a flow by id, or `None` if absent.
    fn get_flow(&self, flow_id: &str) -> Result<Option<Flow>, StorageError>;

    /// Lists flows.
    fn list_flows(&self, page: Page) -> Result<Vec<Flow>, StorageError>;

    /// Persists a new flow.
    ///
    /// Fails with [`StorageError::DuplicateFlow`] if the id is taken.
    fn create_flow(&mut self, flow: FlowCreate) -> Result<Flow, StorageError>;

    /// Merges the supplied fields into an existing flow.
    ///
    /// Fails with [`StorageError::FlowNotFound`] if the id is absent.
    fn update_flow(&mut self, flow_id: &str, update: FlowUpdate) -> Result<Flow, StorageError>;

    /// Deletes a flow. Its nodes are left in place. Returns `false` if the
    /// flow did not exist.
    fn delete_flow(&mut self, flow_id: &str) -> Result<bool, StorageError>;
}
