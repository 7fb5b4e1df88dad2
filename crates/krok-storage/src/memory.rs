//! In-memory implementation of [`FlowStore`].
//!
//! [`InMemoryStore`] is a first-class backend for tests and ephemeral
//! servers. Entities live in insertion-ordered maps so listings and paging
//! behave exactly like the SQLite backend.

use chrono::Utc;
use indexmap::IndexMap;

use krok_core::{Flow, FlowCreate, FlowUpdate, Node, NodeCreate, NodeUpdate};

use crate::error::StorageError;
use crate::traits::FlowStore;
use crate::types::Page;

/// Non-persistent [`FlowStore`] backed by insertion-ordered maps.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    nodes: IndexMap<String, Node>,
    flows: IndexMap<String, Flow>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn page<'a, T: Clone + 'a>(items: impl Iterator<Item = &'a T>, page: Page) -> Vec<T> {
    items
        .skip(page.skip as usize)
        .take(page.limit as usize)
        .cloned()
        .collect()
}

impl FlowStore for InMemoryStore {
    fn get_node(&self, node_id: &str) -> Result<Option<Node>, StorageError> {
        Ok(self.nodes.get(node_id).cloned())
    }

    fn list_nodes(&self, p: Page) -> Result<Vec<Node>, StorageError> {
        Ok(page(self.nodes.values(), p))
    }

    fn list_nodes_by_flow(&self, flow_id: &str, p: Page) -> Result<Vec<Node>, StorageError> {
        Ok(page(
            self.nodes.values().filter(|node| node.flow_id == flow_id),
            p,
        ))
    }

    fn create_node(&mut self, node: NodeCreate) -> Result<Node, StorageError> {
        node.validate()?;
        if self.nodes.contains_key(&node.node_id) {
            return Err(StorageError::DuplicateNode(node.node_id));
        }
        let node = Node::from_create(node, Utc::now());
        self.nodes.insert(node.node_id.clone(), node.clone());
        Ok(node)
    }

    fn update_node(&mut self, node_id: &str, update: NodeUpdate) -> Result<Node, StorageError> {
        update.validate()?;
        let node = self
            .nodes
            .get_mut(node_id)
            .ok_or_else(|| StorageError::NodeNotFound(node_id.to_string()))?;
        node.apply(update, Utc::now());
        Ok(node.clone())
    }

    fn delete_node(&mut self, node_id: &str) -> Result<bool, StorageError> {
        Ok(self.nodes.shift_remove(node_id).is_some())
    }

    fn delete_nodes_by_flow(&mut self, flow_id: &str) -> Result<usize, StorageError> {
        let before = self.nodes.len();
        self.nodes.retain(|_, node| node.flow_id != flow_id);
        Ok(before - self.nodes.len())
    }

    fn get_flow(&self, flow_id: &str) -> Result<Option<Flow>, StorageError> {
        Ok(self.flows.get(flow_id).cloned())
    }

    fn list_flows(&self, p: Page) -> Result<Vec<Flow>, StorageError> {
        Ok(page(self.flows.values(), p))
    }

    fn create_flow(&mut self, flow: FlowCreate) -> Result<Flow, StorageError> {
        if self.flows.contains_key(&flow.flow_id) {
            return Err(StorageError::DuplicateFlow(flow.flow_id));
        }
        let flow = Flow::from_create(flow, Utc::now());
        self.flows.insert(flow.flow_id.clone(), flow.clone());
        Ok(flow)
    }

    fn update_flow(&mut self, flow_id: &str, update: FlowUpdate) -> Result<Flow, StorageError> {
        let flow = self
            .flows
            .get_mut(flow_id)
            .ok_or_else(|| StorageError::FlowNotFound(flow_id.to_string()))?;
        flow.apply(update, Utc::now());
        Ok(flow.clone())
    }

    fn delete_flow(&mut self, flow_id: &str) -> Result<bool, StorageError> {
        Ok(self.flows.shift_remove(flow_id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conformance;

    #[test]
    fn node_round_trip() {
        conformance::node_round_trip(&mut InMemoryStore::new());
    }

    #[test]
    fn duplicate_node_rejected() {
        conformance::duplicate_node_rejected(&mut InMemoryStore::new());
    }

    #[test]
    fn node_partial_update() {
        conformance::node_partial_update(&mut InMemoryStore::new());
    }

    #[test]
    fn missing_node_update_and_delete() {
        conformance::missing_node_update_and_delete(&mut InMemoryStore::new());
    }

    #[test]
    fn nodes_listed_in_insertion_order_with_paging() {
        conformance::nodes_listed_in_insertion_order_with_paging(&mut InMemoryStore::new());
    }

    #[test]
    fn delete_nodes_by_flow_counts_matches() {
        conformance::delete_nodes_by_flow_counts_matches(&mut InMemoryStore::new());
    }

    #[test]
    fn flow_lifecycle() {
        conformance::flow_lifecycle(&mut InMemoryStore::new());
    }

    #[test]
    fn deleting_flow_keeps_nodes() {
        conformance::deleting_flow_keeps_nodes(&mut InMemoryStore::new());
    }

    #[test]
    fn oversized_properties_rejected() {
        conformance::oversized_properties_rejected(&mut InMemoryStore::new());
    }
}
