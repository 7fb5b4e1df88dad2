//! Flow-editor nodes.
//!
//! A [`Node`] is a positioned, typed entity belonging to a flow and carrying
//! status/health metadata. Nodes are created from a [`NodeCreate`] payload
//! and modified through a [`NodeUpdate`], which only touches the fields the
//! caller supplied.
//!
//! `flow_id` is a reference by convention only: a node may name a flow that
//! does not exist, and deleting a flow leaves its nodes in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::patch::Patch;
use crate::properties::{validate_properties, Properties};

/// Status assigned to nodes created without one.
pub const DEFAULT_NODE_STATUS: &str = "unknown";

fn default_status() -> String {
    DEFAULT_NODE_STATUS.to_string()
}

/// A stored flow-editor node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Caller-supplied unique identifier.
    pub node_id: String,
    /// Identifier of the owning flow.
    pub flow_id: String,
    /// Type tag, e.g. "source" or "function".
    pub node_type: String,
    /// Display name.
    pub name: String,
    /// Free-form node configuration.
    pub properties: Properties,
    /// Canvas x coordinate.
    pub position_x: i64,
    /// Canvas y coordinate.
    pub position_y: i64,
    /// Runtime status label.
    pub status: String,
    /// Health score.
    pub health: i64,
    /// Set by storage on insert.
    pub created_at: DateTime<Utc>,
    /// Set by storage on every update; `None` until the first one.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for creating a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeCreate {
    pub node_id: String,
    pub flow_id: String,
    pub node_type: String,
    pub name: String,
    #[serde(default)]
    pub properties: Properties,
    #[serde(default)]
    pub position_x: i64,
    #[serde(default)]
    pub position_y: i64,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub health: i64,
}

impl NodeCreate {
    /// Builds a payload with the given identity and every optional field at
    /// its default.
    pub fn new(
        node_id: impl Into<String>,
        flow_id: impl Into<String>,
        node_type: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        NodeCreate {
            node_id: node_id.into(),
            flow_id: flow_id.into(),
            node_type: node_type.into(),
            name: name.into(),
            properties: Properties::new(),
            position_x: 0,
            position_y: 0,
            status: default_status(),
            health: 0,
        }
    }

    /// Checks the property map bounds.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_properties("properties", &self.properties)
    }
}

/// Partial update of a node. Identity fields (`node_id`, `flow_id`,
/// `node_type`) cannot be changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeUpdate {
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub name: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub properties: Patch<Properties>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub position_x: Patch<i64>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub position_y: Patch<i64>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub status: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub health: Patch<i64>,
}

impl NodeUpdate {
    /// Checks the property map bounds when properties are being replaced.
    pub fn validate(&self) -> Result<(), CoreError> {
        match self.properties.as_set() {
            Some(properties) => validate_properties("properties", properties),
            None => Ok(()),
        }
    }
}

impl Node {
    /// Materializes a create payload with the storage-assigned timestamp.
    pub fn from_create(create: NodeCreate, created_at: DateTime<Utc>) -> Self {
        Node {
            node_id: create.node_id,
            flow_id: create.flow_id,
            node_type: create.node_type,
            name: create.name,
            properties: create.properties,
            position_x: create.position_x,
            position_y: create.position_y,
            status: create.status,
            health: create.health,
            created_at,
            updated_at: None,
        }
    }

    /// Merges the supplied fields of `update` into this node and stamps
    /// `updated_at`.
    pub fn apply(&mut self, update: NodeUpdate, updated_at: DateTime<Utc>) {
        let NodeUpdate {
            name,
            properties,
            position_x,
            position_y,
            status,
            health,
        } = update;

        name.apply_to(&mut self.name);
        properties.apply_to(&mut self.properties);
        position_x.apply_to(&mut self.position_x);
        position_y.apply_to(&mut self.position_y);
        status.apply_to(&mut self.status);
        health.apply_to(&mut self.health);
        self.updated_at = Some(updated_at);
    }
}
