//! Flows: named collections of nodes representing one diagram.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::patch::Patch;

/// A stored flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flow {
    /// Caller-supplied unique identifier.
    pub flow_id: String,
    /// Display name.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Set by storage on insert.
    pub created_at: DateTime<Utc>,
    /// Set by storage on every update; `None` until the first one.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for creating a flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowCreate {
    pub flow_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl FlowCreate {
    pub fn new(flow_id: impl Into<String>, name: impl Into<String>) -> Self {
        FlowCreate {
            flow_id: flow_id.into(),
            name: name.into(),
            description: None,
        }
    }
}

/// Partial update of a flow. An explicit `"description": null` clears the
/// description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowUpdate {
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub name: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub description: Patch<Option<String>>,
}

impl Flow {
    /// Materializes a create payload with the storage-assigned timestamp.
    pub fn from_create(create: FlowCreate, created_at: DateTime<Utc>) -> Self {
        Flow {
            flow_id: create.flow_id,
            name: create.name,
            description: create.description,
            created_at,
            updated_at: None,
        }
    }

    /// Merges the supplied fields of `update` and stamps `updated_at`.
    pub fn apply(&mut self, update: FlowUpdate, updated_at: DateTime<Utc>) {
        update.name.apply_to(&mut self.name);
        update.description.apply_to(&mut self.description);
        self.updated_at = Some(updated_at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn flow() -> Flow {
        let mut create = FlowCreate::new("f1", "Ingest");
        create.description = Some("reads sensors".into());
        Flow::from_create(create, Utc::now())
    }

    #[test]
    fn missing_description_keeps_value() {
        let mut flow = flow();
        let update: FlowUpdate = serde_json::from_value(json!({ "name": "Renamed" })).unwrap();
        flow.apply(update, Utc::now());
        assert_eq!(flow.name, "Renamed");
        assert_eq!(flow.description.as_deref(), Some("reads sensors"));
        assert!(flow.updated_at.is_some());
    }

    #[test]
    fn null_description_clears_value() {
        let mut flow = flow();
        let update: FlowUpdate = serde_json::from_value(json!({ "description": null })).unwrap();
        flow.apply(update, Utc::now());
        assert_eq!(flow.name, "Ingest");
        assert_eq!(flow.description, None);
    }
}
