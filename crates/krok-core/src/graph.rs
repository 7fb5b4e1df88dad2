//! Legacy graph model: nodes and directed edges with opaque JSON payloads.
//!
//! Edge endpoints name node ids but are not checked against stored nodes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::properties::validate_payload;

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

/// A legacy graph node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    #[serde(default = "empty_object")]
    pub data: Value,
}

/// A legacy directed edge between two node ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default = "empty_object")]
    pub data: Value,
}

impl GraphNode {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_payload("data", &self.data)
    }
}

impl GraphEdge {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_payload("data", &self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn data_defaults_to_empty_object() {
        let node: GraphNode = serde_json::from_value(json!({ "id": "a" })).unwrap();
        assert_eq!(node.data, json!({}));

        let edge: GraphEdge =
            serde_json::from_value(json!({ "id": "e", "source": "a", "target": "b" })).unwrap();
        assert_eq!(edge.data, json!({}));
    }

    #[test]
    fn edge_requires_endpoints() {
        let result: Result<GraphEdge, _> =
            serde_json::from_value(json!({ "id": "e", "source": "a" }));
        assert!(result.is_err());
    }
}
