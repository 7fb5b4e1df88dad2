//! OpenAPI 3 description of the flow and node API.
//!
//! Served at `{api_prefix}/openapi.json`. Paths are written with the
//! configured prefix so the document matches the mounted routes.

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::config::Settings;
use crate::state::AppState;

/// `GET {prefix}/openapi.json`
pub async fn openapi_spec(State(state): State<AppState>) -> Json<Value> {
    Json(openapi_document(&state.settings))
}

fn schema_ref(name: &str) -> Value {
    json!({ "$ref": format!("#/components/schemas/{name}") })
}

fn json_response(description: &str, schema: Value) -> Value {
    json!({
        "description": description,
        "content": { "application/json": { "schema": schema } }
    })
}

fn error_response(description: &str) -> Value {
    json_response(description, schema_ref("ErrorResponse"))
}

fn json_body(name: &str) -> Value {
    json!({
        "required": true,
        "content": { "application/json": { "schema": schema_ref(name) } }
    })
}

fn path_param(name: &str) -> Value {
    json!({ "name": name, "in": "path", "required": true, "schema": { "type": "string" } })
}

fn paging_params() -> Vec<Value> {
    vec![
        json!({
            "name": "skip", "in": "query", "required": false,
            "schema": { "type": "integer", "minimum": 0, "default": 0 }
        }),
        json!({
            "name": "limit", "in": "query", "required": false,
            "schema": { "type": "integer", "minimum": 0, "default": 100 }
        }),
    ]
}

/// Builds the document for `settings`.
pub fn openapi_document(settings: &Settings) -> Value {
    let prefix = settings.api_prefix.as_str();

    let mut list_nodes_params = vec![json!({
        "name": "flow_id", "in": "query", "required": false,
        "description": "Only nodes of this flow; empty means all nodes",
        "schema": { "type": "string" }
    })];
    list_nodes_params.extend(paging_params());

    let paths = json!({
        "/": {
            "get": {
                "tags": ["Health"],
                "summary": "Service name",
                "operationId": "read_root",
                "responses": { "200": json_response("Service name", schema_ref("MessageResponse")) }
            }
        },
        "/health": {
            "get": {
                "tags": ["Health"],
                "summary": "Liveness probe",
                "operationId": "health_check",
                "responses": { "200": json_response("Service is healthy", schema_ref("StatusResponse")) }
            }
        },
        format!("{prefix}/nodes"): {
            "get": {
                "tags": ["nodes"],
                "summary": "List nodes",
                "operationId": "list_nodes",
                "parameters": list_nodes_params,
                "responses": {
                    "200": json_response("Nodes in insertion order", json!({ "type": "array", "items": schema_ref("Node") })),
                    "422": error_response("Invalid query")
                }
            },
            "post": {
                "tags": ["nodes"],
                "summary": "Create a node",
                "operationId": "create_node",
                "requestBody": json_body("NodeCreate"),
                "responses": {
                    "201": json_response("Created node", schema_ref("Node")),
                    "400": error_response("Node id already exists"),
                    "422": error_response("Invalid body")
                }
            }
        },
        format!("{prefix}/nodes/{{node_id}}"): {
            "parameters": [path_param("node_id")],
            "get": {
                "tags": ["nodes"],
                "summary": "Get a node",
                "operationId": "get_node",
                "responses": {
                    "200": json_response("The node", schema_ref("Node")),
                    "404": error_response("Node not found")
                }
            },
            "put": {
                "tags": ["nodes"],
                "summary": "Update a node; omitted fields are kept",
                "operationId": "update_node",
                "requestBody": json_body("NodeUpdate"),
                "responses": {
                    "200": json_response("Updated node", schema_ref("Node")),
                    "404": error_response("Node not found"),
                    "422": error_response("Invalid body")
                }
            },
            "delete": {
                "tags": ["nodes"],
                "summary": "Delete a node",
                "operationId": "delete_node",
                "responses": {
                    "200": json_response("Deleted", schema_ref("MessageResponse")),
                    "404": error_response("Node not found")
                }
            }
        },
        format!("{prefix}/nodes/flow/{{flow_id}}"): {
            "parameters": [path_param("flow_id")],
            "delete": {
                "tags": ["nodes"],
                "summary": "Delete every node of a flow",
                "operationId": "delete_nodes_by_flow",
                "responses": { "200": json_response("Number of deleted nodes", schema_ref("MessageResponse")) }
            }
        },
        format!("{prefix}/flows"): {
            "get": {
                "tags": ["flows"],
                "summary": "List flows",
                "operationId": "list_flows",
                "parameters": paging_params(),
                "responses": {
                    "200": json_response("Flows in insertion order", json!({ "type": "array", "items": schema_ref("Flow") })),
                    "422": error_response("Invalid query")
                }
            },
            "post": {
                "tags": ["flows"],
                "summary": "Create a flow",
                "operationId": "create_flow",
                "requestBody": json_body("FlowCreate"),
                "responses": {
                    "201": json_response("Created flow", schema_ref("Flow")),
                    "400": error_response("Flow id already exists"),
                    "422": error_response("Invalid body")
                }
            }
        },
        format!("{prefix}/flows/{{flow_id}}"): {
            "parameters": [path_param("flow_id")],
            "get": {
                "tags": ["flows"],
                "summary": "Get a flow",
                "operationId": "get_flow",
                "responses": {
                    "200": json_response("The flow", schema_ref("Flow")),
                    "404": error_response("Flow not found")
                }
            },
            "put": {
                "tags": ["flows"],
                "summary": "Update a flow; omitted fields are kept",
                "operationId": "update_flow",
                "requestBody": json_body("FlowUpdate"),
                "responses": {
                    "200": json_response("Updated flow", schema_ref("Flow")),
                    "404": error_response("Flow not found"),
                    "422": error_response("Invalid body")
                }
            },
            "delete": {
                "tags": ["flows"],
                "summary": "Delete a flow; its nodes are kept",
                "operationId": "delete_flow",
                "responses": {
                    "200": json_response("Deleted", schema_ref("MessageResponse")),
                    "404": error_response("Flow not found")
                }
            }
        }
    });

    json!({
        "openapi": "3.0.3",
        "info": {
            "title": settings.project_name,
            "version": env!("CARGO_PKG_VERSION")
        },
        "servers": [{ "url": "/", "description": "Current server" }],
        "tags": [
            { "name": "Health", "description": "Liveness probes" },
            { "name": "nodes", "description": "Flow editor nodes" },
            { "name": "flows", "description": "Flows grouping nodes" }
        ],
        "paths": paths,
        "components": { "schemas": component_schemas() }
    })
}

fn component_schemas() -> Value {
    let timestamp = json!({ "type": "string", "format": "date-time" });
    let nullable_timestamp = json!({ "type": "string", "format": "date-time", "nullable": true });
    let properties = json!({
        "type": "object",
        "additionalProperties": true,
        "maxProperties": krok_core::MAX_PROPERTY_KEYS
    });

    json!({
        "Node": {
            "type": "object",
            "required": [
                "node_id", "flow_id", "node_type", "name", "properties",
                "position_x", "position_y", "status", "health", "created_at"
            ],
            "properties": {
                "node_id": { "type": "string" },
                "flow_id": { "type": "string" },
                "node_type": { "type": "string" },
                "name": { "type": "string" },
                "properties": properties,
                "position_x": { "type": "integer" },
                "position_y": { "type": "integer" },
                "status": { "type": "string" },
                "health": { "type": "integer" },
                "created_at": timestamp,
                "updated_at": nullable_timestamp
            }
        },
        "NodeCreate": {
            "type": "object",
            "required": ["node_id", "flow_id", "node_type", "name"],
            "properties": {
                "node_id": { "type": "string" },
                "flow_id": { "type": "string" },
                "node_type": { "type": "string" },
                "name": { "type": "string" },
                "properties": properties,
                "position_x": { "type": "integer", "default": 0 },
                "position_y": { "type": "integer", "default": 0 },
                "status": { "type": "string", "default": krok_core::DEFAULT_NODE_STATUS },
                "health": { "type": "integer", "default": 0 }
            }
        },
        "NodeUpdate": {
            "type": "object",
            "properties": {
                "name": { "type": "string" },
                "properties": properties,
                "position_x": { "type": "integer" },
                "position_y": { "type": "integer" },
                "status": { "type": "string" },
                "health": { "type": "integer" }
            }
        },
        "Flow": {
            "type": "object",
            "required": ["flow_id", "name", "created_at"],
            "properties": {
                "flow_id": { "type": "string" },
                "name": { "type": "string" },
                "description": { "type": "string", "nullable": true },
                "created_at": timestamp,
                "updated_at": nullable_timestamp
            }
        },
        "FlowCreate": {
            "type": "object",
            "required": ["flow_id", "name"],
            "properties": {
                "flow_id": { "type": "string" },
                "name": { "type": "string" },
                "description": { "type": "string", "nullable": true }
            }
        },
        "FlowUpdate": {
            "type": "object",
            "properties": {
                "name": { "type": "string" },
                "description": { "type": "string", "nullable": true }
            }
        },
        "MessageResponse": {
            "type": "object",
            "required": ["message"],
            "properties": { "message": { "type": "string" } }
        },
        "StatusResponse": {
            "type": "object",
            "required": ["status"],
            "properties": { "status": { "type": "string" } }
        },
        "ErrorResponse": {
            "type": "object",
            "required": ["success", "error"],
            "properties": {
                "success": { "type": "boolean" },
                "error": {
                    "type": "object",
                    "required": ["code", "message"],
                    "properties": {
                        "code": {
                            "type": "string",
                            "enum": ["NOT_FOUND", "BAD_REQUEST", "VALIDATION_FAILED", "INTERNAL_ERROR"]
                        },
                        "message": { "type": "string" },
                        "details": {}
                    }
                }
            }
        }
    })
}
