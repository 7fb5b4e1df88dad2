//! Legacy graph handlers: create and fetch nodes and edges.
//!
//! These endpoints have no update, list or delete counterparts.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use krok_core::{GraphEdge, GraphNode};
use krok_storage::StorageError;

use crate::error::ApiError;
use crate::schema::common::StatusResponse;
use crate::state::AppState;

fn created() -> (StatusCode, Json<StatusResponse>) {
    (
        StatusCode::CREATED,
        Json(StatusResponse {
            status: "success".to_string(),
        }),
    )
}

/// `POST /node`
pub async fn create_node(
    State(state): State<AppState>,
    body: Result<Json<GraphNode>, JsonRejection>,
) -> Result<(StatusCode, Json<StatusResponse>), ApiError> {
    let Json(node) = body?;
    node.validate()?;
    state.graph.insert_node(&node).map_err(|err| match err {
        StorageError::DuplicateGraphNode(_) => {
            ApiError::BadRequest("Node ID already exists".to_string())
        }
        other => other.into(),
    })?;
    tracing::info!(id = %node.id, "created graph node");
    Ok(created())
}

/// `GET /node/{id}`
pub async fn get_node(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<GraphNode>, ApiError> {
    let Path(id) = path?;
    state
        .graph
        .get_node(&id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Node not found".to_string()))
}

/// `POST /edge`
///
/// `source` and `target` are not checked against existing nodes.
pub async fn create_edge(
    State(state): State<AppState>,
    body: Result<Json<GraphEdge>, JsonRejection>,
) -> Result<(StatusCode, Json<StatusResponse>), ApiError> {
    let Json(edge) = body?;
    edge.validate()?;
    state.graph.insert_edge(&edge).map_err(|err| match err {
        StorageError::DuplicateGraphEdge(_) => {
            ApiError::BadRequest("Edge ID already exists".to_string())
        }
        other => other.into(),
    })?;
    tracing::info!(id = %edge.id, source = %edge.source, target = %edge.target, "created graph edge");
    Ok(created())
}

/// `GET /edge/{id}`
pub async fn get_edge(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<GraphEdge>, ApiError> {
    let Path(id) = path?;
    state
        .graph
        .get_edge(&id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Edge not found".to_string()))
}
