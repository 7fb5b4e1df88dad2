//! Node handlers (list, get, create, update, delete, delete by flow).

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use krok_core::{Node, NodeCreate, NodeUpdate};
use krok_storage::StorageError;

use crate::error::ApiError;
use crate::schema::common::MessageResponse;
use crate::schema::nodes::ListNodesQuery;
use crate::state::AppState;

/// Lists nodes, optionally restricted to one flow.
///
/// `GET /nodes?flow_id=&skip=&limit=`
pub async fn list_nodes(
    State(state): State<AppState>,
    query: Result<Query<ListNodesQuery>, QueryRejection>,
) -> Result<Json<Vec<Node>>, ApiError> {
    let Query(query) = query?;
    let store = state.store.lock().await;
    let nodes = match query.flow_filter() {
        Some(flow_id) => store.list_nodes_by_flow(flow_id, query.page())?,
        None => store.list_nodes(query.page())?,
    };
    tracing::debug!(count = nodes.len(), flow_id = ?query.flow_filter(), "listed nodes");
    Ok(Json(nodes))
}

/// Returns a single node.
///
/// `GET /nodes/{node_id}`
pub async fn get_node(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Node>, ApiError> {
    let Path(node_id) = path?;
    let store = state.store.lock().await;
    match store.get_node(&node_id)? {
        Some(node) => Ok(Json(node)),
        None => Err(StorageError::NodeNotFound(node_id).into()),
    }
}

/// Creates a node. The id is checked for collisions before the insert.
///
/// `POST /nodes`
pub async fn create_node(
    State(state): State<AppState>,
    body: Result<Json<NodeCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<Node>), ApiError> {
    let Json(req) = body?;
    req.validate()?;

    let mut store = state.store.lock().await;
    if store.get_node(&req.node_id)?.is_some() {
        tracing::warn!(node_id = %req.node_id, "rejected duplicate node id");
        return Err(StorageError::DuplicateNode(req.node_id).into());
    }
    let node = store.create_node(req)?;
    tracing::info!(node_id = %node.node_id, flow_id = %node.flow_id, "created node");
    Ok((StatusCode::CREATED, Json(node)))
}

/// Applies a partial update to a node.
///
/// `PUT /nodes/{node_id}`
pub async fn update_node(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<NodeUpdate>, JsonRejection>,
) -> Result<Json<Node>, ApiError> {
    let Path(node_id) = path?;
    let Json(update) = body?;
    update.validate()?;

    let mut store = state.store.lock().await;
    let node = store.update_node(&node_id, update)?;
    tracing::info!(node_id = %node.node_id, "updated node");
    Ok(Json(node))
}

/// Deletes a node.
///
/// `DELETE /nodes/{node_id}`
pub async fn delete_node(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(node_id) = path?;
    let mut store = state.store.lock().await;
    if !store.delete_node(&node_id)? {
        return Err(StorageError::NodeNotFound(node_id).into());
    }
    tracing::info!(node_id = %node_id, "deleted node");
    Ok(Json(MessageResponse::new("Node deleted successfully")))
}

/// Deletes every node of a flow. Succeeds even when nothing matched.
///
/// `DELETE /nodes/flow/{flow_id}`
pub async fn delete_nodes_by_flow(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(flow_id) = path?;
    let mut store = state.store.lock().await;
    let count = store.delete_nodes_by_flow(&flow_id)?;
    tracing::info!(flow_id = %flow_id, count, "deleted nodes of flow");
    Ok(Json(MessageResponse::new(format!("Deleted {count} nodes"))))
}
