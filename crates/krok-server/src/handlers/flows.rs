//! Flow handlers (list, get, create, update, delete).
//!
//! Deleting a flow does not touch its nodes; clients call
//! `DELETE /nodes/flow/{flow_id}` for that.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use krok_core::{Flow, FlowCreate, FlowUpdate};
use krok_storage::StorageError;

use crate::error::ApiError;
use crate::schema::common::{MessageResponse, PageQuery};
use crate::state::AppState;

/// `GET /flows?skip=&limit=`
pub async fn list_flows(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<Vec<Flow>>, ApiError> {
    let Query(query) = query?;
    let store = state.store.lock().await;
    let flows = store.list_flows(query.into())?;
    Ok(Json(flows))
}

/// `GET /flows/{flow_id}`
pub async fn get_flow(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Flow>, ApiError> {
    let Path(flow_id) = path?;
    let store = state.store.lock().await;
    match store.get_flow(&flow_id)? {
        Some(flow) => Ok(Json(flow)),
        None => Err(StorageError::FlowNotFound(flow_id).into()),
    }
}

/// `POST /flows`
pub async fn create_flow(
    State(state): State<AppState>,
    body: Result<Json<FlowCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<Flow>), ApiError> {
    let Json(req) = body?;

    let mut store = state.store.lock().await;
    if store.get_flow(&req.flow_id)?.is_some() {
        tracing::warn!(flow_id = %req.flow_id, "rejected duplicate flow id");
        return Err(StorageError::DuplicateFlow(req.flow_id).into());
    }
    let flow = store.create_flow(req)?;
    tracing::info!(flow_id = %flow.flow_id, "created flow");
    Ok((StatusCode::CREATED, Json(flow)))
}

/// `PUT /flows/{flow_id}`
pub async fn update_flow(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<FlowUpdate>, JsonRejection>,
) -> Result<Json<Flow>, ApiError> {
    let Path(flow_id) = path?;
    let Json(update) = body?;
    let mut store = state.store.lock().await;
    let flow = store.update_flow(&flow_id, update)?;
    tracing::info!(flow_id = %flow.flow_id, "updated flow");
    Ok(Json(flow))
}

/// `DELETE /flows/{flow_id}`
pub async fn delete_flow(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(flow_id) = path?;
    let mut store = state.store.lock().await;
    if !store.delete_flow(&flow_id)? {
        return Err(StorageError::FlowNotFound(flow_id).into());
    }
    tracing::info!(flow_id = %flow_id, "deleted flow");
    Ok(Json(MessageResponse::new("Flow deleted successfully")))
}
