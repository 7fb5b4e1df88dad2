//! Liveness probes.

use axum::extract::State;
use axum::Json;

use crate::schema::common::{MessageResponse, StatusResponse};
use crate::state::AppState;

/// `GET /`
pub async fn root(State(state): State<AppState>) -> Json<MessageResponse> {
    Json(MessageResponse::new(state.settings.project_name.clone()))
}

/// `GET /health`
pub async fn health() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "healthy".to_string(),
    })
}
