//! API error types with HTTP status code mapping.
//!
//! [`ApiError`] is the unified error type for all API endpoints. It implements
//! `axum::response::IntoResponse` to produce structured JSON error responses
//! with appropriate HTTP status codes.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use krok_core::CoreError;
use krok_storage::StorageError;

/// Structured error detail in API responses.
#[derive(Debug, Clone, Serialize)]
pub struct ApiErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "BAD_REQUEST").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional structured details (e.g., validation errors).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// One rejected piece of request input.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    /// The offending field, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(message: impl Into<String>) -> Self {
        ValidationIssue {
            field: None,
            message: message.into(),
        }
    }
}

/// API errors with HTTP status code mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Entity not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Invalid request, including identifier collisions on create (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Request body or query failed validation (422).
    #[error("validation failed")]
    ValidationFailed(Vec<ValidationIssue>),

    /// Internal server error (500).
    #[error("internal error: {0}")]
    InternalError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            ApiError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ApiErrorDetail {
                    code: "NOT_FOUND".to_string(),
                    message: msg.clone(),
                    details: None,
                },
            ),
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ApiErrorDetail {
                    code: "BAD_REQUEST".to_string(),
                    message: msg.clone(),
                    details: None,
                },
            ),
            ApiError::ValidationFailed(issues) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiErrorDetail {
                    code: "VALIDATION_FAILED".to_string(),
                    message: format!("{} validation error(s)", issues.len()),
                    details: serde_json::to_value(issues).ok(),
                },
            ),
            ApiError::InternalError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message: msg.clone(),
                    details: None,
                },
            ),
        };

        let body = serde_json::json!({
            "success": false,
            "error": detail,
        });

        (status, axum::Json(body)).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError::ValidationFailed(vec![ValidationIssue {
            field: Some(err.field().to_string()),
            message: err.to_string(),
        }])
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NodeNotFound(_) | StorageError::FlowNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            StorageError::DuplicateNode(_)
            | StorageError::DuplicateFlow(_)
            | StorageError::DuplicateGraphNode(_)
            | StorageError::DuplicateGraphEdge(_) => ApiError::BadRequest(err.to_string()),
            StorageError::Core(core) => core.into(),
            _ => {
                tracing::error!(error = %err, "storage failure");
                ApiError::InternalError(err.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!(error = %rejection.body_text(), "rejected request body");
        ApiError::ValidationFailed(vec![ValidationIssue::new(rejection.body_text())])
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::warn!(error = %rejection.body_text(), "rejected query string");
        ApiError::ValidationFailed(vec![ValidationIssue::new(rejection.body_text())])
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::warn!(error = %rejection.body_text(), "rejected path parameter");
        ApiError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_errors_map_to_status_codes() {
        let cases = [
            (StorageError::NodeNotFound("n".into()), StatusCode::NOT_FOUND),
            (StorageError::FlowNotFound("f".into()), StatusCode::NOT_FOUND),
            (StorageError::DuplicateNode("n".into()), StatusCode::BAD_REQUEST),
            (StorageError::DuplicateGraphEdge("e".into()), StatusCode::BAD_REQUEST),
            (
                StorageError::Migration("broken".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                StorageError::Core(CoreError::PropertiesTooDeep {
                    field: "properties",
                    depth: 20,
                    max: 16,
                }),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
        ];
        for (err, expected) in cases {
            let response = ApiError::from(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }
}
