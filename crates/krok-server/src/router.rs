//! Router assembly for the Krok HTTP API.
//!
//! [`build_router`] wires all handler functions to their routes with
//! CORS and tracing middleware layers.

use axum::http::HeaderValue;
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Settings;
use crate::handlers;
use crate::state::AppState;

/// Builds the complete axum router with all API routes.
///
/// Flow and node routes, and the OpenAPI document describing them, are
/// nested under `settings.api_prefix`; the legacy graph routes and the probes
/// live at the root. Routes use axum 0.8 `/{param}` path syntax.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        // Nodes
        .route(
            "/nodes",
            get(handlers::nodes::list_nodes).post(handlers::nodes::create_node),
        )
        .route(
            "/nodes/{node_id}",
            get(handlers::nodes::get_node)
                .put(handlers::nodes::update_node)
                .delete(handlers::nodes::delete_node),
        )
        .route(
            "/nodes/flow/{flow_id}",
            delete(handlers::nodes::delete_nodes_by_flow),
        )
        // Flows
        .route(
            "/flows",
            get(handlers::flows::list_flows).post(handlers::flows::create_flow),
        )
        .route(
            "/flows/{flow_id}",
            get(handlers::flows::get_flow)
                .put(handlers::flows::update_flow)
                .delete(handlers::flows::delete_flow),
        )
        // Documentation
        .route("/openapi.json", get(handlers::openapi::openapi_spec));

    let root = Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health))
        // Legacy graph
        .route("/node", post(handlers::graph::create_node))
        .route("/node/{id}", get(handlers::graph::get_node))
        .route("/edge", post(handlers::graph::create_edge))
        .route("/edge/{id}", get(handlers::graph::get_edge));

    // axum refuses to nest at the root, so an empty prefix merges instead.
    let prefix = state.settings.api_prefix.clone();
    let app = if prefix.is_empty() {
        root.merge(api)
    } else {
        root.nest(&prefix, api)
    };

    app.layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.settings))
        .with_state(state)
}

/// Allows the configured origins with credentials, and any method or header.
///
/// A `*` entry allows every origin. Methods and headers mirror the request
/// because wildcards cannot be combined with credentials.
fn cors_layer(settings: &Settings) -> CorsLayer {
    let origins = if settings.cors_origins.iter().any(|origin| origin == "*") {
        AllowOrigin::mirror_request()
    } else {
        AllowOrigin::list(
            settings
                .cors_origins
                .iter()
                .filter_map(|origin| HeaderValue::from_str(origin).ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}
