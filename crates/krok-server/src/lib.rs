//! HTTP/JSON API server for the Krok flow editor.
//!
//! Serves CRUD endpoints for flows and nodes under a configurable API prefix,
//! the legacy `/node` and `/edge` graph endpoints, and liveness probes. This
//! crate contains the router, handlers, API schema types, error mapping,
//! configuration, and shared application state.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod schema;
pub mod state;
