//! API schema types for request/response definitions.
//!
//! Entity payloads (`NodeCreate`, `FlowUpdate`, ...) come straight from
//! krok-core; this module adds the query-string and envelope types that only
//! exist at the HTTP boundary.

pub mod common;
pub mod nodes;
