//! Domain model for the Krok flow editor backend.
//!
//! Defines the entities persisted by `krok-storage` and served by
//! `krok-server`:
//!
//! - [`Node`] and [`Flow`]: the flow-editor model (positioned, typed nodes
//!   grouped into named flows).
//! - [`GraphNode`] and [`GraphEdge`]: the legacy graph model (opaque JSON
//!   payloads keyed by id).
//!
//! Create payloads carry the caller-supplied identifier. Update payloads are
//! built from [`Patch`] fields and merged into stored entities by explicit
//! `apply` functions.

pub mod error;
pub mod flow;
pub mod graph;
pub mod node;
pub mod patch;
pub mod properties;

// Re-export commonly used types
pub use error::CoreError;
pub use flow::{Flow, FlowCreate, FlowUpdate};
pub use graph::{GraphEdge, GraphNode};
pub use node::{Node, NodeCreate, NodeUpdate, DEFAULT_NODE_STATUS};
pub use patch::Patch;
pub use properties::{Properties, MAX_PROPERTY_DEPTH, MAX_PROPERTY_KEYS};
