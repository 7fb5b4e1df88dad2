//! Storage layer for Krok flows, nodes and the legacy graph model.
//!
//! Provides the [`FlowStore`] trait defining the repository contract for
//! nodes and flows, with [`SqliteStore`] and [`InMemoryStore`] as
//! interchangeable backends, plus the connection-per-call [`GraphStore`] for
//! the legacy node/edge tables.
//!
//! # Modules
//!
//! - [`error`]: StorageError enum with all failure modes
//! - [`types`]: Page and other storage-layer types
//! - [`traits`]: FlowStore trait definition
//! - [`memory`]: InMemoryStore implementation
//! - [`schema`]: embedded migrations and connection setup
//! - [`sqlite`]: SqliteStore implementation
//! - [`graph`]: GraphStore for the legacy tables

pub mod error;
pub mod graph;
pub mod memory;
pub mod schema;
pub mod sqlite;
pub mod traits;
pub mod types;

#[cfg(test)]
mod conformance;

// Re-export key types for ergonomic use.
pub use error::StorageError;
pub use graph::GraphStore;
pub use memory::InMemoryStore;
pub use sqlite::SqliteStore;
pub use traits::FlowStore;
pub use types::Page;
