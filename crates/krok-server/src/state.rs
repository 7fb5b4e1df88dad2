//! Application state shared by all handlers.
//!
//! The flow store is opened once at startup and handed to the router as
//! state. It sits behind `Arc<tokio::sync::Mutex<>>` because
//! `rusqlite::Connection` is `!Sync`; each handler holds the guard for the
//! duration of its single statement and the guard is dropped on return,
//! including on error.
//!
//! The legacy [`GraphStore`] only carries a path and opens a connection per
//! call, so it needs no lock.

use std::sync::Arc;

use krok_storage::{FlowStore, GraphStore, InMemoryStore, SqliteStore};

use crate::config::{DatabaseUrl, Settings};
use crate::error::ApiError;

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    /// The flow/node repository (async Mutex, awaited without blocking).
    pub store: Arc<tokio::sync::Mutex<Box<dyn FlowStore>>>,
    /// Legacy graph store.
    pub graph: GraphStore,
    /// Settings the server was started with.
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Opens the stores named by `settings`.
    pub fn new(settings: Settings) -> Result<Self, ApiError> {
        let store: Box<dyn FlowStore> = match &settings.database {
            DatabaseUrl::SqliteFile(path) => Box::new(SqliteStore::new(path)?),
            DatabaseUrl::SqliteMemory => Box::new(SqliteStore::in_memory()?),
            DatabaseUrl::Memory => Box::new(InMemoryStore::new()),
        };
        let graph = GraphStore::new(&settings.graph_db_path)?;
        Ok(Self::with_stores(store, graph, settings))
    }

    /// Creates state with an in-memory SQLite flow store and a throwaway
    /// graph database (for testing).
    pub fn in_memory() -> Result<Self, ApiError> {
        let store = Box::new(SqliteStore::in_memory()?);
        let graph = GraphStore::temporary()?;
        Ok(Self::with_stores(store, graph, Settings::default()))
    }

    /// Assembles state from already-opened stores.
    pub fn with_stores(store: Box<dyn FlowStore>, graph: GraphStore, settings: Settings) -> Self {
        AppState {
            store: Arc::new(tokio::sync::Mutex::new(store)),
            graph,
            settings: Arc::new(settings),
        }
    }
}
