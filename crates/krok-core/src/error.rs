//! Core error types for krok-core.
//!
//! Covers the validation failures detectable on payloads before they reach
//! storage.

use thiserror::Error;

/// Core errors produced by payload validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A property map has more top-level keys than allowed.
    #[error("{field} has {count} keys (maximum {max})")]
    PropertiesTooLarge {
        field: &'static str,
        count: usize,
        max: usize,
    },

    /// A property map or JSON payload nests deeper than allowed.
    #[error("{field} nests {depth} levels deep (maximum {max})")]
    PropertiesTooDeep {
        field: &'static str,
        depth: usize,
        max: usize,
    },
}

impl CoreError {
    /// The request field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            CoreError::PropertiesTooLarge { field, .. }
            | CoreError::PropertiesTooDeep { field, .. } => field,
        }
    }
}
