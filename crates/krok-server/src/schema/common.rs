//! Small response bodies shared across endpoints.

use serde::{Deserialize, Serialize};

use krok_storage::Page;

/// `{"message": ...}` body returned by deletes and the root probe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        MessageResponse {
            message: message.into(),
        }
    }
}

/// `{"status": ...}` body returned by the health probe and legacy creates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

pub(crate) fn default_limit() -> u32 {
    Page::DEFAULT_LIMIT
}

/// `skip`/`limit` query parameters.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub skip: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl From<PageQuery> for Page {
    fn from(query: PageQuery) -> Self {
        Page::new(query.skip, query.limit)
    }
}
