//! Storage-layer types shared by all backends.

/// Offset/limit window over an insertion-ordered listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Number of rows to skip.
    pub skip: u32,
    /// Maximum number of rows to return.
    pub limit: u32,
}

impl Page {
    /// Default number of rows returned by list endpoints.
    pub const DEFAULT_LIMIT: u32 = 100;

    pub fn new(skip: u32, limit: u32) -> Self {
        Page { skip, limit }
    }
}

impl Default for Page {
    fn default() -> Self {
        Page {
            skip: 0,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}
