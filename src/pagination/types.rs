//! Pagination cursor types

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// First page number
pub const DEFAULT_PAGE: u32 = 1;

/// Default page size
pub const DEFAULT_LIMIT: u32 = 20;

/// Pagination cursor of one list request
///
/// `page` and `limit` are inputs of the next fetch, `total` is the output of
/// the last successful one. `offset` is carried along for callers that need
/// it but nothing in this crate computes or reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page number (1-based)
    #[serde(default = "default_page")]
    pub page: u32,
    /// Page size
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Record offset
    #[serde(default)]
    pub offset: u32,
    /// Total records reported by the last successful fetch
    #[serde(default)]
    pub total: u64,
}

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            offset: 0,
            total: 0,
        }
    }
}

impl Pagination {
    /// Create a cursor with the default page and page size
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cursor starting at the given page and page size
    pub fn with_page(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            ..Default::default()
        }
    }

    /// Number of pages implied by `total` and `limit`
    pub fn page_count(&self) -> u64 {
        if self.limit == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.limit))
    }

    /// Check that page and limit are usable
    pub fn validate(&self) -> Result<()> {
        if self.page < 1 {
            return Err(Error::config("pagination page must be >= 1"));
        }
        if self.limit == 0 {
            return Err(Error::config("pagination limit must be > 0"));
        }
        Ok(())
    }
}
