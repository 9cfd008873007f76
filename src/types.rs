//! Common types used throughout list-request
//!
//! This module contains shared type definitions and type aliases used
//! across multiple modules.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Fetch Response
// ============================================================================

/// One page of items as returned by a fetcher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPage<T> {
    /// Items of the requested page
    #[serde(default)]
    pub list: Vec<T>,
    /// Total number of items across all pages
    #[serde(default)]
    pub total: u64,
}

impl<T> ListPage<T> {
    /// Create a new page
    pub fn new(list: Vec<T>, total: u64) -> Self {
        Self { list, total }
    }

    /// Create an empty page
    pub fn empty() -> Self {
        Self {
            list: Vec::new(),
            total: 0,
        }
    }
}

impl<T> Default for ListPage<T> {
    fn default() -> Self {
        Self::empty()
    }
}
