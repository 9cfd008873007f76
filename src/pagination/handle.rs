//! Shared pagination handle

use super::types::Pagination;
use crate::observe::Revision;
use std::sync::{Arc, PoisonError, RwLock};

/// Live reference to a list request's pagination cursor
///
/// Cloning the handle does not copy the cursor: every clone reads and writes
/// the same record. Writes bump the owning request's revision.
#[derive(Debug, Clone)]
pub struct PaginationHandle {
    inner: Arc<RwLock<Pagination>>,
    revision: Revision,
}

impl PaginationHandle {
    pub(crate) fn new(pagination: Pagination, revision: Revision) -> Self {
        Self {
            inner: Arc::new(RwLock::new(pagination)),
            revision,
        }
    }

    /// Copy of the current cursor
    pub fn get(&self) -> Pagination {
        *self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current page, 1-based
    pub fn page(&self) -> u32 {
        self.get().page
    }

    /// Current page size
    pub fn limit(&self) -> u32 {
        self.get().limit
    }

    /// Carried offset; never computed from the page
    pub fn offset(&self) -> u32 {
        self.get().offset
    }

    /// Total reported by the last successful fetch
    pub fn total(&self) -> u64 {
        self.get().total
    }

    /// Move the cursor to another page
    pub fn set_page(&self, page: u32) {
        self.update(|p| p.page = page);
    }

    /// Change the page size
    pub fn set_limit(&self, limit: u32) {
        self.update(|p| p.limit = limit);
    }

    /// Set the carried offset
    pub fn set_offset(&self, offset: u32) {
        self.update(|p| p.offset = offset);
    }

    pub(crate) fn set_total(&self, total: u64) {
        self.update(|p| p.total = total);
    }

    /// Apply an arbitrary edit to the cursor
    pub fn update(&self, f: impl FnOnce(&mut Pagination)) {
        {
            let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
            f(&mut guard);
        }
        self.revision.bump();
    }

    /// Check whether two handles point at the same cursor
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}
