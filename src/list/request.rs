//! List request state holder

use crate::error::Error;
use crate::fetch::{BoxedFetcher, ListFetcher};
use crate::observe::Revision;
use crate::pagination::{Pagination, PaginationHandle};
use crate::params::ListParams;
use crate::types::JsonValue;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::watch;
use tracing::{debug, warn};

/// Consistent copy of a list request's state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListSnapshot<T> {
    pub loading: bool,
    pub data: Vec<T>,
    pub pagination: Pagination,
}

struct Inner<T, E> {
    fetcher: BoxedFetcher<T, E>,
    default_params: ListParams,
    loading: AtomicBool,
    data: RwLock<Vec<T>>,
    pagination: PaginationHandle,
    revision: Revision,
}

/// Paginated list state around one fetcher
///
/// Clones share the same state, so a clone can be handed out wherever the
/// request's `run` is needed.
pub struct ListRequest<T, E = Error> {
    inner: Arc<Inner<T, E>>,
}

impl<T, E> Clone for ListRequest<T, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, E> std::fmt::Debug for ListRequest<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListRequest")
            .field("loading", &self.inner.loading.load(Ordering::SeqCst))
            .field("pagination", &self.inner.pagination.get())
            .field("default_params", &self.inner.default_params)
            .finish_non_exhaustive()
    }
}

impl<T, E> ListRequest<T, E>
where
    T: Send + Sync + 'static,
    E: Send + 'static,
{
    /// Create a list request without default parameters
    pub fn new<F>(fetcher: F) -> Self
    where
        F: ListFetcher<Item = T, Error = E> + 'static,
    {
        Self::from_parts(Arc::new(fetcher), None, Pagination::default())
    }

    /// Create a list request with default parameters merged beneath every run
    pub fn with_defaults<F>(fetcher: F, default_params: ListParams) -> Self
    where
        F: ListFetcher<Item = T, Error = E> + 'static,
    {
        Self::from_parts(Arc::new(fetcher), Some(default_params), Pagination::default())
    }

    /// Create a list request from a shared fetcher and an initial cursor
    pub fn from_parts(
        fetcher: BoxedFetcher<T, E>,
        default_params: Option<ListParams>,
        pagination: Pagination,
    ) -> Self {
        let revision = Revision::new();
        Self {
            inner: Arc::new(Inner {
                fetcher,
                default_params: default_params.unwrap_or_default(),
                loading: AtomicBool::new(false),
                data: RwLock::new(Vec::new()),
                pagination: PaginationHandle::new(pagination, revision.clone()),
                revision,
            }),
        }
    }

    /// Whether a run is in flight
    pub fn loading(&self) -> bool {
        self.inner.loading.load(Ordering::SeqCst)
    }

    /// Live handle to the pagination cursor
    pub fn pagination(&self) -> PaginationHandle {
        self.inner.pagination.clone()
    }

    /// Parameters merged beneath every run
    pub fn default_params(&self) -> &ListParams {
        &self.inner.default_params
    }

    /// Subscribe to state changes
    ///
    /// The received value is a revision counter; re-read the state whenever
    /// it moves.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.revision.subscribe()
    }

    /// Current revision counter
    pub fn revision(&self) -> u64 {
        self.inner.revision.current()
    }

    /// Check whether two requests share the same state
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Parameters a run with the given overrides would send
    ///
    /// Precedence, lowest first: default parameters, the cursor's page and
    /// limit, then `params`.
    pub fn effective_params(&self, params: Option<&ListParams>) -> ListParams {
        let cursor = self.inner.pagination.get();
        let cursor_params = ListParams::new()
            .with_page(cursor.page)
            .with_limit(cursor.limit);

        let mut effective = self.inner.default_params.clone();
        effective.merge(&cursor_params);
        if let Some(params) = params {
            effective.merge(params);
        }
        effective
    }

    /// Fetch one page and store the result
    ///
    /// Caller-supplied `page`/`limit` apply to this call only and are not
    /// written back to the cursor. On success `data` is replaced and
    /// `pagination.total` updated; on failure the fetcher's error is returned
    /// unchanged and the previous state is kept. `loading` is cleared on every
    /// exit path, including when the returned future is dropped.
    pub async fn run(&self, params: Option<ListParams>, extra: Vec<JsonValue>) -> Result<(), E> {
        let _loading = LoadingGuard::start(&self.inner);
        let effective = self.effective_params(params.as_ref());
        debug!(
            page = ?effective.page(),
            limit = ?effective.limit(),
            "Running list request"
        );

        match self.inner.fetcher.fetch(effective, extra).await {
            Ok(page) => {
                let count = page.list.len();
                *self
                    .inner
                    .data
                    .write()
                    .unwrap_or_else(PoisonError::into_inner) = page.list;
                self.inner.pagination.set_total(page.total);
                debug!(count, total = page.total, "List request finished");
                Ok(())
            }
            Err(e) => {
                warn!("List request failed");
                Err(e)
            }
        }
    }

    /// Run with the stored cursor and no overrides
    pub async fn refresh(&self) -> Result<(), E> {
        self.run(None, Vec::new()).await
    }

    /// Move the cursor to `page` and run
    pub async fn goto_page(&self, page: u32) -> Result<(), E> {
        self.inner.pagination.set_page(page);
        self.refresh().await
    }
}

impl<T, E> ListRequest<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Send + 'static,
{
    /// Items of the most recent successful page
    pub fn data(&self) -> Vec<T> {
        self.inner
            .data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Consistent snapshot of loading, data and pagination
    pub fn snapshot(&self) -> ListSnapshot<T> {
        ListSnapshot {
            loading: self.loading(),
            data: self.data(),
            pagination: self.inner.pagination.get(),
        }
    }
}

/// Holds `loading` high for the lifetime of one run
struct LoadingGuard<'a, T, E> {
    inner: &'a Inner<T, E>,
}

impl<'a, T, E> LoadingGuard<'a, T, E> {
    fn start(inner: &'a Inner<T, E>) -> Self {
        inner.loading.store(true, Ordering::SeqCst);
        inner.revision.bump();
        Self { inner }
    }
}

impl<T, E> Drop for LoadingGuard<'_, T, E> {
    fn drop(&mut self) {
        self.inner.loading.store(false, Ordering::SeqCst);
        self.inner.revision.bump();
    }
}
