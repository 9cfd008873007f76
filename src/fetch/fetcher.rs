//! Fetcher trait and closure adapter

use crate::params::ListParams;
use crate::types::{JsonValue, ListPage};
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;

/// Source of list pages
///
/// `Item` is the element type of a page and `Error` is whatever the source
/// fails with. List requests return that error from `run` unchanged.
#[async_trait]
pub trait ListFetcher: Send + Sync {
    /// Element type of a page
    type Item;
    /// Failure type of a fetch
    type Error;

    /// Fetch one page using the effective parameters and extra arguments
    async fn fetch(
        &self,
        params: ListParams,
        extra: Vec<JsonValue>,
    ) -> Result<ListPage<Self::Item>, Self::Error>;
}

/// Type-erased fetcher shared between list requests
pub type BoxedFetcher<T, E> = Arc<dyn ListFetcher<Item = T, Error = E>>;

/// Fetcher backed by an async closure
#[derive(Clone)]
pub struct FnFetcher<F> {
    f: F,
}

impl<F> std::fmt::Debug for FnFetcher<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnFetcher").finish_non_exhaustive()
    }
}

/// Wrap an async closure `(params, extra) -> Result<ListPage<T>, E>` as a fetcher
pub fn fetcher_fn<F, Fut, T, E>(f: F) -> FnFetcher<F>
where
    F: Fn(ListParams, Vec<JsonValue>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<ListPage<T>, E>> + Send,
    T: Send,
    E: Send,
{
    FnFetcher { f }
}

#[async_trait]
impl<F, Fut, T, E> ListFetcher for FnFetcher<F>
where
    F: Fn(ListParams, Vec<JsonValue>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<ListPage<T>, E>> + Send,
    T: Send,
    E: Send,
{
    type Item = T;
    type Error = E;

    async fn fetch(&self, params: ListParams, extra: Vec<JsonValue>) -> Result<ListPage<T>, E> {
        (self.f)(params, extra).await
    }
}
