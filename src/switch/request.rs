//! Switch request facade

use super::active::{ActiveKey, ListenerId};
use crate::error::{Error, Result};
use crate::fetch::{BoxedFetcher, ListFetcher};
use crate::list::{ListRequest, ListSnapshot};
use crate::pagination::{Pagination, PaginationHandle, DEFAULT_PAGE};
use crate::params::ListParams;
use crate::types::JsonValue;
use std::fmt::Debug;
use std::sync::Arc;
use tracing::debug;

/// One switchable fetch source
pub struct FetchDescriptor<K, T, E = Error> {
    pub key: K,
    pub fetcher: BoxedFetcher<T, E>,
    pub default_params: Option<ListParams>,
    pub pagination: Pagination,
}

impl<K, T, E> FetchDescriptor<K, T, E> {
    /// Create a descriptor without default parameters
    pub fn new<F>(key: K, fetcher: F) -> Self
    where
        F: ListFetcher<Item = T, Error = E> + 'static,
    {
        Self::from_boxed(key, Arc::new(fetcher), None)
    }

    /// Create a descriptor with default parameters
    pub fn with_defaults<F>(key: K, fetcher: F, default_params: ListParams) -> Self
    where
        F: ListFetcher<Item = T, Error = E> + 'static,
    {
        Self::from_boxed(key, Arc::new(fetcher), Some(default_params))
    }

    /// Create a descriptor from an already shared fetcher
    pub fn from_boxed(
        key: K,
        fetcher: BoxedFetcher<T, E>,
        default_params: Option<ListParams>,
    ) -> Self {
        Self {
            key,
            fetcher,
            default_params,
            pagination: Pagination::default(),
        }
    }

    /// Override the initial cursor of the request built from this descriptor
    #[must_use]
    pub fn pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }
}

/// Facade over several list requests selected by an active key
///
/// Every accessor resolves the request whose key equals the active key at
/// the time of the call; nothing is cached. Keys are matched by linear scan
/// in descriptor order, so with duplicate keys the first one wins. When no
/// descriptor matches, accessors fail with `Error::UnknownKey`.
///
/// The switch registers a listener on its `ActiveKey` that resets the page of
/// the newly selected request to 1 as part of `ActiveKey::set`. The listener
/// is removed when the switch is dropped.
pub struct SwitchRequest<K, T, E = Error> {
    active: ActiveKey<K>,
    listener: ListenerId,
    requests: Vec<(K, ListRequest<T, E>)>,
}

impl<K, T, E> Debug for SwitchRequest<K, T, E>
where
    K: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwitchRequest")
            .field("active", &self.active)
            .field("keys", &self.requests.iter().map(|(k, _)| k).collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl<K, T, E> Drop for SwitchRequest<K, T, E> {
    fn drop(&mut self) {
        self.active.remove_listener(self.listener);
    }
}

impl<K, T, E> SwitchRequest<K, T, E>
where
    K: Clone + PartialEq + Debug + Send + Sync + 'static,
    T: Send + Sync + 'static,
    E: Send + 'static,
{
    /// Build one list request per descriptor
    pub fn new(
        active: ActiveKey<K>,
        descriptors: impl IntoIterator<Item = FetchDescriptor<K, T, E>>,
    ) -> Self {
        let requests: Vec<(K, ListRequest<T, E>)> = descriptors
            .into_iter()
            .map(|d| {
                let request = ListRequest::from_parts(d.fetcher, d.default_params, d.pagination);
                (d.key, request)
            })
            .collect();

        let cursors: Vec<(K, PaginationHandle)> = requests
            .iter()
            .map(|(key, request)| (key.clone(), request.pagination()))
            .collect();
        let listener = active.on_change(move |key: &K| reset_page(&cursors, key));

        Self {
            active,
            listener,
            requests,
        }
    }

    /// The active-key cell this switch observes
    pub fn active(&self) -> &ActiveKey<K> {
        &self.active
    }

    /// Currently selected key
    pub fn active_key(&self) -> K {
        self.active.get()
    }

    /// Select another key; returns whether the key changed
    pub fn set_active(&self, key: K) -> bool {
        self.active.set(key)
    }

    /// Registered keys in descriptor order
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.requests.iter().map(|(k, _)| k)
    }

    /// Number of registered descriptors, duplicates included
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Whether no descriptor was registered
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// List request registered under `key` (first match)
    pub fn get(&self, key: &K) -> Option<&ListRequest<T, E>> {
        self.requests
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, request)| request)
    }

    /// List request selected by the current active key
    pub fn current(&self) -> Result<&ListRequest<T, E>> {
        let key = self.active.get();
        self.get(&key).ok_or_else(|| Error::unknown_key(&key))
    }

    /// Shared handle to the selected request, usable as its `run`
    pub fn runner(&self) -> Result<ListRequest<T, E>> {
        self.current().cloned()
    }

    /// Whether the selected request has a run in flight
    pub fn loading(&self) -> Result<bool> {
        Ok(self.current()?.loading())
    }

    /// Live pagination handle of the selected request
    pub fn pagination(&self) -> Result<PaginationHandle> {
        Ok(self.current()?.pagination())
    }

    /// Run the selected request
    ///
    /// Fetch errors come back unchanged; a selection miss is converted into
    /// the caller's error type.
    pub async fn run(
        &self,
        params: Option<ListParams>,
        extra: Vec<JsonValue>,
    ) -> std::result::Result<(), E>
    where
        E: From<Error>,
    {
        let request = self.runner().map_err(E::from)?;
        request.run(params, extra).await
    }
}

fn reset_page<K: PartialEq + Debug>(cursors: &[(K, PaginationHandle)], key: &K) {
    match cursors.iter().find(|(k, _)| k == key) {
        Some((_, cursor)) => {
            cursor.set_page(DEFAULT_PAGE);
            debug!(key = ?key, "Active key changed, page reset");
        }
        None => debug!(key = ?key, "Active key changed to an unregistered key"),
    }
}

impl<K, T, E> SwitchRequest<K, T, E>
where
    K: Clone + PartialEq + Debug + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
    E: Send + 'static,
{
    /// Items of the selected request
    pub fn data(&self) -> Result<Vec<T>> {
        Ok(self.current()?.data())
    }

    /// Consistent snapshot of the selected request
    pub fn snapshot(&self) -> Result<ListSnapshot<T>> {
        Ok(self.current()?.snapshot())
    }
}
