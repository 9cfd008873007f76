//! Fetch module
//!
//! The seam between list state and the outside world. A `ListFetcher`
//! receives the effective parameters of one `run` plus any extra arguments
//! and returns one page of items with the total count.
//!
//! # Fetchers
//!
//! - `fetcher_fn` - adapt an async closure
//! - `HttpListFetcher` - GET a JSON endpoint and extract list/total by path

mod fetcher;
mod http;

pub use fetcher::{fetcher_fn, BoxedFetcher, FnFetcher, ListFetcher};
pub use http::{HttpFetcherConfig, HttpFetcherConfigBuilder, HttpListFetcher};

#[cfg(test)]
mod tests;
