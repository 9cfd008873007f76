//! # list-request
//!
//! Paginated list-fetching state for async Rust, plus a switch that shares
//! one facade between several interchangeable list sources.
//!
//! ## Features
//!
//! - **ListRequest**: loading flag, current page items and pagination cursor
//!   around any async fetcher
//! - **SwitchRequest**: one `ListRequest` per source, selected by an
//!   observable active key; switching resets the selected page to 1
//! - **Parameter layering**: defaults, cursor, then per-call overrides
//! - **HTTP sources**: built-in fetcher for JSON endpoints, configured from YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use list_request::{fetcher_fn, ActiveKey, FetchDescriptor, ListPage, SwitchRequest};
//!
//! let active = ActiveKey::new("users");
//! let switch = SwitchRequest::new(
//!     active.clone(),
//!     vec![
//!         FetchDescriptor::new("users", fetcher_fn(|params, _| async move {
//!             api::users(params).await
//!         })),
//!         FetchDescriptor::new("teams", fetcher_fn(|params, _| async move {
//!             api::teams(params).await
//!         })),
//!     ],
//! );
//!
//! switch.run(None, vec![]).await?;
//! println!("{} users", switch.pagination()?.total());
//!
//! active.set("teams");
//! switch.run(None, vec![]).await?;
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 SwitchRequest (facade)                    │
//! │  ActiveKey ──watch──▶ loading / data / run / pagination   │
//! └────────────────────────────┬─────────────────────────────┘
//!                              │ one per descriptor
//! ┌────────────────────────────┴─────────────────────────────┐
//! │                      ListRequest                          │
//! │  loading · data · PaginationHandle · run(params, extra)   │
//! └────────────────────────────┬─────────────────────────────┘
//!                              │
//!                  ListFetcher (closure / HTTP)
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Change notification
pub mod observe;

/// Pagination cursor
pub mod pagination;

/// Request parameter records
pub mod params;

/// Fetcher trait and built-in fetchers
pub mod fetch;

/// Single-source list state
pub mod list;

/// Multi-source switching
pub mod switch;

/// Sources configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use config::SourcesConfig;
pub use fetch::{fetcher_fn, HttpFetcherConfig, HttpListFetcher, ListFetcher};
pub use list::{ListRequest, ListSnapshot};
pub use pagination::{Pagination, PaginationHandle};
pub use params::ListParams;
pub use switch::{ActiveKey, FetchDescriptor, SwitchRequest};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
