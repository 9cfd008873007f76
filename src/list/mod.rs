//! List request module
//!
//! # Overview
//!
//! A `ListRequest` wraps one fetcher and owns the state a list view needs:
//! the loading flag, the items of the current page and the pagination
//! cursor. `run` merges default parameters, the cursor and caller overrides,
//! calls the fetcher and stores the result.
//!
//! Overlapping runs are not fenced: every run applies its own result when it
//! settles, so the run that settles last decides the final state.

mod request;

pub use request::{ListRequest, ListSnapshot};
