//! Pagination module
//!
//! # Overview
//!
//! A list request owns exactly one pagination cursor. The cursor is plain
//! data (`Pagination`) shared behind a `PaginationHandle`, so callers can
//! move to another page or change the page size before the next `run`, and
//! the switch facade can hand out the selected request's cursor by reference.

mod handle;
mod types;

pub use handle::PaginationHandle;
pub use types::{Pagination, DEFAULT_LIMIT, DEFAULT_PAGE};
