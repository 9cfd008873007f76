//! Switch request module
//!
//! Multiplexes several list requests behind one active key.
//!
//! # Overview
//!
//! - `ActiveKey` - externally owned observable cell holding the selected key
//! - `FetchDescriptor` - `(key, fetcher, default params)` triple
//! - `SwitchRequest` - builds one `ListRequest` per descriptor up front and
//!   forwards `loading`, `data`, `run` and `pagination` to whichever one
//!   matches the active key at the time of the call
//!
//! Changing the active key resets the newly selected request's page to 1
//! inside `ActiveKey::set`, before it returns.
//! No fetch is started by the switch itself.

mod active;
mod request;

pub use active::{ActiveKey, ListenerId};
pub use request::{FetchDescriptor, SwitchRequest};

#[cfg(test)]
mod tests;
