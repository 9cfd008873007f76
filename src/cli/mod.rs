//! CLI module
//!
//! Command-line interface for exercising configured list sources.
//!
//! # Commands
//!
//! - `sources` - List configured source keys
//! - `validate` - Validate the sources file
//! - `fetch` - Switch to a source, run it once and print the page

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::{parse_param, Runner};
