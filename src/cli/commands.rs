//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Paginated list-request CLI
#[derive(Parser, Debug)]
#[command(name = "list-request")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Sources definition file (YAML)
    #[arg(short, long, global = true, default_value = "sources.yaml")]
    pub sources: PathBuf,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List configured source keys
    Sources,

    /// Validate the sources file
    Validate,

    /// Fetch one page from a source
    Fetch {
        /// Source key to switch to (defaults to the configured active source)
        #[arg(short, long)]
        key: Option<String>,

        /// Page number to move the cursor to
        #[arg(long)]
        page: Option<u32>,

        /// Page size to store in the cursor
        #[arg(long)]
        limit: Option<u32>,

        /// Extra request parameter (key=value, value parsed as JSON when possible)
        #[arg(short, long = "param")]
        params: Vec<String>,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON
    Json,
    /// Indented JSON
    Pretty,
}
