//! CLI support for pick-lang
//!
//! Provides programmatic access to the `pick` CLI functionality for embedding
//! in other tools.

mod check;
mod convert;
mod docs;

pub use check::{execute_check, CheckOptions, CheckResult};
pub use convert::{json_to_value, parse_args, query_to_json, value_to_json};
pub use docs::{get_doc_category, get_docs_overview, DocCategory};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Parse error: {0}")]
    Parse(#[from] crate::QueryParsingError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Arguments were valid JSON but not an array
    #[error("Query arguments must be a JSON array, got {0}")]
    InvalidArguments(&'static str),

    /// An argument with no query-value counterpart
    #[error("Unsupported query argument: {0}")]
    UnsupportedArgument(String),

    /// Unknown documentation category
    #[error("Unknown category: '{0}'\nRun 'pick docs' to see available categories.")]
    UnknownCategory(String),
}
