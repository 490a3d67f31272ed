//! Parse queries from the command line

use super::{parse_args, query_to_json, CliError};
use crate::{describe, Parser, ParserConfig};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The query to parse
    pub query: String,
    /// JSON array of query arguments
    pub args: Option<String>,
    /// Print the parsed query as JSON instead of an outline
    pub json: bool,
    /// Only validate syntax, don't build the query
    pub syntax_only: bool,
    /// Parser limits
    pub config: ParserConfig,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Query parsed, rendered as an outline
    Outline(String),
    /// Query parsed, as structural JSON
    Json(serde_json::Value),
}

/// Execute a check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let args = match &options.args {
        Some(json) => parse_args(json)?,
        None => Vec::new(),
    };

    let mut parser = Parser::with_config(args, options.config);

    if options.syntax_only {
        parser.dry_run(&options.query)?;
        return Ok(CheckResult::SyntaxValid);
    }

    let query = parser.parse(&options.query)?;
    if options.json {
        Ok(CheckResult::Json(query_to_json(&query)))
    } else {
        Ok(CheckResult::Outline(describe(&query)))
    }
}
