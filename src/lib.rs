pub mod args;
pub mod ast;
pub mod cli;
pub mod config;
pub mod error;
pub mod iterator;
pub mod output;
pub mod parser;
pub mod value;

pub use args::{BoundArgument, QueryArgs};
pub use ast::{BooleanStatement, Command, ContextVariable, Query};
pub use config::ParserConfig;
pub use error::{ParseErrorKind, QueryParsingError};
pub use iterator::{BooleanStatementCallback, BooleanStatementIterator};
pub use output::{describe, to_query_string};
pub use parser::{Parser, parse};
pub use value::Value;
