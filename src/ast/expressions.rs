use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::args::BoundArgument;
use crate::ast::is_reserved;
use crate::value::Value;

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern"));

static PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$").expect("path pattern")
});

/// True if `word` is a plain identifier such as an alias.
pub fn is_identifier(word: &str) -> bool {
    IDENTIFIER.is_match(word)
}

/// True if `word` is a dot-separated identifier path.
pub fn is_path(word: &str) -> bool {
    PATH.is_match(word)
}

/// Characters that may appear inside an identifier path.
pub fn is_path_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}

/// Dot-separated reference to a field, e.g. `b.name`.
///
/// The first segment is usually the query alias, but the parser does not
/// enforce that.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Parses `text` into a path, returning `None` when it is not a valid
    /// path or its only segment is a reserved keyword.
    pub fn parse(text: &str) -> Option<Self> {
        if !is_path(text) || is_reserved(text) {
            return None;
        }
        Some(FieldPath {
            segments: text.split('.').map(str::to_string).collect(),
        })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

/// Value reference inside a boolean expression.
///
/// A parameter is bound once, while parsing. It holds a copy of the argument
/// and never reads the argument array again.
#[derive(Debug, Clone, PartialEq)]
pub enum ContextVariable {
    /// Field path
    ///
    /// # Example
    /// ```text
    /// b.name
    /// ```
    Field(FieldPath),

    /// Positional parameter bound to one argument slot
    ///
    /// # Example
    /// ```text
    /// ?
    /// ```
    Parameter(BoundArgument),
}

impl ContextVariable {
    pub fn as_field(&self) -> Option<&FieldPath> {
        match self {
            ContextVariable::Field(path) => Some(path),
            ContextVariable::Parameter(_) => None,
        }
    }

    /// The bound argument value, if this is a parameter.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            ContextVariable::Field(_) => None,
            ContextVariable::Parameter(arg) => Some(&arg.value),
        }
    }

    pub fn is_parameter(&self) -> bool {
        matches!(self, ContextVariable::Parameter(_))
    }
}
