use thiserror::Error;

/// Failure of a parse call.
///
/// Every error is fatal to the call that raised it. `offset` is the
/// zero-based character offset of the offending character and `parsed` the
/// text consumed up to and including it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at offset {offset} (parsed: {parsed:?})")]
pub struct QueryParsingError {
    pub kind: ParseErrorKind,
    pub offset: usize,
    pub parsed: String,
}

/// What went wrong while parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A word where a specific keyword was required, or a keyword out of place.
    #[error("unknown keyword '{0}'")]
    UnknownKeyword(String),

    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),

    /// A type name, alias or field path that is not a valid identifier.
    #[error("invalid identifier '{0}'")]
    InvalidIdentifier(String),

    /// Input ended or moved on before a mandatory token.
    #[error("expected {0}")]
    MissingToken(&'static str),

    /// `)` without a matching `(`.
    #[error("unbalanced group: ')' without matching '('")]
    UnbalancedGroup,

    /// `(` never closed before the end of input.
    #[error("unbalanced group: missing ')'")]
    UnclosedGroup,

    #[error("malformed numeric literal '{0}'")]
    MalformedNumber(String),

    #[error("negative numeric literal '{0}'")]
    NegativeNumber(String),

    /// A `?` with no argument left to bind.
    #[error("no query argument at position {position} ({supplied} supplied)")]
    ArgumentsExhausted { position: usize, supplied: usize },

    /// Input ended while the grammar still needed more.
    #[error("incomplete query")]
    IncompleteQuery,

    /// Non-whitespace after a complete query.
    #[error("unexpected trailing input '{0}'")]
    TrailingInput(char),

    #[error("groups nested deeper than {0}")]
    NestingTooDeep(usize),

    #[error("query longer than {0} characters")]
    InputTooLong(usize),
}
