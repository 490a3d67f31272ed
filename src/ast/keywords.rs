use crate::ast::ComparisonType;

/// Positional parameter marker. Each occurrence consumes the next query argument.
pub const WILDCARD: char = '?';

/// Prefix negation of a boolean term.
pub const NEGATION: char = '!';

/// Opens a parenthesized group.
pub const GROUP_OPEN: char = '(';

/// Closes a parenthesized group.
pub const GROUP_CLOSE: char = ')';

/// Separates `ORDERBY` keys.
pub const LIST_SEPARATOR: char = ',';

/// Reserved words of the query language.
///
/// Keywords are case-sensitive: `PICK` is a keyword, `pick` is an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    /// Fetch matching records
    ///
    /// # Example
    /// ```text
    /// PICK Bar b IF b.name=?
    /// ```
    Pick,

    /// Count matching records
    ///
    /// # Example
    /// ```text
    /// COUNT Bar IF active=?
    /// ```
    Count,

    /// Opens the filter clause
    If,

    /// Boolean conjunction between two terms
    And,

    /// Boolean disjunction between two terms
    Or,

    /// Runtime type test
    ///
    /// # Example
    /// ```text
    /// PICK Shape s IF s TYPED Circle
    /// ```
    Typed,

    /// Word comparator checking a value against a bound range argument
    InRange,

    /// Opens the sort clause
    OrderBy,

    /// Ascending sort direction
    Asc,

    /// Descending sort direction
    Desc,

    /// Maximum number of records
    Limit,

    /// Number of records to skip
    Offset,
}

impl Keyword {
    const ALL: [Keyword; 12] = [
        Keyword::Pick,
        Keyword::Count,
        Keyword::If,
        Keyword::And,
        Keyword::Or,
        Keyword::Typed,
        Keyword::InRange,
        Keyword::OrderBy,
        Keyword::Asc,
        Keyword::Desc,
        Keyword::Limit,
        Keyword::Offset,
    ];

    /// Looks up a reserved word. Returns `None` for ordinary identifiers.
    pub fn lookup(word: &str) -> Option<Keyword> {
        Self::ALL.iter().copied().find(|k| k.as_str() == word)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Pick => "PICK",
            Keyword::Count => "COUNT",
            Keyword::If => "IF",
            Keyword::And => "AND",
            Keyword::Or => "OR",
            Keyword::Typed => "TYPED",
            Keyword::InRange => "INRANGE",
            Keyword::OrderBy => "ORDERBY",
            Keyword::Asc => "ASC",
            Keyword::Desc => "DESC",
            Keyword::Limit => "LIMIT",
            Keyword::Offset => "OFFSET",
        }
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// True if `word` collides with a reserved keyword.
pub fn is_reserved(word: &str) -> bool {
    Keyword::lookup(word).is_some()
}

/// Characters that may appear in a symbolic comparator.
pub fn is_comparator_char(c: char) -> bool {
    matches!(c, '=' | '!' | '<' | '>')
}

/// Resolves a symbolic comparator.
///
/// The boolean is `true` for `!=`, which is equality with negation toggled.
pub fn comparator(symbol: &str) -> Option<(ComparisonType, bool)> {
    match symbol {
        "=" => Some((ComparisonType::Equal, false)),
        "!=" => Some((ComparisonType::Equal, true)),
        ">" => Some((ComparisonType::Greater, false)),
        ">=" => Some((ComparisonType::GreaterEqual, false)),
        "<" => Some((ComparisonType::Lower, false)),
        "<=" => Some((ComparisonType::LowerEqual, false)),
        _ => None,
    }
}
