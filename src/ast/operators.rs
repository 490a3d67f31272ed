use crate::ast::Keyword;

/// Comparison applied between the two sides of a comparison expression.
///
/// There is no `NotEqual`: `a!=?` is `Equal` on a negated statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonType {
    /// Equal (`=`)
    Equal,
    /// Greater than (`>`)
    Greater,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Lower than (`<`)
    Lower,
    /// Lower than or equal (`<=`)
    LowerEqual,
    /// Range membership (`INRANGE`)
    InRange,
}

impl ComparisonType {
    /// Canonical spelling used when rendering a query back to text.
    pub fn symbol(self) -> &'static str {
        match self {
            ComparisonType::Equal => "=",
            ComparisonType::Greater => ">",
            ComparisonType::GreaterEqual => ">=",
            ComparisonType::Lower => "<",
            ComparisonType::LowerEqual => "<=",
            ComparisonType::InRange => Keyword::InRange.as_str(),
        }
    }

    /// Word comparators need whitespace on both sides.
    pub fn is_word(self) -> bool {
        matches!(self, ComparisonType::InRange)
    }
}

/// Operator linking a boolean statement to the next one in its chain.
///
/// `AND` and `OR` bind equally; the chain is read strictly left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BooleanOperator {
    /// Logical AND (`AND`)
    And,
    /// Logical OR (`OR`)
    Or,
}

impl BooleanOperator {
    pub fn from_keyword(keyword: Keyword) -> Option<Self> {
        match keyword {
            Keyword::And => Some(BooleanOperator::And),
            Keyword::Or => Some(BooleanOperator::Or),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BooleanOperator::And => Keyword::And.as_str(),
            BooleanOperator::Or => Keyword::Or.as_str(),
        }
    }
}

/// Sort direction of one `ORDERBY` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn from_keyword(keyword: Keyword) -> Option<Self> {
        match keyword {
            Keyword::Asc => Some(SortDirection::Ascending),
            Keyword::Desc => Some(SortDirection::Descending),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Ascending => Keyword::Asc.as_str(),
            SortDirection::Descending => Keyword::Desc.as_str(),
        }
    }
}
