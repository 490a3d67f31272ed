//! Documentation content for the pick CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Grammar,
    Expressions,
    Arguments,
    Ordering,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "grammar" | "syntax" => Some(Self::Grammar),
            "expressions" | "expression" | "if" => Some(Self::Expressions),
            "arguments" | "args" | "parameters" => Some(Self::Arguments),
            "ordering" | "orderby" | "paging" => Some(Self::Ordering),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"PICK DOCUMENTATION

Queries select records of one type, filter them with a boolean expression and
optionally sort and page the result. Values come from positional arguments.

DOCUMENTATION CATEGORIES

  grammar           Commands, clauses and their order
  expressions       Comparisons, type tests, grouping and negation
  arguments         Positional '?' parameters and how they bind
  ordering          ORDERBY, LIMIT and OFFSET

QUICK REFERENCE

  PICK Type alias               Fetch records
  COUNT Type alias              Count records
  IF a.x=? AND a.y>?            Filter
  ORDERBY a.x DESC, a.y         Sort
  LIMIT 10 OFFSET 20            Page

Run 'pick doc <category>' for detailed documentation.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    match DocCategory::from_name(name) {
        Some(DocCategory::Grammar) => Ok(GRAMMAR_DOC),
        Some(DocCategory::Expressions) => Ok(EXPRESSIONS_DOC),
        Some(DocCategory::Arguments) => Ok(ARGUMENTS_DOC),
        Some(DocCategory::Ordering) => Ok(ORDERING_DOC),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

const GRAMMAR_DOC: &str = r#"GRAMMAR - Commands and Clauses

COMMANDS
  PICK Type [alias] [IF expr] [ORDERBY keys] [LIMIT n] [OFFSET n]
  COUNT Type [alias] [IF expr]

    Example:
      PICK Bar b IF b.name=? ORDERBY b.name LIMIT 10 OFFSET 5

    Constraints:
      - Keywords are case-sensitive (PICK, not pick)
      - Clauses appear in the order shown, each at most once
      - The alias must be a plain identifier and not a keyword
      - COUNT takes no ORDERBY, LIMIT or OFFSET

IDENTIFIERS
  Type names and field paths are dot-separated identifiers.

    Examples:
      Bar
      acme.Bar
      b.address.city
"#;

const EXPRESSIONS_DOC: &str = r#"EXPRESSIONS - The IF Clause

COMPARISONS
  =     Equal
  !=    Not equal (a negated '=')
  >     Greater
  >=    Greater or equal
  <     Lower
  <=    Lower or equal
  INRANGE   Within a [low, high] range argument

    Examples:
      b.age>=?
      b.name != ?
      b.total INRANGE ?

TYPE TESTS
  field TYPED TypeName

    Example:
      s TYPED Circle

CHAINING
  AND, OR

    Evaluated strictly left to right. AND does not bind tighter than OR:
      a=? OR b=? AND c=?      is ((a OR b) AND c)

GROUPING AND NEGATION
  ( ... )   Group a sub-expression
  !         Negate the following term or group

    Examples:
      a=? OR (b=? AND c=?)
      !(a=? OR b=?)
"#;

const ARGUMENTS_DOC: &str = r#"ARGUMENTS - Positional Parameters

  ?
    Each '?' takes the next argument, left to right.

    Example:
      Query:  PICK Foo f IF f.a=? AND f.b=?
      Args:   [1, 2]
      Binds:  f.a = 1, f.b = 2

    Constraints:
      - There must be at least as many arguments as '?'
      - Values are copied into the query when it is parsed
      - Arguments are a JSON array: numbers, strings, booleans, null, arrays
"#;

const ORDERING_DOC: &str = r#"ORDERING - Sorting and Paging

ORDERBY
  ORDERBY field [ASC|DESC] {, field [ASC|DESC]}
    Later keys only break ties of earlier ones. Default is ASC.

    Example:
      ORDERBY o.total DESC, o.id

LIMIT / OFFSET
  LIMIT n
  OFFSET n
    Non-negative integer literals.

    Example:
      PICK Foo LIMIT 0 OFFSET 0
"#;
