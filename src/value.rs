use std::fmt;

use rust_decimal::Decimal;

/// An externally supplied query argument.
///
/// Arguments are handed to the parser in order and copied into the tree at
/// each `?`. The parser never inspects them; type checks are up to the
/// accessor that executes the query.
///
/// # Examples
///
/// ```
/// use pick_lang::Value;
/// use rust_decimal::Decimal;
///
/// let name = Value::from("lonesome foo");
/// let limit = Value::Integer(10);
/// let price = Value::Decimal(Decimal::new(1999, 2));
///
/// // Range argument for INRANGE
/// let range = Value::Array(vec![Value::Integer(1), Value::Integer(5)]);
/// assert!(range.as_range().is_some());
/// # let _ = (name, limit, price);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Null
    Null,

    /// Boolean (true/false)
    Boolean(bool),

    /// Integer number
    Integer(i64),

    /// Floating-point number without an exact decimal form
    Float(f64),

    /// Exact decimal number
    Decimal(Decimal),

    /// UTF-8 string
    String(String),

    /// List of values, e.g. the `[low, high]` bounds of `INRANGE`
    Array(Vec<Value>),
}

impl Value {
    /// Human-readable type name
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Decimal(_) => "decimal",
            Value::String(_) => "string",
            Value::Array(_) => "array",
        }
    }

    /// Get as integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Lower and upper bound of a two-element array.
    pub fn as_range(&self) -> Option<(&Value, &Value)> {
        match self {
            Value::Array(items) if items.len() == 2 => Some((&items[0], &items[1])),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::Decimal(d) => write!(f, "{}", d),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Value::Decimal(d)
    }
}
