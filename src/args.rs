//! Positional argument binding.
//!
//! The arguments of a query are an ordered slice consumed left to right, one
//! slot per `?`. The cursor is a plain index, so a pass over a fragment can be
//! repeated from the same slot with [`QueryArgs::mark_query_arg_position`] and
//! [`QueryArgs::reset_query_arg_position`].

use crate::error::ParseErrorKind;
use crate::value::Value;

/// An argument copied out of the argument array at parse time.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundArgument {
    /// Zero-based slot the value was taken from
    pub position: usize,
    pub value: Value,
}

/// Ordered query arguments with a resumable cursor.
#[derive(Debug, Clone, Default)]
pub struct QueryArgs {
    values: Vec<Value>,
    cursor: usize,
    mark: usize,
}

impl QueryArgs {
    pub fn new(values: Vec<Value>) -> Self {
        QueryArgs {
            values,
            cursor: 0,
            mark: 0,
        }
    }

    /// Consumes the next argument.
    ///
    /// Fails once every supplied argument has been taken.
    pub fn next_query_arg(&mut self) -> Result<BoundArgument, ParseErrorKind> {
        let value = self
            .values
            .get(self.cursor)
            .cloned()
            .ok_or(ParseErrorKind::ArgumentsExhausted {
                position: self.cursor,
                supplied: self.values.len(),
            })?;
        let position = self.cursor;
        self.cursor += 1;
        Ok(BoundArgument { position, value })
    }

    /// Remembers the current cursor.
    pub fn mark_query_arg_position(&mut self) {
        self.mark = self.cursor;
    }

    /// Rewinds the cursor to the last mark, or to the start if none was set.
    pub fn reset_query_arg_position(&mut self) {
        self.cursor = self.mark;
    }

    /// Index of the next argument to be consumed.
    pub fn position(&self) -> usize {
        self.cursor
    }

    pub(crate) fn set_position(&mut self, position: usize) {
        self.cursor = position.min(self.values.len());
    }

    /// Arguments not yet consumed.
    pub fn remaining(&self) -> usize {
        self.values.len() - self.cursor
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

impl From<Vec<Value>> for QueryArgs {
    fn from(values: Vec<Value>) -> Self {
        QueryArgs::new(values)
    }
}
