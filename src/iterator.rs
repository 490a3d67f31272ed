//! Linear traversal of boolean statement chains.
//!
//! Renderers and query-backend translators implement
//! [`BooleanStatementCallback`] and let [`BooleanStatementIterator`] do the
//! walking. The event stream is enough to rebuild fully parenthesized output.

use crate::ast::{BooleanOperator, BooleanStatement, WrapperBooleanStatement};

/// Receives the events of a chain traversal.
pub trait BooleanStatementCallback {
    /// A statement that is followed by another, and the operator joining them.
    fn on_boolean_statement(&mut self, statement: &BooleanStatement, operator: BooleanOperator);

    /// The last statement of a chain (top-level or grouped).
    fn on_last_boolean_statement(&mut self, statement: &BooleanStatement);

    /// Before the grouped chain of `statement` is walked.
    fn on_wrapper_opened(&mut self, _statement: &BooleanStatement, _wrapper: &WrapperBooleanStatement) {}

    /// After the grouped chain of `statement` is walked.
    fn on_wrapper_closed(&mut self, _statement: &BooleanStatement, _wrapper: &WrapperBooleanStatement) {}
}

/// Stateless pre-order, depth-first walker.
///
/// For every node, in chain order: if it is a group, `on_wrapper_opened`,
/// the grouped chain, `on_wrapper_closed`; then `on_boolean_statement` with
/// the operator to the next node, or `on_last_boolean_statement` for the last
/// node of its chain.
///
/// # Examples
///
/// ```
/// use pick_lang::{BooleanStatementCallback, BooleanStatementIterator, Parser, Value};
/// use pick_lang::ast::{BooleanOperator, BooleanStatement};
///
/// struct Counter(usize);
///
/// impl BooleanStatementCallback for Counter {
///     fn on_boolean_statement(&mut self, _: &BooleanStatement, _: BooleanOperator) {
///         self.0 += 1;
///     }
///     fn on_last_boolean_statement(&mut self, _: &BooleanStatement) {
///         self.0 += 1;
///     }
/// }
///
/// let query = Parser::new(vec![Value::Integer(1), Value::Integer(2)])
///     .parse("PICK Foo f IF f.a=? AND f.b=?")
///     .unwrap();
/// let mut counter = Counter(0);
/// BooleanStatementIterator::iterate(query.command().if_clause().unwrap(), &mut counter);
/// assert_eq!(counter.0, 2);
/// ```
pub struct BooleanStatementIterator;

impl BooleanStatementIterator {
    pub fn iterate<C: BooleanStatementCallback + ?Sized>(root: &BooleanStatement, callback: &mut C) {
        for statement in root.chain() {
            if let Some(wrapper) = statement.as_wrapper() {
                callback.on_wrapper_opened(statement, wrapper);
                Self::iterate(&wrapper.wrapped, callback);
                callback.on_wrapper_closed(statement, wrapper);
            }
            match statement.next_operator() {
                Some(op) => callback.on_boolean_statement(statement, op),
                None => callback.on_last_boolean_statement(statement),
            }
        }
    }
}
