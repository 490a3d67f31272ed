//! Text rendering of parsed queries.
//!
//! This module turns a [`Query`] back into text. It is the reference consumer
//! of [`BooleanStatementIterator`]: the filter is rendered entirely from the
//! iterator's events.
//!
//! # Features
//!
//! - **Canonical text** via [`to_query_string()`] - parses back to an equal query
//! - **Outline** via [`describe()`] - one clause per line, arguments inlined
//!
//! # Examples
//!
//! ```
//! use pick_lang::{Parser, Value};
//! use pick_lang::output::{describe, to_query_string};
//!
//! let mut parser = Parser::new(vec![Value::Integer(3)]);
//! let query = parser.parse("PICK Foo   f IF  f.a != ?").unwrap();
//!
//! assert_eq!(to_query_string(&query), "PICK Foo f IF !f.a=?");
//! assert_eq!(describe(&query), "PICK Foo f\n  IF !f.a = 3");
//! ```

use crate::ast::{
    BooleanExpression, BooleanOperator, BooleanStatement, Command, ContextVariable, Ordering,
    Query, SortDirection, WrapperBooleanStatement,
};
use crate::iterator::{BooleanStatementCallback, BooleanStatementIterator};

pub struct QueryPrinter {
    /// Write argument values instead of `?`
    inline_args: bool,
    /// Clause separator
    separator: &'static str,
}

impl QueryPrinter {
    pub fn new(inline_args: bool, separator: &'static str) -> Self {
        QueryPrinter {
            inline_args,
            separator,
        }
    }

    pub fn print(&self, query: &Query) -> String {
        let command = query.command();
        let mut result = match command {
            Command::Pick(_) => "PICK ".to_string(),
            Command::Count(_) => "COUNT ".to_string(),
        };
        result.push_str(command.attribute_holder_name());
        if let Some(alias) = command.alias() {
            result.push(' ');
            result.push_str(alias);
        }

        if let Some(root) = command.if_clause() {
            result.push_str(self.separator);
            result.push_str("IF ");
            result.push_str(&self.print_condition(root));
        }

        if let Command::Pick(pick) = command {
            if let Some(ordering) = &pick.ordering {
                result.push_str(self.separator);
                result.push_str("ORDERBY ");
                result.push_str(&self.print_ordering(ordering));
            }
            if let Some(limit) = pick.limit {
                result.push_str(self.separator);
                result.push_str(&format!("LIMIT {}", limit));
            }
            if let Some(offset) = pick.offset {
                result.push_str(self.separator);
                result.push_str(&format!("OFFSET {}", offset));
            }
        }
        result
    }

    /// Renders a boolean chain.
    pub fn print_condition(&self, root: &BooleanStatement) -> String {
        let mut writer = ConditionWriter {
            printer: self,
            out: String::new(),
        };
        BooleanStatementIterator::iterate(root, &mut writer);
        writer.out
    }

    fn print_ordering(&self, ordering: &Ordering) -> String {
        let keys: Vec<String> = ordering
            .iter()
            .map(|key| match key.direction {
                SortDirection::Ascending => key.field.to_string(),
                SortDirection::Descending => format!("{} {}", key.field, key.direction.as_str()),
            })
            .collect();
        keys.join(", ")
    }

    fn print_variable(&self, variable: &ContextVariable) -> String {
        match variable {
            ContextVariable::Field(path) => path.to_string(),
            ContextVariable::Parameter(arg) if self.inline_args => arg.value.to_string(),
            ContextVariable::Parameter(_) => "?".to_string(),
        }
    }

    fn print_leaf(&self, statement: &BooleanStatement) -> String {
        let negation = if statement.negated { "!" } else { "" };
        match &statement.expression {
            BooleanExpression::Comparison(c) => {
                let symbol = if c.comparison_type.is_word() || self.inline_args {
                    format!(" {} ", c.comparison_type.symbol())
                } else {
                    c.comparison_type.symbol().to_string()
                };
                format!(
                    "{}{}{}{}",
                    negation,
                    self.print_variable(&c.left),
                    symbol,
                    self.print_variable(&c.right)
                )
            }
            BooleanExpression::Typed(t) => {
                format!("{}{} TYPED {}", negation, self.print_variable(&t.field), t.type_name)
            }
            // Groups are written by the wrapper events
            BooleanExpression::Wrapper(_) => String::new(),
        }
    }
}

struct ConditionWriter<'a> {
    printer: &'a QueryPrinter,
    out: String,
}

impl BooleanStatementCallback for ConditionWriter<'_> {
    fn on_boolean_statement(&mut self, statement: &BooleanStatement, operator: BooleanOperator) {
        self.out.push_str(&self.printer.print_leaf(statement));
        self.out.push(' ');
        self.out.push_str(operator.as_str());
        self.out.push(' ');
    }

    fn on_last_boolean_statement(&mut self, statement: &BooleanStatement) {
        self.out.push_str(&self.printer.print_leaf(statement));
    }

    fn on_wrapper_opened(&mut self, statement: &BooleanStatement, _wrapper: &WrapperBooleanStatement) {
        if statement.negated {
            self.out.push('!');
        }
        self.out.push('(');
    }

    fn on_wrapper_closed(&mut self, _statement: &BooleanStatement, _wrapper: &WrapperBooleanStatement) {
        self.out.push(')');
    }
}

// Convenience functions

/// Renders canonical query text.
///
/// Parameters are written as `?`, so parsing the result with the same
/// arguments yields an equal [`Query`]. `!=` comes out as a negated `=`.
pub fn to_query_string(query: &Query) -> String {
    QueryPrinter::new(false, " ").print(query)
}

/// Renders a readable outline with bound argument values inlined.
pub fn describe(query: &Query) -> String {
    QueryPrinter::new(true, "\n  ").print(query)
}
