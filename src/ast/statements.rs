use std::fmt;

use crate::ast::{BooleanOperator, ComparisonType, ContextVariable};

/// One node in a chain of boolean statements.
///
/// The chain is singly linked and singly owned. The operator and the next
/// node are stored together, so an operator exists exactly when a next node
/// does. `AND` and `OR` have no relative precedence: the chain is read left to
/// right and a [`WrapperBooleanStatement`] is the only way to group.
///
/// `Clone`, `PartialEq`, `Debug` and `Drop` walk the chain in a loop, so a
/// chain of any length costs no stack beyond its group nesting.
pub struct BooleanStatement {
    /// What this node tests
    pub expression: BooleanExpression,

    /// Prefix negation (`!`)
    pub negated: bool,

    /// Operator and following node, `None` at the end of the chain
    pub next: Option<(BooleanOperator, Box<BooleanStatement>)>,
}

impl BooleanStatement {
    pub fn new(expression: BooleanExpression, negated: bool) -> Self {
        BooleanStatement {
            expression,
            negated,
            next: None,
        }
    }

    /// Links `statements` head first, joining neighbours with `operators`.
    ///
    /// Returns `None` for an empty list. Extra operators are ignored.
    pub(crate) fn linked(
        mut statements: Vec<BooleanStatement>,
        operators: Vec<BooleanOperator>,
    ) -> Option<BooleanStatement> {
        let mut chain = statements.pop()?;
        let joins = statements.len();
        for (mut statement, op) in statements
            .into_iter()
            .rev()
            .zip(operators.into_iter().take(joins).rev())
        {
            statement.next = Some((op, Box::new(chain)));
            chain = statement;
        }
        Some(chain)
    }

    pub fn next_statement(&self) -> Option<&BooleanStatement> {
        self.next.as_ref().map(|(_, next)| next.as_ref())
    }

    pub fn next_operator(&self) -> Option<BooleanOperator> {
        self.next.as_ref().map(|(op, _)| *op)
    }

    pub fn is_last(&self) -> bool {
        self.next.is_none()
    }

    pub fn as_comparison(&self) -> Option<&ComparisonExpression> {
        match &self.expression {
            BooleanExpression::Comparison(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_typed(&self) -> Option<&TypedExpression> {
        match &self.expression {
            BooleanExpression::Typed(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_wrapper(&self) -> Option<&WrapperBooleanStatement> {
        match &self.expression {
            BooleanExpression::Wrapper(w) => Some(w),
            _ => None,
        }
    }

    /// Iterates over this node and every node after it in the same chain.
    ///
    /// Does not descend into groups.
    pub fn chain(&self) -> Chain<'_> {
        Chain {
            current: Some(self),
        }
    }

    /// Number of nodes in this chain, not counting grouped children.
    pub fn chain_len(&self) -> usize {
        self.chain().count()
    }
}

impl Clone for BooleanStatement {
    fn clone(&self) -> Self {
        let statements = self
            .chain()
            .map(|s| BooleanStatement::new(s.expression.clone(), s.negated))
            .collect();
        let operators = self.chain().filter_map(|s| s.next_operator()).collect();
        BooleanStatement::linked(statements, operators)
            .unwrap_or_else(|| BooleanStatement::new(self.expression.clone(), self.negated))
    }
}

impl PartialEq for BooleanStatement {
    fn eq(&self, other: &Self) -> bool {
        let mut left = self.chain();
        let mut right = other.chain();
        loop {
            match (left.next(), right.next()) {
                (None, None) => return true,
                (Some(a), Some(b))
                    if a.negated == b.negated
                        && a.next_operator() == b.next_operator()
                        && a.expression == b.expression => {}
                _ => return false,
            }
        }
    }
}

impl fmt::Debug for BooleanStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.chain().map(ChainLink)).finish()
    }
}

impl Drop for BooleanStatement {
    fn drop(&mut self) {
        let mut next = self.next.take();
        while let Some((_, mut statement)) = next {
            next = statement.next.take();
        }
    }
}

/// One node of a chain printed without its successor.
struct ChainLink<'a>(&'a BooleanStatement);

impl fmt::Debug for ChainLink<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BooleanStatement")
            .field("expression", &self.0.expression)
            .field("negated", &self.0.negated)
            .field("next_operator", &self.0.next_operator())
            .finish()
    }
}

/// Iterator over a boolean statement chain, see [`BooleanStatement::chain`].
pub struct Chain<'a> {
    current: Option<&'a BooleanStatement>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a BooleanStatement;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.current?;
        self.current = item.next_statement();
        Some(item)
    }
}

/// The test performed by a single boolean statement.
#[derive(Debug, Clone, PartialEq)]
pub enum BooleanExpression {
    /// Comparison between two context variables
    ///
    /// # Example
    /// ```text
    /// b.name=?
    /// ```
    Comparison(ComparisonExpression),

    /// Runtime type test
    ///
    /// # Example
    /// ```text
    /// s TYPED Circle
    /// ```
    Typed(TypedExpression),

    /// Parenthesized group
    ///
    /// # Example
    /// ```text
    /// (a=? OR b=?)
    /// ```
    Wrapper(WrapperBooleanStatement),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonExpression {
    pub left: ContextVariable,
    pub comparison_type: ComparisonType,
    pub right: ContextVariable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedExpression {
    pub field: ContextVariable,
    pub type_name: String,
}

/// A group that takes part in the outer chain like any leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct WrapperBooleanStatement {
    /// Head of the grouped chain
    pub wrapped: Box<BooleanStatement>,
}
