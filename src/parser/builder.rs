use crate::ast::{
    BooleanExpression, BooleanOperator, BooleanStatement, Command, Count, FieldPath, Ordering,
    Pick, Query, SortDirection, WrapperBooleanStatement,
};
use crate::error::ParseErrorKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CommandKind {
    Pick,
    Count,
}

/// A boolean chain still being read: one for the `IF` clause and one per
/// open group above it.
#[derive(Debug, Default)]
struct ChainFrame {
    statements: Vec<BooleanStatement>,
    operators: Vec<BooleanOperator>,
    /// Negation of the group this frame becomes, unused for the root
    negated: bool,
}

impl ChainFrame {
    /// Links the statements into a chain, head first.
    fn link(self) -> Option<BooleanStatement> {
        BooleanStatement::linked(self.statements, self.operators)
    }
}

/// Mutable construction state behind the immutable [`Query`].
///
/// The parser states write into it as they recognize tokens; it is consumed
/// by [`QueryBuilder::build`] and never outlives the parse.
#[derive(Debug, Default)]
pub(crate) struct QueryBuilder {
    kind: Option<CommandKind>,
    type_name: Option<String>,
    alias: Option<String>,
    if_clause: Option<BooleanStatement>,
    chains: Vec<ChainFrame>,
    order_keys: Vec<(FieldPath, SortDirection)>,
    limit: Option<u64>,
    offset: Option<u64>,
    max_depth: usize,
}

impl QueryBuilder {
    pub(crate) fn start_command(&mut self, kind: CommandKind) {
        self.kind = Some(kind);
    }

    pub(crate) fn set_type_name(&mut self, name: String) {
        self.type_name = Some(name);
    }

    pub(crate) fn set_alias(&mut self, alias: String) {
        self.alias = Some(alias);
    }

    pub(crate) fn open_chain(&mut self) {
        self.chains.push(ChainFrame::default());
    }

    /// Opens a parenthesized group inside the current chain.
    pub(crate) fn open_group(&mut self, negated: bool, max_depth: usize) -> Result<(), ParseErrorKind> {
        let depth = self.chains.len();
        if depth > max_depth {
            return Err(ParseErrorKind::NestingTooDeep(max_depth));
        }
        self.chains.push(ChainFrame {
            negated,
            ..ChainFrame::default()
        });
        self.max_depth = self.max_depth.max(depth);
        Ok(())
    }

    pub(crate) fn push_statement(&mut self, expression: BooleanExpression, negated: bool) {
        if let Some(frame) = self.chains.last_mut() {
            frame.statements.push(BooleanStatement::new(expression, negated));
        }
    }

    pub(crate) fn push_operator(&mut self, op: BooleanOperator) {
        if let Some(frame) = self.chains.last_mut() {
            frame.operators.push(op);
        }
    }

    /// Closes the innermost group and appends it to the enclosing chain.
    pub(crate) fn close_group(&mut self) -> Result<(), ParseErrorKind> {
        // the root frame is never closed as a group
        let open = self.chains.len() > 1;
        let frame = self
            .chains
            .pop_if(|_| open)
            .ok_or(ParseErrorKind::UnbalancedGroup)?;
        let negated = frame.negated;
        let wrapped = frame.link().ok_or(ParseErrorKind::MissingToken("boolean term"))?;
        self.push_statement(
            BooleanExpression::Wrapper(WrapperBooleanStatement {
                wrapped: Box::new(wrapped),
            }),
            negated,
        );
        Ok(())
    }

    /// Closes the `IF` chain.
    pub(crate) fn close_chain(&mut self) -> Result<(), ParseErrorKind> {
        if self.chains.len() > 1 {
            return Err(ParseErrorKind::UnclosedGroup);
        }
        let frame = self.chains.pop().ok_or(ParseErrorKind::IncompleteQuery)?;
        self.if_clause = Some(frame.link().ok_or(ParseErrorKind::MissingToken("boolean term"))?);
        Ok(())
    }

    pub(crate) fn push_order_key(&mut self, field: FieldPath) {
        self.order_keys.push((field, SortDirection::default()));
    }

    pub(crate) fn set_last_direction(&mut self, direction: SortDirection) {
        if let Some((_, last)) = self.order_keys.last_mut() {
            *last = direction;
        }
    }

    pub(crate) fn set_limit(&mut self, limit: u64) {
        self.limit = Some(limit);
    }

    pub(crate) fn set_offset(&mut self, offset: u64) {
        self.offset = Some(offset);
    }

    /// Deepest group nesting seen so far.
    pub(crate) fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub(crate) fn build(self) -> Result<Query, ParseErrorKind> {
        if !self.chains.is_empty() {
            return Err(ParseErrorKind::IncompleteQuery);
        }
        let kind = self.kind.ok_or(ParseErrorKind::IncompleteQuery)?;
        let attribute_holder_name = self.type_name.ok_or(ParseErrorKind::MissingToken("type name"))?;

        let command = match kind {
            CommandKind::Pick => Command::Pick(Pick {
                attribute_holder_name,
                alias: self.alias,
                if_clause: self.if_clause,
                ordering: Ordering::from_keys(self.order_keys),
                limit: self.limit,
                offset: self.offset,
            }),
            CommandKind::Count => Command::Count(Count {
                attribute_holder_name,
                alias: self.alias,
                if_clause: self.if_clause,
            }),
        };
        Ok(Query::new(command))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BooleanExpression, ContextVariable, TypedExpression};

    fn typed(name: &str) -> BooleanExpression {
        BooleanExpression::Typed(TypedExpression {
            field: ContextVariable::Field(FieldPath::parse("s").unwrap()),
            type_name: name.to_string(),
        })
    }

    #[test]
    fn test_close_group_keeps_the_root_chain() {
        let mut builder = QueryBuilder::default();
        builder.open_chain();
        builder.push_statement(typed("Circle"), false);

        assert_eq!(builder.close_group(), Err(ParseErrorKind::UnbalancedGroup));
        builder.close_chain().unwrap();
        let root = builder.if_clause.as_ref().unwrap();
        assert_eq!(root.as_typed().unwrap().type_name, "Circle");
    }

    #[test]
    fn test_close_group_wraps_the_inner_chain() {
        let mut builder = QueryBuilder::default();
        builder.open_chain();
        builder.open_group(true, 4).unwrap();
        builder.push_statement(typed("Circle"), false);
        builder.push_operator(BooleanOperator::Or);
        builder.push_statement(typed("Square"), false);
        builder.close_group().unwrap();
        builder.close_chain().unwrap();

        let root = builder.if_clause.as_ref().unwrap();
        assert!(root.negated);
        assert!(root.is_last());
        let wrapper = root.as_wrapper().unwrap();
        assert_eq!(wrapper.wrapped.chain_len(), 2);
        assert_eq!(wrapper.wrapped.next_operator(), Some(BooleanOperator::Or));
    }

    #[test]
    fn test_close_group_without_terms() {
        let mut builder = QueryBuilder::default();
        builder.open_chain();
        builder.open_group(false, 4).unwrap();
        assert_eq!(
            builder.close_group(),
            Err(ParseErrorKind::MissingToken("boolean term"))
        );
    }
}
