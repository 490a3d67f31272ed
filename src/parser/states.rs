//! Parsing states, one per grammar production.
//!
//! The driver in [`crate::parser`] keeps these on an explicit stack and feeds
//! every character to the state on top. A state answers with a
//! [`Transition`]: keep the character, finish and hand over to successor
//! states, or give buffered text back to the states underneath.

use crate::args::QueryArgs;
use crate::ast::keywords::{self, GROUP_CLOSE, GROUP_OPEN, LIST_SEPARATOR, NEGATION, WILDCARD};
use crate::ast::expressions::{is_identifier, is_path_char};
use crate::ast::{
    BooleanExpression, BooleanOperator, ComparisonExpression, ComparisonType, ContextVariable,
    FieldPath, Keyword, SortDirection, TypedExpression,
};
use crate::config::ParserConfig;
use crate::error::ParseErrorKind;
use crate::parser::builder::{CommandKind, QueryBuilder};

/// What a state may touch while handling a character.
pub(crate) struct Context<'a> {
    pub builder: &'a mut QueryBuilder,
    pub args: &'a mut QueryArgs,
    pub config: &'a ParserConfig,
}

/// Result of feeding one character to the state on top of the stack.
///
/// Successor lists are pushed in order, so the last entry ends up on top.
#[derive(Debug)]
pub(crate) enum Transition {
    /// Character consumed, the (updated) state stays on top
    Stay(ParseState),
    /// Character consumed, the state is replaced by its successors
    Done(Vec<ParseState>),
    /// Character not consumed; the state is replaced and the character goes
    /// to the new top
    Forward(Vec<ParseState>),
    /// Like `Forward`, but the buffered word is re-fed first because it
    /// belongs to an enclosing production
    Replay(String, Vec<ParseState>),
}

/// Position in the fixed clause order of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Stage {
    Alias,
    If,
    OrderBy,
    Limit,
    Offset,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Scope {
    /// The chain directly under `IF`
    Root,
    /// A parenthesized group
    Group,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NumberTarget {
    Limit,
    Offset,
}

/// Which side of a comparison a variable fills.
#[derive(Debug)]
pub(crate) enum Role {
    Left {
        negated: bool,
    },
    Right {
        left: ContextVariable,
        comparison_type: ComparisonType,
        negated: bool,
    },
}

#[derive(Debug)]
pub(crate) enum ParseState {
    /// Discards whitespace, then hands the next character to the state below
    Whitespace,
    /// `PICK` or `COUNT`
    Command { word: String },
    /// Queried type after the command keyword
    TypeName { name: String },
    /// Alias and the optional clauses that follow the type name
    Clauses { word: String, stage: Stage, count: bool },
    /// Start of a boolean term: negation, group or comparison
    Term { negated: bool },
    /// Field path or `?`
    Variable { buf: String, role: Role },
    /// Symbolic comparator, `INRANGE` or `TYPED` after a left operand
    Comparator {
        left: ContextVariable,
        negated: bool,
        symbol: String,
        word: String,
    },
    /// Type name after `TYPED`
    TypeTest {
        field: ContextVariable,
        negated: bool,
        name: String,
    },
    /// `AND`/`OR` between terms, or the end of the chain
    Joiner { word: String, scope: Scope },
    /// Field of an `ORDERBY` key
    OrderKey { path: String },
    /// Direction, separator or end of the `ORDERBY` clause
    OrderTail { word: String, direction_seen: bool },
    /// Literal after `LIMIT` or `OFFSET`
    Number { target: NumberTarget, raw: String },
}

impl ParseState {
    /// States present before the first character of a query.
    pub(crate) fn initial() -> Vec<ParseState> {
        vec![
            ParseState::Command {
                word: String::new(),
            },
            ParseState::Whitespace,
        ]
    }

    pub(crate) fn name(&self) -> &'static str {
        match self {
            ParseState::Whitespace => "whitespace",
            ParseState::Command { .. } => "command",
            ParseState::TypeName { .. } => "type_name",
            ParseState::Clauses { .. } => "clauses",
            ParseState::Term { .. } => "term",
            ParseState::Variable { .. } => "variable",
            ParseState::Comparator { .. } => "comparator",
            ParseState::TypeTest { .. } => "type_test",
            ParseState::Joiner { .. } => "joiner",
            ParseState::OrderKey { .. } => "order_key",
            ParseState::OrderTail { .. } => "order_tail",
            ParseState::Number { .. } => "number",
        }
    }

    pub(crate) fn handle_char(self, c: char, ctx: &mut Context<'_>) -> Result<Transition, ParseErrorKind> {
        match self {
            ParseState::Whitespace => {
                if c.is_whitespace() {
                    Ok(Transition::Stay(ParseState::Whitespace))
                } else {
                    Ok(Transition::Forward(vec![]))
                }
            }

            ParseState::Command { mut word } => {
                if c.is_ascii_alphabetic() {
                    word.push(c);
                    Ok(Transition::Stay(ParseState::Command { word }))
                } else if c.is_whitespace() && !word.is_empty() {
                    let count = match Keyword::lookup(&word) {
                        Some(Keyword::Pick) => false,
                        Some(Keyword::Count) => true,
                        _ => return Err(ParseErrorKind::UnknownKeyword(word)),
                    };
                    ctx.builder.start_command(if count {
                        CommandKind::Count
                    } else {
                        CommandKind::Pick
                    });
                    Ok(Transition::Done(vec![
                        ParseState::Clauses {
                            word: String::new(),
                            stage: Stage::Alias,
                            count,
                        },
                        ParseState::TypeName {
                            name: String::new(),
                        },
                        ParseState::Whitespace,
                    ]))
                } else {
                    Err(ParseErrorKind::UnexpectedChar(c))
                }
            }

            ParseState::TypeName { mut name } => {
                if is_path_char(c) {
                    name.push(c);
                    Ok(Transition::Stay(ParseState::TypeName { name }))
                } else if name.is_empty() {
                    Err(ParseErrorKind::MissingToken("type name"))
                } else if c.is_whitespace() {
                    finish_type_name(name, ctx)?;
                    Ok(Transition::Done(vec![ParseState::Whitespace]))
                } else {
                    Err(ParseErrorKind::UnexpectedChar(c))
                }
            }

            ParseState::Clauses { mut word, stage, count } => {
                if is_path_char(c) {
                    word.push(c);
                    Ok(Transition::Stay(ParseState::Clauses { word, stage, count }))
                } else if c.is_whitespace() {
                    if word.is_empty() {
                        Ok(Transition::Stay(ParseState::Clauses { word, stage, count }))
                    } else {
                        Ok(Transition::Done(finish_clause_word(word, stage, count, ctx)?))
                    }
                } else if !word.is_empty() {
                    Err(ParseErrorKind::UnexpectedChar(c))
                } else if c == GROUP_CLOSE {
                    Err(ParseErrorKind::UnbalancedGroup)
                } else {
                    Err(ParseErrorKind::TrailingInput(c))
                }
            }

            ParseState::Term { negated } => match c {
                NEGATION => Ok(Transition::Stay(ParseState::Term { negated: !negated })),
                GROUP_OPEN => {
                    ctx.builder.open_group(negated, ctx.config.max_group_depth)?;
                    Ok(Transition::Done(vec![
                        ParseState::Joiner {
                            word: String::new(),
                            scope: Scope::Group,
                        },
                        ParseState::Term { negated: false },
                        ParseState::Whitespace,
                    ]))
                }
                c if c.is_whitespace() => Ok(Transition::Stay(ParseState::Term { negated })),
                c if c == WILDCARD || c.is_ascii_alphabetic() || c == '_' => {
                    Ok(Transition::Forward(vec![ParseState::Variable {
                        buf: String::new(),
                        role: Role::Left { negated },
                    }]))
                }
                GROUP_CLOSE => Err(ParseErrorKind::MissingToken("boolean term")),
                c => Err(ParseErrorKind::UnexpectedChar(c)),
            },

            ParseState::Variable { mut buf, role } => {
                if buf.is_empty() && c == WILDCARD {
                    let arg = ctx.args.next_query_arg()?;
                    let next = complete_variable(ContextVariable::Parameter(arg), role, ctx);
                    Ok(Transition::Done(next))
                } else if is_path_char(c) {
                    buf.push(c);
                    Ok(Transition::Stay(ParseState::Variable { buf, role }))
                } else if buf.is_empty() {
                    Err(ParseErrorKind::MissingToken("operand"))
                } else {
                    let variable = field_variable(buf)?;
                    Ok(Transition::Forward(complete_variable(variable, role, ctx)))
                }
            }

            ParseState::Comparator {
                left,
                negated,
                mut symbol,
                mut word,
            } => {
                if word.is_empty() && keywords::is_comparator_char(c) {
                    symbol.push(c);
                    Ok(Transition::Stay(ParseState::Comparator {
                        left,
                        negated,
                        symbol,
                        word,
                    }))
                } else if !symbol.is_empty() {
                    let (comparison_type, toggles) = keywords::comparator(&symbol)
                        .ok_or(ParseErrorKind::UnknownKeyword(symbol))?;
                    let next = right_operand(left, comparison_type, negated ^ toggles);
                    if c.is_whitespace() {
                        Ok(Transition::Done(next))
                    } else {
                        Ok(Transition::Forward(next))
                    }
                } else if c.is_ascii_alphabetic() {
                    word.push(c);
                    Ok(Transition::Stay(ParseState::Comparator {
                        left,
                        negated,
                        symbol,
                        word,
                    }))
                } else if word.is_empty() {
                    Err(ParseErrorKind::MissingToken("comparator or TYPED"))
                } else if c.is_whitespace() {
                    match Keyword::lookup(&word) {
                        Some(Keyword::InRange) => Ok(Transition::Done(right_operand(
                            left,
                            ComparisonType::InRange,
                            negated,
                        ))),
                        Some(Keyword::Typed) => Ok(Transition::Done(vec![
                            ParseState::TypeTest {
                                field: left,
                                negated,
                                name: String::new(),
                            },
                            ParseState::Whitespace,
                        ])),
                        _ => Err(ParseErrorKind::UnknownKeyword(word)),
                    }
                } else {
                    Err(ParseErrorKind::UnexpectedChar(c))
                }
            }

            ParseState::TypeTest {
                field,
                negated,
                mut name,
            } => {
                if is_path_char(c) {
                    name.push(c);
                    Ok(Transition::Stay(ParseState::TypeTest {
                        field,
                        negated,
                        name,
                    }))
                } else {
                    finish_type_test(field, negated, name, ctx)?;
                    Ok(Transition::Forward(vec![]))
                }
            }

            ParseState::Joiner { mut word, scope } => {
                if is_path_char(c) {
                    word.push(c);
                    return Ok(Transition::Stay(ParseState::Joiner { word, scope }));
                }
                if word.is_empty() {
                    return match c {
                        c if c.is_whitespace() => Ok(Transition::Stay(ParseState::Joiner { word, scope })),
                        GROUP_CLOSE if scope == Scope::Group => {
                            ctx.builder.close_group()?;
                            Ok(Transition::Done(vec![]))
                        }
                        GROUP_CLOSE => Err(ParseErrorKind::UnbalancedGroup),
                        _ => Err(ParseErrorKind::MissingToken("AND or OR")),
                    };
                }
                if let Some(op) = Keyword::lookup(&word).and_then(BooleanOperator::from_keyword) {
                    ctx.builder.push_operator(op);
                    let next = vec![
                        ParseState::Joiner {
                            word: String::new(),
                            scope,
                        },
                        ParseState::Term { negated: false },
                        ParseState::Whitespace,
                    ];
                    return if c.is_whitespace() {
                        Ok(Transition::Done(next))
                    } else {
                        Ok(Transition::Forward(next))
                    };
                }
                match scope {
                    Scope::Group => Err(ParseErrorKind::UnknownKeyword(word)),
                    Scope::Root => {
                        ctx.builder.close_chain()?;
                        Ok(Transition::Replay(word, vec![]))
                    }
                }
            }

            ParseState::OrderKey { mut path } => {
                if is_path_char(c) {
                    path.push(c);
                    Ok(Transition::Stay(ParseState::OrderKey { path }))
                } else {
                    finish_order_key(path, ctx)?;
                    Ok(Transition::Forward(vec![ParseState::OrderTail {
                        word: String::new(),
                        direction_seen: false,
                    }]))
                }
            }

            ParseState::OrderTail {
                mut word,
                direction_seen,
            } => {
                if is_path_char(c) {
                    word.push(c);
                    return Ok(Transition::Stay(ParseState::OrderTail {
                        word,
                        direction_seen,
                    }));
                }
                if word.is_empty() {
                    return if c.is_whitespace() {
                        Ok(Transition::Stay(ParseState::OrderTail {
                            word,
                            direction_seen,
                        }))
                    } else if c == LIST_SEPARATOR {
                        Ok(Transition::Done(vec![
                            ParseState::OrderKey {
                                path: String::new(),
                            },
                            ParseState::Whitespace,
                        ]))
                    } else {
                        Ok(Transition::Forward(vec![]))
                    };
                }
                match sort_direction(&word, direction_seen) {
                    Some(direction) => {
                        ctx.builder.set_last_direction(direction);
                        let next = ParseState::OrderTail {
                            word: String::new(),
                            direction_seen: true,
                        };
                        if c.is_whitespace() {
                            Ok(Transition::Stay(next))
                        } else {
                            Ok(Transition::Forward(vec![next]))
                        }
                    }
                    None => Ok(Transition::Replay(word, vec![])),
                }
            }

            ParseState::Number { target, mut raw } => {
                if c.is_whitespace() {
                    finish_number(target, raw, ctx)?;
                    Ok(Transition::Done(vec![]))
                } else {
                    raw.push(c);
                    Ok(Transition::Stay(ParseState::Number { target, raw }))
                }
            }
        }
    }

    /// Called once per state when input ends.
    ///
    /// Returns a word to re-feed to the states underneath, if the state was
    /// holding one that is not its own.
    pub(crate) fn on_end(self, ctx: &mut Context<'_>) -> Result<Option<String>, ParseErrorKind> {
        match self {
            ParseState::Whitespace => Ok(None),

            ParseState::Command { word } => match Keyword::lookup(&word) {
                _ if word.is_empty() => Err(ParseErrorKind::MissingToken("PICK or COUNT")),
                Some(Keyword::Pick | Keyword::Count) => Err(ParseErrorKind::MissingToken("type name")),
                _ => Err(ParseErrorKind::UnknownKeyword(word)),
            },

            ParseState::TypeName { name } => {
                if name.is_empty() {
                    return Err(ParseErrorKind::MissingToken("type name"));
                }
                finish_type_name(name, ctx)?;
                Ok(None)
            }

            ParseState::Clauses { word, stage, count } => {
                if word.is_empty() {
                    return Ok(None);
                }
                let next = finish_clause_word(word, stage, count, ctx)?;
                // Anything beyond the follow-up clause state is a clause body
                // that never arrived.
                if next.len() > 1 {
                    return Err(ParseErrorKind::IncompleteQuery);
                }
                Ok(None)
            }

            ParseState::Term { .. } => Err(ParseErrorKind::MissingToken("boolean term")),

            ParseState::Variable { buf, role } => {
                if buf.is_empty() {
                    return Err(ParseErrorKind::MissingToken("operand"));
                }
                let variable = field_variable(buf)?;
                match role {
                    Role::Left { .. } => Err(ParseErrorKind::MissingToken("comparator or TYPED")),
                    role @ Role::Right { .. } => {
                        complete_variable(variable, role, ctx);
                        Ok(None)
                    }
                }
            }

            ParseState::Comparator { symbol, word, .. } => {
                if symbol.is_empty() && word.is_empty() {
                    Err(ParseErrorKind::MissingToken("comparator or TYPED"))
                } else {
                    Err(ParseErrorKind::MissingToken("operand"))
                }
            }

            ParseState::TypeTest {
                field,
                negated,
                name,
            } => {
                finish_type_test(field, negated, name, ctx)?;
                Ok(None)
            }

            ParseState::Joiner { word, scope } => {
                if Keyword::lookup(&word).and_then(BooleanOperator::from_keyword).is_some() {
                    return Err(ParseErrorKind::MissingToken("boolean term"));
                }
                match scope {
                    Scope::Group => Err(ParseErrorKind::UnclosedGroup),
                    Scope::Root => {
                        ctx.builder.close_chain()?;
                        Ok((!word.is_empty()).then_some(word))
                    }
                }
            }

            ParseState::OrderKey { path } => {
                finish_order_key(path, ctx)?;
                Ok(None)
            }

            ParseState::OrderTail {
                word,
                direction_seen,
            } => {
                if word.is_empty() {
                    return Ok(None);
                }
                match sort_direction(&word, direction_seen) {
                    Some(direction) => {
                        ctx.builder.set_last_direction(direction);
                        Ok(None)
                    }
                    None => Ok(Some(word)),
                }
            }

            ParseState::Number { target, raw } => {
                finish_number(target, raw, ctx)?;
                Ok(None)
            }
        }
    }
}

fn finish_type_name(name: String, ctx: &mut Context<'_>) -> Result<(), ParseErrorKind> {
    if FieldPath::parse(&name).is_none() {
        return Err(ParseErrorKind::InvalidIdentifier(name));
    }
    ctx.builder.set_type_name(name);
    Ok(())
}

/// Decides what a complete word after the type name starts.
///
/// The first entry of the result is always the clause state that takes over
/// after the clause body.
fn finish_clause_word(
    word: String,
    stage: Stage,
    count: bool,
    ctx: &mut Context<'_>,
) -> Result<Vec<ParseState>, ParseErrorKind> {
    let clauses = |stage| ParseState::Clauses {
        word: String::new(),
        stage,
        count,
    };

    match Keyword::lookup(&word) {
        Some(Keyword::If) if stage <= Stage::If => {
            ctx.builder.open_chain();
            Ok(vec![
                clauses(Stage::OrderBy),
                ParseState::Joiner {
                    word: String::new(),
                    scope: Scope::Root,
                },
                ParseState::Term { negated: false },
                ParseState::Whitespace,
            ])
        }
        Some(Keyword::OrderBy) if !count && stage <= Stage::OrderBy => Ok(vec![
            clauses(Stage::Limit),
            ParseState::OrderKey {
                path: String::new(),
            },
            ParseState::Whitespace,
        ]),
        Some(Keyword::Limit) if !count && stage <= Stage::Limit => Ok(vec![
            clauses(Stage::Offset),
            ParseState::Number {
                target: NumberTarget::Limit,
                raw: String::new(),
            },
            ParseState::Whitespace,
        ]),
        Some(Keyword::Offset) if !count && stage <= Stage::Offset => Ok(vec![
            clauses(Stage::Done),
            ParseState::Number {
                target: NumberTarget::Offset,
                raw: String::new(),
            },
            ParseState::Whitespace,
        ]),
        Some(_) => Err(ParseErrorKind::UnknownKeyword(word)),
        None if stage == Stage::Alias => {
            if !is_identifier(&word) {
                return Err(ParseErrorKind::InvalidIdentifier(word));
            }
            ctx.builder.set_alias(word);
            Ok(vec![clauses(Stage::If)])
        }
        None => Err(ParseErrorKind::UnknownKeyword(word)),
    }
}

fn field_variable(path: String) -> Result<ContextVariable, ParseErrorKind> {
    FieldPath::parse(&path)
        .map(ContextVariable::Field)
        .ok_or(ParseErrorKind::InvalidIdentifier(path))
}

/// Successors once a variable is read: the comparator after a left operand,
/// nothing after a right operand, whose comparison is recorded here.
fn complete_variable(variable: ContextVariable, role: Role, ctx: &mut Context<'_>) -> Vec<ParseState> {
    match role {
        Role::Left { negated } => vec![
            ParseState::Comparator {
                left: variable,
                negated,
                symbol: String::new(),
                word: String::new(),
            },
            ParseState::Whitespace,
        ],
        Role::Right {
            left,
            comparison_type,
            negated,
        } => {
            ctx.builder.push_statement(
                BooleanExpression::Comparison(ComparisonExpression {
                    left,
                    comparison_type,
                    right: variable,
                }),
                negated,
            );
            vec![]
        }
    }
}

fn right_operand(left: ContextVariable, comparison_type: ComparisonType, negated: bool) -> Vec<ParseState> {
    vec![
        ParseState::Variable {
            buf: String::new(),
            role: Role::Right {
                left,
                comparison_type,
                negated,
            },
        },
        ParseState::Whitespace,
    ]
}

fn finish_type_test(
    field: ContextVariable,
    negated: bool,
    name: String,
    ctx: &mut Context<'_>,
) -> Result<(), ParseErrorKind> {
    if name.is_empty() {
        return Err(ParseErrorKind::MissingToken("type name"));
    }
    if FieldPath::parse(&name).is_none() {
        return Err(ParseErrorKind::InvalidIdentifier(name));
    }
    ctx.builder.push_statement(
        BooleanExpression::Typed(TypedExpression {
            field,
            type_name: name,
        }),
        negated,
    );
    Ok(())
}

fn finish_order_key(path: String, ctx: &mut Context<'_>) -> Result<(), ParseErrorKind> {
    if path.is_empty() {
        return Err(ParseErrorKind::MissingToken("sort field"));
    }
    let field = FieldPath::parse(&path).ok_or(ParseErrorKind::InvalidIdentifier(path))?;
    ctx.builder.push_order_key(field);
    Ok(())
}

fn sort_direction(word: &str, direction_seen: bool) -> Option<SortDirection> {
    if direction_seen {
        return None;
    }
    Keyword::lookup(word).and_then(SortDirection::from_keyword)
}

fn finish_number(target: NumberTarget, raw: String, ctx: &mut Context<'_>) -> Result<(), ParseErrorKind> {
    if raw.is_empty() {
        return Err(ParseErrorKind::MissingToken("numeric literal"));
    }
    if raw.starts_with('-') {
        return Err(ParseErrorKind::NegativeNumber(raw));
    }
    if !raw.chars().all(|c| c.is_ascii_digit()) {
        return Err(ParseErrorKind::MalformedNumber(raw));
    }
    let n = raw
        .parse::<u64>()
        .map_err(|_| ParseErrorKind::MalformedNumber(raw.clone()))?;
    match target {
        NumberTarget::Limit => ctx.builder.set_limit(n),
        NumberTarget::Offset => ctx.builder.set_offset(n),
    }
    Ok(())
}
