//! Character-driven query parser.
//!
//! The grammar is a push-down automaton over an explicit stack of
//! [`states::ParseState`] values. Nesting grows the stack, not the call stack.

mod builder;
mod states;

use std::mem;

use tracing::{debug, debug_span, trace, warn};

use crate::args::{BoundArgument, QueryArgs};
use crate::ast::Query;
use crate::config::ParserConfig;
use crate::error::{ParseErrorKind, QueryParsingError};
use crate::value::Value;
use builder::QueryBuilder;
use states::{Context, ParseState, Transition};

const TARGET: &str = "pick_lang::parser";

/// Grammar progress of the query currently being read.
#[derive(Debug)]
struct Session {
    stack: Vec<ParseState>,
    builder: QueryBuilder,
    /// Diagnostic copy of the text consumed so far
    parsed: String,
    /// Characters fed since the query began
    offset: usize,
    /// Argument cursor when the query began, restored on failure
    start_position: Option<usize>,
}

impl Session {
    fn new() -> Self {
        Session {
            stack: ParseState::initial(),
            builder: QueryBuilder::default(),
            parsed: String::new(),
            offset: 0,
            start_position: None,
        }
    }
}

/// Parses query text into a [`Query`], binding `?` to the supplied arguments.
///
/// A parser is meant for one thread. It may be fed several fragments of the
/// same query with [`Parser::reparse`] before the closing [`Parser::parse`],
/// and may parse any number of queries one after the other.
///
/// # Examples
///
/// ```
/// use pick_lang::{Parser, Value};
///
/// let mut parser = Parser::new(vec![Value::from("lonesome foo")]);
/// let query = parser.parse("PICK Bar b IF b.name=? LIMIT 10").unwrap();
/// assert_eq!(query.command().attribute_holder_name(), "Bar");
/// ```
pub struct Parser {
    config: ParserConfig,
    args: QueryArgs,
    session: Session,
}

impl Parser {
    pub fn new(args: impl Into<QueryArgs>) -> Self {
        Self::with_config(args, ParserConfig::default())
    }

    pub fn with_config(args: impl Into<QueryArgs>, config: ParserConfig) -> Self {
        Parser {
            config,
            args: args.into(),
            session: Session::new(),
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn args(&self) -> &QueryArgs {
        &self.args
    }

    /// Text recorded for diagnostics since the current query began.
    pub fn parsed_so_far(&self) -> &str {
        &self.session.parsed
    }

    /// Feeds `text` and closes the grammar.
    ///
    /// Every state left on the stack must be satisfied by the end of input.
    /// On success the parser is ready for the next query; on failure the
    /// partial query is discarded and the argument cursor rewinds to where
    /// this query began.
    pub fn parse(&mut self, text: &str) -> Result<Query, QueryParsingError> {
        let span = debug_span!(
            target: TARGET,
            "parse",
            chars = tracing::field::Empty,
            depth = tracing::field::Empty,
        );
        let _guard = span.enter();

        let result = self.feed(text, true).and_then(|()| self.finish());
        span.record("chars", self.session.offset);
        span.record("depth", self.session.builder.max_depth());

        match result {
            Ok(query) => {
                debug!(
                    target: TARGET,
                    type_name = query.command().attribute_holder_name(),
                    args_consumed = self.args.position(),
                    "query parsed"
                );
                self.session = Session::new();
                Ok(query)
            }
            Err(e) => {
                warn!(target: TARGET, error = %e, "query rejected");
                self.abort();
                Err(e)
            }
        }
    }

    /// Feeds a fragment without recording it for diagnostics and without
    /// requiring the grammar to be closed afterwards.
    pub fn reparse(&mut self, text: &str) -> Result<(), QueryParsingError> {
        debug!(target: TARGET, fragment = text, "reparse");
        self.feed(text, false).inspect_err(|e| {
            warn!(target: TARGET, error = %e, "fragment rejected");
            self.abort();
        })
    }

    /// Checks that `text` is a complete, valid query without producing it.
    ///
    /// The argument cursor is put back where it was, so a following
    /// [`Parser::parse`] of the same text binds the same arguments. A mark
    /// set by the caller and an in-progress query are left untouched.
    pub fn dry_run(&mut self, text: &str) -> Result<(), QueryParsingError> {
        let saved = mem::replace(&mut self.session, Session::new());
        let position = self.args.position();
        let result = self.parse(text).map(|_| ());
        debug!(target: TARGET, position, "dry run restores argument cursor");
        self.args.set_position(position);
        self.session = saved;
        result
    }

    pub fn next_query_arg(&mut self) -> Result<BoundArgument, ParseErrorKind> {
        self.args.next_query_arg()
    }

    pub fn mark_query_arg_position(&mut self) {
        debug!(target: TARGET, position = self.args.position(), "mark query args");
        self.args.mark_query_arg_position();
    }

    pub fn reset_query_arg_position(&mut self) {
        self.args.reset_query_arg_position();
        debug!(target: TARGET, position = self.args.position(), "reset query args");
    }

    /// Replaces the arguments for the queries that follow.
    pub fn set_args(&mut self, args: Vec<Value>) {
        self.args = QueryArgs::new(args);
    }

    fn feed(&mut self, text: &str, record: bool) -> Result<(), QueryParsingError> {
        if self.session.start_position.is_none() {
            self.session.start_position = Some(self.args.position());
        }

        for c in text.chars() {
            if record {
                self.session.parsed.push(c);
            }
            if self.config.exceeds_input_len(self.session.offset + 1) {
                return Err(self.error(ParseErrorKind::InputTooLong(self.config.max_input_len)));
            }
            self.dispatch(c).map_err(|kind| self.error(kind))?;
            self.session.offset += 1;
        }
        Ok(())
    }

    /// Delivers one character, popping and pushing states until one of them
    /// consumes it.
    fn dispatch(&mut self, c: char) -> Result<(), ParseErrorKind> {
        loop {
            let state = self
                .session
                .stack
                .pop()
                .ok_or(ParseErrorKind::TrailingInput(c))?;
            trace!(target: TARGET, state = state.name(), ch = %c.escape_debug(), "handle");

            let mut ctx = Context {
                builder: &mut self.session.builder,
                args: &mut self.args,
                config: &self.config,
            };
            match state.handle_char(c, &mut ctx)? {
                Transition::Stay(state) => {
                    self.session.stack.push(state);
                    return Ok(());
                }
                Transition::Done(next) => {
                    self.push_all(next);
                    return Ok(());
                }
                Transition::Forward(next) => self.push_all(next),
                Transition::Replay(word, next) => {
                    self.push_all(next);
                    self.replay(&word)?;
                }
            }
        }
    }

    /// Re-feeds a word already consumed, and already recorded, to the states
    /// now on the stack.
    fn replay(&mut self, word: &str) -> Result<(), ParseErrorKind> {
        debug!(target: TARGET, word, "replay");
        for c in word.chars() {
            self.dispatch(c)?;
        }
        Ok(())
    }

    /// Signals end of input to every remaining state, top first.
    fn finish(&mut self) -> Result<Query, QueryParsingError> {
        while let Some(state) = self.session.stack.pop() {
            trace!(target: TARGET, state = state.name(), "end");
            let mut ctx = Context {
                builder: &mut self.session.builder,
                args: &mut self.args,
                config: &self.config,
            };
            let replay = state.on_end(&mut ctx).map_err(|kind| self.error(kind))?;
            if let Some(word) = replay {
                self.replay(&word).map_err(|kind| self.error(kind))?;
            }
        }
        let builder = mem::take(&mut self.session.builder);
        builder.build().map_err(|kind| self.error(kind))
    }

    fn push_all(&mut self, next: Vec<ParseState>) {
        for state in next {
            trace!(target: TARGET, state = state.name(), "push");
            self.session.stack.push(state);
        }
    }

    fn abort(&mut self) {
        if let Some(position) = self.session.start_position {
            self.args.set_position(position);
        }
        self.session = Session::new();
    }

    fn error(&self, kind: ParseErrorKind) -> QueryParsingError {
        QueryParsingError {
            kind,
            offset: self.session.offset,
            parsed: self.session.parsed.clone(),
        }
    }
}

/// Parses a single query with the given arguments.
pub fn parse(text: &str, args: Vec<Value>) -> Result<Query, QueryParsingError> {
    Parser::new(args).parse(text)
}
