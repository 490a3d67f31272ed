//! # Pick Query Language - Abstract Syntax Tree
//!
//! This module defines the tree produced by [`crate::Parser`] for the compact
//! record query language of the persistence engine.
//!
//! ## Architecture Overview
//!
//! - **[keywords]** - Reserved words and symbols recognized by the scanner
//! - **[operators]** - Comparators, boolean operators and sort directions
//! - **[expressions]** - Field paths and context variables
//! - **[statements]** - Boolean statement chains and groups
//! - **[ordering]** - `ORDERBY` key chains
//! - **[query]** - The `Query` root and its `PICK`/`COUNT` commands
//!
//! ## Quick Start
//!
//! ```text
//! PICK Bar b IF b.name=? ORDERBY b.name LIMIT 10 OFFSET 5
//! ```
//!
//! Fetches `Bar` records whose `name` equals the first argument, sorted by
//! name, skipping five and returning at most ten.
//!
//! ## Core Concepts
//!
//! ### Boolean Chains
//!
//! A filter is a chain of statements, each linked to the next by `AND` or
//! `OR`. There is no operator precedence:
//!
//! ```text
//! a=? OR b=? AND c=?      // read as ((a OR b) AND c)
//! a=? OR (b=? AND c=?)    // grouping overrides the reading order
//! ```
//!
//! ### Parameters
//!
//! Every `?` takes the next externally supplied argument, left to right.
//! The value is copied into the tree when it is parsed.
//!
//! ## Examples
//!
//! ### Negation
//!
//! ```text
//! PICK Foo f IF !f.active=? AND !(f.a=? OR f.b=?)
//! ```
//!
//! ### Type Test
//!
//! ```text
//! COUNT Shape s IF s TYPED Circle
//! ```
//!
//! ### Range
//!
//! ```text
//! PICK Order o IF o.total INRANGE ? ORDERBY o.total DESC, o.id
//! ```
pub mod keywords;
pub mod operators;
pub mod expressions;
pub mod statements;
pub mod ordering;
pub mod query;

pub use keywords::{Keyword, is_reserved};
pub use operators::{BooleanOperator, ComparisonType, SortDirection};
pub use expressions::{ContextVariable, FieldPath};
pub use statements::{
    BooleanExpression, BooleanStatement, ComparisonExpression, TypedExpression,
    WrapperBooleanStatement,
};
pub use ordering::Ordering;
pub use query::{Command, Count, Pick, Query};
