use crate::ast::{BooleanStatement, Ordering};

/// Root of a parsed query. Read-only once the parser hands it out.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    command: Command,
}

impl Query {
    pub(crate) fn new(command: Command) -> Self {
        Query { command }
    }

    pub fn command(&self) -> &Command {
        &self.command
    }

    pub fn into_command(self) -> Command {
        self.command
    }
}

/// The two query commands.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Fetch matching records (`PICK`)
    Pick(Pick),
    /// Count matching records (`COUNT`)
    Count(Count),
}

impl Command {
    /// Name of the queried type, the token right after `PICK`/`COUNT`.
    pub fn attribute_holder_name(&self) -> &str {
        match self {
            Command::Pick(p) => &p.attribute_holder_name,
            Command::Count(c) => &c.attribute_holder_name,
        }
    }

    pub fn alias(&self) -> Option<&str> {
        match self {
            Command::Pick(p) => p.alias.as_deref(),
            Command::Count(c) => c.alias.as_deref(),
        }
    }

    /// Root of the filter chain.
    pub fn if_clause(&self) -> Option<&BooleanStatement> {
        match self {
            Command::Pick(p) => p.if_clause.as_ref(),
            Command::Count(c) => c.if_clause.as_ref(),
        }
    }

    pub fn as_pick(&self) -> Option<&Pick> {
        match self {
            Command::Pick(p) => Some(p),
            Command::Count(_) => None,
        }
    }

    pub fn as_count(&self) -> Option<&Count> {
        match self {
            Command::Pick(_) => None,
            Command::Count(c) => Some(c),
        }
    }
}

/// `PICK Type [alias] [IF ...] [ORDERBY ...] [LIMIT n] [OFFSET n]`
#[derive(Debug, Clone, PartialEq)]
pub struct Pick {
    pub attribute_holder_name: String,
    pub alias: Option<String>,
    pub if_clause: Option<BooleanStatement>,
    pub ordering: Option<Ordering>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// `COUNT Type [alias] [IF ...]`
#[derive(Debug, Clone, PartialEq)]
pub struct Count {
    pub attribute_holder_name: String,
    pub alias: Option<String>,
    pub if_clause: Option<BooleanStatement>,
}
