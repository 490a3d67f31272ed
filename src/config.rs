/// Default cap on query length, in characters.
pub const DEFAULT_MAX_INPUT_LEN: usize = 64 * 1024;

/// Default cap on parenthesis nesting.
pub const DEFAULT_MAX_GROUP_DEPTH: usize = 64;

/// Limits applied by a [`crate::Parser`].
///
/// Parsing cannot be cancelled, so these are the way to bound the work a
/// single call may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum characters per query, 0 for unlimited
    pub max_input_len: usize,
    /// Maximum depth of nested groups
    pub max_group_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            max_input_len: DEFAULT_MAX_INPUT_LEN,
            max_group_depth: DEFAULT_MAX_GROUP_DEPTH,
        }
    }
}

impl ParserConfig {
    pub fn with_max_input_len(mut self, max_input_len: usize) -> Self {
        self.max_input_len = max_input_len;
        self
    }

    pub fn with_max_group_depth(mut self, max_group_depth: usize) -> Self {
        self.max_group_depth = max_group_depth;
        self
    }

    pub(crate) fn exceeds_input_len(&self, len: usize) -> bool {
        self.max_input_len != 0 && len > self.max_input_len
    }
}
