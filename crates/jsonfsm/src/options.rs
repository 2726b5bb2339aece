//! Parser configuration.

/// Configuration options for the lexer, the composer and the driving
/// [`Parser`](crate::Parser).
///
/// # Examples
///
/// ```rust
/// use jsonfsm::{Parser, ParserOptions};
///
/// let parser = Parser::new(ParserOptions {
///     allow_single_quotes: false,
///     max_depth: Some(64),
/// });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Whether `'` may delimit strings in addition to `"`.
    ///
    /// # Default
    ///
    /// `true`
    pub allow_single_quotes: bool,

    /// Maximum nesting depth of objects and arrays.
    ///
    /// Nesting is otherwise bounded only by memory, since the composer keeps
    /// its context on the heap rather than on the call stack.
    ///
    /// # Default
    ///
    /// `None` (unlimited)
    pub max_depth: Option<usize>,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            allow_single_quotes: true,
            max_depth: None,
        }
    }
}
