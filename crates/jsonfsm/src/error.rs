//! Errors reported by the lexer, the composer and the parser.

use thiserror::Error;

use crate::{composer::ComposerState, lexer::LexState, token::TokenKind};

/// A character that the [`Lexer`](crate::Lexer) cannot accept in its current
/// state.
///
/// Lexing errors are terminal: once one is returned the lexer only answers
/// [`LexError::Failed`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    /// The character cannot start or continue a token here.
    #[error("invalid character {ch:?} while {state}")]
    UnexpectedCharacter {
        /// The offending character.
        ch: char,
        /// What the lexer was doing when it saw `ch`.
        state: LexState,
    },
    /// A backslash followed by a character that is not a known escape.
    #[error("unsupported escape sequence '\\{0}'")]
    UnsupportedEscape(char),
    /// A `\u` escape containing something other than a hex digit.
    #[error("invalid unicode escape sequence at character: {0:?}")]
    InvalidUnicodeEscape(char),
    /// A `\u` escape that does not form a unicode scalar value, such as an
    /// unpaired surrogate.
    #[error("invalid unicode escape sequence \\u{0:04X}")]
    InvalidCodePoint(u32),
    /// A numeric literal that ended without the digits the grammar requires.
    #[error("invalid number: {0}")]
    InvalidNumber(&'static str),
    /// A `'` was seen while single-quoted strings are disabled.
    #[error("single-quoted strings are not allowed")]
    SingleQuotesDisabled,
    /// Input ended in the middle of a token.
    #[error("unexpected end of input while {state}")]
    UnexpectedEndOfInput {
        /// The state the lexer was left in.
        state: LexState,
    },
    /// The lexer was used after it had already failed.
    #[error("lexer has already failed")]
    Failed,
}

/// A token that the [`Composer`](crate::Composer) cannot accept in its
/// current state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ComposerError {
    /// The token is not legal here.
    #[error("unexpected {token} while {state}")]
    UnexpectedToken {
        /// The offending token.
        token: TokenKind,
        /// The state the composer was in when it received `token`.
        state: ComposerState,
    },
    /// Opening another container would exceed the configured nesting limit.
    #[error("nesting depth exceeds the limit of {limit}")]
    DepthLimitExceeded {
        /// The configured limit.
        limit: usize,
    },
    /// The composer was used after it had already failed.
    #[error("composer has already failed")]
    Failed,
}

/// An error from [`Parser`](crate::Parser), positioned at the character that
/// caused it.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{source} at {line}:{column}")]
pub struct ParseError {
    pub(crate) source: ErrorSource,
    /// 1-based line of the offending character.
    pub line: usize,
    /// 1-based column of the offending character.
    pub column: usize,
}

impl ParseError {
    /// What went wrong, without the position.
    #[must_use]
    pub fn kind(&self) -> &ErrorSource {
        &self.source
    }

    /// Returns `true` if the input ended before the document was complete.
    #[must_use]
    pub fn is_incomplete(&self) -> bool {
        matches!(
            self.source,
            ErrorSource::Incomplete { .. } | ErrorSource::Lex(LexError::UnexpectedEndOfInput { .. })
        )
    }
}

/// The machine that rejected the input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorSource {
    /// The lexer rejected a character.
    #[error("lex error: {0}")]
    Lex(#[from] LexError),
    /// The composer rejected a token.
    #[error("syntax error: {0}")]
    Compose(#[from] ComposerError),
    /// Input ended between tokens while the document was still open.
    #[error("unexpected end of input while {state}")]
    Incomplete {
        /// The composer's state at end of input.
        state: ComposerState,
    },
}
