//! Lexical tokens shared by the [`Lexer`](crate::Lexer) and the
//! [`Composer`](crate::Composer).
//!
//! A [`Token`] is the only thing that crosses the boundary between the two
//! machines: the lexer produces them one at a time and the composer consumes
//! them one at a time.

use std::fmt;

/// One lexical unit of the JSON grammar.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// `{`
    BeginObject,
    /// `}`
    EndObject,
    /// `[`
    BeginArray,
    /// `]`
    EndArray,
    /// A complete string literal with escapes already decoded.
    String(String),
    /// A numeric literal.
    Number(f64),
    /// `true` or `false`.
    Boolean(bool),
    /// `null`
    Null,
    /// `:`
    KeyValueSeparator,
    /// `,`
    ValueSeparator,
}

/// The payload-free discriminant of a [`Token`].
///
/// Errors carry this instead of the token itself so they stay small and
/// `Copy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `{`
    BeginObject,
    /// `}`
    EndObject,
    /// `[`
    BeginArray,
    /// `]`
    EndArray,
    /// A string literal.
    String,
    /// A numeric literal.
    Number,
    /// `true` or `false`.
    Boolean,
    /// `null`
    Null,
    /// `:`
    KeyValueSeparator,
    /// `,`
    ValueSeparator,
}

impl Token {
    /// Returns the kind of this token, dropping any payload.
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::BeginObject => TokenKind::BeginObject,
            Token::EndObject => TokenKind::EndObject,
            Token::BeginArray => TokenKind::BeginArray,
            Token::EndArray => TokenKind::EndArray,
            Token::String(_) => TokenKind::String,
            Token::Number(_) => TokenKind::Number,
            Token::Boolean(_) => TokenKind::Boolean,
            Token::Null => TokenKind::Null,
            Token::KeyValueSeparator => TokenKind::KeyValueSeparator,
            Token::ValueSeparator => TokenKind::ValueSeparator,
        }
    }

    /// Returns `true` for tokens that are a complete value on their own:
    /// strings, numbers, booleans and `null`.
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Token::String(_) | Token::Number(_) | Token::Boolean(_) | Token::Null
        )
    }

    /// Returns the punctuator for single-character tokens.
    #[must_use]
    pub fn punctuator(&self) -> Option<char> {
        match self {
            Token::BeginObject => Some('{'),
            Token::EndObject => Some('}'),
            Token::BeginArray => Some('['),
            Token::EndArray => Some(']'),
            Token::KeyValueSeparator => Some(':'),
            Token::ValueSeparator => Some(','),
            _ => None,
        }
    }

    /// Maps a structural character to its token.
    pub(crate) fn from_punctuator(c: char) -> Option<Self> {
        Some(match c {
            '{' => Token::BeginObject,
            '}' => Token::EndObject,
            '[' => Token::BeginArray,
            ']' => Token::EndArray,
            ':' => Token::KeyValueSeparator,
            ',' => Token::ValueSeparator,
            _ => return None,
        })
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TokenKind::BeginObject => "'{'",
            TokenKind::EndObject => "'}'",
            TokenKind::BeginArray => "'['",
            TokenKind::EndArray => "']'",
            TokenKind::String => "string",
            TokenKind::Number => "number",
            TokenKind::Boolean => "boolean",
            TokenKind::Null => "null",
            TokenKind::KeyValueSeparator => "':'",
            TokenKind::ValueSeparator => "','",
        })
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::String(s) => write!(f, "string {s:?}"),
            Token::Number(n) => write!(f, "number {n}"),
            Token::Boolean(b) => write!(f, "boolean {b}"),
            other => other.kind().fmt(f),
        }
    }
}
