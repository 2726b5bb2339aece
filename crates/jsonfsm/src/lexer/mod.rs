//! The character-driven lexer.
//!
//! [`Lexer`] accepts exactly one character per [`feed`](Lexer::feed) call and
//! keeps whatever state it needs to resume with the next one. Multi-character
//! literals are delegated to a sub-machine owned by the current mode:
//! [`StringLexer`] for quoted strings, [`NumberLexer`] for numbers and a
//! literal matcher for `true`, `false` and `null`.
//!
//! # Examples
//!
//! ```rust
//! use jsonfsm::{Feed, Lexer, Token};
//!
//! let mut lexer = Lexer::new();
//! let mut tokens = Vec::new();
//! for c in "[12,true]".chars() {
//!     // A number is only known to be complete once the next character is
//!     // seen, and that character must then be fed again.
//!     while lexer.feed(c).unwrap() == Feed::Replay {
//!         tokens.extend(lexer.take_token());
//!     }
//!     tokens.extend(lexer.take_token());
//! }
//! lexer.finish().unwrap();
//! assert_eq!(
//!     tokens,
//!     [
//!         Token::BeginArray,
//!         Token::Number(12.0),
//!         Token::ValueSeparator,
//!         Token::Boolean(true),
//!         Token::EndArray,
//!     ]
//! );
//! ```

mod escape;
mod literal;
mod number;
mod string;

#[cfg(test)]
mod tests;

use std::fmt;

pub use number::{NumberLexer, NumberState};
pub use string::StringLexer;

use crate::{
    error::LexError,
    lexer::literal::{LiteralMatcher, Step},
    options::ParserOptions,
    token::Token,
};

/// The observable state of a [`Lexer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexState {
    /// Between tokens.
    Start,
    /// Inside a quoted string.
    InString,
    /// Matching `true`.
    InTrue,
    /// Matching `false`.
    InFalse,
    /// Matching `null`.
    InNull,
    /// Inside a number.
    InNumber,
    /// A previous character was rejected.
    Failed,
}

impl fmt::Display for LexState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LexState::Start => "expecting a token",
            LexState::InString => "reading a string",
            LexState::InTrue => "reading 'true'",
            LexState::InFalse => "reading 'false'",
            LexState::InNull => "reading 'null'",
            LexState::InNumber => "reading a number",
            LexState::Failed => "failed",
        })
    }
}

/// Whether [`Lexer::feed`] consumed the character it was given.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feed {
    /// The character was consumed. A token may or may not be ready.
    Consumed,
    /// A token is ready and the character was **not** consumed: take the
    /// token, then feed the same character again.
    Replay,
}

/// The sub-machine owned by the current mode.
#[derive(Debug, Clone)]
enum Mode {
    Start,
    String(StringLexer),
    Literal(LiteralMatcher),
    Number(NumberLexer),
    Failed,
}

/// A character-at-a-time JSON lexer.
///
/// After every [`feed`](Self::feed) the caller checks
/// [`has_token`](Self::has_token) and retrieves the token with
/// [`take_token`](Self::take_token) before supplying the next character.
#[derive(Debug, Clone)]
pub struct Lexer {
    mode: Mode,
    token: Option<Token>,
    allow_single_quotes: bool,
}

impl Default for Lexer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lexer {
    /// Creates a lexer with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(ParserOptions::default())
    }

    /// Creates a lexer honoring the lexical settings in `options`.
    #[must_use]
    pub fn with_options(options: ParserOptions) -> Self {
        Self {
            mode: Mode::Start,
            token: None,
            allow_single_quotes: options.allow_single_quotes,
        }
    }

    /// Returns `true` if a completed token is waiting to be taken.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Takes the completed token, if any.
    pub fn take_token(&mut self) -> Option<Token> {
        self.token.take()
    }

    /// Returns `true` between tokens, i.e. when ending the input here would
    /// not cut a token short.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self.mode, Mode::Start)
    }

    /// The current state.
    #[must_use]
    pub fn state(&self) -> LexState {
        match &self.mode {
            Mode::Start => LexState::Start,
            Mode::String(_) => LexState::InString,
            Mode::Literal(matcher) => matcher.state(),
            Mode::Number(_) => LexState::InNumber,
            Mode::Failed => LexState::Failed,
        }
    }

    /// Feeds one character.
    ///
    /// Returns [`Feed::Replay`] when the character ended a number: the
    /// number's token is ready and the character itself still has to be
    /// lexed. A token that has not been taken yet also makes the lexer
    /// answer `Replay` without looking at the character.
    ///
    /// # Errors
    ///
    /// Any [`LexError`] is terminal; the lexer answers [`LexError::Failed`]
    /// from then on.
    pub fn feed(&mut self, c: char) -> Result<Feed, LexError> {
        if self.token.is_some() {
            return Ok(Feed::Replay);
        }

        self.step(c).inspect_err(|_| self.mode = Mode::Failed)
    }

    /// Signals end of input.
    ///
    /// A pending number becomes a token, since nothing else will terminate
    /// it.
    ///
    /// # Errors
    ///
    /// Fails if the input ended inside a string or literal, or if a pending
    /// number is malformed.
    pub fn finish(&mut self) -> Result<(), LexError> {
        let result = match &self.mode {
            Mode::Start => return Ok(()),
            Mode::Failed => return Err(LexError::Failed),
            Mode::Number(number) => number.value().map(|value| {
                self.token = Some(Token::Number(value));
            }),
            Mode::String(_) | Mode::Literal(_) => Err(LexError::UnexpectedEndOfInput {
                state: self.state(),
            }),
        };

        self.mode = if result.is_ok() {
            Mode::Start
        } else {
            Mode::Failed
        };
        result
    }

    fn step(&mut self, c: char) -> Result<Feed, LexError> {
        match &mut self.mode {
            Mode::Failed => Err(LexError::Failed),
            Mode::Start => self.start(c),
            Mode::String(string) => {
                string.feed(c)?;
                if string.is_completed() {
                    let value = string.take_string();
                    self.emit(Token::String(value));
                }
                Ok(Feed::Consumed)
            }
            Mode::Literal(matcher) => match matcher.step(c) {
                Step::NeedMore => Ok(Feed::Consumed),
                Step::Done(token) => {
                    self.emit(token);
                    Ok(Feed::Consumed)
                }
                Step::Reject => Err(LexError::UnexpectedCharacter {
                    ch: c,
                    state: matcher.state(),
                }),
            },
            Mode::Number(number) => {
                match c {
                    ',' | '}' | ']' | ' ' | '\t' | '\n' | '\r' => {
                        let value = number.value()?;
                        self.emit(Token::Number(value));
                        return Ok(Feed::Replay);
                    }
                    '0'..='9' => number.push_digit(decimal_digit(c))?,
                    '.' => number.begin_fraction()?,
                    'e' | 'E' => number.begin_exponent(c)?,
                    '+' | '-' => number.set_exponent_sign(c)?,
                    _ => {
                        return Err(LexError::UnexpectedCharacter {
                            ch: c,
                            state: LexState::InNumber,
                        });
                    }
                }
                Ok(Feed::Consumed)
            }
        }
    }

    fn start(&mut self, c: char) -> Result<Feed, LexError> {
        if let Some(token) = Token::from_punctuator(c) {
            self.token = Some(token);
            return Ok(Feed::Consumed);
        }

        self.mode = match c {
            ' ' | '\t' | '\n' | '\r' => Mode::Start,
            '"' => Mode::String(StringLexer::new(c)),
            '\'' if self.allow_single_quotes => Mode::String(StringLexer::new(c)),
            '\'' => return Err(LexError::SingleQuotesDisabled),
            '-' => Mode::Number(NumberLexer::new(true, None)),
            '0'..='9' => Mode::Number(NumberLexer::new(false, Some(decimal_digit(c)))),
            c => match LiteralMatcher::new(c) {
                Some(matcher) => Mode::Literal(matcher),
                None => {
                    return Err(LexError::UnexpectedCharacter {
                        ch: c,
                        state: LexState::Start,
                    });
                }
            },
        };
        Ok(Feed::Consumed)
    }

    fn emit(&mut self, token: Token) {
        self.token = Some(token);
        self.mode = Mode::Start;
    }
}

/// `c` must be an ASCII digit.
fn decimal_digit(c: char) -> u8 {
    debug_assert!(c.is_ascii_digit());
    (c as u8).wrapping_sub(b'0')
}
