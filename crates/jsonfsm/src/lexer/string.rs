//! The sub-machine that reads the body of a quoted string literal.

use std::mem;

use crate::{error::LexError, lexer::LexState, lexer::escape::UnicodeEscape};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StringState {
    Normal,
    Escape,
    UnicodeEscape(UnicodeEscape),
}

/// Accumulates a string literal one character at a time, decoding escapes as
/// it goes.
///
/// The opening delimiter has already been consumed when the lexer is created;
/// the matching unescaped delimiter completes it.
///
/// ```rust
/// use jsonfsm::StringLexer;
///
/// let mut lexer = StringLexer::new('"');
/// for c in r#"aé\n""#.chars() {
///     lexer.feed(c).unwrap();
/// }
/// assert!(lexer.is_completed());
/// assert_eq!(lexer.into_string(), "aé\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringLexer {
    delimiter: char,
    state: StringState,
    buffer: String,
    /// A high surrogate waiting for its low half.
    high_surrogate: Option<u32>,
    completed: bool,
}

impl StringLexer {
    /// Creates a lexer for a string closed by `delimiter` (`"` or `'`).
    #[must_use]
    pub fn new(delimiter: char) -> Self {
        Self {
            delimiter,
            state: StringState::Normal,
            buffer: String::new(),
            high_surrogate: None,
            completed: false,
        }
    }

    /// Returns `true` once the closing delimiter has been consumed.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// The text decoded so far.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Consumes the lexer and returns the decoded text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.buffer
    }

    pub(crate) fn take_string(&mut self) -> String {
        mem::take(&mut self.buffer)
    }

    /// Feeds the next character of the literal.
    ///
    /// # Errors
    ///
    /// Fails on an unknown escape, a non-hex digit inside `\u`, an unpaired
    /// surrogate, or any character after the string has completed.
    pub fn feed(&mut self, c: char) -> Result<(), LexError> {
        if self.completed {
            return Err(LexError::UnexpectedCharacter {
                ch: c,
                state: LexState::InString,
            });
        }

        match self.state {
            StringState::Normal => {
                if let Some(high) = self.high_surrogate {
                    if c != '\\' {
                        return Err(LexError::InvalidCodePoint(high));
                    }
                }
                match c {
                    '\\' => self.state = StringState::Escape,
                    c if c == self.delimiter => self.completed = true,
                    c => self.buffer.push(c),
                }
            }
            StringState::Escape => {
                if let Some(high) = self.high_surrogate {
                    if c != 'u' {
                        return Err(LexError::InvalidCodePoint(high));
                    }
                }
                let decoded = match c {
                    '"' | '\\' | '/' => c,
                    c if c == self.delimiter => c,
                    'b' => '\u{0008}',
                    'f' => '\u{000C}',
                    'n' => '\n',
                    'r' => '\r',
                    't' => '\t',
                    'u' => {
                        self.state = StringState::UnicodeEscape(UnicodeEscape::new());
                        return Ok(());
                    }
                    c => return Err(LexError::UnsupportedEscape(c)),
                };
                self.buffer.push(decoded);
                self.state = StringState::Normal;
            }
            StringState::UnicodeEscape(mut escape) => match escape.feed(c)? {
                Some(unit) => {
                    self.push_code_unit(unit)?;
                    self.state = StringState::Normal;
                }
                None => self.state = StringState::UnicodeEscape(escape),
            },
        }

        Ok(())
    }

    fn push_code_unit(&mut self, unit: u32) -> Result<(), LexError> {
        let code_point = match (self.high_surrogate.take(), unit) {
            (None, 0xD800..=0xDBFF) => {
                self.high_surrogate = Some(unit);
                return Ok(());
            }
            (None, 0xDC00..=0xDFFF) => return Err(LexError::InvalidCodePoint(unit)),
            (None, _) => unit,
            (Some(high), 0xDC00..=0xDFFF) => 0x10000 + ((high - 0xD800) << 10) + (unit - 0xDC00),
            (Some(high), _) => return Err(LexError::InvalidCodePoint(high)),
        };

        let ch = char::from_u32(code_point).ok_or(LexError::InvalidCodePoint(code_point))?;
        self.buffer.push(ch);
        Ok(())
    }
}
