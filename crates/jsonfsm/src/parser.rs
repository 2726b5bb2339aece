//! Drives a [`Lexer`] and a [`Composer`] over text.

use std::str::FromStr;

use crate::{
    composer::{Composer, ComposerState},
    error::{ComposerError, ErrorSource, ParseError},
    lexer::{Feed, Lexer},
    options::ParserOptions,
    value::Value,
};

/// Feeds characters to a [`Lexer`] and the tokens it produces to a
/// [`Composer`].
///
/// Input may arrive in chunks of any size, split anywhere; the result does
/// not depend on where the splits fall.
///
/// # Examples
///
/// ```rust
/// use jsonfsm::{Parser, ParserOptions};
///
/// let mut parser = Parser::new(ParserOptions::default());
/// parser.feed(r#"{"a": [1, tr"#).unwrap();
/// parser.feed(r#"ue], "b": 'x'}"#).unwrap();
/// let value = parser.finish().unwrap();
/// assert_eq!(value["a"][1].as_bool(), Some(true));
/// assert_eq!(value["b"].as_str(), Some("x"));
/// ```
#[derive(Debug, Clone)]
pub struct Parser {
    lexer: Lexer,
    composer: Composer,
    line: usize,
    column: usize,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new(ParserOptions::default())
    }
}

impl Parser {
    /// Creates a parser.
    #[must_use]
    pub fn new(options: ParserOptions) -> Self {
        Self {
            lexer: Lexer::with_options(options),
            composer: Composer::with_options(options),
            line: 1,
            column: 1,
        }
    }

    /// The lexer, for inspecting its state.
    #[must_use]
    pub fn lexer(&self) -> &Lexer {
        &self.lexer
    }

    /// The composer, for inspecting its stack.
    #[must_use]
    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    /// Feeds a chunk of input.
    ///
    /// # Errors
    ///
    /// Returns the first lexical or structural error, positioned at the
    /// character that caused it. Errors are terminal.
    pub fn feed(&mut self, text: &str) -> Result<(), ParseError> {
        for c in text.chars() {
            self.feed_char(c)?;
        }
        Ok(())
    }

    /// Signals end of input and returns the document.
    ///
    /// # Errors
    ///
    /// Fails if the input ended inside a token, before the root value was
    /// complete, or after an earlier error.
    pub fn finish(mut self) -> Result<Value, ParseError> {
        self.lexer.finish().map_err(|err| self.error(err))?;
        self.forward()?;

        let state = self.composer.state();
        let source = match state {
            ComposerState::Finished => None,
            ComposerState::Error => Some(ErrorSource::Compose(ComposerError::Failed)),
            state => Some(ErrorSource::Incomplete { state }),
        };
        if let Some(source) = source {
            log::debug!("end of input rejected: {source}");
            return Err(self.error(source));
        }

        let (line, column) = (self.line, self.column);
        self.composer.into_root().ok_or(ParseError {
            source: ErrorSource::Incomplete { state },
            line,
            column,
        })
    }

    fn feed_char(&mut self, c: char) -> Result<(), ParseError> {
        loop {
            let feed = self.lexer.feed(c).map_err(|err| self.error(err))?;
            self.forward()?;
            if feed == Feed::Consumed {
                break;
            }
        }

        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Ok(())
    }

    /// Hands the lexer's token, if any, to the composer.
    fn forward(&mut self) -> Result<(), ParseError> {
        if let Some(token) = self.lexer.take_token() {
            log::trace!("{}:{} token {token}", self.line, self.column);
            self.composer
                .take_token(token)
                .map_err(|err| self.error(err))?;
        }
        Ok(())
    }

    fn error(&self, source: impl Into<ErrorSource>) -> ParseError {
        ParseError {
            source: source.into(),
            line: self.line,
            column: self.column,
        }
    }
}

/// Parses a complete document.
///
/// # Errors
///
/// See [`Parser::feed`] and [`Parser::finish`].
///
/// # Examples
///
/// ```rust
/// let value = jsonfsm::parse(r#"{"a": true, "b": false, "c": null}"#).unwrap();
/// assert_eq!(value["a"].as_bool(), Some(true));
/// assert!(value["c"].is_null());
///
/// let err = jsonfsm::parse(r#"{"a": }"#).unwrap_err();
/// assert_eq!((err.line, err.column), (1, 7));
/// ```
pub fn parse(text: &str) -> Result<Value, ParseError> {
    let mut parser = Parser::default();
    parser.feed(text)?;
    parser.finish()
}

impl FromStr for Value {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}
