//! A JSON parser built from two explicit state machines.
//!
//! The [`Lexer`] accepts one character at a time and produces [`Token`]s; the
//! [`Composer`] accepts one token at a time and assembles a [`Value`] on an
//! explicit stack of [`Scope`]s. Neither recurses, so input can be supplied
//! in pieces and nesting depth is limited by memory alone (or by
//! [`ParserOptions::max_depth`]).
//!
//! [`Parser`] wires the two together for the common case:
//!
//! ```rust
//! use jsonfsm::Value;
//!
//! let value: Value = r#"{"x": {"y": [1, "z"]}}"#.parse().unwrap();
//! assert_eq!(value["x"]["y"][0].as_f64(), Some(1.0));
//! assert_eq!(value["x"]["y"][1].as_str(), Some("z"));
//! ```
//!
//! The lexer accepts single-quoted strings in addition to the standard
//! double-quoted ones; see [`ParserOptions`].

mod composer;
mod error;
mod lexer;
mod options;
mod parser;
mod token;
mod value;

#[cfg(test)]
mod tests;

pub use composer::{Composer, ComposerState, Scope, ScopeKind};
pub use error::{ComposerError, ErrorSource, LexError, ParseError};
pub use lexer::{Feed, LexState, Lexer, NumberLexer, NumberState, StringLexer};
pub use options::ParserOptions;
pub use parser::{Parser, parse};
pub use token::{Token, TokenKind};
pub use value::{Array, Map, Value};
