//! The token-driven document composer.
//!
//! [`Composer`] consumes one [`Token`] per call and keeps its context in an
//! explicit stack of [`Scope`]s instead of the call stack, so nesting depth is
//! bounded by memory (or [`ParserOptions::max_depth`]) rather than by
//! recursion.
//!
//! The stack, read bottom to top, is the chain of containers currently open,
//! optionally followed by one finished value that has not yet been moved into
//! its parent. A finished value is merged when the parent sees the `,` or the
//! closing bracket that follows it.
//!
//! # Examples
//!
//! ```rust
//! use jsonfsm::{Composer, Token, Value};
//!
//! let mut composer = Composer::new();
//! for token in [
//!     Token::BeginArray,
//!     Token::Number(1.0),
//!     Token::ValueSeparator,
//!     Token::String("z".into()),
//!     Token::EndArray,
//! ] {
//!     composer.take_token(token).unwrap();
//! }
//! assert!(composer.is_finished());
//! assert_eq!(
//!     composer.root(),
//!     Some(&Value::Array(vec![1.0.into(), "z".into()]))
//! );
//! ```

mod scope;


use std::fmt;

pub use scope::{Scope, ScopeKind};

use crate::{error::ComposerError, options::ParserOptions, token::Token, value::Value};

/// Where the composer is in the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComposerState {
    /// Nothing received yet.
    Start,
    /// Just after `{`: a key or `}`.
    ObjectStart,
    /// Key read, awaiting `:`.
    ObjectHasKey,
    /// After `:`, awaiting a value.
    ObjectAwaitingValue,
    /// A member's value is complete: `,` or `}`.
    ObjectHasValue,
    /// After `,` in an object: the next key.
    ObjectReady,
    /// Just after `[`: a value or `]`.
    ArrayStart,
    /// An element is complete: `,` or `]`.
    ArrayHasValue,
    /// After `,` in an array: the next value.
    ArrayReady,
    /// The root value is complete.
    Finished,
    /// A token was rejected.
    Error,
}

impl fmt::Display for ComposerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ComposerState::Start => "expecting a value",
            ComposerState::ObjectStart => "expecting a key or '}'",
            ComposerState::ObjectHasKey => "expecting ':'",
            ComposerState::ObjectAwaitingValue => "expecting an object value",
            ComposerState::ObjectHasValue => "expecting ',' or '}'",
            ComposerState::ObjectReady => "expecting a key",
            ComposerState::ArrayStart => "expecting a value or ']'",
            ComposerState::ArrayHasValue => "expecting ',' or ']'",
            ComposerState::ArrayReady => "expecting an array value",
            ComposerState::Finished => "after the end of the document",
            ComposerState::Error => "failed",
        })
    }
}

/// Builds a [`Value`] from a sequence of tokens.
#[derive(Debug, Clone)]
pub struct Composer {
    state: ComposerState,
    stack: Vec<Scope>,
    /// The key read in an object, until its value arrives.
    pending_key: Option<String>,
    max_depth: Option<usize>,
}

impl Default for Composer {
    fn default() -> Self {
        Self::new()
    }
}

impl Composer {
    /// Creates a composer with no nesting limit.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(ParserOptions::default())
    }

    /// Creates a composer honoring the structural settings in `options`.
    #[must_use]
    pub fn with_options(options: ParserOptions) -> Self {
        Self {
            state: ComposerState::Start,
            stack: Vec::with_capacity(16),
            pending_key: None,
            max_depth: options.max_depth,
        }
    }

    /// The current state.
    #[must_use]
    pub fn state(&self) -> ComposerState {
        self.state
    }

    /// Returns `true` once the root value is complete.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state == ComposerState::Finished
    }

    /// Number of scopes on the stack.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// The stack, bottom first.
    #[must_use]
    pub fn scopes(&self) -> &[Scope] {
        &self.stack
    }

    /// The parsed document, once [finished](Self::is_finished).
    #[must_use]
    pub fn root(&self) -> Option<&Value> {
        if self.is_finished() {
            self.stack.first().map(Scope::value)
        } else {
            None
        }
    }

    /// Consumes the composer, returning the document if it is finished.
    #[must_use]
    pub fn into_root(mut self) -> Option<Value> {
        if self.is_finished() {
            self.stack.pop().map(Scope::into_value)
        } else {
            None
        }
    }

    /// Advances by exactly one token.
    ///
    /// # Errors
    ///
    /// Fails with [`ComposerError::UnexpectedToken`] on a token that is not
    /// legal in the current state, including any token after the document is
    /// finished. The stack is left untouched and the composer moves to
    /// [`ComposerState::Error`], after which it only answers
    /// [`ComposerError::Failed`].
    pub fn take_token(&mut self, token: Token) -> Result<(), ComposerError> {
        let result = self.transition(token);

        match &result {
            Ok(()) => {
                #[cfg(any(test, feature = "fuzzing"))]
                self.check_invariants();
            }
            Err(err) if self.state != ComposerState::Error => {
                log::debug!("composer rejected input: {err}");
                self.state = ComposerState::Error;
            }
            Err(_) => {}
        }

        result
    }

    fn transition(&mut self, token: Token) -> Result<(), ComposerError> {
        use ComposerState::*;

        match (self.state, token) {
            (Error, _) => return Err(ComposerError::Failed),

            (Start | ObjectAwaitingValue | ArrayStart | ArrayReady, token) if is_value(&token) => {
                self.open(token)?;
            }

            (ObjectStart | ObjectReady, Token::String(key)) => {
                self.pending_key = Some(key);
                self.state = ObjectHasKey;
            }
            (ObjectHasKey, Token::KeyValueSeparator) => self.state = ObjectAwaitingValue,

            (ObjectStart, Token::EndObject) | (ArrayStart, Token::EndArray) => self.close(),

            (ObjectHasValue, Token::ValueSeparator) => {
                self.merge_top();
                self.state = ObjectReady;
            }
            (ArrayHasValue, Token::ValueSeparator) => {
                self.merge_top();
                self.state = ArrayReady;
            }
            (ObjectHasValue, Token::EndObject) | (ArrayHasValue, Token::EndArray) => {
                self.merge_top();
                self.close();
            }

            (state, token) => {
                return Err(ComposerError::UnexpectedToken {
                    token: token.kind(),
                    state,
                });
            }
        }

        Ok(())
    }

    /// Pushes a scope for a value token. The top of the stack is the open
    /// container the value belongs to, or the stack is empty.
    fn open(&mut self, token: Token) -> Result<(), ComposerError> {
        if matches!(token, Token::BeginObject | Token::BeginArray) {
            if let Some(limit) = self.max_depth {
                if self.stack.len() >= limit {
                    return Err(ComposerError::DepthLimitExceeded { limit });
                }
            }
        }

        let key = if self.state == ComposerState::ObjectAwaitingValue {
            self.pending_key.take()
        } else {
            None
        };
        let finished = self.value_state();

        let (scope, next) = match token {
            Token::BeginObject => (Scope::object(key), ComposerState::ObjectStart),
            Token::BeginArray => (Scope::array(key), ComposerState::ArrayStart),
            Token::String(s) => (Scope::scalar(key, Value::String(s)), finished),
            Token::Number(n) => (Scope::scalar(key, Value::Number(n)), finished),
            Token::Boolean(b) => (Scope::scalar(key, Value::Boolean(b)), finished),
            Token::Null => (Scope::scalar(key, Value::Null), finished),
            Token::EndObject | Token::EndArray | Token::KeyValueSeparator | Token::ValueSeparator => {
                unreachable!("not a value token")
            }
        };

        if matches!(next, ComposerState::ObjectStart | ComposerState::ArrayStart) {
            log::trace!("open {:?} at depth {}", scope.kind(), self.stack.len() + 1);
        }
        self.stack.push(scope);
        self.state = next;
        Ok(())
    }

    /// The top scope is an open container whose contents are all merged;
    /// it becomes a finished value.
    fn close(&mut self) {
        log::trace!("close container at depth {}", self.stack.len());
        self.state = self.parent_state();
    }

    /// Pops the finished value on top and moves it into the container below.
    fn merge_top(&mut self) {
        if let Some(child) = self.stack.pop() {
            if let Some(parent) = self.stack.last_mut() {
                parent.adopt(child);
            }
        }
    }

    /// The state after a value completes inside the container currently on
    /// top of the stack.
    fn value_state(&self) -> ComposerState {
        Self::state_within(self.stack.last())
    }

    /// The state after the container on top of the stack completes.
    fn parent_state(&self) -> ComposerState {
        Self::state_within(self.stack.iter().rev().nth(1))
    }

    fn state_within(container: Option<&Scope>) -> ComposerState {
        match container.map(Scope::kind) {
            None => ComposerState::Finished,
            Some(ScopeKind::Object) => ComposerState::ObjectHasValue,
            Some(ScopeKind::Array) => ComposerState::ArrayHasValue,
            Some(kind) => unreachable!("{kind:?} scope below the top of the stack"),
        }
    }

    #[cfg(any(test, feature = "fuzzing"))]
    fn check_invariants(&self) {
        use ComposerState::*;

        // Everything below the top must be an open container. A token only
        // changes the top two scopes, so the one just below the top is all
        // that needs checking.
        if let Some(below_top) = self.stack.len().checked_sub(2) {
            assert!(
                matches!(
                    self.stack[below_top].kind(),
                    ScopeKind::Object | ScopeKind::Array
                ),
                "scalar scope below the top of the stack"
            );
        }

        let top = self.stack.last().map(Scope::kind);
        match self.state {
            Start => assert!(self.stack.is_empty()),
            Finished => assert_eq!(self.stack.len(), 1),
            ObjectStart | ObjectHasKey | ObjectAwaitingValue | ObjectReady => {
                assert_eq!(top, Some(ScopeKind::Object));
            }
            ArrayStart | ArrayReady => assert_eq!(top, Some(ScopeKind::Array)),
            ObjectHasValue | ArrayHasValue => assert!(self.stack.len() >= 2),
            Error => {}
        }
        assert_eq!(self.pending_key.is_some(), matches!(self.state, ObjectHasKey | ObjectAwaitingValue));
    }
}

fn is_value(token: &Token) -> bool {
    token.is_scalar() || matches!(token, Token::BeginObject | Token::BeginArray)
}
