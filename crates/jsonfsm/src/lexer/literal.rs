use crate::{lexer::LexState, token::Token};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Literal {
    True,
    False,
    Null,
}

/// What happened after feeding one more character into the literal matcher?
#[derive(Debug, PartialEq)]
pub(crate) enum Step {
    /// Character matched, but the literal is not finished yet.
    NeedMore,
    /// Character matched *and* it was the last byte of the literal.
    Done(Token),
    /// Character did **not** match the expected byte.
    Reject,
}

/// Matches the rest of `true`, `false` or `null` one character at a time.
///
/// Holds `(remaining_bytes, literal)`; the first character has already been
/// consumed by the lexer when the matcher is created.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct LiteralMatcher(&'static [u8], Literal);

impl LiteralMatcher {
    /// Start matching after the *first* character (`n`, `t`, or `f`).
    pub(crate) fn new(first: char) -> Option<Self> {
        match first {
            't' => Some(LiteralMatcher(b"rue", Literal::True)),
            'f' => Some(LiteralMatcher(b"alse", Literal::False)),
            'n' => Some(LiteralMatcher(b"ull", Literal::Null)),
            _ => None,
        }
    }

    pub(crate) fn state(&self) -> LexState {
        match self.1 {
            Literal::True => LexState::InTrue,
            Literal::False => LexState::InFalse,
            Literal::Null => LexState::InNull,
        }
    }

    /// Give the matcher the next input character and learn what to do next.
    pub(crate) fn step(&mut self, c: char) -> Step {
        let LiteralMatcher(bytes, literal) = *self;

        match bytes.split_first() {
            Some((expected, rest)) if char::from(*expected) == c => {
                if rest.is_empty() {
                    Step::Done(match literal {
                        Literal::True => Token::Boolean(true),
                        Literal::False => Token::Boolean(false),
                        Literal::Null => Token::Null,
                    })
                } else {
                    self.0 = rest;
                    Step::NeedMore
                }
            }
            // Mismatch leaves the matcher where it was.
            _ => Step::Reject,
        }
    }
}
