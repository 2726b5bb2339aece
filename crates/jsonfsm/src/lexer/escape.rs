//! Accumulation of the four hex digits that follow `\u` in a string literal.
//!
//! The [`UnicodeEscape`] folds each digit (`0-9`, `A-F`, `a-f`) into a 16-bit
//! code unit and hands it back once exactly four digits have been seen.
//! Pairing UTF-16 surrogates into a single `char` is left to the caller,
//! which knows whether another escape follows.

use crate::error::LexError;

const DIGITS: u8 = 4;

/// The state of an in-progress `\uXXXX` escape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct UnicodeEscape {
    value: u32,
    remaining: u8,
}

impl UnicodeEscape {
    /// Starts a new escape expecting four digits.
    pub(crate) fn new() -> Self {
        Self {
            value: 0,
            remaining: DIGITS,
        }
    }

    /// Number of hex digits still expected.
    #[cfg(test)]
    pub(crate) fn remaining(self) -> u8 {
        self.remaining
    }

    /// Feeds one hex digit.
    ///
    /// Returns `Ok(None)` while digits are still expected and
    /// `Ok(Some(code_unit))` on the fourth one.
    pub(crate) fn feed(&mut self, c: char) -> Result<Option<u32>, LexError> {
        let digit = c.to_digit(16).ok_or(LexError::InvalidUnicodeEscape(c))?;
        debug_assert!(self.remaining > 0, "escape already complete");

        self.value = (self.value << 4) | digit;
        self.remaining -= 1;

        if self.remaining == 0 {
            let unit = self.value;
            *self = Self::new();
            Ok(Some(unit))
        } else {
            Ok(None)
        }
    }
}
