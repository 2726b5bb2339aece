//! The sub-machine that reads a numeric literal.
//!
//! Digits are kept as decimal text and the scale is tracked separately, so
//! that [`NumberLexer::value`] can hand a single `digits e exponent` string to
//! the standard library's correctly rounded float parser instead of summing
//! inexact powers of ten.

use crate::{error::LexError, lexer::LexState};

/// Which part of the literal the next digit belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberState {
    /// Reading the integer part.
    BeforeDecimalPoint,
    /// Reading the fraction after `.`.
    AfterDecimalPoint,
    /// Reading the exponent after `e` or `E`.
    AfterExponent,
}

/// Accumulates the sign, digits and exponent of a number.
///
/// The lexer decides when a number ends, since JSON numbers have no closing
/// delimiter, and then asks for [`value`](Self::value).
///
/// ```rust
/// use jsonfsm::NumberLexer;
///
/// // "-12.22e-2", with the leading '-' already consumed by the caller
/// let mut number = NumberLexer::new(true, None);
/// for d in [1, 2] {
///     number.push_digit(d).unwrap();
/// }
/// number.begin_fraction().unwrap();
/// for d in [2, 2] {
///     number.push_digit(d).unwrap();
/// }
/// number.begin_exponent('e').unwrap();
/// number.set_exponent_sign('-').unwrap();
/// number.push_digit(2).unwrap();
/// assert_eq!(number.value(), Ok(-0.1222));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberLexer {
    state: NumberState,
    negative: bool,
    /// Integer digits followed by fraction digits, without the point.
    digits: String,
    integer_digits: usize,
    fraction_digits: usize,
    exponent: u32,
    exponent_digits: usize,
    exponent_negative: bool,
    exponent_signed: bool,
}

impl NumberLexer {
    /// Creates a lexer for a number whose sign (and possibly first digit) the
    /// caller has already consumed.
    #[must_use]
    pub fn new(negative: bool, first_digit: Option<u8>) -> Self {
        let mut number = Self {
            state: NumberState::BeforeDecimalPoint,
            negative,
            digits: String::new(),
            integer_digits: 0,
            fraction_digits: 0,
            exponent: 0,
            exponent_digits: 0,
            exponent_negative: false,
            exponent_signed: false,
        };
        if let Some(digit) = first_digit {
            number.digits.push(char::from(b'0' + digit));
            number.integer_digits = 1;
        }
        number
    }

    /// The part of the literal currently being read.
    #[must_use]
    pub fn state(&self) -> NumberState {
        self.state
    }

    /// Appends one decimal digit (`0..=9`) to the current part.
    ///
    /// # Errors
    ///
    /// Fails on a digit following a leading `0` in the integer part.
    pub fn push_digit(&mut self, digit: u8) -> Result<(), LexError> {
        debug_assert!(digit < 10, "not a decimal digit: {digit}");
        match self.state {
            NumberState::BeforeDecimalPoint => {
                if self.integer_digits == 1 && self.digits.starts_with('0') {
                    return Err(LexError::InvalidNumber("leading zeros are not allowed"));
                }
                self.digits.push(char::from(b'0' + digit));
                self.integer_digits += 1;
            }
            NumberState::AfterDecimalPoint => {
                self.digits.push(char::from(b'0' + digit));
                self.fraction_digits += 1;
            }
            NumberState::AfterExponent => {
                self.exponent = self
                    .exponent
                    .saturating_mul(10)
                    .saturating_add(u32::from(digit));
                self.exponent_digits += 1;
            }
        }
        Ok(())
    }

    /// Handles `.`.
    ///
    /// # Errors
    ///
    /// Only legal once, directly after at least one integer digit.
    pub fn begin_fraction(&mut self) -> Result<(), LexError> {
        if self.state != NumberState::BeforeDecimalPoint || self.integer_digits == 0 {
            return Err(Self::unexpected('.'));
        }
        self.state = NumberState::AfterDecimalPoint;
        Ok(())
    }

    /// Handles `e` or `E`.
    ///
    /// # Errors
    ///
    /// Only legal once, directly after a digit of the integer or fraction.
    pub fn begin_exponent(&mut self, marker: char) -> Result<(), LexError> {
        let after_digit = match self.state {
            NumberState::BeforeDecimalPoint => self.integer_digits > 0,
            NumberState::AfterDecimalPoint => self.fraction_digits > 0,
            NumberState::AfterExponent => false,
        };
        if !after_digit {
            return Err(Self::unexpected(marker));
        }
        self.state = NumberState::AfterExponent;
        Ok(())
    }

    /// Handles `+` or `-`.
    ///
    /// # Errors
    ///
    /// Only legal immediately after `e` or `E`.
    pub fn set_exponent_sign(&mut self, sign: char) -> Result<(), LexError> {
        if self.state != NumberState::AfterExponent
            || self.exponent_signed
            || self.exponent_digits > 0
        {
            return Err(Self::unexpected(sign));
        }
        self.exponent_negative = sign == '-';
        self.exponent_signed = true;
        Ok(())
    }

    /// Materializes the literal read so far.
    ///
    /// # Errors
    ///
    /// Fails if a part that requires digits has none, or if the magnitude
    /// does not fit in an `f64`.
    pub fn value(&self) -> Result<f64, LexError> {
        if self.integer_digits == 0 {
            return Err(LexError::InvalidNumber("expected a digit after '-'"));
        }
        if self.state == NumberState::AfterDecimalPoint && self.fraction_digits == 0 {
            return Err(LexError::InvalidNumber("expected a digit after '.'"));
        }
        if self.state == NumberState::AfterExponent && self.exponent_digits == 0 {
            return Err(LexError::InvalidNumber("expected a digit in the exponent"));
        }

        let exponent = i64::from(self.exponent);
        let exponent = if self.exponent_negative {
            -exponent
        } else {
            exponent
        };
        let scale = i64::try_from(self.fraction_digits).unwrap_or(i64::MAX);
        let exponent = exponent.saturating_sub(scale);

        let sign = if self.negative { "-" } else { "" };
        let value: f64 = format!("{sign}{}e{exponent}", self.digits)
            .parse()
            .map_err(|_| LexError::InvalidNumber("malformed literal"))?;

        if value.is_finite() {
            Ok(value)
        } else {
            Err(LexError::InvalidNumber("number out of range"))
        }
    }

    fn unexpected(ch: char) -> LexError {
        LexError::UnexpectedCharacter {
            ch,
            state: LexState::InNumber,
        }
    }
}
