//! Floating-point formatters. Digit generation is left to `core::fmt`; these types only choose
//! the notation, apply sign and width policy, and measure the result up front.

use std::{
    fmt::{self, Write},
    str,
};

use super::{pad_for, Formatter};
use crate::{buffer::cursor::TextCursor, util::write::WriteByteCounter};

pub trait Float: Copy + fmt::Display + fmt::LowerExp {}

impl Float for f32 {}

impl Float for f64 {}

/// Shared by every float formatter: measure the unpadded text, then right-align it.
trait Notation {
    fn emit<F: Float, W: Write>(&self, value: F, out: &mut W) -> fmt::Result;

    fn natural_length<F: Float>(&self, value: F) -> usize {
        WriteByteCounter::count(|w| self.emit(value, w))
    }

    fn padded_length<F: Float>(&self, value: F, width: usize) -> usize {
        self.natural_length(value).max(width)
    }

    fn padded_into<F: Float>(&self, value: F, width: usize, cursor: &mut TextCursor<'_>) {
        cursor.fill(' ', pad_for(self.natural_length(value), width));

        // A short write here surfaces as a length mismatch at the sink.
        let _ = self.emit(value, cursor);
    }
}

macro_rules! impl_formatter_for_notation {
    ($($ty:ty),* $(,)?) => {$(
        impl<F: Float> Formatter<F> for $ty {
            fn formatted_length(&self, value: &F, width: usize) -> usize {
                self.padded_length(*value, width)
            }

            fn format_into(&self, value: &F, width: usize, cursor: &mut TextCursor<'_>) {
                self.padded_into(*value, width, cursor)
            }
        }
    )*};
}

impl_formatter_for_notation!(FloatFormatter, FixedFormatter, SciFormatter);

// === FloatFormatter === //

/// The shortest text that reads back as the same value, e.g. `123.75`. Used when a float is
/// appended without an explicit formatter.
#[derive(Debug, Copy, Clone, Default, Hash, Eq, PartialEq)]
pub struct FloatFormatter;

impl Notation for FloatFormatter {
    fn emit<F: Float, W: Write>(&self, value: F, out: &mut W) -> fmt::Result {
        write!(out, "{value}")
    }
}

// === FixedFormatter === //

pub const DEFAULT_PRECISION: usize = 6;

/// Fixed-point notation with a set number of fractional digits (`12.5000`).
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub struct FixedFormatter {
    precision: usize,
    plus_sign: bool,
}

impl Default for FixedFormatter {
    fn default() -> Self {
        fixed()
    }
}

pub const fn fixed() -> FixedFormatter {
    FixedFormatter {
        precision: DEFAULT_PRECISION,
        plus_sign: false,
    }
}

impl FixedFormatter {
    #[must_use]
    pub const fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    #[must_use]
    pub const fn with_plus_sign(mut self, plus_sign: bool) -> Self {
        self.plus_sign = plus_sign;
        self
    }

    pub const fn precision(&self) -> usize {
        self.precision
    }

    pub const fn plus_sign(&self) -> bool {
        self.plus_sign
    }
}

impl Notation for FixedFormatter {
    fn emit<F: Float, W: Write>(&self, value: F, out: &mut W) -> fmt::Result {
        let precision = self.precision;

        if self.plus_sign {
            write!(out, "{value:+.precision$}")
        } else {
            write!(out, "{value:.precision$}")
        }
    }
}

// === SciFormatter === //

/// Scientific notation with a signed, at least two digit exponent (`2.500e+00`).
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub struct SciFormatter {
    precision: usize,
    plus_sign: bool,
}

impl Default for SciFormatter {
    fn default() -> Self {
        sci()
    }
}

pub const fn sci() -> SciFormatter {
    SciFormatter {
        precision: DEFAULT_PRECISION,
        plus_sign: false,
    }
}

impl SciFormatter {
    #[must_use]
    pub const fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    #[must_use]
    pub const fn with_plus_sign(mut self, plus_sign: bool) -> Self {
        self.plus_sign = plus_sign;
        self
    }

    pub const fn precision(&self) -> usize {
        self.precision
    }

    pub const fn plus_sign(&self) -> bool {
        self.plus_sign
    }
}

impl Notation for SciFormatter {
    fn emit<F: Float, W: Write>(&self, value: F, out: &mut W) -> fmt::Result {
        let precision = self.precision;
        let mut out = SignedExponent::new(out);

        if self.plus_sign {
            write!(out, "{value:+.precision$e}")?;
        } else {
            write!(out, "{value:.precision$e}")?;
        }

        out.finish()
    }
}

/// Rewrites the `e-5` / `e12` exponents of `core::fmt` as `e-05` / `e+12`.
struct SignedExponent<'a, W> {
    out: &'a mut W,
    exponent: [u8; 8],
    exponent_len: usize,
    in_exponent: bool,
}

impl<'a, W: Write> SignedExponent<'a, W> {
    fn new(out: &'a mut W) -> Self {
        Self {
            out,
            exponent: [0; 8],
            exponent_len: 0,
            in_exponent: false,
        }
    }

    fn stash(&mut self, s: &str) -> fmt::Result {
        let dst = self
            .exponent
            .get_mut(self.exponent_len..self.exponent_len + s.len())
            .ok_or(fmt::Error)?;

        dst.copy_from_slice(s.as_bytes());
        self.exponent_len += s.len();
        Ok(())
    }

    fn finish(self) -> fmt::Result {
        // `NaN` and `inf` have no exponent.
        if !self.in_exponent {
            return Ok(());
        }

        let exponent = str::from_utf8(&self.exponent[..self.exponent_len]).map_err(|_| fmt::Error)?;
        let (sign, digits) = match exponent.strip_prefix('-') {
            Some(digits) => ('-', digits),
            None => ('+', exponent),
        };

        self.out.write_char('e')?;
        self.out.write_char(sign)?;

        if digits.len() < 2 {
            self.out.write_char('0')?;
        }

        self.out.write_str(digits)
    }
}

impl<W: Write> Write for SignedExponent<'_, W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.in_exponent {
            return self.stash(s);
        }

        match s.split_once('e') {
            Some((mantissa, exponent)) => {
                self.out.write_str(mantissa)?;
                self.in_exponent = true;
                self.stash(exponent)
            }
            None => self.out.write_str(s),
        }
    }
}
