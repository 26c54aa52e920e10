//! Formatters: small, copyable policy objects which know the exact length of what they are about
//! to write before writing it.

use crate::buffer::cursor::{render, TextCursor};

pub mod field;
pub mod float;
pub mod int;

pub use self::{
    field::{align_left, align_right, Align, CharFormatter, FieldFormatter, Side, StrFormatter},
    float::{fixed, sci, FixedFormatter, Float, FloatFormatter, SciFormatter},
    int::{dec, hex, oct, upper_hex, Base, Dec, Hex, IntFormatter, Integer, Oct, UpperHex},
};

// === Formatter === //

/// Converts a `T` to text under a minimum field `width`.
///
/// `format_into` must push exactly `formatted_length(value, width)` bytes; sinks size their writes
/// from `formatted_length` and treat any disagreement as a bug.
pub trait Formatter<T: ?Sized> {
    fn formatted_length(&self, value: &T, width: usize) -> usize;

    fn format_into(&self, value: &T, width: usize, cursor: &mut TextCursor<'_>);
}

impl<T: ?Sized, F: ?Sized + Formatter<T>> Formatter<T> for &F {
    fn formatted_length(&self, value: &T, width: usize) -> usize {
        (**self).formatted_length(value, width)
    }

    fn format_into(&self, value: &T, width: usize, cursor: &mut TextCursor<'_>) {
        (**self).format_into(value, width, cursor)
    }
}

/// Formats `value` into a new `String`.
pub fn format<T: ?Sized, F: Formatter<T>>(value: &T, fmt: &F, width: usize) -> String {
    render(fmt.formatted_length(value, width), |cursor| {
        fmt.format_into(value, width, cursor)
    })
}

// === WithFmt === //

/// A value paired with the formatter (and field width) it should be appended with.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct WithFmt<T, F> {
    pub value: T,
    pub fmt: F,
    pub width: usize,
}

pub fn with<T, F>(value: T, fmt: F) -> WithFmt<T, F> {
    WithFmt {
        value,
        fmt,
        width: 0,
    }
}

impl<T, F> WithFmt<T, F> {
    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }
}

impl<T, F: Formatter<T>> WithFmt<T, F> {
    pub fn formatted_length(&self) -> usize {
        self.fmt.formatted_length(&self.value, self.width)
    }

    pub fn format_into(&self, cursor: &mut TextCursor<'_>) {
        self.fmt.format_into(&self.value, self.width, cursor)
    }
}

/// Number of space bytes needed to right-align `len` bytes in a field of `width`.
pub(crate) fn pad_for(len: usize, width: usize) -> usize {
    width.saturating_sub(len)
}
