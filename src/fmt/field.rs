use super::{pad_for, Formatter};
use crate::buffer::cursor::TextCursor;

// === Char and str === //

/// Writes a `char` as-is, right-aligned under the width.
#[derive(Debug, Copy, Clone, Default, Hash, Eq, PartialEq)]
pub struct CharFormatter;

impl Formatter<char> for CharFormatter {
    fn formatted_length(&self, value: &char, width: usize) -> usize {
        value.len_utf8().max(width)
    }

    fn format_into(&self, value: &char, width: usize, cursor: &mut TextCursor<'_>) {
        cursor.fill(' ', pad_for(value.len_utf8(), width));
        cursor.push_char(*value);
    }
}

/// Writes a string as-is, right-aligned under the width. Widths count bytes.
#[derive(Debug, Copy, Clone, Default, Hash, Eq, PartialEq)]
pub struct StrFormatter;

impl Formatter<str> for StrFormatter {
    fn formatted_length(&self, value: &str, width: usize) -> usize {
        value.len().max(width)
    }

    fn format_into(&self, value: &str, width: usize, cursor: &mut TextCursor<'_>) {
        cursor.fill(' ', pad_for(value.len(), width));
        cursor.push_str(value);
    }
}

impl Formatter<String> for StrFormatter {
    fn formatted_length(&self, value: &String, width: usize) -> usize {
        Formatter::<str>::formatted_length(self, value, width)
    }

    fn format_into(&self, value: &String, width: usize, cursor: &mut TextCursor<'_>) {
        Formatter::<str>::format_into(self, value, width, cursor)
    }
}

impl Formatter<&str> for StrFormatter {
    fn formatted_length(&self, value: &&str, width: usize) -> usize {
        Formatter::<str>::formatted_length(self, value, width)
    }

    fn format_into(&self, value: &&str, width: usize, cursor: &mut TextCursor<'_>) {
        Formatter::<str>::format_into(self, value, width, cursor)
    }
}

// === FieldFormatter === //

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum Side {
    Left,
    Right,
}

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub struct Align {
    pub side: Side,
    pub width: usize,
}

pub const fn align_left(width: usize) -> Align {
    Align {
        side: Side::Left,
        width,
    }
}

pub const fn align_right(width: usize) -> Align {
    Align {
        side: Side::Right,
        width,
    }
}

/// Places the output of any inner formatter in a space-padded field. The inner formatter always
/// runs at width zero; the wider of the field's own width and the caller's width wins.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub struct FieldFormatter<F> {
    inner: F,
    align: Align,
}

impl<F> FieldFormatter<F> {
    pub const fn new(inner: F, align: Align) -> Self {
        Self { inner, align }
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }

    pub fn align(&self) -> Align {
        self.align
    }
}

impl<T: ?Sized, F: Formatter<T>> Formatter<T> for FieldFormatter<F> {
    fn formatted_length(&self, value: &T, width: usize) -> usize {
        self.inner
            .formatted_length(value, 0)
            .max(self.align.width)
            .max(width)
    }

    fn format_into(&self, value: &T, width: usize, cursor: &mut TextCursor<'_>) {
        let content = self.inner.formatted_length(value, 0);
        let pad = pad_for(content, self.align.width.max(width));

        match self.align.side {
            Side::Left => {
                self.inner.format_into(value, 0, cursor);
                cursor.fill(' ', pad);
            }
            Side::Right => {
                cursor.fill(' ', pad);
                self.inner.format_into(value, 0, cursor);
            }
        }
    }
}
