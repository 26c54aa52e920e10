//! Append-only text buffers. [`TextBuffer`] owns and grows its storage; [`RefTextBuffer`] writes
//! into storage borrowed from the caller and fails once it is full.

use crate::stream::Append;

use self::cursor::TextCursor;

pub mod bounded;
pub mod cursor;
pub mod growable;

pub use self::{bounded::RefTextBuffer, growable::TextBuffer};

// === TextSink === //

/// The write surface shared by both buffers.
///
/// Every write is sized up front: the sink makes room for exactly `len` bytes (or fails without
/// touching its content) and only then lets the caller fill them.
pub trait TextSink {
    type Error;

    /// Everything written so far.
    fn text(&self) -> &str;

    fn capacity(&self) -> usize;

    /// Makes sure at least `n` bytes fit in total.
    fn try_reserve(&mut self, n: usize) -> Result<(), Self::Error>;

    /// Appends exactly `len` bytes produced by `fill`.
    fn write_with(
        &mut self,
        len: usize,
        fill: impl FnOnce(&mut TextCursor<'_>),
    ) -> Result<(), Self::Error>;

    fn try_write(&mut self, s: &str) -> Result<(), Self::Error> {
        self.write_with(s.len(), |cursor| cursor.push_str(s))
    }

    fn try_write_repeated(&mut self, ch: char, count: usize) -> Result<(), Self::Error> {
        // An overflowing length can never fit, so it is reported by the sink like any other
        // oversized request.
        let len = ch.len_utf8().saturating_mul(count);

        self.write_with(len, |cursor| cursor.fill(ch, count))
    }

    fn try_append<V: Append>(&mut self, value: V) -> Result<(), Self::Error>
    where
        Self: Sized,
    {
        value.append_to(self)
    }
}
