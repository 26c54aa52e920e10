use std::{fmt, str};

// === TextCursor === //

/// The write end handed to a [`Formatter`](crate::fmt::Formatter): a window of exactly the length
/// the formatter declared, filled front to back.
///
/// Only text can be pushed through a cursor, so whatever ends up in a buffer is valid UTF-8.
/// Pushing past the end of the window panics.
#[derive(Debug)]
pub struct TextCursor<'a> {
    dst: &'a mut [u8],
    pos: usize,
}

impl<'a> TextCursor<'a> {
    pub(crate) fn new(dst: &'a mut [u8]) -> Self {
        Self { dst, pos: 0 }
    }

    pub fn written(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.dst.len() - self.pos
    }

    pub fn push_str(&mut self, s: &str) {
        self.ascii_slot(s.len()).copy_from_slice(s.as_bytes());
    }

    pub fn push_char(&mut self, ch: char) {
        let mut dst = [0u8; 4];
        self.push_str(ch.encode_utf8(&mut dst));
    }

    /// Pushes `count` copies of `ch`.
    pub fn fill(&mut self, ch: char, count: usize) {
        if ch.is_ascii() {
            self.ascii_slot(count).fill(ch as u8);
        } else {
            for _ in 0..count {
                self.push_char(ch);
            }
        }
    }

    /// Claims the next `len` bytes of the window. Callers inside the crate must only store ASCII
    /// (or whole UTF-8 sequences) into the returned slot.
    pub(crate) fn ascii_slot(&mut self, len: usize) -> &mut [u8] {
        assert!(
            len <= self.remaining(),
            "formatter wrote past its declared length ({} byte(s) left, {len} pushed)",
            self.remaining(),
        );

        let start = self.pos;
        self.pos += len;
        &mut self.dst[start..self.pos]
    }
}

impl fmt::Write for TextCursor<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if s.len() > self.remaining() {
            return Err(fmt::Error);
        }

        self.push_str(s);
        Ok(())
    }
}

/// Runs `fill` over a fresh window of `len` bytes and checks that it was filled exactly.
pub(crate) fn fill_exact(dst: &mut [u8], fill: impl FnOnce(&mut TextCursor<'_>)) {
    let len = dst.len();
    let mut cursor = TextCursor::new(dst);
    fill(&mut cursor);

    assert_eq!(
        cursor.written(),
        len,
        "formatter wrote {} byte(s) but declared {len}",
        cursor.written(),
    );
}

/// Renders `len` bytes of text into a new `String`.
pub(crate) fn render(len: usize, fill: impl FnOnce(&mut TextCursor<'_>)) -> String {
    let mut bytes = vec![0u8; len];
    fill_exact(&mut bytes, fill);

    // SAFETY: `fill_exact` checked that every byte came through a `TextCursor`, which only
    // accepts UTF-8 text.
    unsafe { String::from_utf8_unchecked(bytes) }
}

/// Reinterprets buffer contents written exclusively through [`TextCursor`]s.
///
/// # Safety
///
/// `bytes` must be a concatenation of fully written cursor windows.
pub(crate) unsafe fn assume_text(bytes: &[u8]) -> &str {
    debug_assert!(str::from_utf8(bytes).is_ok());
    unsafe { str::from_utf8_unchecked(bytes) }
}

#[cfg(test)]
mod tests {
    use std::fmt::Write;

    use super::*;

    #[test]
    fn fills_front_to_back() {
        let text = render(9, |c| {
            c.push_str("ab");
            c.fill(' ', 2);
            c.push_char('é');
            c.fill('-', 1);
            assert_eq!(c.remaining(), 2);
            write!(c, "{}", 42).unwrap();
        });

        assert_eq!(text, "ab  é-42");
    }

    #[test]
    fn fmt_write_refuses_overflow() {
        let mut dst = [0u8; 3];
        let mut c = TextCursor::new(&mut dst);
        assert!(write!(c, "abcd").is_err());
        assert_eq!(c.written(), 0);
    }

    #[test]
    #[should_panic(expected = "declared")]
    fn underfill_is_rejected() {
        render(4, |c| c.push_str("abc"));
    }

    #[test]
    #[should_panic(expected = "past its declared length")]
    fn overfill_is_rejected() {
        render(2, |c| c.push_str("abc"));
    }
}
