use std::{convert::Infallible, fmt, io};

use bytes::Bytes;

use super::{
    cursor::{assume_text, fill_exact, TextCursor},
    TextSink,
};
use crate::{
    limits::{grown_capacity, DEFAULT_CAPACITY},
    stream::Append,
    view::View,
};

/// An owning, append-only text buffer.
///
/// Starts at [`DEFAULT_CAPACITY`] and doubles whenever a write would not fit, so its capacity is
/// always `DEFAULT_CAPACITY * 2^k`. [`reset`](TextBuffer::reset) hands any grown storage back.
#[derive(Clone)]
pub struct TextBuffer {
    storage: Box<[u8]>,
    len: usize,
}

fn alloc_storage(capacity: usize) -> Box<[u8]> {
    vec![0u8; capacity].into_boxed_slice()
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer {
    pub fn new() -> Self {
        Self {
            storage: alloc_storage(DEFAULT_CAPACITY),
            len: 0,
        }
    }

    /// Creates a buffer that can hold `n` bytes before its first growth.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            storage: alloc_storage(grown_capacity(DEFAULT_CAPACITY, n)),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Grows the storage, if needed, so that at least `n` bytes fit in total.
    pub fn reserve(&mut self, n: usize) {
        if n <= self.capacity() {
            return;
        }

        let capacity = grown_capacity(self.capacity(), n);
        log::trace!(
            "TextBuffer is growing from {} to {capacity} byte(s).",
            self.capacity()
        );

        let mut storage = alloc_storage(capacity);
        storage[..self.len].copy_from_slice(&self.storage[..self.len]);
        self.storage = storage;
    }

    pub fn write(&mut self, s: &str) -> &mut Self {
        self.infallible(|this| this.try_write(s))
    }

    pub fn write_repeated(&mut self, ch: char, count: usize) -> &mut Self {
        self.infallible(|this| this.try_write_repeated(ch, count))
    }

    pub fn append(&mut self, value: impl Append) -> &mut Self {
        self.infallible(|this| value.append_to(this))
    }

    /// Empties the buffer and releases any storage grown past [`DEFAULT_CAPACITY`].
    pub fn reset(&mut self) {
        self.len = 0;

        if self.capacity() > DEFAULT_CAPACITY {
            log::debug!(
                "TextBuffer is releasing {} byte(s) of grown storage.",
                self.capacity() - DEFAULT_CAPACITY
            );
            self.storage = alloc_storage(DEFAULT_CAPACITY);
        }
    }

    /// Same as [`reset`](TextBuffer::reset).
    pub fn clear(&mut self) {
        self.reset();
    }

    /// Empties the buffer but keeps its current capacity, for loops which refill it right away.
    pub fn clear_retain_capacity(&mut self) {
        self.len = 0;
    }

    pub fn as_str(&self) -> &str {
        // SAFETY: `storage[..len]` is only ever filled by `write_with` through `TextCursor`s.
        unsafe { assume_text(self.as_bytes()) }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.storage[..self.len]
    }

    /// A view of the bytes written so far. Any further write may move the storage, which the
    /// borrow on `self` enforces.
    pub fn str_view(&self) -> View<'_, u8> {
        View::new(self.as_bytes())
    }

    pub fn into_string(self) -> String {
        self.as_str().to_owned()
    }

    /// Copies the content out, e.g. to hand it to a wire encoder.
    pub fn to_bytes(&self) -> Bytes {
        Bytes::copy_from_slice(self.as_bytes())
    }

    /// Copies the content into `out`.
    pub fn output(&self, out: &mut impl io::Write) -> io::Result<()> {
        out.write_all(self.as_bytes())
    }

    fn infallible(&mut self, f: impl FnOnce(&mut Self) -> Result<(), Infallible>) -> &mut Self {
        match f(self) {
            Ok(()) => self,
            Err(never) => match never {},
        }
    }
}

impl TextSink for TextBuffer {
    type Error = Infallible;

    fn text(&self) -> &str {
        self.as_str()
    }

    fn capacity(&self) -> usize {
        self.storage.len()
    }

    fn try_reserve(&mut self, n: usize) -> Result<(), Infallible> {
        self.reserve(n);
        Ok(())
    }

    fn write_with(
        &mut self,
        len: usize,
        fill: impl FnOnce(&mut TextCursor<'_>),
    ) -> Result<(), Infallible> {
        let end = self
            .len
            .checked_add(len)
            .expect("text buffer length overflow");

        self.reserve(end);
        fill_exact(&mut self.storage[self.len..end], fill);
        self.len = end;

        Ok(())
    }
}

impl fmt::Write for TextBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write(s);
        Ok(())
    }
}

/// `to_string()` copies the content out and leaves the buffer as it was; use
/// [`into_string`](TextBuffer::into_string) to give the buffer up instead.
impl fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextBuffer")
            .field("text", &self.as_str())
            .field("capacity", &self.capacity())
            .finish()
    }
}

impl From<TextBuffer> for String {
    fn from(buf: TextBuffer) -> Self {
        buf.into_string()
    }
}

#[cfg(test)]
mod tests {
    use std::fmt::Write;

    use quickcheck::quickcheck;

    use super::*;
    use crate::fmt::{fixed, hex, sci, with, CharFormatter, FieldFormatter};

    fn assert_state(sb: &TextBuffer, text: &str, capacity: usize) {
        assert_eq!(sb.is_empty(), text.is_empty());
        assert_eq!(sb.len(), text.len());
        assert_eq!(sb.capacity(), capacity);
        assert_eq!(sb.as_str(), text);
        assert_eq!(sb.to_string(), text);
        assert_eq!(sb.str_view(), View::new(text.as_bytes()));
    }

    #[test]
    fn basics() {
        let mut sb = TextBuffer::new();
        assert_state(&sb, "", 32);
        assert!(sb.str_view().data().is_null());

        sb.reset();
        assert_state(&sb, "", 32);

        sb.reserve(16);
        assert_state(&sb, "", 32);

        sb.reserve(33);
        assert_state(&sb, "", 64);

        sb.reset();
        assert_state(&sb, "", 32);

        sb.reserve(32 * 4 + 1);
        assert_state(&sb, "", 256);
    }

    #[test]
    fn write_strings() {
        let mut sb = TextBuffer::new();

        sb.write_repeated('*', 3);
        assert_state(&sb, "***", 32);

        sb.reset();
        sb.write("clue");
        assert_state(&sb, "clue", 32);

        sb.append('.');
        assert_state(&sb, "clue.", 32);

        let long_text = "0123456789-0123456789;\
                         0123456789-0123456789;\
                         0123456789-0123456789";
        assert_eq!(long_text.len(), 65);

        sb.append(long_text.to_owned());
        assert_eq!(sb.len(), 70);
        assert_eq!(sb.capacity(), 128);
        assert_eq!(sb.as_str(), format!("clue.{long_text}"));

        let long_text2 = "0123456789-0123456789;\
                          0123456789-0123456789;\
                          0123456789-0123456789;\
                          0123456789-0123456789;\
                          0123456789-0123456789";
        assert_eq!(long_text2.len(), 109);

        sb.append(long_text2);
        assert_eq!(sb.len(), 179);
        assert_eq!(sb.capacity(), 256);
        assert_eq!(sb.as_str(), format!("clue.{long_text}{long_text2}"));

        sb.reset();
        assert_state(&sb, "", 32);
    }

    #[test]
    fn write_numbers() {
        let mut sb = TextBuffer::new();

        sb.append(-123)
            .append(' ')
            .append(456)
            .append(' ')
            .append(123.75)
            .append(' ')
            .append(true)
            .append(' ')
            .append(false);

        assert_eq!(sb.as_str(), "-123 456 123.75 true false");
    }

    #[test]
    fn write_sequences() {
        let mut sb = TextBuffer::new();

        sb.append(1).append('+').append(2).append('=').append(3).append("\n");
        sb.append(4).append(" + ").append(5).append(" = ").append(9).append("\n");
        assert_eq!(sb.as_str(), "1+2=3\n4 + 5 = 9\n");

        sb.clear();
        sb.append(with(1.0f64, fixed().with_precision(4)))
            .append(", ")
            .append(with(2.5f64, sci().with_precision(3)))
            .append(", ")
            .append("'")
            .append(with('a', FieldFormatter::new(CharFormatter, crate::fmt::align_right(3))))
            .append("'");
        assert_eq!(sb.as_str(), "1.0000, 2.500e+00, '  a'");

        sb.clear();
        sb.append(with(255u8, hex().with_pad_zeros(true)).width(4));
        assert_eq!(sb.as_str(), "00ff");
    }

    #[test]
    fn clear_retains_capacity_only_when_asked() {
        let mut sb = TextBuffer::new();
        sb.write_repeated('x', 100);
        assert_eq!(sb.capacity(), 128);

        sb.clear_retain_capacity();
        assert_state(&sb, "", 128);

        sb.write_repeated('y', 100);
        assert_eq!(sb.capacity(), 128);

        sb.clear();
        assert_state(&sb, "", 32);
    }

    #[test]
    fn with_capacity_rounds_up() {
        assert_eq!(TextBuffer::with_capacity(0).capacity(), 32);
        assert_eq!(TextBuffer::with_capacity(100).capacity(), 128);

        let mut sb = TextBuffer::with_capacity(1000);
        assert_eq!(sb.capacity(), 1024);
        sb.reset();
        assert_eq!(sb.capacity(), 32);
    }

    #[test]
    fn std_interop() {
        let mut sb = TextBuffer::new();
        sb.write("abcdef");

        let mut out = Vec::new();
        sb.output(&mut out).unwrap();
        assert_eq!(out, b"abcdef");

        assert_eq!(sb.to_bytes(), Bytes::from_static(b"abcdef"));

        write!(sb, "-{}-{:>3}", 7, 'z').unwrap();
        assert_eq!(String::from(sb), "abcdef-7-  z");
    }

    #[test]
    fn copies_leave_the_buffer_intact() {
        let mut sb = TextBuffer::new();
        sb.write("first");

        let copy = sb.to_string();
        sb.write(" second");

        assert_eq!(copy, "first");
        assert_eq!(sb.as_str(), "first second");
        assert_eq!(sb.into_string(), "first second");
    }

    #[test]
    #[should_panic(expected = "text buffer length overflow")]
    fn overflowing_repeat_count_is_fatal() {
        let mut sb = TextBuffer::new();
        sb.write("a").write_repeated('é', usize::MAX);
    }

    #[test]
    fn multibyte_text() {
        let mut sb = TextBuffer::new();
        sb.append('é').write_repeated('ß', 2).append("日本");
        assert_eq!(sb.as_str(), "éßß日本");
        assert_eq!(sb.len(), "éßß日本".len());
    }

    quickcheck! {
        fn capacity_law(chunks: Vec<String>) -> bool {
            let mut sb = TextBuffer::new();
            let mut expected = String::new();

            for chunk in &chunks {
                sb.write(chunk);
                expected.push_str(chunk);
            }

            let minimal = grown_capacity(DEFAULT_CAPACITY, expected.len());
            sb.as_str() == expected && sb.capacity() == minimal
        }

        fn reset_law(chunks: Vec<String>) -> bool {
            let mut sb = TextBuffer::new();

            for chunk in &chunks {
                sb.write(chunk);
            }

            sb.reset();
            sb.capacity() == DEFAULT_CAPACITY && sb.is_empty()
        }
    }
}
