use std::{fmt, io};

use bytes::Bytes;

use super::{
    cursor::{assume_text, fill_exact, TextCursor},
    TextSink,
};
use crate::{error::CapacityExceeded, stream::Append, view::View};

/// A text buffer over storage owned by someone else: a stack array, or a slot inside a larger
/// record. It never grows; a write that does not fit fails and leaves the buffer untouched.
pub struct RefTextBuffer<'a> {
    storage: &'a mut [u8],
    len: usize,
}

impl<'a> RefTextBuffer<'a> {
    /// Writes will go to `storage`, whose length becomes the fixed capacity. Its prior contents
    /// are ignored.
    pub fn new(storage: &'a mut [u8]) -> Self {
        Self { storage, len: 0 }
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

    pub fn remaining(&self) -> usize {
        self.capacity() - self.len
    }

    /// Succeeds iff `n` bytes fit in total. Nothing is ever allocated.
    pub fn reserve(&mut self, n: usize) -> Result<(), CapacityExceeded> {
        if n > self.capacity() {
            return Err(self.exceeded(n));
        }

        Ok(())
    }

    pub fn write(&mut self, s: &str) -> Result<&mut Self, CapacityExceeded> {
        self.try_write(s)?;
        Ok(self)
    }

    pub fn write_repeated(&mut self, ch: char, count: usize) -> Result<&mut Self, CapacityExceeded> {
        self.try_write_repeated(ch, count)?;
        Ok(self)
    }

    pub fn append(&mut self, value: impl Append) -> Result<&mut Self, CapacityExceeded> {
        value.append_to(&mut *self)?;
        Ok(self)
    }

    pub fn reset(&mut self) {
        self.len = 0;
    }

    /// Same as [`reset`](RefTextBuffer::reset); there is no storage to release.
    pub fn clear(&mut self) {
        self.reset();
    }

    pub fn as_str(&self) -> &str {
        // SAFETY: `storage[..len]` is only ever filled by `write_with` through `TextCursor`s.
        unsafe { assume_text(self.as_bytes()) }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.storage[..self.len]
    }

    pub fn str_view(&self) -> View<'_, u8> {
        View::new(self.as_bytes())
    }

    /// Gives up the buffer and keeps the written text, borrowed for as long as the storage.
    pub fn into_str(self) -> &'a str {
        let RefTextBuffer { storage, len } = self;

        // SAFETY: see `as_str`.
        unsafe { assume_text(&storage[..len]) }
    }

    pub fn to_bytes(&self) -> Bytes {
        Bytes::copy_from_slice(self.as_bytes())
    }

    pub fn output(&self, out: &mut impl io::Write) -> io::Result<()> {
        out.write_all(self.as_bytes())
    }

    fn exceeded(&self, requested: usize) -> CapacityExceeded {
        log::debug!(
            "RefTextBuffer rejected a write: {requested} byte(s) needed, {} available.",
            self.capacity()
        );

        CapacityExceeded {
            requested,
            capacity: self.capacity(),
        }
    }
}

impl TextSink for RefTextBuffer<'_> {
    type Error = CapacityExceeded;

    fn text(&self) -> &str {
        self.as_str()
    }

    fn capacity(&self) -> usize {
        self.storage.len()
    }

    fn try_reserve(&mut self, n: usize) -> Result<(), CapacityExceeded> {
        self.reserve(n)
    }

    fn write_with(
        &mut self,
        len: usize,
        fill: impl FnOnce(&mut TextCursor<'_>),
    ) -> Result<(), CapacityExceeded> {
        let end = match self.len.checked_add(len) {
            Some(end) if end <= self.capacity() => end,
            _ => return Err(self.exceeded(self.len.saturating_add(len))),
        };

        fill_exact(&mut self.storage[self.len..end], fill);
        self.len = end;

        Ok(())
    }
}

/// Each `write_str` is all-or-nothing, but a `write!` made of several pieces may stop partway.
impl fmt::Write for RefTextBuffer<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.try_write(s).map_err(|_| fmt::Error)
    }
}

impl fmt::Display for RefTextBuffer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for RefTextBuffer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefTextBuffer")
            .field("text", &self.as_str())
            .field("capacity", &self.capacity())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::fmt::Write;

    use quickcheck::quickcheck;

    use super::*;
    use crate::fmt::{dec, with};

    fn assert_state(sb: &RefTextBuffer<'_>, text: &str, capacity: usize) {
        assert_eq!(sb.is_empty(), text.is_empty());
        assert_eq!(sb.len(), text.len());
        assert_eq!(sb.capacity(), capacity);
        assert_eq!(sb.as_str(), text);
        assert_eq!(sb.to_string(), text);
        assert_eq!(sb.str_view(), View::new(text.as_bytes()));
    }

    #[test]
    fn basics() {
        let mut buf = [0u8; 6];
        let mut sb = RefTextBuffer::new(&mut buf);
        assert_state(&sb, "", 6);

        sb.reset();
        assert_state(&sb, "", 6);

        sb.reserve(4).unwrap();
        assert_state(&sb, "", 6);

        assert_eq!(
            sb.reserve(12),
            Err(CapacityExceeded {
                requested: 12,
                capacity: 6
            })
        );
        assert_state(&sb, "", 6);

        sb.write("abc").unwrap();
        assert_state(&sb, "abc", 6);

        assert_eq!(
            sb.write("xyzw").map(|_| ()),
            Err(CapacityExceeded {
                requested: 7,
                capacity: 6
            })
        );
        assert_state(&sb, "abc", 6);

        sb.reset();
        assert_state(&sb, "", 6);
    }

    #[test]
    fn fills_to_the_brim() {
        let mut buf = [0u8; 8];
        let mut sb = RefTextBuffer::new(&mut buf);

        sb.append(-12).unwrap().append(' ').unwrap().append(true).unwrap();
        assert_state(&sb, "-12 true", 8);
        assert_eq!(sb.remaining(), 0);

        assert!(sb.append("").is_ok());
        assert!(sb.append('x').is_err());
        assert!(sb.write_repeated('-', 1).is_err());
        assert_state(&sb, "-12 true", 8);

        assert_eq!(sb.into_str(), "-12 true");
        assert_eq!(&buf, b"-12 true");
    }

    #[test]
    fn padded_numbers_are_all_or_nothing() {
        let mut buf = [0u8; 10];
        let mut sb = RefTextBuffer::new(&mut buf);

        sb.append(with(7, dec().with_pad_zeros(true)).width(4)).unwrap();
        assert_state(&sb, "0007", 10);

        assert!(sb.append(with(7, dec()).width(7)).is_err());
        assert_state(&sb, "0007", 10);

        sb.append(with(7, dec()).width(6)).unwrap();
        assert_state(&sb, "0007     7", 10);
    }

    #[test]
    fn std_interop() {
        let mut buf = [0u8; 4];
        let mut sb = RefTextBuffer::new(&mut buf);

        assert!(write!(sb, "ab").is_ok());
        assert!(write!(sb, "cde").is_err());
        assert_state(&sb, "ab", 4);

        let mut out = Vec::new();
        sb.output(&mut out).unwrap();
        assert_eq!(out, b"ab");
        assert_eq!(sb.to_bytes(), Bytes::from_static(b"ab"));
    }

    #[test]
    fn huge_repeat_counts_are_rejected() {
        let mut buf = [0u8; 6];
        let mut sb = RefTextBuffer::new(&mut buf);
        sb.write("abc").unwrap();

        assert_eq!(
            sb.write_repeated('é', usize::MAX).map(|_| ()),
            Err(CapacityExceeded {
                requested: usize::MAX,
                capacity: 6
            })
        );
        assert_state(&sb, "abc", 6);

        sb.reset();
        assert!(sb.write_repeated('x', usize::MAX).is_err());
        assert_state(&sb, "", 6);
    }

    #[test]
    fn stale_storage_is_never_exposed() {
        let mut buf = *b"garbage!";
        let mut sb = RefTextBuffer::new(&mut buf);
        assert_state(&sb, "", 8);

        sb.write("ok").unwrap();
        assert_state(&sb, "ok", 8);
    }

    quickcheck! {
        fn all_or_nothing_law(capacity: u8, chunks: Vec<String>) -> bool {
            let mut buf = vec![0u8; usize::from(capacity)];
            let mut sb = RefTextBuffer::new(&mut buf);
            let mut expected = String::new();

            for chunk in &chunks {
                let fits = expected.len() + chunk.len() <= usize::from(capacity);

                if sb.write(chunk).is_ok() != fits {
                    return false;
                }

                if fits {
                    expected.push_str(chunk);
                }

                if sb.as_str() != expected {
                    return false;
                }
            }

            true
        }
    }
}
