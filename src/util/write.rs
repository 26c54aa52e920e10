use std::fmt;

/// A `fmt::Write` sink which only counts the bytes written to it. Used to learn the exact length
/// of text produced by `core::fmt` before any space is reserved for it.
#[derive(Debug, Clone, Default)]
pub struct WriteByteCounter(pub usize);

impl fmt::Write for WriteByteCounter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0 += s.len();

        Ok(())
    }
}

impl WriteByteCounter {
    pub fn count(args: impl FnOnce(&mut Self) -> fmt::Result) -> usize {
        let mut counter = Self::default();

        // Counting never fails; an `Err` could only come from a broken `Display` impl.
        let _ = args(&mut counter);
        counter.0
    }
}
