use crate::{
    buffer::TextSink,
    fmt::{dec, FloatFormatter, Formatter, WithFmt},
};

// === Append === //

/// A value that knows how to append itself to either buffer.
///
/// Each implementation asks for exactly the bytes it needs in a single sized write, so a bounded
/// buffer either takes the whole value or none of it.
pub trait Append {
    fn append_to<S: TextSink>(&self, sink: &mut S) -> Result<(), S::Error>;
}

impl<T: ?Sized + Append> Append for &T {
    fn append_to<S: TextSink>(&self, sink: &mut S) -> Result<(), S::Error> {
        (**self).append_to(sink)
    }
}

impl Append for str {
    fn append_to<S: TextSink>(&self, sink: &mut S) -> Result<(), S::Error> {
        sink.try_write(self)
    }
}

impl Append for String {
    fn append_to<S: TextSink>(&self, sink: &mut S) -> Result<(), S::Error> {
        sink.try_write(self)
    }
}

impl Append for char {
    fn append_to<S: TextSink>(&self, sink: &mut S) -> Result<(), S::Error> {
        sink.write_with(self.len_utf8(), |cursor| cursor.push_char(*self))
    }
}

impl Append for bool {
    fn append_to<S: TextSink>(&self, sink: &mut S) -> Result<(), S::Error> {
        sink.try_write(if *self { "true" } else { "false" })
    }
}

macro_rules! impl_append_with {
    ($fmt:expr => $($ty:ty),* $(,)?) => {$(
        impl Append for $ty {
            fn append_to<S: TextSink>(&self, sink: &mut S) -> Result<(), S::Error> {
                WithFmt { value: *self, fmt: $fmt, width: 0 }.append_to(sink)
            }
        }
    )*};
}

impl_append_with!(dec() => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_append_with!(FloatFormatter => f32, f64);

impl<T, F: Formatter<T>> Append for WithFmt<T, F> {
    fn append_to<S: TextSink>(&self, sink: &mut S) -> Result<(), S::Error> {
        sink.write_with(self.formatted_length(), |cursor| self.format_into(cursor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        buffer::{RefTextBuffer, TextBuffer},
        error::CapacityExceeded,
        fmt::{oct, upper_hex, with, StrFormatter},
    };

    // Written once against the sink trait so both buffers go through the same code path.
    fn write_record<S: TextSink>(sink: &mut S, id: u32, name: &str, ok: bool) -> Result<(), S::Error> {
        sink.try_append(with(id, upper_hex().with_pad_zeros(true)).width(8))?;
        sink.try_append(' ')?;
        sink.try_append(with(name, StrFormatter).width(6))?;
        sink.try_append(' ')?;
        sink.try_append(ok)?;
        Ok(())
    }

    #[test]
    fn same_output_on_both_buffers() {
        let mut owned = TextBuffer::new();
        write_record(&mut owned, 0xBEEF, "disk", true).unwrap();

        let mut storage = [0u8; 64];
        let mut bounded = RefTextBuffer::new(&mut storage);
        write_record(&mut bounded, 0xBEEF, "disk", true).unwrap();

        assert_eq!(owned.as_str(), "0000BEEF   disk true");
        assert_eq!(bounded.as_str(), owned.as_str());
    }

    #[test]
    fn bounded_record_fails_midway_without_partial_values() {
        let mut storage = [0u8; 12];
        let mut bounded = RefTextBuffer::new(&mut storage);

        assert_eq!(
            write_record(&mut bounded, 1, "disk", false),
            Err(CapacityExceeded {
                requested: 15,
                capacity: 12
            })
        );
        assert_eq!(bounded.as_str(), "00000001 ");
    }

    #[test]
    fn sequential_concatenation() {
        let parts: [&dyn Fn(&mut TextBuffer); 5] = [
            &|b: &mut TextBuffer| {
                b.append(-7i64);
            },
            &|b: &mut TextBuffer| {
                b.append(u128::MAX);
            },
            &|b: &mut TextBuffer| {
                b.append(with(8, oct()).width(4));
            },
            &|b: &mut TextBuffer| {
                b.append(0.25f32);
            },
            &|b: &mut TextBuffer| {
                b.append(String::from("é"));
            },
        ];

        let mut all = TextBuffer::new();
        let mut pieces = String::new();

        for part in parts {
            part(&mut all);

            let mut alone = TextBuffer::new();
            part(&mut alone);
            pieces.push_str(alone.as_str());
        }

        assert_eq!(all.as_str(), pieces);
        assert_eq!(all.as_str(), format!("-7{}  100.25é", u128::MAX));
    }
}
