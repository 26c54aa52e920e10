use std::marker::PhantomData;

use derive_where::derive_where;

use super::Formatter;
use crate::buffer::cursor::{render, TextCursor};

// === Bases === //

mod sealed {
    pub trait Sealed {}
}

/// One of the four numeric bases an [`IntFormatter`] can be built for.
pub trait Base: sealed::Sealed {
    const RADIX: u32;
    const DIGITS: &'static [u8; 16];
}

const LOWER_DIGITS: &[u8; 16] = b"0123456789abcdef";
const UPPER_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

macro_rules! define_bases {
    ($($name:ident => $radix:literal, $digits:expr;)*) => {$(
        #[derive(Debug, Copy, Clone, Default, Hash, Eq, PartialEq)]
        pub struct $name;

        impl sealed::Sealed for $name {}

        impl Base for $name {
            const RADIX: u32 = $radix;
            const DIGITS: &'static [u8; 16] = $digits;
        }
    )*};
}

define_bases! {
    Oct => 8, LOWER_DIGITS;
    Dec => 10, LOWER_DIGITS;
    Hex => 16, LOWER_DIGITS;
    UpperHex => 16, UPPER_DIGITS;
}

// === Integer === //

/// Primitive integers an [`IntFormatter`] accepts.
pub trait Integer: Copy {
    type Magnitude: Magnitude;

    /// Splits the value into `(is_negative, |value|)` without overflowing on `MIN`.
    fn split_sign(self) -> (bool, Self::Magnitude);
}

#[doc(hidden)]
pub trait Magnitude: Copy {
    fn digit_count(self, radix: u32) -> usize;

    /// Writes the digits right-aligned into `dst`, which must be exactly `digit_count` long.
    fn write_digits(self, radix: u32, table: &[u8; 16], dst: &mut [u8]);
}

macro_rules! impl_magnitude {
    ($($ty:ty),* $(,)?) => {$(
        impl Magnitude for $ty {
            fn digit_count(mut self, radix: u32) -> usize {
                let radix = radix as $ty;
                let mut count = 1;

                while self >= radix {
                    self /= radix;
                    count += 1;
                }

                count
            }

            fn write_digits(mut self, radix: u32, table: &[u8; 16], dst: &mut [u8]) {
                let radix = radix as $ty;

                for slot in dst.iter_mut().rev() {
                    *slot = table[(self % radix) as usize];
                    self /= radix;
                }

                debug_assert_eq!(self, 0);
            }
        }
    )*};
}

impl_magnitude!(u8, u16, u32, u64, u128, usize);

macro_rules! impl_integer {
    (signed: $($ty:ty => $mag:ty),* $(,)?) => {$(
        impl Integer for $ty {
            type Magnitude = $mag;

            fn split_sign(self) -> (bool, $mag) {
                (self < 0, self.unsigned_abs())
            }
        }
    )*};
    (unsigned: $($ty:ty),* $(,)?) => {$(
        impl Integer for $ty {
            type Magnitude = $ty;

            fn split_sign(self) -> (bool, $ty) {
                (false, self)
            }
        }
    )*};
}

impl_integer!(signed: i8 => u8, i16 => u16, i32 => u32, i64 => u64, i128 => u128, isize => usize);
impl_integer!(unsigned: u8, u16, u32, u64, u128, usize);

// === IntFormatter === //

/// Formats integers in base `B` with an optional `+` on non-negative values and optional zero
/// padding between the sign and the digits.
#[derive_where(Copy, Clone, Debug, Default, Hash, Eq, PartialEq)]
pub struct IntFormatter<B> {
    plus_sign: bool,
    pad_zeros: bool,
    _base: PhantomData<B>,
}

pub const fn dec() -> IntFormatter<Dec> {
    IntFormatter::new()
}

pub const fn oct() -> IntFormatter<Oct> {
    IntFormatter::new()
}

pub const fn hex() -> IntFormatter<Hex> {
    IntFormatter::new()
}

pub const fn upper_hex() -> IntFormatter<UpperHex> {
    IntFormatter::new()
}

#[derive(Debug, Copy, Clone)]
struct Layout {
    lead_spaces: usize,
    sign: Option<u8>,
    zeros: usize,
    digits: usize,
}

impl Layout {
    fn len(&self) -> usize {
        self.lead_spaces + usize::from(self.sign.is_some()) + self.zeros + self.digits
    }
}

impl<B> IntFormatter<B> {
    pub const fn new() -> Self {
        Self {
            plus_sign: false,
            pad_zeros: false,
            _base: PhantomData,
        }
    }

    #[must_use]
    pub const fn with_plus_sign(mut self, plus_sign: bool) -> Self {
        self.plus_sign = plus_sign;
        self
    }

    #[must_use]
    pub const fn with_pad_zeros(mut self, pad_zeros: bool) -> Self {
        self.pad_zeros = pad_zeros;
        self
    }

    pub const fn plus_sign(&self) -> bool {
        self.plus_sign
    }

    pub const fn pad_zeros(&self) -> bool {
        self.pad_zeros
    }
}

impl<B: Base> IntFormatter<B> {
    pub const fn base(&self) -> u32 {
        B::RADIX
    }

    // Both `formatted_length` and `format_into` go through here so they cannot disagree.
    fn layout<I: Integer>(&self, value: I, width: usize) -> (Layout, I::Magnitude) {
        let (negative, magnitude) = value.split_sign();

        let sign = if negative {
            Some(b'-')
        } else if self.plus_sign {
            Some(b'+')
        } else {
            None
        };

        let digits = magnitude.digit_count(B::RADIX);
        let pad = width.saturating_sub(usize::from(sign.is_some()) + digits);

        let (lead_spaces, zeros) = if self.pad_zeros { (0, pad) } else { (pad, 0) };

        let layout = Layout {
            lead_spaces,
            sign,
            zeros,
            digits,
        };

        (layout, magnitude)
    }

    pub fn formatted_length<I: Integer>(&self, value: I, width: usize) -> usize {
        self.layout(value, width).0.len()
    }

    pub fn format<I: Integer>(&self, value: I, width: usize) -> String {
        render(self.formatted_length(value, width), |cursor| {
            self.write(value, width, cursor)
        })
    }

    fn write<I: Integer>(&self, value: I, width: usize, cursor: &mut TextCursor<'_>) {
        let (layout, magnitude) = self.layout(value, width);

        cursor.ascii_slot(layout.lead_spaces).fill(b' ');

        if let Some(sign) = layout.sign {
            cursor.ascii_slot(1)[0] = sign;
        }

        cursor.ascii_slot(layout.zeros).fill(b'0');

        magnitude.write_digits(B::RADIX, B::DIGITS, cursor.ascii_slot(layout.digits));
    }
}

impl<B: Base, I: Integer> Formatter<I> for IntFormatter<B> {
    fn formatted_length(&self, value: &I, width: usize) -> usize {
        IntFormatter::formatted_length(self, *value, width)
    }

    fn format_into(&self, value: &I, width: usize, cursor: &mut TextCursor<'_>) {
        self.write(*value, width, cursor)
    }
}
