//! Allocation-conscious text building: integer and float formatters that know their exact output
//! length up front, and two append-only buffers (one growing, one over borrowed storage) that use
//! those lengths to make every write a single sized copy.
//!
//! ```
//! use textkit::{fmt::{dec, with}, RefTextBuffer, TextBuffer};
//!
//! let mut log_line = TextBuffer::new();
//! log_line.append("id=").append(with(42, dec().with_pad_zeros(true)).width(5));
//! assert_eq!(log_line.as_str(), "id=00042");
//!
//! let mut slot = [0u8; 4];
//! let mut field = RefTextBuffer::new(&mut slot);
//! assert!(field.append(12345).is_err());
//! assert!(field.is_empty());
//! ```

pub mod buffer;
pub mod error;
pub mod fmt;
pub mod limits;
pub mod stream;
pub mod view;

mod util;

pub use self::{
    buffer::{cursor::TextCursor, RefTextBuffer, TextBuffer, TextSink},
    error::{CapacityExceeded, OutOfRange},
    stream::Append,
    view::{View, ViewMut},
};
