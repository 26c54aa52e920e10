use thiserror::Error;

/// Returned by the checked accessors of [`View`](crate::View) and [`ViewMut`](crate::ViewMut).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Error)]
#[error("index {index} is out of bounds for a view of length {len}")]
pub struct OutOfRange {
    pub index: usize,
    pub len: usize,
}

/// Returned when a [`RefTextBuffer`](crate::RefTextBuffer) cannot hold the requested length. The
/// buffer is left exactly as it was before the failing call.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Error)]
#[error("{requested} byte(s) requested but the buffer can only hold {capacity}")]
pub struct CapacityExceeded {
    pub requested: usize,
    pub capacity: usize,
}
