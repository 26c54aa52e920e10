/// Capacity of a freshly created [`TextBuffer`](crate::TextBuffer), and the capacity it returns to
/// on [`reset`](crate::TextBuffer::reset). Every capacity a growable buffer ever takes is this value
/// times a power of two.
pub const DEFAULT_CAPACITY: usize = 32;

/// Smallest capacity of the form `DEFAULT_CAPACITY * 2^k` that is at least `n`, doubling from
/// `from`. Panics on arithmetic overflow.
pub(crate) fn grown_capacity(from: usize, n: usize) -> usize {
    let mut cap = from.max(DEFAULT_CAPACITY);

    while cap < n {
        cap = cap.checked_mul(2).expect("text buffer capacity overflow");
    }

    cap
}
