use std::{fmt, ops, ptr, slice};

use crate::error::OutOfRange;

// === View === //

/// A non-owning, bounds-checked window over a contiguous run of `T`s.
///
/// An empty view reports a null [`data`](View::data) pointer regardless of where it came from.
#[derive(Copy, Clone)]
pub struct View<'a, T> {
    items: &'a [T],
}

impl<T> Default for View<'_, T> {
    fn default() -> Self {
        Self { items: &[] }
    }
}

impl<'a, T> View<'a, T> {
    pub const fn new(items: &'a [T]) -> Self {
        Self { items }
    }

    /// Builds a view over `len` elements starting at `data`.
    ///
    /// # Safety
    ///
    /// `data` may only be null when `len` is zero. Otherwise it must point to `len` initialized
    /// elements which stay valid and unmutated for `'a`.
    pub unsafe fn from_raw_parts(data: *const T, len: usize) -> Self {
        if data.is_null() {
            assert_eq!(len, 0, "a null view must be empty");
            return Self::default();
        }

        Self {
            items: unsafe { slice::from_raw_parts(data, len) },
        }
    }

    pub fn data(&self) -> *const T {
        if self.items.is_empty() {
            ptr::null()
        } else {
            self.items.as_ptr()
        }
    }

    pub const fn len(&self) -> usize {
        self.items.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn at(&self, index: usize) -> Result<&'a T, OutOfRange> {
        self.items.get(index).ok_or(OutOfRange {
            index,
            len: self.items.len(),
        })
    }

    /// # Safety
    ///
    /// `index` must be less than [`len`](View::len).
    pub unsafe fn get_unchecked(&self, index: usize) -> &'a T {
        debug_assert!(index < self.items.len());
        unsafe { self.items.get_unchecked(index) }
    }

    pub fn iter(&self) -> slice::Iter<'a, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &'a [T] {
        self.items
    }
}

impl<T> ops::Index<usize> for View<'_, T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<'a, T> IntoIterator for View<'a, T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<'a, T> IntoIterator for &View<'a, T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<'a, T> From<&'a [T]> for View<'a, T> {
    fn from(items: &'a [T]) -> Self {
        Self::new(items)
    }
}

impl<T: PartialEq> PartialEq for View<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: Eq> Eq for View<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for View<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items).finish()
    }
}

// === ViewMut === //

/// The mutable counterpart of [`View`]: elements may be overwritten in place but the view can
/// never change length.
pub struct ViewMut<'a, T> {
    items: &'a mut [T],
}

impl<T> Default for ViewMut<'_, T> {
    fn default() -> Self {
        Self { items: &mut [] }
    }
}

impl<'a, T> ViewMut<'a, T> {
    pub fn new(items: &'a mut [T]) -> Self {
        Self { items }
    }

    /// # Safety
    ///
    /// Same contract as [`View::from_raw_parts`], and additionally no other reference may access
    /// the elements for `'a`.
    pub unsafe fn from_raw_parts(data: *mut T, len: usize) -> Self {
        if data.is_null() {
            assert_eq!(len, 0, "a null view must be empty");
            return Self::default();
        }

        Self {
            items: unsafe { slice::from_raw_parts_mut(data, len) },
        }
    }

    pub fn data(&mut self) -> *mut T {
        if self.items.is_empty() {
            ptr::null_mut()
        } else {
            self.items.as_mut_ptr()
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn at(&self, index: usize) -> Result<&T, OutOfRange> {
        self.as_view().at(index)
    }

    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, OutOfRange> {
        let len = self.items.len();
        self.items.get_mut(index).ok_or(OutOfRange { index, len })
    }

    /// # Safety
    ///
    /// `index` must be less than [`len`](ViewMut::len).
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.items.len());
        unsafe { self.items.get_unchecked_mut(index) }
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn as_view(&self) -> View<'_, T> {
        View::new(self.items)
    }

    pub fn into_view(self) -> View<'a, T> {
        View::new(self.items)
    }
}

impl<T> ops::Index<usize> for ViewMut<'_, T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T> ops::IndexMut<usize> for ViewMut<'_, T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.items[index]
    }
}

impl<'a, T> IntoIterator for ViewMut<'a, T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter_mut()
    }
}

impl<'a, T> From<&'a mut [T]> for ViewMut<'a, T> {
    fn from(items: &'a mut [T]) -> Self {
        Self::new(items)
    }
}

impl<T: fmt::Debug> fmt::Debug for ViewMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}
