//! Non-owning element storage for fixtures.
//!
//! Every fixture borrows caller-owned storage through an [`ElemSpan`];
//! nothing in this crate allocates element storage. The span is a `Copy`
//! view built over interior-mutable cells so that several live multi-pass
//! iterators can read and write the same elements without aliasing
//! violations, and it carries an explicit writability flag (the runtime
//! analog of lending out `&[T]` versus `&mut [T]`).

use std::cell::Cell;
use std::fmt;

/// A borrowed, possibly writable view of a caller's element slice.
///
/// Created from `&mut [T]`; [`into_read_only`](Self::into_read_only)
/// models lending the storage out immutably. Copying the span copies the
/// view, never the elements.
///
/// # Examples
///
/// ```
/// use rangeforge_core::ElemSpan;
///
/// let mut data = [1, 2, 3];
/// let span = ElemSpan::new(&mut data);
/// span.set(0, 10);
/// assert_eq!(span.get(0), 10);
/// assert_eq!(span.len(), 3);
/// ```
pub struct ElemSpan<'a, T> {
    cells: &'a [Cell<T>],
    writable: bool,
}

impl<'a, T> ElemSpan<'a, T> {
    /// Creates a writable span over a mutable slice.
    #[must_use]
    pub fn new(elements: &'a mut [T]) -> Self {
        Self {
            cells: Cell::from_mut(elements).as_slice_of_cells(),
            writable: true,
        }
    }

    /// Downgrades this span to read-only. Writes through the result panic.
    #[must_use]
    pub const fn into_read_only(mut self) -> Self {
        self.writable = false;
        self
    }

    /// Returns `true` if writes through this span are permitted.
    #[must_use]
    pub const fn is_writable(&self) -> bool {
        self.writable
    }

    /// The number of elements in view.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the span views no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Stores `value` at `index`.
    ///
    /// # Panics
    ///
    /// Panics if the span is read-only or `index` is out of bounds.
    #[track_caller]
    pub fn set(&self, index: usize, value: T) {
        assert!(
            self.writable,
            "write at index {index} through a read-only element span"
        );
        self.cells[index].set(value);
    }

    /// Moves the element out of `index`, leaving `T::default()` behind as
    /// the moved-from witness.
    ///
    /// # Panics
    ///
    /// Panics if the span is read-only or `index` is out of bounds.
    #[track_caller]
    pub fn take(&self, index: usize) -> T
    where
        T: Default,
    {
        assert!(
            self.writable,
            "move-out at index {index} through a read-only element span"
        );
        self.cells[index].take()
    }

    /// Swaps the elements at `a` and `b`.
    ///
    /// # Panics
    ///
    /// Panics if the span is read-only or either index is out of bounds.
    #[track_caller]
    pub fn swap(&self, a: usize, b: usize) {
        assert!(
            self.writable,
            "swap of indices {a} and {b} through a read-only element span"
        );
        if a != b {
            self.cells[a].swap(&self.cells[b]);
        }
    }

    /// The address of the element at `index` (the base address for
    /// `index == len`). Elements are physically contiguous.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    #[must_use]
    #[track_caller]
    pub fn as_ptr_at(&self, index: usize) -> *const T {
        assert!(
            index <= self.cells.len(),
            "address of index {index} in a span of {} elements",
            self.cells.len()
        );
        // One-past-the-end is a valid address but not a valid element.
        self.cells.as_ptr().wrapping_add(index).cast()
    }
}

impl<T: Copy> ElemSpan<'_, T> {
    /// Reads the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[must_use]
    #[track_caller]
    pub fn get(&self, index: usize) -> T {
        self.cells[index].get()
    }

    /// Copies the elements in view into a fresh vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.cells.iter().map(Cell::get).collect()
    }
}

impl<T> Clone for ElemSpan<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ElemSpan<'_, T> {}

// No `T: Debug` bound: the elements are inside cells and may not be
// readable anyway. Identity, length, and writability are what matters
// when a fixture panics mid-test.
impl<T> fmt::Debug for ElemSpan<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElemSpan")
            .field("base", &self.cells.as_ptr())
            .field("len", &self.cells.len())
            .field("writable", &self.writable)
            .finish()
    }
}

impl<T> PartialEq for ElemSpan<'_, T> {
    /// Identity comparison: same storage, same extent.
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.cells, other.cells)
    }
}

impl<T> Eq for ElemSpan<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_and_writes_share_storage() {
        let mut data = [10, 20, 30];
        let span = ElemSpan::new(&mut data);
        let alias = span;

        span.set(1, 99);
        assert_eq!(alias.get(1), 99);
        assert_eq!(span.to_vec(), vec![10, 99, 30]);
    }

    #[test]
    fn test_take_leaves_default() {
        let mut data = [5, 6];
        let span = ElemSpan::new(&mut data);
        assert_eq!(span.take(0), 5);
        assert_eq!(span.get(0), 0);
        assert_eq!(span.get(1), 6);
    }

    #[test]
    fn test_swap() {
        let mut data = [1, 2, 3];
        let span = ElemSpan::new(&mut data);
        span.swap(0, 2);
        assert_eq!(span.to_vec(), vec![3, 2, 1]);
        span.swap(1, 1);
        assert_eq!(span.get(1), 2);
    }

    #[test]
    #[should_panic(expected = "read-only element span")]
    fn test_read_only_rejects_writes() {
        let mut data = [1];
        let span = ElemSpan::new(&mut data).into_read_only();
        span.set(0, 2);
    }

    #[test]
    fn test_pointer_arithmetic_is_contiguous() {
        let mut data = [1u8, 2, 3, 4];
        let span = ElemSpan::new(&mut data);
        let base = span.as_ptr_at(0);
        assert_eq!(span.as_ptr_at(3), base.wrapping_add(3));
        // One-past-the-end address exists.
        assert_eq!(span.as_ptr_at(4), base.wrapping_add(4));
    }

    #[test]
    fn test_identity_equality() {
        let mut data = [1, 2];
        let mut other = [1, 2];
        let a = ElemSpan::new(&mut data);
        let b = a;
        assert_eq!(a, b);
        let c = ElemSpan::new(&mut other);
        assert_ne!(a, c);
    }
}
