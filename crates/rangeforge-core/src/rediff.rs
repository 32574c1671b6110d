//! Difference-type rebinding.
//!
//! Algorithms that mix iterators with unusually narrow or wide difference
//! types (an `i8`-distance iterator over a large buffer, an `i128` one over
//! a tiny buffer) exercise arithmetic conversion paths that uniform-width
//! fixtures never reach. [`RediffIterator`] and [`RediffSentinel`] wrap a
//! fixture and re-expose every distance-carrying operation in a chosen
//! [`Distance`] width, converting at the boundary and panicking when a
//! real distance does not fit.

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

use crate::boolish::Boolish;
use crate::iterator::TestIterator;
use crate::proxy::ProxyRef;
use crate::range::TestRange;
use crate::sentinel::TestSentinel;

/// A signed integer width usable as an iterator difference type.
pub trait Distance: Copy + fmt::Debug {
    /// The printable name of the width, for panic messages.
    const NAME: &'static str;

    /// Converts a native distance into this width.
    ///
    /// # Panics
    ///
    /// Panics if the value does not fit.
    #[must_use]
    fn from_native(distance: isize) -> Self;

    /// Converts this width back into a native distance.
    ///
    /// # Panics
    ///
    /// Panics if the value does not fit.
    #[must_use]
    fn to_native(self) -> isize;
}

macro_rules! impl_distance {
    ($($ty:ty),* $(,)?) => {$(
        impl Distance for $ty {
            const NAME: &'static str = stringify!($ty);

            #[track_caller]
            fn from_native(distance: isize) -> Self {
                match Self::try_from(distance) {
                    Ok(d) => d,
                    Err(_) => panic!(
                        "distance {distance} does not fit in {}",
                        Self::NAME
                    ),
                }
            }

            #[track_caller]
            fn to_native(self) -> isize {
                match isize::try_from(self) {
                    Ok(d) => d,
                    Err(_) => panic!(
                        "{} distance {self} does not fit in the native width",
                        Self::NAME
                    ),
                }
            }
        }
    )*};
}

impl_distance!(i8, i16, i32, i64, i128, isize);

/// An iterator wrapper that rebinds the difference type to `D`.
///
/// Every operation forwards to the wrapped [`TestIterator`], so the
/// capability gates and liveness checks still apply; only the width of
/// distances and offsets changes.
pub struct RediffIterator<'a, T, D> {
    inner: TestIterator<'a, T>,
    _distance: PhantomData<D>,
}

impl<'a, T, D: Distance> RediffIterator<'a, T, D> {
    /// Wraps an iterator.
    #[must_use]
    pub const fn new(inner: TestIterator<'a, T>) -> Self {
        Self {
            inner,
            _distance: PhantomData,
        }
    }

    /// The wrapped iterator, borrowed.
    #[must_use]
    pub const fn inner(&self) -> &TestIterator<'a, T> {
        &self.inner
    }

    /// The wrapped iterator, by value.
    #[must_use]
    pub fn into_inner(self) -> TestIterator<'a, T> {
        self.inner
    }

    /// The current position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.inner.position()
    }

    /// Advances one position. See [`TestIterator::advance`].
    #[track_caller]
    pub fn advance(&mut self) {
        self.inner.advance();
    }

    /// Post-increment. See [`TestIterator::advance_copy`].
    #[must_use]
    #[track_caller]
    pub fn advance_copy(&mut self) -> Self {
        Self::new(self.inner.advance_copy())
    }

    /// Retreats one position. See [`TestIterator::retreat`].
    #[track_caller]
    pub fn retreat(&mut self) {
        self.inner.retreat();
    }

    /// Post-decrement. See [`TestIterator::retreat_copy`].
    #[must_use]
    #[track_caller]
    pub fn retreat_copy(&mut self) -> Self {
        Self::new(self.inner.retreat_copy())
    }

    /// Seeks by an offset of the rebound width.
    ///
    /// # Panics
    ///
    /// As [`TestIterator::seek`], plus if `offset` does not fit in the
    /// native width.
    #[track_caller]
    pub fn seek(&mut self, offset: D) {
        self.inner.seek(offset.to_native());
    }

    /// Returns a copy seeked by an offset of the rebound width.
    ///
    /// # Panics
    ///
    /// As [`TestIterator::offset`], plus if `offset` does not fit in the
    /// native width.
    #[must_use]
    #[track_caller]
    pub fn offset(&self, offset: D) -> Self {
        Self::new(self.inner.offset(offset.to_native()))
    }

    /// Dereference as a proxy. See [`TestIterator::proxy`].
    #[must_use]
    #[track_caller]
    pub fn proxy(&self) -> ProxyRef<'a, T> {
        self.inner.proxy()
    }

    /// Proxy dereference at an offset of the rebound width. See
    /// [`TestIterator::proxy_at`].
    #[must_use]
    #[track_caller]
    pub fn proxy_at(&self, offset: D) -> ProxyRef<'a, T> {
        self.inner.proxy_at(offset.to_native())
    }

    /// Writes at the current position. See [`TestIterator::write`].
    #[track_caller]
    pub fn write(&self, value: T) {
        self.inner.write(value);
    }

    /// The address of the current element. See [`TestIterator::as_ptr`].
    #[must_use]
    #[track_caller]
    pub fn as_ptr(&self) -> *const T {
        self.inner.as_ptr()
    }

    /// Equality against another rebound iterator. See
    /// [`TestIterator::cmp_eq`].
    #[must_use]
    #[track_caller]
    pub fn cmp_eq(&self, other: &Self) -> Boolish {
        self.inner.cmp_eq(&other.inner)
    }

    /// Inequality against another rebound iterator. See
    /// [`TestIterator::cmp_ne`].
    #[must_use]
    #[track_caller]
    pub fn cmp_ne(&self, other: &Self) -> Boolish {
        self.inner.cmp_ne(&other.inner)
    }

    /// Three-way position comparison. See [`TestIterator::order`].
    #[must_use]
    #[track_caller]
    pub fn order(&self, other: &Self) -> Ordering {
        self.inner.order(&other.inner)
    }

    /// Less-than by position. See [`TestIterator::cmp_lt`].
    #[must_use]
    #[track_caller]
    pub fn cmp_lt(&self, other: &Self) -> Boolish {
        self.inner.cmp_lt(&other.inner)
    }

    /// Less-or-equal by position. See [`TestIterator::cmp_le`].
    #[must_use]
    #[track_caller]
    pub fn cmp_le(&self, other: &Self) -> Boolish {
        self.inner.cmp_le(&other.inner)
    }

    /// Greater-than by position. See [`TestIterator::cmp_gt`].
    #[must_use]
    #[track_caller]
    pub fn cmp_gt(&self, other: &Self) -> Boolish {
        self.inner.cmp_gt(&other.inner)
    }

    /// Greater-or-equal by position. See [`TestIterator::cmp_ge`].
    #[must_use]
    #[track_caller]
    pub fn cmp_ge(&self, other: &Self) -> Boolish {
        self.inner.cmp_ge(&other.inner)
    }

    /// Equality against a rebound sentinel. See
    /// [`TestIterator::cmp_eq_sentinel`].
    #[must_use]
    #[track_caller]
    pub fn cmp_eq_sentinel(&self, sentinel: &RediffSentinel<D>) -> Boolish {
        self.inner.cmp_eq_sentinel(&sentinel.inner)
    }

    /// Distance to another rebound iterator, in the rebound width.
    ///
    /// # Panics
    ///
    /// As [`TestIterator::distance_to`], plus if the distance does not fit
    /// in `D`.
    #[must_use]
    #[track_caller]
    pub fn distance_to(&self, other: &Self) -> D {
        D::from_native(self.inner.distance_to(&other.inner))
    }

    /// Distance to a rebound sentinel, in the rebound width.
    ///
    /// # Panics
    ///
    /// As [`TestIterator::distance_to_sentinel`], plus if the distance
    /// does not fit in `D`.
    #[must_use]
    #[track_caller]
    pub fn distance_to_sentinel(&self, sentinel: &RediffSentinel<D>) -> D {
        D::from_native(self.inner.distance_to_sentinel(&sentinel.inner))
    }
}

impl<'a, T: Copy, D: Distance> RediffIterator<'a, T, D> {
    /// Reads the current element. See [`TestIterator::read`].
    #[must_use]
    #[track_caller]
    pub fn read(&self) -> T {
        self.inner.read()
    }

    /// Reads at an offset of the rebound width. See
    /// [`TestIterator::read_at`].
    #[must_use]
    #[track_caller]
    pub fn read_at(&self, offset: D) -> T {
        self.inner.read_at(offset.to_native())
    }
}

impl<T: Default, D: Distance> RediffIterator<'_, T, D> {
    /// Moves the current element out. See [`TestIterator::iter_move`].
    #[must_use]
    #[track_caller]
    pub fn iter_move(&self) -> T {
        self.inner.iter_move()
    }

    /// Swaps current elements with another rebound iterator, of any
    /// width. See [`TestIterator::iter_swap`].
    #[track_caller]
    pub fn iter_swap<D2: Distance>(&self, other: &RediffIterator<'_, T, D2>) {
        self.inner.iter_swap(&other.inner);
    }
}

impl<T, D: Distance> Clone for RediffIterator<'_, T, D> {
    /// Panics for single-pass profiles, as [`TestIterator::clone`].
    #[track_caller]
    fn clone(&self) -> Self {
        Self::new(self.inner.fork())
    }
}

impl<T, D> fmt::Debug for RediffIterator<'_, T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RediffIterator").field(&self.inner).finish()
    }
}

/// A sentinel wrapper that rebinds the difference type to `D`.
pub struct RediffSentinel<D> {
    inner: TestSentinel,
    _distance: PhantomData<D>,
}

impl<D: Distance> RediffSentinel<D> {
    /// Wraps a sentinel.
    #[must_use]
    pub const fn new(inner: TestSentinel) -> Self {
        Self {
            inner,
            _distance: PhantomData,
        }
    }

    /// The wrapped sentinel.
    #[must_use]
    pub const fn inner(&self) -> TestSentinel {
        self.inner
    }

    /// The one-past-end position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.inner.position()
    }

    /// Distance from a raw position, in the rebound width.
    ///
    /// # Panics
    ///
    /// Panics if the distance does not fit in `D`.
    #[must_use]
    #[track_caller]
    pub fn distance_from_pos(&self, position: usize) -> D {
        D::from_native(self.inner.distance_from_pos(position))
    }
}

impl<D> Clone for RediffSentinel<D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D> Copy for RediffSentinel<D> {}

impl<D> fmt::Debug for RediffSentinel<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RediffSentinel").field(&self.inner).finish()
    }
}

/// A begin/end/size bundle over rebound-width iterators.
///
/// Produced by [`rediff_subrange`]; the size is carried in the rebound
/// width when the source range can provide one.
#[derive(Debug)]
pub struct RediffSubrange<'a, T, D> {
    begin: RediffIterator<'a, T, D>,
    end: RediffSentinel<D>,
    size: Option<D>,
}

impl<'a, T, D: Distance> RediffSubrange<'a, T, D> {
    /// The begin iterator, consuming the bundle.
    #[must_use]
    pub fn into_begin(self) -> RediffIterator<'a, T, D> {
        self.begin
    }

    /// The begin iterator, borrowed.
    #[must_use]
    pub const fn begin(&self) -> &RediffIterator<'a, T, D> {
        &self.begin
    }

    /// The end sentinel.
    #[must_use]
    pub const fn end(&self) -> RediffSentinel<D> {
        self.end
    }

    /// The size in the rebound width, when the source range provides one.
    #[must_use]
    pub const fn size(&self) -> Option<D> {
        self.size
    }
}

/// Rebinds a range's iterators and sentinel to the difference width `D`.
///
/// The size is carried when the range is sized, or when its iterators
/// support differences (so the size is recoverable by subtracting the
/// begin iterator from the end). Counts as a `begin` call on single-pass
/// ranges.
///
/// # Panics
///
/// Panics if the element count does not fit in `D`.
#[must_use]
#[track_caller]
pub fn rediff_subrange<'a, T, D: Distance>(range: &TestRange<'a, T>) -> RediffSubrange<'a, T, D> {
    let profile = range.profile();
    let sizable = profile.sizedness().is_sized() || profile.difference().is_yes();
    let size = if sizable {
        Some(D::from_native(crate::sentinel::signed_delta(
            0,
            range.span().len(),
        )))
    } else {
        None
    };
    RediffSubrange {
        begin: RediffIterator::new(range.begin()),
        end: RediffSentinel::new(range.end().as_sentinel()),
        size,
    }
}

#[cfg(test)]
mod tests {
    use crate::capability::{CanDifference, Category, Sizedness};
    use crate::profile::{IterProfile, RangeProfile};
    use crate::span::ElemSpan;

    use super::*;

    #[test]
    fn test_narrow_width_round_trip() {
        let mut data = [1, 2, 3, 4];
        let profile = RangeProfile::new(Category::RandomAccess);
        let range = TestRange::new(ElemSpan::new(&mut data), profile);
        let sub = rediff_subrange::<_, i8>(&range);
        let end = sub.end();

        let mut it = sub.into_begin();
        it.seek(3i8);
        assert_eq!(it.proxy().read(), 4);
        assert_eq!(it.distance_to_sentinel(&end), 1i8);
        it.retreat();
        assert_eq!(it.read_at(1i8), 4);
    }

    #[test]
    fn test_wide_width() {
        let mut data = [1, 2];
        let range = TestRange::new(
            ElemSpan::new(&mut data),
            RangeProfile::new(Category::RandomAccess),
        );
        let sub = rediff_subrange::<_, i128>(&range);
        let it = sub.begin();
        assert_eq!(it.distance_to_sentinel(&sub.end()), 2i128);
    }

    #[test]
    fn test_size_follows_the_source() {
        let mut data = [1, 2, 3];
        let span = ElemSpan::new(&mut data);

        let unsized_range = TestRange::new(span, RangeProfile::new(Category::Forward));
        assert_eq!(rediff_subrange::<_, i16>(&unsized_range).size(), None);

        let sized_range = TestRange::new(
            span,
            RangeProfile::new(Category::Forward).with_sizedness(Sizedness::Sized),
        );
        assert_eq!(rediff_subrange::<_, i16>(&sized_range).size(), Some(3));

        let common_random = TestRange::new(span, RangeProfile::new(Category::RandomAccess).with_common_end());
        assert_eq!(rediff_subrange::<_, i16>(&common_random).size(), Some(3));
    }

    #[test]
    fn test_full_random_access_surface_forwards() {
        let mut data = [5, 6, 7, 8];
        let range = TestRange::new(
            ElemSpan::new(&mut data),
            RangeProfile::new(Category::RandomAccess),
        );
        let mut it = RediffIterator::<_, i16>::new(range.begin());
        let ahead = it.offset(2i16);

        assert!(bool::from(it.cmp_lt(&ahead)));
        assert!(bool::from(it.cmp_le(&ahead)));
        assert!(bool::from(ahead.cmp_gt(&it)));
        assert!(bool::from(ahead.cmp_ge(&it)));
        assert!(bool::from(it.cmp_ne(&ahead)));
        assert_eq!(it.order(&ahead), std::cmp::Ordering::Less);

        assert_eq!(it.proxy_at(2i16).read(), 7);
        it.iter_swap(&ahead);
        assert_eq!(it.proxy().read(), 7);
        assert_eq!(it.iter_move(), 7);

        it.write(9);
        it.seek(1i16);
        let before = it.retreat_copy();
        assert_eq!(before.position(), 1);
        assert_eq!(it.proxy().read(), 9);
    }

    #[test]
    fn test_contiguous_pointer_forwarding() {
        let mut data = [1u8, 2, 3];
        let range = TestRange::new(
            ElemSpan::new(&mut data),
            RangeProfile::new(Category::Contiguous),
        );
        let it = RediffIterator::<_, i8>::new(range.begin());
        assert_eq!(it.offset(2i8).as_ptr(), it.as_ptr().wrapping_add(2));
    }

    #[test]
    fn test_unsized_range_with_differences_is_still_sizable() {
        // end - begin recovers the size even without a size() member.
        let mut data = [1, 2, 3];
        let range = TestRange::new(
            ElemSpan::new(&mut data),
            RangeProfile::new(Category::Input).with_difference(CanDifference::Yes),
        );
        assert_eq!(rediff_subrange::<_, i16>(&range).size(), Some(3));
    }

    #[test]
    #[should_panic(expected = "does not fit in i8")]
    fn test_overflowing_distance_panics() {
        let mut data = vec![0u8; 200];
        let range = TestRange::new(
            ElemSpan::new(&mut data),
            RangeProfile::new(Category::RandomAccess).with_sizedness(Sizedness::Sized),
        );
        let _ = rediff_subrange::<_, i8>(&range);
    }

    #[test]
    fn test_capability_gates_still_apply() {
        let mut data = [1, 2];
        let it = crate::TestIterator::new(
            ElemSpan::new(&mut data),
            0,
            IterProfile::new(Category::Forward),
        );
        let mut rebound = RediffIterator::<_, i32>::new(it);
        let seek = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            rebound.seek(1i32);
        }));
        assert!(seek.is_err(), "forward iterators must still reject seeks");
    }
}
