//! The configurable range fixture.
//!
//! [`TestRange`] wraps an [`ElemSpan`] with a [`RangeProfile`] and hands
//! out [`TestIterator`]s configured to match. The range itself enforces
//! the range-level contracts: single-pass ranges give out `begin` exactly
//! once, non-common ranges end in a [`TestSentinel`] rather than an
//! iterator, `size` and `data` exist only when the profile grants them,
//! and copy/move follow the profile's [`Copyability`] policy with
//! moved-from tracking.
//!
//! [`Copyability`]: crate::Copyability

use std::cell::Cell;
use std::fmt;

use crate::boolish::Boolish;
use crate::capability::{Category, WrapMode};
use crate::iterator::{TestIterator, Unwrapped};
use crate::profile::{RangeOps, RangeProfile};
use crate::sentinel::{TestSentinel, signed_delta};
use crate::span::ElemSpan;

/// The end of a [`TestRange`]: a sentinel for non-common profiles, an
/// iterator at the one-past-end position for common ones.
#[derive(Debug, derive_more::IsVariant)]
pub enum RangeEnd<'a, T> {
    /// A distinct-type end marker.
    Sentinel(TestSentinel),
    /// A one-past-end iterator (common ranges).
    Iterator(TestIterator<'a, T>),
}

impl<'a, T> RangeEnd<'a, T> {
    /// The one-past-end position, whichever form the end took.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::Sentinel(s) => s.position(),
            Self::Iterator(it) => it.position(),
        }
    }

    /// Equality against an iterator of the same range, dispatching to the
    /// sentinel or iterator comparison as appropriate.
    ///
    /// # Panics
    ///
    /// As [`TestIterator::cmp_eq_sentinel`] or [`TestIterator::cmp_eq`].
    #[must_use]
    #[track_caller]
    pub fn cmp_eq(&self, it: &TestIterator<'a, T>) -> Boolish {
        match self {
            Self::Sentinel(s) => it.cmp_eq_sentinel(s),
            Self::Iterator(end) => it.cmp_eq(end),
        }
    }

    /// A sentinel at the end position, whichever form the end took.
    #[must_use]
    pub fn as_sentinel(&self) -> TestSentinel {
        match self {
            Self::Sentinel(s) => *s,
            Self::Iterator(it) => TestSentinel::new(it.position(), it.profile().wrap()),
        }
    }

    /// The end iterator of a common range, by value.
    ///
    /// # Panics
    ///
    /// Panics for the sentinel form.
    #[must_use]
    #[track_caller]
    pub fn into_iterator(self) -> TestIterator<'a, T> {
        match self {
            Self::Iterator(it) => it,
            Self::Sentinel(s) => {
                panic!(
                    "end of a non-common range is a sentinel at position {}, not an iterator",
                    s.position()
                )
            }
        }
    }

    /// The sentinel end of a non-common range, by value.
    ///
    /// # Panics
    ///
    /// Panics for the iterator form.
    #[must_use]
    #[track_caller]
    pub fn into_sentinel(self) -> TestSentinel {
        match self {
            Self::Sentinel(s) => s,
            Self::Iterator(it) => {
                panic!(
                    "end of a common range is an iterator at position {}, not a sentinel",
                    it.position()
                )
            }
        }
    }
}

/// A range fixture with runtime-checked capabilities.
///
/// # Examples
///
/// ```
/// use rangeforge_core::{Category, ElemSpan, RangeProfile, TestRange};
///
/// let mut data = [4, 5, 6];
/// let range = TestRange::new(
///     ElemSpan::new(&mut data),
///     RangeProfile::new(Category::Forward),
/// );
///
/// let mut it = range.begin();
/// let end = range.end();
/// let mut sum = 0;
/// while !bool::from(end.cmp_eq(&it)) {
///     sum += it.proxy().read();
///     it.advance();
/// }
/// assert_eq!(sum, 15);
/// ```
pub struct TestRange<'a, T> {
    span: ElemSpan<'a, T>,
    profile: RangeProfile,
    begin_called: Cell<bool>,
    live: bool,
}

impl<'a, T> TestRange<'a, T> {
    /// Creates a range over `span` with the given profile.
    ///
    /// # Panics
    ///
    /// Panics if the profile is write-capable (an output category) over
    /// read-only storage.
    #[must_use]
    #[track_caller]
    pub fn new(span: ElemSpan<'a, T>, profile: RangeProfile) -> Self {
        if profile.category() == Category::Output {
            assert!(span.is_writable(), "output range over read-only storage");
        }
        Self {
            span,
            profile,
            begin_called: Cell::new(false),
            live: true,
        }
    }

    /// Creates a minimal borrowed range: single-pass input, non-common,
    /// unsized, immobile.
    #[must_use]
    pub fn basic(span: ElemSpan<'a, T>) -> Self {
        Self::new(span, RangeProfile::new(Category::Input))
    }

    /// The capability profile.
    #[must_use]
    pub const fn profile(&self) -> RangeProfile {
        self.profile
    }

    /// The storage this range covers.
    #[must_use]
    pub const fn span(&self) -> ElemSpan<'a, T> {
        self.span
    }

    /// Returns `false` once the range has been consumed by
    /// [`take`](Self::take).
    #[must_use]
    pub const fn is_live(&self) -> bool {
        self.live
    }

    #[track_caller]
    fn check_live(&self) {
        assert!(self.live, "use of a moved-from range");
    }

    /// An iterator at the first position.
    ///
    /// # Panics
    ///
    /// For single-pass profiles, panics on the second call: a consumed
    /// single-pass range cannot be restarted.
    #[must_use]
    #[track_caller]
    pub fn begin(&self) -> TestIterator<'a, T> {
        self.check_live();
        if self.profile.category().is_single_pass() {
            assert!(
                !self.begin_called.get(),
                "begin called twice on a single-pass {} range",
                self.profile.category()
            );
        }
        self.begin_called.set(true);
        TestIterator::new(self.span, 0, self.profile.iter_profile())
    }

    /// The end of the range: an iterator for common profiles, a sentinel
    /// otherwise.
    #[must_use]
    #[track_caller]
    pub fn end(&self) -> RangeEnd<'a, T> {
        self.check_live();
        if self.profile.common().is_yes() {
            RangeEnd::Iterator(TestIterator::new(
                self.span,
                self.span.len(),
                self.profile.iter_profile(),
            ))
        } else {
            RangeEnd::Sentinel(TestSentinel::new(self.span.len(), WrapMode::Wrapped))
        }
    }

    /// The sentinel end of a non-common range.
    ///
    /// # Panics
    ///
    /// Panics for common profiles, whose end is an iterator.
    #[must_use]
    #[track_caller]
    pub fn end_sentinel(&self) -> TestSentinel {
        self.check_live();
        assert!(
            self.profile.common().is_no(),
            "end of a common range is an iterator, not a sentinel"
        );
        TestSentinel::new(self.span.len(), WrapMode::Wrapped)
    }

    /// The one-past-end iterator of a common range.
    ///
    /// # Panics
    ///
    /// Panics for non-common profiles.
    #[must_use]
    #[track_caller]
    pub fn end_iter(&self) -> TestIterator<'a, T> {
        self.check_live();
        self.profile.require(RangeOps::COMMON_END, "end_iter");
        TestIterator::new(self.span, self.span.len(), self.profile.iter_profile())
    }

    /// The stripped twin of a fresh begin iterator.
    ///
    /// Counts as a `begin` call for the single-pass latch.
    #[must_use]
    #[track_caller]
    pub fn begin_unwrapped(&self) -> Unwrapped<'a, T> {
        self.begin().into_unwrapped()
    }

    /// The number of elements, as a signed count.
    ///
    /// # Panics
    ///
    /// Panics for unsized profiles, or if the count does not fit in
    /// `isize`. For single-pass profiles, also panics once `begin` has
    /// been called: the size must be queried before consumption starts.
    #[must_use]
    #[track_caller]
    pub fn size(&self) -> isize {
        self.check_live();
        self.profile.require(RangeOps::SIZE, "size");
        if self.profile.category().is_single_pass() {
            assert!(
                !self.begin_called.get(),
                "size of a single-pass {} range queried after iteration began",
                self.profile.category()
            );
        }
        signed_delta(0, self.span.len())
    }

    /// The base address of the contiguous element storage.
    ///
    /// # Panics
    ///
    /// Panics for profiles below contiguous.
    #[must_use]
    #[track_caller]
    pub fn data(&self) -> *const T {
        self.check_live();
        self.profile.require(RangeOps::DATA, "data");
        self.span.as_ptr_at(0)
    }

    /// Copies the range.
    ///
    /// The copy shares the underlying storage and inherits the begin-latch
    /// state.
    ///
    /// # Panics
    ///
    /// Panics unless the profile's copy policy is copyable.
    #[must_use]
    #[track_caller]
    pub fn fork(&self) -> Self {
        self.check_live();
        self.profile.require(RangeOps::FORK, "fork");
        Self {
            span: self.span,
            profile: self.profile,
            begin_called: self.begin_called.clone(),
            live: true,
        }
    }

    /// Consumes the range, returning it and invalidating `self`.
    ///
    /// # Panics
    ///
    /// Panics for immobile profiles.
    #[must_use]
    #[track_caller]
    pub fn take(&mut self) -> Self {
        self.check_live();
        self.profile.require(RangeOps::TAKE, "take");
        self.live = false;
        Self {
            span: self.span,
            profile: self.profile,
            begin_called: self.begin_called.clone(),
            live: true,
        }
    }
}

impl<T> Clone for TestRange<'_, T> {
    /// Delegates to [`fork`](Self::fork); panics unless the profile's copy
    /// policy is copyable.
    #[track_caller]
    fn clone(&self) -> Self {
        self.fork()
    }
}

impl<T> fmt::Debug for TestRange<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestRange")
            .field("profile", &self.profile)
            .field("begin_called", &self.begin_called.get())
            .field("live", &self.live)
            .field("span", &self.span)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::capability::{Copyability, Sizedness};

    use super::*;

    #[test]
    fn test_forward_range_walk() {
        let mut data = [1, 2, 3, 4];
        let range = TestRange::new(
            ElemSpan::new(&mut data),
            RangeProfile::new(Category::Forward),
        );

        let mut it = range.begin();
        let end = range.end();
        assert!(end.is_sentinel());

        let mut seen = Vec::new();
        while !bool::from(end.cmp_eq(&it)) {
            seen.push(it.proxy().read());
            it.advance();
        }
        assert_eq!(seen, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_common_range_end_is_an_iterator() {
        let mut data = [1, 2];
        let range = TestRange::new(
            ElemSpan::new(&mut data),
            RangeProfile::new(Category::Forward).with_common_end(),
        );

        let end = range.end();
        assert!(end.is_iterator());
        assert_eq!(end.position(), 2);

        let mut it = range.begin();
        it.advance();
        it.advance();
        assert!(bool::from(end.cmp_eq(&it)));

        let end_it = range.end_iter();
        assert!(bool::from(end_it.cmp_eq(&it)));
    }

    #[test]
    fn test_single_pass_begin_latch() {
        let mut data = [1];
        let range = TestRange::basic(ElemSpan::new(&mut data));
        let _first = range.begin();
        let second = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| range.begin()));
        assert!(second.is_err(), "second begin on a single-pass range must panic");
    }

    #[test]
    fn test_multi_pass_begin_is_repeatable() {
        let mut data = [1];
        let range = TestRange::new(
            ElemSpan::new(&mut data),
            RangeProfile::new(Category::Forward),
        );
        let a = range.begin();
        let b = range.begin();
        assert!(bool::from(a.cmp_eq(&b)));
    }

    #[test]
    fn test_size_and_data_gates() {
        let mut data = [1u8, 2, 3];
        let sized = TestRange::new(
            ElemSpan::new(&mut data),
            RangeProfile::new(Category::Contiguous).with_sizedness(Sizedness::Sized),
        );
        // The count is signed, matching iterator differences.
        let count: isize = sized.size();
        assert_eq!(count, 3);
        assert_eq!(sized.data(), sized.begin().as_ptr());
    }

    #[test]
    #[should_panic(expected = "`size` is not supported")]
    fn test_unsized_range_rejects_size() {
        let mut data = [1];
        let range = TestRange::new(
            ElemSpan::new(&mut data),
            RangeProfile::new(Category::Forward),
        );
        let _ = range.size();
    }

    #[test]
    #[should_panic(expected = "`data` is not supported")]
    fn test_non_contiguous_range_rejects_data() {
        let mut data = [1];
        let range = TestRange::new(
            ElemSpan::new(&mut data),
            RangeProfile::new(Category::RandomAccess).with_sizedness(Sizedness::Sized),
        );
        let _ = range.data();
    }

    #[test]
    #[should_panic(expected = "end of a common range is an iterator")]
    fn test_common_range_rejects_end_sentinel() {
        let mut data = [1];
        let range = TestRange::new(
            ElemSpan::new(&mut data),
            RangeProfile::new(Category::Forward).with_common_end(),
        );
        let _ = range.end_sentinel();
    }

    #[test]
    fn test_copy_policy() {
        let mut data = [1, 2];
        let range = TestRange::new(
            ElemSpan::new(&mut data),
            RangeProfile::new(Category::Forward).with_copyability(Copyability::Copyable),
        );
        let copy = range.fork();
        assert!(range.is_live());
        assert!(bool::from(copy.begin().cmp_eq(&range.begin())));
    }

    #[test]
    #[should_panic(expected = "`fork` is not supported")]
    fn test_move_only_range_rejects_fork() {
        let mut data = [1];
        let range = TestRange::new(
            ElemSpan::new(&mut data),
            RangeProfile::new(Category::Forward).with_copyability(Copyability::MoveOnly),
        );
        let _ = range.fork();
    }

    #[test]
    fn test_take_invalidates_the_source() {
        let mut data = [1];
        let mut range = TestRange::new(
            ElemSpan::new(&mut data),
            RangeProfile::new(Category::Forward).with_copyability(Copyability::MoveOnly),
        );
        let taken = range.take();
        assert!(!range.is_live());
        assert!(taken.is_live());
        let _ = taken.begin();
    }

    #[test]
    #[should_panic(expected = "use of a moved-from range")]
    fn test_moved_from_range_panics() {
        let mut data = [1];
        let mut range = TestRange::new(
            ElemSpan::new(&mut data),
            RangeProfile::new(Category::Forward).with_copyability(Copyability::MoveOnly),
        );
        let _live = range.take();
        let _ = range.begin();
    }

    #[test]
    #[should_panic(expected = "`take` is not supported")]
    fn test_immobile_range_rejects_take() {
        let mut data = [1];
        let mut range = TestRange::new(
            ElemSpan::new(&mut data),
            RangeProfile::new(Category::Forward),
        );
        let _ = range.take();
    }

    #[test]
    fn test_begin_unwrapped_counts_as_begin() {
        let mut data = [1];
        let range = TestRange::basic(ElemSpan::new(&mut data));
        let twin = range.begin_unwrapped();
        assert_eq!(twin.position(), 0);
        let second = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| range.begin()));
        assert!(second.is_err());
    }

    #[test]
    fn test_sized_forward_walk_to_sentinel() {
        let mut data = [1, 2, 3, 4, 5];
        let range = TestRange::new(
            ElemSpan::new(&mut data),
            RangeProfile::new(Category::Forward)
                .with_sizedness(Sizedness::Sized)
                .with_ref_mode(crate::RefMode::Native),
        );
        assert_eq!(range.size(), 5);

        let mut it = range.begin();
        let end = range.end_sentinel();
        for _ in 0..4 {
            assert!(!bool::from(it.cmp_eq_sentinel(&end)));
            it.advance();
        }
        assert!(!bool::from(it.cmp_eq_sentinel(&end)));
        it.advance();
        assert!(bool::from(it.cmp_eq_sentinel(&end)));
    }

    #[test]
    fn test_contiguous_common_size_from_iterators() {
        let mut data = [10, 20, 30];
        let range = TestRange::new(
            ElemSpan::new(&mut data),
            RangeProfile::new(Category::Contiguous)
                .with_sizedness(Sizedness::Sized)
                .with_common_end(),
        );
        assert_eq!(range.data(), range.begin().as_ptr());
        assert_eq!(range.begin().distance_to(&range.end_iter()), 3);
    }

    #[test]
    fn test_single_pass_move_semantics() {
        let mut data = [1, 2];
        let mut range = TestRange::new(
            ElemSpan::new(&mut data),
            RangeProfile::new(Category::Input)
                .with_sizedness(Sizedness::Sized)
                .with_copyability(Copyability::MoveOnly),
        );
        let moved = range.take();

        // The destination behaves as the original would have.
        assert_eq!(moved.size(), 2);
        let _it = moved.begin();

        // The moved-from instance asserts on everything.
        let begin = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| range.begin()));
        assert!(begin.is_err());
        let size = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| range.size()));
        assert!(size.is_err());
    }

    #[test]
    #[should_panic(expected = "queried after iteration began")]
    fn test_single_pass_size_after_begin_panics() {
        let mut data = [1];
        let range = TestRange::new(
            ElemSpan::new(&mut data),
            RangeProfile::new(Category::Input).with_sizedness(Sizedness::Sized),
        );
        let _it = range.begin();
        let _ = range.size();
    }

    #[test]
    fn test_end_as_sentinel_for_both_forms() {
        let mut data = [1, 2];
        let span = ElemSpan::new(&mut data);
        let plain = TestRange::new(span, RangeProfile::new(Category::Forward));
        assert_eq!(plain.end().as_sentinel().position(), 2);

        let common = TestRange::new(
            span,
            RangeProfile::new(Category::Forward).with_common_end(),
        );
        assert_eq!(common.end().as_sentinel().position(), 2);
    }
}
