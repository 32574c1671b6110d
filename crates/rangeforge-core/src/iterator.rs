//! The configurable iterator fixture.
//!
//! [`TestIterator`] is a position over an [`ElemSpan`] plus an
//! [`IterProfile`]; every operation first consults the profile and panics,
//! naming the operation and the profile, when the profile does not grant
//! it. The panic carries the caller's location, so an algorithm that
//! over-reaches (say, seeking on a forward iterator) fails exactly at the
//! offending call.
//!
//! Single-pass profiles (non-comparable) make the iterator move-only:
//! cloning panics and consumption goes through [`take`](TestIterator::take),
//! which invalidates the source. Every operation on an invalidated
//! iterator panics.

use std::cmp::Ordering;
use std::fmt;

use crate::boolish::Boolish;
use crate::capability::{Category, WrapMode};
use crate::profile::{IterOps, IterProfile};
use crate::proxy::ProxyRef;
use crate::sentinel::{TestSentinel, signed_delta};
use crate::span::ElemSpan;

/// An iterator fixture with runtime-checked capabilities.
///
/// # Examples
///
/// ```
/// use rangeforge_core::{Category, ElemSpan, IterProfile, TestIterator};
///
/// let mut data = [3, 1, 2];
/// let span = ElemSpan::new(&mut data);
/// let mut it = TestIterator::new(span, 0, IterProfile::new(Category::Forward));
///
/// assert_eq!(it.read(), 3);
/// it.advance();
/// assert_eq!(it.read(), 1);
///
/// let before = it.advance_copy();
/// assert_eq!(before.read(), 1);
/// assert_eq!(it.read(), 2);
/// ```
pub struct TestIterator<'a, T> {
    span: ElemSpan<'a, T>,
    position: usize,
    profile: IterProfile,
    live: bool,
}

impl<'a, T> TestIterator<'a, T> {
    /// Creates an iterator at `position` over `span`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is past one-past-the-end, or if the profile is
    /// write-capable (an output category) over read-only storage.
    #[must_use]
    #[track_caller]
    pub fn new(span: ElemSpan<'a, T>, position: usize, profile: IterProfile) -> Self {
        assert!(
            position <= span.len(),
            "iterator position {position} is past the end of {} elements",
            span.len()
        );
        if profile.category() == Category::Output {
            assert!(
                span.is_writable(),
                "output iterator over read-only storage"
            );
        }
        Self {
            span,
            position,
            profile,
            live: true,
        }
    }

    /// The capability profile.
    #[must_use]
    pub const fn profile(&self) -> IterProfile {
        self.profile
    }

    /// The current position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Returns `false` once the iterator has been consumed by
    /// [`take`](Self::take).
    #[must_use]
    pub const fn is_live(&self) -> bool {
        self.live
    }

    /// The storage this iterator walks.
    #[must_use]
    pub const fn span(&self) -> ElemSpan<'a, T> {
        self.span
    }

    #[track_caller]
    fn check_live(&self) {
        assert!(self.live, "use of a moved-from iterator");
    }

    #[track_caller]
    fn check_deref(&self, op: &str) {
        assert!(
            self.position < self.span.len(),
            "{op} at the end position of {} elements",
            self.span.len()
        );
    }

    #[track_caller]
    fn check_same_range(&self, other: &Self, op: &str) {
        assert!(
            self.span == other.span,
            "{op} between iterators of different ranges"
        );
    }

    #[track_caller]
    fn check_wrap_against(&self, other: WrapMode, op: &str) {
        assert!(
            self.profile.wrap().is_compatible_with(other),
            "{op} between incompatible wrap modes {} and {}",
            self.profile.wrap(),
            other
        );
    }

    /// A plain field copy, for operations whose grant already implies
    /// copyability.
    const fn duplicate(&self) -> Self {
        Self {
            span: self.span,
            position: self.position,
            profile: self.profile,
            live: true,
        }
    }

    /// Consumes the iterator, returning it and invalidating `self`.
    ///
    /// This models move semantics for single-pass profiles: the returned
    /// iterator is the live one, and any further use of `self` panics.
    #[must_use]
    #[track_caller]
    pub fn take(&mut self) -> Self {
        self.check_live();
        self.live = false;
        Self {
            span: self.span,
            position: self.position,
            profile: self.profile,
            live: true,
        }
    }

    /// Clones the iterator.
    ///
    /// # Panics
    ///
    /// Panics for single-pass (non-comparable) profiles, which are
    /// move-only.
    #[must_use]
    #[track_caller]
    pub fn fork(&self) -> Self {
        self.check_live();
        self.profile.require(IterOps::FORK, "fork");
        self.duplicate()
    }

    /// Downgrades the underlying storage to read-only.
    #[must_use]
    pub const fn into_read_only(mut self) -> Self {
        self.span = self.span.into_read_only();
        self
    }

    /// Advances one position.
    ///
    /// # Panics
    ///
    /// Panics at the end position.
    #[track_caller]
    pub fn advance(&mut self) {
        self.check_live();
        self.profile.require(IterOps::ADVANCE, "advance");
        self.check_deref("advance");
        self.position += 1;
    }

    /// Post-increment: advances and returns a copy at the prior position.
    ///
    /// # Panics
    ///
    /// Panics for profiles below forward (a true prior-position copy of a
    /// single-pass iterator would be a lie) or at the end position.
    #[must_use]
    #[track_caller]
    pub fn advance_copy(&mut self) -> Self {
        self.check_live();
        self.profile.require(IterOps::ADVANCE_COPY, "advance_copy");
        self.check_deref("advance");
        let before = self.duplicate();
        self.position += 1;
        before
    }

    /// Post-increment for bare output profiles: advances and returns a
    /// write-through proxy for the prior position.
    ///
    /// # Panics
    ///
    /// Panics unless the category is exactly output, or at the end
    /// position.
    #[must_use]
    #[track_caller]
    pub fn advance_write(&mut self) -> ProxyRef<'a, T> {
        self.check_live();
        self.profile.require(IterOps::ADVANCE_WRITE, "advance_write");
        self.check_deref("advance");
        let proxy = ProxyRef::new(self.span, self.position, self.profile.category());
        self.position += 1;
        proxy
    }

    /// Retreats one position.
    ///
    /// # Panics
    ///
    /// Panics for profiles below bidirectional or at the begin position.
    #[track_caller]
    pub fn retreat(&mut self) {
        self.check_live();
        self.profile.require(IterOps::RETREAT, "retreat");
        assert!(self.position > 0, "retreat before the begin position");
        self.position -= 1;
    }

    /// Post-decrement: retreats and returns a copy at the prior position.
    ///
    /// # Panics
    ///
    /// Panics for profiles below bidirectional or at the begin position.
    #[must_use]
    #[track_caller]
    pub fn retreat_copy(&mut self) -> Self {
        self.check_live();
        self.profile.require(IterOps::RETREAT, "retreat_copy");
        assert!(self.position > 0, "retreat before the begin position");
        let before = self.duplicate();
        self.position -= 1;
        before
    }

    /// Seeks by a signed offset.
    ///
    /// # Panics
    ///
    /// Panics for profiles below random-access, or if the target position
    /// leaves `0..=len`.
    #[track_caller]
    pub fn seek(&mut self, offset: isize) {
        self.check_live();
        self.profile.require(IterOps::SEEK, "seek");
        self.position = self.offset_position(offset, "seek");
    }

    /// Returns a copy seeked by a signed offset.
    ///
    /// # Panics
    ///
    /// Panics for profiles below random-access, or if the target position
    /// leaves `0..=len`.
    #[must_use]
    #[track_caller]
    pub fn offset(&self, offset: isize) -> Self {
        self.check_live();
        self.profile.require(IterOps::SEEK, "offset");
        let mut copy = self.duplicate();
        copy.position = self.offset_position(offset, "offset");
        copy
    }

    #[track_caller]
    fn offset_position(&self, offset: isize, op: &str) -> usize {
        let target = self
            .position
            .checked_add_signed(offset)
            .filter(|&p| p <= self.span.len());
        match target {
            Some(p) => p,
            None => panic!(
                "{op} by {offset} from position {} leaves the range of {} elements",
                self.position,
                self.span.len()
            ),
        }
    }

    /// Dereference as a write-through proxy.
    ///
    /// # Panics
    ///
    /// Panics unless the reference mode is proxy, or at the end position.
    #[must_use]
    #[track_caller]
    pub fn proxy(&self) -> ProxyRef<'a, T> {
        self.check_live();
        assert!(
            self.profile.ref_mode().is_proxy(),
            "proxy dereference of a {} reference-mode iterator",
            self.profile.ref_mode()
        );
        self.check_deref("dereference");
        ProxyRef::new(self.span, self.position, self.profile.category())
    }

    /// Proxy dereference at a signed offset.
    ///
    /// # Panics
    ///
    /// Panics for profiles below random-access, for non-proxy reference
    /// modes, or if the target is not a valid element position.
    #[must_use]
    #[track_caller]
    pub fn proxy_at(&self, offset: isize) -> ProxyRef<'a, T> {
        self.check_live();
        self.profile.require(IterOps::INDEX, "proxy_at");
        assert!(
            self.profile.ref_mode().is_proxy(),
            "proxy dereference of a {} reference-mode iterator",
            self.profile.ref_mode()
        );
        let target = self.offset_position(offset, "proxy_at");
        assert!(
            target < self.span.len(),
            "proxy_at target {target} is the end position"
        );
        ProxyRef::new(self.span, target, self.profile.category())
    }

    /// Writes through the iterator at the current position.
    ///
    /// # Panics
    ///
    /// Panics at the end position or through read-only storage.
    #[track_caller]
    pub fn write(&self, value: T) {
        self.check_live();
        self.check_deref("write");
        self.span.set(self.position, value);
    }

    /// Equality against another iterator of the same range.
    ///
    /// # Panics
    ///
    /// Panics for non-comparable profiles, across different ranges, or
    /// between incompatible wrap modes.
    #[must_use]
    #[track_caller]
    pub fn cmp_eq(&self, other: &Self) -> Boolish {
        self.check_live();
        other.check_live();
        self.profile.require(IterOps::EQ_SELF, "cmp_eq");
        self.check_same_range(other, "equality comparison");
        self.check_wrap_against(other.profile.wrap(), "equality comparison");
        Boolish::new(self.position == other.position)
    }

    /// Inequality against another iterator of the same range.
    ///
    /// # Panics
    ///
    /// As [`cmp_eq`](Self::cmp_eq).
    #[must_use]
    #[track_caller]
    pub fn cmp_ne(&self, other: &Self) -> Boolish {
        !self.cmp_eq(other)
    }

    /// Three-way position comparison.
    ///
    /// # Panics
    ///
    /// Panics for profiles below random-access, across different ranges,
    /// or between incompatible wrap modes.
    #[must_use]
    #[track_caller]
    pub fn order(&self, other: &Self) -> Ordering {
        self.check_live();
        other.check_live();
        self.profile.require(IterOps::ORDER, "order");
        self.check_same_range(other, "ordering comparison");
        self.check_wrap_against(other.profile.wrap(), "ordering comparison");
        self.position.cmp(&other.position)
    }

    /// Less-than by position.
    ///
    /// # Panics
    ///
    /// As [`order`](Self::order).
    #[must_use]
    #[track_caller]
    pub fn cmp_lt(&self, other: &Self) -> Boolish {
        Boolish::new(self.order(other) == Ordering::Less)
    }

    /// Less-or-equal by position.
    ///
    /// # Panics
    ///
    /// As [`order`](Self::order).
    #[must_use]
    #[track_caller]
    pub fn cmp_le(&self, other: &Self) -> Boolish {
        Boolish::new(self.order(other) != Ordering::Greater)
    }

    /// Greater-than by position.
    ///
    /// # Panics
    ///
    /// As [`order`](Self::order).
    #[must_use]
    #[track_caller]
    pub fn cmp_gt(&self, other: &Self) -> Boolish {
        Boolish::new(self.order(other) == Ordering::Greater)
    }

    /// Greater-or-equal by position.
    ///
    /// # Panics
    ///
    /// As [`order`](Self::order).
    #[must_use]
    #[track_caller]
    pub fn cmp_ge(&self, other: &Self) -> Boolish {
        Boolish::new(self.order(other) != Ordering::Less)
    }

    /// Equality against a sentinel.
    ///
    /// # Panics
    ///
    /// Panics between incompatible wrap modes.
    #[must_use]
    #[track_caller]
    pub fn cmp_eq_sentinel(&self, sentinel: &TestSentinel) -> Boolish {
        self.check_live();
        self.profile.require(IterOps::EQ_SENTINEL, "cmp_eq_sentinel");
        self.check_wrap_against(sentinel.wrap(), "sentinel comparison");
        sentinel.cmp_eq_pos(self.position)
    }

    /// Signed distance to another iterator of the same range.
    ///
    /// # Panics
    ///
    /// Panics unless the profile grants iterator-iterator distances, or
    /// across different ranges, or between incompatible wrap modes.
    #[must_use]
    #[track_caller]
    pub fn distance_to(&self, other: &Self) -> isize {
        self.check_live();
        other.check_live();
        self.profile.require(IterOps::DIFF_SELF, "distance_to");
        self.check_same_range(other, "distance");
        self.check_wrap_against(other.profile.wrap(), "distance");
        signed_delta(self.position, other.position)
    }

    /// Signed distance to a sentinel.
    ///
    /// # Panics
    ///
    /// Panics unless the profile grants difference support, or between
    /// incompatible wrap modes.
    #[must_use]
    #[track_caller]
    pub fn distance_to_sentinel(&self, sentinel: &TestSentinel) -> isize {
        self.check_live();
        self.profile
            .require(IterOps::DIFF_SENTINEL, "distance_to_sentinel");
        self.check_wrap_against(sentinel.wrap(), "sentinel distance");
        sentinel.distance_from_pos(self.position)
    }

    /// The address of the current element.
    ///
    /// # Panics
    ///
    /// Panics for profiles below contiguous.
    #[must_use]
    #[track_caller]
    pub fn as_ptr(&self) -> *const T {
        self.check_live();
        self.profile.require(IterOps::AS_PTR, "as_ptr");
        self.span.as_ptr_at(self.position)
    }

    /// The stripped twin of a borrowed protocol-participating iterator.
    ///
    /// Contiguous profiles strip to a raw position; anything else strips
    /// to an iterator whose wrap mode is [`WrapMode::Unwrapped`].
    ///
    /// # Panics
    ///
    /// Panics unless the profile is wrapped and comparable (single-pass
    /// wrapped iterators can only unwrap by move, see
    /// [`into_unwrapped`](Self::into_unwrapped)).
    #[must_use]
    #[track_caller]
    pub fn unwrapped(&self) -> Unwrapped<'a, T> {
        self.check_live();
        self.profile.require(IterOps::UNWRAP_REF, "unwrapped");
        self.strip()
    }

    /// The stripped twin, consuming the iterator.
    ///
    /// # Panics
    ///
    /// Panics unless the profile is wrapped.
    #[must_use]
    #[track_caller]
    pub fn into_unwrapped(mut self) -> Unwrapped<'a, T> {
        self.check_live();
        self.profile.require(IterOps::UNWRAP_MOVE, "into_unwrapped");
        self.live = false;
        self.strip()
    }

    fn strip(&self) -> Unwrapped<'a, T> {
        if self.profile.category().is_at_least(Category::Contiguous) {
            Unwrapped::Raw(self.position)
        } else {
            Unwrapped::Iter(Self {
                span: self.span,
                position: self.position,
                profile: self.profile.with_wrap(WrapMode::Unwrapped),
                live: true,
            })
        }
    }

    /// Re-synchronizes the position from a stripped twin.
    ///
    /// # Panics
    ///
    /// Panics unless the profile is wrapped, or if an iterator twin walks
    /// a different range, or if the twin's position is past the end.
    #[track_caller]
    pub fn seek_to(&mut self, twin: &Unwrapped<'a, T>) {
        self.check_live();
        self.profile.require(IterOps::SEEK_TO, "seek_to");
        let target = match twin {
            Unwrapped::Raw(position) => *position,
            Unwrapped::Iter(it) => {
                it.check_live();
                self.check_same_range(it, "seek_to");
                assert!(
                    it.profile.wrap().is_unwrapped(),
                    "seek_to target must be an unwrapped twin, got a {} iterator",
                    it.profile.wrap()
                );
                it.position
            }
        };
        assert!(
            target <= self.span.len(),
            "seek_to target {target} is past the end of {} elements",
            self.span.len()
        );
        self.position = target;
    }
}

impl<'a, T: Copy> TestIterator<'a, T> {
    /// Reads the current element.
    ///
    /// # Panics
    ///
    /// Panics for write-only profiles or at the end position.
    #[must_use]
    #[track_caller]
    pub fn read(&self) -> T {
        self.check_live();
        self.profile.require(IterOps::READ, "read");
        self.check_deref("read");
        self.span.get(self.position)
    }

    /// Reads at a signed offset.
    ///
    /// # Panics
    ///
    /// Panics for profiles below random-access or if the target is not a
    /// valid element position.
    #[must_use]
    #[track_caller]
    pub fn read_at(&self, offset: isize) -> T {
        self.check_live();
        self.profile.require(IterOps::INDEX, "read_at");
        let target = self.offset_position(offset, "read_at");
        assert!(
            target < self.span.len(),
            "read_at target {target} is the end position"
        );
        self.span.get(target)
    }

    /// Reads the current element without any capability gate.
    ///
    /// Test assertions use this to inspect what an algorithm wrote
    /// through a write-only fixture.
    #[must_use]
    #[track_caller]
    pub fn peek(&self) -> T {
        self.check_deref("peek");
        self.span.get(self.position)
    }
}

impl<'a, T: Default> TestIterator<'a, T> {
    /// Moves the current element out, leaving `T::default()` behind.
    ///
    /// # Panics
    ///
    /// Panics for write-only profiles, at the end position, or through
    /// read-only storage.
    #[must_use]
    #[track_caller]
    pub fn iter_move(&self) -> T {
        self.check_live();
        self.profile.require(IterOps::ITER_MOVE, "iter_move");
        self.check_deref("iter_move");
        self.span.take(self.position)
    }

    /// Swaps the current elements of two iterators, possibly of different
    /// ranges.
    ///
    /// # Panics
    ///
    /// Panics if either profile is write-only, either iterator is at its
    /// end position, or either storage is read-only.
    #[track_caller]
    pub fn iter_swap(&self, other: &TestIterator<'_, T>) {
        self.check_live();
        other.check_live();
        self.profile.require(IterOps::ITER_SWAP, "iter_swap");
        other.profile.require(IterOps::ITER_SWAP, "iter_swap");
        self.check_deref("iter_swap");
        other.check_deref("iter_swap");
        if self.span == other.span {
            self.span.swap(self.position, other.position);
        } else {
            let mine = self.span.take(self.position);
            let theirs = other.span.take(other.position);
            self.span.set(self.position, theirs);
            other.span.set(other.position, mine);
        }
    }
}

impl<T> Clone for TestIterator<'_, T> {
    /// Delegates to [`fork`](Self::fork); panics for single-pass profiles.
    #[track_caller]
    fn clone(&self) -> Self {
        self.fork()
    }
}

impl<T> fmt::Debug for TestIterator<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestIterator")
            .field("position", &self.position)
            .field("profile", &self.profile)
            .field("live", &self.live)
            .field("span", &self.span)
            .finish()
    }
}

/// The stripped twin produced by the unwrapping protocol.
///
/// Contiguous iterators strip all the way down to a raw position;
/// everything else strips to a [`TestIterator`] whose wrap mode is
/// [`WrapMode::Unwrapped`] (so accidentally comparing it against the
/// still-wrapped original is caught).
#[derive(Debug, derive_more::IsVariant)]
pub enum Unwrapped<'a, T> {
    /// A bare position, the contiguous fast path.
    Raw(usize),
    /// A protocol-marked twin iterator.
    Iter(TestIterator<'a, T>),
}

impl<'a, T> Unwrapped<'a, T> {
    /// The position of the twin, whichever form it took.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::Raw(position) => *position,
            Self::Iter(it) => it.position(),
        }
    }

    /// The twin iterator, borrowed mutably.
    ///
    /// # Panics
    ///
    /// Panics for the raw-position form.
    #[must_use]
    #[track_caller]
    pub fn as_iter_mut(&mut self) -> &mut TestIterator<'a, T> {
        match self {
            Self::Iter(it) => it,
            Self::Raw(position) => {
                panic!("unwrapped twin at position {position} is a raw position, not an iterator")
            }
        }
    }

    /// The twin iterator, by value.
    ///
    /// # Panics
    ///
    /// Panics for the raw-position form.
    #[must_use]
    #[track_caller]
    pub fn into_iterator(self) -> TestIterator<'a, T> {
        match self {
            Self::Iter(it) => it,
            Self::Raw(position) => {
                panic!("unwrapped twin at position {position} is a raw position, not an iterator")
            }
        }
    }
}
