//! End-of-range sentinels.
//!
//! A sentinel marks the one-past-end position of a range without being an
//! iterator: it cannot be dereferenced or advanced, only compared against
//! (and, when the profile grants distances, subtracted from) an iterator of
//! the same range. Keeping the sentinel a distinct type from the iterator
//! is what makes a range non-common.

use crate::boolish::Boolish;
use crate::capability::WrapMode;
use crate::iterator::TestIterator;

/// The end marker of a non-common range.
///
/// Carries the one-past-end position and a [`WrapMode`]; cross-operations
/// with an iterator check wrap compatibility and panic on a mismatch (see
/// [`WrapMode::is_compatible_with`]). Both operand orders exist:
/// [`TestIterator::cmp_eq_sentinel`] and [`cmp_eq_iter`](Self::cmp_eq_iter)
/// run the same checks and agree on the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TestSentinel {
    position: usize,
    wrap: WrapMode,
}

impl TestSentinel {
    /// Creates a sentinel at `position` with the given wrap mode.
    #[must_use]
    pub const fn new(position: usize, wrap: WrapMode) -> Self {
        Self { position, wrap }
    }

    /// The one-past-end position this sentinel marks.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// The wrapping-protocol mode.
    #[must_use]
    pub const fn wrap(&self) -> WrapMode {
        self.wrap
    }

    /// Equality against a raw position.
    #[must_use]
    pub const fn cmp_eq_pos(&self, position: usize) -> Boolish {
        Boolish::new(self.position == position)
    }

    /// Signed distance from `position` to this sentinel.
    ///
    /// # Panics
    ///
    /// Panics if the distance does not fit in `isize`.
    #[must_use]
    #[track_caller]
    pub fn distance_from_pos(&self, position: usize) -> isize {
        signed_delta(position, self.position)
    }

    /// Signed distance from this sentinel to `position`.
    ///
    /// # Panics
    ///
    /// Panics if the distance does not fit in `isize`.
    #[must_use]
    #[track_caller]
    pub fn distance_to_pos(&self, position: usize) -> isize {
        signed_delta(self.position, position)
    }

    /// Equality against an iterator, sentinel on the left.
    ///
    /// # Panics
    ///
    /// As [`TestIterator::cmp_eq_sentinel`], which runs the wrap
    /// compatibility and capability checks for both operand orders.
    #[must_use]
    #[track_caller]
    pub fn cmp_eq_iter<T>(&self, it: &TestIterator<'_, T>) -> Boolish {
        it.cmp_eq_sentinel(self)
    }

    /// Signed distance from this sentinel to an iterator.
    ///
    /// # Panics
    ///
    /// As [`TestIterator::distance_to_sentinel`].
    #[must_use]
    #[track_caller]
    pub fn distance_to_iter<T>(&self, it: &TestIterator<'_, T>) -> isize {
        -it.distance_to_sentinel(self)
    }

    /// The stripped twin of a protocol-participating sentinel.
    ///
    /// # Panics
    ///
    /// Panics unless this sentinel is [`WrapMode::Wrapped`].
    #[must_use]
    #[track_caller]
    pub fn unwrapped(&self) -> Self {
        assert!(
            self.wrap.is_wrapped(),
            "unwrap of a {} sentinel",
            self.wrap
        );
        Self {
            position: self.position,
            wrap: WrapMode::Unwrapped,
        }
    }

    /// Re-synchronizes this sentinel's position from its stripped twin.
    ///
    /// # Panics
    ///
    /// Panics unless this sentinel is [`WrapMode::Wrapped`] and `twin` is
    /// [`WrapMode::Unwrapped`].
    #[track_caller]
    pub fn seek_to(&mut self, twin: Self) {
        assert!(
            self.wrap.is_wrapped(),
            "seek of a {} sentinel",
            self.wrap
        );
        assert!(
            twin.wrap.is_unwrapped(),
            "seek target must be an unwrapped twin, got a {} sentinel",
            twin.wrap
        );
        self.position = twin.position;
    }
}

/// `to - from` as `isize`, panicking on overflow.
#[track_caller]
pub(crate) fn signed_delta(from: usize, to: usize) -> isize {
    let delta = if to >= from {
        isize::try_from(to - from)
    } else {
        isize::try_from(from - to).map(isize::wrapping_neg)
    };
    match delta {
        Ok(d) => d,
        Err(_) => panic!("distance from {from} to {to} does not fit in isize"),
    }
}
