//! Capability-tagged iterator and range fixtures for testing generic
//! algorithms.
//!
//! A generic algorithm should demand the weakest iterator category it can
//! work with and touch nothing beyond what that category grants. This
//! crate provides fixtures that enforce the claim at runtime: each fixture
//! carries a validated capability profile, and every operation the profile
//! does not grant panics at the caller's location, naming the operation
//! and the profile.
//!
//! # Overview
//!
//! 1. **Capability model**
//!    - [`capability`]: the closed vocabulary of capability enums, led by
//!      the [`Category`] total order
//!    - [`profile`]: validated [`IterProfile`] / [`RangeProfile`] records
//!      and the granted-operation sets [`IterOps`] / [`RangeOps`]
//!
//! 2. **Fixtures** - all borrowing caller-owned storage through an
//!    [`ElemSpan`]
//!    - [`iterator`]: [`TestIterator`], the capability-checked iterator,
//!      and its [`Unwrapped`] protocol twin
//!    - [`range`]: [`TestRange`] and its sentinel-or-iterator
//!      [`RangeEnd`]
//!    - [`sentinel`]: [`TestSentinel`], the non-common end marker
//!    - [`proxy`]: [`ProxyRef`], the write-through proxy reference
//!    - [`boolish`]: [`Boolish`], the explicit-conversion comparison
//!      result
//!
//! 3. **Difference rebinding**
//!    - [`rediff`]: [`RediffIterator`] / [`RediffSentinel`] /
//!      [`rediff_subrange`], re-exposing distances in a chosen signed
//!      width
//!
//! # Examples
//!
//! ```
//! use rangeforge_core::{Category, ElemSpan, RangeProfile, TestRange};
//!
//! fn first_even(range: &TestRange<'_, i32>) -> Option<i32> {
//!     let mut it = range.begin();
//!     let end = range.end();
//!     while !bool::from(end.cmp_eq(&it)) {
//!         let value = it.proxy().read();
//!         if value % 2 == 0 {
//!             return Some(value);
//!         }
//!         it.advance();
//!     }
//!     None
//! }
//!
//! let mut data = [3, 7, 8, 1];
//! let range = TestRange::new(
//!     ElemSpan::new(&mut data),
//!     RangeProfile::new(Category::Input),
//! );
//! assert_eq!(first_even(&range), Some(8));
//! ```
//!
//! The same `first_even` driven by a [`Category::Output`] profile would
//! panic on the first `read`, pinpointing the capability violation.

pub mod boolish;
pub mod capability;
pub mod iterator;
pub mod profile;
pub mod proxy;
pub mod range;
pub mod rediff;
pub mod sentinel;
pub mod span;

// Re-export commonly used types
pub use self::{
    boolish::Boolish,
    capability::{
        CanCompare, CanDifference, CanView, Category, CommonEnd, Copyability, RefMode, Sizedness,
        WrapMode,
    },
    iterator::{TestIterator, Unwrapped},
    profile::{IterOps, IterProfile, ProfileError, RangeOps, RangeProfile},
    proxy::ProxyRef,
    range::{RangeEnd, TestRange},
    rediff::{Distance, RediffIterator, RediffSentinel, RediffSubrange, rediff_subrange},
    sentinel::TestSentinel,
    span::ElemSpan,
};
