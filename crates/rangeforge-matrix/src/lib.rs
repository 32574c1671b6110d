//! Exhaustive capability-matrix drivers for algorithm tests.
//!
//! Built on [`rangeforge_core`]'s capability-checked fixtures, this crate
//! enumerates the interesting capability combinations and drives an
//! algorithm across all of them in one call. A correctness property that
//! holds for one iterator strength but silently over-reaches on another
//! fails against exactly the combination it over-reaches on.
//!
//! # Overview
//!
//! - [`catalog`]: the combination tables, one function per tier block plus
//!   cumulative `at_least_*` views
//! - [`visit`]: the `each_*` drivers that materialize a fixture per
//!   catalog entry over scratch copies of the caller's elements, with the
//!   [`Access`] axis selecting read-only or writable storage
//!
//! # Examples
//!
//! ```
//! use rangeforge_matrix::{Access, each_input_range};
//!
//! // A count implementation that only ever reads and advances works for
//! // all 55 readable range shapes.
//! each_input_range(&[1, 5, 5, 2], Access::ReadOnly, |range| {
//!     let mut count = 0;
//!     let mut it = range.begin();
//!     let end = range.end();
//!     while !bool::from(end.cmp_eq(&it)) {
//!         if it.profile().ref_mode().is_proxy() {
//!             count += i32::from(it.proxy().read() == 5);
//!         } else {
//!             count += i32::from(it.read() == 5);
//!         }
//!         it.advance();
//!     }
//!     assert_eq!(count, 2);
//! });
//! ```

pub mod catalog;
pub mod visit;

// Re-export commonly used entry points
pub use self::visit::{
    Access, each_bidirectional_range, each_bidirectional_range_pair,
    each_bidirectional_range_with_writable_iterator, each_contiguous_range,
    each_contiguous_range_with_writable_iterator, each_forward_range, each_forward_range_pair,
    each_forward_range_with_writable_iterator, each_input_iterator,
    each_input_iterator_with_writable_iterator, each_input_or_output_range, each_input_range,
    each_input_range_pair, each_input_range_pair_with_writable_iterator,
    each_input_range_with_output_iterator, each_input_range_with_writable_iterator,
    each_input_with_forward_range, each_input_with_random_access_range, each_output_iterator,
    each_output_range, each_random_access_range, each_writable_iterator,
};
