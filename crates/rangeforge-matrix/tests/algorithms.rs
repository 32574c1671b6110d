//! Small generic algorithms driven across the full capability matrix.
//!
//! Each algorithm here is written against the weakest category its driver
//! enumerates and touches nothing beyond what that category grants; the
//! drivers then prove it by materializing every cataloged combination.

use rangeforge_core::{TestIterator, TestRange, rediff_subrange};
use rangeforge_matrix::{
    Access, each_bidirectional_range, each_forward_range, each_input_range,
    each_input_range_pair, each_input_range_with_writable_iterator, each_random_access_range,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Reads the current element whichever dereference form the profile uses.
fn read_current<T: Copy>(it: &TestIterator<'_, T>) -> T {
    if it.profile().ref_mode().is_proxy() {
        it.proxy().read()
    } else {
        it.read()
    }
}

/// A single-pass find: read, compare, advance.
fn find<T: Copy + PartialEq>(range: &TestRange<'_, T>, needle: T) -> Option<usize> {
    let mut it = range.begin();
    let end = range.end();
    while !bool::from(end.cmp_eq(&it)) {
        if read_current(&it) == needle {
            return Some(it.position());
        }
        it.advance();
    }
    None
}

/// A single-pass element-wise equality check over two ranges.
fn equal<T, U>(left: &TestRange<'_, T>, right: &TestRange<'_, U>) -> bool
where
    T: Copy + PartialEq<U>,
    U: Copy,
{
    let mut lhs = left.begin();
    let mut rhs = right.begin();
    let left_end = left.end();
    let right_end = right.end();
    loop {
        let left_done = bool::from(left_end.cmp_eq(&lhs));
        let right_done = bool::from(right_end.cmp_eq(&rhs));
        if left_done || right_done {
            return left_done && right_done;
        }
        if read_current(&lhs) != read_current(&rhs) {
            return false;
        }
        lhs.advance();
        rhs.advance();
    }
}

/// A multi-pass minimum search that returns a second live iterator at the
/// smallest element.
fn min_element<'a, T: Copy + PartialOrd>(range: &TestRange<'a, T>) -> Option<TestIterator<'a, T>> {
    let mut it = range.begin();
    let end = range.end();
    if bool::from(end.cmp_eq(&it)) {
        return None;
    }
    let mut best = it.fork();
    it.advance();
    while !bool::from(end.cmp_eq(&it)) {
        if read_current(&it) < read_current(&best) {
            best = it.fork();
        }
        it.advance();
    }
    Some(best)
}

/// An in-place reversal using only bidirectional traversal and element
/// swaps.
fn reverse<T: Default>(range: &TestRange<'_, T>) {
    let mut first = range.begin();
    let mut last = first.fork();
    let end = range.end();
    while !bool::from(end.cmp_eq(&last)) {
        last.advance();
    }
    loop {
        if bool::from(first.cmp_eq(&last)) {
            return;
        }
        last.retreat();
        if bool::from(first.cmp_eq(&last)) {
            return;
        }
        first.iter_swap(&last);
        first.advance();
    }
}

/// A copy driven by reads on one side and raw writes on the other.
fn copy_to<T: Copy>(source: &TestRange<'_, T>, out: &mut TestIterator<'_, T>) -> usize {
    let mut it = source.begin();
    let end = source.end();
    let mut written = 0;
    while !bool::from(end.cmp_eq(&it)) {
        out.write(read_current(&it));
        out.advance();
        it.advance();
        written += 1;
    }
    written
}

#[test]
fn test_find_across_all_readable_ranges() {
    init_logging();
    // One `find` per fixture: a second search would be a second `begin`,
    // which single-pass profiles rightly reject.
    let mut visits = 0;
    each_input_range(&[4, 2, 9, 2], Access::ReadOnly, |range| {
        visits += 1;
        assert_eq!(find(range, 9), Some(2), "profile {}", range.profile());
    });
    assert_eq!(visits, 55);

    each_input_range(&[4, 2, 9, 2], Access::ReadOnly, |range| {
        assert_eq!(find(range, 7), None, "profile {}", range.profile());
    });
}

#[test]
fn test_find_consumes_a_fresh_fixture_per_visit() {
    init_logging();
    // `find` begins the range once per visit; single-pass profiles would
    // reject a second begin, so a passing run proves the driver hands out
    // fresh fixtures.
    each_input_range(&[1, 2], Access::ReadOnly, |range| {
        assert_eq!(find(range, 2), Some(1));
    });
}

#[test]
fn test_equal_across_range_pairs() {
    init_logging();
    let mut visits = 0u32;
    each_input_range_pair(&[5, 6, 7], &[5, 6, 7], Access::ReadOnly, |left, right| {
        visits += 1;
        assert!(
            equal(left, right),
            "profiles {} / {}",
            left.profile(),
            right.profile()
        );
    });
    assert_eq!(visits, 55 * 55);
}

#[test]
fn test_equal_detects_length_mismatch() {
    init_logging();
    each_input_range_pair(&[5, 6, 7], &[5, 6], Access::ReadOnly, |left, right| {
        assert!(!equal(left, right));
    });
}

#[test]
fn test_min_element_across_forward_ranges() {
    init_logging();
    each_forward_range(&[7, 3, 9, 3], Access::ReadOnly, |range| {
        let best = min_element(range).expect("non-empty input");
        // The first of the tied minima wins.
        assert_eq!(best.position(), 1, "profile {}", range.profile());
        assert_eq!(read_current(&best), 3);
    });
}

#[test]
fn test_min_element_of_empty_range() {
    init_logging();
    each_forward_range(&[] as &[i32], Access::ReadOnly, |range| {
        assert!(min_element(range).is_none());
    });
}

#[test]
fn test_reverse_across_bidirectional_ranges() {
    init_logging();
    each_bidirectional_range(&[1, 2, 3, 4, 5], Access::ReadWrite, |range| {
        reverse(range);
        assert_eq!(
            range.span().to_vec(),
            vec![5, 4, 3, 2, 1],
            "profile {}",
            range.profile()
        );
    });

    // Even length as well, since the pivot handling differs.
    each_bidirectional_range(&[1, 2, 3, 4], Access::ReadWrite, |range| {
        reverse(range);
        assert_eq!(range.span().to_vec(), vec![4, 3, 2, 1]);
    });
}

#[test]
fn test_indexed_sum_across_random_access_ranges() {
    init_logging();
    each_random_access_range(&[10, 20, 30], Access::ReadOnly, |range| {
        // Walk once to count, then revisit by index.
        let mut it = range.begin();
        let end = range.end();
        let mut len = 0isize;
        while !bool::from(end.cmp_eq(&it)) {
            it.advance();
            len += 1;
        }
        let base = range.begin();
        let mut sum = 0;
        for i in 0..len {
            sum += if base.profile().ref_mode().is_proxy() {
                base.proxy_at(i).read()
            } else {
                base.read_at(i)
            };
        }
        assert_eq!(sum, 60, "profile {}", range.profile());
    });
}

#[test]
fn test_copy_into_every_writable_iterator() {
    init_logging();
    let mut visits = 0u32;
    each_input_range_with_writable_iterator(
        &[11, 12, 13],
        &[0, 0, 0],
        Access::ReadOnly,
        |source, mut out| {
            visits += 1;
            let written = copy_to(source, &mut out);
            assert_eq!(written, 3);
            assert_eq!(
                out.span().to_vec(),
                vec![11, 12, 13],
                "profiles {} / {}",
                source.profile(),
                out.profile()
            );
        },
    );
    assert_eq!(visits, 55 * 15);
}

#[test]
fn test_rebound_distances_across_random_access_ranges() {
    init_logging();
    each_random_access_range(&[1, 2, 3, 4], Access::ReadOnly, |range| {
        let sub = rediff_subrange::<_, i8>(range);
        let mut it = sub.into_begin();
        let start = it.clone();
        it.seek(3i8);
        assert_eq!(start.distance_to(&it), 3i8);
        assert_eq!(it.distance_to(&start), -3i8);
        assert_eq!(it.read_at(-3i8), 1);
    });
}
