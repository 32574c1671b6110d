//! Driving algorithms across the catalogs.
//!
//! Each `each_*` function takes seed elements, materializes one fixture
//! per catalog profile over a fresh scratch copy of the seed, and hands
//! the fixture to the visitor. A failure therefore pinpoints a single
//! capability combination, and the combination is traced through the
//! [`log`] facade before each visit so the offending profile is the last
//! line in the log.
//!
//! The composed functions (`*_pair`, `*_with_*`) nest the loops, visiting
//! the full cross product of their operand catalogs.

use rangeforge_core::{Category, ElemSpan, IterProfile, RangeProfile, TestIterator, TestRange};

use crate::catalog;

/// How a visited range fixture lends out its elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    /// Elements are read-only; any write through the fixture panics.
    ReadOnly,
    /// Elements are writable.
    ReadWrite,
}

fn run_range<T, F>(elements: &[T], access: Access, profile: RangeProfile, visit: &mut F)
where
    T: Copy,
    F: FnMut(&TestRange<'_, T>),
{
    let mut scratch = elements.to_vec();
    let mut span = ElemSpan::new(&mut scratch);
    // Write-only categories need writable storage no matter what the
    // caller asked for; everything else honors the requested access.
    if access == Access::ReadOnly && profile.category() != Category::Output {
        span = span.into_read_only();
    }
    log::trace!("visiting {profile}");
    visit(&TestRange::new(span, profile));
}

fn run_iterator<T, F>(elements: &[T], access: Access, profile: IterProfile, visit: &mut F)
where
    T: Copy,
    F: FnMut(TestIterator<'_, T>),
{
    let mut scratch = elements.to_vec();
    let mut span = ElemSpan::new(&mut scratch);
    if access == Access::ReadOnly && profile.category() != Category::Output {
        span = span.into_read_only();
    }
    log::trace!("visiting {profile}");
    visit(TestIterator::new(span, 0, profile));
}

fn each_range_profile<T, F>(
    profiles: Vec<RangeProfile>,
    elements: &[T],
    access: Access,
    mut visit: F,
) where
    T: Copy,
    F: FnMut(&TestRange<'_, T>),
{
    for profile in profiles {
        run_range(elements, access, profile, &mut visit);
    }
}

/// Visits every readable range profile (55 combinations).
pub fn each_input_range<T, F>(elements: &[T], access: Access, visit: F)
where
    T: Copy,
    F: FnMut(&TestRange<'_, T>),
{
    each_range_profile(catalog::at_least_input_ranges(), elements, access, visit);
}

/// Visits every writable-category range profile (55 combinations).
/// Storage is always writable.
pub fn each_output_range<T, F>(elements: &[T], visit: F)
where
    T: Copy,
    F: FnMut(&TestRange<'_, T>),
{
    each_range_profile(
        catalog::at_least_output_ranges(),
        elements,
        Access::ReadWrite,
        visit,
    );
}

/// Visits every range profile, readable or writable (71 combinations).
/// Storage is always writable.
pub fn each_input_or_output_range<T, F>(elements: &[T], visit: F)
where
    T: Copy,
    F: FnMut(&TestRange<'_, T>),
{
    each_range_profile(
        catalog::input_or_output_ranges(),
        elements,
        Access::ReadWrite,
        visit,
    );
}

/// Visits every range profile of at least forward strength
/// (39 combinations).
pub fn each_forward_range<T, F>(elements: &[T], access: Access, visit: F)
where
    T: Copy,
    F: FnMut(&TestRange<'_, T>),
{
    each_range_profile(catalog::at_least_forward_ranges(), elements, access, visit);
}

/// Visits every range profile of at least bidirectional strength
/// (27 combinations).
pub fn each_bidirectional_range<T, F>(elements: &[T], access: Access, visit: F)
where
    T: Copy,
    F: FnMut(&TestRange<'_, T>),
{
    each_range_profile(
        catalog::at_least_bidirectional_ranges(),
        elements,
        access,
        visit,
    );
}

/// Visits every range profile of at least random-access strength
/// (15 combinations).
pub fn each_random_access_range<T, F>(elements: &[T], access: Access, visit: F)
where
    T: Copy,
    F: FnMut(&TestRange<'_, T>),
{
    each_range_profile(
        catalog::at_least_random_access_ranges(),
        elements,
        access,
        visit,
    );
}

/// Visits every contiguous range profile (5 combinations).
pub fn each_contiguous_range<T, F>(elements: &[T], access: Access, visit: F)
where
    T: Copy,
    F: FnMut(&TestRange<'_, T>),
{
    each_range_profile(catalog::contiguous_ranges(), elements, access, visit);
}

/// Visits every readable lone-iterator profile (13 combinations).
pub fn each_input_iterator<T, F>(elements: &[T], access: Access, mut visit: F)
where
    T: Copy,
    F: FnMut(TestIterator<'_, T>),
{
    for profile in catalog::at_least_input_iterators() {
        run_iterator(elements, access, profile, &mut visit);
    }
}

/// Visits every lone-iterator profile of at least output strength
/// (13 combinations). Storage is always writable.
pub fn each_output_iterator<T, F>(elements: &[T], mut visit: F)
where
    T: Copy,
    F: FnMut(TestIterator<'_, T>),
{
    for profile in catalog::at_least_output_iterators() {
        run_iterator(elements, Access::ReadWrite, profile, &mut visit);
    }
}

/// Visits every lone-iterator profile an algorithm may write through
/// (15 combinations). Storage is always writable.
pub fn each_writable_iterator<T, F>(elements: &[T], mut visit: F)
where
    T: Copy,
    F: FnMut(TestIterator<'_, T>),
{
    for profile in catalog::writable_iterators() {
        run_iterator(elements, Access::ReadWrite, profile, &mut visit);
    }
}

fn each_range_pair<T, U, F>(
    left_profiles: &[RangeProfile],
    right_profiles: &[RangeProfile],
    left: &[T],
    right: &[U],
    access: Access,
    mut visit: F,
) where
    T: Copy,
    U: Copy,
    F: FnMut(&TestRange<'_, T>, &TestRange<'_, U>),
{
    for &left_profile in left_profiles {
        for &right_profile in right_profiles {
            run_range(left, access, left_profile, &mut |left_range| {
                run_range(right, access, right_profile, &mut |right_range| {
                    visit(left_range, right_range);
                });
            });
        }
    }
}

/// Visits every pair of readable range profiles (55 × 55 combinations).
pub fn each_input_range_pair<T, U, F>(left: &[T], right: &[U], access: Access, visit: F)
where
    T: Copy,
    U: Copy,
    F: FnMut(&TestRange<'_, T>, &TestRange<'_, U>),
{
    each_range_pair(
        &catalog::at_least_input_ranges(),
        &catalog::at_least_input_ranges(),
        left,
        right,
        access,
        visit,
    );
}

/// Visits every readable range profile paired with every
/// at-least-forward one (55 × 39 combinations).
pub fn each_input_with_forward_range<T, U, F>(left: &[T], right: &[U], access: Access, visit: F)
where
    T: Copy,
    U: Copy,
    F: FnMut(&TestRange<'_, T>, &TestRange<'_, U>),
{
    each_range_pair(
        &catalog::at_least_input_ranges(),
        &catalog::at_least_forward_ranges(),
        left,
        right,
        access,
        visit,
    );
}

/// Visits every readable range profile paired with every
/// at-least-random-access one (55 × 15 combinations).
pub fn each_input_with_random_access_range<T, U, F>(
    left: &[T],
    right: &[U],
    access: Access,
    visit: F,
) where
    T: Copy,
    U: Copy,
    F: FnMut(&TestRange<'_, T>, &TestRange<'_, U>),
{
    each_range_pair(
        &catalog::at_least_input_ranges(),
        &catalog::at_least_random_access_ranges(),
        left,
        right,
        access,
        visit,
    );
}

/// Visits every pair of at-least-forward range profiles
/// (39 × 39 combinations).
pub fn each_forward_range_pair<T, U, F>(left: &[T], right: &[U], access: Access, visit: F)
where
    T: Copy,
    U: Copy,
    F: FnMut(&TestRange<'_, T>, &TestRange<'_, U>),
{
    each_range_pair(
        &catalog::at_least_forward_ranges(),
        &catalog::at_least_forward_ranges(),
        left,
        right,
        access,
        visit,
    );
}

/// Visits every pair of at-least-bidirectional range profiles
/// (27 × 27 combinations).
pub fn each_bidirectional_range_pair<T, U, F>(left: &[T], right: &[U], access: Access, visit: F)
where
    T: Copy,
    U: Copy,
    F: FnMut(&TestRange<'_, T>, &TestRange<'_, U>),
{
    each_range_pair(
        &catalog::at_least_bidirectional_ranges(),
        &catalog::at_least_bidirectional_ranges(),
        left,
        right,
        access,
        visit,
    );
}

fn each_range_with_iterator<T, U, F>(
    range_profiles: &[RangeProfile],
    iter_profiles: &[IterProfile],
    elements: &[T],
    sink: &[U],
    access: Access,
    mut visit: F,
) where
    T: Copy,
    U: Copy,
    F: FnMut(&TestRange<'_, T>, TestIterator<'_, U>),
{
    for &range_profile in range_profiles {
        for &iter_profile in iter_profiles {
            run_range(elements, access, range_profile, &mut |range| {
                run_iterator(sink, Access::ReadWrite, iter_profile, &mut |it| {
                    visit(range, it);
                });
            });
        }
    }
}

/// Visits every readable range profile paired with every
/// at-least-output lone iterator over `sink` (55 × 13 combinations).
pub fn each_input_range_with_output_iterator<T, U, F>(
    elements: &[T],
    sink: &[U],
    access: Access,
    visit: F,
) where
    T: Copy,
    U: Copy,
    F: FnMut(&TestRange<'_, T>, TestIterator<'_, U>),
{
    each_range_with_iterator(
        &catalog::at_least_input_ranges(),
        &catalog::at_least_output_iterators(),
        elements,
        sink,
        access,
        visit,
    );
}

/// Visits every readable range profile paired with every writable lone
/// iterator over `sink` (55 × 15 combinations).
pub fn each_input_range_with_writable_iterator<T, U, F>(
    elements: &[T],
    sink: &[U],
    access: Access,
    visit: F,
) where
    T: Copy,
    U: Copy,
    F: FnMut(&TestRange<'_, T>, TestIterator<'_, U>),
{
    each_range_with_iterator(
        &catalog::at_least_input_ranges(),
        &catalog::writable_iterators(),
        elements,
        sink,
        access,
        visit,
    );
}

/// Visits every at-least-forward range profile paired with every writable
/// lone iterator over `sink` (39 × 15 combinations).
pub fn each_forward_range_with_writable_iterator<T, U, F>(
    elements: &[T],
    sink: &[U],
    access: Access,
    visit: F,
) where
    T: Copy,
    U: Copy,
    F: FnMut(&TestRange<'_, T>, TestIterator<'_, U>),
{
    each_range_with_iterator(
        &catalog::at_least_forward_ranges(),
        &catalog::writable_iterators(),
        elements,
        sink,
        access,
        visit,
    );
}

/// Visits every at-least-bidirectional range profile paired with every
/// writable lone iterator over `sink` (27 × 15 combinations).
pub fn each_bidirectional_range_with_writable_iterator<T, U, F>(
    elements: &[T],
    sink: &[U],
    access: Access,
    visit: F,
) where
    T: Copy,
    U: Copy,
    F: FnMut(&TestRange<'_, T>, TestIterator<'_, U>),
{
    each_range_with_iterator(
        &catalog::at_least_bidirectional_ranges(),
        &catalog::writable_iterators(),
        elements,
        sink,
        access,
        visit,
    );
}

/// Visits every contiguous range profile paired with every writable lone
/// iterator over `sink` (5 × 15 combinations).
pub fn each_contiguous_range_with_writable_iterator<T, U, F>(
    elements: &[T],
    sink: &[U],
    access: Access,
    visit: F,
) where
    T: Copy,
    U: Copy,
    F: FnMut(&TestRange<'_, T>, TestIterator<'_, U>),
{
    each_range_with_iterator(
        &catalog::contiguous_ranges(),
        &catalog::writable_iterators(),
        elements,
        sink,
        access,
        visit,
    );
}

/// Visits every readable lone-iterator profile paired with every writable
/// one over `sink` (13 × 15 combinations).
pub fn each_input_iterator_with_writable_iterator<T, U, F>(
    elements: &[T],
    sink: &[U],
    access: Access,
    mut visit: F,
) where
    T: Copy,
    U: Copy,
    F: FnMut(TestIterator<'_, T>, TestIterator<'_, U>),
{
    for source_profile in catalog::at_least_input_iterators() {
        for sink_profile in catalog::writable_iterators() {
            // The inner closure runs once per materialization; `take`
            // hands the source to the visitor by value.
            run_iterator(elements, access, source_profile, &mut |mut source| {
                run_iterator(sink, Access::ReadWrite, sink_profile, &mut |out| {
                    visit(source.take(), out);
                });
            });
        }
    }
}

/// Visits every pair of readable range profiles together with every
/// writable lone iterator over `sink` (55 × 55 × 15 combinations).
pub fn each_input_range_pair_with_writable_iterator<T, U, V, F>(
    left: &[T],
    right: &[U],
    sink: &[V],
    access: Access,
    mut visit: F,
) where
    T: Copy,
    U: Copy,
    V: Copy,
    F: FnMut(&TestRange<'_, T>, &TestRange<'_, U>, TestIterator<'_, V>),
{
    for left_profile in catalog::at_least_input_ranges() {
        for right_profile in catalog::at_least_input_ranges() {
            for sink_profile in catalog::writable_iterators() {
                run_range(left, access, left_profile, &mut |left_range| {
                    run_range(right, access, right_profile, &mut |right_range| {
                        run_iterator(sink, Access::ReadWrite, sink_profile, &mut |out| {
                            visit(left_range, right_range, out);
                        });
                    });
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rangeforge_core::RangeEnd;

    use super::*;

    fn collect<T: Copy>(range: &TestRange<'_, T>) -> Vec<T> {
        let mut out = Vec::new();
        let mut it = range.begin();
        let end = range.end();
        while !bool::from(end.cmp_eq(&it)) {
            out.push(read_current(&it));
            it.advance();
        }
        out
    }

    fn read_current<T: Copy>(it: &TestIterator<'_, T>) -> T {
        if it.profile().ref_mode().is_proxy() {
            it.proxy().read()
        } else {
            it.read()
        }
    }

    #[test]
    fn test_each_input_range_sees_the_seed_everywhere() {
        let mut visits = 0;
        each_input_range(&[3, 1, 4], Access::ReadOnly, |range| {
            visits += 1;
            assert_eq!(collect(range), vec![3, 1, 4], "profile {}", range.profile());
        });
        assert_eq!(visits, 55);
    }

    #[test]
    fn test_each_output_range_gets_writable_storage() {
        let mut visits = 0;
        each_output_range(&[0, 0], |range| {
            visits += 1;
            assert!(range.span().is_writable());
            let mut it = range.begin();
            it.write(7);
            it.advance();
            it.write(8);
            assert_eq!(range.span().to_vec(), vec![7, 8]);
        });
        assert_eq!(visits, 55);
    }

    #[test]
    fn test_scratch_isolation_between_visits() {
        // A write in one visit must never leak into the next.
        each_input_or_output_range(&[1, 2], |range| {
            assert_eq!(range.span().to_vec(), vec![1, 2]);
            range.span().set(0, 99);
        });
    }

    #[test]
    fn test_each_forward_range_skips_single_pass() {
        each_forward_range(&[1], Access::ReadOnly, |range| {
            assert!(!range.profile().category().is_single_pass());
            // Multi-pass: begin twice is fine.
            let a = range.begin();
            let b = range.begin();
            assert!(bool::from(a.cmp_eq(&b)));
        });
    }

    #[test]
    fn test_each_contiguous_range_exposes_data() {
        each_contiguous_range(&[5u8, 6], Access::ReadOnly, |range| {
            if range.profile().sizedness().is_sized() {
                assert_eq!(range.size(), 2);
            }
            assert_eq!(range.data(), range.begin().as_ptr());
        });
    }

    #[test]
    fn test_common_end_form_matches_profile() {
        each_input_range(&[1], Access::ReadOnly, |range| {
            match range.end() {
                RangeEnd::Iterator(_) => assert!(range.profile().common().is_yes()),
                RangeEnd::Sentinel(_) => assert!(range.profile().common().is_no()),
            }
        });
    }

    #[test]
    fn test_each_writable_iterator_writes() {
        let mut visits = 0;
        each_writable_iterator(&[0, 0, 0], |mut it| {
            visits += 1;
            it.write(1);
            it.advance();
            it.write(2);
        });
        assert_eq!(visits, 15);
    }

    #[test]
    fn test_pair_visit_counts() {
        let mut visits = 0u32;
        each_bidirectional_range_pair(&[1], &[2u8], Access::ReadOnly, |_, _| visits += 1);
        assert_eq!(visits, 27 * 27);
    }

    #[test]
    fn test_range_with_iterator_visit_counts() {
        let mut visits = 0u32;
        each_contiguous_range_with_writable_iterator(
            &[1u8],
            &[0i32],
            Access::ReadOnly,
            |_, _| visits += 1,
        );
        assert_eq!(visits, 5 * 15);
    }

    #[test]
    fn test_iterator_pair_visits_hand_out_live_operands() {
        let mut visits = 0u32;
        each_input_iterator_with_writable_iterator(
            &[4, 5],
            &[0, 0],
            Access::ReadOnly,
            |mut source, mut out| {
                visits += 1;
                assert!(source.is_live(), "profile {}", source.profile());
                out.write(read_current(&source));
                source.advance();
                out.advance();
                out.write(read_current(&source));
                assert_eq!(out.span().to_vec(), vec![4, 5]);
            },
        );
        assert_eq!(visits, 13 * 15);
    }

    #[test]
    fn test_copy_across_the_matrix() {
        // A miniature copy algorithm: read everything from the source
        // range, write it through the sink iterator.
        each_input_range_with_output_iterator(
            &[9, 8, 7],
            &[0, 0, 0],
            Access::ReadOnly,
            |source, mut out| {
                let mut it = source.begin();
                let end = source.end();
                while !bool::from(end.cmp_eq(&it)) {
                    out.write(read_current(&it));
                    out.advance();
                    it.advance();
                }
                assert_eq!(out.span().to_vec(), vec![9, 8, 7]);
            },
        );
    }
}
