//! Catalogs of interesting capability combinations.
//!
//! Each tier function returns the block of profiles whose weakest
//! admissible category is that tier; the `at_least_*` functions
//! concatenate a tier block with every stronger tier, so driving an
//! algorithm over `at_least_forward_ranges()` covers forward through
//! contiguous.
//!
//! The blocks are not full cartesian products. Combinations that cannot
//! exercise anything new are pruned:
//!
//! - a common end implies comparable iterators, in every tier;
//! - for single-pass tiers, comparable without a common end is
//!   uninteresting (only one live iterator exists, there is nothing to
//!   compare it with);
//! - from forward up, unsized-with-difference is uninteresting (the size
//!   is recoverable from the iterators either way);
//! - from random-access up, unsized-with-common-end is likewise
//!   uninteresting;
//! - contiguous forbids proxy references outright and keeps only five
//!   combinations.

use rangeforge_core::{
    CanCompare, CanDifference, Category, IterProfile, RangeProfile, RefMode, Sizedness,
};

const SIZES: [Sizedness; 2] = [Sizedness::Unsized, Sizedness::Sized];
const DIFFS: [CanDifference; 2] = [CanDifference::No, CanDifference::Yes];
const COMMONS: [bool; 2] = [false, true];
const REFS: [RefMode; 2] = [RefMode::Native, RefMode::Proxy];

fn range_profile(
    category: Category,
    sizedness: Sizedness,
    difference: CanDifference,
    common: bool,
    ref_mode: RefMode,
) -> RangeProfile {
    let mut profile = RangeProfile::new(category)
        .with_sizedness(sizedness)
        .with_difference(difference)
        .with_ref_mode(ref_mode);
    if common {
        profile = profile.with_common_end();
    } else if category.is_single_pass() {
        // Comparability of a lone single-pass iterator is uninteresting.
        profile = profile.with_comparable(CanCompare::No);
    }
    profile
}

/// The sixteen single-pass blocks share one shape: every
/// sized/difference/common/ref combination, with comparability tied to the
/// common end.
fn single_pass_ranges(category: Category) -> Vec<RangeProfile> {
    let mut profiles = Vec::with_capacity(16);
    for sizedness in SIZES {
        for difference in DIFFS {
            for common in COMMONS {
                for ref_mode in REFS {
                    profiles.push(range_profile(category, sizedness, difference, common, ref_mode));
                }
            }
        }
    }
    profiles
}

/// The input-range tier block: sixteen combinations.
#[must_use]
pub fn input_ranges() -> Vec<RangeProfile> {
    single_pass_ranges(Category::Input)
}

/// The output-range tier block: sixteen combinations.
#[must_use]
pub fn output_ranges() -> Vec<RangeProfile> {
    single_pass_ranges(Category::Output)
}

/// The forward-range tier block: twelve combinations
/// (unsized-with-difference pruned).
#[must_use]
pub fn forward_ranges() -> Vec<RangeProfile> {
    multi_pass_ranges(Category::Forward)
}

/// The bidirectional-range tier block: twelve combinations, shaped like
/// [`forward_ranges`].
#[must_use]
pub fn bidirectional_ranges() -> Vec<RangeProfile> {
    multi_pass_ranges(Category::Bidirectional)
}

fn multi_pass_ranges(category: Category) -> Vec<RangeProfile> {
    let mut profiles = Vec::with_capacity(12);
    for sizedness in SIZES {
        for difference in DIFFS {
            if sizedness.is_unsized() && difference.is_yes() {
                continue;
            }
            for common in COMMONS {
                for ref_mode in REFS {
                    profiles.push(range_profile(category, sizedness, difference, common, ref_mode));
                }
            }
        }
    }
    profiles
}

/// The random-access-range tier block: ten combinations
/// (unsized-with-difference and unsized-with-common-end pruned).
#[must_use]
pub fn random_access_ranges() -> Vec<RangeProfile> {
    let mut profiles = Vec::with_capacity(10);
    for sizedness in SIZES {
        for difference in DIFFS {
            if sizedness.is_unsized() && difference.is_yes() {
                continue;
            }
            for common in COMMONS {
                if sizedness.is_unsized() && common {
                    continue;
                }
                for ref_mode in REFS {
                    profiles.push(range_profile(
                        Category::RandomAccess,
                        sizedness,
                        difference,
                        common,
                        ref_mode,
                    ));
                }
            }
        }
    }
    profiles
}

/// The contiguous-range tier block: five combinations, all with native
/// references.
#[must_use]
pub fn contiguous_ranges() -> Vec<RangeProfile> {
    [
        (Sizedness::Unsized, CanDifference::No, false),
        (Sizedness::Sized, CanDifference::No, false),
        (Sizedness::Sized, CanDifference::No, true),
        (Sizedness::Sized, CanDifference::Yes, false),
        (Sizedness::Sized, CanDifference::Yes, true),
    ]
    .into_iter()
    .map(|(sizedness, difference, common)| {
        range_profile(Category::Contiguous, sizedness, difference, common, RefMode::Native)
    })
    .collect()
}

/// Every range profile of at least random-access strength: fifteen.
#[must_use]
pub fn at_least_random_access_ranges() -> Vec<RangeProfile> {
    let mut profiles = random_access_ranges();
    profiles.extend(contiguous_ranges());
    profiles
}

/// Every range profile of at least bidirectional strength: twenty-seven.
#[must_use]
pub fn at_least_bidirectional_ranges() -> Vec<RangeProfile> {
    let mut profiles = bidirectional_ranges();
    profiles.extend(at_least_random_access_ranges());
    profiles
}

/// Every range profile of at least forward strength: thirty-nine.
#[must_use]
pub fn at_least_forward_ranges() -> Vec<RangeProfile> {
    let mut profiles = forward_ranges();
    profiles.extend(at_least_bidirectional_ranges());
    profiles
}

/// Every readable range profile: the input block plus everything of at
/// least forward strength, fifty-five in all.
#[must_use]
pub fn at_least_input_ranges() -> Vec<RangeProfile> {
    let mut profiles = input_ranges();
    profiles.extend(at_least_forward_ranges());
    profiles
}

/// Every writable-category range profile: the output block plus everything
/// of at least forward strength, fifty-five in all.
#[must_use]
pub fn at_least_output_ranges() -> Vec<RangeProfile> {
    let mut profiles = output_ranges();
    profiles.extend(at_least_forward_ranges());
    profiles
}

/// Every range profile: both single-pass blocks plus everything of at
/// least forward strength, seventy-one in all.
#[must_use]
pub fn input_or_output_ranges() -> Vec<RangeProfile> {
    let mut profiles = input_ranges();
    profiles.extend(output_ranges());
    profiles.extend(at_least_forward_ranges());
    profiles
}

/// The shared multi-pass tail of the lone-iterator catalogs: forward and
/// bidirectional vary difference and ref mode, random-access varies only
/// ref mode, contiguous is fully locked down.
fn multi_pass_iterators() -> Vec<IterProfile> {
    let mut profiles = Vec::with_capacity(11);
    for category in [Category::Forward, Category::Bidirectional] {
        for difference in DIFFS {
            for ref_mode in REFS {
                profiles.push(
                    IterProfile::new(category)
                        .with_difference(difference)
                        .with_ref_mode(ref_mode),
                );
            }
        }
    }
    for ref_mode in REFS {
        profiles.push(IterProfile::new(Category::RandomAccess).with_ref_mode(ref_mode));
    }
    profiles.push(IterProfile::new(Category::Contiguous));
    profiles
}

/// Difference and comparability are not significant for a lone single-pass
/// iterator; only the ref mode varies.
fn single_pass_iterators(category: Category) -> Vec<IterProfile> {
    REFS.iter()
        .map(|&ref_mode| IterProfile::new(category).with_ref_mode(ref_mode))
        .collect()
}

/// Every lone-iterator profile of at least output strength: thirteen.
#[must_use]
pub fn at_least_output_iterators() -> Vec<IterProfile> {
    let mut profiles = single_pass_iterators(Category::Output);
    profiles.extend(multi_pass_iterators());
    profiles
}

/// Every readable lone-iterator profile: thirteen.
#[must_use]
pub fn at_least_input_iterators() -> Vec<IterProfile> {
    let mut profiles = single_pass_iterators(Category::Input);
    profiles.extend(multi_pass_iterators());
    profiles
}

/// Every lone-iterator profile an algorithm may write through: the input
/// pair plus the whole output catalog, fifteen.
#[must_use]
pub fn writable_iterators() -> Vec<IterProfile> {
    let mut profiles = single_pass_iterators(Category::Input);
    profiles.extend(at_least_output_iterators());
    profiles
}
