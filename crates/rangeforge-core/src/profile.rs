//! Capability profiles for iterator and range fixtures.
//!
//! A profile is the explicit, validated configuration record that replaces
//! type-level capability tags: it names a [`Category`] plus the secondary
//! trait flags, enforces the cross-flag invariants at construction, and
//! derives the exact set of operations the fixture grants ([`IterOps`],
//! [`RangeOps`]). Fixture operations consult the profile through a
//! `#[track_caller]` guard that panics — naming the operation and the
//! profile — when an ungranted operation is attempted, so a test fails at
//! the call site that over-reached.
//!
//! # Invariants
//!
//! - at-least-forward categories must be comparable (multi-pass);
//! - at-least-contiguous categories must use native references;
//! - a common range end implies comparable iterators;
//! - a view range cannot be immobile.
//!
//! # Examples
//!
//! ```
//! use rangeforge_core::{CanDifference, Category, IterOps, IterProfile};
//!
//! // Defaults mirror the minimum for the category: forward iterators are
//! // comparable but have no distance support.
//! let profile = IterProfile::new(Category::Forward);
//! assert!(profile.supports(IterOps::EQ_SELF));
//! assert!(!profile.supports(IterOps::DIFF_SELF));
//!
//! // Flags can be strengthened, subject to validation.
//! let profile = profile.with_difference(CanDifference::Yes);
//! assert!(profile.supports(IterOps::DIFF_SELF));
//! ```

use std::fmt;

use crate::capability::{
    CanCompare, CanDifference, CanView, Category, CommonEnd, Copyability, RefMode, Sizedness,
    WrapMode,
};

bitflags::bitflags! {
    /// The exact set of operations an [`IterProfile`] grants.
    ///
    /// A fixture supports an operation if and only if its flag is present;
    /// attempting anything else panics. Tests can compare a profile's
    /// [`ops`](IterProfile::ops) against an expected set to prove a fixture
    /// grants its tier's operations and *no more*.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct IterOps: u32 {
        /// Reading the pointed-to element (at-least-input).
        const READ = 1 << 0;
        /// Pre-increment. Always granted.
        const ADVANCE = 1 << 1;
        /// Post-increment returning a true prior-position copy
        /// (at-least-forward).
        const ADVANCE_COPY = 1 << 2;
        /// Post-increment returning a write-through proxy (bare output
        /// only; a self-copy would be unsound for single-pass output
        /// iteration).
        const ADVANCE_WRITE = 1 << 3;
        /// Pre/post decrement (at-least-bidirectional).
        const RETREAT = 1 << 4;
        /// Equality against another iterator of the same range
        /// (comparable profiles).
        const EQ_SELF = 1 << 5;
        /// Equality against a sentinel. Always granted; wrap-mode
        /// compatibility is checked per call.
        const EQ_SENTINEL = 1 << 6;
        /// Relational and three-way comparison (at-least-random-access).
        const ORDER = 1 << 7;
        /// Seeking by a signed offset, `+`/`-` by offset
        /// (at-least-random-access).
        const SEEK = 1 << 8;
        /// Indexing by a signed offset (at-least-random-access).
        const INDEX = 1 << 9;
        /// Iterator − iterator distance (random-access, or difference
        /// support on a comparable profile).
        const DIFF_SELF = 1 << 10;
        /// Iterator − sentinel distance (difference support).
        const DIFF_SENTINEL = 1 << 11;
        /// Moving the element out (at-least-input).
        const ITER_MOVE = 1 << 12;
        /// Swapping pointed-to elements (at-least-input; meaningless and
        /// rejected for write-only output iterators).
        const ITER_SWAP = 1 << 13;
        /// Raw element address (at-least-contiguous).
        const AS_PTR = 1 << 14;
        /// Obtaining the unwrapped twin from a borrowed iterator
        /// (wrapped and comparable).
        const UNWRAP_REF = 1 << 15;
        /// Obtaining the unwrapped twin by consuming the iterator
        /// (wrapped).
        const UNWRAP_MOVE = 1 << 16;
        /// Re-synchronizing the position from an unwrapped twin (wrapped).
        const SEEK_TO = 1 << 17;
        /// Cloning. Single-pass (non-comparable) iterators are move-only.
        const FORK = 1 << 18;
    }
}

bitflags::bitflags! {
    /// The exact set of operations a [`RangeProfile`] grants beyond
    /// `begin`/`end`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RangeOps: u32 {
        /// Member `size` (sized ranges).
        const SIZE = 1 << 0;
        /// Raw base pointer via `data` (contiguous element categories).
        const DATA = 1 << 1;
        /// `end` is an iterator rather than a sentinel (common ranges).
        const COMMON_END = 1 << 2;
        /// Copying the range (copyable policy).
        const FORK = 1 << 3;
        /// Moving the range out, invalidating the source (move-only or
        /// copyable policy).
        const TAKE = 1 << 4;
    }
}

/// An invalid combination of capability flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ProfileError {
    /// Multi-pass categories are inherently comparable.
    #[display("{category} fixtures must be comparable")]
    ComparableRequired {
        /// The offending at-least-forward category.
        category: Category,
    },
    /// Contiguous fixtures hand out real element addresses; nothing but
    /// native references can be faithful to that.
    #[display("{category} fixtures cannot use {ref_mode} references")]
    NativeRefRequired {
        /// The offending at-least-contiguous category.
        category: Category,
        /// The rejected reference mode.
        ref_mode: RefMode,
    },
    /// A common range's end is an iterator, which must be comparable.
    #[display("a common range requires comparable iterators")]
    CommonRequiresComparable,
    /// A view must at least be movable.
    #[display("a view range cannot be immobile")]
    ViewRequiresMobility,
}

/// The validated capability configuration of an iterator fixture.
///
/// See the [module documentation](self) for the invariants and the
/// [`IterOps`] table for what each combination grants. Construction goes
/// through [`build`](Self::build) (fallible) or [`new`](Self::new) plus the
/// panicking `with_*` conveniences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IterProfile {
    category: Category,
    difference: CanDifference,
    comparable: CanCompare,
    ref_mode: RefMode,
    wrap: WrapMode,
}

impl IterProfile {
    /// Creates the default profile for a category.
    ///
    /// Defaults are the weakest flags admissible for the category:
    /// difference support only from random-access up, comparability only
    /// from forward up, proxy references except at contiguous (which
    /// forbids them), and full wrapping-protocol participation.
    #[must_use]
    pub fn new(category: Category) -> Self {
        let ref_mode = if category.is_at_least(Category::Contiguous) {
            RefMode::Native
        } else {
            RefMode::Proxy
        };
        Self {
            category,
            difference: if category.is_at_least(Category::RandomAccess) {
                CanDifference::Yes
            } else {
                CanDifference::No
            },
            comparable: if category.is_at_least(Category::Forward) {
                CanCompare::Yes
            } else {
                CanCompare::No
            },
            ref_mode,
            wrap: WrapMode::Wrapped,
        }
    }

    /// Creates a profile from explicit flags, validating the cross-flag
    /// invariants.
    ///
    /// # Errors
    ///
    /// Returns a [`ProfileError`] naming the violated invariant.
    pub fn build(
        category: Category,
        difference: CanDifference,
        comparable: CanCompare,
        ref_mode: RefMode,
        wrap: WrapMode,
    ) -> Result<Self, ProfileError> {
        if category.is_at_least(Category::Forward) && comparable.is_no() {
            return Err(ProfileError::ComparableRequired { category });
        }
        if category.is_at_least(Category::Contiguous) && !ref_mode.is_native() {
            return Err(ProfileError::NativeRefRequired { category, ref_mode });
        }
        Ok(Self {
            category,
            difference,
            comparable,
            ref_mode,
            wrap,
        })
    }

    /// Replaces the difference flag.
    #[must_use]
    pub fn with_difference(mut self, difference: CanDifference) -> Self {
        self.difference = difference;
        self
    }

    /// Replaces the comparability flag.
    ///
    /// # Panics
    ///
    /// Panics if the category is at least forward and `comparable` is
    /// [`CanCompare::No`].
    #[must_use]
    #[track_caller]
    pub fn with_comparable(self, comparable: CanCompare) -> Self {
        match Self::build(self.category, self.difference, comparable, self.ref_mode, self.wrap) {
            Ok(profile) => profile,
            Err(err) => panic!("invalid iterator profile: {err}"),
        }
    }

    /// Replaces the reference mode.
    ///
    /// # Panics
    ///
    /// Panics if the category is at least contiguous and `ref_mode` is not
    /// [`RefMode::Native`].
    #[must_use]
    #[track_caller]
    pub fn with_ref_mode(self, ref_mode: RefMode) -> Self {
        match Self::build(self.category, self.difference, self.comparable, ref_mode, self.wrap) {
            Ok(profile) => profile,
            Err(err) => panic!("invalid iterator profile: {err}"),
        }
    }

    /// Replaces the wrapping-protocol mode.
    #[must_use]
    pub fn with_wrap(mut self, wrap: WrapMode) -> Self {
        self.wrap = wrap;
        self
    }

    /// The traversal category.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// The difference-support flag.
    #[must_use]
    pub const fn difference(&self) -> CanDifference {
        self.difference
    }

    /// The comparability flag.
    #[must_use]
    pub const fn comparable(&self) -> CanCompare {
        self.comparable
    }

    /// The reference mode.
    #[must_use]
    pub const fn ref_mode(&self) -> RefMode {
        self.ref_mode
    }

    /// The wrapping-protocol mode.
    #[must_use]
    pub const fn wrap(&self) -> WrapMode {
        self.wrap
    }

    /// The exact set of operations this profile grants.
    #[must_use]
    pub fn ops(&self) -> IterOps {
        let cat = self.category;
        let mut ops = IterOps::ADVANCE | IterOps::EQ_SENTINEL;
        if cat.is_at_least(Category::Input) {
            ops |= IterOps::READ | IterOps::ITER_MOVE | IterOps::ITER_SWAP;
        }
        if cat == Category::Output {
            ops |= IterOps::ADVANCE_WRITE;
        }
        if cat.is_at_least(Category::Forward) {
            ops |= IterOps::ADVANCE_COPY;
        }
        if cat.is_at_least(Category::Bidirectional) {
            ops |= IterOps::RETREAT;
        }
        if cat.is_at_least(Category::RandomAccess) {
            ops |= IterOps::ORDER | IterOps::SEEK | IterOps::INDEX | IterOps::DIFF_SELF;
        }
        if cat.is_at_least(Category::Contiguous) {
            ops |= IterOps::AS_PTR;
        }
        if self.comparable.is_yes() {
            ops |= IterOps::EQ_SELF | IterOps::FORK;
            if self.difference.is_yes() {
                ops |= IterOps::DIFF_SELF;
            }
        }
        if self.difference.is_yes() {
            ops |= IterOps::DIFF_SENTINEL;
        }
        if self.wrap.is_wrapped() {
            ops |= IterOps::UNWRAP_MOVE | IterOps::SEEK_TO;
            if self.comparable.is_yes() {
                ops |= IterOps::UNWRAP_REF;
            }
        }
        ops
    }

    /// Returns `true` if every operation in `ops` is granted.
    #[must_use]
    pub fn supports(&self, ops: IterOps) -> bool {
        self.ops().contains(ops)
    }

    /// Panics unless `op` is granted, naming the operation and the profile.
    #[track_caller]
    pub(crate) fn require(&self, op: IterOps, name: &str) {
        assert!(
            self.supports(op),
            "operation `{name}` is not supported by profile: {self}"
        );
    }
}

impl fmt::Display for IterProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} iterator (difference: {}, comparable: {}, ref: {}, wrap: {})",
            self.category, self.difference, self.comparable, self.ref_mode, self.wrap
        )
    }
}

/// The validated capability configuration of a range fixture.
///
/// Carries the element iterator's flags plus the range-only flags
/// ([`Sizedness`], [`CommonEnd`], [`CanView`], [`Copyability`]).
/// [`iter_profile`](Self::iter_profile) derives the profile of the
/// iterators the range hands out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeProfile {
    category: Category,
    sizedness: Sizedness,
    difference: CanDifference,
    common: CommonEnd,
    comparable: CanCompare,
    ref_mode: RefMode,
    view: CanView,
    copyability: Copyability,
}

impl RangeProfile {
    /// Creates the default profile for a category: unsized, non-common,
    /// not a view, immobile, with the iterator defaults of
    /// [`IterProfile::new`].
    #[must_use]
    pub fn new(category: Category) -> Self {
        let iter = IterProfile::new(category);
        Self {
            category,
            sizedness: Sizedness::Unsized,
            difference: iter.difference(),
            common: CommonEnd::No,
            comparable: iter.comparable(),
            ref_mode: iter.ref_mode(),
            view: CanView::No,
            copyability: Copyability::Immobile,
        }
    }

    /// Creates a profile from explicit flags, validating the cross-flag
    /// invariants.
    ///
    /// # Errors
    ///
    /// Returns a [`ProfileError`] naming the violated invariant.
    #[expect(clippy::too_many_arguments, reason = "one argument per orthogonal flag")]
    pub fn build(
        category: Category,
        sizedness: Sizedness,
        difference: CanDifference,
        common: CommonEnd,
        comparable: CanCompare,
        ref_mode: RefMode,
        view: CanView,
        copyability: Copyability,
    ) -> Result<Self, ProfileError> {
        if common.is_yes() && comparable.is_no() {
            return Err(ProfileError::CommonRequiresComparable);
        }
        if view.is_yes() && copyability.is_immobile() {
            return Err(ProfileError::ViewRequiresMobility);
        }
        // Delegate the iterator-level invariants.
        let _ = IterProfile::build(category, difference, comparable, ref_mode, WrapMode::Wrapped)?;
        Ok(Self {
            category,
            sizedness,
            difference,
            common,
            comparable,
            ref_mode,
            view,
            copyability,
        })
    }

    /// Replaces the sizedness flag.
    #[must_use]
    pub fn with_sizedness(mut self, sizedness: Sizedness) -> Self {
        self.sizedness = sizedness;
        self
    }

    /// Replaces the difference flag.
    #[must_use]
    pub fn with_difference(mut self, difference: CanDifference) -> Self {
        self.difference = difference;
        self
    }

    /// Makes the range common, also turning on comparability (a common end
    /// is an iterator and must be comparable).
    #[must_use]
    pub fn with_common_end(mut self) -> Self {
        self.common = CommonEnd::Yes;
        self.comparable = CanCompare::Yes;
        self
    }

    /// Replaces the comparability flag.
    ///
    /// # Panics
    ///
    /// Panics if the resulting combination is invalid (at-least-forward or
    /// common ranges must stay comparable).
    #[must_use]
    #[track_caller]
    pub fn with_comparable(self, comparable: CanCompare) -> Self {
        self.rebuild_with(|p| p.comparable = comparable)
    }

    /// Replaces the reference mode.
    ///
    /// # Panics
    ///
    /// Panics if the category is at least contiguous and `ref_mode` is not
    /// [`RefMode::Native`].
    #[must_use]
    #[track_caller]
    pub fn with_ref_mode(self, ref_mode: RefMode) -> Self {
        self.rebuild_with(|p| p.ref_mode = ref_mode)
    }

    /// Marks the range as a view with the given copy policy.
    ///
    /// # Panics
    ///
    /// Panics if `copyability` is [`Copyability::Immobile`].
    #[must_use]
    #[track_caller]
    pub fn as_view(self, copyability: Copyability) -> Self {
        self.rebuild_with(|p| {
            p.view = CanView::Yes;
            p.copyability = copyability;
        })
    }

    /// Replaces the copy policy.
    ///
    /// # Panics
    ///
    /// Panics if the range is a view and `copyability` is
    /// [`Copyability::Immobile`].
    #[must_use]
    #[track_caller]
    pub fn with_copyability(self, copyability: Copyability) -> Self {
        self.rebuild_with(|p| p.copyability = copyability)
    }

    #[track_caller]
    fn rebuild_with(self, edit: impl FnOnce(&mut Self)) -> Self {
        let mut draft = self;
        edit(&mut draft);
        match Self::build(
            draft.category,
            draft.sizedness,
            draft.difference,
            draft.common,
            draft.comparable,
            draft.ref_mode,
            draft.view,
            draft.copyability,
        ) {
            Ok(profile) => profile,
            Err(err) => panic!("invalid range profile: {err}"),
        }
    }

    /// The element traversal category.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// The sizedness flag.
    #[must_use]
    pub const fn sizedness(&self) -> Sizedness {
        self.sizedness
    }

    /// The difference-support flag.
    #[must_use]
    pub const fn difference(&self) -> CanDifference {
        self.difference
    }

    /// The common-end flag.
    #[must_use]
    pub const fn common(&self) -> CommonEnd {
        self.common
    }

    /// The comparability flag.
    #[must_use]
    pub const fn comparable(&self) -> CanCompare {
        self.comparable
    }

    /// The reference mode.
    #[must_use]
    pub const fn ref_mode(&self) -> RefMode {
        self.ref_mode
    }

    /// The view flag.
    #[must_use]
    pub const fn view(&self) -> CanView {
        self.view
    }

    /// The copy policy.
    #[must_use]
    pub const fn copyability(&self) -> Copyability {
        self.copyability
    }

    /// The profile of the iterators this range hands out (always
    /// protocol-wrapped).
    #[must_use]
    pub fn iter_profile(&self) -> IterProfile {
        IterProfile::new(self.category)
            .with_difference(self.difference)
            .with_comparable(self.comparable)
            .with_ref_mode(self.ref_mode)
            .with_wrap(WrapMode::Wrapped)
    }

    /// The exact set of range operations this profile grants beyond
    /// `begin`/`end`.
    #[must_use]
    pub fn ops(&self) -> RangeOps {
        let mut ops = RangeOps::empty();
        if self.sizedness.is_sized() {
            ops |= RangeOps::SIZE;
        }
        if self.category.is_at_least(Category::Contiguous) {
            ops |= RangeOps::DATA;
        }
        if self.common.is_yes() {
            ops |= RangeOps::COMMON_END;
        }
        match self.copyability {
            Copyability::Immobile => {}
            Copyability::MoveOnly => ops |= RangeOps::TAKE,
            Copyability::Copyable => ops |= RangeOps::FORK | RangeOps::TAKE,
        }
        ops
    }

    /// Returns `true` if every operation in `ops` is granted.
    #[must_use]
    pub fn supports(&self, ops: RangeOps) -> bool {
        self.ops().contains(ops)
    }

    /// Panics unless `op` is granted, naming the operation and the profile.
    #[track_caller]
    pub(crate) fn require(&self, op: RangeOps, name: &str) {
        assert!(
            self.supports(op),
            "operation `{name}` is not supported by profile: {self}"
        );
    }
}

impl fmt::Display for RangeProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} range ({}, difference: {}, common: {}, comparable: {}, ref: {}, view: {}, {})",
            self.category,
            self.sizedness,
            self.difference,
            self.common,
            self.comparable,
            self.ref_mode,
            self.view,
            self.copyability
        )
    }
}
