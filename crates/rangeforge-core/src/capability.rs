//! The capability vocabulary for synthesized fixtures.
//!
//! Instead of encoding capabilities in the type system, fixtures carry a
//! small closed set of orthogonal capability enums as explicit
//! configuration, validated at construction (see
//! [`IterProfile`](crate::IterProfile) and
//! [`RangeProfile`](crate::RangeProfile)). This module defines the
//! vocabulary itself:
//!
//! - [`Category`] — traversal strength, a total order
//! - [`CanDifference`] / [`CanCompare`] — the two independent boolean flags
//! - [`RefMode`] — how dereference presents an element
//! - [`WrapMode`] — participation in the internal unwrapping protocol
//! - [`Sizedness`], [`CommonEnd`], [`CanView`], [`Copyability`] — range-only
//!   flags

/// Traversal strength of an iterator or range, ordered weakest to strongest.
///
/// Higher categories are supersets of lower categories' guarantees: a
/// bidirectional fixture can do everything a forward fixture can, and so on.
/// Categories below [`Forward`](Category::Forward) are *single-pass*: only
/// one live iterator over a given range may exist at a time.
///
/// # Examples
///
/// ```
/// use rangeforge_core::Category;
///
/// assert!(Category::RandomAccess.is_at_least(Category::Forward));
/// assert!(!Category::Input.is_at_least(Category::Forward));
/// assert!(Category::Output.is_single_pass());
/// assert!(!Category::Forward.is_single_pass());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    derive_more::Display,
    derive_more::IsVariant,
)]
pub enum Category {
    /// Write-only, single-pass.
    #[display("output")]
    Output,
    /// Read, single-pass.
    #[display("input")]
    Input,
    /// Multi-pass; iterators are copyable and comparable.
    #[display("forward")]
    Forward,
    /// Forward plus reverse traversal.
    #[display("bidirectional")]
    Bidirectional,
    /// Constant-time seeks, indexing, ordering, and distances.
    #[display("random-access")]
    RandomAccess,
    /// Random access over physically contiguous elements.
    #[display("contiguous")]
    Contiguous,
}

impl Category {
    /// All categories, weakest first.
    pub const ALL: [Self; 6] = [
        Self::Output,
        Self::Input,
        Self::Forward,
        Self::Bidirectional,
        Self::RandomAccess,
        Self::Contiguous,
    ];

    /// Returns `true` if `self` grants at least `other`'s guarantees.
    #[must_use]
    pub const fn is_at_least(self, other: Self) -> bool {
        self as u8 >= other as u8
    }

    /// Returns `true` for categories below [`Forward`](Self::Forward), whose
    /// iterators may not be copied and whose ranges may be consumed only
    /// once.
    #[must_use]
    pub const fn is_single_pass(self) -> bool {
        !self.is_at_least(Self::Forward)
    }
}

/// Whether iterator/sentinel subtraction is supported.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    derive_more::Display,
    derive_more::IsVariant,
)]
pub enum CanDifference {
    /// Distances are unavailable (unless the category is at least
    /// random-access, which always grants them).
    #[display("no")]
    No,
    /// Iterator − iterator and iterator − sentinel distances are available.
    #[display("yes")]
    Yes,
}

/// Whether an iterator can be compared for equality with another iterator of
/// the same range (and therefore copied — multi-pass).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    derive_more::Display,
    derive_more::IsVariant,
)]
pub enum CanCompare {
    /// Single-pass: no self-equality, iterators are move-only.
    #[display("no")]
    No,
    /// Multi-pass: self-equality and copying are available.
    #[display("yes")]
    Yes,
}

/// How dereferencing a fixture iterator presents the element.
///
/// Catalogs enumerate only [`Native`](RefMode::Native) and
/// [`Proxy`](RefMode::Proxy); the other two modes exist for handwritten
/// profiles.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    derive_more::Display,
    derive_more::IsVariant,
)]
pub enum RefMode {
    /// Plain element access.
    #[display("native")]
    Native,
    /// Element access that models move-out references.
    #[display("native-move")]
    NativeMove,
    /// Dereference yields a fresh value (a copy), never a place.
    #[display("value")]
    Value,
    /// Dereference yields a [`ProxyRef`](crate::ProxyRef) that forwards
    /// reads and writes instead of aliasing the element.
    #[display("proxy")]
    Proxy,
}

/// Participation in the internal unwrapping protocol.
///
/// Optimized algorithm paths may strip a validation wrapper from an iterator
/// for a fast inner loop, then re-synchronize. A fixture either participates
/// ([`Wrapped`](WrapMode::Wrapped)), is itself the stripped twin
/// ([`Unwrapped`](WrapMode::Unwrapped)), or is ignorant of the protocol
/// entirely ([`Ignorant`](WrapMode::Ignorant)).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    derive_more::Display,
    derive_more::IsVariant,
)]
pub enum WrapMode {
    /// Participates in the protocol; exposes an unwrapped twin.
    #[display("wrapped")]
    Wrapped,
    /// The stripped twin produced by unwrapping.
    #[display("unwrapped")]
    Unwrapped,
    /// Does not participate; the protocol does not apply.
    #[display("ignorant")]
    Ignorant,
}

impl WrapMode {
    /// The compatibility relation for cross-comparing iterators and
    /// sentinels.
    ///
    /// Identical modes are compatible, and a protocol-ignorant operand is
    /// compatible with a wrapped one in either order. This models internal
    /// library code that strips a wrapper from one side but not the other
    /// and still expects correct comparisons; an
    /// [`Unwrapped`](Self::Unwrapped) twin compared against a
    /// [`Wrapped`](Self::Wrapped) original is a bug and is rejected.
    #[must_use]
    pub const fn is_compatible_with(self, other: Self) -> bool {
        matches!(
            (self, other),
            (Self::Wrapped, Self::Wrapped)
                | (Self::Unwrapped, Self::Unwrapped)
                | (Self::Ignorant, Self::Ignorant)
                | (Self::Wrapped, Self::Ignorant)
                | (Self::Ignorant, Self::Wrapped)
        )
    }
}

/// Whether a range exposes a `size` operation.
///
/// Note this is "implements member size", not "is sized in principle" — a
/// random-access common range can compute its size from its iterators even
/// when [`Unsized`](Sizedness::Unsized).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    derive_more::Display,
    derive_more::IsVariant,
)]
pub enum Sizedness {
    /// No `size` operation.
    #[display("unsized")]
    Unsized,
    /// `size` is available.
    #[display("sized")]
    Sized,
}

/// Whether a range's end is an iterator (common) or a sentinel.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    derive_more::Display,
    derive_more::IsVariant,
)]
pub enum CommonEnd {
    /// `end` is a sentinel of a distinct type.
    #[display("no")]
    No,
    /// `end` is an iterator at the one-past-end position; implies
    /// [`CanCompare::Yes`].
    #[display("yes")]
    Yes,
}

/// Whether a range should behave as a view (cheaply movable handle).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    derive_more::Display,
    derive_more::IsVariant,
)]
pub enum CanView {
    /// Not a view.
    #[display("no")]
    No,
    /// A view; implies the range cannot be [`Copyability::Immobile`].
    #[display("yes")]
    Yes,
}

/// Copy/move policy of a range fixture.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    derive_more::Display,
    derive_more::IsVariant,
)]
pub enum Copyability {
    /// Neither copy nor move: relocation is irrelevant to the test.
    #[display("immobile")]
    Immobile,
    /// Move transfers the view and marks the source moved-from.
    #[display("move-only")]
    MoveOnly,
    /// Full copy semantics, plus move with source invalidation.
    #[display("copyable")]
    Copyable,
}
