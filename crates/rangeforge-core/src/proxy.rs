//! Write-through proxy references.
//!
//! Proxy-mode fixtures dereference to a [`ProxyRef`] instead of a place: a
//! small copyable token that forwards reads and writes to the underlying
//! element. Algorithms that quietly assume `*it` yields a real reference
//! (taking its address, holding it across a mutation) fail against proxies,
//! which is exactly what a proxy-mode profile is for.

use std::fmt;

use crate::boolish::Boolish;
use crate::capability::Category;
use crate::span::ElemSpan;

/// A reference-like token for one element of a fixture.
///
/// Reading through the proxy ([`read`](Self::read)) is gated on the owning
/// fixture's category: write-only output fixtures hand out proxies that can
/// be written but panic on read. Proxy-to-proxy assignment
/// ([`assign_from`](Self::assign_from)) reads the source element directly,
/// bypassing the source's gate, because assignment between proxies is part
/// of the fixture plumbing rather than the algorithm surface under test.
///
/// Comparisons return [`Boolish`] and work across element types.
pub struct ProxyRef<'a, T> {
    span: ElemSpan<'a, T>,
    index: usize,
    category: Category,
}

impl<'a, T> ProxyRef<'a, T> {
    pub(crate) const fn new(span: ElemSpan<'a, T>, index: usize, category: Category) -> Self {
        Self {
            span,
            index,
            category,
        }
    }

    /// The position this proxy refers to.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Stores `value` in the referenced element.
    ///
    /// # Panics
    ///
    /// Panics if the underlying storage is read-only.
    #[track_caller]
    pub fn write(&self, value: T) {
        self.span.set(self.index, value);
    }
}

impl<T: Copy> ProxyRef<'_, T> {
    /// Reads the referenced element.
    ///
    /// # Panics
    ///
    /// Panics if the owning fixture is write-only (an output category).
    #[must_use]
    #[track_caller]
    pub fn read(&self) -> T {
        assert!(
            self.category.is_at_least(Category::Input),
            "read through a proxy of a write-only {} fixture",
            self.category
        );
        self.span.get(self.index)
    }

    /// Reads the referenced element without the category gate.
    ///
    /// Test assertions use this to inspect what an algorithm wrote through
    /// a write-only fixture.
    #[must_use]
    pub fn peek(&self) -> T {
        self.span.get(self.index)
    }

    /// Stores the element referenced by `source` into the element
    /// referenced by `self`, converting between element types and
    /// bypassing `source`'s category gate.
    ///
    /// # Panics
    ///
    /// Panics if this proxy's storage is read-only.
    #[track_caller]
    pub fn assign_from<U: Copy>(&self, source: &ProxyRef<'_, U>)
    where
        T: From<U>,
    {
        self.span.set(self.index, T::from(source.peek()));
    }

    /// Equality against another proxy's element.
    #[must_use]
    pub fn cmp_eq<U: Copy>(&self, other: &ProxyRef<'_, U>) -> Boolish
    where
        T: PartialEq<U>,
    {
        Boolish::new(self.peek() == other.peek())
    }

    /// Inequality against another proxy's element.
    #[must_use]
    pub fn cmp_ne<U: Copy>(&self, other: &ProxyRef<'_, U>) -> Boolish
    where
        T: PartialEq<U>,
    {
        !self.cmp_eq(other)
    }

    /// Less-than against another proxy's element.
    #[must_use]
    pub fn cmp_lt<U: Copy>(&self, other: &ProxyRef<'_, U>) -> Boolish
    where
        T: PartialOrd<U>,
    {
        Boolish::new(self.peek() < other.peek())
    }

    /// Less-or-equal against another proxy's element.
    #[must_use]
    pub fn cmp_le<U: Copy>(&self, other: &ProxyRef<'_, U>) -> Boolish
    where
        T: PartialOrd<U>,
    {
        Boolish::new(self.peek() <= other.peek())
    }

    /// Greater-than against another proxy's element.
    #[must_use]
    pub fn cmp_gt<U: Copy>(&self, other: &ProxyRef<'_, U>) -> Boolish
    where
        T: PartialOrd<U>,
    {
        Boolish::new(self.peek() > other.peek())
    }

    /// Greater-or-equal against another proxy's element.
    #[must_use]
    pub fn cmp_ge<U: Copy>(&self, other: &ProxyRef<'_, U>) -> Boolish
    where
        T: PartialOrd<U>,
    {
        Boolish::new(self.peek() >= other.peek())
    }

    /// Equality against a plain value.
    #[must_use]
    pub fn cmp_eq_value<U>(&self, other: &U) -> Boolish
    where
        T: PartialEq<U>,
    {
        Boolish::new(self.peek() == *other)
    }

    /// Less-than against a plain value.
    #[must_use]
    pub fn cmp_lt_value<U>(&self, other: &U) -> Boolish
    where
        T: PartialOrd<U>,
    {
        Boolish::new(self.peek() < *other)
    }
}

impl<T> Clone for ProxyRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ProxyRef<'_, T> {}

impl<T> fmt::Debug for ProxyRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyRef")
            .field("index", &self.index)
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}
