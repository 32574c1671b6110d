//! A tri-state-safe comparison result.
//!
//! Every comparison operator synthesized by this crate returns [`Boolish`]
//! rather than `bool`, so a test can tell apart "this algorithm produced a
//! real `bool`" from "this algorithm reused a comparison result that merely
//! converts to `bool`". Conversion to `bool` is explicit.

use std::ops::Not;

/// The result of a synthesized comparison.
///
/// Wraps one boolean. Supports logical negation and explicit conversion to
/// `bool`; it deliberately does not implement ordering or arithmetic, so a
/// comparison result cannot silently flow where a real `bool` is required.
///
/// # Examples
///
/// ```
/// use rangeforge_core::Boolish;
///
/// let cmp = Boolish::new(true);
/// assert!(bool::from(cmp));
/// assert!(!bool::from(!cmp));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::From)]
pub struct Boolish {
    value: bool,
}

impl Boolish {
    /// Creates a comparison result from a raw boolean.
    #[must_use]
    pub const fn new(value: bool) -> Self {
        Self { value }
    }

    /// Returns the wrapped boolean.
    #[must_use]
    pub const fn is_true(self) -> bool {
        self.value
    }
}

impl Not for Boolish {
    type Output = Self;

    fn not(self) -> Self {
        Self { value: !self.value }
    }
}

impl From<Boolish> for bool {
    fn from(b: Boolish) -> Self {
        b.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negation_and_conversion() {
        let t = Boolish::new(true);
        let f = Boolish::new(false);

        assert!(t.is_true());
        assert!(!f.is_true());
        assert_eq!(!t, f);
        assert_eq!(!!t, t);

        assert!(bool::from(t));
        assert!(!bool::from(f));

        // From<bool> round-trip
        assert_eq!(Boolish::from(true), t);
        assert_eq!(Boolish::from(false), f);
    }

    #[test]
    fn test_usable_in_conditions() {
        let cmp = Boolish::new(1 < 2);
        if bool::from(cmp) {
            // expected branch
        } else {
            panic!("comparison result lost its value");
        }
    }
}
