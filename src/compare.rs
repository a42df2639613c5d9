//! Total-order comparison capability consumed by the engine.
//!
//! The engine never compares payloads on its own: every search and every
//! insertion goes through a [`Compare`] value supplied by the caller.
//!
//! # Examples
//!
//! ```rust
//! use std::cmp::Ordering;
//! use threadtree::compare::{Compare, CompareFn, NaturalOrder};
//!
//! assert_eq!(NaturalOrder.compare(&1, &2), Ordering::Less);
//!
//! let reversed = CompareFn(|left: &i32, right: &i32| right.cmp(left));
//! assert!(reversed.less(&2, &1));
//! ```

use std::cmp::Ordering;

/// A three-way comparison over `T`.
///
/// Implementations must describe a total order. The engine neither detects
/// nor recovers from an inconsistent order; the resulting tree stays memory
/// safe, but its ordering is unspecified. `validate` on the containers
/// reports such trees as [`InvalidOrdering`](crate::error::TreeError::InvalidOrdering).
pub trait Compare<T: ?Sized> {
    /// Classifies `left` against `right`.
    fn compare(&self, left: &T, right: &T) -> Ordering;

    /// Returns `true` if `left` sorts strictly before `right`.
    #[inline]
    fn less(&self, left: &T, right: &T) -> bool {
        self.compare(left, right) == Ordering::Less
    }

    /// Returns `true` if `left` sorts strictly after `right`.
    #[inline]
    fn greater(&self, left: &T, right: &T) -> bool {
        self.compare(left, right) == Ordering::Greater
    }
}

/// The order given by [`Ord`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Compare<T> for NaturalOrder {
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        left.cmp(right)
    }
}

/// Adapts a closure into a [`Compare`].
#[derive(Clone, Copy, Debug, Default)]
pub struct CompareFn<F>(pub F);

impl<T: ?Sized, F> Compare<T> for CompareFn<F>
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        (self.0)(left, right)
    }
}

impl<T: ?Sized, C: Compare<T> + ?Sized> Compare<T> for &C {
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        (**self).compare(left, right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, 2, Ordering::Less)]
    #[case(2, 2, Ordering::Equal)]
    #[case(3, 2, Ordering::Greater)]
    fn test_natural_order(#[case] left: i32, #[case] right: i32, #[case] expected: Ordering) {
        assert_eq!(NaturalOrder.compare(&left, &right), expected);
    }

    #[rstest]
    fn test_natural_order_on_unsized_keys() {
        assert!(NaturalOrder.less("apple", "banana"));
        assert!(NaturalOrder.greater("cherry", "banana"));
    }

    #[rstest]
    fn test_compare_fn_reverses_order() {
        let reversed = CompareFn(|left: &i32, right: &i32| right.cmp(left));
        assert!(reversed.less(&5, &1));
        assert!(reversed.greater(&1, &5));
        assert!(!reversed.less(&3, &3));
    }

    #[rstest]
    fn test_reference_forwards() {
        let order = NaturalOrder;
        let borrowed = &order;
        assert_eq!(Compare::<i32>::compare(&borrowed, &1, &0), Ordering::Greater);
    }
}
