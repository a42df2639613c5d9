//! Multi-valued sorted tree.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::iter::IntoIter;
use super::raw::{RawTree, Structure};
use crate::compare::{Compare, NaturalOrder};
use crate::engine::Iter;
use crate::error::TreeError;

/// A sorted collection that keeps every inserted element, duplicates
/// included.
///
/// Elements that compare equal are kept in insertion order. Lookups,
/// insertion and removal take O(log n); stepping an iterator is O(1).
///
/// # Examples
///
/// ```rust
/// use threadtree::containers::SortedTree;
///
/// let mut tree = SortedTree::new();
/// for value in [5, 3, 8, 3] {
///     tree.insert(value);
/// }
/// assert_eq!(tree.len(), 4);
/// assert_eq!(tree.count(&3), 2);
///
/// let values: Vec<i32> = tree.iter().copied().collect();
/// assert_eq!(values, vec![3, 3, 5, 8]);
/// ```
pub struct SortedTree<T, C = NaturalOrder> {
    raw: RawTree<T, C>,
}

impl<T> SortedTree<T> {
    /// Creates an empty tree ordered by [`Ord`].
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }

    /// Creates an empty tree ordered by [`Ord`], with room for `capacity`
    /// elements.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, NaturalOrder)
    }
}

impl<T, C> SortedTree<T, C> {
    /// Creates an empty tree ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use threadtree::compare::CompareFn;
    /// use threadtree::containers::SortedTree;
    ///
    /// let mut tree = SortedTree::with_comparator(CompareFn(|left: &i32, right: &i32| right.cmp(left)));
    /// tree.extend([1, 3, 2]);
    /// assert_eq!(tree.first(), Some(&3));
    /// ```
    #[inline]
    #[must_use]
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            raw: RawTree::new(comparator),
        }
    }

    /// Creates an empty tree ordered by `comparator`, with room for
    /// `capacity` elements.
    #[inline]
    #[must_use]
    pub fn with_capacity_and_comparator(capacity: usize, comparator: C) -> Self {
        Self {
            raw: RawTree::with_capacity(capacity, comparator),
        }
    }

    /// Returns the number of elements.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree holds no element.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the comparator.
    #[inline]
    #[must_use]
    pub const fn comparator(&self) -> &C {
        self.raw.comparator()
    }

    /// Returns an in-order iterator over the elements.
    ///
    /// # Complexity
    ///
    /// O(1) to create, O(1) per step.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        self.raw.iter()
    }

    /// Returns the smallest element.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.raw.first()
    }

    /// Returns the largest element.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.raw.last()
    }

    /// Removes and returns the smallest element.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn pop_first(&mut self) -> Option<T> {
        self.raw.pop_first()
    }

    /// Removes and returns the largest element.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn pop_last(&mut self) -> Option<T> {
        self.raw.pop_last()
    }

    /// Removes every element.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the number of levels of the underlying tree.
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Returns a [`Display`](fmt::Display) adapter that renders the shape
    /// of the tree.
    ///
    /// # Complexity
    ///
    /// O(n) when rendered.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use threadtree::containers::SortedTree;
    ///
    /// let tree: SortedTree<i32> = [5, 3, 8].into_iter().collect();
    /// assert_eq!(tree.structure().to_string(), "{\n|>5\n| |>3\n| |>8\n}");
    /// ```
    #[must_use]
    pub fn structure(&self) -> Structure<'_, T> {
        self.raw.structure()
    }

    /// Returns an element equal to `key`.
    ///
    /// With duplicates, the element returned is the first equal one met on
    /// the way down from the root.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        self.raw.get(key)
    }

    /// Returns `true` if an element equal to `key` exists.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        self.raw.get(key).is_some()
    }

    /// Returns the number of elements equal to `key`.
    ///
    /// # Complexity
    ///
    /// O(log n + k) where k is the number of equal elements.
    #[must_use]
    pub fn count<Q>(&self, key: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        self.raw.count(key)
    }

    /// Returns the first element sorting strictly after `key`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn upper_bound<Q>(&self, key: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        self.raw.upper_bound(key)
    }

    /// Removes one element equal to `key` and returns it.
    ///
    /// The element removed is the one [`get`](Self::get) returns.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::KeyNotFound`] if no element equals `key`.
    pub fn remove<Q>(&mut self, key: &Q) -> Result<T, TreeError>
    where
        T: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        self.raw.remove(key).ok_or(TreeError::KeyNotFound)
    }

    /// Removes one element equal to `key` if there is one.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn discard<Q>(&mut self, key: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized,
        C: Compare<Q>,
    {
        self.raw.remove(key)
    }
}

impl<T, C: Compare<T>> SortedTree<T, C> {
    /// Inserts `value` after every element equal to it.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, value: T) {
        self.raw.insert_multi(value);
    }

    /// Checks every structural invariant and the recorded length.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidOrdering`] when the comparator is not
    /// consistent with the stored order, [`TreeError::SizeMismatch`] or
    /// [`TreeError::Invariant`] for a corrupted tree.
    pub fn validate(&self) -> Result<(), TreeError> {
        self.raw.validate()
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T, C: Default> Default for SortedTree<T, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T: Clone, C: Clone> Clone for SortedTree<T, C> {
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
        }
    }

    /// Reuses the nodes already allocated by `self`.
    fn clone_from(&mut self, source: &Self) {
        self.raw.clone_from(&source.raw);
    }
}

impl<T, C: Compare<T>> Extend<T> for SortedTree<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T: Copy + 'a, C: Compare<T>> Extend<&'a T> for SortedTree<T, C> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T, C: Compare<T> + Default> FromIterator<T> for SortedTree<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::default();
        tree.extend(iter);
        tree
    }
}

impl<T, C> IntoIterator for SortedTree<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let (arena, root, len) = self.raw.into_parts();
        IntoIter::new(arena, root, len)
    }
}

impl<'a, T, C> IntoIterator for &'a SortedTree<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Trees are equal when they hold equal elements in the same order.
/// Comparators are not compared.
impl<T: PartialEq, C> PartialEq for SortedTree<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, C> Eq for SortedTree<T, C> {}

impl<T: Hash, C> Hash for SortedTree<T, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for value in self {
            value.hash(state);
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for SortedTree<T, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display, C> fmt::Display for SortedTree<T, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        for (index, value) in self.iter().enumerate() {
            if index > 0 {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{value}")?;
        }
        write!(formatter, "}}")
    }
}

static_assertions::assert_impl_all!(SortedTree<i32>: Send, Sync, Clone);
static_assertions::assert_not_impl_any!(SortedTree<std::rc::Rc<i32>>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_count_walks_both_ways() {
        let tree: SortedTree<i32> = [2, 1, 2, 3, 2, 2, 0].into_iter().collect();
        assert_eq!(tree.count(&2), 4);
        assert_eq!(tree.count(&0), 1);
        assert_eq!(tree.count(&9), 0);
    }

    #[rstest]
    fn test_remove_reports_missing_key() {
        let mut tree: SortedTree<i32> = [1, 2].into_iter().collect();
        assert_eq!(tree.remove(&3), Err(TreeError::KeyNotFound));
        assert_eq!(tree.remove(&2), Ok(2));
        assert_eq!(tree.discard(&2), None);
        assert_eq!(tree.len(), 1);
    }

    #[rstest]
    fn test_structure_of_empty_tree() {
        let tree: SortedTree<i32> = SortedTree::new();
        assert_eq!(tree.structure().to_string(), "{\n}");
    }
}
