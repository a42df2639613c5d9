//! Sorted set with unique keys.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::iter::IntoIter;
use super::raw::{RawTree, Structure};
use crate::compare::{Compare, NaturalOrder};
use crate::engine::Iter;
use crate::error::TreeError;

/// A sorted collection holding at most one element per key.
///
/// [`insert`](Self::insert) keeps the element already present when the
/// keys are equal; [`replace`](Self::replace) swaps it for the new one.
///
/// # Examples
///
/// ```rust
/// use threadtree::containers::SortedSet;
///
/// let mut set = SortedSet::new();
/// assert!(set.insert(2));
/// assert!(!set.insert(2));
/// assert!(set.insert(1));
/// assert_eq!(set.to_string(), "{1, 2}");
/// ```
pub struct SortedSet<T, C = NaturalOrder> {
    raw: RawTree<T, C>,
}

impl<T> SortedSet<T> {
    /// Creates an empty set ordered by [`Ord`].
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }

    /// Creates an empty set ordered by [`Ord`], with room for `capacity`
    /// elements.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, NaturalOrder)
    }
}

impl<T, C> SortedSet<T, C> {
    /// Creates an empty set ordered by `comparator`.
    #[inline]
    #[must_use]
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            raw: RawTree::new(comparator),
        }
    }

    /// Creates an empty set ordered by `comparator`, with room for
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

    /// Returns `true` if the set holds no element.
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
    #[must_use]
    pub fn structure(&self) -> Structure<'_, T> {
        self.raw.structure()
    }

    /// Returns the element equal to `key`.
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

    /// Removes the element equal to `key` and returns it.
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

    /// Removes the element equal to `key` if there is one.
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

impl<T, C: Compare<T>> SortedSet<T, C> {
    /// Adds `value` unless an equal element is present.
    ///
    /// Returns `false`, dropping `value`, when the key already exists; the
    /// element already stored is kept.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, value: T) -> bool {
        self.raw.insert_unique(value)
    }

    /// Adds `value`, replacing and returning an equal element if present.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// ```rust
    /// use threadtree::containers::SortedSet;
    ///
    /// let mut set = SortedSet::new();
    /// assert_eq!(set.replace("a".to_string()), None);
    /// assert_eq!(set.replace("a".to_string()), Some("a".to_string()));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn replace(&mut self, value: T) -> Option<T> {
        self.raw.insert_replace(value)
    }

    /// Checks every structural invariant and the recorded length.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Errors
    ///
    /// See [`SortedTree::validate`](super::SortedTree::validate).
    pub fn validate(&self) -> Result<(), TreeError> {
        self.raw.validate()
    }
}

impl<T, C: Default> Default for SortedSet<T, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T: Clone, C: Clone> Clone for SortedSet<T, C> {
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.raw.clone_from(&source.raw);
    }
}

impl<T, C: Compare<T>> Extend<T> for SortedSet<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T: Copy + 'a, C: Compare<T>> Extend<&'a T> for SortedSet<T, C> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T, C: Compare<T> + Default> FromIterator<T> for SortedSet<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

impl<T, C> IntoIterator for SortedSet<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let (arena, root, len) = self.raw.into_parts();
        IntoIter::new(arena, root, len)
    }
}

impl<'a, T, C> IntoIterator for &'a SortedSet<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PartialEq, C> PartialEq for SortedSet<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, C> Eq for SortedSet<T, C> {}

impl<T: Hash, C> Hash for SortedSet<T, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for value in self {
            value.hash(state);
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for SortedSet<T, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display, C> fmt::Display for SortedSet<T, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for value in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{value}")?;
        }
        write!(formatter, "}}")
    }
}

static_assertions::assert_impl_all!(SortedSet<String>: Send, Sync, Clone);
static_assertions::assert_not_impl_any!(SortedSet<std::rc::Rc<String>>: Send, Sync);
