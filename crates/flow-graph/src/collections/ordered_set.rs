//! Insertion-ordered set built on [`OrderedMap`].

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use super::OrderedMap;

/// A set of unique elements that iterates in insertion order.
///
/// Every newly added element is tagged with the next value of a synthetic
/// index owned by this instance and stored in an [`OrderedMap`] keyed by that
/// index. A reverse index maps each element back to its slot so membership
/// checks are O(1). Adding an element that is already present never moves
/// it.
#[derive(Debug, Clone)]
pub struct OrderedSet<T> {
    /// Next synthetic index to hand out.
    next_index: u64,
    /// Reverse index: element to synthetic index.
    index: HashMap<T, u64>,
    /// Elements keyed by synthetic index, in insertion order.
    store: OrderedMap<u64, T>,
}

impl<T> OrderedSet<T> {
    /// Creates a new empty set.
    pub fn new() -> Self {
        Self {
            next_index: 0,
            index: HashMap::new(),
            store: OrderedMap::new(),
        }
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns whether the set has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

impl<T> OrderedSet<T>
where
    T: Eq + Hash + Clone,
{
    /// Inserts a single element.
    ///
    /// Returns `false` if the element was already present.
    pub fn insert(&mut self, item: T) -> bool {
        if self.index.contains_key(&item) {
            return false;
        }

        let slot = self.next_index;
        self.next_index += 1;
        self.store.put(slot, item.clone());
        self.index.insert(item, slot);
        true
    }

    /// Adds every element that is not already present.
    ///
    /// Returns the number of elements actually added.
    pub fn add<I>(&mut self, items: I) -> usize
    where
        I: IntoIterator<Item = T>,
    {
        items
            .into_iter()
            .map(|item| self.insert(item))
            .filter(|added| *added)
            .count()
    }

    /// Removes a single element.
    ///
    /// Returns `false` if the element was not present.
    pub fn remove_one(&mut self, item: &T) -> bool {
        let Some(slot) = self.index.remove(item) else {
            return false;
        };

        self.store.remove(&slot);
        true
    }

    /// Removes every given element that is present; absent ones are ignored.
    ///
    /// Returns the number of elements actually removed.
    pub fn remove<'a, I>(&mut self, items: I) -> usize
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        items
            .into_iter()
            .map(|item| self.remove_one(item))
            .filter(|removed| *removed)
            .count()
    }

    /// Returns whether `item` is a member.
    pub fn contains(&self, item: &T) -> bool {
        self.index.contains_key(item)
    }

    /// Returns whether **all** given elements are members.
    ///
    /// An empty input yields `true`.
    pub fn contains_all<'a, I>(&self, items: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        items.into_iter().all(|item| self.index.contains_key(item))
    }

    /// Returns a snapshot of the elements in insertion order.
    pub fn values(&self) -> Vec<T> {
        self.store.values()
    }

    /// Iterates over the elements in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.store.iter_values()
    }

    /// Removes every element.
    ///
    /// The synthetic index keeps counting so slots are never reused.
    pub fn clear(&mut self) {
        self.index.clear();
        self.store.clear();
    }
}

impl<T> Default for OrderedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PartialEq for OrderedSet<T>
where
    T: Eq + Hash + Clone,
{
    /// Two sets are equal when they hold the same elements in the same order.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T> Eq for OrderedSet<T> where T: Eq + Hash + Clone {}

impl<T> FromIterator<T> for OrderedSet<T>
where
    T: Eq + Hash + Clone,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.add(iter);
        set
    }
}

impl<T> Extend<T> for OrderedSet<T>
where
    T: Eq + Hash + Clone,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.add(iter);
    }
}

impl<T> fmt::Display for OrderedSet<T>
where
    T: Eq + Hash + Clone + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{item}")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_skips_duplicates_and_keeps_position() {
        let mut set = OrderedSet::new();
        assert_eq!(set.add(["c", "a", "b"]), 3);
        assert_eq!(set.add(["a", "d", "c"]), 1);

        assert_eq!(set.values(), vec!["c", "a", "b", "d"]);
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn test_remove_ignores_absent_elements() {
        let mut set: OrderedSet<u32> = [1, 2, 3, 4].into_iter().collect();

        // An absent element in the middle must not stop later removals.
        assert_eq!(set.remove(&[9, 2, 4]), 2);
        assert_eq!(set.values(), vec![1, 3]);
        assert!(!set.contains(&2));
        assert!(!set.contains(&4));
    }

    #[test]
    fn test_contains_all_is_logical_and() {
        let set: OrderedSet<_> = ["x", "y"].into_iter().collect();

        assert!(set.contains_all(&["x", "y"]));
        assert!(!set.contains_all(&["x", "z"]));
        assert!(set.contains_all(std::iter::empty()));
    }

    #[test]
    fn test_membership_tracks_add_remove_sequence() {
        let mut set = OrderedSet::new();
        let ops: [(bool, u8); 8] = [
            (true, 1),
            (true, 2),
            (false, 1),
            (true, 1),
            (true, 2),
            (false, 3),
            (true, 3),
            (false, 2),
        ];

        let mut expected: Vec<u8> = Vec::new();
        for (is_add, value) in ops {
            if is_add {
                set.insert(value);
                if !expected.contains(&value) {
                    expected.push(value);
                }
            } else {
                set.remove_one(&value);
                expected.retain(|v| *v != value);
            }

            assert_eq!(set.values(), expected);
            for probe in 1..=3 {
                assert_eq!(set.contains(&probe), expected.contains(&probe));
            }
        }
    }

    #[test]
    fn test_readded_element_goes_to_end() {
        let mut set: OrderedSet<_> = ['a', 'b', 'c'].into_iter().collect();
        set.remove_one(&'a');
        set.insert('a');

        assert_eq!(set.values(), vec!['b', 'c', 'a']);
    }

    #[test]
    fn test_synthetic_index_is_per_instance() {
        let mut first = OrderedSet::new();
        let mut second = OrderedSet::new();
        first.add([10, 20, 30]);
        second.insert(99);

        assert_eq!(first.next_index, 3);
        assert_eq!(second.next_index, 1);
    }

    #[test]
    fn test_clear_and_empty() {
        let mut set: OrderedSet<_> = [1, 2].into_iter().collect();
        assert!(!set.is_empty());

        set.clear();
        assert!(set.is_empty());
        assert!(!set.contains(&1));

        set.insert(1);
        assert_eq!(set.values(), vec![1]);
    }

    #[test]
    fn test_equality_respects_order() {
        let a: OrderedSet<_> = [1, 2].into_iter().collect();
        let b: OrderedSet<_> = [1, 2].into_iter().collect();
        let c: OrderedSet<_> = [2, 1].into_iter().collect();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_display() {
        let set: OrderedSet<_> = [3, 1, 2].into_iter().collect();
        assert_eq!(set.to_string(), "[3 1 2]");
    }
}
