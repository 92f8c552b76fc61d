//! Insertion-ordered associative container.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// A map that remembers the order in which keys were first inserted.
///
/// Updating an existing key replaces its value in place and never moves it.
/// Removing a key that is not present is a no-op.
///
/// `OrderedMap` itself is not synchronized; use
/// [`SyncOrderedMap`](super::SyncOrderedMap) when it must be shared between
/// threads.
#[derive(Debug, Clone)]
pub struct OrderedMap<K, V> {
    /// Keys in first-insertion order.
    keys: Vec<K>,
    /// Underlying store of values.
    store: HashMap<K, V>,
}

impl<K, V> OrderedMap<K, V> {
    /// Creates a new empty map.
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            store: HashMap::new(),
        }
    }

    /// Creates a new empty map with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            keys: Vec::with_capacity(capacity),
            store: HashMap::with_capacity(capacity),
        }
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns whether the map has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

impl<K, V> OrderedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Inserts or updates a value.
    ///
    /// The first insertion of a key appends it to the order; later puts of
    /// the same key only replace the value.
    pub fn put(&mut self, key: K, value: V) {
        if !self.store.contains_key(&key) {
            self.keys.push(key.clone());
        }

        self.store.insert(key, value);
    }

    /// Returns the value stored under `key`, if any.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.store.get(key)
    }

    /// Returns a mutable reference to the value stored under `key`, if any.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.store.get_mut(key)
    }

    /// Returns whether `key` is present.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.store.contains_key(key)
    }

    /// Removes `key` and returns its value.
    ///
    /// Returns `None` without touching the map if the key is absent.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let value = self.store.remove(key)?;

        if let Some(position) = self.keys.iter().position(|k| k.borrow() == key) {
            self.keys.remove(position);
        }

        Some(value)
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.keys.clear();
        self.store.clear();
    }

    /// Returns a snapshot of the keys in insertion order.
    pub fn keys(&self) -> Vec<K> {
        self.keys.clone()
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.keys
            .iter()
            .filter_map(move |key| self.store.get(key).map(|value| (key, value)))
    }

    /// Iterates over values in insertion order.
    pub fn iter_values(&self) -> impl Iterator<Item = &V> + '_ {
        self.keys.iter().filter_map(move |key| self.store.get(key))
    }
}

impl<K, V> OrderedMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Returns a snapshot of the values in insertion order.
    pub fn values(&self) -> Vec<V> {
        self.iter_values().cloned().collect()
    }
}

impl<K, V> OrderedMap<K, V>
where
    K: Eq + Hash + Clone,
    V: PartialEq,
{
    /// Returns whether any entry holds a value equal to `value`.
    ///
    /// This is a linear scan.
    pub fn contains_value(&self, value: &V) -> bool {
        self.iter_values().any(|v| v == value)
    }
}

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> PartialEq for OrderedMap<K, V>
where
    K: Eq + Hash,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.keys == other.keys && self.store == other.store
    }
}

impl<K, V> Eq for OrderedMap<K, V>
where
    K: Eq + Hash,
    V: Eq,
{
}

impl<K, V> FromIterator<(K, V)> for OrderedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V> Extend<(K, V)> for OrderedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K, V> fmt::Display for OrderedMap<K, V>
where
    K: Eq + Hash + Clone + fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}:{value}")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_preserves_first_insertion_order() {
        let mut map = OrderedMap::new();
        map.put("b", 1);
        map.put("a", 2);
        map.put("c", 3);
        map.put("b", 10);
        map.put("a", 20);

        assert_eq!(map.keys(), vec!["b", "a", "c"]);
        assert_eq!(map.values(), vec![10, 20, 3]);
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_get_reports_presence() {
        let mut map = OrderedMap::new();
        map.put(1, "one");

        assert_eq!(map.get(&1), Some(&"one"));
        assert_eq!(map.get(&2), None);
        assert!(map.contains_key(&1));
        assert!(!map.contains_key(&2));
    }

    #[test]
    fn test_remove_missing_key_is_noop() {
        let mut map = OrderedMap::new();
        map.put(1, 'a');
        map.put(2, 'b');

        assert_eq!(map.remove(&3), None);
        assert_eq!(map.keys(), vec![1, 2]);

        assert_eq!(map.remove(&1), Some('a'));
        assert_eq!(map.keys(), vec![2]);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_reinsert_after_remove_moves_to_end() {
        let mut map = OrderedMap::new();
        map.put("x", 1);
        map.put("y", 2);
        map.remove(&"x");
        map.put("x", 3);

        assert_eq!(map.keys(), vec!["y", "x"]);
    }

    #[test]
    fn test_snapshots_are_detached() {
        let mut map = OrderedMap::new();
        map.put(1, 1);

        let mut keys = map.keys();
        keys.push(2);
        let mut values = map.values();
        values.clear();

        assert_eq!(map.keys(), vec![1]);
        assert_eq!(map.values(), vec![1]);
    }

    #[test]
    fn test_empty_and_clear() {
        let mut map: OrderedMap<u32, u32> = OrderedMap::default();
        assert!(map.is_empty());

        map.put(1, 1);
        assert!(!map.is_empty());

        map.clear();
        assert!(map.is_empty());
        assert!(map.keys().is_empty());
    }

    #[test]
    fn test_contains_value() {
        let map: OrderedMap<_, _> = [(1, "a"), (2, "b")].into_iter().collect();

        assert!(map.contains_value(&"b"));
        assert!(!map.contains_value(&"z"));
    }

    #[test]
    fn test_display() {
        let map: OrderedMap<_, _> = [(2, "b"), (1, "a")].into_iter().collect();
        assert_eq!(map.to_string(), "[2:b, 1:a]");
    }
}
