//! Thread-safe wrappers around the ordered collections.
//!
//! Each wrapper guards its whole state with a single [`parking_lot::Mutex`],
//! so every individual operation is serializable. Compound operations (a
//! lookup followed by a conditional insert, say) are only atomic when run
//! through [`SyncOrderedMap::with_mut`] / [`SyncOrderedSet::with_mut`].

use std::fmt;
use std::hash::Hash;

use parking_lot::Mutex;

use super::{OrderedMap, OrderedSet};

/// An [`OrderedMap`] safe for concurrent use through `&self`.
pub struct SyncOrderedMap<K, V> {
    inner: Mutex<OrderedMap<K, V>>,
}

impl<K, V> SyncOrderedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a new empty map.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(OrderedMap::new()),
        }
    }

    /// Inserts or updates a value, keeping the key's original position.
    pub fn put(&self, key: K, value: V) {
        self.inner.lock().put(key, value);
    }

    /// Removes `key`; a no-op if the key is absent.
    pub fn remove(&self, key: &K) -> Option<V> {
        self.inner.lock().remove(key)
    }

    /// Returns whether `key` is present.
    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.lock().contains_key(key)
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Returns a snapshot of the keys in insertion order.
    pub fn keys(&self) -> Vec<K> {
        self.inner.lock().keys()
    }

    /// Runs `f` with shared access to the map while holding the lock.
    pub fn with<R>(&self, f: impl FnOnce(&OrderedMap<K, V>) -> R) -> R {
        f(&self.inner.lock())
    }

    /// Runs `f` with exclusive access to the map while holding the lock.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut OrderedMap<K, V>) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Consumes the wrapper and returns the inner map.
    pub fn into_inner(self) -> OrderedMap<K, V> {
        self.inner.into_inner()
    }
}

impl<K, V> SyncOrderedMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Returns a clone of the value stored under `key`, if any.
    pub fn get(&self, key: &K) -> Option<V> {
        self.inner.lock().get(key).cloned()
    }

    /// Returns a snapshot of the values in insertion order.
    pub fn values(&self) -> Vec<V> {
        self.inner.lock().values()
    }
}

impl<K, V> SyncOrderedMap<K, V>
where
    K: Eq + Hash + Clone,
    V: PartialEq,
{
    /// Returns whether any entry holds a value equal to `value`.
    pub fn contains_value(&self, value: &V) -> bool {
        self.inner.lock().contains_value(value)
    }
}

impl<K, V> Default for SyncOrderedMap<K, V> {
    fn default() -> Self {
        Self::from(OrderedMap::new())
    }
}

impl<K, V> From<OrderedMap<K, V>> for SyncOrderedMap<K, V> {
    fn from(map: OrderedMap<K, V>) -> Self {
        Self {
            inner: Mutex::new(map),
        }
    }
}

impl<K, V> fmt::Debug for SyncOrderedMap<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncOrderedMap")
            .field("inner", &*self.inner.lock())
            .finish()
    }
}

/// An [`OrderedSet`] safe for concurrent use through `&self`.
///
/// The reverse index and the backing container live behind the same lock.
pub struct SyncOrderedSet<T> {
    inner: Mutex<OrderedSet<T>>,
}

impl<T> SyncOrderedSet<T>
where
    T: Eq + Hash + Clone,
{
    /// Creates a new empty set.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(OrderedSet::new()),
        }
    }

    /// Adds every element that is not already present.
    pub fn add<I>(&self, items: I) -> usize
    where
        I: IntoIterator<Item = T>,
    {
        self.inner.lock().add(items)
    }

    /// Removes every given element that is present.
    pub fn remove<'a, I>(&self, items: I) -> usize
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        self.inner.lock().remove(items)
    }

    /// Returns whether `item` is a member.
    pub fn contains(&self, item: &T) -> bool {
        self.inner.lock().contains(item)
    }

    /// Returns whether all given elements are members.
    pub fn contains_all<'a, I>(&self, items: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        self.inner.lock().contains_all(items)
    }

    /// Returns a snapshot of the elements in insertion order.
    pub fn values(&self) -> Vec<T> {
        self.inner.lock().values()
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns whether the set has no elements.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Runs `f` with exclusive access to the set while holding the lock.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut OrderedSet<T>) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Consumes the wrapper and returns the inner set.
    pub fn into_inner(self) -> OrderedSet<T> {
        self.inner.into_inner()
    }
}

impl<T> Default for SyncOrderedSet<T> {
    fn default() -> Self {
        Self::from(OrderedSet::new())
    }
}

impl<T> From<OrderedSet<T>> for SyncOrderedSet<T> {
    fn from(set: OrderedSet<T>) -> Self {
        Self {
            inner: Mutex::new(set),
        }
    }
}

impl<T> fmt::Debug for SyncOrderedSet<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncOrderedSet")
            .field("inner", &*self.inner.lock())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn test_concurrent_puts_keep_each_key_once() {
        let map = SyncOrderedMap::new();

        thread::scope(|scope| {
            for worker in 0..4u32 {
                let map = &map;
                scope.spawn(move || {
                    for key in 0..100u32 {
                        map.put(key, worker);
                    }
                });
            }
        });

        let keys = map.keys();
        assert_eq!(keys.len(), 100);
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 100);
    }

    #[test]
    fn test_get_and_remove() {
        let map = SyncOrderedMap::new();
        map.put("a", 1);
        map.put("b", 2);

        assert_eq!(map.get(&"a"), Some(1));
        assert_eq!(map.remove(&"a"), Some(1));
        assert_eq!(map.remove(&"a"), None);
        assert_eq!(map.keys(), vec!["b"]);
        assert!(map.contains_value(&2));
    }

    #[test]
    fn test_with_mut_is_atomic_check_then_put() {
        let map: SyncOrderedMap<&str, u32> = SyncOrderedMap::new();

        thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    map.with_mut(|inner| {
                        let next = inner.get(&"counter").copied().unwrap_or(0) + 1;
                        inner.put("counter", next);
                    });
                });
            }
        });

        assert_eq!(map.get(&"counter"), Some(8));
    }

    #[test]
    fn test_concurrent_set_adds_are_unique() {
        let set = SyncOrderedSet::new();

        thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    set.add(0..50u32);
                });
            }
        });

        assert_eq!(set.len(), 50);
        assert!(set.contains_all(&[0, 25, 49]));
        assert_eq!(set.remove(&[0, 100]), 1);
        assert!(!set.contains(&0));
    }
}
