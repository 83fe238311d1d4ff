//! HashMap-based baseline.
//!
//! This wraps `std::collections::HashMap` behind the same non-overwriting
//! insert contract as `vecmap_rs::VecMap`, so the benches compare like with
//! like: both sides report whether an insert happened and both leave the
//! first value in place on a duplicate key.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;

/// A hash-map baseline with non-overwriting insert semantics.
pub struct SimpleMap<K, V> {
    map: HashMap<K, V>,
}

impl<K: Eq + Hash, V> SimpleMap<K, V> {
    /// Create an empty map.
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Create an empty map with room for `n` entries.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            map: HashMap::with_capacity(n),
        }
    }

    /// Insert `key -> value` if absent. Returns whether the insertion
    /// happened; on a duplicate key the existing value is kept.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        match self.map.entry(key) {
            Entry::Vacant(e) => {
                e.insert(value);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Value for `key`, if present.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.map.get(key)
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Pre-allocate room for `n` more entries.
    pub fn reserve(&mut self, n: usize) {
        self.map.reserve(n);
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Iterate entries in arbitrary order (this is a hash map).
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.map.iter()
    }
}

impl<K: Eq + Hash, V> Default for SimpleMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
