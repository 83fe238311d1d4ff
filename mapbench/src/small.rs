//! Inline-capacity sorted map for small entry counts.
//!
//! Below roughly a hundred entries a linear scan over contiguous memory
//! beats binary search on branch prediction alone, and `SmallVec` keeps the
//! first `N` entries on the stack entirely. The benches use this as the
//! small-N point of the comparison space; the semantics match `VecMap`
//! (sorted, unique keys, non-overwriting insert).

use std::cmp::Ordering;

use smallvec::SmallVec;
use vecmap_rs::InsertResult;

/// A sorted, linear-scan map with inline storage for up to `N` entries.
pub struct SmallSortedMap<K, V, const N: usize = 8> {
    entries: SmallVec<[(K, V); N]>,
}

impl<K: Ord, V, const N: usize> SmallSortedMap<K, V, N> {
    /// Create an empty map; the first `N` entries need no heap allocation.
    pub fn new() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }

    /// Insert `key -> value` if absent, keeping the entries sorted.
    ///
    /// Duplicate keys are rejected and the existing value kept, matching
    /// `VecMap::insert`.
    pub fn insert(&mut self, key: K, value: V) -> InsertResult {
        for (i, (k, _)) in self.entries.iter().enumerate() {
            match key.cmp(k) {
                Ordering::Less => {
                    self.entries.insert(i, (key, value));
                    return InsertResult {
                        index: i,
                        inserted: true,
                    };
                }
                Ordering::Equal => {
                    return InsertResult {
                        index: i,
                        inserted: false,
                    };
                }
                Ordering::Greater => continue,
            }
        }
        self.entries.push((key, value));
        InsertResult {
            index: self.entries.len() - 1,
            inserted: true,
        }
    }

    /// Value for `key`, if present.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the entries still fit in the inline buffer.
    pub fn is_inline(&self) -> bool {
        !self.entries.spilled()
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterate entries in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }
}

impl<K: Ord, V, const N: usize> Default for SmallSortedMap<K, V, N> {
    fn default() -> Self {
        Self::new()
    }
}
