//! # vecmap-rs
//!
//! Cache-friendly ordered containers backed by sorted vectors.
//!
//! The crate provides two layers:
//!
//! 1. [`SortedVec`]: a contiguous sequence kept sorted under a comparator,
//!    with binary-search lookup and a pluggable duplicate-key policy
//!    ([`UniqueKeys`] or [`MultiKeys`]).
//! 2. [`VecMap`]: an associative map built on top of it, pairing a sorted
//!    key index with a separate dense value array. Lookups are `O(log n)`
//!    binary searches over contiguous memory, and iteration walks plain
//!    arrays, which makes the map competitive with a hash map for
//!    insertion-light, lookup-heavy workloads.
//!
//! ## Example
//!
//! ```rust
//! use vecmap_rs::{MultiKeys, SortedVec, VecMap};
//!
//! let mut set: SortedVec<u32> = SortedVec::new();
//! assert!(set.insert(11).inserted);
//! assert!(!set.insert(11).inserted); // duplicates rejected
//!
//! let mut bag: SortedVec<u32, MultiKeys> = SortedVec::new();
//! bag.insert(77);
//! bag.insert(77); // duplicates admitted
//! assert_eq!(bag.len(), 2);
//!
//! let mut map: VecMap<u32, &str> = VecMap::new();
//! map.insert(1, "one");
//! assert_eq!(map.get(&1), Some(&"one"));
//! ```

#![deny(unsafe_op_in_unsafe_fn)]

use std::cmp::Ordering;
use std::ops::Range;

// =============================================================================
// Comparator
// =============================================================================

/// Three-way comparison used to order elements of a [`SortedVec`].
///
/// The comparator is owned by the container, not the policy; policies only
/// perform the compare-then-splice protocol against it.
pub trait Compare<T> {
    /// Compare `a` against `b`.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// The natural ordering of `T` via [`Ord`]. This is the default comparator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord> Compare<T> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

// =============================================================================
// Insertion result
// =============================================================================

/// Outcome of an insertion: where the element lives, and whether a new
/// element was actually added (`false` means an equal element was already
/// present and storage was left untouched).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InsertResult {
    /// Position of the inserted (or pre-existing) element.
    pub index: usize,
    /// `true` if a new element was added.
    pub inserted: bool,
}

// =============================================================================
// Duplicate-key policies
// =============================================================================

/// Strategy deciding whether equal-keyed elements are rejected or admitted.
///
/// Policies are stateless unit types owned by value inside the container and
/// fixed at construction; there is no runtime dispatch. Invoked by
/// [`SortedVec`], not directly by users.
pub trait DupePolicy {
    /// Whether equal-keyed elements may coexist under this policy.
    fn admits_duplicates(&self) -> bool;

    /// Binary-search `items` (sorted under `cmp`) and splice `value` in
    /// according to the policy.
    fn insert_sorted<T, C: Compare<T>>(&self, items: &mut Vec<T>, value: T, cmp: &C)
        -> InsertResult;

    /// Collapse an already-sorted `items` to what this policy would have
    /// admitted element by element. Keeps the first of each equal run.
    fn dedup_sorted<T, C: Compare<T>>(&self, items: &mut Vec<T>, cmp: &C);
}

/// Reject-if-present: insert only if no equal element exists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UniqueKeys;

/// Always-insert: equal elements are admitted, landing at the leftmost
/// admissible slot of their equal run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MultiKeys;

impl DupePolicy for UniqueKeys {
    #[inline]
    fn admits_duplicates(&self) -> bool {
        false
    }

    fn insert_sorted<T, C: Compare<T>>(
        &self,
        items: &mut Vec<T>,
        value: T,
        cmp: &C,
    ) -> InsertResult {
        let at = lower_bound_in(items, &value, cmp);
        if at < items.len() && cmp.compare(&items[at], &value) == Ordering::Equal {
            return InsertResult {
                index: at,
                inserted: false,
            };
        }
        items.insert(at, value);
        InsertResult {
            index: at,
            inserted: true,
        }
    }

    fn dedup_sorted<T, C: Compare<T>>(&self, items: &mut Vec<T>, cmp: &C) {
        // dedup_by keeps the first of each run; with a stable sort upstream
        // this is first-occurrence-wins.
        items.dedup_by(|b, a| cmp.compare(a, b) == Ordering::Equal);
    }
}

impl DupePolicy for MultiKeys {
    #[inline]
    fn admits_duplicates(&self) -> bool {
        true
    }

    fn insert_sorted<T, C: Compare<T>>(
        &self,
        items: &mut Vec<T>,
        value: T,
        cmp: &C,
    ) -> InsertResult {
        let at = lower_bound_in(items, &value, cmp);
        items.insert(at, value);
        InsertResult {
            index: at,
            inserted: true,
        }
    }

    fn dedup_sorted<T, C: Compare<T>>(&self, _items: &mut Vec<T>, _cmp: &C) {}
}

/// First position whose element is not less than `value` under `cmp`.
#[inline]
fn lower_bound_in<T, C: Compare<T>>(items: &[T], value: &T, cmp: &C) -> usize {
    items.partition_point(|x| cmp.compare(x, value) == Ordering::Less)
}

// =============================================================================
// SortedVec
// =============================================================================

/// A contiguous, resizable sequence maintained in non-decreasing order.
///
/// Lookup is a binary search (`O(log n)`); insertion is a binary search plus
/// an array splice (`O(n)` worst case for the shift). That trade-off buys
/// contiguous storage, ascending iteration for free, and far better cache
/// behaviour than node-based structures on lookup-heavy workloads.
///
/// `P` selects the duplicate policy ([`UniqueKeys`] by default) and `C` the
/// comparator ([`NaturalOrder`] by default); both are fixed for the lifetime
/// of the container. Under [`UniqueKeys`] no two elements compare equal.
///
/// Mutation goes exclusively through [`insert`](Self::insert) (and the bulk
/// constructors, which sort and de-duplicate up front); positions returned
/// earlier are invalidated by any later insertion, as with any vector.
#[derive(Clone, Debug)]
pub struct SortedVec<T, P = UniqueKeys, C = NaturalOrder> {
    items: Vec<T>,
    policy: P,
    cmp: C,
}

impl<T, P, C> SortedVec<T, P, C>
where
    P: DupePolicy + Default,
    C: Compare<T> + Default,
{
    /// Create an empty container with the default comparator.
    pub fn new() -> Self {
        Self::with_comparator(C::default())
    }

    /// Create an empty container with room for `n` elements.
    pub fn with_capacity(n: usize) -> Self {
        let mut v = Self::new();
        v.items.reserve(n);
        v
    }

    /// Build from arbitrary input: sorts (stable), then lets the policy
    /// collapse duplicates. Under [`UniqueKeys`] the first occurrence of
    /// each equal run wins, matching what element-by-element insertion
    /// would have kept.
    pub fn from_vec(items: Vec<T>) -> Self {
        Self::from_vec_with(items, C::default())
    }

    /// Wrap a vector that is already sorted; see
    /// [`from_sorted_vec_with`](Self::from_sorted_vec_with).
    pub fn from_sorted_vec(items: Vec<T>) -> Self {
        Self::from_sorted_vec_with(items, C::default())
    }
}

impl<T, P, C> SortedVec<T, P, C>
where
    P: DupePolicy + Default,
    C: Compare<T>,
{
    /// Create an empty container ordered by `cmp`.
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            items: Vec::new(),
            policy: P::default(),
            cmp,
        }
    }

    /// Like [`from_vec`](Self::from_vec), with an explicit comparator.
    pub fn from_vec_with(mut items: Vec<T>, cmp: C) -> Self {
        let policy = P::default();
        items.sort_by(|a, b| cmp.compare(a, b));
        policy.dedup_sorted(&mut items, &cmp);
        Self { items, policy, cmp }
    }

    /// Wrap a vector that is already sorted under `cmp` and, under
    /// [`UniqueKeys`], free of equal elements. The precondition is
    /// debug-asserted only; in release builds the input is trusted.
    pub fn from_sorted_vec_with(items: Vec<T>, cmp: C) -> Self {
        let policy = P::default();
        debug_assert!(items.windows(2).all(|w| match cmp.compare(&w[0], &w[1]) {
            Ordering::Less => true,
            Ordering::Equal => policy.admits_duplicates(),
            Ordering::Greater => false,
        }));
        Self { items, policy, cmp }
    }
}

impl<T, P, C> SortedVec<T, P, C>
where
    P: DupePolicy,
    C: Compare<T>,
{
    /// Insert `value` at its sorted position, subject to the duplicate
    /// policy. Never fails; a rejected duplicate is reported through
    /// `inserted == false` with the index of the existing element.
    pub fn insert(&mut self, value: T) -> InsertResult {
        let res = self.policy.insert_sorted(&mut self.items, value, &self.cmp);
        debug_assert!(res.index < self.items.len());
        res
    }

    /// Binary-search for an element comparing equal to `value`.
    pub fn find(&self, value: &T) -> Option<&T> {
        self.position(value).map(|i| &self.items[i])
    }

    /// Index of an element comparing equal to `value`, if any. With
    /// [`MultiKeys`] this is the first element of the equal run.
    pub fn position(&self, value: &T) -> Option<usize> {
        let at = self.lower_bound(value);
        if at < self.items.len() && self.cmp.compare(&self.items[at], value) == Ordering::Equal {
            Some(at)
        } else {
            None
        }
    }

    /// Whether any element compares equal to `value`.
    pub fn contains(&self, value: &T) -> bool {
        self.position(value).is_some()
    }

    /// First position whose element is not less than `value`: the leftmost
    /// admissible insertion slot.
    pub fn lower_bound(&self, value: &T) -> usize {
        lower_bound_in(&self.items, value, &self.cmp)
    }

    /// Half-open index range of the elements comparing equal to `value`.
    /// Empty (with `start == end` at the insertion point) when absent.
    pub fn equal_range(&self, value: &T) -> Range<usize> {
        let lo = self.lower_bound(value);
        let hi = lo
            + self.items[lo..]
                .partition_point(|x| self.cmp.compare(x, value) == Ordering::Equal);
        lo..hi
    }

    /// First position for which `probe` (element vs. the sought key) is not
    /// [`Ordering::Less`]. Lets callers search by a projection of `T`
    /// without materialising a full element.
    pub fn lower_bound_by<F>(&self, mut probe: F) -> usize
    where
        F: FnMut(&T) -> Ordering,
    {
        self.items.partition_point(|x| probe(x) == Ordering::Less)
    }

    /// Binary-search with an ordering probe; see
    /// [`lower_bound_by`](Self::lower_bound_by).
    pub fn find_by<F>(&self, mut probe: F) -> Option<&T>
    where
        F: FnMut(&T) -> Ordering,
    {
        let at = self.lower_bound_by(&mut probe);
        match self.items.get(at) {
            Some(x) if probe(x) == Ordering::Equal => Some(x),
            _ => None,
        }
    }

    /// Element at `index`, if in bounds.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Smallest element.
    #[inline]
    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    /// Largest element.
    #[inline]
    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the container holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Current allocated capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Pre-allocate room for `n` more elements. Propagates allocation
    /// failure the way [`Vec::reserve`] does; logical size is unchanged.
    pub fn reserve(&mut self, n: usize) {
        self.items.reserve(n);
    }

    /// Remove every element; capacity is retained.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// The elements in ascending order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Iterate in ascending order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Consume the container, yielding the sorted backing vector.
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T, P, C> Default for SortedVec<T, P, C>
where
    P: DupePolicy + Default,
    C: Compare<T> + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P, C> Extend<T> for SortedVec<T, P, C>
where
    P: DupePolicy,
    C: Compare<T>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.items.reserve(iter.size_hint().0);
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T, P, C> FromIterator<T> for SortedVec<T, P, C>
where
    P: DupePolicy + Default,
    C: Compare<T> + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<'a, T, P, C> IntoIterator for &'a SortedVec<T, P, C>
where
    P: DupePolicy,
    C: Compare<T>,
{
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, P, C> IntoIterator for SortedVec<T, P, C> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

// =============================================================================
// VecMap
// =============================================================================

/// One entry of the key index: a key plus the position of its value in the
/// dense value array at the time of insertion.
#[derive(Clone, Debug)]
struct KeySlot<K> {
    key: K,
    slot: usize,
}

/// Orders [`KeySlot`]s by key alone; the slot is a wildcard.
#[derive(Clone, Copy, Debug, Default)]
struct ByKey;

impl<K: Ord> Compare<KeySlot<K>> for ByKey {
    #[inline]
    fn compare(&self, a: &KeySlot<K>, b: &KeySlot<K>) -> Ordering {
        a.key.cmp(&b.key)
    }
}

/// An associative map pairing a sorted key index with a separate dense
/// value array.
///
/// `insert(k, v)` appends `v` to the dense array and files `(k, slot)` into
/// the key index, where `slot` was `values.len()` at the moment of the
/// insert. Keys are unique; inserting an existing key is a no-op that
/// discards the new value and reports `inserted == false` — non-overwriting
/// map-insert semantics, not assignment.
///
/// Iteration order is ascending key order (a consequence of the sorted
/// index), not insertion order; [`dense_values`](Self::dense_values)
/// exposes the values contiguously in insertion order for cache-friendly
/// scans.
///
/// The map exposes no removal operation, and this is structural: stored
/// slots are assigned once and never rewritten, so they stay valid only
/// while the dense array grows append-only. Supporting removal would
/// require redesigning index maintenance (tombstones, or an indirection
/// table) rather than bolting a `remove` onto this type.
#[derive(Clone, Debug)]
pub struct VecMap<K, V> {
    index: SortedVec<KeySlot<K>, UniqueKeys, ByKey>,
    values: Vec<V>,
}

impl<K: Ord, V> Default for VecMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> VecMap<K, V> {
    /// Create an empty map.
    pub fn new() -> Self {
        Self {
            index: SortedVec::with_comparator(ByKey),
            values: Vec::new(),
        }
    }

    /// Create an empty map with room for `n` entries in both the key index
    /// and the dense value array.
    pub fn with_capacity(n: usize) -> Self {
        let mut m = Self::new();
        m.reserve(n);
        m
    }

    /// Insert `key -> value` if `key` is not already present.
    ///
    /// Returns the position of the key in the sorted index and whether the
    /// insertion happened. When the key already exists, `value` is dropped
    /// and the existing association is left unchanged.
    pub fn insert(&mut self, key: K, value: V) -> InsertResult {
        let slot = self.values.len();
        let res = self.index.insert(KeySlot { key, slot });
        if res.inserted {
            self.values.push(value);
        }
        debug_assert_eq!(self.index.len(), self.values.len());
        res
    }

    /// Bulk insertion: reserves capacity for the batch on both underlying
    /// sequences, then inserts element by element with the same
    /// first-occurrence-wins semantics as a loop of [`insert`](Self::insert)
    /// calls. Returns how many pairs were actually inserted.
    pub fn insert_batch<I>(&mut self, pairs: I) -> usize
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let pairs = pairs.into_iter();
        let hint = pairs.size_hint().0;
        self.reserve(hint);
        let mut added = 0;
        for (key, value) in pairs {
            if self.insert(key, value).inserted {
                added += 1;
            }
        }
        added
    }

    /// Binary-search the key index and return the associated value.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.index
            .find_by(|e| e.key.cmp(key))
            .map(|e| &self.values[e.slot])
    }

    /// The stored key and its value, by reference.
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.index
            .find_by(|e| e.key.cmp(key))
            .map(|e| (&e.key, &self.values[e.slot]))
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &K) -> bool {
        self.index.find_by(|e| e.key.cmp(key)).is_some()
    }

    /// Number of entries. The key index and the dense value array are
    /// always the same length.
    #[inline]
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.index.len(), self.values.len());
        self.values.len()
    }

    /// Whether the map holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Pre-allocate room for `n` more entries on both sequences.
    pub fn reserve(&mut self, n: usize) {
        self.index.reserve(n);
        self.values.reserve(n);
    }

    /// Remove every entry; capacity is retained.
    pub fn clear(&mut self) {
        self.index.clear();
        self.values.clear();
    }

    /// Iterate entries in ascending key order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&K, &V)> + '_ {
        self.index.iter().map(|e| (&e.key, &self.values[e.slot]))
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &K> + '_ {
        self.index.iter().map(|e| &e.key)
    }

    /// Values in ascending order of their keys.
    pub fn values(&self) -> impl ExactSizeIterator<Item = &V> + '_ {
        self.index.iter().map(|e| &self.values[e.slot])
    }

    /// The dense value array in insertion order. This is the contiguous,
    /// cache-friendly surface the split layout exists for; its indices are
    /// the slots stored in the key index.
    #[inline]
    pub fn dense_values(&self) -> &[V] {
        &self.values
    }
}

impl<K: Ord, V> Extend<(K, V)> for VecMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.insert_batch(iter);
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for VecMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.insert_batch(iter);
        map
    }
}

// =============================================================================
// Tests
// =============================================================================


#[cfg(test)]
mod proptests;
