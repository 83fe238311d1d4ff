use super::*;

use proptest::prelude::*;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

/// Check every structural invariant of a map: strictly ascending key index,
/// equal lengths, and slots forming a bijection onto the dense array.
fn validate_map<K: Ord, V>(m: &VecMap<K, V>) {
    assert_eq!(
        m.index.len(),
        m.values.len(),
        "key index and dense array must stay the same length"
    );

    let entries = m.index.as_slice();
    for w in entries.windows(2) {
        assert!(
            w[0].key < w[1].key,
            "key index must be strictly ascending under UniqueKeys"
        );
    }

    let mut seen = vec![false; m.values.len()];
    for e in entries {
        assert!(e.slot < m.values.len(), "slot out of bounds");
        assert!(!seen[e.slot], "two keys share one value slot");
        seen[e.slot] = true;
    }
}

/// Non-overwriting insert on the model, mirroring `VecMap::insert`.
fn model_insert<K: Ord, V>(model: &mut BTreeMap<K, V>, key: K, value: V) -> bool {
    match model.entry(key) {
        Entry::Vacant(e) => {
            e.insert(value);
            true
        }
        Entry::Occupied(_) => false,
    }
}

#[derive(Clone, Debug)]
enum Op {
    Insert(u16, u32),
    Batch(Vec<(u16, u32)>),
    Get(u16),
    Clear,
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    // Keys drawn from a small range so duplicate hits are common.
    let key = 0u16..512;
    let op = prop_oneof![
        50 => (key.clone(), any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        20 => prop::collection::vec((key.clone(), any::<u32>()), 0..=64).prop_map(Op::Batch),
        28 => key.clone().prop_map(Op::Get),
        2 => Just(Op::Clear),
    ];
    prop::collection::vec(op, 0..=500)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 50_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_unique_sortedvec_matches_btreeset(values in prop::collection::vec(0i32..256, 0..=400)) {
        let mut sv: SortedVec<i32> = SortedVec::new();
        let mut model: BTreeSet<i32> = BTreeSet::new();

        for v in values {
            let res = sv.insert(v);
            let model_inserted = model.insert(v);
            prop_assert_eq!(res.inserted, model_inserted);
            prop_assert_eq!(sv.as_slice()[res.index], v);
            prop_assert_eq!(sv.len(), model.len());
        }

        prop_assert!(sv.as_slice().windows(2).all(|w| w[0] < w[1]));
        let got: Vec<i32> = sv.iter().copied().collect();
        let expected: Vec<i32> = model.iter().copied().collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_multi_sortedvec_admits_everything(values in prop::collection::vec(0i32..64, 0..=400)) {
        let mut sv: SortedVec<i32, MultiKeys> = SortedVec::new();

        for &v in &values {
            let res = sv.insert(v);
            prop_assert!(res.inserted);
            prop_assert_eq!(sv.as_slice()[res.index], v);
            // Leftmost admissible slot: nothing before the insertion point
            // may compare equal.
            if res.index > 0 {
                prop_assert!(sv.as_slice()[res.index - 1] < v);
            }
        }

        prop_assert_eq!(sv.len(), values.len());
        prop_assert!(sv.as_slice().windows(2).all(|w| w[0] <= w[1]));

        // Every key is findable exactly as many times as it went in.
        let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
        for &v in &values {
            *counts.entry(v).or_insert(0) += 1;
        }
        for (&v, &n) in &counts {
            let range = sv.equal_range(&v);
            prop_assert_eq!(range.len(), n);
            prop_assert!(sv.as_slice()[range].iter().all(|&x| x == v));
        }
    }

    #[test]
    fn prop_from_vec_matches_incremental(values in prop::collection::vec((0u8..32, any::<u32>()), 0..=200)) {
        // Elements compare by the first field only; the second field tags
        // the occurrence so first-wins is observable.
        #[derive(Clone, Debug, PartialEq)]
        struct Tagged(u8, u32);
        #[derive(Clone, Copy, Debug, Default)]
        struct ByFirst;
        impl Compare<Tagged> for ByFirst {
            fn compare(&self, a: &Tagged, b: &Tagged) -> std::cmp::Ordering {
                a.0.cmp(&b.0)
            }
        }

        let tagged: Vec<Tagged> = values.iter().map(|&(k, t)| Tagged(k, t)).collect();

        let bulk: SortedVec<Tagged, UniqueKeys, ByFirst> = SortedVec::from_vec(tagged.clone());

        let mut incremental: SortedVec<Tagged, UniqueKeys, ByFirst> = SortedVec::new();
        for t in tagged {
            incremental.insert(t);
        }

        prop_assert_eq!(bulk.as_slice(), incremental.as_slice());
    }

    #[test]
    fn prop_map_equivalence(ops in ops_strategy()) {
        let mut map: VecMap<u16, u32> = VecMap::new();
        let mut model: BTreeMap<u16, u32> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    let inserted = map.insert(k, v).inserted;
                    prop_assert_eq!(inserted, model_insert(&mut model, k, v));
                }
                Op::Batch(pairs) => {
                    let mut model_added = 0;
                    for &(k, v) in &pairs {
                        if model_insert(&mut model, k, v) {
                            model_added += 1;
                        }
                    }
                    prop_assert_eq!(map.insert_batch(pairs), model_added);
                }
                Op::Get(k) => {
                    prop_assert_eq!(map.get(&k), model.get(&k));
                }
                Op::Clear => {
                    map.clear();
                    model.clear();
                }
            }

            prop_assert_eq!(map.len(), model.len());
        }

        validate_map(&map);
        let got: Vec<(u16, u32)> = map.iter().map(|(k, v)| (*k, *v)).collect();
        let expected: Vec<(u16, u32)> = model.iter().map(|(k, v)| (*k, *v)).collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_batch_equals_loop(pairs in prop::collection::vec((0u16..64, any::<u32>()), 0..=300)) {
        let mut looped: VecMap<u16, u32> = VecMap::new();
        for &(k, v) in &pairs {
            looped.insert(k, v);
        }

        let mut batched: VecMap<u16, u32> = VecMap::new();
        batched.insert_batch(pairs);

        validate_map(&looped);
        validate_map(&batched);
        prop_assert_eq!(
            looped.iter().collect::<Vec<_>>(),
            batched.iter().collect::<Vec<_>>()
        );
        prop_assert_eq!(looped.dense_values(), batched.dense_values());
    }
}
