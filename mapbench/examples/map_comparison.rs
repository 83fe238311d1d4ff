//! Narrated side-by-side run of the sorted-vector containers against the
//! standard hash map: the same workloads the benches measure, but as one
//! assert-checked walkthrough with wall-clock printouts.

use std::time::Instant;

use rand::seq::SliceRandom;
use rand::thread_rng;

use mapbench::strings::random_strings;
use mapbench::SimpleMap;
use vecmap_rs::{MultiKeys, SortedVec, VecMap};

fn main() {
    container_basics();
    sequential_pairs();

    let n = if cfg!(debug_assertions) { 20_000 } else { 50_000 };

    println!("=== {n} short strings (10 bytes) ===\n");
    string_workload(n, 10, 6);

    println!("=== {n} long strings (64 bytes) ===\n");
    string_workload(n, 64, 32);

    println!("All done!");
}

fn container_basics() {
    // Unique keys: the second 11 bounces off.
    let mut sv: SortedVec<i32> = SortedVec::new();
    assert!(sv.insert(11).inserted);
    assert_eq!(sv.len(), 1);
    assert_eq!(sv.find(&11), Some(&11));
    assert!(!sv.insert(11).inserted);
    assert_eq!(sv.len(), 1);

    // Multi keys: both 77s go in and an equal-range scan sees exactly two.
    let mut bag: SortedVec<i32, MultiKeys> = SortedVec::new();
    assert!(bag.insert(77).inserted);
    assert!(bag.insert(77).inserted);
    assert_eq!(bag.len(), 2);
    let range = bag.equal_range(&77);
    assert_eq!(range.len(), 2);
    assert!(bag.as_slice()[range].iter().all(|&x| x == 77));

    println!("container sanity checks passed\n");
}

fn sequential_pairs() {
    // Sequential keys always land at the end of the index, so building is
    // append-only and stays fast even at this size.
    let n: u32 = if cfg!(debug_assertions) { 200_000 } else { 1_000_000 };
    println!("=== {n} sequential (i, i.to_string()) pairs ===\n");

    let t = Instant::now();
    let mut map: VecMap<u32, String> = VecMap::with_capacity(n as usize);
    for i in 0..n {
        map.insert(i, i.to_string());
    }
    println!("  built in {:?}", t.elapsed());
    assert_eq!(map.len(), n as usize);
    assert_eq!(map.get(&77).map(String::as_str), Some("77"));
    println!("  find(77) -> {:?}\n", map.get(&77).unwrap());
}

fn string_workload(n: usize, key_len: usize, miss_len: usize) {
    println!("generating {n} random strings of {key_len} bytes...");
    let keys = random_strings(n, key_len);
    // A different length guarantees these can never be found.
    let misses = random_strings(n, miss_len);

    let mut hash: SimpleMap<String, String> = SimpleMap::with_capacity(n);
    let t = Instant::now();
    for k in &keys {
        hash.insert(k.clone(), k.clone());
    }
    println!("  hash map  insert:    {:?}", t.elapsed());
    assert_eq!(hash.len(), keys.len());

    let mut map: VecMap<String, String> = VecMap::with_capacity(n);
    let t = Instant::now();
    for k in &keys {
        map.insert(k.clone(), k.clone());
    }
    println!("  vec map   insert:    {:?}", t.elapsed());
    assert_eq!(map.len(), keys.len());

    // Re-inserting the whole batch must change nothing.
    let t = Instant::now();
    let added = map.insert_batch(keys.iter().map(|k| (k.clone(), k.clone())));
    println!("  vec map   re-insert: {:?} ({added} added)", t.elapsed());
    assert_eq!(added, 0);
    assert_eq!(map.len(), keys.len());

    // Shuffle so lookups are not in the order the maps were fed.
    let mut shuffled = keys.clone();
    shuffled.shuffle(&mut thread_rng());

    let t = Instant::now();
    let mut hits = 0usize;
    for k in &shuffled {
        if hash.get(k).is_some() {
            hits += 1;
        }
    }
    println!("  hash map  find:      {:?}", t.elapsed());
    assert_eq!(hits, shuffled.len());

    let t = Instant::now();
    let mut hits = 0usize;
    for k in &shuffled {
        if map.get(k).is_some() {
            hits += 1;
        }
    }
    println!("  vec map   find:      {:?}", t.elapsed());
    assert_eq!(hits, shuffled.len());

    let t = Instant::now();
    let mut hits = 0usize;
    for k in &misses {
        if hash.get(k).is_some() {
            hits += 1;
        }
    }
    println!("  hash map  find-miss: {:?}", t.elapsed());
    assert_eq!(hits, 0);

    let t = Instant::now();
    let mut hits = 0usize;
    for k in &misses {
        if map.get(k).is_some() {
            hits += 1;
        }
    }
    println!("  vec map   find-miss: {:?}", t.elapsed());
    assert_eq!(hits, 0);

    println!();
}
