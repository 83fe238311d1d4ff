//! Fill / exhaust / reset walkthrough for the bump arena, with process
//! memory readings and a heap-allocation comparison.

use std::time::Instant;

use mapbench::strings::random_strings;
use mapbench::Arena;

fn rss_kib() -> Option<usize> {
    memory_stats::memory_stats().map(|s| s.physical_mem / 1024)
}

fn main() {
    let strings = random_strings(500_000, 32);
    let payload: usize = strings.iter().map(|s| s.len()).sum();
    println!(
        "storing {} strings ({} KiB of payload)\n",
        strings.len(),
        payload / 1024
    );

    let mut arena = Arena::with_capacity(8 * 1024 * 1024).expect("arena reservation failed");
    println!("arena capacity: {} KiB", arena.capacity() / 1024);
    if let Some(r) = rss_kib() {
        println!("rss before:     {r} KiB");
    }

    let t = Instant::now();
    let mut resets = 0usize;
    let mut copied = 0usize;
    for s in &strings {
        let bytes = s.as_bytes();
        let ptr = match arena.alloc_bytes(bytes) {
            Some(p) => p,
            None => {
                resets += 1;
                println!(
                    "arena exhausted with {} bytes free, reset #{resets}",
                    arena.space()
                );
                arena.reset().expect("arena remap failed");
                arena
                    .alloc_bytes(bytes)
                    .expect("fresh arena must fit one string")
            }
        };
        copied += ptr.len();
    }
    let arena_time = t.elapsed();
    println!(
        "arena: copied {} KiB in {:?} ({} resets)\n",
        copied / 1024,
        arena_time,
        resets
    );
    assert_eq!(copied, payload);
    assert!(resets > 0, "workload is sized to overflow the arena");

    let t = Instant::now();
    let mut heap: Vec<Box<[u8]>> = Vec::with_capacity(strings.len());
    for s in &strings {
        heap.push(s.as_bytes().to_vec().into_boxed_slice());
    }
    let heap_time = t.elapsed();
    println!("heap:  copied {} blocks in {:?}", heap.len(), heap_time);

    if let Some(r) = rss_kib() {
        println!("rss after:      {r} KiB");
    }

    let ratio = heap_time.as_secs_f64() / arena_time.as_secs_f64();
    if ratio >= 1.0 {
        println!("\narena faster than per-string heap allocation ({ratio:.2}x)");
    } else {
        println!(
            "\nper-string heap allocation faster than arena ({:.2}x)",
            1.0 / ratio
        );
    }
}
