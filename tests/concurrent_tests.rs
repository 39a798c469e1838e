// Concurrency Tests
// The filter has no internal locking; these tests exercise the two supported
// ways of sharing one: a single lock around the whole filter, and sharding
// keys into independent filters.

use cuckoo_filter::{CuckooFilter, Filter, Options};
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread;

const NUM_THREADS: usize = 8;
const KEYS_PER_THREAD: usize = 500;

fn thread_key(thread_id: usize, i: usize) -> Vec<u8> {
    format!("thread_{}_key_{}", thread_id, i).into_bytes()
}

/// One exclusive lock guarding the whole filter
#[test]
fn test_single_lock_shared_filter() {
    let filter = Arc::new(Mutex::new(CuckooFilter::<u32>::with_seed(64, 1).unwrap()));

    let handles: Vec<_> = (0..NUM_THREADS)
        .map(|thread_id| {
            let filter = Arc::clone(&filter);
            thread::spawn(move || {
                for i in 0..KEYS_PER_THREAD {
                    filter.lock().insert(&thread_key(thread_id, i)).unwrap();
                }
                // Each thread deletes its odd keys again
                for i in (1..KEYS_PER_THREAD).step_by(2) {
                    assert!(filter.lock().delete(&thread_key(thread_id, i)));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let filter = filter.lock();
    assert_eq!(filter.size(), NUM_THREADS * KEYS_PER_THREAD / 2);
    for thread_id in 0..NUM_THREADS {
        for i in (0..KEYS_PER_THREAD).step_by(2) {
            assert!(filter.lookup(&thread_key(thread_id, i)));
        }
    }
}

/// Independent filters selected by a coarse hash of the key
struct ShardedFilter {
    shards: Vec<Mutex<Box<dyn Filter + Send>>>,
}

impl ShardedFilter {
    fn new(num_shards: usize, buckets_per_shard: usize) -> Self {
        let shards = (0..num_shards)
            .map(|shard| {
                let filter: Box<dyn Filter + Send> = Box::new(
                    Options::new()
                        .fingerprint_bits(16)
                        .num_buckets(buckets_per_shard)
                        .seed(shard as u64)
                        .build_typed::<u16>()
                        .unwrap(),
                );
                Mutex::new(filter)
            })
            .collect();
        Self { shards }
    }

    fn shard(&self, key: &[u8]) -> &Mutex<Box<dyn Filter + Send>> {
        let coarse = key
            .iter()
            .fold(0usize, |acc, &b| acc.wrapping_mul(31).wrapping_add(b as usize));
        &self.shards[coarse % self.shards.len()]
    }

    fn insert(&self, key: &[u8]) -> cuckoo_filter::Result<()> {
        self.shard(key).lock().insert(key)
    }

    fn lookup(&self, key: &[u8]) -> bool {
        self.shard(key).lock().lookup(key)
    }

    fn size(&self) -> usize {
        self.shards.iter().map(|s| s.lock().size()).sum()
    }
}

#[test]
fn test_sharded_filters() {
    let sharded = Arc::new(ShardedFilter::new(4, 64));

    let handles: Vec<_> = (0..NUM_THREADS)
        .map(|thread_id| {
            let sharded = Arc::clone(&sharded);
            thread::spawn(move || {
                for i in 0..KEYS_PER_THREAD {
                    sharded.insert(&thread_key(thread_id, i)).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(sharded.size(), NUM_THREADS * KEYS_PER_THREAD);
    for thread_id in 0..NUM_THREADS {
        for i in 0..KEYS_PER_THREAD {
            assert!(sharded.lookup(&thread_key(thread_id, i)));
        }
    }
}
