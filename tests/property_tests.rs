//! Property-based tests for the cuckoo filter

use cuckoo_filter::{CuckooFilter, Options};
use proptest::prelude::*;
use std::collections::HashMap;

#[derive(Debug, Clone)]
enum Op {
    Insert(u8),
    Delete(u8),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => any::<u8>().prop_map(Op::Insert),
        2 => any::<u8>().prop_map(Op::Delete),
    ]
}

fn key(id: u8) -> Vec<u8> {
    format!("prop_key_{}", id).into_bytes()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// size == successful inserts - successful deletes
    #[test]
    fn prop_size_accounting(ops in prop::collection::vec(op_strategy(), 0..400), seed in any::<u64>()) {
        let mut filter = CuckooFilter::<u16>::with_seed(2, seed).unwrap();
        let mut inserted = 0usize;
        let mut deleted = 0usize;

        for op in &ops {
            match op {
                Op::Insert(id) => {
                    if filter.insert(&key(*id)).is_ok() {
                        inserted += 1;
                    }
                }
                Op::Delete(id) => {
                    if filter.delete(&key(*id)) {
                        deleted += 1;
                    }
                }
            }
        }

        prop_assert_eq!(filter.size(), inserted - deleted);
    }

    /// Every key with more successful inserts than deletes is still found
    #[test]
    fn prop_no_false_negatives(ops in prop::collection::vec(op_strategy(), 0..600), seed in any::<u64>()) {
        // Two buckets keep the filter crowded so evictions and failures happen.
        let mut filter = Options::new()
            .fingerprint_bits(32)
            .num_buckets(2)
            .max_kicks(50)
            .seed(seed)
            .build_typed::<u32>()
            .unwrap();
        let mut live: HashMap<u8, usize> = HashMap::new();

        for op in &ops {
            match op {
                Op::Insert(id) => {
                    if filter.insert(&key(*id)).is_ok() {
                        *live.entry(*id).or_default() += 1;
                    }
                }
                Op::Delete(id) => {
                    let removed = filter.delete(&key(*id));
                    let count = live.entry(*id).or_default();
                    // 32-bit fingerprints of 256 keys do not collide
                    prop_assert_eq!(removed, *count > 0);
                    if removed {
                        *count -= 1;
                    }
                }
            }
        }

        for (id, count) in &live {
            if *count > 0 {
                prop_assert!(filter.lookup(&key(*id)), "false negative for id {}", id);
            }
        }
    }

    /// Hashing is deterministic: two filters agree on every lookup
    #[test]
    fn prop_lookup_independent_of_seed(keys in prop::collection::vec(any::<Vec<u8>>(), 0..50)) {
        let mut a = CuckooFilter::<u8>::with_seed(16, 1).unwrap();
        let mut b = CuckooFilter::<u8>::with_seed(16, 2).unwrap();

        for k in &keys {
            a.insert(k).unwrap();
            b.insert(k).unwrap();
        }
        for k in &keys {
            prop_assert!(a.lookup(k));
            prop_assert!(b.lookup(k));
        }
        for probe in 0..64u32 {
            let probe = probe.to_be_bytes();
            prop_assert_eq!(a.lookup(&probe), b.lookup(&probe));
        }
    }
}
