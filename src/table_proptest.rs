#![cfg(test)]

// Property tests for the Table core kept inside the crate so they can reach
// crate-private internals without feature gates.

use crate::set::{bucket_index, MIN_BUCKETS};
use crate::table::Table;
use proptest::prelude::*;
use std::collections::hash_map::RandomState;
use std::collections::HashSet;
use std::hash::BuildHasher;

fn index_of(hasher: &RandomState, elem: &u64, capacity: usize) -> usize {
    bucket_index(hasher.hash_one(elem), capacity)
}

proptest! {
    // Drive Table and std's HashSet with the same operations; every return
    // value and the running len must agree. Ops 3/4 rehash up/down to check
    // that placement survives capacity changes in both directions.
    #[test]
    fn prop_table_matches_std_set(ops in proptest::collection::vec((0u8..=4u8, 0u64..32u64), 1..200)) {
        let hasher = RandomState::new();
        let mut table: Table<u64> = Table::with_capacity(MIN_BUCKETS);
        let mut model: HashSet<u64> = HashSet::new();

        for (op, v) in ops {
            let capacity = table.capacity();
            match op {
                0 => prop_assert_eq!(
                    table.insert(index_of(&hasher, &v, capacity), v),
                    model.insert(v)
                ),
                1 => prop_assert_eq!(
                    table.remove(index_of(&hasher, &v, capacity), &v),
                    model.remove(&v)
                ),
                2 => prop_assert_eq!(
                    table.contains(index_of(&hasher, &v, capacity), &v),
                    model.contains(&v)
                ),
                3 => {
                    let target = capacity * 2;
                    table.rehash(target, |e| index_of(&hasher, e, target));
                }
                _ => {
                    let target = (capacity / 2).max(MIN_BUCKETS);
                    table.rehash(target, |e| index_of(&hasher, e, target));
                }
            }
            prop_assert_eq!(table.len(), model.len());
        }

        // Full membership sweep at the final capacity.
        let capacity = table.capacity();
        for v in 0u64..32 {
            prop_assert_eq!(
                table.contains(index_of(&hasher, &v, capacity), &v),
                model.contains(&v)
            );
        }
    }

    // A rehash is placement-only: it must never create, lose, or duplicate
    // elements, whatever the capacity trajectory.
    #[test]
    fn prop_rehash_preserves_membership(
        elems in proptest::collection::hash_set(0u64..1000u64, 0..120),
        capacities in proptest::collection::vec(1usize..6usize, 1..6),
    ) {
        let hasher = RandomState::new();
        let mut table: Table<u64> = Table::with_capacity(MIN_BUCKETS);
        for v in &elems {
            prop_assert!(table.insert(index_of(&hasher, v, table.capacity()), *v));
        }
        for doublings in capacities {
            let target = MIN_BUCKETS << doublings;
            table.rehash(target, |e| index_of(&hasher, e, target));
            prop_assert_eq!(table.capacity(), target);
            prop_assert_eq!(table.len(), elems.len());
            for v in &elems {
                prop_assert!(table.contains(index_of(&hasher, v, target), v));
            }
        }
    }
}
