//! Unsynchronized baseline defining single-threaded behavior and the resize
//! policy the locked variants follow.

use crate::set::{bucket_index, normalize_capacity, Set, MAX_LOAD_FACTOR, MIN_BUCKETS, MIN_LOAD_FACTOR};
use crate::table::Table;
use core::cell::RefCell;
use core::hash::{BuildHasher, Hash};
use std::collections::hash_map::RandomState;

/// Sequential chained hash set.
///
/// Interior mutability satisfies the shared `&self` contract while `RefCell`
/// keeps the type `!Sync`; an `Eq` implementation that reenters the set
/// mid-scan trips a borrow panic instead of corrupting the table.
pub struct SequentialHashSet<T, S = RandomState> {
    table: RefCell<Table<T>>,
    hasher: S,
}

impl<T: Hash + Eq> SequentialHashSet<T> {
    pub fn new() -> Self {
        Self::with_capacity(MIN_BUCKETS)
    }

    /// `capacity` is normalized: zero maps to the minimum bucket count and
    /// nothing goes below it.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, RandomState::new())
    }
}

impl<T: Hash + Eq> Default for SequentialHashSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S> SequentialHashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self {
            table: RefCell::new(Table::with_capacity(normalize_capacity(capacity))),
            hasher,
        }
    }

    pub fn insert(&self, elem: T) -> bool {
        let mut table = self.table.borrow_mut();
        let bucket = bucket_index(self.hasher.hash_one(&elem), table.capacity());
        if !table.insert(bucket, elem) {
            return false;
        }
        if table.load_factor() > MAX_LOAD_FACTOR {
            let target = table.capacity() * 2;
            table.rehash(target, |e| bucket_index(self.hasher.hash_one(e), target));
        }
        true
    }

    pub fn remove(&self, elem: &T) -> bool {
        let mut table = self.table.borrow_mut();
        let bucket = bucket_index(self.hasher.hash_one(elem), table.capacity());
        if !table.remove(bucket, elem) {
            return false;
        }
        if table.load_factor() < MIN_LOAD_FACTOR && table.capacity() > MIN_BUCKETS {
            let target = (table.capacity() / 2).max(MIN_BUCKETS);
            table.rehash(target, |e| bucket_index(self.hasher.hash_one(e), target));
        }
        true
    }

    pub fn contains(&self, elem: &T) -> bool {
        let table = self.table.borrow();
        let bucket = bucket_index(self.hasher.hash_one(elem), table.capacity());
        table.contains(bucket, elem)
    }

    pub fn len(&self) -> usize {
        self.table.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.table.borrow().capacity()
    }
}

impl<T, S> Set<T> for SequentialHashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    fn insert(&self, elem: T) -> bool {
        SequentialHashSet::insert(self, elem)
    }

    fn remove(&self, elem: &T) -> bool {
        SequentialHashSet::remove(self, elem)
    }

    fn contains(&self, elem: &T) -> bool {
        SequentialHashSet::contains(self, elem)
    }

    fn len(&self) -> usize {
        SequentialHashSet::len(self)
    }

    fn capacity(&self) -> usize {
        SequentialHashSet::capacity(self)
    }
}

#[cfg(test)]
mod tests {
    use super::SequentialHashSet;
    use crate::set::MIN_BUCKETS;

    #[test]
    fn grow_doubles_capacity() {
        let set = SequentialHashSet::new();
        for v in 0..17u64 {
            assert!(set.insert(v));
        }
        // 17 elements over 4 buckets crosses the 4.0 threshold once.
        assert_eq!(set.capacity(), 8);
        assert_eq!(set.len(), 17);
    }

    #[test]
    fn shrink_floors_at_minimum() {
        let set = SequentialHashSet::new();
        for v in 0..64u64 {
            assert!(set.insert(v));
        }
        for v in 0..64u64 {
            assert!(set.remove(&v));
        }
        assert!(set.is_empty());
        assert_eq!(set.capacity(), MIN_BUCKETS);
    }
}
