//! Coarse-grained set: one global lock around the whole table.
//!
//! Every operation, including the resize check embedded at the end of insert
//! and remove, runs under the same mutex, so all operations are fully
//! serialized and nothing can observe a structural change mid-flight.

use crate::set::{bucket_index, normalize_capacity, Set, MAX_LOAD_FACTOR, MIN_BUCKETS, MIN_LOAD_FACTOR};
use crate::table::Table;
use core::hash::{BuildHasher, Hash};
use parking_lot::Mutex;
use std::collections::hash_map::RandomState;

/// Chained hash set guarded by a single mutex.
pub struct CoarseHashSet<T, S = RandomState> {
    table: Mutex<Table<T>>,
    hasher: S,
}

impl<T: Hash + Eq> CoarseHashSet<T> {
    pub fn new() -> Self {
        Self::with_capacity(MIN_BUCKETS)
    }

    /// `capacity` is normalized: zero maps to the minimum bucket count and
    /// nothing goes below it.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, RandomState::new())
    }
}

impl<T: Hash + Eq> Default for CoarseHashSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S> CoarseHashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self {
            table: Mutex::new(Table::with_capacity(normalize_capacity(capacity))),
            hasher,
        }
    }

    pub fn insert(&self, elem: T) -> bool {
        let mut table = self.table.lock();
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
        let mut table = self.table.lock();
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
        let table = self.table.lock();
        let bucket = bucket_index(self.hasher.hash_one(elem), table.capacity());
        table.contains(bucket, elem)
    }

    /// Element count, read under the global lock like every other operation.
    pub fn len(&self) -> usize {
        self.table.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.table.lock().capacity()
    }
}

impl<T, S> Set<T> for CoarseHashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    fn insert(&self, elem: T) -> bool {
        CoarseHashSet::insert(self, elem)
    }

    fn remove(&self, elem: &T) -> bool {
        CoarseHashSet::remove(self, elem)
    }

    fn contains(&self, elem: &T) -> bool {
        CoarseHashSet::contains(self, elem)
    }

    fn len(&self) -> usize {
        CoarseHashSet::len(self)
    }

    fn capacity(&self) -> usize {
        CoarseHashSet::capacity(self)
    }
}
