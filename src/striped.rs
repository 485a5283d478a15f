//! Lock-striped set: a fixed array of stripe locks, independent of the
//! bucket count.
//!
//! Bucket `b` belongs to stripe `b % stripe_count` and sits at slot
//! `b / stripe_count` inside it. Each stripe mutex owns the chains mapped to
//! it, so a chain is reachable only through its lock. The bucket count lives
//! in an atomic and changes only while every stripe is held, which is what
//! makes the snapshot / lock / revalidate protocol sound: once a stripe is
//! held, a capacity that still matches the snapshot cannot change under the
//! operation.
//!
//! Two buckets on the same stripe serialize even when the operations target
//! different buckets; that false contention is the price of a lock count
//! fixed at construction.

use crate::exclusion::DebugExclusion;
use crate::set::{bucket_index, normalize_capacity, Set, MAX_LOAD_FACTOR, MIN_BUCKETS, MIN_LOAD_FACTOR};
use core::hash::{BuildHasher, Hash};
use core::sync::atomic::{AtomicUsize, Ordering};
use parking_lot::Mutex;
use std::collections::hash_map::RandomState;

/// Stripe count used when the caller does not pick one.
pub const DEFAULT_STRIPES: usize = 64;

/// Chained hash set with a fixed number of stripe locks.
pub struct StripedHashSet<T, S = RandomState> {
    stripes: Box<[Mutex<Vec<Vec<T>>>]>,
    /// Current bucket count. Stored only while every stripe lock is held.
    capacity: AtomicUsize,
    len: AtomicUsize,
    /// Serializes resizes; element operations never touch it.
    resize_lock: Mutex<()>,
    resize_exclusion: DebugExclusion,
    hasher: S,
}

/// Number of chains stripe `stripe` holds in a table of `capacity` buckets
/// spread over `stripes` stripes.
fn chains_in_stripe(stripe: usize, stripes: usize, capacity: usize) -> usize {
    if stripe < capacity {
        (capacity - stripe - 1) / stripes + 1
    } else {
        0
    }
}

fn build_stripes<T>(stripes: usize, capacity: usize) -> Box<[Mutex<Vec<Vec<T>>>]> {
    (0..stripes)
        .map(|s| {
            let chains = (0..chains_in_stripe(s, stripes, capacity))
                .map(|_| Vec::new())
                .collect();
            Mutex::new(chains)
        })
        .collect()
}

impl<T: Hash + Eq> StripedHashSet<T> {
    pub fn new() -> Self {
        Self::with_capacity(MIN_BUCKETS)
    }

    /// `capacity` is normalized like everywhere else; the stripe count is
    /// [`DEFAULT_STRIPES`].
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_stripes(capacity, DEFAULT_STRIPES)
    }

    /// `stripes == 0` normalizes to [`DEFAULT_STRIPES`].
    pub fn with_stripes(capacity: usize, stripes: usize) -> Self {
        Self::with_stripes_and_hasher(capacity, stripes, RandomState::new())
    }
}

impl<T: Hash + Eq> Default for StripedHashSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S> StripedHashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self::with_stripes_and_hasher(capacity, DEFAULT_STRIPES, hasher)
    }

    pub fn with_stripes_and_hasher(capacity: usize, stripes: usize, hasher: S) -> Self {
        let capacity = normalize_capacity(capacity);
        let stripes = if stripes == 0 { DEFAULT_STRIPES } else { stripes };
        Self {
            stripes: build_stripes(stripes, capacity),
            capacity: AtomicUsize::new(capacity),
            len: AtomicUsize::new(0),
            resize_lock: Mutex::new(()),
            resize_exclusion: DebugExclusion::new(),
            hasher,
        }
    }

    pub fn stripe_count(&self) -> usize {
        self.stripes.len()
    }

    pub fn insert(&self, elem: T) -> bool {
        let hash = self.hasher.hash_one(&elem);
        let used_capacity = loop {
            let capacity = self.capacity.load(Ordering::Acquire);
            let bucket = bucket_index(hash, capacity);
            let mut stripe = self.stripes[bucket % self.stripes.len()].lock();
            // A resize may have run between the snapshot and the lock; the
            // computed bucket is stale in that case.
            if self.capacity.load(Ordering::Acquire) != capacity {
                continue;
            }
            let chain = &mut stripe[bucket / self.stripes.len()];
            if chain.contains(&elem) {
                return false;
            }
            chain.push(elem);
            self.len.fetch_add(1, Ordering::Relaxed);
            break capacity;
        };
        if self.load_factor(used_capacity) > MAX_LOAD_FACTOR {
            self.resize(used_capacity * 2);
        }
        true
    }

    pub fn remove(&self, elem: &T) -> bool {
        let hash = self.hasher.hash_one(elem);
        let used_capacity = loop {
            let capacity = self.capacity.load(Ordering::Acquire);
            let bucket = bucket_index(hash, capacity);
            let mut stripe = self.stripes[bucket % self.stripes.len()].lock();
            if self.capacity.load(Ordering::Acquire) != capacity {
                continue;
            }
            let chain = &mut stripe[bucket / self.stripes.len()];
            match chain.iter().position(|e| e == elem) {
                Some(at) => {
                    chain.swap_remove(at);
                    self.len.fetch_sub(1, Ordering::Relaxed);
                    break capacity;
                }
                None => return false,
            }
        };
        if self.load_factor(used_capacity) < MIN_LOAD_FACTOR && used_capacity > MIN_BUCKETS {
            self.resize(used_capacity / 2);
        }
        true
    }

    pub fn contains(&self, elem: &T) -> bool {
        let hash = self.hasher.hash_one(elem);
        loop {
            let capacity = self.capacity.load(Ordering::Acquire);
            let bucket = bucket_index(hash, capacity);
            let stripe = self.stripes[bucket % self.stripes.len()].lock();
            if self.capacity.load(Ordering::Acquire) != capacity {
                continue;
            }
            return stripe[bucket / self.stripes.len()].contains(elem);
        }
    }

    /// Relaxed atomic read; not coordinated with in-flight mutations.
    pub fn len(&self) -> usize {
        self.len.load(Ordering::Relaxed)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity.load(Ordering::Acquire)
    }

    /// Approximate load factor over the capacity the operation ran under;
    /// exactness is not required for a resize trigger.
    fn load_factor(&self, capacity: usize) -> f64 {
        self.len.load(Ordering::Relaxed) as f64 / capacity as f64
    }

    /// Rebuild the table with `target` buckets. One resize at a time; every
    /// stripe is held for the whole migration.
    fn resize(&self, target: usize) {
        let _resizer = self.resize_lock.lock();
        let target = normalize_capacity(target);
        // Another thread may already have driven capacity to the target.
        if self.capacity.load(Ordering::Acquire) == target {
            return;
        }
        let _exclusive = self.resize_exclusion.enter();

        // Index order gives the fixed global acquisition order.
        let mut guards: Vec<_> = self.stripes.iter().map(|s| s.lock()).collect();
        let stripes = self.stripes.len();

        let mut elems = Vec::with_capacity(self.len.load(Ordering::Relaxed));
        for guard in guards.iter_mut() {
            for chain in guard.iter_mut() {
                elems.append(chain);
            }
        }
        for (s, guard) in guards.iter_mut().enumerate() {
            **guard = (0..chains_in_stripe(s, stripes, target))
                .map(|_| Vec::new())
                .collect();
        }
        for elem in elems {
            let bucket = bucket_index(self.hasher.hash_one(&elem), target);
            guards[bucket % stripes][bucket / stripes].push(elem);
        }
        self.capacity.store(target, Ordering::Release);
    }
}

impl<T, S> Set<T> for StripedHashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    fn insert(&self, elem: T) -> bool {
        StripedHashSet::insert(self, elem)
    }

    fn remove(&self, elem: &T) -> bool {
        StripedHashSet::remove(self, elem)
    }

    fn contains(&self, elem: &T) -> bool {
        StripedHashSet::contains(self, elem)
    }

    fn len(&self) -> usize {
        StripedHashSet::len(self)
    }

    fn capacity(&self) -> usize {
        StripedHashSet::capacity(self)
    }
}
