//! Refinable set: one lock per bucket, with the lock array resized in
//! lockstep with the buckets.
//!
//! A bucket and its lock are fused (`Mutex<Vec<T>>`) and the whole array
//! forms a [`Generation`], replaced atomically on resize through an
//! [`ArcSwap`]. Element operations take only their bucket's lock and detect
//! a concurrent resize optimistically: they read a version stamp before
//! computing the bucket layout, and re-check it (plus the foreign-resize
//! flag) once the lock is held. A mismatch means the captured layout went
//! stale, so the operation releases and retries against the fresh one.
//!
//! A resize takes the dedicated resize mutex, records its thread as owner,
//! raises the resizing flag, and then holds every bucket lock of the
//! outgoing generation for the entire migration. The owner record lets the
//! resizing thread pass its own "someone is resizing" gate, so triggering a
//! resize from inside insert or remove cannot self-deadlock. The version
//! stamp is bumped exactly once per completed resize, after the new
//! generation is published and before the old locks are released.
//!
//! Retired generations are reclaimed by reference counting: an operation
//! that loaded a generation keeps it, and the lock it may be blocked on,
//! alive until it retries or completes. No lock object is destroyed while a
//! thread could still be touching it.

use crate::exclusion::DebugExclusion;
use crate::set::{bucket_index, normalize_capacity, Set, MAX_LOAD_FACTOR, MIN_BUCKETS, MIN_LOAD_FACTOR};
use arc_swap::ArcSwap;
use core::hash::{BuildHasher, Hash};
use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use crossbeam_utils::Backoff;
use parking_lot::Mutex;
use std::collections::hash_map::RandomState;
use std::sync::Arc;
use std::thread::{self, ThreadId};

/// One bucket-plus-lock array. The chain for bucket `i` lives inside lock
/// `i`, so the two arrays can never disagree on length.
struct Generation<T> {
    buckets: Box<[Mutex<Vec<T>>]>,
}

impl<T> Generation<T> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            buckets: (0..capacity).map(|_| Mutex::new(Vec::new())).collect(),
        }
    }

    fn capacity(&self) -> usize {
        self.buckets.len()
    }
}

/// Chained hash set with per-bucket locks that resize with the table.
pub struct RefinableHashSet<T, S = RandomState> {
    current: ArcSwap<Generation<T>>,
    len: AtomicUsize,
    /// Bumped exactly once per completed resize, after the new generation
    /// is published.
    version: AtomicUsize,
    /// Serializes resizers; element operations never take it.
    resize_lock: Mutex<()>,
    /// True while a resize is migrating. Operations started by other
    /// threads back off instead of queueing on locks about to retire.
    resizing: AtomicBool,
    /// Identity of the thread owning the in-flight resize. Read only after
    /// `resizing` was observed set.
    resize_owner: Mutex<Option<ThreadId>>,
    resize_exclusion: DebugExclusion,
    hasher: S,
}

impl<T: Hash + Eq> RefinableHashSet<T> {
    pub fn new() -> Self {
        Self::with_capacity(MIN_BUCKETS)
    }

    /// `capacity` is normalized: zero maps to the minimum bucket count and
    /// nothing goes below it.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, RandomState::new())
    }
}

impl<T: Hash + Eq> Default for RefinableHashSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S> RefinableHashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self {
            current: ArcSwap::from_pointee(Generation::with_capacity(normalize_capacity(
                capacity,
            ))),
            len: AtomicUsize::new(0),
            version: AtomicUsize::new(0),
            resize_lock: Mutex::new(()),
            resizing: AtomicBool::new(false),
            resize_owner: Mutex::new(None),
            resize_exclusion: DebugExclusion::new(),
            hasher,
        }
    }

    pub fn insert(&self, elem: T) -> bool {
        let hash = self.hasher.hash_one(&elem);
        let used_capacity = loop {
            self.wait_for_foreign_resize();
            let version_before = self.version.load(Ordering::Acquire);
            let generation = self.current.load_full();
            let capacity = generation.capacity();
            let mut chain = generation.buckets[bucket_index(hash, capacity)].lock();
            if self.version.load(Ordering::Acquire) != version_before
                || self.foreign_resize_active()
            {
                continue; // layout went stale between the stamp read and the lock
            }
            if chain.contains(&elem) {
                return false;
            }
            chain.push(elem);
            self.len.fetch_add(1, Ordering::Relaxed);
            break capacity;
        };
        // Evaluate the trigger against the capacity the insert ran under,
        // not a fresh read that could race with a resize it never observed.
        if !self.foreign_resize_active() && self.load_factor(used_capacity) > MAX_LOAD_FACTOR {
            self.resize(used_capacity * 2);
        }
        true
    }

    pub fn remove(&self, elem: &T) -> bool {
        let hash = self.hasher.hash_one(elem);
        let used_capacity = loop {
            self.wait_for_foreign_resize();
            let version_before = self.version.load(Ordering::Acquire);
            let generation = self.current.load_full();
            let capacity = generation.capacity();
            let mut chain = generation.buckets[bucket_index(hash, capacity)].lock();
            if self.version.load(Ordering::Acquire) != version_before
                || self.foreign_resize_active()
            {
                continue;
            }
            match chain.iter().position(|e| e == elem) {
                Some(at) => {
                    chain.swap_remove(at);
                    self.len.fetch_sub(1, Ordering::Relaxed);
                    break capacity;
                }
                None => return false,
            }
        };
        if !self.foreign_resize_active() && self.load_factor(used_capacity) < MIN_LOAD_FACTOR {
            self.resize(used_capacity / 2);
        }
        true
    }

    pub fn contains(&self, elem: &T) -> bool {
        let hash = self.hasher.hash_one(elem);
        loop {
            self.wait_for_foreign_resize();
            let version_before = self.version.load(Ordering::Acquire);
            let generation = self.current.load_full();
            let chain = generation.buckets[bucket_index(hash, generation.capacity())].lock();
            if self.version.load(Ordering::Acquire) != version_before
                || self.foreign_resize_active()
            {
                continue;
            }
            return chain.contains(elem);
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
        self.current.load().capacity()
    }

    /// Resizes completed so far. Monotonically increasing.
    pub fn version(&self) -> usize {
        self.version.load(Ordering::Acquire)
    }

    fn load_factor(&self, capacity: usize) -> f64 {
        self.len.load(Ordering::Relaxed) as f64 / capacity as f64
    }

    /// True while a resize owned by a different thread is in flight. The
    /// owner check is what lets a resizing thread pass its own gate.
    fn foreign_resize_active(&self) -> bool {
        if !self.resizing.load(Ordering::Acquire) {
            return false;
        }
        *self.resize_owner.lock() != Some(thread::current().id())
    }

    /// Bounded spin, then voluntary yield, until no other thread is
    /// resizing. Blocked waiters resume promptly once the resize ends.
    fn wait_for_foreign_resize(&self) {
        let backoff = Backoff::new();
        while self.foreign_resize_active() {
            backoff.snooze();
        }
    }

    /// Migrate to a generation with `target` buckets. One resize at a time;
    /// every bucket lock of the outgoing generation is held for the whole
    /// migration.
    fn resize(&self, target: usize) {
        let _resizer = self.resize_lock.lock();
        let target = normalize_capacity(target);
        let outgoing = self.current.load_full();
        if outgoing.capacity() == target {
            return; // another resizer got there first
        }

        *self.resize_owner.lock() = Some(thread::current().id());
        self.resizing.store(true, Ordering::Release);
        let _exclusive = self.resize_exclusion.enter();

        // Every bucket of the outgoing generation, in index order.
        let mut guards: Vec<_> = outgoing.buckets.iter().map(|b| b.lock()).collect();

        let mut chains: Vec<Vec<T>> = (0..target).map(|_| Vec::new()).collect();
        for guard in guards.iter_mut() {
            for elem in guard.drain(..) {
                chains[bucket_index(self.hasher.hash_one(&elem), target)].push(elem);
            }
        }
        self.current.store(Arc::new(Generation {
            buckets: chains.into_iter().map(Mutex::new).collect(),
        }));
        self.version.fetch_add(1, Ordering::AcqRel);

        // Old locks are released only after the swap and the stamp are
        // visible; the Arc keeps the retired array alive for any thread
        // still blocked on one of its locks.
        drop(guards);
        self.resizing.store(false, Ordering::Release);
        *self.resize_owner.lock() = None;
    }
}

impl<T, S> Set<T> for RefinableHashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    fn insert(&self, elem: T) -> bool {
        RefinableHashSet::insert(self, elem)
    }

    fn remove(&self, elem: &T) -> bool {
        RefinableHashSet::remove(self, elem)
    }

    fn contains(&self, elem: &T) -> bool {
        RefinableHashSet::contains(self, elem)
    }

    fn len(&self) -> usize {
        RefinableHashSet::len(self)
    }

    fn capacity(&self) -> usize {
        RefinableHashSet::capacity(self)
    }
}
