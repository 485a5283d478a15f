//! Chained-bucket core shared by the sequential and coarse-grained sets.
//!
//! `Table` owns the chain array and the incrementally tracked element count.
//! Callers own the hasher and hand in precomputed bucket indices; the table
//! owns placement, linear scanning, and rehashing. Chains are unordered, so
//! removal uses `swap_remove`.

use crate::set::MIN_BUCKETS;

#[derive(Debug)]
pub(crate) struct Table<T> {
    chains: Vec<Vec<T>>,
    len: usize,
}

impl<T: Eq> Table<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        debug_assert!(capacity >= MIN_BUCKETS);
        Self {
            chains: (0..capacity).map(|_| Vec::new()).collect(),
            len: 0,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.chains.len()
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn load_factor(&self) -> f64 {
        self.len as f64 / self.chains.len() as f64
    }

    pub(crate) fn contains(&self, bucket: usize, elem: &T) -> bool {
        self.chains[bucket].contains(elem)
    }

    /// Insert into `bucket` unless an equal element is already chained there.
    pub(crate) fn insert(&mut self, bucket: usize, elem: T) -> bool {
        let chain = &mut self.chains[bucket];
        if chain.contains(&elem) {
            return false;
        }
        chain.push(elem);
        self.len += 1;
        true
    }

    pub(crate) fn remove(&mut self, bucket: usize, elem: &T) -> bool {
        let chain = &mut self.chains[bucket];
        match chain.iter().position(|e| e == elem) {
            Some(at) => {
                chain.swap_remove(at);
                self.len -= 1;
                true
            }
            None => false,
        }
    }

    /// Rehash every element into `new_capacity` chains. `index_of` must be
    /// the placement rule the caller will use for lookups afterwards.
    pub(crate) fn rehash<F>(&mut self, new_capacity: usize, mut index_of: F)
    where
        F: FnMut(&T) -> usize,
    {
        debug_assert!(new_capacity >= MIN_BUCKETS);
        let mut fresh: Vec<Vec<T>> = (0..new_capacity).map(|_| Vec::new()).collect();
        for chain in self.chains.drain(..) {
            for elem in chain {
                fresh[index_of(&elem)].push(elem);
            }
        }
        self.chains = fresh;
        debug_assert_eq!(self.len, self.chains.iter().map(Vec::len).sum::<usize>());
    }
}
