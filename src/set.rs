//! The operation contract every set variant implements, plus the sizing
//! constants that drive resize decisions.

/// Fewest buckets a table ever has. Construction and shrink both floor here.
pub const MIN_BUCKETS: usize = 4;

/// Load factor above which a successful insert triggers a doubling resize.
pub const MAX_LOAD_FACTOR: f64 = 4.0;

/// Load factor below which a successful remove triggers a halving resize.
pub const MIN_LOAD_FACTOR: f64 = 1.0;

/// Normalize a requested capacity: zero means "pick a default", and nothing
/// goes below [`MIN_BUCKETS`].
pub(crate) fn normalize_capacity(capacity: usize) -> usize {
    if capacity == 0 {
        MIN_BUCKETS
    } else {
        capacity.max(MIN_BUCKETS)
    }
}

/// Bucket index of `hash` in a table with `capacity` buckets.
pub(crate) fn bucket_index(hash: u64, capacity: usize) -> usize {
    (hash % capacity as u64) as usize
}

/// Common surface of the set variants.
///
/// All methods take `&self`: the concurrent variants synchronize internally,
/// and the sequential baseline uses interior mutability (and stays `!Sync`).
/// "Already present" on insert and "absent" on remove/contains are ordinary
/// outcomes reported through the returned `bool`, never errors.
pub trait Set<T> {
    /// Insert `elem` if no equal element is present. Returns `true` iff the
    /// element was newly inserted; on `false` the set is unchanged.
    fn insert(&self, elem: T) -> bool;

    /// Remove the element equal to `elem`, if any. Returns `true` iff an
    /// element was removed.
    fn remove(&self, elem: &T) -> bool;

    /// Membership query with no structural side effect.
    fn contains(&self, elem: &T) -> bool;

    /// Current element count. Under the concurrent variants this is a
    /// point-in-time atomic read, not a snapshot coordinated with in-flight
    /// inserts and removes.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current bucket count.
    fn capacity(&self) -> usize;
}
