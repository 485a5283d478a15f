//! refinable-hashset: thread-safe chained hash sets with graded lock
//! granularity, from one global mutex to per-bucket locks that resize with
//! the table.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: implement one set contract under four synchronization
//!   strategies so each protocol can be tested and benchmarked against the
//!   others, with the unsynchronized variant as the single-threaded oracle.
//! - Layers:
//!   - Table<T>: unsynchronized chained-bucket core (chain array plus an
//!     incrementally tracked count); placement, scanning, and rehashing
//!     live here once.
//!   - SequentialHashSet<T, S>: Table behind a RefCell. Single-threaded
//!     baseline; defines the resize policy everything else follows.
//!   - CoarseHashSet<T, S>: Table behind one Mutex. Fully serialized,
//!     no retry logic, resize inline in the triggering critical section.
//!   - StripedHashSet<T, S>: a fixed array of stripe locks, each owning
//!     the chains of the buckets mapped to it. Operations snapshot the
//!     capacity, lock the stripe, and revalidate; resize holds every
//!     stripe.
//!   - RefinableHashSet<T, S>: one lock per bucket, fused with its chain
//!     and grouped into a generation that is swapped atomically on resize.
//!     Operations detect a stale layout through a version stamp and retry;
//!     resize holds every bucket lock of the outgoing generation.
//!
//! Constraints
//! - Uniform contract: insert/remove/contains report their outcome through
//!   a bool; absence and duplication are ordinary results, never errors.
//! - Load factor is driven back into [1.0, 4.0]: grow doubles after an
//!   insert pushes it above 4.0, shrink halves after a remove drops it
//!   below 1.0, and capacity never goes below 4 buckets.
//! - len() under the concurrent variants is a relaxed atomic read, not a
//!   linearizable snapshot.
//! - At most one resize runs at a time in every variant; debug builds
//!   assert this through DebugExclusion instrumentation.
//! - Blocking is allowed everywhere; none of this is lock-free. Retry
//!   loops back off with a bounded spin, then yield.
//!
//! Why this split?
//! - Localize invariants: the chained core is written once and reasoned
//!   about sequentially; each concurrent variant only adds its
//!   coordination protocol.
//! - Structure follows ownership: a chain is only reachable through the
//!   lock that guards it (stripe-owned chain arrays, lock-fused buckets),
//!   so no data is shared outside its critical section.
//! - Interchangeability: all variants implement `Set`, so property tests
//!   drive them in lockstep against a model and against each other.
//!
//! Reclamation
//! - The refinable table never frees a lock a thread might still be
//!   blocked on: operations pin the generation they captured with an Arc,
//!   and a retired generation is dropped only when its last holder is
//!   done with it.
//!
//! Notes and non-goals
//! - No iteration, draining, or clearing; the surface is the membership
//!   contract plus capacity introspection.
//! - No cancellation or timeouts; operations run to completion.
//! - The sequential variant is deliberately !Sync (RefCell); the three
//!   locked variants are Send + Sync for Send element types.

mod coarse;
mod exclusion;
mod refinable;
mod sequential;
mod set;
mod striped;
mod table;
mod table_proptest;

// Public surface
pub use coarse::CoarseHashSet;
pub use exclusion::{DebugExclusion, ExclusionGuard};
pub use refinable::RefinableHashSet;
pub use sequential::SequentialHashSet;
pub use set::{Set, MAX_LOAD_FACTOR, MIN_BUCKETS, MIN_LOAD_FACTOR};
pub use striped::{StripedHashSet, DEFAULT_STRIPES};
