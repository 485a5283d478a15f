// Set contract test suite, applied to every variant.
//
// Each test documents what behavior is being verified. The core contract
// exercised:
// - insert returns true only for a newly inserted element; a duplicate
//   insert returns false and leaves the set unchanged.
// - remove returns true only when the element was present; len tracks
//   successful inserts and removes exactly.
// - contains has no structural side effects.
// - absence and duplication are ordinary boolean outcomes, never panics.
use refinable_hashset::{CoarseHashSet, RefinableHashSet, SequentialHashSet, Set, StripedHashSet};

// Verifies: insert on an empty set succeeds, is visible to contains, and
// len becomes 1.
fn first_insert<S: Set<u64>>(set: S) {
    assert!(set.is_empty());
    assert!(set.insert(7));
    assert!(set.contains(&7));
    assert_eq!(set.len(), 1);
}

// Verifies: second insert of an equal element returns false with len
// unchanged between the calls.
fn duplicate_insert<S: Set<u64>>(set: S) {
    assert!(set.insert(42));
    let len_before = set.len();
    assert!(!set.insert(42));
    assert_eq!(set.len(), len_before);
    assert!(set.contains(&42));
}

// Verifies: removing an absent element is a false no-op; removing a present
// element decrements len and makes contains false.
fn remove_present_and_absent<S: Set<u64>>(set: S) {
    assert!(!set.remove(&5));
    assert_eq!(set.len(), 0);

    assert!(set.insert(5));
    assert!(set.insert(6));
    assert!(set.remove(&5));
    assert_eq!(set.len(), 1);
    assert!(!set.contains(&5));
    assert!(set.contains(&6));
    assert!(!set.remove(&5));
    assert_eq!(set.len(), 1);
}

// Verifies: a long fill keeps every element findable across the grows it
// forces, and draining back down empties the set cleanly.
fn fill_and_drain<S: Set<u64>>(set: S) {
    const N: u64 = 400;
    for v in 0..N {
        assert!(set.insert(v));
    }
    assert_eq!(set.len(), N as usize);
    for v in 0..N {
        assert!(set.contains(&v));
    }
    assert!(!set.contains(&N));

    for v in (N / 8)..N {
        assert!(set.remove(&v));
    }
    assert_eq!(set.len(), (N / 8) as usize);
    for v in 0..N / 8 {
        assert!(set.contains(&v));
    }
    for v in N / 8..N {
        assert!(!set.contains(&v));
    }
}

#[test]
fn sequential_first_insert() {
    first_insert(SequentialHashSet::new());
}

#[test]
fn coarse_first_insert() {
    first_insert(CoarseHashSet::new());
}

#[test]
fn striped_first_insert() {
    first_insert(StripedHashSet::new());
}

#[test]
fn refinable_first_insert() {
    first_insert(RefinableHashSet::new());
}

#[test]
fn sequential_duplicate_insert() {
    duplicate_insert(SequentialHashSet::new());
}

#[test]
fn coarse_duplicate_insert() {
    duplicate_insert(CoarseHashSet::new());
}

#[test]
fn striped_duplicate_insert() {
    duplicate_insert(StripedHashSet::new());
}

#[test]
fn refinable_duplicate_insert() {
    duplicate_insert(RefinableHashSet::new());
}

#[test]
fn sequential_remove_present_and_absent() {
    remove_present_and_absent(SequentialHashSet::new());
}

#[test]
fn coarse_remove_present_and_absent() {
    remove_present_and_absent(CoarseHashSet::new());
}

#[test]
fn striped_remove_present_and_absent() {
    remove_present_and_absent(StripedHashSet::new());
}

#[test]
fn refinable_remove_present_and_absent() {
    remove_present_and_absent(RefinableHashSet::new());
}

#[test]
fn sequential_fill_and_drain() {
    fill_and_drain(SequentialHashSet::new());
}

#[test]
fn coarse_fill_and_drain() {
    fill_and_drain(CoarseHashSet::new());
}

#[test]
fn striped_fill_and_drain() {
    fill_and_drain(StripedHashSet::new());
}

#[test]
fn refinable_fill_and_drain() {
    fill_and_drain(RefinableHashSet::new());
}

// Verifies: owned element types work through the same contract (the sets
// are generic over T, not specialized to integers).
#[test]
fn string_elements() {
    let set = StripedHashSet::new();
    assert!(set.insert("alpha".to_string()));
    assert!(set.insert("beta".to_string()));
    assert!(!set.insert("alpha".to_string()));
    assert!(set.contains(&"beta".to_string()));
    assert!(set.remove(&"alpha".to_string()));
    assert_eq!(set.len(), 1);
}
