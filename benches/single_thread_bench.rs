use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use refinable_hashset::{CoarseHashSet, RefinableHashSet, SequentialHashSet, Set, StripedHashSet};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn bench_insert_10k<S, F>(c: &mut Criterion, name: &str, make: F)
where
    S: Set<u64>,
    F: Fn() -> S + Copy,
{
    c.bench_function(name, |b| {
        b.iter_batched(
            make,
            |set| {
                for x in lcg(1).take(10_000) {
                    set.insert(x);
                }
                black_box(set)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_inserts(c: &mut Criterion) {
    bench_insert_10k(c, "sequential_insert_10k", SequentialHashSet::new);
    bench_insert_10k(c, "coarse_insert_10k", CoarseHashSet::new);
    bench_insert_10k(c, "striped_insert_10k", StripedHashSet::new);
    bench_insert_10k(c, "refinable_insert_10k", RefinableHashSet::new);
}

fn bench_contains_hit(c: &mut Criterion) {
    let set = RefinableHashSet::new();
    let keys: Vec<u64> = lcg(7).take(20_000).collect();
    for &k in &keys {
        set.insert(k);
    }
    let mut it = keys.iter().cycle();
    c.bench_function("refinable_contains_hit", |b| {
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(set.contains(k));
        })
    });
}

fn bench_contains_miss(c: &mut Criterion) {
    let set = StripedHashSet::new();
    for k in lcg(11).take(10_000) {
        set.insert(k);
    }
    let mut miss = lcg(0xdead_beef);
    c.bench_function("striped_contains_miss", |b| {
        b.iter(|| {
            // keys unlikely to be in the set
            let k = miss.next().unwrap();
            black_box(set.contains(&k));
        })
    });
}

fn bench_insert_remove_cycle(c: &mut Criterion) {
    let set = RefinableHashSet::new();
    for k in lcg(3).take(4_096) {
        set.insert(k);
    }
    let mut n = 0u64;
    c.bench_function("refinable_insert_remove_cycle", |b| {
        b.iter(|| {
            n = n.wrapping_add(1);
            set.insert(n);
            set.remove(&n);
        })
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_inserts, bench_contains_hit, bench_contains_miss, bench_insert_remove_cycle
}
criterion_main!(benches);
