use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use perfect_hash_set::{PerfectHashSet, PerfectHashSetLike, ReferenceSet};

fn dense_universe(size: usize) -> Vec<u32> {
    (0..size as u32).map(|i| i.wrapping_mul(2_654_435_761)).collect()
}

fn construction_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");

    for size in [100usize, 1_000, 10_000].iter() {
        let universe = dense_universe(*size);

        group.bench_with_input(BenchmarkId::new("perfect_hash_set", size), size, |b, _| {
            b.iter(|| black_box(PerfectHashSet::init_with_seed(black_box(&universe), 1).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("reference_set", size), size, |b, _| {
            b.iter(|| black_box(ReferenceSet::init(black_box(&universe)).unwrap()))
        });
    }

    group.finish();
}

fn lookup_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookups");

    let universe = dense_universe(10_000);
    let phs = PerfectHashSet::init_with_seed(&universe, 1).unwrap();
    let oracle = ReferenceSet::init(&universe).unwrap();
    let probe = universe[5_000];

    group.bench_function("perfect_hash_set_find", |b| {
        b.iter(|| black_box(phs.find(black_box(probe)).unwrap()))
    });
    group.bench_function("reference_set_find", |b| {
        b.iter(|| black_box(oracle.find(black_box(probe)).unwrap()))
    });
    group.bench_function("perfect_hash_set_is_possible", |b| {
        b.iter(|| black_box(phs.is_possible(black_box(probe))))
    });
    group.bench_function("reference_set_is_possible", |b| {
        b.iter(|| black_box(oracle.is_possible(black_box(probe))))
    });

    group.finish();
}

fn insert_erase_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_erase");

    let universe = dense_universe(10_000);
    let probe = universe[5_000];

    group.bench_function("perfect_hash_set_insert_then_erase", |b| {
        let mut phs = PerfectHashSet::init_with_seed(&universe, 1).unwrap();
        b.iter(|| {
            phs.insert(black_box(probe)).unwrap();
            phs.erase(black_box(probe)).unwrap();
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    construction_benchmark,
    lookup_benchmark,
    insert_erase_benchmark
);
criterion_main!(benches);
