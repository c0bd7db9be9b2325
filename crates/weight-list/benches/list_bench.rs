//! Benchmarks for the core list operations across list sizes.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use weight_list::TreeList;

fn bench_push(c: &mut Criterion) {
    let mut group = c.benchmark_group("push");
    for size in [100usize, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let mut list = TreeList::<u64>::new();
                for v in 0..size as u64 {
                    list = list.push(v);
                }
                std::hint::black_box(list.len())
            });
        });
    }
    group.finish();
}

fn bench_random_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_insert");
    for size in [1_000usize, 10_000] {
        let base: TreeList<u64> = TreeList::from_exact_iter((0..size).map(|v| v as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            let mut rng = StdRng::seed_from_u64(7);
            b.iter(|| {
                let pos = rng.gen_range(0..=base.len());
                std::hint::black_box(base.insert(pos, 0).unwrap().len())
            });
        });
    }
    group.finish();
}

fn bench_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("get");
    for size in [1_000usize, 100_000] {
        let list: TreeList<u64> = TreeList::from_exact_iter((0..size).map(|v| v as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            let mut rng = StdRng::seed_from_u64(7);
            b.iter(|| {
                let pos = rng.gen_range(0..list.len());
                std::hint::black_box(list.get(pos))
            });
        });
    }
    group.finish();
}

fn bench_iterate(c: &mut Criterion) {
    let list: TreeList<u64> = TreeList::from_exact_iter((0..100_000usize).map(|v| v as u64));
    c.bench_function("iterate_100k", |b| {
        b.iter(|| std::hint::black_box(list.iter().copied().sum::<u64>()));
    });
}

criterion_group!(benches, bench_push, bench_random_insert, bench_get, bench_iterate);
criterion_main!(benches);
