use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use multistate::{StateCell, StateRegistry};

fn cell_read_benchmark(c: &mut Criterion) {
    let cell: StateCell<i32> = StateCell::with_value(42);

    c.bench_function("cell_read", |b| {
        b.iter(|| {
            black_box(cell.get());
        });
    });
}

fn cell_write_benchmark(c: &mut Criterion) {
    let cell: StateCell<i32> = StateCell::empty();

    c.bench_function("cell_write", |b| {
        let mut i = 0;
        b.iter(|| {
            cell.set(black_box(i));
            i += 1;
        });
    });
}

fn handle_get_benchmark(c: &mut Criterion) {
    let registry = StateRegistry::new();
    let handle = registry.handle();
    handle.set("counter", 0, 42i32).unwrap();

    c.bench_function("handle_get", |b| {
        b.iter(|| {
            black_box(handle.get::<i32>("counter", 0).unwrap());
        });
    });
}

fn handle_set_benchmark(c: &mut Criterion) {
    let registry = StateRegistry::new();
    let handle = registry.handle();

    c.bench_function("handle_set", |b| {
        let mut i = 0;
        b.iter(|| {
            handle.set("counter", 0, black_box(i)).unwrap();
            i += 1;
        });
    });
}

fn handle_churn_benchmark(c: &mut Criterion) {
    let registry = StateRegistry::new();
    // Anchor handle so the entry survives every transient release.
    let anchor = registry.handle();
    anchor.set("shared", 0, 0usize).unwrap();

    c.bench_function("handle_churn", |b| {
        b.iter(|| {
            let transient = registry.handle();
            let _cell = transient.get::<usize>("shared", 0).unwrap();
            transient.release();
        });
    });
}

fn cell_subscribe_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("cell_subscribe");

    for subscriber_count in [1, 10, 100].iter() {
        let cell: StateCell<usize> = StateCell::empty();

        for _ in 0..*subscriber_count {
            cell.subscribe(|_| {
                // Empty subscriber
            });
        }

        group.bench_with_input(
            BenchmarkId::from_parameter(subscriber_count),
            subscriber_count,
            |b, _| {
                let mut i = 0;
                b.iter(|| {
                    cell.set(black_box(i));
                    i += 1;
                });
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    cell_read_benchmark,
    cell_write_benchmark,
    handle_get_benchmark,
    handle_set_benchmark,
    handle_churn_benchmark,
    cell_subscribe_benchmark,
);
criterion_main!(benches);
