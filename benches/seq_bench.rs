use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use weft_core::Replica;

/// Benchmark single character insert
fn bench_single_insert(c: &mut Criterion) {
    c.bench_function("seq_single_insert", |b| {
        b.iter(|| {
            let mut doc = Replica::new("client1");
            black_box(doc.insert_str(0, "a").unwrap());
        });
    });
}

/// Benchmark sequential typing (simulates a user appending text)
fn bench_sequential_typing(c: &mut Criterion) {
    let mut group = c.benchmark_group("seq_sequential_typing");

    for size in [10, 100, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let mut doc = Replica::new("client1");
                for i in 0..size {
                    black_box(doc.insert(i, ['a']).unwrap());
                }
            });
        });
    }

    group.finish();
}

/// Benchmark merging two diverged 1k-character documents
fn bench_merge(c: &mut Criterion) {
    c.bench_function("seq_merge_two_1k_docs", |b| {
        b.iter_batched(
            || {
                let mut doc1 = Replica::new("client1");
                let mut doc2 = Replica::new("client2");

                doc1.insert_str(0, &"a".repeat(1000)).unwrap();
                doc2.insert_str(0, &"b".repeat(1000)).unwrap();

                (doc1, doc2)
            },
            |(mut doc1, doc2)| {
                black_box(doc1.merge_from(&doc2).unwrap());
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

/// Benchmark deletion sweeps over a tombstone-heavy document
fn bench_delete(c: &mut Criterion) {
    c.bench_function("seq_delete_500_chars", |b| {
        b.iter_batched(
            || {
                let mut doc = Replica::new("client1");
                doc.insert_str(0, &"a".repeat(1000)).unwrap();
                doc
            },
            |mut doc| {
                black_box(doc.delete(250, 500).unwrap());
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_single_insert,
    bench_sequential_typing,
    bench_merge,
    bench_delete
);
criterion_main!(benches);
