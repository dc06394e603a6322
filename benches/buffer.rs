//! Benchmarks for line buffer edits.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use ded::editor::{DEFAULT_LIMIT, LineBuffer};

fn document(lines: usize) -> LineBuffer {
    let lines = (0..lines).map(|i| format!("line {i}")).collect();
    LineBuffer::from_lines(lines, DEFAULT_LIMIT).unwrap()
}

fn bench_append_at_top(c: &mut Criterion) {
    let doc = document(10_000);
    c.bench_function("append_shift_top", |b| {
        b.iter_batched(
            || doc.clone(),
            |mut buf| {
                buf.append_shift(black_box(1)).unwrap();
                buf.insert_at(1, "new").unwrap();
                buf
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

fn bench_delete_at_top(c: &mut Criterion) {
    let doc = document(10_000);
    c.bench_function("delete_top", |b| {
        b.iter_batched(
            || {
                let mut buf = doc.clone();
                buf.goto(1);
                buf
            },
            |mut buf| {
                black_box(buf.delete_current());
                buf
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_append_at_top, bench_delete_at_top);
criterion_main!(benches);
