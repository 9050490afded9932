use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use mazegen::engine::MazeEngine;
use std::hint::black_box;

fn bench_carve(c: &mut Criterion) {
    c.bench_function("carve_32x32", |b| {
        b.iter_batched(
            || MazeEngine::with_seed(32, 32, 0x5EED),
            |mut engine| {
                engine.create_maze(32, 32, false);
                black_box(engine.pool().cell(31, 31).is_visited());
            },
            BatchSize::SmallInput,
        )
    });

    c.bench_function("carve_250x250", |b| {
        b.iter_batched(
            || MazeEngine::with_seed(250, 250, 0x5EED),
            |mut engine| {
                engine.create_maze(250, 250, false);
                black_box(engine.pool().cell(249, 249).is_visited());
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_carve);
criterion_main!(benches);
