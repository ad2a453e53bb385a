//! Benchmark: per-move synthesis lookup and clamping.
//!
//! Run with: `cargo bench -p synthgrid-core --bench resolve_bench`
//!
//! Both run on every pointer move, so they sit on the input hot path.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use synthgrid_core::drag::DragLimits;
use synthgrid_core::{GridStore, Item, Vec2, resolve_target};

fn sample_store(pages: usize) -> GridStore {
    let mut store = GridStore::new(pages);
    for i in 0..store.len() {
        let _ = store.set(i, Some(Item::new(i as u32, i as u32)));
    }
    store
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    let store = sample_store(8);
    let moves: Vec<Vec2> = (0..64)
        .map(|i| {
            let t = i as f32 / 64.0 * std::f32::consts::TAU;
            Vec2::new(t.cos() * 120.0, t.sin() * 120.0)
        })
        .collect();

    group.bench_function("resolve_target_ring", |b| {
        b.iter(|| {
            for d in &moves {
                black_box(resolve_target(black_box(4 + 13 * 3), *d, &store));
            }
        });
    });

    let limits = DragLimits::default();
    let anchor = Vec2::new(40.0, -40.0);
    group.bench_function("clamp_ring", |b| {
        b.iter(|| {
            for d in &moves {
                black_box(limits.clamp(anchor + *d, anchor));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);
