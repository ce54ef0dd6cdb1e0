use aplatam_core::prelude::*;
use aplatam_core::ViewportStore;
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn bench_resolve(c: &mut Criterion) {
    c.bench_function("resolve id from query", |b| {
        b.iter(|| resolve(black_box("?lang=es&zoom=11&id=s%C3%A3o-paulo")))
    });
}

fn bench_lookup(c: &mut Criterion) {
    let catalog = CityCatalog::bundled().expect("bundled catalog");
    c.bench_function("find city by id", |b| {
        b.iter(|| catalog.find_by_id(black_box(Some("li"))).map(|c| c.zoom))
    });
}

fn bench_merge(c: &mut Criterion) {
    let updates = [
        PartialViewport::new().with_size(1280, 748),
        PartialViewport::new().with_zoom(12.5),
        PartialViewport::new().with_center(Coordinates::new(-34.6, -58.4)),
    ];
    c.bench_function("merge viewport updates", |b| {
        let mut store = ViewportStore::new();
        b.iter(|| {
            for update in &updates {
                black_box(store.merge(black_box(update)));
            }
        })
    });
}

criterion_group!(benches, bench_resolve, bench_lookup, bench_merge);
criterion_main!(benches);
