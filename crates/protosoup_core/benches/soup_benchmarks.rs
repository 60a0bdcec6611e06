use criterion::{black_box, criterion_group, criterion_main, Criterion};
use protosoup_core::{Soup, SoupConfig};

fn saturated_soup() -> Soup {
    let mut config = SoupConfig::default();
    config.world.seed = Some(42);
    config.world.initial_chains = 50;
    let mut soup = Soup::new(config).unwrap();
    for _ in 0..100 {
        soup.advance();
    }
    soup
}

fn bench_advance(c: &mut Criterion) {
    let mut soup = saturated_soup();
    c.bench_function("advance_at_chain_cap", |b| {
        b.iter(|| {
            soup.advance();
            black_box(soup.entity_count())
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let soup = saturated_soup();
    c.bench_function("snapshot_at_chain_cap", |b| {
        b.iter(|| black_box(soup.snapshot_entities().len()))
    });
}

criterion_group!(benches, bench_advance, bench_snapshot);
criterion_main!(benches);
