//! Criterion microbenches for the fixture pipeline hot spots.
//!
//! - generation: smart assembly + retry loop at a few vertex counts.
//! - normalization + description of accepted polygons.
//! - fingerprint: repr-matrix build + singular values.
//!
//! Results live under `target/criterion`.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use ngon::gen::source::UniformSource;
use ngon::gen::{generate_simple, GenCfg, ReplayToken};
use ngon::geom::{describe, normalize, GeomCfg};
use ngon::signature::fingerprint;

fn accepted(n: usize, seed: u64, index: u64) -> ngon::geom::Polygon {
    let cfg = GenCfg::default();
    let geom = GeomCfg::default();
    let mut idx = index;
    loop {
        let tok = ReplayToken { seed, index: idx };
        let mut src = UniformSource::new(tok.to_std_rng());
        if let Some(polygon) = generate_simple(n, &mut src, &cfg, &geom).accepted() {
            return polygon;
        }
        idx = idx.wrapping_add(1);
    }
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    let cfg = GenCfg::default();
    let geom = GeomCfg::default();
    for n in [4usize, 6, 8] {
        group.bench_function(BenchmarkId::new("generate_simple", n), |b| {
            b.iter_batched(
                || ReplayToken { seed: 42, index: 0 },
                |mut tok| {
                    tok.index = tok.index.wrapping_add(1);
                    let mut src = UniformSource::new(tok.to_std_rng());
                    let _ = generate_simple(n, &mut src, &cfg, &geom);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_describe(c: &mut Criterion) {
    let mut group = c.benchmark_group("describe");
    let geom = GeomCfg::default();
    group.bench_function("normalize_describe_8", |b| {
        b.iter_batched(
            || accepted(8, 7, 0),
            |mut poly| {
                normalize(&mut poly, &geom);
                let _ = describe(&poly);
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_fingerprint(c: &mut Criterion) {
    let mut group = c.benchmark_group("fingerprint");
    let geom = GeomCfg::default();
    for n in [8usize, 16] {
        let mut poly = accepted(n, 11, 0);
        normalize(&mut poly, &geom);
        let d = describe(&poly);
        group.bench_function(BenchmarkId::new("lengths", n), |b| {
            b.iter(|| fingerprint(&d.l).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_generate, bench_describe, bench_fingerprint);
criterion_main!(benches);
