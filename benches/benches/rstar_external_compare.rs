// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_spatial_hash::{Point3, SpatialHash};

use rstar::RTree;

fn gen_lattice(n: usize, spacing: f64) -> Vec<Point3<f64>> {
    let mut out = Vec::with_capacity(n * n * n);
    for z in 0..n {
        for y in 0..n {
            for x in 0..n {
                out.push(Point3::new(
                    x as f64 * spacing,
                    y as f64 * spacing,
                    z as f64 * spacing,
                ));
            }
        }
    }
    out
}

fn to_rstar_points(v: &[Point3<f64>]) -> Vec<[f64; 3]> {
    v.iter().copied().map(<[f64; 3]>::from).collect()
}

fn bench_rstar_external_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("rstar_external_compare");
    for &n in &[16usize, 32] {
        let points = gen_lattice(n, 1.0);
        let center = Point3::new(n as f64 * 0.5, n as f64 * 0.5, n as f64 * 0.5);
        let radius = 3.0;
        group.throughput(Throughput::Elements(points.len() as u64));

        group.bench_function(format!("spatial_hash_build_query_n{}", n), |b| {
            b.iter_batched(
                || SpatialHash::new(radius).unwrap(),
                |mut hash| {
                    hash.rebuild(points.iter().copied());
                    let hits = hash.count_within(center, radius);
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("rstar_build_query_bulk_n{}", n), |b| {
            b.iter_batched(
                || to_rstar_points(&points),
                |pts| {
                    let tree = RTree::bulk_load(pts);
                    let hits = tree
                        .locate_within_distance(center.into(), radius * radius)
                        .count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rstar_external_compare);
criterion_main!(benches);
