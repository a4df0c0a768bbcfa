// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_spatial_hash::{LinearScan, Point3, PointIndex, SpatialHash};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
    /// Uniform in `[-extent, extent)`.
    fn next_signed(&mut self, extent: f64) -> f64 {
        (self.next_f64() * 2.0 - 1.0) * extent
    }
}

fn gen_uniform_cloud(count: usize, extent: f64) -> Vec<Point3<f64>> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|_| {
            Point3::new(
                rng.next_signed(extent),
                rng.next_signed(extent),
                rng.next_signed(extent),
            )
        })
        .collect()
}

fn gen_clustered_cloud(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<Point3<f64>> {
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    let centers: Vec<_> = (0..n_clusters)
        .map(|_| {
            Point3::new(
                rng.next_signed(200.0),
                rng.next_signed(200.0),
                rng.next_signed(200.0),
            )
        })
        .collect();
    for c in centers {
        for _ in 0..per_cluster {
            out.push(Point3::new(
                c.x + rng.next_signed(spread),
                c.y + rng.next_signed(spread),
                c.z + rng.next_signed(spread),
            ));
        }
    }
    out
}

fn gen_query_centers(count: usize, extent: f64) -> Vec<Point3<f64>> {
    let mut rng = Rng::new(0xBADC_F00D_1234_5678);
    (0..count)
        .map(|_| {
            Point3::new(
                rng.next_signed(extent),
                rng.next_signed(extent),
                rng.next_signed(extent),
            )
        })
        .collect()
}

fn run_frame<I: PointIndex<f64>>(
    index: &mut I,
    cloud: &[Point3<f64>],
    centers: &[Point3<f64>],
    radius: f64,
    out: &mut Vec<Point3<f64>>,
) -> usize {
    index.rebuild(cloud.iter().copied());
    let mut total = 0;
    for &c in centers {
        out.clear();
        index.query_into(c, radius, out);
        total += out.len();
    }
    total
}

fn bench_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("rebuild");
    for &n in &[1_000usize, 10_000, 100_000] {
        let cloud = gen_uniform_cloud(n, 20.0);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("spatial_hash_n{}", n), |b| {
            let mut hash = SpatialHash::with_capacity(1.0, n).unwrap();
            b.iter(|| {
                hash.rebuild(cloud.iter().copied());
                black_box(hash.size());
            });
        });
        group.bench_function(format!("linear_scan_n{}", n), |b| {
            let mut scan = LinearScan::new();
            b.iter(|| {
                PointIndex::rebuild(&mut scan, cloud.iter().copied());
                black_box(scan.len());
            });
        });
    }
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");
    let centers = gen_query_centers(256, 20.0);
    for &n in &[1_000usize, 10_000, 100_000] {
        let cloud = gen_uniform_cloud(n, 20.0);
        let mut hash = SpatialHash::new(1.0).unwrap();
        hash.rebuild(cloud.iter().copied());
        let scan: LinearScan<f64> = cloud.iter().copied().collect();
        for &radius in &[1.0, 5.0] {
            group.bench_function(format!("spatial_hash_n{}_r{}", n, radius), |b| {
                let mut out = Vec::new();
                b.iter(|| {
                    let mut total = 0;
                    for &c in &centers {
                        out.clear();
                        hash.query_into(c, radius, &mut out);
                        total += out.len();
                    }
                    black_box(total);
                });
            });
            group.bench_function(format!("linear_scan_n{}_r{}", n, radius), |b| {
                let mut out = Vec::new();
                b.iter(|| {
                    let mut total = 0;
                    for &c in &centers {
                        out.clear();
                        scan.query_into(c, radius, &mut out);
                        total += out.len();
                    }
                    black_box(total);
                });
            });
        }
    }
    group.finish();
}

fn bench_cell_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("cell_size");
    let cloud = gen_uniform_cloud(20_000, 20.0);
    let centers = gen_query_centers(128, 20.0);
    for &cell in &[0.25, 1.0, 5.0, 20.0] {
        let mut hash = SpatialHash::new(cell).unwrap();
        hash.rebuild(cloud.iter().copied());
        group.bench_function(format!("query_r5_cell{}", cell), |b| {
            b.iter(|| {
                let total: usize = centers.iter().map(|&c| hash.count_within(c, 5.0)).sum();
                black_box(total);
            });
        });
    }
    group.finish();
}

fn bench_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame");
    let cloud = gen_clustered_cloud(32, 512, 6.0);
    let centers = gen_query_centers(16, 200.0);
    group.throughput(Throughput::Elements(cloud.len() as u64));
    group.bench_function("spatial_hash_clustered", |b| {
        b.iter_batched(
            || (SpatialHash::new(4.0).unwrap(), Vec::new()),
            |(mut hash, mut out)| {
                black_box(run_frame(&mut hash, &cloud, &centers, 8.0, &mut out));
            },
            BatchSize::SmallInput,
        )
    });
    group.bench_function("linear_scan_clustered", |b| {
        b.iter_batched(
            || (LinearScan::new(), Vec::new()),
            |(mut scan, mut out)| {
                black_box(run_frame(&mut scan, &cloud, &centers, 8.0, &mut out));
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_rebuild,
    bench_query,
    bench_cell_size,
    bench_frame
);
criterion_main!(benches);
