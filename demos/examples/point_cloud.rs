// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless point-cloud scene driving a spatial hash every frame.
//!
//! Each frame the points drift a little, the hash is rebuilt from scratch, and
//! a sphere query around a moving probe reports which points it contains.
//! The probe is steered by a scripted key sequence (arrow keys move x/y,
//! `I`/`O` move z, `+`/`-` grow and shrink the radius).
//!
//! Run:
//! - `cargo run -p understory_spatial_hash_demos --example point_cloud`
//! - `RUST_LOG=debug cargo run -p understory_spatial_hash_demos --example point_cloud -- --frames 5`

use anyhow::{Context, Result, ensure};
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use understory_spatial_hash::{LinearScan, Point3, PointIndex, SpatialHash, SpatialHashConfig};

const MIN_RADIUS: f64 = 2.0;
const MAX_RADIUS: f64 = 20.0;

/// Headless spatial hash point-cloud demo.
#[derive(Debug, Parser)]
#[command(name = "point_cloud", version, about)]
struct Options {
    /// Number of points in the cloud.
    #[arg(long, default_value_t = 1000)]
    points: usize,

    /// Points are generated in `[-extent, extent]` on every axis.
    #[arg(long, default_value_t = 20.0)]
    extent: f64,

    /// Edge length of a hash cell.
    #[arg(long, default_value_t = 1.0)]
    cell_size: f64,

    /// Initial query radius, kept within [2, 20].
    #[arg(long, default_value_t = 5.0)]
    radius: f64,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 60)]
    frames: usize,

    /// Largest per-axis step a point takes each frame.
    #[arg(long, default_value_t = 0.25)]
    jitter: f64,

    /// RNG seed for the point cloud and its motion.
    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// Cross-check every query against a brute-force scan.
    #[arg(long)]
    verify: bool,
}

/// Scripted stand-in for keyboard input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Key {
    Left,
    Right,
    Up,
    Down,
    In,
    Out,
    Grow,
    Shrink,
}

const SCRIPT: [Key; 12] = [
    Key::Right,
    Key::Right,
    Key::Up,
    Key::Grow,
    Key::In,
    Key::Left,
    Key::Down,
    Key::Shrink,
    Key::Shrink,
    Key::Out,
    Key::Grow,
    Key::Grow,
];

/// Position and size of the query sphere.
#[derive(Copy, Clone, Debug, PartialEq)]
struct Probe {
    center: Point3<f64>,
    radius: f64,
}

impl Probe {
    fn new(radius: f64) -> Self {
        Self {
            center: Point3::new(0.0, 0.0, 0.0),
            radius: radius.clamp(MIN_RADIUS, MAX_RADIUS),
        }
    }

    fn apply(&mut self, key: Key) {
        match key {
            Key::Left => self.center.x -= 1.0,
            Key::Right => self.center.x += 1.0,
            Key::Up => self.center.y += 1.0,
            Key::Down => self.center.y -= 1.0,
            Key::In => self.center.z += 1.0,
            Key::Out => self.center.z -= 1.0,
            Key::Grow => self.radius = (self.radius + 1.0).clamp(MIN_RADIUS, MAX_RADIUS),
            Key::Shrink => self.radius = (self.radius - 1.0).clamp(MIN_RADIUS, MAX_RADIUS),
        }
    }
}

/// The simulated scene: a drifting cloud, the hash built over it, and the probe.
struct Scene {
    points: Vec<Point3<f64>>,
    hash: SpatialHash<f64>,
    probe: Probe,
    rng: ChaCha8Rng,
    jitter: f64,
    found: Vec<Point3<f64>>,
}

impl Scene {
    fn new(opts: &Options) -> Result<Self> {
        ensure!(opts.extent > 0.0, "extent must be positive, got {}", opts.extent);
        ensure!(opts.jitter >= 0.0, "jitter must not be negative, got {}", opts.jitter);
        let config = SpatialHashConfig::new(opts.cell_size).with_initial_capacity(opts.points);
        let hash = SpatialHash::from_config(&config).context("building spatial hash")?;

        let mut rng = ChaCha8Rng::seed_from_u64(opts.seed);
        let e = opts.extent;
        let points = (0..opts.points)
            .map(|_| {
                Point3::new(
                    rng.gen_range(-e..=e),
                    rng.gen_range(-e..=e),
                    rng.gen_range(-e..=e),
                )
            })
            .collect();

        Ok(Self {
            points,
            hash,
            probe: Probe::new(opts.radius),
            rng,
            jitter: opts.jitter,
            found: Vec::new(),
        })
    }

    fn drift(&mut self) {
        if self.jitter == 0.0 {
            return;
        }
        let j = self.jitter;
        for p in &mut self.points {
            p.x += self.rng.gen_range(-j..=j);
            p.y += self.rng.gen_range(-j..=j);
            p.z += self.rng.gen_range(-j..=j);
        }
    }

    /// One update step: move points, rebuild the hash, run the probe query.
    fn step(&mut self, key: Key) -> usize {
        self.drift();
        self.hash.rebuild(self.points.iter().copied());
        debug!(cells = self.hash.size(), "hash rebuilt");

        self.probe.apply(key);
        self.found.clear();
        self.hash
            .query_into(self.probe.center, self.probe.radius, &mut self.found);
        self.found.len()
    }

    /// Whether the last probe result is the same multiset a linear scan finds.
    fn verify(&self) -> bool {
        let scan: LinearScan<f64> = self.points.iter().copied().collect();
        let mut expected = scan.query(self.probe.center, self.probe.radius);
        let mut found = self.found.clone();
        sort_points(&mut expected);
        sort_points(&mut found);
        expected == found
    }
}

fn sort_points(points: &mut [Point3<f64>]) {
    points.sort_by(|a, b| {
        a.x.total_cmp(&b.x)
            .then(a.y.total_cmp(&b.y))
            .then(a.z.total_cmp(&b.z))
    });
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let opts = Options::parse();
    info!(
        points = opts.points,
        cell_size = opts.cell_size,
        frames = opts.frames,
        "starting point cloud scene"
    );
    let mut scene = Scene::new(&opts)?;

    for (frame, key) in SCRIPT.iter().copied().cycle().take(opts.frames).enumerate() {
        let found = scene.step(key);
        info!(
            frame,
            ?key,
            cells = scene.hash.size(),
            found,
            radius = scene.probe.radius,
            center = ?scene.probe.center,
            "frame"
        );
        if opts.verify && !scene.verify() {
            warn!(frame, "spatial hash disagrees with linear scan");
            anyhow::bail!("query mismatch at frame {frame}");
        }
    }
    scene.hash.log_contents();
    Ok(())
}
