// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Understory Spatial Hash: insert, inspect, query, clear.

use understory_spatial_hash::SpatialHash;

fn main() {
    let mut hash = SpatialHash::new(1.0).expect("1.0 is a valid cell size");
    hash.insert((0.25, 0.25, 0.25));
    hash.insert((0.75, 0.5, 0.1));
    hash.insert((-0.5, 0.0, 0.0));
    hash.insert((3.0, 3.0, 3.0));

    // Three occupied cells holding four points.
    println!("cells={} points={}", hash.size(), hash.point_count());

    for (id, points) in hash.buckets() {
        println!("bucket {:>12}: {:?}", id.get(), points);
    }

    let hits = hash.query((0.0, 0.0, 0.0), 1.0);
    println!("within 1.0 of origin: {:?}", hits);

    hash.clear();
    println!("after clear: cells={}", hash.size());
}
