// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Common interface for point containers answering fixed-radius queries.

use alloc::vec::Vec;

use crate::types::{Point3, Scalar};

/// A dynamic set of points that can answer fixed-radius containment queries.
///
/// Implemented by [`SpatialHash`](crate::SpatialHash) and by the brute-force
/// [`LinearScan`](crate::LinearScan), so callers (and tests) can swap one for
/// the other without touching the update loop.
pub trait PointIndex<T: Scalar> {
    /// Add a point. Duplicates are kept.
    fn insert(&mut self, point: Point3<T>);

    /// Remove every point.
    fn clear(&mut self);

    /// Append to `out` every stored point `p` with `|p - center|² <= radius²`.
    ///
    /// A negative or NaN radius appends nothing. Existing contents of `out` are kept.
    fn query_into(&self, center: Point3<T>, radius: T, out: &mut Vec<Point3<T>>);

    /// Collect every stored point within `radius` of `center`, in no particular order.
    fn query(&self, center: Point3<T>, radius: T) -> Vec<Point3<T>> {
        let mut out = Vec::new();
        self.query_into(center, radius, &mut out);
        out
    }

    /// Replace the stored points with `points`.
    fn rebuild<I>(&mut self, points: I)
    where
        I: IntoIterator<Item = Point3<T>>,
        Self: Sized,
    {
        self.clear();
        for p in points {
            self.insert(p);
        }
    }
}
