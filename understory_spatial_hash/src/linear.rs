// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat vector of points with linear-scan queries. Small and simple; the reference answer.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::point_index::PointIndex;
use crate::types::{Point3, Scalar, is_query_radius, within_radius};

/// Flat vector of points answering queries by testing every point.
///
/// Applies exactly the same acceptance rule as [`SpatialHash`](crate::SpatialHash),
/// so for any point set both return the same multiset of points. Useful as a
/// baseline for tiny sets and as an oracle in tests.
#[derive(Clone)]
pub struct LinearScan<T> {
    points: Vec<Point3<T>>,
}

impl<T> Default for LinearScan<T> {
    fn default() -> Self {
        Self { points: Vec::new() }
    }
}

impl<T: Scalar> LinearScan<T> {
    /// Create an empty scan set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if no points are stored.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The stored points in insertion order.
    pub fn points(&self) -> &[Point3<T>] {
        &self.points
    }
}

impl<T: Scalar> PointIndex<T> for LinearScan<T> {
    fn insert(&mut self, point: Point3<T>) {
        self.points.push(point);
    }

    fn clear(&mut self) {
        self.points.clear();
    }

    fn query_into(&self, center: Point3<T>, radius: T, out: &mut Vec<Point3<T>>) {
        if !is_query_radius(radius) {
            return;
        }
        let r2 = radius * radius;
        out.extend(
            self.points
                .iter()
                .copied()
                .filter(|&p| within_radius(p, center, radius, r2)),
        );
    }
}

impl<T: Scalar> FromIterator<Point3<T>> for LinearScan<T> {
    fn from_iter<I: IntoIterator<Item = Point3<T>>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl<T: Debug> Debug for LinearScan<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LinearScan")
            .field("points", &self.points.len())
            .finish_non_exhaustive()
    }
}
