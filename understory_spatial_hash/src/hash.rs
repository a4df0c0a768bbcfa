// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`SpatialHash`] container.

use alloc::vec::Vec;
use core::fmt::Debug;

use hashbrown::HashMap;
use tracing::{debug, trace};

use crate::cell::{CellCoord, CellId, CellRange};
use crate::config::SpatialHashConfig;
use crate::error::Result;
use crate::point_index::PointIndex;
use crate::types::{Point3, Scalar, is_query_radius, within_radius};

/// Uniform-grid spatial hash over 3D points.
///
/// Space is cut into axis-aligned cubes of edge `cell_size`. Each inserted
/// point is stored by value in the bucket of the one cell containing it.
/// A query visits every cell overlapping the bounding cube of the query
/// sphere and keeps the candidates whose exact distance to the center is
/// within the radius.
///
/// Buckets are keyed by a lossy [`CellId`]: two far-apart cells can share a
/// bucket. Query results are unaffected because every candidate is re-checked.
///
/// # `size()` counts cells, not points
///
/// [`size`](Self::size) returns the number of occupied buckets. Two points in
/// the same cell count once. Use [`point_count`](Self::point_count) for the
/// number of stored points.
#[derive(Clone)]
pub struct SpatialHash<T = f64> {
    cell_size: T,
    cells: HashMap<CellId, Vec<Point3<T>>>,
}

impl<T: Scalar> SpatialHash<T> {
    /// Create an empty hash with cubic cells of edge `cell_size`.
    ///
    /// Fails with [`Error::InvalidConfiguration`](crate::Error::InvalidConfiguration)
    /// unless `cell_size` is finite and strictly positive.
    pub fn new(cell_size: T) -> Result<Self> {
        Self::from_config(&SpatialHashConfig::new(cell_size))
    }

    /// Like [`new`](Self::new), reserving room for `cells` occupied cells.
    pub fn with_capacity(cell_size: T, cells: usize) -> Result<Self> {
        Self::from_config(&SpatialHashConfig::new(cell_size).with_initial_capacity(cells))
    }

    /// Create an empty hash from a validated config.
    pub fn from_config(config: &SpatialHashConfig<T>) -> Result<Self> {
        config.validate()?;
        debug!(
            cell_size = T::to_f64(config.cell_size),
            capacity = config.initial_capacity,
            "created spatial hash"
        );
        Ok(Self {
            cell_size: config.cell_size,
            cells: HashMap::with_capacity(config.initial_capacity),
        })
    }

    /// Edge length of a cell.
    pub fn cell_size(&self) -> T {
        self.cell_size
    }

    /// The cell containing `point`: `floor(coord / cell_size)` per axis.
    #[inline]
    pub fn cell_of(&self, point: Point3<T>) -> CellCoord {
        CellCoord::new(
            T::floor_to_i64(point.x / self.cell_size),
            T::floor_to_i64(point.y / self.cell_size),
            T::floor_to_i64(point.z / self.cell_size),
        )
    }

    /// Add a point to the bucket of its cell. Duplicates are kept.
    ///
    /// Coordinates are expected to be finite; debug builds assert this.
    pub fn insert(&mut self, point: impl Into<Point3<T>>) {
        let point = point.into();
        debug_assert!(point.is_finite(), "point coordinates must be finite");
        let id = self.cell_of(point).id();
        self.cells.entry(id).or_default().push(point);
    }

    /// Remove every bucket. Allocated capacity is kept for reuse.
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Replace the contents with `points`: [`clear`](Self::clear), then insert each.
    pub fn rebuild<I>(&mut self, points: I)
    where
        I: IntoIterator,
        I::Item: Into<Point3<T>>,
    {
        self.clear();
        self.extend(points.into_iter().map(Into::into));
        trace!(
            points = self.point_count(),
            cells = self.cells.len(),
            "rebuilt spatial hash"
        );
    }

    /// Number of occupied cells (distinct bucket keys), NOT the number of points.
    ///
    /// Points sharing a cell count once, and cells whose identifiers collide
    /// count once together. Treat this as a measure of occupied regions.
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Number of stored points across all buckets.
    pub fn point_count(&self) -> usize {
        self.cells.values().map(Vec::len).sum()
    }

    /// True if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All stored points within `radius` of `center`, in no particular order.
    ///
    /// A negative or NaN radius yields an empty result.
    pub fn query(&self, center: impl Into<Point3<T>>, radius: T) -> Vec<Point3<T>> {
        let mut out = Vec::new();
        self.query_into(center, radius, &mut out);
        out
    }

    /// Append the result of [`query`](Self::query) to `out` without clearing it.
    pub fn query_into(&self, center: impl Into<Point3<T>>, radius: T, out: &mut Vec<Point3<T>>) {
        self.for_each_within(center.into(), radius, |p| out.push(p));
    }

    /// Number of stored points within `radius` of `center`.
    pub fn count_within(&self, center: impl Into<Point3<T>>, radius: T) -> usize {
        let mut n = 0;
        self.for_each_within(center.into(), radius, |_| n += 1);
        n
    }

    /// Occupied buckets and their points, in no particular order.
    pub fn buckets(&self) -> impl Iterator<Item = (CellId, &[Point3<T>])> + '_ {
        self.cells.iter().map(|(id, pts)| (*id, pts.as_slice()))
    }

    /// Emit one `debug` event per bucket and one `trace` event per point.
    pub fn log_contents(&self) {
        debug!(
            cells = self.cells.len(),
            points = self.point_count(),
            "spatial hash contents"
        );
        for (id, points) in &self.cells {
            debug!(cell = id.get(), points = points.len(), "bucket");
            for p in points {
                trace!(cell = id.get(), point = ?p, "point");
            }
        }
    }

    /// Inclusive cell box covering `[c - r, c + r]` on every axis.
    ///
    /// Each bound is pushed out by a few ulps of `|c| + r`, so every point the
    /// distance test accepts lies in the box even after `c ± r` rounds inward.
    fn cells_for_sphere(&self, center: Point3<T>, radius: T) -> CellRange {
        let two = T::one() + T::one();
        let slack = two * two * two * T::EPSILON;
        let reach = |c: T| radius + (T::abs(c) + radius) * slack;
        let (rx, ry, rz) = (reach(center.x), reach(center.y), reach(center.z));
        CellRange::new(
            self.cell_of(Point3::new(center.x - rx, center.y - ry, center.z - rz)),
            self.cell_of(Point3::new(center.x + rx, center.y + ry, center.z + rz)),
        )
    }

    fn for_each_within(&self, center: Point3<T>, radius: T, mut f: impl FnMut(Point3<T>)) {
        if !is_query_radius(radius) || self.cells.is_empty() {
            return;
        }
        let r2 = radius * radius;
        let mut hits = 0_usize;
        let mut scan = |points: &[Point3<T>]| {
            for &p in points {
                if within_radius(p, center, radius, r2) {
                    hits += 1;
                    f(p);
                }
            }
        };

        let range = self.cells_for_sphere(center, radius);
        let volume = range.volume();
        if volume > self.cells.len() as u128 {
            // More cells in the box than buckets: every bucket is a candidate anyway.
            for points in self.cells.values() {
                scan(points);
            }
            trace!(buckets = self.cells.len(), hits, "query scanned all buckets");
            return;
        }

        let ids = self.occupied_ids(range.iter());
        let buckets = ids.len();
        for id in ids {
            if let Some(points) = self.cells.get(&id) {
                scan(points);
            }
        }
        trace!(
            cells = u64::try_from(volume).unwrap_or(u64::MAX),
            buckets,
            hits,
            "query visited cell box"
        );
    }

    /// Distinct identifiers of occupied buckets reached from `cells`.
    ///
    /// A colliding identifier can be reached from several cells; it is listed once.
    fn occupied_ids(&self, cells: impl Iterator<Item = CellCoord>) -> Vec<CellId> {
        let mut ids: Vec<CellId> = cells
            .map(CellCoord::id)
            .filter(|id| self.cells.contains_key(id))
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

impl<T: Scalar> Extend<Point3<T>> for SpatialHash<T> {
    fn extend<I: IntoIterator<Item = Point3<T>>>(&mut self, iter: I) {
        for p in iter {
            self.insert(p);
        }
    }
}

impl<T: Scalar> PointIndex<T> for SpatialHash<T> {
    fn insert(&mut self, point: Point3<T>) {
        Self::insert(self, point);
    }

    fn clear(&mut self) {
        Self::clear(self);
    }

    fn query_into(&self, center: Point3<T>, radius: T, out: &mut Vec<Point3<T>>) {
        Self::query_into(self, center, radius, out);
    }
}

impl<T: Scalar> Debug for SpatialHash<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SpatialHash")
            .field("cell_size", &self.cell_size)
            .field("cells", &self.cells.len())
            .field("points", &self.point_count())
            .finish_non_exhaustive()
    }
}
