// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cell coordinates, cell identifiers, and inclusive cell ranges.
//!
//! A point maps to the cell `floor(coord / cell_size)` on each axis. The three
//! integer cell coordinates are then folded into a single [`CellId`] with a
//! prime-weighted sum:
//!
//! `id = x + y * 15_485_863 + z * 32_452_843`  (wrapping `i64` arithmetic)
//!
//! This fold is lossy. Distinct cells far apart can share an identifier, in
//! which case their points land in one bucket. Queries always re-check the
//! exact distance of every candidate, so a collision only costs extra
//! candidates and never changes a query result.

/// Weight applied to the y cell coordinate when folding a [`CellCoord`].
pub const PRIME_Y: i64 = 15_485_863;

/// Weight applied to the z cell coordinate when folding a [`CellCoord`].
pub const PRIME_Z: i64 = 32_452_843;

/// Integer coordinate of a grid cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CellCoord {
    /// Cell index along x.
    pub x: i64,
    /// Cell index along y.
    pub y: i64,
    /// Cell index along z.
    pub z: i64,
}

impl CellCoord {
    /// Create a cell coordinate.
    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }

    /// Fold this coordinate into its bucket identifier.
    #[inline]
    pub const fn id(self) -> CellId {
        CellId(
            self.x
                .wrapping_add(self.y.wrapping_mul(PRIME_Y))
                .wrapping_add(self.z.wrapping_mul(PRIME_Z)),
        )
    }
}

/// Bucket key of a cell.
///
/// Not unique per cell: see the module docs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellId(i64);

impl CellId {
    /// The raw identifier value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

/// Inclusive box of cells `min..=max` on every axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CellRange {
    /// Lowest cell on each axis (inclusive).
    pub min: CellCoord,
    /// Highest cell on each axis (inclusive).
    pub max: CellCoord,
}

impl CellRange {
    /// Create a range from its inclusive corners.
    pub const fn new(min: CellCoord, max: CellCoord) -> Self {
        Self { min, max }
    }

    /// Number of cells in the range, saturating at `u128::MAX`.
    pub fn volume(&self) -> u128 {
        let span = |lo: i64, hi: i64| -> u128 {
            if hi < lo {
                0
            } else {
                (i128::from(hi) - i128::from(lo) + 1).unsigned_abs()
            }
        };
        span(self.min.x, self.max.x)
            .saturating_mul(span(self.min.y, self.max.y))
            .saturating_mul(span(self.min.z, self.max.z))
    }

    /// Iterate every cell in the range, x fastest.
    pub fn iter(self) -> impl Iterator<Item = CellCoord> {
        let Self { min, max } = self;
        (min.z..=max.z).flat_map(move |z| {
            (min.y..=max.y).flat_map(move |y| (min.x..=max.x).map(move |x| CellCoord::new(x, y, z)))
        })
    }
}
