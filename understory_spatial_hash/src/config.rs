// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction parameters for [`SpatialHash`](crate::SpatialHash).

use crate::error::{Error, Result};
use crate::types::Scalar;

/// Parameters used to build a [`SpatialHash`](crate::SpatialHash).
///
/// The default cell size is `1.0`. Pick a cell size close to the typical query
/// radius: much smaller cells make each query visit many empty cells, much
/// larger cells put many far-away candidates into every visited bucket.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpatialHashConfig<T = f64> {
    /// Edge length of each cubic cell. Must be finite and positive.
    pub cell_size: T,
    /// Number of occupied cells to reserve room for up front.
    pub initial_capacity: usize,
}

impl<T: Scalar> SpatialHashConfig<T> {
    /// Config with the given cell size and no reserved capacity.
    pub fn new(cell_size: T) -> Self {
        Self {
            cell_size,
            initial_capacity: 0,
        }
    }

    /// Set the number of occupied cells to reserve room for.
    #[must_use]
    pub fn with_initial_capacity(mut self, cells: usize) -> Self {
        self.initial_capacity = cells;
        self
    }

    /// Check that the cell size is finite and strictly positive.
    pub fn validate(&self) -> Result<()> {
        if T::is_finite(self.cell_size) && self.cell_size > T::zero() {
            Ok(())
        } else {
            Err(Error::InvalidConfiguration {
                cell_size: T::to_f64(self.cell_size),
            })
        }
    }
}

impl<T: Scalar> Default for SpatialHashConfig<T> {
    fn default() -> Self {
        Self::new(T::one())
    }
}
