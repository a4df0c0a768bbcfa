// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type for spatial hash construction.

/// Errors reported by this crate.
///
/// Only construction can fail. Queries and updates are total: degenerate
/// inputs such as a negative radius produce empty results instead of errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The cell size was zero, negative, or not finite.
    #[error("cell size must be a finite positive number, got {cell_size}")]
    InvalidConfiguration {
        /// The rejected cell size, widened to `f64`.
        cell_size: f64,
    },
}

/// Result alias for fallible operations in this crate.
pub type Result<T> = core::result::Result<T, Error>;
