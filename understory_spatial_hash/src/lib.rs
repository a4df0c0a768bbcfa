// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_spatial_hash --heading-base-level=0

//! Understory Spatial Hash: a uniform-grid spatial hash for 3D points.
//!
//! Understory Spatial Hash stores a dynamic set of points and answers
//! fixed-radius queries ("every stored point within distance `r` of `c`")
//! without scanning every point.
//!
//! - Space is cut into cubes of a fixed edge length (the cell size).
//! - Each point is stored by value in the bucket of the single cell containing it.
//! - A query visits the cells overlapping the bounding cube of the query sphere
//!   and keeps the candidates whose exact distance is within the radius.
//!
//! The usual per-frame pattern is [`SpatialHash::clear`] (or
//! [`SpatialHash::rebuild`]) followed by inserting every live point, then any
//! number of queries.
//!
//! # Example
//!
//! ```rust
//! use understory_spatial_hash::{Point3, SpatialHash};
//!
//! let mut hash = SpatialHash::new(1.0).unwrap();
//! hash.insert((0.2, 0.2, 0.2));
//! hash.insert((0.7, 0.1, 0.4)); // same cell as the first point
//! hash.insert((5.0, 5.0, 5.0));
//!
//! // `size` counts occupied cells, not points.
//! assert_eq!(hash.size(), 2);
//! assert_eq!(hash.point_count(), 3);
//!
//! let near = hash.query((0.0, 0.0, 0.0), 1.0);
//! assert_eq!(near.len(), 2);
//! assert!(near.contains(&Point3::new(0.2, 0.2, 0.2)));
//!
//! // A negative radius is not an error, just an empty result.
//! assert!(hash.query((0.0, 0.0, 0.0), -1.0).is_empty());
//! ```
//!
//! A non-positive cell size is rejected up front:
//!
//! ```rust
//! use understory_spatial_hash::{Error, SpatialHash};
//!
//! let err = SpatialHash::new(0.0).unwrap_err();
//! assert!(matches!(err, Error::InvalidConfiguration { .. }));
//! ```
//!
//! ## Cell identifiers and collisions
//!
//! Cell coordinates are folded into one integer key,
//! `x + y * 15_485_863 + z * 32_452_843`. The fold is not collision free:
//! far-apart cells can share a bucket. This is an accepted approximation.
//! Every candidate is re-checked against the exact squared distance, so a
//! collision only adds work and never adds or drops results. For the same
//! reason [`SpatialHash::size`] is a count of distinct keys, which is at
//! most the number of distinct occupied cells.
//!
//! ## Choosing a cell size
//!
//! Pick a cell size near the typical query radius. Smaller cells make each
//! query visit many empty cells; larger cells put many far-away candidates in
//! each visited bucket. When a query box spans more cells than there are
//! occupied buckets, the buckets are scanned directly instead.
//!
//! ## Reference index
//!
//! [`LinearScan`] implements the same [`PointIndex`] interface with a flat
//! vector and the same acceptance rule. It is the baseline for benchmarks and
//! the oracle for tests.
//!
//! ### Float semantics
//!
//! Inserted coordinates are expected to be finite. Debug builds assert.
//!
//! ### Concurrency
//!
//! There is no internal synchronization. Mutation takes `&mut self` and
//! queries take `&self`, so a query can never overlap a mutation. Wrap the
//! hash in a lock to share it between threads.

#![no_std]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

extern crate alloc;

pub mod cell;
pub mod config;
pub mod error;
pub mod hash;
pub mod linear;
pub mod point_index;
pub mod types;

pub use cell::{CellCoord, CellId, CellRange};
pub use config::SpatialHashConfig;
pub use error::{Error, Result};
pub use hash::SpatialHash;
pub use linear::LinearScan;
pub use point_index::PointIndex;
pub use types::{Point3, Scalar};
