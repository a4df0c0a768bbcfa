// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and scalar helpers.

use core::cmp::Ordering;
use core::fmt::Debug;
use core::ops::{Add, Div, Mul, Sub};

/// A point in 3D space.
///
/// Points are plain values: they are copied into the hash on insert and copied
/// back out of queries. Two points with equal coordinates are indistinguishable.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point3<T> {
    /// X coordinate.
    pub x: T,
    /// Y coordinate.
    pub y: T,
    /// Z coordinate.
    pub z: T,
}

impl<T> Point3<T> {
    /// Create a point from its coordinates.
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }
}

impl<T: Scalar> Point3<T> {
    /// Squared Euclidean distance between two points.
    #[inline]
    pub fn distance_squared(self, other: Self) -> T {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    /// Whether all three coordinates are finite (no NaN or infinity).
    pub fn is_finite(self) -> bool {
        T::is_finite(self.x) && T::is_finite(self.y) && T::is_finite(self.z)
    }
}

impl<T> From<(T, T, T)> for Point3<T> {
    fn from((x, y, z): (T, T, T)) -> Self {
        Self::new(x, y, z)
    }
}

impl<T> From<[T; 3]> for Point3<T> {
    fn from([x, y, z]: [T; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl<T> From<Point3<T>> for [T; 3] {
    fn from(p: Point3<T>) -> Self {
        [p.x, p.y, p.z]
    }
}

/// Floating-point coordinate abstraction.
///
/// Implemented for `f32` and `f64`. Cell coordinates are always computed in
/// `i64` regardless of the scalar. Floor is computed without `std` or `libm`.
pub trait Scalar:
    Copy
    + PartialOrd
    + Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
    /// Difference between `1` and the next larger representable value.
    const EPSILON: Self;

    /// Zero value for the scalar type.
    fn zero() -> Self;

    /// One value for the scalar type.
    fn one() -> Self;

    /// Negation (`-v`).
    fn neg(v: Self) -> Self;

    /// Absolute value.
    fn abs(v: Self) -> Self;

    /// Whether the value is neither NaN nor infinite.
    fn is_finite(v: Self) -> bool;

    /// Largest integer not greater than `v`, saturating at the `i64` range.
    ///
    /// NaN maps to `0`.
    fn floor_to_i64(v: Self) -> i64;

    /// Widen to `f64`, used for diagnostics and error reporting.
    fn to_f64(v: Self) -> f64;
}

impl Scalar for f64 {
    const EPSILON: Self = f64::EPSILON;

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn one() -> Self {
        1.0
    }

    #[inline]
    fn neg(v: Self) -> Self {
        -v
    }

    #[inline]
    fn abs(v: Self) -> Self {
        if v < 0.0 { -v } else { v }
    }

    #[inline]
    fn is_finite(v: Self) -> bool {
        v.is_finite()
    }

    #[inline]
    fn floor_to_i64(v: Self) -> i64 {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "float to int casts saturate; out-of-range cells clamp to the i64 bounds."
        )]
        let i = v as i64;
        // The cast truncates toward zero; step down for negative non-integers.
        if (i as Self) > v {
            i.saturating_sub(1)
        } else {
            i
        }
    }

    #[inline]
    fn to_f64(v: Self) -> f64 {
        v
    }
}

impl Scalar for f32 {
    const EPSILON: Self = f32::EPSILON;

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn one() -> Self {
        1.0
    }

    #[inline]
    fn neg(v: Self) -> Self {
        -v
    }

    #[inline]
    fn abs(v: Self) -> Self {
        if v < 0.0 { -v } else { v }
    }

    #[inline]
    fn is_finite(v: Self) -> bool {
        v.is_finite()
    }

    #[inline]
    fn floor_to_i64(v: Self) -> i64 {
        f64::floor_to_i64(f64::from(v))
    }

    #[inline]
    fn to_f64(v: Self) -> f64 {
        f64::from(v)
    }
}

/// Whether `r` can be used as a query radius: zero or positive, not NaN.
pub(crate) fn is_query_radius<T: Scalar>(r: T) -> bool {
    matches!(
        r.partial_cmp(&T::zero()),
        Some(Ordering::Greater | Ordering::Equal)
    )
}

/// Whether `p` lies within `radius` of `center`, where `r2` is `radius * radius`.
///
/// If `r2` overflows for a finite radius, the offsets are rescaled by the
/// largest of `|dx|`, `|dy|`, `|dz|` and `radius` before squaring, so an
/// overflowing squared distance is never mistaken for a match.
#[inline]
pub(crate) fn within_radius<T: Scalar>(
    p: Point3<T>,
    center: Point3<T>,
    radius: T,
    r2: T,
) -> bool {
    if T::is_finite(r2) {
        return p.distance_squared(center) <= r2;
    }
    if !T::is_finite(radius) {
        return true;
    }
    let max = |a: T, b: T| if a > b { a } else { b };
    let dx = T::abs(p.x - center.x);
    let dy = T::abs(p.y - center.y);
    let dz = T::abs(p.z - center.z);
    let s = max(max(dx, dy), max(dz, radius));
    // An overflowed offset gives NaN here and is rejected.
    let (dx, dy, dz, r) = (dx / s, dy / s, dz / s, radius / s);
    dx * dx + dy * dy + dz * dz <= r * r
}
