// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Complex numbers used as coordinates of the Poincaré disk.

use core::fmt;
use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Point;

/// A point of the Euclidean plane, treated as a complex number `re + im·i`.
///
/// Points with a squared magnitude strictly below `1` lie inside the
/// Poincaré disk and are called *valid* (see [`DiskPoint::is_valid`]).
/// Arithmetic is defined on the whole plane so that intermediate values of a
/// computation may leave the disk.
///
/// `PartialEq` compares exactly. Geometric code that needs a tolerance uses
/// [`DiskPoint::approx_eq`] with an explicit epsilon.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DiskPoint {
    /// Real part (x axis).
    pub re: f64,
    /// Imaginary part (y axis).
    pub im: f64,
}

impl DiskPoint {
    /// The origin, center of the disk.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// The complex unit `1 + 0i`, the identity rotation.
    pub const ONE: Self = Self::new(1.0, 0.0);

    /// The tolerance used when comparing node coordinates.
    pub const COORDINATE_EPSILON: f64 = 1e-5;

    /// Creates a point from its real and imaginary parts.
    #[inline]
    #[must_use]
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Creates the unit vector `e^(iθ) = cos θ + i·sin θ`.
    #[inline]
    #[must_use]
    pub fn from_angle(theta: f64) -> Self {
        Self::new(theta.cos(), theta.sin())
    }

    /// Returns the complex conjugate `re - im·i`.
    #[inline]
    #[must_use]
    pub fn conj(self) -> Self {
        Self::new(self.re, -self.im)
    }

    /// Returns the squared distance from the origin.
    #[inline]
    #[must_use]
    pub fn mag2(self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    /// Returns the distance from the origin.
    #[inline]
    #[must_use]
    pub fn magnitude(self) -> f64 {
        self.re.hypot(self.im)
    }

    /// Returns the angle in radians between the x axis and the ray from the
    /// origin through this point.
    #[inline]
    #[must_use]
    pub fn arg(self) -> f64 {
        self.im.atan2(self.re)
    }

    /// Returns the Euclidean distance to `other`.
    #[inline]
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (other - self).magnitude()
    }

    /// Multiplies both parts by `factor`.
    #[inline]
    #[must_use]
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.re * factor, self.im * factor)
    }

    /// Returns `true` if the point lies strictly inside the unit disk.
    ///
    /// `NaN` coordinates are never valid.
    #[inline]
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.mag2() < 1.0
    }

    /// Applies the hyperbolic translation by `t`:
    /// `z' = (z + t) / (1 + z·conj(t))`.
    ///
    /// Translating by [`DiskPoint::ZERO`] is the identity. For valid `self`
    /// and `t`, the result is valid.
    #[inline]
    #[must_use]
    pub fn translate(self, t: Self) -> Self {
        (self + t) / (self * t.conj() + 1.0)
    }

    /// Compares both parts within `tolerance`.
    #[inline]
    #[must_use]
    pub fn approx_eq(self, other: Self, tolerance: f64) -> bool {
        (self.re - other.re).abs() < tolerance && (self.im - other.im).abs() < tolerance
    }

    /// Converts to a `kurbo` point `(re, im)`.
    #[inline]
    #[must_use]
    pub const fn to_point(self) -> Point {
        Point::new(self.re, self.im)
    }
}

impl From<Point> for DiskPoint {
    #[inline]
    fn from(p: Point) -> Self {
        Self::new(p.x, p.y)
    }
}

impl From<DiskPoint> for Point {
    #[inline]
    fn from(z: DiskPoint) -> Self {
        z.to_point()
    }
}

impl From<(f64, f64)> for DiskPoint {
    #[inline]
    fn from((re, im): (f64, f64)) -> Self {
        Self::new(re, im)
    }
}

impl Add for DiskPoint {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl AddAssign for DiskPoint {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// Adds a real number to the real part.
impl Add<f64> for DiskPoint {
    type Output = Self;

    #[inline]
    fn add(self, rhs: f64) -> Self {
        Self::new(self.re + rhs, self.im)
    }
}

impl Sub for DiskPoint {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl SubAssign for DiskPoint {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

/// Complex multiplication.
impl Mul for DiskPoint {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

impl Mul<f64> for DiskPoint {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self {
        self.scale(rhs)
    }
}

/// Complex division.
///
/// Dividing by zero yields non-finite parts, which are never valid.
impl Div for DiskPoint {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self {
        let d2 = rhs.mag2();
        Self::new(
            (self.re * rhs.re + self.im * rhs.im) / d2,
            (self.im * rhs.re - self.re * rhs.im) / d2,
        )
    }
}

impl Div<f64> for DiskPoint {
    type Output = Self;

    #[inline]
    fn div(self, rhs: f64) -> Self {
        Self::new(self.re / rhs, self.im / rhs)
    }
}

impl Neg for DiskPoint {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.re, -self.im)
    }
}

impl fmt::Display for DiskPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.im.is_sign_negative() {
            write!(f, "{}{}i", self.re, self.im)
        } else {
            write!(f, "{}+{}i", self.re, self.im)
        }
    }
}
