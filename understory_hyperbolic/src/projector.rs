// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use kurbo::{Affine, Point, Rect, Vec2};

use crate::DiskPoint;

/// Maps between pixel (view) space and normalized disk space.
///
/// The disk point `(re, im)` is drawn at `origin + (re·scale.x, im·scale.y)`.
/// A projector built with [`Projector::from_view_rect`] fits the unit disk
/// into the given rectangle, stretching it to an ellipse when the rectangle
/// is not square.
///
/// Projection is independent of hyperbolic geometry: when the view is
/// resized, build a new projector and re-project; node positions and
/// geodesics in disk space stay untouched.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projector {
    origin: Point,
    scale: Vec2,
}

impl Projector {
    /// Creates a projector with the disk center at `origin` and the unit
    /// radius spanning `scale` pixels along each axis.
    #[must_use]
    pub const fn new(origin: Point, scale: Vec2) -> Self {
        Self { origin, scale }
    }

    /// Creates a projector that fits the unit disk into `rect`.
    ///
    /// The disk center maps to the rect center and the unit radius maps to
    /// half the rect extent on each axis.
    #[must_use]
    pub fn from_view_rect(rect: Rect) -> Self {
        Self::new(
            rect.center(),
            Vec2::new(rect.width() * 0.5, rect.height() * 0.5),
        )
    }

    /// Returns the pixel position of the disk center.
    #[must_use]
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Returns the pixel length of the unit radius along each axis.
    #[must_use]
    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    /// Converts a pixel-space point into disk coordinates.
    ///
    /// The result is not checked for validity; points outside the disk map
    /// to coordinates with a magnitude of `1` or more.
    #[must_use]
    pub fn to_disk(&self, p: Point) -> DiskPoint {
        DiskPoint::new(
            (p.x - self.origin.x) / self.scale.x,
            (p.y - self.origin.y) / self.scale.y,
        )
    }

    /// Converts disk coordinates into a pixel-space point.
    #[must_use]
    pub fn to_screen(&self, z: DiskPoint) -> Point {
        Point::new(
            z.re * self.scale.x + self.origin.x,
            z.im * self.scale.y + self.origin.y,
        )
    }

    /// Returns the affine transform from disk space to pixel space.
    ///
    /// Useful for backends that want to transform whole paths built in disk
    /// coordinates rather than projecting point by point.
    #[must_use]
    pub fn disk_to_view(&self) -> Affine {
        Affine::translate(self.origin.to_vec2())
            * Affine::scale_non_uniform(self.scale.x, self.scale.y)
    }

    /// Returns the pixel-space bounding box of the unit disk.
    #[must_use]
    pub fn disk_bounds(&self) -> Rect {
        let p0 = self.to_screen(DiskPoint::new(-1.0, -1.0));
        let p1 = self.to_screen(DiskPoint::new(1.0, 1.0));
        Rect::from_points(p0, p1)
    }
}

impl fmt::Display for Projector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Projector O=({}, {}) MAX=({}, {})>",
            self.origin.x, self.origin.y, self.scale.x, self.scale.y
        )
    }
}
