// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geodesics of the Poincaré disk and their pixel-space approximation.

use core::fmt;

use kurbo::{BezPath, CubicBez, Line, Point};

use crate::{DiskPoint, Projector};

/// Tolerance for detecting geodesics that are diameters of the disk.
pub const GEODESIC_EPSILON: f64 = 1e-10;

/// How a geodesic is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum GeodesicKind {
    /// A Euclidean straight segment: the geodesic lies on a diameter.
    #[default]
    Line,
    /// A circle arc orthogonal to the unit circle, drawn as a cubic Bézier
    /// whose two handles share one control point.
    Curve,
}

/// The hyperbolic straight line between two disk points.
///
/// Construction computes the disk-space geometry once. [`Geodesic::project`]
/// refreshes the pixel-space copy and must be called again whenever the
/// [`Projector`] or either endpoint changes; [`Geodesic::screen`] reflects
/// the latest projection only.
#[derive(Clone, Debug, PartialEq)]
pub struct Geodesic {
    kind: GeodesicKind,
    a: DiskPoint,
    b: DiskPoint,
    c: DiskPoint,
    sa: Point,
    sb: Point,
    sc: Point,
}

impl Geodesic {
    /// Builds the geodesic from `a` to `b`.
    ///
    /// Endpoints at the origin, or collinear with it within
    /// [`GEODESIC_EPSILON`], produce a [`GeodesicKind::Line`]. If the arc
    /// formulas turn out numerically degenerate anyway, the geodesic also
    /// falls back to a line.
    #[must_use]
    pub fn new(a: DiskPoint, b: DiskPoint) -> Self {
        let mut g = Self {
            kind: GeodesicKind::Line,
            a,
            b,
            c: DiskPoint::ZERO,
            sa: Point::ZERO,
            sb: Point::ZERO,
            sc: Point::ZERO,
        };
        if Self::is_on_diameter(a, b) {
            return g;
        }
        let control = g.center().and_then(|center| g.control_point(center));
        if let Some(c) = control {
            g.kind = GeodesicKind::Curve;
            g.c = c;
        }
        g
    }

    /// Returns `true` when the geodesic through `a` and `b` is a diameter.
    #[must_use]
    pub fn is_on_diameter(a: DiskPoint, b: DiskPoint) -> bool {
        a.magnitude() < GEODESIC_EPSILON
            || b.magnitude() < GEODESIC_EPSILON
            || (a.re * b.im - a.im * b.re).abs() < GEODESIC_EPSILON
    }

    /// Returns the Euclidean center of the circle through both endpoints
    /// that is orthogonal to the unit circle.
    ///
    /// Returns `None` when the endpoints are collinear with the origin, in
    /// which case no such circle exists.
    #[must_use]
    pub fn center(&self) -> Option<DiskPoint> {
        let (a, b) = (self.a, self.b);
        let da = 1.0 + a.mag2();
        let db = 1.0 + b.mag2();
        let dd = 2.0 * (a.re * b.im - b.re * a.im);
        if dd.abs() < GEODESIC_EPSILON {
            return None;
        }
        Some(DiskPoint::new(b.im * da - a.im * db, a.re * db - b.re * da) / dd)
    }

    /// Returns the intersection of the circle tangents at both endpoints,
    /// for a circle centered at `origin`.
    ///
    /// This is the shared control point of the cubic approximating the arc.
    /// Returns `None` when the tangents are parallel.
    #[must_use]
    pub fn control_point(&self, origin: DiskPoint) -> Option<DiskPoint> {
        let (a, b, zo) = (self.a, self.b, origin);
        let det = (b.re - zo.re) * (a.im - zo.im) - (a.re - zo.re) * (b.im - zo.im);
        if det.abs() < GEODESIC_EPSILON {
            return None;
        }
        let fa = a.im * (a.im - zo.im) - a.re * (zo.re - a.re);
        let fb = b.im * (b.im - zo.im) - b.re * (zo.re - b.re);
        let z1 = DiskPoint::new(a.im - zo.im, zo.re - a.re) * fb;
        let z2 = DiskPoint::new(b.im - zo.im, zo.re - b.re) * fa;
        Some((z1 - z2) / det)
    }

    /// Refreshes the pixel-space endpoints and control point.
    pub fn project(&mut self, projector: &Projector) {
        self.sa = projector.to_screen(self.a);
        self.sb = projector.to_screen(self.b);
        self.sc = projector.to_screen(self.c);
    }

    /// Returns how this geodesic is drawn.
    #[must_use]
    pub fn kind(&self) -> GeodesicKind {
        self.kind
    }

    /// Returns the first endpoint in disk space.
    #[must_use]
    pub fn from(&self) -> DiskPoint {
        self.a
    }

    /// Returns the second endpoint in disk space.
    #[must_use]
    pub fn to(&self) -> DiskPoint {
        self.b
    }

    /// Returns the Bézier control point in disk space, for curves.
    #[must_use]
    pub fn control(&self) -> Option<DiskPoint> {
        match self.kind {
            GeodesicKind::Line => None,
            GeodesicKind::Curve => Some(self.c),
        }
    }

    /// Returns the pixel-space description from the latest projection.
    #[must_use]
    pub fn screen(&self) -> ScreenGeodesic {
        ScreenGeodesic {
            kind: self.kind,
            from: self.sa,
            to: self.sb,
            control: match self.kind {
                GeodesicKind::Line => None,
                GeodesicKind::Curve => Some(self.sc),
            },
        }
    }
}

impl fmt::Display for Geodesic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            GeodesicKind::Line => write!(f, "LINE from={} to={}", self.a, self.b),
            GeodesicKind::Curve => {
                write!(f, "CURVE from={} control={} to={}", self.a, self.c, self.b)
            }
        }
    }
}

/// A projected geodesic in pixel space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenGeodesic {
    /// Segment or curve.
    pub kind: GeodesicKind,
    /// Start point.
    pub from: Point,
    /// End point.
    pub to: Point,
    /// Shared control point of both cubic handles; `None` for lines.
    pub control: Option<Point>,
}

impl ScreenGeodesic {
    /// Returns the straight segment between the endpoints.
    #[must_use]
    pub fn line(&self) -> Line {
        Line::new(self.from, self.to)
    }

    /// Returns the cubic approximating the arc, for curves.
    #[must_use]
    pub fn cubic(&self) -> Option<CubicBez> {
        self.control.map(|c| CubicBez::new(self.from, c, c, self.to))
    }

    /// Appends this geodesic to `path` as a new subpath.
    pub fn append_to(&self, path: &mut BezPath) {
        path.move_to(self.from);
        match self.control {
            Some(c) => path.curve_to(c, c, self.to),
            None => path.line_to(self.to),
        }
    }

    /// Returns this geodesic as a standalone path.
    #[must_use]
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        self.append_to(&mut path);
        path
    }
}
