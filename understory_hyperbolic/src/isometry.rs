// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use crate::DiskPoint;

/// An orientation-preserving isometry of the Poincaré disk.
///
/// The transform maps `z` to
/// `(z·rotation + translation) / (conj(translation)·z·rotation + 1)`.
/// `rotation` is a complex number whose argument is the rotation angle; it
/// need not be normalized, since the composition formula produces it with the
/// same denominator as the translation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Isometry {
    /// Translation component.
    pub translation: DiskPoint,
    /// Rotation component.
    pub rotation: DiskPoint,
}

impl Isometry {
    /// The identity transform.
    pub const IDENTITY: Self = Self::new(DiskPoint::ZERO, DiskPoint::ONE);

    /// Creates an isometry from its translation and rotation components.
    #[inline]
    #[must_use]
    pub const fn new(translation: DiskPoint, rotation: DiskPoint) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    /// A pure hyperbolic translation by `t`.
    ///
    /// Applying it is equivalent to [`DiskPoint::translate`].
    #[inline]
    #[must_use]
    pub const fn from_translation(t: DiskPoint) -> Self {
        Self::new(t, DiskPoint::ONE)
    }

    /// Composes the translation by `first` followed by the translation by
    /// `second` into a single isometry.
    ///
    /// With `D = conj(second)·first + 1`, the result has translation
    /// `(first + second) / D` and rotation `(conj(first)·second + 1) / D`.
    /// For every point `z`, `compose(first, second).transform(z)` equals
    /// `z.translate(first).translate(second)`.
    #[must_use]
    pub fn compose(first: DiskPoint, second: DiskPoint) -> Self {
        let d = second.conj() * first + 1.0;
        let r = first.conj() * second + 1.0;
        Self::new((first + second) / d, r / d)
    }

    /// Applies this isometry to `z`.
    #[must_use]
    pub fn transform(&self, z: DiskPoint) -> DiskPoint {
        let zr = z * self.rotation;
        let num = zr + self.translation;
        let den = self.translation.conj() * zr + 1.0;
        num / den
    }
}

impl Default for Isometry {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for Isometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Isometry T={} R={}>", self.translation, self.rotation)
    }
}

#[cfg(test)]
mod tests {
    use super::Isometry;
    use crate::DiskPoint;

    const EPS: f64 = 1e-12;

    #[test]
    fn identity_leaves_points_alone() {
        let z = DiskPoint::new(0.4, -0.3);
        assert!(Isometry::IDENTITY.transform(z).approx_eq(z, EPS));
        assert_eq!(Isometry::default(), Isometry::IDENTITY);
    }

    #[test]
    fn pure_translation_matches_translate() {
        let t = DiskPoint::new(0.1, 0.1);
        let z = DiskPoint::new(0.3, 0.0);
        let iso = Isometry::from_translation(t);
        assert!(iso.transform(z).approx_eq(z.translate(t), EPS));
    }

    #[test]
    fn compose_from_origin_is_pure_translation() {
        let t = DiskPoint::new(0.1, 0.1);
        let iso = Isometry::compose(DiskPoint::ZERO, t);
        assert!(iso.translation.approx_eq(t, EPS));
        assert!(iso.rotation.approx_eq(DiskPoint::ONE, EPS));
    }

    #[test]
    fn compose_matches_sequential_translation() {
        let first = DiskPoint::new(-0.2, 0.35);
        let second = DiskPoint::new(0.5, 0.1);
        let iso = Isometry::compose(first, second);
        for z in [
            DiskPoint::ZERO,
            DiskPoint::new(0.3, 0.0),
            DiskPoint::new(-0.7, -0.1),
            DiskPoint::new(0.05, 0.9),
        ] {
            let expected = z.translate(first).translate(second);
            assert!(iso.transform(z).approx_eq(expected, 1e-9));
        }
    }

    #[test]
    fn composed_translations_rotate() {
        // Two non-collinear translations do not compose into a pure translation.
        let iso = Isometry::compose(DiskPoint::new(0.5, 0.0), DiskPoint::new(0.0, 0.5));
        assert!(iso.rotation.im.abs() > 1e-3);
        // The rotation component still has unit modulus.
        assert!((iso.rotation.magnitude() - 1.0).abs() < 1e-9);
    }
}
