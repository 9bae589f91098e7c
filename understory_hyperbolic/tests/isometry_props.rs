// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for disk isometries.
//!
//! These check that:
//!
//! 1. Hyperbolic translation keeps valid points inside the disk.
//! 2. Composed isometries keep valid points inside the disk.
//! 3. A composed isometry equals the two translations applied in sequence.
//! 4. Translating by `t` then by `-t` returns to the start.

use core::f64::consts::PI;

use proptest::prelude::*;
use understory_hyperbolic::{DiskPoint, Isometry};

fn disk_point() -> impl Strategy<Value = DiskPoint> {
    (0.0_f64..0.95, -PI..PI).prop_map(|(r, theta)| DiskPoint::from_angle(theta) * r)
}

proptest! {
    #[test]
    fn translation_preserves_disk(z in disk_point(), t in disk_point()) {
        prop_assert!(z.translate(t).is_valid());
    }

    #[test]
    fn composed_isometry_preserves_disk(
        z in disk_point(),
        first in disk_point(),
        second in disk_point(),
    ) {
        let iso = Isometry::compose(first, second);
        prop_assert!(iso.transform(z).is_valid());
    }

    #[test]
    fn composition_matches_sequential_translation(
        z in disk_point(),
        first in disk_point(),
        second in disk_point(),
    ) {
        let iso = Isometry::compose(first, second);
        let expected = z.translate(first).translate(second);
        prop_assert!(
            iso.transform(z).approx_eq(expected, 1e-7),
            "{} != {}",
            iso.transform(z),
            expected
        );
    }

    #[test]
    fn translation_is_invertible(z in disk_point(), t in disk_point()) {
        let back = z.translate(t).translate(-t);
        prop_assert!(back.approx_eq(z, 1e-7));
    }

    #[test]
    fn zero_translation_is_identity(z in disk_point()) {
        prop_assert!(z.translate(DiskPoint::ZERO).approx_eq(z, DiskPoint::COORDINATE_EPSILON));
    }
}
