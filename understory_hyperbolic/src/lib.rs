// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_hyperbolic --heading-base-level=0

//! Understory Hyperbolic: geometry of the Poincaré disk model.
//!
//! This crate provides the small set of numeric primitives needed to place
//! and navigate content in the hyperbolic plane, represented as the open unit
//! disk of the Euclidean plane:
//! - [`DiskPoint`]: complex arithmetic for points of the disk, including the
//!   hyperbolic translation `z ↦ (z + t) / (1 + z·conj(t))`.
//! - [`Isometry`]: a Möbius transform (translation + rotation) built by
//!   composing two translations.
//! - [`Geodesic`]: the hyperbolic straight line between two points, drawn
//!   either as a Euclidean segment or as a circle arc orthogonal to the unit
//!   circle, approximated by a cubic Bézier.
//! - [`Projector`]: the mapping between pixel space and normalized disk space.
//!
//! It does **not** own any tree, layout, or rendering backend. The
//! `understory_hypertree` crate builds its tree layout and pan navigation on
//! top of these types.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use understory_hyperbolic::{DiskPoint, Isometry, Projector};
//!
//! let z = DiskPoint::new(0.3, 0.0);
//! let t = DiskPoint::new(0.1, 0.1);
//!
//! // Translating twice equals applying the composed isometry once.
//! let composed = Isometry::compose(t, t);
//! let stepwise = z.translate(t).translate(t);
//! assert!(composed.transform(z).approx_eq(stepwise, DiskPoint::COORDINATE_EPSILON));
//!
//! // Map the disk into a 200x200 pixel view centered at (100, 100).
//! let projector = Projector::new(Point::new(100.0, 100.0), (100.0, 100.0).into());
//! let p = projector.to_screen(z);
//! assert!((p.x - 130.0).abs() < 1e-9 && (p.y - 100.0).abs() < 1e-9);
//! ```
//!
//! ## Numeric degeneracies
//!
//! Nothing in this crate returns an error. Degenerate inputs are reported
//! through [`DiskPoint::is_valid`] or by returning `None` (see
//! [`Geodesic::center`]) so that callers can skip an update and keep their
//! prior state.
//!
//! This crate is `no_std`.

#![no_std]

mod geodesic;
mod isometry;
mod point;
mod projector;

pub use geodesic::{GEODESIC_EPSILON, Geodesic, GeodesicKind, ScreenGeodesic};
pub use isometry::Isometry;
pub use point::DiskPoint;
pub use projector::Projector;
