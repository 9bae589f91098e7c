// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;
use understory_hyperbolic::{DiskPoint, Projector};

bitflags::bitflags! {
    /// Keyboard modifiers held during a pointer event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift key. A shift-click resets the view.
        const SHIFT   = 0b0000_0001;
        /// Control key.
        const CONTROL = 0b0000_0010;
        /// Alt / Option key.
        const ALT     = 0b0000_0100;
        /// Meta / Command / Windows key.
        const META    = 0b0000_1000;
    }
}

/// A pointer event as seen by the [`Navigator`](crate::Navigator).
///
/// The windowing layer produces these; `coordinates` is the pointer position
/// already mapped into disk space and may lie outside the disk.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// Modifier keys held.
    pub modifiers: Modifiers,
    /// Pointer position in view (pixel) coordinates.
    pub point: Point,
    /// Pointer position in disk coordinates.
    pub coordinates: DiskPoint,
}

impl PointerEvent {
    /// Creates an event at a view position, mapping it into the disk with
    /// `projector`.
    #[must_use]
    pub fn from_view_point(point: Point, modifiers: Modifiers, projector: &Projector) -> Self {
        Self {
            modifiers,
            point,
            coordinates: projector.to_disk(point),
        }
    }

    /// Returns `true` if shift was held.
    #[must_use]
    pub fn shift_held(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }
}
