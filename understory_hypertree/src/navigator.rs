// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag-to-pan navigation: turn pointer motion into disk isometries.
//!
//! ## Usage
//!
//! 1) Forward pointer presses to [`Navigator::pressed`]. The press position
//!    becomes the drag anchor.
//! 2) On each move with the button held, call [`Navigator::dragged`]. The
//!    tree is moved so that the anchor follows the pointer, measured from the
//!    baseline of the last release.
//! 3) On release, call [`Navigator::released`] to commit the new baseline.
//! 4) Forward clicks detected by the host to [`Navigator::clicked`]. A
//!    shift-click resets the view; any other click hit-tests the content.
//!
//! The navigator never renders. It tells a [`TreeObserver`] that the tree
//! changed so that the host can run a [`RenderPass`](crate::RenderPass).

use understory_hyperbolic::{DiskPoint, Isometry};

use crate::{ContentHandle, NodeId, PointerEvent, Tree};

/// Receives a notification whenever navigation moved the tree.
pub trait TreeObserver {
    /// Called after every screen coordinate has been updated.
    fn tree_changed(&mut self);
}

impl<F: FnMut()> TreeObserver for F {
    fn tree_changed(&mut self) {
        self();
    }
}

/// Result of [`Navigator::clicked`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClickOutcome {
    /// The view was reset to the layout.
    Reset,
    /// The click landed on the content of this node.
    Hit(NodeId),
    /// Nothing was hit.
    Miss,
}

/// Pan state machine for a hyperbolic tree.
///
/// Idle until [`pressed`](Self::pressed), dragging until
/// [`released`](Self::released).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Navigator {
    start: Option<DiskPoint>,
}

impl Navigator {
    /// Creates an idle navigator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` between a press and the following release.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.start.is_some()
    }

    /// Returns the disk position of the press that started the drag.
    #[must_use]
    pub fn anchor(&self) -> Option<DiskPoint> {
        self.start
    }

    /// Starts a drag at the event position.
    ///
    /// The position is recorded even if it lies outside the disk; such a
    /// drag simply never moves the tree.
    pub fn pressed(&mut self, event: &PointerEvent) {
        self.start = Some(event.coordinates);
    }

    /// Moves the tree so that the drag anchor follows the pointer.
    ///
    /// Does nothing unless a drag is active and both the anchor and the
    /// event lie inside the disk, or when the solved translation falls
    /// outside it. Returns `true` if the tree moved, in which case
    /// `observer` has been notified.
    pub fn dragged<C>(
        &mut self,
        tree: &mut Tree<C>,
        event: &PointerEvent,
        observer: &mut impl TreeObserver,
    ) -> bool {
        let Some(start) = self.start else {
            return false;
        };
        if !start.is_valid() || !event.coordinates.is_valid() {
            return false;
        }
        let old = tree[tree.root()].screen().old_coordinates;
        let Some(isometry) = Self::translation(old, start, event.coordinates) else {
            #[cfg(feature = "tracing")]
            tracing::debug!(%start, end = %event.coordinates, "drag translation left the disk, skipped");
            return false;
        };
        tree.apply_all(&isometry);
        observer.tree_changed();
        true
    }

    /// Commits every node at its current position and ends the drag.
    pub fn released<C>(&mut self, tree: &mut Tree<C>, _event: &PointerEvent) {
        tree.commit_all();
        self.start = None;
    }

    /// Pointer motion without a button held. Navigation ignores it.
    pub fn moved(&mut self, _event: &PointerEvent) {}

    /// Handles a click detected by the host.
    ///
    /// With shift held, every screen frame is reset to the layout and
    /// `observer` is notified. Otherwise the content frames are hit-tested
    /// in preorder and the first node containing the click point is
    /// returned. Hitting a node does not move the tree.
    pub fn clicked<C: ContentHandle>(
        &mut self,
        tree: &mut Tree<C>,
        event: &PointerEvent,
        observer: &mut impl TreeObserver,
    ) -> ClickOutcome {
        if event.shift_held() {
            tree.restore_all();
            observer.tree_changed();
            return ClickOutcome::Reset;
        }
        let hit = tree.search(|node| {
            node.content()
                .and_then(|content| content.frame())
                .is_some_and(|frame| frame.contains(event.point))
        });
        match hit {
            Some(id) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(node = tree[id].name(), "click hit");
                ClickOutcome::Hit(id)
            }
            None => ClickOutcome::Miss,
        }
    }

    /// Solves the isometry that carries `start` onto `end`, on top of a tree
    /// whose root baseline sits at `old`.
    ///
    /// `start` is first brought back into the frame of the untranslated
    /// tree, then the translation `t` mapping it onto `end` is solved from
    /// `end = (start + t) / (1 + start·conj(t))`. The result composes the
    /// undo of `old` with `t`. Returns `None` when `t` is not inside the
    /// disk.
    #[must_use]
    pub fn translation(old: DiskPoint, start: DiskPoint, end: DiskPoint) -> Option<Isometry> {
        let zo = -old;
        let zs = start.translate(zo);
        let de = end.mag2();
        let ds = zs.mag2();
        let t = (end * (1.0 - ds) - zs * (1.0 - de)) / (1.0 - de * ds);
        t.is_valid().then(|| Isometry::compose(zo, t))
    }
}
