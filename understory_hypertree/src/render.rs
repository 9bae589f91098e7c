// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rendering pass: projection, edge emission, and label culling.
//!
//! ## Usage
//!
//! 1) Implement [`ContentHandle`] for whatever the host draws at each node
//!    (a label, a widget id, a retained scene node) and attach handles with
//!    [`Tree::set_content`](crate::Tree::set_content).
//! 2) Pick an [`EdgeSink`]: a `Vec<EdgeDesc>` records one description per
//!    edge, a [`BezPath`] accumulates every edge into a single path.
//! 3) Call [`RenderPass::render`] after layout and after every tree change.

use alloc::rc::Weak;
use alloc::vec::Vec;
use core::cell::RefCell;

use kurbo::{BezPath, Point, Rect};
use peniko::Color;
use understory_hyperbolic::{GeodesicKind, Projector, ScreenGeodesic};

use crate::{NodeId, Tree};

/// Content drawn at a node, owned by the host.
///
/// The tree keeps a handle and drives visibility and position; it never
/// inspects the content itself.
pub trait ContentHandle {
    /// Height of the content in pixels, compared against the room around
    /// the node.
    fn footprint_height(&self) -> f64;

    /// Shows or hides the content.
    fn set_visible(&mut self, visible: bool);

    /// Moves the content to a pixel position.
    fn set_position(&mut self, point: Point);

    /// Returns the rendered pixel bounds, used for click hit-testing.
    ///
    /// Content that returns `None` is never hit.
    fn frame(&self) -> Option<Rect> {
        None
    }
}

/// No content: lets a `Tree<()>` run a full render pass.
impl ContentHandle for () {
    fn footprint_height(&self) -> f64 {
        0.0
    }

    fn set_visible(&mut self, _visible: bool) {}

    fn set_position(&mut self, _point: Point) {}
}

/// Weakly referenced content: once the target is dropped every call is a
/// no-op and the footprint reads as zero.
///
/// A target that the host is borrowing during the pass is treated the same
/// way, so the pass never panics on a busy cell.
impl<T: ContentHandle> ContentHandle for Weak<RefCell<T>> {
    fn footprint_height(&self) -> f64 {
        self.upgrade()
            .and_then(|content| Some(content.try_borrow().ok()?.footprint_height()))
            .unwrap_or(0.0)
    }

    fn set_visible(&mut self, visible: bool) {
        if let Some(target) = self.upgrade()
            && let Ok(mut content) = target.try_borrow_mut()
        {
            content.set_visible(visible);
        }
    }

    fn set_position(&mut self, point: Point) {
        if let Some(target) = self.upgrade()
            && let Ok(mut content) = target.try_borrow_mut()
        {
            content.set_position(point);
        }
    }

    fn frame(&self) -> Option<Rect> {
        self.upgrade()
            .and_then(|content| content.try_borrow().ok()?.frame())
    }
}

/// A stroked edge in pixel space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeDesc {
    /// Segment or curve.
    pub kind: GeodesicKind,
    /// Pixel position of the parent end.
    pub from: Point,
    /// Pixel position of the child end.
    pub to: Point,
    /// Shared control point of both cubic handles; `None` for lines.
    pub control: Option<Point>,
    /// Stroke color.
    pub color: Color,
}

impl EdgeDesc {
    /// Describes a projected geodesic stroked with `color`.
    #[must_use]
    pub fn new(geodesic: ScreenGeodesic, color: Color) -> Self {
        Self {
            kind: geodesic.kind,
            from: geodesic.from,
            to: geodesic.to,
            control: geodesic.control,
            color,
        }
    }

    /// Returns the geometry without the color.
    #[must_use]
    pub fn geodesic(&self) -> ScreenGeodesic {
        ScreenGeodesic {
            kind: self.kind,
            from: self.from,
            to: self.to,
            control: self.control,
        }
    }

    /// Returns the edge as a path.
    #[must_use]
    pub fn to_path(&self) -> BezPath {
        self.geodesic().to_path()
    }
}

/// Receiver of the edges emitted by a render pass.
///
/// Each pass clears the sink and then pushes every edge again.
pub trait EdgeSink {
    /// Drops every edge from the previous pass.
    fn clear_edges(&mut self);

    /// Adds one edge.
    fn push_edge(&mut self, edge: EdgeDesc);
}

impl EdgeSink for Vec<EdgeDesc> {
    fn clear_edges(&mut self) {
        self.clear();
    }

    fn push_edge(&mut self, edge: EdgeDesc) {
        self.push(edge);
    }
}

/// Accumulates every edge as a subpath of one path. Colors are dropped.
impl EdgeSink for BezPath {
    fn clear_edges(&mut self) {
        *self = Self::new();
    }

    fn push_edge(&mut self, edge: EdgeDesc) {
        edge.geodesic().append_to(self);
    }
}

/// Counters reported by [`RenderPass::render`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Edges pushed to the sink.
    pub edges: usize,
    /// Content handles shown.
    pub shown: usize,
    /// Content handles hidden.
    pub hidden: usize,
}

/// Projects a laid-out tree to pixels and updates edges and content.
///
/// A pass walks the tree in preorder three times:
/// 1. every pixel point and edge is projected,
/// 2. the sink is cleared and refilled with one [`EdgeDesc`] per edge,
/// 3. content is shown at its node's pixel point when
///    [`RenderPass::available_space`] is at least its footprint, and hidden
///    otherwise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderPass {
    /// Color carried by every emitted edge.
    pub edge_color: Color,
}

impl Default for RenderPass {
    fn default() -> Self {
        Self {
            edge_color: Color::from_rgba8(0, 0, 0, 128),
        }
    }
}

impl RenderPass {
    /// Creates a pass that strokes edges with `edge_color`.
    #[must_use]
    pub fn new(edge_color: Color) -> Self {
        Self { edge_color }
    }

    /// Runs all three steps.
    pub fn render<C: ContentHandle>(
        &self,
        tree: &mut Tree<C>,
        projector: &Projector,
        sink: &mut impl EdgeSink,
    ) -> RenderStats {
        self.project(tree, projector);
        let edges = self.emit(tree, sink);
        let (shown, hidden) = self.place(tree);
        let stats = RenderStats {
            edges,
            shown,
            hidden,
        };
        #[cfg(feature = "tracing")]
        tracing::trace!(
            nodes = tree.len(),
            edges = stats.edges,
            shown = stats.shown,
            hidden = stats.hidden,
            "render pass done"
        );
        stats
    }

    /// Updates every pixel point and projects every edge.
    pub fn project<C>(&self, tree: &mut Tree<C>, projector: &Projector) {
        tree.for_each_preorder(|tree, id| {
            let node = tree.node_mut(id);
            node.screen.point = projector.to_screen(node.screen.coordinates);
            if let Some(edge) = &mut node.edge {
                edge.project(projector);
            }
        });
    }

    /// Replaces the sink contents with the current edges and returns how
    /// many were pushed.
    ///
    /// Edges must have been projected first.
    pub fn emit<C>(&self, tree: &Tree<C>, sink: &mut impl EdgeSink) -> usize {
        sink.clear_edges();
        let mut edges = 0;
        for id in tree.preorder() {
            if let Some(edge) = tree[id].edge() {
                sink.push_edge(EdgeDesc::new(edge.screen(), self.edge_color));
                edges += 1;
            }
        }
        edges
    }

    /// Shows content that fits around its node and hides the rest.
    ///
    /// Returns the number of shown and hidden handles. Pixel points must
    /// have been projected first.
    pub fn place<C: ContentHandle>(&self, tree: &mut Tree<C>) -> (usize, usize) {
        let mut shown = 0;
        let mut hidden = 0;
        tree.for_each_preorder(|tree, id| {
            let space = Self::available_space(tree, id);
            let node = tree.node_mut(id);
            let point = node.screen.point;
            let Some(content) = &mut node.content else {
                return;
            };
            if space >= content.footprint_height() {
                content.set_position(point);
                content.set_visible(true);
                shown += 1;
            } else {
                content.set_visible(false);
                hidden += 1;
            }
        });
        (shown, hidden)
    }

    /// Estimates the free room in pixels around a node.
    ///
    /// For a leaf this is the distance to the nearest of its parent and its
    /// render sibling, or `f64::MAX` when it has neither. A branch is further
    /// bounded by the distance to its first child.
    #[must_use]
    pub fn available_space<C>(tree: &Tree<C>, id: NodeId) -> f64 {
        let node = &tree[id];
        let here = node.screen.point;
        let neighbor_distance = |other: Option<NodeId>| {
            other.map_or(f64::MAX, |other| here.distance(tree[other].screen.point))
        };
        let leaf = neighbor_distance(node.parent).min(neighbor_distance(node.sibling));
        match node.children.first() {
            Some(&first) => leaf.min(neighbor_distance(Some(first))),
            None => leaf,
        }
    }
}
