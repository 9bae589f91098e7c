// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The node arena: structure, coordinate frames, traversal, and per-node updates.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::ops::Index;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Point;
use smallvec::SmallVec;
use understory_hyperbolic::{DiskPoint, Geodesic, Isometry};

/// Identifier for a node in a [`Tree`].
///
/// A small, copyable index into the tree's arena. Nodes are never removed,
/// so an id stays valid for the lifetime of the tree that issued it. Ids
/// from one tree must not be used with another.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    /// Returns the arena slot of this node, in creation order.
    #[must_use]
    pub const fn index(self) -> usize {
        self.idx()
    }
}

/// Canonical placement computed by the layout.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayoutFrame {
    /// Position in the disk with the root at the origin.
    pub coordinates: DiskPoint,
    /// Share of the parent's angular budget claimed by this node.
    pub weight: f64,
    /// Sum of the children's weights.
    pub global_weight: f64,
}

/// Live placement after panning.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScreenFrame {
    /// Current position in the disk.
    pub coordinates: DiskPoint,
    /// Position at the last commit; the baseline that drags transform.
    pub old_coordinates: DiskPoint,
    /// Pixel position from the latest projection.
    pub point: Point,
}

/// A node of the tree.
///
/// `C` is the content handle type attached to nodes (see
/// [`ContentHandle`](crate::ContentHandle)); the tree stores it but never
/// interprets it.
#[derive(Clone, Debug)]
pub struct Node<C> {
    pub(crate) name: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) sibling: Option<NodeId>,
    pub(crate) children: SmallVec<[NodeId; 4]>,
    pub(crate) content: Option<C>,
    pub(crate) layout: LayoutFrame,
    pub(crate) screen: ScreenFrame,
    pub(crate) edge: Option<Geodesic>,
}

impl<C> Node<C> {
    fn new(name: String) -> Self {
        Self {
            name,
            parent: None,
            sibling: None,
            children: SmallVec::new(),
            content: None,
            layout: LayoutFrame::default(),
            screen: ScreenFrame::default(),
            edge: None,
        }
    }

    /// Returns the node name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the parent, or `None` for the root and detached nodes.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns the previous sibling in render order.
    ///
    /// Set by [`Tree::link_render_siblings`] on the parent.
    #[must_use]
    pub fn render_sibling(&self) -> Option<NodeId> {
        self.sibling
    }

    /// Returns the children in insertion order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Returns `true` if this node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns the attached content handle, if any.
    #[must_use]
    pub fn content(&self) -> Option<&C> {
        self.content.as_ref()
    }

    /// Returns the canonical layout frame.
    #[must_use]
    pub fn layout(&self) -> &LayoutFrame {
        &self.layout
    }

    /// Returns the live screen frame.
    #[must_use]
    pub fn screen(&self) -> &ScreenFrame {
        &self.screen
    }

    /// Returns the geodesic to the parent, recomputed whenever the screen
    /// coordinates change. Always `None` for the root.
    #[must_use]
    pub fn edge(&self) -> Option<&Geodesic> {
        self.edge.as_ref()
    }
}

/// A rooted tree stored as an arena of [`Node`]s.
///
/// The tree owns every node. Parent and render-sibling links are plain
/// [`NodeId`]s, so there are no ownership cycles and the whole tree is
/// dropped as a unit.
///
/// Traversals start at the root; nodes created with [`Tree::add_node`] and
/// never attached are ignored by every whole-tree operation.
#[derive(Clone, Debug)]
pub struct Tree<C = ()> {
    nodes: Vec<Node<C>>,
    root: NodeId,
}

impl<C> Tree<C> {
    /// Creates a tree holding a single root node.
    #[must_use]
    pub fn new(root_name: impl Into<String>) -> Self {
        Self {
            nodes: alloc::vec![Node::new(root_name.into())],
            root: NodeId(0),
        }
    }

    /// Returns the root id.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the number of nodes in the arena, attached or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a tree holds at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Creates a detached node and returns its id.
    ///
    /// Use [`Tree::attach`] to wire it under a parent.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "trees with more than u32::MAX nodes are not supported"
    )]
    pub fn add_node(&mut self, name: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(name.into()));
        id
    }

    /// Appends `child` to the children of `parent` and sets its parent link.
    ///
    /// Attachment is append-only. Attaching a node to itself, attaching the
    /// root, or attaching a node twice is a caller bug and only checked in
    /// debug builds.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(parent != child, "cannot attach a node to itself");
        debug_assert!(child != self.root, "cannot attach the root");
        debug_assert!(
            self.nodes[child.idx()].parent.is_none(),
            "node is already attached"
        );
        self.nodes[parent.idx()].children.push(child);
        self.nodes[child.idx()].parent = Some(parent);
    }

    /// Creates a node named `name` and attaches it under `parent`.
    pub fn insert(&mut self, parent: NodeId, name: impl Into<String>) -> NodeId {
        let id = self.add_node(name);
        self.attach(parent, id);
        id
    }

    /// Returns the node for `id`, or `None` if the id is out of range.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node<C>> {
        self.nodes.get(id.idx())
    }

    /// Attaches `content` to a node, returning the previous content.
    pub fn set_content(&mut self, id: NodeId, content: C) -> Option<C> {
        self.nodes[id.idx()].content.replace(content)
    }

    /// Detaches and returns the content of a node.
    pub fn take_content(&mut self, id: NodeId) -> Option<C> {
        self.nodes[id.idx()].content.take()
    }

    /// Returns the content of a node mutably.
    #[must_use]
    pub fn content_mut(&mut self, id: NodeId) -> Option<&mut C> {
        self.nodes[id.idx()].content.as_mut()
    }

    /// Iterates over the subtree under the root, each node before its children.
    #[must_use]
    pub fn preorder(&self) -> Preorder<'_, C> {
        Preorder {
            tree: self,
            stack: alloc::vec![self.root],
        }
    }

    /// Iterates over the subtree under the root, children before each node.
    #[must_use]
    pub fn postorder(&self) -> Postorder<'_, C> {
        Postorder {
            tree: self,
            stack: alloc::vec![(self.root, false)],
        }
    }

    /// Visits every node in preorder.
    pub fn traverse(&self, mut f: impl FnMut(NodeId, &Node<C>)) {
        for id in self.preorder() {
            f(id, &self[id]);
        }
    }

    /// Visits every node in postorder.
    pub fn traverse_postorder(&self, mut f: impl FnMut(NodeId, &Node<C>)) {
        for id in self.postorder() {
            f(id, &self[id]);
        }
    }

    /// Returns the first node in preorder that satisfies `predicate`.
    ///
    /// Subtrees of non-matching nodes are still searched.
    pub fn search(&self, mut predicate: impl FnMut(&Node<C>) -> bool) -> Option<NodeId> {
        self.preorder().find(|&id| predicate(&self[id]))
    }

    /// Returns the first node in preorder named `name`.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.search(|node| node.name == name)
    }

    /// Recomputes the weights of one node from its children's weights.
    ///
    /// `global_weight` becomes the sum of the children's weights and
    /// `weight` becomes `1 + ln(global_weight)`, or `1` for a leaf. The
    /// logarithm keeps large subtrees from claiming most of the angular
    /// budget. Children must be balanced first.
    pub fn balance_node(&mut self, id: NodeId) {
        let global: f64 = self.nodes[id.idx()]
            .children
            .iter()
            .map(|c| self.nodes[c.idx()].layout.weight)
            .sum();
        let layout = &mut self.nodes[id.idx()].layout;
        layout.global_weight = global;
        layout.weight = if global > 0.0 { 1.0 + global.ln() } else { 1.0 };
    }

    /// Balances every node, bottom-up.
    pub fn balance(&mut self) {
        let order: Vec<NodeId> = self.postorder().collect();
        for id in order {
            self.balance_node(id);
        }
    }

    /// Threads the render-sibling chain over the children of `parent`.
    ///
    /// The first child gets no link; each later child links to the child
    /// just before it. The chain only feeds the label spacing estimate.
    pub fn link_render_siblings(&mut self, parent: NodeId) {
        let mut previous: Option<NodeId> = None;
        for i in 0..self.nodes[parent.idx()].children.len() {
            let child = self.nodes[parent.idx()].children[i];
            self.nodes[child.idx()].sibling = previous;
            previous = Some(child);
        }
    }

    /// Threads the render-sibling chain under every node.
    pub fn link_all_render_siblings(&mut self) {
        let order: Vec<NodeId> = self.preorder().collect();
        for id in order {
            self.link_render_siblings(id);
        }
    }

    /// Resets the screen frame of a node to its layout coordinates.
    pub fn restore(&mut self, id: NodeId) {
        let z = self.nodes[id.idx()].layout.coordinates;
        let screen = &mut self.nodes[id.idx()].screen;
        screen.coordinates = z;
        screen.old_coordinates = z;
        self.refresh_edge(id);
    }

    /// Resets every screen frame to the layout, top-down.
    pub fn restore_all(&mut self) {
        self.for_each_preorder(Self::restore);
    }

    /// Makes the current screen coordinates of a node its new baseline.
    pub fn commit(&mut self, id: NodeId) {
        let screen = &mut self.nodes[id.idx()].screen;
        screen.old_coordinates = screen.coordinates;
    }

    /// Commits every node.
    pub fn commit_all(&mut self) {
        self.for_each_preorder(Self::commit);
    }

    /// Moves a node to the image of its baseline under `isometry`.
    ///
    /// The parent must already have been moved for the edge to be correct.
    pub fn apply(&mut self, id: NodeId, isometry: &Isometry) {
        let screen = &mut self.nodes[id.idx()].screen;
        screen.coordinates = isometry.transform(screen.old_coordinates);
        self.refresh_edge(id);
    }

    /// Applies `isometry` to every baseline, top-down.
    pub fn apply_all(&mut self, isometry: &Isometry) {
        self.for_each_preorder(|tree, id| tree.apply(id, isometry));
    }

    /// Moves a node to its baseline translated by `t`.
    ///
    /// The parent must already have been moved for the edge to be correct.
    pub fn translate(&mut self, id: NodeId, t: DiskPoint) {
        let screen = &mut self.nodes[id.idx()].screen;
        screen.coordinates = screen.old_coordinates.translate(t);
        self.refresh_edge(id);
    }

    /// Translates every baseline by `t`, top-down.
    pub fn translate_all(&mut self, t: DiskPoint) {
        self.for_each_preorder(|tree, id| tree.translate(id, t));
    }

    /// Returns a displayable outline of the whole tree.
    #[must_use]
    pub fn description(&self) -> TreeDescription<'_, C> {
        TreeDescription { tree: self }
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<C> {
        &mut self.nodes[id.idx()]
    }

    pub(crate) fn for_each_preorder(&mut self, mut f: impl FnMut(&mut Self, NodeId)) {
        let order: Vec<NodeId> = self.preorder().collect();
        for id in order {
            f(self, id);
        }
    }

    fn refresh_edge(&mut self, id: NodeId) {
        let node = &self.nodes[id.idx()];
        let edge = node.parent.map(|p| {
            Geodesic::new(self.nodes[p.idx()].screen.coordinates, node.screen.coordinates)
        });
        self.nodes[id.idx()].edge = edge;
    }
}

impl<C> Index<NodeId> for Tree<C> {
    type Output = Node<C>;

    fn index(&self, id: NodeId) -> &Node<C> {
        &self.nodes[id.idx()]
    }
}

/// Preorder iterator over a [`Tree`]; see [`Tree::preorder`].
#[derive(Debug)]
pub struct Preorder<'a, C> {
    tree: &'a Tree<C>,
    stack: Vec<NodeId>,
}

impl<C> Iterator for Preorder<'_, C> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack.extend(self.tree[id].children.iter().rev().copied());
        Some(id)
    }
}

/// Postorder iterator over a [`Tree`]; see [`Tree::postorder`].
#[derive(Debug)]
pub struct Postorder<'a, C> {
    tree: &'a Tree<C>,
    // The flag is set once the node's children have been pushed.
    stack: Vec<(NodeId, bool)>,
}

impl<C> Iterator for Postorder<'_, C> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        loop {
            let (id, expanded) = self.stack.pop()?;
            if expanded {
                return Some(id);
            }
            self.stack.push((id, true));
            self.stack
                .extend(self.tree[id].children.iter().rev().map(|&c| (c, false)));
        }
    }
}

impl fmt::Display for LayoutFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        if self.coordinates != DiskPoint::ZERO {
            write!(f, "coord={}", self.coordinates)?;
            sep = " ";
        }
        if self.weight > 0.0 {
            write!(f, "{sep}weight={}", self.weight)?;
            sep = " ";
        }
        if self.global_weight > 0.0 {
            write!(f, "{sep}globalWeight={}", self.global_weight)?;
        }
        Ok(())
    }
}

impl fmt::Display for ScreenFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        if self.coordinates != DiskPoint::ZERO {
            write!(f, "coord={}", self.coordinates)?;
            sep = " ";
        }
        if self.old_coordinates != DiskPoint::ZERO {
            write!(f, "{sep}old={}", self.old_coordinates)?;
            sep = " ";
        }
        if self.point != Point::ZERO {
            write!(f, "{sep}point=({}, {})", self.point.x, self.point.y)?;
        }
        Ok(())
    }
}

impl<C> fmt::Display for Node<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if self.layout != LayoutFrame::default() {
            write!(f, " layout={{{}}}", self.layout)?;
        }
        if self.screen != ScreenFrame::default() {
            write!(f, " screen={{{}}}", self.screen)?;
        }
        if let Some(edge) = &self.edge {
            write!(f, " edge={{{edge}}}")?;
        }
        Ok(())
    }
}

/// Box-drawing outline of a [`Tree`], one node per line.
///
/// Returned by [`Tree::description`].
#[derive(Debug)]
pub struct TreeDescription<'a, C> {
    tree: &'a Tree<C>,
}

impl<C> TreeDescription<'_, C> {
    fn write_node(
        &self,
        f: &mut fmt::Formatter<'_>,
        id: NodeId,
        indent: &mut Vec<&'static str>,
    ) -> fmt::Result {
        for s in indent.iter() {
            f.write_str(s)?;
        }
        write!(f, "{}", self.tree[id])?;
        let children = self.tree[id].children();
        for (i, &child) in children.iter().enumerate() {
            f.write_str("\n")?;
            let branch = if i + 1 < children.len() { "├" } else { "└" };
            let saved = indent.clone();
            match indent.pop() {
                Some(last) => {
                    indent.push(if last == "├" { "│" } else { " " });
                    indent.push(branch);
                }
                None => indent.push(branch),
            }
            self.write_node(f, child, indent)?;
            *indent = saved;
        }
        Ok(())
    }
}

impl<C> fmt::Display for TreeDescription<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_node(f, self.tree.root, &mut Vec::new())
    }
}
