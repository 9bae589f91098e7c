// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_hypertree --heading-base-level=0

//! Understory Hypertree: hyperbolic tree layout and focus+context navigation.
//!
//! A tree is laid out once in the Poincaré disk, where the room available
//! grows exponentially with the distance from the center. Dragging applies a
//! hyperbolic isometry to the whole tree: the region under the pointer moves
//! toward the center and grows, while the rest of the tree shrinks toward the
//! rim without ever leaving the view.
//!
//! The crate is headless. It provides:
//! - [`Tree`]: an arena of named nodes, each carrying a canonical
//!   [`LayoutFrame`] and a live [`ScreenFrame`].
//! - [`HyperbolicLayout`]: the recursive polar layout that assigns every
//!   node its disk position.
//! - [`RenderPass`]: projection into pixels, emission of edges to an
//!   [`EdgeSink`], and show/hide culling of host content through
//!   [`ContentHandle`].
//! - [`Navigator`]: the press/drag/release/click state machine that pans the
//!   tree.
//!
//! Geometry lives in [`understory_hyperbolic`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use understory_hyperbolic::{DiskPoint, Projector};
//! use understory_hypertree::{
//!     EdgeDesc, HyperbolicLayout, Modifiers, Navigator, PointerEvent, RenderPass, Tree,
//! };
//!
//! let mut tree: Tree = Tree::new("A");
//! let b = tree.insert(tree.root(), "B");
//! HyperbolicLayout::default().prepare(&mut tree);
//!
//! let projector = Projector::new(Point::new(100.0, 100.0), (100.0, 100.0).into());
//! let mut edges: Vec<EdgeDesc> = Vec::new();
//! RenderPass::default().render(&mut tree, &projector, &mut edges);
//! assert_eq!(edges.len(), 1);
//!
//! // Drag the point under pixel (90, 90) to the center of the view.
//! let mut nav = Navigator::new();
//! let mut dirty = false;
//! let press = PointerEvent::from_view_point(Point::new(90.0, 90.0), Modifiers::empty(), &projector);
//! let release = PointerEvent::from_view_point(Point::new(100.0, 100.0), Modifiers::empty(), &projector);
//! nav.pressed(&press);
//! nav.dragged(&mut tree, &release, &mut || dirty = true);
//! nav.released(&mut tree, &release);
//! assert!(dirty);
//!
//! let root = tree.root();
//! assert!(tree[root].screen().coordinates.approx_eq(DiskPoint::new(0.1, 0.1), 1e-9));
//! assert!(tree[b].layout().coordinates.approx_eq(DiskPoint::new(0.3, 0.0), 1e-9));
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwarded to Kurbo and Peniko.
//! - `libm`: float math for `no_std` builds.
//! - `tracing`: emit `tracing` events for skipped drags, click hits, and
//!   per-pass counters. No subscriber is installed.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod event;
mod layout;
mod navigator;
mod render;
mod tree;

pub use event::{Modifiers, PointerEvent};
pub use layout::{HyperbolicLayout, LayoutConfig, LayoutConfigError};
pub use navigator::{ClickOutcome, Navigator, TreeObserver};
pub use render::{ContentHandle, EdgeDesc, EdgeSink, RenderPass, RenderStats};
pub use tree::{LayoutFrame, Node, NodeId, Postorder, Preorder, ScreenFrame, Tree, TreeDescription};
