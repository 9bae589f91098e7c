// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recursive polar layout of a tree in the Poincaré disk.

use alloc::vec::Vec;
use core::f64::consts::PI;
use core::fmt;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use understory_hyperbolic::DiskPoint;

use crate::{NodeId, Tree};

/// Tuning values for [`HyperbolicLayout`].
///
/// The distance from a node to its children is
/// `base_distance + (max_distance - base_distance) · cos(spread_numerator / (2·n + spread_offset))`
/// where `n` is the number of children. The defaults reproduce the classic
/// hyperbolic browser spacing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
    base_distance: f64,
    max_distance: f64,
    spread_numerator: f64,
    spread_offset: f64,
}

impl LayoutConfig {
    /// Default parent to child distance in the disk.
    pub const DEFAULT_BASE_DISTANCE: f64 = 0.3;
    /// Default ceiling of the parent to child distance.
    pub const DEFAULT_MAX_DISTANCE: f64 = 0.95;

    /// Creates a configuration with the given base distance and default
    /// heuristic coefficients.
    pub fn new(base_distance: f64) -> Result<Self, LayoutConfigError> {
        Self::with_max_distance(base_distance, Self::DEFAULT_MAX_DISTANCE)
    }

    /// Creates a configuration with explicit base and ceiling distances.
    ///
    /// Requires `0 < max_distance < 1` and `0 < base_distance < max_distance`.
    pub fn with_max_distance(
        base_distance: f64,
        max_distance: f64,
    ) -> Result<Self, LayoutConfigError> {
        if !(max_distance > 0.0 && max_distance < 1.0) {
            return Err(LayoutConfigError::MaxDistanceOutOfDisk(max_distance));
        }
        if !(base_distance > 0.0 && base_distance < max_distance) {
            return Err(LayoutConfigError::BaseDistanceOutOfRange {
                base_distance,
                max_distance,
            });
        }
        Ok(Self {
            base_distance,
            max_distance,
            spread_numerator: 20.0 * PI,
            spread_offset: 38.0,
        })
    }

    /// Overrides the coefficients of the branching heuristic.
    ///
    /// Both must be finite and `offset` must be greater than `-2`, so that
    /// `2·n + offset` stays positive for every node with children.
    pub fn with_spread(
        mut self,
        numerator: f64,
        offset: f64,
    ) -> Result<Self, LayoutConfigError> {
        if !numerator.is_finite() || !offset.is_finite() || offset <= -2.0 {
            return Err(LayoutConfigError::SpreadOutOfRange { numerator, offset });
        }
        self.spread_numerator = numerator;
        self.spread_offset = offset;
        Ok(self)
    }

    /// Returns the reference parent to child distance.
    #[must_use]
    pub fn base_distance(&self) -> f64 {
        self.base_distance
    }

    /// Returns the ceiling of the parent to child distance.
    #[must_use]
    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }

    /// Returns the distance from a node with `child_count` children to each
    /// of its children.
    #[must_use]
    pub fn child_distance(&self, child_count: usize) -> f64 {
        let n = child_count as f64;
        let spread = (self.spread_numerator / (2.0 * n + self.spread_offset)).cos();
        self.base_distance + (self.max_distance - self.base_distance) * spread
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            base_distance: Self::DEFAULT_BASE_DISTANCE,
            max_distance: Self::DEFAULT_MAX_DISTANCE,
            spread_numerator: 20.0 * PI,
            spread_offset: 38.0,
        }
    }
}

/// Error returned when building an invalid [`LayoutConfig`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LayoutConfigError {
    /// The ceiling distance is not inside the open interval `(0, 1)`.
    MaxDistanceOutOfDisk(f64),
    /// The base distance is not inside `(0, max_distance)`.
    BaseDistanceOutOfRange {
        /// Rejected base distance.
        base_distance: f64,
        /// Ceiling it was checked against.
        max_distance: f64,
    },
    /// The branching heuristic coefficients are not finite, or the offset
    /// would let the divisor reach zero.
    SpreadOutOfRange {
        /// Rejected numerator.
        numerator: f64,
        /// Rejected offset.
        offset: f64,
    },
}

impl fmt::Display for LayoutConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaxDistanceOutOfDisk(d) => {
                write!(f, "max distance {d} must lie strictly between 0 and 1")
            }
            Self::BaseDistanceOutOfRange {
                base_distance,
                max_distance,
            } => write!(
                f,
                "base distance {base_distance} must lie strictly between 0 and {max_distance}"
            ),
            Self::SpreadOutOfRange { numerator, offset } => write!(
                f,
                "spread {numerator}/(2n + {offset}) needs finite values and an offset above -2"
            ),
        }
    }
}

impl core::error::Error for LayoutConfigError {}

/// Places every node of a tree in the disk.
///
/// Each node receives a direction and an angular width from its parent,
/// both expressed in the parent's frame. The node is placed at the
/// configured distance along that direction and translated by the parent's
/// position. Its own width is then divided among its children in proportion
/// to their weights, after converting the angles into the node's frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HyperbolicLayout {
    config: LayoutConfig,
}

impl HyperbolicLayout {
    /// Creates a layout with the given configuration.
    #[must_use]
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Runs the full build sequence for a freshly constructed tree.
    ///
    /// Balances weights bottom-up, lays out every node, links the render
    /// siblings, and resets the screen frames to the layout. Call this once
    /// per structural build before the first render.
    pub fn prepare<C>(&self, tree: &mut Tree<C>) {
        tree.balance();
        self.layout(tree);
        tree.link_all_render_siblings();
        tree.restore_all();
    }

    /// Lays out the tree from its root.
    ///
    /// Weights must be up to date (see [`Tree::balance`]). Only the layout
    /// frames are written; call [`Tree::restore_all`] to show the result.
    pub fn layout<C>(&self, tree: &mut Tree<C>) {
        let root = tree.root();
        tree.node_mut(root).layout.coordinates = DiskPoint::ZERO;
        let mut pending: Vec<Placement> = alloc::vec![Placement {
            node: root,
            angle: 0.0,
            width: PI,
            length: self.config.base_distance,
        }];
        while let Some(p) = pending.pop() {
            self.place(tree, &p);
            let (angle, width) = self.child_sector(tree, &p);
            let node = &tree[p.node];
            let length = self.config.child_distance(node.children.len());
            let total = node.layout.global_weight;

            let mut start = angle - width;
            for &child in node.children.iter() {
                let share = tree[child].layout.weight / total;
                let child_width = width * share;
                pending.push(Placement {
                    node: child,
                    angle: start + child_width,
                    width: child_width,
                    length,
                });
                start += 2.0 * child_width;
            }
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(nodes = tree.len(), "hyperbolic layout done");
    }

    /// Places a node at `length` along `angle` from its parent.
    fn place<C>(&self, tree: &mut Tree<C>, p: &Placement) {
        let Some(parent) = tree[p.node].parent else {
            return;
        };
        let parent_z = tree[parent].layout.coordinates;
        let local = DiskPoint::from_angle(p.angle) * p.length;
        tree.node_mut(p.node).layout.coordinates = local.translate(parent_z);
    }

    /// Converts the sector received from the parent into the node's frame.
    ///
    /// The direction is carried through the parent's and then the node's
    /// translation. The width contracts following `e^(iw') = T(-length)(e^(iw))`,
    /// solved in closed form.
    fn child_sector<C>(&self, tree: &Tree<C>, p: &Placement) -> (f64, f64) {
        let node = &tree[p.node];
        let Some(parent) = node.parent else {
            return (p.angle, p.width);
        };
        let a = DiskPoint::from_angle(p.angle)
            .translate(tree[parent].layout.coordinates)
            .translate(-node.layout.coordinates);
        let c = p.width.cos();
        let big_a = 1.0 + p.length * p.length;
        let big_b = 2.0 * p.length;
        let cos_width = ((big_a * c - big_b) / (big_a - big_b * c)).clamp(-1.0, 1.0);
        (a.arg(), cos_width.acos())
    }
}

struct Placement {
    node: NodeId,
    angle: f64,
    width: f64,
    length: f64,
}
