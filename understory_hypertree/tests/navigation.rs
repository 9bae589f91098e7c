// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end pan scenarios on a root with a single child.
//!
//! The view is 200x200 pixels with the disk centered at (100, 100). Each
//! gesture presses at pixel (90, 90) and drags to the center of the view.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Rect, Vec2};
use understory_hyperbolic::{DiskPoint, Projector};
use understory_hypertree::{
    ClickOutcome, ContentHandle, EdgeDesc, HyperbolicLayout, Modifiers, Navigator, NodeId,
    PointerEvent, RenderPass, Tree,
};

const EPS: f64 = 1e-9;

fn projector() -> Projector {
    Projector::new(Point::new(100.0, 100.0), Vec2::new(100.0, 100.0))
}

fn at(x: f64, y: f64, modifiers: Modifiers) -> PointerEvent {
    PointerEvent::from_view_point(Point::new(x, y), modifiers, &projector())
}

fn rounded(p: Point) -> Point {
    Point::new(p.x.round(), p.y.round())
}

struct Scene<C> {
    tree: Tree<C>,
    a: NodeId,
    b: NodeId,
    nav: Navigator,
    edges: Vec<EdgeDesc>,
    renders: usize,
}

impl<C: ContentHandle> Scene<C> {
    fn new() -> Self {
        let mut tree = Tree::new("A");
        let a = tree.root();
        let b = tree.insert(a, "B");
        HyperbolicLayout::default().prepare(&mut tree);
        let mut scene = Self {
            tree,
            a,
            b,
            nav: Navigator::new(),
            edges: Vec::new(),
            renders: 0,
        };
        scene.render();
        scene
    }

    fn render(&mut self) {
        RenderPass::default().render(&mut self.tree, &projector(), &mut self.edges);
    }

    /// Runs press, drag, release and re-renders if the tree changed.
    fn drag_to_center(&mut self) {
        let mut changed = false;
        self.nav.pressed(&at(90.0, 90.0, Modifiers::empty()));
        self.nav.dragged(
            &mut self.tree,
            &at(100.0, 100.0, Modifiers::empty()),
            &mut || changed = true,
        );
        self.nav
            .released(&mut self.tree, &at(100.0, 100.0, Modifiers::empty()));
        if changed {
            self.renders += 1;
            self.render();
        }
    }

    fn screen(&self, id: NodeId) -> DiskPoint {
        self.tree[id].screen().coordinates
    }

    fn pixel(&self, id: NodeId) -> Point {
        self.tree[id].screen().point
    }

    fn assert_layout_untouched(&self) {
        assert_eq!(self.tree[self.a].layout().coordinates, DiskPoint::ZERO);
        assert!(
            self.tree[self.b]
                .layout()
                .coordinates
                .approx_eq(DiskPoint::new(0.3, 0.0), EPS)
        );
    }
}

#[test]
fn initial_projection() {
    let scene = Scene::<()>::new();
    assert_eq!(scene.screen(scene.a), DiskPoint::ZERO);
    assert!(scene.screen(scene.b).approx_eq(DiskPoint::new(0.3, 0.0), EPS));
    assert_eq!(scene.pixel(scene.a), Point::new(100.0, 100.0));
    assert_eq!(rounded(scene.pixel(scene.b)), Point::new(130.0, 100.0));
    assert_eq!(scene.edges.len(), 1);
}

#[test]
fn one_drag_translates_the_tree() {
    let mut scene = Scene::<()>::new();
    scene.drag_to_center();

    assert_eq!(scene.renders, 1);
    assert!(!scene.nav.is_dragging());
    scene.assert_layout_untouched();
    assert!(scene.screen(scene.a).approx_eq(DiskPoint::new(0.1, 0.1), EPS));
    assert!(
        scene
            .screen(scene.b)
            .approx_eq(DiskPoint::new(0.3851949519683557, 0.108306649086457), EPS)
    );
    assert_eq!(rounded(scene.pixel(scene.a)), Point::new(110.0, 110.0));
    assert_eq!(rounded(scene.pixel(scene.b)), Point::new(139.0, 111.0));

    // The edge follows both endpoints and is no longer a diameter.
    let edge = &scene.edges[0];
    assert_eq!(edge.from, scene.pixel(scene.a));
    assert_eq!(edge.to, scene.pixel(scene.b));
    assert!(edge.control.is_some());
}

#[test]
fn second_drag_composes_onto_the_first() {
    let mut scene = Scene::<()>::new();
    scene.drag_to_center();
    scene.drag_to_center();

    assert_eq!(scene.renders, 2);
    scene.assert_layout_untouched();
    assert!(
        scene
            .screen(scene.a)
            .approx_eq(DiskPoint::new(0.19607843137254904, 0.19607843137254904), EPS)
    );
    assert!(
        scene
            .screen(scene.b)
            .approx_eq(DiskPoint::new(0.456820512820513, 0.21056410256410266), EPS)
    );
    assert_eq!(rounded(scene.pixel(scene.a)), Point::new(120.0, 120.0));
    assert_eq!(rounded(scene.pixel(scene.b)), Point::new(146.0, 121.0));
}

#[test]
fn shift_click_reset_is_idempotent() {
    let mut scene = Scene::<()>::new();
    scene.drag_to_center();
    scene.drag_to_center();

    for _ in 0..2 {
        let mut changed = false;
        let outcome = scene.nav.clicked(
            &mut scene.tree,
            &at(10.0, 10.0, Modifiers::SHIFT),
            &mut || changed = true,
        );
        assert_eq!(outcome, ClickOutcome::Reset);
        assert!(changed);
        for id in [scene.a, scene.b] {
            let node = &scene.tree[id];
            assert_eq!(node.screen().coordinates, node.layout().coordinates);
            assert_eq!(node.screen().old_coordinates, node.layout().coordinates);
        }
    }

    // Dragging after a reset starts from the layout again.
    scene.drag_to_center();
    assert!(scene.screen(scene.a).approx_eq(DiskPoint::new(0.1, 0.1), EPS));
}

#[test]
fn drag_outside_the_disk_is_skipped() {
    let mut scene = Scene::<()>::new();
    let mut changed = false;
    scene.nav.pressed(&at(90.0, 90.0, Modifiers::empty()));
    // Pixel (0, 0) is the corner of the view, outside the disk.
    let moved = scene.nav.dragged(
        &mut scene.tree,
        &at(0.0, 0.0, Modifiers::empty()),
        &mut || changed = true,
    );
    assert!(!moved);
    assert!(!changed);
    assert_eq!(scene.screen(scene.a), DiskPoint::ZERO);
}

#[derive(Debug, Default)]
struct Label {
    visible: bool,
    frame: Option<Rect>,
}

impl ContentHandle for Label {
    fn footprint_height(&self) -> f64 {
        12.0
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn set_position(&mut self, point: Point) {
        self.frame = Some(Rect::from_center_size(point, (24.0, 12.0)));
    }

    fn frame(&self) -> Option<Rect> {
        self.frame.filter(|_| self.visible)
    }
}

#[test]
fn click_hits_rendered_label() {
    let label_a = Rc::new(RefCell::new(Label::default()));
    let label_b = Rc::new(RefCell::new(Label::default()));
    let mut scene = Scene::new();
    scene.tree.set_content(scene.a, Rc::downgrade(&label_a));
    scene.tree.set_content(scene.b, Rc::downgrade(&label_b));
    scene.render();
    assert!(label_a.borrow().visible);
    assert!(label_b.borrow().visible);

    let mut changed = false;
    let hit = scene
        .nav
        .clicked(&mut scene.tree, &at(131.0, 101.0, Modifiers::empty()), &mut || {
            changed = true;
        });
    assert_eq!(hit, ClickOutcome::Hit(scene.b));
    assert!(!changed);

    // Labels follow the pan.
    scene.drag_to_center();
    let hit = scene
        .nav
        .clicked(&mut scene.tree, &at(110.0, 110.0, Modifiers::empty()), &mut || {});
    assert_eq!(hit, ClickOutcome::Hit(scene.a));

    let miss = scene
        .nav
        .clicked(&mut scene.tree, &at(20.0, 180.0, Modifiers::empty()), &mut || {});
    assert_eq!(miss, ClickOutcome::Miss);
}
