// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for hyperbolic tree layout, panning, and rendering.
//!
//! Trees are synthetic and deterministic: a fixed fan-out per level, which
//! is roughly the shape of a file system or an outline.

use core::time::Duration;
use criterion::measurement::WallTime;
use criterion::{
    BatchSize, BenchmarkGroup, BenchmarkId, Criterion, black_box, criterion_group, criterion_main,
};
use kurbo::{BezPath, Point, Rect};
use understory_hyperbolic::Projector;
use understory_hypertree::{
    EdgeDesc, HyperbolicLayout, Modifiers, Navigator, PointerEvent, RenderPass, Tree,
};

/// `(name, fan-out, depth)`
const SHAPES: &[(&str, usize, usize)] = &[
    ("wide_2x200", 200, 2),
    ("balanced_4x5", 4, 5),
    ("deep_2x10", 2, 10),
];

fn build(fan_out: usize, depth: usize) -> Tree {
    let mut tree = Tree::new("root");
    let mut frontier = vec![tree.root()];
    for level in 0..depth {
        let mut next = Vec::with_capacity(frontier.len() * fan_out);
        for parent in frontier {
            for i in 0..fan_out {
                next.push(tree.insert(parent, format!("{level}.{i}")));
            }
        }
        frontier = next;
    }
    tree
}

fn projector() -> Projector {
    Projector::from_view_rect(Rect::new(0.0, 0.0, 1024.0, 768.0))
}

fn bench_prepare(g: &mut BenchmarkGroup<'_, WallTime>, name: &str, fan_out: usize, depth: usize) {
    let layout = HyperbolicLayout::default();
    g.bench_with_input(BenchmarkId::new("prepare", name), &name, |b, _| {
        b.iter_batched(
            || build(fan_out, depth),
            |mut tree| {
                layout.prepare(&mut tree);
                black_box(tree)
            },
            BatchSize::LargeInput,
        );
    });
}

fn bench_drag(g: &mut BenchmarkGroup<'_, WallTime>, name: &str, fan_out: usize, depth: usize) {
    let mut tree = build(fan_out, depth);
    HyperbolicLayout::default().prepare(&mut tree);
    let projector = projector();
    let press = PointerEvent::from_view_point(Point::new(480.0, 360.0), Modifiers::empty(), &projector);
    let a = PointerEvent::from_view_point(Point::new(520.0, 400.0), Modifiers::empty(), &projector);
    let b = PointerEvent::from_view_point(Point::new(500.0, 380.0), Modifiers::empty(), &projector);
    let mut nav = Navigator::new();
    nav.pressed(&press);
    let mut toggle = false;

    g.bench_with_input(BenchmarkId::new("drag", name), &name, |bench, _| {
        bench.iter(|| {
            toggle = !toggle;
            let event = if toggle { &a } else { &b };
            black_box(nav.dragged(&mut tree, event, &mut || {}))
        });
    });
}

fn bench_render(g: &mut BenchmarkGroup<'_, WallTime>, name: &str, fan_out: usize, depth: usize) {
    let mut tree = build(fan_out, depth);
    HyperbolicLayout::default().prepare(&mut tree);
    let projector = projector();
    let pass = RenderPass::default();

    let mut edges: Vec<EdgeDesc> = Vec::new();
    g.bench_with_input(BenchmarkId::new("render_vec", name), &name, |b, _| {
        b.iter(|| black_box(pass.render(&mut tree, &projector, &mut edges)));
    });

    let mut path = BezPath::new();
    g.bench_with_input(BenchmarkId::new("render_path", name), &name, |b, _| {
        b.iter(|| black_box(pass.render(&mut tree, &projector, &mut path)));
    });
}

fn hypertree(c: &mut Criterion) {
    let mut g = c.benchmark_group("hypertree");
    g.warm_up_time(Duration::from_secs(1));
    g.measurement_time(Duration::from_secs(3));

    for &(name, fan_out, depth) in SHAPES {
        bench_prepare(&mut g, name, fan_out, depth);
        bench_drag(&mut g, name, fan_out, depth);
        bench_render(&mut g, name, fan_out, depth);
    }

    g.finish();
}

criterion_group!(benches, hypertree);
criterion_main!(benches);
