use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nalgebra::Point2;
use phaseview::ephemeris::{CoordinateMode, SnapshotEphemeris};
use phaseview::phase::{draw_object_phase, PhaseStyle, Silhouette};
use phaseview::render::{raster, svg, Figure};
use phaseview::{terminator_angle, Body};

fn silhouette_bench(c: &mut Criterion) {
    let center = Point2::new(20.24, 274.26);

    let mut group = c.benchmark_group("silhouette");
    group.bench_function("build_default", |b| {
        b.iter(|| Silhouette::build(black_box(3.72), black_box(0.2429), center, 1.785))
    });
    group.bench_function("build_1000_steps", |b| {
        b.iter(|| {
            Silhouette::build_with_steps(black_box(3.72), black_box(0.2429), center, 1.785, 1000)
        })
    });
    group.finish();
}

fn phase_bench(c: &mut Criterion) {
    let snapshot = SnapshotEphemeris::bundled().unwrap();
    let observer = snapshot.observer().clone();

    let mut group = c.benchmark_group("phase");
    group.bench_function("terminator_angle", |b| {
        b.iter(|| {
            terminator_angle(
                &snapshot,
                &observer,
                black_box(CoordinateMode::Topocentric),
                Body::Moon,
            )
        })
    });
    group.bench_function("draw_object_phase", |b| {
        b.iter(|| {
            let mut figure = Figure::new();
            draw_object_phase(
                &mut figure,
                &snapshot,
                &observer,
                CoordinateMode::Topocentric,
                Body::Moon,
                Point2::new(20.24, 274.26),
                1.785,
                &PhaseStyle::default(),
            )
            .unwrap();
            figure
        })
    });
    group.finish();
}

fn render_bench(c: &mut Criterion) {
    let snapshot = SnapshotEphemeris::bundled().unwrap();
    let observer = snapshot.observer().clone();
    let mut figure = Figure::new().with_title("Moon");
    draw_object_phase(
        &mut figure,
        &snapshot,
        &observer,
        CoordinateMode::Topocentric,
        Body::Moon,
        Point2::origin(),
        2.0,
        &PhaseStyle::default(),
    )
    .unwrap();

    let mut group = c.benchmark_group("render");
    group.bench_function("svg", |b| {
        b.iter(|| svg::render_svg(black_box(&figure), &svg::SvgOptions::default()))
    });
    group.bench_function("rasterize_80x24", |b| {
        b.iter(|| raster::rasterize(black_box(&figure), 80, 24, raster::TERMINAL_CELL_ASPECT))
    });
    group.finish();
}

criterion_group!(benches, silhouette_bench, phase_bench, render_bench);
criterion_main!(benches);
