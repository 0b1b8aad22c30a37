use acad_entities::entities::{Extents, Leader, Polyline, Spline};
use acad_entities::geometry::PolylineVertex2d;
use acad_entities::{Vector2, Vector3};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bulged_polyline(segments: usize) -> Polyline {
    let mut polyline = Polyline::new();
    for i in 0..segments {
        let bulge = if i % 2 == 0 { 0.5 } else { 0.0 };
        polyline.add_vertex(PolylineVertex2d::with_bulge(Vector2::new(i as f64, (i % 3) as f64), bulge));
    }
    polyline
}

fn fit_spline(points: usize) -> Spline {
    let fit_points = (0..points)
        .map(|i| Vector3::new(i as f64, (i as f64 * 0.7).sin() * 5.0, 0.0))
        .collect();
    Spline::from_fit_points(fit_points, false).unwrap()
}

fn bench_tessellation(c: &mut Criterion) {
    let polyline = bulged_polyline(64);
    c.bench_function("polyline_tessellate_64", |b| b.iter(|| black_box(&polyline).tessellate()));

    let spline = fit_spline(32);
    c.bench_function("spline_tessellate_32", |b| b.iter(|| black_box(&spline).tessellate()));

    let leader = Leader::from_vertices((0..16).map(|i| Vector3::new(i as f64, (i % 2) as f64, 0.0)).collect());
    c.bench_function("leader_extents_cached", |b| {
        b.iter(|| black_box(&leader).geometric_extents())
    });
}

criterion_group!(benches, bench_tessellation);
criterion_main!(benches);
