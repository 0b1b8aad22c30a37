//! Geometry primitives backing the entities
//!
//! Entities own exactly one of these and delegate extents, sampling,
//! projection and transformation to it. Sampling methods take a segment
//! count and return `segments + 1` points, both ends included.

pub mod area;
pub mod circular_arc;
pub mod elliptical_arc;
pub mod nurbs;
pub mod polyline2d;

pub use area::Area2d;
pub use circular_arc::CircularArc3d;
pub use elliptical_arc::EllipticalArc3d;
pub use nurbs::NurbsCurve;
pub use polyline2d::{Polyline2d, PolylineVertex2d};

use std::f64::consts::TAU;

/// Fixed sampling resolution used when entities tessellate for rendering
pub const TESSELLATION_SAMPLES: usize = 100;

/// Bring an angle into `[0, 2π)`
pub(crate) fn normalize_angle(angle: f64) -> f64 {
    let a = angle % TAU;
    if a < 0.0 {
        a + TAU
    } else {
        a
    }
}

/// Counter-clockwise sweep from `start` to `end`, in `(0, 2π]`
pub(crate) fn sweep_angle(start: f64, end: f64) -> f64 {
    if (end - start).abs() >= TAU - 1e-12 {
        return TAU;
    }
    let sweep = normalize_angle(end - start);
    if sweep == 0.0 {
        TAU
    } else {
        sweep
    }
}
