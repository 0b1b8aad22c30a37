//! Curve contract and object snap dispatch

use super::Entity;
use crate::types::Vector3;
use std::fmt;

/// Object snap modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OsnapMode {
    EndPoint,
    MidPoint,
    Center,
    Node,
    Quadrant,
    Insertion,
    Perpendicular,
    Tangent,
    Nearest,
    Centroid,
}

impl fmt::Display for OsnapMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OsnapMode::EndPoint => "EndPoint",
            OsnapMode::MidPoint => "MidPoint",
            OsnapMode::Center => "Center",
            OsnapMode::Node => "Node",
            OsnapMode::Quadrant => "Quadrant",
            OsnapMode::Insertion => "Insertion",
            OsnapMode::Perpendicular => "Perpendicular",
            OsnapMode::Tangent => "Tangent",
            OsnapMode::Nearest => "Nearest",
            OsnapMode::Centroid => "Centroid",
        };
        f.write_str(name)
    }
}

/// Entity that is a single connected curve
pub trait Curve: Entity {
    /// Whether the curve ends where it starts
    fn is_closed(&self) -> bool;

    fn start_point(&self) -> Vector3;

    fn end_point(&self) -> Vector3;

    /// Point halfway along the curve
    fn mid_point(&self) -> Vector3;

    /// Projection of `point` onto the curve
    fn nearest_point(&self, point: Vector3) -> Vector3;

    /// Foot of the perpendicular dropped from `point`
    fn perpendicular_point(&self, point: Vector3) -> Vector3 {
        self.nearest_point(point)
    }
}

/// Snap candidates shared by every curve
///
/// Tangent snapping offers the start point only; a true tangent from an
/// external point is not computed. Modes a curve has no answer for push
/// nothing.
pub fn curve_osnap_points<C: Curve + ?Sized>(curve: &C, mode: OsnapMode, pick_point: Vector3, out: &mut Vec<Vector3>) {
    match mode {
        OsnapMode::EndPoint => {
            out.push(curve.start_point());
            out.push(curve.end_point());
        }
        OsnapMode::MidPoint => out.push(curve.mid_point()),
        OsnapMode::Nearest => out.push(curve.nearest_point(pick_point)),
        OsnapMode::Perpendicular => out.push(curve.perpendicular_point(pick_point)),
        OsnapMode::Tangent => out.push(curve.start_point()),
        OsnapMode::Center
        | OsnapMode::Node
        | OsnapMode::Quadrant
        | OsnapMode::Insertion
        | OsnapMode::Centroid => {}
    }
}

/// Closest point to `point` on a chain of straight segments
pub(crate) fn nearest_on_polyline(points: &[Vector3], point: Vector3) -> Option<Vector3> {
    if points.len() == 1 {
        return points.first().copied();
    }
    points
        .windows(2)
        .map(|w| nearest_on_segment(w[0], w[1], point))
        .min_by(|a, b| a.distance(&point).total_cmp(&b.distance(&point)))
}

/// Closest point to `point` on segment `a`-`b`
pub(crate) fn nearest_on_segment(a: Vector3, b: Vector3, point: Vector3) -> Vector3 {
    let ab = b - a;
    let len2 = ab.length_squared();
    if len2 == 0.0 {
        return a;
    }
    let t = ((point - a).dot(&ab) / len2).clamp(0.0, 1.0);
    a + ab * t
}

/// Point at half the arc length of a chain of straight segments
pub(crate) fn polyline_mid_point(points: &[Vector3]) -> Vector3 {
    let total: f64 = points.windows(2).map(|w| w[0].distance(&w[1])).sum();
    let mut remaining = total / 2.0;
    for w in points.windows(2) {
        let len = w[0].distance(&w[1]);
        if len > 0.0 && remaining <= len {
            return w[0].lerp(&w[1], remaining / len);
        }
        remaining -= len;
    }
    points.first().copied().unwrap_or(Vector3::ZERO)
}
