//! Planar polyline with bulge arcs and per-vertex widths

use super::TESSELLATION_SAMPLES;
use crate::types::{BoundingBox2D, Transform, Vector2};

/// One polyline vertex in OCS
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PolylineVertex2d {
    pub point: Vector2,
    /// Arc curvature to the next vertex, `tan(sweep / 4)`
    pub bulge: f64,
    pub start_width: f64,
    pub end_width: f64,
}

impl PolylineVertex2d {
    pub fn new(point: Vector2) -> Self {
        Self {
            point,
            ..Default::default()
        }
    }

    pub fn with_bulge(point: Vector2, bulge: f64) -> Self {
        Self {
            point,
            bulge,
            ..Default::default()
        }
    }
}

/// Ordered vertex list, optionally closed
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polyline2d {
    pub vertices: Vec<PolylineVertex2d>,
    pub closed: bool,
}

impl Polyline2d {
    pub fn new(vertices: Vec<PolylineVertex2d>, closed: bool) -> Self {
        Self { vertices, closed }
    }

    /// Straight-edged polyline through `points`
    pub fn from_points(points: &[Vector2], closed: bool) -> Self {
        Self::new(points.iter().copied().map(PolylineVertex2d::new).collect(), closed)
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    fn segment_count(&self) -> usize {
        match self.vertices.len() {
            0 | 1 => 0,
            n if self.closed => n,
            n => n - 1,
        }
    }

    /// Sample the polyline: straight segments contribute their end points,
    /// bulged segments are split into arcs of `arc_segments` pieces
    pub fn get_points(&self, arc_segments: usize) -> Vec<Vector2> {
        let mut points = Vec::new();
        let Some(first) = self.vertices.first() else {
            return points;
        };
        points.push(first.point);

        let n = self.vertices.len();
        for i in 0..self.segment_count() {
            let from = &self.vertices[i];
            let to = self.vertices[(i + 1) % n].point;
            if from.bulge.abs() < 1e-12 {
                points.push(to);
            } else {
                points.extend(bulge_points(from.point, to, from.bulge, arc_segments));
            }
        }
        points
    }

    /// Sample with the default tessellation resolution
    pub fn tessellate(&self) -> Vec<Vector2> {
        self.get_points(TESSELLATION_SAMPLES)
    }

    pub fn bounding_box(&self) -> Option<BoundingBox2D> {
        BoundingBox2D::from_points(&self.tessellate())
    }

    /// Closest point on the sampled polyline
    pub fn nearest_point(&self, point: Vector2) -> Option<Vector2> {
        let pts = self.tessellate();
        if pts.len() == 1 {
            return pts.first().copied();
        }
        pts.windows(2)
            .map(|w| closest_on_segment(w[0], w[1], point))
            .min_by(|a, b| a.distance(&point).total_cmp(&b.distance(&point)))
    }

    /// Transform vertices lying in the plane `z = elevation`
    ///
    /// Bulges flip sign when the transform mirrors the plane, since arc
    /// direction reverses. Widths scale with the transform.
    pub fn transform(&mut self, transform: &Transform, elevation: f64) {
        let mirrored = transform.determinant() < 0.0;
        let scale = transform.scale_factor();
        for vertex in &mut self.vertices {
            vertex.point = transform.apply(vertex.point.with_z(elevation)).to_vec2();
            vertex.start_width *= scale;
            vertex.end_width *= scale;
            if mirrored {
                vertex.bulge = -vertex.bulge;
            }
        }
    }
}

/// Center and radius of the arc spanned by a bulged segment
///
/// The center sits on the chord's perpendicular bisector, offset
/// `(c/2)(1 - b²)/(2b)` to the left of the chord.
pub fn bulge_center(from: Vector2, to: Vector2, bulge: f64) -> (Vector2, f64) {
    let chord = to - from;
    let c = chord.length();
    let radius = c * (1.0 + bulge * bulge) / (4.0 * bulge.abs());
    let left = Vector2::new(-chord.y, chord.x).normalize();
    let offset = (c / 2.0) * (1.0 - bulge * bulge) / (2.0 * bulge);
    ((from + to) * 0.5 + left * offset, radius)
}

/// Points along a bulged segment, `from` excluded and `to` included
///
/// Positive bulge sweeps counter-clockwise.
fn bulge_points(from: Vector2, to: Vector2, bulge: f64, segments: usize) -> Vec<Vector2> {
    let segments = segments.max(1);
    let (center, _) = bulge_center(from, to, bulge);
    let sweep = 4.0 * bulge.atan();
    let step = sweep / segments as f64;
    let mut points: Vec<Vector2> = (1..segments)
        .map(|i| from.rotate_about(center, step * i as f64))
        .collect();
    points.push(to);
    points
}

fn closest_on_segment(a: Vector2, b: Vector2, p: Vector2) -> Vector2 {
    let ab = b - a;
    let len2 = ab.dot(&ab);
    if len2 == 0.0 {
        return a;
    }
    let t = ((p - a).dot(&ab) / len2).clamp(0.0, 1.0);
    a + ab * t
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Polyline2d {
        Polyline2d::from_points(
            &[
                Vector2::new(0.0, 0.0),
                Vector2::new(1.0, 0.0),
                Vector2::new(1.0, 1.0),
                Vector2::new(0.0, 1.0),
            ],
            true,
        )
    }

    #[test]
    fn test_straight_closed_points() {
        let pts = square().get_points(8);
        assert_eq!(pts.len(), 5);
        assert_eq!(pts[4], Vector2::new(0.0, 0.0));
    }

    #[test]
    fn test_open_segment_count() {
        let mut pl = square();
        pl.closed = false;
        assert_eq!(pl.get_points(8).len(), 4);
    }

    #[test]
    fn test_semicircle_bulge() {
        // bulge 1 is a half circle, counter-clockwise from (0,0) to (2,0) dips below
        let pl = Polyline2d::new(
            vec![
                PolylineVertex2d::with_bulge(Vector2::new(0.0, 0.0), 1.0),
                PolylineVertex2d::new(Vector2::new(2.0, 0.0)),
            ],
            false,
        );
        let (center, radius) = bulge_center(Vector2::new(0.0, 0.0), Vector2::new(2.0, 0.0), 1.0);
        assert!(center.distance(&Vector2::new(1.0, 0.0)) < 1e-12);
        assert!((radius - 1.0).abs() < 1e-12);

        let pts = pl.get_points(4);
        assert_eq!(pts.len(), 5);
        assert!(pts[2].distance(&Vector2::new(1.0, -1.0)) < 1e-9);
        assert_eq!(pts[4], Vector2::new(2.0, 0.0));
    }

    #[test]
    fn test_negative_bulge_goes_clockwise() {
        let pl = Polyline2d::new(
            vec![
                PolylineVertex2d::with_bulge(Vector2::new(0.0, 0.0), -1.0),
                PolylineVertex2d::new(Vector2::new(2.0, 0.0)),
            ],
            false,
        );
        let pts = pl.get_points(4);
        assert!(pts[2].distance(&Vector2::new(1.0, 1.0)) < 1e-9);
    }

    #[test]
    fn test_bounding_box() {
        let bbox = square().bounding_box().unwrap();
        assert_eq!(bbox.min, Vector2::new(0.0, 0.0));
        assert_eq!(bbox.max, Vector2::new(1.0, 1.0));
        assert!(Polyline2d::default().bounding_box().is_none());
    }

    #[test]
    fn test_mirror_flips_bulge() {
        let mut pl = Polyline2d::new(vec![PolylineVertex2d::with_bulge(Vector2::UNIT_X, 0.5)], false);
        pl.transform(&Transform::from_mirror(crate::types::Vector3::UNIT_X), 0.0);
        assert_eq!(pl.vertices[0].bulge, -0.5);
        assert!(pl.vertices[0].point.distance(&Vector2::new(-1.0, 0.0)) < 1e-12);
    }

    #[test]
    fn test_nearest_point() {
        let p = square().nearest_point(Vector2::new(0.5, -3.0)).unwrap();
        assert!(p.distance(&Vector2::new(0.5, 0.0)) < 1e-12);
    }
}
