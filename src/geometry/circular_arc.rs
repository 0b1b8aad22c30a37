//! Circular arc in 3D, defined in the OCS of its normal

use super::{normalize_angle, sweep_angle};
use crate::types::{BoundingBox3D, Matrix3, Transform, Vector3};
use std::f64::consts::{PI, TAU};

/// Circle or circular arc
///
/// Angles are measured counter-clockwise about `normal` from the OCS X
/// axis given by the arbitrary axis algorithm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircularArc3d {
    pub center: Vector3,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub normal: Vector3,
}

impl CircularArc3d {
    pub fn new(center: Vector3, radius: f64, start_angle: f64, end_angle: f64, normal: Vector3) -> Self {
        Self {
            center,
            radius,
            start_angle,
            end_angle,
            normal: normal.normalize(),
        }
    }

    /// Full circle in the plane of `normal`
    pub fn circle(center: Vector3, radius: f64, normal: Vector3) -> Self {
        Self::new(center, radius, 0.0, TAU, normal)
    }

    fn ocs(&self) -> Matrix3 {
        Matrix3::arbitrary_axis(self.normal)
    }

    pub fn sweep(&self) -> f64 {
        sweep_angle(self.start_angle, self.end_angle)
    }

    pub fn is_closed(&self) -> bool {
        (self.sweep() - TAU).abs() < 1e-12
    }

    pub fn point_at_angle(&self, angle: f64) -> Vector3 {
        let ocs = self.ocs();
        let (sin, cos) = angle.sin_cos();
        self.center + ocs.x_axis() * (self.radius * cos) + ocs.y_axis() * (self.radius * sin)
    }

    pub fn start_point(&self) -> Vector3 {
        self.point_at_angle(self.start_angle)
    }

    pub fn end_point(&self) -> Vector3 {
        self.point_at_angle(self.start_angle + self.sweep())
    }

    pub fn mid_point(&self) -> Vector3 {
        self.point_at_angle(self.start_angle + self.sweep() / 2.0)
    }

    pub fn length(&self) -> f64 {
        self.radius * self.sweep()
    }

    /// True when `angle` lies on the arc's sweep
    pub fn contains_angle(&self, angle: f64) -> bool {
        normalize_angle(angle - self.start_angle) <= self.sweep() + 1e-12
    }

    /// `segments + 1` points from start to end
    pub fn get_points(&self, segments: usize) -> Vec<Vector3> {
        let segments = segments.max(1);
        let step = self.sweep() / segments as f64;
        (0..=segments)
            .map(|i| self.point_at_angle(self.start_angle + step * i as f64))
            .collect()
    }

    /// Exact extents: end points plus per-axis extrema that fall on the sweep
    pub fn bounding_box(&self) -> BoundingBox3D {
        let ocs = self.ocs();
        let (x, y) = (ocs.x_axis(), ocs.y_axis());
        let mut bbox = BoundingBox3D::from_point(self.start_point());
        bbox.expand_to_include(self.end_point());
        for (xi, yi) in [(x.x, y.x), (x.y, y.y), (x.z, y.z)] {
            if xi == 0.0 && yi == 0.0 {
                continue;
            }
            let extreme = yi.atan2(xi);
            for angle in [extreme, extreme + PI] {
                if self.contains_angle(angle) {
                    bbox.expand_to_include(self.point_at_angle(angle));
                }
            }
        }
        bbox
    }

    /// Angle of the projection of `point` onto the arc plane
    fn angle_of(&self, point: Vector3) -> Option<f64> {
        let ocs = self.ocs();
        let v = point - self.center;
        let (lx, ly) = (v.dot(&ocs.x_axis()), v.dot(&ocs.y_axis()));
        if lx == 0.0 && ly == 0.0 {
            None
        } else {
            Some(ly.atan2(lx))
        }
    }

    /// Closest point on the arc to `point`
    pub fn nearest_point(&self, point: Vector3) -> Vector3 {
        match self.angle_of(point) {
            Some(angle) if self.contains_angle(angle) => self.point_at_angle(angle),
            _ => {
                let (s, e) = (self.start_point(), self.end_point());
                if s.distance(&point) <= e.distance(&point) {
                    s
                } else {
                    e
                }
            }
        }
    }

    /// Foot of the perpendicular from `point` onto the underlying circle
    pub fn perpendicular_point(&self, point: Vector3) -> Vector3 {
        match self.angle_of(point) {
            Some(angle) => self.point_at_angle(angle),
            None => self.start_point(),
        }
    }

    pub fn transform(&mut self, transform: &Transform) {
        let ocs = self.ocs();
        let closed = self.is_closed();
        let start = transform.apply(self.start_point());
        let end = transform.apply(self.end_point());
        let x = transform.apply_rotation(ocs.x_axis());
        let y = transform.apply_rotation(ocs.y_axis());

        self.center = transform.apply(self.center);
        self.radius *= transform.scale_factor();
        self.normal = x.cross(&y).normalize();
        if closed {
            return;
        }
        let sweep = self.sweep();
        self.start_angle = self.angle_of(start).unwrap_or(0.0);
        self.end_angle = match self.angle_of(end) {
            Some(angle) => angle,
            None => self.start_angle + sweep,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vector3, b: Vector3) -> bool {
        a.is_equal_to(&b, 1e-9)
    }

    #[test]
    fn test_circle_extents() {
        let c = CircularArc3d::circle(Vector3::new(1.0, 1.0, 0.0), 2.0, Vector3::UNIT_Z);
        let bbox = c.bounding_box();
        assert!(approx(bbox.min, Vector3::new(-1.0, -1.0, 0.0)));
        assert!(approx(bbox.max, Vector3::new(3.0, 3.0, 0.0)));
    }

    #[test]
    fn test_half_arc_extents() {
        let arc = CircularArc3d::new(Vector3::ZERO, 1.0, 0.0, PI, Vector3::UNIT_Z);
        let bbox = arc.bounding_box();
        assert!(approx(bbox.min, Vector3::new(-1.0, 0.0, 0.0)));
        assert!(approx(bbox.max, Vector3::new(1.0, 1.0, 0.0)));
        assert!(approx(arc.mid_point(), Vector3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn test_nearest_point_clamps_to_ends() {
        let arc = CircularArc3d::new(Vector3::ZERO, 1.0, 0.0, PI / 2.0, Vector3::UNIT_Z);
        let p = arc.nearest_point(Vector3::new(0.0, -5.0, 0.0));
        assert!(approx(p, Vector3::new(1.0, 0.0, 0.0)));
        let q = arc.nearest_point(Vector3::new(3.0, 3.0, 0.0));
        let h = (0.5f64).sqrt();
        assert!(approx(q, Vector3::new(h, h, 0.0)));
    }

    #[test]
    fn test_get_points_count() {
        let c = CircularArc3d::circle(Vector3::ZERO, 1.0, Vector3::UNIT_Z);
        let pts = c.get_points(100);
        assert_eq!(pts.len(), 101);
        assert!(approx(pts[0], pts[100]));
    }

    #[test]
    fn test_transform_keeps_sweep() {
        let mut arc = CircularArc3d::new(Vector3::ZERO, 1.0, 0.0, PI / 2.0, Vector3::UNIT_Z);
        arc.transform(&Transform::from_rotation(Vector3::UNIT_Z, PI / 2.0));
        assert!(approx(arc.start_point(), Vector3::new(0.0, 1.0, 0.0)));
        assert!(approx(arc.end_point(), Vector3::new(-1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_transform_scales_radius() {
        let mut c = CircularArc3d::circle(Vector3::UNIT_X, 1.0, Vector3::UNIT_Z);
        c.transform(&Transform::from_scale(3.0));
        assert!((c.radius - 3.0).abs() < 1e-12);
        assert!(approx(c.center, Vector3::new(3.0, 0.0, 0.0)));
        assert!(c.is_closed());
    }
}
