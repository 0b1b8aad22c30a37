//! Elliptical arc in 3D

use super::sweep_angle;
use crate::types::{BoundingBox3D, Transform, Vector3};
use std::f64::consts::{PI, TAU};

/// Ellipse or elliptical arc
///
/// `major_axis` is the vector from the center to the major axis end
/// point; its length is the major radius. Angles are parametric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipticalArc3d {
    pub center: Vector3,
    pub normal: Vector3,
    pub major_axis: Vector3,
    pub radius_ratio: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl EllipticalArc3d {
    pub fn new(
        center: Vector3,
        normal: Vector3,
        major_axis: Vector3,
        radius_ratio: f64,
        start_angle: f64,
        end_angle: f64,
    ) -> Self {
        Self {
            center,
            normal: normal.normalize(),
            major_axis,
            radius_ratio,
            start_angle,
            end_angle,
        }
    }

    pub fn major_radius(&self) -> f64 {
        self.major_axis.length()
    }

    pub fn minor_radius(&self) -> f64 {
        self.major_radius() * self.radius_ratio
    }

    pub fn minor_axis(&self) -> Vector3 {
        self.normal.cross(&self.major_axis).normalize() * self.minor_radius()
    }

    pub fn sweep(&self) -> f64 {
        sweep_angle(self.start_angle, self.end_angle)
    }

    pub fn is_closed(&self) -> bool {
        (self.sweep() - TAU).abs() < 1e-12
    }

    pub fn point_at(&self, param: f64) -> Vector3 {
        let (sin, cos) = param.sin_cos();
        self.center + self.major_axis * cos + self.minor_axis() * sin
    }

    pub fn start_point(&self) -> Vector3 {
        self.point_at(self.start_angle)
    }

    pub fn end_point(&self) -> Vector3 {
        self.point_at(self.start_angle + self.sweep())
    }

    pub fn mid_point(&self) -> Vector3 {
        self.point_at(self.start_angle + self.sweep() / 2.0)
    }

    fn contains_param(&self, param: f64) -> bool {
        super::normalize_angle(param - self.start_angle) <= self.sweep() + 1e-12
    }

    pub fn get_points(&self, segments: usize) -> Vec<Vector3> {
        let segments = segments.max(1);
        let step = self.sweep() / segments as f64;
        (0..=segments)
            .map(|i| self.point_at(self.start_angle + step * i as f64))
            .collect()
    }

    pub fn bounding_box(&self) -> BoundingBox3D {
        let (major, minor) = (self.major_axis, self.minor_axis());
        let mut bbox = BoundingBox3D::from_point(self.start_point());
        bbox.expand_to_include(self.end_point());
        for (a, b) in [(major.x, minor.x), (major.y, minor.y), (major.z, minor.z)] {
            if a == 0.0 && b == 0.0 {
                continue;
            }
            let extreme = b.atan2(a);
            for param in [extreme, extreme + PI] {
                if self.contains_param(param) {
                    bbox.expand_to_include(self.point_at(param));
                }
            }
        }
        bbox
    }

    /// Closest sampled point on the arc
    ///
    /// Sampling at a fixed resolution is accurate enough for snapping.
    pub fn nearest_point(&self, point: Vector3) -> Vector3 {
        let mut best = self.start_point();
        let mut best_distance = f64::MAX;
        for candidate in self.get_points(360) {
            let d = candidate.distance(&point);
            if d < best_distance {
                best_distance = d;
                best = candidate;
            }
        }
        best
    }

    pub fn perpendicular_point(&self, point: Vector3) -> Vector3 {
        self.nearest_point(point)
    }

    pub fn transform(&mut self, transform: &Transform) {
        let major = transform.apply_rotation(self.major_axis);
        let minor = transform.apply_rotation(self.minor_axis());
        self.center = transform.apply(self.center);
        self.normal = major.cross(&minor).normalize();
        self.major_axis = major;
        if major.length() > 0.0 {
            self.radius_ratio = minor.length() / major.length();
        }
    }
}
