//! Arc entity

use super::curve::{curve_osnap_points, Curve, OsnapMode};
use super::{impl_entity, EntityCommon, Extents, GripPointSource, Renderable, SnapPointSource, Transformable};
use crate::database::DrawingContext;
use crate::geometry::CircularArc3d;
use crate::properties::{float_property, EntityProperties, Property, PropertySource, PropertyType, PropertyValue};
use crate::render::{RenderedObject, Renderer};
use crate::types::{BoundingBox3D, Transform, Vector3};

/// A circular arc, counter-clockwise from start to end angle
#[derive(Debug, Clone)]
pub struct Arc {
    /// Common entity data
    pub common: EntityCommon,
    geometry: CircularArc3d,
    pub thickness: f64,
}

impl Arc {
    pub const TYPE_NAME: &'static str = "ARC";

    /// Unit quarter arc at the origin
    pub fn new() -> Self {
        Self::from_center_radius_angles(Vector3::ZERO, 1.0, 0.0, std::f64::consts::FRAC_PI_2)
    }

    /// Angles in radians
    pub fn from_center_radius_angles(center: Vector3, radius: f64, start_angle: f64, end_angle: f64) -> Self {
        Arc {
            common: EntityCommon::new(),
            geometry: CircularArc3d::new(center, radius, start_angle, end_angle, Vector3::UNIT_Z),
            thickness: 0.0,
        }
    }

    pub fn center(&self) -> Vector3 {
        self.geometry.center
    }

    pub fn set_center(&mut self, center: Vector3) {
        self.geometry.center = center;
    }

    pub fn radius(&self) -> f64 {
        self.geometry.radius
    }

    pub fn set_radius(&mut self, radius: f64) {
        self.geometry.radius = radius;
    }

    pub fn start_angle(&self) -> f64 {
        self.geometry.start_angle
    }

    pub fn set_start_angle(&mut self, angle: f64) {
        self.geometry.start_angle = angle;
    }

    pub fn end_angle(&self) -> f64 {
        self.geometry.end_angle
    }

    pub fn set_end_angle(&mut self, angle: f64) {
        self.geometry.end_angle = angle;
    }

    pub fn normal(&self) -> Vector3 {
        self.geometry.normal
    }

    /// Counter-clockwise sweep in radians
    pub fn total_angle(&self) -> f64 {
        self.geometry.sweep()
    }

    pub fn length(&self) -> f64 {
        self.geometry.length()
    }

    pub fn geometry(&self) -> &CircularArc3d {
        &self.geometry
    }
}

impl Default for Arc {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Arc);

impl Extents for Arc {
    fn geometric_extents(&self) -> BoundingBox3D {
        self.geometry.bounding_box()
    }
}

impl Renderable for Arc {
    fn world_draw(&self, renderer: &mut dyn Renderer, _ctx: &dyn DrawingContext, _delay: bool) -> Option<RenderedObject> {
        Some(renderer.circular_arc(&self.geometry))
    }
}

impl GripPointSource for Arc {
    fn grip_points(&self) -> Vec<Vector3> {
        vec![self.center(), self.start_point(), self.end_point()]
    }
}

impl SnapPointSource for Arc {
    fn osnap_points(&self, mode: OsnapMode, pick_point: Vector3, _last_point: Vector3, out: &mut Vec<Vector3>) {
        match mode {
            OsnapMode::Center => out.push(self.center()),
            _ => curve_osnap_points(self, mode, pick_point, out),
        }
    }
}

impl Transformable for Arc {
    fn apply_transform(&mut self, transform: &Transform) {
        self.geometry.transform(transform);
    }
}

impl Curve for Arc {
    fn is_closed(&self) -> bool {
        false
    }

    fn start_point(&self) -> Vector3 {
        self.geometry.start_point()
    }

    fn end_point(&self) -> Vector3 {
        self.geometry.end_point()
    }

    fn mid_point(&self) -> Vector3 {
        self.geometry.mid_point()
    }

    fn nearest_point(&self, point: Vector3) -> Vector3 {
        self.geometry.nearest_point(point)
    }

    fn perpendicular_point(&self, point: Vector3) -> Vector3 {
        self.geometry.perpendicular_point(point)
    }
}

impl PropertySource for Arc {
    fn properties(&self) -> EntityProperties<Self> {
        let mut props = EntityProperties::new(Self::TYPE_NAME);
        props
            .add("geometry", float_property!("centerX", Arc, |e| e.center().x, |e, v| e.geometry.center.x = v))
            .add("geometry", float_property!("centerY", Arc, |e| e.center().y, |e, v| e.geometry.center.y = v))
            .add("geometry", float_property!("centerZ", Arc, |e| e.center().z, |e, v| e.geometry.center.z = v))
            .add("geometry", float_property!("radius", Arc, |e| e.radius(), |e, v| e.set_radius(v)))
            .add("geometry", float_property!("startAngle", Arc, |e| e.start_angle(), |e, v| e.set_start_angle(v)))
            .add("geometry", float_property!("endAngle", Arc, |e| e.end_angle(), |e, v| e.set_end_angle(v)))
            .add(
                "geometry",
                Property::read_only("totalAngle", PropertyType::Float, |e: &Arc| PropertyValue::Float(e.total_angle())),
            )
            .add(
                "geometry",
                Property::read_only("length", PropertyType::Float, |e: &Arc| PropertyValue::Float(e.length())),
            );
        props
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_arc_grip_points() {
        let arc = Arc::from_center_radius_angles(Vector3::ZERO, 2.0, 0.0, FRAC_PI_2);
        let grips = arc.grip_points();
        assert_eq!(grips.len(), 3);
        assert_eq!(grips[0], Vector3::ZERO);
        assert!(grips[1].is_equal_to(&Vector3::new(2.0, 0.0, 0.0), 1e-12));
        assert!(grips[2].is_equal_to(&Vector3::new(0.0, 2.0, 0.0), 1e-12));
    }

    #[test]
    fn test_arc_wraps_through_zero() {
        let arc = Arc::from_center_radius_angles(Vector3::ZERO, 1.0, 1.5 * PI, 0.5 * PI);
        assert!((arc.total_angle() - PI).abs() < 1e-12);
        assert!(arc.mid_point().is_equal_to(&Vector3::UNIT_X, 1e-12));
        let bbox = arc.geometric_extents();
        assert!((bbox.max.x - 1.0).abs() < 1e-12);
        assert!(bbox.min.x.abs() < 1e-12);
    }

    #[test]
    fn test_arc_midpoint_snap() {
        let arc = Arc::from_center_radius_angles(Vector3::ZERO, 1.0, 0.0, PI);
        let mut out = Vec::new();
        arc.osnap_points(OsnapMode::MidPoint, Vector3::ZERO, Vector3::ZERO, &mut out);
        assert!(out[0].is_equal_to(&Vector3::UNIT_Y, 1e-12));
    }
}
