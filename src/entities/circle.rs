//! Circle entity

use super::curve::{curve_osnap_points, Curve, OsnapMode};
use super::{impl_entity, EntityCommon, Extents, GripPointSource, Renderable, SnapPointSource, Transformable};
use crate::database::DrawingContext;
use crate::error::{EntityError, Result};
use crate::geometry::CircularArc3d;
use crate::properties::{float_property, EntityProperties, Property, PropertySource, PropertyType, PropertyValue};
use crate::render::{RenderedObject, Renderer};
use crate::types::{BoundingBox3D, Transform, Vector3};
use std::f64::consts::{FRAC_PI_2, PI};

/// A circle entity
#[derive(Debug, Clone)]
pub struct Circle {
    /// Common entity data
    pub common: EntityCommon,
    geometry: CircularArc3d,
    /// Thickness (extrusion along the normal)
    pub thickness: f64,
}

impl Circle {
    pub const TYPE_NAME: &'static str = "CIRCLE";

    /// Create a new circle at the origin with radius 1
    pub fn new() -> Self {
        Self::from_center_radius(Vector3::ZERO, 1.0)
    }

    /// Create a new circle with center and radius
    pub fn from_center_radius(center: Vector3, radius: f64) -> Self {
        Circle {
            common: EntityCommon::new(),
            geometry: CircularArc3d::circle(center, radius, Vector3::UNIT_Z),
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

    /// Set the radius; it must be positive
    pub fn set_radius(&mut self, radius: f64) -> Result<()> {
        if radius.is_nan() || radius <= 0.0 {
            return Err(EntityError::InvalidArgument(format!("circle radius must be positive, got {}", radius)));
        }
        self.geometry.radius = radius;
        Ok(())
    }

    pub fn normal(&self) -> Vector3 {
        self.geometry.normal
    }

    pub fn set_normal(&mut self, normal: Vector3) {
        self.geometry.normal = normal.normalize();
    }

    pub fn diameter(&self) -> f64 {
        self.radius() * 2.0
    }

    pub fn circumference(&self) -> f64 {
        2.0 * PI * self.radius()
    }

    pub fn area(&self) -> f64 {
        PI * self.radius() * self.radius()
    }

    /// The four quadrant points in OCS order 0, 90, 180 and 270 degrees
    pub fn quadrant_points(&self) -> [Vector3; 4] {
        [0.0, FRAC_PI_2, PI, 3.0 * FRAC_PI_2].map(|a| self.geometry.point_at_angle(a))
    }

    pub fn geometry(&self) -> &CircularArc3d {
        &self.geometry
    }
}

impl Default for Circle {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Circle);

impl Extents for Circle {
    fn geometric_extents(&self) -> BoundingBox3D {
        self.geometry.bounding_box()
    }
}

impl Renderable for Circle {
    fn world_draw(&self, renderer: &mut dyn Renderer, _ctx: &dyn DrawingContext, _delay: bool) -> Option<RenderedObject> {
        Some(renderer.circular_arc(&self.geometry))
    }
}

impl GripPointSource for Circle {
    fn grip_points(&self) -> Vec<Vector3> {
        vec![self.center()]
    }
}

impl SnapPointSource for Circle {
    fn osnap_points(&self, mode: OsnapMode, pick_point: Vector3, _last_point: Vector3, out: &mut Vec<Vector3>) {
        match mode {
            OsnapMode::Center => out.push(self.center()),
            OsnapMode::Quadrant => out.extend(self.quadrant_points()),
            _ => curve_osnap_points(self, mode, pick_point, out),
        }
    }
}

impl Transformable for Circle {
    fn apply_transform(&mut self, transform: &Transform) {
        self.geometry.transform(transform);
    }
}

impl Curve for Circle {
    fn is_closed(&self) -> bool {
        true
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

impl PropertySource for Circle {
    fn properties(&self) -> EntityProperties<Self> {
        let mut props = EntityProperties::new(Self::TYPE_NAME);
        props
            .add("geometry", float_property!("centerX", Circle, |e| e.center().x, |e, v| e.geometry.center.x = v))
            .add("geometry", float_property!("centerY", Circle, |e| e.center().y, |e, v| e.geometry.center.y = v))
            .add("geometry", float_property!("centerZ", Circle, |e| e.center().z, |e, v| e.geometry.center.z = v))
            .add(
                "geometry",
                Property::editable(
                    "radius",
                    PropertyType::Float,
                    |e: &Circle| PropertyValue::Float(e.radius()),
                    |e: &mut Circle, v| e.set_radius(v.into_float("radius")?),
                ),
            )
            .add(
                "geometry",
                Property::read_only("diameter", PropertyType::Float, |e: &Circle| PropertyValue::Float(e.diameter())),
            )
            .add(
                "geometry",
                Property::read_only("circumference", PropertyType::Float, |e: &Circle| {
                    PropertyValue::Float(e.circumference())
                }),
            )
            .add(
                "geometry",
                Property::read_only("area", PropertyType::Float, |e: &Circle| PropertyValue::Float(e.area())),
            );
        props
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_extents() {
        let circle = Circle::from_center_radius(Vector3::new(5.0, 5.0, 0.0), 2.0);
        let bbox = circle.geometric_extents();
        assert!(bbox.min.is_equal_to(&Vector3::new(3.0, 3.0, 0.0), 1e-9));
        assert!(bbox.max.is_equal_to(&Vector3::new(7.0, 7.0, 0.0), 1e-9));
    }

    #[test]
    fn test_circle_rejects_bad_radius() {
        let mut circle = Circle::new();
        assert!(circle.set_radius(0.0).is_err());
        assert!(circle.set_radius(-1.0).is_err());
        assert!(circle.set_radius(f64::NAN).is_err());
        assert_eq!(circle.radius(), 1.0);
    }

    #[test]
    fn test_circle_center_and_quadrant_snaps() {
        let circle = Circle::from_center_radius(Vector3::ZERO, 1.0);
        let mut out = Vec::new();
        circle.osnap_points(OsnapMode::Center, Vector3::UNIT_X, Vector3::ZERO, &mut out);
        assert_eq!(out, vec![Vector3::ZERO]);

        out.clear();
        circle.osnap_points(OsnapMode::Quadrant, Vector3::UNIT_X, Vector3::ZERO, &mut out);
        assert_eq!(out.len(), 4);
        assert!(out[1].is_equal_to(&Vector3::UNIT_Y, 1e-12));
    }

    #[test]
    fn test_circle_nearest_snap() {
        let circle = Circle::from_center_radius(Vector3::ZERO, 2.0);
        let mut out = Vec::new();
        circle.osnap_points(OsnapMode::Nearest, Vector3::new(0.0, 5.0, 0.0), Vector3::ZERO, &mut out);
        assert!(out[0].is_equal_to(&Vector3::new(0.0, 2.0, 0.0), 1e-12));
    }

    #[test]
    fn test_radius_property_goes_through_setter() {
        let mut circle = Circle::new();
        let props = circle.properties();
        assert!(props.set(&mut circle, "geometry", "radius", PropertyValue::Float(-3.0)).is_err());
        props.set(&mut circle, "geometry", "radius", PropertyValue::Float(3.0)).unwrap();
        assert_eq!(props.get(&circle, "geometry", "diameter").unwrap(), PropertyValue::Float(6.0));
    }
}
