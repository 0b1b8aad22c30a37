//! Ellipse entity

use super::curve::{curve_osnap_points, Curve, OsnapMode};
use super::{impl_entity, EntityCommon, Extents, GripPointSource, Renderable, SnapPointSource, Transformable};
use crate::database::DrawingContext;
use crate::error::{EntityError, Result};
use crate::geometry::EllipticalArc3d;
use crate::properties::{float_property, EntityProperties, Property, PropertySource, PropertyType, PropertyValue};
use crate::render::{RenderedObject, Renderer};
use crate::types::{BoundingBox3D, Transform, Vector3};
use std::f64::consts::TAU;

/// An ellipse or elliptical arc
#[derive(Debug, Clone)]
pub struct Ellipse {
    /// Common entity data
    pub common: EntityCommon,
    geometry: EllipticalArc3d,
}

impl Ellipse {
    pub const TYPE_NAME: &'static str = "ELLIPSE";

    /// Full ellipse with a unit major axis along X and ratio 0.5
    pub fn new() -> Self {
        Ellipse {
            common: EntityCommon::new(),
            geometry: EllipticalArc3d::new(Vector3::ZERO, Vector3::UNIT_Z, Vector3::UNIT_X, 0.5, 0.0, TAU),
        }
    }

    /// Full ellipse; `major_axis` runs from the center to the major end point
    pub fn from_center_axes(center: Vector3, major_axis: Vector3, minor_axis_ratio: f64) -> Result<Self> {
        let mut ellipse = Ellipse::new();
        ellipse.geometry.center = center;
        ellipse.set_major_axis(major_axis)?;
        ellipse.set_radius_ratio(minor_axis_ratio)?;
        Ok(ellipse)
    }

    pub fn center(&self) -> Vector3 {
        self.geometry.center
    }

    pub fn set_center(&mut self, center: Vector3) {
        self.geometry.center = center;
    }

    pub fn major_axis(&self) -> Vector3 {
        self.geometry.major_axis
    }

    pub fn set_major_axis(&mut self, major_axis: Vector3) -> Result<()> {
        if major_axis.length() == 0.0 {
            return Err(EntityError::InvalidArgument("ellipse major axis must be non-zero".into()));
        }
        self.geometry.major_axis = major_axis;
        Ok(())
    }

    pub fn radius_ratio(&self) -> f64 {
        self.geometry.radius_ratio
    }

    /// Minor to major ratio, in `(0, 1]`
    pub fn set_radius_ratio(&mut self, ratio: f64) -> Result<()> {
        if !(ratio > 0.0 && ratio <= 1.0) {
            return Err(EntityError::InvalidArgument(format!("ellipse radius ratio must be in (0, 1], got {}", ratio)));
        }
        self.geometry.radius_ratio = ratio;
        Ok(())
    }

    pub fn major_radius(&self) -> f64 {
        self.geometry.major_radius()
    }

    pub fn minor_radius(&self) -> f64 {
        self.geometry.minor_radius()
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

    pub fn geometry(&self) -> &EllipticalArc3d {
        &self.geometry
    }
}

impl Default for Ellipse {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Ellipse);

impl Extents for Ellipse {
    fn geometric_extents(&self) -> BoundingBox3D {
        self.geometry.bounding_box()
    }
}

impl Renderable for Ellipse {
    fn world_draw(&self, renderer: &mut dyn Renderer, _ctx: &dyn DrawingContext, _delay: bool) -> Option<RenderedObject> {
        Some(renderer.elliptical_arc(&self.geometry))
    }
}

impl GripPointSource for Ellipse {
    fn grip_points(&self) -> Vec<Vector3> {
        vec![self.center()]
    }
}

impl SnapPointSource for Ellipse {
    fn osnap_points(&self, mode: OsnapMode, pick_point: Vector3, _last_point: Vector3, out: &mut Vec<Vector3>) {
        match mode {
            OsnapMode::Center => out.push(self.center()),
            _ => curve_osnap_points(self, mode, pick_point, out),
        }
    }
}

impl Transformable for Ellipse {
    fn apply_transform(&mut self, transform: &Transform) {
        self.geometry.transform(transform);
    }
}

impl Curve for Ellipse {
    fn is_closed(&self) -> bool {
        self.geometry.is_closed()
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

impl PropertySource for Ellipse {
    fn properties(&self) -> EntityProperties<Self> {
        let mut props = EntityProperties::new(Self::TYPE_NAME);
        props
            .add("geometry", float_property!("centerX", Ellipse, |e| e.center().x, |e, v| e.geometry.center.x = v))
            .add("geometry", float_property!("centerY", Ellipse, |e| e.center().y, |e, v| e.geometry.center.y = v))
            .add("geometry", float_property!("centerZ", Ellipse, |e| e.center().z, |e, v| e.geometry.center.z = v))
            .add(
                "geometry",
                Property::read_only("majorRadius", PropertyType::Float, |e: &Ellipse| {
                    PropertyValue::Float(e.major_radius())
                }),
            )
            .add(
                "geometry",
                Property::read_only("minorRadius", PropertyType::Float, |e: &Ellipse| {
                    PropertyValue::Float(e.minor_radius())
                }),
            )
            .add(
                "geometry",
                Property::editable(
                    "radiusRatio",
                    PropertyType::Float,
                    |e: &Ellipse| PropertyValue::Float(e.radius_ratio()),
                    |e: &mut Ellipse, v| e.set_radius_ratio(v.into_float("radiusRatio")?),
                ),
            )
            .add("geometry", float_property!("startAngle", Ellipse, |e| e.start_angle(), |e, v| e.set_start_angle(v)))
            .add("geometry", float_property!("endAngle", Ellipse, |e| e.end_angle(), |e, v| e.set_end_angle(v)));
        props
    }
}
