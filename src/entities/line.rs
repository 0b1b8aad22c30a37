//! Line entity

use super::curve::{curve_osnap_points, nearest_on_segment, Curve, OsnapMode};
use super::{impl_entity, EntityCommon, Extents, GripPointSource, Renderable, SnapPointSource, Transformable};
use crate::database::DrawingContext;
use crate::properties::{float_property, EntityProperties, Property, PropertySource, PropertyType, PropertyValue};
use crate::render::{RenderedObject, Renderer};
use crate::types::{BoundingBox3D, Transform, Vector3};

/// A line entity defined by two endpoints
#[derive(Debug, Clone)]
pub struct Line {
    /// Common entity data
    pub common: EntityCommon,
    /// Start point of the line
    pub start: Vector3,
    /// End point of the line
    pub end: Vector3,
    /// Thickness (extrusion along the normal)
    pub thickness: f64,
    pub normal: Vector3,
}

impl Line {
    pub const TYPE_NAME: &'static str = "LINE";

    /// Create a new line from origin to origin
    pub fn new() -> Self {
        Line {
            common: EntityCommon::new(),
            start: Vector3::ZERO,
            end: Vector3::ZERO,
            thickness: 0.0,
            normal: Vector3::UNIT_Z,
        }
    }

    /// Create a new line between two points
    pub fn from_points(start: Vector3, end: Vector3) -> Self {
        Line {
            start,
            end,
            ..Self::new()
        }
    }

    /// Create a new line from coordinates
    pub fn from_coords(x1: f64, y1: f64, z1: f64, x2: f64, y2: f64, z2: f64) -> Self {
        Line::from_points(Vector3::new(x1, y1, z1), Vector3::new(x2, y2, z2))
    }

    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }

    /// Get the direction vector (normalized)
    pub fn direction(&self) -> Vector3 {
        (self.end - self.start).normalize()
    }

    pub fn midpoint(&self) -> Vector3 {
        self.start.midpoint(&self.end)
    }
}

impl Default for Line {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Line);

impl Extents for Line {
    fn geometric_extents(&self) -> BoundingBox3D {
        let mut bbox = BoundingBox3D::from_point(self.start);
        bbox.expand_to_include(self.end);
        bbox
    }
}

impl Renderable for Line {
    fn world_draw(&self, renderer: &mut dyn Renderer, _ctx: &dyn DrawingContext, _delay: bool) -> Option<RenderedObject> {
        Some(renderer.lines(&[self.start, self.end]))
    }
}

impl GripPointSource for Line {
    fn grip_points(&self) -> Vec<Vector3> {
        vec![self.midpoint(), self.start, self.end]
    }
}

impl SnapPointSource for Line {
    fn osnap_points(&self, mode: OsnapMode, pick_point: Vector3, _last_point: Vector3, out: &mut Vec<Vector3>) {
        curve_osnap_points(self, mode, pick_point, out);
    }
}

impl Transformable for Line {
    fn apply_transform(&mut self, transform: &Transform) {
        self.start = transform.apply(self.start);
        self.end = transform.apply(self.end);
        self.normal = transform.apply_rotation(self.normal).normalize();
    }
}

impl Curve for Line {
    fn is_closed(&self) -> bool {
        false
    }

    fn start_point(&self) -> Vector3 {
        self.start
    }

    fn end_point(&self) -> Vector3 {
        self.end
    }

    fn mid_point(&self) -> Vector3 {
        self.midpoint()
    }

    fn nearest_point(&self, point: Vector3) -> Vector3 {
        nearest_on_segment(self.start, self.end, point)
    }

    /// Foot on the infinite line through the segment
    fn perpendicular_point(&self, point: Vector3) -> Vector3 {
        let d = self.end - self.start;
        let len2 = d.length_squared();
        if len2 == 0.0 {
            return self.start;
        }
        self.start + d * ((point - self.start).dot(&d) / len2)
    }
}

impl PropertySource for Line {
    fn properties(&self) -> EntityProperties<Self> {
        let mut props = EntityProperties::new(Self::TYPE_NAME);
        props
            .add("geometry", float_property!("startX", Line, |e| e.start.x, |e, v| e.start.x = v))
            .add("geometry", float_property!("startY", Line, |e| e.start.y, |e, v| e.start.y = v))
            .add("geometry", float_property!("startZ", Line, |e| e.start.z, |e, v| e.start.z = v))
            .add("geometry", float_property!("endX", Line, |e| e.end.x, |e, v| e.end.x = v))
            .add("geometry", float_property!("endY", Line, |e| e.end.y, |e, v| e.end.y = v))
            .add("geometry", float_property!("endZ", Line, |e| e.end.z, |e, v| e.end.z = v))
            .add(
                "geometry",
                Property::read_only("length", PropertyType::Float, |e: &Line| PropertyValue::Float(e.length())),
            )
            .add("geometry", float_property!("thickness", Line, |e| e.thickness, |e, v| e.thickness = v));
        props
    }
}
