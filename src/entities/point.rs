//! Point entity

use super::curve::OsnapMode;
use super::{impl_entity, EntityCommon, Extents, GripPointSource, Renderable, SnapPointSource, Transformable};
use crate::database::DrawingContext;
use crate::properties::{float_property, EntityProperties, PropertySource};
use crate::render::{PointStyle, RenderedObject, Renderer};
use crate::types::{BoundingBox3D, Transform, Vector3};

/// Single location, displayed according to the drawing's PDMODE/PDSIZE
#[derive(Debug, Clone)]
pub struct Point {
    pub common: EntityCommon,
    pub position: Vector3,
    pub thickness: f64,
    pub normal: Vector3,
    /// Angle of the OCS X axis used for PDMODE glyphs, in radians
    pub x_axis_angle: f64,
}

impl Point {
    pub const TYPE_NAME: &'static str = "POINT";

    pub fn new() -> Self {
        Self::from_position(Vector3::ZERO)
    }

    pub fn from_position(position: Vector3) -> Self {
        Point {
            common: EntityCommon::new(),
            position,
            thickness: 0.0,
            normal: Vector3::UNIT_Z,
            x_axis_angle: 0.0,
        }
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Point);

impl Extents for Point {
    fn geometric_extents(&self) -> BoundingBox3D {
        BoundingBox3D::from_point(self.position)
    }
}

impl Renderable for Point {
    fn world_draw(&self, renderer: &mut dyn Renderer, ctx: &dyn DrawingContext, _delay: bool) -> Option<RenderedObject> {
        let defaults = ctx.defaults();
        let style = PointStyle {
            display_mode: defaults.point_display_mode,
            display_size: defaults.point_display_size,
        };
        Some(renderer.point(self.position, &style))
    }
}

impl GripPointSource for Point {
    fn grip_points(&self) -> Vec<Vector3> {
        vec![self.position]
    }
}

impl SnapPointSource for Point {
    fn osnap_points(&self, mode: OsnapMode, _pick_point: Vector3, _last_point: Vector3, out: &mut Vec<Vector3>) {
        if mode == OsnapMode::Node {
            out.push(self.position);
        }
    }
}

impl Transformable for Point {
    fn apply_transform(&mut self, transform: &Transform) {
        self.position = transform.apply(self.position);
        self.normal = transform.apply_rotation(self.normal).normalize();
    }
}

impl PropertySource for Point {
    fn properties(&self) -> EntityProperties<Self> {
        let mut props = EntityProperties::new(Self::TYPE_NAME);
        props
            .add("geometry", float_property!("positionX", Point, |e| e.position.x, |e, v| e.position.x = v))
            .add("geometry", float_property!("positionY", Point, |e| e.position.y, |e, v| e.position.y = v))
            .add("geometry", float_property!("positionZ", Point, |e| e.position.z, |e, v| e.position.z = v))
            .add("geometry", float_property!("thickness", Point, |e| e.thickness, |e, v| e.thickness = v));
        props
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;
    use crate::entities::Entity;
    use crate::render::Primitive;
    use crate::render::RecordingRenderer;

    #[test]
    fn test_point_uses_drawing_point_style() {
        let mut db = Database::new();
        db.defaults.point_display_mode = 35;
        db.defaults.point_display_size = 0.5;
        let point = Point::from_position(Vector3::new(1.0, 2.0, 3.0));
        let mut renderer = RecordingRenderer::new();
        match point.draw(&mut renderer, &db, false).unwrap().primitive {
            Primitive::Point { position, style } => {
                assert_eq!(position, Vector3::new(1.0, 2.0, 3.0));
                assert_eq!(style.display_mode, 35);
                assert_eq!(style.display_size, 0.5);
            }
            other => panic!("unexpected primitive {:?}", other),
        }
    }

    #[test]
    fn test_point_snaps_only_to_node() {
        let point = Point::from_position(Vector3::new(4.0, 0.0, 0.0));
        let mut out = Vec::new();
        point.osnap_points(OsnapMode::EndPoint, Vector3::ZERO, Vector3::ZERO, &mut out);
        assert!(out.is_empty());
        point.osnap_points(OsnapMode::Node, Vector3::ZERO, Vector3::ZERO, &mut out);
        assert_eq!(out, vec![Vector3::new(4.0, 0.0, 0.0)]);
    }

    #[test]
    fn test_point_extents_are_degenerate() {
        let point = Point::from_position(Vector3::new(1.0, 1.0, 1.0));
        assert!(point.geometric_extents().is_degenerate());
        assert_eq!(point.grip_points(), vec![Vector3::new(1.0, 1.0, 1.0)]);
    }
}
