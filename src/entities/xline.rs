//! Construction line entity

use super::curve::{curve_osnap_points, Curve, OsnapMode};
use super::{
    impl_entity, EntityCommon, Extents, GripPointSource, Renderable, SnapPointSource, Transformable,
    INFINITE_DRAW_LENGTH, INFINITE_EXTENTS_LENGTH,
};
use crate::database::DrawingContext;
use crate::properties::{float_property, EntityProperties, PropertySource};
use crate::render::{RenderedObject, Renderer};
use crate::types::{BoundingBox3D, Transform, Vector3};

/// Infinite line through a base point (XLINE)
#[derive(Debug, Clone)]
pub struct Xline {
    pub common: EntityCommon,
    pub base_point: Vector3,
    direction: Vector3,
}

impl Xline {
    pub const TYPE_NAME: &'static str = "XLINE";

    pub fn new() -> Self {
        Xline {
            common: EntityCommon::new(),
            base_point: Vector3::ZERO,
            direction: Vector3::UNIT_X,
        }
    }

    pub fn from_point_direction(base_point: Vector3, direction: Vector3) -> Self {
        let mut xline = Xline {
            base_point,
            ..Self::new()
        };
        xline.set_direction(direction);
        xline
    }

    pub fn direction(&self) -> Vector3 {
        self.direction
    }

    /// Zero-length directions are ignored
    pub fn set_direction(&mut self, direction: Vector3) {
        if direction.length() > 0.0 {
            self.direction = direction.normalize();
        }
    }

    pub fn point_at(&self, distance: f64) -> Vector3 {
        self.base_point + self.direction * distance
    }
}

impl Default for Xline {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Xline);

impl Extents for Xline {
    fn geometric_extents(&self) -> BoundingBox3D {
        let mut bbox = BoundingBox3D::from_point(self.point_at(-INFINITE_EXTENTS_LENGTH));
        bbox.expand_to_include(self.point_at(INFINITE_EXTENTS_LENGTH));
        bbox
    }
}

impl Renderable for Xline {
    fn world_draw(&self, renderer: &mut dyn Renderer, _ctx: &dyn DrawingContext, _delay: bool) -> Option<RenderedObject> {
        Some(renderer.lines(&[
            self.point_at(-INFINITE_DRAW_LENGTH),
            self.point_at(INFINITE_DRAW_LENGTH),
        ]))
    }
}

impl GripPointSource for Xline {
    fn grip_points(&self) -> Vec<Vector3> {
        vec![self.base_point]
    }
}

impl SnapPointSource for Xline {
    fn osnap_points(&self, mode: OsnapMode, pick_point: Vector3, _last_point: Vector3, out: &mut Vec<Vector3>) {
        curve_osnap_points(self, mode, pick_point, out);
    }
}

impl Transformable for Xline {
    fn apply_transform(&mut self, transform: &Transform) {
        self.base_point = transform.apply(self.base_point);
        let direction = transform.apply_rotation(self.direction);
        self.set_direction(direction);
    }
}

impl Curve for Xline {
    fn is_closed(&self) -> bool {
        false
    }

    fn start_point(&self) -> Vector3 {
        self.point_at(-INFINITE_DRAW_LENGTH)
    }

    fn end_point(&self) -> Vector3 {
        self.point_at(INFINITE_DRAW_LENGTH)
    }

    fn mid_point(&self) -> Vector3 {
        self.base_point
    }

    fn nearest_point(&self, point: Vector3) -> Vector3 {
        self.point_at((point - self.base_point).dot(&self.direction))
    }
}

impl PropertySource for Xline {
    fn properties(&self) -> EntityProperties<Self> {
        let mut props = EntityProperties::new(Self::TYPE_NAME);
        props
            .add("geometry", float_property!("basePointX", Xline, |e| e.base_point.x, |e, v| e.base_point.x = v))
            .add("geometry", float_property!("basePointY", Xline, |e| e.base_point.y, |e, v| e.base_point.y = v))
            .add("geometry", float_property!("basePointZ", Xline, |e| e.base_point.z, |e, v| e.base_point.z = v))
            .add(
                "geometry",
                float_property!("directionX", Xline, |e| e.direction.x, |e, v| {
                    e.set_direction(Vector3::new(v, e.direction.y, e.direction.z))
                }),
            )
            .add(
                "geometry",
                float_property!("directionY", Xline, |e| e.direction.y, |e, v| {
                    e.set_direction(Vector3::new(e.direction.x, v, e.direction.z))
                }),
            )
            .add(
                "geometry",
                float_property!("directionZ", Xline, |e| e.direction.z, |e, v| {
                    e.set_direction(Vector3::new(e.direction.x, e.direction.y, v))
                }),
            );
        props
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;
    use crate::entities::Entity;
    use crate::render::{Primitive, RecordingRenderer};

    #[test]
    fn test_symmetric_draw_and_short_extents() {
        let db = Database::new();
        let xline = Xline::from_point_direction(Vector3::ZERO, Vector3::new(0.0, 2.0, 0.0));
        let mut renderer = RecordingRenderer::new();
        match xline.draw(&mut renderer, &db, false).unwrap().primitive {
            Primitive::Lines(points) => {
                assert_eq!(points, vec![Vector3::new(0.0, -1e6, 0.0), Vector3::new(0.0, 1e6, 0.0)]);
            }
            other => panic!("unexpected primitive {:?}", other),
        }
        let bbox = xline.geometric_extents();
        assert_eq!(bbox.min, Vector3::new(0.0, -10.0, 0.0));
        assert_eq!(bbox.max, Vector3::new(0.0, 10.0, 0.0));
    }

    #[test]
    fn test_perpendicular_foot() {
        let xline = Xline::from_point_direction(Vector3::new(0.0, 1.0, 0.0), Vector3::UNIT_X);
        let mut out = Vec::new();
        xline.osnap_points(OsnapMode::Perpendicular, Vector3::new(-7.0, 5.0, 0.0), Vector3::ZERO, &mut out);
        assert_eq!(out, vec![Vector3::new(-7.0, 1.0, 0.0)]);
    }

    #[test]
    fn test_transform_rotates_direction() {
        let mut xline = Xline::new();
        xline.transform_by(&Transform::from_rotation(Vector3::UNIT_Z, std::f64::consts::FRAC_PI_2));
        assert!(xline.direction().is_equal_to(&Vector3::UNIT_Y, 1e-12));
    }
}
