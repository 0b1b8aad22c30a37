//! Ray entity

use super::curve::{curve_osnap_points, Curve, OsnapMode};
use super::{
    impl_entity, EntityCommon, Extents, GripPointSource, Renderable, SnapPointSource, Transformable,
    INFINITE_DRAW_LENGTH, INFINITE_EXTENTS_LENGTH,
};
use crate::database::DrawingContext;
use crate::properties::{float_property, EntityProperties, PropertySource};
use crate::render::{RenderedObject, Renderer};
use crate::types::{BoundingBox3D, Transform, Vector3};

/// Semi-infinite line from a base point
#[derive(Debug, Clone)]
pub struct Ray {
    pub common: EntityCommon,
    pub base_point: Vector3,
    /// Unit direction
    direction: Vector3,
}

impl Ray {
    pub const TYPE_NAME: &'static str = "RAY";

    pub fn new() -> Self {
        Ray {
            common: EntityCommon::new(),
            base_point: Vector3::ZERO,
            direction: Vector3::UNIT_X,
        }
    }

    /// Ray from `base_point` along `direction` (normalized)
    pub fn from_point_direction(base_point: Vector3, direction: Vector3) -> Self {
        let mut ray = Ray {
            base_point,
            ..Self::new()
        };
        ray.set_direction(direction);
        ray
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

    /// Point at `distance` along the ray
    pub fn point_at(&self, distance: f64) -> Vector3 {
        self.base_point + self.direction * distance
    }
}

impl Default for Ray {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Ray);

impl Extents for Ray {
    /// Practical box reaching a short way along the ray
    fn geometric_extents(&self) -> BoundingBox3D {
        let mut bbox = BoundingBox3D::from_point(self.base_point);
        bbox.expand_to_include(self.point_at(INFINITE_EXTENTS_LENGTH));
        bbox
    }
}

impl Renderable for Ray {
    fn world_draw(&self, renderer: &mut dyn Renderer, _ctx: &dyn DrawingContext, _delay: bool) -> Option<RenderedObject> {
        Some(renderer.lines(&[self.base_point, self.point_at(INFINITE_DRAW_LENGTH)]))
    }
}

impl GripPointSource for Ray {
    fn grip_points(&self) -> Vec<Vector3> {
        vec![self.base_point]
    }
}

impl SnapPointSource for Ray {
    fn osnap_points(&self, mode: OsnapMode, pick_point: Vector3, _last_point: Vector3, out: &mut Vec<Vector3>) {
        curve_osnap_points(self, mode, pick_point, out);
    }
}

impl Transformable for Ray {
    fn apply_transform(&mut self, transform: &Transform) {
        self.base_point = transform.apply(self.base_point);
        let direction = transform.apply_rotation(self.direction);
        self.set_direction(direction);
    }
}

impl Curve for Ray {
    fn is_closed(&self) -> bool {
        false
    }

    fn start_point(&self) -> Vector3 {
        self.base_point
    }

    /// Far end of the drawn segment
    fn end_point(&self) -> Vector3 {
        self.point_at(INFINITE_DRAW_LENGTH)
    }

    fn mid_point(&self) -> Vector3 {
        self.point_at(INFINITE_DRAW_LENGTH / 2.0)
    }

    fn nearest_point(&self, point: Vector3) -> Vector3 {
        let t = (point - self.base_point).dot(&self.direction).max(0.0);
        self.point_at(t)
    }
}

impl PropertySource for Ray {
    fn properties(&self) -> EntityProperties<Self> {
        let mut props = EntityProperties::new(Self::TYPE_NAME);
        props
            .add("geometry", float_property!("basePointX", Ray, |e| e.base_point.x, |e, v| e.base_point.x = v))
            .add("geometry", float_property!("basePointY", Ray, |e| e.base_point.y, |e, v| e.base_point.y = v))
            .add("geometry", float_property!("basePointZ", Ray, |e| e.base_point.z, |e, v| e.base_point.z = v))
            .add(
                "geometry",
                float_property!("directionX", Ray, |e| e.direction.x, |e, v| {
                    e.set_direction(Vector3::new(v, e.direction.y, e.direction.z))
                }),
            )
            .add(
                "geometry",
                float_property!("directionY", Ray, |e| e.direction.y, |e, v| {
                    e.set_direction(Vector3::new(e.direction.x, v, e.direction.z))
                }),
            )
            .add(
                "geometry",
                float_property!("directionZ", Ray, |e| e.direction.z, |e, v| {
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
    fn test_direction_is_normalized() {
        let ray = Ray::from_point_direction(Vector3::ZERO, Vector3::new(0.0, 3.0, 0.0));
        assert_eq!(ray.direction(), Vector3::UNIT_Y);
        let mut ray = ray;
        ray.set_direction(Vector3::ZERO);
        assert_eq!(ray.direction(), Vector3::UNIT_Y);
    }

    // Draw length and extents length differ on purpose; both are pinned here.
    #[test]
    fn test_draw_and_extents_lengths() {
        let db = Database::new();
        let ray = Ray::from_point_direction(Vector3::new(1.0, 0.0, 0.0), Vector3::UNIT_X);
        let mut renderer = RecordingRenderer::new();
        match ray.draw(&mut renderer, &db, false).unwrap().primitive {
            Primitive::Lines(points) => {
                assert_eq!(points, vec![Vector3::new(1.0, 0.0, 0.0), Vector3::new(1_000_001.0, 0.0, 0.0)]);
            }
            other => panic!("unexpected primitive {:?}", other),
        }
        let bbox = ray.geometric_extents();
        assert_eq!(bbox.min, Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(bbox.max, Vector3::new(11.0, 0.0, 0.0));
    }

    #[test]
    fn test_nearest_clamps_behind_base() {
        let ray = Ray::from_point_direction(Vector3::ZERO, Vector3::UNIT_X);
        assert_eq!(ray.nearest_point(Vector3::new(-5.0, 2.0, 0.0)), Vector3::ZERO);
        assert_eq!(ray.nearest_point(Vector3::new(5.0, 2.0, 0.0)), Vector3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_ray_is_open() {
        assert!(!Ray::new().is_closed());
    }
}
