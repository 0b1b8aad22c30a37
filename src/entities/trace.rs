//! Trace entity

use super::curve::{curve_osnap_points, nearest_on_polyline, polyline_mid_point, Curve, OsnapMode};
use super::{impl_entity, EntityCommon, Extents, GripPointSource, Renderable, SnapPointSource, Transformable};
use crate::database::DrawingContext;
use crate::error::{EntityError, Result};
use crate::geometry::{Area2d, Polyline2d};
use crate::properties::{float_property, EntityProperties, PropertySource};
use crate::render::{FillType, RenderedObject, Renderer};
use crate::types::{BoundingBox3D, Transform, Vector3};

/// Solid-filled quadrilateral
///
/// Corners follow the DXF order: the outline runs 0, 1, 3, 2.
#[derive(Debug, Clone)]
pub struct Trace {
    pub common: EntityCommon,
    pub corners: [Vector3; 4],
    pub thickness: f64,
    pub normal: Vector3,
}

impl Trace {
    pub const TYPE_NAME: &'static str = "TRACE";

    pub fn new() -> Self {
        Trace {
            common: EntityCommon::new(),
            corners: [Vector3::ZERO; 4],
            thickness: 0.0,
            normal: Vector3::UNIT_Z,
        }
    }

    pub fn from_corners(corners: [Vector3; 4]) -> Self {
        Trace {
            corners,
            ..Self::new()
        }
    }

    pub fn vertex_at(&self, index: usize) -> Result<Vector3> {
        self.corners
            .get(index)
            .copied()
            .ok_or(EntityError::InvalidIndex { index, len: 4 })
    }

    pub fn set_vertex_at(&mut self, index: usize, point: Vector3) -> Result<()> {
        let slot = self
            .corners
            .get_mut(index)
            .ok_or(EntityError::InvalidIndex { index, len: 4 })?;
        *slot = point;
        Ok(())
    }

    /// Closed outline in drawing order
    pub fn outline(&self) -> Vec<Vector3> {
        let [a, b, c, d] = self.corners;
        vec![a, b, d, c, a]
    }
}

impl Default for Trace {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Trace);

impl Extents for Trace {
    fn geometric_extents(&self) -> BoundingBox3D {
        BoundingBox3D::from_points(&self.corners).unwrap_or_default()
    }
}

impl Renderable for Trace {
    fn world_draw(&self, renderer: &mut dyn Renderer, _ctx: &dyn DrawingContext, _delay: bool) -> Option<RenderedObject> {
        let outline: Vec<_> = self.outline()[..4].iter().map(|p| p.to_vec2()).collect();
        let mut area = Area2d::new();
        area.add_loop(Polyline2d::from_points(&outline, true));
        Some(renderer.area(&area))
    }

    fn fill_type(&self) -> FillType {
        FillType {
            solid_fill: true,
            ..FillType::default()
        }
    }
}

impl GripPointSource for Trace {
    fn grip_points(&self) -> Vec<Vector3> {
        self.corners.to_vec()
    }
}

impl SnapPointSource for Trace {
    fn osnap_points(&self, mode: OsnapMode, pick_point: Vector3, _last_point: Vector3, out: &mut Vec<Vector3>) {
        curve_osnap_points(self, mode, pick_point, out);
    }
}

impl Transformable for Trace {
    fn apply_transform(&mut self, transform: &Transform) {
        for corner in &mut self.corners {
            *corner = transform.apply(*corner);
        }
        self.normal = transform.apply_rotation(self.normal).normalize();
    }
}

impl Curve for Trace {
    /// A trace is always a closed outline
    fn is_closed(&self) -> bool {
        true
    }

    fn start_point(&self) -> Vector3 {
        self.corners[0]
    }

    fn end_point(&self) -> Vector3 {
        self.corners[0]
    }

    fn mid_point(&self) -> Vector3 {
        polyline_mid_point(&self.outline())
    }

    fn nearest_point(&self, point: Vector3) -> Vector3 {
        nearest_on_polyline(&self.outline(), point).unwrap_or(self.corners[0])
    }
}

impl PropertySource for Trace {
    fn properties(&self) -> EntityProperties<Self> {
        let mut props = EntityProperties::new(Self::TYPE_NAME);
        props.add("geometry", float_property!("thickness", Trace, |e| e.thickness, |e, v| e.thickness = v));
        props
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;
    use crate::entities::Entity;
    use crate::render::{Primitive, RecordingRenderer};

    fn strip() -> Trace {
        Trace::from_corners([
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(4.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(4.0, 1.0, 0.0),
        ])
    }

    #[test]
    fn test_trace_is_closed_curve() {
        let trace = strip();
        assert!(trace.is_closed());
        assert_eq!(trace.outline()[2], Vector3::new(4.0, 1.0, 0.0));
        assert_eq!(trace.grip_points().len(), 4);
    }

    #[test]
    fn test_trace_draws_solid_area() {
        let db = Database::new();
        let trace = strip();
        let mut renderer = RecordingRenderer::new();
        let rendered = trace.draw(&mut renderer, &db, false).unwrap();
        assert!(rendered.traits.fill_type.solid_fill);
        match rendered.primitive {
            Primitive::Area(area) => {
                assert_eq!(area.loops.len(), 1);
                assert!(area.loops[0].closed);
                assert_eq!(area.loops[0].num_vertices(), 4);
            }
            other => panic!("unexpected primitive {:?}", other),
        }
    }

    #[test]
    fn test_trace_vertex_index() {
        let mut trace = strip();
        assert!(trace.set_vertex_at(4, Vector3::ZERO).is_err());
        trace.set_vertex_at(3, Vector3::new(5.0, 1.0, 0.0)).unwrap();
        assert_eq!(trace.geometric_extents().max, Vector3::new(5.0, 1.0, 0.0));
    }
}
