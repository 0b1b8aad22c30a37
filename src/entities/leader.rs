//! Leader entity
//!
//! The leader's drawn path is derived from its vertex list: a straight
//! chain, or a clamped cubic B-spline when splined. The derived curve is
//! cached in a [`Memoized`] slot keyed by a version counter that every
//! vertex mutation bumps, and rebuilt only when `draw` or
//! `geometric_extents` reads it while stale.

use super::curve::{curve_osnap_points, nearest_on_polyline, polyline_mid_point, Curve, OsnapMode};
use super::memoized::Memoized;
use super::{impl_entity, EntityCommon, Extents, GripPointSource, Renderable, SnapPointSource, Transformable};
use crate::database::DrawingContext;
use crate::error::{EntityError, Result};
use crate::geometry::{NurbsCurve, TESSELLATION_SAMPLES};
use crate::properties::{EntityProperties, Property, PropertySource, PropertyType, PropertyValue};
use crate::render::{RenderedObject, Renderer};
use crate::types::{BoundingBox3D, Transform, Vector3};
use std::cell::Ref;
use tracing::trace;

const SPLINE_DEGREE: usize = 3;

/// LEADER: annotation arrow path
#[derive(Debug, Clone)]
pub struct Leader {
    pub common: EntityCommon,
    vertices: Vec<Vector3>,
    splined: bool,
    pub has_arrow_head: bool,
    pub normal: Vector3,
    /// Bumped on every change that affects the derived path
    version: u64,
    path: Memoized<NurbsCurve>,
}

impl Leader {
    pub const TYPE_NAME: &'static str = "LEADER";

    pub fn new() -> Self {
        Leader {
            common: EntityCommon::new(),
            vertices: Vec::new(),
            splined: false,
            has_arrow_head: true,
            normal: Vector3::UNIT_Z,
            version: 0,
            path: Memoized::new(),
        }
    }

    pub fn from_vertices(vertices: Vec<Vector3>) -> Self {
        Leader {
            vertices,
            ..Self::new()
        }
    }

    fn touch(&mut self) {
        self.version += 1;
    }

    pub fn append_vertex(&mut self, point: Vector3) {
        self.vertices.push(point);
        self.touch();
    }

    pub fn vertices(&self) -> &[Vector3] {
        &self.vertices
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertex_at(&self, index: usize) -> Result<Vector3> {
        self.vertices.get(index).copied().ok_or(EntityError::InvalidIndex {
            index,
            len: self.vertices.len(),
        })
    }

    pub fn set_vertex_at(&mut self, index: usize, point: Vector3) -> Result<()> {
        let len = self.vertices.len();
        let slot = self
            .vertices
            .get_mut(index)
            .ok_or(EntityError::InvalidIndex { index, len })?;
        *slot = point;
        self.touch();
        Ok(())
    }

    pub fn remove_last_vertex(&mut self) -> Option<Vector3> {
        let removed = self.vertices.pop();
        if removed.is_some() {
            self.touch();
        }
        removed
    }

    pub fn is_splined(&self) -> bool {
        self.splined
    }

    pub fn set_splined(&mut self, splined: bool) {
        if self.splined != splined {
            self.splined = splined;
            self.touch();
        }
    }

    /// Derived path curve, rebuilt here if a vertex changed since the last
    /// read; `None` with fewer than two vertices
    pub fn path(&self) -> Option<Ref<'_, NurbsCurve>> {
        self.path.get(self.version, || {
            let degree = if self.splined { SPLINE_DEGREE } else { 1 };
            trace!(vertices = self.vertices.len(), degree, "rebuilding leader path");
            NurbsCurve::clamped(degree, self.vertices.clone()).ok()
        })
    }

    /// True when the cached path matches the current vertices
    pub fn is_path_current(&self) -> bool {
        self.path.is_current(self.version)
    }

    /// Number of path rebuilds performed so far
    pub fn rebuild_count(&self) -> usize {
        self.path.rebuild_count()
    }

    /// Points handed to the renderer
    pub fn render_points(&self) -> Vec<Vector3> {
        match self.path() {
            Some(curve) if self.splined => curve.get_points(TESSELLATION_SAMPLES),
            _ => self.vertices.clone(),
        }
    }
}

impl Default for Leader {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Leader);

impl Extents for Leader {
    fn geometric_extents(&self) -> BoundingBox3D {
        match self.path() {
            Some(curve) if self.splined => curve.bounding_box(TESSELLATION_SAMPLES),
            // a degree-1 path passes through its control points
            Some(curve) => BoundingBox3D::from_points(curve.control_points()).unwrap_or_default(),
            None => BoundingBox3D::from_points(&self.vertices).unwrap_or_default(),
        }
    }
}

impl Renderable for Leader {
    fn world_draw(&self, renderer: &mut dyn Renderer, _ctx: &dyn DrawingContext, _delay: bool) -> Option<RenderedObject> {
        Some(renderer.lines(&self.render_points()))
    }
}

impl GripPointSource for Leader {
    fn grip_points(&self) -> Vec<Vector3> {
        self.vertices.clone()
    }
}

impl SnapPointSource for Leader {
    fn osnap_points(&self, mode: OsnapMode, pick_point: Vector3, _last_point: Vector3, out: &mut Vec<Vector3>) {
        curve_osnap_points(self, mode, pick_point, out);
    }
}

impl Transformable for Leader {
    fn apply_transform(&mut self, transform: &Transform) {
        for vertex in &mut self.vertices {
            *vertex = transform.apply(*vertex);
        }
        self.normal = transform.apply_rotation(self.normal).normalize();
        self.touch();
    }
}

impl Curve for Leader {
    fn is_closed(&self) -> bool {
        false
    }

    fn start_point(&self) -> Vector3 {
        self.vertices.first().copied().unwrap_or(Vector3::ZERO)
    }

    fn end_point(&self) -> Vector3 {
        self.vertices.last().copied().unwrap_or(Vector3::ZERO)
    }

    fn mid_point(&self) -> Vector3 {
        polyline_mid_point(&self.render_points())
    }

    fn nearest_point(&self, point: Vector3) -> Vector3 {
        nearest_on_polyline(&self.render_points(), point).unwrap_or(Vector3::ZERO)
    }
}

impl PropertySource for Leader {
    fn properties(&self) -> EntityProperties<Self> {
        let mut props = EntityProperties::new(Self::TYPE_NAME);
        props
            .add(
                "geometry",
                Property::read_only("numberOfVertices", PropertyType::Int, |e: &Leader| {
                    PropertyValue::Int(e.num_vertices() as i64)
                }),
            )
            .add(
                "geometry",
                Property::editable(
                    "isSplined",
                    PropertyType::Boolean,
                    |e: &Leader| PropertyValue::Boolean(e.is_splined()),
                    |e: &mut Leader, v| {
                        e.set_splined(v.into_bool("isSplined")?);
                        Ok(())
                    },
                ),
            )
            .add(
                "geometry",
                Property::editable(
                    "hasArrowHead",
                    PropertyType::Boolean,
                    |e: &Leader| PropertyValue::Boolean(e.has_arrow_head),
                    |e: &mut Leader, v| {
                        e.has_arrow_head = v.into_bool("hasArrowHead")?;
                        Ok(())
                    },
                ),
            );
        props
    }
}
