//! 3D polyline entity

use super::curve::{curve_osnap_points, nearest_on_polyline, polyline_mid_point, Curve, OsnapMode};
use super::{impl_entity, EntityCommon, Extents, GripPointSource, Renderable, SnapPointSource, Transformable};
use crate::database::DrawingContext;
use crate::error::{EntityError, Result};
use crate::geometry::{NurbsCurve, TESSELLATION_SAMPLES};
use crate::properties::{EntityProperties, Property, PropertySource, PropertyType, PropertyValue};
use crate::render::{RenderedObject, Renderer};
use crate::types::{BoundingBox3D, Transform, Vector3};
use tracing::debug;

/// Smoothing applied to a 3D polyline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Polyline3dType {
    #[default]
    Simple,
    QuadraticBSpline,
    CubicBSpline,
}

impl Polyline3dType {
    pub const NAMES: &'static [&'static str] = &["Simple", "QuadraticBSpline", "CubicBSpline"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Polyline3dType::Simple => "Simple",
            Polyline3dType::QuadraticBSpline => "QuadraticBSpline",
            Polyline3dType::CubicBSpline => "CubicBSpline",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::NAMES
            .iter()
            .position(|n| *n == name)
            .map(|i| [Polyline3dType::Simple, Polyline3dType::QuadraticBSpline, Polyline3dType::CubicBSpline][i])
    }
}

/// POLYLINE with 3D vertices
#[derive(Debug, Clone)]
pub struct Polyline3d {
    pub common: EntityCommon,
    vertices: Vec<Vector3>,
    closed: bool,
    pub polyline_type: Polyline3dType,
}

impl Polyline3d {
    pub const TYPE_NAME: &'static str = "POLYLINE3D";

    pub fn new() -> Self {
        Polyline3d {
            common: EntityCommon::new(),
            vertices: Vec::new(),
            closed: false,
            polyline_type: Polyline3dType::Simple,
        }
    }

    pub fn from_points(points: Vec<Vector3>, closed: bool) -> Self {
        Polyline3d {
            vertices: points,
            closed,
            ..Self::new()
        }
    }

    pub fn add_vertex(&mut self, point: Vector3) {
        self.vertices.push(point);
    }

    pub fn vertices(&self) -> &[Vector3] {
        &self.vertices
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
        Ok(())
    }

    pub fn set_closed(&mut self, closed: bool) {
        self.closed = closed;
    }

    /// Vertex chain including the closing vertex when closed
    fn control_chain(&self) -> Vec<Vector3> {
        let mut chain = self.vertices.clone();
        if self.closed && chain.len() > 1 {
            chain.extend(self.vertices.first().copied());
        }
        chain
    }

    /// Points handed to the renderer
    pub fn tessellate(&self) -> Vec<Vector3> {
        let chain = self.control_chain();
        let degree = match self.polyline_type {
            Polyline3dType::Simple => return chain,
            Polyline3dType::QuadraticBSpline => 2,
            Polyline3dType::CubicBSpline => 3,
        };
        match NurbsCurve::clamped(degree, chain.clone()) {
            Ok(curve) => curve.get_points(TESSELLATION_SAMPLES),
            Err(err) => {
                debug!(error = %err, "3d polyline too short for spline fit");
                chain
            }
        }
    }

    pub fn length(&self) -> f64 {
        self.tessellate().windows(2).map(|w| w[0].distance(&w[1])).sum()
    }
}

impl Default for Polyline3d {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Polyline3d);

impl Extents for Polyline3d {
    fn geometric_extents(&self) -> BoundingBox3D {
        BoundingBox3D::from_points(&self.tessellate()).unwrap_or_default()
    }
}

impl Renderable for Polyline3d {
    fn world_draw(&self, renderer: &mut dyn Renderer, _ctx: &dyn DrawingContext, _delay: bool) -> Option<RenderedObject> {
        Some(renderer.lines(&self.tessellate()))
    }
}

impl GripPointSource for Polyline3d {
    fn grip_points(&self) -> Vec<Vector3> {
        self.vertices.clone()
    }
}

impl SnapPointSource for Polyline3d {
    fn osnap_points(&self, mode: OsnapMode, pick_point: Vector3, _last_point: Vector3, out: &mut Vec<Vector3>) {
        curve_osnap_points(self, mode, pick_point, out);
    }
}

impl Transformable for Polyline3d {
    fn apply_transform(&mut self, transform: &Transform) {
        for vertex in &mut self.vertices {
            *vertex = transform.apply(*vertex);
        }
    }
}

impl Curve for Polyline3d {
    fn is_closed(&self) -> bool {
        self.closed
    }

    fn start_point(&self) -> Vector3 {
        self.vertices.first().copied().unwrap_or(Vector3::ZERO)
    }

    fn end_point(&self) -> Vector3 {
        if self.closed {
            return self.start_point();
        }
        self.vertices.last().copied().unwrap_or(Vector3::ZERO)
    }

    fn mid_point(&self) -> Vector3 {
        polyline_mid_point(&self.tessellate())
    }

    fn nearest_point(&self, point: Vector3) -> Vector3 {
        nearest_on_polyline(&self.tessellate(), point).unwrap_or(Vector3::ZERO)
    }
}

impl PropertySource for Polyline3d {
    fn properties(&self) -> EntityProperties<Self> {
        let mut props = EntityProperties::new(Self::TYPE_NAME);
        props
            .add(
                "geometry",
                Property::read_only("numberOfVertices", PropertyType::Int, |e: &Polyline3d| {
                    PropertyValue::Int(e.vertices.len() as i64)
                }),
            )
            .add(
                "geometry",
                Property::editable(
                    "polylineType",
                    PropertyType::Enum,
                    |e: &Polyline3d| PropertyValue::Enum(e.polyline_type.as_str().to_string()),
                    |e: &mut Polyline3d, v| {
                        let name = v.into_enum("polylineType")?;
                        e.polyline_type = Polyline3dType::from_name(&name)
                            .ok_or_else(|| EntityError::InvalidArgument(format!("unknown 3d polyline type '{}'", name)))?;
                        Ok(())
                    },
                )
                .with_options(Polyline3dType::NAMES),
            )
            .add(
                "geometry",
                Property::read_only("length", PropertyType::Float, |e: &Polyline3d| PropertyValue::Float(e.length())),
            )
            .add(
                "geometry",
                Property::editable(
                    "closed",
                    PropertyType::Boolean,
                    |e: &Polyline3d| PropertyValue::Boolean(e.closed),
                    |e: &mut Polyline3d, v| {
                        e.set_closed(v.into_bool("closed")?);
                        Ok(())
                    },
                ),
            );
        props
    }
}
