//! Heavy 2D polyline entity

use super::curve::{curve_osnap_points, nearest_on_polyline, polyline_mid_point, Curve, OsnapMode};
use super::polyline::{ocs_to_wcs, transform_planar};
use super::{impl_entity, EntityCommon, Extents, GripPointSource, Renderable, SnapPointSource, Transformable};
use crate::database::DrawingContext;
use crate::error::{EntityError, Result};
use crate::geometry::{self, NurbsCurve, PolylineVertex2d, TESSELLATION_SAMPLES};
use crate::properties::{float_property, EntityProperties, Property, PropertySource, PropertyType, PropertyValue};
use crate::render::{RenderedObject, Renderer};
use crate::types::{BoundingBox3D, Transform, Vector2, Vector3};
use tracing::debug;

/// Curve-fit applied to the vertex list (DXF group 75)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolylineCurveType {
    /// Straight and bulged segments as stored
    #[default]
    None,
    QuadraticBSpline,
    CubicBSpline,
}

impl PolylineCurveType {
    pub const NAMES: &'static [&'static str] = &["None", "QuadraticBSpline", "CubicBSpline"];

    pub fn as_str(&self) -> &'static str {
        match self {
            PolylineCurveType::None => "None",
            PolylineCurveType::QuadraticBSpline => "QuadraticBSpline",
            PolylineCurveType::CubicBSpline => "CubicBSpline",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "None" => Some(PolylineCurveType::None),
            "QuadraticBSpline" => Some(PolylineCurveType::QuadraticBSpline),
            "CubicBSpline" => Some(PolylineCurveType::CubicBSpline),
            _ => None,
        }
    }

    /// Spline degree used for smoothing, if any
    pub fn degree(&self) -> Option<usize> {
        match self {
            PolylineCurveType::None => None,
            PolylineCurveType::QuadraticBSpline => Some(2),
            PolylineCurveType::CubicBSpline => Some(3),
        }
    }
}

/// POLYLINE with 2D vertices at an elevation
#[derive(Debug, Clone)]
pub struct Polyline2d {
    pub common: EntityCommon,
    geometry: geometry::Polyline2d,
    pub elevation: f64,
    pub thickness: f64,
    pub normal: Vector3,
    pub curve_type: PolylineCurveType,
}

impl Polyline2d {
    pub const TYPE_NAME: &'static str = "POLYLINE2D";

    pub fn new() -> Self {
        Polyline2d {
            common: EntityCommon::new(),
            geometry: geometry::Polyline2d::default(),
            elevation: 0.0,
            thickness: 0.0,
            normal: Vector3::UNIT_Z,
            curve_type: PolylineCurveType::None,
        }
    }

    pub fn from_points(points: &[Vector2], closed: bool) -> Self {
        Polyline2d {
            geometry: geometry::Polyline2d::from_points(points, closed),
            ..Self::new()
        }
    }

    pub fn add_vertex(&mut self, vertex: PolylineVertex2d) {
        self.geometry.vertices.push(vertex);
    }

    pub fn vertices(&self) -> &[PolylineVertex2d] {
        &self.geometry.vertices
    }

    pub fn num_vertices(&self) -> usize {
        self.geometry.num_vertices()
    }

    pub fn set_vertex_at(&mut self, index: usize, vertex: PolylineVertex2d) -> Result<()> {
        let len = self.num_vertices();
        let slot = self
            .geometry
            .vertices
            .get_mut(index)
            .ok_or(EntityError::InvalidIndex { index, len })?;
        *slot = vertex;
        Ok(())
    }

    pub fn set_closed(&mut self, closed: bool) {
        self.geometry.closed = closed;
    }

    pub fn geometry(&self) -> &geometry::Polyline2d {
        &self.geometry
    }

    fn smoothed(&self, degree: usize) -> Option<NurbsCurve> {
        let mut controls = self.grip_points();
        if self.geometry.closed {
            controls.extend(controls.first().copied());
        }
        match NurbsCurve::clamped(degree, controls) {
            Ok(curve) => Some(curve),
            Err(err) => {
                debug!(error = %err, "polyline too short for curve fit, drawing vertices");
                None
            }
        }
    }

    /// Sampled outline in WCS
    ///
    /// With a curve-fit type the vertices act as the control polygon of a
    /// clamped B-spline; otherwise bulges are expanded into arcs.
    pub fn tessellate(&self) -> Vec<Vector3> {
        if let Some(curve) = self.curve_type.degree().and_then(|d| self.smoothed(d)) {
            return curve.get_points(TESSELLATION_SAMPLES);
        }
        self.geometry
            .tessellate()
            .into_iter()
            .map(|p| ocs_to_wcs(p, self.elevation, self.normal))
            .collect()
    }
}

impl Default for Polyline2d {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Polyline2d);

impl Extents for Polyline2d {
    fn geometric_extents(&self) -> BoundingBox3D {
        BoundingBox3D::from_points(&self.tessellate()).unwrap_or_default()
    }
}

impl Renderable for Polyline2d {
    fn world_draw(&self, renderer: &mut dyn Renderer, _ctx: &dyn DrawingContext, _delay: bool) -> Option<RenderedObject> {
        Some(renderer.lines(&self.tessellate()))
    }
}

impl GripPointSource for Polyline2d {
    fn grip_points(&self) -> Vec<Vector3> {
        self.vertices()
            .iter()
            .map(|v| ocs_to_wcs(v.point, self.elevation, self.normal))
            .collect()
    }
}

impl SnapPointSource for Polyline2d {
    fn osnap_points(&self, mode: OsnapMode, pick_point: Vector3, _last_point: Vector3, out: &mut Vec<Vector3>) {
        curve_osnap_points(self, mode, pick_point, out);
    }
}

impl Transformable for Polyline2d {
    fn apply_transform(&mut self, transform: &Transform) {
        transform_planar(&mut self.geometry, &mut self.elevation, &mut self.normal, transform);
    }
}

impl Curve for Polyline2d {
    fn is_closed(&self) -> bool {
        self.geometry.closed
    }

    fn start_point(&self) -> Vector3 {
        self.tessellate().first().copied().unwrap_or(Vector3::ZERO)
    }

    fn end_point(&self) -> Vector3 {
        self.tessellate().last().copied().unwrap_or(Vector3::ZERO)
    }

    fn mid_point(&self) -> Vector3 {
        polyline_mid_point(&self.tessellate())
    }

    fn nearest_point(&self, point: Vector3) -> Vector3 {
        nearest_on_polyline(&self.tessellate(), point).unwrap_or(Vector3::ZERO)
    }
}

impl PropertySource for Polyline2d {
    fn properties(&self) -> EntityProperties<Self> {
        let mut props = EntityProperties::new(Self::TYPE_NAME);
        props
            .add(
                "geometry",
                Property::read_only("numberOfVertices", PropertyType::Int, |e: &Polyline2d| {
                    PropertyValue::Int(e.num_vertices() as i64)
                }),
            )
            .add("geometry", float_property!("elevation", Polyline2d, |e| e.elevation, |e, v| e.elevation = v))
            .add("geometry", float_property!("thickness", Polyline2d, |e| e.thickness, |e, v| e.thickness = v))
            .add(
                "geometry",
                Property::editable(
                    "curveType",
                    PropertyType::Enum,
                    |e: &Polyline2d| PropertyValue::Enum(e.curve_type.as_str().to_string()),
                    |e: &mut Polyline2d, v| {
                        let name = v.into_enum("curveType")?;
                        e.curve_type = PolylineCurveType::from_name(&name)
                            .ok_or_else(|| EntityError::InvalidArgument(format!("unknown curve type '{}'", name)))?;
                        Ok(())
                    },
                )
                .with_options(PolylineCurveType::NAMES),
            )
            .add(
                "geometry",
                Property::editable(
                    "closed",
                    PropertyType::Boolean,
                    |e: &Polyline2d| PropertyValue::Boolean(e.is_closed()),
                    |e: &mut Polyline2d, v| {
                        e.set_closed(v.into_bool("closed")?);
                        Ok(())
                    },
                ),
            );
        props
    }
}
