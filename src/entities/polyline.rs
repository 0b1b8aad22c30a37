//! Lightweight polyline entity
//!
//! Vertices live in the polyline's OCS at a single elevation. Bulges and
//! widths stay on the stored vertices; rendering samples the bulge arcs
//! afresh on every draw, so no tessellation cache needs invalidating.

use super::curve::{curve_osnap_points, nearest_on_polyline, polyline_mid_point, Curve, OsnapMode};
use super::{impl_entity, EntityCommon, Extents, GripPointSource, Renderable, SnapPointSource, Transformable};
use crate::database::DrawingContext;
use crate::error::{EntityError, Result};
use crate::geometry::{self, PolylineVertex2d};
use crate::properties::{float_property, EntityProperties, Property, PropertySource, PropertyType, PropertyValue};
use crate::render::{RenderedObject, Renderer};
use crate::types::{BoundingBox3D, Matrix3, Transform, Vector2, Vector3};

/// Lift an OCS point at `elevation` into WCS
pub(crate) fn ocs_to_wcs(point: Vector2, elevation: f64, normal: Vector3) -> Vector3 {
    let local = point.with_z(elevation);
    if normal == Vector3::UNIT_Z {
        return local;
    }
    Matrix3::arbitrary_axis(normal).transform_point(local)
}

/// Transform a planar vertex list together with its elevation and normal
///
/// Vertices are carried through WCS and re-expressed in the OCS of the
/// transformed normal. Bulges flip under mirroring.
pub(crate) fn transform_planar(
    polyline: &mut geometry::Polyline2d,
    elevation: &mut f64,
    normal: &mut Vector3,
    transform: &Transform,
) {
    let new_normal = transform.apply_rotation(*normal).normalize();
    if *normal == Vector3::UNIT_Z && new_normal.is_equal_to(&Vector3::UNIT_Z, 1e-12) {
        polyline.transform(transform, *elevation);
        *elevation = transform.apply(Vector3::new(0.0, 0.0, *elevation)).z;
        return;
    }

    let to_wcs = Matrix3::arbitrary_axis(*normal);
    let to_ocs = Matrix3::arbitrary_axis(new_normal).transpose();
    let mirrored = transform.determinant() < 0.0;
    let scale = transform.scale_factor();
    for vertex in &mut polyline.vertices {
        let wcs = transform.apply(to_wcs.transform_point(vertex.point.with_z(*elevation)));
        vertex.point = to_ocs.transform_point(wcs).to_vec2();
        vertex.start_width *= scale;
        vertex.end_width *= scale;
        if mirrored {
            vertex.bulge = -vertex.bulge;
        }
    }
    let origin = transform.apply(to_wcs.transform_point(Vector3::new(0.0, 0.0, *elevation)));
    *elevation = to_ocs.transform_point(origin).z;
    *normal = new_normal;
}

/// LWPOLYLINE: planar vertices with bulge and per-vertex width
#[derive(Debug, Clone)]
pub struct Polyline {
    pub common: EntityCommon,
    geometry: geometry::Polyline2d,
    /// Z of the polyline plane in OCS
    pub elevation: f64,
    pub thickness: f64,
    pub normal: Vector3,
    /// Width applied to every segment when non-zero
    pub constant_width: f64,
}

impl Polyline {
    pub const TYPE_NAME: &'static str = "LWPOLYLINE";

    pub fn new() -> Self {
        Polyline {
            common: EntityCommon::new(),
            geometry: geometry::Polyline2d::default(),
            elevation: 0.0,
            thickness: 0.0,
            normal: Vector3::UNIT_Z,
            constant_width: 0.0,
        }
    }

    /// Straight-edged polyline through `points`
    pub fn from_points(points: &[Vector2], closed: bool) -> Self {
        Polyline {
            geometry: geometry::Polyline2d::from_points(points, closed),
            ..Self::new()
        }
    }

    pub fn add_vertex(&mut self, vertex: PolylineVertex2d) {
        self.geometry.vertices.push(vertex);
    }

    pub fn add_point(&mut self, point: Vector2) {
        self.add_vertex(PolylineVertex2d::new(point));
    }

    pub fn vertices(&self) -> &[PolylineVertex2d] {
        &self.geometry.vertices
    }

    pub fn num_vertices(&self) -> usize {
        self.geometry.num_vertices()
    }

    pub fn vertex_at(&self, index: usize) -> Result<&PolylineVertex2d> {
        let len = self.num_vertices();
        self.geometry
            .vertices
            .get(index)
            .ok_or(EntityError::InvalidIndex { index, len })
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

    pub fn remove_vertex_at(&mut self, index: usize) -> Result<PolylineVertex2d> {
        let len = self.num_vertices();
        if index >= len {
            return Err(EntityError::InvalidIndex { index, len });
        }
        Ok(self.geometry.vertices.remove(index))
    }

    pub fn set_closed(&mut self, closed: bool) {
        self.geometry.closed = closed;
    }

    /// Vertex position in WCS
    pub fn point_at(&self, index: usize) -> Result<Vector3> {
        let vertex = self.vertex_at(index)?;
        Ok(ocs_to_wcs(vertex.point, self.elevation, self.normal))
    }

    pub fn geometry(&self) -> &geometry::Polyline2d {
        &self.geometry
    }

    /// Sampled outline in WCS, bulges expanded into arcs
    pub fn tessellate(&self) -> Vec<Vector3> {
        self.geometry
            .tessellate()
            .into_iter()
            .map(|p| ocs_to_wcs(p, self.elevation, self.normal))
            .collect()
    }

    /// Length of the sampled outline
    pub fn length(&self) -> f64 {
        self.tessellate().windows(2).map(|w| w[0].distance(&w[1])).sum()
    }
}

impl Default for Polyline {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Polyline);

impl Extents for Polyline {
    fn geometric_extents(&self) -> BoundingBox3D {
        BoundingBox3D::from_points(&self.tessellate()).unwrap_or_default()
    }
}

impl Renderable for Polyline {
    fn world_draw(&self, renderer: &mut dyn Renderer, _ctx: &dyn DrawingContext, _delay: bool) -> Option<RenderedObject> {
        Some(renderer.lines(&self.tessellate()))
    }
}

impl GripPointSource for Polyline {
    fn grip_points(&self) -> Vec<Vector3> {
        self.vertices()
            .iter()
            .map(|v| ocs_to_wcs(v.point, self.elevation, self.normal))
            .collect()
    }
}

impl SnapPointSource for Polyline {
    fn osnap_points(&self, mode: OsnapMode, pick_point: Vector3, _last_point: Vector3, out: &mut Vec<Vector3>) {
        curve_osnap_points(self, mode, pick_point, out);
    }
}

impl Transformable for Polyline {
    fn apply_transform(&mut self, transform: &Transform) {
        transform_planar(&mut self.geometry, &mut self.elevation, &mut self.normal, transform);
        self.constant_width *= transform.scale_factor();
    }
}

impl Curve for Polyline {
    fn is_closed(&self) -> bool {
        self.geometry.closed
    }

    fn start_point(&self) -> Vector3 {
        self.point_at(0).unwrap_or(Vector3::ZERO)
    }

    /// The first vertex again when closed
    fn end_point(&self) -> Vector3 {
        if self.is_closed() {
            return self.start_point();
        }
        self.num_vertices()
            .checked_sub(1)
            .and_then(|last| self.point_at(last).ok())
            .unwrap_or(Vector3::ZERO)
    }

    fn mid_point(&self) -> Vector3 {
        polyline_mid_point(&self.tessellate())
    }

    fn nearest_point(&self, point: Vector3) -> Vector3 {
        nearest_on_polyline(&self.tessellate(), point).unwrap_or(Vector3::ZERO)
    }
}

impl PropertySource for Polyline {
    fn properties(&self) -> EntityProperties<Self> {
        let mut props = EntityProperties::new(Self::TYPE_NAME);
        props
            .add(
                "geometry",
                Property::read_only("numberOfVertices", PropertyType::Int, |e: &Polyline| {
                    PropertyValue::Int(e.num_vertices() as i64)
                }),
            )
            .add("geometry", float_property!("elevation", Polyline, |e| e.elevation, |e, v| e.elevation = v))
            .add(
                "geometry",
                float_property!("constantWidth", Polyline, |e| e.constant_width, |e, v| e.constant_width = v),
            )
            .add("geometry", float_property!("thickness", Polyline, |e| e.thickness, |e, v| e.thickness = v))
            .add(
                "geometry",
                Property::read_only("length", PropertyType::Float, |e: &Polyline| PropertyValue::Float(e.length())),
            )
            .add(
                "geometry",
                Property::editable(
                    "closed",
                    PropertyType::Boolean,
                    |e: &Polyline| PropertyValue::Boolean(e.is_closed()),
                    |e: &mut Polyline, v| {
                        e.set_closed(v.into_bool("closed")?);
                        Ok(())
                    },
                ),
            );
        props
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn unit_square() -> Polyline {
        Polyline::from_points(
            &[
                Vector2::new(0.0, 0.0),
                Vector2::new(1.0, 0.0),
                Vector2::new(1.0, 1.0),
                Vector2::new(0.0, 1.0),
            ],
            true,
        )
    }

    #[test]
    fn test_closed_square_outline() {
        let square = unit_square();
        let points = square.tessellate();
        assert_eq!(points.len(), 5);
        assert_eq!(points[4], Vector3::ZERO);
        assert_eq!(square.length(), 4.0);
        assert_eq!(square.end_point(), square.start_point());
    }

    #[test]
    fn test_grips_are_vertices() {
        let mut square = unit_square();
        square.elevation = 2.0;
        let grips = square.grip_points();
        assert_eq!(grips.len(), 4);
        assert_eq!(grips[2], Vector3::new(1.0, 1.0, 2.0));
    }

    #[test]
    fn test_bulge_semicircle_extents() {
        let mut poly = Polyline::new();
        poly.add_vertex(PolylineVertex2d::with_bulge(Vector2::new(0.0, 0.0), 1.0));
        poly.add_point(Vector2::new(2.0, 0.0));
        let bbox = poly.geometric_extents();
        assert!((bbox.min.y + 1.0).abs() < 1e-9);
        assert!((poly.length() - PI).abs() < 1e-3);
    }

    #[test]
    fn test_vertex_index_errors() {
        let mut square = unit_square();
        assert_eq!(square.vertex_at(4).unwrap_err(), EntityError::InvalidIndex { index: 4, len: 4 });
        assert!(square.set_vertex_at(9, PolylineVertex2d::default()).is_err());
        assert!(square.remove_vertex_at(3).is_ok());
        assert_eq!(square.num_vertices(), 3);
    }

    #[test]
    fn test_mirror_flips_bulge() {
        let mut poly = Polyline::new();
        poly.add_vertex(PolylineVertex2d::with_bulge(Vector2::new(0.0, 0.0), 0.5));
        poly.add_point(Vector2::new(2.0, 0.0));
        poly.transform_by(&Transform::from_mirror(Vector3::UNIT_X));
        assert_eq!(poly.vertices()[0].bulge, -0.5);
        assert_eq!(poly.vertices()[1].point, Vector2::new(-2.0, 0.0));
    }

    #[test]
    fn test_translation_moves_elevation() {
        let mut square = unit_square();
        square.transform_by(&Transform::from_translation(Vector3::new(1.0, 0.0, 3.0)));
        assert_eq!(square.elevation, 3.0);
        assert_eq!(square.start_point(), Vector3::new(1.0, 0.0, 3.0));
    }

    #[test]
    fn test_closed_property_round_trip() {
        let mut square = unit_square();
        let props = square.properties();
        props.set(&mut square, "geometry", "closed", PropertyValue::Boolean(false)).unwrap();
        assert!(!square.is_closed());
        assert_eq!(props.get(&square, "geometry", "closed").unwrap(), PropertyValue::Boolean(false));
    }
}
