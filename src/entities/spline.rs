//! Spline entity

use super::curve::{curve_osnap_points, polyline_mid_point, Curve, OsnapMode};
use super::{impl_entity, EntityCommon, Extents, GripPointSource, Renderable, SnapPointSource, Transformable};
use crate::database::DrawingContext;
use crate::error::{EntityError, Result};
use crate::geometry::{NurbsCurve, TESSELLATION_SAMPLES};
use crate::properties::{EntityProperties, Property, PropertySource, PropertyType, PropertyValue};
use crate::render::{RenderedObject, Renderer};
use crate::types::{BoundingBox3D, Transform, Vector3};

/// Degree used for splines built from fit points
const FIT_DEGREE: usize = 3;

/// A NURBS curve, defined either by control data or by fit points
///
/// Fit-point splines are approximated by a clamped cubic B-spline that uses
/// the fit points as its control polygon.
#[derive(Debug, Clone)]
pub struct Spline {
    pub common: EntityCommon,
    geometry: NurbsCurve,
    fit_points: Vec<Vector3>,
    pub normal: Vector3,
}

impl Spline {
    pub const TYPE_NAME: &'static str = "SPLINE";

    /// Straight unit spline along X
    pub fn new() -> Self {
        Spline {
            common: EntityCommon::new(),
            geometry: NurbsCurve::line(Vector3::ZERO, Vector3::UNIT_X),
            fit_points: Vec::new(),
            normal: Vector3::UNIT_Z,
        }
    }

    /// Spline from explicit control data
    ///
    /// Fails when the knot or weight counts do not match the control points.
    pub fn from_control_points(
        degree: usize,
        control_points: Vec<Vector3>,
        knots: Vec<f64>,
        weights: Option<Vec<f64>>,
    ) -> Result<Self> {
        let geometry = NurbsCurve::new(degree, knots, control_points, weights)?;
        Ok(Spline {
            geometry,
            ..Self::new()
        })
    }

    /// Spline through fit points; a closed spline repeats its first point
    pub fn from_fit_points(fit_points: Vec<Vector3>, closed: bool) -> Result<Self> {
        if fit_points.len() < 2 {
            return Err(EntityError::InvalidArgument(format!(
                "spline needs at least 2 fit points, got {}",
                fit_points.len()
            )));
        }
        let mut controls = fit_points.clone();
        if closed {
            controls.push(fit_points[0]);
        }
        let geometry = NurbsCurve::clamped(FIT_DEGREE, controls)?;
        Ok(Spline {
            geometry,
            fit_points,
            ..Self::new()
        })
    }

    pub fn degree(&self) -> usize {
        self.geometry.degree()
    }

    pub fn control_points(&self) -> &[Vector3] {
        self.geometry.control_points()
    }

    pub fn knots(&self) -> &[f64] {
        self.geometry.knots()
    }

    pub fn weights(&self) -> &[f64] {
        self.geometry.weights()
    }

    pub fn fit_points(&self) -> &[Vector3] {
        &self.fit_points
    }

    pub fn has_fit_points(&self) -> bool {
        !self.fit_points.is_empty()
    }

    pub fn geometry(&self) -> &NurbsCurve {
        &self.geometry
    }

    /// Sampled points handed to the renderer
    pub fn tessellate(&self) -> Vec<Vector3> {
        self.geometry.get_points(TESSELLATION_SAMPLES)
    }
}

impl Default for Spline {
    fn default() -> Self {
        Self::new()
    }
}

impl_entity!(Spline);

impl Extents for Spline {
    fn geometric_extents(&self) -> BoundingBox3D {
        self.geometry.bounding_box(TESSELLATION_SAMPLES)
    }
}

impl Renderable for Spline {
    fn world_draw(&self, renderer: &mut dyn Renderer, _ctx: &dyn DrawingContext, _delay: bool) -> Option<RenderedObject> {
        Some(renderer.lines(&self.tessellate()))
    }
}

impl GripPointSource for Spline {
    /// Fit points when present, otherwise the control polygon
    fn grip_points(&self) -> Vec<Vector3> {
        if self.has_fit_points() {
            self.fit_points.clone()
        } else {
            self.control_points().to_vec()
        }
    }
}

impl SnapPointSource for Spline {
    fn osnap_points(&self, mode: OsnapMode, pick_point: Vector3, _last_point: Vector3, out: &mut Vec<Vector3>) {
        curve_osnap_points(self, mode, pick_point, out);
    }
}

impl Transformable for Spline {
    fn apply_transform(&mut self, transform: &Transform) {
        self.geometry.transform(transform);
        for point in &mut self.fit_points {
            *point = transform.apply(*point);
        }
        self.normal = transform.apply_rotation(self.normal).normalize();
    }
}

impl Curve for Spline {
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
        polyline_mid_point(&self.tessellate())
    }

    fn nearest_point(&self, point: Vector3) -> Vector3 {
        self.geometry.nearest_point(point, TESSELLATION_SAMPLES)
    }
}

impl PropertySource for Spline {
    fn properties(&self) -> EntityProperties<Self> {
        let mut props = EntityProperties::new(Self::TYPE_NAME);
        props
            .add(
                "geometry",
                Property::read_only("degree", PropertyType::Int, |e: &Spline| {
                    PropertyValue::Int(e.degree() as i64)
                }),
            )
            .add(
                "geometry",
                Property::read_only("numberOfControlPoints", PropertyType::Int, |e: &Spline| {
                    PropertyValue::Int(e.control_points().len() as i64)
                }),
            )
            .add(
                "geometry",
                Property::read_only("numberOfFitPoints", PropertyType::Int, |e: &Spline| {
                    PropertyValue::Int(e.fit_points().len() as i64)
                }),
            )
            .add(
                "geometry",
                Property::read_only("closed", PropertyType::Boolean, |e: &Spline| {
                    PropertyValue::Boolean(e.is_closed())
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
    use crate::render::{PrimitiveKind, Primitive, RecordingRenderer};

    fn square_fit_points() -> Vec<Vector3> {
        vec![
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 2.0, 0.0),
            Vector3::new(3.0, 2.0, 0.0),
            Vector3::new(4.0, 0.0, 0.0),
        ]
    }

    #[test]
    fn test_from_control_points_rejects_bad_knots() {
        let err = Spline::from_control_points(3, square_fit_points(), vec![0.0, 1.0], None).unwrap_err();
        assert!(matches!(err, EntityError::InvalidArgument(_)));
    }

    #[test]
    fn test_from_fit_points_requires_two_points() {
        assert!(Spline::from_fit_points(vec![Vector3::ZERO], false).is_err());
    }

    #[test]
    fn test_fit_point_spline_interpolates_ends() {
        let spline = Spline::from_fit_points(square_fit_points(), false).unwrap();
        assert_eq!(spline.degree(), 3);
        assert!(spline.start_point().is_equal_to(&Vector3::ZERO, 1e-12));
        assert!(spline.end_point().is_equal_to(&Vector3::new(4.0, 0.0, 0.0), 1e-12));
        assert!(!spline.is_closed());
        assert_eq!(spline.grip_points(), square_fit_points());
    }

    #[test]
    fn test_closed_fit_point_spline() {
        let spline = Spline::from_fit_points(square_fit_points(), true).unwrap();
        assert!(spline.is_closed());
        assert_eq!(spline.control_points().len(), 5);
    }

    #[test]
    fn test_draw_uses_fixed_sampling() {
        let db = Database::new();
        let spline = Spline::from_fit_points(square_fit_points(), false).unwrap();
        let mut renderer = RecordingRenderer::new();
        let rendered = spline.draw(&mut renderer, &db, false).unwrap();
        assert_eq!(renderer.calls(), &[PrimitiveKind::Lines]);
        match rendered.primitive {
            Primitive::Lines(points) => assert_eq!(points.len(), TESSELLATION_SAMPLES + 1),
            other => panic!("unexpected primitive {:?}", other),
        }
    }

    #[test]
    fn test_transform_moves_fit_points() {
        let mut spline = Spline::from_fit_points(square_fit_points(), false).unwrap();
        spline.transform_by(&Transform::from_translation(Vector3::new(0.0, 0.0, 5.0)));
        assert!(spline.fit_points().iter().all(|p| p.z == 5.0));
        assert!(spline.control_points().iter().all(|p| p.z == 5.0));
    }
}
