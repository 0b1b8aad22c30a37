//! Rational B-spline curve

use crate::error::{EntityError, Result};
use crate::types::{BoundingBox3D, Transform, Vector3};

/// NURBS curve evaluated with de Boor's algorithm
#[derive(Debug, Clone, PartialEq)]
pub struct NurbsCurve {
    degree: usize,
    knots: Vec<f64>,
    control_points: Vec<Vector3>,
    weights: Vec<f64>,
}

impl NurbsCurve {
    /// Build from explicit data
    ///
    /// The knot vector must hold `control_points + degree + 1` values and
    /// `weights`, when given, one value per control point.
    pub fn new(
        degree: usize,
        knots: Vec<f64>,
        control_points: Vec<Vector3>,
        weights: Option<Vec<f64>>,
    ) -> Result<Self> {
        if degree == 0 {
            return Err(EntityError::InvalidArgument("spline degree must be at least 1".into()));
        }
        if control_points.len() <= degree {
            return Err(EntityError::InvalidArgument(format!(
                "degree {} spline needs at least {} control points, got {}",
                degree,
                degree + 1,
                control_points.len()
            )));
        }
        let expected = control_points.len() + degree + 1;
        if knots.len() != expected {
            return Err(EntityError::InvalidArgument(format!(
                "expected {} knots, got {}",
                expected,
                knots.len()
            )));
        }
        if knots.windows(2).any(|w| w[1] < w[0]) {
            return Err(EntityError::InvalidArgument("knot vector must be non-decreasing".into()));
        }
        let weights = match weights {
            Some(w) if w.len() != control_points.len() => {
                return Err(EntityError::InvalidArgument(format!(
                    "expected {} weights, got {}",
                    control_points.len(),
                    w.len()
                )))
            }
            Some(w) => w,
            None => vec![1.0; control_points.len()],
        };
        Ok(Self {
            degree,
            knots,
            control_points,
            weights,
        })
    }

    /// Clamped uniform B-spline over `control_points`
    ///
    /// The degree is lowered when there are too few points for it.
    pub fn clamped(degree: usize, control_points: Vec<Vector3>) -> Result<Self> {
        if control_points.len() < 2 {
            return Err(EntityError::InvalidArgument(format!(
                "spline needs at least 2 points, got {}",
                control_points.len()
            )));
        }
        let degree = degree.clamp(1, control_points.len() - 1);
        let n = control_points.len();
        let interior = n - degree - 1;
        let mut knots = vec![0.0; degree + 1];
        knots.extend((1..=interior).map(|i| i as f64 / (interior + 1) as f64));
        knots.extend(std::iter::repeat(1.0).take(degree + 1));
        Self::new(degree, knots, control_points, None)
    }

    /// Degree-1 curve from `start` to `end`
    pub fn line(start: Vector3, end: Vector3) -> Self {
        Self {
            degree: 1,
            knots: vec![0.0, 0.0, 1.0, 1.0],
            control_points: vec![start, end],
            weights: vec![1.0, 1.0],
        }
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn knots(&self) -> &[f64] {
        &self.knots
    }

    pub fn control_points(&self) -> &[Vector3] {
        &self.control_points
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Valid parameter range
    pub fn domain(&self) -> (f64, f64) {
        let n = self.control_points.len();
        (self.knots[self.degree], self.knots[n])
    }

    fn find_span(&self, u: f64) -> usize {
        let n = self.control_points.len() - 1;
        if u >= self.knots[n + 1] {
            return n;
        }
        let mut span = self.degree;
        while span < n && u >= self.knots[span + 1] {
            span += 1;
        }
        span
    }

    pub fn point_at(&self, u: f64) -> Vector3 {
        let (lo, hi) = self.domain();
        let u = u.clamp(lo, hi);
        let p = self.degree;
        let k = self.find_span(u);

        // homogeneous coordinates (wx, wy, wz, w)
        let mut d: Vec<[f64; 4]> = (0..=p)
            .map(|j| {
                let pt = self.control_points[j + k - p];
                let w = self.weights[j + k - p];
                [pt.x * w, pt.y * w, pt.z * w, w]
            })
            .collect();

        for r in 1..=p {
            for j in (r..=p).rev() {
                let left = self.knots[j + k - p];
                let denom = self.knots[j + 1 + k - r] - left;
                let alpha = if denom == 0.0 { 0.0 } else { (u - left) / denom };
                for c in 0..4 {
                    d[j][c] = (1.0 - alpha) * d[j - 1][c] + alpha * d[j][c];
                }
            }
        }

        let [x, y, z, w] = d[p];
        if w == 0.0 {
            Vector3::new(x, y, z)
        } else {
            Vector3::new(x / w, y / w, z / w)
        }
    }

    pub fn start_point(&self) -> Vector3 {
        self.point_at(self.domain().0)
    }

    pub fn end_point(&self) -> Vector3 {
        self.point_at(self.domain().1)
    }

    pub fn is_closed(&self) -> bool {
        self.start_point().is_equal_to(&self.end_point(), 1e-10)
    }

    /// `segments + 1` points evenly spaced in parameter space
    pub fn get_points(&self, segments: usize) -> Vec<Vector3> {
        let segments = segments.max(1);
        let (lo, hi) = self.domain();
        let step = (hi - lo) / segments as f64;
        (0..=segments).map(|i| self.point_at(lo + step * i as f64)).collect()
    }

    pub fn bounding_box(&self, segments: usize) -> BoundingBox3D {
        BoundingBox3D::from_points(&self.get_points(segments)).unwrap_or_default()
    }

    pub fn nearest_point(&self, point: Vector3, segments: usize) -> Vector3 {
        let mut best = self.start_point();
        let mut best_distance = f64::MAX;
        for candidate in self.get_points(segments) {
            let d = candidate.distance(&point);
            if d < best_distance {
                best_distance = d;
                best = candidate;
            }
        }
        best
    }

    /// Affine maps act on the control polygon directly
    pub fn transform(&mut self, transform: &Transform) {
        for point in &mut self.control_points {
            *point = transform.apply(*point);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_spline_is_polyline() {
        let curve = NurbsCurve::clamped(1, vec![Vector3::ZERO, Vector3::new(10.0, 0.0, 0.0)]).unwrap();
        assert!(curve.point_at(0.5).is_equal_to(&Vector3::new(5.0, 0.0, 0.0), 1e-12));
    }

    #[test]
    fn test_clamped_ends_interpolate() {
        let pts = vec![
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 2.0, 0.0),
            Vector3::new(3.0, 2.0, 0.0),
            Vector3::new(4.0, 0.0, 0.0),
        ];
        let curve = NurbsCurve::clamped(3, pts).unwrap();
        assert_eq!(curve.knots().len(), 8);
        assert!(curve.start_point().is_equal_to(&Vector3::ZERO, 1e-12));
        assert!(curve.end_point().is_equal_to(&Vector3::new(4.0, 0.0, 0.0), 1e-12));
        // cubic Bezier midpoint
        assert!(curve.point_at(0.5).is_equal_to(&Vector3::new(2.0, 1.5, 0.0), 1e-12));
    }

    #[test]
    fn test_rational_quarter_circle() {
        let w = std::f64::consts::FRAC_1_SQRT_2;
        let curve = NurbsCurve::new(
            2,
            vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
            vec![Vector3::new(1.0, 0.0, 0.0), Vector3::new(1.0, 1.0, 0.0), Vector3::new(0.0, 1.0, 0.0)],
            Some(vec![1.0, w, 1.0]),
        )
        .unwrap();
        for p in curve.get_points(10) {
            assert!((p.length() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_invalid_knot_count() {
        let err = NurbsCurve::new(2, vec![0.0, 1.0], vec![Vector3::ZERO; 3], None).unwrap_err();
        assert!(matches!(err, EntityError::InvalidArgument(_)));
    }

    #[test]
    fn test_invalid_weight_count() {
        let result = NurbsCurve::new(
            1,
            vec![0.0, 0.0, 1.0, 1.0],
            vec![Vector3::ZERO, Vector3::UNIT_X],
            Some(vec![1.0]),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_too_few_points() {
        assert!(NurbsCurve::clamped(3, vec![Vector3::ZERO]).is_err());
    }
}
