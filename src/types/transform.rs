//! Transformation types for geometric operations
//!
//! [`Transform`] wraps a homogeneous 4x4 matrix (nalgebra) and is what
//! `transform_by` consumes. [`Matrix3`] carries the arbitrary-axis
//! OCS/WCS conversion used by planar entities.

use crate::types::Vector3;
use nalgebra::{Matrix4, Rotation3, Unit};

/// 3x3 matrix used for OCS to WCS conversion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix3 {
    /// Row-major elements
    pub m: [[f64; 3]; 3],
}

impl Matrix3 {
    pub fn identity() -> Self {
        Self {
            m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// OCS axes for a normal, per the AutoCAD arbitrary axis algorithm
    ///
    /// Columns are the OCS X, Y and Z axes expressed in WCS.
    pub fn arbitrary_axis(normal: Vector3) -> Self {
        const ARBITRARY_AXIS_THRESHOLD: f64 = 1.0 / 64.0;

        let normal = normal.normalize();
        let ax = if normal.x.abs() < ARBITRARY_AXIS_THRESHOLD
            && normal.y.abs() < ARBITRARY_AXIS_THRESHOLD
        {
            Vector3::UNIT_Y
        } else {
            Vector3::UNIT_Z
        };
        let x_dir = ax.cross(&normal).normalize();
        let y_dir = normal.cross(&x_dir).normalize();

        Self {
            m: [
                [x_dir.x, y_dir.x, normal.x],
                [x_dir.y, y_dir.y, normal.y],
                [x_dir.z, y_dir.z, normal.z],
            ],
        }
    }

    /// OCS X axis in WCS
    pub fn x_axis(&self) -> Vector3 {
        Vector3::new(self.m[0][0], self.m[1][0], self.m[2][0])
    }

    /// OCS Y axis in WCS
    pub fn y_axis(&self) -> Vector3 {
        Vector3::new(self.m[0][1], self.m[1][1], self.m[2][1])
    }

    pub fn transpose(&self) -> Self {
        let mut t = Self::identity();
        for i in 0..3 {
            for j in 0..3 {
                t.m[i][j] = self.m[j][i];
            }
        }
        t
    }

    pub fn transform_point(&self, v: Vector3) -> Vector3 {
        Vector3::new(
            self.m[0][0] * v.x + self.m[0][1] * v.y + self.m[0][2] * v.z,
            self.m[1][0] * v.x + self.m[1][1] * v.y + self.m[1][2] * v.z,
            self.m[2][0] * v.x + self.m[2][1] * v.y + self.m[2][2] * v.z,
        )
    }
}

impl Default for Matrix3 {
    fn default() -> Self {
        Self::identity()
    }
}

/// Affine transform applied by `transform_by`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub matrix: Matrix4<f64>,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    pub fn from_matrix(matrix: Matrix4<f64>) -> Self {
        Self { matrix }
    }

    pub fn from_translation(offset: Vector3) -> Self {
        Self {
            matrix: Matrix4::new_translation(&offset.into()),
        }
    }

    /// Rotation about an axis through the origin
    pub fn from_rotation(axis: Vector3, angle: f64) -> Self {
        let axis = Unit::new_normalize(nalgebra::Vector3::from(axis));
        Self {
            matrix: Rotation3::from_axis_angle(&axis, angle).to_homogeneous(),
        }
    }

    /// Rotation about an axis through `center`
    pub fn from_rotation_about(center: Vector3, axis: Vector3, angle: f64) -> Self {
        Self::from_translation(-center)
            .then(&Self::from_rotation(axis, angle))
            .then(&Self::from_translation(center))
    }

    pub fn from_scale(scale: f64) -> Self {
        Self {
            matrix: Matrix4::new_scaling(scale),
        }
    }

    pub fn from_scaling(scale: Vector3) -> Self {
        Self {
            matrix: Matrix4::new_nonuniform_scaling(&scale.into()),
        }
    }

    /// Reflection across the plane through the origin with the given normal
    pub fn from_mirror(normal: Vector3) -> Self {
        let n = nalgebra::Vector3::from(normal.normalize());
        let reflect = nalgebra::Matrix3::identity() - n * n.transpose() * 2.0;
        Self {
            matrix: reflect.to_homogeneous(),
        }
    }

    /// Apply to a point (with translation)
    pub fn apply(&self, point: Vector3) -> Vector3 {
        self.matrix
            .transform_point(&nalgebra::Point3::from(point))
            .into()
    }

    /// Apply to a direction (no translation)
    pub fn apply_rotation(&self, direction: Vector3) -> Vector3 {
        self.matrix
            .transform_vector(&nalgebra::Vector3::from(direction))
            .into()
    }

    /// Length scale factor, measured on the X axis
    pub fn scale_factor(&self) -> f64 {
        self.apply_rotation(Vector3::UNIT_X).length()
    }

    /// Determinant of the linear part; negative for mirroring transforms
    pub fn determinant(&self) -> f64 {
        self.matrix.fixed_view::<3, 3>(0, 0).determinant()
    }

    /// `self` first, then `other`
    pub fn then(&self, other: &Transform) -> Transform {
        Transform {
            matrix: other.matrix * self.matrix,
        }
    }

    pub fn inverse(&self) -> Option<Transform> {
        self.matrix.try_inverse().map(Transform::from_matrix)
    }

    pub fn is_identity(&self) -> bool {
        self.matrix == Matrix4::identity()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// True when an angle is effectively zero
pub fn is_zero_angle(angle: f64) -> bool {
    angle.abs() < 1e-10
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn approx(a: Vector3, b: Vector3) -> bool {
        a.is_equal_to(&b, 1e-9)
    }

    #[test]
    fn test_translation() {
        let t = Transform::from_translation(Vector3::new(1.0, 2.0, 3.0));
        assert!(approx(t.apply(Vector3::ZERO), Vector3::new(1.0, 2.0, 3.0)));
        assert!(approx(t.apply_rotation(Vector3::UNIT_X), Vector3::UNIT_X));
    }

    #[test]
    fn test_rotation() {
        let t = Transform::from_rotation(Vector3::UNIT_Z, PI / 2.0);
        assert!(approx(t.apply(Vector3::UNIT_X), Vector3::UNIT_Y));
    }

    #[test]
    fn test_rotation_about_center() {
        let t = Transform::from_rotation_about(Vector3::new(1.0, 0.0, 0.0), Vector3::UNIT_Z, PI);
        assert!(approx(t.apply(Vector3::ZERO), Vector3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn test_composition_order() {
        let t = Transform::from_scale(2.0).then(&Transform::from_translation(Vector3::UNIT_X));
        assert!(approx(t.apply(Vector3::UNIT_X), Vector3::new(3.0, 0.0, 0.0)));
        assert!((t.scale_factor() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_mirror_determinant() {
        let t = Transform::from_mirror(Vector3::UNIT_X);
        assert!(t.determinant() < 0.0);
        assert!(approx(t.apply(Vector3::new(3.0, 1.0, 0.0)), Vector3::new(-3.0, 1.0, 0.0)));
    }

    #[test]
    fn test_arbitrary_axis_world_z() {
        let m = Matrix3::arbitrary_axis(Vector3::UNIT_Z);
        assert!(approx(m.x_axis(), Vector3::UNIT_X));
        assert!(approx(m.y_axis(), Vector3::UNIT_Y));
    }
}
