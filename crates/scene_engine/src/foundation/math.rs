//! Math utilities and types
//!
//! Provides the vector and affine matrix types used by spatial nodes.
//! 2D affines are stored as homogeneous 3x3 matrices and 3D affines as
//! homogeneous 4x4 matrices; the last row is always `0 .. 0 1`.

pub use nalgebra::{Matrix3, Matrix4, Rotation3, Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 3x3 matrix type, used as a 2D affine transform
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type, used as a 3D affine transform
pub type Mat4 = Matrix4<f32>;

/// 2D point type
pub type Point2 = nalgebra::Point2<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Position, rotation and non-uniform scale in the plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform2D {
    /// Translation
    pub position: Vec2,

    /// Counter-clockwise rotation in radians
    pub rotation: f32,

    /// Scale factors along the local axes
    pub scale: Vec2,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            position: Vec2::zeros(),
            rotation: 0.0,
            scale: Vec2::new(1.0, 1.0),
        }
    }
}

impl Transform2D {
    /// Create a transform from its three components
    pub fn new(position: Vec2, rotation: f32, scale: Vec2) -> Self {
        Self { position, rotation, scale }
    }

    /// Compose translation * rotation * scale into an affine matrix
    pub fn to_matrix(&self) -> Mat3 {
        let (sin, cos) = self.rotation.sin_cos();
        Mat3::new(
            cos * self.scale.x, -sin * self.scale.y, self.position.x,
            sin * self.scale.x,  cos * self.scale.y, self.position.y,
            0.0,                 0.0,                1.0,
        )
    }

    /// Decompose an affine matrix.
    ///
    /// Position is the translation column, rotation is the angle of the first
    /// column, and scale is the length of each column. The second column's
    /// length is negated when the determinant is negative so that reflections
    /// survive a round trip through [`Transform2D::to_matrix`].
    pub fn from_matrix(matrix: &Mat3) -> Self {
        let position = Vec2::new(matrix.m13, matrix.m23);
        let rotation = matrix.m21.atan2(matrix.m11);
        let scale_x = matrix.m11.hypot(matrix.m21);
        let mut scale_y = matrix.m12.hypot(matrix.m22);
        if affine_2d_determinant(matrix) < 0.0 {
            scale_y = -scale_y;
        }

        Self {
            position,
            rotation,
            scale: Vec2::new(scale_x, scale_y),
        }
    }
}

/// Position, XYZ Euler rotation and non-uniform scale in space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    /// Translation
    pub position: Vec3,

    /// Rotation as roll/pitch/yaw Euler angles in radians
    pub rotation: Vec3,

    /// Scale factors along the local axes
    pub scale: Vec3,
}

impl Default for Transform3D {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform3D {
    /// Compose translation * rotation * scale into an affine matrix
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * Rotation3::from_euler_angles(self.rotation.x, self.rotation.y, self.rotation.z)
                .to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Decompose an affine matrix without shear
    pub fn from_matrix(matrix: &Mat4) -> Self {
        let position = Vec3::new(matrix.m14, matrix.m24, matrix.m34);

        let scale_x = Vec3::new(matrix.m11, matrix.m21, matrix.m31).magnitude();
        let scale_y = Vec3::new(matrix.m12, matrix.m22, matrix.m32).magnitude();
        let scale_z = Vec3::new(matrix.m13, matrix.m23, matrix.m33).magnitude();
        let scale = Vec3::new(scale_x, scale_y, scale_z);

        let rotation_matrix = Matrix3::new(
            matrix.m11 / scale_x, matrix.m12 / scale_y, matrix.m13 / scale_z,
            matrix.m21 / scale_x, matrix.m22 / scale_y, matrix.m23 / scale_z,
            matrix.m31 / scale_x, matrix.m32 / scale_y, matrix.m33 / scale_z,
        );
        let (roll, pitch, yaw) = Rotation3::from_matrix_unchecked(rotation_matrix).euler_angles();

        Self {
            position,
            rotation: Vec3::new(roll, pitch, yaw),
            scale,
        }
    }
}

/// Determinant of the linear part of a 2D affine
pub fn affine_2d_determinant(matrix: &Mat3) -> f32 {
    matrix.m11 * matrix.m22 - matrix.m12 * matrix.m21
}

/// Invert a 2D affine. A singular matrix yields NaN entries.
pub fn inverse_2d(matrix: &Mat3) -> Mat3 {
    matrix
        .try_inverse()
        .unwrap_or_else(|| Mat3::from_element(f32::NAN))
}

/// Invert a 3D affine. A singular matrix yields NaN entries.
pub fn inverse_3d(matrix: &Mat4) -> Mat4 {
    matrix
        .try_inverse()
        .unwrap_or_else(|| Mat4::from_element(f32::NAN))
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}
