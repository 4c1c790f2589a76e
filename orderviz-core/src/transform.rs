/// Affine transforms as immutable values
use nalgebra::{Matrix3, Matrix4, Point3, Vector3};

/// Rotation state around three axes (in radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f32; 3]> for RotationState {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// The ambient transform: everything composed so far in a draw call.
///
/// Each operation multiplies on the right, so it acts in the local frame
/// left behind by the previous operations. Operations return a new value;
/// the receiver is untouched, which is what makes "pop" unnecessary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    matrix: Matrix4<f32>,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    pub fn matrix(&self) -> &Matrix4<f32> {
        &self.matrix
    }

    /// Compose a local matrix after everything applied so far
    pub fn then(&self, local: &Matrix4<f32>) -> Self {
        Self {
            matrix: self.matrix * local,
        }
    }

    pub fn translate(&self, x: f32, y: f32) -> Self {
        self.then(&Self::translation_matrix(x, y, 0.0))
    }

    /// Rotate in the XY plane (about Z)
    pub fn rotate(&self, radians: f32) -> Self {
        self.rotate_z(radians)
    }

    pub fn rotate_x(&self, radians: f32) -> Self {
        self.then(&Matrix4::new_rotation(Vector3::new(radians, 0.0, 0.0)))
    }

    pub fn rotate_y(&self, radians: f32) -> Self {
        self.then(&Matrix4::new_rotation(Vector3::new(0.0, radians, 0.0)))
    }

    pub fn rotate_z(&self, radians: f32) -> Self {
        self.then(&Matrix4::new_rotation(Vector3::new(0.0, 0.0, radians)))
    }

    /// Apply a scene rotation: X, then Z, then Y
    pub fn rotate_scene(&self, rotation: &RotationState) -> Self {
        self.then(&Self::rotation_matrix(rotation))
    }

    /// Non-uniform scale in the XY plane; Z is left alone
    pub fn scale(&self, sx: f32, sy: f32) -> Self {
        self.then(&Self::scale_matrix(sx, sy, 1.0))
    }

    /// Uniform scale on all three axes
    pub fn scale_uniform(&self, s: f32) -> Self {
        self.then(&Self::scale_matrix(s, s, s))
    }

    pub fn apply(&self, point: &Point3<f32>) -> Point3<f32> {
        self.matrix.transform_point(point)
    }

    /// Where the local origin ends up
    pub fn origin(&self) -> Point3<f32> {
        self.apply(&Point3::origin())
    }

    /// Determinant of the linear (upper-left 3x3) part
    pub fn linear_determinant(&self) -> f32 {
        let linear: Matrix3<f32> = self.matrix.fixed_view::<3, 3>(0, 0).into_owned();
        linear.determinant()
    }

    /// Factor that keeps a marker at constant apparent size under this transform.
    ///
    /// Degenerate transforms keep the unscaled size.
    pub fn marker_scale(&self) -> f32 {
        let det = self.linear_determinant().abs();
        if det > f32::EPSILON && det.is_finite() {
            1.0 / det.sqrt()
        } else {
            1.0
        }
    }

    /// Create a rotation matrix from a rotation state
    pub fn rotation_matrix(rotation: &RotationState) -> Matrix4<f32> {
        let rx = Matrix4::new_rotation(Vector3::new(rotation.x, 0.0, 0.0));
        let ry = Matrix4::new_rotation(Vector3::new(0.0, rotation.y, 0.0));
        let rz = Matrix4::new_rotation(Vector3::new(0.0, 0.0, rotation.z));

        // Applied in order: X, Z, Y
        rx * rz * ry
    }

    /// Create a translation matrix
    pub fn translation_matrix(x: f32, y: f32, z: f32) -> Matrix4<f32> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// Create a scale matrix
    pub fn scale_matrix(sx: f32, sy: f32, sz: f32) -> Matrix4<f32> {
        Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz))
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
