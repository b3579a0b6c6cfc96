use std::ops::{Index, IndexMut, Mul, MulAssign};

use crate::{MathError, Vector3};

/// 4x4 `f32` matrix stored column-major: element `(row, col)` lives at
/// `m[col * 4 + row]`, the layout WGSL `mat4x4<f32>` uniforms expect.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Mat4x4 {
    pub m: [f32; 16],
}

impl Default for Mat4x4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat4x4 {
    pub const IDENTITY: Mat4x4 = Mat4x4 {
        m: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    pub const fn from_cols_array(m: [f32; 16]) -> Self {
        Self { m }
    }

    pub fn set_identity(&mut self) {
        *self = Self::IDENTITY;
    }

    /// Element at `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.m[col * 4 + row]
    }

    /// `a * b`: `b` is applied first when transforming a point.
    pub fn multiply(a: &Mat4x4, b: &Mat4x4) -> Mat4x4 {
        let mut res = [0.0f32; 16];
        for i in 0..4 {
            for j in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += a.m[k * 4 + i] * b.m[j * 4 + k];
                }
                res[j * 4 + i] = sum;
            }
        }
        Mat4x4 { m: res }
    }

    /// Identity with column 3 set to `(x, y, z, 1)`.
    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        let mut out = Self::IDENTITY;
        out.m[12] = x;
        out.m[13] = y;
        out.m[14] = z;
        out
    }

    /// Right-handed perspective projection into OpenGL clip space (z in `[-1, 1]`).
    ///
    /// `fov_deg` is the full vertical field of view in degrees.
    ///
    /// # Errors
    ///
    /// [`MathError::DegenerateDepthRange`] when `near == far`, and
    /// [`MathError::InvalidAspect`] for a non-positive aspect ratio.
    pub fn projection(fov_deg: f32, aspect: f32, near: f32, far: f32) -> Result<Self, MathError> {
        if !(aspect.is_finite() && aspect > 0.0) {
            return Err(MathError::InvalidAspect(aspect));
        }
        if near == far {
            return Err(MathError::DegenerateDepthRange);
        }
        let f = 1.0 / (fov_deg * std::f32::consts::PI / 360.0).tan();
        let mut m = [0.0f32; 16];
        m[0] = f / aspect;
        m[5] = f;
        m[10] = (far + near) / (near - far);
        m[11] = -1.0;
        m[14] = 2.0 * far * near / (near - far);
        Ok(Mat4x4 { m })
    }

    /// View matrix for an already orthonormal camera frame.
    ///
    /// Rotation rows are `right`, `up` and `-direction`, followed by a
    /// translation by `-position`.
    pub fn from_frame(position: Vector3, direction: Vector3, right: Vector3, up: Vector3) -> Self {
        let mut rot = Self::IDENTITY;
        rot.m[0] = right.x;
        rot.m[4] = right.y;
        rot.m[8] = right.z;
        rot.m[1] = up.x;
        rot.m[5] = up.y;
        rot.m[9] = up.z;
        rot.m[2] = -direction.x;
        rot.m[6] = -direction.y;
        rot.m[10] = -direction.z;
        rot * Self::translation(-position.x, -position.y, -position.z)
    }

    /// View matrix looking along `direction`, with `right = direction x reference_up`
    /// and `up = right x direction`.
    ///
    /// # Errors
    ///
    /// [`MathError::ZeroLength`] if `direction` is zero or parallel to `reference_up`.
    pub fn look_frame(
        position: Vector3,
        direction: Vector3,
        reference_up: Vector3,
    ) -> Result<Self, MathError> {
        let direction = direction.normalize()?;
        let right = direction.cross(reference_up).normalize()?;
        let up = right.cross(direction).normalize()?;
        Ok(Self::from_frame(position, direction, right, up))
    }

    /// View matrix from `position` towards `target`.
    pub fn look_at(
        position: Vector3,
        target: Vector3,
        reference_up: Vector3,
    ) -> Result<Self, MathError> {
        Self::look_frame(position, target - position, reference_up)
    }

    /// Transform a point (w = 1) and divide by w when it is not 1.
    pub fn transform_point(&self, p: Vector3) -> Vector3 {
        let x = self.m[0] * p.x + self.m[4] * p.y + self.m[8] * p.z + self.m[12];
        let y = self.m[1] * p.x + self.m[5] * p.y + self.m[9] * p.z + self.m[13];
        let z = self.m[2] * p.x + self.m[6] * p.y + self.m[10] * p.z + self.m[14];
        let w = self.m[3] * p.x + self.m[7] * p.y + self.m[11] * p.z + self.m[15];
        if w != 0.0 && w != 1.0 {
            Vector3::new(x / w, y / w, z / w)
        } else {
            Vector3::new(x, y, z)
        }
    }

    /// Byte view for uniform buffer uploads.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    pub fn to_cols_array(&self) -> [f32; 16] {
        self.m
    }

    /// Columns as nested arrays, the layout of a `mat4x4<f32>` uniform.
    pub fn to_cols_array_2d(&self) -> [[f32; 4]; 4] {
        let m = &self.m;
        [
            [m[0], m[1], m[2], m[3]],
            [m[4], m[5], m[6], m[7]],
            [m[8], m[9], m[10], m[11]],
            [m[12], m[13], m[14], m[15]],
        ]
    }
}

impl Index<usize> for Mat4x4 {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        &self.m[index]
    }
}

impl IndexMut<usize> for Mat4x4 {
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        &mut self.m[index]
    }
}

impl Mul for Mat4x4 {
    type Output = Mat4x4;

    fn mul(self, rhs: Mat4x4) -> Mat4x4 {
        Mat4x4::multiply(&self, &rhs)
    }
}

impl MulAssign for Mat4x4 {
    fn mul_assign(&mut self, rhs: Mat4x4) {
        *self = Mat4x4::multiply(self, &rhs);
    }
}

impl From<glam::Mat4> for Mat4x4 {
    fn from(m: glam::Mat4) -> Self {
        Mat4x4::from_cols_array(m.to_cols_array())
    }
}

impl From<Mat4x4> for glam::Mat4 {
    fn from(m: Mat4x4) -> Self {
        glam::Mat4::from_cols_array(&m.m)
    }
}
