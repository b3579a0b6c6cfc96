use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::MathError;

/// Magnitudes at or below this are treated as zero by [`Vector3::normalize`].
pub const NORMALIZE_EPSILON: f32 = 1e-12;

/// 3D vector in f32 space: positions, directions and axes.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    /// Zero vector (0, 0, 0).
    pub const ZERO: Vector3 = Vector3::new(0.0, 0.0, 0.0);
    /// Unit vector along +X.
    pub const X: Vector3 = Vector3::new(1.0, 0.0, 0.0);
    /// Unit vector along +Y.
    pub const Y: Vector3 = Vector3::new(0.0, 1.0, 0.0);
    /// Unit vector along +Z.
    pub const Z: Vector3 = Vector3::new(0.0, 0.0, 1.0);

    /// Create a new vector from its components.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Returns the dot product: x₁x₂ + y₁y₂ + z₁z₂
    #[must_use]
    pub fn dot(self, rhs: Vector3) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    /// Returns the cross product self × rhs.
    ///
    /// Anti-commutative: `a.cross(b) == -b.cross(a)`. The result is
    /// perpendicular to both inputs, which is what the camera frame relies on.
    #[must_use]
    pub fn cross(self, rhs: Vector3) -> Vector3 {
        Vector3::new(
            self.y * rhs.z - rhs.y * self.z,
            self.z * rhs.x - rhs.z * self.x,
            self.x * rhs.y - rhs.x * self.y,
        )
    }

    /// Returns x² + y² + z².
    #[must_use]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    /// Euclidean magnitude.
    #[must_use]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Distance between two points.
    #[must_use]
    pub fn distance(self, rhs: Vector3) -> f32 {
        (self - rhs).length()
    }

    /// Returns `self / |self|`.
    ///
    /// # Errors
    ///
    /// [`MathError::ZeroLength`] when the magnitude is zero or not finite,
    /// instead of quietly producing NaN components.
    pub fn normalize(self) -> Result<Vector3, MathError> {
        let mag = self.length();
        if !mag.is_finite() || mag <= NORMALIZE_EPSILON {
            return Err(MathError::ZeroLength);
        }
        Ok(self / mag)
    }

    /// Linear interpolation between `self` (t = 0) and `rhs` (t = 1).
    #[must_use]
    pub fn lerp(self, rhs: Vector3, t: f32) -> Vector3 {
        self + (rhs - self) * t
    }

    /// Returns `true` if every component is finite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Component array, the layout vertex buffers expect.
    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

/// Free-function form of [`Vector3::dot`].
pub fn dot(a: Vector3, b: Vector3) -> f32 {
    a.dot(b)
}

/// Free-function form of [`Vector3::cross`].
pub fn cross(a: Vector3, b: Vector3) -> Vector3 {
    a.cross(b)
}

/// Free-function form of [`Vector3::normalize`].
pub fn normalize(v: Vector3) -> Result<Vector3, MathError> {
    v.normalize()
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4}, {:.4})", self.x, self.y, self.z)
    }
}

impl From<[f32; 3]> for Vector3 {
    fn from(v: [f32; 3]) -> Self {
        Vector3::new(v[0], v[1], v[2])
    }
}

impl From<Vector3> for [f32; 3] {
    fn from(v: Vector3) -> Self {
        v.to_array()
    }
}

impl From<glam::Vec3> for Vector3 {
    fn from(v: glam::Vec3) -> Self {
        Vector3::new(v.x, v.y, v.z)
    }
}

impl From<Vector3> for glam::Vec3 {
    fn from(v: Vector3) -> Self {
        glam::Vec3::new(v.x, v.y, v.z)
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, rhs: Vector3) -> Self::Output {
        Vector3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, rhs: Vector3) -> Self::Output {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Vector3 {
    type Output = Vector3;

    fn neg(self) -> Self::Output {
        Vector3::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f32> for Vector3 {
    type Output = Vector3;

    fn mul(self, rhs: f32) -> Self::Output {
        Vector3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Mul<Vector3> for f32 {
    type Output = Vector3;

    fn mul(self, rhs: Vector3) -> Self::Output {
        rhs * self
    }
}

impl Div<f32> for Vector3 {
    type Output = Vector3;

    fn div(self, rhs: f32) -> Self::Output {
        Vector3::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl AddAssign for Vector3 {
    fn add_assign(&mut self, rhs: Vector3) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl SubAssign for Vector3 {
    fn sub_assign(&mut self, rhs: Vector3) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}

impl MulAssign<f32> for Vector3 {
    fn mul_assign(&mut self, rhs: f32) {
        self.x *= rhs;
        self.y *= rhs;
        self.z *= rhs;
    }
}
