use planetfall_math::{MathError, Vector3};

use crate::PointOfView;

/// Attract-mode camera circling the planet about world `+Z`, always facing
/// the centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub center: Vector3,
    pub distance: f32,
    /// Radians per second around `+Z`.
    pub angular_speed: f32,
    /// Angle above the equatorial plane, kept away from the poles so the
    /// view direction never lines up with `+Z`.
    pub elevation: f32,
    angle: f32,
}

const MAX_ELEVATION: f32 = 1.4;

impl OrbitCamera {
    pub fn new(center: Vector3, distance: f32, angular_speed: f32) -> Self {
        Self {
            center,
            distance,
            angular_speed,
            elevation: 0.3,
            angle: 0.0,
        }
    }

    #[must_use]
    pub fn with_elevation(mut self, elevation: f32) -> Self {
        self.elevation = elevation.clamp(-MAX_ELEVATION, MAX_ELEVATION);
        self
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn update(&mut self, dt: f32) {
        self.angle = (self.angle + self.angular_speed * dt).rem_euclid(std::f32::consts::TAU);
    }

    pub fn position(&self) -> Vector3 {
        let (sin_e, cos_e) = self.elevation.sin_cos();
        let (sin_a, cos_a) = self.angle.sin_cos();
        self.center + Vector3::new(cos_e * cos_a, cos_e * sin_a, sin_e) * self.distance
    }

    pub fn point_of_view(&self) -> Result<PointOfView, MathError> {
        PointOfView::looking_at(self.position(), self.center, Vector3::Z)
    }
}
