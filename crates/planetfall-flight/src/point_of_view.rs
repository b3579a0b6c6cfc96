//! Orthonormal camera frame with roll, pitch and yaw about its own axes.

use planetfall_math::{Mat4x4, MathError, Vector3, rotate_point_about_line};

/// Camera position plus an orthonormal `direction`, `right`, `up` frame.
///
/// `right = normalize(direction x reference_up)` and
/// `up = normalize(right x direction)` hold after every operation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointOfView {
    position: Vector3,
    direction: Vector3,
    right: Vector3,
    up: Vector3,
}

impl PointOfView {
    /// # Errors
    ///
    /// [`MathError::ZeroLength`] if `direction` is zero or parallel to `reference_up`.
    pub fn new(
        position: Vector3,
        direction: Vector3,
        reference_up: Vector3,
    ) -> Result<Self, MathError> {
        let (direction, right, up) = derive_frame(direction, reference_up)?;
        Ok(Self {
            position,
            direction,
            right,
            up,
        })
    }

    /// Frame at `position` facing `target`.
    pub fn looking_at(
        position: Vector3,
        target: Vector3,
        reference_up: Vector3,
    ) -> Result<Self, MathError> {
        Self::new(position, target - position, reference_up)
    }

    pub fn position(&self) -> Vector3 {
        self.position
    }

    pub fn direction(&self) -> Vector3 {
        self.direction
    }

    pub fn right(&self) -> Vector3 {
        self.right
    }

    pub fn up(&self) -> Vector3 {
        self.up
    }

    pub fn set_position(&mut self, position: Vector3) {
        self.position = position;
    }

    /// Re-derive `right` and `up` from `reference_up`, re-normalizing
    /// `direction` on the way. On error the frame is left untouched.
    pub fn update_for_up_vector(&mut self, reference_up: Vector3) -> Result<(), MathError> {
        self.commit(self.direction, reference_up)
    }

    /// Rotate `up` about `direction`. Direction is unchanged.
    pub fn roll(&mut self, angle: f32) -> Result<(), MathError> {
        let up = rotate_point_about_line(self.up, angle, Vector3::ZERO, self.direction)?;
        self.commit(self.direction, up)
    }

    /// Rotate `direction` about `right`; positive angles raise the nose.
    pub fn pitch(&mut self, angle: f32) -> Result<(), MathError> {
        let direction = rotate_point_about_line(self.direction, angle, Vector3::ZERO, self.right)?;
        let candidate_up = self.right.cross(direction);
        self.commit(direction, candidate_up)
    }

    /// Rotate `direction` about `up`; positive angles turn left.
    pub fn yaw(&mut self, angle: f32) -> Result<(), MathError> {
        let direction = rotate_point_about_line(self.direction, angle, Vector3::ZERO, self.up)?;
        self.commit(direction, self.up)
    }

    /// Move along the view direction.
    pub fn move_by(&mut self, distance: f32) {
        self.position += self.direction * distance;
    }

    /// View matrix for this frame.
    pub fn camera_matrix(&self) -> Mat4x4 {
        Mat4x4::from_frame(self.position, self.direction, self.right, self.up)
    }

    /// Largest deviation from an orthonormal frame: unit lengths and
    /// pairwise dot products.
    pub fn orthonormality_error(&self) -> f32 {
        let lens = [self.direction, self.right, self.up]
            .map(|v| (v.length() - 1.0).abs());
        let dots = [
            self.direction.dot(self.right).abs(),
            self.direction.dot(self.up).abs(),
            self.right.dot(self.up).abs(),
        ];
        lens.into_iter().chain(dots).fold(0.0, f32::max)
    }

    fn commit(&mut self, direction: Vector3, reference_up: Vector3) -> Result<(), MathError> {
        let (direction, right, up) = derive_frame(direction, reference_up)?;
        self.direction = direction;
        self.right = right;
        self.up = up;
        Ok(())
    }
}

fn derive_frame(
    direction: Vector3,
    reference_up: Vector3,
) -> Result<(Vector3, Vector3, Vector3), MathError> {
    let direction = direction.normalize()?;
    let right = direction.cross(reference_up).normalize()?;
    let up = right.cross(direction).normalize()?;
    Ok((direction, right, up))
}
