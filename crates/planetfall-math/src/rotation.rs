use crate::{MathError, Vector3};

/// Rotate `point` by `angle` radians about the line through `p1` and `p2`.
///
/// Positive angles follow the right-hand rule about the `p1 -> p2` direction.
/// The point is expressed in an orthonormal basis whose first axis is the
/// line direction, rotated in the perpendicular plane, then mapped back.
///
/// # Errors
///
/// [`MathError::ZeroLength`] when `p1` and `p2` coincide.
pub fn rotate_point_about_line(
    point: Vector3,
    angle: f32,
    p1: Vector3,
    p2: Vector3,
) -> Result<Vector3, MathError> {
    let u = (p2 - p1).normalize()?;
    let v = u.cross(least_aligned_axis(u)).normalize()?;
    let w = u.cross(v);

    let q = point - p1;
    let a = q.dot(u);
    let b = q.dot(v);
    let c = q.dot(w);

    let (sin, cos) = angle.sin_cos();
    let b_rot = b * cos - c * sin;
    let c_rot = b * sin + c * cos;

    Ok(p1 + u * a + v * b_rot + w * c_rot)
}

// Basis axis with the smallest component along `u`, never parallel to it.
fn least_aligned_axis(u: Vector3) -> Vector3 {
    let (ax, ay, az) = (u.x.abs(), u.y.abs(), u.z.abs());
    if ax <= ay && ax <= az {
        Vector3::X
    } else if ay <= az {
        Vector3::Y
    } else {
        Vector3::Z
    }
}
