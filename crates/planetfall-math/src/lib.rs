//! Vector, matrix and color math for Planetfall: column-major 4x4 matrices,
//! OpenGL-style projection, camera frames and rotation about an arbitrary line.

mod color;
mod error;
mod matrix;
mod rotation;
mod vector;

pub use color::Color;
pub use error::MathError;
pub use matrix::Mat4x4;
pub use rotation::rotate_point_about_line;
pub use vector::{NORMALIZE_EPSILON, Vector3, cross, dot, normalize};
