use planetfall_math::MathError;

/// Errors from planet mesh generation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanetError {
    /// Grid resolution is zero or too large for 32-bit indices.
    #[error("grid resolution must be in 1..={max}, got {got}")]
    InvalidResolution { got: u32, max: u32 },

    /// A lattice point could not be projected onto the sphere.
    #[error("degenerate lattice point: {0}")]
    Math(#[from] MathError),
}
