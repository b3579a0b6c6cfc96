//! Mesh and model errors.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// Attribute arrays disagree on the vertex count.
    #[error("attribute length mismatch: {positions} positions, {normals} normals, {colors} colors")]
    AttributeMismatch {
        positions: usize,
        normals: usize,
        colors: usize,
    },

    #[error("mesh has no indices")]
    EmptyMesh,

    #[error("index {index} out of range for {vertices} vertices")]
    IndexOutOfRange { index: u32, vertices: usize },

    #[error("model already holds {capacity} meshes")]
    ModelFull { capacity: usize },
}
