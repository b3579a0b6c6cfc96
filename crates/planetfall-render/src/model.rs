//! Ordered collection of meshes drawn together.

use crate::{Mesh, RenderError};

/// Most meshes a single [`Model`] holds.
pub const MAX_MESHES: usize = 64;

pub struct Model {
    label: String,
    meshes: Vec<Mesh>,
    capacity: usize,
}

impl Model {
    pub fn new(label: impl Into<String>) -> Self {
        Self::with_capacity(label, MAX_MESHES)
    }

    /// Capacity is clamped to [`MAX_MESHES`].
    pub fn with_capacity(label: impl Into<String>, capacity: usize) -> Self {
        let capacity = capacity.min(MAX_MESHES);
        Self {
            label: label.into(),
            meshes: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, mesh: Mesh) -> Result<(), RenderError> {
        if self.meshes.len() >= self.capacity {
            return Err(RenderError::ModelFull {
                capacity: self.capacity,
            });
        }
        self.meshes.push(mesh);
        Ok(())
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    /// Total indices across all uploaded meshes.
    pub fn index_count(&self) -> usize {
        self.meshes.iter().map(Mesh::index_count).sum()
    }

    /// Draw every mesh in insertion order.
    pub fn render<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>) {
        for mesh in &self.meshes {
            mesh.draw(pass);
        }
    }
}
