//! GPU-resident strip mesh: three vertex buffers and one `u32` index buffer.

use planetfall_planet::MeshData;
use wgpu::util::DeviceExt;

use crate::RenderError;

/// Vertex and index counts of a validated [`MeshData`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeshLayout {
    pub vertices: usize,
    pub indices: usize,
}

/// Check that a CPU mesh can be uploaded: equal attribute lengths, at least
/// one index, and every index inside the vertex range.
pub fn validate_mesh_data(data: &MeshData) -> Result<MeshLayout, RenderError> {
    let positions = data.positions.len();
    if data.normals.len() != positions || data.colors.len() != positions {
        return Err(RenderError::AttributeMismatch {
            positions,
            normals: data.normals.len(),
            colors: data.colors.len(),
        });
    }
    if data.indices.is_empty() {
        return Err(RenderError::EmptyMesh);
    }
    if let Some(&index) = data.indices.iter().find(|&&i| i as usize >= positions) {
        return Err(RenderError::IndexOutOfRange {
            index,
            vertices: positions,
        });
    }
    Ok(MeshLayout {
        vertices: positions,
        indices: data.indices.len(),
    })
}

struct MeshBuffers {
    positions: wgpu::Buffer,
    normals: wgpu::Buffer,
    colors: wgpu::Buffer,
    indices: wgpu::Buffer,
    layout: MeshLayout,
}

/// One drawable strip. Created empty; [`Mesh::setup`] uploads the data.
pub struct Mesh {
    label: String,
    buffers: Option<MeshBuffers>,
}

impl Mesh {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            buffers: None,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_setup(&self) -> bool {
        self.buffers.is_some()
    }

    pub fn vertex_count(&self) -> usize {
        self.buffers.as_ref().map_or(0, |b| b.layout.vertices)
    }

    pub fn index_count(&self) -> usize {
        self.buffers.as_ref().map_or(0, |b| b.layout.indices)
    }

    /// Upload `data`. The first call allocates; later calls with the same
    /// vertex and index counts overwrite the existing buffers in place,
    /// anything else reallocates.
    pub fn setup(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &MeshData,
    ) -> Result<(), RenderError> {
        let layout = validate_mesh_data(data)?;

        if let Some(buffers) = &self.buffers
            && buffers.layout == layout
        {
            queue.write_buffer(&buffers.positions, 0, bytemuck::cast_slice(&data.positions));
            queue.write_buffer(&buffers.normals, 0, bytemuck::cast_slice(&data.normals));
            queue.write_buffer(&buffers.colors, 0, bytemuck::cast_slice(&data.colors));
            queue.write_buffer(&buffers.indices, 0, bytemuck::cast_slice(&data.indices));
            log::debug!("Mesh '{}' rewritten in place", self.label);
            return Ok(());
        }

        let vertex_usage = wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST;
        let create = |suffix: &str, contents: &[u8], usage| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{}-{}", self.label, suffix)),
                contents,
                usage,
            })
        };

        let buffers = MeshBuffers {
            positions: create(
                "positions",
                bytemuck::cast_slice(&data.positions),
                vertex_usage,
            ),
            normals: create("normals", bytemuck::cast_slice(&data.normals), vertex_usage),
            colors: create("colors", bytemuck::cast_slice(&data.colors), vertex_usage),
            indices: create(
                "indices",
                bytemuck::cast_slice(&data.indices),
                wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            ),
            layout,
        };
        log::debug!(
            "Mesh '{}' allocated: {} vertices, {} indices",
            self.label,
            layout.vertices,
            layout.indices
        );
        self.buffers = Some(buffers);
        Ok(())
    }

    /// Bind slots 0/1/2 and the index buffer, then draw the whole strip.
    /// Does nothing before [`Mesh::setup`].
    pub fn draw<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>) {
        let Some(buffers) = &self.buffers else {
            return;
        };
        pass.set_vertex_buffer(0, buffers.positions.slice(..));
        pass.set_vertex_buffer(1, buffers.normals.slice(..));
        pass.set_vertex_buffer(2, buffers.colors.slice(..));
        pass.set_index_buffer(buffers.indices.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..buffers.layout.indices as u32, 0, 0..1);
    }
}
