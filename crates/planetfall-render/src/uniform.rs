//! The model-view-projection uniform shared by both planet pipelines.

use bytemuck::{Pod, Zeroable};
use planetfall_math::Mat4x4;

/// Column-major `mat4x4<f32>`, 64 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct MvpUniform {
    pub mvp: [[f32; 4]; 4],
}

impl MvpUniform {
    pub const SIZE: u64 = std::mem::size_of::<MvpUniform>() as u64;
}

impl From<&Mat4x4> for MvpUniform {
    fn from(m: &Mat4x4) -> Self {
        Self {
            mvp: m.to_cols_array_2d(),
        }
    }
}

impl Default for MvpUniform {
    fn default() -> Self {
        Self::from(&Mat4x4::IDENTITY)
    }
}

/// Uniform buffer plus the bind group exposing it at group 0, binding 0.
pub struct MvpBinding {
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl MvpBinding {
    pub fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("mvp-uniform"),
            size: MvpUniform::SIZE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("mvp-bind-group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        Self { buffer, bind_group }
    }

    /// Upload this frame's matrix.
    pub fn write(&self, queue: &wgpu::Queue, mvp: &Mat4x4) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(&MvpUniform::from(mvp)));
    }
}
