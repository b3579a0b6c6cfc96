//! Render pipelines for the planet surface and its atmosphere shell.

use std::num::NonZeroU64;

use crate::{DepthBuffer, Model, MvpBinding, MvpUniform, ShaderError};

/// Name the planet shader is cached under in the [`crate::ShaderLibrary`].
pub const PLANET_SHADER_NAME: &str = "planet";

pub const PLANET_SHADER_SOURCE: &str = include_str!("shaders/planet.wgsl");

/// File name looked up in a shader directory in place of the built-in source.
pub const PLANET_SHADER_FILE: &str = "planet.wgsl";

const POSITION_ATTRIBUTES: [wgpu::VertexAttribute; 1] = [wgpu::VertexAttribute {
    offset: 0,
    shader_location: 0,
    format: wgpu::VertexFormat::Float32x3,
}];

const NORMAL_ATTRIBUTES: [wgpu::VertexAttribute; 1] = [wgpu::VertexAttribute {
    offset: 0,
    shader_location: 1,
    format: wgpu::VertexFormat::Float32x3,
}];

const COLOR_ATTRIBUTES: [wgpu::VertexAttribute; 1] = [wgpu::VertexAttribute {
    offset: 0,
    shader_location: 2,
    format: wgpu::VertexFormat::Float32x4,
}];

/// One non-interleaved buffer per attribute: position (slot 0), normal
/// (slot 1), color (slot 2).
pub fn vertex_buffer_layouts() -> [wgpu::VertexBufferLayout<'static>; 3] {
    [
        wgpu::VertexBufferLayout {
            array_stride: 12,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &POSITION_ATTRIBUTES,
        },
        wgpu::VertexBufferLayout {
            array_stride: 12,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &NORMAL_ATTRIBUTES,
        },
        wgpu::VertexBufferLayout {
            array_stride: 16,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &COLOR_ATTRIBUTES,
        },
    ]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlendMode {
    /// Planet surface: no blending, depth writes on.
    Opaque,
    /// Atmosphere: alpha blending, depth test without writes.
    Translucent,
}

impl BlendMode {
    fn blend_state(self) -> Option<wgpu::BlendState> {
        match self {
            BlendMode::Opaque => None,
            BlendMode::Translucent => Some(wgpu::BlendState::ALPHA_BLENDING),
        }
    }

    fn depth_write(self) -> bool {
        matches!(self, BlendMode::Opaque)
    }
}

pub struct PlanetPipeline {
    pub opaque: wgpu::RenderPipeline,
    pub translucent: wgpu::RenderPipeline,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl PlanetPipeline {
    /// Build both blend variants from `shader`.
    ///
    /// # Errors
    ///
    /// [`ShaderError::LinkFailed`] when the module's entry points or
    /// interface do not fit the planet vertex layout.
    pub fn new(
        device: &wgpu::Device,
        shader: &wgpu::ShaderModule,
        surface_format: wgpu::TextureFormat,
    ) -> Result<Self, ShaderError> {
        let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("mvp-bind-group-layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: NonZeroU64::new(MvpUniform::SIZE),
                },
                count: None,
            }],
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("planet-pipeline-layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let opaque = create_pipeline(device, &layout, shader, surface_format, BlendMode::Opaque);
        let translucent =
            create_pipeline(device, &layout, shader, surface_format, BlendMode::Translucent);

        if let Some(err) = pollster::block_on(scope.pop()) {
            return Err(ShaderError::LinkFailed {
                name: PLANET_SHADER_NAME.to_string(),
                message: err.to_string(),
            });
        }
        log::info!("Planet pipelines created for {:?}", surface_format);

        Ok(Self {
            opaque,
            translucent,
            bind_group_layout,
        })
    }

    pub fn pipeline(&self, mode: BlendMode) -> &wgpu::RenderPipeline {
        match mode {
            BlendMode::Opaque => &self.opaque,
            BlendMode::Translucent => &self.translucent,
        }
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    surface_format: wgpu::TextureFormat,
    mode: BlendMode,
) -> wgpu::RenderPipeline {
    let label = match mode {
        BlendMode::Opaque => "planet-opaque-pipeline",
        BlendMode::Translucent => "planet-translucent-pipeline",
    };
    let buffers = vertex_buffer_layouts();

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &buffers,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleStrip,
            strip_index_format: Some(wgpu::IndexFormat::Uint32),
            front_face: wgpu::FrontFace::Ccw,
            // Strip winding flips on every odd row.
            cull_mode: None,
            unclipped_depth: false,
            polygon_mode: wgpu::PolygonMode::Fill,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DepthBuffer::FORMAT,
            depth_write_enabled: mode.depth_write(),
            depth_compare: DepthBuffer::COMPARE_FUNCTION,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: mode.blend_state(),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        multiview_mask: None,
        cache: None,
    })
}

/// Draw a model with the given blend mode and MVP binding.
pub fn draw_model<'a>(
    pass: &mut wgpu::RenderPass<'a>,
    pipeline: &PlanetPipeline,
    mode: BlendMode,
    mvp: &'a MvpBinding,
    model: &'a Model,
) {
    pass.set_pipeline(pipeline.pipeline(mode));
    pass.set_bind_group(0, &mvp.bind_group, &[]);
    model.render(pass);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::tests::create_test_device;

    #[test]
    fn test_vertex_layouts_match_attribute_slots() {
        let layouts = vertex_buffer_layouts();
        let locations: Vec<u32> = layouts
            .iter()
            .map(|l| l.attributes[0].shader_location)
            .collect();
        assert_eq!(locations, [0, 1, 2]);
        assert_eq!(layouts[0].array_stride, 12);
        assert_eq!(layouts[1].array_stride, 12);
        assert_eq!(layouts[2].array_stride, 16);
        assert_eq!(layouts[2].attributes[0].format, wgpu::VertexFormat::Float32x4);
    }

    #[test]
    fn test_strides_match_cpu_types() {
        let layouts = vertex_buffer_layouts();
        assert_eq!(
            layouts[0].array_stride as usize,
            std::mem::size_of::<planetfall_math::Vector3>()
        );
        assert_eq!(
            layouts[2].array_stride as usize,
            std::mem::size_of::<planetfall_math::Color>()
        );
    }

    #[test]
    fn test_blend_modes() {
        assert_eq!(BlendMode::Opaque.blend_state(), None);
        assert!(BlendMode::Opaque.depth_write());
        assert_eq!(
            BlendMode::Translucent.blend_state(),
            Some(wgpu::BlendState::ALPHA_BLENDING)
        );
        assert!(!BlendMode::Translucent.depth_write());
    }

    #[test]
    fn test_shader_source_declares_entry_points() {
        assert!(PLANET_SHADER_SOURCE.contains("fn vs_main"));
        assert!(PLANET_SHADER_SOURCE.contains("fn fs_main"));
        assert!(PLANET_SHADER_SOURCE.contains("@location(2) color"));
    }

    #[test]
    fn test_pipeline_creation() {
        let Some((device, _queue)) = create_test_device() else {
            return;
        };
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(PLANET_SHADER_NAME),
            source: wgpu::ShaderSource::Wgsl(PLANET_SHADER_SOURCE.into()),
        });
        let pipeline =
            PlanetPipeline::new(&device, &shader, wgpu::TextureFormat::Bgra8UnormSrgb).unwrap();
        let _binding = MvpBinding::new(&device, &pipeline.bind_group_layout);
    }

    #[test]
    fn test_missing_fragment_entry_fails_to_link() {
        let Some((device, _queue)) = create_test_device() else {
            return;
        };
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("vertex-only"),
            source: wgpu::ShaderSource::Wgsl(
                "@vertex fn vs_main(@location(0) position: vec3<f32>) -> @builtin(position) vec4<f32> {
                    return vec4<f32>(position, 1.0);
                }"
                .into(),
            ),
        });
        let result = PlanetPipeline::new(&device, &shader, wgpu::TextureFormat::Bgra8UnormSrgb);
        assert!(matches!(result, Err(ShaderError::LinkFailed { .. })));
    }
}
