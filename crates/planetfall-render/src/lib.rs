//! wgpu rendering for Planetfall: device and surface setup, strip meshes
//! grouped into models, and the planet pipeline with its MVP uniform.

pub mod depth;
pub mod error;
pub mod gpu;
pub mod mesh;
pub mod model;
pub mod pass;
pub mod pipeline;
pub mod shader;
pub mod uniform;

pub use depth::DepthBuffer;
pub use error::RenderError;
pub use gpu::{RenderContext, RenderContextError, SurfaceError, init_render_context_blocking};
pub use mesh::{Mesh, MeshLayout, validate_mesh_data};
pub use model::{MAX_MESHES, Model};
pub use pass::{FrameEncoder, RenderPassBuilder, SPACE_BLACK};
pub use pipeline::{
    BlendMode, PLANET_SHADER_FILE, PLANET_SHADER_NAME, PLANET_SHADER_SOURCE, PlanetPipeline,
    draw_model, vertex_buffer_layouts,
};
pub use shader::{ShaderError, ShaderLibrary};
pub use uniform::{MvpBinding, MvpUniform};
