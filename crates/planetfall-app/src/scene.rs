//! Planet geometry and the GPU resources that draw it.

use std::path::Path;
use std::sync::Arc;

use planetfall_config::PlanetConfig;
use planetfall_math::{Color, Mat4x4};
use planetfall_planet::{
    CubeFace, MeshData, PlanetError, PlanetParams, build_atmosphere, build_planet,
};
use planetfall_render::{
    BlendMode, DepthBuffer, FrameEncoder, Mesh, Model, MvpBinding, PLANET_SHADER_FILE,
    PLANET_SHADER_NAME, PLANET_SHADER_SOURCE, PlanetPipeline, RenderContext, RenderPassBuilder,
    ShaderError, ShaderLibrary, SurfaceError, draw_model, init_render_context_blocking,
};
use tracing::{debug, info};
use winit::window::Window;

use crate::AppError;

pub fn planet_params(planet: &PlanetConfig) -> PlanetParams {
    PlanetParams {
        radius: planet.radius,
        resolution: planet.resolution,
        height_multiplier: planet.height_multiplier,
        height_bias: planet.height_bias,
        atmosphere_offset: planet.atmosphere_offset,
        atmosphere_color: Color::from(planet.atmosphere_color),
        seed: planet.seed,
    }
}

/// CPU meshes for the six terrain patches and six atmosphere patches, in
/// [`CubeFace::ALL`] order.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetMeshes {
    pub terrain: Vec<MeshData>,
    pub atmosphere: Vec<MeshData>,
}

impl PlanetMeshes {
    pub fn build(params: &PlanetParams) -> Result<Self, PlanetError> {
        Ok(Self {
            terrain: build_planet(params)?,
            atmosphere: build_atmosphere(params)?,
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.terrain
            .iter()
            .chain(&self.atmosphere)
            .map(MeshData::vertex_count)
            .sum()
    }
}

/// Device, pipelines and uploaded models for one window.
pub struct SceneRenderer {
    pub gpu: RenderContext,
    depth: DepthBuffer,
    shaders: ShaderLibrary,
    /// Planet shader read from a shader directory rather than built in.
    file_backed: bool,
    pipeline: PlanetPipeline,
    mvp: MvpBinding,
    planet: Model,
    atmosphere: Model,
}

impl SceneRenderer {
    /// Bring up the GPU, compile the planet shader and upload both models.
    ///
    /// With a `shader_dir` the planet shader comes from `planet.wgsl` in that
    /// directory and can be re-read with [`SceneRenderer::reload_shaders`].
    pub fn new(
        window: Arc<Window>,
        vsync: bool,
        shader_dir: Option<&Path>,
        meshes: &PlanetMeshes,
    ) -> Result<Self, AppError> {
        let gpu = init_render_context_blocking(window, vsync)?;
        let depth = DepthBuffer::new(
            &gpu.device,
            gpu.surface_config.width,
            gpu.surface_config.height,
        );

        let (mut shaders, file_backed) = match shader_dir {
            Some(dir) => {
                info!("Loading shaders from {}", dir.display());
                (ShaderLibrary::new().with_shader_dir(dir), true)
            }
            None => (ShaderLibrary::new(), false),
        };
        let shader = if file_backed {
            shaders.load_from_file(&gpu.device, PLANET_SHADER_NAME, PLANET_SHADER_FILE)?
        } else {
            shaders.load_from_source(&gpu.device, PLANET_SHADER_NAME, PLANET_SHADER_SOURCE)?
        };
        let pipeline = PlanetPipeline::new(&gpu.device, &shader, gpu.surface_format)?;
        let mvp = MvpBinding::new(&gpu.device, &pipeline.bind_group_layout);

        let planet = upload_model(&gpu, "planet", &meshes.terrain)?;
        let atmosphere = upload_model(&gpu, "atmosphere", &meshes.atmosphere)?;
        info!(
            "Uploaded planet ({} indices) and atmosphere ({} indices)",
            planet.index_count(),
            atmosphere.index_count()
        );

        Ok(Self {
            gpu,
            depth,
            shaders,
            file_backed,
            pipeline,
            mvp,
            planet,
            atmosphere,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
        self.depth.resize(&self.gpu.device, width, height);
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.gpu.aspect_ratio()
    }

    /// Re-read a file-backed planet shader and rebuild the pipelines.
    ///
    /// Returns `Ok(false)` for the built-in shader. On error the previous
    /// pipelines stay in use.
    pub fn reload_shaders(&mut self) -> Result<bool, ShaderError> {
        if !self.file_backed {
            return Ok(false);
        }
        let shader = self.shaders.reload(&self.gpu.device, PLANET_SHADER_NAME)?;
        let pipeline = PlanetPipeline::new(&self.gpu.device, &shader, self.gpu.surface_format)?;
        self.mvp = MvpBinding::new(&self.gpu.device, &pipeline.bind_group_layout);
        self.pipeline = pipeline;
        info!("Planet shader reloaded ({} cached)", self.shaders.len());
        Ok(true)
    }

    /// Upload `view_projection` and draw the planet, then the atmosphere.
    pub fn render(&self, view_projection: &Mat4x4) -> Result<(), SurfaceError> {
        let surface_texture = self.gpu.get_current_texture()?;
        self.mvp.write(&self.gpu.queue, view_projection);

        let mut frame =
            FrameEncoder::new(&self.gpu.device, self.gpu.queue.clone(), surface_texture);
        let builder = RenderPassBuilder::new()
            .depth(&self.depth)
            .label("planet-pass");
        if let Some(mut pass) = frame.begin_render_pass(&builder) {
            draw_model(
                &mut pass,
                &self.pipeline,
                BlendMode::Opaque,
                &self.mvp,
                &self.planet,
            );
            draw_model(
                &mut pass,
                &self.pipeline,
                BlendMode::Translucent,
                &self.mvp,
                &self.atmosphere,
            );
        }
        frame.submit();
        Ok(())
    }
}

fn upload_model(gpu: &RenderContext, name: &str, meshes: &[MeshData]) -> Result<Model, AppError> {
    let mut model = Model::with_capacity(name, meshes.len());
    for (face, data) in CubeFace::ALL.iter().zip(meshes) {
        let mut mesh = Mesh::new(format!("{name}-{}", face.label()));
        mesh.setup(&gpu.device, &gpu.queue, data)?;
        debug!("Uploaded {} ({} vertices)", mesh.label(), mesh.vertex_count());
        model.push(mesh)?;
    }
    Ok(model)
}
