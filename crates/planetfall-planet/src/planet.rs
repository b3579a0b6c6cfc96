//! Whole-planet builders: six terrain patches and six atmosphere patches.

use planetfall_math::Color;
use planetfall_terrain::HeightField;
use tracing::info;

use crate::{
    AtmosphereSurface, CubeFace, GridPatch, MeshData, PlanetError, TerrainSurface, build_grid_mesh,
};

/// Parameters for one planet and its atmosphere shell.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanetParams {
    pub radius: f32,
    /// Grid cells along each edge of a cube face.
    pub resolution: u32,
    /// Fraction of `radius` added per unit of terrain height.
    pub height_multiplier: f32,
    pub height_bias: f32,
    /// Atmosphere shell sits at `radius * (1 + atmosphere_offset)`.
    pub atmosphere_offset: f32,
    pub atmosphere_color: Color,
    pub seed: u32,
}

impl Default for PlanetParams {
    fn default() -> Self {
        Self {
            radius: 100.0,
            resolution: 64,
            height_multiplier: 0.05,
            height_bias: planetfall_terrain::DEFAULT_BIAS,
            atmosphere_offset: 0.1,
            atmosphere_color: Color::rgba(0.5, 0.7, 1.0, 0.25),
            seed: 0,
        }
    }
}

impl PlanetParams {
    pub fn height_field(&self) -> HeightField {
        HeightField::new(self.seed).with_bias(self.height_bias)
    }

    pub fn terrain_surface(&self) -> TerrainSurface {
        TerrainSurface::new(self.height_field(), self.radius, self.height_multiplier)
    }

    pub fn atmosphere_surface(&self) -> AtmosphereSurface {
        AtmosphereSurface::new(self.radius, self.atmosphere_offset, self.atmosphere_color)
    }
}

/// Build the six terrain patches in [`CubeFace::ALL`] order.
pub fn build_planet(params: &PlanetParams) -> Result<Vec<MeshData>, PlanetError> {
    let surface = params.terrain_surface();
    let meshes = CubeFace::ALL
        .iter()
        .map(|face| build_grid_mesh(params.resolution, face.patch(), &surface))
        .collect::<Result<Vec<_>, _>>()?;

    let verts: usize = meshes.iter().map(MeshData::vertex_count).sum();
    let indices: usize = meshes.iter().map(MeshData::index_count).sum();
    info!(
        "Planet built: radius {}, resolution {}, seed {}, {} vertices, {} indices across 6 faces",
        params.radius, params.resolution, params.seed, verts, indices
    );

    Ok(meshes)
}

/// One atmosphere patch. Same lattice and strip order as the terrain, with
/// no noise lookup.
pub fn build_atmosphere_mesh(
    params: &PlanetParams,
    patch: GridPatch,
) -> Result<MeshData, PlanetError> {
    build_grid_mesh(params.resolution, patch, &params.atmosphere_surface())
}

/// Build the six atmosphere patches in [`CubeFace::ALL`] order.
pub fn build_atmosphere(params: &PlanetParams) -> Result<Vec<MeshData>, PlanetError> {
    let meshes = CubeFace::ALL
        .iter()
        .map(|face| build_atmosphere_mesh(params, face.patch()))
        .collect::<Result<Vec<_>, _>>()?;
    info!(
        "Atmosphere built: shell radius {}",
        params.atmosphere_surface().shell_radius()
    );
    Ok(meshes)
}
