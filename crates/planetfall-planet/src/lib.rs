//! Cube-sphere planet meshes: six quad-grid patches projected onto a sphere,
//! displaced by terrain height and emitted as zig-zag triangle strips.

mod cube_face;
mod error;
mod grid;
mod planet;
mod surface;

pub use cube_face::CubeFace;
pub use error::PlanetError;
pub use grid::{GridPatch, MAX_RESOLUTION, MeshData, build_grid_mesh, strip_indices};
pub use planet::{PlanetParams, build_atmosphere, build_atmosphere_mesh, build_planet};
pub use surface::{AtmosphereSurface, SurfaceFn, SurfaceSample, TerrainSurface};
