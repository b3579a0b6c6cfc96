//! Quad-grid patch generation and the zig-zag strip index order.

use planetfall_math::{Color, Vector3};

use crate::{PlanetError, SurfaceFn};

/// Largest grid resolution whose vertex count still fits a `u32` index
/// with room to spare.
pub const MAX_RESOLUTION: u32 = 4096;

/// Parallelogram on the cube: `p(i, j) = start + (i/N) across + (j/N) up`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridPatch {
    pub start: Vector3,
    pub across: Vector3,
    pub up: Vector3,
}

impl GridPatch {
    pub const fn new(start: Vector3, across: Vector3, up: Vector3) -> Self {
        Self { start, across, up }
    }

    /// Lattice point at column `i`, row `j` of an `n x n` grid.
    pub fn lattice_point(&self, n: u32, i: u32, j: u32) -> Vector3 {
        let inv = 1.0 / n as f32;
        self.start + self.across * (i as f32 * inv) + self.up * (j as f32 * inv)
    }
}

/// CPU-side mesh: one entry per vertex in each attribute, drawn as a single
/// triangle strip through `indices`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<Vector3>,
    pub normals: Vec<Vector3>,
    pub colors: Vec<Color>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            normals: Vec::with_capacity(vertices),
            colors: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// True when all attribute arrays have the same length and every index
    /// refers to an existing vertex.
    pub fn is_consistent(&self) -> bool {
        let n = self.positions.len();
        self.normals.len() == n
            && self.colors.len() == n
            && self.indices.iter().all(|&i| (i as usize) < n)
    }
}

/// Zig-zag strip indices for an `n x n` grid laid out row-major with
/// `n + 1` vertices per row.
///
/// Even rows run left to right and odd rows right to left, so consecutive
/// rows share their turning column and the whole grid is one strip of
/// `2 (n + 1) n` indices.
///
/// # Errors
///
/// [`PlanetError::InvalidResolution`] for `n == 0` or `n > MAX_RESOLUTION`.
pub fn strip_indices(n: u32) -> Result<Vec<u32>, PlanetError> {
    check_resolution(n)?;
    let row = n + 1;
    let mut indices = Vec::with_capacity(2 * row as usize * n as usize);
    for j in 0..n {
        for k in 0..=n {
            let i = if j % 2 == 0 { k } else { n - k };
            indices.push(j * row + i);
            indices.push((j + 1) * row + i);
        }
    }
    Ok(indices)
}

fn check_resolution(n: u32) -> Result<(), PlanetError> {
    if n == 0 || n > MAX_RESOLUTION {
        return Err(PlanetError::InvalidResolution {
            got: n,
            max: MAX_RESOLUTION,
        });
    }
    Ok(())
}

/// Build one patch of the sphere.
///
/// Every lattice point is normalized onto the unit sphere, then `surface`
/// decides its radial distance and color. Normals are the unit points.
///
/// # Errors
///
/// [`PlanetError::InvalidResolution`] for `n == 0` or `n > MAX_RESOLUTION`,
/// and [`PlanetError::Math`] if a lattice point sits at the origin.
pub fn build_grid_mesh(
    n: u32,
    patch: GridPatch,
    surface: &impl SurfaceFn,
) -> Result<MeshData, PlanetError> {
    check_resolution(n)?;

    let row = (n + 1) as usize;
    let mut mesh = MeshData::with_capacity(row * row, 2 * row * n as usize);

    for j in 0..=n {
        for i in 0..=n {
            let unit = patch.lattice_point(n, i, j).normalize()?;
            let sample = surface.sample(unit);
            mesh.positions.push(unit * sample.distance);
            mesh.normals.push(unit);
            mesh.colors.push(sample.color);
        }
    }
    mesh.indices = strip_indices(n)?;

    Ok(mesh)
}
