//! Pluggable surface functions mapping a unit-sphere point to a radial
//! distance and a vertex color.

use planetfall_math::{Color, Vector3};
use planetfall_terrain::{HeightField, band_color};

/// Radial distance and color for one vertex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceSample {
    pub distance: f32,
    pub color: Color,
}

pub trait SurfaceFn {
    fn sample(&self, unit_point: Vector3) -> SurfaceSample;
}

/// Noise-displaced terrain with a hard sea level.
///
/// Heights below zero sit exactly on `radius` and keep their ocean color.
#[derive(Clone, Debug)]
pub struct TerrainSurface {
    pub field: HeightField,
    pub radius: f32,
    pub height_multiplier: f32,
}

impl TerrainSurface {
    pub fn new(field: HeightField, radius: f32, height_multiplier: f32) -> Self {
        Self {
            field,
            radius,
            height_multiplier,
        }
    }

    /// Radial distance for a height value.
    pub fn distance_for(&self, h: f32) -> f32 {
        if h < 0.0 {
            self.radius
        } else {
            self.radius * (1.0 + h * self.height_multiplier)
        }
    }
}

impl SurfaceFn for TerrainSurface {
    fn sample(&self, unit_point: Vector3) -> SurfaceSample {
        let h = self.field.height(unit_point);
        SurfaceSample {
            distance: self.distance_for(h),
            color: band_color(h),
        }
    }
}

/// Constant-radius translucent shell around the planet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AtmosphereSurface {
    pub radius: f32,
    pub offset: f32,
    pub color: Color,
}

impl AtmosphereSurface {
    pub fn new(radius: f32, offset: f32, color: Color) -> Self {
        Self {
            radius,
            offset,
            color,
        }
    }

    pub fn shell_radius(&self) -> f32 {
        self.radius * (1.0 + self.offset)
    }
}

impl SurfaceFn for AtmosphereSurface {
    fn sample(&self, _unit_point: Vector3) -> SurfaceSample {
        SurfaceSample {
            distance: self.shell_radius(),
            color: self.color,
        }
    }
}
