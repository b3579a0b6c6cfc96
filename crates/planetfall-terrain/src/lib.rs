//! Terrain generation: seeded gradient noise, fractal height over the unit
//! sphere, and height-band classification with vertex colors.

mod band;
mod gradient;
mod height;

pub use band::{HeightBand, SNOW_LINE, band_color};
pub use gradient::GradientNoise;
pub use height::{DEFAULT_BIAS, DEFAULT_OCTAVES, HeightField, Octave};
