//! Additive fractal height over points on the unit sphere.

use serde::{Deserialize, Serialize};

use planetfall_math::Vector3;

use crate::GradientNoise;

/// One fractal layer: noise sampled at `frequency * p`, scaled by `weight`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Octave {
    pub frequency: f32,
    pub weight: f32,
}

impl Octave {
    pub const fn new(frequency: f32, weight: f32) -> Self {
        Self { frequency, weight }
    }
}

/// Two layers: broad continents and finer relief at half weight.
pub const DEFAULT_OCTAVES: [Octave; 2] = [Octave::new(4.0, 1.0), Octave::new(7.0, 0.5)];

/// Added after the octave sum; positive values raise more land above sea level.
pub const DEFAULT_BIAS: f32 = 0.1;

/// Fractal height function: `height(p) = sum(w * noise(f * p)) + bias`.
#[derive(Clone, Debug)]
pub struct HeightField {
    noise: GradientNoise,
    octaves: Vec<Octave>,
    bias: f32,
}

impl HeightField {
    /// Default octaves and bias over the given seed.
    pub fn new(seed: u32) -> Self {
        Self::with_octaves(GradientNoise::new(seed), DEFAULT_OCTAVES.to_vec(), DEFAULT_BIAS)
    }

    pub fn with_octaves(noise: GradientNoise, octaves: Vec<Octave>, bias: f32) -> Self {
        Self {
            noise,
            octaves,
            bias,
        }
    }

    #[must_use]
    pub fn with_bias(mut self, bias: f32) -> Self {
        self.bias = bias;
        self
    }

    pub fn bias(&self) -> f32 {
        self.bias
    }

    pub fn octaves(&self) -> &[Octave] {
        &self.octaves
    }

    /// Height at `unit_point`, nominally a point on the unit sphere.
    pub fn height(&self, unit_point: Vector3) -> f32 {
        let sum: f32 = self
            .octaves
            .iter()
            .map(|o| {
                let p = unit_point * o.frequency;
                o.weight * self.noise.sample(p.x, p.y, p.z)
            })
            .sum();
        sum + self.bias
    }

    /// Upper bound on `|height - bias|`, assuming noise stays within `[-1, 1]`.
    pub fn max_amplitude(&self) -> f32 {
        self.octaves.iter().map(|o| o.weight.abs()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sphere_points() -> Vec<Vector3> {
        let mut pts = Vec::new();
        for i in 0..20 {
            for j in 0..10 {
                let lon = i as f32 * 0.314;
                let lat = j as f32 * 0.3 - 1.4;
                pts.push(Vector3::new(
                    lat.cos() * lon.cos(),
                    lat.cos() * lon.sin(),
                    lat.sin(),
                ));
            }
        }
        pts
    }

    #[test]
    fn test_height_is_deterministic() {
        let a = HeightField::new(11);
        let b = HeightField::new(11);
        for p in sphere_points() {
            assert_eq!(a.height(p), b.height(p), "height differs at {p}");
        }
    }

    #[test]
    fn test_height_is_weighted_octave_sum_plus_bias() {
        let noise = GradientNoise::new(5);
        let field = HeightField::new(5);
        let p = Vector3::new(0.6, -0.48, 0.64);
        let expected = noise.sample(p.x * 4.0, p.y * 4.0, p.z * 4.0)
            + 0.5 * noise.sample(p.x * 7.0, p.y * 7.0, p.z * 7.0)
            + DEFAULT_BIAS;
        assert!((field.height(p) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_no_octaves_is_flat_bias() {
        let field = HeightField::with_octaves(GradientNoise::new(0), Vec::new(), 0.25);
        assert_eq!(field.height(Vector3::X), 0.25);
        assert_eq!(field.max_amplitude(), 0.0);
    }

    #[test]
    fn test_heights_stay_within_amplitude() {
        let field = HeightField::new(2);
        let bound = field.max_amplitude() * 1.5 + field.bias().abs();
        for p in sphere_points() {
            let h = field.height(p);
            assert!(h.abs() <= bound, "height {h} exceeds bound {bound} at {p}");
        }
    }

    #[test]
    fn test_with_bias_shifts_all_heights() {
        let base = HeightField::new(9);
        let raised = HeightField::new(9).with_bias(DEFAULT_BIAS + 1.0);
        for p in sphere_points() {
            assert!((raised.height(p) - base.height(p) - 1.0).abs() < 1e-5);
        }
    }
}
