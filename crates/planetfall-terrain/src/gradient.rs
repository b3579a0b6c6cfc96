use noise::{NoiseFn, Perlin};

/// Seeded 3D gradient (Perlin) noise.
///
/// The permutation table is built once in [`GradientNoise::new`]; sampling is
/// pure, so the same seed and point always yield the same value.
#[derive(Clone, Debug)]
pub struct GradientNoise {
    seed: u32,
    perlin: Perlin,
}

impl GradientNoise {
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            perlin: Perlin::new(seed),
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Noise value at `(x, y, z)`, roughly in `[-1, 1]`.
    pub fn sample(&self, x: f32, y: f32, z: f32) -> f32 {
        self.perlin.get([x as f64, y as f64, z as f64]) as f32
    }
}

impl Default for GradientNoise {
    fn default() -> Self {
        Self::new(0)
    }
}
