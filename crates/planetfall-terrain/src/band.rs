//! Height bands and per-vertex terrain colors.

use planetfall_math::Color;

/// Heights at or above this are snow capped.
pub const SNOW_LINE: f32 = 0.8;

const OCEAN_SHALLOW: Color = Color::rgb(0.10, 0.35, 0.80);
const OCEAN_DEEP: Color = Color::rgb(0.02, 0.06, 0.30);
const LAND_LOW: Color = Color::rgb(0.20, 0.55, 0.12);
const LAND_HIGH: Color = Color::rgb(0.50, 0.36, 0.22);
const SNOW: Color = Color::rgb(0.95, 0.95, 0.97);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HeightBand {
    Ocean,
    Land,
    Snow,
}

impl HeightBand {
    pub fn classify(h: f32) -> Self {
        if h < 0.0 {
            HeightBand::Ocean
        } else if h < SNOW_LINE {
            HeightBand::Land
        } else {
            HeightBand::Snow
        }
    }
}

/// Vertex color for a terrain height.
///
/// Ocean darkens with depth. Land ramps from green to brown, so red and blue
/// both rise with height. Snow is near-white.
pub fn band_color(h: f32) -> Color {
    match HeightBand::classify(h) {
        HeightBand::Ocean => OCEAN_SHALLOW.lerp(OCEAN_DEEP, -h),
        HeightBand::Land => LAND_LOW.lerp(LAND_HIGH, h / SNOW_LINE),
        HeightBand::Snow => SNOW,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(HeightBand::classify(-0.001), HeightBand::Ocean);
        assert_eq!(HeightBand::classify(-5.0), HeightBand::Ocean);
        assert_eq!(HeightBand::classify(0.0), HeightBand::Land);
        assert_eq!(HeightBand::classify(0.799), HeightBand::Land);
        assert_eq!(HeightBand::classify(0.8), HeightBand::Snow);
        assert_eq!(HeightBand::classify(3.0), HeightBand::Snow);
    }

    #[test]
    fn test_ocean_is_blue_dominant_and_darkens_with_depth() {
        let shallow = band_color(-0.05);
        let deep = band_color(-0.9);
        for c in [shallow, deep] {
            assert!(c.b > c.r && c.b > c.g, "ocean color {c} is not blue");
        }
        assert!(deep.b < shallow.b, "deep {deep} should be darker than shallow {shallow}");
    }

    #[test]
    fn test_snow_is_near_white() {
        for h in [0.8, 1.0, 2.5] {
            let c = band_color(h);
            assert!(c.r > 0.9 && c.g > 0.9 && c.b > 0.9, "snow color {c} at h={h}");
        }
    }

    #[test]
    fn test_land_ramp_is_monotone_in_red_and_blue() {
        let mut prev = band_color(0.0);
        for i in 1..80 {
            let h = i as f32 * 0.01;
            let c = band_color(h);
            assert!(c.r >= prev.r, "red decreased at h={h}: {} -> {}", prev.r, c.r);
            assert!(c.b >= prev.b, "blue decreased at h={h}: {} -> {}", prev.b, c.b);
            prev = c;
        }
    }

    #[test]
    fn test_colors_are_opaque() {
        for h in [-1.0, 0.0, 0.4, 0.9] {
            assert_eq!(band_color(h).a, 1.0);
        }
    }
}
