//! Configuration structs with defaults and RON persistence.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use planetfall_planet::MAX_RESOLUTION;
use planetfall_terrain::DEFAULT_OCTAVES;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const CONFIG_FILE_NAME: &str = "config.ron";

/// `<platform config dir>/planetfall`, if the platform has one.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("planetfall"))
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub planet: PlanetConfig,
    pub camera: CameraConfig,
    pub flight: FlightConfig,
    pub input: InputConfig,
    pub debug: DebugConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
    pub title: String,
    /// Enable vsync (PresentMode::Fifo).
    pub vsync: bool,
}

/// Planet generation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlanetConfig {
    /// Sea-level radius in world units.
    pub radius: f32,
    /// Grid cells along each cube-face edge.
    pub resolution: u32,
    /// Fraction of the radius added per unit of terrain height.
    pub height_multiplier: f32,
    pub height_bias: f32,
    pub seed: u32,
    /// Atmosphere shell height as a fraction of the radius.
    pub atmosphere_offset: f32,
    /// Atmosphere RGBA, alpha controls translucency.
    pub atmosphere_color: [f32; 4],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    /// Initial distance from the planet centre.
    pub start_distance: f32,
    /// Start in the orbiting attract mode instead of piloting the ship.
    pub orbit_mode: bool,
    /// Orbit angular speed in radians per second.
    pub orbit_speed: f32,
}

/// Ship handling. Damping factors apply once per 60 Hz tick.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FlightConfig {
    pub roll_acceleration: f32,
    pub pitch_acceleration: f32,
    pub yaw_acceleration: f32,
    pub forward_acceleration: f32,
    pub roll_damping: f32,
    pub pitch_damping: f32,
    pub yaw_damping: f32,
    pub forward_damping: f32,
    pub snap_threshold: f32,
    /// Radians per second at full angular velocity.
    pub turn_rate: f32,
    pub speed_scale: f32,
    pub min_altitude: f32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Binding overrides (control name -> key names), e.g.
    /// `"forward": ["KeyW", "ArrowUp"]`. Unlisted controls keep their defaults.
    pub bindings: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Directory holding `planet.wgsl`. When set, the shader is read from
    /// disk and re-read whenever the window regains focus.
    pub shader_dir: Option<PathBuf>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "Planetfall".to_string(),
            vsync: true,
        }
    }
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            radius: 100.0,
            resolution: 64,
            height_multiplier: 0.05,
            height_bias: 0.1,
            seed: 0,
            atmosphere_offset: 0.1,
            atmosphere_color: [0.5, 0.7, 1.0, 0.25],
        }
    }
}

impl PlanetConfig {
    /// Highest terrain above sea level as a fraction of the radius, with the
    /// default octaves at full amplitude.
    pub fn max_displacement(&self) -> f32 {
        let amplitude: f32 = DEFAULT_OCTAVES.iter().map(|o| o.weight.abs()).sum();
        self.height_multiplier * (amplitude + self.height_bias).max(0.0)
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_deg: 60.0,
            near: 0.5,
            far: 2000.0,
            start_distance: 300.0,
            orbit_mode: false,
            orbit_speed: 0.2,
        }
    }
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            roll_acceleration: 2.0,
            pitch_acceleration: 2.0,
            yaw_acceleration: 2.0,
            forward_acceleration: 1.0,
            roll_damping: 0.95,
            pitch_damping: 0.9,
            yaw_damping: 0.9,
            forward_damping: 0.95,
            snap_threshold: 0.05,
            turn_rate: 1.5,
            speed_scale: 0.5,
            min_altitude: 10.0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            shader_dir: None,
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(config_dir.join(CONFIG_FILE_NAME), serialized)
            .map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Re-read the file: `Some(new_config)` if it differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE_NAME))?;
        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Reject values that would break mesh generation or the projection.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, reason: &str| {
            Err(ConfigError::Invalid {
                field,
                reason: reason.to_string(),
            })
        };
        if self.planet.resolution == 0 || self.planet.resolution > MAX_RESOLUTION {
            return invalid(
                "planet.resolution",
                &format!("must be in 1..={MAX_RESOLUTION}"),
            );
        }
        if !(self.planet.radius > 0.0) {
            return invalid("planet.radius", "must be positive");
        }
        let peak = self.planet.max_displacement();
        if !(self.planet.atmosphere_offset > peak) {
            return invalid(
                "planet.atmosphere_offset",
                &format!("must exceed the highest terrain at {peak:.3}"),
            );
        }
        if self.camera.near <= 0.0 || self.camera.far <= self.camera.near {
            return invalid("camera.near/far", "need 0 < near < far");
        }
        if !(self.camera.fov_deg > 0.0 && self.camera.fov_deg < 180.0) {
            return invalid("camera.fov_deg", "must be in (0, 180)");
        }
        if self.window.width == 0 || self.window.height == 0 {
            return invalid("window.width/height", "must be non-zero");
        }
        Ok(())
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        ron::from_str(&contents).map_err(ConfigError::ParseError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("width: 1280"));
        assert!(ron_str.contains("resolution: 64"));
        assert!(ron_str.contains("orbit_mode: false"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config
            .input
            .bindings
            .insert("forward".to_string(), vec!["ArrowUp".to_string()]);
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let config: Config = ron::from_str("(window: (width: 800), planet: (seed: 9))").unwrap();
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 720);
        assert_eq!(config.planet.seed, 9);
        assert_eq!(config.flight, FlightConfig::default());
        assert_eq!(config.camera, CameraConfig::default());
    }

    #[test]
    fn test_unknown_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.planet.seed = 1234;
        config.camera.orbit_mode = true;
        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("nested");
        let config = Config::load_or_create(&sub).unwrap();
        assert_eq!(config, Config::default());
        assert!(sub.join(CONFIG_FILE_NAME).exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());

        let mut modified = config.clone();
        modified.planet.resolution = 16;
        modified.save(dir.path()).unwrap();
        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.map(|c| c.planet.resolution), Some(16));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "{{not valid}}").unwrap();
        let result = Config::load_or_create(dir.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_validate() {
        assert!(Config::default().validate().is_ok());

        let mut c = Config::default();
        c.planet.resolution = 0;
        assert!(matches!(
            c.validate(),
            Err(ConfigError::Invalid { field: "planet.resolution", .. })
        ));

        let mut c = Config::default();
        c.camera.far = c.camera.near;
        assert!(c.validate().is_err());

        let mut c = Config::default();
        c.camera.fov_deg = 180.0;
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_validate_resolution_upper_bound() {
        let mut c = Config::default();
        c.planet.resolution = MAX_RESOLUTION;
        assert!(c.validate().is_ok());
        c.planet.resolution = MAX_RESOLUTION + 1;
        assert!(matches!(
            c.validate(),
            Err(ConfigError::Invalid { field: "planet.resolution", .. })
        ));
    }

    #[test]
    fn test_default_atmosphere_clears_terrain() {
        let planet = PlanetConfig::default();
        // 0.05 * (1.0 + 0.5 + 0.1)
        assert!((planet.max_displacement() - 0.08).abs() < 1e-6);
        assert!(planet.atmosphere_offset > planet.max_displacement());
    }

    #[test]
    fn test_validate_rejects_terrain_through_atmosphere() {
        let mut c = Config::default();
        c.planet.height_multiplier = 0.2;
        assert!(matches!(
            c.validate(),
            Err(ConfigError::Invalid { field: "planet.atmosphere_offset", .. })
        ));
        c.planet.atmosphere_offset = 0.4;
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_shader_dir_roundtrip() {
        let config: Config = ron::from_str("(debug: (shader_dir: Some(\"shaders\")))").unwrap();
        assert_eq!(config.debug.shader_dir, Some(PathBuf::from("shaders")));
        assert_eq!(config.debug.log_level, "info");
        assert_eq!(Config::default().debug.shader_dir, None);
    }
}
