//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Planetfall command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "planetfall", about = "Procedural planet flight")]
pub struct CliArgs {
    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Terrain noise seed.
    #[arg(long)]
    pub seed: Option<u32>,

    /// Grid cells along each cube-face edge.
    #[arg(long)]
    pub resolution: Option<u32>,

    /// Circle the planet instead of flying the ship.
    #[arg(long)]
    pub orbit: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Read `planet.wgsl` from this directory instead of the built-in shader.
    #[arg(long)]
    pub shader_dir: Option<PathBuf>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(seed) = args.seed {
            self.planet.seed = seed;
        }
        if let Some(res) = args.resolution {
            self.planet.resolution = res;
        }
        if args.orbit {
            self.camera.orbit_mode = true;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(ref dir) = args.shader_dir {
            self.debug.shader_dir = Some(dir.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs::parse_from([
            "planetfall",
            "--width",
            "1920",
            "--seed",
            "77",
            "--orbit",
        ]);
        config.apply_cli_overrides(&args);
        assert_eq!(config.window.width, 1920);
        assert_eq!(config.planet.seed, 77);
        assert!(config.camera.orbit_mode);
        // Non-overridden fields retain defaults
        assert_eq!(config.window.height, 720);
        assert_eq!(config.planet.resolution, 64);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_orbit_flag_absent_keeps_config_value() {
        let mut config = Config::default();
        config.camera.orbit_mode = true;
        config.apply_cli_overrides(&CliArgs::parse_from(["planetfall"]));
        assert!(config.camera.orbit_mode);
    }

    #[test]
    fn test_config_path_and_log_level() {
        let args = CliArgs::parse_from(["planetfall", "--config", "/tmp/pf", "--log-level", "debug"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/pf")));
        let mut config = Config::default();
        config.apply_cli_overrides(&args);
        assert_eq!(config.debug.log_level, "debug");
        assert_eq!(config.debug.shader_dir, None);
    }

    #[test]
    fn test_shader_dir_override() {
        let args = CliArgs::parse_from(["planetfall", "--shader-dir", "assets/shaders"]);
        let mut config = Config::default();
        config.apply_cli_overrides(&args);
        assert_eq!(config.debug.shader_dir, Some(PathBuf::from("assets/shaders")));
    }
}
