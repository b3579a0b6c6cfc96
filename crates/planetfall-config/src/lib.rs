//! Configuration for Planetfall.
//!
//! Settings persist as `config.ron` in the platform config directory. Missing
//! sections and fields fall back to defaults; command-line arguments override
//! whatever was loaded.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CONFIG_FILE_NAME, CameraConfig, Config, DebugConfig, FlightConfig, InputConfig, PlanetConfig,
    WindowConfig, default_config_dir,
};
pub use error::ConfigError;
