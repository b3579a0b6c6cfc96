//! Planetfall: fly a ship around a procedurally generated planet.
//!
//! Run with: `cargo run -p planetfall-game -- --seed 42`

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use planetfall_app::{AppError, PlanetMeshes, PlatformDirs, planet_params};
use planetfall_config::{CliArgs, Config};
use tracing::{error, info};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let (dirs, config) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("planetfall: {e}");
            return ExitCode::FAILURE;
        }
    };

    planetfall_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));

    match run(config, dirs.config_dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Planetfall exited with an error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Resolve directories, load `config.ron` and apply command-line overrides.
fn load_config(args: &CliArgs) -> Result<(PlatformDirs, Config), AppError> {
    let dirs = match &args.config {
        Some(root) => PlatformDirs::resolve_with_root(root),
        None => PlatformDirs::resolve()?,
    };
    dirs.create_dirs()?;

    let mut config = Config::load_or_create(&dirs.config_dir)?;
    config.apply_cli_overrides(args);
    Ok((dirs, config))
}

fn run(config: Config, config_dir: PathBuf) -> Result<(), AppError> {
    config.validate()?;

    info!(
        "Planetfall {} | window {}x{} | seed {} | resolution {}",
        env!("CARGO_PKG_VERSION"),
        config.window.width,
        config.window.height,
        config.planet.seed,
        config.planet.resolution
    );

    let params = planet_params(&config.planet);
    let meshes = PlanetMeshes::build(&params)?;
    info!("Planet built: {} vertices", meshes.vertex_count());

    planetfall_app::run(config, Some(config_dir), meshes)
}
