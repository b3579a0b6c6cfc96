//! Top-level application errors.

use planetfall_config::ConfigError;
use planetfall_input::BindingError;
use planetfall_math::MathError;
use planetfall_planet::PlanetError;
use planetfall_render::{RenderContextError, RenderError, ShaderError};

use crate::PlatformError;

/// Anything that stops Planetfall from starting or keeps it from running.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid key bindings: {0}")]
    Bindings(#[from] BindingError),

    #[error("planet generation failed: {0}")]
    Planet(#[from] PlanetError),

    #[error("camera setup failed: {0}")]
    Math(#[from] MathError),

    #[error("GPU initialization failed: {0}")]
    RenderContext(#[from] RenderContextError),

    #[error("mesh upload failed: {0}")]
    Render(#[from] RenderError),

    #[error(transparent)]
    Shader(#[from] ShaderError),

    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("event loop failed: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("GPU out of memory")]
    OutOfMemory,
}
