//! Planetfall application framework: the fixed-timestep loop, the simulation
//! context it drives, and the winit window that renders it.

pub mod error;
pub mod game_loop;
pub mod platform;
pub mod scene;
pub mod simulation;
pub mod window;

pub use error::AppError;
pub use game_loop::{Clock, FIXED_DT, GameLoop, MAX_FRAME_TIME, MonotonicClock};
pub use platform::{PlatformDirs, PlatformError};
pub use scene::{PlanetMeshes, SceneRenderer, planet_params};
pub use simulation::{CameraMode, Projection, Simulation, flight_params};
pub use window::{AppState, run, window_attributes_from_config};
