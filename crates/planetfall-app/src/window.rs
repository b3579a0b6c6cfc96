//! Window creation and event handling via winit.
//!
//! [`AppState`] implements winit's [`ApplicationHandler`]; [`run`] drives it
//! until the window closes, the quit control fires, or a fatal error occurs.
//! Regaining focus re-reads `config.ron` and any file-backed shaders.

use std::path::PathBuf;
use std::sync::Arc;

use planetfall_config::Config;
use planetfall_input::{KeyBindings, KeyboardState};
use planetfall_render::SurfaceError;
use tracing::{error, info, instrument, warn};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::{AppError, GameLoop, PlanetMeshes, SceneRenderer, Simulation};

pub fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(
            config.window.width as f64,
            config.window.height as f64,
        ))
}

/// Owns the simulation, the loop, input and (once resumed) the window and
/// renderer.
pub struct AppState {
    config: Config,
    /// Where `config.ron` is re-read from on focus; `None` disables reloads.
    config_dir: Option<PathBuf>,
    bindings: KeyBindings,
    meshes: PlanetMeshes,
    simulation: Simulation,
    game_loop: GameLoop,
    keyboard: KeyboardState,
    window: Option<Arc<Window>>,
    renderer: Option<SceneRenderer>,
    fatal: Option<AppError>,
}

impl AppState {
    pub fn new(
        config: Config,
        config_dir: Option<PathBuf>,
        meshes: PlanetMeshes,
    ) -> Result<Self, AppError> {
        let bindings = KeyBindings::from_names(&config.input.bindings)?;
        let simulation = Simulation::from_config(&config)?;
        Ok(Self {
            config,
            config_dir,
            bindings,
            meshes,
            simulation,
            game_loop: GameLoop::new(),
            keyboard: KeyboardState::new(),
            window: None,
            renderer: None,
            fatal: None,
        })
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    /// The error that stopped the event loop, if any.
    pub fn into_result(self) -> Result<(), AppError> {
        match self.fatal {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, operation: &str, err: AppError) {
        error!("{operation} failed: {err}");
        self.fatal = Some(err);
        event_loop.exit();
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let attrs = window_attributes_from_config(&self.config);
        let window = Arc::new(event_loop.create_window(attrs)?);
        let size = window.inner_size();
        info!("Window created: {}x{}", size.width, size.height);

        let renderer = SceneRenderer::new(
            window.clone(),
            self.config.window.vsync,
            self.config.debug.shader_dir.as_deref(),
            &self.meshes,
        )?;
        window.request_redraw();
        self.renderer = Some(renderer);
        self.window = Some(window);
        Ok(())
    }

    /// Apply a changed `config.ron`. Anything that fails to validate or
    /// bind leaves the running settings alone. Planet and window changes
    /// need a restart.
    fn reload_config(&mut self) {
        let Some(dir) = &self.config_dir else {
            return;
        };
        let config = match self.config.reload(dir) {
            Ok(Some(config)) => config,
            Ok(None) => return,
            Err(e) => {
                warn!("Keeping current config: {e}");
                return;
            }
        };
        if let Err(e) = config.validate() {
            warn!("Ignoring reloaded config: {e}");
            return;
        }
        let bindings = match KeyBindings::from_names(&config.input.bindings) {
            Ok(bindings) => bindings,
            Err(e) => {
                warn!("Ignoring reloaded config: {e}");
                return;
            }
        };
        if config.planet != self.config.planet || config.window != self.config.window {
            info!("Planet and window settings take effect on restart");
        }
        self.simulation.apply_config(&config);
        self.bindings = bindings;
        self.config = config;
    }

    fn reload_shaders(&mut self) {
        let Some(renderer) = &mut self.renderer else {
            return;
        };
        if let Err(e) = renderer.reload_shaders() {
            warn!("Keeping current planet shader: {e}");
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let input = self.bindings.resolve(&self.keyboard);
        let simulation = &mut self.simulation;
        self.game_loop
            .tick(|dt, _sim_time| simulation.update(dt as f32, &input), |_alpha| {});

        if self.simulation.quit_requested() {
            info!("Quit control pressed, shutting down");
            event_loop.exit();
            return;
        }

        let Some(renderer) = &self.renderer else {
            return;
        };
        let view_projection = match self.simulation.view_projection(renderer.aspect_ratio()) {
            Ok(m) => m,
            Err(e) => {
                warn!("Skipping frame, no valid camera: {e}");
                return;
            }
        };
        match renderer.render(&view_projection) {
            Ok(()) => {}
            Err(SurfaceError::Timeout) => warn!("Surface timeout, skipping frame"),
            Err(SurfaceError::Lost) => warn!("Surface lost, retrying next frame"),
            Err(SurfaceError::OutOfMemory) => {
                self.fail(event_loop, "Rendering", AppError::OutOfMemory);
                return;
            }
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.create_window(event_loop) {
            self.fail(event_loop, "Startup", e);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size.width, size.height);
                    info!("Window resized to {}x{}", size.width, size.height);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.keyboard.process_event(&event);
            }
            WindowEvent::Focused(false) => {
                self.keyboard.release_all();
            }
            WindowEvent::Focused(true) => {
                self.reload_config();
                self.reload_shaders();
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}

/// Open the window and run until exit.
#[instrument(skip_all)]
pub fn run(
    config: Config,
    config_dir: Option<PathBuf>,
    meshes: PlanetMeshes,
) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    let mut app = AppState::new(config, config_dir, meshes)?;
    event_loop.run_app(&mut app)?;
    info!("Event loop finished after {} ticks", app.simulation().ticks());
    app.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CameraMode, planet_params};

    fn meshes() -> PlanetMeshes {
        let mut config = Config::default();
        config.planet.resolution = 2;
        PlanetMeshes::build(&planet_params(&config.planet)).unwrap()
    }

    #[test]
    fn test_app_state_starts_without_window() {
        let state = AppState::new(Config::default(), None, meshes()).unwrap();
        assert!(state.window.is_none());
        assert!(state.renderer.is_none());
        assert_eq!(state.simulation().mode(), CameraMode::Ship);
        assert!(state.into_result().is_ok());
    }

    #[test]
    fn test_bad_binding_is_rejected() {
        let mut config = Config::default();
        config
            .input
            .bindings
            .insert("warp".to_string(), vec!["KeyW".to_string()]);
        assert!(matches!(
            AppState::new(config, None, meshes()),
            Err(AppError::Bindings(_))
        ));
    }

    #[test]
    fn test_reload_applies_changed_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        let mut state =
            AppState::new(config.clone(), Some(dir.path().to_path_buf()), meshes()).unwrap();

        let mut changed = config;
        changed.camera.fov_deg = 75.0;
        changed
            .input
            .bindings
            .insert("forward".to_string(), vec!["ArrowUp".to_string()]);
        changed.save(dir.path()).unwrap();
        state.reload_config();

        assert_eq!(state.simulation().projection().fov_deg, 75.0);
        assert_eq!(state.config, changed);
        assert_eq!(
            state.bindings.keys(planetfall_input::Control::Forward),
            &[winit::keyboard::KeyCode::ArrowUp]
        );
    }

    #[test]
    fn test_reload_ignores_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        let mut state =
            AppState::new(config.clone(), Some(dir.path().to_path_buf()), meshes()).unwrap();

        let mut broken = config.clone();
        broken.camera.fov_deg = 0.0;
        broken.save(dir.path()).unwrap();
        state.reload_config();
        assert_eq!(state.config, config);

        std::fs::write(dir.path().join(planetfall_config::CONFIG_FILE_NAME), "(((").unwrap();
        state.reload_config();
        assert_eq!(state.config, config);
        assert_eq!(state.simulation().projection().fov_deg, config.camera.fov_deg);
    }

    #[test]
    fn test_reload_without_config_dir_is_noop() {
        let mut state = AppState::new(Config::default(), None, meshes()).unwrap();
        state.reload_config();
        state.reload_shaders();
        assert_eq!(state.config, Config::default());
    }

    #[test]
    fn test_window_attributes_use_config_title() {
        let mut config = Config::default();
        config.window.title = "Test".to_string();
        let attrs = window_attributes_from_config(&config);
        assert_eq!(attrs.title, "Test");
    }
}
