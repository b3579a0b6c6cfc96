//! The simulation context owned by the frame loop.

use planetfall_config::{CameraConfig, Config, FlightConfig};
use planetfall_flight::{FlightParams, OrbitCamera, PlanetBody, PointOfView, Ship};
use planetfall_input::InputState;
use planetfall_math::{Mat4x4, MathError, Vector3};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMode {
    /// Piloted flight.
    Ship,
    /// Attract mode circling the planet.
    Orbit,
}

/// Perspective settings; the aspect ratio comes from the surface each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    pub fn matrix(&self, aspect: f32) -> Result<Mat4x4, MathError> {
        Mat4x4::projection(self.fov_deg, aspect, self.near, self.far)
    }
}

impl From<&CameraConfig> for Projection {
    fn from(camera: &CameraConfig) -> Self {
        Self {
            fov_deg: camera.fov_deg,
            near: camera.near,
            far: camera.far,
        }
    }
}

pub fn flight_params(flight: &FlightConfig) -> FlightParams {
    FlightParams {
        roll_acceleration: flight.roll_acceleration,
        pitch_acceleration: flight.pitch_acceleration,
        yaw_acceleration: flight.yaw_acceleration,
        forward_acceleration: flight.forward_acceleration,
        roll_damping: flight.roll_damping,
        pitch_damping: flight.pitch_damping,
        yaw_damping: flight.yaw_damping,
        forward_damping: flight.forward_damping,
        snap_threshold: flight.snap_threshold,
        turn_rate: flight.turn_rate,
        speed_scale: flight.speed_scale,
        min_altitude: flight.min_altitude,
    }
}

/// Everything that changes per tick: camera mode, ship, orbit camera, the
/// planet body used for altitude, and the quit request.
#[derive(Debug, Clone)]
pub struct Simulation {
    mode: CameraMode,
    ship: Ship,
    orbit: OrbitCamera,
    planet: PlanetBody,
    projection: Projection,
    ticks: u64,
    quit_requested: bool,
}

impl Simulation {
    /// The ship starts `start_distance` out along `+Z`, facing the planet.
    pub fn from_config(config: &Config) -> Result<Self, MathError> {
        let planet = PlanetBody::new(Vector3::ZERO, config.planet.radius);
        let distance = config.camera.start_distance;
        let pov = PointOfView::looking_at(
            Vector3::new(0.0, 0.0, distance),
            planet.center,
            Vector3::Y,
        )?;
        let ship = Ship::new(pov, flight_params(&config.flight));
        let orbit = OrbitCamera::new(planet.center, distance, config.camera.orbit_speed);
        // Fail early rather than on the first orbit frame.
        orbit.point_of_view()?;

        let mode = if config.camera.orbit_mode {
            CameraMode::Orbit
        } else {
            CameraMode::Ship
        };
        info!("Simulation started in {:?} mode at distance {:.1}", mode, distance);

        Ok(Self {
            mode,
            ship,
            orbit,
            planet,
            projection: Projection::from(&config.camera),
            ticks: 0,
            quit_requested: false,
        })
    }

    /// Advance one fixed step.
    pub fn update(&mut self, dt: f32, input: &InputState) {
        self.ticks += 1;
        if input.quit && !self.quit_requested {
            debug!("Quit requested at tick {}", self.ticks);
            self.quit_requested = true;
        }

        match self.mode {
            CameraMode::Ship => {
                if let Err(e) = self.ship.update(dt, input, &self.planet) {
                    warn!("Ship rotation degenerated, keeping last frame: {e}");
                }
            }
            CameraMode::Orbit => self.orbit.update(dt),
        }
    }

    /// The active camera frame.
    pub fn point_of_view(&self) -> Result<PointOfView, MathError> {
        match self.mode {
            CameraMode::Ship => Ok(*self.ship.pov()),
            CameraMode::Orbit => self.orbit.point_of_view(),
        }
    }

    /// `projection * camera_matrix` for a surface of the given aspect ratio.
    pub fn view_projection(&self, aspect: f32) -> Result<Mat4x4, MathError> {
        let projection = self.projection.matrix(aspect)?;
        Ok(projection * self.point_of_view()?.camera_matrix())
    }

    /// Take projection, handling and orbit speed from a re-read config.
    /// Pose, velocities and the planet itself stay as they are.
    pub fn apply_config(&mut self, config: &Config) {
        self.projection = Projection::from(&config.camera);
        self.ship.set_params(flight_params(&config.flight));
        self.orbit.angular_speed = config.camera.orbit_speed;
        debug!("Applied camera and flight settings");
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: CameraMode) {
        self.mode = mode;
    }

    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    pub fn planet(&self) -> &PlanetBody {
        &self.planet
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Altitude of the active camera above sea level.
    pub fn altitude(&self) -> Result<f32, MathError> {
        Ok(self.planet.altitude(self.point_of_view()?.position()))
    }
}
