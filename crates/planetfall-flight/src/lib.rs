//! Camera frames and flight: an orthonormal [`PointOfView`], the damped
//! [`Ship`] controller that steers it, and an [`OrbitCamera`] attract mode.

mod orbit;
mod point_of_view;
mod ship;

pub use orbit::OrbitCamera;
pub use point_of_view::PointOfView;
pub use ship::{FlightParams, PlanetBody, Ship, Velocities};
