//! Damped ship flight over a [`PointOfView`].
//!
//! Each control axis (roll, pitch, yaw, forward) has a scalar velocity in
//! `[-1, 1]`. Held input accelerates it linearly; released input lets it
//! decay geometrically each tick until it snaps to zero.

use planetfall_input::InputState;
use planetfall_math::{MathError, Vector3};

use crate::PointOfView;

/// Tuning for [`Ship`]. Damping factors are applied once per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightParams {
    pub roll_acceleration: f32,
    pub pitch_acceleration: f32,
    pub yaw_acceleration: f32,
    pub forward_acceleration: f32,
    pub roll_damping: f32,
    pub pitch_damping: f32,
    pub yaw_damping: f32,
    pub forward_damping: f32,
    /// Decaying velocities below this magnitude become exactly zero.
    pub snap_threshold: f32,
    /// Radians per second at full angular velocity.
    pub turn_rate: f32,
    /// Units per second per unit of altitude at full throttle.
    pub speed_scale: f32,
    /// Altitude floor for the speed calculation.
    pub min_altitude: f32,
}

impl Default for FlightParams {
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

/// Center and sea-level radius of the body the ship flies around.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetBody {
    pub center: Vector3,
    pub radius: f32,
}

impl PlanetBody {
    pub fn new(center: Vector3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Height of `position` above sea level; negative inside the planet.
    pub fn altitude(&self, position: Vector3) -> f32 {
        position.distance(self.center) - self.radius
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Velocities {
    pub roll: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub forward: f32,
}

impl Velocities {
    pub fn is_zero(&self) -> bool {
        self.roll == 0.0 && self.pitch == 0.0 && self.yaw == 0.0 && self.forward == 0.0
    }

    fn clamped(self) -> Self {
        Self {
            roll: self.roll.clamp(-1.0, 1.0),
            pitch: self.pitch.clamp(-1.0, 1.0),
            yaw: self.yaw.clamp(-1.0, 1.0),
            forward: self.forward.clamp(-1.0, 1.0),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Ship {
    pov: PointOfView,
    velocity: Velocities,
    params: FlightParams,
}

impl Ship {
    pub fn new(pov: PointOfView, params: FlightParams) -> Self {
        Self {
            pov,
            velocity: Velocities::default(),
            params,
        }
    }

    pub fn pov(&self) -> &PointOfView {
        &self.pov
    }

    pub fn pov_mut(&mut self) -> &mut PointOfView {
        &mut self.pov
    }

    pub fn params(&self) -> &FlightParams {
        &self.params
    }

    /// Swap in new handling; the pose and current velocities carry over.
    pub fn set_params(&mut self, params: FlightParams) {
        self.params = params;
    }

    pub fn velocities(&self) -> Velocities {
        self.velocity
    }

    /// Overwrite all velocities, clamped to `[-1, 1]`.
    pub fn set_velocities(&mut self, velocity: Velocities) {
        self.velocity = velocity.clamped();
    }

    /// Forward speed multiplier: altitude floored at `min_altitude`, times
    /// `speed_scale`. Slow near the ground, fast in open space.
    pub fn velocity_multiplier(&self, planet: &PlanetBody) -> f32 {
        planet
            .altitude(self.pov.position())
            .max(self.params.min_altitude)
            * self.params.speed_scale
    }

    /// Advance one fixed tick: integrate velocities from `input`, rotate the
    /// frame, then move forward.
    ///
    /// # Errors
    ///
    /// [`MathError::ZeroLength`] if a rotation degenerates; the frame keeps
    /// the last good orientation.
    pub fn update(
        &mut self,
        dt: f32,
        input: &InputState,
        planet: &PlanetBody,
    ) -> Result<(), MathError> {
        let p = self.params;
        let v = self.velocity;
        let axis = |v, positive, negative, acceleration, damping| {
            step_axis(v, positive, negative, acceleration, damping, p.snap_threshold, dt)
        };
        self.velocity = Velocities {
            roll: axis(v.roll, input.right, input.left, p.roll_acceleration, p.roll_damping),
            pitch: axis(
                v.pitch,
                input.pitch_up,
                input.pitch_down,
                p.pitch_acceleration,
                p.pitch_damping,
            ),
            yaw: axis(v.yaw, input.yaw_left, input.yaw_right, p.yaw_acceleration, p.yaw_damping),
            forward: axis(
                v.forward,
                input.forward,
                input.back,
                p.forward_acceleration,
                p.forward_damping,
            ),
        };

        let v = self.velocity;
        let turn = p.turn_rate * dt;
        if v.roll != 0.0 {
            self.pov.roll(v.roll * turn)?;
        }
        if v.pitch != 0.0 {
            self.pov.pitch(v.pitch * turn)?;
        }
        if v.yaw != 0.0 {
            self.pov.yaw(v.yaw * turn)?;
        }
        if v.forward != 0.0 {
            let speed = self.velocity_multiplier(planet);
            self.pov.move_by(v.forward * speed * dt);
        }
        Ok(())
    }
}

/// One axis: accelerate toward `positive`/`negative`, otherwise decay and snap.
/// Both or neither held counts as idle.
fn step_axis(
    v: f32,
    positive: bool,
    negative: bool,
    acceleration: f32,
    damping: f32,
    snap: f32,
    dt: f32,
) -> f32 {
    let next = match (positive, negative) {
        (true, false) => v + acceleration * dt,
        (false, true) => v - acceleration * dt,
        _ => {
            let decayed = v * damping;
            if decayed.abs() < snap { 0.0 } else { decayed }
        }
    };
    next.clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use planetfall_input::Control;

    const DT: f32 = 1.0 / 60.0;

    fn planet() -> PlanetBody {
        PlanetBody::new(Vector3::ZERO, 100.0)
    }

    fn ship_at(distance: f32) -> Ship {
        let pov = PointOfView::looking_at(Vector3::new(0.0, -distance, 0.0), Vector3::ZERO, Vector3::Z)
            .unwrap();
        Ship::new(pov, FlightParams::default())
    }

    #[test]
    fn test_idle_second_decays_everything_to_zero() {
        let mut ship = ship_at(300.0);
        ship.set_velocities(Velocities {
            roll: 1.0,
            pitch: -1.0,
            yaw: 1.0,
            forward: 1.0,
        });
        let idle = InputState::default();
        for _ in 0..60 {
            ship.update(DT, &idle, &planet()).unwrap();
        }
        assert!(ship.velocities().is_zero(), "not settled: {:?}", ship.velocities());
    }

    #[test]
    fn test_roll_decay_is_geometric_before_snap() {
        let mut ship = ship_at(300.0);
        ship.set_velocities(Velocities {
            roll: 1.0,
            ..Default::default()
        });
        let idle = InputState::default();
        for _ in 0..10 {
            ship.update(DT, &idle, &planet()).unwrap();
        }
        let expected = 0.95f32.powi(10);
        assert!((ship.velocities().roll - expected).abs() < 1e-5);
    }

    #[test]
    fn test_held_input_accelerates_and_clamps() {
        let mut ship = ship_at(300.0);
        let input = InputState::default().with(Control::Forward).with(Control::Left);
        ship.update(DT, &input, &planet()).unwrap();
        let v = ship.velocities();
        assert!((v.forward - DT).abs() < 1e-6);
        assert!((v.roll + 2.0 * DT).abs() < 1e-6);

        for _ in 0..600 {
            ship.update(DT, &input, &planet()).unwrap();
        }
        let v = ship.velocities();
        assert_eq!(v.forward, 1.0);
        assert_eq!(v.roll, -1.0);
    }

    #[test]
    fn test_opposing_inputs_count_as_idle() {
        let mut ship = ship_at(300.0);
        ship.set_velocities(Velocities {
            yaw: 0.5,
            ..Default::default()
        });
        let input = InputState::default().with(Control::YawLeft).with(Control::YawRight);
        ship.update(DT, &input, &planet()).unwrap();
        assert!((ship.velocities().yaw - 0.45).abs() < 1e-6);
    }

    #[test]
    fn test_velocity_multiplier_uses_altitude_floor() {
        let high = ship_at(400.0);
        assert!((high.velocity_multiplier(&planet()) - 300.0 * 0.5).abs() < 1e-3);
        let low = ship_at(102.0);
        assert!((low.velocity_multiplier(&planet()) - 10.0 * 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_forward_motion_scales_with_altitude() {
        let full = Velocities {
            forward: 1.0,
            ..Default::default()
        };
        let mut high = ship_at(400.0);
        high.set_velocities(full);
        let mut low = ship_at(150.0);
        low.set_velocities(full);
        let hold = InputState::default().with(Control::Forward);
        let start_high = high.pov().position();
        let start_low = low.pov().position();
        high.update(DT, &hold, &planet()).unwrap();
        low.update(DT, &hold, &planet()).unwrap();
        let moved_high = high.pov().position().distance(start_high);
        let moved_low = low.pov().position().distance(start_low);
        assert!((moved_high - 300.0 * 0.5 * DT).abs() < 1e-3);
        assert!((moved_low - 50.0 * 0.5 * DT).abs() < 1e-3);
        assert!(high.pov().position().y > start_high.y, "ship should approach the planet");
    }

    #[test]
    fn test_rotation_keeps_frame_orthonormal() {
        let mut ship = ship_at(300.0);
        let input = InputState::default()
            .with(Control::Right)
            .with(Control::PitchUp)
            .with(Control::YawLeft);
        for _ in 0..600 {
            ship.update(DT, &input, &planet()).unwrap();
        }
        assert!(ship.pov().orthonormality_error() < 1e-4);
    }

    #[test]
    fn test_set_velocities_clamps() {
        let mut ship = ship_at(300.0);
        ship.set_velocities(Velocities {
            roll: 5.0,
            pitch: -3.0,
            yaw: 0.2,
            forward: 1.5,
        });
        let v = ship.velocities();
        assert_eq!((v.roll, v.pitch, v.yaw, v.forward), (1.0, -1.0, 0.2, 1.0));
    }

    #[test]
    fn test_altitude() {
        let p = PlanetBody::new(Vector3::new(10.0, 0.0, 0.0), 5.0);
        assert!((p.altitude(Vector3::new(10.0, 0.0, 20.0)) - 15.0).abs() < 1e-5);
        assert!(p.altitude(Vector3::new(11.0, 0.0, 0.0)) < 0.0);
    }
}
