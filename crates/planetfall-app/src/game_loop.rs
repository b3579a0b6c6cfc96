//! Fixed-timestep game loop ("Fix Your Timestep").
//!
//! Simulation advances in constant 60 Hz steps fed by an accumulator of real
//! frame time; rendering happens once per frame with the leftover fraction
//! as an interpolation alpha.

use std::time::Instant;

use tracing::warn;

/// Fixed simulation timestep: 60 Hz.
pub const FIXED_DT: f64 = 1.0 / 60.0;

/// Longest frame time fed into the accumulator. Anything slower is clamped
/// and the simulation runs slow instead of trying to catch up.
pub const MAX_FRAME_TIME: f64 = 0.25;

/// Source of monotonically increasing time in seconds.
pub trait Clock {
    fn seconds(&self) -> f64;
}

/// Wall-clock time since construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn seconds(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

pub struct GameLoop<C: Clock = MonotonicClock> {
    clock: C,
    previous_time: f64,
    accumulator: f64,
    total_sim_time: f64,
    frame_count: u64,
    update_count: u64,
}

impl GameLoop<MonotonicClock> {
    pub fn new() -> Self {
        Self::with_clock(MonotonicClock::new())
    }
}

impl Default for GameLoop<MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> GameLoop<C> {
    pub fn with_clock(clock: C) -> Self {
        let previous_time = clock.seconds();
        Self {
            clock,
            previous_time,
            accumulator: 0.0,
            total_sim_time: 0.0,
            frame_count: 0,
            update_count: 0,
        }
    }

    /// Runs one frame.
    ///
    /// - `update_fn(fixed_dt, total_sim_time)` runs zero or more times.
    /// - `render_fn(alpha)` runs exactly once with `alpha` in `[0, 1)`.
    pub fn tick(&mut self, mut update_fn: impl FnMut(f64, f64), mut render_fn: impl FnMut(f64)) {
        let now = self.clock.seconds();
        let mut frame_time = (now - self.previous_time).max(0.0);
        self.previous_time = now;

        if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            frame_time = MAX_FRAME_TIME;
        }

        self.accumulator += frame_time;

        while self.accumulator >= FIXED_DT {
            update_fn(FIXED_DT, self.total_sim_time);
            self.total_sim_time += FIXED_DT;
            self.accumulator -= FIXED_DT;
            self.update_count += 1;
        }

        render_fn(self.alpha());
        self.frame_count += 1;
    }

    /// Leftover accumulator as a fraction of one step.
    pub fn alpha(&self) -> f64 {
        if self.accumulator > 0.0 {
            self.accumulator / FIXED_DT
        } else {
            0.0
        }
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    pub fn total_sim_time(&self) -> f64 {
        self.total_sim_time
    }
}
