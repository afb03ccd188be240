//=========================================================================
// Fixed Timestep
//=========================================================================
//
// Accumulator bookkeeping for the driver loop.
//
// Wall-clock frame durations are fed in once per rendered frame; the
// accumulator is then drained in constant-size simulation steps. The
// number of steps per frame depends only on accumulated wall time,
// never on render cost, which keeps simulation advancement independent
// of display frame rate.
//
// Catch-up is uncapped: after a long stall the loop runs as many steps
// as the backlog requires before the next render.
//
//=========================================================================

//=== FixedTimestep =======================================================

/// Tracks the simulation clock and the unconsumed wall-time backlog.
///
/// The driver calls [`accumulate`] once per frame, then alternates
/// [`step_ready`] / [`complete_step`] until the backlog drops below one
/// step. `sim_time` is the cumulative simulated time, monotonic from
/// zero at program start; an update dispatched during a step observes
/// the value from *before* that step completes.
///
/// [`accumulate`]: FixedTimestep::accumulate
/// [`step_ready`]: FixedTimestep::step_ready
/// [`complete_step`]: FixedTimestep::complete_step
#[derive(Debug, Clone, Copy)]
pub struct FixedTimestep {
    fixed_dt: f64,
    accumulator: f64,
    sim_time: f64,
}

impl FixedTimestep {
    /// Creates a timestep with the given step size in seconds.
    ///
    /// # Panics
    ///
    /// Panics if `fixed_dt` is not positive.
    pub fn new(fixed_dt: f64) -> Self {
        assert!(fixed_dt > 0.0, "fixed_dt must be positive, got {}", fixed_dt);
        Self {
            fixed_dt,
            accumulator: 0.0,
            sim_time: 0.0,
        }
    }

    pub fn fixed_dt(&self) -> f64 {
        self.fixed_dt
    }

    /// Wall time carried over but not yet consumed by steps.
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    /// Cumulative simulated time.
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    /// Adds one frame's worth of measured wall time to the backlog.
    pub fn accumulate(&mut self, frame_time: f64) {
        self.accumulator += frame_time;
    }

    /// True while at least one full step's worth of time is pending.
    pub fn step_ready(&self) -> bool {
        self.accumulator >= self.fixed_dt
    }

    /// Consumes one step from the backlog and advances the simulation
    /// clock. Call only after `step_ready` returned true.
    pub fn complete_step(&mut self) {
        self.accumulator -= self.fixed_dt;
        self.sim_time += self.fixed_dt;
    }
}

//=== Tests ===============================================================
