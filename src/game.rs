//=========================================================================
// Game Host
//=========================================================================
//
// Owns everything: configuration, the state manager, the fixed-timestep
// clock, the display surface, the event channel, and the running flag.
//
// The per-frame contract lives in `Game::frame`: accumulate the
// measured frame time, drain it in fixed steps (events then update per
// step, transitions applied at the step boundary), then render once.
// `run` drives frames headlessly with its own pacing; `run_windowed`
// hands the frame callback to the platform layer.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::{Duration, Instant};

use crossbeam_channel::Sender;
use log::info;

//=== Internal Dependencies ===============================================

use crate::core::{
    ConfigError, Event, EventPump, FixedTimestep, StateContext, StateDescriptor, StateManager,
    Surface, TickControl, TransitionQueue,
};

//=== GameConfig ==========================================================

/// Shared host configuration, fixed for the lifetime of the program.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    /// Display width in pixels.
    pub width: u32,

    /// Display height in pixels.
    pub height: u32,

    /// Simulation steps per second.
    pub tick_rate: f64,
}

impl GameConfig {
    /// The constant simulation step size, `1.0 / tick_rate`.
    pub fn fixed_dt(&self) -> f64 {
        1.0 / self.tick_rate
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            tick_rate: 60.0,
        }
    }
}

//=== GameBuilder =========================================================

/// Configures and bootstraps a [`Game`].
///
/// # Examples
///
/// ```no_run
/// use volley::{states, GameBuilder};
///
/// let game = GameBuilder::new()
///     .with_resolution(1024, 768)
///     .with_tick_rate(60.0)
///     .build(states::standard_states())
///     .expect("state configuration is valid");
/// game.run();
/// ```
#[derive(Debug, Default)]
pub struct GameBuilder {
    config: GameConfig,
}

impl GameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the display resolution in pixels.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        assert!(
            width > 0 && height > 0,
            "resolution dimensions must be non-zero, got {}x{}",
            width,
            height
        );
        self.config.width = width;
        self.config.height = height;
        self
    }

    /// Sets the number of simulation steps per second.
    ///
    /// # Panics
    ///
    /// Panics if `tick_rate` is not positive.
    pub fn with_tick_rate(mut self, tick_rate: f64) -> Self {
        assert!(
            tick_rate > 0.0,
            "tick_rate must be positive, got {}",
            tick_rate
        );
        self.config.tick_rate = tick_rate;
        self
    }

    /// Resolves the descriptor list and pushes the default state.
    ///
    /// Fails with a named diagnostic on a duplicate name, a missing
    /// default, or more than one default — before any state is
    /// constructed.
    pub fn build(self, descriptors: Vec<StateDescriptor>) -> Result<Game, ConfigError> {
        let (mut manager, default) = StateManager::from_descriptors(&descriptors)?;

        let (event_sender, events) = EventPump::channel();
        let mut transitions = TransitionQueue::new();
        let mut quit_requested = false;

        // Initial push runs the default state's enter hook with a live
        // context, same as any runtime push.
        let mut ctx = StateContext::new(&self.config, &events, &mut transitions, &mut quit_requested);
        manager.push(default, &mut ctx);

        info!(
            "host configured: {}x{} at {} steps/sec, starting state '{}'",
            self.config.width, self.config.height, self.config.tick_rate, default
        );

        let display = Surface::new(self.config.width, self.config.height);
        let timestep = FixedTimestep::new(self.config.fixed_dt());

        Ok(Game {
            config: self.config,
            manager,
            timestep,
            display,
            events,
            event_sender,
            transitions,
            quit_requested,
            running: true,
        })
    }
}

//=== Game ================================================================

/// The program host.
///
/// Single-threaded: event intake, simulation, and rendering all happen
/// on the thread that calls [`frame`], in a strict order within each
/// frame.
///
/// [`frame`]: Game::frame
pub struct Game {
    config: GameConfig,
    manager: StateManager,
    timestep: FixedTimestep,
    display: Surface,
    events: EventPump,
    event_sender: Sender<Event>,
    transitions: TransitionQueue,
    quit_requested: bool,
    running: bool,
}

impl Game {
    //--- Accessors --------------------------------------------------------

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// False once the stack has emptied or a quit was requested; the
    /// driver stops iterating and the program winds down.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Name of the state currently on top of the stack.
    pub fn current_state(&self) -> Option<&'static str> {
        self.manager.current_name()
    }

    /// The composited output of the last rendered frame.
    pub fn display(&self) -> &Surface {
        &self.display
    }

    /// Sender half of the input channel, for the platform layer.
    pub fn event_sender(&self) -> Sender<Event> {
        self.event_sender.clone()
    }

    //--- Frame Driver -----------------------------------------------------

    /// Runs one outer loop iteration given the measured duration of the
    /// previous frame, in seconds.
    ///
    /// Drains the accumulated backlog in fixed steps (zero steps is a
    /// valid outcome on a fast frame), then renders exactly once if the
    /// program is still running. A stack that empties mid-drain stops
    /// the drain and skips the render.
    pub fn frame(&mut self, frame_time: f64) {
        if !self.running {
            return;
        }

        self.timestep.accumulate(frame_time);

        while self.running && self.timestep.step_ready() {
            let sim_time = self.timestep.sim_time();
            let fixed_dt = self.timestep.fixed_dt();

            {
                let mut ctx = StateContext::new(
                    &self.config,
                    &self.events,
                    &mut self.transitions,
                    &mut self.quit_requested,
                );
                self.manager.handle_events(&mut ctx);
                self.manager.update(&mut ctx, sim_time, fixed_dt);
            }

            if !self.transitions.is_empty() {
                let pending = self.transitions.take();
                let mut ctx = StateContext::new(
                    &self.config,
                    &self.events,
                    &mut self.transitions,
                    &mut self.quit_requested,
                );
                if let TickControl::Exit = self.manager.apply_transitions(pending, &mut ctx) {
                    info!("state stack emptied, shutting down");
                    self.running = false;
                }
            }

            if self.quit_requested {
                info!("quit requested, shutting down");
                self.running = false;
            }

            self.timestep.complete_step();
        }

        if self.running {
            self.manager.render(&mut self.display);
        }
    }

    /// Drives frames headlessly until the running flag clears.
    ///
    /// Sleeps out the remainder of each step period so wall time and
    /// simulated time stay roughly in lockstep. Useful for tests and
    /// for running the simulation without a window.
    pub fn run(mut self) {
        let period = Duration::from_secs_f64(self.config.fixed_dt());
        let mut previous = Instant::now();

        while self.running {
            let now = Instant::now();
            let frame_time = now.duration_since(previous).as_secs_f64();
            previous = now;

            self.frame(frame_time);

            if let Some(remaining) = period.checked_sub(previous.elapsed()) {
                std::thread::sleep(remaining);
            }
        }
    }

    /// Opens a window and drives frames from the platform event loop.
    pub fn run_windowed(self) -> Result<(), crate::PlatformError> {
        crate::platform::run(self)
    }

    //--- Test Support -----------------------------------------------------

    #[cfg(test)]
    pub(crate) fn timestep(&self) -> &FixedTimestep {
        &self.timestep
    }
}

//=== Tests ===============================================================
