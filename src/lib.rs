//=========================================================================
// Volley — Library Root
//
// This crate defines the runtime skeleton of a Pong remake: a
// fixed-timestep simulation loop coupled to a stack of screen states
// (menu, gameplay, credits).
//
// Responsibilities:
// - Expose the host facade (`Game` / `GameBuilder`)
// - Expose the core building blocks (state contract, stack manager,
//   timestep driver, event pump, software surfaces)
// - Keep the OS-facing window layer (`platform`) hidden from end users
//
// Typical usage:
// ```no_run
// use volley::{GameBuilder, states};
//
// let game = GameBuilder::new()
//     .build(states::standard_states())
//     .expect("state configuration");
// game.run_windowed().expect("window");
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the loop/stack machinery every screen builds on.
// `states` contains the concrete screens (menu, credits, main game) and
// the standard descriptor list that wires them together.
//
pub mod core;
pub mod states;

//--- Internal Modules ----------------------------------------------------
//
// `platform` holds the winit window, keyboard mapping, and framebuffer
// presentation. It is not part of the public API surface.
//
// `game` defines the host object and the outer frame loop.
//
mod game;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use game::{Game, GameBuilder, GameConfig};
pub use platform::PlatformError;
