//=========================================================================
// Core Systems
//=========================================================================
//
// The loop/stack machinery of the runtime.
//
// Architecture:
//   Game (host)
//     ├─ StateManager     registry + stack of screen states
//     ├─ FixedTimestep    accumulator-based step bookkeeping
//     ├─ EventPump        non-blocking keyboard/quit event intake
//     └─ Surface          software display target
//
// Flow, per rendered frame:
//   accumulate(frame_time)
//     → [handle_events → update → apply transitions] × due steps
//     → render once
//
//=========================================================================

//=== Module Declarations =================================================

mod context;
mod events;
mod gfx;
mod manager;
mod state;
mod timestep;

//=== Public API ==========================================================

pub use context::StateContext;
pub use events::{Event, EventPump, Key};
pub use gfx::{Color, Surface};
pub use manager::{ConfigError, StateManager, TickControl, Transition, TransitionQueue};
pub use state::{State, StateDescriptor};
pub use timestep::FixedTimestep;
