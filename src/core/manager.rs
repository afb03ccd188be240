//=========================================================================
// State Manager
//=========================================================================
//
// Registry, stack, and lifecycle marshalling for the screen states.
//
// States are instantiated once from the descriptor list and stored in
// a map by logical name; the stack holds names and the tail name is
// the single current state. Pushing calls `enter` after appending,
// popping calls `exit` before removing, and popping the last element
// is the program's normal termination path.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use crate::core::context::StateContext;
use crate::core::gfx::Surface;
use crate::core::state::{State, StateDescriptor};

//=== Transition ==========================================================

/// A stack change requested by a state.
///
/// Push and pop are the only way control transfers between states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Layer the named state on top of the current one.
    Push(&'static str),

    /// Remove the current state, resuming whatever is beneath it.
    Pop,
}

//=== TransitionQueue =====================================================

/// Queue of stack changes, applied at the step boundary.
///
/// States request transitions through [`StateContext`] during
/// `handle_events`/`update`; the host drains the queue immediately
/// after the update that filled it.
#[derive(Debug, Default)]
pub struct TransitionQueue {
    queue: Vec<Transition>,
}

impl TransitionQueue {
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    pub fn push(&mut self, transition: Transition) {
        self.queue.push(transition);
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Takes all queued transitions, leaving the queue empty.
    pub fn take(&mut self) -> Vec<Transition> {
        std::mem::take(&mut self.queue)
    }
}

//=== TickControl =========================================================

/// Control flow signalled back to the driver after transitions apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,

    /// The stack is empty; the host must clear its running flag.
    Exit,
}

//=== ConfigError =========================================================

/// Fatal start-up misconfiguration of the descriptor list.
///
/// Detected before any state is constructed or pushed; the program
/// aborts with a diagnostic naming the offending descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Two descriptors share a logical name.
    DuplicateState { name: &'static str },

    /// No descriptor is marked default, so there is no starting state.
    NoDefaultState,

    /// More than one descriptor is marked default.
    MultipleDefaultStates {
        first: &'static str,
        second: &'static str,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateState { name } => {
                write!(f, "state '{}' is declared more than once", name)
            }
            Self::NoDefaultState => {
                write!(f, "no state is marked as the default starting state")
            }
            Self::MultipleDefaultStates { first, second } => {
                write!(
                    f,
                    "states '{}' and '{}' are both marked default; exactly one must be",
                    first, second
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

//=== StateManager ========================================================

/// Owns the state instances and the activation stack.
///
/// The registry (name → instance mapping) is immutable in shape after
/// construction: no state types are added or removed at runtime. The
/// same instance may be pushed and popped many times; it keeps its
/// identity between activations and resets itself in `enter`.
pub struct StateManager {
    states: HashMap<&'static str, Box<dyn State>>,
    stack: Vec<&'static str>,
}

impl StateManager {
    //--- Construction -----------------------------------------------------

    /// Resolves the descriptor list into live instances.
    ///
    /// Validates the whole list — unique names, exactly one default —
    /// before constructing anything, then instantiates each state once.
    /// Returns the manager and the name of the default state; the host
    /// performs the initial push so `enter` runs with a real context.
    pub fn from_descriptors(
        descriptors: &[StateDescriptor],
    ) -> Result<(Self, &'static str), ConfigError> {
        let mut default = None;
        let mut seen: Vec<&'static str> = Vec::with_capacity(descriptors.len());

        for descriptor in descriptors {
            if seen.contains(&descriptor.name()) {
                return Err(ConfigError::DuplicateState {
                    name: descriptor.name(),
                });
            }
            seen.push(descriptor.name());

            if descriptor.is_default() {
                if let Some(first) = default {
                    return Err(ConfigError::MultipleDefaultStates {
                        first,
                        second: descriptor.name(),
                    });
                }
                default = Some(descriptor.name());
            }
        }

        let default = default.ok_or(ConfigError::NoDefaultState)?;

        let mut states = HashMap::with_capacity(descriptors.len());
        for descriptor in descriptors {
            debug!("instantiating state '{}'", descriptor.name());
            states.insert(descriptor.name(), descriptor.instantiate());
        }

        Ok((
            Self {
                states,
                stack: Vec::new(),
            },
            default,
        ))
    }

    //--- Introspection ----------------------------------------------------

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Name of the current (tail) state, if any.
    pub fn current_name(&self) -> Option<&'static str> {
        self.stack.last().copied()
    }

    fn current_state(&mut self) -> Option<&mut Box<dyn State>> {
        let name = self.stack.last()?;
        self.states.get_mut(name)
    }

    //--- Dispatch ---------------------------------------------------------
    //
    // Only the tail state receives dispatch. The driver checks the
    // running flag before calling in, so an empty stack is never
    // reached on the normal path; the early returns keep an eventual
    // misuse inert rather than turning it into a crash with no
    // diagnostic.
    //

    pub fn handle_events(&mut self, ctx: &mut StateContext<'_>) {
        if let Some(state) = self.current_state() {
            state.handle_events(ctx);
        }
    }

    pub fn update(&mut self, ctx: &mut StateContext<'_>, sim_time: f64, fixed_dt: f64) {
        if let Some(state) = self.current_state() {
            state.update(ctx, sim_time, fixed_dt);
        }
    }

    pub fn render(&mut self, display: &mut Surface) {
        if let Some(state) = self.current_state() {
            state.render(display);
        }
    }

    //--- Stack Operations -------------------------------------------------

    /// Appends the named state to the tail and runs its `enter` hook.
    ///
    /// Pushing an unregistered name, or a state already on the stack,
    /// is logged and skipped — a state cannot be active twice at once
    /// without breaking enter/exit pairing.
    pub fn push(&mut self, name: &'static str, ctx: &mut StateContext<'_>) {
        if self.stack.contains(&name) {
            warn!("state '{}' is already on the stack, skipping push", name);
            return;
        }

        let Some(state) = self.states.get_mut(name) else {
            warn!("attempted to push unregistered state '{}'", name);
            return;
        };

        debug!("pushing state '{}'", name);
        self.stack.push(name);
        state.enter(ctx);
    }

    /// Runs the tail state's `exit` hook and removes it.
    ///
    /// Returns [`TickControl::Exit`] when the stack empties — the sole
    /// normal-path termination trigger; the host clears its running
    /// flag in response.
    pub fn pop(&mut self, ctx: &mut StateContext<'_>) -> TickControl {
        let Some(name) = self.stack.last().copied() else {
            warn!("pop on an empty state stack ignored");
            return TickControl::Exit;
        };

        debug!("popping state '{}'", name);
        if let Some(state) = self.states.get_mut(&name) {
            state.exit(ctx);
        }
        self.stack.pop();

        if self.stack.is_empty() {
            TickControl::Exit
        } else {
            TickControl::Continue
        }
    }

    /// Applies a drained batch of transitions in request order.
    ///
    /// Stops at the transition that empties the stack; anything queued
    /// after it is dropped, since recovery by pushing onto an empty
    /// stack is not supported.
    pub fn apply_transitions(
        &mut self,
        pending: Vec<Transition>,
        ctx: &mut StateContext<'_>,
    ) -> TickControl {
        for transition in pending {
            match transition {
                Transition::Push(name) => self.push(name, ctx),
                Transition::Pop => {
                    if let TickControl::Exit = self.pop(ctx) {
                        return TickControl::Exit;
                    }
                }
            }
        }
        TickControl::Continue
    }
}

//=== Tests ===============================================================
