//=========================================================================
// State Contract
//=========================================================================
//
// The interface every screen-like unit implements, plus the static
// descriptor the registry resolves at start-up.
//
// A state instance is constructed once and lives for the whole run,
// but may be activated (pushed) and deactivated (popped) many times.
// Anything per-session — scores, cursor positions, render targets —
// is set up in `enter` and torn down in `exit`, never in the
// constructor.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::context::StateContext;
use crate::core::gfx::Surface;

//=== State Trait =========================================================

/// One screen of the program: menu, gameplay, credits.
///
/// All five operations default to safe no-ops, so the bare contract is
/// itself a valid (inert) state; concrete screens override what they
/// need.
///
/// Dispatch order per simulation step is `handle_events` then `update`;
/// `render` runs once per displayed frame after all due steps. A state
/// that requests a pop must not assume it receives further calls until
/// it is pushed again.
pub trait State {
    /// Drains pending input events for this step. Never blocks.
    fn handle_events(&mut self, _ctx: &mut StateContext<'_>) {}

    /// Advances internal state by exactly one fixed step.
    ///
    /// `sim_time` is the cumulative simulated time so far (monotonic,
    /// zero at program start); `fixed_dt` is the constant step size.
    fn update(&mut self, _ctx: &mut StateContext<'_>, _sim_time: f64, _fixed_dt: f64) {}

    /// Draws one complete frame onto the state's own target and
    /// composites it onto `display`.
    ///
    /// The target must be fully drawn each call — the host presents
    /// whatever is produced and never clears on the state's behalf.
    /// Must not mutate simulation state.
    fn render(&mut self, _display: &mut Surface) {}

    /// Activation hook: allocate per-session resources and reset
    /// per-session variables. Called exactly once per push, before any
    /// other method of that activation.
    fn enter(&mut self, _ctx: &mut StateContext<'_>) {}

    /// Deactivation hook: release what `enter` allocated. Called
    /// exactly once per pop.
    fn exit(&mut self, _ctx: &mut StateContext<'_>) {}
}

//=== StateDescriptor =====================================================

/// Declarative start-up record for one state.
///
/// The descriptor list is the program's whole state configuration: a
/// unique logical name, a factory producing the implementation, and a
/// flag marking the bootstrap state. Exactly one descriptor per
/// configuration must be the default.
pub struct StateDescriptor {
    name: &'static str,
    default: bool,
    build: Box<dyn Fn() -> Box<dyn State>>,
}

impl StateDescriptor {
    pub fn new(
        name: &'static str,
        default: bool,
        build: impl Fn() -> Box<dyn State> + 'static,
    ) -> Self {
        Self {
            name,
            default,
            build: Box::new(build),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_default(&self) -> bool {
        self.default
    }

    pub(crate) fn instantiate(&self) -> Box<dyn State> {
        (self.build)()
    }
}

impl std::fmt::Debug for StateDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateDescriptor")
            .field("name", &self.name)
            .field("default", &self.default)
            .finish()
    }
}

//=== Tests ===============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::events::EventPump;
    use crate::core::manager::TransitionQueue;
    use crate::GameConfig;

    // The bare contract is a valid inert state.
    struct Inert;
    impl State for Inert {}

    #[test]
    fn default_operations_are_safe_noops() {
        let config = GameConfig::default();
        let (_sender, pump) = EventPump::channel();
        let mut transitions = TransitionQueue::new();
        let mut quit = false;
        let mut ctx = StateContext::new(&config, &pump, &mut transitions, &mut quit);

        let mut state = Inert;
        state.enter(&mut ctx);
        state.handle_events(&mut ctx);
        state.update(&mut ctx, 0.0, 1.0 / 60.0);
        state.exit(&mut ctx);

        let mut display = Surface::new(8, 8);
        state.render(&mut display);

        assert!(!quit);
        assert!(transitions.is_empty());
    }

    #[test]
    fn descriptor_reports_name_and_default_flag() {
        let descriptor = StateDescriptor::new("menu", true, || Box::new(Inert));
        assert_eq!(descriptor.name(), "menu");
        assert!(descriptor.is_default());
    }

    #[test]
    fn descriptor_factory_builds_fresh_instances() {
        use std::cell::Cell;
        use std::rc::Rc;

        let built = Rc::new(Cell::new(0u32));
        let counter = Rc::clone(&built);
        let descriptor = StateDescriptor::new("menu", true, move || {
            counter.set(counter.get() + 1);
            Box::new(Inert)
        });

        assert_eq!(built.get(), 0);
        let _state = descriptor.instantiate();
        let _state = descriptor.instantiate();
        assert_eq!(built.get(), 2);
    }
}
