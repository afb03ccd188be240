//=========================================================================
// State Context
//=========================================================================
//
// The narrow view of the host handed to states during dispatch.
//
// Instead of a back-reference to the whole host object, states receive
// exactly what they may touch: the shared configuration (read-only),
// the event pump, the transition queue, and a quit-request handle.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::events::EventPump;
use crate::core::manager::{Transition, TransitionQueue};
use crate::game::GameConfig;

//=== StateContext ========================================================

/// Per-dispatch context passed to every [`State`] operation.
///
/// Stack changes requested here are queued, not applied immediately:
/// the host processes the queue at the step boundary, right after the
/// `update` that requested them. Requesting a pop therefore does not
/// invalidate `self` mid-call, but the state must not rely on being
/// dispatched again afterwards.
///
/// [`State`]: crate::core::State
pub struct StateContext<'a> {
    config: &'a GameConfig,
    events: &'a EventPump,
    transitions: &'a mut TransitionQueue,
    quit_requested: &'a mut bool,
}

impl<'a> StateContext<'a> {
    pub(crate) fn new(
        config: &'a GameConfig,
        events: &'a EventPump,
        transitions: &'a mut TransitionQueue,
        quit_requested: &'a mut bool,
    ) -> Self {
        Self {
            config,
            events,
            transitions,
            quit_requested,
        }
    }

    //--- Shared Configuration ---------------------------------------------

    /// Display resolution in pixels.
    pub fn resolution(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// The constant simulation step size in seconds.
    pub fn fixed_dt(&self) -> f64 {
        self.config.fixed_dt()
    }

    //--- Event Intake -----------------------------------------------------

    /// The pending-event pump for this step.
    ///
    /// Returned with the context's own lifetime, not the borrow of
    /// `self`, so a state can poll events and request transitions in
    /// the same loop.
    pub fn events(&self) -> &'a EventPump {
        self.events
    }

    //--- Stack Requests ---------------------------------------------------

    /// Queues a push of the named state on top of the caller.
    pub fn push(&mut self, name: &'static str) {
        self.transitions.push(Transition::Push(name));
    }

    /// Queues a pop of the current state.
    pub fn pop(&mut self) {
        self.transitions.push(Transition::Pop);
    }

    /// Requests program termination without unwinding the stack.
    pub fn request_quit(&mut self) {
        *self.quit_requested = true;
    }
}

//=== Tests ===============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::manager::Transition;

    #[test]
    fn context_exposes_host_configuration() {
        let config = GameConfig {
            width: 320,
            height: 200,
            tick_rate: 50.0,
        };
        let (_sender, pump) = EventPump::channel();
        let mut transitions = TransitionQueue::new();
        let mut quit = false;

        let ctx = StateContext::new(&config, &pump, &mut transitions, &mut quit);
        assert_eq!(ctx.resolution(), (320, 200));
        assert!((ctx.fixed_dt() - 0.02).abs() < 1e-12);
    }

    #[test]
    fn stack_requests_are_queued_in_order() {
        let config = GameConfig::default();
        let (_sender, pump) = EventPump::channel();
        let mut transitions = TransitionQueue::new();
        let mut quit = false;

        let mut ctx = StateContext::new(&config, &pump, &mut transitions, &mut quit);
        ctx.push("credits");
        ctx.pop();

        assert_eq!(
            transitions.take(),
            vec![Transition::Push("credits"), Transition::Pop]
        );
    }

    #[test]
    fn context_can_be_mutated_while_polling_events() {
        let config = GameConfig::default();
        let (sender, pump) = EventPump::channel();
        let mut transitions = TransitionQueue::new();
        let mut quit = false;

        sender.send(crate::core::Event::Quit).unwrap();
        sender
            .send(crate::core::Event::KeyDown(crate::core::Key::Escape))
            .unwrap();

        let mut ctx = StateContext::new(&config, &pump, &mut transitions, &mut quit);
        for event in ctx.events().poll() {
            match event {
                crate::core::Event::Quit => ctx.request_quit(),
                _ => ctx.pop(),
            }
        }

        assert!(quit);
        assert_eq!(transitions.take(), vec![Transition::Pop]);
    }

    #[test]
    fn request_quit_sets_the_host_flag() {
        let config = GameConfig::default();
        let (_sender, pump) = EventPump::channel();
        let mut transitions = TransitionQueue::new();
        let mut quit = false;

        let mut ctx = StateContext::new(&config, &pump, &mut transitions, &mut quit);
        ctx.request_quit();

        assert!(quit);
        assert!(transitions.is_empty());
    }
}
