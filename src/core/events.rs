//=========================================================================
// Event Pump
//=========================================================================
//
// Keyboard and quit events for the screen states.
//
// The platform layer pushes events into a channel; the current state
// drains the pump once per simulation step. Polling is non-blocking —
// an empty queue yields an empty iterator, never a wait.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{unbounded, Receiver, Sender};

//=== Key =================================================================

/// Keys the game reacts to.
///
/// This is deliberately the small vocabulary the screens use: menu
/// navigation, paddle controls, and the escape/quit keys. Unmapped OS
/// keys are dropped at the platform boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Space,
    Escape,
    /// Player one paddle up.
    A,
    /// Player one paddle down.
    Z,
    /// Player two paddle up.
    L,
    /// Player two paddle down.
    Comma,
}

//=== Event ===============================================================

/// Events delivered to the current state's event pump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    KeyDown(Key),
    KeyUp(Key),

    /// The user asked to close the program (window close button or an
    /// in-game action that posts a quit). States decide what to do with
    /// it; the base contract ignores it.
    Quit,
}

//=== EventPump ===========================================================

/// Receiving side of the platform → game event channel.
///
/// Owned by the host and lent to states through [`StateContext`]. A
/// state drains all pending events each step with [`EventPump::poll`];
/// whatever it leaves behind is seen by the next poll, not discarded.
///
/// [`StateContext`]: crate::core::StateContext
pub struct EventPump {
    receiver: Receiver<Event>,
}

impl EventPump {
    /// Creates a connected sender/pump pair.
    ///
    /// The sender side goes to the platform layer (and can be cloned
    /// for tests); the pump side stays with the host.
    pub fn channel() -> (Sender<Event>, EventPump) {
        let (sender, receiver) = unbounded();
        (sender, EventPump { receiver })
    }

    /// Drains currently queued events without blocking.
    pub fn poll(&self) -> impl Iterator<Item = Event> + '_ {
        self.receiver.try_iter()
    }
}

//=== Tests ===============================================================
