//=========================================================================
// Standard States
//=========================================================================
//
// The stock screen set: main menu (default), gameplay, and credits.
//
//=========================================================================

pub mod credits;
pub mod main_game;
pub mod menu;

pub use credits::CreditsState;
pub use main_game::MainGameState;
pub use menu::MainMenuState;

use crate::core::StateDescriptor;

/// Logical name of the main menu state.
pub const MAIN_MENU: &str = "main_menu";

/// Logical name of the gameplay state.
pub const MAIN_GAME: &str = "main_game";

/// Logical name of the credits state.
pub const CREDITS: &str = "credits";

/// The stock descriptor list, with the main menu as the default state.
pub fn standard_states() -> Vec<StateDescriptor> {
    vec![
        StateDescriptor::new(MAIN_MENU, true, || Box::new(MainMenuState::new())),
        StateDescriptor::new(MAIN_GAME, false, || Box::new(MainGameState::new())),
        StateDescriptor::new(CREDITS, false, || Box::new(CreditsState::new())),
    ]
}

//=== Tests ===============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StateManager;

    #[test]
    fn standard_states_resolve_with_the_menu_as_default() {
        let descriptors = standard_states();
        let (_manager, default) = StateManager::from_descriptors(&descriptors).unwrap();
        assert_eq!(default, MAIN_MENU);
    }
}
