//=========================================================================
// Main Menu State
//=========================================================================
//
// The default state: a vertical list of entries driven by the arrow
// keys, with a pulsing highlight on the selected entry. Selecting an
// entry layers the corresponding state on top of the menu (or quits),
// so the menu is waiting underneath when that state pops.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use log::{info, warn};

use crate::core::{Color, Event, Key, State, StateContext, Surface};
use crate::states::{CREDITS, MAIN_GAME};

//--- Layout Constants ----------------------------------------------------

// Seconds between accepted cursor moves while a key is held.
const MOVE_THROTTLE: f64 = 0.125;

// Pulse phase advances at this rate in radians per simulated second.
const PULSE_RATE: f64 = 2.0;

const ENTRY_BASE_SIZE: u32 = 20;
const ENTRY_SELECTED_SIZE: f64 = 25.0;
const ENTRY_PULSE_AMPLITUDE: f64 = 5.0;
const GLYPH_WIDTH: u32 = 12;

const TITLE_COLOR: Color = Color::new(235, 235, 235);

//=== Menu Entries ========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    StartOnePlayer,
    StartTwoPlayer,
    Options,
    Credits,
    Quit,
}

struct MenuEntry {
    label: &'static str,
    y_offset: i32,
    color: Color,
    action: MenuAction,
}

fn standard_entries() -> Vec<MenuEntry> {
    vec![
        MenuEntry {
            label: "One Player",
            y_offset: 0,
            color: Color::WHITE,
            action: MenuAction::StartOnePlayer,
        },
        MenuEntry {
            label: "Two Player",
            y_offset: 50,
            color: Color::WHITE,
            action: MenuAction::StartTwoPlayer,
        },
        MenuEntry {
            label: "Options",
            y_offset: 100,
            color: Color::new(128, 128, 128),
            action: MenuAction::Options,
        },
        MenuEntry {
            label: "Credits",
            y_offset: 150,
            color: Color::WHITE,
            action: MenuAction::Credits,
        },
        MenuEntry {
            label: "Quit",
            y_offset: 225,
            color: Color::new(200, 80, 80),
            action: MenuAction::Quit,
        },
    ]
}

//=== MainMenuState =======================================================

/// The entry screen of the program.
pub struct MainMenuState {
    entries: Vec<MenuEntry>,
    cursor: usize,
    last_move: f64,
    pulse: f64,
    move_up: bool,
    move_down: bool,
    select: bool,
    canvas: Option<Surface>,
}

impl MainMenuState {
    pub fn new() -> Self {
        Self {
            entries: standard_entries(),
            cursor: 0,
            last_move: 0.0,
            pulse: 0.0,
            move_up: false,
            move_down: false,
            select: false,
            canvas: None,
        }
    }

    fn activate(&mut self, ctx: &mut StateContext<'_>) {
        match self.entries[self.cursor].action {
            MenuAction::StartOnePlayer | MenuAction::StartTwoPlayer => {
                info!("menu: starting game ({})", self.entries[self.cursor].label);
                ctx.push(MAIN_GAME);
            }
            MenuAction::Options => {
                warn!("menu: options screen is not available");
            }
            MenuAction::Credits => {
                info!("menu: showing credits");
                ctx.push(CREDITS);
            }
            MenuAction::Quit => {
                info!("menu: quit selected");
                ctx.request_quit();
            }
        }
    }
}

impl Default for MainMenuState {
    fn default() -> Self {
        Self::new()
    }
}

impl State for MainMenuState {
    fn handle_events(&mut self, ctx: &mut StateContext<'_>) {
        for event in ctx.events().poll() {
            match event {
                Event::KeyDown(Key::Up) => self.move_up = true,
                Event::KeyDown(Key::Down) => self.move_down = true,
                Event::KeyDown(Key::Space) => self.select = true,
                Event::Quit => ctx.request_quit(),
                _ => {}
            }
        }
    }

    fn update(&mut self, ctx: &mut StateContext<'_>, sim_time: f64, fixed_dt: f64) {
        self.pulse += PULSE_RATE * fixed_dt;

        // Cursor moves are throttled so a held key walks the list at a
        // readable pace instead of one entry per step.
        if (self.move_up || self.move_down) && sim_time - self.last_move >= MOVE_THROTTLE {
            if self.move_up && self.cursor > 0 {
                self.cursor -= 1;
            } else if self.move_down && self.cursor + 1 < self.entries.len() {
                self.cursor += 1;
            }
            self.last_move = sim_time;
        }
        self.move_up = false;
        self.move_down = false;

        if self.select {
            self.select = false;
            self.activate(ctx);
        }
    }

    fn render(&mut self, display: &mut Surface) {
        let Some(canvas) = self.canvas.as_mut() else {
            return;
        };

        canvas.fill(Color::BLACK);

        let width = canvas.width();
        let height = canvas.height();

        // Title band across the upper quarter.
        let title_w = width / 2;
        canvas.fill_rect(
            (width / 2 - title_w / 2) as i32,
            (height / 8) as i32,
            title_w,
            60,
            TITLE_COLOR,
        );

        let list_top = (height / 2) as i32 - 40;
        for (index, entry) in self.entries.iter().enumerate() {
            let size = if index == self.cursor {
                (ENTRY_SELECTED_SIZE + ENTRY_PULSE_AMPLITUDE * self.pulse.sin()).round() as u32
            } else {
                ENTRY_BASE_SIZE
            };
            let bar_w = entry.label.len() as u32 * GLYPH_WIDTH * size / ENTRY_BASE_SIZE;
            canvas.fill_rect(
                (width / 2) as i32 - (bar_w / 2) as i32,
                list_top + entry.y_offset - (size / 2) as i32,
                bar_w,
                size,
                entry.color,
            );
        }

        display.blit(canvas, 0, 0);
    }

    fn enter(&mut self, ctx: &mut StateContext<'_>) {
        let (width, height) = ctx.resolution();
        self.cursor = 0;
        self.pulse = 0.0;
        self.last_move = -MOVE_THROTTLE;
        self.move_up = false;
        self.move_down = false;
        self.select = false;
        self.canvas = Some(Surface::new(width, height));
    }

    fn exit(&mut self, _ctx: &mut StateContext<'_>) {
        self.canvas = None;
    }
}

//=== Tests ===============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EventPump, Transition, TransitionQueue};
    use crate::GameConfig;
    use crossbeam_channel::Sender;

    const DT: f64 = 1.0 / 60.0;

    struct Fixture {
        config: GameConfig,
        pump: EventPump,
        sender: Sender<Event>,
        transitions: TransitionQueue,
        quit: bool,
    }

    impl Fixture {
        fn new() -> Self {
            let (sender, pump) = EventPump::channel();
            Self {
                config: GameConfig::default(),
                pump,
                sender,
                transitions: TransitionQueue::new(),
                quit: false,
            }
        }

        fn ctx(&mut self) -> StateContext<'_> {
            StateContext::new(
                &self.config,
                &self.pump,
                &mut self.transitions,
                &mut self.quit,
            )
        }

        // One full simulation step: key press, events, update.
        fn step(&mut self, menu: &mut MainMenuState, key: Option<Key>, sim_time: f64) {
            if let Some(key) = key {
                self.sender.send(Event::KeyDown(key)).unwrap();
            }
            let mut ctx = self.ctx();
            menu.handle_events(&mut ctx);
            menu.update(&mut ctx, sim_time, DT);
        }
    }

    fn entered_menu(fixture: &mut Fixture) -> MainMenuState {
        let mut menu = MainMenuState::new();
        menu.enter(&mut fixture.ctx());
        menu
    }

    #[test]
    fn cursor_starts_on_the_first_entry_after_enter() {
        let mut fixture = Fixture::new();
        let menu = entered_menu(&mut fixture);
        assert_eq!(menu.cursor, 0);
        assert!(menu.canvas.is_some());
    }

    #[test]
    fn down_key_moves_the_cursor() {
        let mut fixture = Fixture::new();
        let mut menu = entered_menu(&mut fixture);

        fixture.step(&mut menu, Some(Key::Down), 0.0);
        assert_eq!(menu.cursor, 1);
    }

    #[test]
    fn cursor_moves_are_throttled() {
        let mut fixture = Fixture::new();
        let mut menu = entered_menu(&mut fixture);

        fixture.step(&mut menu, Some(Key::Down), 0.0);
        fixture.step(&mut menu, Some(Key::Down), DT);
        assert_eq!(menu.cursor, 1);

        // Past the throttle window the next move is accepted.
        fixture.step(&mut menu, Some(Key::Down), MOVE_THROTTLE + DT);
        assert_eq!(menu.cursor, 2);
    }

    #[test]
    fn cursor_clamps_at_the_list_edges() {
        let mut fixture = Fixture::new();
        let mut menu = entered_menu(&mut fixture);

        fixture.step(&mut menu, Some(Key::Up), 0.0);
        assert_eq!(menu.cursor, 0);

        let last = menu.entries.len() - 1;
        menu.cursor = last;
        fixture.step(&mut menu, Some(Key::Down), MOVE_THROTTLE * 2.0);
        assert_eq!(menu.cursor, last);
    }

    #[test]
    fn selecting_one_player_queues_the_game_state() {
        let mut fixture = Fixture::new();
        let mut menu = entered_menu(&mut fixture);

        fixture.step(&mut menu, Some(Key::Space), 0.0);
        assert_eq!(fixture.transitions.take(), vec![Transition::Push(MAIN_GAME)]);
        assert!(!fixture.quit);
    }

    #[test]
    fn selecting_quit_requests_shutdown() {
        let mut fixture = Fixture::new();
        let mut menu = entered_menu(&mut fixture);

        menu.cursor = menu.entries.len() - 1;
        fixture.step(&mut menu, Some(Key::Space), 0.0);

        assert!(fixture.quit);
        assert!(fixture.transitions.is_empty());
    }

    #[test]
    fn window_close_requests_shutdown() {
        let mut fixture = Fixture::new();
        let mut menu = entered_menu(&mut fixture);

        fixture.sender.send(Event::Quit).unwrap();
        let mut ctx = fixture.ctx();
        menu.handle_events(&mut ctx);
        menu.update(&mut ctx, 0.0, DT);

        assert!(fixture.quit);
    }

    #[test]
    fn escape_is_ignored_on_the_menu() {
        let mut fixture = Fixture::new();
        let mut menu = entered_menu(&mut fixture);

        fixture.step(&mut menu, Some(Key::Escape), 0.0);
        assert!(!fixture.quit);
        assert!(fixture.transitions.is_empty());
    }

    #[test]
    fn pulse_advances_with_simulated_time() {
        let mut fixture = Fixture::new();
        let mut menu = entered_menu(&mut fixture);

        fixture.step(&mut menu, None, 0.0);
        fixture.step(&mut menu, None, DT);
        assert!((menu.pulse - 2.0 * PULSE_RATE * DT).abs() < 1e-9);
    }

    #[test]
    fn reentering_resets_the_session() {
        let mut fixture = Fixture::new();
        let mut menu = entered_menu(&mut fixture);

        fixture.step(&mut menu, Some(Key::Down), 0.0);
        menu.exit(&mut fixture.ctx());
        assert!(menu.canvas.is_none());

        menu.enter(&mut fixture.ctx());
        assert_eq!(menu.cursor, 0);
        assert_eq!(menu.pulse, 0.0);
    }

    #[test]
    fn render_composites_onto_the_display() {
        let mut fixture = Fixture::new();
        let mut menu = entered_menu(&mut fixture);

        let (width, height) = (fixture.config.width, fixture.config.height);
        let mut display = Surface::new(width, height);
        menu.render(&mut display);

        // Center of the title band.
        assert_eq!(display.pixel(width / 2, height / 8 + 30), Some(TITLE_COLOR));
    }
}
