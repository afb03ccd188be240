//=========================================================================
// Main Game State
//=========================================================================
//
// The gameplay session. Tracks both players' scores and the held-key
// paddle controls, and draws the playfield. The session owns its own
// running flag: Escape (or a window close) ends the session, and the
// next update pops back to the menu underneath.
//
// Player one holds A/Z, player two holds L/comma; a flag stays set for
// as long as the key is held.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use log::info;

use crate::core::{Color, Event, Key, State, StateContext, Surface};

//--- Layout Constants ----------------------------------------------------

const BORDER_THICKNESS: u32 = 8;
const CENTER_LINE_WIDTH: u32 = 4;
const CENTER_DASH_HEIGHT: u32 = 20;
const CENTER_DASH_GAP: u32 = 12;

const PLAYFIELD_COLOR: Color = Color::new(220, 220, 220);

//=== MainGameState =======================================================

/// The pong session screen.
pub struct MainGameState {
    score_p1: u32,
    score_p2: u32,
    p1_up: bool,
    p1_down: bool,
    p2_up: bool,
    p2_down: bool,
    session_running: bool,
    playfield: Option<Surface>,
    canvas: Option<Surface>,
}

impl MainGameState {
    pub fn new() -> Self {
        Self {
            score_p1: 0,
            score_p2: 0,
            p1_up: false,
            p1_down: false,
            p2_up: false,
            p2_down: false,
            session_running: false,
            playfield: None,
            canvas: None,
        }
    }

    // Static backdrop: outer border plus a dashed center line.
    fn build_playfield(width: u32, height: u32) -> Surface {
        let mut surface = Surface::new(width, height);

        surface.fill_rect(0, 0, width, BORDER_THICKNESS, PLAYFIELD_COLOR);
        surface.fill_rect(
            0,
            (height - BORDER_THICKNESS) as i32,
            width,
            BORDER_THICKNESS,
            PLAYFIELD_COLOR,
        );
        surface.fill_rect(0, 0, BORDER_THICKNESS, height, PLAYFIELD_COLOR);
        surface.fill_rect(
            (width - BORDER_THICKNESS) as i32,
            0,
            BORDER_THICKNESS,
            height,
            PLAYFIELD_COLOR,
        );

        let center_x = (width / 2 - CENTER_LINE_WIDTH / 2) as i32;
        let mut y = BORDER_THICKNESS;
        while y + CENTER_DASH_HEIGHT <= height - BORDER_THICKNESS {
            surface.fill_rect(
                center_x,
                y as i32,
                CENTER_LINE_WIDTH,
                CENTER_DASH_HEIGHT,
                PLAYFIELD_COLOR,
            );
            y += CENTER_DASH_HEIGHT + CENTER_DASH_GAP;
        }

        surface
    }
}

impl Default for MainGameState {
    fn default() -> Self {
        Self::new()
    }
}

impl State for MainGameState {
    fn handle_events(&mut self, ctx: &mut StateContext<'_>) {
        for event in ctx.events().poll() {
            match event {
                Event::KeyDown(Key::A) => self.p1_up = true,
                Event::KeyDown(Key::Z) => self.p1_down = true,
                Event::KeyDown(Key::L) => self.p2_up = true,
                Event::KeyDown(Key::Comma) => self.p2_down = true,
                Event::KeyUp(Key::A) => self.p1_up = false,
                Event::KeyUp(Key::Z) => self.p1_down = false,
                Event::KeyUp(Key::L) => self.p2_up = false,
                Event::KeyUp(Key::Comma) => self.p2_down = false,
                Event::KeyDown(Key::Escape) => self.session_running = false,
                Event::Quit => ctx.request_quit(),
                _ => {}
            }
        }
    }

    fn update(&mut self, ctx: &mut StateContext<'_>, _sim_time: f64, _fixed_dt: f64) {
        if !self.session_running {
            info!(
                "game: session over, final score {} - {}",
                self.score_p1, self.score_p2
            );
            ctx.pop();
        }
    }

    fn render(&mut self, display: &mut Surface) {
        let (Some(canvas), Some(playfield)) = (self.canvas.as_mut(), self.playfield.as_ref())
        else {
            return;
        };

        canvas.fill(Color::BLACK);
        canvas.blit(playfield, 0, 0);
        display.blit(canvas, 0, 0);
    }

    fn enter(&mut self, ctx: &mut StateContext<'_>) {
        let (width, height) = ctx.resolution();
        info!("game: new session");

        self.score_p1 = 0;
        self.score_p2 = 0;
        self.p1_up = false;
        self.p1_down = false;
        self.p2_up = false;
        self.p2_down = false;
        self.session_running = true;
        self.playfield = Some(Self::build_playfield(width, height));
        self.canvas = Some(Surface::new(width, height));
    }

    fn exit(&mut self, _ctx: &mut StateContext<'_>) {
        self.playfield = None;
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
    }

    fn entered_game(fixture: &mut Fixture) -> MainGameState {
        let mut game = MainGameState::new();
        game.enter(&mut fixture.ctx());
        game
    }

    #[test]
    fn enter_resets_the_session() {
        let mut fixture = Fixture::new();
        let game = entered_game(&mut fixture);

        assert_eq!(game.score_p1, 0);
        assert_eq!(game.score_p2, 0);
        assert!(game.session_running);
        assert!(game.playfield.is_some());
    }

    #[test]
    fn paddle_flags_track_held_keys() {
        let mut fixture = Fixture::new();
        let mut game = entered_game(&mut fixture);

        fixture.sender.send(Event::KeyDown(Key::A)).unwrap();
        fixture.sender.send(Event::KeyDown(Key::Comma)).unwrap();
        game.handle_events(&mut fixture.ctx());
        assert!(game.p1_up);
        assert!(game.p2_down);
        assert!(!game.p1_down);

        fixture.sender.send(Event::KeyUp(Key::A)).unwrap();
        game.handle_events(&mut fixture.ctx());
        assert!(!game.p1_up);
        assert!(game.p2_down);
    }

    #[test]
    fn escape_ends_the_session_and_pops() {
        let mut fixture = Fixture::new();
        let mut game = entered_game(&mut fixture);

        fixture.sender.send(Event::KeyDown(Key::Escape)).unwrap();
        let mut ctx = fixture.ctx();
        game.handle_events(&mut ctx);
        assert!(!game.session_running);

        game.update(&mut ctx, 0.0, DT);
        assert_eq!(fixture.transitions.take(), vec![Transition::Pop]);
    }

    #[test]
    fn running_session_does_not_pop() {
        let mut fixture = Fixture::new();
        let mut game = entered_game(&mut fixture);

        game.update(&mut fixture.ctx(), 0.0, DT);
        assert!(fixture.transitions.is_empty());
    }

    #[test]
    fn window_close_requests_program_quit() {
        let mut fixture = Fixture::new();
        let mut game = entered_game(&mut fixture);

        fixture.sender.send(Event::Quit).unwrap();
        game.handle_events(&mut fixture.ctx());
        assert!(fixture.quit);
    }

    #[test]
    fn exit_releases_the_render_targets() {
        let mut fixture = Fixture::new();
        let mut game = entered_game(&mut fixture);

        game.exit(&mut fixture.ctx());
        assert!(game.playfield.is_none());
        assert!(game.canvas.is_none());
    }

    #[test]
    fn render_draws_the_border_and_center_line() {
        let mut fixture = Fixture::new();
        let mut game = entered_game(&mut fixture);

        let (width, height) = (fixture.config.width, fixture.config.height);
        let mut display = Surface::new(width, height);
        game.render(&mut display);

        assert_eq!(display.pixel(0, 0), Some(PLAYFIELD_COLOR));
        assert_eq!(
            display.pixel(width / 2, BORDER_THICKNESS + 1),
            Some(PLAYFIELD_COLOR)
        );
        assert_eq!(display.pixel(width / 4, height / 2), Some(Color::BLACK));
    }
}
