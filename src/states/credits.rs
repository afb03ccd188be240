//=========================================================================
// Credits State
//=========================================================================
//
// A classic bottom-to-top credits crawl. The whole credits column is
// rendered once into an off-screen surface on activation; scrolling is
// just blitting that surface at a decreasing vertical offset. Once the
// column has fully left the top of the screen it wraps back to the
// bottom. Escape pops back to whatever pushed the credits.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use log::info;

use crate::core::{Color, Event, Key, State, StateContext, Surface};

//--- Layout Constants ----------------------------------------------------

// The scroll covers a full screen height every ten seconds.
const SCROLL_SCREENS_PER_SECOND: f64 = 0.1;

const LINE_SPACING: u32 = 5;
const GLYPH_WIDTH: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineStyle {
    Heading,
    Subheading,
    Paragraph,
}

impl LineStyle {
    fn size(self) -> u32 {
        match self {
            LineStyle::Heading => 200,
            LineStyle::Subheading => 25,
            LineStyle::Paragraph => 20,
        }
    }
}

const CREDIT_LINES: &[(&str, LineStyle)] = &[
    ("Volley", LineStyle::Heading),
    ("", LineStyle::Paragraph),
    ("Programming", LineStyle::Subheading),
    ("The Volley Team", LineStyle::Paragraph),
    ("", LineStyle::Paragraph),
    ("Design", LineStyle::Subheading),
    ("The Volley Team", LineStyle::Paragraph),
    ("", LineStyle::Paragraph),
    ("Special Thanks", LineStyle::Subheading),
    ("Everyone who played the original", LineStyle::Paragraph),
];

//=== CreditsState ========================================================

/// Scrolling credits screen, layered on top of the main menu.
pub struct CreditsState {
    finished: bool,
    scroll_offset: f64,
    scroll_speed: f64,
    credits: Option<Surface>,
    canvas: Option<Surface>,
}

impl CreditsState {
    pub fn new() -> Self {
        Self {
            finished: false,
            scroll_offset: 0.0,
            scroll_speed: 0.0,
            credits: None,
            canvas: None,
        }
    }

    // Renders every credit line into one tall surface, centered
    // horizontally. Blank lines still take up their style's height.
    fn build_credits_surface(width: u32) -> Surface {
        let total_height: u32 = CREDIT_LINES
            .iter()
            .map(|&(_, style)| style.size() + LINE_SPACING)
            .sum();
        let mut surface = Surface::new(width, total_height);

        let mut y = 0u32;
        for &(text, style) in CREDIT_LINES {
            let size = style.size();
            if !text.is_empty() {
                let bar_w = (text.len() as u32 * GLYPH_WIDTH).min(width);
                surface.fill_rect(
                    (width / 2) as i32 - (bar_w / 2) as i32,
                    y as i32,
                    bar_w,
                    size,
                    Color::WHITE,
                );
            }
            y += size + LINE_SPACING;
        }
        surface
    }
}

impl Default for CreditsState {
    fn default() -> Self {
        Self::new()
    }
}

impl State for CreditsState {
    fn handle_events(&mut self, ctx: &mut StateContext<'_>) {
        for event in ctx.events().poll() {
            match event {
                Event::KeyDown(Key::Escape) => self.finished = true,
                Event::Quit => ctx.request_quit(),
                _ => {}
            }
        }
    }

    fn update(&mut self, ctx: &mut StateContext<'_>, _sim_time: f64, fixed_dt: f64) {
        if self.finished {
            ctx.pop();
        }

        self.scroll_offset -= self.scroll_speed * fixed_dt;

        // Wrap once the column has scrolled fully past the top.
        if let Some(credits) = &self.credits {
            let (_, screen_height) = ctx.resolution();
            if self.scroll_offset < -(credits.height() as f64) {
                self.scroll_offset = screen_height as f64;
            }
        }
    }

    fn render(&mut self, display: &mut Surface) {
        let (Some(canvas), Some(credits)) = (self.canvas.as_mut(), self.credits.as_ref()) else {
            return;
        };

        canvas.fill(Color::BLACK);
        canvas.blit(credits, 0, self.scroll_offset as i32);
        display.blit(canvas, 0, 0);
    }

    fn enter(&mut self, ctx: &mut StateContext<'_>) {
        let (width, height) = ctx.resolution();
        info!("credits: starting crawl");

        self.finished = false;
        // The crawl starts just below the bottom edge.
        self.scroll_offset = height as f64;
        self.scroll_speed = height as f64 * SCROLL_SCREENS_PER_SECOND;
        self.credits = Some(Self::build_credits_surface(width));
        self.canvas = Some(Surface::new(width, height));
    }

    fn exit(&mut self, _ctx: &mut StateContext<'_>) {
        self.credits = None;
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

    fn entered_credits(fixture: &mut Fixture) -> CreditsState {
        let mut credits = CreditsState::new();
        credits.enter(&mut fixture.ctx());
        credits
    }

    #[test]
    fn crawl_starts_below_the_screen() {
        let mut fixture = Fixture::new();
        let credits = entered_credits(&mut fixture);

        assert_eq!(credits.scroll_offset, fixture.config.height as f64);
        assert!(credits.credits.is_some());
        assert!(!credits.finished);
    }

    #[test]
    fn scroll_advances_upward_each_step() {
        let mut fixture = Fixture::new();
        let mut credits = entered_credits(&mut fixture);

        let before = credits.scroll_offset;
        let mut ctx = fixture.ctx();
        credits.update(&mut ctx, 0.0, DT);

        let expected = before - fixture.config.height as f64 * 0.1 * DT;
        assert!((credits.scroll_offset - expected).abs() < 1e-9);
    }

    #[test]
    fn crawl_wraps_after_leaving_the_top() {
        let mut fixture = Fixture::new();
        let mut credits = entered_credits(&mut fixture);

        let column_height = credits.credits.as_ref().unwrap().height() as f64;
        credits.scroll_offset = -column_height - 1.0;

        let mut ctx = fixture.ctx();
        credits.update(&mut ctx, 0.0, DT);
        assert_eq!(credits.scroll_offset, fixture.config.height as f64);
    }

    #[test]
    fn escape_finishes_and_pops() {
        let mut fixture = Fixture::new();
        let mut credits = entered_credits(&mut fixture);

        fixture.sender.send(Event::KeyDown(Key::Escape)).unwrap();
        let mut ctx = fixture.ctx();
        credits.handle_events(&mut ctx);
        assert!(credits.finished);

        credits.update(&mut ctx, 0.0, DT);
        assert_eq!(fixture.transitions.take(), vec![Transition::Pop]);
    }

    #[test]
    fn exit_releases_the_render_targets() {
        let mut fixture = Fixture::new();
        let mut credits = entered_credits(&mut fixture);

        credits.exit(&mut fixture.ctx());
        assert!(credits.credits.is_none());
        assert!(credits.canvas.is_none());
    }

    #[test]
    fn reentering_restarts_the_crawl() {
        let mut fixture = Fixture::new();
        let mut credits = entered_credits(&mut fixture);

        credits.finished = true;
        credits.scroll_offset = -500.0;
        credits.exit(&mut fixture.ctx());
        credits.enter(&mut fixture.ctx());

        assert!(!credits.finished);
        assert_eq!(credits.scroll_offset, fixture.config.height as f64);
    }

    #[test]
    fn render_draws_the_column_at_the_scroll_offset() {
        let mut fixture = Fixture::new();
        let mut credits = entered_credits(&mut fixture);

        // Put the heading band at the top of the screen.
        credits.scroll_offset = 0.0;
        let mut display = Surface::new(fixture.config.width, fixture.config.height);
        credits.render(&mut display);

        // Center of the heading bar is lit, far corner is not.
        assert_eq!(
            display.pixel(fixture.config.width / 2, 10),
            Some(Color::WHITE)
        );
        assert_eq!(display.pixel(0, 0), Some(Color::BLACK));
    }
}
