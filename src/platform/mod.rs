//=========================================================================
// Platform Subsystem
//=========================================================================
//
// Bridges Winit (OS window and input) with the game host.
//
// Everything runs on the main thread: the Winit event loop forwards
// key and close events into the host's channel, and `RedrawRequested`
// is the frame boundary — measure the frame delta, run `Game::frame`,
// copy the display surface into the pixel buffer, present, request the
// next redraw. When the host's running flag clears, the event loop
// exits.
//
// The window is created lazily in `resumed()` (mobile-style lifecycle;
// on desktop it fires once at startup).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;
use std::time::Instant;

use crossbeam_channel::Sender;
use log::{debug, error, info};
use pixels::{Pixels, SurfaceTexture};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes},
};

//=== Internal Dependencies ===============================================

use crate::core::{Event, Key};
use crate::Game;

const WINDOW_TITLE: &str = "Volley";

//=== PlatformError =======================================================

/// Platform initialization and runtime errors. Typically fatal: if the
/// event loop cannot be created, the program cannot run. Failures
/// after startup (window or surface creation) are logged and exit the
/// loop instead.
#[derive(Debug)]
pub enum PlatformError {
    /// Failed to create the event loop.
    EventLoopCreation(winit::error::EventLoopError),

    /// Event loop execution error.
    EventLoopExecution(winit::error::EventLoopError),
}

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "event loop creation failed: {}", e),
            Self::EventLoopExecution(e) => write!(f, "event loop error: {}", e),
        }
    }
}

impl std::error::Error for PlatformError {}

//=== Key Mapping =========================================================

fn map_key(key: PhysicalKey) -> Option<Key> {
    match key {
        PhysicalKey::Code(KeyCode::ArrowUp) => Some(Key::Up),
        PhysicalKey::Code(KeyCode::ArrowDown) => Some(Key::Down),
        PhysicalKey::Code(KeyCode::Space) => Some(Key::Space),
        PhysicalKey::Code(KeyCode::Escape) => Some(Key::Escape),
        PhysicalKey::Code(KeyCode::KeyA) => Some(Key::A),
        PhysicalKey::Code(KeyCode::KeyZ) => Some(Key::Z),
        PhysicalKey::Code(KeyCode::KeyL) => Some(Key::L),
        PhysicalKey::Code(KeyCode::Comma) => Some(Key::Comma),
        _ => None,
    }
}

//=== WindowedApp =========================================================

/// Winit application driving the game host from `RedrawRequested`.
struct WindowedApp {
    game: Game,
    event_sender: Sender<Event>,
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,
    previous_frame: Instant,
}

impl WindowedApp {
    fn new(game: Game) -> Self {
        let event_sender = game.event_sender();
        Self {
            game,
            event_sender,
            window: None,
            pixels: None,
            previous_frame: Instant::now(),
        }
    }

    fn send(&self, event: Event) {
        // The host lives on this thread; the channel cannot disconnect
        // while the loop runs.
        let _ = self.event_sender.send(event);
    }

    // Copies the host's RGB display surface into the RGBA pixel buffer
    // and presents it.
    fn present(&mut self) -> Result<(), pixels::Error> {
        let Some(pixels) = self.pixels.as_mut() else {
            return Ok(());
        };

        let display = self.game.display();
        for (dst, src) in pixels
            .frame_mut()
            .chunks_exact_mut(4)
            .zip(display.pixels().iter())
        {
            dst[0] = src.r;
            dst[1] = src.g;
            dst[2] = src.b;
            dst[3] = 0xff;
        }
        pixels.render()
    }
}

impl ApplicationHandler for WindowedApp {
    /// Creates the window and the presentation surface on first resume.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "window already exists (mobile resume?)");
            return;
        }

        let config = *self.game.config();
        let attrs = WindowAttributes::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(config.width, config.height));

        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!(target: "platform", "window creation failed: {}", e);
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        let texture = SurfaceTexture::new(size.width, size.height, Arc::clone(&window));
        match Pixels::new(config.width, config.height, texture) {
            Ok(pixels) => {
                info!(
                    target: "platform",
                    "window created: {}x{} @ {}x DPI",
                    size.width,
                    size.height,
                    window.scale_factor()
                );
                self.pixels = Some(pixels);
            }
            Err(e) => {
                error!(target: "platform", "render surface creation failed: {}", e);
                event_loop.exit();
                return;
            }
        }

        self.previous_frame = Instant::now();
        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "window close requested");
                self.send(Event::Quit);
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if key_event.repeat {
                    return;
                }
                if let Some(key) = map_key(key_event.physical_key) {
                    match key_event.state {
                        ElementState::Pressed => self.send(Event::KeyDown(key)),
                        ElementState::Released => self.send(Event::KeyUp(key)),
                    }
                }
            }

            WindowEvent::Resized(size) => {
                if let Some(pixels) = self.pixels.as_mut() {
                    if let Err(e) = pixels.resize_surface(size.width, size.height) {
                        error!(target: "platform", "surface resize failed: {}", e);
                        event_loop.exit();
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let frame_time = now.duration_since(self.previous_frame).as_secs_f64();
                self.previous_frame = now;

                self.game.frame(frame_time);

                if !self.game.is_running() {
                    info!(target: "platform", "host stopped, exiting event loop");
                    event_loop.exit();
                    return;
                }

                if let Err(e) = self.present() {
                    error!(target: "platform", "frame presentation failed: {}", e);
                    event_loop.exit();
                    return;
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

//=== Entry Point =========================================================

/// Opens the window and drives the host until it stops running.
///
/// Blocks on the main thread for the lifetime of the window (Winit
/// requires the event loop on the main thread on macOS/iOS).
pub(crate) fn run(game: Game) -> Result<(), PlatformError> {
    debug!(target: "platform", "starting event loop");

    let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = WindowedApp::new(game);
    event_loop
        .run_app(&mut app)
        .map_err(PlatformError::EventLoopExecution)
}

//=== Tests ===============================================================
