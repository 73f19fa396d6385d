use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

// Import from the library crate
use wheelspin::{
    assets::{CarLoader, LoadState, ProceduralCar},
    config::DemoConfig,
    controller::{FrameClock, FrameLoop, InputEvent, KeyBindings},
    logging,
    view::{self, FrameSnapshot, View},
};

/// Shows the HUD line in the window title
struct TitleView {
    window: Arc<Window>,
    last: String,
}

impl View for TitleView {
    fn present(&mut self, frame: &FrameSnapshot) {
        let title = format!("wheelspin | {}", view::status_line(frame));
        if title != self.last {
            self.window.set_title(&title);
            self.last = title;
        }
    }
}

struct App {
    frame_loop: FrameLoop,
    clock: FrameClock,
    started: Instant,
    view: Option<TitleView>,
}

impl App {
    fn new(frame_loop: FrameLoop) -> Self {
        Self {
            frame_loop,
            clock: FrameClock::new(),
            started: Instant::now(),
            view: None,
        }
    }

    fn redraw(&mut self) {
        let now_ms = self.started.elapsed().as_secs_f64() * 1000.0;
        let dt = self.clock.tick(now_ms);
        let frame = self.frame_loop.update(dt);
        if let Some(view) = self.view.as_mut() {
            view.present(&frame);
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.view.is_some() {
            return;
        }
        let attributes = Window::default_attributes()
            .with_title("wheelspin")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));
        match event_loop.create_window(attributes) {
            Ok(window) => {
                let size = window.inner_size();
                self.frame_loop.handle_event(&InputEvent::Resized {
                    width: size.width,
                    height: size.height,
                });
                self.view = Some(TitleView { window: Arc::new(window), last: String::new() });
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to create window");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                self.frame_loop.handle_event(&InputEvent::Resized {
                    width: size.width,
                    height: size.height,
                });
            }
            WindowEvent::KeyboardInput { event: KeyEvent { logical_key, state, .. }, .. } => {
                if logical_key == Key::Named(NamedKey::Escape) {
                    event_loop.exit();
                    return;
                }
                // Only presses (and their repeats) drive the car; releases carry no action
                if state != ElementState::Pressed {
                    return;
                }
                if let Some(key) = key_name(&logical_key) {
                    self.frame_loop.handle_event(&InputEvent::KeyDown(key));
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.frame_loop.handle_event(&InputEvent::PointerMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                });
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(view) = &self.view {
            view.window.request_redraw();
        }
    }
}

/// DOM `KeyboardEvent.key` name for a winit key, so both hosts share bindings
fn key_name(key: &Key) -> Option<String> {
    match key {
        Key::Named(NamedKey::ArrowUp) => Some("ArrowUp".to_string()),
        Key::Named(NamedKey::ArrowDown) => Some("ArrowDown".to_string()),
        Key::Named(NamedKey::ArrowLeft) => Some("ArrowLeft".to_string()),
        Key::Named(NamedKey::ArrowRight) => Some("ArrowRight".to_string()),
        Key::Named(NamedKey::Space) => Some(" ".to_string()),
        Key::Character(c) => Some(c.to_string()),
        _ => None,
    }
}

fn main() -> Result<()> {
    logging::init();

    let frame_loop = FrameLoop::new(DemoConfig::default(), KeyBindings::default(), 1280, 720)
        .context("invalid demo configuration")?;

    // Local loader resolves immediately; a failure still leaves camera and light usable
    let result = pollster::block_on(ProceduralCar::default().load());
    *frame_loop.load_slot().borrow_mut() = LoadState::from(result);

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(frame_loop);
    event_loop.run_app(&mut app).context("event loop terminated with an error")?;
    Ok(())
}
