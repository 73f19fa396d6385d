//! Platform-agnostic input handling system
use glam::Vec2;
use tracing::debug;
use crate::model::PanDirection;

/// Actions kept between two frames; presses beyond this are dropped
pub const MAX_PENDING_ACTIONS: usize = 64;

/// Platform-independent input events
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    // Key press (and host key repeat), carrying the DOM `KeyboardEvent.key` value
    KeyDown(String),

    // Pointer position in client pixels
    PointerMoved { x: f32, y: f32 },

    // Window events
    Resized { width: u32, height: u32 },
}

/// A state transition triggered by a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    AccelerateForward,
    AccelerateBackward,
    Brake,
    TurnLeft,
    TurnRight,
    PanCamera(PanDirection),
}

/// Convert a pointer position in client pixels to normalized device
/// coordinates (x right, y up, both in [-1, 1]).
pub fn pointer_to_ndc(x: f32, y: f32, width: u32, height: u32) -> Option<Vec2> {
    if width == 0 || height == 0 {
        return None;
    }
    Some(Vec2::new(
        (x / width as f32) * 2.0 - 1.0,
        -(y / height as f32) * 2.0 + 1.0,
    ))
}

pub struct InputState {
    pub viewport: (u32, u32),
    pointer: Option<(f32, f32)>,
    pending: Vec<Action>,
    processor: InputProcessor,
}

impl InputState {
    pub fn new(processor: InputProcessor, width: u32, height: u32) -> Self {
        Self {
            viewport: (width, height),
            pointer: None,
            pending: Vec::new(),
            processor,
        }
    }

    /// Process an input event and update state.
    ///
    /// Every key-down, including host key repeats, queues its action once.
    /// Unmapped keys are ignored, and so are presses arriving while
    /// [`MAX_PENDING_ACTIONS`] are already waiting for a frame.
    pub fn process_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown(key) => {
                let Some(action) = self.processor.action_for_key(key) else { return };
                if self.pending.len() < MAX_PENDING_ACTIONS {
                    self.pending.push(action);
                } else {
                    debug!(?action, "action queue full, dropping key press");
                }
            }
            InputEvent::PointerMoved { x, y } => {
                self.pointer = Some((*x, *y));
            }
            InputEvent::Resized { width, height } => {
                self.viewport = (*width, *height);
            }
        }
    }

    /// Actions queued since the last call, oldest first
    pub fn drain_actions(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.pending)
    }

    /// Latest pointer position in NDC, cleared once read
    pub fn consume_pointer(&mut self) -> Option<Vec2> {
        let (x, y) = self.pointer.take()?;
        pointer_to_ndc(x, y, self.viewport.0, self.viewport.1)
    }
}

/// Key mapping configuration
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub forward: String,
    pub backward: String,
    pub left: String,
    pub right: String,
    pub brake: String,
    pub pan_forward: String,
    pub pan_backward: String,
    pub pan_left: String,
    pub pan_right: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: "ArrowUp".to_string(),
            backward: "ArrowDown".to_string(),
            left: "ArrowLeft".to_string(),
            right: "ArrowRight".to_string(),
            brake: " ".to_string(),
            pan_forward: "w".to_string(),
            pan_backward: "s".to_string(),
            pan_left: "a".to_string(),
            pan_right: "d".to_string(),
        }
    }
}

/// Maps key identifiers to actions
#[derive(Debug, Clone, Default)]
pub struct InputProcessor {
    bindings: KeyBindings,
}

impl InputProcessor {
    pub fn new(bindings: KeyBindings) -> Self {
        Self { bindings }
    }

    pub fn action_for_key(&self, key: &str) -> Option<Action> {
        let b = &self.bindings;
        let action = if key == b.forward {
            Action::AccelerateForward
        } else if key == b.backward {
            Action::AccelerateBackward
        } else if key == b.left {
            Action::TurnLeft
        } else if key == b.right {
            Action::TurnRight
        } else if key == b.brake {
            Action::Brake
        } else if key.eq_ignore_ascii_case(&b.pan_forward) {
            Action::PanCamera(PanDirection::Forward)
        } else if key.eq_ignore_ascii_case(&b.pan_backward) {
            Action::PanCamera(PanDirection::Backward)
        } else if key.eq_ignore_ascii_case(&b.pan_left) {
            Action::PanCamera(PanDirection::Left)
        } else if key.eq_ignore_ascii_case(&b.pan_right) {
            Action::PanCamera(PanDirection::Right)
        } else {
            return None;
        };
        Some(action)
    }

    /// Keys whose browser default (page scrolling) should be suppressed
    pub fn is_bound(&self, key: &str) -> bool {
        self.action_for_key(key).is_some()
    }
}

pub mod wasm {
    use super::*;
    use web_sys::{KeyboardEvent, MouseEvent};

    pub fn key_down_to_input(e: &KeyboardEvent) -> InputEvent {
        InputEvent::KeyDown(e.key())
    }

    pub fn mouse_move_to_input(e: &MouseEvent) -> InputEvent {
        InputEvent::PointerMoved {
            x: e.client_x() as f32,
            y: e.client_y() as f32,
        }
    }
}
