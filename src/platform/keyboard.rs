//! Keyboard translator
//!
//! WASD or arrow keys steer, Space fires, Enter confirms.
//! Browser key-repeat is swallowed by the latch.

use super::input::{ControlLatch, InputEvent, InputKind};

/// Map a `KeyboardEvent.key` value to a control
pub fn map_key(key: &str) -> Option<InputKind> {
    match key.to_lowercase().as_str() {
        "w" | "arrowup" => Some(InputKind::Up),
        "s" | "arrowdown" => Some(InputKind::Down),
        "a" | "arrowleft" => Some(InputKind::Left),
        "d" | "arrowright" => Some(InputKind::Right),
        " " | "space" | "spacebar" => Some(InputKind::Button1),
        "enter" | "return" => Some(InputKind::Button2),
        _ => None,
    }
}

#[derive(Debug, Clone, Default)]
pub struct Keyboard {
    latch: ControlLatch,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: &str) -> Option<InputEvent> {
        map_key(key).and_then(|kind| self.latch.set(kind, true))
    }

    pub fn key_up(&mut self, key: &str) -> Option<InputEvent> {
        map_key(key).and_then(|kind| self.latch.set(kind, false))
    }

    /// Window lost focus: nothing can be held any more
    pub fn blur(&mut self) -> Vec<InputEvent> {
        self.latch.release_all()
    }
}
