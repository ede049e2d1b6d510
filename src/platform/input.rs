//! Abstract input contract
//!
//! Keyboard, touch overlay and gamepad all boil down to the same six named
//! events with a press/hold flag. Whatever state is active receives them
//! through an `InputHandler` that the state machine attaches and detaches.

use serde::{Deserialize, Serialize};

/// The named events every input source produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputKind {
    Up,
    Down,
    Left,
    Right,
    /// Fire
    Button1,
    /// Confirm
    Button2,
}

impl InputKind {
    pub const ALL: [InputKind; 6] = [
        InputKind::Up,
        InputKind::Down,
        InputKind::Left,
        InputKind::Right,
        InputKind::Button1,
        InputKind::Button2,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InputKind::Up => "up",
            InputKind::Down => "down",
            InputKind::Left => "left",
            InputKind::Right => "right",
            InputKind::Button1 => "button1",
            InputKind::Button2 => "button2",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }
}

/// One input event: which control, and whether it is pressed/held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputEvent {
    pub kind: InputKind,
    pub pressed: bool,
}

impl InputEvent {
    pub fn press(kind: InputKind) -> Self {
        Self { kind, pressed: true }
    }

    pub fn release(kind: InputKind) -> Self {
        Self {
            kind,
            pressed: false,
        }
    }
}

/// Held state of each control for one source
///
/// Sources report raw state as often as they like; only changes become
/// events, so a held key produces one press and one release.
#[derive(Debug, Clone, Default)]
pub struct ControlLatch {
    held: [bool; 6],
}

impl ControlLatch {
    fn slot(kind: InputKind) -> usize {
        kind as usize
    }

    /// Record a control's state; returns an event if it changed
    pub fn set(&mut self, kind: InputKind, pressed: bool) -> Option<InputEvent> {
        let slot = &mut self.held[Self::slot(kind)];
        if *slot == pressed {
            return None;
        }
        *slot = pressed;
        Some(InputEvent { kind, pressed })
    }

    pub fn is_held(&self, kind: InputKind) -> bool {
        self.held[Self::slot(kind)]
    }

    /// Release everything currently held
    pub fn release_all(&mut self) -> Vec<InputEvent> {
        InputKind::ALL
            .into_iter()
            .filter_map(|kind| self.set(kind, false))
            .collect()
    }
}

/// Per-frame event queue shared by all sources
///
/// Events pushed while detached are dropped, so a source that keeps
/// firing between states cannot leak input into the next one.
#[derive(Debug, Default)]
pub struct InputHandler {
    attached: bool,
    queue: Vec<InputEvent>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// Stop accepting events and discard anything not yet delivered
    pub fn detach(&mut self) {
        self.attached = false;
        self.queue.clear();
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn push(&mut self, event: InputEvent) {
        if self.attached {
            self.queue.push(event);
        }
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = InputEvent>) {
        for event in events {
            self.push(event);
        }
    }

    /// Take this frame's events in arrival order
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.queue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for kind in InputKind::ALL {
            assert_eq!(InputKind::from_name(kind.as_str()), Some(kind));
        }
        assert_eq!(InputKind::from_name("button3"), None);
    }

    #[test]
    fn test_latch_reports_changes_only() {
        let mut latch = ControlLatch::default();
        assert_eq!(
            latch.set(InputKind::Left, true),
            Some(InputEvent::press(InputKind::Left))
        );
        assert_eq!(latch.set(InputKind::Left, true), None);
        assert_eq!(latch.set(InputKind::Right, false), None);
        assert!(latch.is_held(InputKind::Left));
        assert_eq!(latch.release_all(), vec![InputEvent::release(InputKind::Left)]);
        assert!(latch.release_all().is_empty());
    }

    #[test]
    fn test_detached_handler_drops_events() {
        let mut input = InputHandler::new();
        input.push(InputEvent::press(InputKind::Up));
        assert!(input.drain().is_empty());

        input.attach();
        input.push(InputEvent::press(InputKind::Up));
        input.push(InputEvent::release(InputKind::Up));
        assert_eq!(input.drain().len(), 2);
    }

    #[test]
    fn test_detach_discards_queue() {
        let mut input = InputHandler::new();
        input.attach();
        input.push(InputEvent::press(InputKind::Button2));
        input.detach();
        input.attach();
        assert!(input.drain().is_empty());
    }
}
