//! Gamepad translator
//!
//! Polled once per frame with the current axes/buttons snapshot
//! (Xbox layout: A fires, B confirms).

use super::input::{ControlLatch, InputEvent, InputKind};

/// Analog stick dead zone
pub const STICK_DEAD_ZONE: f32 = 0.1;

#[derive(Debug, Clone, Default)]
pub struct Gamepad {
    connected: bool,
    latch: ControlLatch,
}

impl Gamepad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect(&mut self) {
        log::info!("Gamepad connected");
        self.connected = true;
    }

    /// Pad went away: release whatever it was holding
    pub fn disconnect(&mut self) -> Vec<InputEvent> {
        if self.connected {
            log::info!("Gamepad disconnected");
        }
        self.connected = false;
        self.latch.release_all()
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Translate a snapshot into events. `axes[0]` is horizontal,
    /// `axes[1]` vertical (negative = up).
    pub fn poll(&mut self, axes: &[f32], buttons: &[bool]) -> Vec<InputEvent> {
        if !self.connected {
            return Vec::new();
        }

        let mut events = Vec::new();
        let x = axes.first().copied().unwrap_or(0.0);
        let y = axes.get(1).copied().unwrap_or(0.0);
        self.stick(x, InputKind::Left, InputKind::Right, &mut events);
        self.stick(y, InputKind::Up, InputKind::Down, &mut events);

        for (index, kind) in [(0, InputKind::Button1), (1, InputKind::Button2)] {
            let pressed = buttons.get(index).copied().unwrap_or(false);
            events.extend(self.latch.set(kind, pressed));
        }
        events
    }

    fn stick(&mut self, value: f32, negative: InputKind, positive: InputKind, out: &mut Vec<InputEvent>) {
        let (neg, pos) = if value.abs() > STICK_DEAD_ZONE {
            (value < 0.0, value > 0.0)
        } else {
            (false, false)
        };
        out.extend(self.latch.set(negative, neg));
        out.extend(self.latch.set(positive, pos));
    }
}
