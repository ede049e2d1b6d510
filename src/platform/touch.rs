//! On-screen touch controls
//!
//! A circular direction pad plus two buttons. The pad resolves the touch
//! offset from its centre into up to two held directions.

use super::input::{ControlLatch, InputEvent, InputKind};

/// Fraction of the pad width treated as a dead zone
pub const PAD_DEAD_ZONE: f32 = 0.2;
/// Normalized axis value needed to press a direction
pub const PAD_THRESHOLD: f32 = 0.5;

#[derive(Debug, Clone, Default)]
pub struct TouchPad {
    latch: ControlLatch,
}

impl TouchPad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Touch moved on the pad; `dx`/`dy` are screen pixels from the pad
    /// centre (y grows downward)
    pub fn pad_touch(&mut self, dx: f32, dy: f32, pad_width: f32) -> Vec<InputEvent> {
        let distance = (dx * dx + dy * dy).sqrt();
        let (mut left, mut right, mut up, mut down) = (false, false, false, false);

        if distance > pad_width * PAD_DEAD_ZONE {
            let nx = dx / distance;
            let ny = dy / distance;
            right = nx > PAD_THRESHOLD;
            left = nx < -PAD_THRESHOLD;
            down = ny > PAD_THRESHOLD;
            up = ny < -PAD_THRESHOLD;
        }

        [
            (InputKind::Left, left),
            (InputKind::Right, right),
            (InputKind::Up, up),
            (InputKind::Down, down),
        ]
        .into_iter()
        .filter_map(|(kind, pressed)| self.latch.set(kind, pressed))
        .collect()
    }

    /// Finger lifted from the pad
    pub fn pad_release(&mut self) -> Vec<InputEvent> {
        [InputKind::Left, InputKind::Right, InputKind::Up, InputKind::Down]
            .into_iter()
            .filter_map(|kind| self.latch.set(kind, false))
            .collect()
    }

    /// Button `1` (fire) or `2` (confirm) touched or released
    pub fn button(&mut self, index: u8, pressed: bool) -> Option<InputEvent> {
        let kind = match index {
            1 => InputKind::Button1,
            2 => InputKind::Button2,
            _ => return None,
        };
        self.latch.set(kind, pressed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dead_zone_presses_nothing() {
        let mut touch = TouchPad::new();
        assert!(touch.pad_touch(10.0, 10.0, 150.0).is_empty());
    }

    #[test]
    fn test_diagonal_presses_two_directions() {
        let mut touch = TouchPad::new();
        let events = touch.pad_touch(50.0, -50.0, 150.0);
        assert!(events.contains(&InputEvent::press(InputKind::Right)));
        assert!(events.contains(&InputEvent::press(InputKind::Up)));
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_sliding_across_releases_opposite() {
        let mut touch = TouchPad::new();
        touch.pad_touch(60.0, 0.0, 150.0);
        let events = touch.pad_touch(-60.0, 0.0, 150.0);
        assert!(events.contains(&InputEvent::release(InputKind::Right)));
        assert!(events.contains(&InputEvent::press(InputKind::Left)));
    }

    #[test]
    fn test_lift_releases_directions() {
        let mut touch = TouchPad::new();
        touch.pad_touch(0.0, 60.0, 150.0);
        assert_eq!(touch.pad_release(), vec![InputEvent::release(InputKind::Down)]);
    }

    #[test]
    fn test_pad_and_visibility_setting_coexist() {
        use crate::settings::TouchControls;
        let mut pad = TouchPad::new();
        assert!(TouchControls::Auto.visible(true));
        assert!(!TouchControls::Never.visible(true));
        assert_eq!(pad.pad_touch(0.0, -60.0, 150.0), vec![InputEvent::press(InputKind::Up)]);
    }

    #[test]
    fn test_buttons() {
        let mut touch = TouchPad::new();
        assert_eq!(touch.button(2, true), Some(InputEvent::press(InputKind::Button2)));
        assert_eq!(touch.button(3, true), None);
    }
}
