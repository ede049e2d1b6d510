//! Frame timing
//!
//! Turns the timestamps handed to each animation-frame callback into a frame
//! delta for the simulation, and keeps a rolling FPS estimate.

use crate::consts::MAX_FRAME_DT;

/// Frames in the FPS window
const FPS_WINDOW: usize = 60;

#[derive(Debug, Clone)]
pub struct FrameClock {
    last_time: Option<f64>,
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    fps: u32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_time: None,
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            fps: 0,
        }
    }

    /// Register a frame at `time_ms` and return its delta in seconds.
    /// The first frame yields 0; long stalls are clamped so a hidden tab
    /// does not teleport everything on return.
    pub fn tick(&mut self, time_ms: f64) -> f32 {
        let dt = match self.last_time {
            Some(last) => (((time_ms - last) / 1000.0) as f32).clamp(0.0, MAX_FRAME_DT),
            None => 0.0,
        };
        self.last_time = Some(time_ms);

        // Track frame times for FPS
        self.frame_times[self.frame_index] = time_ms;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        // Oldest sample is the one we are about to overwrite
        let oldest_time = self.frame_times[self.frame_index];
        if oldest_time > 0.0 {
            let elapsed = time_ms - oldest_time;
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW - 1) as f64 * 1000.0 / elapsed).round() as u32;
            }
        }

        dt
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}
