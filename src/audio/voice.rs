//! Sound effect recipes
//!
//! Every cue is a small stack of oscillator layers, each sweeping from one
//! pitch to another under an attack/decay envelope. The web backend turns a
//! layer into an oscillator and gain node pair.

use super::SoundCue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// One swept tone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layer {
    pub waveform: Waveform,
    pub start_hz: f32,
    pub end_hz: f32,
    /// Peak gain as a fraction of the effects volume
    pub peak: f32,
    /// Seconds to reach `peak`; zero starts at full level
    pub attack: f64,
    /// Seconds from start until the layer stops
    pub length: f64,
}

const BULLET: [Layer; 1] = [Layer {
    waveform: Waveform::Triangle,
    start_hz: 990.0,
    end_hz: 330.0,
    peak: 0.25,
    attack: 0.005,
    length: 0.08,
}];

const EXPLOSION: [Layer; 3] = [
    // Body
    Layer {
        waveform: Waveform::Triangle,
        start_hz: 120.0,
        end_hz: 35.0,
        peak: 0.55,
        attack: 0.02,
        length: 0.9,
    },
    // Slightly detuned grit under the body
    Layer {
        waveform: Waveform::Sawtooth,
        start_hz: 124.0,
        end_hz: 33.0,
        peak: 0.25,
        attack: 0.02,
        length: 0.7,
    },
    // Snap
    Layer {
        waveform: Waveform::Square,
        start_hz: 620.0,
        end_hz: 180.0,
        peak: 0.12,
        attack: 0.0,
        length: 0.12,
    },
];

impl SoundCue {
    pub fn layers(&self) -> &'static [Layer] {
        match self {
            SoundCue::Bullet => &BULLET,
            SoundCue::Explosion => &EXPLOSION,
        }
    }

    /// Seconds until the last layer stops
    pub fn length(&self) -> f64 {
        self.layers().iter().map(|l| l.length).fold(0.0, f64::max)
    }
}
