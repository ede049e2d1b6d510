//! Web Audio backend
//!
//! Procedurally generated sound effects - no external files needed!
//! Drains the cue queue and polls the jukebox once per frame.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use super::{AudioSystem, Layer, Note, SoundCue, Track, Waveform};
use crate::Settings;

/// Audio output for the browser
pub struct WebAudio {
    ctx: Option<AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    /// Last note started, so each step is only triggered once
    last_step: Option<(Track, u64)>,
}

impl Default for WebAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl WebAudio {
    pub fn new() -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
            last_step: None,
        }
    }

    /// Pick up volume settings
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.master_volume = settings.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = settings.music_volume.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn volume(&self, channel: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * channel
        }
    }

    /// Play everything the game asked for this frame
    pub fn service(&mut self, audio: &mut AudioSystem) {
        let cues = audio.drain_cues();
        let note = audio.current_note();

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let sfx = self.volume(self.sfx_volume);
        if sfx > 0.0 {
            for cue in cues {
                self.play_effect(ctx, cue, sfx);
            }
        }

        match note {
            Some(note) if self.last_step != Some((note.track, note.step)) => {
                self.last_step = Some((note.track, note.step));
                let vol = self.volume(self.music_volume);
                if vol > 0.0 {
                    self.play_note(ctx, &note, vol);
                }
            }
            Some(_) => {}
            None => self.last_step = None,
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Start every layer of an effect now
    fn play_effect(&self, ctx: &AudioContext, cue: SoundCue, vol: f32) {
        let t = ctx.current_time();
        for layer in cue.layers() {
            self.play_layer(ctx, layer, vol, t);
        }
    }

    fn play_layer(&self, ctx: &AudioContext, layer: &Layer, vol: f32, t: f64) {
        let Some((osc, gain)) = self.create_osc(ctx, layer.start_hz, oscillator_type(layer.waveform))
        else {
            return;
        };
        let peak = vol * layer.peak;
        let end = t + layer.length;

        if layer.attack > 0.0 {
            gain.gain().set_value_at_time(0.0, t).ok();
            gain.gain()
                .linear_ramp_to_value_at_time(peak, t + layer.attack)
                .ok();
        } else {
            gain.gain().set_value_at_time(peak, t).ok();
        }
        gain.gain().exponential_ramp_to_value_at_time(0.001, end).ok();

        osc.frequency().set_value_at_time(layer.start_hz, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(layer.end_hz, end)
            .ok();

        osc.start().ok();
        osc.stop_with_when(end).ok();
    }

    /// One music step
    fn play_note(&self, ctx: &AudioContext, note: &Note, vol: f32) {
        let osc_type = match note.track {
            Track::Menu => OscillatorType::Triangle,
            Track::Play => OscillatorType::Square,
        };
        let Some((osc, gain)) = self.create_osc(ctx, note.frequency, osc_type) else {
            return;
        };
        let t = ctx.current_time();
        let len = f64::from(note.duration) * 0.9;

        gain.gain().set_value_at_time(vol * 0.15, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + len)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + len).ok();
    }
}

fn oscillator_type(waveform: Waveform) -> OscillatorType {
    match waveform {
        Waveform::Sine => OscillatorType::Sine,
        Waveform::Square => OscillatorType::Square,
        Waveform::Sawtooth => OscillatorType::Sawtooth,
        Waveform::Triangle => OscillatorType::Triangle,
    }
}
