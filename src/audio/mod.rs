//! Sound cues
//!
//! Gameplay code only ever fires cues through `AudioCues`; nothing comes
//! back. `AudioSystem` queues one-shot effects for a backend to drain and
//! keeps the music `Jukebox` clock. The Web Audio backend lives in `web`.

pub mod music;
pub mod voice;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use music::{Jukebox, Note, Track};
pub use voice::{Layer, Waveform};

/// One-shot sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// A projectile was fired
    Bullet,
    /// Something blew up
    Explosion,
}

/// Fire-and-forget audio triggers
pub trait AudioCues {
    fn play_bullet(&mut self);
    fn play_explosion(&mut self);
    fn play_music(&mut self);
    fn stop_music(&mut self);
    fn play_menu_music(&mut self);
    fn stop_menu_music(&mut self);
}

/// Cue queue plus music clock
#[derive(Debug, Default)]
pub struct AudioSystem {
    pending: Vec<SoundCue>,
    jukebox: Jukebox,
}

impl AudioSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the music clock (once per frame)
    pub fn advance(&mut self, dt: f32) {
        self.jukebox.advance(dt);
    }

    /// Take every cue fired since the last drain
    pub fn drain_cues(&mut self) -> Vec<SoundCue> {
        std::mem::take(&mut self.pending)
    }

    /// Cues fired since the last drain
    pub fn pending(&self) -> &[SoundCue] {
        &self.pending
    }

    pub fn jukebox(&self) -> &Jukebox {
        &self.jukebox
    }

    /// Note the backend should be sounding right now
    pub fn current_note(&self) -> Option<Note> {
        self.jukebox.current_note()
    }
}

impl AudioCues for AudioSystem {
    fn play_bullet(&mut self) {
        self.pending.push(SoundCue::Bullet);
    }

    fn play_explosion(&mut self) {
        self.pending.push(SoundCue::Explosion);
    }

    fn play_music(&mut self) {
        self.jukebox.play(Track::Play);
    }

    fn stop_music(&mut self) {
        self.jukebox.stop(Track::Play);
    }

    fn play_menu_music(&mut self) {
        self.jukebox.play(Track::Menu);
    }

    fn stop_menu_music(&mut self) {
        self.jukebox.stop(Track::Menu);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cues_are_queued_and_drained() {
        let mut audio = AudioSystem::new();
        audio.play_bullet();
        audio.play_explosion();
        assert_eq!(audio.drain_cues(), vec![SoundCue::Bullet, SoundCue::Explosion]);
        assert!(audio.pending().is_empty());
    }

    #[test]
    fn test_music_switching() {
        let mut audio = AudioSystem::new();
        audio.play_menu_music();
        assert_eq!(audio.jukebox().playing(), Some(Track::Menu));
        audio.stop_menu_music();
        audio.play_music();
        audio.play_music();
        assert_eq!(audio.jukebox().playing(), Some(Track::Play));
        audio.stop_music();
        assert_eq!(audio.jukebox().playing(), None);
    }
}
