//! Polled background music
//!
//! There are no self-rescheduling timers. The jukebox owns a logical clock
//! that the game advances once per frame; whatever plays audio asks it which
//! note should be sounding right now and starts that note when it changes.

/// Background tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Track {
    Menu,
    Play,
}

/// One step of a pattern: a MIDI note or a rest, and its length in beats
type Step = (Option<u8>, f32);

const MENU_TEMPO_BPM: f32 = 96.0;
const PLAY_TEMPO_BPM: f32 = 140.0;

// Slow A-minor arpeggio
const MENU_PATTERN: &[Step] = &[
    (Some(57), 1.0),
    (Some(60), 1.0),
    (Some(64), 1.0),
    (Some(69), 1.0),
    (Some(64), 1.0),
    (Some(60), 1.0),
    (Some(55), 1.0),
    (None, 1.0),
];

// Driving bass line
const PLAY_PATTERN: &[Step] = &[
    (Some(45), 0.5),
    (Some(45), 0.5),
    (Some(57), 0.5),
    (Some(45), 0.5),
    (Some(43), 0.5),
    (Some(43), 0.5),
    (Some(55), 0.5),
    (Some(43), 0.5),
    (Some(41), 0.5),
    (Some(41), 0.5),
    (Some(53), 0.5),
    (Some(41), 0.5),
    (Some(40), 0.5),
    (Some(52), 0.5),
    (Some(40), 0.5),
    (None, 0.5),
];

impl Track {
    fn pattern(self) -> &'static [Step] {
        match self {
            Track::Menu => MENU_PATTERN,
            Track::Play => PLAY_PATTERN,
        }
    }

    fn seconds_per_beat(self) -> f32 {
        let bpm = match self {
            Track::Menu => MENU_TEMPO_BPM,
            Track::Play => PLAY_TEMPO_BPM,
        };
        60.0 / bpm
    }

    /// Length of one pass through the pattern (seconds)
    pub fn loop_length(self) -> f32 {
        self.pattern().iter().map(|(_, beats)| beats).sum::<f32>() * self.seconds_per_beat()
    }
}

/// The note that should be sounding at a given instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    pub track: Track,
    /// Monotonic step counter since the track started (changes on every note)
    pub step: u64,
    pub frequency: f32,
    /// Seconds
    pub duration: f32,
}

/// Convert a MIDI note number to Hz
#[inline]
pub fn midi_to_hz(note: u8) -> f32 {
    440.0 * 2f32.powf((note as f32 - 69.0) / 12.0)
}

/// Music player driven by a logical clock
#[derive(Debug, Clone, Default)]
pub struct Jukebox {
    track: Option<Track>,
    /// Seconds since the current track started
    clock: f32,
}

impl Jukebox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a track; starting the track that is already playing is a no-op
    pub fn play(&mut self, track: Track) {
        if self.track == Some(track) {
            return;
        }
        log::debug!("Music: {:?}", track);
        self.track = Some(track);
        self.clock = 0.0;
    }

    /// Stop a track if it is the one playing
    pub fn stop(&mut self, track: Track) {
        if self.track == Some(track) {
            self.track = None;
            self.clock = 0.0;
        }
    }

    pub fn playing(&self) -> Option<Track> {
        self.track
    }

    /// Advance the music clock by one frame
    pub fn advance(&mut self, dt: f32) {
        if self.track.is_some() {
            self.clock += dt;
        }
    }

    /// Which note should be sounding now (None while stopped or on a rest)
    pub fn current_note(&self) -> Option<Note> {
        let track = self.track?;
        let pattern = track.pattern();
        let spb = track.seconds_per_beat();
        let loop_len = track.loop_length();

        let loops = (self.clock / loop_len).floor();
        let mut t = self.clock - loops * loop_len;
        for (i, &(midi, beats)) in pattern.iter().enumerate() {
            let len = beats * spb;
            if t < len {
                let step = loops as u64 * pattern.len() as u64 + i as u64;
                return midi.map(|m| Note {
                    track,
                    step,
                    frequency: midi_to_hz(m),
                    duration: len,
                });
            }
            t -= len;
        }
        None
    }
}
