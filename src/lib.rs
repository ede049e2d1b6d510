//! Plane Panic - a side-scrolling arcade shoot-'em-up
//!
//! Core modules:
//! - `sim`: Simulation core (bullets, collisions, enemy spawning and AI)
//! - `states`: Menu/Play state machine driving the simulation each frame
//! - `scene`: Retained scene graph handed to the renderer
//! - `platform`: Input contract, frame clock and key-value storage
//! - `audio`: Fire-and-forget sound cues and the polled music clock
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod platform;
pub mod scene;
pub mod score;
pub mod settings;
pub mod sim;
pub mod states;
pub mod tuning;
pub mod ui;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use score::ScoreTracker;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Largest frame delta fed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Lives the player starts each run with
    pub const PLAYER_START_LIVES: u8 = 3;

    /// Points awarded for each enemy shot down
    pub const ENEMY_KILL_SCORE: u64 = 10;

    /// Distance from a ship's centre at which its bullets appear
    pub const MUZZLE_OFFSET: f32 = 1.5;

    /// Enemies enter from this x coordinate
    pub const ENEMY_SPAWN_X: f32 = 10.0;
    /// Enemies whose x drops below this are culled
    pub const ENEMY_CULL_X: f32 = -10.0;
    /// Vertical band standard/fast enemies enter in: [-4, 4)
    pub const ENEMY_SPAWN_Y_RANGE: f32 = 4.0;
    /// Heavy enemies always enter at this height
    pub const HEAVY_SPAWN_Y: f32 = 3.0;
    /// Amplitude of the standard enemy's vertical sweep
    pub const SWEEP_AMPLITUDE: f32 = 2.0;

    /// Explosion lifetime (seconds)
    pub const EXPLOSION_DURATION: f32 = 1.5;
    /// White flash at the heart of an explosion (seconds)
    pub const EXPLOSION_FLASH_DURATION: f32 = 0.25;
    /// Final scale of the fireball
    pub const EXPLOSION_MAX_SCALE: f32 = 3.0;
}

/// Milliseconds in a frame delta given in seconds
#[inline]
pub fn secs_to_ms(dt: f32) -> f32 {
    dt * 1000.0
}
