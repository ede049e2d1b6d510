//! The player's ship
//!
//! Input never touches the ship directly: events update `Intents`, and the
//! play state applies the intents once per frame.

use glam::{Vec2, Vec3};

use super::bullets::Shot;
use crate::Tuning;
use crate::consts::{MUZZLE_OFFSET, PLAYER_START_LIVES};
use crate::platform::{InputEvent, InputKind};
use crate::scene::{DrawableHandle, ModelKind, SceneGraph};
use crate::secs_to_ms;

/// What the player is currently asking the ship to do
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Intents {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

impl Intents {
    /// Fold one input event into the held state
    pub fn apply(&mut self, event: InputEvent) {
        let slot = match event.kind {
            InputKind::Up => &mut self.up,
            InputKind::Down => &mut self.down,
            InputKind::Left => &mut self.left,
            InputKind::Right => &mut self.right,
            InputKind::Button1 => &mut self.fire,
            InputKind::Button2 => return,
        };
        *slot = event.pressed;
    }

    /// Unit-ish steering vector (not normalized: diagonals are faster)
    pub fn steering(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.down, self.up))
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    position: Vec3,
    lives: u8,
    game_over: bool,
    /// Milliseconds since the last shot
    since_shot_ms: f32,
    fire_interval_ms: f32,
    speed: f32,
    bounds: Vec2,
    handle: Option<DrawableHandle>,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            position: Vec3::ZERO,
            lives: PLAYER_START_LIVES,
            game_over: false,
            since_shot_ms: tuning.player_fire_interval_ms,
            fire_interval_ms: tuning.player_fire_interval_ms,
            speed: tuning.player_speed,
            bounds: Vec2::new(tuning.player_bound_x, tuning.player_bound_y),
            handle: None,
        }
    }

    /// Add the ship to the scene (idempotent)
    pub fn attach(&mut self, scene: &mut SceneGraph) {
        if self.handle.is_none() {
            self.handle = Some(scene.add(ModelKind::PlayerShip, self.position));
        }
    }

    /// Take the ship out of the scene
    pub fn detach(&mut self, scene: &mut SceneGraph) {
        if let Some(handle) = self.handle.take() {
            scene.remove(handle);
        }
    }

    /// Fresh run: full lives, back at the origin, visible
    pub fn reset(&mut self, scene: &mut SceneGraph) {
        self.lives = PLAYER_START_LIVES;
        self.game_over = false;
        self.since_shot_ms = self.fire_interval_ms;
        self.position = Vec3::ZERO;
        if let Some(handle) = self.handle {
            scene.set_position(handle, self.position);
            scene.set_visible(handle, true);
        }
    }

    /// Move according to the held directions, staying inside the playfield
    pub fn steer(&mut self, intents: &Intents, dt: f32, scene: &mut SceneGraph) {
        let delta = intents.steering() * self.speed * dt;
        if delta == Vec2::ZERO {
            return;
        }
        self.position.x = (self.position.x + delta.x).clamp(-self.bounds.x, self.bounds.x);
        self.position.y = (self.position.y + delta.y).clamp(-self.bounds.y, self.bounds.y);
        if let Some(handle) = self.handle {
            scene.set_position(handle, self.position);
        }
    }

    /// Fire if the cooldown allows it
    pub fn try_shoot(&mut self) -> Option<Shot> {
        if self.game_over || self.since_shot_ms < self.fire_interval_ms {
            return None;
        }
        self.since_shot_ms = 0.0;
        Some(Shot {
            position: self.position + Vec3::X * MUZZLE_OFFSET,
            direction: Vec3::X,
        })
    }

    /// Advance the ship's clocks
    pub fn tick(&mut self, dt: f32) {
        self.since_shot_ms += secs_to_ms(dt);
    }

    /// Lose a life; at zero the run is over and the ship disappears
    pub fn take_damage(&mut self, scene: &mut SceneGraph) {
        self.lives = self.lives.saturating_sub(1);
        log::debug!("Player hit, {} lives left", self.lives);
        if self.lives == 0 {
            self.set_game_over(scene);
        }
    }

    /// End the run and hide the ship (it stays in the scene)
    pub fn set_game_over(&mut self, scene: &mut SceneGraph) {
        self.game_over = true;
        if let Some(handle) = self.handle {
            scene.set_visible(handle, false);
        }
    }

    /// Can enemy fire still hit us?
    pub fn is_targetable(&self) -> bool {
        !self.game_over
    }

    pub fn is_dead(&self) -> bool {
        self.lives == 0
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Teleport (used when setting up scenarios)
    pub fn set_position(&mut self, position: Vec3, scene: &mut SceneGraph) {
        self.position = position;
        if let Some(handle) = self.handle {
            scene.set_position(handle, position);
        }
    }

    pub fn set_lives(&mut self, lives: u8) {
        self.lives = lives;
    }

    pub fn handle(&self) -> Option<DrawableHandle> {
        self.handle
    }
}
