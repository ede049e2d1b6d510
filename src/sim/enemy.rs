//! Enemy variants and their per-frame AI
//!
//! Variants differ only in data: each maps to an `EnemyProfile` and a single
//! `Enemy::advance` routine branches on it.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::arena::EnemyId;
use super::bullets::Shot;
use crate::Tuning;
use crate::consts::{MUZZLE_OFFSET, SWEEP_AMPLITUDE};
use crate::scene::DrawableHandle;
use crate::secs_to_ms;

/// Enemy archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Sweeps up and down while drifting in
    Standard,
    /// Dives straight in at triple speed
    Fast,
    /// "BigDumper": slow and bombs straight down
    Heavy,
}

/// How an enemy moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionPattern {
    /// Oscillate vertically around the spawn height while advancing
    Sweep,
    /// Fly in a straight horizontal line
    Straight,
}

/// Where an enemy's shots go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireDirection {
    /// Toward the player, out of the ship's tail
    Behind,
    /// Straight down
    Below,
}

impl FireDirection {
    pub fn vector(self) -> Vec3 {
        match self {
            FireDirection::Behind => Vec3::NEG_X,
            FireDirection::Below => Vec3::NEG_Y,
        }
    }
}

/// Static parameters of a variant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyProfile {
    /// Multiplier on `Tuning::enemy_base_speed`
    pub speed_factor: f32,
    pub motion: MotionPattern,
    pub fire: FireDirection,
}

impl EnemyKind {
    pub fn profile(self) -> EnemyProfile {
        match self {
            EnemyKind::Standard => EnemyProfile {
                speed_factor: 1.0,
                motion: MotionPattern::Sweep,
                fire: FireDirection::Behind,
            },
            EnemyKind::Fast => EnemyProfile {
                speed_factor: 3.0,
                motion: MotionPattern::Straight,
                fire: FireDirection::Behind,
            },
            EnemyKind::Heavy => EnemyProfile {
                speed_factor: 1.5,
                motion: MotionPattern::Straight,
                fire: FireDirection::Below,
            },
        }
    }

    /// Pick a variant from a uniform draw in [0, 1):
    /// 20% fast, 10% heavy, 70% standard
    pub fn from_roll(roll: f32) -> Self {
        if roll < 0.2 {
            EnemyKind::Fast
        } else if roll < 0.3 {
            EnemyKind::Heavy
        } else {
            EnemyKind::Standard
        }
    }
}

/// A live enemy
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: EnemyId,
    pub kind: EnemyKind,
    pub position: Vec3,
    /// Where it entered; the sweep oscillates around `origin.y`
    pub origin: Vec3,
    /// Current sweep direction (+1 up, -1 down)
    pub sweep_dir: f32,
    /// Milliseconds since the last shot
    pub since_shot_ms: f32,
    pub speed: f32,
    pub fire_interval_ms: f32,
    pub handle: DrawableHandle,
}

impl Enemy {
    pub fn new(
        id: EnemyId,
        kind: EnemyKind,
        origin: Vec3,
        handle: DrawableHandle,
        tuning: &Tuning,
    ) -> Self {
        Self {
            id,
            kind,
            position: origin,
            origin,
            sweep_dir: 1.0,
            // Ready to fire on the first update
            since_shot_ms: tuning.enemy_fire_interval_ms,
            speed: tuning.enemy_base_speed * kind.profile().speed_factor,
            fire_interval_ms: tuning.enemy_fire_interval_ms,
            handle,
        }
    }

    /// Move and maybe fire. Returns the shot to hand to the bullet engine.
    pub fn advance(&mut self, dt: f32) -> Option<Shot> {
        let profile = self.kind.profile();
        let step = self.speed * dt;

        match profile.motion {
            MotionPattern::Sweep => {
                self.position.y += step * self.sweep_dir;
                self.position.x -= step;
                // Only turn while heading away so an overshoot can't flip-flop
                let offset = self.position.y - self.origin.y;
                if offset * self.sweep_dir >= SWEEP_AMPLITUDE {
                    self.sweep_dir = -self.sweep_dir;
                }
            }
            MotionPattern::Straight => {
                self.position.x -= step;
            }
        }

        self.since_shot_ms += secs_to_ms(dt);
        if self.since_shot_ms >= self.fire_interval_ms {
            self.since_shot_ms = 0.0;
            let direction = profile.fire.vector();
            return Some(Shot {
                position: self.position + direction * MUZZLE_OFFSET,
                direction,
            });
        }
        None
    }

    /// Put a standard enemy back at its entry point, heading up.
    /// Other variants have no respawn behaviour. The spawner never recycles
    /// enemies, so nothing in a run calls this yet.
    pub fn respawn(&mut self) {
        if self.kind == EnemyKind::Standard {
            self.position = self.origin;
            self.sweep_dir = 1.0;
        }
    }
}
