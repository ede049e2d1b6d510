//! Explosion effects
//!
//! Purely visual: an explosion grows and fades over its lifetime and is
//! dropped when done. Nothing in gameplay reads them back.

use glam::Vec3;

use crate::audio::AudioCues;
use crate::consts::{EXPLOSION_DURATION, EXPLOSION_FLASH_DURATION, EXPLOSION_MAX_SCALE};
use crate::scene::{DrawableHandle, ModelKind, SceneGraph};

#[derive(Debug, Clone)]
pub struct Explosion {
    pub position: Vec3,
    /// Seconds since it went off
    pub age: f32,
    handle: DrawableHandle,
}

impl Explosion {
    /// 0 at detonation, 1 when finished
    pub fn progress(&self) -> f32 {
        (self.age / EXPLOSION_DURATION).min(1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.age >= EXPLOSION_DURATION
    }

    /// Fireball scale: eases out from 1 to the max
    pub fn scale(&self) -> f32 {
        let p = self.progress();
        1.0 + (EXPLOSION_MAX_SCALE - 1.0) * (1.0 - (1.0 - p).powi(2))
    }

    /// Fireball opacity: fades out with the square of progress
    pub fn opacity(&self) -> f32 {
        1.0 - self.progress().powi(2)
    }

    /// Opacity of the white core flash (gone after the first quarter second)
    pub fn flash(&self) -> f32 {
        if self.age <= EXPLOSION_FLASH_DURATION {
            1.0 - self.age / EXPLOSION_FLASH_DURATION
        } else {
            0.0
        }
    }
}

/// All running explosions
#[derive(Debug, Clone, Default)]
pub struct ExplosionPool {
    explosions: Vec<Explosion>,
}

impl ExplosionPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, position: Vec3, scene: &mut SceneGraph, audio: &mut dyn AudioCues) {
        let handle = scene.add(ModelKind::Explosion, position);
        if let Some(node) = scene.get_mut(handle) {
            node.flash = 1.0;
        }
        audio.play_explosion();
        self.explosions.push(Explosion {
            position,
            age: 0.0,
            handle,
        });
        log::debug!("Explosion at {:?} ({} active)", position, self.explosions.len());
    }

    /// Age every explosion and drop the finished ones
    pub fn advance(&mut self, dt: f32, scene: &mut SceneGraph) {
        self.explosions.retain_mut(|explosion| {
            explosion.age += dt;
            if explosion.is_finished() {
                scene.remove(explosion.handle);
                return false;
            }
            if let Some(node) = scene.get_mut(explosion.handle) {
                node.scale = explosion.scale();
                node.opacity = explosion.opacity();
                node.flash = explosion.flash();
            }
            true
        });
    }

    pub fn clear(&mut self, scene: &mut SceneGraph) {
        for explosion in self.explosions.drain(..) {
            scene.remove(explosion.handle);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Explosion> {
        self.explosions.iter()
    }

    pub fn len(&self) -> usize {
        self.explosions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.explosions.is_empty()
    }
}
