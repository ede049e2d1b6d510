//! Scrolling cloud belt along the bottom of the screen
//!
//! Clouds drift left and wrap around to the right edge with a fresh
//! random height offset.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::scene::{DrawableHandle, ModelKind, SceneGraph};

const CLOUD_COUNT: usize = 40;
const CLOUD_SPEED: f32 = 2.0;
const CLOUD_HEIGHT: f32 = 4.0;
const CLOUD_SPACING: f32 = 0.8;
const MAX_Y_VARIATION: f32 = 0.2;
const VIEWPORT_WIDTH: f32 = 25.0;

#[derive(Debug, Clone)]
struct Cloud {
    position: Vec3,
    handle: DrawableHandle,
}

#[derive(Debug, Clone)]
pub struct CloudBelt {
    clouds: Vec<Cloud>,
    rng: Pcg32,
}

impl CloudBelt {
    pub fn new(seed: u64) -> Self {
        Self {
            clouds: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    fn random_height(&mut self) -> f32 {
        -CLOUD_HEIGHT + self.rng.random_range(-MAX_Y_VARIATION..=MAX_Y_VARIATION)
    }

    /// Lay the belt out across the viewport (no-op if already shown)
    pub fn spawn(&mut self, scene: &mut SceneGraph) {
        if !self.clouds.is_empty() {
            return;
        }
        for i in 0..CLOUD_COUNT {
            let position = Vec3::new(
                -VIEWPORT_WIDTH / 2.0 + i as f32 * CLOUD_SPACING,
                self.random_height(),
                0.0,
            );
            let handle = scene.add(ModelKind::Cloud, position);
            self.clouds.push(Cloud { position, handle });
        }
    }

    pub fn advance(&mut self, dt: f32, scene: &mut SceneGraph) {
        let left_edge = -VIEWPORT_WIDTH / 2.0 - CLOUD_SPACING;
        let right_edge = VIEWPORT_WIDTH / 2.0 + CLOUD_SPACING;
        for i in 0..self.clouds.len() {
            let mut position = self.clouds[i].position;
            position.x -= CLOUD_SPEED * dt;
            if position.x < left_edge {
                position.x = right_edge;
                position.y = self.random_height();
            }
            let cloud = &mut self.clouds[i];
            cloud.position = position;
            scene.set_position(cloud.handle, position);
        }
    }

    pub fn clear(&mut self, scene: &mut SceneGraph) {
        for cloud in self.clouds.drain(..) {
            scene.remove(cloud.handle);
        }
    }

    pub fn len(&self) -> usize {
        self.clouds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clouds.is_empty()
    }
}
