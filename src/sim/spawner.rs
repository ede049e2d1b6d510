//! Enemy spawner and roster
//!
//! Spawns one enemy each time the randomized interval elapses, drives every
//! live enemy's AI and culls the ones that leave the playfield. Every
//! add/remove is mirrored into the bullet engine's target roster.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::arena::{EnemyArena, EnemyId};
use super::bullets::BulletSystem;
use super::enemy::{Enemy, EnemyKind};
use crate::Tuning;
use crate::audio::AudioCues;
use crate::consts::{ENEMY_CULL_X, ENEMY_SPAWN_X, ENEMY_SPAWN_Y_RANGE, HEAVY_SPAWN_Y};
use crate::scene::{ModelKind, SceneGraph};
use crate::secs_to_ms;

/// Collaborators the spawner drives during `advance`
pub struct SpawnContext<'a> {
    pub bullets: &'a mut BulletSystem,
    pub scene: &'a mut SceneGraph,
    pub audio: &'a mut dyn AudioCues,
}

/// What happened during one `advance`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpawnReport {
    pub spawned: Option<EnemyId>,
    /// Shots fired by enemies
    pub shots: u32,
    /// Enemies that flew off the left edge
    pub culled: Vec<EnemyId>,
}

#[derive(Debug, Clone)]
pub struct EnemySpawner {
    arena: EnemyArena,
    rng: Pcg32,
    /// Time since the last spawn (ms)
    elapsed_ms: f32,
    /// Gap until the next spawn (ms)
    interval_ms: f32,
    tuning: Tuning,
}

impl EnemySpawner {
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        Self {
            arena: EnemyArena::new(),
            rng: Pcg32::seed_from_u64(seed),
            elapsed_ms: 0.0,
            interval_ms: tuning.initial_spawn_interval_ms,
            tuning: tuning.clone(),
        }
    }

    /// Start the spawn schedule over (the first enemy waits the initial interval)
    pub fn restart(&mut self) {
        self.elapsed_ms = 0.0;
        self.interval_ms = self.tuning.initial_spawn_interval_ms;
    }

    pub fn advance(&mut self, dt: f32, ctx: &mut SpawnContext<'_>) -> SpawnReport {
        let mut report = SpawnReport::default();

        self.elapsed_ms += secs_to_ms(dt);
        if self.elapsed_ms >= self.interval_ms {
            let kind = EnemyKind::from_roll(self.rng.random::<f32>());
            let y = match kind {
                EnemyKind::Heavy => HEAVY_SPAWN_Y,
                _ => self
                    .rng
                    .random_range(-ENEMY_SPAWN_Y_RANGE..ENEMY_SPAWN_Y_RANGE),
            };
            let id = self.spawn_at(kind, Vec3::new(ENEMY_SPAWN_X, y, 0.0), ctx.bullets, ctx.scene);
            report.spawned = Some(id);

            self.elapsed_ms = 0.0;
            // Tuning fields are public, so the window may not have been sanitized
            let min = self.tuning.min_spawn_interval_ms.max(0.0);
            let max = self.tuning.max_spawn_interval_ms.max(min);
            self.interval_ms = self.rng.random_range(min..=max);
            log::debug!("Next spawn in {:.0} ms", self.interval_ms);
        }

        for enemy in self.arena.iter_mut() {
            if let Some(shot) = enemy.advance(dt) {
                if ctx.bullets.fire(shot, true, ctx.scene, ctx.audio) {
                    report.shots += 1;
                }
            }
            ctx.scene.set_position(enemy.handle, enemy.position);
        }

        let off_screen: Vec<EnemyId> = self
            .arena
            .iter()
            .filter(|e| e.position.x < ENEMY_CULL_X)
            .map(|e| e.id)
            .collect();
        for id in off_screen {
            if self.remove_enemy(id, ctx.scene).is_some() {
                ctx.bullets.remove_enemy(id);
                report.culled.push(id);
            }
        }

        report
    }

    /// Put an enemy into play at `position`
    pub fn spawn_at(
        &mut self,
        kind: EnemyKind,
        position: Vec3,
        bullets: &mut BulletSystem,
        scene: &mut SceneGraph,
    ) -> EnemyId {
        let handle = scene.add(ModelKind::EnemyShip(kind), position);
        let tuning = &self.tuning;
        let id = self
            .arena
            .insert_with(|id| Enemy::new(id, kind, position, handle, tuning));
        bullets.add_enemy(id);
        log::info!("Spawned {:?} enemy {:?} at {:?}", kind, id, position);
        id
    }

    /// Drop an enemy and its drawable. The caller keeps the bullet roster in step.
    pub fn remove_enemy(&mut self, id: EnemyId, scene: &mut SceneGraph) -> Option<Enemy> {
        let enemy = self.arena.remove(id)?;
        scene.remove(enemy.handle);
        Some(enemy)
    }

    /// Remove every enemy, telling the bullet engine about each one
    pub fn clear(&mut self, bullets: &mut BulletSystem, scene: &mut SceneGraph) {
        for enemy in self.arena.drain() {
            scene.remove(enemy.handle);
            bullets.remove_enemy(enemy.id);
        }
    }

    pub fn enemies(&self) -> &EnemyArena {
        &self.arena
    }

    pub fn position(&self, id: EnemyId) -> Option<Vec3> {
        self.arena.get(id).map(|e| e.position)
    }

    /// Milliseconds until the next spawn
    pub fn time_to_next_spawn(&self) -> f32 {
        (self.interval_ms - self.elapsed_ms).max(0.0)
    }
}
