//! Bullet and collision engine
//!
//! Owns every live projectile. Each frame all bullets move first, then each
//! one is resolved exactly once: it either hits something, runs out of range,
//! or survives to the next frame.

use glam::Vec3;

use super::arena::EnemyId;
use super::collision::{first_hit, out_of_range, segment_within};
use super::effects::ExplosionPool;
use super::player::Player;
use super::spawner::EnemySpawner;
use crate::Tuning;
use crate::audio::AudioCues;
use crate::consts::ENEMY_KILL_SCORE;
use crate::scene::{DrawableHandle, ModelKind, SceneGraph};
use crate::score::ScoreTracker;

/// A request to fire, produced by ships and handed to `BulletSystem::fire`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    pub position: Vec3,
    pub direction: Vec3,
}

#[derive(Debug, Clone)]
pub struct Projectile {
    /// Fired by an enemy (hurts the player) rather than by the player
    pub enemy: bool,
    pub position: Vec3,
    /// Where it was fired from; range is measured from here
    pub origin: Vec3,
    /// Where the last move started; hits are tested along `previous..position`
    pub previous: Vec3,
    /// Unit length
    pub direction: Vec3,
    pub speed: f32,
    handle: DrawableHandle,
}

/// Everything a bullet can touch during `advance`
pub struct BulletContext<'a> {
    pub player: Option<&'a mut Player>,
    pub spawner: &'a mut EnemySpawner,
    pub scores: &'a mut ScoreTracker,
    pub explosions: &'a mut ExplosionPool,
    pub scene: &'a mut SceneGraph,
    pub audio: &'a mut dyn AudioCues,
}

/// What happened during one `advance`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulletReport {
    /// Enemy bullets that hit the player
    pub player_hits: u32,
    /// Enemies shot down, in resolution order
    pub kills: Vec<EnemyId>,
    /// Bullets dropped for leaving their range
    pub expired: u32,
}

#[derive(Debug, Clone)]
pub struct BulletSystem {
    bullets: Vec<Projectile>,
    /// Ids of the enemies player bullets can hit, in spawn order
    roster: Vec<EnemyId>,
    speed: f32,
    collision_distance: f32,
    max_range: f32,
}

impl BulletSystem {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            bullets: Vec::new(),
            roster: Vec::new(),
            speed: tuning.bullet_speed,
            collision_distance: tuning.collision_distance,
            max_range: tuning.bullet_max_range,
        }
    }

    /// Create a projectile. A zero direction fires nothing and returns false.
    pub fn spawn(
        &mut self,
        position: Vec3,
        direction: Vec3,
        enemy: bool,
        scene: &mut SceneGraph,
        audio: &mut dyn AudioCues,
    ) -> bool {
        let Some(direction) = direction.try_normalize() else {
            log::debug!("Ignoring bullet with zero direction at {:?}", position);
            return false;
        };
        audio.play_bullet();
        let handle = scene.add(ModelKind::Bullet { enemy }, position);
        self.bullets.push(Projectile {
            enemy,
            position,
            origin: position,
            previous: position,
            direction,
            speed: self.speed,
            handle,
        });
        true
    }

    pub fn fire(
        &mut self,
        shot: Shot,
        enemy: bool,
        scene: &mut SceneGraph,
        audio: &mut dyn AudioCues,
    ) -> bool {
        self.spawn(shot.position, shot.direction, enemy, scene, audio)
    }

    /// Start tracking an enemy as a target (duplicates are ignored)
    pub fn add_enemy(&mut self, id: EnemyId) {
        if !self.roster.contains(&id) {
            self.roster.push(id);
        }
    }

    pub fn remove_enemy(&mut self, id: EnemyId) {
        self.roster.retain(|&tracked| tracked != id);
    }

    pub fn tracked_enemies(&self) -> &[EnemyId] {
        &self.roster
    }

    /// Move every bullet, then resolve hits and range
    pub fn advance(&mut self, dt: f32, ctx: &mut BulletContext<'_>) -> BulletReport {
        let mut report = BulletReport::default();

        for bullet in &mut self.bullets {
            bullet.previous = bullet.position;
            bullet.position += bullet.direction * bullet.speed * dt;
            ctx.scene.set_position(bullet.handle, bullet.position);
        }

        let bullets = std::mem::take(&mut self.bullets);
        let mut survivors = Vec::with_capacity(bullets.len());
        for bullet in bullets {
            if self.resolve(&bullet, ctx, &mut report) {
                ctx.scene.remove(bullet.handle);
            } else {
                survivors.push(bullet);
            }
        }
        self.bullets = survivors;
        report
    }

    /// Returns true if the bullet is used up
    fn resolve(
        &mut self,
        bullet: &Projectile,
        ctx: &mut BulletContext<'_>,
        report: &mut BulletReport,
    ) -> bool {
        if bullet.enemy {
            if let Some(player) = ctx.player.as_deref_mut() {
                if player.is_targetable()
                    && segment_within(
                        bullet.previous,
                        bullet.position,
                        player.position(),
                        self.collision_distance,
                    )
                {
                    player.take_damage(ctx.scene);
                    report.player_hits += 1;
                    return true;
                }
            }
        } else {
            let arena = ctx.spawner.enemies();
            let candidates = self
                .roster
                .iter()
                .filter_map(|&id| arena.get(id).map(|e| (id, e.position)));
            if let Some((id, position)) = first_hit(
                bullet.previous,
                bullet.position,
                candidates,
                self.collision_distance,
            ) {
                self.remove_enemy(id);
                ctx.spawner.remove_enemy(id, ctx.scene);
                ctx.explosions.spawn(position, ctx.scene, ctx.audio);
                ctx.scores.add_score(ENEMY_KILL_SCORE);
                log::debug!("Enemy {:?} shot down at {:?}", id, position);
                report.kills.push(id);
                return true;
            }
        }

        if out_of_range(bullet.origin, bullet.position, self.max_range) {
            report.expired += 1;
            return true;
        }
        false
    }

    /// Drop every projectile. No scoring or explosions.
    pub fn clear(&mut self, scene: &mut SceneGraph) {
        for bullet in self.bullets.drain(..) {
            scene.remove(bullet.handle);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.bullets.iter()
    }

    pub fn len(&self) -> usize {
        self.bullets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bullets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioSystem, SoundCue};
    use crate::sim::EnemyKind;
    use proptest::prelude::*;

    struct World {
        bullets: BulletSystem,
        spawner: EnemySpawner,
        player: Player,
        scores: ScoreTracker,
        explosions: ExplosionPool,
        scene: SceneGraph,
        audio: AudioSystem,
    }

    impl World {
        fn new() -> Self {
            let tuning = Tuning::default();
            let mut scene = SceneGraph::new();
            let mut player = Player::new(&tuning);
            player.attach(&mut scene);
            player.set_position(Vec3::new(-5.0, -3.0, 0.0), &mut scene);
            Self {
                bullets: BulletSystem::new(&tuning),
                spawner: EnemySpawner::new(1, &tuning),
                player,
                scores: ScoreTracker::new(),
                explosions: ExplosionPool::new(),
                scene,
                audio: AudioSystem::new(),
            }
        }

        fn advance(&mut self, dt: f32) -> BulletReport {
            let mut ctx = BulletContext {
                player: Some(&mut self.player),
                spawner: &mut self.spawner,
                scores: &mut self.scores,
                explosions: &mut self.explosions,
                scene: &mut self.scene,
                audio: &mut self.audio,
            };
            self.bullets.advance(dt, &mut ctx)
        }

        fn shoot(&mut self, position: Vec3, direction: Vec3, enemy: bool) -> bool {
            self.bullets
                .spawn(position, direction, enemy, &mut self.scene, &mut self.audio)
        }

        fn enemy_at(&mut self, position: Vec3) -> EnemyId {
            self.spawner.spawn_at(
                EnemyKind::Standard,
                position,
                &mut self.bullets,
                &mut self.scene,
            )
        }
    }

    #[test]
    fn test_spawn_normalizes_and_cues() {
        let mut w = World::new();
        assert!(w.shoot(Vec3::ZERO, Vec3::new(3.0, 4.0, 0.0), false));
        let b = w.bullets.iter().next().unwrap();
        assert!((b.direction.length() - 1.0).abs() < 1e-6);
        assert_eq!(b.speed, Tuning::default().bullet_speed);
        assert_eq!(w.audio.drain_cues(), vec![SoundCue::Bullet]);
        assert_eq!(w.scene.count(ModelKind::Bullet { enemy: false }), 1);
    }

    #[test]
    fn test_zero_direction_is_rejected() {
        let mut w = World::new();
        assert!(!w.shoot(Vec3::ZERO, Vec3::ZERO, true));
        assert!(w.bullets.is_empty());
        assert!(w.audio.pending().is_empty());
        assert_eq!(w.scene.count(ModelKind::Bullet { enemy: true }), 0);
    }

    #[test]
    fn test_player_bullet_kills_enemy() {
        let mut w = World::new();
        let id = w.enemy_at(Vec3::new(1.0, 0.0, 0.0));
        w.shoot(Vec3::ZERO, Vec3::X, false);
        w.audio.drain_cues();

        // 12 u/s for 1/12 s lands exactly on the enemy
        let report = w.advance(1.0 / 12.0);
        assert_eq!(report.kills, vec![id]);
        assert_eq!(w.scores.score(), ENEMY_KILL_SCORE);
        assert!(w.bullets.is_empty());
        assert!(w.bullets.tracked_enemies().is_empty());
        assert!(w.spawner.enemies().is_empty());
        assert_eq!(w.explosions.len(), 1);
        assert_eq!(w.audio.drain_cues(), vec![SoundCue::Explosion]);
        assert_eq!(w.scene.count(ModelKind::EnemyShip(EnemyKind::Standard)), 0);
        assert_eq!(w.scene.count(ModelKind::Bullet { enemy: false }), 0);
    }

    #[test]
    fn test_fast_bullet_cannot_skip_enemy() {
        let mut w = World::new();
        let id = w.enemy_at(Vec3::new(1.0, 0.0, 0.0));
        w.shoot(Vec3::ZERO, Vec3::X, false);
        w.audio.drain_cues();

        // 3 units in one frame: the bullet ends 2 units past the enemy
        let report = w.advance(0.25);
        assert_eq!(report.kills, vec![id]);
        assert_eq!(w.scores.score(), ENEMY_KILL_SCORE);
        assert!(w.bullets.is_empty());
        assert!(w.bullets.tracked_enemies().is_empty());
        assert!(w.spawner.enemies().is_empty());
        assert_eq!(w.explosions.len(), 1);
        assert_eq!(w.audio.drain_cues(), vec![SoundCue::Explosion]);
    }

    #[test]
    fn test_fast_enemy_bullet_cannot_skip_player() {
        let mut w = World::new();
        let target = w.player.position();
        w.shoot(target + Vec3::new(3.0, 0.0, 0.0), Vec3::NEG_X, true);
        // 6 units in one frame, starting and ending 3 units from the player
        let report = w.advance(0.5);
        assert_eq!(report.player_hits, 1);
        assert_eq!(w.player.lives(), 2);
        assert!(w.bullets.is_empty());
    }

    #[test]
    fn test_fast_bullet_misses_enemy_off_its_path() {
        let mut w = World::new();
        w.enemy_at(Vec3::new(1.5, 1.2, 0.0));
        w.shoot(Vec3::ZERO, Vec3::X, false);
        let report = w.advance(0.25);
        assert!(report.kills.is_empty());
        assert_eq!(w.spawner.enemies().len(), 1);
        assert_eq!(w.bullets.len(), 1);
        assert_eq!(w.bullets.iter().next().unwrap().previous, Vec3::ZERO);
    }

    #[test]
    fn test_first_enemy_in_roster_order_wins() {
        let mut w = World::new();
        let first = w.enemy_at(Vec3::new(0.6, 0.0, 0.0));
        let second = w.enemy_at(Vec3::new(0.4, 0.0, 0.0));
        w.shoot(Vec3::ZERO, Vec3::X, false);
        let report = w.advance(0.0);
        assert_eq!(report.kills, vec![first]);
        assert_eq!(w.bullets.tracked_enemies(), &[second]);
        assert_eq!(w.scores.score(), ENEMY_KILL_SCORE);
    }

    #[test]
    fn test_enemy_bullet_hits_player_once() {
        let mut w = World::new();
        let target = w.player.position();
        w.shoot(target + Vec3::new(0.5, 0.0, 0.0), Vec3::NEG_X, true);
        let report = w.advance(0.0);
        assert_eq!(report.player_hits, 1);
        assert_eq!(w.player.lives(), 2);
        assert!(w.bullets.is_empty());

        let report = w.advance(0.1);
        assert_eq!(report.player_hits, 0);
        assert_eq!(w.player.lives(), 2);
    }

    #[test]
    fn test_last_life_ends_run() {
        let mut w = World::new();
        w.player.set_lives(1);
        let target = w.player.position();
        w.shoot(target, Vec3::NEG_Y, true);
        w.shoot(target, Vec3::NEG_Y, true);
        let report = w.advance(0.0);
        // The second bullet finds nobody to hit
        assert_eq!(report.player_hits, 1);
        assert_eq!(w.player.lives(), 0);
        assert!(w.player.is_game_over());
        assert_eq!(w.bullets.len(), 1);
    }

    #[test]
    fn test_enemy_bullets_pass_through_enemies() {
        let mut w = World::new();
        w.enemy_at(Vec3::new(3.0, 3.0, 0.0));
        w.shoot(Vec3::new(3.0, 3.0, 0.0), Vec3::NEG_X, true);
        let report = w.advance(0.0);
        assert!(report.kills.is_empty());
        assert_eq!(w.spawner.enemies().len(), 1);
        assert_eq!(w.bullets.len(), 1);
    }

    #[test]
    fn test_player_bullets_ignore_player() {
        let mut w = World::new();
        let target = w.player.position();
        w.shoot(target, Vec3::X, false);
        w.advance(0.0);
        assert_eq!(w.player.lives(), 3);
        assert_eq!(w.bullets.len(), 1);
    }

    #[test]
    fn test_no_player_still_kills_enemies() {
        let mut w = World::new();
        w.enemy_at(Vec3::new(0.5, 0.0, 0.0));
        w.shoot(Vec3::ZERO, Vec3::X, false);
        w.shoot(Vec3::new(0.0, 2.0, 0.0), Vec3::X, true);
        let mut ctx = BulletContext {
            player: None,
            spawner: &mut w.spawner,
            scores: &mut w.scores,
            explosions: &mut w.explosions,
            scene: &mut w.scene,
            audio: &mut w.audio,
        };
        let report = w.bullets.advance(0.0, &mut ctx);
        assert_eq!(report.kills.len(), 1);
        assert_eq!(w.bullets.len(), 1);
    }

    #[test]
    fn test_bullets_expire_past_range() {
        let mut w = World::new();
        w.shoot(Vec3::new(50.0, 50.0, 0.0), Vec3::Y, false);
        let mut expired = 0;
        let mut frames = 0;
        while !w.bullets.is_empty() {
            expired += w.advance(0.1).expired;
            frames += 1;
            assert!(frames < 100);
        }
        assert_eq!(expired, 1);
        // 20 units at 12 u/s takes just under 17 frames of 0.1 s
        assert_eq!(frames, 17);
        assert!(w.scene.count(ModelKind::Bullet { enemy: false }) == 0);
    }

    #[test]
    fn test_clear_has_no_side_effects() {
        let mut w = World::new();
        w.enemy_at(Vec3::new(0.5, 0.0, 0.0));
        w.shoot(Vec3::ZERO, Vec3::X, false);
        w.shoot(Vec3::ZERO, Vec3::NEG_X, true);
        w.audio.drain_cues();
        w.bullets.clear(&mut w.scene);
        assert!(w.bullets.is_empty());
        assert_eq!(w.scores.score(), 0);
        assert!(w.explosions.is_empty());
        assert!(w.audio.pending().is_empty());
        assert_eq!(w.spawner.enemies().len(), 1);
        assert_eq!(w.bullets.tracked_enemies().len(), 1);
    }

    #[test]
    fn test_roster_ignores_duplicates() {
        let mut bullets = BulletSystem::new(&Tuning::default());
        bullets.add_enemy(EnemyId(4));
        bullets.add_enemy(EnemyId(4));
        bullets.add_enemy(EnemyId(5));
        assert_eq!(bullets.tracked_enemies(), &[EnemyId(4), EnemyId(5)]);
        bullets.remove_enemy(EnemyId(4));
        bullets.remove_enemy(EnemyId(9));
        assert_eq!(bullets.tracked_enemies(), &[EnemyId(5)]);
    }

    proptest! {
        #[test]
        fn test_position_follows_direction_speed_dt(
            x in -5.0f32..5.0,
            y in -5.0f32..5.0,
            dx in -1.0f32..1.0,
            dy in -1.0f32..1.0,
            dt in 0.0f32..0.1,
        ) {
            let direction = Vec3::new(dx, dy, 0.0);
            prop_assume!(direction.length() > 0.01);
            let mut w = World::new();
            let start = Vec3::new(x, y, 0.0);
            w.shoot(start, direction, false);
            w.advance(dt);

            let expected = start + direction.normalize() * Tuning::default().bullet_speed * dt;
            let bullet = w.bullets.iter().next().unwrap();
            prop_assert!(bullet.position.distance(expected) < 1e-4);
        }
    }
}
