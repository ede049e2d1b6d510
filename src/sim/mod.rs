//! Simulation core
//!
//! All gameplay logic lives here. It is driven entirely by frame deltas:
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies beyond the scene graph and audio cues

pub mod arena;
pub mod background;
pub mod bullets;
pub mod collision;
pub mod effects;
pub mod enemy;
pub mod player;
pub mod spawner;

pub use arena::{EnemyArena, EnemyId};
pub use background::CloudBelt;
pub use bullets::{BulletContext, BulletReport, BulletSystem, Projectile, Shot};
pub use effects::{Explosion, ExplosionPool};
pub use enemy::{Enemy, EnemyKind, EnemyProfile, FireDirection, MotionPattern};
pub use player::{Intents, Player};
pub use spawner::{EnemySpawner, SpawnContext, SpawnReport};
