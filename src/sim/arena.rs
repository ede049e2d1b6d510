//! Enemy storage keyed by stable id
//!
//! Ids are handed out in increasing order and never reused, so a stale id
//! simply fails to resolve instead of pointing at a different enemy.

use serde::{Deserialize, Serialize};

use super::enemy::Enemy;

/// Stable enemy identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(pub u32);

/// Live enemies, sorted by id for deterministic iteration
#[derive(Debug, Clone, Default)]
pub struct EnemyArena {
    enemies: Vec<Enemy>,
    next_id: u32,
}

impl EnemyArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an id and store the enemy built for it
    pub fn insert_with(&mut self, build: impl FnOnce(EnemyId) -> Enemy) -> EnemyId {
        let id = EnemyId(self.next_id);
        self.next_id += 1;
        self.enemies.push(build(id));
        id
    }

    pub fn get(&self, id: EnemyId) -> Option<&Enemy> {
        self.index_of(id).map(|i| &self.enemies[i])
    }

    pub fn get_mut(&mut self, id: EnemyId) -> Option<&mut Enemy> {
        self.index_of(id).map(move |i| &mut self.enemies[i])
    }

    pub fn remove(&mut self, id: EnemyId) -> Option<Enemy> {
        self.index_of(id).map(|i| self.enemies.remove(i))
    }

    pub fn contains(&self, id: EnemyId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn ids(&self) -> impl Iterator<Item = EnemyId> + '_ {
        self.enemies.iter().map(|e| e.id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Enemy> {
        self.enemies.iter_mut()
    }

    /// Remove every enemy, returning them in id order
    pub fn drain(&mut self) -> Vec<Enemy> {
        std::mem::take(&mut self.enemies)
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    fn index_of(&self, id: EnemyId) -> Option<usize> {
        self.enemies.binary_search_by_key(&id, |e| e.id).ok()
    }
}
