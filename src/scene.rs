//! Retained scene graph
//!
//! The simulation never draws anything. Each live entity owns a
//! `DrawableHandle` into this graph and keeps its node's transform current;
//! the renderer walks `nodes()` once per frame.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::sim::EnemyKind;

/// Opaque handle to a node in the scene graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DrawableHandle(u32);

/// Which model the renderer should draw for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelKind {
    /// The player's spaceship
    PlayerShip,
    /// An enemy ship of the given variant
    EnemyShip(EnemyKind),
    /// A projectile (enemy fire is drawn differently)
    Bullet { enemy: bool },
    /// Fireball + white flash
    Explosion,
    /// One puff of the scrolling cloud belt
    Cloud,
}

/// A drawable node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneNode {
    pub handle: DrawableHandle,
    pub model: ModelKind,
    pub position: Vec3,
    pub visible: bool,
    /// Uniform scale
    pub scale: f32,
    /// 0 = invisible, 1 = opaque
    pub opacity: f32,
    /// Secondary opacity (explosion flash); 0 when unused
    pub flash: f32,
}

/// Scene graph (nodes sorted by handle for stable draw order)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
    next_handle: u32,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node and return its handle
    pub fn add(&mut self, model: ModelKind, position: Vec3) -> DrawableHandle {
        let handle = DrawableHandle(self.next_handle);
        self.next_handle += 1;
        self.nodes.push(SceneNode {
            handle,
            model,
            position,
            visible: true,
            scale: 1.0,
            opacity: 1.0,
            flash: 0.0,
        });
        handle
    }

    /// Remove a node; removing an unknown handle is a no-op
    pub fn remove(&mut self, handle: DrawableHandle) -> bool {
        match self.index_of(handle) {
            Some(i) => {
                self.nodes.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, handle: DrawableHandle) -> Option<&SceneNode> {
        self.index_of(handle).map(|i| &self.nodes[i])
    }

    pub fn get_mut(&mut self, handle: DrawableHandle) -> Option<&mut SceneNode> {
        self.index_of(handle).map(move |i| &mut self.nodes[i])
    }

    pub fn set_position(&mut self, handle: DrawableHandle, position: Vec3) {
        if let Some(node) = self.get_mut(handle) {
            node.position = position;
        }
    }

    pub fn set_visible(&mut self, handle: DrawableHandle, visible: bool) {
        if let Some(node) = self.get_mut(handle) {
            node.visible = visible;
        }
    }

    pub fn contains(&self, handle: DrawableHandle) -> bool {
        self.index_of(handle).is_some()
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Count nodes of a given model
    pub fn count(&self, model: ModelKind) -> usize {
        self.nodes.iter().filter(|n| n.model == model).count()
    }

    // Handles are issued in increasing order and nodes are only appended,
    // so the list stays sorted.
    fn index_of(&self, handle: DrawableHandle) -> Option<usize> {
        self.nodes.binary_search_by_key(&handle, |n| n.handle).ok()
    }
}
