//! Data-driven game balance
//!
//! Every gameplay number that a designer may want to tweak lives here.
//! Missing fields in a JSON override fall back to the defaults below.

use serde::{Deserialize, Serialize};

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Projectile speed, shared by player and enemy fire (units/s)
    pub bullet_speed: f32,
    /// Distance below which a projectile hits a ship
    pub collision_distance: f32,
    /// Projectiles are removed once this far from where they spawned
    pub bullet_max_range: f32,

    /// Player movement speed (units/s)
    pub player_speed: f32,
    /// Minimum time between player shots (ms)
    pub player_fire_interval_ms: f32,
    /// Half-extent of the area the player can fly in (x)
    pub player_bound_x: f32,
    /// Half-extent of the area the player can fly in (y)
    pub player_bound_y: f32,

    /// Standard enemy speed; the other variants scale from it (units/s)
    pub enemy_base_speed: f32,
    /// Time between enemy shots (ms)
    pub enemy_fire_interval_ms: f32,

    /// Delay before the first enemy of a run (ms)
    pub initial_spawn_interval_ms: f32,
    /// Shortest randomized gap between spawns (ms)
    pub min_spawn_interval_ms: f32,
    /// Longest randomized gap between spawns (ms)
    pub max_spawn_interval_ms: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            bullet_speed: 12.0,
            collision_distance: 1.0,
            bullet_max_range: 20.0,

            player_speed: 6.0,
            player_fire_interval_ms: 250.0,
            player_bound_x: 9.0,
            player_bound_y: 4.5,

            enemy_base_speed: 2.0,
            enemy_fire_interval_ms: 1000.0,

            initial_spawn_interval_ms: 2000.0,
            min_spawn_interval_ms: 1000.0,
            max_spawn_interval_ms: 3000.0,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut tuning: Tuning = serde_json::from_str(json)?;
        tuning.sanitize();
        Ok(tuning)
    }

    /// Keep the spawn window well-formed
    fn sanitize(&mut self) {
        if self.max_spawn_interval_ms < self.min_spawn_interval_ms {
            std::mem::swap(&mut self.min_spawn_interval_ms, &mut self.max_spawn_interval_ms);
        }
        self.min_spawn_interval_ms = self.min_spawn_interval_ms.max(0.0);
        self.max_spawn_interval_ms = self.max_spawn_interval_ms.max(self.min_spawn_interval_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "bullet_speed": 30.0 }"#).unwrap();
        assert_eq!(tuning.bullet_speed, 30.0);
        assert_eq!(tuning.collision_distance, 1.0);
        assert_eq!(tuning.max_spawn_interval_ms, 3000.0);
    }

    #[test]
    fn test_inverted_spawn_window_is_swapped() {
        let tuning = Tuning::from_json(
            r#"{ "min_spawn_interval_ms": 4000.0, "max_spawn_interval_ms": 500.0 }"#,
        )
        .unwrap();
        assert_eq!(tuning.min_spawn_interval_ms, 500.0);
        assert_eq!(tuning.max_spawn_interval_ms, 4000.0);
    }

    #[test]
    fn test_negative_spawn_window_collapses_to_zero() {
        let tuning = Tuning::from_json(
            r#"{ "min_spawn_interval_ms": -500.0, "max_spawn_interval_ms": -100.0 }"#,
        )
        .unwrap();
        assert_eq!(tuning.min_spawn_interval_ms, 0.0);
        assert_eq!(tuning.max_spawn_interval_ms, 0.0);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Tuning::from_json("{ not json").is_err());
    }
}
