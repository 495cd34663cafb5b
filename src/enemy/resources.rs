//! Enemy domain: shared enemy tuning.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct EnemyTuning {
    pub patrol_speed: f32,
    pub wait_time: f32,
    pub chase_speed: f32,
    pub detection_range: f32,
    pub attack_range: f32,
    pub contact_damage: i32,
    pub damage_interval: f32,
    pub max_health: i32,
    pub knockback_force: f32,
    /// How far below the leading edge the ledge probe reaches.
    pub ledge_probe_depth: f32,
    /// Distance at which a patrol waypoint counts as reached.
    pub arrive_distance: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            patrol_speed: 2.0,
            wait_time: 1.0,
            chase_speed: 4.0,
            detection_range: 5.0,
            attack_range: 1.0,
            contact_damage: 1,
            damage_interval: 1.0,
            max_health: 3,
            knockback_force: 8.0,
            ledge_probe_depth: 0.2,
            arrive_distance: 0.3,
        }
    }
}
