//! Enemy domain: patrol AI, enemy health, and contact damage.

mod components;
mod resources;
mod systems;

#[cfg(test)]
mod tests;

pub use components::{
    next_ai_state, AiState, ContactDamage, DamageFlash, Enemy, EnemyAi, EnemyHealth,
};
pub use resources::EnemyTuning;

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::core::GameState;
use crate::movement::GameLayer;

pub const ENEMY_SIZE: Vec2 = Vec2::new(0.8, 0.8);
pub const ENEMY_COLOR: Color = Color::srgb(0.8, 0.3, 0.3);

/// Spawn one patrol enemy walking between `point_a` and `point_b`.
pub fn spawn_enemy(commands: &mut Commands, tuning: &EnemyTuning, point_a: Vec2, point_b: Vec2) {
    commands.spawn((
        (
            Enemy,
            EnemyAi::new(point_a, point_b),
            EnemyHealth::new(tuning.max_health, tuning.knockback_force),
            ContactDamage::new(tuning.contact_damage, tuning.damage_interval),
        ),
        Sprite {
            color: ENEMY_COLOR,
            custom_size: Some(ENEMY_SIZE),
            ..default()
        },
        Transform::from_xyz(point_a.x, point_a.y, 0.0),
        (
            RigidBody::Dynamic,
            Collider::rectangle(ENEMY_SIZE.x, ENEMY_SIZE.y),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            Friction::new(0.0),
            CollisionEventsEnabled,
            CollisionLayers::new(
                GameLayer::Enemy,
                [GameLayer::Terrain, GameLayer::Player],
            ),
        ),
    ));
}

pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EnemyTuning>().add_systems(
            Update,
            (
                (systems::update_enemy_ai, systems::apply_enemy_movement).chain(),
                systems::track_player_contact,
                systems::tick_contact_damage,
                systems::tick_damage_flash,
            )
                .run_if(in_state(GameState::Playing)),
        );
    }
}
