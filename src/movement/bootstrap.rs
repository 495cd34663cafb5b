//! Movement domain: player bootstrap.
//!
//! The character is one aggregate spawned whole: body, controller state,
//! health, and attack slot are constructed together so no system ever has
//! to discover a missing sibling at runtime.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::{MeleeAttack, PlayerHealth};
use crate::movement::systems::sensors::PLAYER_SIZE;
use crate::movement::{CharacterState, GameLayer, Player, TuningProfile};

pub(crate) fn spawn_player(mut commands: Commands, profile: Res<TuningProfile>) {
    info!(
        "Spawning player: jump_force={:.2}, gravity_scale={:.2}, health={}",
        profile.jump_force, profile.gravity_scale, profile.max_health
    );

    commands.spawn((
        (Player, CharacterState::new(&profile)),
        (
            PlayerHealth::new(profile.max_health),
            MeleeAttack::default(),
        ),
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.9),
            custom_size: Some(PLAYER_SIZE),
            ..default()
        },
        Transform::from_xyz(0.0, 2.0, 0.0),
        (
            RigidBody::Dynamic,
            Collider::rectangle(PLAYER_SIZE.x, PLAYER_SIZE.y),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            GravityScale(profile.gravity_scale),
            Friction::new(0.0),
            CollisionEventsEnabled,
            CollisionLayers::new(
                GameLayer::Player,
                [GameLayer::Terrain, GameLayer::Enemy],
            ),
        ),
    ));
}
