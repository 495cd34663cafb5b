//! Level domain: fixed bootstrap arena.
//!
//! A floor, two walls, a couple of platforms, and one patrol enemy — just
//! enough terrain for every sensor and collaborator to have something to
//! touch. Not a level system.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::core::{GameState, RespawnPoint};
use crate::enemy::{spawn_enemy, EnemyTuning};
use crate::movement::{GameLayer, Terrain};

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Playing), spawn_arena);
    }
}

fn spawn_terrain(commands: &mut Commands, pos: Vec2, size: Vec2) {
    commands.spawn((
        Terrain,
        Sprite {
            color: Color::srgb(0.25, 0.25, 0.3),
            custom_size: Some(size),
            ..default()
        },
        Transform::from_xyz(pos.x, pos.y, 0.0),
        (
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            CollisionLayers::new(GameLayer::Terrain, [GameLayer::Player, GameLayer::Enemy]),
        ),
    ));
}

fn spawn_arena(
    mut commands: Commands,
    enemy_tuning: Res<EnemyTuning>,
    mut respawn_point: ResMut<RespawnPoint>,
) {
    // Floor and bounding walls.
    spawn_terrain(&mut commands, Vec2::new(0.0, -1.0), Vec2::new(40.0, 2.0));
    spawn_terrain(&mut commands, Vec2::new(-20.0, 7.0), Vec2::new(2.0, 18.0));
    spawn_terrain(&mut commands, Vec2::new(20.0, 7.0), Vec2::new(2.0, 18.0));

    // Platforms for jump and pogo practice.
    spawn_terrain(&mut commands, Vec2::new(-8.0, 3.0), Vec2::new(6.0, 0.5));
    spawn_terrain(&mut commands, Vec2::new(8.0, 5.5), Vec2::new(6.0, 0.5));

    // One walker on the floor to the right.
    spawn_enemy(
        &mut commands,
        &enemy_tuning,
        Vec2::new(6.0, 0.5),
        Vec2::new(14.0, 0.5),
    );

    respawn_point.0 = Some(Vec2::new(0.0, 2.0));

    info!("Arena spawned");
}
