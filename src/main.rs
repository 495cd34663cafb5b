mod camera;
mod combat;
mod core;
mod enemy;
mod level;
mod movement;

use avian2d::prelude::*;
use bevy::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Palefall".to_string(),
                resolution: (1280, 720).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(PhysicsPlugins::default())
        .insert_resource(Gravity(Vec2::NEG_Y * core::WORLD_GRAVITY))
        .add_plugins((
            core::CorePlugin,
            movement::MovementPlugin,
            combat::CombatPlugin,
            enemy::EnemyPlugin,
            camera::CameraPlugin,
            level::LevelPlugin,
        ))
        .run();
}
