//! Camera domain: follow rig, fall damping, and pan-on-contact.
//!
//! The rig reacts to the character's public state: vertical damping drops
//! while the player falls fast (so the camera keeps up), with hysteresis on
//! the speed threshold so the lerp does not retrigger every tick. Pans are
//! timed tasks driven by [`PanRequestEvent`].

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, Message};
use bevy::prelude::*;

use crate::core::{GameState, TickSet};
use crate::movement::Player;

#[derive(Resource, Debug, Clone)]
pub struct CameraSettings {
    pub follow_speed: f32,
    /// Seconds of vertical lag under normal conditions.
    pub base_damping_y: f32,
    /// Seconds of vertical lag while the player is falling fast.
    pub fall_damping_y: f32,
    /// Duration of the damping lerp.
    pub fall_pan_time: f32,
    /// Vertical speed below which the fall damping kicks in.
    pub fall_speed_threshold: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            follow_speed: 6.0,
            base_damping_y: 1.0,
            fall_damping_y: 0.25,
            fall_pan_time: 0.35,
            fall_speed_threshold: -15.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanDirection {
    Up,
    Down,
    Left,
    Right,
}

impl PanDirection {
    fn vec(self) -> Vec2 {
        match self {
            PanDirection::Up => Vec2::Y,
            PanDirection::Down => Vec2::NEG_Y,
            PanDirection::Left => Vec2::NEG_X,
            PanDirection::Right => Vec2::X,
        }
    }
}

/// Ask the camera to pan its follow offset, or back to rest.
#[derive(Debug)]
pub struct PanRequestEvent {
    pub distance: f32,
    pub duration: f32,
    pub direction: PanDirection,
    pub return_to_rest: bool,
}

impl Message for PanRequestEvent {}

#[derive(Debug, Clone, Copy)]
struct LerpTask {
    from: f32,
    to: f32,
    elapsed: f32,
    duration: f32,
}

#[derive(Debug, Clone, Copy)]
struct PanTask {
    from: Vec2,
    to: Vec2,
    elapsed: f32,
    duration: f32,
}

#[derive(Component, Debug)]
pub struct FollowCamera {
    damping_y: f32,
    offset: Vec2,
    lerped_from_falling: bool,
    damping_lerp: Option<LerpTask>,
    pan: Option<PanTask>,
}

impl FollowCamera {
    fn new(settings: &CameraSettings) -> Self {
        Self {
            damping_y: settings.base_damping_y,
            offset: Vec2::ZERO,
            lerped_from_falling: false,
            damping_lerp: None,
            pan: None,
        }
    }
}

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraSettings>()
            .add_message::<PanRequestEvent>()
            .add_systems(Startup, setup_camera)
            .add_systems(
                Update,
                (
                    watch_fall_speed,
                    handle_pan_requests,
                    advance_camera_tasks,
                    follow_player,
                )
                    .chain()
                    .after(TickSet::Gravity)
                    .run_if(in_state(GameState::Playing)),
            );
    }
}

fn setup_camera(mut commands: Commands, settings: Res<CameraSettings>) {
    commands.spawn((
        Camera2d,
        Projection::Orthographic(OrthographicProjection {
            scale: 0.025,
            ..OrthographicProjection::default_2d()
        }),
        FollowCamera::new(&settings),
    ));
}

/// Fall-speed hook with hysteresis: one lerp down when the threshold is
/// crossed, one lerp back when it is re-crossed upward.
fn watch_fall_speed(
    settings: Res<CameraSettings>,
    player_query: Query<&LinearVelocity, With<Player>>,
    mut camera_query: Query<&mut FollowCamera>,
) {
    let Some(velocity) = player_query.iter().next() else {
        return;
    };

    for mut camera in &mut camera_query {
        if velocity.y < settings.fall_speed_threshold && !camera.lerped_from_falling {
            camera.lerped_from_falling = true;
            camera.damping_lerp = Some(LerpTask {
                from: camera.damping_y,
                to: settings.fall_damping_y,
                elapsed: 0.0,
                duration: settings.fall_pan_time,
            });
        } else if velocity.y >= settings.fall_speed_threshold && camera.lerped_from_falling {
            camera.lerped_from_falling = false;
            camera.damping_lerp = Some(LerpTask {
                from: camera.damping_y,
                to: settings.base_damping_y,
                elapsed: 0.0,
                duration: settings.fall_pan_time,
            });
        }
    }
}

fn handle_pan_requests(
    mut requests: MessageReader<PanRequestEvent>,
    mut camera_query: Query<&mut FollowCamera>,
) {
    for request in requests.read() {
        for mut camera in &mut camera_query {
            let to = if request.return_to_rest {
                Vec2::ZERO
            } else {
                request.direction.vec() * request.distance
            };
            camera.pan = Some(PanTask {
                from: camera.offset,
                to,
                elapsed: 0.0,
                duration: request.duration,
            });
        }
    }
}

fn advance_camera_tasks(time: Res<Time>, mut camera_query: Query<&mut FollowCamera>) {
    let dt = time.delta_secs();

    for mut camera in &mut camera_query {
        if let Some(task) = &mut camera.damping_lerp {
            task.elapsed += dt;
            let t = (task.elapsed / task.duration).min(1.0);
            camera.damping_y = task.from + (task.to - task.from) * t;
            if t >= 1.0 {
                camera.damping_lerp = None;
            }
        }

        if let Some(task) = &mut camera.pan {
            task.elapsed += dt;
            let t = (task.elapsed / task.duration).min(1.0);
            camera.offset = task.from + (task.to - task.from) * t;
            if t >= 1.0 {
                camera.pan = None;
            }
        }
    }
}

fn follow_player(
    time: Res<Time>,
    settings: Res<CameraSettings>,
    player_query: Query<&Transform, (With<Player>, Without<FollowCamera>)>,
    mut camera_query: Query<(&mut Transform, &FollowCamera)>,
) {
    let Some(player_transform) = player_query.iter().next() else {
        return;
    };
    let dt = time.delta_secs();

    for (mut transform, camera) in &mut camera_query {
        let target = player_transform.translation.truncate() + camera.offset;

        let x_factor = 1.0 - (-settings.follow_speed * dt).exp();
        let y_factor = 1.0 - (-dt / camera.damping_y.max(0.05)).exp();

        transform.translation.x += (target.x - transform.translation.x) * x_factor;
        transform.translation.y += (target.y - transform.translation.y) * y_factor;
    }
}
