//! Movement domain: fixed-step force application for running and sliding.
//!
//! Forces are proportional to the speed difference and integrated over the
//! fixed timestep, which keeps the acceleration curves stable regardless of
//! render frame rate.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{CharacterState, DashPhase, DashTask, LocomotionMode, MovementInput, Player, TuningProfile};

/// Horizontal run force for one fixed step. `lerp_amount` scales how much
/// authority input has over the current velocity (1 = full control).
pub(crate) fn run_force(
    profile: &TuningProfile,
    state: &CharacterState,
    velocity: Vec2,
    input_x: f32,
    lerp_amount: f32,
) -> f32 {
    let mut target = input_x * profile.run_max_speed;
    target = velocity.x + (target - velocity.x) * lerp_amount;

    let mut accel_rate = if state.grounded() {
        if target.abs() > 0.01 {
            profile.run_accel_amount
        } else {
            profile.run_deccel_amount
        }
    } else if target.abs() > 0.01 {
        profile.run_accel_amount * profile.accel_in_air
    } else {
        profile.run_deccel_amount * profile.deccel_in_air
    };

    // Extra control and top speed near the apex.
    if (state.is_jumping() || state.jump_falling) && velocity.y.abs() < profile.jump_hang_threshold
    {
        accel_rate *= profile.jump_hang_accel_mult;
        target *= profile.jump_hang_max_speed_mult;
    }

    // Airborne and already faster than the target in the same direction:
    // no force, keep the momentum.
    if profile.conserve_momentum
        && velocity.x.abs() > target.abs()
        && velocity.x.signum() == target.signum()
        && target.abs() > 0.01
        && !state.grounded()
    {
        accel_rate = 0.0;
    }

    (target - velocity.x) * accel_rate
}

/// Run input authority for the current mode: none in the dash burst,
/// reduced in the dash tail and after a wall jump.
pub(crate) fn run_lerp_amount(profile: &TuningProfile, state: &CharacterState) -> Option<f32> {
    match state.mode {
        LocomotionMode::Dashing(DashTask { phase: DashPhase::Burst, .. }) => None,
        LocomotionMode::Dashing(DashTask { phase: DashPhase::Tail, .. }) => {
            Some(profile.dash_end_run_lerp)
        }
        _ if state.wall_jump_lockout > 0.0 => Some(profile.wall_jump_run_lerp),
        _ => Some(1.0),
    }
}

pub(crate) fn apply_run(
    time: Res<Time>,
    input: Res<MovementInput>,
    profile: Res<TuningProfile>,
    mut query: Query<(&CharacterState, &mut LinearVelocity), With<Player>>,
) {
    let dt = time.delta_secs();

    for (state, mut velocity) in &mut query {
        let Some(lerp_amount) = run_lerp_amount(&profile, state) else {
            continue;
        };

        let force = run_force(&profile, state, **velocity, input.axis.x, lerp_amount);
        velocity.x += force * dt;
    }
}

/// Spring force tracking the slide speed, clamped to what one fixed step
/// can actually change.
pub(crate) fn slide_force(profile: &TuningProfile, vy: f32, dt: f32) -> f32 {
    let speed_dif = profile.slide_speed - vy;
    let movement = speed_dif * profile.slide_accel;
    movement.clamp(-speed_dif.abs() / dt, speed_dif.abs() / dt)
}

pub(crate) fn apply_slide(
    time: Res<Time>,
    profile: Res<TuningProfile>,
    mut query: Query<(&CharacterState, &mut LinearVelocity), With<Player>>,
) {
    let dt = time.delta_secs();

    for (state, mut velocity) in &mut query {
        if !state.is_wall_sliding() {
            continue;
        }

        // Kill any remaining upward motion before tracking the slide speed.
        if velocity.y > 0.0 {
            velocity.y = 0.0;
        }

        let force = slide_force(&profile, velocity.y, dt);
        velocity.y += force * dt;
    }
}
