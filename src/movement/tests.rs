//! Movement domain: unit tests for tuning derivation and the controller
//! state machine.

use bevy::prelude::*;

use super::systems::actions::{
    advance_dash_task, gravity_for, jump_impulse, jump_kind_for, wall_jump_impulse, DashStep,
};
use super::systems::forces::{run_force, run_lerp_amount, slide_force};
use super::{
    CharacterState, ConfigError, DashPhase, JumpKind, LocomotionMode, TuningProfile, WallSide,
};

const WORLD_GRAVITY: f32 = 9.81;

fn profile() -> TuningProfile {
    let mut p = TuningProfile::default();
    p.validate(WORLD_GRAVITY).unwrap();
    p
}

#[test]
fn test_derived_constants() {
    let p = profile();

    // jump_height 4.2, time_to_apex 0.45: g = -2h/t², v0 = |g|·t
    assert!((p.gravity_strength - -41.4815).abs() < 0.01);
    assert!((p.jump_force - 18.6667).abs() < 0.01);
    assert!((p.gravity_scale - 41.4815 / WORLD_GRAVITY).abs() < 0.01);

    assert!((p.run_accel_amount - (50.0 * 4.0) / 6.0).abs() < 1e-4);
    assert!((p.run_deccel_amount - (50.0 * 4.5) / 6.0).abs() < 1e-4);
}

#[test]
fn test_validate_rejects_bad_values() {
    let mut p = TuningProfile::default();
    p.jump_time_to_apex = 0.0;
    assert_eq!(
        p.validate(WORLD_GRAVITY),
        Err(ConfigError::NonPositiveTimeToApex(0.0))
    );

    let mut p = TuningProfile::default();
    p.run_max_speed = -1.0;
    assert_eq!(
        p.validate(WORLD_GRAVITY),
        Err(ConfigError::NonPositiveMaxSpeed(-1.0))
    );

    let mut p = TuningProfile::default();
    p.run_acceleration = p.run_max_speed + 1.0;
    assert!(matches!(
        p.validate(WORLD_GRAVITY),
        Err(ConfigError::AccelerationOutOfRange { field: "run_acceleration", .. })
    ));

    let mut p = TuningProfile::default();
    p.run_decceleration = 0.0;
    assert!(matches!(
        p.validate(WORLD_GRAVITY),
        Err(ConfigError::AccelerationOutOfRange { field: "run_decceleration", .. })
    ));
}

#[test]
fn test_jump_impulse_from_rest_equals_jump_force() {
    let p = profile();
    assert_eq!(jump_impulse(&p, 0.0), p.jump_force);
}

#[test]
fn test_jump_impulse_cancels_downward_motion() {
    let p = profile();
    assert_eq!(jump_impulse(&p, -5.0), p.jump_force + 5.0);
}

#[test]
fn test_wall_jump_impulse_cancels_opposing_motion() {
    let p = profile();

    // Kicking right while drifting left and falling: both components are
    // topped up by the cancelled motion.
    let impulse = wall_jump_impulse(&p, 1.0, Vec2::new(-3.0, -2.0));
    assert_eq!(impulse, Vec2::new(p.wall_jump_force_x + 3.0, p.wall_jump_force_y + 2.0));

    // Already moving the kick direction: no top-up.
    let impulse = wall_jump_impulse(&p, 1.0, Vec2::new(2.0, 1.0));
    assert_eq!(impulse, Vec2::new(p.wall_jump_force_x, p.wall_jump_force_y));
}

#[test]
fn test_ground_jump_wins_over_air_jump() {
    let p = profile();
    let mut state = CharacterState::new(&p);
    state.mode = LocomotionMode::Falling;
    state.ground_grace = 0.05;
    state.jump_buffer = 0.05;
    assert!(state.air_jumps_left > 0);

    assert_eq!(jump_kind_for(&state), Some(JumpKind::Ground));
}

#[test]
fn test_air_jump_only_when_airborne() {
    let p = profile();
    let mut state = CharacterState::new(&p);
    state.mode = LocomotionMode::Falling;
    state.ground_grace = -1.0;
    state.jump_buffer = 0.05;

    assert_eq!(jump_kind_for(&state), Some(JumpKind::Air));

    state.air_jumps_left = 0;
    assert_eq!(jump_kind_for(&state), None);
}

#[test]
fn test_wall_jump_after_air_jumps_spent() {
    let p = profile();
    let mut state = CharacterState::new(&p);
    state.mode = LocomotionMode::Falling;
    state.ground_grace = -1.0;
    state.air_jumps_left = 0;
    state.wall_grace_left = 0.05;
    state.jump_buffer = 0.05;

    assert_eq!(jump_kind_for(&state), Some(JumpKind::Wall));
}

#[test]
fn test_jump_buffer_expires() {
    let p = profile();
    let mut state = CharacterState::new(&p);
    state.mode = LocomotionMode::Falling;
    state.jump_buffer = p.jump_buffer_time;
    state.ground_grace = -1.0;

    // Nothing qualifying happens for longer than the buffer window.
    for _ in 0..6 {
        state.decay_timers(0.02, &p);
    }
    assert!(state.jump_buffer <= 0.0);

    state.ground_grace = 1.0;
    assert_eq!(jump_kind_for(&state), None);
}

#[test]
fn test_dashing_blocks_jumps() {
    let p = profile();
    let mut state = CharacterState::new(&p);
    state.ground_grace = 0.1;
    state.jump_buffer = 0.1;
    state.start_dash(Vec2::X, &p);

    assert_eq!(jump_kind_for(&state), None);
}

#[test]
fn test_wall_jump_side_most_recent_wins() {
    let p = profile();
    let mut state = CharacterState::new(&p);

    state.wall_grace_left = 0.10;
    state.wall_grace_right = 0.04;
    assert_eq!(state.wall_jump_side(), WallSide::Left);

    state.wall_grace_right = 0.12;
    assert_eq!(state.wall_jump_side(), WallSide::Right);

    // Exact tie goes right.
    state.wall_grace_left = 0.12;
    assert_eq!(state.wall_jump_side(), WallSide::Right);
}

#[test]
fn test_dash_consumes_charge_and_runs_both_phases() {
    let p = profile();
    let mut state = CharacterState::new(&p);
    assert_eq!(state.dashes_left, p.dash_amount);

    state.start_dash(Vec2::X, &p);
    assert_eq!(state.dashes_left, p.dash_amount - 1);
    assert!(state.is_dash_bursting());

    let LocomotionMode::Dashing(mut task) = state.mode else {
        panic!("expected dash mode");
    };

    let dt = 0.02;
    let mut elapsed = 0.0;
    let mut tail_started = false;
    loop {
        let step = advance_dash_task(&mut task, &p, dt);
        elapsed += dt;
        match step {
            DashStep::Burst(v) => {
                assert_eq!(v, Vec2::X * p.dash_speed);
                assert!(!tail_started);
            }
            DashStep::TailStarted(v) => {
                assert_eq!(v, p.dash_end_speed() * Vec2::X);
                assert_eq!(task.phase, DashPhase::Tail);
                tail_started = true;
            }
            DashStep::Tail => assert!(tail_started),
            DashStep::Finished => break,
        }
        assert!(elapsed < 1.0, "dash never finished");
    }

    assert!(tail_started);
    assert!(elapsed >= p.dash_total_time() - 1e-4);
}

#[test]
fn test_dash_refill_respects_cap() {
    let p = profile();
    let mut state = CharacterState::new(&p);

    state.dashes_left = 0;
    state.dash_refill = Some(p.dash_refill_time);
    state.decay_timers(p.dash_refill_time + 0.01, &p);
    assert_eq!(state.dashes_left, 1);
    assert!(state.dash_refill.is_none());

    // Already at the cap: the expiring refill must not overfill.
    state.dashes_left = p.dash_amount;
    state.dash_refill = Some(0.01);
    state.decay_timers(0.02, &p);
    assert_eq!(state.dashes_left, p.dash_amount);
}

#[test]
fn test_gravity_selection_priority() {
    let p = profile();
    let base = p.gravity_scale;
    let mut state = CharacterState::new(&p);

    // Dash burst preempts everything with zero gravity.
    state.start_dash(Vec2::X, &p);
    let cmd = gravity_for(&p, &state, -5.0, -1.0);
    assert_eq!(cmd.scale, 0.0);
    assert_eq!(cmd.min_fall_speed, None);

    // Wall slide.
    let mut state = CharacterState::new(&p);
    state.mode = LocomotionMode::WallSliding(WallSide::Left);
    let cmd = gravity_for(&p, &state, -1.0, -1.0);
    assert!((cmd.scale - base * p.wall_slide_gravity_mult).abs() < 1e-5);

    // Fast fall outranks jump cut.
    let mut state = CharacterState::new(&p);
    state.mode = LocomotionMode::Falling;
    state.jump_cut = true;
    let cmd = gravity_for(&p, &state, -1.0, -1.0);
    assert!((cmd.scale - base * p.fast_fall_gravity_mult).abs() < 1e-5);
    assert_eq!(cmd.min_fall_speed, Some(-p.max_fast_fall_speed));

    // Jump cut while rising.
    let cmd = gravity_for(&p, &state, 3.0, 0.0);
    assert!((cmd.scale - base * p.jump_cut_gravity_mult).abs() < 1e-5);
    assert_eq!(cmd.min_fall_speed, Some(-p.max_fall_speed));

    // Apex hang.
    let mut state = CharacterState::new(&p);
    state.mode = LocomotionMode::Jumping;
    let cmd = gravity_for(&p, &state, 1.0, 0.0);
    assert!((cmd.scale - base * p.jump_hang_gravity_mult).abs() < 1e-5);

    // Plain fall.
    let mut state = CharacterState::new(&p);
    state.mode = LocomotionMode::Falling;
    let cmd = gravity_for(&p, &state, -5.0, 0.0);
    assert!((cmd.scale - base * p.fall_gravity_mult).abs() < 1e-5);

    // Grounded default.
    let state = CharacterState::new(&p);
    let cmd = gravity_for(&p, &state, 0.0, 0.0);
    assert_eq!(cmd.scale, base);
    assert_eq!(cmd.min_fall_speed, None);
}

#[test]
fn test_run_force_conserves_airborne_momentum() {
    let p = profile();
    let mut state = CharacterState::new(&p);
    state.mode = LocomotionMode::Falling;
    state.ground_grace = -1.0;

    // Faster than target, same direction, airborne: no force.
    let force = run_force(&p, &state, Vec2::new(10.0, -3.0), 1.0, 1.0);
    assert_eq!(force, 0.0);

    // Grounded, the same situation decelerates toward the target.
    state.ground_grace = 1.0;
    let force = run_force(&p, &state, Vec2::new(10.0, 0.0), 1.0, 1.0);
    assert!(force < 0.0);
}

#[test]
fn test_run_force_accel_and_decel_selection() {
    let p = profile();
    let state = {
        let mut s = CharacterState::new(&p);
        s.ground_grace = 1.0;
        s
    };

    // Accelerating from rest toward max speed.
    let force = run_force(&p, &state, Vec2::ZERO, 1.0, 1.0);
    assert!((force - p.run_max_speed * p.run_accel_amount).abs() < 1e-3);

    // No input: decelerate toward zero.
    let force = run_force(&p, &state, Vec2::new(3.0, 0.0), 0.0, 1.0);
    assert!((force - -3.0 * p.run_deccel_amount).abs() < 1e-3);
}

#[test]
fn test_run_lerp_amount_per_mode() {
    let p = profile();
    let mut state = CharacterState::new(&p);

    assert_eq!(run_lerp_amount(&p, &state), Some(1.0));

    state.wall_jump_lockout = 0.1;
    assert_eq!(run_lerp_amount(&p, &state), Some(p.wall_jump_run_lerp));

    state.wall_jump_lockout = 0.0;
    state.start_dash(Vec2::X, &p);
    assert_eq!(run_lerp_amount(&p, &state), None);

    let LocomotionMode::Dashing(mut task) = state.mode else {
        panic!("expected dash mode");
    };
    while !matches!(advance_dash_task(&mut task, &p, 0.02), DashStep::TailStarted(_)) {}
    state.mode = LocomotionMode::Dashing(task);
    assert_eq!(run_lerp_amount(&p, &state), Some(p.dash_end_run_lerp));
}

#[test]
fn test_slide_force_is_clamped_to_one_step() {
    let p = profile();
    let dt = 1.0 / 64.0;

    // Gentle case: unclamped spring force.
    let force = slide_force(&p, 0.0, dt);
    assert!((force - (p.slide_speed * p.slide_accel)).abs() < 1e-3);

    // Stiff spring: clamped to what one step can change.
    let mut stiff = p.clone();
    stiff.slide_accel = 5000.0;
    let force = slide_force(&stiff, 0.0, dt);
    assert!((force - -(p.slide_speed.abs() / dt)).abs() < 1e-2);
}

#[test]
fn test_reset_restores_full_resources() {
    let p = profile();
    let mut state = CharacterState::new(&p);

    state.air_jumps_left = 0;
    state.dashes_left = 0;
    state.jump_cut = true;
    state.mode = LocomotionMode::Falling;

    state.reset(&p);
    assert_eq!(state.air_jumps_left, p.air_jumps);
    assert_eq!(state.dashes_left, p.dash_amount);
    assert!(!state.jump_cut);
    assert_eq!(state.mode, LocomotionMode::Grounded);
}
