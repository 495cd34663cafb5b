//! Movement domain: timers, buffered intent, and the per-tick action
//! resolution that drives the locomotion mode machine.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::movement::events::{DashEndedEvent, DashStartedEvent, JumpKind, JumpedEvent};
use crate::movement::{
    CharacterState, DashPhase, DashTask, Facing, LocomotionMode, MovementInput, Player,
    TuningProfile,
};

/// Translate this tick's input snapshot into buffered intent and facing.
pub(crate) fn buffer_inputs(
    input: Res<MovementInput>,
    profile: Res<TuningProfile>,
    mut query: Query<(&mut CharacterState, &LinearVelocity), With<Player>>,
) {
    for (mut state, velocity) in &mut query {
        if input.axis.x != 0.0 {
            state.facing = if input.axis.x > 0.0 {
                Facing::Right
            } else {
                Facing::Left
            };
        }

        if input.jump_pressed {
            state.jump_buffer = profile.jump_buffer_time;
        }
        // Releasing jump while still rising shortens the arc, whether the
        // rise came from a ground, air, or wall jump.
        if input.jump_released && velocity.y > 0.0 {
            state.jump_cut = true;
        }
        if input.dash_pressed {
            state.dash_buffer = profile.dash_buffer_time;
        }
        if input.attack_pressed {
            state.attack_buffer = profile.attack_buffer_time;
        }
    }
}

/// Decay every countdown. Timers are allowed to go negative; "active"
/// always means strictly positive.
pub(crate) fn update_timers(
    time: Res<Time>,
    profile: Res<TuningProfile>,
    mut query: Query<&mut CharacterState, With<Player>>,
) {
    let dt = time.delta_secs();

    for mut state in &mut query {
        state.decay_timers(dt, &profile);
    }
}

/// Apex detection and grounded cleanup.
pub(crate) fn update_jump_state(
    mut query: Query<(&mut CharacterState, &LinearVelocity), With<Player>>,
) {
    for (mut state, velocity) in &mut query {
        if state.is_jumping() && velocity.y < 0.0 {
            state.mode = LocomotionMode::Falling;
            state.jump_falling = true;
        }

        if state.grounded() && !state.is_jumping() {
            state.jump_cut = false;
            state.jump_falling = false;
        }
    }
}

/// Upward impulse for a ground or air jump. Cancels any downward motion so
/// the apex height is independent of fall speed at takeoff.
pub(crate) fn jump_impulse(profile: &TuningProfile, vy: f32) -> f32 {
    let mut force = profile.jump_force;
    if vy < 0.0 {
        force -= vy;
    }
    force
}

/// Impulse for a wall jump kicking toward `dir_sign`. Opposing horizontal
/// motion and any downward motion are cancelled first.
pub(crate) fn wall_jump_impulse(profile: &TuningProfile, dir_sign: f32, velocity: Vec2) -> Vec2 {
    let mut force = profile.wall_jump_force();
    force.x *= dir_sign;

    if velocity.x.signum() != force.x.signum() {
        force.x -= velocity.x;
    }
    if velocity.y < 0.0 {
        force.y -= velocity.y;
    }
    force
}

/// Which jump, if any, a buffered press resolves to this tick. Strict
/// priority: ground, then air, then wall; dashing blocks all three.
pub(crate) fn jump_kind_for(state: &CharacterState) -> Option<JumpKind> {
    if state.is_dashing() || state.jump_buffer <= 0.0 {
        return None;
    }
    if state.can_ground_jump() {
        Some(JumpKind::Ground)
    } else if state.can_air_jump() {
        Some(JumpKind::Air)
    } else if state.can_wall_jump() {
        Some(JumpKind::Wall)
    } else {
        None
    }
}

/// At most one jump fires per tick; it consumes the buffer and the grace
/// timers that admitted it so the same press cannot retrigger.
pub(crate) fn resolve_jump(
    profile: Res<TuningProfile>,
    mut jumped: MessageWriter<JumpedEvent>,
    mut query: Query<(&mut CharacterState, &mut LinearVelocity), With<Player>>,
) {
    for (mut state, mut velocity) in &mut query {
        let Some(kind) = jump_kind_for(&state) else {
            continue;
        };

        state.jump_buffer = 0.0;
        state.mode = LocomotionMode::Jumping;
        state.jump_cut = false;
        state.jump_falling = false;

        match kind {
            JumpKind::Ground => {
                state.ground_grace = 0.0;
                velocity.y += jump_impulse(&profile, velocity.y);
            }
            JumpKind::Air => {
                state.air_jumps_left -= 1;
                velocity.y += jump_impulse(&profile, velocity.y);
                debug!("Air jump: {} left", state.air_jumps_left);
            }
            JumpKind::Wall => {
                let side = state.wall_jump_side();
                let dir = side.away_sign();

                state.ground_grace = 0.0;
                state.wall_grace_left = 0.0;
                state.wall_grace_right = 0.0;
                state.wall_jump_lockout = profile.wall_jump_time;

                let impulse = wall_jump_impulse(&profile, dir, **velocity);
                velocity.x += impulse.x;
                velocity.y += impulse.y;

                if profile.turn_on_wall_jump {
                    state.facing = if dir > 0.0 { Facing::Right } else { Facing::Left };
                }
                debug!("Wall jump off {:?}", side);
            }
        }

        jumped.write(JumpedEvent { kind });
    }
}

/// One tick of an in-flight dash task.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum DashStep {
    /// Hold the burst velocity.
    Burst(Vec2),
    /// Burst expired this tick; the tail velocity applies once.
    TailStarted(Vec2),
    Tail,
    Finished,
}

pub(crate) fn advance_dash_task(
    task: &mut DashTask,
    profile: &TuningProfile,
    dt: f32,
) -> DashStep {
    task.remaining -= dt;
    match task.phase {
        DashPhase::Burst => {
            if task.remaining <= 0.0 {
                task.phase = DashPhase::Tail;
                task.remaining = profile.dash_end_time;
                DashStep::TailStarted(profile.dash_end_speed() * task.dir)
            } else {
                DashStep::Burst(task.dir * profile.dash_speed)
            }
        }
        DashPhase::Tail => {
            if task.remaining <= 0.0 {
                DashStep::Finished
            } else {
                DashStep::Tail
            }
        }
    }
}

/// Dash refill request, dash start, and dash task advancement.
pub(crate) fn resolve_dash(
    time: Res<Time>,
    input: Res<MovementInput>,
    profile: Res<TuningProfile>,
    mut started: MessageWriter<DashStartedEvent>,
    mut ended: MessageWriter<DashEndedEvent>,
    mut query: Query<(&mut CharacterState, &mut LinearVelocity), With<Player>>,
) {
    let dt = time.delta_secs();

    for (mut state, mut velocity) in &mut query {
        // At most one refill in flight; re-requested whenever grounded and
        // below the cap.
        if !state.is_dashing()
            && state.dashes_left < profile.dash_amount
            && state.grounded()
            && state.dash_refill.is_none()
        {
            state.dash_refill = Some(profile.dash_refill_time);
        }

        // Advance the running task.
        if let LocomotionMode::Dashing(task) = &mut state.mode {
            match advance_dash_task(task, &profile, dt) {
                DashStep::Burst(v) | DashStep::TailStarted(v) => {
                    velocity.x = v.x;
                    velocity.y = v.y;
                }
                DashStep::Tail => {}
                DashStep::Finished => {
                    state.mode = LocomotionMode::Falling;
                    ended.write(DashEndedEvent);
                }
            }
            continue;
        }

        // Start a new dash.
        if state.dash_buffer > 0.0 && state.dashes_left > 0 {
            let dir = if input.axis != Vec2::ZERO {
                input.axis.normalize()
            } else {
                Vec2::new(state.facing.sign(), 0.0)
            };

            state.start_dash(dir, &profile);
            velocity.x = dir.x * profile.dash_speed;
            velocity.y = dir.y * profile.dash_speed;

            started.write(DashStartedEvent { dir });
            debug!(
                "Dash started toward {:?} for {:.2}s, {} left",
                dir,
                profile.dash_total_time(),
                state.dashes_left
            );
        }
    }
}

/// Wall slide engages while airborne, holding toward a wall whose grace
/// window is live, and neither jumping nor dashing.
pub(crate) fn resolve_wall_slide(
    input: Res<MovementInput>,
    mut query: Query<&mut CharacterState, With<Player>>,
) {
    for mut state in &mut query {
        let side = if state.can_wall_slide() {
            if state.wall_grace_left > 0.0 && input.axis.x < 0.0 {
                Some(crate::movement::WallSide::Left)
            } else if state.wall_grace_right > 0.0 && input.axis.x > 0.0 {
                Some(crate::movement::WallSide::Right)
            } else {
                None
            }
        } else {
            None
        };

        match side {
            Some(side) => state.mode = LocomotionMode::WallSliding(side),
            None => {
                if state.is_wall_sliding() {
                    state.mode = LocomotionMode::Falling;
                }
            }
        }
    }
}

/// The gravity decision for one tick: a scale for the body, and optionally
/// a floor on downward speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct GravityCmd {
    pub scale: f32,
    pub min_fall_speed: Option<f32>,
}

/// Mutually exclusive gravity selection, in priority order. The dash burst
/// forces zero gravity and preempts everything else.
pub(crate) fn gravity_for(
    profile: &TuningProfile,
    state: &CharacterState,
    vy: f32,
    input_y: f32,
) -> GravityCmd {
    let base = profile.gravity_scale;

    if state.is_dash_bursting() {
        return GravityCmd { scale: 0.0, min_fall_speed: None };
    }
    if state.is_wall_sliding() {
        return GravityCmd {
            scale: base * profile.wall_slide_gravity_mult,
            min_fall_speed: None,
        };
    }
    if vy < 0.0 && input_y < 0.0 {
        return GravityCmd {
            scale: base * profile.fast_fall_gravity_mult,
            min_fall_speed: Some(-profile.max_fast_fall_speed),
        };
    }
    if state.jump_cut {
        return GravityCmd {
            scale: base * profile.jump_cut_gravity_mult,
            min_fall_speed: Some(-profile.max_fall_speed),
        };
    }
    if (state.is_jumping() || state.jump_falling) && vy.abs() < profile.jump_hang_threshold {
        return GravityCmd {
            scale: base * profile.jump_hang_gravity_mult,
            min_fall_speed: None,
        };
    }
    if vy < 0.0 {
        return GravityCmd {
            scale: base * profile.fall_gravity_mult,
            min_fall_speed: Some(-profile.max_fall_speed),
        };
    }
    GravityCmd { scale: base, min_fall_speed: None }
}

pub(crate) fn select_gravity(
    input: Res<MovementInput>,
    profile: Res<TuningProfile>,
    mut query: Query<(&CharacterState, &mut GravityScale, &mut LinearVelocity), With<Player>>,
) {
    for (state, mut gravity, mut velocity) in &mut query {
        let cmd = gravity_for(&profile, state, velocity.y, input.axis.y);

        // Skip the write when unchanged so the physics body is not dirtied
        // every frame.
        if (gravity.0 - cmd.scale).abs() > f32::EPSILON {
            gravity.0 = cmd.scale;
        }
        if let Some(min) = cmd.min_fall_speed {
            velocity.y = velocity.y.max(min);
        }
    }
}

/// Mirror the sprite to the facing direction.
pub(crate) fn update_sprite_facing(
    mut query: Query<(&CharacterState, &mut Sprite), With<Player>>,
) {
    for (state, mut sprite) in &mut query {
        sprite.flip_x = state.facing == Facing::Left;
    }
}
