//! Combat domain: attack resolution, player damage, death and respawn.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::components::{AttackDirection, AttackPhase, AttackTask, MeleeAttack, PlayerHealth};
use crate::combat::events::{
    AttackHitEvent, DamagePlayerEvent, DamagedEvent, DiedEvent, HealedEvent, RespawnedEvent,
};
use crate::core::RespawnPoint;
use crate::enemy::{DamageFlash, Enemy, EnemyHealth};
use crate::movement::{CharacterState, GameLayer, MovementInput, Player, TuningProfile};

/// How long a hit enemy stays tinted.
const DAMAGE_FLASH_TIME: f32 = 0.1;

/// Start a swing if one is buffered and nothing blocks it. A down-swing in
/// the air rebounds the character immediately; the hit check happens when
/// the windup resolves.
pub(crate) fn resolve_attack(
    input: Res<MovementInput>,
    profile: Res<TuningProfile>,
    mut query: Query<(&mut CharacterState, &mut MeleeAttack, &mut LinearVelocity), With<Player>>,
) {
    for (mut state, mut attack, mut velocity) in &mut query {
        if state.attack_buffer <= 0.0 || state.is_dashing() || attack.is_attacking() {
            continue;
        }

        let direction = AttackDirection::from_input(input.axis.y, state.facing);
        state.attack_buffer = 0.0;
        attack.active = Some(AttackTask {
            direction,
            phase: AttackPhase::Windup {
                remaining: profile.attack_startup_time,
            },
        });

        // Pogo: swinging down in the air bounces the character up.
        if direction == AttackDirection::Down && !state.grounded() {
            velocity.y = profile.jump_force * profile.pogo_force_mult;
        }

        debug!("Attack started: {:?}", direction);
    }
}

/// Advance the swing task. When the windup expires the hitbox is sampled
/// once: every enemy inside takes damage and knockback, and a connecting
/// airborne down-swing re-bounces the character harder.
pub(crate) fn advance_attack(
    time: Res<Time>,
    profile: Res<TuningProfile>,
    spatial_query: SpatialQuery,
    mut commands: Commands,
    mut hits: MessageWriter<AttackHitEvent>,
    mut player: Query<
        (&Transform, &CharacterState, &mut MeleeAttack, &mut LinearVelocity),
        With<Player>,
    >,
    mut enemies: Query<
        (&Transform, &mut EnemyHealth, &mut LinearVelocity),
        (With<Enemy>, Without<Player>),
    >,
) {
    let dt = time.delta_secs();

    for (transform, state, mut attack, mut velocity) in &mut player {
        let Some(task) = &mut attack.active else {
            continue;
        };

        match &mut task.phase {
            AttackPhase::Windup { remaining } => {
                *remaining -= dt;
                if *remaining > 0.0 {
                    continue;
                }

                let direction = task.direction;
                let player_pos = transform.translation.truncate();
                let hitbox_pos = player_pos + direction.vec() * profile.attack_range;
                let hitbox = profile.attack_hitbox();

                let filter = SpatialQueryFilter::from_mask(GameLayer::Enemy);
                let shape = Collider::rectangle(hitbox.x, hitbox.y);
                let overlapping =
                    spatial_query.shape_intersections(&shape, hitbox_pos, 0.0, &filter);

                let mut hit_any = false;
                for entity in overlapping {
                    let Ok((enemy_transform, mut enemy_health, mut enemy_velocity)) =
                        enemies.get_mut(entity)
                    else {
                        continue;
                    };

                    let enemy_pos = enemy_transform.translation.truncate();
                    let knockback_dir = (enemy_pos - player_pos).normalize_or_zero();
                    let knockback_dir = if knockback_dir == Vec2::ZERO {
                        Vec2::X
                    } else {
                        knockback_dir
                    };

                    let dead = enemy_health.take_damage(profile.attack_damage);
                    enemy_velocity.x = knockback_dir.x * enemy_health.knockback_force;
                    enemy_velocity.y = knockback_dir.y * enemy_health.knockback_force;
                    debug!(
                        "Hit enemy {:?}: {}/{}",
                        entity, enemy_health.current, enemy_health.max
                    );

                    hit_any = true;
                    hits.write(AttackHitEvent { target: entity });

                    if dead {
                        debug!("Enemy {:?} destroyed", entity);
                        commands.entity(entity).despawn();
                    } else {
                        commands.entity(entity).insert(DamageFlash(DAMAGE_FLASH_TIME));
                    }
                }

                // Connecting with something gives the pogo real height.
                // Applied once per swing however many enemies were inside.
                if hit_any && direction == AttackDirection::Down && !state.grounded() {
                    velocity.y = profile.jump_force * profile.pogo_hit_force_mult;
                }

                task.phase = AttackPhase::Recover {
                    remaining: (profile.attack_duration - profile.attack_startup_time).max(0.0),
                };
            }
            AttackPhase::Recover { remaining } => {
                *remaining -= dt;
                if *remaining <= 0.0 {
                    attack.active = None;
                }
            }
        }
    }
}

/// Knockback for a hit from `source_pos`: horizontally away from the
/// source, always with the fixed upward component.
pub(crate) fn knockback_velocity(
    profile: &TuningProfile,
    player_pos: Vec2,
    source_pos: Vec2,
) -> Vec2 {
    let away = (player_pos - source_pos).normalize_or_zero();
    let away = if away == Vec2::ZERO { Vec2::X } else { away };
    Vec2::new(away.x * profile.knockback_force_x, profile.knockback_force_y)
}

/// Resolve incoming damage requests against the invulnerability window,
/// then knock the player away from the source.
pub(crate) fn apply_player_damage(
    profile: Res<TuningProfile>,
    mut events: MessageReader<DamagePlayerEvent>,
    mut damaged: MessageWriter<DamagedEvent>,
    mut died: MessageWriter<DiedEvent>,
    mut query: Query<(&Transform, &mut PlayerHealth, &mut LinearVelocity), With<Player>>,
) {
    for event in events.read() {
        for (transform, mut health, mut velocity) in &mut query {
            if !health.take_damage(event.amount, profile.invulnerability_time) {
                continue;
            }

            info!("Player damaged: {}/{}", health.current, health.max);
            damaged.write(DamagedEvent { amount: event.amount });

            let player_pos = transform.translation.truncate();
            let knockback = knockback_velocity(&profile, player_pos, event.source_pos);
            velocity.x = knockback.x;
            velocity.y = knockback.y;

            if health.is_dead() {
                info!("Player died, respawning in {}s", profile.respawn_delay);
                velocity.x = 0.0;
                velocity.y = 0.0;
                health.respawn_in = Some(profile.respawn_delay);
                died.write(DiedEvent);
            }
        }
    }
}

/// Invulnerability decay and the respawn countdown.
pub(crate) fn tick_health(
    time: Res<Time>,
    profile: Res<TuningProfile>,
    respawn_point: Res<RespawnPoint>,
    mut respawned: MessageWriter<RespawnedEvent>,
    mut query: Query<
        (
            &mut PlayerHealth,
            &mut CharacterState,
            &mut Transform,
            &mut LinearVelocity,
        ),
        With<Player>,
    >,
) {
    let dt = time.delta_secs();

    for (mut health, mut state, mut transform, mut velocity) in &mut query {
        if health.invuln_remaining > 0.0 {
            health.invuln_remaining -= dt;
        }

        let Some(remaining) = &mut health.respawn_in else {
            continue;
        };
        *remaining -= dt;
        if *remaining > 0.0 {
            continue;
        }

        health.respawn_in = None;
        health.current = health.max;
        health.invuln_remaining = profile.invulnerability_time;

        // Back to the checkpoint, or just above where we died if none is
        // configured.
        let target = respawn_point
            .0
            .unwrap_or_else(|| transform.translation.truncate() + Vec2::new(0.0, 2.0));
        transform.translation.x = target.x;
        transform.translation.y = target.y;

        velocity.x = 0.0;
        velocity.y = 0.0;
        state.reset(&profile);

        info!("Player respawned at {:?}", target);
        respawned.write(RespawnedEvent);
    }
}

/// Debug bindings: H takes a point of damage from the left, G heals one.
pub(crate) fn debug_health_keys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut damage: MessageWriter<DamagePlayerEvent>,
    mut healed: MessageWriter<HealedEvent>,
    mut query: Query<(&Transform, &mut PlayerHealth), With<Player>>,
) {
    for (transform, mut health) in &mut query {
        if keyboard.just_pressed(KeyCode::KeyH) {
            damage.write(DamagePlayerEvent {
                amount: 1,
                source_pos: transform.translation.truncate() - Vec2::X,
            });
        }
        if keyboard.just_pressed(KeyCode::KeyG) {
            let amount = health.heal(1);
            if amount > 0 {
                healed.write(HealedEvent { amount });
            }
        }
    }
}
