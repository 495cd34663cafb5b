//! Enemy domain: AI updates, patrol movement, and contact damage.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::DamagePlayerEvent;
use crate::enemy::components::{next_ai_state, AiState, ContactDamage, DamageFlash, Enemy, EnemyAi};
use crate::enemy::resources::EnemyTuning;
use crate::enemy::{ENEMY_COLOR, ENEMY_SIZE};
use crate::movement::{GameLayer, Player};

/// Distance-threshold state transitions. With no player to measure against
/// the enemy degrades to patrolling.
pub(crate) fn update_enemy_ai(
    tuning: Res<EnemyTuning>,
    player_query: Query<&Transform, With<Player>>,
    mut enemy_query: Query<(&Transform, &mut EnemyAi), With<Enemy>>,
) {
    let player_pos = player_query
        .iter()
        .next()
        .map(|t| t.translation.truncate());

    for (transform, mut ai) in &mut enemy_query {
        let Some(player_pos) = player_pos else {
            if ai.state != AiState::Patrol {
                ai.state = AiState::Patrol;
                ai.is_waiting = false;
            }
            continue;
        };

        let distance = transform.translation.truncate().distance(player_pos);
        let next = next_ai_state(ai.state, distance, tuning.detection_range, tuning.attack_range);
        if next != ai.state {
            debug!("Enemy {:?} -> {:?} at distance {:.2}", ai.state, next, distance);
            ai.state = next;
            if next == AiState::Chase {
                ai.is_waiting = false;
            }
        }
    }
}

pub(crate) fn apply_enemy_movement(
    time: Res<Time>,
    tuning: Res<EnemyTuning>,
    spatial_query: SpatialQuery,
    player_query: Query<&Transform, With<Player>>,
    mut enemy_query: Query<
        (&mut Transform, &mut EnemyAi, &mut LinearVelocity, &mut Sprite),
        (With<Enemy>, Without<Player>),
    >,
) {
    let dt = time.delta_secs();
    let player_pos = player_query
        .iter()
        .next()
        .map(|t| t.translation.truncate());

    for (mut transform, mut ai, mut velocity, mut sprite) in &mut enemy_query {
        let pos = transform.translation.truncate();

        match ai.state {
            AiState::Patrol => {
                if ai.is_waiting {
                    velocity.x = 0.0;
                    ai.wait_timer -= dt;
                    if ai.wait_timer <= 0.0 {
                        ai.is_waiting = false;
                        ai.toward_b = !ai.toward_b;
                    }
                    continue;
                }

                let target = ai.current_target();
                if pos.distance(target) < tuning.arrive_distance {
                    ai.is_waiting = true;
                    ai.wait_timer = tuning.wait_time;
                    velocity.x = 0.0;
                    velocity.y = 0.0;
                    transform.translation.x = target.x;
                    continue;
                }

                // Never patrol off a ledge.
                if !ground_ahead(&spatial_query, pos, ai.facing_right, &tuning) {
                    ai.is_waiting = true;
                    ai.wait_timer = tuning.wait_time;
                    velocity.x = 0.0;
                    continue;
                }

                let dir = (target.x - pos.x).signum();
                velocity.x = dir * tuning.patrol_speed;
                ai.facing_right = dir > 0.0;
            }
            AiState::Chase => {
                let Some(player_pos) = player_pos else {
                    continue;
                };
                let dir = (player_pos.x - pos.x).signum();
                velocity.x = dir * tuning.chase_speed;
                ai.facing_right = dir > 0.0;
            }
            AiState::Attack => {
                velocity.x = 0.0;
                if let Some(player_pos) = player_pos {
                    ai.facing_right = player_pos.x > pos.x;
                }
            }
        }

        sprite.flip_x = !ai.facing_right;
    }
}

/// Short downward ray just past the leading edge.
fn ground_ahead(
    spatial_query: &SpatialQuery,
    pos: Vec2,
    facing_right: bool,
    tuning: &EnemyTuning,
) -> bool {
    let lead = if facing_right { 0.5 } else { -0.5 };
    let origin = pos + Vec2::new(lead, -ENEMY_SIZE.y / 2.0);
    let filter = SpatialQueryFilter::from_mask(GameLayer::Terrain);

    spatial_query
        .cast_ray(origin, Dir2::NEG_Y, tuning.ledge_probe_depth, true, &filter)
        .is_some()
}

/// Contact begins and ends: damage once on touch, then let the interval
/// timer take over while touching.
pub(crate) fn track_player_contact(
    mut starts: MessageReader<CollisionStart>,
    mut ends: MessageReader<CollisionEnd>,
    mut damage: MessageWriter<DamagePlayerEvent>,
    player_query: Query<Entity, With<Player>>,
    mut enemy_query: Query<(&Transform, &mut ContactDamage)>,
) {
    let Some(player) = player_query.iter().next() else {
        return;
    };

    for event in starts.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];
        for (enemy_entity, other) in pairs {
            if other != player {
                continue;
            }
            let Ok((transform, mut contact)) = enemy_query.get_mut(enemy_entity) else {
                continue;
            };
            contact.touching = true;
            contact.cooldown = contact.interval;
            damage.write(DamagePlayerEvent {
                amount: contact.amount,
                source_pos: transform.translation.truncate(),
            });
        }
    }

    for event in ends.read() {
        for entity in [event.collider1, event.collider2] {
            if let Ok((_, mut contact)) = enemy_query.get_mut(entity) {
                contact.touching = false;
            }
        }
    }
}

/// Repeat contact damage at the configured interval while touching.
pub(crate) fn tick_contact_damage(
    time: Res<Time>,
    mut damage: MessageWriter<DamagePlayerEvent>,
    mut query: Query<(&Transform, &mut ContactDamage)>,
) {
    let dt = time.delta_secs();

    for (transform, mut contact) in &mut query {
        if !contact.touching {
            continue;
        }
        contact.cooldown -= dt;
        if contact.cooldown <= 0.0 {
            contact.cooldown = contact.interval;
            damage.write(DamagePlayerEvent {
                amount: contact.amount,
                source_pos: transform.translation.truncate(),
            });
        }
    }
}

pub(crate) fn tick_damage_flash(
    time: Res<Time>,
    mut commands: Commands,
    mut query: Query<(Entity, &mut DamageFlash, &mut Sprite)>,
) {
    let dt = time.delta_secs();

    for (entity, mut flash, mut sprite) in &mut query {
        sprite.color = Color::srgb(1.0, 0.3, 0.3);
        flash.0 -= dt;
        if flash.0 <= 0.0 {
            sprite.color = ENEMY_COLOR;
            commands.entity(entity).remove::<DamageFlash>();
        }
    }
}
