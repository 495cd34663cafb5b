//! Combat domain: combat events.

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// Request to damage the player from a world position. Written by enemy
/// contact damage and debug bindings, resolved by the health system.
#[derive(Debug)]
pub struct DamagePlayerEvent {
    pub amount: i32,
    pub source_pos: Vec2,
}

impl Message for DamagePlayerEvent {}

/// A melee swing connected with an enemy.
#[derive(Debug)]
pub struct AttackHitEvent {
    pub target: Entity,
}

impl Message for AttackHitEvent {}

/// The player actually lost health.
#[derive(Debug)]
pub struct DamagedEvent {
    pub amount: i32,
}

impl Message for DamagedEvent {}

/// The player actually gained health.
#[derive(Debug)]
pub struct HealedEvent {
    pub amount: i32,
}

impl Message for HealedEvent {}

#[derive(Debug)]
pub struct DiedEvent;

impl Message for DiedEvent {}

#[derive(Debug)]
pub struct RespawnedEvent;

impl Message for RespawnedEvent {}
