//! Core domain: presentation-facing event log.
//!
//! Stand-in for the presentation consumers (animation, audio, particles):
//! every semantic transition the character emits surfaces here.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::combat::{AttackHitEvent, DamagedEvent, DiedEvent, HealedEvent, RespawnedEvent};
use crate::movement::{DashEndedEvent, DashStartedEvent, JumpedEvent, LandedEvent};

pub(crate) fn log_transitions(
    mut jumped: MessageReader<JumpedEvent>,
    mut landed: MessageReader<LandedEvent>,
    mut dash_started: MessageReader<DashStartedEvent>,
    mut dash_ended: MessageReader<DashEndedEvent>,
    mut hits: MessageReader<AttackHitEvent>,
    mut damaged: MessageReader<DamagedEvent>,
    mut healed: MessageReader<HealedEvent>,
    mut died: MessageReader<DiedEvent>,
    mut respawned: MessageReader<RespawnedEvent>,
) {
    for event in jumped.read() {
        debug!("Jumped ({:?})", event.kind);
    }
    for _ in landed.read() {
        debug!("Landed");
    }
    for event in dash_started.read() {
        debug!("Dash started toward {:?}", event.dir);
    }
    for _ in dash_ended.read() {
        debug!("Dash ended");
    }
    for event in hits.read() {
        debug!("Attack hit {:?}", event.target);
    }
    for event in damaged.read() {
        debug!("Damaged for {}", event.amount);
    }
    for event in healed.read() {
        debug!("Healed for {}", event.amount);
    }
    for _ in died.read() {
        debug!("Died");
    }
    for _ in respawned.read() {
        debug!("Respawned");
    }
}
