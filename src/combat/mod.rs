//! Combat domain: plugin wiring and public exports.

mod components;
mod events;
mod systems;

#[cfg(test)]
mod tests;

pub use components::{AttackDirection, AttackPhase, AttackTask, MeleeAttack, PlayerHealth};
pub use events::{
    AttackHitEvent, DamagePlayerEvent, DamagedEvent, DiedEvent, HealedEvent, RespawnedEvent,
};

use bevy::prelude::*;

use crate::core::{GameState, TickSet};
use crate::movement::systems::actions::resolve_dash;

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<DamagePlayerEvent>()
            .add_message::<AttackHitEvent>()
            .add_message::<DamagedEvent>()
            .add_message::<HealedEvent>()
            .add_message::<DiedEvent>()
            .add_message::<RespawnedEvent>()
            .add_systems(Update, systems::debug_health_keys.in_set(TickSet::Input))
            .add_systems(Update, systems::tick_health.in_set(TickSet::Timers))
            .add_systems(
                Update,
                (systems::resolve_attack, systems::advance_attack)
                    .chain()
                    .after(resolve_dash)
                    .in_set(TickSet::Actions),
            )
            .add_systems(
                Update,
                systems::apply_player_damage.run_if(in_state(GameState::Playing)),
            );
    }
}
