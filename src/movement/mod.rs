//! Movement domain: the frame-stepped character controller.
//!
//! Per tick: input snapshot -> timer decay -> buffered edges -> contact
//! refresh -> jump bookkeeping -> action resolution (jump, dash, attack,
//! wall slide, in that priority) -> gravity selection. Run and slide
//! forces apply on the fixed step, before the physics solve.

mod bootstrap;
mod components;
mod events;
mod resources;
pub(crate) mod systems;
mod tuning;

#[cfg(test)]
mod tests;

pub use components::{
    CharacterState, DashPhase, DashTask, Facing, GameLayer, LocomotionMode, Player, Terrain,
    WallSide,
};
pub use events::{DashEndedEvent, DashStartedEvent, JumpKind, JumpedEvent, LandedEvent};
pub use resources::MovementInput;
pub use systems::sensors::PLAYER_SIZE;
pub use tuning::{ConfigError, TuningProfile};

use bevy::prelude::*;
use std::path::Path;

use crate::core::{GameState, TickSet, WORLD_GRAVITY};

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        let profile = tuning::startup_profile(Path::new("assets"), WORLD_GRAVITY);

        app.insert_resource(profile)
            .init_resource::<MovementInput>()
            .add_message::<JumpedEvent>()
            .add_message::<LandedEvent>()
            .add_message::<DashStartedEvent>()
            .add_message::<DashEndedEvent>()
            .add_systems(OnEnter(GameState::Playing), bootstrap::spawn_player)
            .add_systems(Update, systems::read_input.in_set(TickSet::Input))
            .add_systems(
                Update,
                (systems::update_timers, systems::buffer_inputs)
                    .chain()
                    .in_set(TickSet::Timers),
            )
            .add_systems(Update, systems::refresh_contacts.in_set(TickSet::Sensors))
            .add_systems(
                Update,
                (
                    systems::update_jump_state,
                    systems::resolve_jump,
                    systems::resolve_dash,
                )
                    .chain()
                    .in_set(TickSet::Actions),
            )
            .add_systems(
                Update,
                (
                    systems::resolve_wall_slide,
                    systems::select_gravity,
                    systems::update_sprite_facing,
                )
                    .chain()
                    .in_set(TickSet::Gravity),
            )
            .add_systems(
                FixedUpdate,
                (systems::apply_run, systems::apply_slide)
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            );
    }
}
