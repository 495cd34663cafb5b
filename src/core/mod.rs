//! Core domain: app states, tick ordering, and shared session resources.

mod state;
mod systems;

pub use state::{GameState, TickSet};

use bevy::prelude::*;

/// Magnitude of world gravity, in units/s². Tuning derivations divide by
/// this, so the value inserted into avian's `Gravity` resource must match.
pub const WORLD_GRAVITY: f32 = 9.81;

/// Where the player reappears after death. `None` until a checkpoint sets
/// it; respawn then falls back to a small offset above the death position.
#[derive(Resource, Debug, Default)]
pub struct RespawnPoint(pub Option<Vec2>);

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<RespawnPoint>()
            .configure_sets(
                Update,
                (
                    TickSet::Input,
                    TickSet::Timers,
                    TickSet::Sensors,
                    TickSet::Actions,
                    TickSet::Gravity,
                )
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            )
            .add_systems(Startup, enter_playing)
            .add_systems(
                Update,
                systems::log_transitions.run_if(in_state(GameState::Playing)),
            );
    }
}

fn enter_playing(mut next: ResMut<NextState<GameState>>) {
    next.set(GameState::Playing);
}
