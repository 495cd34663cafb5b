//! Core domain: app state and per-frame tick ordering.

use bevy::prelude::*;

#[derive(States, Debug, Hash, Eq, PartialEq, Clone, Default)]
pub enum GameState {
    #[default]
    Boot,
    Playing,
}

/// Per-frame phases of the character tick. The order is load-bearing:
/// buffered input must be written before timers decay it, contacts must be
/// refreshed before actions test grace timers, and gravity selection reads
/// the mode the action phase decided on.
#[derive(SystemSet, Debug, Hash, Eq, PartialEq, Clone)]
pub enum TickSet {
    Input,
    Timers,
    Sensors,
    Actions,
    Gravity,
}
