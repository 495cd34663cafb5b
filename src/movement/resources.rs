//! Movement domain: per-tick input snapshot.

use bevy::prelude::*;

/// Abstract intent for one tick. Written by the input system, read by the
/// controller; the controller never touches the keyboard.
#[derive(Resource, Debug, Default)]
pub struct MovementInput {
    /// Each component in [-1, 1].
    pub axis: Vec2,
    pub jump_pressed: bool,
    pub jump_released: bool,
    pub dash_pressed: bool,
    pub attack_pressed: bool,
}
