//! Movement domain: system modules for the character tick.

pub(crate) mod actions;
pub(crate) mod forces;
pub(crate) mod input;
pub(crate) mod sensors;

pub(crate) use actions::{
    buffer_inputs, resolve_dash, resolve_jump, resolve_wall_slide, select_gravity,
    update_jump_state, update_sprite_facing, update_timers,
};
pub(crate) use forces::{apply_run, apply_slide};
pub(crate) use input::read_input;
pub(crate) use sensors::refresh_contacts;
