//! Movement domain: ground and wall contact sensing.
//!
//! One overlap probe under the feet and one per side, all against the
//! terrain layer. Probes are cached for the tick in locals; nothing here
//! queries the physics world twice for the same volume.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::movement::events::LandedEvent;
use crate::movement::{
    CharacterState, Facing, GameLayer, LocomotionMode, Player, TuningProfile,
};

/// Player body size; colliders and probe offsets derive from it.
pub const PLAYER_SIZE: Vec2 = Vec2::new(0.6, 1.2);

const GROUND_CHECK_SIZE: Vec2 = Vec2::new(0.49, 0.06);
const WALL_CHECK_SIZE: Vec2 = Vec2::new(0.2, 1.0);

pub(crate) fn refresh_contacts(
    spatial_query: SpatialQuery,
    profile: Res<TuningProfile>,
    mut landed: MessageWriter<LandedEvent>,
    mut query: Query<(&Transform, &mut CharacterState), With<Player>>,
) {
    let filter = SpatialQueryFilter::from_mask(GameLayer::Terrain);
    let ground_shape = Collider::rectangle(GROUND_CHECK_SIZE.x, GROUND_CHECK_SIZE.y);
    let wall_shape = Collider::rectangle(WALL_CHECK_SIZE.x, WALL_CHECK_SIZE.y);

    for (transform, mut state) in &mut query {
        // Sensing mid-dash or mid-jump would re-ground the character and
        // cut the action short.
        if state.is_dashing() || state.is_jumping() {
            continue;
        }

        let pos = transform.translation.truncate();

        let was_grounded = state.grounded();
        let feet = pos - Vec2::new(0.0, PLAYER_SIZE.y / 2.0);
        let grounded = !spatial_query
            .shape_intersections(&ground_shape, feet, 0.0, &filter)
            .is_empty();

        if grounded {
            state.ground_grace = profile.coyote_time;
            if state.mode == LocomotionMode::Falling || state.is_wall_sliding() {
                state.mode = LocomotionMode::Grounded;
            }
            if !was_grounded {
                state.air_jumps_left = profile.air_jumps;
                landed.write(LandedEvent);
            }
        } else if state.mode == LocomotionMode::Grounded {
            state.mode = LocomotionMode::Falling;
        }

        // Front/back probes follow the character's orientation, then map
        // back to world left/right for the per-side grace timers.
        let side_offset = Vec2::new(PLAYER_SIZE.x / 2.0 + WALL_CHECK_SIZE.x / 2.0, 0.0);
        let front_pos = pos + side_offset * state.facing.sign();
        let back_pos = pos - side_offset * state.facing.sign();

        let front = !spatial_query
            .shape_intersections(&wall_shape, front_pos, 0.0, &filter)
            .is_empty();
        let back = !spatial_query
            .shape_intersections(&wall_shape, back_pos, 0.0, &filter)
            .is_empty();

        let facing_right = state.facing == Facing::Right;
        if (front && facing_right) || (back && !facing_right) {
            state.wall_grace_right = profile.coyote_time;
        }
        if (front && !facing_right) || (back && facing_right) {
            state.wall_grace_left = profile.coyote_time;
        }
    }
}
