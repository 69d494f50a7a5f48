use bevy::prelude::*;

use super::components::*;
use crate::config::tuning::Tuning;

/// Controller state every player entity carries. Visuals, camera and sword are attached by
/// whoever spawns it.
pub fn player_state(tuning: &Tuning) -> impl Bundle {
    (
        Player,
        PendingInput::default(),
        InputSnapshot::default(),
        MotionState::new(tuning.walk_speed, tuning.run_speed),
        LookState::new(tuning.look_x_limit),
        KinematicBody {
            height: tuning.default_height,
            grounded: false,
        },
        AnimatorParams::default(),
        AttackState::default(),
        TargetRef::default(),
        SwordVfx::default(),
        InteractionVolume {
            radius: tuning.interaction_radius,
            overlapping: Vec::new(),
        },
    )
}

/// Where a player of the configured height stands on the floor.
pub fn standing_translation(tuning: &Tuning, x: f32, z: f32) -> Vec3 {
    Vec3::new(x, tuning.floor_height + tuning.default_height * 0.5, z)
}
