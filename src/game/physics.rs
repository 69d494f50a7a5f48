use bevy::prelude::*;

use super::components::*;
use super::events::DisplaceMessage;
use crate::config::tuning::Tuning;

/// Feet closer than this to the floor count as touching it.
const GROUND_SKIN: f32 = 1e-3;

/// Move a body by `delta`, stopping its feet at the floor.
/// Returns the contact state: on the floor and not moving up.
pub fn displace_body(translation: &mut Vec3, body: &KinematicBody, delta: Vec3, floor: f32) -> bool {
    *translation += delta;
    let half = body.height * 0.5;
    let min_y = floor + half;
    if translation.y < min_y {
        translation.y = min_y;
    }
    translation.y - min_y <= GROUND_SKIN && delta.y <= 0.0
}

/// PhysicsSet: apply this tick's displacement requests in the order they were issued.
pub fn apply_displacements(
    tuning: Res<Tuning>,
    mut requests: MessageReader<DisplaceMessage>,
    mut bodies: Query<(&mut Transform, &mut KinematicBody)>,
) {
    for request in requests.read() {
        let Ok((mut tf, mut body)) = bodies.get_mut(request.entity) else {
            continue;
        };
        let grounded = displace_body(&mut tf.translation, &body, request.delta, tuning.floor_height);
        if grounded != body.grounded {
            trace!("[Body] {:?} grounded={}", request.entity, grounded);
        }
        body.grounded = grounded;
    }
}
