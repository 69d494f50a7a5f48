use bevy::prelude::*;

use super::components::*;
use super::events::DisplaceMessage;
use super::types::{Axis, Stance};
use crate::config::tuning::Tuning;

/// Below this squared length a flattened camera vector has no usable heading.
const DEGENERATE_LEN_SQ: f32 = 1e-6;

/// Drop the vertical component and normalize, or use `fallback` when nothing is left.
pub fn flatten_or(v: Vec3, fallback: Vec3) -> Vec3 {
    let flat = Vec3::new(v.x, 0.0, v.z);
    let len_sq = flat.length_squared();
    if !len_sq.is_finite() || len_sq < DEGENERATE_LEN_SQ {
        return fallback;
    }
    flat / len_sq.sqrt()
}

/// Camera-relative heading on the ground plane, weighted by the movement axes.
/// Not normalized: diagonal input is longer than straight input.
pub fn ground_plane_direction(camera_rotation: Quat, forward_axis: Axis, strafe_axis: Axis) -> Vec3 {
    let forward = flatten_or(camera_rotation * Vec3::NEG_Z, Vec3::NEG_Z);
    let right = flatten_or(camera_rotation * Vec3::X, Vec3::X);
    forward * forward_axis.0 + right * strafe_axis.0
}

/// Snap the horizontal velocity to `direction * speed`, keeping the vertical component.
pub fn apply_horizontal_speed(velocity: &mut Vec3, direction: Vec3, speed: f32) {
    velocity.x = direction.x * speed;
    velocity.z = direction.z * speed;
}

/// Launch when grounded and jump is held, otherwise fall. No terminal velocity.
pub fn apply_jump_and_gravity(
    velocity: &mut Vec3,
    grounded: bool,
    jump_pressed: bool,
    jump_power: f32,
    gravity: f32,
    dt: f32,
) {
    if grounded {
        if jump_pressed {
            velocity.y = jump_power;
        }
    } else {
        velocity.y -= gravity * dt;
    }
}

/// SenseSet: read the body's contact state once for the whole tick.
pub fn sample_grounded(mut query: Query<(&KinematicBody, &mut MotionState)>) {
    for (body, mut motion) in &mut query {
        motion.is_grounded = body.grounded;
    }
}

/// Change the body height around a fixed foot position.
pub fn resize_body(translation: &mut Vec3, body: &mut KinematicBody, height: f32) {
    translation.y -= (body.height - height) * 0.5;
    body.height = height;
}

/// SenseSet: crouch swaps both speeds and the body height; standing restores them.
pub fn apply_stance(
    tuning: Res<Tuning>,
    mut query: Query<(&InputSnapshot, &mut MotionState, &mut KinematicBody, &mut Transform)>,
) {
    for (input, mut motion, mut body, mut tf) in &mut query {
        if !motion.can_move() {
            continue;
        }
        let stance = if input.crouch_held {
            Stance::Crouching
        } else {
            Stance::Standing
        };
        if stance == motion.stance {
            continue;
        }
        motion.stance = stance;
        match stance {
            Stance::Crouching => {
                motion.walk_speed = tuning.crouch_speed;
                motion.run_speed = tuning.crouch_speed;
                resize_body(&mut tf.translation, &mut body, tuning.crouch_height);
            }
            Stance::Standing => {
                motion.walk_speed = tuning.walk_speed;
                motion.run_speed = tuning.run_speed;
                resize_body(&mut tf.translation, &mut body, tuning.default_height);
            }
        }
        debug!("[Stance] {:?}", stance);
    }
}

/// MovementSet: camera-relative walk/run, issued as a horizontal-only displacement.
pub fn process_movement(
    tuning: Res<Tuning>,
    mut players: Query<(Entity, &InputSnapshot, &mut MotionState, &Transform, Option<&ViewCamera>), With<Player>>,
    cameras: Query<&Transform, (With<PlayerCamera>, Without<Player>)>,
    mut displace: MessageWriter<DisplaceMessage>,
) {
    for (entity, input, mut motion, body_tf, view) in &mut players {
        if !motion.can_move() {
            continue;
        }

        let camera_local = view
            .and_then(|v| cameras.get(v.0).ok())
            .map(|tf| tf.rotation)
            .unwrap_or(Quat::IDENTITY);
        let camera_rotation = body_tf.rotation * camera_local;

        let direction = ground_plane_direction(camera_rotation, input.forward_axis, input.strafe_axis);
        let speed = motion.speed_for(input.run_held);
        apply_horizontal_speed(&mut motion.velocity, direction, speed);

        let v = motion.velocity;
        displace.write(DisplaceMessage {
            entity,
            delta: Vec3::new(v.x, 0.0, v.z) * tuning.dt,
        });
    }
}

/// JumpGravitySet: vertical launch/fall using the grounded flag sampled at tick start.
pub fn process_jump_and_gravity(
    tuning: Res<Tuning>,
    mut players: Query<(Entity, &InputSnapshot, &mut MotionState), With<Player>>,
    mut displace: MessageWriter<DisplaceMessage>,
) {
    let dt = tuning.dt;
    for (entity, input, mut motion) in &mut players {
        if !motion.can_move() {
            continue;
        }
        let grounded = motion.is_grounded;
        apply_jump_and_gravity(
            &mut motion.velocity,
            grounded,
            input.jump_pressed,
            tuning.jump_power,
            tuning.gravity,
            dt,
        );
        displace.write(DisplaceMessage {
            entity,
            delta: Vec3::new(0.0, motion.velocity.y * dt, 0.0),
        });
    }
}
