use bevy::prelude::*;

use super::components::*;
use crate::config::tuning::Tuning;

/// Apply one tick of mouse look. Yaw wraps to [0, 360); pitch is clamped to ±limit.
pub fn apply_look(look: &mut LookState, mouse_delta_x: f32, mouse_delta_y: f32, look_speed: f32) {
    let yaw = look.yaw + mouse_delta_x * look_speed;
    if yaw.is_finite() {
        look.yaw = yaw.rem_euclid(360.0);
    }
    let pitch = look.pitch - mouse_delta_y * look_speed;
    let limit = look.pitch_limit;
    look.pitch = if pitch.is_finite() {
        pitch.clamp(-limit, limit)
    } else if pitch > 0.0 {
        limit
    } else {
        -limit
    };
}

/// Body orientation for a yaw in degrees (positive turns right).
pub fn body_rotation(yaw_deg: f32) -> Quat {
    Quat::from_rotation_y(-yaw_deg.to_radians())
}

/// Camera orientation: new pitch, the camera's own yaw kept, roll forced to zero.
pub fn camera_rotation(current: Quat, pitch_deg: f32) -> Quat {
    let (yaw, _, _) = current.to_euler(EulerRot::YXZ);
    Quat::from_euler(EulerRot::YXZ, yaw, -pitch_deg.to_radians(), 0.0)
}

/// LookSet: turn the body with horizontal mouse motion and tilt the camera with vertical.
pub fn process_look(
    tuning: Res<Tuning>,
    mut players: Query<
        (&InputSnapshot, &MotionState, &mut LookState, &mut Transform, Option<&ViewCamera>),
        (With<Player>, Without<PlayerCamera>),
    >,
    mut cameras: Query<&mut Transform, (With<PlayerCamera>, Without<Player>)>,
) {
    for (input, motion, mut look, mut body_tf, view) in &mut players {
        if !motion.can_move() {
            continue;
        }
        apply_look(&mut look, input.mouse_delta_x, input.mouse_delta_y, tuning.look_speed);

        body_tf.rotation = body_rotation(look.yaw);
        if let Some(mut cam_tf) = view.and_then(|v| cameras.get_mut(v.0).ok()) {
            cam_tf.rotation = camera_rotation(cam_tf.rotation, look.pitch);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pitch_stays_within_limit_for_adversarial_deltas() {
        let mut look = LookState::new(45.0);
        let deltas = [
            1e9, -1e9, 3.0, -250.0, f32::MAX, f32::MIN, 0.5, f32::INFINITY, f32::NEG_INFINITY,
        ];
        for dy in deltas {
            apply_look(&mut look, 0.0, dy, 2.0);
            assert!(look.pitch >= -45.0 && look.pitch <= 45.0, "pitch {}", look.pitch);
        }
    }

    #[test]
    fn mouse_up_looks_up() {
        let mut look = LookState::new(45.0);
        apply_look(&mut look, 0.0, 5.0, 2.0);
        assert_eq!(look.pitch, -10.0);
    }

    #[test]
    fn yaw_wraps_instead_of_growing() {
        let mut look = LookState::new(45.0);
        for _ in 0..100 {
            apply_look(&mut look, 100.0, 0.0, 2.0);
        }
        assert!(look.yaw >= 0.0 && look.yaw < 360.0);
        assert!((look.yaw - (20000.0f32).rem_euclid(360.0)).abs() < 1e-2);
    }

    #[test]
    fn camera_roll_is_forced_to_zero() {
        let rolled = Quat::from_euler(EulerRot::YXZ, 0.3, 0.1, 0.8);
        let rot = camera_rotation(rolled, 20.0);
        let (yaw, pitch, roll) = rot.to_euler(EulerRot::YXZ);
        assert!((yaw - 0.3).abs() < 1e-4);
        assert!((pitch + 20f32.to_radians()).abs() < 1e-4);
        assert!(roll.abs() < 1e-4);
    }

    #[test]
    fn positive_yaw_turns_right() {
        let forward = body_rotation(90.0) * Vec3::NEG_Z;
        assert!(forward.abs_diff_eq(Vec3::X, 1e-5));
    }
}
