use bevy::prelude::*;

use crate::config::tuning::Tuning;
use crate::game::components::*;
use crate::game::input;
use crate::game::types::Stance;

/// Keyboard/mouse → pending player input, cursor handling, tuning hot-reload.
pub struct DeviceInputPlugin;

impl Plugin for DeviceInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, input::lock_cursor);
        app.add_systems(
            Update,
            (input::capture_device_input, input::toggle_cursor_lock),
        );

        // ── Always-on ───────────────────────────────────────────────────
        app.add_systems(Update, tuning_reload_input);
    }
}

/// Reload tuning with F5 and push the new values into live state.
fn tuning_reload_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut tuning: ResMut<Tuning>,
    mut fixed: ResMut<Time<Fixed>>,
    mut players: Query<(&mut MotionState, &mut LookState, &mut InteractionVolume), With<Player>>,
) {
    if !keyboard.just_pressed(KeyCode::F5) {
        return;
    }
    tuning.reload();
    fixed.set_timestep_seconds(tuning.dt as f64);

    for (mut motion, mut look, mut volume) in &mut players {
        apply_live_tuning(&tuning, &mut motion, &mut look, &mut volume);
    }
}

/// Copy tuning values that live on the player into its components.
fn apply_live_tuning(
    tuning: &Tuning,
    motion: &mut MotionState,
    look: &mut LookState,
    volume: &mut InteractionVolume,
) {
    if motion.stance == Stance::Standing {
        motion.walk_speed = tuning.walk_speed;
        motion.run_speed = tuning.run_speed;
    } else {
        motion.walk_speed = tuning.crouch_speed;
        motion.run_speed = tuning.crouch_speed;
    }
    look.pitch_limit = tuning.look_x_limit.abs();
    look.pitch = look.pitch.clamp(-look.pitch_limit, look.pitch_limit);
    volume.radius = tuning.interaction_radius;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn live_state(tuning: &Tuning) -> (MotionState, LookState, InteractionVolume) {
        (
            MotionState::new(tuning.walk_speed, tuning.run_speed),
            LookState::new(tuning.look_x_limit),
            InteractionVolume {
                radius: tuning.interaction_radius,
                overlapping: Vec::new(),
            },
        )
    }

    #[test]
    fn reloaded_values_reach_a_standing_player() {
        let (mut motion, mut look, mut volume) = live_state(&Tuning::default());
        look.pitch = 40.0;

        let reloaded = Tuning {
            walk_speed: 12.0,
            run_speed: 24.0,
            look_x_limit: 30.0,
            interaction_radius: 5.0,
            ..Tuning::default()
        };
        apply_live_tuning(&reloaded, &mut motion, &mut look, &mut volume);

        assert_eq!((motion.walk_speed, motion.run_speed), (12.0, 24.0));
        assert_eq!(look.pitch_limit, 30.0);
        assert_eq!(look.pitch, 30.0);
        assert_eq!(volume.radius, 5.0);
    }

    #[test]
    fn crouching_player_keeps_crouch_speed_after_reload() {
        let (mut motion, mut look, mut volume) = live_state(&Tuning::default());
        motion.stance = Stance::Crouching;

        let reloaded = Tuning {
            walk_speed: 12.0,
            crouch_speed: 2.0,
            ..Tuning::default()
        };
        apply_live_tuning(&reloaded, &mut motion, &mut look, &mut volume);

        assert_eq!((motion.walk_speed, motion.run_speed), (2.0, 2.0));
    }
}
