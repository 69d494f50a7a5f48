use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions};

use super::components::*;
use super::types::Axis;
use crate::config::tuning::Tuning;

fn digital_axis(keyboard: &ButtonInput<KeyCode>, positive: [KeyCode; 2], negative: [KeyCode; 2]) -> Axis {
    let mut v = 0.0;
    if keyboard.any_pressed(positive) {
        v += 1.0;
    }
    if keyboard.any_pressed(negative) {
        v -= 1.0;
    }
    Axis::new(v)
}

/// Update: sample keyboard/mouse into the player's pending input.
/// Held buttons and axes overwrite; the attack press latches and mouse motion accumulates
/// until a tick consumes them.
pub fn capture_device_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: MessageReader<MouseMotion>,
    tuning: Res<Tuning>,
    mut query: Query<&mut PendingInput, With<Player>>,
) {
    let motion: Vec2 = mouse_motion.read().map(|m| m.delta).sum();
    let scale = tuning.mouse_axis_scale;

    for mut pending in &mut query {
        pending.forward_axis = digital_axis(
            &keyboard,
            [KeyCode::KeyW, KeyCode::ArrowUp],
            [KeyCode::KeyS, KeyCode::ArrowDown],
        );
        pending.strafe_axis = digital_axis(
            &keyboard,
            [KeyCode::KeyD, KeyCode::ArrowRight],
            [KeyCode::KeyA, KeyCode::ArrowLeft],
        );
        pending.run_held = keyboard.pressed(KeyCode::ShiftLeft);
        pending.jump_pressed = keyboard.pressed(KeyCode::Space);
        pending.crouch_held = keyboard.pressed(KeyCode::ControlLeft);
        pending.attack_pressed |= mouse_buttons.just_pressed(MouseButton::Left);
        // Screen y grows downward; axis y is positive when the mouse moves up.
        pending.mouse_delta_x += motion.x * scale;
        pending.mouse_delta_y -= motion.y * scale;
    }
}

/// SenseSet: freeze pending input into this tick's snapshot and clear the one-shot parts.
pub fn snapshot_input(mut query: Query<(&mut PendingInput, &mut InputSnapshot)>) {
    for (mut pending, mut snapshot) in &mut query {
        *snapshot = InputSnapshot {
            forward_axis: pending.forward_axis,
            strafe_axis: pending.strafe_axis,
            mouse_delta_x: pending.mouse_delta_x,
            mouse_delta_y: pending.mouse_delta_y,
            run_held: pending.run_held,
            jump_pressed: pending.jump_pressed,
            crouch_held: pending.crouch_held,
            attack_pressed: pending.attack_pressed,
        };
        pending.attack_pressed = false;
        pending.mouse_delta_x = 0.0;
        pending.mouse_delta_y = 0.0;
    }
}

/// Startup: hide the cursor and lock it to the window.
pub fn lock_cursor(mut cursor_options: Query<&mut CursorOptions, With<Window>>) {
    for mut cursor in &mut cursor_options {
        cursor.grab_mode = CursorGrabMode::Locked;
        cursor.visible = false;
    }
}

/// Escape releases the cursor, a left click grabs it again.
pub fn toggle_cursor_lock(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut cursor_options: Query<&mut CursorOptions, With<Window>>,
) {
    for mut cursor in &mut cursor_options {
        if keyboard.just_pressed(KeyCode::Escape) {
            cursor.grab_mode = CursorGrabMode::None;
            cursor.visible = true;
        } else if mouse_buttons.just_pressed(MouseButton::Left)
            && cursor.grab_mode == CursorGrabMode::None
        {
            cursor.grab_mode = CursorGrabMode::Locked;
            cursor.visible = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::message::Messages;
    use bevy::ecs::system::RunSystemOnce;

    #[test]
    fn snapshot_consumes_one_shot_input() {
        let mut world = World::new();
        let player = world
            .spawn((
                PendingInput {
                    forward_axis: Axis::new(1.0),
                    mouse_delta_x: 4.0,
                    attack_pressed: true,
                    run_held: true,
                    ..default()
                },
                InputSnapshot::default(),
            ))
            .id();

        world.run_system_once(snapshot_input).unwrap();
        let snap = *world.get::<InputSnapshot>(player).unwrap();
        assert!(snap.attack_pressed);
        assert_eq!(snap.mouse_delta_x, 4.0);
        assert_eq!(snap.forward_axis, Axis(1.0));

        // Held state carries over, the press and the mouse motion do not.
        world.run_system_once(snapshot_input).unwrap();
        let snap = *world.get::<InputSnapshot>(player).unwrap();
        assert!(!snap.attack_pressed);
        assert_eq!(snap.mouse_delta_x, 0.0);
        assert!(snap.run_held);
        assert_eq!(snap.forward_axis, Axis(1.0));
    }

    fn capture_world() -> (World, Entity) {
        let mut world = World::new();
        world.init_resource::<ButtonInput<KeyCode>>();
        world.init_resource::<ButtonInput<MouseButton>>();
        world.init_resource::<Messages<MouseMotion>>();
        world.insert_resource(Tuning::default());
        let player = world.spawn((Player, PendingInput::default())).id();
        (world, player)
    }

    fn pending(world: &World, player: Entity) -> PendingInput {
        world.get::<PendingInput>(player).unwrap().clone()
    }

    #[test]
    fn keys_map_to_movement_axes_and_buttons() {
        let (mut world, player) = capture_world();
        {
            let mut keyboard = world.resource_mut::<ButtonInput<KeyCode>>();
            keyboard.press(KeyCode::ArrowUp);
            keyboard.press(KeyCode::KeyA);
            keyboard.press(KeyCode::ShiftLeft);
            keyboard.press(KeyCode::Space);
            keyboard.press(KeyCode::ControlLeft);
        }
        world.run_system_once(capture_device_input).unwrap();
        let p = pending(&world, player);
        assert_eq!(p.forward_axis, Axis(1.0));
        assert_eq!(p.strafe_axis, Axis(-1.0));
        assert!(p.run_held && p.jump_pressed && p.crouch_held);
        assert!(!p.attack_pressed);

        {
            let mut keyboard = world.resource_mut::<ButtonInput<KeyCode>>();
            keyboard.release_all();
            keyboard.press(KeyCode::KeyS);
            keyboard.press(KeyCode::ArrowRight);
        }
        world.run_system_once(capture_device_input).unwrap();
        let p = pending(&world, player);
        assert_eq!(p.forward_axis, Axis(-1.0));
        assert_eq!(p.strafe_axis, Axis(1.0));
        assert!(!p.run_held && !p.jump_pressed && !p.crouch_held);
    }

    #[test]
    fn mouse_motion_is_scaled_and_up_positive() {
        let (mut world, player) = capture_world();
        {
            let mut motion = world.resource_mut::<Messages<MouseMotion>>();
            motion.write(MouseMotion { delta: Vec2::new(10.0, 20.0) });
            motion.write(MouseMotion { delta: Vec2::new(10.0, 0.0) });
        }
        world.run_system_once(capture_device_input).unwrap();
        let p = pending(&world, player);
        // Default scale is 0.1; screen y grows downward, so the axis goes negative.
        assert!((p.mouse_delta_x - 2.0).abs() < 1e-5);
        assert!((p.mouse_delta_y + 2.0).abs() < 1e-5);
    }

    #[test]
    fn attack_click_latches_until_a_tick_consumes_it() {
        let (mut world, player) = capture_world();
        world
            .resource_mut::<ButtonInput<MouseButton>>()
            .press(MouseButton::Left);
        world.run_system_once(capture_device_input).unwrap();

        // Later frames no longer see the click as just pressed.
        world.resource_mut::<ButtonInput<MouseButton>>().clear();
        world.run_system_once(capture_device_input).unwrap();
        world.run_system_once(capture_device_input).unwrap();
        assert!(pending(&world, player).attack_pressed);

        world.entity_mut(player).insert(InputSnapshot::default());
        world.run_system_once(snapshot_input).unwrap();
        assert!(world.get::<InputSnapshot>(player).unwrap().attack_pressed);
        assert!(!pending(&world, player).attack_pressed);

        world.run_system_once(capture_device_input).unwrap();
        assert!(!pending(&world, player).attack_pressed);
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut keyboard = ButtonInput::<KeyCode>::default();
        keyboard.press(KeyCode::KeyW);
        keyboard.press(KeyCode::ArrowDown);
        let axis = digital_axis(
            &keyboard,
            [KeyCode::KeyW, KeyCode::ArrowUp],
            [KeyCode::KeyS, KeyCode::ArrowDown],
        );
        assert!(axis.is_zero());
    }
}
