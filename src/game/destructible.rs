use bevy::prelude::*;

use super::components::*;
use super::events::ActionEvent;
use crate::config::tuning::Tuning;

/// ClockSet: destroy captured targets. Repeat requests and targets that are gone or were
/// never destructible are absorbed without error.
pub fn apply_destruction(
    mut commands: Commands,
    tuning: Res<Tuning>,
    mut events: MessageReader<ActionEvent>,
    mut targets: Query<(&mut Destructible, &Transform, Option<&mut Visibility>)>,
) {
    for event in events.read() {
        let ActionEvent::TriggerDestruction { target } = event else {
            continue;
        };
        let Ok((mut destructible, tf, visibility)) = targets.get_mut(*target) else {
            debug!("[Destructible] {:?} has nothing to destroy, skipping", target);
            continue;
        };
        if !destructible.trigger_destruction() {
            continue;
        }

        if let Some(wreck) = &destructible.wreck {
            commands.spawn((
                Wreck,
                Mesh3d(wreck.mesh.clone()),
                MeshMaterial3d(wreck.material.clone()),
                Transform {
                    translation: tf.translation,
                    rotation: tf.rotation,
                    scale: Vec3::splat(tuning.wreck_scale),
                },
            ));
        }
        if let Some(mut visibility) = visibility {
            *visibility = Visibility::Hidden;
        }
        commands.entity(*target).insert(Deactivated);
        info!("[Destructible] destroyed {:?} at {:?}", target, tf.translation);
    }
}
