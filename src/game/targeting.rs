use bevy::prelude::*;

use super::components::*;
use super::events::{ActionEvent, VolumeMessage, VolumeTransition};
use super::scheduler::{DelayedActions, SimClock};
use crate::config::tuning::Tuning;

/// SenseSet: report tagged entities entering and leaving each interaction volume.
/// Deactivated or despawned entities count as leaving.
pub fn detect_volume_overlaps(
    mut volumes: Query<(Entity, &Transform, &mut InteractionVolume)>,
    others: Query<(Entity, &Transform, &CollisionRadius, &EntityTag), Without<Deactivated>>,
    mut out: MessageWriter<VolumeMessage>,
) {
    for (volume_entity, volume_tf, mut volume) in &mut volumes {
        let center = volume_tf.translation;
        let reach = volume.radius;
        let inside: Vec<(Entity, EntityTag)> = others
            .iter()
            .filter(|(e, tf, r, _)| *e != volume_entity && tf.translation.distance(center) < reach + r.0)
            .map(|(e, _, _, tag)| (e, *tag))
            .collect();

        for &(other, tag) in &volume.overlapping {
            if !inside.iter().any(|(e, _)| *e == other) {
                out.write(VolumeMessage {
                    volume: volume_entity,
                    other,
                    tag,
                    transition: VolumeTransition::Exit,
                });
            }
        }
        for &(other, tag) in &inside {
            if !volume.overlapping.iter().any(|(e, _)| *e == other) {
                out.write(VolumeMessage {
                    volume: volume_entity,
                    other,
                    tag,
                    transition: VolumeTransition::Enter,
                });
            }
        }
        volume.overlapping = inside;
    }
}

/// Apply one volume transition to a target slot. Last entered wins; leaving only clears
/// the slot if the leaver is the one being tracked.
pub fn retarget(current: Option<Entity>, other: Entity, transition: VolumeTransition) -> Option<Entity> {
    match transition {
        VolumeTransition::Enter => Some(other),
        VolumeTransition::Exit if current == Some(other) => None,
        VolumeTransition::Exit => current,
    }
}

/// SenseSet: keep each volume owner's TargetRef in step with Target-tagged overlaps.
pub fn update_target_ref(mut events: MessageReader<VolumeMessage>, mut owners: Query<&mut TargetRef>) {
    for event in events.read() {
        if event.tag != EntityTag::Target {
            continue;
        }
        let Ok(mut target) = owners.get_mut(event.volume) else {
            continue;
        };
        let next = retarget(target.0, event.other, event.transition);
        if next != target.0 {
            debug!("[Target] {:?} -> {:?}", target.0, next);
            target.0 = next;
        }
    }
}

/// AttackSet: an attack press with a target queues its destruction. The target is captured
/// now; later TargetRef changes do not redirect it. Independent of the punch gate.
pub fn schedule_destroy(
    tuning: Res<Tuning>,
    clock: Res<SimClock>,
    mut actions: ResMut<DelayedActions>,
    players: Query<(&InputSnapshot, &TargetRef), With<Player>>,
) {
    for (input, target) in &players {
        if !input.attack_pressed {
            continue;
        }
        if let Some(target) = target.0 {
            let at = actions.schedule(clock.now, tuning.destroy_delay, ActionEvent::TriggerDestruction { target });
            debug!("[Target] destroy {:?} @{:.3}", target, at);
        }
    }
}
