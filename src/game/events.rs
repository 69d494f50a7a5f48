use bevy::prelude::*;

/// Body displacement request for the kinematic resolver. Applied in issue order.
#[derive(Message, Debug, Clone, Copy)]
pub struct DisplaceMessage {
    pub entity: Entity,
    pub delta: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeTransition {
    Enter,
    Exit,
}

/// Something started or stopped overlapping an interaction volume.
#[derive(Message, Debug, Clone, Copy)]
pub struct VolumeMessage {
    pub volume: Entity,
    pub other: Entity,
    pub tag: super::components::EntityTag,
    pub transition: VolumeTransition,
}

/// Deferred actions whose fire time has come, drained from the scheduler at the head of a tick.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionEvent {
    PlayVfx { owner: Entity },
    FinishAttack { owner: Entity },
    TriggerDestruction { target: Entity },
}
