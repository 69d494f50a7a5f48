use bevy::prelude::*;

use crate::game::{
    animation, attack, destructible,
    events::{ActionEvent, DisplaceMessage, VolumeMessage},
    input, locomotion, look, physics,
    scheduler::{self, DelayedActions, SimClock},
    targeting,
};

// ── SystemSets (strict FixedUpdate ordering, one pass per tick) ─────

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FixedGameSet {
    /// Advance the clock, then fire every deferred action that is due.
    ClockSet,
    /// Freeze input, sample contact, resolve interaction volumes.
    SenseSet,
    MovementSet,
    AnimationSet,
    JumpGravitySet,
    PhysicsSet,
    AttackSet,
    LookSet,
    CleanupSet,
}

/// The controller tick. Expects a `Tuning` resource.
pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<DisplaceMessage>();
        app.add_message::<VolumeMessage>();
        app.add_message::<ActionEvent>();
        app.init_resource::<SimClock>();
        app.init_resource::<DelayedActions>();

        app.configure_sets(
            FixedUpdate,
            (
                FixedGameSet::ClockSet,
                FixedGameSet::SenseSet,
                FixedGameSet::MovementSet,
                FixedGameSet::AnimationSet,
                FixedGameSet::JumpGravitySet,
                FixedGameSet::PhysicsSet,
                FixedGameSet::AttackSet,
                FixedGameSet::LookSet,
                FixedGameSet::CleanupSet,
            )
                .chain(),
        );

        // ClockSet: due actions are applied in the tick they fire
        app.add_systems(
            FixedUpdate,
            (
                scheduler::advance_clock,
                scheduler::drain_due_actions,
                attack::tick_visual_effects,
                attack::play_sword_vfx,
                attack::finish_attack,
                destructible::apply_destruction,
            )
                .chain()
                .in_set(FixedGameSet::ClockSet),
        );

        // SenseSet
        app.add_systems(
            FixedUpdate,
            (
                input::snapshot_input,
                locomotion::sample_grounded,
                locomotion::apply_stance,
                targeting::detect_volume_overlaps,
                targeting::update_target_ref,
            )
                .chain()
                .in_set(FixedGameSet::SenseSet),
        );

        app.add_systems(
            FixedUpdate,
            locomotion::process_movement.in_set(FixedGameSet::MovementSet),
        );
        app.add_systems(
            FixedUpdate,
            animation::process_animations.in_set(FixedGameSet::AnimationSet),
        );
        app.add_systems(
            FixedUpdate,
            locomotion::process_jump_and_gravity.in_set(FixedGameSet::JumpGravitySet),
        );
        app.add_systems(
            FixedUpdate,
            physics::apply_displacements.in_set(FixedGameSet::PhysicsSet),
        );

        // AttackSet: punch and destroy read the same press independently
        app.add_systems(
            FixedUpdate,
            (attack::process_attack, targeting::schedule_destroy)
                .chain()
                .in_set(FixedGameSet::AttackSet),
        );

        app.add_systems(FixedUpdate, look::process_look.in_set(FixedGameSet::LookSet));
        app.add_systems(
            FixedUpdate,
            attack::sync_effect_visibility.in_set(FixedGameSet::CleanupSet),
        );
    }
}
