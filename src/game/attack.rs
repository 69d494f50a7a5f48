use bevy::prelude::*;

use super::animation::set_punch;
use super::components::*;
use super::events::ActionEvent;
use super::scheduler::{DelayedActions, SimClock};
use crate::config::tuning::Tuning;

/// Attacks only start from a grounded standstill, walking pace, with nothing in flight.
pub fn can_start_attack(input: &InputSnapshot, motion: &MotionState, attack: &AttackState) -> bool {
    input.attack_pressed
        && motion.can_move()
        && motion.is_grounded
        && !attack.is_attacking()
        && !input.run_held
        && input.is_still()
}

/// AttackSet: Idle → Attacking. Schedules the effect and the reset from the same origin.
pub fn process_attack(
    tuning: Res<Tuning>,
    clock: Res<SimClock>,
    mut actions: ResMut<DelayedActions>,
    mut players: Query<
        (Entity, &InputSnapshot, &MotionState, &mut AttackState, &mut AnimatorParams),
        With<Player>,
    >,
) {
    for (entity, input, motion, mut attack, mut anim) in &mut players {
        if !can_start_attack(input, motion, &attack) {
            continue;
        }

        let started_at = clock.now;
        let vfx_at = actions.schedule(started_at, tuning.vfx_delay, ActionEvent::PlayVfx { owner: entity });
        let reset_at = actions.schedule(
            started_at,
            tuning.attack_reset_delay,
            ActionEvent::FinishAttack { owner: entity },
        );
        attack.phase = AttackPhase::Attacking {
            started_at,
            vfx_at,
            reset_at,
        };
        set_punch(&mut anim, true);
        info!("[Attack] start t={:.3} vfx@{:.3} reset@{:.3}", started_at, vfx_at, reset_at);
    }
}

/// ClockSet: play the owner's sword effect, or skip quietly if it has none.
pub fn play_sword_vfx(
    tuning: Res<Tuning>,
    mut events: MessageReader<ActionEvent>,
    owners: Query<&SwordVfx>,
    mut effects: Query<&mut VisualEffect>,
) {
    for event in events.read() {
        let ActionEvent::PlayVfx { owner } = event else {
            continue;
        };
        let effect = owners
            .get(*owner)
            .ok()
            .and_then(|vfx| vfx.0)
            .and_then(|e| effects.get_mut(e).ok());
        match effect {
            Some(mut effect) => effect.play(tuning.vfx_flash_secs),
            None => debug!("[Attack] no sword effect on {:?}, skipping", owner),
        }
    }
}

/// ClockSet: Attacking → Idle. The reset timer is the only way out.
pub fn finish_attack(
    clock: Res<SimClock>,
    mut events: MessageReader<ActionEvent>,
    mut players: Query<(&mut AttackState, &mut AnimatorParams)>,
) {
    for event in events.read() {
        let ActionEvent::FinishAttack { owner } = event else {
            continue;
        };
        let Ok((mut attack, mut anim)) = players.get_mut(*owner) else {
            continue;
        };
        if !attack.is_attacking() {
            continue;
        }
        attack.phase = AttackPhase::Idle;
        set_punch(&mut anim, false);
        info!("[Attack] finished t={:.3}", clock.now);
    }
}

/// ClockSet: run down effect flashes.
pub fn tick_visual_effects(tuning: Res<Tuning>, mut query: Query<&mut VisualEffect>) {
    for mut effect in &mut query {
        effect.tick(tuning.dt);
    }
}

/// CleanupSet: effects are visible exactly while they are playing.
pub fn sync_effect_visibility(mut query: Query<(&VisualEffect, &mut Visibility)>) {
    for (effect, mut visibility) in &mut query {
        let wanted = if effect.is_playing() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        if *visibility != wanted {
            *visibility = wanted;
        }
    }
}
