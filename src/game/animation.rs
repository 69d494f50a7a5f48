use bevy::prelude::*;

use super::components::*;
use super::types::AnimParam;

fn set_param(anim: &mut AnimatorParams, param: AnimParam, value: bool) {
    if anim.set_bool(param, value) {
        debug!("[Anim] {} = {}", param.name(), value);
    }
}

/// AnimationSet: locomotion parameters follow the raw input, whether or not the body may move.
pub fn process_animations(mut query: Query<(&InputSnapshot, &mut AnimatorParams), With<Player>>) {
    for (input, mut anim) in &mut query {
        set_param(&mut anim, AnimParam::Walking, !input.is_still());
        set_param(&mut anim, AnimParam::Running, input.run_held);
        set_param(&mut anim, AnimParam::WalkingBack, input.forward_axis.0 < 0.0);
    }
}

/// Mirror the attack phase into the punch parameter.
pub fn set_punch(anim: &mut AnimatorParams, punching: bool) {
    set_param(anim, AnimParam::Punch, punching);
}
