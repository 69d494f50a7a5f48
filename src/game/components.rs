use bevy::prelude::*;

use super::types::{AnimParam, Axis, Mobility, Seconds, Stance};

// ── Marker components ───────────────────────────────────────────────

#[derive(Component)]
pub struct Player;

#[derive(Component)]
pub struct PlayerCamera;

#[derive(Component)]
pub struct Sword;

/// Replacement left behind by a destroyed entity.
#[derive(Component)]
pub struct Wreck;

/// Entity switched off: hidden and ignored by interaction volumes.
#[derive(Component)]
pub struct Deactivated;

/// Tag used by interaction volumes to decide what an overlap means.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityTag {
    Target,
    Prop,
}

// ── Input ───────────────────────────────────────────────────────────

/// Device input gathered in Update, frozen into an [`InputSnapshot`] at the head of a tick.
#[derive(Component, Debug, Clone, Default)]
pub struct PendingInput {
    pub forward_axis: Axis,
    pub strafe_axis: Axis,
    pub mouse_delta_x: f32,
    pub mouse_delta_y: f32,
    pub run_held: bool,
    pub jump_pressed: bool,
    pub crouch_held: bool,
    /// Latched until consumed by a tick.
    pub attack_pressed: bool,
}

/// One tick's input. Written once at the head of the tick, read-only afterwards.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    pub forward_axis: Axis,
    pub strafe_axis: Axis,
    pub mouse_delta_x: f32,
    pub mouse_delta_y: f32,
    pub run_held: bool,
    pub jump_pressed: bool,
    pub crouch_held: bool,
    pub attack_pressed: bool,
}

impl InputSnapshot {
    pub fn is_still(&self) -> bool {
        self.forward_axis.is_zero() && self.strafe_axis.is_zero()
    }
}

// ── Locomotion state ────────────────────────────────────────────────

#[derive(Component, Debug, Clone)]
pub struct MotionState {
    pub velocity: Vec3,
    /// Sampled once at the head of the tick.
    pub is_grounded: bool,
    pub mobility: Mobility,
    pub stance: Stance,
    pub walk_speed: f32,
    pub run_speed: f32,
}

impl MotionState {
    pub fn new(walk_speed: f32, run_speed: f32) -> Self {
        Self {
            velocity: Vec3::ZERO,
            is_grounded: false,
            mobility: Mobility::Free,
            stance: Stance::Standing,
            walk_speed,
            run_speed,
        }
    }

    pub fn can_move(&self) -> bool {
        self.mobility == Mobility::Free
    }

    pub fn set_can_move(&mut self, can_move: bool) {
        self.mobility = if can_move {
            Mobility::Free
        } else {
            Mobility::Frozen
        };
    }

    pub fn speed_for(&self, run_held: bool) -> f32 {
        if run_held {
            self.run_speed
        } else {
            self.walk_speed
        }
    }
}

/// Yaw/pitch in degrees. Positive yaw turns right, positive pitch looks down.
#[derive(Component, Debug, Clone, Copy)]
pub struct LookState {
    pub yaw: f32,
    pub pitch: f32,
    pub pitch_limit: f32,
}

impl LookState {
    pub fn new(pitch_limit: f32) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            pitch_limit: pitch_limit.abs(),
        }
    }
}

/// Kinematic body the resolver moves. Origin sits at the body's vertical centre.
#[derive(Component, Debug, Clone, Copy)]
pub struct KinematicBody {
    pub height: f32,
    /// Contact state left by the last displacement.
    pub grounded: bool,
}

/// Camera entity the player looks through.
#[derive(Component, Debug, Clone, Copy)]
pub struct ViewCamera(pub Entity);

// ── Animation collaborator ──────────────────────────────────────────

/// Boolean animation parameters keyed by [`AnimParam`].
#[derive(Component, Debug, Clone, Default)]
pub struct AnimatorParams {
    walking: bool,
    running: bool,
    walking_back: bool,
    punch: bool,
}

impl AnimatorParams {
    pub fn get_bool(&self, param: AnimParam) -> bool {
        match param {
            AnimParam::Walking => self.walking,
            AnimParam::Running => self.running,
            AnimParam::WalkingBack => self.walking_back,
            AnimParam::Punch => self.punch,
        }
    }

    /// Returns true if the value changed.
    pub fn set_bool(&mut self, param: AnimParam, value: bool) -> bool {
        let slot = match param {
            AnimParam::Walking => &mut self.walking,
            AnimParam::Running => &mut self.running,
            AnimParam::WalkingBack => &mut self.walking_back,
            AnimParam::Punch => &mut self.punch,
        };
        let changed = *slot != value;
        *slot = value;
        changed
    }
}

// ── Attack sequencing ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AttackPhase {
    #[default]
    Idle,
    Attacking {
        started_at: f64,
        vfx_at: f64,
        reset_at: f64,
    },
}

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct AttackState {
    pub phase: AttackPhase,
}

impl AttackState {
    pub fn is_attacking(&self) -> bool {
        matches!(self.phase, AttackPhase::Attacking { .. })
    }
}

/// Entity currently eligible for the destroy interaction (last entered wins).
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct TargetRef(pub Option<Entity>);

/// Effect entity played a while after an attack starts.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct SwordVfx(pub Option<Entity>);

/// Sphere around the owner that reports tagged entities entering and leaving it.
#[derive(Component, Debug, Clone, Default)]
pub struct InteractionVolume {
    pub radius: f32,
    pub overlapping: Vec<(Entity, EntityTag)>,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct CollisionRadius(pub f32);

// ── Collaborators ───────────────────────────────────────────────────

/// Fire-and-forget effect: `play()` shows it for a short flash.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct VisualEffect {
    pub plays: u32,
    pub remaining: Seconds,
}

impl VisualEffect {
    pub fn play(&mut self, flash: f32) {
        self.plays += 1;
        self.remaining = Seconds::new(flash);
    }

    pub fn is_playing(&self) -> bool {
        !self.remaining.is_expired()
    }

    pub fn tick(&mut self, dt: f32) {
        self.remaining = self.remaining.dec(dt);
    }
}

/// What a destroyed entity is replaced with.
#[derive(Debug, Clone)]
pub struct WreckVisual {
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
}

#[derive(Component, Debug, Clone, Default)]
pub struct Destructible {
    destroyed: bool,
    pub wreck: Option<WreckVisual>,
}

impl Destructible {
    pub fn new(wreck: Option<WreckVisual>) -> Self {
        Self {
            destroyed: false,
            wreck,
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// True only for the call that actually destroys; later calls are no-ops.
    pub fn trigger_destruction(&mut self) -> bool {
        if self.destroyed {
            return false;
        }
        self.destroyed = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destruction_is_idempotent() {
        let mut d = Destructible::default();
        assert!(d.trigger_destruction());
        assert!(!d.trigger_destruction());
        assert!(!d.trigger_destruction());
        assert!(d.is_destroyed());
    }

    #[test]
    fn animator_reports_changes_only() {
        let mut anim = AnimatorParams::default();
        assert!(anim.set_bool(AnimParam::Punch, true));
        assert!(!anim.set_bool(AnimParam::Punch, true));
        assert!(anim.get_bool(AnimParam::Punch));
        assert!(!anim.get_bool(AnimParam::Walking));
    }

    #[test]
    fn vfx_flash_runs_out() {
        let mut vfx = VisualEffect::default();
        vfx.play(0.3);
        assert!(vfx.is_playing());
        vfx.tick(0.2);
        assert!(vfx.is_playing());
        vfx.tick(0.2);
        assert!(!vfx.is_playing());
        assert_eq!(vfx.plays, 1);
    }

    #[test]
    fn frozen_motion_cannot_move() {
        let mut m = MotionState::new(30.0, 50.0);
        assert!(m.can_move());
        m.set_can_move(false);
        assert!(!m.can_move());
        assert_eq!(m.speed_for(true), 50.0);
        assert_eq!(m.speed_for(false), 30.0);
    }
}
