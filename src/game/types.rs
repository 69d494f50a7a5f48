// ── Newtypes ────────────────────────────────────────────────────────

/// Input axis value. Always clamped to [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Axis(pub f32);

impl Axis {
    pub const ZERO: Self = Self(0.0);

    pub fn new(v: f32) -> Self {
        if v.is_finite() {
            Self(v.clamp(-1.0, 1.0))
        } else {
            Self::ZERO
        }
    }

    /// Exactly at rest (digital zero, not "close to").
    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }
}

/// Duration in seconds. Always >= 0.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Seconds(pub f32);

impl Seconds {
    pub fn new(v: f32) -> Self {
        Self(v.max(0.0))
    }

    /// Decrement by dt, clamped to 0.
    pub fn dec(self, dt: f32) -> Self {
        Self((self.0 - dt).max(0.0))
    }

    pub fn is_expired(self) -> bool {
        self.0 <= 0.0
    }
}

/// Discrete tick counter (u64, checked arithmetic).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Tick(pub u64);

impl Tick {
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

// ── Enums ───────────────────────────────────────────────────────────

/// Whether locomotion and look are allowed this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mobility {
    #[default]
    Free,
    Frozen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Stance {
    #[default]
    Standing,
    Crouching,
}

/// Animation parameters the controller drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimParam {
    Walking,
    Running,
    WalkingBack,
    Punch,
}

impl AnimParam {
    pub fn name(self) -> &'static str {
        match self {
            Self::Walking => "isWalking",
            Self::Running => "isRunning",
            Self::WalkingBack => "isWalkingBack",
            Self::Punch => "isPunch",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_clamps_and_rejects_nan() {
        assert_eq!(Axis::new(3.0), Axis(1.0));
        assert_eq!(Axis::new(-7.5), Axis(-1.0));
        assert_eq!(Axis::new(f32::NAN), Axis::ZERO);
        assert!(Axis::new(0.0).is_zero());
        assert!(!Axis::new(0.001).is_zero());
    }

    #[test]
    fn seconds_never_go_negative() {
        let s = Seconds::new(0.1).dec(0.25);
        assert!(s.is_expired());
        assert_eq!(s.0, 0.0);
    }
}
