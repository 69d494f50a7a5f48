//! One-shot delayed actions against the simulation clock.
//!
//! Actions are kept in a min-heap keyed by fire time (ties fire in scheduling order) and
//! drained at the head of each tick. Nothing here is cancellable: once scheduled, an action
//! fires exactly once. Targets are captured as plain `Entity` handles at scheduling time.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use bevy::prelude::*;

use super::events::ActionEvent;
use super::types::Tick;
use crate::config::tuning::Tuning;

/// Absorbs float noise from summing fixed tick lengths.
const CLOCK_EPSILON: f64 = 1e-6;

/// Monotonic simulation clock, advanced by `Tuning::dt` once per tick.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct SimClock {
    pub tick: Tick,
    pub now: f64,
}

impl SimClock {
    pub fn advance(&mut self, dt: f32) {
        self.tick = self.tick.next();
        self.now += dt as f64;
    }
}

#[derive(Debug, Clone, Copy)]
struct ScheduledAction {
    fire_at: f64,
    seq: u64,
    action: ActionEvent,
}

impl PartialEq for ScheduledAction {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScheduledAction {}

impl PartialOrd for ScheduledAction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledAction {
    fn cmp(&self, other: &Self) -> Ordering {
        self.fire_at
            .total_cmp(&other.fire_at)
            .then(self.seq.cmp(&other.seq))
    }
}

#[derive(Resource, Default)]
pub struct DelayedActions {
    heap: BinaryHeap<Reverse<ScheduledAction>>,
    next_seq: u64,
}

impl DelayedActions {
    /// Schedule `action` to fire `delay` seconds after `now`. Returns the fire time.
    pub fn schedule(&mut self, now: f64, delay: f32, action: ActionEvent) -> f64 {
        let fire_at = now + delay.max(0.0) as f64;
        self.heap.push(Reverse(ScheduledAction {
            fire_at,
            seq: self.next_seq,
            action,
        }));
        self.next_seq += 1;
        fire_at
    }

    /// Pop every action due at `now`, earliest first.
    pub fn drain_due(&mut self, now: f64) -> Vec<ActionEvent> {
        let mut due = Vec::new();
        while let Some(Reverse(head)) = self.heap.peek() {
            if head.fire_at > now + CLOCK_EPSILON {
                break;
            }
            if let Some(Reverse(item)) = self.heap.pop() {
                due.push(item.action);
            }
        }
        due
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

/// ClockSet: advance the simulation clock by one tick.
pub fn advance_clock(tuning: Res<Tuning>, mut clock: ResMut<SimClock>) {
    clock.advance(tuning.dt);
}

/// ClockSet: hand every due action to the apply systems.
pub fn drain_due_actions(
    clock: Res<SimClock>,
    mut actions: ResMut<DelayedActions>,
    mut out: MessageWriter<ActionEvent>,
) {
    for action in actions.drain_due(clock.now) {
        trace!("[Scheduler] t={:.3} firing {:?}", clock.now, action);
        out.write(action);
    }
}
