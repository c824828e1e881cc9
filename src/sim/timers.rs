//! Deferred actions on the scene clock
//!
//! A timer is plain data: when it fires, which scene generation scheduled it,
//! and what it should do. Nothing captures the scene, so a timer that
//! outlives its scene is harmless and is dropped when it comes due.

use serde::{Deserialize, Serialize};

/// Work a timer performs when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeferredAction {
    /// Drop one meteor from the top of the world
    SpawnFallingHazard,
}

/// A fire-once timer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timer {
    pub due_ms: f64,
    /// Scene generation that scheduled this timer
    pub generation: u32,
    pub action: DeferredAction,
}

/// Monotonic millisecond clock plus pending timers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheduler {
    now_ms: f64,
    /// Kept sorted by `due_ms`, insertion order among equal deadlines
    pending: Vec<Timer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn pending(&self) -> &[Timer] {
        &self.pending
    }

    /// Schedule `action` to fire `delay_ms` from now
    pub fn schedule(&mut self, delay_ms: f64, generation: u32, action: DeferredAction) {
        let timer = Timer {
            due_ms: self.now_ms + delay_ms.max(0.0),
            generation,
            action,
        };
        let idx = self.pending.partition_point(|t| t.due_ms <= timer.due_ms);
        self.pending.insert(idx, timer);
    }

    /// Advance the clock by `delta_ms` and hand back every timer now due,
    /// earliest first. A zero-delay timer fires on the next advance.
    pub fn advance(&mut self, delta_ms: f64) -> Vec<Timer> {
        self.now_ms += delta_ms.max(0.0);
        let due = self.pending.partition_point(|t| t.due_ms <= self.now_ms);
        self.pending.drain(..due).collect()
    }

    /// Drop every pending timer
    pub fn cancel_all(&mut self) {
        if !self.pending.is_empty() {
            log::debug!("Cancelling {} pending timers", self.pending.len());
        }
        self.pending.clear();
    }
}
