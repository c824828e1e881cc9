//! Double-jump ability countdown

use serde::{Deserialize, Serialize};

/// Full duration granted by a power-up (ms)
pub const DOUBLE_JUMP_MS: f32 = 10_000.0;

/// Remaining time on the double-jump power-up
///
/// Expiry is the only transition and it sticks until the next `activate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AbilityTimer {
    remaining_ms: f32,
    duration_ms: f32,
    active: bool,
}

impl Default for AbilityTimer {
    fn default() -> Self {
        Self::new(DOUBLE_JUMP_MS)
    }
}

impl AbilityTimer {
    /// Inactive timer that will run for `duration_ms` once activated
    pub fn new(duration_ms: f32) -> Self {
        Self {
            remaining_ms: 0.0,
            duration_ms,
            active: false,
        }
    }

    /// Refill to the full duration. Picking up a second power-up restarts the clock.
    pub fn activate(&mut self) {
        self.remaining_ms = self.duration_ms;
        self.active = true;
    }

    /// Count down by `delta_ms`; expire at or below zero
    pub fn tick(&mut self, delta_ms: f32) {
        if !self.active {
            return;
        }
        self.remaining_ms -= delta_ms;
        if self.remaining_ms <= 0.0 {
            self.remaining_ms = 0.0;
            self.active = false;
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn remaining_ms(&self) -> f32 {
        self.remaining_ms
    }

    /// Fill fraction for the HUD bar, in [0, 1]
    pub fn fraction(&self) -> f32 {
        if self.duration_ms <= 0.0 {
            return 0.0;
        }
        (self.remaining_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Whole seconds left, rounded up, for the HUD label
    pub fn seconds_left(&self) -> u32 {
        (self.remaining_ms / 1000.0).ceil().max(0.0) as u32
    }
}
