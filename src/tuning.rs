//! Data-driven game balance
//!
//! Defaults reproduce the shipped feel. A JSON document may override any
//! subset of fields; missing fields keep their defaults.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Gameplay tuning knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Horizontal run speed (pixels/s)
    pub run_speed: f32,
    /// Upward velocity applied by a jump or double jump (pixels/s)
    pub jump_impulse: f32,
    /// Points per collected star
    pub star_reward: u32,
    /// How long the double-jump power-up lasts (ms)
    pub double_jump_ms: f32,
    /// Delay between consecutive meteors in a falling wave (ms)
    pub meteor_stride_ms: f64,
    /// Downward speed of a freshly spawned meteor (pixels/s)
    pub meteor_fall_speed: f32,
    /// Meteor horizontal speed is drawn from [-max, max]
    pub meteor_max_vx: i32,
    /// Bomb horizontal speed is drawn from [-max, max]
    pub bomb_max_vx: i32,
    /// Slow vertical drift given to a new bomb (pixels/s)
    pub bomb_drift_vy: f32,
    /// Star vertical bounce is drawn from [min, max]
    pub star_bounce: (f32, f32),
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            run_speed: 160.0,
            jump_impulse: 330.0,
            star_reward: 10,
            double_jump_ms: 10_000.0,
            meteor_stride_ms: 500.0,
            meteor_fall_speed: 200.0,
            meteor_max_vx: 100,
            bomb_max_vx: 200,
            bomb_drift_vy: 20.0,
            star_bounce: (0.4, 0.8),
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning document
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would break gameplay invariants
    pub fn validate(&self) -> Result<()> {
        if self.double_jump_ms <= 0.0 {
            return Err(Error::InvalidTuning(format!(
                "double_jump_ms must be positive, got {}",
                self.double_jump_ms
            )));
        }
        if self.meteor_stride_ms < 0.0 {
            return Err(Error::InvalidTuning(format!(
                "meteor_stride_ms must not be negative, got {}",
                self.meteor_stride_ms
            )));
        }
        if self.meteor_max_vx < 0 || self.bomb_max_vx < 0 {
            return Err(Error::InvalidTuning(
                "horizontal speed ranges must not be negative".to_string(),
            ));
        }
        let (lo, hi) = self.star_bounce;
        if !(0.0..=1.0).contains(&lo) || !(0.0..=1.0).contains(&hi) || lo > hi {
            return Err(Error::InvalidTuning(format!(
                "star_bounce must be an ordered range inside [0, 1], got ({lo}, {hi})"
            )));
        }
        Ok(())
    }
}
