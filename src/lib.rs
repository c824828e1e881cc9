//! Star Dash - A browser platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state, scenes)
//! - `platform`: Browser/native platform abstraction
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod error;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{Error, Result};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, matching the arcade physics step)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// World dimensions
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;
    /// Horizontal midpoint, used to bias hazard spawns away from the player
    pub const WORLD_MID_X: f32 = WORLD_WIDTH / 2.0;

    /// Downward gravity (pixels/s²)
    pub const GRAVITY: f32 = 300.0;

    /// Player spawn point and body size
    pub const PLAYER_SPAWN: (f32, f32) = (100.0, 450.0);
    pub const PLAYER_SIZE: (f32, f32) = (32.0, 48.0);
    pub const PLAYER_BOUNCE: f32 = 0.2;

    /// Star layout: `STAR_COUNT` stars from `STAR_START_X`, `STAR_STEP_X` apart
    pub const STAR_COUNT: usize = 12;
    pub const STAR_START_X: f32 = 12.0;
    pub const STAR_STEP_X: f32 = 70.0;
    pub const STAR_SIZE: (f32, f32) = (24.0, 22.0);

    pub const BOMB_SIZE: (f32, f32) = (14.0, 14.0);
    /// Bombs drop in just below the top edge
    pub const BOMB_SPAWN_Y: f32 = 16.0;
    pub const METEOR_SIZE: (f32, f32) = (24.0, 24.0);
    pub const POWERUP_SIZE: (f32, f32) = (24.0, 24.0);
    pub const POWERUP_BOUNCE: f32 = 0.5;

    /// Falling hazards below this line are pruned (strictly greater)
    pub const PRUNE_Y: f32 = 600.0;
}
