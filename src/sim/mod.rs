//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through `tick`
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies

pub mod ability;
pub mod collision;
pub mod difficulty;
pub mod physics;
pub mod player;
pub mod scene;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod timers;

pub use ability::AbilityTimer;
pub use collision::{collect_powerup, collect_star, hit_hazard, resolve_contacts};
pub use difficulty::{Difficulty, HazardCounts};
pub use physics::{Aabb, Body, World};
pub use player::{Animation, Player};
pub use scene::{ActiveScene, GameScene, MenuScene, Scene, SceneHost, SceneKey, SceneTransition};
pub use spawner::{spawn_falling_hazard, spawn_falling_wave, spawn_stationary_hazard};
pub use state::{
    GameEvent, GamePhase, GameState, Hazard, HazardKind, PowerUp, SoundCue, Star,
};
pub use tick::{TickInput, tick};
pub use timers::{DeferredAction, Scheduler, Timer};
