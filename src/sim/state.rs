//! Game state and core simulation types
//!
//! Everything a running game scene owns lives here.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::Difficulty;
use super::physics::{Body, World};
use super::player::Player;
use super::timers::Scheduler;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Player was hit. Only a scene restart leaves this phase.
    GameOver,
}

/// Sound cues the host knows how to play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    Collect,
    Jump,
    Hit,
    /// Footsteps, played as a loop
    Walk,
}

/// Things that happened during a tick, drained by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PlaySound(SoundCue),
    LoopSound(SoundCue),
    StopSound(SoundCue),
    StarCollected { score: u32 },
    WaveCleared { wave: u32 },
    PowerUpCollected,
    GameOver { score: u32 },
}

/// A collectible star
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    pub id: u32,
    pub body: Body,
    /// Column the star returns to when the wave refills
    pub home_x: f32,
}

impl Star {
    pub fn is_active(&self) -> bool {
        self.body.enabled
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardKind {
    /// Bounces around inside the world forever
    Bomb,
    /// Falls straight through and is pruned below the world
    Meteor,
}

/// A hazard entity. Touching one ends the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    pub id: u32,
    pub kind: HazardKind,
    pub body: Body,
}

/// The double-jump power-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub body: Body,
}

impl PowerUp {
    pub fn is_active(&self) -> bool {
        self.body.enabled
    }
}

/// Complete game scene state
#[derive(Debug, Clone)]
pub struct GameState {
    pub difficulty: Difficulty,
    pub tuning: Tuning,
    /// Scene generation; timers from an older generation are ignored
    pub generation: u32,
    pub phase: GamePhase,
    pub score: u32,
    /// Waves cleared so far
    pub wave: u32,
    pub world: World,
    pub player: Player,
    /// Stable order: sorted by id
    pub stars: Vec<Star>,
    pub hazards: Vec<Hazard>,
    pub powerups: Vec<PowerUp>,
    pub scheduler: Scheduler,
    /// Pending events for the host
    pub events: Vec<GameEvent>,
    pub rng: Pcg32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// A fresh, empty scene: score 0, playing, no entities besides the player
    pub fn new(difficulty: Difficulty, tuning: Tuning, seed: u64, generation: u32) -> Self {
        let player = Player::new(Vec2::new(PLAYER_SPAWN.0, PLAYER_SPAWN.1), &tuning);
        Self {
            difficulty,
            tuning,
            generation,
            phase: GamePhase::Playing,
            score: 0,
            wave: 0,
            world: World::new(),
            player,
            stars: Vec::new(),
            hazards: Vec::new(),
            powerups: Vec::new(),
            scheduler: Scheduler::new(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Hand pending events to the host
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Lay out the row of stars along the top of the world
    pub fn spawn_stars(&mut self) {
        let (lo, hi) = self.tuning.star_bounce;
        for i in 0..STAR_COUNT {
            let id = self.next_entity_id();
            let x = STAR_START_X + STAR_STEP_X * i as f32;
            let mut body = Body::new(Vec2::new(x, 0.0), Vec2::new(STAR_SIZE.0, STAR_SIZE.1));
            body.collide_platforms = true;
            body.bounce.y = self.rng.random_range(lo..=hi);
            self.stars.push(Star { id, body, home_x: x });
        }
    }

    /// Bring every star back to the top of its column
    pub fn respawn_stars(&mut self) {
        for star in &mut self.stars {
            star.body.enable_at(Vec2::new(star.home_x, 0.0));
        }
    }

    pub fn active_star_count(&self) -> usize {
        self.stars.iter().filter(|s| s.is_active()).count()
    }

    pub fn hazard_count(&self, kind: HazardKind) -> usize {
        self.hazards.iter().filter(|h| h.kind == kind).count()
    }

    /// Drop a power-up at a random x along the top edge
    pub fn spawn_powerup(&mut self) {
        let id = self.next_entity_id();
        let x = self.rng.random_range(0..=WORLD_WIDTH as i32) as f32;
        let mut body = Body::new(Vec2::new(x, 0.0), Vec2::new(POWERUP_SIZE.0, POWERUP_SIZE.1));
        body.bounce = Vec2::splat(POWERUP_BOUNCE);
        body.collide_world_bounds = true;
        body.collide_platforms = true;
        self.powerups.push(PowerUp { id, body });
    }

    /// Step every enabled body through the physics world
    pub fn step_bodies(&mut self, dt: f32) {
        let world = &self.world;
        world.step(&mut self.player.body, dt);
        for star in &mut self.stars {
            world.step(&mut star.body, dt);
        }
        for hazard in &mut self.hazards {
            world.step(&mut hazard.body, dt);
        }
        for powerup in &mut self.powerups {
            world.step(&mut powerup.body, dt);
        }
    }

    /// Remove meteors that have fallen past the bottom edge (strictly below)
    pub fn prune_fallen_hazards(&mut self) {
        self.hazards
            .retain(|h| h.kind != HazardKind::Meteor || h.body.pos.y <= PRUNE_Y);
    }

    /// Drop power-ups that were already picked up
    pub fn prune_collected_powerups(&mut self) {
        self.powerups.retain(|p| p.is_active());
    }
}
