//! Hazard spawning: bouncing bombs and timed meteor waves

use glam::Vec2;
use rand::Rng;

use super::physics::Body;
use super::state::{GameState, Hazard, HazardKind};
use super::timers::DeferredAction;
use crate::consts::*;

/// Pick a bomb x in the half of the world the player is not standing in
pub fn biased_hazard_x<R: Rng + ?Sized>(rng: &mut R, player_x: f32) -> f32 {
    let (lo, hi) = if player_x < WORLD_MID_X {
        (WORLD_MID_X as i32, WORLD_WIDTH as i32)
    } else {
        (0, WORLD_MID_X as i32)
    };
    rng.random_range(lo..=hi) as f32
}

/// Spawn one bomb away from the player
pub fn spawn_stationary_hazard(state: &mut GameState, player_x: f32) -> u32 {
    let x = biased_hazard_x(&mut state.rng, player_x);
    spawn_bomb_at(state, x)
}

/// Opening bombs of a scene, placed anywhere along the top
pub fn seed_initial_hazards(state: &mut GameState, count: u32) {
    for _ in 0..count {
        let x = state.rng.random_range(0..=WORLD_WIDTH as i32) as f32;
        spawn_bomb_at(state, x);
    }
}

fn spawn_bomb_at(state: &mut GameState, x: f32) -> u32 {
    let id = state.next_entity_id();
    let max_vx = state.tuning.bomb_max_vx;
    let vx = state.rng.random_range(-max_vx..=max_vx) as f32;

    let mut body = Body::new(Vec2::new(x, BOMB_SPAWN_Y), Vec2::new(BOMB_SIZE.0, BOMB_SIZE.1));
    body.bounce = Vec2::ONE;
    body.collide_world_bounds = true;
    body.collide_platforms = true;
    body.vel = Vec2::new(vx, state.tuning.bomb_drift_vy);

    state.hazards.push(Hazard {
        id,
        kind: HazardKind::Bomb,
        body,
    });
    id
}

/// Schedule `count` meteors, one every `meteor_stride_ms`, starting now
pub fn spawn_falling_wave(state: &mut GameState, count: u32) {
    let stride = state.tuning.meteor_stride_ms;
    for i in 0..count {
        state.scheduler.schedule(
            i as f64 * stride,
            state.generation,
            DeferredAction::SpawnFallingHazard,
        );
    }
}

/// Drop a single meteor from a random point on the top edge
pub fn spawn_falling_hazard(state: &mut GameState) -> u32 {
    let id = state.next_entity_id();
    let x = state.rng.random_range(0..=WORLD_WIDTH as i32) as f32;
    let max_vx = state.tuning.meteor_max_vx;
    let vx = state.rng.random_range(-max_vx..=max_vx) as f32;

    let mut body = Body::new(Vec2::new(x, 0.0), Vec2::new(METEOR_SIZE.0, METEOR_SIZE.1));
    body.vel = Vec2::new(vx, state.tuning.meteor_fall_speed);

    state.hazards.push(Hazard {
        id,
        kind: HazardKind::Meteor,
        body,
    });
    id
}
