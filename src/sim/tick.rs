//! Per-frame simulation step
//!
//! Frame order is fixed: due timers, physics and contacts, then the player
//! controller, the ability countdown and finally hazard pruning.

use super::collision::resolve_contacts;
use super::spawner::spawn_falling_hazard;
use super::state::GameState;
use super::timers::{DeferredAction, Timer};

/// Keyboard snapshot for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Left held (ArrowLeft or A)
    pub left: bool,
    /// Right held (ArrowRight or D)
    pub right: bool,
    /// Up held (ArrowUp or W)
    pub up: bool,
    /// Up went down since the previous tick
    pub up_pressed: bool,
    /// Down held (ArrowDown or S). Read but unused by the controller.
    pub down: bool,
}

/// Advance the game state by `delta_ms` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, delta_ms: f32) {
    // Nothing moves once the run is over
    if state.is_game_over() {
        return;
    }

    for timer in state.scheduler.advance(delta_ms as f64) {
        run_timer(state, timer);
    }

    state.step_bodies(delta_ms / 1000.0);
    resolve_contacts(state);
    if state.is_game_over() {
        return;
    }

    let grounded = state.player.is_grounded();
    state
        .player
        .control(input, grounded, &state.tuning, &mut state.events);
    state.player.ability.tick(delta_ms);
    state.prune_fallen_hazards();
    state.prune_collected_powerups();
}

/// Perform a due timer's action, or drop it if its scene is gone
pub fn run_timer(state: &mut GameState, timer: Timer) {
    if timer.generation != state.generation {
        log::debug!(
            "Dropping {:?} from scene generation {} (current {})",
            timer.action,
            timer.generation,
            state.generation
        );
        return;
    }
    if state.is_game_over() {
        log::debug!("Dropping {:?} after game over", timer.action);
        return;
    }

    match timer.action {
        DeferredAction::SpawnFallingHazard => {
            spawn_falling_hazard(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::hit_hazard;
    use crate::sim::difficulty::Difficulty;
    use crate::sim::physics::Body;
    use crate::sim::spawner::spawn_falling_wave;
    use crate::sim::state::{GamePhase, Hazard, HazardKind};
    use crate::tuning::Tuning;
    use glam::Vec2;

    const FRAME_MS: f32 = 1000.0 / 60.0;

    fn state() -> GameState {
        GameState::new(Difficulty::Easy, Tuning::default(), 12345, 1)
    }

    #[test]
    fn test_player_lands_and_can_jump() {
        let mut s = state();
        let idle = TickInput::default();
        for _ in 0..120 {
            tick(&mut s, &idle, FRAME_MS);
        }
        assert!(s.player.is_grounded());

        let jump = TickInput {
            up: true,
            up_pressed: true,
            ..Default::default()
        };
        tick(&mut s, &jump, FRAME_MS);
        assert_eq!(s.player.body.vel.y, -330.0);
    }

    #[test]
    fn test_controller_runs_before_ability_tick() {
        let mut s = state();
        s.player.ability.activate();
        s.player.ability.tick(10_000.0 - 10.0);
        assert!(s.player.can_double_jump());

        // Airborne at spawn; the last 10ms of power-up still allow a double jump
        let input = TickInput {
            up: true,
            up_pressed: true,
            ..Default::default()
        };
        tick(&mut s, &input, FRAME_MS);
        assert!(s.player.has_double_jumped);
        assert_eq!(s.player.body.vel.y, -330.0);
        assert!(!s.player.can_double_jump());
    }

    #[test]
    fn test_falling_wave_spawns_over_time() {
        let mut s = state();
        spawn_falling_wave(&mut s, 3);
        let idle = TickInput::default();

        tick(&mut s, &idle, 20.0);
        assert_eq!(s.hazard_count(HazardKind::Meteor), 1);

        for _ in 0..24 {
            tick(&mut s, &idle, 20.0);
        }
        assert_eq!(s.hazard_count(HazardKind::Meteor), 2);

        for _ in 0..25 {
            tick(&mut s, &idle, 20.0);
        }
        assert_eq!(s.hazard_count(HazardKind::Meteor), 3);
        assert!(s.scheduler.pending().is_empty());
    }

    #[test]
    fn test_stale_timer_is_ignored() {
        let mut s = state();
        s.scheduler
            .schedule(0.0, s.generation - 1, DeferredAction::SpawnFallingHazard);
        tick(&mut s, &TickInput::default(), FRAME_MS);
        assert_eq!(s.hazard_count(HazardKind::Meteor), 0);
    }

    #[test]
    fn test_timer_after_game_over_is_noop() {
        let mut s = state();
        hit_hazard(&mut s, HazardKind::Bomb);
        let timer = Timer {
            due_ms: 0.0,
            generation: s.generation,
            action: DeferredAction::SpawnFallingHazard,
        };
        run_timer(&mut s, timer);
        assert!(s.hazards.is_empty());
    }

    #[test]
    fn test_game_over_freezes_frame() {
        let mut s = state();
        hit_hazard(&mut s, HazardKind::Meteor);
        s.drain_events();
        let pos = s.player.body.pos;

        let input = TickInput {
            right: true,
            up: true,
            up_pressed: true,
            ..Default::default()
        };
        tick(&mut s, &input, FRAME_MS);
        assert_eq!(s.phase, GamePhase::GameOver);
        assert_eq!(s.player.body.vel, Vec2::ZERO);
        assert_eq!(s.player.body.pos, pos);
        assert!(s.events.is_empty());
    }

    #[test]
    fn test_meteor_pruned_after_leaving_world() {
        let mut s = state();
        let id = s.next_entity_id();
        let mut body = Body::new(Vec2::new(700.0, 599.0), Vec2::splat(24.0));
        body.vel.y = 200.0;
        s.hazards.push(Hazard {
            id,
            kind: HazardKind::Meteor,
            body,
        });
        tick(&mut s, &TickInput::default(), FRAME_MS);
        assert_eq!(s.hazard_count(HazardKind::Meteor), 0);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(Difficulty::Hard, Tuning::default(), 99999, 1);
        let mut state2 = GameState::new(Difficulty::Hard, Tuning::default(), 99999, 1);
        for s in [&mut state1, &mut state2] {
            s.spawn_stars();
            spawn_falling_wave(s, 5);
        }

        let inputs = [
            TickInput {
                right: true,
                ..Default::default()
            },
            TickInput {
                up: true,
                up_pressed: true,
                ..Default::default()
            },
            TickInput {
                left: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..30 {
            for input in &inputs {
                tick(&mut state1, input, FRAME_MS);
                tick(&mut state2, input, FRAME_MS);
            }
        }

        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.phase, state2.phase);
        assert_eq!(state1.hazards.len(), state2.hazards.len());
        assert_eq!(state1.player.body.pos, state2.player.body.pos);
    }
}
