//! Contact handling and the game-over transition
//!
//! Overlaps between the player and everything else are checked after the
//! physics step. Stars and power-ups are collected; any hazard ends the run.

use glam::Vec2;

use super::player::Animation;
use super::spawner::{spawn_falling_wave, spawn_stationary_hazard};
use super::state::{GameEvent, GamePhase, GameState, HazardKind, SoundCue};

/// Dispatch every player contact for this step
pub fn resolve_contacts(state: &mut GameState) {
    if state.is_game_over() {
        return;
    }

    for i in 0..state.stars.len() {
        if state.player.body.overlaps(&state.stars[i].body) {
            collect_star(state, i);
        }
    }

    // Bombs are checked before meteors
    for kind in [HazardKind::Bomb, HazardKind::Meteor] {
        let hit = state
            .hazards
            .iter()
            .any(|h| h.kind == kind && state.player.body.overlaps(&h.body));
        if hit {
            hit_hazard(state, kind);
            return;
        }
    }

    for i in 0..state.powerups.len() {
        if state.player.body.overlaps(&state.powerups[i].body) {
            collect_powerup(state, i);
        }
    }
}

/// Pick up the star at `index`; clearing the last one starts a new wave
pub fn collect_star(state: &mut GameState, index: usize) {
    let Some(star) = state.stars.get_mut(index) else {
        return;
    };
    if !star.is_active() {
        return;
    }
    star.body.disable();

    state.score += state.tuning.star_reward;
    state.push_event(GameEvent::PlaySound(SoundCue::Collect));
    state.push_event(GameEvent::StarCollected { score: state.score });

    if state.active_star_count() == 0 && !state.is_game_over() {
        clear_wave(state);
    }
}

/// All stars are gone: refill them and raise the stakes
fn clear_wave(state: &mut GameState) {
    state.wave += 1;
    state.respawn_stars();

    let player_x = state.player.body.pos.x;
    spawn_stationary_hazard(state, player_x);

    let counts = state.difficulty.hazard_counts();
    spawn_falling_wave(state, counts.falling_wave_size);

    state.spawn_powerup();

    log::info!(
        "Wave {} cleared (score {}, {} bombs on field)",
        state.wave,
        state.score,
        state.hazard_count(HazardKind::Bomb)
    );
    state.push_event(GameEvent::WaveCleared { wave: state.wave });
}

/// Pick up the power-up at `index` and refill the double-jump timer
pub fn collect_powerup(state: &mut GameState, index: usize) {
    let Some(powerup) = state.powerups.get_mut(index) else {
        return;
    };
    if !powerup.is_active() {
        return;
    }
    powerup.body.disable();
    state.player.ability.activate();
    state.push_event(GameEvent::PowerUpCollected);
}

/// Playing → GameOver. Contacts after the first have no effect.
pub fn hit_hazard(state: &mut GameState, kind: HazardKind) {
    if state.is_game_over() {
        return;
    }

    state.world.pause();

    let player = &mut state.player;
    player.tinted = true;
    player.animation = Animation::Turn;
    player.body.vel = Vec2::ZERO;
    player.stop_walking(&mut state.events);

    state.push_event(GameEvent::PlaySound(SoundCue::Hit));
    state.phase = GamePhase::GameOver;
    state.push_event(GameEvent::GameOver { score: state.score });

    log::info!(
        "Game over: hit by {:?} with score {} on wave {}",
        kind,
        state.score,
        state.wave
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::difficulty::Difficulty;
    use crate::sim::physics::Body;
    use crate::sim::state::Hazard;
    use crate::sim::timers::DeferredAction;
    use crate::tuning::Tuning;

    fn state_with_stars(difficulty: Difficulty) -> GameState {
        let mut s = GameState::new(difficulty, Tuning::default(), 1234, 1);
        s.spawn_stars();
        s
    }

    #[test]
    fn test_collect_scores_ten() {
        let mut s = state_with_stars(Difficulty::Easy);
        collect_star(&mut s, 0);
        assert_eq!(s.score, 10);
        assert!(!s.stars[0].is_active());
        assert!(s.events.contains(&GameEvent::PlaySound(SoundCue::Collect)));

        // Collecting an already collected star changes nothing
        collect_star(&mut s, 0);
        assert_eq!(s.score, 10);
    }

    #[test]
    fn test_wave_clear_refills_hazards() {
        for difficulty in Difficulty::ALL {
            let mut s = state_with_stars(difficulty);
            for i in 0..STAR_COUNT - 1 {
                collect_star(&mut s, i);
            }
            assert_eq!(s.wave, 0);
            assert!(s.hazards.is_empty());

            collect_star(&mut s, STAR_COUNT - 1);
            assert_eq!(s.score, 10 * STAR_COUNT as u32);
            assert_eq!(s.wave, 1);
            assert_eq!(s.hazard_count(HazardKind::Bomb), 1);
            assert_eq!(s.powerups.len(), 1);
            let scheduled = s
                .scheduler
                .pending()
                .iter()
                .filter(|t| t.action == DeferredAction::SpawnFallingHazard)
                .count();
            assert_eq!(scheduled as u32, difficulty.hazard_counts().falling_wave_size);
            assert_eq!(s.active_star_count(), STAR_COUNT);
            assert_eq!(
                s.events
                    .iter()
                    .filter(|e| matches!(e, GameEvent::WaveCleared { .. }))
                    .count(),
                1
            );
        }
    }

    #[test]
    fn test_wave_clear_bomb_avoids_player() {
        let mut s = state_with_stars(Difficulty::Hard);
        s.player.body.pos.x = 700.0;
        for i in 0..STAR_COUNT {
            collect_star(&mut s, i);
        }
        let bomb = s.hazards.iter().find(|h| h.kind == HazardKind::Bomb).unwrap();
        assert!(bomb.body.pos.x <= WORLD_MID_X);
    }

    #[test]
    fn test_powerup_activates_ability() {
        let mut s = state_with_stars(Difficulty::Easy);
        s.spawn_powerup();
        collect_powerup(&mut s, 0);
        assert!(s.player.can_double_jump());
        assert_eq!(s.player.ability.fraction(), 1.0);
        assert!(!s.powerups[0].is_active());
    }

    #[test]
    fn test_hit_is_terminal_and_idempotent() {
        let mut s = state_with_stars(Difficulty::Easy);
        s.player.body.vel = Vec2::new(160.0, -330.0);
        s.player.walking = true;

        hit_hazard(&mut s, HazardKind::Meteor);
        assert_eq!(s.phase, GamePhase::GameOver);
        assert_eq!(s.player.body.vel, Vec2::ZERO);
        assert!(s.player.tinted);
        assert!(!s.player.walking);
        assert!(s.world.paused);
        let events_after_first = s.events.clone();
        assert!(events_after_first.contains(&GameEvent::StopSound(SoundCue::Walk)));
        assert!(events_after_first.contains(&GameEvent::PlaySound(SoundCue::Hit)));

        hit_hazard(&mut s, HazardKind::Bomb);
        assert_eq!(s.phase, GamePhase::GameOver);
        assert_eq!(s.events, events_after_first);
    }

    #[test]
    fn test_resolve_contacts_hits_overlapping_bomb() {
        let mut s = state_with_stars(Difficulty::Easy);
        let id = s.next_entity_id();
        s.hazards.push(Hazard {
            id,
            kind: HazardKind::Bomb,
            body: Body::new(s.player.body.pos, Vec2::splat(14.0)),
        });
        resolve_contacts(&mut s);
        assert!(s.is_game_over());
    }

    #[test]
    fn test_resolve_contacts_collects_overlapping_star() {
        let mut s = state_with_stars(Difficulty::Easy);
        s.stars[3].body.pos = s.player.body.pos;
        resolve_contacts(&mut s);
        assert_eq!(s.score, 10);
        assert!(!s.stars[3].is_active());
    }
}
