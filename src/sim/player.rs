//! The player and its per-frame controller

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ability::AbilityTimer;
use super::physics::Body;
use super::state::{GameEvent, SoundCue};
use super::tick::TickInput;
use crate::consts::*;
use crate::tuning::Tuning;

/// Sprite animation the host should show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Animation {
    Left,
    /// Facing the camera, standing still
    #[default]
    Turn,
    Right,
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    /// Double-jump power-up countdown
    pub ability: AbilityTimer,
    /// Already used the double jump during this airtime
    pub has_double_jumped: bool,
    pub animation: Animation,
    /// Red defeat tint
    pub tinted: bool,
    /// Walk loop is currently playing
    pub walking: bool,
}

impl Player {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        let mut body = Body::new(pos, Vec2::new(PLAYER_SIZE.0, PLAYER_SIZE.1));
        body.bounce = Vec2::splat(PLAYER_BOUNCE);
        body.collide_world_bounds = true;
        body.collide_platforms = true;
        Self {
            body,
            ability: AbilityTimer::new(tuning.double_jump_ms),
            has_double_jumped: false,
            animation: Animation::Turn,
            tinted: false,
            walking: false,
        }
    }

    pub fn can_double_jump(&self) -> bool {
        self.ability.is_active()
    }

    pub fn is_grounded(&self) -> bool {
        self.body.touching_down
    }

    /// Turn one frame of input into movement, jumps and sound cues
    pub fn control(
        &mut self,
        input: &TickInput,
        grounded: bool,
        tuning: &Tuning,
        events: &mut Vec<GameEvent>,
    ) {
        if input.left {
            self.body.vel.x = -tuning.run_speed;
            self.animation = Animation::Left;
            self.start_walking(events);
        } else if input.right {
            self.body.vel.x = tuning.run_speed;
            self.animation = Animation::Right;
            self.start_walking(events);
        } else {
            self.body.vel.x = 0.0;
            self.animation = Animation::Turn;
            self.stop_walking(events);
        }

        if input.up && grounded {
            self.jump(tuning, events);
            self.has_double_jumped = false;
        } else if input.up_pressed
            && self.can_double_jump()
            && !grounded
            && !self.has_double_jumped
        {
            self.jump(tuning, events);
            self.has_double_jumped = true;
        }
    }

    fn jump(&mut self, tuning: &Tuning, events: &mut Vec<GameEvent>) {
        self.body.vel.y = -tuning.jump_impulse;
        events.push(GameEvent::PlaySound(SoundCue::Jump));
        self.stop_walking(events);
    }

    /// Start the footstep loop unless it is already running
    pub fn start_walking(&mut self, events: &mut Vec<GameEvent>) {
        if !self.walking {
            events.push(GameEvent::LoopSound(SoundCue::Walk));
            self.walking = true;
        }
    }

    /// Stop the footstep loop if it is running
    pub fn stop_walking(&mut self, events: &mut Vec<GameEvent>) {
        if self.walking {
            events.push(GameEvent::StopSound(SoundCue::Walk));
            self.walking = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::new(Vec2::new(100.0, 450.0), &Tuning::default())
    }

    fn up_held() -> TickInput {
        TickInput {
            up: true,
            ..Default::default()
        }
    }

    fn up_pressed() -> TickInput {
        TickInput {
            up: true,
            up_pressed: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_grounded_jump_resets_double_jump() {
        let tuning = Tuning::default();
        let mut p = player();
        p.has_double_jumped = true;
        let mut events = Vec::new();
        p.control(&up_held(), true, &tuning, &mut events);
        assert_eq!(p.body.vel.y, -330.0);
        assert!(!p.has_double_jumped);
        assert!(events.contains(&GameEvent::PlaySound(SoundCue::Jump)));
    }

    #[test]
    fn test_held_up_in_air_does_nothing_without_power_up() {
        let tuning = Tuning::default();
        let mut p = player();
        p.body.vel.y = 50.0;
        let mut events = Vec::new();
        p.control(&up_pressed(), false, &tuning, &mut events);
        assert_eq!(p.body.vel.y, 50.0);
        assert!(events.is_empty());
    }

    #[test]
    fn test_single_double_jump_per_airtime() {
        let tuning = Tuning::default();
        let mut p = player();
        p.ability.activate();
        let mut events = Vec::new();

        p.body.vel.y = 40.0;
        p.control(&up_pressed(), false, &tuning, &mut events);
        assert_eq!(p.body.vel.y, -330.0);
        assert!(p.has_double_jumped);

        // No triple jump
        p.body.vel.y = 40.0;
        p.control(&up_pressed(), false, &tuning, &mut events);
        assert_eq!(p.body.vel.y, 40.0);
    }

    #[test]
    fn test_double_jump_needs_fresh_press() {
        let tuning = Tuning::default();
        let mut p = player();
        p.ability.activate();
        p.body.vel.y = 40.0;
        let mut events = Vec::new();
        p.control(&up_held(), false, &tuning, &mut events);
        assert_eq!(p.body.vel.y, 40.0);
        assert!(!p.has_double_jumped);
    }

    #[test]
    fn test_grounded_jump_wins_over_double_jump() {
        let tuning = Tuning::default();
        let mut p = player();
        p.ability.activate();
        let mut events = Vec::new();
        p.control(&up_pressed(), true, &tuning, &mut events);
        assert_eq!(p.body.vel.y, -330.0);
        assert!(!p.has_double_jumped);
    }

    #[test]
    fn test_left_wins_when_both_held() {
        let tuning = Tuning::default();
        let mut p = player();
        let input = TickInput {
            left: true,
            right: true,
            ..Default::default()
        };
        let mut events = Vec::new();
        p.control(&input, true, &tuning, &mut events);
        assert_eq!(p.body.vel.x, -160.0);
        assert_eq!(p.animation, Animation::Left);
    }

    #[test]
    fn test_walk_loop_is_debounced() {
        let tuning = Tuning::default();
        let mut p = player();
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        let mut events = Vec::new();
        for _ in 0..10 {
            p.control(&right, true, &tuning, &mut events);
        }
        assert_eq!(events, vec![GameEvent::LoopSound(SoundCue::Walk)]);
        assert_eq!(p.body.vel.x, 160.0);

        events.clear();
        for _ in 0..10 {
            p.control(&TickInput::default(), true, &tuning, &mut events);
        }
        assert_eq!(events, vec![GameEvent::StopSound(SoundCue::Walk)]);
        assert_eq!(p.body.vel.x, 0.0);
        assert_eq!(p.animation, Animation::Turn);
    }

    #[test]
    fn test_jump_stops_walk_loop() {
        let tuning = Tuning::default();
        let mut p = player();
        let input = TickInput {
            right: true,
            up: true,
            ..Default::default()
        };
        let mut events = Vec::new();
        p.control(&input, true, &tuning, &mut events);
        assert_eq!(
            events,
            vec![
                GameEvent::LoopSound(SoundCue::Walk),
                GameEvent::PlaySound(SoundCue::Jump),
                GameEvent::StopSound(SoundCue::Walk),
            ]
        );
        assert!(!p.walking);
    }
}
