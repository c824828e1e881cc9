//! Arcade physics
//!
//! Just enough rigid-body behaviour for the platformer: axis-aligned boxes,
//! gravity, velocity integration, bounce, static platforms and world-bounds
//! clamping. Bodies are positioned by their centre, y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Below this vertical speed a body that just bounced off a surface comes to rest
pub const RESTING_SPEED: f32 = 12.0;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    pub half: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half: size / 2.0,
        }
    }

    pub fn min(&self) -> Vec2 {
        self.center - self.half
    }

    pub fn max(&self) -> Vec2 {
        self.center + self.half
    }

    /// Strict overlap: boxes that merely share an edge do not overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let d = (self.center - other.center).abs();
        let reach = self.half + other.half;
        d.x < reach.x && d.y < reach.y
    }
}

/// A dynamic body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    /// Fraction of speed kept on impact, per axis
    pub bounce: Vec2,
    pub collide_world_bounds: bool,
    pub collide_platforms: bool,
    pub allow_gravity: bool,
    /// Disabled bodies neither move nor collide
    pub enabled: bool,
    /// Resting on something this step
    pub touching_down: bool,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            vel: Vec2::ZERO,
            bounce: Vec2::ZERO,
            collide_world_bounds: false,
            collide_platforms: false,
            allow_gravity: true,
            enabled: true,
            touching_down: false,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub fn overlaps(&self, other: &Body) -> bool {
        self.enabled && other.enabled && self.aabb().overlaps(&other.aabb())
    }

    /// Take the body out of the simulation
    pub fn disable(&mut self) {
        self.enabled = false;
        self.vel = Vec2::ZERO;
        self.touching_down = false;
    }

    /// Put the body back at `pos`, at rest
    pub fn enable_at(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
        self.enabled = true;
        self.touching_down = false;
    }
}

/// World bounds, gravity and the static level geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub width: f32,
    pub height: f32,
    pub gravity: f32,
    pub platforms: Vec<Aabb>,
    /// Frozen worlds do not step
    pub paused: bool,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// The level: a full-width ground slab and three ledges
    pub fn new() -> Self {
        let ledge = Vec2::new(400.0, 32.0);
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
            gravity: GRAVITY,
            platforms: vec![
                Aabb::new(Vec2::new(400.0, 568.0), ledge * 2.0),
                Aabb::new(Vec2::new(600.0, 400.0), ledge),
                Aabb::new(Vec2::new(50.0, 250.0), ledge),
                Aabb::new(Vec2::new(750.0, 220.0), ledge),
            ],
            paused: false,
        }
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Integrate one body over `dt` seconds and resolve its static contacts
    pub fn step(&self, body: &mut Body, dt: f32) {
        if self.paused || !body.enabled {
            return;
        }

        body.touching_down = false;
        if body.allow_gravity {
            body.vel.y += self.gravity * dt;
        }
        body.pos += body.vel * dt;

        if body.collide_platforms {
            for platform in &self.platforms {
                separate(body, platform);
            }
        }
        if body.collide_world_bounds {
            self.clamp_to_bounds(body);
        }
    }

    fn clamp_to_bounds(&self, body: &mut Body) {
        let half = body.size / 2.0;

        if body.pos.x - half.x < 0.0 {
            body.pos.x = half.x;
            body.vel.x = body.vel.x.abs() * body.bounce.x;
        } else if body.pos.x + half.x > self.width {
            body.pos.x = self.width - half.x;
            body.vel.x = -body.vel.x.abs() * body.bounce.x;
        }

        if body.pos.y - half.y < 0.0 {
            body.pos.y = half.y;
            body.vel.y = body.vel.y.abs() * body.bounce.y;
        } else if body.pos.y + half.y > self.height {
            body.pos.y = self.height - half.y;
            body.vel.y = -body.vel.y.abs() * body.bounce.y;
            settle(body);
            body.touching_down = true;
        }
    }
}

/// Push `body` out of `platform` along the axis of least penetration
fn separate(body: &mut Body, platform: &Aabb) {
    let aabb = body.aabb();
    if !aabb.overlaps(platform) {
        return;
    }

    let delta = body.pos - platform.center;
    let reach = aabb.half + platform.half;
    let pen_x = reach.x - delta.x.abs();
    let pen_y = reach.y - delta.y.abs();

    if pen_y <= pen_x {
        if delta.y < 0.0 {
            // Landed on top
            body.pos.y = platform.min().y - aabb.half.y;
            if body.vel.y > 0.0 {
                body.vel.y = -body.vel.y * body.bounce.y;
                settle(body);
            }
            body.touching_down = true;
        } else {
            // Bumped the underside
            body.pos.y = platform.max().y + aabb.half.y;
            if body.vel.y < 0.0 {
                body.vel.y = -body.vel.y * body.bounce.y;
            }
        }
    } else if delta.x < 0.0 {
        body.pos.x = platform.min().x - aabb.half.x;
        if body.vel.x > 0.0 {
            body.vel.x = -body.vel.x * body.bounce.x;
        }
    } else {
        body.pos.x = platform.max().x + aabb.half.x;
        if body.vel.x < 0.0 {
            body.vel.x = -body.vel.x * body.bounce.x;
        }
    }
}

fn settle(body: &mut Body) {
    if body.vel.y.abs() < RESTING_SPEED {
        body.vel.y = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn falling_box(x: f32, y: f32) -> Body {
        let mut body = Body::new(Vec2::new(x, y), Vec2::new(20.0, 20.0));
        body.collide_platforms = true;
        body.collide_world_bounds = true;
        body
    }

    #[test]
    fn test_gravity_integration() {
        let world = World::new();
        let mut body = Body::new(Vec2::new(100.0, 100.0), Vec2::new(10.0, 10.0));
        world.step(&mut body, 0.5);
        assert_eq!(body.vel.y, 150.0);
        assert_eq!(body.pos.y, 175.0);
    }

    #[test]
    fn test_lands_on_ground_and_rests() {
        let world = World::new();
        let mut body = falling_box(300.0, 400.0);
        for _ in 0..600 {
            world.step(&mut body, SIM_DT);
        }
        // Ground top is at 536
        assert_eq!(body.pos.y, 526.0);
        assert!(body.touching_down);
        assert_eq!(body.vel.y, 0.0);
    }

    #[test]
    fn test_full_bounce_keeps_speed() {
        let world = World::new();
        let mut body = falling_box(300.0, 530.0);
        body.bounce = Vec2::ONE;
        body.vel.y = 300.0;
        world.step(&mut body, SIM_DT);
        assert!(body.vel.y <= -300.0);
        assert!(body.touching_down);
    }

    #[test]
    fn test_world_bounds_reflect_horizontal() {
        let mut world = World::new();
        world.platforms.clear();
        let mut body = falling_box(5.0, 100.0);
        body.bounce = Vec2::ONE;
        body.vel.x = -200.0;
        world.step(&mut body, SIM_DT);
        assert_eq!(body.pos.x, 10.0);
        assert_eq!(body.vel.x, 200.0);
    }

    #[test]
    fn test_unclamped_body_leaves_world() {
        let mut world = World::new();
        world.platforms.clear();
        let mut body = Body::new(Vec2::new(100.0, 590.0), Vec2::new(10.0, 10.0));
        body.vel.y = 200.0;
        world.step(&mut body, 0.1);
        assert!(body.pos.y > WORLD_HEIGHT);
    }

    #[test]
    fn test_paused_world_freezes_bodies() {
        let mut world = World::new();
        world.pause();
        let mut body = falling_box(400.0, 100.0);
        body.vel = Vec2::new(50.0, 50.0);
        world.step(&mut body, 1.0);
        assert_eq!(body.pos, Vec2::new(400.0, 100.0));
        assert_eq!(body.vel, Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_disabled_body_does_not_overlap() {
        let a = Body::new(Vec2::ZERO, Vec2::splat(10.0));
        let mut b = Body::new(Vec2::new(5.0, 0.0), Vec2::splat(10.0));
        assert!(a.overlaps(&b));
        b.disable();
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Aabb::new(Vec2::ZERO, Vec2::splat(10.0));
        let b = Aabb::new(Vec2::new(10.0, 0.0), Vec2::splat(10.0));
        assert!(!a.overlaps(&b));
    }
}
