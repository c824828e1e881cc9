//! Keyboard state
//!
//! Browsers deliver keydown/keyup events; the simulation wants a per-tick
//! snapshot with "held" and "just pressed" queries. Arrow keys and WASD are
//! aliases for the same four directions.

use crate::sim::TickInput;

/// Logical direction keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Left,
    Down,
    Right,
}

impl Direction {
    const COUNT: usize = 4;

    fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Left => 1,
            Direction::Down => 2,
            Direction::Right => 3,
        }
    }

    /// Map a `KeyboardEvent.key` value onto a direction
    pub fn from_key(key: &str) -> Option<(Self, PhysicalKey)> {
        let mapped = match key {
            "ArrowUp" => (Direction::Up, PhysicalKey::Arrow),
            "ArrowLeft" => (Direction::Left, PhysicalKey::Arrow),
            "ArrowDown" => (Direction::Down, PhysicalKey::Arrow),
            "ArrowRight" => (Direction::Right, PhysicalKey::Arrow),
            "w" | "W" => (Direction::Up, PhysicalKey::Letter),
            "a" | "A" => (Direction::Left, PhysicalKey::Letter),
            "s" | "S" => (Direction::Down, PhysicalKey::Letter),
            "d" | "D" => (Direction::Right, PhysicalKey::Letter),
            _ => return None,
        };
        Some(mapped)
    }
}

/// Which of the two aliased keys produced an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhysicalKey {
    Arrow,
    Letter,
}

impl PhysicalKey {
    fn index(self) -> usize {
        match self {
            PhysicalKey::Arrow => 0,
            PhysicalKey::Letter => 1,
        }
    }
}

/// Held state of all eight keys plus presses seen since the last snapshot
#[derive(Debug, Clone, Default)]
pub struct Keyboard {
    held: [[bool; 2]; Direction::COUNT],
    pressed: [bool; Direction::COUNT],
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a keydown. Auto-repeat events do not count as fresh presses.
    /// Returns true when the key is one the game uses.
    pub fn key_down(&mut self, key: &str) -> bool {
        let Some((dir, physical)) = Direction::from_key(key) else {
            return false;
        };
        let slot = &mut self.held[dir.index()][physical.index()];
        if !*slot {
            *slot = true;
            self.pressed[dir.index()] = true;
        }
        true
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        let Some((dir, physical)) = Direction::from_key(key) else {
            return false;
        };
        self.held[dir.index()][physical.index()] = false;
        true
    }

    /// Either alias is down
    pub fn held(&self, dir: Direction) -> bool {
        self.held[dir.index()].iter().any(|&h| h)
    }

    /// Either alias went down since the last `clear_presses`
    pub fn just_pressed(&self, dir: Direction) -> bool {
        self.pressed[dir.index()]
    }

    /// Forget presses once a tick has consumed them
    pub fn clear_presses(&mut self) {
        self.pressed = [false; Direction::COUNT];
    }

    /// Release everything, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        self.held = [[false; 2]; Direction::COUNT];
        self.pressed = [false; Direction::COUNT];
    }

    pub fn snapshot(&self) -> TickInput {
        TickInput {
            left: self.held(Direction::Left),
            right: self.held(Direction::Right),
            up: self.held(Direction::Up),
            up_pressed: self.just_pressed(Direction::Up),
            down: self.held(Direction::Down),
        }
    }
}
