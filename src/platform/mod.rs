//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (key aliasing, edge detection)

pub mod input;

pub use input::{Direction, Keyboard};
