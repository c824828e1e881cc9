//! Difficulty levels and the hazard counts they imply

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Selected on the menu, carried into the game scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

/// How many hazards a difficulty throws at the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HazardCounts {
    /// Bouncing bombs placed when the scene is created
    pub initial_hazards: u32,
    /// Meteors per falling wave
    pub falling_wave_size: u32,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn hazard_counts(&self) -> HazardCounts {
        let (initial_hazards, falling_wave_size) = match self {
            Difficulty::Easy => (1, 2),
            Difficulty::Medium => (2, 3),
            Difficulty::Hard => (4, 5),
        };
        HazardCounts {
            initial_hazards,
            falling_wave_size,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    /// Exact labels only. Anything else is rejected rather than defaulted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(Error::UnknownDifficulty(other.to_string())),
        }
    }
}
