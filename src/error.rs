//! Error types
//!
//! Gameplay itself never fails. Errors only surface at the boundaries where
//! outside data enters the game: scene payloads and tuning files.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A difficulty label that is not one of `easy`, `medium`, `hard`
    #[error("unknown difficulty {0:?} (expected easy, medium or hard)")]
    UnknownDifficulty(String),

    #[error("invalid tuning: {0}")]
    InvalidTuning(String),

    #[error("failed to parse tuning JSON: {0}")]
    TuningJson(#[from] serde_json::Error),
}
