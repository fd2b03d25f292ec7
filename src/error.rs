//! Configuration errors
//!
//! The simulation has no recoverable runtime faults; everything here is
//! raised once, while a match is being set up.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("objective rotation needs at least 2 pillars, got {0}")]
    TooFewPillars(usize),

    #[error("match duration must be at least one second")]
    ZeroDuration,

    #[error("contact damage must be positive, got {0}")]
    InvalidContactDamage(i32),

    #[error("contact re-hit window must be a non-negative number of seconds, got {0}")]
    InvalidRehitWindow(f32),

    #[error("unknown warrior id: {0}")]
    UnknownWarrior(String),

    #[error("settings json: {0}")]
    Json(#[from] serde_json::Error),
}
