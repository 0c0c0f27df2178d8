//! Game errors

use asterax_engine::{AppError, ConfigError};
use thiserror::Error;

use crate::game_state::GameState;

/// Errors raised by the game layer
///
/// These are programming or setup mistakes. They are surfaced to the host,
/// never retried.
#[derive(Error, Debug)]
pub enum GameError {
    /// Session was initialized a second time
    #[error("Game session is already initialized")]
    AlreadyInitialized,

    /// Operation needs an initialized session
    #[error("Game session is not initialized")]
    NotInitialized,

    /// State machine transition not in the allowed table
    #[error("Invalid game state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        /// Current state
        from: GameState,
        /// Requested state
        to: GameState,
    },

    /// Configuration values out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Asteroid id does not refer to a live asteroid
    #[error("Unknown asteroid")]
    UnknownAsteroid,

    /// Configuration file could not be read or parsed
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl From<GameError> for AppError {
    fn from(err: GameError) -> Self {
        match err {
            GameError::Config(inner) => Self::Config(inner),
            other => Self::GameLogic(other.to_string()),
        }
    }
}
