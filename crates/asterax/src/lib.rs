//! # AsteraX
//!
//! Game logic for a top-down asteroid shooter: the respawn point predictor,
//! the game state controller (score, asteroid registry, game over and scene
//! reload) and the player's jump counter.
//!
//! Everything lives in one [`AsteraX`] session. Hosts plug in their UI
//! through [`Hud`] and [`SceneLoader`], report contacts as
//! [`CollisionEvent`]s and drive the session each frame, either directly with
//! [`AsteraX::tick`] or by handing it to [`asterax_engine::Engine`].
//!
//! ```rust,no_run
//! use asterax::{AsteraX, GameConfig};
//! use asterax_engine::{Engine, EngineConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GameConfig::load_or_default("asterax.toml")?;
//!     let mut game = AsteraX::new(config)?;
//!     Engine::run(EngineConfig::default().with_max_frames(600), &mut game)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

pub mod asteroids;
pub mod components;
pub mod config;
pub mod controller;
pub mod error;
pub mod game;
pub mod game_state;
pub mod hud;
pub mod player;
pub mod respawn;

pub use config::GameConfig;
pub use error::GameError;
pub use game::{AsteraX, CollisionEvent, GameTask, JumpOutcome, SessionStats};
pub use game_state::{GameState, GameStateMask};
pub use hud::{Hud, SceneLoader};
pub use respawn::RespawnSearch;
