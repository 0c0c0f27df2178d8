//! # AsteraX Engine
//!
//! Headless host layer for the AsteraX arcade game.
//!
//! ## Features
//!
//! - **Frame Loop**: `Engine` drives an `Application` through `initialize` / `update`
//! - **Injectable Time**: `Timer` reads a `Clock`, so tests run on a `ManualClock`
//! - **Delayed Tasks**: cancelable `Scheduler` for delay-then-resume flows
//! - **Configuration**: TOML and RON config files through the `Config` trait
//!
//! Rendering, real physics and device input stay with whatever host embeds the
//! game. This crate only carries the contracts the game needs from that host.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use asterax_engine::prelude::*;
//!
//! struct MyApp;
//!
//! impl Application for MyApp {
//!     fn initialize(&mut self, _engine: &mut Engine) -> Result<(), AppError> {
//!         Ok(())
//!     }
//!
//!     fn update(&mut self, _engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
//!         Ok(())
//!     }
//!
//!     fn cleanup(&mut self, _engine: &mut Engine) {}
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EngineConfig::default().with_max_frames(600);
//!     let mut app = MyApp;
//!     Engine::run(config, &mut app)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod camera;
pub mod input;
pub mod physics;
pub mod scheduler;

mod application;
mod engine;

pub use application::{Application, AppError};
pub use config::{Config, ConfigError};
pub use engine::{Engine, EngineConfig, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Application, AppError,
        Engine, EngineConfig, EngineError,
        Config, ConfigError,
        camera::Camera2d,
        foundation::{
            math::{Vec2, Vec3},
            time::{Clock, ManualClock, SystemClock, Timer},
        },
        input::{Axis, Button, InputManager},
        physics::{BoundingSphere, PlayArea},
        scheduler::{Scheduler, TaskId},
    };
}
