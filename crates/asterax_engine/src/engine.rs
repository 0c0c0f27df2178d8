//! Core engine implementation

use crate::{
    application::Application,
    foundation::time::{Clock, Timer},
    input::InputManager,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main engine struct
///
/// The engine owns the frame timer and input snapshot and runs the main loop.
pub struct Engine {
    /// Input snapshot for the current frame
    pub input: InputManager,

    /// Frame timing
    timer: Timer,

    /// Engine configuration
    config: EngineConfig,

    /// Whether the engine should continue running
    running: bool,
}

impl Engine {
    /// Create a new engine instance on the wall clock
    pub fn new(config: EngineConfig) -> Self {
        Self::with_timer(config, Timer::new())
    }

    /// Create a new engine instance reading time from `clock`
    pub fn with_clock(config: EngineConfig, clock: Box<dyn Clock>) -> Self {
        Self::with_timer(config, Timer::with_clock(clock))
    }

    fn with_timer(config: EngineConfig, timer: Timer) -> Self {
        log::info!("Initializing engine...");
        Self {
            input: InputManager::new(),
            timer,
            config,
            running: true,
        }
    }

    /// Run the engine main loop with the given application
    pub fn run<T: Application>(config: EngineConfig, app: &mut T) -> Result<(), EngineError> {
        let mut engine = Self::new(config);
        engine.run_app(app)
    }

    /// Run the main loop on an existing engine
    pub fn run_app<T: Application>(&mut self, app: &mut T) -> Result<(), EngineError> {
        app.initialize(self)
            .map_err(|e| EngineError::ApplicationError(format!("App initialization: {e}")))?;

        log::info!("Starting main loop...");

        while self.running {
            self.step(app)?;
            if let Some(max_frames) = self.config.max_frames {
                if self.timer.frame_count() >= max_frames {
                    log::info!("Reached frame limit of {max_frames}");
                    self.running = false;
                }
            }
        }

        app.cleanup(self);

        log::info!("Engine shutdown complete");
        Ok(())
    }

    /// Advance one frame: tick the timer, update the application, clear input edges
    pub fn step<T: Application>(&mut self, app: &mut T) -> Result<(), EngineError> {
        self.timer.update();
        let delta_time = self.config.fixed_timestep.unwrap_or_else(|| self.timer.delta_time());

        app.update(self, delta_time)
            .map_err(|e| EngineError::ApplicationError(format!("App update: {e}")))?;

        self.input.update();
        Ok(())
    }

    /// Ask the main loop to stop after the current frame
    pub fn request_exit(&mut self) {
        self.running = false;
    }

    /// Whether the main loop is still running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames processed so far
    pub fn frame_count(&self) -> u64 {
        self.timer.frame_count()
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Log level used when `RUST_LOG` is unset
    pub log_level: String,
    /// Fixed delta time per frame; `None` uses the measured frame time
    pub fixed_timestep: Option<f32>,
    /// Stop after this many frames; `None` runs until exit is requested
    pub max_frames: Option<u64>,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            fixed_timestep: None,
            max_frames: None,
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Use a fixed timestep
    pub fn with_fixed_timestep(mut self, seconds: f32) -> Self {
        self.fixed_timestep = Some(seconds);
        self
    }

    /// Stop after a number of frames
    pub fn with_max_frames(mut self, frames: u64) -> Self {
        self.max_frames = Some(frames);
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Application error
    #[error("Application error: {0}")]
    ApplicationError(String),
}
