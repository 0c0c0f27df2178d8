//! Game configuration

use asterax_engine::physics::PlayArea;
use asterax_engine::Config;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::GameError;

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GameConfig {
    /// Gameplay settings
    pub gameplay: GameplayConfig,

    /// Respawn point search settings
    pub respawn: RespawnConfig,

    /// Asteroid spawning and splitting
    pub asteroids: AsteroidsConfig,

    /// Play area
    pub bounds: PlayArea,
}

/// Gameplay configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    /// Starting number of jumps
    pub max_jumps: u32,

    /// Parent asteroids spawned at level start
    pub initial_asteroid_count: u32,

    /// Closest an initial asteroid may spawn to the ship
    pub min_asteroid_distance_from_ship: f32,

    /// Seconds between losing a jump and reappearing
    pub respawn_delay: f32,

    /// Seconds between game over and the scene reload
    pub game_over_reload_delay: f32,

    /// Ship speed at full axis deflection
    pub ship_speed: f32,

    /// Ship collision radius
    pub ship_radius: f32,

    /// Bullet speed
    pub bullet_speed: f32,

    /// Bullet lifetime (seconds)
    pub bullet_lifetime: f32,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            max_jumps: 3,
            initial_asteroid_count: 3,
            min_asteroid_distance_from_ship: 5.0,
            respawn_delay: 2.0,
            game_over_reload_delay: 4.0,
            ship_speed: 10.0,
            ship_radius: 0.5,
            bullet_speed: 20.0,
            bullet_lifetime: 2.0,
        }
    }
}

/// Respawn point search tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RespawnConfig {
    /// Candidates tried before giving up and keeping the last one
    pub max_attempts: u32,

    /// Fraction of the play area candidates are drawn from
    pub spawn_area_fraction: f32,

    /// Separation below which a pass counts as a hit
    pub min_separation: f32,

    /// How far ahead (seconds) an approach counts as a threat
    pub prediction_horizon: f32,
}

impl Default for RespawnConfig {
    fn default() -> Self {
        Self {
            max_attempts: 20,
            spawn_area_fraction: 0.8,
            min_separation: 0.3,
            prediction_horizon: 3.0,
        }
    }
}

/// Asteroid spawning and splitting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsteroidsConfig {
    /// Size of parent asteroids spawned at level start
    pub initial_size: u32,

    /// Smaller asteroids attached to each asteroid above size 1
    pub children_per_split: u32,

    /// Slowest launch speed
    pub min_velocity: f32,

    /// Fastest launch speed
    pub max_velocity: f32,

    /// World radius per unit of size
    pub radius_per_size: f32,

    /// Points awarded, indexed by asteroid size
    pub points_for_size: Vec<u32>,
}

impl Default for AsteroidsConfig {
    fn default() -> Self {
        Self {
            initial_size: 3,
            children_per_split: 2,
            min_velocity: 0.5,
            max_velocity: 2.0,
            radius_per_size: 0.375,
            points_for_size: vec![0, 400, 200, 100],
        }
    }
}

impl AsteroidsConfig {
    /// Points for destroying an asteroid of `size`; 0 for sizes outside the table
    pub fn points_for(&self, size: u32) -> u32 {
        self.points_for_size
            .get(size as usize)
            .copied()
            .unwrap_or(0)
    }
}

impl Config for GameConfig {}

impl GameConfig {
    /// Load configuration from `path`, or defaults if it does not exist
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let config = <Self as Config>::load_or_default(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), GameError> {
        let gameplay = &self.gameplay;
        if gameplay.ship_speed <= 0.0 {
            return Err(GameError::InvalidConfig("ship_speed must be positive".to_string()));
        }
        if gameplay.respawn_delay < 0.0 || gameplay.game_over_reload_delay < 0.0 {
            return Err(GameError::InvalidConfig("delays must not be negative".to_string()));
        }
        if gameplay.bullet_lifetime <= 0.0 {
            return Err(GameError::InvalidConfig("bullet_lifetime must be positive".to_string()));
        }

        let respawn = &self.respawn;
        if respawn.max_attempts == 0 {
            return Err(GameError::InvalidConfig(
                "respawn.max_attempts must be at least 1".to_string(),
            ));
        }
        if !(respawn.spawn_area_fraction > 0.0 && respawn.spawn_area_fraction <= 1.0) {
            return Err(GameError::InvalidConfig(
                "respawn.spawn_area_fraction must be in (0, 1]".to_string(),
            ));
        }

        let asteroids = &self.asteroids;
        if asteroids.initial_size == 0 {
            return Err(GameError::InvalidConfig(
                "asteroids.initial_size must be at least 1".to_string(),
            ));
        }
        if asteroids.points_for_size.len() <= asteroids.initial_size as usize {
            return Err(GameError::InvalidConfig(format!(
                "asteroids.points_for_size needs an entry for every size up to {}",
                asteroids.initial_size
            )));
        }
        if asteroids.min_velocity < 0.0 || asteroids.min_velocity > asteroids.max_velocity {
            return Err(GameError::InvalidConfig(
                "asteroids velocity range must satisfy 0 <= min <= max".to_string(),
            ));
        }

        if !self.bounds.is_well_formed() {
            return Err(GameError::InvalidConfig("bounds min must not exceed max".to_string()));
        }

        Ok(())
    }
}
