//! Game-specific components

use asterax_engine::foundation::math::Vec3;
use asterax_engine::physics::{self, BoundingSphere, PlayArea};
use slotmap::new_key_type;

new_key_type! {
    /// Handle to an asteroid in the field
    pub struct AsteroidId;
}

new_key_type! {
    /// Handle to a live bullet
    pub struct BulletId;
}

/// Asteroid component
#[derive(Debug, Clone, PartialEq)]
pub struct Asteroid {
    /// World position
    pub position: Vec3,

    /// Linear velocity. Attached children mirror their parent's.
    pub velocity: Vec3,

    /// Size category; 1 is the smallest and cannot split further
    pub size: u32,

    /// Asteroid this one is attached to, if it is a fragment
    pub parent: Option<AsteroidId>,

    /// Offset from the parent while attached
    pub offset: Vec3,

    /// Attached fragments
    pub children: Vec<AsteroidId>,
}

impl Asteroid {
    /// Free-floating asteroid with no fragments attached yet
    pub fn new(position: Vec3, velocity: Vec3, size: u32) -> Self {
        Self {
            position,
            velocity,
            size,
            parent: None,
            offset: Vec3::zeros(),
            children: Vec::new(),
        }
    }

    /// Whether this asteroid is not attached to another
    pub fn is_top_level(&self) -> bool {
        self.parent.is_none()
    }

    /// Collision sphere for a given radius-per-size scale
    #[allow(clippy::cast_precision_loss)]
    pub fn bounds(&self, radius_per_size: f32) -> BoundingSphere {
        BoundingSphere::new(self.position, self.size as f32 * radius_per_size)
    }
}

/// Position and velocity snapshot handed to the respawn predictor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AsteroidMotion {
    /// World position
    pub position: Vec3,
    /// Linear velocity
    pub velocity: Vec3,
}

impl AsteroidMotion {
    /// Create a snapshot
    pub fn new(position: Vec3, velocity: Vec3) -> Self {
        Self { position, velocity }
    }
}

/// Bullet projectile component
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    /// World position
    pub position: Vec3,

    /// Linear velocity
    pub velocity: Vec3,

    /// Remaining lifetime in seconds
    pub lifetime: f32,
}

impl Bullet {
    /// Advance one step; returns `false` once the bullet has expired
    pub fn advance(&mut self, delta_time: f32, bounds: &PlayArea) -> bool {
        self.lifetime -= delta_time;
        self.position = bounds.wrap(physics::integrate(self.position, self.velocity, delta_time));
        self.lifetime > 0.0
    }
}

/// Screen wrap-around toggle
///
/// Disabled while the ship is parked off screen, so it is not wrapped back
/// into the play area before the respawn completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrapAround {
    /// Whether wrapping is applied
    pub enabled: bool,
}

impl WrapAround {
    /// Apply the wrap if enabled
    pub fn apply(self, position: Vec3, bounds: &PlayArea) -> Vec3 {
        if self.enabled {
            bounds.wrap(position)
        } else {
            position
        }
    }
}

impl Default for WrapAround {
    fn default() -> Self {
        Self { enabled: true }
    }
}
