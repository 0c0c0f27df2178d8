//! Stand-in kinematics for headless hosts
//!
//! A real host integrates bodies and reports contacts itself. These helpers
//! let the headless runner do the same with plain Euler steps, screen
//! wrap-around and sphere overlap tests.

use serde::{Deserialize, Serialize};

use crate::foundation::math::{Vec2, Vec3};

/// Axis-aligned rectangle on the z = 0 play plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayArea {
    /// Lower-left corner
    pub min: Vec2,
    /// Upper-right corner
    pub max: Vec2,
}

impl PlayArea {
    /// Create an area from its corners
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Area centered on the origin with the given half extents
    pub fn centered(half_width: f32, half_height: f32) -> Self {
        Self {
            min: Vec2::new(-half_width, -half_height),
            max: Vec2::new(half_width, half_height),
        }
    }

    /// Horizontal extent
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Vertical extent
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Center point
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Same center, each extent multiplied by `fraction`
    pub fn scaled(&self, fraction: f32) -> Self {
        let center = self.center();
        let half = (self.max - self.min) * (0.5 * fraction);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Whether min <= max on both axes
    pub fn is_well_formed(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y
    }

    /// Whether `point` lies inside (edges included); Z is ignored
    pub fn contains(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Point at fractional coordinates `(u, v)`, each in 0.0..=1.0
    pub fn point_at(&self, u: f32, v: f32) -> Vec3 {
        Vec3::new(
            self.min.x + u * self.width(),
            self.min.y + v * self.height(),
            0.0,
        )
    }

    /// Wrap a point that left the area back in through the opposite edge
    pub fn wrap(&self, point: Vec3) -> Vec3 {
        Vec3::new(
            wrap_axis(point.x, self.min.x, self.max.x),
            wrap_axis(point.y, self.min.y, self.max.y),
            point.z,
        )
    }
}

impl Default for PlayArea {
    fn default() -> Self {
        Self::centered(14.0, 8.0)
    }
}

fn wrap_axis(value: f32, min: f32, max: f32) -> f32 {
    let span = max - min;
    if span <= 0.0 {
        return min;
    }
    if value < min || value > max {
        min + (value - min).rem_euclid(span)
    } else {
        value
    }
}

/// A bounding sphere for collision detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// The center position of the sphere in world space
    pub center: Vec3,
    /// The radius of the sphere
    pub radius: f32,
}

impl BoundingSphere {
    /// Creates a new bounding sphere with the given center and radius
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Check if this sphere intersects with another
    pub fn intersects(&self, other: &Self) -> bool {
        let distance_squared = (self.center - other.center).magnitude_squared();
        let radius_sum = self.radius + other.radius;
        distance_squared <= radius_sum * radius_sum
    }
}

/// One explicit Euler step
pub fn integrate(position: Vec3, velocity: Vec3, delta_time: f32) -> Vec3 {
    position + velocity * delta_time
}
