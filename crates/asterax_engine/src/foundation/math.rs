//! Math utilities and types
//!
//! Thin aliases over nalgebra for the play plane and 3D positions.

pub use nalgebra::{Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Squared magnitudes below this are treated as zero
pub const EPSILON_SQUARED: f32 = 1.0e-8;

/// Math utility functions
pub mod utils {
    use super::{Vec3, EPSILON_SQUARED};

    /// Normalize `v`, or `None` if it has no usable direction
    pub fn try_direction(v: Vec3) -> Option<Vec3> {
        if v.magnitude_squared() < EPSILON_SQUARED {
            None
        } else {
            Some(v.normalize())
        }
    }

    /// Shrink a vector to unit length only when it is longer than one
    pub fn clamp_length_to_unit(v: Vec3) -> Vec3 {
        if v.magnitude_squared() > 1.0 {
            v.normalize()
        } else {
            v
        }
    }
}
