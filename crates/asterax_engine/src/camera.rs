//! Orthographic 2D camera
//!
//! Maps between screen pixels and the world-space play plane. Screen origin
//! is the top-left corner with Y growing downward; world Y grows upward.

use crate::foundation::math::{Vec2, Vec3};
use crate::physics::PlayArea;

/// Camera looking straight down the Z axis at the play plane
#[derive(Debug, Clone, PartialEq)]
pub struct Camera2d {
    /// Viewport size in pixels
    pub viewport: Vec2,
    /// World-space area visible through the viewport
    pub view: PlayArea,
}

impl Camera2d {
    /// Create a camera showing `view` through a viewport of the given size
    pub fn new(viewport_width: f32, viewport_height: f32, view: PlayArea) -> Self {
        Self {
            viewport: Vec2::new(viewport_width, viewport_height),
            view,
        }
    }

    /// Convert a screen position to a world point on the plane `z = depth`
    pub fn screen_to_world(&self, screen: Vec2, depth: f32) -> Vec3 {
        let u = if self.viewport.x > 0.0 { screen.x / self.viewport.x } else { 0.5 };
        let v = if self.viewport.y > 0.0 { screen.y / self.viewport.y } else { 0.5 };

        Vec3::new(
            self.view.min.x + u * self.view.width(),
            self.view.max.y - v * self.view.height(),
            depth,
        )
    }

    /// Convert a world point to screen pixels (Z is ignored)
    pub fn world_to_screen(&self, world: Vec3) -> Vec2 {
        let width = self.view.width();
        let height = self.view.height();
        let u = if width > 0.0 { (world.x - self.view.min.x) / width } else { 0.5 };
        let v = if height > 0.0 { (self.view.max.y - world.y) / height } else { 0.5 };
        Vec2::new(u * self.viewport.x, v * self.viewport.y)
    }
}

impl Default for Camera2d {
    fn default() -> Self {
        Self::new(1280.0, 720.0, PlayArea::default())
    }
}
