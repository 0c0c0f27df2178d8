//! Input management system
//!
//! The host polls its devices and writes the results here once per frame.
//! The game only ever reads this snapshot.

use crate::foundation::math::Vec2;

/// Virtual input axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Left/right, -1.0 to 1.0
    Horizontal,
    /// Down/up, -1.0 to 1.0
    Vertical,
}

/// Virtual input buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// Primary fire
    Fire1,
}

/// Input manager
#[derive(Debug, Default)]
pub struct InputManager {
    horizontal: f32,
    vertical: f32,
    fire_held: bool,
    fire_pressed_this_frame: bool,
    cursor: Vec2,
}

impl InputManager {
    /// Create a new input manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear per-frame edges (call at the end of every frame)
    pub fn update(&mut self) {
        self.fire_pressed_this_frame = false;
    }

    /// Set an axis value, clamped to -1.0..=1.0
    pub fn set_axis(&mut self, axis: Axis, value: f32) {
        let value = value.clamp(-1.0, 1.0);
        match axis {
            Axis::Horizontal => self.horizontal = value,
            Axis::Vertical => self.vertical = value,
        }
    }

    /// Current axis value
    pub fn axis(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.horizontal,
            Axis::Vertical => self.vertical,
        }
    }

    /// Handle a button press or release
    pub fn handle_button(&mut self, button: Button, pressed: bool) {
        match button {
            Button::Fire1 => {
                if pressed && !self.fire_held {
                    self.fire_pressed_this_frame = true;
                }
                self.fire_held = pressed;
            }
        }
    }

    /// Whether the button went down during this frame
    pub fn button_down(&self, button: Button) -> bool {
        match button {
            Button::Fire1 => self.fire_pressed_this_frame,
        }
    }

    /// Handle cursor movement, in screen pixels
    pub fn handle_cursor_move(&mut self, x: f32, y: f32) {
        self.cursor = Vec2::new(x, y);
    }

    /// Cursor position in screen pixels
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }
}
