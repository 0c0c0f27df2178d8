//! Time management utilities

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Source of monotonic time in seconds
pub trait Clock {
    /// Seconds elapsed since an arbitrary fixed origin
    fn now(&self) -> f64;
}

/// Wall clock backed by `Instant`
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Create a clock whose origin is the current instant
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Hand-driven clock for tests and fixed-step hosts
///
/// Clones share the same time, so a test can keep one handle and give
/// another to the `Timer`.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    seconds: Rc<Cell<f64>>,
}

impl ManualClock {
    /// Create a clock at time zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward
    pub fn advance(&self, seconds: f64) {
        self.seconds.set(self.seconds.get() + seconds);
    }

    /// Jump to an absolute time
    pub fn set(&self, seconds: f64) {
        self.seconds.set(seconds);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.seconds.get()
    }
}

/// Frame timer
pub struct Timer {
    clock: Box<dyn Clock>,
    last_frame: f64,
    delta_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer on the wall clock
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock::new()))
    }

    /// Create a timer that reads the given clock
    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        let now = clock.now();
        Self {
            clock,
            last_frame: now,
            delta_time: 0.0,
            frame_count: 0,
        }
    }

    /// Update the timer (should be called once per frame)
    #[allow(clippy::cast_possible_truncation)]
    pub fn update(&mut self) {
        let now = self.clock.now();
        let elapsed = (now - self.last_frame).max(0.0);
        self.delta_time = elapsed as f32;
        self.last_frame = now;
        self.frame_count += 1;
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
