//! Player ship
//!
//! Steering, firing and the jump counter. The respawn timer itself lives in
//! the session's scheduler; the ship only records which task is pending.

use asterax_engine::foundation::math::{utils, Vec3};
use asterax_engine::physics::{self, BoundingSphere, PlayArea};
use asterax_engine::scheduler::TaskId;

use crate::components::{Bullet, WrapAround};
use crate::config::GameplayConfig;
use crate::hud::{self, Hud};

/// Where the ship waits while a respawn is pending
pub fn parked_position() -> Vec3 {
    Vec3::new(10000.0, 10000.0, 0.0)
}

/// What losing a jump led to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpLoss {
    /// Jumps remain; a respawn should follow
    Remaining(u32),
    /// That was the last jump
    Exhausted,
    /// The ship is already out of the game
    Ignored,
}

/// Player ship state
#[derive(Debug, Clone)]
pub struct PlayerShip {
    /// World position
    pub position: Vec3,
    /// Linear velocity
    pub velocity: Vec3,
    /// Screen wrap-around
    pub wrap: WrapAround,
    jumps: u32,
    max_jumps: u32,
    speed: f32,
    radius: f32,
    active: bool,
    pending_respawn: Option<TaskId>,
}

impl PlayerShip {
    /// Ship at the origin with a full set of jumps
    pub fn new(config: &GameplayConfig) -> Self {
        Self {
            position: Vec3::zeros(),
            velocity: Vec3::zeros(),
            wrap: WrapAround::default(),
            jumps: config.max_jumps,
            max_jumps: config.max_jumps,
            speed: config.ship_speed,
            radius: config.ship_radius,
            active: true,
            pending_respawn: None,
        }
    }

    /// Push the starting jump count to the HUD
    pub fn announce(&self, hud: &mut dyn Hud) {
        hud.set_jumps_text(&hud::jumps_text(self.jumps));
    }

    /// Remaining jumps
    pub fn jumps(&self) -> u32 {
        self.jumps
    }

    /// Starting jumps
    pub fn max_jumps(&self) -> u32 {
        self.max_jumps
    }

    /// Whether the ship is still in the game
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the ship is parked waiting for a respawn
    pub fn is_respawning(&self) -> bool {
        self.pending_respawn.is_some()
    }

    /// Whether the ship is on the field and can collide, steer and fire
    pub fn in_play(&self) -> bool {
        self.active && !self.is_respawning()
    }

    /// Pending respawn timer
    pub fn pending_respawn(&self) -> Option<TaskId> {
        self.pending_respawn
    }

    /// Collision sphere
    pub fn bounds(&self) -> BoundingSphere {
        BoundingSphere::new(self.position, self.radius)
    }

    /// Set velocity from the input axes
    ///
    /// The axis vector is capped at unit length so diagonals are not faster.
    pub fn steer(&mut self, horizontal: f32, vertical: f32) {
        if !self.in_play() {
            self.velocity = Vec3::zeros();
            return;
        }
        let axes = utils::clamp_length_to_unit(Vec3::new(horizontal, vertical, 0.0));
        self.velocity = axes * self.speed;
    }

    /// Bullet from the ship toward `aim`, a world-space point
    pub fn fire(&self, aim: Vec3, config: &GameplayConfig) -> Option<Bullet> {
        if !self.in_play() {
            return None;
        }
        let direction = utils::try_direction(aim - self.position)?;
        Some(Bullet {
            position: self.position,
            velocity: direction * config.bullet_speed,
            lifetime: config.bullet_lifetime,
        })
    }

    /// Move one step
    pub fn advance(&mut self, delta_time: f32, bounds: &PlayArea) {
        if !self.in_play() {
            return;
        }
        let moved = physics::integrate(self.position, self.velocity, delta_time);
        self.position = self.wrap.apply(moved, bounds);
    }

    /// Take one jump away and refresh the readout
    ///
    /// The count never goes below zero.
    pub fn lose_jump(&mut self, hud: &mut dyn Hud) -> JumpLoss {
        if !self.active {
            return JumpLoss::Ignored;
        }
        self.jumps = self.jumps.saturating_sub(1);
        hud.set_jumps_text(&hud::jumps_text(self.jumps));
        log::info!("Ship hit, {} jump(s) left", self.jumps);

        if self.jumps == 0 {
            JumpLoss::Exhausted
        } else {
            JumpLoss::Remaining(self.jumps)
        }
    }

    /// Disable wrapping and move off the field until the respawn completes
    pub fn park(&mut self) {
        self.wrap.enabled = false;
        self.position = parked_position();
        self.velocity = Vec3::zeros();
    }

    /// Record the timer that will bring the ship back
    ///
    /// Returns the task it replaces, which the caller must cancel.
    pub fn await_respawn(&mut self, task: TaskId) -> Option<TaskId> {
        self.pending_respawn.replace(task)
    }

    /// Put the ship at `point` and re-enable wrapping
    pub fn finish_respawn(&mut self, point: Vec3) {
        self.pending_respawn = None;
        self.position = point;
        self.velocity = Vec3::zeros();
        self.wrap.enabled = true;
        log::info!("Ship respawned at {:?}", point);
    }

    /// Take the ship out of the game for good
    ///
    /// Returns the pending respawn timer, if any, for the caller to cancel.
    pub fn deactivate(&mut self) -> Option<TaskId> {
        self.active = false;
        self.velocity = Vec3::zeros();
        self.pending_respawn.take()
    }
}
