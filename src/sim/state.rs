//! Simulation state
//!
//! Everything a tick reads or mutates lives in [`SimState`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::boundary::{Boundary, Playfield};
use super::collision::ContactTracker;
use super::gravity::GravityField;
use super::push::PushState;
use crate::consts::*;

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Fraction of normal velocity kept after a wall bounce, [0, 1]
    pub elasticity: f32,
}

impl Default for Ball {
    fn default() -> Self {
        Self::new(Vec2::new(BALL_START_X, BALL_START_Y), BALL_RADIUS)
    }
}

impl Ball {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
            elasticity: BALL_ELASTICITY,
        }
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn with_elasticity(mut self, elasticity: f32) -> Self {
        self.elasticity = elasticity.clamp(0.0, 1.0);
        self
    }

    /// Apply an acceleration for one step, capping speed.
    ///
    /// A step that would leave the velocity non-finite is dropped.
    pub fn accelerate(&mut self, accel: Vec2, dt: f32, max_speed: f32) {
        let vel = self.vel + accel * dt;
        if !vel.is_finite() {
            log::debug!("Dropped non-finite acceleration {:?}", accel);
            return;
        }

        let speed = vel.x.hypot(vel.y);
        self.vel = if speed > max_speed {
            // Scale by the largest component first so the length can't overflow
            (vel / vel.abs().max_element()).normalize_or_zero() * max_speed
        } else {
            vel
        };
    }

    /// Move along the current velocity for one step
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }
}

/// The ball has just started touching a wall
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContactEvent {
    pub boundary: Boundary,
    /// Contact point on the boundary segment
    pub point: Vec2,
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimState {
    pub playfield: Playfield,
    pub ball: Ball,
    pub gravity: GravityField,
    pub push: PushState,
    /// Per-wall touching state for edge-triggered contacts
    pub contacts: ContactTracker,
    /// Ball position at the start of the previous tick
    pub previous_pos: Vec2,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl SimState {
    pub fn new(playfield: Playfield, ball: Ball) -> Self {
        Self {
            playfield,
            previous_pos: ball.pos,
            ball,
            gravity: GravityField::default(),
            push: PushState::default(),
            contacts: ContactTracker::default(),
            time_ticks: 0,
        }
    }
}

impl Default for SimState {
    fn default() -> Self {
        Self::new(Playfield::default(), Ball::default())
    }
}
