//! Accelerometer-driven gravity
//!
//! Gravity is stored the way the tilt sensor reports it: a direction angle in
//! screen space (y down) plus a magnitude in g. The acceleration actually
//! applied to the ball is `magnitude * scale` along that angle.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{INITIAL_GRAVITY_ANGLE, INITIAL_GRAVITY_MAGNITUDE};
use crate::sensor::AccelerationSample;
use crate::{acceleration_to_gravity, normalize_angle, polar_to_cartesian};

/// Current gravity direction and strength
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GravityField {
    /// Direction in radians, (-π, π], 0 = +x, π/2 = screen down
    pub angle: f32,
    /// Strength in g, never negative
    pub magnitude: f32,
}

impl Default for GravityField {
    /// Placeholder used until the first accelerometer sample arrives
    fn default() -> Self {
        Self {
            angle: INITIAL_GRAVITY_ANGLE,
            magnitude: INITIAL_GRAVITY_MAGNITUDE,
        }
    }
}

impl GravityField {
    pub fn new(angle: f32, magnitude: f32) -> Self {
        Self {
            angle: normalize_angle(angle),
            magnitude: magnitude.max(0.0),
        }
    }

    /// Straight down at the given strength
    pub fn down(magnitude: f32) -> Self {
        Self::new(std::f32::consts::FRAC_PI_2, magnitude)
    }

    /// Recompute gravity from an accelerometer sample.
    ///
    /// Returns `false` and keeps the previous state when the sample, or the
    /// magnitude derived from it, is not finite. A zero sample drops the
    /// magnitude to zero but keeps the angle.
    pub fn update(&mut self, sample: AccelerationSample) -> bool {
        if !sample.is_finite() {
            log::debug!("Rejected non-finite accelerometer sample {:?}", sample);
            return false;
        }

        let (angle, magnitude) = acceleration_to_gravity(sample.x, sample.y);
        if !magnitude.is_finite() {
            log::debug!("Rejected accelerometer sample {:?}: magnitude overflows", sample);
            return false;
        }
        if magnitude > 0.0 {
            self.angle = angle;
        }
        self.magnitude = magnitude;
        true
    }

    /// Acceleration in playfield units (points/s²)
    #[inline]
    pub fn vector(&self, scale: f32) -> Vec2 {
        polar_to_cartesian(self.magnitude * scale, self.angle)
    }
}
