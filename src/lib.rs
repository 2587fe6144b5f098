//! Gravity Ball - a tilt-driven ball in a walled playfield
//!
//! Core modules:
//! - `sim`: Fixed-timestep simulation (gravity, push, boundary collisions)
//! - `sensor`: Accelerometer samples and sources
//! - `input`: Drag gesture events
//! - `feedback`: Contact flash and wall shake
//! - `settings`: Data-driven tuning loaded from JSON

pub mod error;
pub mod feedback;
pub mod input;
pub mod sensor;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use settings::Settings;

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    /// Physics timestep (60 Hz, decoupled from the sensor cadence)
    pub const SIM_DT: f32 = 0.016;
    /// Accelerometer polling interval (10 Hz)
    pub const SENSOR_INTERVAL: f32 = 0.1;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Ball defaults (a 50x50 view at origin (100, 100))
    pub const BALL_RADIUS: f32 = 25.0;
    pub const BALL_START_X: f32 = 125.0;
    pub const BALL_START_Y: f32 = 125.0;
    pub const BALL_ELASTICITY: f32 = 0.90;
    /// Hard speed cap (points/s)
    pub const BALL_MAX_SPEED: f32 = 4000.0;

    /// Gravity before the first accelerometer sample arrives
    pub const INITIAL_GRAVITY_ANGLE: f32 = 1.2;
    pub const INITIAL_GRAVITY_MAGNITUDE: f32 = 0.1;
    /// Points/s² per unit of gravity magnitude
    pub const GRAVITY_SCALE: f32 = 1000.0;
    /// Points/s² per unit of push for a 50x50 ball
    /// (100 points/s² for a 100x100 item, scaled by area)
    pub const PUSH_SCALE: f32 = 400.0;

    /// Push gain while the ball closes on the drag point
    pub const PUSH_APPROACH_GAIN: f32 = 0.02;
    /// Push gain while the ball is stalled or receding
    pub const PUSH_RECEDE_GAIN: f32 = 0.05;

    /// Distance a ball must separate from a wall before a new contact can fire
    pub const CONTACT_RELEASE: f32 = 0.5;

    /// Wall shake: amplitude (points), leg duration (s), repeat count
    pub const SHAKE_AMPLITUDE: f32 = 3.0;
    pub const SHAKE_LEG_SECS: f32 = 0.04;
    pub const SHAKE_REPEATS: u32 = 6;

    /// Default playfield (a 375x667 screen with 20-point edge views)
    pub const PLAYFIELD_LEFT: f32 = 20.0;
    pub const PLAYFIELD_TOP: f32 = 20.0;
    pub const PLAYFIELD_RIGHT: f32 = 355.0;
    pub const PLAYFIELD_BOTTOM: f32 = 647.0;
}

/// Normalize an angle to (-π, π]
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    // [0, TAU]; TAU only through rounding of tiny negative angles
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI { wrapped - TAU } else { wrapped }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
///
/// The radius uses `hypot`, so it only overflows when the true length
/// exceeds `f32::MAX`.
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.x.hypot(pos.y), pos.y.atan2(pos.x))
}

/// Gravity direction and magnitude for an accelerometer reading.
///
/// Device axes have y pointing up while the playfield's y grows downward,
/// hence the negated y. The returned angle is in (-π, π].
#[inline]
pub fn acceleration_to_gravity(x: f32, y: f32) -> (f32, f32) {
    let (magnitude, angle) = cartesian_to_polar(Vec2::new(x, -y));
    (normalize_angle(angle), magnitude)
}
