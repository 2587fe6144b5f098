//! Simulation settings
//!
//! Loaded from a JSON file; any field missing from the file keeps its default.

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};
use crate::feedback::Color;
use crate::sim::{Ball, Boundary, GravityField};

/// Tick cadence presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CadencePreset {
    /// Physics and sensor share one 100 ms timer
    Classic,
    /// 16 ms physics, 100 ms sensor polling
    #[default]
    Smooth,
}

impl CadencePreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            CadencePreset::Classic => "Classic",
            CadencePreset::Smooth => "Smooth",
        }
    }

    /// Physics timestep (seconds)
    pub fn physics_dt(&self) -> f32 {
        match self {
            CadencePreset::Classic => SENSOR_INTERVAL,
            CadencePreset::Smooth => SIM_DT,
        }
    }
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub cadence: CadencePreset,

    // === Timing ===
    /// Physics timestep (seconds)
    pub physics_dt: f32,
    /// Accelerometer polling interval (seconds)
    pub sensor_interval: f32,
    /// Max physics ticks per frame
    pub max_substeps: u32,

    // === Forces ===
    /// Points/s² per unit of gravity magnitude
    pub gravity_scale: f32,
    /// Points/s² per unit of drag push
    pub push_scale: f32,
    /// Speed cap (points/s)
    pub max_speed: f32,
    /// Gravity before the first sensor sample (radians, g)
    pub initial_gravity_angle: f32,
    pub initial_gravity_magnitude: f32,

    // === Ball ===
    pub ball_radius: f32,
    pub ball_start: Vec2,
    pub elasticity: f32,

    // === Feedback ===
    /// Wall shake amplitude (points)
    pub shake_amplitude: f32,
    /// Duration of one shake leg (seconds)
    pub shake_leg_secs: f32,
    /// Number of back-and-forth shakes
    pub shake_repeats: u32,
    /// Ball color before any contact
    pub ball_color: Color,
    /// Colors of the top, bottom, left and right walls
    pub wall_colors: [Color; 4],

    // === Accessibility ===
    /// Reduced motion (no wall shake)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cadence: CadencePreset::Smooth,

            physics_dt: SIM_DT,
            sensor_interval: SENSOR_INTERVAL,
            max_substeps: MAX_SUBSTEPS,

            gravity_scale: GRAVITY_SCALE,
            push_scale: PUSH_SCALE,
            max_speed: BALL_MAX_SPEED,
            initial_gravity_angle: INITIAL_GRAVITY_ANGLE,
            initial_gravity_magnitude: INITIAL_GRAVITY_MAGNITUDE,

            ball_radius: BALL_RADIUS,
            ball_start: Vec2::new(BALL_START_X, BALL_START_Y),
            elasticity: BALL_ELASTICITY,

            shake_amplitude: SHAKE_AMPLITUDE,
            shake_leg_secs: SHAKE_LEG_SECS,
            shake_repeats: SHAKE_REPEATS,
            ball_color: Color::GRAY,
            wall_colors: [Color::RED, Color::GREEN, Color::BLUE, Color::ORANGE],

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Create settings from a cadence preset
    pub fn from_preset(preset: CadencePreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a cadence preset (updates the physics timestep)
    pub fn apply_preset(&mut self, preset: CadencePreset) {
        self.cadence = preset;
        self.physics_dt = preset.physics_dt();
    }

    /// Effective wall shake (respects reduced_motion)
    pub fn effective_shake(&self) -> bool {
        self.shake_repeats > 0 && self.shake_amplitude > 0.0 && !self.reduced_motion
    }

    pub fn initial_gravity(&self) -> GravityField {
        GravityField::new(self.initial_gravity_angle, self.initial_gravity_magnitude)
    }

    /// A fresh ball at the configured start position
    pub fn ball(&self) -> Ball {
        Ball::new(self.ball_start, self.ball_radius).with_elasticity(self.elasticity)
    }

    pub fn wall_color(&self, boundary: Boundary) -> Color {
        self.wall_colors[boundary.index()]
    }

    /// Reject settings the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        fn positive(name: &'static str, value: f32) -> Result<()> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(Error::InvalidSetting {
                    name,
                    reason: format!("must be a positive number, got {value}"),
                })
            }
        }

        positive("physics_dt", self.physics_dt)?;
        positive("sensor_interval", self.sensor_interval)?;
        positive("max_speed", self.max_speed)?;
        positive("ball_radius", self.ball_radius)?;

        if self.max_substeps == 0 {
            return Err(Error::InvalidSetting {
                name: "max_substeps",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.elasticity) {
            return Err(Error::InvalidSetting {
                name: "elasticity",
                reason: format!("must be within [0, 1], got {}", self.elasticity),
            });
        }
        let finite = [
            self.gravity_scale,
            self.push_scale,
            self.initial_gravity_angle,
            self.initial_gravity_magnitude,
            self.shake_amplitude,
            self.shake_leg_secs,
        ]
        .iter()
        .all(|v| v.is_finite())
            && self.ball_start.is_finite();
        if !finite {
            return Err(Error::InvalidSetting {
                name: "settings",
                reason: "all numeric values must be finite".to_string(),
            });
        }
        Ok(())
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings from `path` if given, falling back to defaults
    pub fn load(path: Option<&Path>) -> Self {
        if let Some(path) = path {
            match Self::load_from(path) {
                Ok(settings) => return settings,
                Err(e) => log::warn!("Ignoring settings file {}: {}", path.display(), e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings as pretty JSON
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}
