//! Contact feedback
//!
//! Turns contact events into the two cosmetic effects of a wall hit: the ball
//! takes on the color of the wall it touched, and that wall shakes briefly.
//! Rendering reads [`Feedback::ball_color`] and [`Feedback::wall_offset`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::sim::{Boundary, ContactEvent};

/// Linear RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const GRAY: Color = Color::new(0.5, 0.5, 0.5, 1.0);
    pub const RED: Color = Color::new(0.9, 0.2, 0.2, 1.0);
    pub const GREEN: Color = Color::new(0.2, 0.8, 0.3, 1.0);
    pub const BLUE: Color = Color::new(0.2, 0.4, 0.9, 1.0);
    pub const ORANGE: Color = Color::new(1.0, 0.6, 0.1, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// Back-and-forth wall shake.
///
/// Each repeat runs one leg from `-amplitude` to `+amplitude` on both axes and
/// one leg back. When the last repeat ends the wall snaps back to rest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallShake {
    amplitude: f32,
    leg_secs: f32,
    repeats: u32,
    elapsed: f32,
}

impl WallShake {
    pub fn new(amplitude: f32, leg_secs: f32, repeats: u32) -> Self {
        Self {
            amplitude,
            leg_secs,
            repeats,
            elapsed: 0.0,
        }
    }

    /// Total running time (seconds)
    pub fn duration(&self) -> f32 {
        self.leg_secs * 2.0 * self.repeats as f32
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration()
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed = (self.elapsed + dt).min(self.duration());
    }

    /// Current displacement from the wall's rest position
    pub fn offset(&self) -> Vec2 {
        if self.is_finished() || self.leg_secs <= 0.0 {
            return Vec2::ZERO;
        }

        let legs = self.elapsed / self.leg_secs;
        let leg_index = legs.floor() as u32;
        let t = legs.fract();
        // Even legs run forward, odd legs reverse
        let t = if leg_index % 2 == 0 { t } else { 1.0 - t };
        let d = -self.amplitude + 2.0 * self.amplitude * t;
        Vec2::splat(d)
    }
}

/// Visual state driven by contact events
#[derive(Debug, Clone)]
pub struct Feedback {
    ball_color: Color,
    wall_colors: [Color; 4],
    shakes: [Option<WallShake>; 4],
    shake_enabled: bool,
    shake_amplitude: f32,
    shake_leg_secs: f32,
    shake_repeats: u32,
}

impl Feedback {
    pub fn new(settings: &Settings) -> Self {
        Self {
            ball_color: settings.ball_color,
            wall_colors: settings.wall_colors,
            shakes: [None; 4],
            shake_enabled: settings.effective_shake(),
            shake_amplitude: settings.shake_amplitude,
            shake_leg_secs: settings.shake_leg_secs,
            shake_repeats: settings.shake_repeats,
        }
    }

    /// React to a new wall contact: recolor the ball and (re)start the shake
    pub fn on_contact(&mut self, event: &ContactEvent) {
        let i = event.boundary.index();
        self.ball_color = self.wall_colors[i];
        if self.shake_enabled {
            self.shakes[i] = Some(WallShake::new(
                self.shake_amplitude,
                self.shake_leg_secs,
                self.shake_repeats,
            ));
        }
    }

    /// Advance running shakes; finished ones are dropped
    pub fn advance(&mut self, dt: f32) {
        for slot in self.shakes.iter_mut() {
            if let Some(shake) = slot.as_mut() {
                shake.advance(dt);
            }
            if matches!(slot, Some(shake) if shake.is_finished()) {
                *slot = None;
            }
        }
    }

    pub fn ball_color(&self) -> Color {
        self.ball_color
    }

    pub fn wall_offset(&self, boundary: Boundary) -> Vec2 {
        self.shakes[boundary.index()]
            .map(|s| s.offset())
            .unwrap_or(Vec2::ZERO)
    }

    pub fn is_shaking(&self, boundary: Boundary) -> bool {
        self.shakes[boundary.index()].is_some()
    }
}
