//! Fixed timestep simulation tick
//!
//! One tick: fold in sensor and gesture input, accelerate the ball under
//! gravity and push, move it, then resolve wall contacts.

use glam::Vec2;

use super::collision::resolve_boundaries;
use super::state::{ContactEvent, SimState};
use crate::input::DragGesture;
use crate::sensor::AccelerationSample;
use crate::settings::Settings;

/// Input gathered since the previous tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Newest accelerometer reading, if one arrived
    pub sample: Option<AccelerationSample>,
    /// Drag gesture events, oldest first
    pub gestures: Vec<DragGesture>,
}

/// Advance the simulation by one fixed timestep.
///
/// Returns the wall contacts that started during this tick.
pub fn tick(state: &mut SimState, input: &TickInput, settings: &Settings, dt: f32) -> Vec<ContactEvent> {
    if let Some(sample) = input.sample {
        state.gravity.update(sample);
    }

    for gesture in &input.gestures {
        gesture.apply(&mut state.push);
    }

    // Push compares where the ball is now with where it was a tick ago
    let tick_start = state.ball.pos;
    let push = state.push.refresh(tick_start, state.previous_pos);

    let accel: Vec2 = state.gravity.vector(settings.gravity_scale) + push * settings.push_scale;
    state.ball.accelerate(accel, dt, settings.max_speed);
    state.ball.integrate(dt);

    let mut events = Vec::new();
    resolve_boundaries(&mut state.ball, &state.playfield, &mut state.contacts, &mut events);

    state.previous_pos = tick_start;
    state.time_ticks += 1;

    events
}
