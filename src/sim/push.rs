//! Drag-to-push
//!
//! While the user drags, the ball is continuously pushed toward the drag
//! point. The push gain is asymmetric: small while the ball is already
//! closing in on the target, larger while it stalls or drifts away. This is a
//! damping heuristic that keeps the ball from overshooting and ringing around
//! the finger, not a spring model.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{PUSH_APPROACH_GAIN, PUSH_RECEDE_GAIN};

/// Drag push state, owned by the simulation
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PushState {
    /// True between drag begin and drag end
    pub active: bool,
    /// Latest drag location in playfield coordinates
    pub drag_point: Vec2,
    /// Push applied on the current tick (unitless)
    pub direction: Vec2,
}

impl PushState {
    /// Drag started at `point`
    pub fn begin(&mut self, point: Vec2) {
        self.active = true;
        self.move_to(point);
    }

    /// Drag moved to `point`
    pub fn move_to(&mut self, point: Vec2) {
        if !point.is_finite() {
            log::debug!("Ignored non-finite drag point {:?}", point);
            return;
        }
        self.drag_point = point;
    }

    /// Drag ended
    pub fn end(&mut self) {
        self.active = false;
        self.direction = Vec2::ZERO;
    }

    /// Recompute the push for this tick; zero when no drag is active
    pub fn refresh(&mut self, ball_pos: Vec2, previous_pos: Vec2) -> Vec2 {
        self.direction = if self.active {
            push_direction(ball_pos, previous_pos, self.drag_point)
        } else {
            Vec2::ZERO
        };
        self.direction
    }
}

/// Push toward `drag_point` for a ball now at `ball_pos` that was at
/// `previous_pos` one tick ago.
pub fn push_direction(ball_pos: Vec2, previous_pos: Vec2, drag_point: Vec2) -> Vec2 {
    let drag = drag_point - ball_pos;
    let moved = ball_pos - previous_pos;

    Vec2::new(
        drag.x * axis_gain(ball_pos.x, moved.x, drag_point.x),
        drag.y * axis_gain(ball_pos.y, moved.y, drag_point.y),
    )
}

/// Gain on one axis: positive approach speed means the ball is closing on
/// the target along that axis.
#[inline]
fn axis_gain(ball: f32, moved: f32, target: f32) -> f32 {
    let approach = if ball > target { -moved } else { moved };
    if approach > 0.0 {
        PUSH_APPROACH_GAIN
    } else {
        PUSH_RECEDE_GAIN
    }
}
