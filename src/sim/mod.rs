//! Deterministic simulation module
//!
//! All ball physics lives here. This module must stay pure and deterministic:
//! - Fixed timestep only
//! - Input arrives through `TickInput`, never mid-tick
//! - Stable wall iteration order (`Boundary::ALL`)
//! - No rendering or platform dependencies

pub mod boundary;
pub mod collision;
pub mod gravity;
pub mod push;
pub mod simulator;
pub mod state;
pub mod tick;

pub use boundary::{Boundary, Playfield, Rect, Segment};
pub use collision::{
    CollisionResult, ContactTracker, ball_boundary_collision, bounce_velocity, resolve_boundaries,
};
pub use gravity::GravityField;
pub use push::{PushState, push_direction};
pub use simulator::{RunState, Simulator};
pub use state::{Ball, ContactEvent, SimState};
pub use tick::{TickInput, tick};
