//! Collision detection and response against the playfield walls
//!
//! Walls are axis-aligned, so each one is resolved on its own axis and a ball
//! wedged in a corner gets both reflections in the same tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::boundary::{Boundary, Playfield};
use super::state::{Ball, ContactEvent};
use crate::consts::CONTACT_RELEASE;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether the ball reaches the wall
    pub hit: bool,
    /// Contact point on the boundary segment (if hit)
    pub point: Vec2,
    /// Wall normal, pointing into the playfield
    pub normal: Vec2,
    /// How far the ball edge is past the wall (0 = exactly tangent,
    /// negative = clear of the wall)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check a ball against one wall.
///
/// A ball whose edge is exactly tangent counts as a hit with zero penetration.
pub fn ball_boundary_collision(
    ball_pos: Vec2,
    ball_radius: f32,
    playfield: &Playfield,
    boundary: Boundary,
) -> CollisionResult {
    let penetration = ball_radius - playfield.distance_to(boundary, ball_pos);
    if penetration < 0.0 {
        return CollisionResult {
            penetration,
            ..CollisionResult::miss()
        };
    }

    CollisionResult {
        hit: true,
        point: playfield.segment(boundary).closest_point(ball_pos),
        normal: boundary.inward_normal(),
        penetration,
    }
}

/// Reflect velocity off a surface, keeping `elasticity` of the normal component.
///
/// The tangential component is untouched; the normal component becomes
/// `-elasticity * v·n`.
#[inline]
pub fn bounce_velocity(velocity: Vec2, normal: Vec2, elasticity: f32) -> Vec2 {
    velocity - (1.0 + elasticity) * velocity.dot(normal) * normal
}

/// Which walls the ball is currently touching.
///
/// Contact starts as soon as the ball reaches a wall but only ends once it has
/// moved `CONTACT_RELEASE` away, so a ball jittering against a wall stays in
/// one continuous contact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactTracker {
    touching: [bool; 4],
}

impl ContactTracker {
    pub fn is_touching(&self, boundary: Boundary) -> bool {
        self.touching[boundary.index()]
    }

    /// Feed this tick's penetration for a wall; returns true on contact onset
    pub fn observe(&mut self, boundary: Boundary, penetration: f32) -> bool {
        let touching = &mut self.touching[boundary.index()];
        if !*touching && penetration >= 0.0 {
            *touching = true;
            return true;
        }
        if *touching && penetration < -CONTACT_RELEASE {
            *touching = false;
        }
        false
    }

    pub fn clear(&mut self) {
        self.touching = [false; 4];
    }
}

/// Resolve the ball against all four walls.
///
/// Moving into a wall bounces the ball with its elasticity; any overlap is
/// pushed back out so the ball edge sits exactly on the wall. New contacts are
/// appended to `events`.
pub fn resolve_boundaries(
    ball: &mut Ball,
    playfield: &Playfield,
    tracker: &mut ContactTracker,
    events: &mut Vec<ContactEvent>,
) {
    for boundary in Boundary::ALL {
        let result = ball_boundary_collision(ball.pos, ball.radius, playfield, boundary);

        if result.hit {
            if ball.vel.dot(result.normal) < 0.0 {
                ball.vel = bounce_velocity(ball.vel, result.normal, ball.elasticity);
            }
            if result.penetration > 0.0 {
                ball.pos += result.normal * result.penetration;
            }
        }

        if tracker.observe(boundary, result.penetration) {
            log::debug!(
                "Contact with {} wall at ({:.1}, {:.1})",
                boundary.as_str(),
                result.point.x,
                result.point.y
            );
            events.push(ContactEvent {
                boundary,
                point: result.point,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> Playfield {
        Playfield::new(0.0, 0.0, 400.0, 600.0).unwrap()
    }

    #[test]
    fn test_bounce_velocity_keeps_tangent() {
        // Ball moving right into a vertical wall (normal pointing left)
        let bounced = bounce_velocity(Vec2::new(100.0, 30.0), Vec2::NEG_X, 0.9);
        assert!((bounced.x - (-90.0)).abs() < 0.001);
        assert!((bounced.y - 30.0).abs() < 0.001);

        // Fully elastic is a plain mirror
        let mirrored = bounce_velocity(Vec2::new(100.0, 0.0), Vec2::NEG_X, 1.0);
        assert!((mirrored.x - (-100.0)).abs() < 0.001);
    }

    #[test]
    fn test_boundary_collision_hit_and_miss() {
        let field = field();

        let result = ball_boundary_collision(Vec2::new(200.0, 300.0), 25.0, &field, Boundary::Right);
        assert!(!result.hit);
        assert!((result.penetration - (-175.0)).abs() < 1e-4);

        let result = ball_boundary_collision(Vec2::new(380.0, 300.0), 25.0, &field, Boundary::Right);
        assert!(result.hit);
        assert!((result.penetration - 5.0).abs() < 1e-4);
        assert_eq!(result.point, Vec2::new(400.0, 300.0));
        assert_eq!(result.normal, Vec2::NEG_X);
    }

    #[test]
    fn test_elastic_bounce_keeps_ninety_percent() {
        let field = field();
        let mut ball = Ball::new(Vec2::new(378.0, 300.0), 25.0).with_velocity(Vec2::new(200.0, 40.0));
        let mut tracker = ContactTracker::default();
        let mut events = Vec::new();

        resolve_boundaries(&mut ball, &field, &mut tracker, &mut events);

        assert!((ball.vel.x - (-180.0)).abs() < 1e-3);
        assert!((ball.vel.y - 40.0).abs() < 1e-3);
        // Pushed back to exactly tangent
        assert!((ball.pos.x - 375.0).abs() < 1e-4);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].boundary, Boundary::Right);
    }

    #[test]
    fn test_moving_away_is_not_reflected() {
        let field = field();
        let mut ball = Ball::new(Vec2::new(20.0, 300.0), 25.0).with_velocity(Vec2::new(50.0, 0.0));
        let mut tracker = ContactTracker::default();
        let mut events = Vec::new();

        resolve_boundaries(&mut ball, &field, &mut tracker, &mut events);

        assert_eq!(ball.vel, Vec2::new(50.0, 0.0));
        assert!((ball.pos.x - 25.0).abs() < 1e-4);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_corner_reflects_both_axes() {
        let field = field();
        let mut ball = Ball::new(Vec2::new(380.0, 20.0), 25.0).with_velocity(Vec2::new(100.0, -60.0));
        let mut tracker = ContactTracker::default();
        let mut events = Vec::new();

        resolve_boundaries(&mut ball, &field, &mut tracker, &mut events);

        assert!((ball.vel.x - (-90.0)).abs() < 1e-3);
        assert!((ball.vel.y - 54.0).abs() < 1e-3);
        assert_eq!(events.len(), 2);
        let walls: Vec<_> = events.iter().map(|e| e.boundary).collect();
        assert!(walls.contains(&Boundary::Top));
        assert!(walls.contains(&Boundary::Right));
    }

    #[test]
    fn test_tracker_is_edge_triggered() {
        let mut tracker = ContactTracker::default();
        assert!(tracker.observe(Boundary::Bottom, 0.0));
        assert!(!tracker.observe(Boundary::Bottom, 2.0));
        // Small separation keeps the contact alive
        assert!(!tracker.observe(Boundary::Bottom, -0.2));
        assert!(!tracker.observe(Boundary::Bottom, 0.0));
        assert!(tracker.is_touching(Boundary::Bottom));
        // Leaving for real re-arms it
        assert!(!tracker.observe(Boundary::Bottom, -10.0));
        assert!(!tracker.is_touching(Boundary::Bottom));
        assert!(tracker.observe(Boundary::Bottom, 1.0));
    }

    #[test]
    fn test_deep_overlap_clamped_without_tunneling() {
        let field = field();
        // Center already past the left wall
        let mut ball = Ball::new(Vec2::new(-40.0, 300.0), 25.0).with_velocity(Vec2::new(-500.0, 0.0));
        let mut tracker = ContactTracker::default();
        let mut events = Vec::new();

        resolve_boundaries(&mut ball, &field, &mut tracker, &mut events);

        assert!((ball.pos.x - 25.0).abs() < 1e-4);
        assert!(ball.vel.x > 0.0);
        assert!(field.contains_circle(ball.pos, ball.radius, 1e-3));
    }
}
