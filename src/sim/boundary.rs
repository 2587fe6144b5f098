//! Playfield geometry
//!
//! The playfield is the rectangle left between four edge views. Each edge
//! contributes one axis-aligned boundary segment along its inner side.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One of the four walls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Boundary {
    Top,
    Bottom,
    Left,
    Right,
}

impl Boundary {
    /// Stable iteration order
    pub const ALL: [Boundary; 4] = [
        Boundary::Top,
        Boundary::Bottom,
        Boundary::Left,
        Boundary::Right,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Boundary::Top => "top",
            Boundary::Bottom => "bottom",
            Boundary::Left => "left",
            Boundary::Right => "right",
        }
    }

    /// Index into per-boundary arrays (matches `ALL`)
    #[inline]
    pub fn index(&self) -> usize {
        match self {
            Boundary::Top => 0,
            Boundary::Bottom => 1,
            Boundary::Left => 2,
            Boundary::Right => 3,
        }
    }

    /// Unit normal pointing into the playfield (screen space, y down)
    #[inline]
    pub fn inward_normal(&self) -> Vec2 {
        match self {
            Boundary::Top => Vec2::Y,
            Boundary::Bottom => Vec2::NEG_Y,
            Boundary::Left => Vec2::X,
            Boundary::Right => Vec2::NEG_X,
        }
    }
}

/// Axis-aligned rectangle in screen space (origin top-left, y down)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }
}

/// A boundary line segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub boundary: Boundary,
    pub from: Vec2,
    pub to: Vec2,
}

impl Segment {
    /// Closest point on the segment to `p`
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        let line = self.to - self.from;
        let len_sq = line.length_squared();
        if len_sq < 0.0001 {
            return self.from;
        }
        let t = ((p - self.from).dot(line) / len_sq).clamp(0.0, 1.0);
        self.from + line * t
    }
}

/// The walled area the ball lives in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Playfield {
    /// Build a playfield from its inner edges
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Result<Self> {
        let finite = [left, top, right, bottom].iter().all(|v| v.is_finite());
        if !finite || right <= left || bottom <= top {
            return Err(Error::InvalidPlayfield {
                left,
                top,
                right,
                bottom,
            });
        }
        Ok(Self {
            left,
            top,
            right,
            bottom,
        })
    }

    /// Build a playfield from the frames of the four edge views.
    ///
    /// The boundary runs along the inner side of each view: the bottom of the
    /// top view, the top of the bottom view, and so on.
    pub fn from_edge_rects(top: Rect, bottom: Rect, left: Rect, right: Rect) -> Result<Self> {
        Self::new(left.max_x(), top.max_y(), right.x, bottom.y)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// Check that a ball of this radius can sit inside without touching
    /// opposite walls at once
    pub fn check_fits(&self, radius: f32) -> Result<()> {
        if radius.is_nan() || radius <= 0.0 || 2.0 * radius >= self.width() || 2.0 * radius >= self.height() {
            return Err(Error::BallTooLarge {
                radius,
                width: self.width(),
                height: self.height(),
            });
        }
        Ok(())
    }

    /// The four boundary segments, in `Boundary::ALL` order
    pub fn segments(&self) -> [Segment; 4] {
        Boundary::ALL.map(|b| self.segment(b))
    }

    /// The segment along one boundary
    pub fn segment(&self, boundary: Boundary) -> Segment {
        let (from, to) = match boundary {
            Boundary::Top => (Vec2::new(self.left, self.top), Vec2::new(self.right, self.top)),
            Boundary::Bottom => (Vec2::new(self.left, self.bottom), Vec2::new(self.right, self.bottom)),
            Boundary::Left => (Vec2::new(self.left, self.top), Vec2::new(self.left, self.bottom)),
            Boundary::Right => (Vec2::new(self.right, self.top), Vec2::new(self.right, self.bottom)),
        };
        Segment { boundary, from, to }
    }

    /// Signed distance from `p` to a boundary line, positive on the playfield side
    #[inline]
    pub fn distance_to(&self, boundary: Boundary, p: Vec2) -> f32 {
        match boundary {
            Boundary::Top => p.y - self.top,
            Boundary::Bottom => self.bottom - p.y,
            Boundary::Left => p.x - self.left,
            Boundary::Right => self.right - p.x,
        }
    }

    /// Whether a circle lies entirely inside, within `tolerance`
    pub fn contains_circle(&self, center: Vec2, radius: f32, tolerance: f32) -> bool {
        Boundary::ALL
            .iter()
            .all(|&b| self.distance_to(b, center) >= radius - tolerance)
    }
}

impl Default for Playfield {
    fn default() -> Self {
        use crate::consts::*;
        Self {
            left: PLAYFIELD_LEFT,
            top: PLAYFIELD_TOP,
            right: PLAYFIELD_RIGHT,
            bottom: PLAYFIELD_BOTTOM,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_edge_rects_uses_inner_sides() {
        let top = Rect::new(0.0, 0.0, 375.0, 20.0);
        let bottom = Rect::new(0.0, 647.0, 375.0, 20.0);
        let left = Rect::new(0.0, 0.0, 20.0, 667.0);
        let right = Rect::new(355.0, 0.0, 20.0, 667.0);

        let field = Playfield::from_edge_rects(top, bottom, left, right).unwrap();
        assert_eq!(field, Playfield::default());
        assert_eq!(field.width(), 335.0);
        assert_eq!(field.height(), 627.0);
    }

    #[test]
    fn test_inverted_playfield_rejected() {
        assert!(Playfield::new(100.0, 0.0, 50.0, 100.0).is_err());
        assert!(Playfield::new(0.0, 10.0, 50.0, 10.0).is_err());
        assert!(Playfield::new(0.0, f32::NAN, 50.0, 10.0).is_err());
    }

    #[test]
    fn test_ball_fit() {
        let field = Playfield::new(0.0, 0.0, 100.0, 60.0).unwrap();
        assert!(field.check_fits(25.0).is_ok());
        assert!(field.check_fits(30.0).is_err());
        assert!(field.check_fits(0.0).is_err());
        assert!(field.check_fits(f32::NAN).is_err());
    }

    #[test]
    fn test_segments_share_corners() {
        let field = Playfield::default();
        let [top, bottom, left, right] = field.segments();
        assert_eq!(top.from, left.from);
        assert_eq!(top.to, right.from);
        assert_eq!(bottom.from, left.to);
        assert_eq!(bottom.to, right.to);
    }

    #[test]
    fn test_signed_distance() {
        let field = Playfield::new(0.0, 0.0, 100.0, 100.0).unwrap();
        let p = Vec2::new(10.0, 95.0);
        assert_eq!(field.distance_to(Boundary::Left, p), 10.0);
        assert_eq!(field.distance_to(Boundary::Bottom, p), 5.0);
        assert_eq!(field.distance_to(Boundary::Right, Vec2::new(110.0, 50.0)), -10.0);
    }

    #[test]
    fn test_segment_lookup_matches_order() {
        let field = Playfield::default();
        for b in Boundary::ALL {
            assert_eq!(Boundary::ALL[b.index()], b);
            assert_eq!(field.segments()[b.index()], field.segment(b));
        }
        assert_eq!(Boundary::Left.as_str(), "left");
    }
}
