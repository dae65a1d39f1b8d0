//! Axis-aligned collision detection
//!
//! Everything on the field is an axis-aligned rectangle, so a single
//! half-open interval overlap test covers paddles, balls and pickups.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Ball, Paddle, Side};

/// An axis-aligned rectangle with its origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build from a top-left position and a size
    #[inline]
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// True when the rectangle has no area
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// True when `other` lies entirely inside this rectangle
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// Check whether two rectangles overlap
///
/// Intervals are half-open, so rectangles that merely share an edge do not
/// collide, and a rectangle with zero width or height never collides.
#[inline]
pub fn collides(a: &Rect, b: &Rect) -> bool {
    if a.is_degenerate() || b.is_degenerate() {
        return false;
    }
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}

/// Which paddle, if any, the ball is touching
///
/// The left paddle is always tested first; a ball overlapping both paddles
/// (only possible for an enlarged ball) resolves against the left one.
pub fn paddle_contact(ball: &Ball, left: &Paddle, right: &Paddle) -> Option<Side> {
    let rect = ball.rect();
    if collides(&rect, &left.rect()) {
        Some(Side::Left)
    } else if collides(&rect, &right.rect()) {
        Some(Side::Right)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn test_overlapping_rects_collide() {
        let a = Rect::new(10.0, 10.0, 10.0, 10.0);
        let b = Rect::new(15.0, 15.0, 10.0, 10.0);
        assert!(collides(&a, &b));
        assert!(collides(&b, &a));
    }

    #[test]
    fn test_separated_rects_miss() {
        let a = Rect::new(10.0, 10.0, 10.0, 10.0);
        let b = Rect::new(15.0, 30.0, 10.0, 10.0);
        assert!(!collides(&a, &b));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!collides(&a, &b));
    }

    #[test]
    fn test_contained_rect_collides() {
        let outer = Rect::new(10.0, 10.0, 20.0, 20.0);
        let inner = Rect::new(15.0, 15.0, 5.0, 5.0);
        assert!(outer.contains(&inner));
        assert!(collides(&outer, &inner));
        assert!(collides(&inner, &outer));
    }

    #[test]
    fn test_negative_coordinates() {
        let a = Rect::new(-5.0, -5.0, 10.0, 10.0);
        let b = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(collides(&a, &b));
    }

    #[test]
    fn test_zero_size_never_collides() {
        let thin = Rect::new(10.0, 10.0, 0.0, 10.0);
        let flat = Rect::new(10.0, 10.0, 10.0, 0.0);
        let big = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(thin.is_degenerate());
        assert!(!collides(&thin, &big));
        assert!(!collides(&big, &flat));
    }

    #[test]
    fn test_ball_inside_paddle_reports_contact() {
        let left = Paddle::new(Side::Left);
        let right = Paddle::new(Side::Right);
        let mut ball = Ball::new(1, Vec2::ZERO);
        ball.size = Vec2::new(GRID / 2.0, GRID / 2.0);
        ball.pos = Vec2::new(left.pos.x + 2.0, left.pos.y + 10.0);
        assert!(left.rect().contains(&ball.rect()));
        assert_eq!(paddle_contact(&ball, &left, &right), Some(Side::Left));

        ball.pos = Vec2::new(right.pos.x + 2.0, right.pos.y + 10.0);
        assert_eq!(paddle_contact(&ball, &left, &right), Some(Side::Right));
    }

    #[test]
    fn test_zero_width_ball_never_touches_paddle() {
        let left = Paddle::new(Side::Left);
        let right = Paddle::new(Side::Right);
        let mut ball = Ball::new(1, Vec2::new(left.pos.x + 5.0, left.pos.y + 5.0));
        ball.size.x = 0.0;
        assert!(left.rect().contains(&ball.rect()));
        assert_eq!(paddle_contact(&ball, &left, &right), None);
    }

    #[test]
    fn test_zero_height_rect_inside_other_misses() {
        let outer = Rect::new(0.0, 0.0, 50.0, 50.0);
        let flat = Rect::new(10.0, 20.0, 15.0, 0.0);
        assert!(outer.contains(&flat));
        assert!(!collides(&outer, &flat));
        assert!(!collides(&flat, &outer));
    }

    #[test]
    fn test_left_paddle_wins_tie() {
        let left = Paddle::new(Side::Left);
        let right = Paddle::new(Side::Right);
        // A field-wide ball overlaps both paddles at once
        let mut ball = Ball::new(1, Vec2::new(0.0, left.pos.y));
        ball.size = Vec2::new(WIDTH, GRID);
        assert_eq!(paddle_contact(&ball, &left, &right), Some(Side::Left));
    }
}
