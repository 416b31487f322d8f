//! Axis-aligned bodies and overlap tests
//!
//! Everything in the game (paddle, ball, bricks) is a box. Overlap uses
//! closed intervals, so boxes that merely share an edge collide.
//!
//! The tests are pure: [`check_collision`] reports a [`CollisionResult`]
//! and the caller decides which bodies get marked as touched.

use glam::{Vec2, Vec4};

/// An axis-aligned box with its per-step collision flag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Carried for completeness; nothing rotates yet
    pub angle: f32,
    /// Set when the body collided during the current fixed step
    pub touched: bool,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            angle: 0.0,
            touched: false,
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }
}

/// A colored body: paddle, ball and bricks are all blocks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block {
    pub body: Body,
    /// RGBA in [0, 1]
    pub color: Vec4,
}

impl Block {
    pub fn new(pos: Vec2, size: Vec2, color: Vec4) -> Self {
        Self {
            body: Body::new(pos, size),
            color,
        }
    }
}

/// Result of an overlap test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionResult {
    /// Whether the boxes overlap (edges included)
    pub hit: bool,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self { hit: false }
    }
}

/// Closed-interval overlap of two boxes on both axes.
///
/// Symmetric in its arguments.
#[inline]
pub fn check_axis(a: &Body, b: &Body) -> bool {
    let (a_min, a_max) = (a.min(), a.max());
    let (b_min, b_max) = (b.min(), b.max());

    !(a_max.x < b_min.x || a_min.x > b_max.x || a_max.y < b_min.y || a_min.y > b_max.y)
}

/// Overlap test.
///
/// Neither body is modified; apply the touched flag with [`mark_touched`].
pub fn check_collision(a: &Body, b: &Body) -> CollisionResult {
    CollisionResult {
        hit: check_axis(a, b),
    }
}

/// Mark both bodies as touched if `result` is a hit. Returns `result.hit`.
pub fn mark_touched(result: &CollisionResult, a: &mut Body, b: &mut Body) -> bool {
    if result.hit {
        a.touched = true;
        b.touched = true;
    }
    result.hit
}
