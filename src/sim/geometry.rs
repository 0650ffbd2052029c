//! Axis-aligned rectangle geometry
//!
//! Every moving body in the field is a [`Rect`]; all gameplay collision
//! reduces to [`intersects`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in logical field units (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
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

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Top-left corner
    #[inline]
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        self.origin() + self.size() * 0.5
    }

    /// Uniformly scale position and size (logical -> device pixels)
    pub fn scaled(&self, scale: f32) -> Self {
        Self::new(
            self.x * scale,
            self.y * scale,
            self.width * scale,
            self.height * scale,
        )
    }

    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        intersects(self, other)
    }
}

/// Bound `n` to `[lo, hi]`. When `lo > hi` the lower bound wins.
#[inline]
pub fn clamp(n: f32, lo: f32, hi: f32) -> f32 {
    lo.max(hi.min(n))
}

/// Strict AABB overlap: rectangles that only touch along an edge do not
/// intersect.
#[inline]
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}
