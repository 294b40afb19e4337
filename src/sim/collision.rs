//! Axis-aligned collision tests
//!
//! Everything in the arena is an upright rectangle; bullets hit with a single
//! point (their anchor), ships with their full bounds.

use glam::Vec2;

/// Axis-aligned bounding box in arena coordinates (y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Inclusive point containment (edges count as a hit)
    #[inline]
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}

/// Check whether a bullet anchored at `point` strikes a target
#[inline]
pub fn bullet_hits(point: Vec2, target: &Aabb) -> bool {
    target.contains_point(point)
}

/// Check whether `y` has left the vertical extent of the arena
#[inline]
pub fn out_of_arena_vertical(y: f32) -> bool {
    y >= crate::consts::ARENA_HEIGHT || y <= 0.0
}
