//! Axis-aligned box geometry for entity hit tests
//!
//! Every entity is a square defined by:
//! - pos: top-left corner (screen space, y grows downward)
//! - size: edge length

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vec2,
    /// Bottom-right corner
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self {
            min,
            max: min + size,
        }
    }

    /// Square box of edge `size` anchored at `top_left`
    #[inline]
    pub fn square(top_left: Vec2, size: f32) -> Self {
        Self::new(top_left, Vec2::splat(size))
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Strict overlap: boxes that only share an edge do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }
}

/// Anything that occupies a square on the playfield
pub trait Bounded {
    fn bounds(&self) -> Aabb;

    fn hits(&self, other: &impl Bounded) -> bool {
        self.bounds().overlaps(&other.bounds())
    }
}
