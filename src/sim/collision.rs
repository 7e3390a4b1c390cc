//! Axis-aligned collision detection
//!
//! Every entity in the simulation collides the same way: derive an
//! axis-aligned bounding box from its visual footprint and test for strict
//! overlap. Rectangles that merely touch at an edge do not collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in world coordinates, top-left origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bounds of a center-anchored footprint at `pos`
    pub fn centered(pos: Vec2, width: f32, height: f32) -> Self {
        Self {
            x: pos.x - width / 2.0,
            y: pos.y - height / 2.0,
            width,
            height,
        }
    }

    /// Strict AABB overlap: both axis intervals must properly intersect.
    /// Touching edges (interval endpoints equal) do not count.
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }

    /// Whether a point lies inside the rectangle, edges inclusive
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}
