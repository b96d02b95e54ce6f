//! Axis-aligned hit boxes
//!
//! All hit testing is strict-inequality AABB overlap: boxes that merely
//! share an edge do not collide. Visual bounds are shrunk with per-kind
//! insets before testing so grazing sprites feel fair.

/// Axis-aligned rectangle in simulation pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
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

    /// Strict overlap test; touching edges do not count.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }

    /// Shrink symmetrically by `dx` on each side and `dy` on top and bottom.
    #[inline]
    pub fn inset(&self, dx: f32, dy: f32) -> Rect {
        Rect {
            x: self.x + dx,
            y: self.y + dy,
            width: self.width - 2.0 * dx,
            height: self.height - 2.0 * dy,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}
