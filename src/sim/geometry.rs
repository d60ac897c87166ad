//! Axis-aligned box geometry
//!
//! Hand boxes come straight from the model as `[x, y, width, height]` in
//! surface pixels.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{BUTTON_HEIGHT, BUTTON_OFFSET_Y, BUTTON_WIDTH};

/// Axis-aligned box (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
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

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Strict overlap test against another box (touching edges don't count)
    pub fn overlaps(&self, other: &BBox) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

impl From<[f32; 4]> for BBox {
    fn from([x, y, width, height]: [f32; 4]) -> Self {
        Self::new(x, y, width, height)
    }
}

/// Circle-vs-box overlap, approximating the circle by its bounding square
pub fn boxes_overlap(bbox: &BBox, point: Vec2, radius: f32) -> bool {
    let square = BBox::new(point.x - radius, point.y - radius, radius * 2.0, radius * 2.0);
    square.overlaps(bbox)
}

/// Point containment with inclusive bounds
pub fn point_in_box(point: Vec2, bbox: &BBox) -> bool {
    point.x >= bbox.x && point.x <= bbox.right() && point.y >= bbox.y && point.y <= bbox.bottom()
}

/// The "Play Again" button on the game over screen
pub fn restart_button(bounds: Vec2) -> BBox {
    let center = bounds / 2.0;
    BBox::new(
        center.x - BUTTON_WIDTH / 2.0,
        center.y + BUTTON_OFFSET_Y,
        BUTTON_WIDTH,
        BUTTON_HEIGHT,
    )
}
