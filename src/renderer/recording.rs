//! Headless surface that records every draw call
//!
//! Used by the native smoke run and by tests that check what got drawn.

use glam::Vec2;

use super::{Surface, TextStyle};
use crate::sim::BBox;

/// A recorded drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    Save,
    Restore,
    Alpha(f32),
    FillRect { rect: BBox, color: String },
    StrokeRect { rect: BBox, color: String },
    Ellipse {
        center: Vec2,
        radii: Vec2,
        color: String,
        /// Outline color and width
        stroke: Option<(String, f32)>,
    },
    Circle { center: Vec2, radius: f32, color: String },
    Line { from: Vec2, to: Vec2, color: String },
    Text { text: String, pos: Vec2, style: TextStyle },
}

/// Surface that keeps a log of draw calls
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: Vec2,
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            ops: Vec::new(),
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
    }

    /// Operations since the last `clear`
    pub fn frame(&self) -> &[DrawOp] {
        let start = self
            .ops
            .iter()
            .rposition(|op| *op == DrawOp::Clear)
            .map(|i| i + 1)
            .unwrap_or(0);
        &self.ops[start..]
    }

    /// All text drawn in the current frame
    pub fn texts(&self) -> Vec<&str> {
        self.frame()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Index of the first op in the current frame matching `pred`
    pub fn position(&self, pred: impl Fn(&DrawOp) -> bool) -> Option<usize> {
        self.frame().iter().position(pred)
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self) {
        // Keep memory bounded in long headless runs
        self.ops.clear();
        self.ops.push(DrawOp::Clear);
    }

    fn save(&mut self) {
        self.ops.push(DrawOp::Save);
    }

    fn restore(&mut self) {
        self.ops.push(DrawOp::Restore);
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.ops.push(DrawOp::Alpha(alpha));
    }

    fn fill_rect(&mut self, rect: BBox, color: &str) {
        self.ops.push(DrawOp::FillRect {
            rect,
            color: color.to_string(),
        });
    }

    fn stroke_rect(&mut self, rect: BBox, color: &str, _line_width: f32) {
        self.ops.push(DrawOp::StrokeRect {
            rect,
            color: color.to_string(),
        });
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, fill: &str, stroke: Option<(&str, f32)>) {
        self.ops.push(DrawOp::Ellipse {
            center,
            radii,
            color: fill.to_string(),
            stroke: stroke.map(|(color, width)| (color.to_string(), width)),
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str) {
        self.ops.push(DrawOp::Circle {
            center,
            radius,
            color: color.to_string(),
        });
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: &str, _width: f32) {
        self.ops.push(DrawOp::Line {
            from,
            to,
            color: color.to_string(),
        });
    }

    fn text(&mut self, text: &str, pos: Vec2, style: &TextStyle) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            pos,
            style: *style,
        });
    }
}
