//! Rendering module
//!
//! The scene is painted through the `Surface` trait so the same painter
//! drives the browser canvas and the headless recorder.

pub mod recording;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use recording::{DrawOp, RecordingSurface};
pub use scene::draw_frame;

use glam::Vec2;

use crate::sim::BBox;

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        }
    }
}

/// Font, colors and alignment for a line of text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: &'static str,
    pub fill: &'static str,
    /// Outline color and width
    pub stroke: Option<(&'static str, f32)>,
    pub align: TextAlign,
}

/// Primitive 2D drawing operations
pub trait Surface {
    /// Drawable size in pixels
    fn size(&self) -> Vec2;

    /// Erase the whole surface
    fn clear(&mut self);

    /// Push/pop drawing state (alpha)
    fn save(&mut self);
    fn restore(&mut self);

    /// Global opacity for subsequent draws
    fn set_alpha(&mut self, alpha: f32);

    fn fill_rect(&mut self, rect: BBox, color: &str);

    fn stroke_rect(&mut self, rect: BBox, color: &str, line_width: f32);

    /// Axis-aligned ellipse, optionally outlined with (color, width)
    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, fill: &str, stroke: Option<(&str, f32)>);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str);

    fn line(&mut self, from: Vec2, to: Vec2, color: &str, width: f32);

    fn text(&mut self, text: &str, pos: Vec2, style: &TextStyle);
}
