//! The rendering seam. The panel composes positions, scales and tints and
//! hands them to a [`Renderer`]; what rasterizes them (GPU quads, a widget
//! toolkit, nothing at all) lives outside this workspace. The recording
//! implementation backs tests and headless runs.

use std::collections::{HashMap, HashSet};

use glam::Vec2;

/// Straight-alpha color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: f32::from(r) / 255.0,
            g: f32::from(g) / 255.0,
            b: f32::from(b) / 255.0,
            a: f32::from(a) / 255.0,
        }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

/// Draw operations the panel needs. Image names are relative path-like
/// strings under the implementation's asset root (`"numbers/7.png"`,
/// `"bins/bin03.png"`). A name that does not resolve reports `(0, 0)` from
/// [`Renderer::image_size`] and draws as a silent no-op, never an error.
pub trait Renderer {
    fn image_size(&mut self, name: &str) -> (u32, u32);

    /// Draws `name` with its top-left corner at `top_left`, its pixel size
    /// multiplied by `scale`, modulated by `tint`.
    fn draw_image(&mut self, name: &str, top_left: Vec2, scale: f32, tint: Color);

    fn fill_rect(&mut self, min: Vec2, max: Vec2, color: Color);

    fn stroke_rect(&mut self, min: Vec2, max: Vec2, color: Color);

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color, thickness: f32);

    fn draw_text(&mut self, pos: Vec2, size: f32, text: &str, color: Color);
}

/// One recorded operation, in submission order.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Image {
        name: String,
        top_left: Vec2,
        scale: f32,
        tint: Color,
    },
    FillRect {
        min: Vec2,
        max: Vec2,
        color: Color,
    },
    StrokeRect {
        min: Vec2,
        max: Vec2,
        color: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
        thickness: f32,
    },
    Text {
        pos: Vec2,
        size: f32,
        text: String,
        color: Color,
    },
}

/// Renderer that records calls instead of rasterizing. Image dimensions are
/// registered up front; an unregistered name behaves like a missing asset.
#[derive(Default)]
pub struct RecordingRenderer {
    sizes: HashMap<String, (u32, u32)>,
    missing: HashSet<String>,
    pub calls: Vec<DrawCall>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(mut self, name: &str, width: u32, height: u32) -> Self {
        self.sizes.insert(name.to_string(), (width, height));
        self
    }

    pub fn register_image(&mut self, name: &str, width: u32, height: u32) {
        self.sizes.insert(name.to_string(), (width, height));
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn images_drawn(&self, name: &str) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, DrawCall::Image { name: n, .. } if n == name))
            .count()
    }
}

impl Renderer for RecordingRenderer {
    fn image_size(&mut self, name: &str) -> (u32, u32) {
        match self.sizes.get(name) {
            Some(&size) => size,
            None => {
                if self.missing.insert(name.to_string()) {
                    log::warn!("image '{name}' not found, treating as zero-sized");
                }
                (0, 0)
            }
        }
    }

    fn draw_image(&mut self, name: &str, top_left: Vec2, scale: f32, tint: Color) {
        if !self.sizes.contains_key(name) {
            // Missing assets draw as a no-op.
            return;
        }
        self.calls.push(DrawCall::Image {
            name: name.to_string(),
            top_left,
            scale,
            tint,
        });
    }

    fn fill_rect(&mut self, min: Vec2, max: Vec2, color: Color) {
        self.calls.push(DrawCall::FillRect { min, max, color });
    }

    fn stroke_rect(&mut self, min: Vec2, max: Vec2, color: Color) {
        self.calls.push(DrawCall::StrokeRect { min, max, color });
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color, thickness: f32) {
        self.calls.push(DrawCall::Line {
            from,
            to,
            color,
            thickness,
        });
    }

    fn draw_text(&mut self, pos: Vec2, size: f32, text: &str, color: Color) {
        self.calls.push(DrawCall::Text {
            pos,
            size,
            text: text.to_string(),
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_images_report_zero_and_skip_drawing() {
        let mut renderer = RecordingRenderer::new();
        assert_eq!(renderer.image_size("nope.png"), (0, 0));
        renderer.draw_image("nope.png", Vec2::ZERO, 1.0, Color::new(1.0, 1.0, 1.0, 1.0));
        assert!(renderer.calls.is_empty());
    }

    #[test]
    fn registered_images_record_their_draws() {
        let mut renderer = RecordingRenderer::new().with_image("numbers/3.png", 64, 64);
        assert_eq!(renderer.image_size("numbers/3.png"), (64, 64));
        renderer.draw_image(
            "numbers/3.png",
            Vec2::new(10.0, 20.0),
            0.5,
            Color::rgba8(157, 227, 235, 255),
        );
        assert_eq!(renderer.images_drawn("numbers/3.png"), 1);
    }

    #[test]
    fn rgba8_normalizes_components() {
        let color = Color::rgba8(255, 0, 51, 255);
        assert_eq!(color.r, 1.0);
        assert_eq!(color.g, 0.0);
        assert!((color.b - 0.2).abs() < 1.0e-6);
        assert_eq!(color.with_alpha(0.5).a, 0.5);
    }
}
