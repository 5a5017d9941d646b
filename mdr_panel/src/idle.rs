//! Attract mode: the logo drifts around the window, reversing direction at
//! each edge, while nobody is at the terminal.

use glam::Vec2;

use crate::panel::LOGO_IMAGE;
use crate::presets::REFERENCE_WIDTH;
use crate::render::{Color, Renderer};

pub struct IdleScreen {
    speed: f32,
    scale: f32,
    logo_size: Vec2,
    last_viewport: Vec2,
    position: Vec2,
    direction: Vec2,
    tint: Color,
}

impl IdleScreen {
    pub fn new(renderer: &mut dyn Renderer, tint: Color) -> Self {
        let (width, height) = renderer.image_size(LOGO_IMAGE);
        Self {
            speed: 0.5,
            scale: 0.5,
            logo_size: Vec2::new(width as f32, height as f32),
            last_viewport: Vec2::new(REFERENCE_WIDTH, 720.0),
            position: Vec2::ZERO,
            direction: Vec2::ONE,
            tint,
        }
    }

    /// Keeps drift speed and logo scale proportional to the display width.
    pub fn rescale(&mut self, viewport: Vec2) {
        if self.last_viewport != viewport {
            let factor = viewport.x / REFERENCE_WIDTH;
            self.scale = factor * 0.5;
            self.speed = factor * 0.5;
            self.last_viewport = viewport;
        }
    }

    pub fn draw(&mut self, window_pos: Vec2, window_size: Vec2, renderer: &mut dyn Renderer) {
        self.advance(window_pos, window_size);
        renderer.draw_image(LOGO_IMAGE, self.position, self.scale, self.tint);
    }

    fn advance(&mut self, window_pos: Vec2, window_size: Vec2) {
        let min = window_pos;
        let max = window_pos + window_size - self.logo_size * self.scale;

        if self.position.x >= max.x {
            self.direction.x = -1.0;
        } else if self.position.x < min.x {
            self.direction.x = 1.0;
        }
        if self.position.y >= max.y {
            self.direction.y = -1.0;
        } else if self.position.y < min.y {
            self.direction.y = 1.0;
        }

        self.position += self.direction * self.speed;
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn direction(&self) -> Vec2 {
        self.direction
    }
}
