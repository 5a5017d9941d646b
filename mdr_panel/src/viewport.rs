//! Pan/zoom over the tile grid. Pan moves in unscaled grid units, zoom is a
//! clamped multiplier; the caller multiplies both into per-tile screen
//! positions. `update` reports whether anything changed so that geometry is
//! only recomputed on change.

use glam::Vec2;

use crate::input::FrameInput;
use crate::settings::{ControlSettings, DisplaySettings};

pub struct Viewport {
    pan: Vec2,
    zoom: f32,
    initialized: bool,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self {
            pan: Vec2::ZERO,
            zoom: 0.15,
            initialized: false,
        }
    }

    /// Pan offset in unscaled grid units.
    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Applies this frame's key edges, clamps zoom to the configured range,
    /// and keeps the grid inside the window's interior band (the top/bottom
    /// buffers are excluded from the clampable area). On the first call the
    /// grid is centered instead of clamped from the previous offset. Returns
    /// true when pan, zoom, or the initial centering changed anything.
    pub fn update(
        &mut self,
        input: &FrameInput,
        window_size: Vec2,
        grid_size: usize,
        display: &DisplaySettings,
        control: &ControlSettings,
        buffer_top: f32,
    ) -> bool {
        let mut changed = !self.initialized;

        if input.pan_left {
            self.pan.x += control.arrow_sensitivity;
            changed = true;
        } else if input.pan_right {
            self.pan.x -= control.arrow_sensitivity;
            changed = true;
        }

        if input.pan_up {
            self.pan.y += control.arrow_sensitivity;
            changed = true;
        } else if input.pan_down {
            self.pan.y -= control.arrow_sensitivity;
            changed = true;
        }

        if input.zoom_out {
            self.zoom -= control.zoom_sensitivity;
            changed = true;
        } else if input.zoom_in {
            self.zoom += control.zoom_sensitivity;
            changed = true;
        }
        self.zoom = clamp_lenient(self.zoom, display.min_zoom_scale, display.max_zoom_scale);

        if changed {
            let grid_extent = grid_size as f32 * display.grid_spacing * self.zoom;

            let min_offset_x = -grid_extent + window_size.x;
            let max_offset_x = 0.0;
            let min_offset_y = -grid_extent + window_size.y - buffer_top;
            let max_offset_y = buffer_top;

            if !self.initialized {
                self.pan.x = (window_size.x - grid_extent) / 2.0 / self.zoom;
                self.pan.y = (window_size.y - grid_extent) / 2.0 / self.zoom;
            }

            self.pan.x = clamp_lenient(self.pan.x, min_offset_x / self.zoom, max_offset_x / self.zoom);
            self.pan.y = clamp_lenient(self.pan.y, min_offset_y / self.zoom, max_offset_y / self.zoom);
        }

        self.initialized = true;
        changed
    }
}

/// Like `f32::clamp` but tolerates an inverted range, which happens when the
/// scaled grid is smaller than the window. The lower bound wins; the panel
/// would rather show a pinned grid than panic mid-session.
fn clamp_lenient(value: f32, lo: f32, hi: f32) -> f32 {
    if value < lo {
        lo
    } else if value > hi {
        hi
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Vec2 = Vec2::new(1920.0, 1080.0);
    const GRID: usize = 100;
    const BUFFER_TOP: f32 = 125.0;

    fn settings() -> (DisplaySettings, ControlSettings) {
        (DisplaySettings::default(), ControlSettings::default())
    }

    fn quiet() -> FrameInput {
        FrameInput::default()
    }

    #[test]
    fn first_update_centers_and_reports_change() {
        let (display, control) = settings();
        let mut viewport = Viewport::new();
        assert!(viewport.update(&quiet(), WINDOW, GRID, &display, &control, BUFFER_TOP));

        let grid_extent = GRID as f32 * display.grid_spacing * viewport.zoom();
        let centered_x = (WINDOW.x - grid_extent) / 2.0 / viewport.zoom();
        // The grid is wider than the window, so centering lands inside the
        // clamp bounds untouched.
        assert!((viewport.pan().x - centered_x).abs() < 1.0e-3);
    }

    #[test]
    fn quiet_updates_are_idempotent() {
        let (display, control) = settings();
        let mut viewport = Viewport::new();
        viewport.update(&quiet(), WINDOW, GRID, &display, &control, BUFFER_TOP);

        let pan = viewport.pan();
        let zoom = viewport.zoom();
        assert!(!viewport.update(&quiet(), WINDOW, GRID, &display, &control, BUFFER_TOP));
        assert!(!viewport.update(&quiet(), WINDOW, GRID, &display, &control, BUFFER_TOP));
        assert_eq!(viewport.pan(), pan);
        assert_eq!(viewport.zoom(), zoom);
    }

    #[test]
    fn arrow_edges_pan_by_the_configured_step() {
        let (display, control) = settings();
        let mut viewport = Viewport::new();
        viewport.update(&quiet(), WINDOW, GRID, &display, &control, BUFFER_TOP);
        let before = viewport.pan();

        let input = FrameInput {
            pan_left: true,
            ..FrameInput::default()
        };
        assert!(viewport.update(&input, WINDOW, GRID, &display, &control, BUFFER_TOP));
        assert!((viewport.pan().x - (before.x + control.arrow_sensitivity)).abs() < 1.0e-3);
        assert_eq!(viewport.pan().y, before.y);
    }

    #[test]
    fn zoom_clamps_to_min_no_matter_how_many_steps() {
        let (display, control) = settings();
        let mut viewport = Viewport::new();
        viewport.update(&quiet(), WINDOW, GRID, &display, &control, BUFFER_TOP);

        let out = FrameInput {
            zoom_out: true,
            ..FrameInput::default()
        };
        for _ in 0..50 {
            viewport.update(&out, WINDOW, GRID, &display, &control, BUFFER_TOP);
        }
        assert_eq!(viewport.zoom(), display.min_zoom_scale);
    }

    #[test]
    fn zoom_clamps_to_max() {
        let (display, control) = settings();
        let mut viewport = Viewport::new();
        viewport.update(&quiet(), WINDOW, GRID, &display, &control, BUFFER_TOP);

        let input = FrameInput {
            zoom_in: true,
            ..FrameInput::default()
        };
        for _ in 0..50 {
            viewport.update(&input, WINDOW, GRID, &display, &control, BUFFER_TOP);
        }
        assert_eq!(viewport.zoom(), display.max_zoom_scale);
    }

    #[test]
    fn grid_smaller_than_the_window_still_updates() {
        // The scaled 1x1 grid is tiny, so the clamp range inverts; the
        // viewport pins the pan instead of panicking.
        let (display, control) = settings();
        let mut viewport = Viewport::new();
        assert!(viewport.update(&quiet(), WINDOW, 1, &display, &control, BUFFER_TOP));
        assert!(!viewport.update(&quiet(), WINDOW, 1, &display, &control, BUFFER_TOP));
        assert!(viewport.pan().x.is_finite());
        assert!(viewport.pan().y.is_finite());
    }

    #[test]
    fn panning_cannot_escape_the_grid_bounds() {
        let (display, control) = settings();
        let mut viewport = Viewport::new();
        viewport.update(&quiet(), WINDOW, GRID, &display, &control, BUFFER_TOP);

        let input = FrameInput {
            pan_left: true,
            pan_up: true,
            ..FrameInput::default()
        };
        for _ in 0..10_000 {
            viewport.update(&input, WINDOW, GRID, &display, &control, BUFFER_TOP);
        }
        let zoom = viewport.zoom();
        assert!(viewport.pan().x <= 0.0 / zoom + 1.0e-3);
        assert!(viewport.pan().y <= BUFFER_TOP / zoom + 1.0e-3);

        let input = FrameInput {
            pan_right: true,
            pan_down: true,
            ..FrameInput::default()
        };
        let grid_extent = GRID as f32 * display.grid_spacing * zoom;
        for _ in 0..10_000 {
            viewport.update(&input, WINDOW, GRID, &display, &control, BUFFER_TOP);
        }
        assert!(viewport.pan().x >= (-grid_extent + WINDOW.x) / zoom - 1.0e-3);
        assert!(viewport.pan().y >= (-grid_extent + WINDOW.y - BUFFER_TOP) / zoom - 1.0e-3);
    }
}
