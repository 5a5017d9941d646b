//! Pixel-space layout constants and the scaler that keeps them proportional
//! to the display. The rescale is relative and compounding: each change
//! multiplies the current values by the ratio of new to old display scale
//! rather than recomputing from a baseline, so floating-point drift across
//! many resizes is an accepted characteristic of the panel, not a bug.

use glam::Vec2;

/// Width the preset values were authored against.
pub const REFERENCE_WIDTH: f32 = 1280.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayPresets {
    /// Height of the header band excluded from the tile area.
    pub number_window_buffer_top: f32,
    /// Height of the bin band excluded from the tile area.
    pub number_window_buffer_bottom: f32,
    pub header_image_scale: f32,
    pub header_image_offset_x: f32,
    pub header_box_buffer_x: f32,
    pub header_box_buffer_y: f32,
    pub bin_image_scale: f32,
    pub bin_offset: f32,
    pub bin_percent_bar_offset: f32,
    pub font_size: f32,
    pub settings_font_scale: f32,
    pub line_graphics_spacing: f32,
    pub line_thickness: f32,
}

impl Default for DisplayPresets {
    fn default() -> Self {
        Self {
            number_window_buffer_top: 125.0,
            number_window_buffer_bottom: 115.0,
            header_image_scale: 0.25,
            header_image_offset_x: 50.0,
            header_box_buffer_x: 55.0,
            header_box_buffer_y: 37.0,
            bin_image_scale: 0.75,
            bin_offset: 40.0,
            bin_percent_bar_offset: 50.0,
            font_size: 25.0,
            settings_font_scale: 0.3,
            line_graphics_spacing: 10.0,
            line_thickness: 5.0,
        }
    }
}

/// Tracks the last-seen viewport width and global scale and rescales the
/// presets whenever either changes. Returns whether a rescale happened so
/// per-tile geometry can be invalidated on the same frame.
#[derive(Debug, Clone, Copy)]
pub struct PresetScaler {
    last_viewport: Vec2,
    last_global_scale: f32,
}

impl Default for PresetScaler {
    fn default() -> Self {
        Self {
            last_viewport: Vec2::new(REFERENCE_WIDTH, 720.0),
            last_global_scale: 1.0,
        }
    }
}

impl PresetScaler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rescale(
        &mut self,
        presets: &mut DisplayPresets,
        viewport: Vec2,
        global_scale: f32,
    ) -> bool {
        if self.last_viewport == viewport && self.last_global_scale == global_scale {
            return false;
        }

        let previous = self.last_viewport.x / REFERENCE_WIDTH * self.last_global_scale;
        let current = viewport.x / REFERENCE_WIDTH * global_scale;
        let factor = current / previous;

        presets.number_window_buffer_top *= factor;
        presets.number_window_buffer_bottom *= factor;
        presets.header_image_scale *= factor;
        presets.header_image_offset_x *= factor;
        presets.header_box_buffer_x *= factor;
        presets.header_box_buffer_y *= factor;
        presets.bin_image_scale *= factor;
        presets.bin_offset *= factor;
        presets.bin_percent_bar_offset *= factor;
        presets.font_size *= factor;
        presets.settings_font_scale *= factor;
        presets.line_graphics_spacing *= factor;
        presets.line_thickness *= factor;

        self.last_viewport = viewport;
        self.last_global_scale = global_scale;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unchanged_display_leaves_presets_alone() {
        let mut scaler = PresetScaler::new();
        let mut presets = DisplayPresets::default();
        let before = presets;
        assert!(!scaler.rescale(&mut presets, Vec2::new(1280.0, 720.0), 1.0));
        assert_eq!(presets, before);
    }

    #[test]
    fn doubling_the_width_doubles_pixel_presets() {
        let mut scaler = PresetScaler::new();
        let mut presets = DisplayPresets::default();
        assert!(scaler.rescale(&mut presets, Vec2::new(2560.0, 1440.0), 1.0));
        assert!((presets.number_window_buffer_top - 250.0).abs() < 1.0e-3);
        assert!((presets.font_size - 50.0).abs() < 1.0e-3);
        assert!((presets.bin_image_scale - 1.5).abs() < 1.0e-4);
    }

    #[test]
    fn rescales_compound_multiplicatively() {
        let mut scaler = PresetScaler::new();
        let mut presets = DisplayPresets::default();
        scaler.rescale(&mut presets, Vec2::new(2560.0, 1440.0), 1.0);
        scaler.rescale(&mut presets, Vec2::new(1280.0, 720.0), 1.0);
        // Back where it started, modulo accumulated rounding.
        assert!((presets.number_window_buffer_top - 125.0).abs() < 1.0e-2);
        assert!((presets.line_thickness - 5.0).abs() < 1.0e-3);
    }

    #[test]
    fn global_scale_changes_trigger_a_rescale() {
        let mut scaler = PresetScaler::new();
        let mut presets = DisplayPresets::default();
        assert!(scaler.rescale(&mut presets, Vec2::new(1280.0, 720.0), 2.0));
        assert!((presets.bin_offset - 80.0).abs() < 1.0e-3);
        assert!(!scaler.rescale(&mut presets, Vec2::new(1280.0, 720.0), 2.0));
    }
}
