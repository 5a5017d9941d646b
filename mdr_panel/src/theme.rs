use crate::render::Color;

/// Immutable palette threaded into the panel at construction instead of
/// living as a process-wide constant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// The pale blue everything on the panel is drawn in.
    pub accent: Color,
    /// Reveal-map tint for the active cluster's tiles.
    pub reveal_active: Color,
    /// Reveal-map tint for every other bad tile.
    pub reveal_bad: Color,
    /// Alpha of the filled portion of a bin's percent bar.
    pub percent_fill_alpha: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::rgba8(157, 227, 235, 255),
            reveal_active: Color::rgba8(255, 255, 0, 255),
            reveal_bad: Color::rgba8(255, 0, 0, 255),
            percent_fill_alpha: 0.3,
        }
    }
}
