//! The input seam. A host window loop (or a test script) condenses its event
//! stream into one [`FrameInput`] per frame: pointer position, button
//! edges/levels, and key edges for the handful of bindings the panel knows.

use std::collections::VecDeque;

use glam::Vec2;

/// Everything the panel reads from input in one frame. Key fields are edges
/// (true on the press frame only); `primary_down` is a level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    pub pointer: Vec2,
    pub pointer_delta: Vec2,
    /// Primary button held this frame.
    pub primary_down: bool,
    /// Primary button pressed this frame.
    pub primary_clicked: bool,
    pub secondary_clicked: bool,
    pub middle_clicked: bool,
    pub pan_left: bool,
    pub pan_right: bool,
    pub pan_up: bool,
    pub pan_down: bool,
    pub zoom_in: bool,
    pub zoom_out: bool,
    pub toggle_settings: bool,
    pub toggle_idle: bool,
    pub save_settings: bool,
}

impl Default for FrameInput {
    fn default() -> Self {
        Self {
            // Far off screen so a quiet frame never hovers a tile.
            pointer: Vec2::new(-1.0e6, -1.0e6),
            pointer_delta: Vec2::ZERO,
            primary_down: false,
            primary_clicked: false,
            secondary_clicked: false,
            middle_clicked: false,
            pan_left: false,
            pan_right: false,
            pan_up: false,
            pan_down: false,
            zoom_in: false,
            zoom_out: false,
            toggle_settings: false,
            toggle_idle: false,
            save_settings: false,
        }
    }
}

impl FrameInput {
    pub fn any_click(&self) -> bool {
        self.primary_clicked || self.secondary_clicked || self.middle_clicked
    }

    /// Pointer movement or any click, the signals that wake the idle screen.
    pub fn any_activity(&self) -> bool {
        self.any_click() || self.pointer_delta != Vec2::ZERO
    }
}

/// Produces one [`FrameInput`] per frame.
pub trait InputSource {
    fn next_frame(&mut self) -> FrameInput;
}

/// Scripted source for tests and headless runs: plays queued frames in
/// order, then quiet frames forever.
#[derive(Default)]
pub struct ScriptedInput {
    frames: VecDeque<FrameInput>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: FrameInput) {
        self.frames.push_back(frame);
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn next_frame(&mut self) -> FrameInput {
        self.frames.pop_front().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_frame_reports_no_activity() {
        let frame = FrameInput::default();
        assert!(!frame.any_activity());
        assert!(!frame.any_click());
    }

    #[test]
    fn pointer_motion_counts_as_activity() {
        let frame = FrameInput {
            pointer_delta: Vec2::new(0.0, 2.0),
            ..FrameInput::default()
        };
        assert!(frame.any_activity());
    }

    #[test]
    fn scripted_input_drains_then_goes_quiet() {
        let mut script = ScriptedInput::new();
        script.push(FrameInput {
            primary_clicked: true,
            primary_down: true,
            ..FrameInput::default()
        });
        assert_eq!(script.remaining(), 1);
        assert!(script.next_frame().primary_clicked);
        assert_eq!(script.next_frame(), FrameInput::default());
    }
}
