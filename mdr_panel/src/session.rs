//! Frame-level orchestration: which widget is live (idle screen or numbers
//! panel), activity tracking, the settings overlay, and persistence. The host
//! loop calls [`Session::draw`] then [`Session::update`] once per frame, in
//! that order: the draw pass writes viewport geometry and visibility flags,
//! and the activity tick that follows reads them.

use std::path::PathBuf;

use glam::Vec2;

use mdr_core::RandomSource;

use crate::idle::IdleScreen;
use crate::input::FrameInput;
use crate::panel::{FrameContext, NumbersPanel, PanelEvent};
use crate::render::Renderer;
use crate::settings::save_settings;

/// Seconds without pointer activity before the panel falls back to idle.
pub const IDLE_TIMEOUT_SECONDS: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    ShutdownRequested,
    SettingsSaved,
}

pub struct Session {
    panel: NumbersPanel,
    idle: IdleScreen,
    idle_mode: bool,
    settings_mode: bool,
    last_activity: f64,
    settings_path: PathBuf,
}

impl Session {
    pub fn new(panel: NumbersPanel, idle: IdleScreen, settings_path: PathBuf) -> Self {
        Self {
            panel,
            idle,
            idle_mode: true,
            settings_mode: false,
            last_activity: 0.0,
            settings_path,
        }
    }

    pub fn panel(&self) -> &NumbersPanel {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut NumbersPanel {
        &mut self.panel
    }

    pub fn is_idle(&self) -> bool {
        self.idle_mode
    }

    pub fn settings_mode(&self) -> bool {
        self.settings_mode
    }

    /// One simulation step: mode toggles, activity/timeout bookkeeping, then
    /// a tick of whichever widget is live. `now` is seconds of wall time.
    pub fn update(
        &mut self,
        now: f64,
        input: &FrameInput,
        display_size: Vec2,
        rng: &mut dyn RandomSource,
    ) {
        if input.toggle_settings {
            self.settings_mode = !self.settings_mode;
        }

        if input.toggle_idle {
            self.idle_mode = !self.idle_mode;
            if !self.idle_mode {
                self.last_activity = now;
                self.panel.trigger_load_animation();
            }
        }

        if input.any_activity() {
            self.last_activity = now;
            if self.idle_mode {
                self.idle_mode = false;
                self.panel.trigger_load_animation();
            }
        }

        if !self.idle_mode && now - self.last_activity > IDLE_TIMEOUT_SECONDS {
            self.idle_mode = true;
        }

        if self.idle_mode {
            self.idle.rescale(display_size);
        } else {
            self.panel.update(rng);
        }
    }

    /// One draw pass of the live widget plus the settings overlay.
    pub fn draw(
        &mut self,
        ctx: &FrameContext,
        renderer: &mut dyn Renderer,
        rng: &mut dyn RandomSource,
    ) -> Vec<SessionEvent> {
        let mut events = Vec::new();

        if self.idle_mode {
            self.idle.draw(ctx.window_pos, ctx.window_size, renderer);
        } else if let Some(PanelEvent::ShutdownRequested) = self.panel.draw(ctx, renderer, rng) {
            events.push(SessionEvent::ShutdownRequested);
        }

        if self.settings_mode {
            self.panel.draw_settings_overlay(ctx, renderer);
            if ctx.input.save_settings {
                match save_settings(self.panel.settings(), &self.settings_path) {
                    Ok(()) => events.push(SessionEvent::SettingsSaved),
                    Err(err) => log::error!("saving settings failed: {err:#}"),
                }
            }
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::LOGO_IMAGE;
    use crate::render::RecordingRenderer;
    use crate::settings::Settings;
    use crate::theme::Theme;
    use mdr_core::{GridConfig, SimRng, TileGrid};

    fn session() -> (Session, RecordingRenderer, SimRng) {
        let mut rng = SimRng::seeded(8);
        let grid = TileGrid::generate(
            GridConfig {
                size: 10,
                ..GridConfig::default()
            },
            &mut rng,
        );
        let mut renderer = RecordingRenderer::new().with_image(LOGO_IMAGE, 200, 100);
        for digit in 0..10 {
            renderer.register_image(&format!("numbers/{digit}.png"), 64, 64);
        }
        let theme = Theme::default();
        let panel = NumbersPanel::new(grid, Settings::default(), theme);
        let idle = IdleScreen::new(&mut renderer, theme.accent);
        let session = Session::new(panel, idle, PathBuf::from("/nonexistent/settings.json"));
        (session, renderer, rng)
    }

    const DISPLAY: Vec2 = Vec2::new(1920.0, 1080.0);

    #[test]
    fn starts_idle_and_wakes_on_activity() {
        let (mut session, _renderer, mut rng) = session();
        assert!(session.is_idle());

        session.update(0.0, &FrameInput::default(), DISPLAY, &mut rng);
        assert!(session.is_idle());

        let wake = FrameInput {
            pointer_delta: Vec2::new(3.0, 0.0),
            ..FrameInput::default()
        };
        session.update(1.0, &wake, DISPLAY, &mut rng);
        assert!(!session.is_idle());
    }

    #[test]
    fn waking_restarts_the_load_animation() {
        let (mut session, _renderer, mut rng) = session();
        for tile in session.panel_mut().grid_mut().tiles_mut() {
            tile.load_progress = 1.0;
        }
        let wake = FrameInput {
            primary_clicked: true,
            ..FrameInput::default()
        };
        session.update(0.5, &wake, DISPLAY, &mut rng);
        assert!(session
            .panel()
            .grid()
            .tiles()
            .iter()
            .all(|tile| tile.load_progress == 0.0));
    }

    #[test]
    fn inactivity_falls_back_to_idle() {
        let (mut session, _renderer, mut rng) = session();
        let wake = FrameInput {
            pointer_delta: Vec2::ONE,
            ..FrameInput::default()
        };
        session.update(0.0, &wake, DISPLAY, &mut rng);
        assert!(!session.is_idle());

        session.update(30.0, &FrameInput::default(), DISPLAY, &mut rng);
        assert!(!session.is_idle());

        session.update(61.0, &FrameInput::default(), DISPLAY, &mut rng);
        assert!(session.is_idle());
    }

    #[test]
    fn idle_toggle_key_flips_modes() {
        let (mut session, _renderer, mut rng) = session();
        let toggle = FrameInput {
            toggle_idle: true,
            ..FrameInput::default()
        };
        session.update(0.0, &toggle, DISPLAY, &mut rng);
        assert!(!session.is_idle());
        session.update(1.0, &toggle, DISPLAY, &mut rng);
        assert!(session.is_idle());
    }

    #[test]
    fn settings_mode_toggles_and_draws_the_overlay() {
        let (mut session, mut renderer, mut rng) = session();
        let toggle = FrameInput {
            toggle_settings: true,
            ..FrameInput::default()
        };
        session.update(0.0, &toggle, DISPLAY, &mut rng);
        assert!(session.settings_mode());

        let ctx = FrameContext {
            window_pos: Vec2::ZERO,
            window_size: DISPLAY,
            display_size: DISPLAY,
            input: FrameInput::default(),
        };
        session.draw(&ctx, &mut renderer, &mut rng);
        let overlay_lines = renderer
            .calls
            .iter()
            .filter(|call| matches!(call, crate::render::DrawCall::Text { .. }))
            .count();
        assert!(overlay_lines >= 10, "expected the parameter listing");
    }

    #[test]
    fn idle_draw_only_touches_the_logo() {
        let (mut session, mut renderer, mut rng) = session();
        let ctx = FrameContext {
            window_pos: Vec2::ZERO,
            window_size: DISPLAY,
            display_size: DISPLAY,
            input: FrameInput::default(),
        };
        session.draw(&ctx, &mut renderer, &mut rng);
        assert_eq!(renderer.images_drawn(LOGO_IMAGE), 1);
        assert_eq!(renderer.images_drawn("numbers/0.png"), 0);
    }
}
