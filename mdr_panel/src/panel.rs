//! The numbers panel: per-tile placement and visibility under the pannable
//! viewport, pointer-driven magnification and click-to-refine, the travel of
//! refined tiles into their bins, and the header/bin chrome around the grid.
//!
//! Per frame the panel runs one draw pass (geometry, interaction, draw
//! submission) and the session runs one activity tick afterwards; the
//! activity engine reads the visibility flags this pass wrote.

use glam::Vec2;

use mdr_core::noise_field::JITTER_FIELD_SEED;
use mdr_core::{ActivityEngine, NoiseField, RandomSource, TileGrid, BIN_COUNT};

use crate::bins::{bin_row, clamp_bin_index, Bin};
use crate::input::FrameInput;
use crate::presets::{DisplayPresets, PresetScaler};
use crate::render::{Color, Renderer};
use crate::settings::Settings;
use crate::theme::Theme;
use crate::viewport::Viewport;

pub const LOGO_IMAGE: &str = "logo.png";
const BIN_PERCENT_IMAGE: &str = "bins/bin-percent.png";
const BIN_OPEN_IMAGE: &str = "bins/bin-open.png";

/// Window geometry and input for one frame, supplied by the host loop.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext {
    pub window_pos: Vec2,
    pub window_size: Vec2,
    /// Full display surface size, which drives the preset scaler.
    pub display_size: Vec2,
    pub input: FrameInput,
}

/// Interactions the panel cannot resolve on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEvent {
    ShutdownRequested,
}

#[derive(Debug, Clone, Copy, Default)]
struct Rect {
    min: Vec2,
    max: Vec2,
}

impl Rect {
    fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

pub struct NumbersPanel {
    grid: TileGrid,
    activity: ActivityEngine,
    viewport: Viewport,
    bins: [Bin; BIN_COUNT],
    settings: Settings,
    presets: DisplayPresets,
    scaler: PresetScaler,
    theme: Theme,
    jitter_field: NoiseField,
    tick: u64,
    reveal_map: bool,
    menu_open: bool,
    logo_area: Rect,
}

impl NumbersPanel {
    pub fn new(grid: TileGrid, settings: Settings, theme: Theme) -> Self {
        let bins = bin_row(&grid);
        Self {
            grid,
            activity: ActivityEngine::new(),
            viewport: Viewport::new(),
            bins,
            settings,
            presets: DisplayPresets::default(),
            scaler: PresetScaler::new(),
            theme,
            jitter_field: NoiseField::new(JITTER_FIELD_SEED),
            tick: 0,
            reveal_map: false,
            menu_open: false,
            logo_area: Rect::default(),
        }
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut TileGrid {
        &mut self.grid
    }

    pub fn activity(&self) -> &ActivityEngine {
        &self.activity
    }

    pub fn bins(&self) -> &[Bin; BIN_COUNT] {
        &self.bins
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn set_reveal_map(&mut self, reveal: bool) {
        self.reveal_map = reveal;
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    /// One simulation tick of the cluster spotlight. Runs after the draw
    /// pass so it sees this frame's visibility flags.
    pub fn update(&mut self, rng: &mut dyn RandomSource) {
        self.activity.tick(&mut self.grid, rng);
    }

    /// Restarts the staggered load-in on every tile, used when the panel is
    /// (re)entered from the idle screen.
    pub fn trigger_load_animation(&mut self) {
        for tile in self.grid.tiles_mut() {
            tile.load_progress = 0.0;
        }
    }

    /// The frame's draw pass: rescale presets, apply viewport input, then
    /// chrome, tiles and bins in that order.
    pub fn draw(
        &mut self,
        ctx: &FrameContext,
        renderer: &mut dyn Renderer,
        rng: &mut dyn RandomSource,
    ) -> Option<PanelEvent> {
        let display_changed = self.scaler.rescale(
            &mut self.presets,
            ctx.display_size,
            self.settings.display.global_scale,
        );
        let viewport_changed = self.viewport.update(
            &ctx.input,
            ctx.window_size,
            self.grid.size(),
            &self.settings.display,
            &self.settings.control,
            self.presets.number_window_buffer_top,
        );

        let event = self.draw_overlays(ctx, renderer);
        let refining_to = self.draw_grid(ctx, renderer, rng, viewport_changed || display_changed);
        self.draw_bins(ctx, renderer, refining_to);
        event
    }

    fn draw_grid(
        &mut self,
        ctx: &FrameContext,
        renderer: &mut dyn Renderer,
        rng: &mut dyn RandomSource,
        update_display_infos: bool,
    ) -> Option<usize> {
        let mut refining_to: Option<usize> = None;

        let pan = self.viewport.pan();
        let zoom = self.viewport.zoom();
        let spacing = self.settings.display.grid_spacing;
        let image_scale = self.settings.display.image_scale;
        let noise_speed = f64::from(self.settings.display.noise_speed);
        let noise_scale = f64::from(self.settings.display.noise_scale);
        let noise_offset = self.settings.display.noise_scale_offset;
        let radius = self.settings.display.mouse_scale_radius;
        let multiplier = self.settings.display.mouse_scale_multiplier;
        let refine_speed = self.settings.display.refined_to_bin_speed;
        let buffer_top = self.presets.number_window_buffer_top;
        let buffer_bottom = self.presets.number_window_buffer_bottom;

        for index in 0..self.grid.tiles().len() {
            let (digit, grid_x, grid_y, cluster_id) = {
                let tile = &self.grid.tiles()[index];
                (tile.digit, tile.grid_x, tile.grid_y, tile.cluster)
            };
            let image_name = format!("numbers/{digit}.png");
            let (image_w, image_h) = renderer.image_size(&image_name);
            let image_dims = Vec2::new(image_w as f32, image_h as f32);

            let bad_scale = cluster_id
                .and_then(|id| self.grid.cluster(id))
                .map(|cluster| cluster.scale as f32)
                .unwrap_or(0.0);

            if update_display_infos {
                // Per-tile geometry is only refreshed when the viewport or
                // display size moved; otherwise the cached values hold.
                let local = Vec2::new(
                    (grid_x as f32 * spacing + pan.x) * zoom,
                    (grid_y as f32 * spacing + pan.y) * zoom,
                );
                let center = local + ctx.window_pos;
                let half = image_dims * (image_scale * zoom) / 2.0;

                let tile = &mut self.grid.tiles_mut()[index];
                tile.display.center_x = center.x;
                tile.display.center_y = center.y;
                tile.display.visible = center.x + half.x < ctx.window_pos.x + ctx.window_size.x
                    && center.x - half.x > ctx.window_pos.x
                    && center.y + half.y
                        < ctx.window_pos.y + ctx.window_size.y - buffer_bottom
                    && center.y - half.y > ctx.window_pos.y + buffer_top;
            }

            let (visible, cached_center, horizontal_jitter) = {
                let tile = &self.grid.tiles()[index];
                (
                    tile.display.visible,
                    Vec2::new(tile.display.center_x, tile.display.center_y),
                    tile.display.horizontal_jitter,
                )
            };
            if !visible {
                continue;
            }

            let mut center = cached_center;

            let alpha = {
                let tile = &mut self.grid.tiles_mut()[index];
                if tile.load_progress < 1.0 {
                    tile.load_progress += rng.uniform_int(0, 10) as f32 * 0.001;
                    (tile.load_progress * 2.0).clamp(0.0, 1.0)
                } else {
                    1.0
                }
            };

            let jitter = self.jitter_field.sample3(
                f64::from(grid_x) * noise_scale,
                f64::from(grid_y) * noise_scale,
                self.tick as f64 * noise_speed,
            ) as f32;
            if horizontal_jitter {
                center.x += jitter * noise_offset;
            } else {
                center.y += jitter * noise_offset;
            }

            let mut color = self.theme.accent.with_alpha(alpha);
            if self.reveal_map && cluster_id.is_some() {
                let active = cluster_id
                    .and_then(|id| self.grid.cluster(id))
                    .map(|cluster| cluster.is_active)
                    .unwrap_or(false);
                color = if active {
                    self.theme.reveal_active.with_alpha(alpha)
                } else {
                    self.theme.reveal_bad
                };
            }

            let pointer_scale = scale_from_cursor(center, ctx.input.pointer, radius, multiplier);

            if let Some(cluster_id) = cluster_id {
                // A pruned cluster id resolves to nothing; the tile simply
                // behaves like a normal one from here on.
                let live = self
                    .grid
                    .cluster(cluster_id)
                    .map(|cluster| (cluster.is_active, cluster.refined, cluster.bin_target));
                if let Some((is_active, refined, bin_target)) = live {
                    if is_active {
                        if pointer_scale > 1.0 {
                            if let Some(cluster) = self.grid.cluster_mut(cluster_id) {
                                cluster.super_active = true;
                            }
                        }
                        if !refined
                            && pointer_scale >= 0.5 + multiplier
                            && ctx.input.primary_down
                        {
                            if let Some(cluster) = self.grid.cluster_mut(cluster_id) {
                                cluster.refined = true;
                            }
                            // The counter moves at the same moment the flag
                            // flips, and never again for this cluster.
                            self.bins[clamp_bin_index(bin_target)].refined += 1;
                        }
                    }

                    let (super_active, refined) = self
                        .grid
                        .cluster(cluster_id)
                        .map(|cluster| (cluster.super_active, cluster.refined))
                        .unwrap_or((false, false));

                    if super_active {
                        center.x += rng.uniform_int(-10, 10) as f32 * bad_scale;
                        center.y += rng.uniform_int(-10, 10) as f32 * bad_scale;
                    }

                    if refined {
                        refining_to = self.advance_refined_tile(
                            index,
                            cached_center,
                            bin_target,
                            refine_speed,
                            &mut center,
                            rng,
                        )
                        .or(refining_to);
                    }
                }
            }

            let combined = {
                let tile = &self.grid.tiles()[index];
                tile.load_progress * image_scale * pointer_scale * zoom + bad_scale
            };
            let top_left = center - image_dims * combined / 2.0;
            renderer.draw_image(&image_name, top_left, combined, color);
        }

        self.tick += 1;
        refining_to
    }

    /// Moves a refined tile one step toward its bin, or delivers it. Returns
    /// the approached bin index while the tile is still en route.
    fn advance_refined_tile(
        &mut self,
        index: usize,
        cached_center: Vec2,
        bin_target: usize,
        refine_speed: f32,
        center: &mut Vec2,
        rng: &mut dyn RandomSource,
    ) -> Option<usize> {
        let bin_index = clamp_bin_index(bin_target);
        let bin_pos = self.bins[bin_index].pos;

        let tile = &mut self.grid.tiles_mut()[index];
        if !tile.display.refined_target_set() {
            tile.display.refined_x = cached_center.x;
            tile.display.refined_y = cached_center.y;
        }

        let current = Vec2::new(tile.display.refined_x, tile.display.refined_y);
        let to_bin = bin_pos - current;
        let distance = to_bin.length();

        if distance > refine_speed {
            // The bin can move with the window, so the direction is
            // recomputed every tick.
            let direction = to_bin / distance;
            tile.display.refined_x += direction.x * refine_speed;
            tile.display.refined_y += direction.y * refine_speed;
            *center = Vec2::new(tile.display.refined_x, tile.display.refined_y);
            Some(bin_index)
        } else {
            tile.cluster = None;
            tile.digit = rng.uniform_int(0, 9) as u8;
            tile.load_progress = 0.0;
            tile.display.clear_refined_target();
            None
        }
    }

    fn draw_bins(
        &mut self,
        ctx: &FrameContext,
        renderer: &mut dyn Renderer,
        refining_to: Option<usize>,
    ) {
        let presets = self.presets;
        let accent = self.theme.accent;
        let (percent_w, percent_h) = renderer.image_size(BIN_PERCENT_IMAGE);
        let percent_dims = Vec2::new(percent_w as f32, percent_h as f32);
        let scale = presets.bin_image_scale;

        for slot in 0..BIN_COUNT {
            let pos = self.bins[slot].update_pos(
                ctx.window_size,
                ctx.window_pos,
                presets.number_window_buffer_bottom - presets.bin_offset,
            );

            let bin_name = format!("bins/bin0{}.png", self.bins[slot].id);
            let (bin_w, bin_h) = renderer.image_size(&bin_name);
            let bin_dims = Vec2::new(bin_w as f32, bin_h as f32);
            renderer.draw_image(&bin_name, pos - bin_dims * scale / 2.0, scale, accent);

            let percent_pos = pos + Vec2::new(0.0, presets.bin_percent_bar_offset);
            renderer.draw_image(
                BIN_PERCENT_IMAGE,
                percent_pos - percent_dims * scale / 2.0,
                scale,
                accent,
            );

            let bar_min = percent_pos - percent_dims * scale / 2.0;
            let bar_max = percent_pos + percent_dims * scale / 2.0;
            let progress = self.bins[slot].progress() as f32;

            let label = format!("{}%", (progress * 100.0).round() as i64);
            renderer.draw_text(
                Vec2::new(
                    bar_min.x + 5.0,
                    (bar_min.y + bar_max.y) / 2.0 - presets.font_size / 2.0,
                ),
                presets.font_size,
                &label,
                accent,
            );
            renderer.fill_rect(
                bar_min,
                Vec2::new(bar_min.x + (bar_max.x - bar_min.x) * progress, bar_max.y),
                accent.with_alpha(self.theme.percent_fill_alpha),
            );

            if refining_to == Some(slot) {
                let (open_w, open_h) = renderer.image_size(BIN_OPEN_IMAGE);
                let open_top_left = Vec2::new(
                    pos.x - open_w as f32 * scale / 2.0,
                    pos.y - open_h as f32 * scale / 2.0 - bin_dims.y * scale,
                );
                renderer.draw_image(BIN_OPEN_IMAGE, open_top_left, scale, accent);
            }
        }
    }

    fn draw_overlays(&mut self, ctx: &FrameContext, renderer: &mut dyn Renderer) -> Option<PanelEvent> {
        let presets = self.presets;
        let accent = self.theme.accent;

        let box_min = ctx.window_pos + Vec2::new(presets.header_box_buffer_x, presets.header_box_buffer_y);
        let box_max = Vec2::new(
            ctx.window_pos.x + ctx.window_size.x
                - presets.header_box_buffer_x
                - presets.header_image_offset_x,
            ctx.window_pos.y + presets.number_window_buffer_top
                - presets.line_graphics_spacing
                - presets.header_box_buffer_y,
        );
        renderer.stroke_rect(box_min, box_max, accent);
        renderer.draw_text(
            Vec2::new(
                box_min.x + 25.0,
                (box_min.y + box_max.y) / 2.0 - presets.font_size / 2.0,
            ),
            presets.font_size,
            &self.settings.display.header_text,
            accent,
        );

        let (logo_w, logo_h) = renderer.image_size(LOGO_IMAGE);
        let logo_dims = Vec2::new(logo_w as f32, logo_h as f32) * presets.header_image_scale;
        let logo_pos = Vec2::new(
            box_max.x - logo_dims.x / 2.0,
            (box_min.y + box_max.y) / 2.0 - logo_dims.y / 2.0,
        );
        self.logo_area = Rect {
            min: logo_pos,
            max: logo_pos + logo_dims,
        };
        renderer.draw_image(LOGO_IMAGE, logo_pos, presets.header_image_scale, accent);

        if ctx.input.primary_clicked && self.logo_area.contains(ctx.input.pointer) {
            self.menu_open = !self.menu_open;
        }

        let event = if self.menu_open {
            self.draw_menu(ctx, renderer)
        } else {
            None
        };

        let top_y = ctx.window_pos.y + presets.number_window_buffer_top;
        let bottom_y = ctx.window_pos.y + ctx.window_size.y - presets.number_window_buffer_bottom;
        for y in [
            top_y,
            top_y - presets.line_graphics_spacing,
            bottom_y,
            bottom_y + presets.line_graphics_spacing,
        ] {
            renderer.draw_line(
                Vec2::new(ctx.window_pos.x, y),
                Vec2::new(ctx.window_pos.x + ctx.window_size.x, y),
                accent,
                presets.line_thickness,
            );
        }

        event
    }

    fn draw_menu(&mut self, ctx: &FrameContext, renderer: &mut dyn Renderer) -> Option<PanelEvent> {
        let menu_size = ctx.window_size * Vec2::new(0.6, 0.75);
        let menu_min = ctx.window_pos + (ctx.window_size - menu_size) * 0.5;
        let menu = Rect {
            min: menu_min,
            max: menu_min + menu_size,
        };

        renderer.fill_rect(menu.min, menu.max, Color::new(0.0, 0.12, 0.15, 0.95));
        renderer.stroke_rect(menu.min, menu.max, self.theme.accent);
        renderer.draw_text(
            Vec2::new(menu.min.x + menu_size.x * 0.4, menu.min.y + 40.0),
            self.presets.font_size,
            "System Options",
            self.theme.accent,
        );

        let button_size = Vec2::new(menu_size.x * 0.7, 25.0);
        let button_x = menu.min.x + (menu_size.x - button_size.x) / 2.0;
        let shutdown = Rect {
            min: Vec2::new(button_x, menu.min.y + menu_size.y * 0.45),
            max: Vec2::new(button_x + button_size.x, menu.min.y + menu_size.y * 0.45 + button_size.y),
        };
        let cancel = Rect {
            min: Vec2::new(button_x, menu.min.y + menu_size.y * 0.6),
            max: Vec2::new(button_x + button_size.x, menu.min.y + menu_size.y * 0.6 + button_size.y),
        };

        for (rect, label) in [(shutdown, "Shut Down"), (cancel, "Cancel")] {
            renderer.fill_rect(rect.min, rect.max, Color::new(0.1, 0.2, 0.3, 1.0));
            renderer.draw_text(
                Vec2::new(rect.min.x + button_size.x * 0.45, rect.min.y + 4.0),
                self.presets.font_size * self.presets.settings_font_scale * 2.0,
                label,
                self.theme.accent,
            );
        }

        let mut event = None;
        if ctx.input.primary_clicked {
            let pointer = ctx.input.pointer;
            if shutdown.contains(pointer) {
                event = Some(PanelEvent::ShutdownRequested);
                self.menu_open = false;
            } else if cancel.contains(pointer) {
                self.menu_open = false;
            } else if !menu.contains(pointer) && !self.logo_area.contains(pointer) {
                self.menu_open = false;
            }
        }
        event
    }

    /// Renders the live-tunable parameter listing; the host mutates values
    /// through [`NumbersPanel::settings_mut`] and saves via the session.
    pub fn draw_settings_overlay(&self, ctx: &FrameContext, renderer: &mut dyn Renderer) {
        let accent = self.theme.accent;
        let text_size = 50.0 * self.presets.settings_font_scale;
        let mut cursor = ctx.window_pos + Vec2::new(20.0, 20.0);
        let display = &self.settings.display;
        let control = &self.settings.control;

        let lines = [
            "Display:".to_string(),
            format!("global scale       {:.3}", display.global_scale),
            format!("image scale        {:.3}", display.image_scale),
            format!("grid spacing       {:.1}", display.grid_spacing),
            format!("mouse radius       {:.1}", display.mouse_scale_radius),
            format!("mouse multiplier   {:.2}", display.mouse_scale_multiplier),
            format!("zoom range         {:.2} .. {:.2}", display.min_zoom_scale, display.max_zoom_scale),
            format!("refine speed       {:.2}", display.refined_to_bin_speed),
            format!("header text        {}", display.header_text),
            "Noise:".to_string(),
            format!("speed              {:.4}", display.noise_speed),
            format!("scale              {:.2}", display.noise_scale),
            format!("offset             {:.1}", display.noise_scale_offset),
            "Controls:".to_string(),
            format!("arrow sensitivity  {:.1}", control.arrow_sensitivity),
            format!("zoom sensitivity   {:.2}", control.zoom_sensitivity),
            format!("reveal map         {}", self.reveal_map),
        ];
        for line in lines {
            renderer.draw_text(cursor, text_size, &line, accent);
            cursor.y += text_size * 1.4;
        }
    }
}

/// Linear magnification from pointer proximity: 1 at or beyond the radius,
/// up to `1 + multiplier` at zero distance.
fn scale_from_cursor(center: Vec2, pointer: Vec2, radius: f32, multiplier: f32) -> f32 {
    let distance = pointer.distance(center);
    if distance < radius {
        1.0 + (radius - distance) / radius * multiplier
    } else {
        1.0
    }
}
