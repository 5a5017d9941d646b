use glam::Vec2;

use mdr_core::{TileGrid, BIN_COUNT};

/// One collection bin. Position is recomputed every frame from window
/// geometry; the counters track refinement progress against the capacity
/// fixed at grid generation.
#[derive(Debug, Clone, Copy)]
pub struct Bin {
    /// 1-based id used in asset names; slot index is `id - 1`.
    pub id: u32,
    pub pos: Vec2,
    pub refined: u32,
    pub max: u32,
}

impl Bin {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            pos: Vec2::ZERO,
            refined: 0,
            max: 0,
        }
    }

    /// Places the bin at its fixed horizontal slot (one sixth of the window
    /// width per id) at `offset_y` above the bottom edge.
    pub fn update_pos(&mut self, window_size: Vec2, window_pos: Vec2, offset_y: f32) -> Vec2 {
        self.pos = Vec2::new(
            window_pos.x + window_size.x / 6.0 * self.id as f32,
            window_pos.y + window_size.y - offset_y,
        );
        self.pos
    }

    /// Fraction refined, 0 when nothing was ever assigned here.
    pub fn progress(&self) -> f64 {
        if self.max == 0 {
            0.0
        } else {
            f64::from(self.refined) / f64::from(self.max)
        }
    }
}

/// The five bins with capacities counted from the grid's cluster-to-bin
/// assignment.
pub fn bin_row(grid: &TileGrid) -> [Bin; BIN_COUNT] {
    let mut bins = [
        Bin::new(1),
        Bin::new(2),
        Bin::new(3),
        Bin::new(4),
        Bin::new(5),
    ];
    for cluster in grid.clusters().values() {
        let index = clamp_bin_index(cluster.bin_target);
        bins[index].max += 1;
    }
    bins
}

/// Out-of-range targets clamp to the last bin with a warning instead of
/// indexing out of bounds.
pub fn clamp_bin_index(target: usize) -> usize {
    if target >= BIN_COUNT {
        log::warn!("bin target {target} out of range, clamping to {}", BIN_COUNT - 1);
        BIN_COUNT - 1
    } else {
        target
    }
}
