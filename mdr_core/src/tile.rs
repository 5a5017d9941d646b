use crate::cluster::ClusterId;

pub type TileId = u32;

/// Screen-space bookkeeping for a tile, owned by the panel's viewport pass.
/// Centers and the refined-to target use `-1.0` as the "unset" sentinel so a
/// refinement animation can snapshot its start position exactly once.
#[derive(Debug, Clone, Copy)]
pub struct TileDisplay {
    /// Axis the noise jitter moves this tile along, fixed at creation.
    pub horizontal_jitter: bool,
    pub center_x: f32,
    pub center_y: f32,
    pub refined_x: f32,
    pub refined_y: f32,
    pub visible: bool,
}

impl TileDisplay {
    pub fn new(horizontal_jitter: bool) -> Self {
        Self {
            horizontal_jitter,
            center_x: -1.0,
            center_y: -1.0,
            refined_x: -1.0,
            refined_y: -1.0,
            visible: false,
        }
    }

    pub fn refined_target_set(&self) -> bool {
        self.refined_x != -1.0
    }

    pub fn clear_refined_target(&mut self) {
        self.refined_x = -1.0;
        self.refined_y = -1.0;
    }
}

/// One grid cell. Tiles are created once at generation time and never
/// destroyed; refinement only clears the cluster reference and re-rolls the
/// digit. The cluster link is a weak id into the grid's cluster arena, never
/// a handle, so a pruned cluster simply stops resolving.
#[derive(Debug, Clone)]
pub struct Tile {
    pub id: TileId,
    pub grid_x: i32,
    pub grid_y: i32,
    pub digit: u8,
    pub display: TileDisplay,
    pub cluster: Option<ClusterId>,
    /// Load-in animation progress, 0 until the ramp completes at >= 1.
    pub load_progress: f32,
}

impl Tile {
    pub fn new(id: TileId, grid_x: i32, grid_y: i32, digit: u8, horizontal_jitter: bool) -> Self {
        Self {
            id,
            grid_x,
            grid_y,
            digit,
            display: TileDisplay::new(horizontal_jitter),
            cluster: None,
            load_progress: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_tile_starts_unplaced_and_unclustered() {
        let tile = Tile::new(3, 1, 2, 7, true);
        assert_eq!(tile.cluster, None);
        assert!(!tile.display.visible);
        assert!(!tile.display.refined_target_set());
        assert_eq!(tile.display.center_x, -1.0);
        assert_eq!(tile.load_progress, 0.0);
    }

    #[test]
    fn refined_target_sentinel_round_trips() {
        let mut display = TileDisplay::new(false);
        display.refined_x = 120.0;
        display.refined_y = 88.0;
        assert!(display.refined_target_set());
        display.clear_refined_target();
        assert!(!display.refined_target_set());
    }
}
