use std::collections::BTreeMap;

use crate::cluster::{Cluster, ClusterId, BIN_COUNT};
use crate::noise_field::{NoiseField, BAD_FIELD_SEED};
use crate::rng::RandomSource;
use crate::tile::{Tile, TileId};

/// Generation parameters. The defaults match the shipped panel; tests shrink
/// the grid and move the threshold to force or forbid bad tiles.
#[derive(Debug, Clone, Copy)]
pub struct GridConfig {
    pub size: usize,
    /// Coordinate multiplier applied before sampling the bad-tile field.
    pub bad_scale: f64,
    /// A tile is a bad candidate when its field sample exceeds this.
    pub bad_threshold: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: 100,
            bad_scale: 0.4,
            bad_threshold: 0.7,
        }
    }
}

/// The tile grid and the cluster arena partitioning its bad tiles. Tiles are
/// stored in id order (x-major, then y), which is also the order the cluster
/// sweep processes candidates in.
pub struct TileGrid {
    size: usize,
    tiles: Vec<Tile>,
    clusters: BTreeMap<ClusterId, Cluster>,
}

impl TileGrid {
    /// Builds a `size x size` grid with random digits and jitter axes, then
    /// partitions the bad candidates into clusters with a single ascending-id
    /// sweep: a candidate joins the first already-assigned neighbor found in
    /// the fixed dx-then-dy scan, otherwise it founds a new cluster with a
    /// random bin target. Only already-placed neighbors link, so the final
    /// shapes depend on processing order; this is deliberately not a flood
    /// fill and must stay that way for visual parity.
    pub fn generate(config: GridConfig, rng: &mut dyn RandomSource) -> Self {
        let bad_field = NoiseField::new(BAD_FIELD_SEED);
        let mut tiles = Vec::with_capacity(config.size * config.size);
        let mut bad_candidates: Vec<TileId> = Vec::new();

        let mut tile_id: TileId = 0;
        for x in 0..config.size {
            for y in 0..config.size {
                let digit = rng.uniform_int(0, 9) as u8;
                tiles.push(Tile::new(
                    tile_id,
                    x as i32,
                    y as i32,
                    digit,
                    rng.uniform_bool(),
                ));

                let sample =
                    bad_field.sample2_01(x as f64 * config.bad_scale, y as f64 * config.bad_scale);
                if sample > config.bad_threshold {
                    bad_candidates.push(tile_id);
                }

                tile_id += 1;
            }
        }

        let mut grid = Self {
            size: config.size,
            tiles,
            clusters: BTreeMap::new(),
        };
        grid.assign_clusters(&bad_candidates, rng);
        log::debug!(
            "generated {} tiles, {} bad candidates in {} clusters",
            grid.tiles.len(),
            bad_candidates.len(),
            grid.clusters.len()
        );
        grid
    }

    fn assign_clusters(&mut self, candidates: &[TileId], rng: &mut dyn RandomSource) {
        let mut next_cluster_id: ClusterId = 0;
        for &candidate in candidates {
            let (x, y) = {
                let tile = &self.tiles[candidate as usize];
                if tile.cluster.is_some() {
                    continue;
                }
                (tile.grid_x, tile.grid_y)
            };

            let mut joined: Option<ClusterId> = None;
            'scan: for dx in -1..=1 {
                for dy in -1..=1 {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    if let Some(neighbor) = self.tile_at(x + dx, y + dy) {
                        if let Some(cluster_id) = neighbor.cluster {
                            joined = Some(cluster_id);
                            break 'scan;
                        }
                    }
                }
            }

            match joined {
                Some(cluster_id) => {
                    self.tiles[candidate as usize].cluster = Some(cluster_id);
                    if let Some(cluster) = self.clusters.get_mut(&cluster_id) {
                        cluster.member_ids.push(candidate);
                    }
                }
                None => {
                    let cluster_id = next_cluster_id;
                    next_cluster_id += 1;
                    let bin_target = rng.uniform_int(0, BIN_COUNT as i32 - 1) as usize;
                    self.clusters
                        .insert(cluster_id, Cluster::new(cluster_id, vec![candidate], bin_target));
                    self.tiles[candidate as usize].cluster = Some(cluster_id);
                }
            }
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tiles_mut(&mut self) -> &mut [Tile] {
        &mut self.tiles
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id as usize)
    }

    pub fn tile_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.tiles.get_mut(id as usize)
    }

    pub fn tile_at(&self, x: i32, y: i32) -> Option<&Tile> {
        let idx = self.index_of(x, y)?;
        self.tiles.get(idx)
    }

    pub fn tile_at_mut(&mut self, x: i32, y: i32) -> Option<&mut Tile> {
        let idx = self.index_of(x, y)?;
        self.tiles.get_mut(idx)
    }

    fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        let size = self.size as i32;
        if x < 0 || y < 0 || x >= size || y >= size {
            return None;
        }
        Some((x * size + y) as usize)
    }

    pub fn clusters(&self) -> &BTreeMap<ClusterId, Cluster> {
        &self.clusters
    }

    pub fn cluster(&self, id: ClusterId) -> Option<&Cluster> {
        self.clusters.get(&id)
    }

    pub fn cluster_mut(&mut self, id: ClusterId) -> Option<&mut Cluster> {
        self.clusters.get_mut(&id)
    }

    /// Drops every cluster whose member list is empty. Runs at the top of
    /// each activity tick so an emptied cluster never survives into the
    /// visibility pass.
    pub fn prune_empty_clusters(&mut self) {
        self.clusters.retain(|_, cluster| !cluster.member_ids.is_empty());
    }
}
