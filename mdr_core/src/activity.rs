use std::collections::BTreeSet;

use crate::cluster::ClusterId;
use crate::grid::TileGrid;
use crate::rng::RandomSource;

/// Pulse ceiling an active cluster grows toward.
const SCALE_MAX: f64 = 0.23;
/// Hard ceiling while a super-active cluster keeps climbing.
const SCALE_SUPER_MAX: f64 = 0.24;
/// Per-tick nudge applied instead of the max-reached transition while the
/// cluster is super-active below the hard ceiling.
const SUPER_NUDGE: f64 = 0.00001;

/// Per-tick state machine that rotates the single spotlighted cluster:
/// prune, visibility, deactivation, cooldown-gated selection, pulse update.
/// Visibility flags are read here, produced by the panel's viewport pass
/// earlier in the same frame.
pub struct ActivityEngine {
    visible: BTreeSet<ClusterId>,
    active: Option<ClusterId>,
    cooldown: u32,
}

impl Default for ActivityEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivityEngine {
    pub fn new() -> Self {
        Self {
            visible: BTreeSet::new(),
            active: None,
            // First selection waits out the startup cooldown.
            cooldown: 500,
        }
    }

    pub fn active_cluster(&self) -> Option<ClusterId> {
        self.active
    }

    pub fn visible_clusters(&self) -> &BTreeSet<ClusterId> {
        &self.visible
    }

    pub fn cooldown(&self) -> u32 {
        self.cooldown
    }

    pub fn tick(&mut self, grid: &mut TileGrid, rng: &mut dyn RandomSource) {
        grid.prune_empty_clusters();

        // Visibility pass: a cluster is visible when any member tile is.
        self.visible.clear();
        let mut active_still_visible = false;
        for (&cluster_id, cluster) in grid.clusters() {
            for &member in &cluster.member_ids {
                let Some(tile) = grid.tile(member) else {
                    continue;
                };
                if tile.display.visible {
                    self.visible.insert(cluster_id);
                    if cluster.is_active && Some(cluster_id) == self.active && !cluster.refined {
                        active_still_visible = true;
                    }
                }
            }
        }

        if self.active.is_some() && !active_still_visible {
            self.active = None;
            self.cooldown = roll_cooldown(rng);
        }

        let mut newly_active = None;
        if self.active.is_none() && !self.visible.is_empty() && self.cooldown == 0 {
            let index = rng.uniform_int(0, self.visible.len() as i32 - 1) as usize;
            let chosen = self.visible.iter().nth(index).copied();
            self.active = chosen;
            newly_active = chosen;
        }

        // Pulse update, in id order. The active id is read live so a
        // mid-loop deactivation is seen by the clusters that follow.
        let cluster_ids: Vec<ClusterId> = grid.clusters().keys().copied().collect();
        for cluster_id in cluster_ids {
            let active_id = self.active;
            let Some(cluster) = grid.cluster_mut(cluster_id) else {
                continue;
            };
            cluster.is_active = Some(cluster_id) == active_id;
            if !cluster.is_active {
                cluster.scale = 0.0;
                continue;
            }

            if Some(cluster_id) == newly_active {
                cluster.scale = 0.0;
                continue;
            }

            let step = 0.0001 * f64::from(rng.uniform_int(1, 10));
            if !cluster.reached_max {
                if cluster.scale < SCALE_MAX {
                    cluster.scale += step;
                }
            } else {
                cluster.scale -= step;
            }

            if cluster.scale >= SCALE_MAX {
                if !cluster.super_active || cluster.scale >= SCALE_SUPER_MAX {
                    cluster.reached_max = true;
                } else {
                    cluster.scale += SUPER_NUDGE;
                }
            } else if cluster.scale <= 0.0 {
                cluster.is_active = false;
                cluster.super_active = false;
                cluster.reached_max = false;
                self.active = None;
                self.cooldown = roll_cooldown(rng);
            }
        }

        if self.cooldown > 0 {
            self.cooldown -= 1;
        }
    }
}

fn roll_cooldown(rng: &mut dyn RandomSource) -> u32 {
    rng.uniform_int(5, 15) as u32 * 100
}
