//! Simulation core for the macrodata refinement panel: the tile grid, the
//! procedurally generated bad-cluster partition over it, and the per-tick
//! activity state machine that spotlights one cluster at a time. Everything
//! here is renderer-agnostic; `mdr_panel` layers screen-space geometry and
//! interaction on top.

pub mod activity;
pub mod cluster;
pub mod grid;
pub mod noise_field;
pub mod rng;
pub mod tile;

pub use activity::ActivityEngine;
pub use cluster::{Cluster, ClusterId, BIN_COUNT};
pub use grid::{GridConfig, TileGrid};
pub use noise_field::NoiseField;
pub use rng::{RandomSource, SimRng};
pub use tile::{Tile, TileId};
