//! Tile Record Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in tile_record_operations.rs

use crate::constants::{CELL_NEIGHBOR_COUNT, DEFAULT_PROBABILITY, NO_TERRAIN, NO_TERRAIN_SET};
use glam::IVec2;

/// Per-alternative data of a placed tile
#[derive(Debug, Clone, PartialEq)]
pub struct TileRecord {
    /// Terrain set this tile takes part in, -1 for none
    pub terrain_set: i32,
    /// Terrain per peering bit, -1 for unset. Indexed by `CellNeighbor::index`.
    pub terrain_peering_bits: [i32; CELL_NEIGHBOR_COUNT],
    /// Relative weight when picked among tiles sharing a terrain pattern
    pub probability: f32,

    // Rendering payload, carried but not interpreted here
    pub flip_h: bool,
    pub flip_v: bool,
    pub transpose: bool,
    pub texture_origin: IVec2,
    pub modulate: [f32; 4],
    pub z_index: i32,
}

impl Default for TileRecord {
    fn default() -> Self {
        Self {
            terrain_set: NO_TERRAIN_SET,
            terrain_peering_bits: [NO_TERRAIN; CELL_NEIGHBOR_COUNT],
            probability: DEFAULT_PROBABILITY,
            flip_h: false,
            flip_v: false,
            transpose: false,
            texture_origin: IVec2::ZERO,
            modulate: [1.0, 1.0, 1.0, 1.0],
            z_index: 0,
        }
    }
}
