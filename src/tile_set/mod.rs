//! Tile Set
//!
//! Owns the sources, the tile-set geometry, the terrain sets and the lazily
//! rebuilt terrain pattern index.

// Data structures
pub mod tile_set_data;
// Pure functions
pub mod tile_set_operations;
// Shared handle for embedders
pub mod shared;

pub use shared::{create_shared_tile_set, snapshot_terrain_index, SharedTileSet};
pub use tile_set_data::TileSetData;
pub use tile_set_operations::{
    add_atlas_source, add_source, create_tile_set, get_atlas_source, get_atlas_source_mut,
    get_next_source_id, get_source, get_source_ids, get_source_mut, get_tile_set_record,
    get_tile_terrains_pattern, has_source, remove_source, set_source_id, set_tile_offset_axis,
    set_tile_shape, set_tile_terrain_peering_bit, set_tile_terrain_set,
};
