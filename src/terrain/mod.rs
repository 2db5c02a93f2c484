//! Terrain sets, terrain patterns and the pattern -> tiles index.

pub mod selection_operations;
pub mod terrain_index_data;
pub mod terrain_index_operations;
pub mod terrain_set_data;
pub mod terrain_set_operations;
pub mod terrains_pattern;

pub use selection_operations::{
    get_random_tile_from_terrains_pattern, select_tile_from_terrains_pattern, select_weighted,
    tile_weight, weighted_matches,
};
pub use terrain_index_data::TerrainPatternIndex;
pub use terrain_index_operations::{
    build_terrain_index, get_patterns, get_terrain_index, get_tiles_for_pattern,
    invalidate_terrain_index,
};
pub use terrain_set_data::{TerrainData, TerrainSetData};
pub use terrain_set_operations::{
    add_terrain, add_terrain_set, get_terrain, get_terrain_set_mode, get_terrain_sets_count,
    get_terrains_count, is_terrain_in_range, move_terrain, move_terrain_set, remove_terrain,
    remove_terrain_set, set_terrain_color, set_terrain_name, set_terrain_set_mode,
};
pub use terrains_pattern::TerrainsPattern;
