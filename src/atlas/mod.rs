//! Atlas Tile Grid
//!
//! A texture cut into a regular grid of cells. Each tile occupies a
//! rectangle of cells, may be animated across further cells, and owns its
//! alternatives. The reverse cache maps every covered cell back to the origin
//! of its tile.

pub mod alternative_operations;
pub mod animation_operations;
pub mod atlas_data;
pub mod atlas_operations;
pub mod padding_operations;

pub use alternative_operations::{
    create_alternative_tile, get_alternative_ids, get_next_alternative_tile_id, get_tile_record,
    get_tile_record_mut, has_alternative_tile, remove_alternative_tile, set_alternative_tile_id,
    set_alternative_tile_transform,
};
pub use animation_operations::{
    get_tile_animation_frame_duration, get_tile_animation_frames_count,
    get_tile_animation_total_duration, set_tile_animation_columns,
    set_tile_animation_frame_duration, set_tile_animation_frames_count, set_tile_animation_mode,
    set_tile_animation_separation, set_tile_animation_speed,
};
pub use atlas_data::{AnimationMode, AtlasSourceData, FramePlacement, PackedRect, PlacedTile};
pub use atlas_operations::{
    clear_tiles_outside_texture, create_atlas_source, create_tile, frame_coords,
    get_atlas_grid_size, get_tile, get_tile_at_coords, get_tile_id, get_tile_size_in_atlas,
    get_tile_texture_region, get_tiles_count, get_tiles_to_be_removed_on_change, has_room_for_tile,
    has_tile, has_tiles_outside_texture, move_tile_in_atlas, rebuild_coords_mapping_cache,
    remove_tile, set_margins, set_separation, set_texture, set_texture_region_size,
    set_use_texture_padding,
};
pub use padding_operations::{
    get_runtime_texture, get_runtime_tile_texture_region, synthesize_padded_texture,
    update_padded_texture,
};
