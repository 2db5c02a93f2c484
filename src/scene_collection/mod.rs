//! Scene-backed tile source.

pub mod scene_collection_data;
pub mod scene_collection_operations;

pub use scene_collection_data::{SceneCollectionSourceData, SceneTile};
pub use scene_collection_operations::{
    create_scene_collection_source, create_scene_tile, get_next_scene_tile_id, get_scene_tile,
    remove_scene_tile, set_scene_tile_display_placeholder, set_scene_tile_id, set_scene_tile_scene,
};
