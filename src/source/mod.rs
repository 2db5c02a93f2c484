//! Tile set sources: a closed union of atlas and scene-collection sources.

pub mod source_data;
pub mod source_operations;

pub use source_data::TileSetSource;
pub use source_operations::{
    as_atlas, as_atlas_mut, as_scene_collection, as_scene_collection_mut, enumerate_tiles,
    TileSource,
};
