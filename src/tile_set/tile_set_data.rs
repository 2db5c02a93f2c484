//! Tile Set Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in tile_set_operations.rs and the terrain
//! operations.

use crate::config::AtlasSourceConfig;
use crate::geometry::TileSetGeometry;
use crate::invalidatable::Invalidatable;
use crate::source::TileSetSource;
use crate::terrain::{TerrainPatternIndex, TerrainSetData};
use std::collections::BTreeMap;

/// Owns every source, the terrain sets and the derived terrain index
pub struct TileSetData {
    pub geometry: TileSetGeometry,

    /// Sources by id, iterated in id order
    pub sources: BTreeMap<i32, TileSetSource>,
    pub next_source_id: i32,

    /// Settings for atlas sources created through the tile set
    pub atlas_defaults: AtlasSourceConfig,

    pub terrain_sets: Vec<TerrainSetData>,

    /// Pattern -> tiles index, rebuilt on first read after any change
    pub terrain_index: Invalidatable<TerrainPatternIndex>,
}
