//! Tile Set Source Data - Pure DOP
//!
//! NO METHODS. Just data.

use crate::atlas::AtlasSourceData;
use crate::scene_collection::SceneCollectionSourceData;

/// The two kinds of source a tile set can hold
pub enum TileSetSource {
    Atlas(AtlasSourceData),
    SceneCollection(SceneCollectionSourceData),
}
