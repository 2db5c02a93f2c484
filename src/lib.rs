// Tile Atlas - Data-Oriented Programming (DOP) Architecture
//
// An atlas of tiles carved from a packed texture, plus a terrain pattern
// index for autotiling lookups.
// - *_data modules hold plain data
// - *_operations modules hold the pure functions that transform it
//
// For new code, prefer:
// - tile_set::TileSetData as the single owner of sources and terrain sets
// - atlas operations for placement and animation layout
// - terrain operations for pattern queries and weighted selection

// Constants module
pub mod constants;

// Core modules
pub mod config;
pub mod error;
pub mod invalidatable;

// Value types and tables
pub mod geometry;
pub mod tile_identity;
pub mod tile_record;

// Sources
pub mod atlas;
pub mod scene_collection;
pub mod source;

// Terrain and the owning tile set
pub mod terrain;
pub mod tile_set;

// Utilities
pub mod persistence;

// Re-export commonly used types
pub use atlas::{AtlasSourceData, PackedRect, PlacedTile};
pub use config::{load_config, parse_config, AtlasSourceConfig, TileSetConfig};
pub use error::{OptionExt, TileSetError, TileSetResult};
pub use geometry::{CellNeighbor, TerrainMode, TileOffsetAxis, TileSetGeometry, TileShape};
pub use invalidatable::Invalidatable;
pub use source::{TileSetSource, TileSource};
pub use terrain::{TerrainPatternIndex, TerrainsPattern};
pub use tile_identity::TileIdentity;
pub use tile_record::TileRecord;
pub use tile_set::{create_shared_tile_set, create_tile_set, SharedTileSet, TileSetData};

// Re-export glam types for convenience
pub use glam::IVec2;
