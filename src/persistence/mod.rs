//! Persistence Module
//!
//! JSON snapshots of atlas sources.

// Data modules
pub mod persistence_data;

// Operations modules
pub mod persistence_operations;

pub use persistence_data::{AlternativeSnapshot, AtlasSourceSnapshot, PlacedTileSnapshot};
pub use persistence_operations::{
    export_atlas_source, import_atlas_source, load_snapshot, save_snapshot, snapshot_from_json,
    snapshot_to_json,
};
