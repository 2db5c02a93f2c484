//! Atlas Source Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in the atlas *_operations.rs files

use crate::invalidatable::Invalidatable;
use crate::tile_record::TileRecord;
use glam::IVec2;
use image::RgbaImage;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Rectangle in texture pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackedRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// How a tile's animation starts when instanced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationMode {
    #[default]
    Default,
    RandomStartTimes,
}

/// One tile placed in the atlas grid, keyed by its origin cell
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedTile {
    /// Footprint in cells, at least (1, 1)
    pub size_in_atlas: IVec2,

    // Animation layout: frame `f` sits at
    // origin + (size + separation) * (f % columns, f / columns), or (f, 0) when columns == 0
    pub animation_columns: i32,
    pub animation_separation: IVec2,
    pub animation_speed: f32,
    pub animation_mode: AnimationMode,
    pub animation_frames_durations: Vec<f32>,

    pub alternatives: BTreeMap<i32, TileRecord>,
    pub next_alternative_id: i32,
}

/// Where one animation frame is copied from and to during padding synthesis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramePlacement {
    pub source: PackedRect,
    /// Top-left of the frame interior in the padded texture
    pub destination_x: u32,
    pub destination_y: u32,
}

/// Atlas source data - a texture cut into a grid of cells hosting tiles
pub struct AtlasSourceData {
    pub texture: Option<RgbaImage>,

    pub margins: IVec2,
    pub separation: IVec2,
    pub texture_region_size: IVec2,
    pub use_texture_padding: bool,

    /// Placed tiles by origin
    pub tiles: FxHashMap<IVec2, PlacedTile>,
    /// Tile origins, row-major
    pub tile_ids: Vec<IVec2>,

    /// Every covered cell (all frames) -> origin of the covering tile
    pub coords_mapping_cache: FxHashMap<IVec2, IVec2>,

    /// Texture with 1px replicated borders around every frame
    pub padded_texture: Invalidatable<Option<RgbaImage>>,
}
