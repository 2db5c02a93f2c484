//! Persistence Data - Pure DOP
//!
//! NO METHODS. Just data.
//! Serializable mirror of an atlas source's geometry and per-alternative
//! terrain data. The texture itself is not part of a snapshot.

use crate::atlas::AnimationMode;
use crate::constants::CELL_NEIGHBOR_COUNT;
use glam::IVec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeSnapshot {
    pub id: i32,
    pub terrain_set: i32,
    pub terrain_peering_bits: [i32; CELL_NEIGHBOR_COUNT],
    pub probability: f32,
    #[serde(default)]
    pub flip_h: bool,
    #[serde(default)]
    pub flip_v: bool,
    #[serde(default)]
    pub transpose: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedTileSnapshot {
    pub origin: IVec2,
    pub size_in_atlas: IVec2,
    pub animation_columns: i32,
    pub animation_separation: IVec2,
    pub animation_speed: f32,
    #[serde(default)]
    pub animation_mode: AnimationMode,
    pub frame_durations: Vec<f32>,
    /// Ascending by id
    pub alternatives: Vec<AlternativeSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtlasSourceSnapshot {
    pub margins: IVec2,
    pub separation: IVec2,
    pub texture_region_size: IVec2,
    pub use_texture_padding: bool,
    /// Row-major by origin
    pub tiles: Vec<PlacedTileSnapshot>,
}
