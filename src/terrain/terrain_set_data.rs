//! Terrain Set Data - Pure DOP
//!
//! NO METHODS. Just data.
//! All transformations happen in terrain_set_operations.rs

use crate::geometry::TerrainMode;
use serde::{Deserialize, Serialize};

/// One terrain inside a terrain set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainData {
    pub name: String,
    /// RGBA, 0..1
    pub color: [f32; 4],
}

/// A group of mutually exclusive terrains sharing one matching mode
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TerrainSetData {
    pub mode: TerrainMode,
    pub terrains: Vec<TerrainData>,
}
