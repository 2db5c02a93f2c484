//! Terrain Pattern Index Data - Pure DOP
//!
//! NO METHODS. Just data.

use super::terrains_pattern::TerrainsPattern;
use crate::tile_identity::TileIdentity;
use std::collections::{BTreeMap, BTreeSet};

/// Tiles grouped by terrain pattern, one map per terrain set
///
/// Every terrain set always holds `TileIdentity::EMPTY` under its erase
/// pattern once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TerrainPatternIndex {
    pub per_terrain_set: Vec<BTreeMap<TerrainsPattern, BTreeSet<TileIdentity>>>,
}
