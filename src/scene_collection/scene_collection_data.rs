//! Scene Collection Data - Pure DOP
//!
//! NO METHODS. Just data.

use std::collections::BTreeMap;

/// One scene offered as a tile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneTile {
    pub scene_path: String,
    /// Show a placeholder instead of the instanced scene in editors
    pub display_placeholder: bool,
}

/// Scene-backed source. Every scene sits at atlas coords (0, 0) and is
/// addressed by its scene id, which plays the role of the alternative id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneCollectionSourceData {
    pub scenes: BTreeMap<i32, SceneTile>,
    pub next_scene_id: i32,
}
