//! Tile Set Source Operations
//!
//! `TileSource` is the capability surface shared by every source kind:
//! enumerate tiles, then enumerate the alternatives of each tile.

use super::source_data::TileSetSource;
use crate::atlas::{AtlasSourceData, get_alternative_ids};
use crate::scene_collection::SceneCollectionSourceData;
use glam::IVec2;

pub trait TileSource {
    fn tile_count(&self) -> usize;
    fn tile_id_at(&self, index: usize) -> Option<IVec2>;
    fn alternative_count(&self, coords: IVec2) -> usize;
    fn alternative_id_at(&self, coords: IVec2, index: usize) -> Option<i32>;
    fn has_tile(&self, coords: IVec2) -> bool;
    fn has_alternative(&self, coords: IVec2, alternative: i32) -> bool;
}

impl TileSource for AtlasSourceData {
    fn tile_count(&self) -> usize {
        self.tile_ids.len()
    }

    fn tile_id_at(&self, index: usize) -> Option<IVec2> {
        self.tile_ids.get(index).copied()
    }

    fn alternative_count(&self, coords: IVec2) -> usize {
        self.tiles.get(&coords).map_or(0, |tile| tile.alternatives.len())
    }

    fn alternative_id_at(&self, coords: IVec2, index: usize) -> Option<i32> {
        get_alternative_ids(self, coords).ok()?.get(index).copied()
    }

    fn has_tile(&self, coords: IVec2) -> bool {
        self.tiles.contains_key(&coords)
    }

    fn has_alternative(&self, coords: IVec2, alternative: i32) -> bool {
        self.tiles
            .get(&coords)
            .is_some_and(|tile| tile.alternatives.contains_key(&alternative))
    }
}

// A scene collection exposes a single tile at (0, 0) whose alternatives are
// the scene ids.
impl TileSource for SceneCollectionSourceData {
    fn tile_count(&self) -> usize {
        1
    }

    fn tile_id_at(&self, index: usize) -> Option<IVec2> {
        (index == 0).then_some(IVec2::ZERO)
    }

    fn alternative_count(&self, coords: IVec2) -> usize {
        if coords == IVec2::ZERO {
            self.scenes.len()
        } else {
            0
        }
    }

    fn alternative_id_at(&self, coords: IVec2, index: usize) -> Option<i32> {
        if coords != IVec2::ZERO {
            return None;
        }
        self.scenes.keys().nth(index).copied()
    }

    fn has_tile(&self, coords: IVec2) -> bool {
        coords == IVec2::ZERO
    }

    fn has_alternative(&self, coords: IVec2, alternative: i32) -> bool {
        coords == IVec2::ZERO && self.scenes.contains_key(&alternative)
    }
}

impl TileSource for TileSetSource {
    fn tile_count(&self) -> usize {
        match self {
            TileSetSource::Atlas(atlas) => atlas.tile_count(),
            TileSetSource::SceneCollection(scenes) => scenes.tile_count(),
        }
    }

    fn tile_id_at(&self, index: usize) -> Option<IVec2> {
        match self {
            TileSetSource::Atlas(atlas) => atlas.tile_id_at(index),
            TileSetSource::SceneCollection(scenes) => scenes.tile_id_at(index),
        }
    }

    fn alternative_count(&self, coords: IVec2) -> usize {
        match self {
            TileSetSource::Atlas(atlas) => atlas.alternative_count(coords),
            TileSetSource::SceneCollection(scenes) => scenes.alternative_count(coords),
        }
    }

    fn alternative_id_at(&self, coords: IVec2, index: usize) -> Option<i32> {
        match self {
            TileSetSource::Atlas(atlas) => atlas.alternative_id_at(coords, index),
            TileSetSource::SceneCollection(scenes) => scenes.alternative_id_at(coords, index),
        }
    }

    fn has_tile(&self, coords: IVec2) -> bool {
        match self {
            TileSetSource::Atlas(atlas) => TileSource::has_tile(atlas, coords),
            TileSetSource::SceneCollection(scenes) => TileSource::has_tile(scenes, coords),
        }
    }

    fn has_alternative(&self, coords: IVec2, alternative: i32) -> bool {
        match self {
            TileSetSource::Atlas(atlas) => atlas.has_alternative(coords, alternative),
            TileSetSource::SceneCollection(scenes) => scenes.has_alternative(coords, alternative),
        }
    }
}

pub fn as_atlas(source: &TileSetSource) -> Option<&AtlasSourceData> {
    match source {
        TileSetSource::Atlas(atlas) => Some(atlas),
        TileSetSource::SceneCollection(_) => None,
    }
}

pub fn as_atlas_mut(source: &mut TileSetSource) -> Option<&mut AtlasSourceData> {
    match source {
        TileSetSource::Atlas(atlas) => Some(atlas),
        TileSetSource::SceneCollection(_) => None,
    }
}

pub fn as_scene_collection(source: &TileSetSource) -> Option<&SceneCollectionSourceData> {
    match source {
        TileSetSource::SceneCollection(scenes) => Some(scenes),
        TileSetSource::Atlas(_) => None,
    }
}

pub fn as_scene_collection_mut(
    source: &mut TileSetSource,
) -> Option<&mut SceneCollectionSourceData> {
    match source {
        TileSetSource::SceneCollection(scenes) => Some(scenes),
        TileSetSource::Atlas(_) => None,
    }
}

/// Every (coords, alternative) pair a source exposes, in traversal order
pub fn enumerate_tiles(source: &dyn TileSource) -> Vec<(IVec2, i32)> {
    let mut out = Vec::new();
    for tile_index in 0..source.tile_count() {
        let Some(coords) = source.tile_id_at(tile_index) else {
            continue;
        };
        for alt_index in 0..source.alternative_count(coords) {
            if let Some(alternative) = source.alternative_id_at(coords, alt_index) {
                out.push((coords, alternative));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::{create_alternative_tile, create_atlas_source, create_tile};
    use crate::config::AtlasSourceConfig;
    use crate::scene_collection::{create_scene_collection_source, create_scene_tile};
    use image::RgbaImage;

    #[test]
    fn test_atlas_capabilities() {
        let mut atlas =
            create_atlas_source(&AtlasSourceConfig::default(), Some(RgbaImage::new(64, 64)))
                .expect("Failed to create atlas");
        create_tile(&mut atlas, IVec2::new(1, 1), IVec2::ONE).expect("Failed to create tile");
        create_tile(&mut atlas, IVec2::new(2, 0), IVec2::ONE).expect("Failed to create tile");
        create_alternative_tile(&mut atlas, IVec2::new(1, 1), Some(4)).expect("free id");

        let source = TileSetSource::Atlas(atlas);
        assert_eq!(source.tile_count(), 2);
        assert_eq!(source.tile_id_at(0), Some(IVec2::new(2, 0)));
        assert_eq!(source.alternative_count(IVec2::new(1, 1)), 2);
        assert_eq!(source.alternative_id_at(IVec2::new(1, 1), 1), Some(4));
        assert!(source.has_alternative(IVec2::new(1, 1), 4));
        assert_eq!(
            enumerate_tiles(&source),
            vec![(IVec2::new(2, 0), 0), (IVec2::new(1, 1), 0), (IVec2::new(1, 1), 4)]
        );
        assert!(as_atlas(&source).is_some());
        assert!(as_scene_collection(&source).is_none());
    }

    #[test]
    fn test_scene_collection_capabilities() {
        let mut scenes = create_scene_collection_source();
        create_scene_tile(&mut scenes, "res://a.tscn", None).expect("allocates");
        create_scene_tile(&mut scenes, "res://b.tscn", Some(3)).expect("free id");

        let source = TileSetSource::SceneCollection(scenes);
        assert_eq!(source.tile_count(), 1);
        assert_eq!(source.tile_id_at(1), None);
        assert_eq!(source.alternative_count(IVec2::ZERO), 2);
        assert_eq!(source.alternative_count(IVec2::ONE), 0);
        assert_eq!(source.alternative_id_at(IVec2::ZERO, 1), Some(3));
        assert!(source.has_tile(IVec2::ZERO));
        assert!(as_atlas(&source).is_none());
    }
}
