//! Persistence Operations - Pure DOP Functions
//!
//! Import never writes tile tables directly: every tile is replayed through
//! the placement and animation operations so a snapshot that breaks an
//! atlas invariant is rejected the same way a live edit would be.

use super::persistence_data::{AlternativeSnapshot, AtlasSourceSnapshot, PlacedTileSnapshot};
use crate::atlas::{
    create_alternative_tile, create_atlas_source, create_tile, get_tile_record_mut,
    set_alternative_tile_transform, set_tile_animation_columns, set_tile_animation_frame_duration,
    set_tile_animation_frames_count, set_tile_animation_mode, set_tile_animation_separation,
    set_tile_animation_speed, AtlasSourceData, PlacedTile,
};
use crate::config::AtlasSourceConfig;
use crate::constants::BASE_ALTERNATIVE;
use crate::error::{TileSetError, TileSetResult};
use crate::tile_record::{set_probability, TileRecord};
use anyhow::Context;
use glam::IVec2;
use image::RgbaImage;
use std::path::Path;

fn export_alternative(id: i32, record: &TileRecord) -> AlternativeSnapshot {
    AlternativeSnapshot {
        id,
        terrain_set: record.terrain_set,
        terrain_peering_bits: record.terrain_peering_bits,
        probability: record.probability,
        flip_h: record.flip_h,
        flip_v: record.flip_v,
        transpose: record.transpose,
    }
}

fn export_tile(origin: IVec2, tile: &PlacedTile) -> PlacedTileSnapshot {
    PlacedTileSnapshot {
        origin,
        size_in_atlas: tile.size_in_atlas,
        animation_columns: tile.animation_columns,
        animation_separation: tile.animation_separation,
        animation_speed: tile.animation_speed,
        animation_mode: tile.animation_mode,
        frame_durations: tile.animation_frames_durations.clone(),
        alternatives: tile
            .alternatives
            .iter()
            .map(|(id, record)| export_alternative(*id, record))
            .collect(),
    }
}

/// Snapshot of an atlas source, tiles in row-major order
pub fn export_atlas_source(data: &AtlasSourceData) -> AtlasSourceSnapshot {
    let tiles = data
        .tile_ids
        .iter()
        .filter_map(|origin| data.tiles.get(origin).map(|tile| export_tile(*origin, tile)))
        .collect();

    AtlasSourceSnapshot {
        margins: data.margins,
        separation: data.separation,
        texture_region_size: data.texture_region_size,
        use_texture_padding: data.use_texture_padding,
        tiles,
    }
}

fn import_alternative(
    data: &mut AtlasSourceData,
    origin: IVec2,
    alternative: &AlternativeSnapshot,
) -> TileSetResult<()> {
    if alternative.id != BASE_ALTERNATIVE {
        create_alternative_tile(data, origin, Some(alternative.id))?;
    }
    if alternative.flip_h || alternative.flip_v || alternative.transpose {
        set_alternative_tile_transform(
            data,
            origin,
            alternative.id,
            alternative.flip_h,
            alternative.flip_v,
            alternative.transpose,
        )?;
    }

    let record = get_tile_record_mut(data, origin, alternative.id)?;
    set_probability(record, alternative.probability)?;
    record.terrain_set = alternative.terrain_set;
    record.terrain_peering_bits = alternative.terrain_peering_bits;
    Ok(())
}

fn import_tile(data: &mut AtlasSourceData, tile: &PlacedTileSnapshot) -> TileSetResult<()> {
    let origin = tile.origin;
    create_tile(data, origin, tile.size_in_atlas)?;

    // With a single frame, columns and separation can't collide with
    // anything, so the frame count is the only step that can fail on layout.
    set_tile_animation_columns(data, origin, tile.animation_columns)?;
    set_tile_animation_separation(data, origin, tile.animation_separation)?;
    set_tile_animation_frames_count(data, origin, tile.frame_durations.len())?;
    for (frame, duration) in tile.frame_durations.iter().enumerate() {
        set_tile_animation_frame_duration(data, origin, frame, *duration)?;
    }
    set_tile_animation_speed(data, origin, tile.animation_speed)?;
    set_tile_animation_mode(data, origin, tile.animation_mode)?;

    for alternative in &tile.alternatives {
        import_alternative(data, origin, alternative)?;
    }
    Ok(())
}

/// Rebuild an atlas source from a snapshot through the public operations
pub fn import_atlas_source(
    snapshot: &AtlasSourceSnapshot,
    texture: Option<RgbaImage>,
) -> TileSetResult<AtlasSourceData> {
    let config = AtlasSourceConfig {
        margins: snapshot.margins,
        separation: snapshot.separation,
        texture_region_size: snapshot.texture_region_size,
        use_texture_padding: snapshot.use_texture_padding,
    };
    let mut data = create_atlas_source(&config, texture)?;

    for tile in &snapshot.tiles {
        import_tile(&mut data, tile)?;
    }

    log::debug!(
        "[persistence_operations::import_atlas_source] Imported {} tiles",
        snapshot.tiles.len()
    );
    Ok(data)
}

pub fn snapshot_to_json(snapshot: &AtlasSourceSnapshot) -> TileSetResult<String> {
    serde_json::to_string_pretty(snapshot).map_err(|e| TileSetError::Serialization {
        context: "atlas source snapshot".to_string(),
        error: e.to_string(),
    })
}

pub fn snapshot_from_json(json: &str) -> TileSetResult<AtlasSourceSnapshot> {
    serde_json::from_str(json).map_err(|e| TileSetError::Serialization {
        context: "atlas source snapshot".to_string(),
        error: e.to_string(),
    })
}

/// Write a snapshot as JSON
pub fn save_snapshot(path: impl AsRef<Path>, snapshot: &AtlasSourceSnapshot) -> anyhow::Result<()> {
    let path = path.as_ref();
    let json = snapshot_to_json(snapshot)?;
    std::fs::write(path, json)
        .with_context(|| format!("writing atlas snapshot {}", path.display()))?;
    log::info!(
        "[persistence_operations::save_snapshot] Saved {} tiles to {}",
        snapshot.tiles.len(),
        path.display()
    );
    Ok(())
}

pub fn load_snapshot(path: impl AsRef<Path>) -> anyhow::Result<AtlasSourceSnapshot> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading atlas snapshot {}", path.display()))?;
    let snapshot = snapshot_from_json(&json)
        .with_context(|| format!("parsing atlas snapshot {}", path.display()))?;
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::{get_tile_record, move_tile_in_atlas};
    use crate::geometry::CellNeighbor;

    fn sample_atlas() -> AtlasSourceData {
        let config = AtlasSourceConfig {
            margins: IVec2::new(1, 1),
            separation: IVec2::new(2, 2),
            ..Default::default()
        };
        let mut atlas = create_atlas_source(&config, Some(RgbaImage::new(128, 128)))
            .expect("Failed to create atlas");

        create_tile(&mut atlas, IVec2::new(0, 0), IVec2::new(2, 1)).expect("Failed to create tile");
        set_tile_animation_columns(&mut atlas, IVec2::ZERO, 1).expect("valid columns");
        set_tile_animation_frames_count(&mut atlas, IVec2::ZERO, 3).expect("room for frames");
        set_tile_animation_frame_duration(&mut atlas, IVec2::ZERO, 2, 0.25).expect("frame exists");

        create_tile(&mut atlas, IVec2::new(3, 1), IVec2::ONE).expect("Failed to create tile");
        let alt = create_alternative_tile(&mut atlas, IVec2::new(3, 1), Some(4)).expect("free id");
        set_alternative_tile_transform(&mut atlas, IVec2::new(3, 1), alt, true, false, false)
            .expect("non-base alternative");
        let record = get_tile_record_mut(&mut atlas, IVec2::new(3, 1), alt).expect("record exists");
        record.terrain_set = 0;
        record.terrain_peering_bits[CellNeighbor::TopSide.index()] = 2;
        record.probability = 0.5;

        move_tile_in_atlas(&mut atlas, IVec2::new(3, 1), Some(IVec2::new(2, 0)), None)
            .expect("Failed to move tile");
        atlas
    }

    #[test]
    fn test_round_trip_through_json() {
        let atlas = sample_atlas();
        let snapshot = export_atlas_source(&atlas);
        assert_eq!(snapshot.tiles.len(), 2);
        assert_eq!(snapshot.tiles[1].origin, IVec2::new(2, 0));

        let json = snapshot_to_json(&snapshot).expect("Failed to serialize");
        let parsed = snapshot_from_json(&json).expect("Failed to parse");
        let restored = import_atlas_source(&parsed, Some(RgbaImage::new(128, 128)))
            .expect("Failed to import");

        assert_eq!(restored.coords_mapping_cache, atlas.coords_mapping_cache);
        assert_eq!(restored.tile_ids, atlas.tile_ids);
        assert_eq!(restored.tiles, atlas.tiles);
        assert_eq!(export_atlas_source(&restored), snapshot);

        let record = get_tile_record(&restored, IVec2::new(2, 0), 4).expect("alternative restored");
        assert!(record.flip_h);
        assert_eq!(record.terrain_peering_bits[CellNeighbor::TopSide.index()], 2);
    }

    #[test]
    fn test_overlapping_snapshot_rejected() {
        let mut snapshot = export_atlas_source(&sample_atlas());
        snapshot.tiles[1].origin = IVec2::new(1, 0);
        let result = import_atlas_source(&snapshot, Some(RgbaImage::new(128, 128)));
        assert!(matches!(result, Err(TileSetError::InvalidPlacement(_))));
    }

    #[test]
    fn test_bad_values_rejected() {
        let mut snapshot = export_atlas_source(&sample_atlas());
        snapshot.tiles[0].alternatives[0].flip_v = true;
        assert!(import_atlas_source(&snapshot, Some(RgbaImage::new(128, 128))).is_err());

        let mut snapshot = export_atlas_source(&sample_atlas());
        snapshot.tiles[1].alternatives[0].probability = -1.0;
        assert!(matches!(
            import_atlas_source(&snapshot, Some(RgbaImage::new(128, 128))),
            Err(TileSetError::InvalidArgument { .. })
        ));

        assert!(matches!(snapshot_from_json("{\"tiles\": 3}"), Err(TileSetError::Serialization { .. })));
    }

    #[test]
    fn test_snapshot_file() {
        let snapshot = export_atlas_source(&sample_atlas());
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("atlas.json");

        save_snapshot(&path, &snapshot).expect("Failed to save snapshot");
        assert_eq!(load_snapshot(&path).expect("Failed to load snapshot"), snapshot);
        assert!(load_snapshot(dir.path().join("missing.json")).is_err());
    }
}
