//! Terrain Pattern Index Operations - Pure DOP Functions
//!
//! The index is derived data: it is rebuilt wholesale from the atlas sources
//! on the first read after any change and never patched in place.

use super::terrain_index_data::TerrainPatternIndex;
use super::terrain_set_data::TerrainSetData;
use super::terrains_pattern::TerrainsPattern;
use crate::error::{TileSetError, TileSetResult};
use crate::geometry::TileSetGeometry;
use crate::source::{as_atlas, TileSetSource};
use crate::tile_identity::TileIdentity;
use crate::tile_record::TileRecord;
use crate::tile_set::TileSetData;
use std::collections::{BTreeMap, BTreeSet};

static NO_MATCH: BTreeSet<TileIdentity> = BTreeSet::new();

/// Copy of `record` with out-of-range terrains cleared
fn sanitized_record(record: &TileRecord, terrains_count: usize, tile: &TileIdentity) -> TileRecord {
    let mut clean = record.clone();
    for terrain in clean.terrain_peering_bits.iter_mut() {
        if *terrain >= terrains_count as i32 {
            log::warn!(
                "[terrain_index_operations::build_terrain_index] Tile {:?} references terrain {} of {}, treated as unset",
                tile,
                terrain,
                terrains_count
            );
            *terrain = -1;
        }
    }
    clean
}

/// Build the index from scratch
///
/// Only atlas sources take part. Tiles pointing at a terrain set that
/// doesn't exist are skipped and out-of-range terrains are cleared, so the
/// build never fails.
pub fn build_terrain_index(
    sources: &BTreeMap<i32, TileSetSource>,
    terrain_sets: &[TerrainSetData],
    geometry: &TileSetGeometry,
) -> TerrainPatternIndex {
    let mut per_terrain_set = vec![BTreeMap::new(); terrain_sets.len()];
    let mut indexed = 0usize;

    for (source_id, source) in sources {
        let Some(atlas) = as_atlas(source) else {
            continue;
        };
        for origin in &atlas.tile_ids {
            let Some(tile) = atlas.tiles.get(origin) else {
                continue;
            };
            for (alternative, record) in &tile.alternatives {
                if record.terrain_set < 0 {
                    continue;
                }
                let identity = TileIdentity::new(*source_id, *origin, *alternative);
                let Some(terrain_set) = terrain_sets.get(record.terrain_set as usize) else {
                    log::warn!(
                        "[terrain_index_operations::build_terrain_index] Tile {:?} uses missing terrain set {}, skipped",
                        identity,
                        record.terrain_set
                    );
                    continue;
                };

                let record = sanitized_record(record, terrain_set.terrains.len(), &identity);
                let pattern = TerrainsPattern::from_record(geometry, terrain_set.mode, &record);
                if pattern.is_erase_pattern() {
                    continue;
                }
                per_terrain_set[record.terrain_set as usize]
                    .entry(pattern)
                    .or_insert_with(BTreeSet::new)
                    .insert(identity);
                indexed += 1;
            }
        }
    }

    for (map, terrain_set) in per_terrain_set.iter_mut().zip(terrain_sets) {
        map.entry(TerrainsPattern::for_terrain_set(geometry, terrain_set.mode))
            .or_insert_with(BTreeSet::new)
            .insert(TileIdentity::EMPTY);
    }

    log::debug!(
        "[terrain_index_operations::build_terrain_index] Indexed {} tiles across {} terrain sets",
        indexed,
        terrain_sets.len()
    );
    TerrainPatternIndex { per_terrain_set }
}

/// Mark the index stale
pub fn invalidate_terrain_index(data: &mut TileSetData) {
    data.terrain_index.invalidate();
}

/// Rebuild if stale; returns the index alongside the sources it was built from
pub(crate) fn settle_terrain_index(
    data: &mut TileSetData,
) -> (&TerrainPatternIndex, &BTreeMap<i32, TileSetSource>) {
    let TileSetData {
        sources,
        terrain_sets,
        geometry,
        terrain_index,
        ..
    } = data;
    let index = terrain_index
        .get_or_rebuild(|| build_terrain_index(&*sources, terrain_sets.as_slice(), &*geometry));
    (index, &*sources)
}

/// The up to date index
pub fn get_terrain_index(data: &mut TileSetData) -> &TerrainPatternIndex {
    settle_terrain_index(data).0
}

fn terrain_set_map(
    index: &TerrainPatternIndex,
    terrain_set: i32,
) -> TileSetResult<&BTreeMap<TerrainsPattern, BTreeSet<TileIdentity>>> {
    usize::try_from(terrain_set)
        .ok()
        .and_then(|i| index.per_terrain_set.get(i))
        .ok_or_else(|| TileSetError::not_found("terrain set", terrain_set))
}

/// Tiles matching `pattern` exactly; empty when nothing matches
pub fn get_tiles_for_pattern<'a>(
    data: &'a mut TileSetData,
    terrain_set: i32,
    pattern: &TerrainsPattern,
) -> TileSetResult<&'a BTreeSet<TileIdentity>> {
    let map = terrain_set_map(get_terrain_index(data), terrain_set)?;
    Ok(map.get(pattern).unwrap_or(&NO_MATCH))
}

/// Distinct patterns present in a terrain set, ascending
pub fn get_patterns(data: &mut TileSetData, terrain_set: i32) -> TileSetResult<Vec<TerrainsPattern>> {
    let map = terrain_set_map(get_terrain_index(data), terrain_set)?;
    Ok(map.keys().copied().collect())
}
