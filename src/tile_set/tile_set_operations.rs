//! Tile Set Operations - Pure DOP Functions
//!
//! Source management, tile-set geometry and per-tile terrain editing. Any
//! call that can change tile content marks the terrain index stale.

use super::tile_set_data::TileSetData;
use crate::atlas::{create_atlas_source, get_tile_record, get_tile_record_mut, AtlasSourceData};
use crate::config::{validate_config, TileSetConfig};
use crate::constants::{ALTERNATIVE_ID_WRAP, NO_TERRAIN, NO_TERRAIN_SET};
use crate::error::{OptionExt, TileSetError, TileSetResult};
use crate::geometry::{valid_peering_bits, CellNeighbor, TileOffsetAxis, TileShape};
use crate::invalidatable::Invalidatable;
use crate::source::{as_atlas, as_atlas_mut, TileSetSource};
use crate::terrain::{invalidate_terrain_index, is_terrain_in_range, TerrainPatternIndex, TerrainsPattern};
use crate::tile_identity::TileIdentity;
use crate::tile_record::tile_record_operations::{
    assign_terrain_set, clear_invalid_peering_bits, write_peering_bit,
};
use crate::tile_record::TileRecord;
use image::RgbaImage;
use std::collections::BTreeMap;

/// Create an empty tile set from a validated config
pub fn create_tile_set(config: &TileSetConfig) -> TileSetResult<TileSetData> {
    validate_config(config)?;

    Ok(TileSetData {
        geometry: config.geometry(),
        sources: BTreeMap::new(),
        next_source_id: 0,
        atlas_defaults: config.atlas.clone(),
        terrain_sets: Vec::new(),
        terrain_index: Invalidatable::new(TerrainPatternIndex::default()),
    })
}

/// Visit every record of every atlas tile
pub(crate) fn for_each_tile_record_mut<F>(data: &mut TileSetData, mut f: F)
where
    F: FnMut(&mut TileRecord),
{
    for source in data.sources.values_mut() {
        let Some(atlas) = as_atlas_mut(source) else {
            continue;
        };
        for tile in atlas.tiles.values_mut() {
            for record in tile.alternatives.values_mut() {
                f(record);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

fn compute_next_source_id(data: &mut TileSetData) {
    while data.sources.contains_key(&data.next_source_id) {
        data.next_source_id = (data.next_source_id + 1) % ALTERNATIVE_ID_WRAP;
    }
}

/// Register a source. Returns the id it was stored under.
pub fn add_source(
    data: &mut TileSetData,
    source: TileSetSource,
    id_override: Option<i32>,
) -> TileSetResult<i32> {
    let id = match id_override {
        Some(id) if id < 0 => {
            return Err(TileSetError::invalid_argument("source_id", id, "must not be negative"))
        }
        Some(id) if data.sources.contains_key(&id) => {
            return Err(TileSetError::duplicate_id("source", id))
        }
        Some(id) => id,
        None => data.next_source_id,
    };

    data.sources.insert(id, source);
    compute_next_source_id(data);
    invalidate_terrain_index(data);

    log::info!("[tile_set_operations::add_source] Added source {}", id);
    Ok(id)
}

/// Create an atlas source from the tile set's atlas defaults and add it
pub fn add_atlas_source(data: &mut TileSetData, texture: Option<RgbaImage>) -> TileSetResult<i32> {
    let atlas = create_atlas_source(&data.atlas_defaults, texture)?;
    add_source(data, TileSetSource::Atlas(atlas), None)
}

pub fn remove_source(data: &mut TileSetData, id: i32) -> TileSetResult<TileSetSource> {
    let source = data
        .sources
        .remove(&id)
        .ok_or_tile_set(|| TileSetError::not_found("source", id))?;
    invalidate_terrain_index(data);

    log::info!("[tile_set_operations::remove_source] Removed source {}", id);
    Ok(source)
}

pub fn set_source_id(data: &mut TileSetData, id: i32, new_id: i32) -> TileSetResult<()> {
    if new_id < 0 {
        return Err(TileSetError::invalid_argument("source_id", new_id, "must not be negative"));
    }
    if !data.sources.contains_key(&id) {
        return Err(TileSetError::not_found("source", id));
    }
    if id == new_id {
        return Ok(());
    }
    if data.sources.contains_key(&new_id) {
        return Err(TileSetError::duplicate_id("source", new_id));
    }

    if let Some(source) = data.sources.remove(&id) {
        data.sources.insert(new_id, source);
    }
    compute_next_source_id(data);
    invalidate_terrain_index(data);
    Ok(())
}

pub fn get_next_source_id(data: &TileSetData) -> i32 {
    data.next_source_id
}

pub fn has_source(data: &TileSetData, id: i32) -> bool {
    data.sources.contains_key(&id)
}

/// Source ids, ascending
pub fn get_source_ids(data: &TileSetData) -> Vec<i32> {
    data.sources.keys().copied().collect()
}

pub fn get_source(data: &TileSetData, id: i32) -> TileSetResult<&TileSetSource> {
    data.sources
        .get(&id)
        .ok_or_tile_set(|| TileSetError::not_found("source", id))
}

/// Mutable access to a source. Marks the terrain index stale.
pub fn get_source_mut(data: &mut TileSetData, id: i32) -> TileSetResult<&mut TileSetSource> {
    if !data.sources.contains_key(&id) {
        return Err(TileSetError::not_found("source", id));
    }
    invalidate_terrain_index(data);
    data.sources
        .get_mut(&id)
        .ok_or_tile_set(|| TileSetError::not_found("source", id))
}

fn not_an_atlas(id: i32) -> TileSetError {
    TileSetError::invalid_argument("source_id", id, "not an atlas source")
}

pub fn get_atlas_source(data: &TileSetData, id: i32) -> TileSetResult<&AtlasSourceData> {
    as_atlas(get_source(data, id)?).ok_or_else(|| not_an_atlas(id))
}

/// Mutable access to an atlas source. Marks the terrain index stale.
pub fn get_atlas_source_mut(data: &mut TileSetData, id: i32) -> TileSetResult<&mut AtlasSourceData> {
    as_atlas_mut(get_source_mut(data, id)?).ok_or_else(|| not_an_atlas(id))
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// Clear every peering bit the current geometry no longer has
fn sanitize_peering_bits(data: &mut TileSetData) {
    let masks: Vec<_> = data
        .terrain_sets
        .iter()
        .map(|set| {
            valid_peering_bits(data.geometry.tile_shape, data.geometry.tile_offset_axis, set.mode)
        })
        .collect();

    for_each_tile_record_mut(data, |record| {
        if let Some(mask) = usize::try_from(record.terrain_set).ok().and_then(|i| masks.get(i)) {
            clear_invalid_peering_bits(record, mask);
        }
    });
    invalidate_terrain_index(data);
}

pub fn set_tile_shape(data: &mut TileSetData, shape: TileShape) {
    if data.geometry.tile_shape == shape {
        return;
    }
    data.geometry.tile_shape = shape;
    sanitize_peering_bits(data);
}

pub fn set_tile_offset_axis(data: &mut TileSetData, axis: TileOffsetAxis) {
    if data.geometry.tile_offset_axis == axis {
        return;
    }
    data.geometry.tile_offset_axis = axis;
    sanitize_peering_bits(data);
}

// ---------------------------------------------------------------------------
// Per-tile terrain
// ---------------------------------------------------------------------------

pub fn get_tile_set_record<'a>(data: &'a TileSetData, tile: &TileIdentity) -> TileSetResult<&'a TileRecord> {
    let atlas = get_atlas_source(data, tile.source_id)?;
    get_tile_record(atlas, tile.coords, tile.alternative)
}

fn get_tile_set_record_mut<'a>(
    data: &'a mut TileSetData,
    tile: &TileIdentity,
) -> TileSetResult<&'a mut TileRecord> {
    let atlas = get_atlas_source_mut(data, tile.source_id)?;
    get_tile_record_mut(atlas, tile.coords, tile.alternative)
}

/// Move a tile into a terrain set (or out with -1). Changing set clears its bits.
pub fn set_tile_terrain_set(data: &mut TileSetData, tile: &TileIdentity, terrain_set: i32) -> TileSetResult<()> {
    if terrain_set < NO_TERRAIN_SET {
        return Err(TileSetError::invalid_argument("terrain_set", terrain_set, "must be >= -1"));
    }
    if terrain_set >= data.terrain_sets.len() as i32 {
        return Err(TileSetError::not_found("terrain set", terrain_set));
    }
    get_tile_set_record(data, tile)?;

    let record = get_tile_set_record_mut(data, tile)?;
    assign_terrain_set(record, terrain_set);
    Ok(())
}

/// Assign a terrain to one peering bit of a tile
///
/// The tile must already be in a terrain set, the bit must exist for that
/// set's mode in the current geometry, and the terrain must be -1 or an
/// existing terrain of the set.
pub fn set_tile_terrain_peering_bit(
    data: &mut TileSetData,
    tile: &TileIdentity,
    bit: CellNeighbor,
    terrain: i32,
) -> TileSetResult<()> {
    let terrain_set = get_tile_set_record(data, tile)?.terrain_set;
    let set = usize::try_from(terrain_set)
        .ok()
        .and_then(|i| data.terrain_sets.get(i))
        .ok_or_else(|| {
            TileSetError::invalid_argument("terrain_set", terrain_set, "tile is not in a terrain set")
        })?;

    let valid = valid_peering_bits(data.geometry.tile_shape, data.geometry.tile_offset_axis, set.mode);
    if !valid[bit.index()] {
        return Err(TileSetError::invalid_argument(
            "peering_bit",
            bit,
            "not a peering bit of this terrain set",
        ));
    }
    if terrain < NO_TERRAIN {
        return Err(TileSetError::invalid_argument("terrain", terrain, "must be >= -1"));
    }
    if !is_terrain_in_range(data, terrain_set as usize, terrain) {
        return Err(TileSetError::not_found("terrain", (terrain_set, terrain)));
    }

    let record = get_tile_set_record_mut(data, tile)?;
    write_peering_bit(record, bit, terrain);
    Ok(())
}

/// Terrain pattern a tile declares in its terrain set
pub fn get_tile_terrains_pattern(data: &TileSetData, tile: &TileIdentity) -> TileSetResult<TerrainsPattern> {
    let record = get_tile_set_record(data, tile)?;
    let set = usize::try_from(record.terrain_set)
        .ok()
        .and_then(|i| data.terrain_sets.get(i))
        .ok_or_else(|| {
            TileSetError::invalid_argument(
                "terrain_set",
                record.terrain_set,
                "tile is not in a terrain set",
            )
        })?;
    Ok(TerrainsPattern::from_record(&data.geometry, set.mode, record))
}
