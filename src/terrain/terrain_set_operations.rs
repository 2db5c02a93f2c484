//! Terrain Set Operations - Pure DOP Functions
//!
//! Terrain sets and terrains are addressed by position. Inserting, moving or
//! removing one shifts the positions of others, so every tile record that
//! refers to a shifted position is rewritten in the same call. References to
//! a removed entry become -1.

use super::terrain_index_operations::invalidate_terrain_index;
use super::terrain_set_data::{TerrainData, TerrainSetData};
use crate::constants::{NO_TERRAIN, NO_TERRAIN_SET};
use crate::error::{TileSetError, TileSetResult};
use crate::geometry::{valid_peering_bits, TerrainMode};
use crate::tile_record::tile_record_operations::{
    assign_terrain_set, clear_invalid_peering_bits, remap_peering_bits,
};
use crate::tile_set::tile_set_operations::for_each_tile_record_mut;
use crate::tile_set::TileSetData;

/// Colors handed to new terrains, cycled by position
const TERRAIN_PALETTE: [[f32; 4]; 8] = [
    [0.85, 0.25, 0.25, 1.0],
    [0.25, 0.65, 0.25, 1.0],
    [0.25, 0.4, 0.85, 1.0],
    [0.85, 0.75, 0.2, 1.0],
    [0.6, 0.3, 0.75, 1.0],
    [0.2, 0.7, 0.7, 1.0],
    [0.9, 0.5, 0.15, 1.0],
    [0.55, 0.55, 0.55, 1.0],
];

/// New position of an index after the entry at `from` moves to `to`
fn shifted_by_move(index: usize, from: usize, to: usize) -> usize {
    if index == from {
        to
    } else if from < to && index > from && index <= to {
        index - 1
    } else if to < from && index >= to && index < from {
        index + 1
    } else {
        index
    }
}

fn check_terrain_set(data: &TileSetData, terrain_set: usize) -> TileSetResult<()> {
    if terrain_set >= data.terrain_sets.len() {
        return Err(TileSetError::not_found("terrain set", terrain_set));
    }
    Ok(())
}

fn check_terrain(data: &TileSetData, terrain_set: usize, terrain: usize) -> TileSetResult<()> {
    check_terrain_set(data, terrain_set)?;
    if terrain >= data.terrain_sets[terrain_set].terrains.len() {
        return Err(TileSetError::not_found("terrain", (terrain_set, terrain)));
    }
    Ok(())
}

fn check_insert_position(position: usize, len: usize, field: &str) -> TileSetResult<()> {
    if position > len {
        return Err(TileSetError::invalid_argument(
            field,
            position,
            &format!("must be <= {}", len),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Terrain sets
// ---------------------------------------------------------------------------

pub fn get_terrain_sets_count(data: &TileSetData) -> usize {
    data.terrain_sets.len()
}

/// Insert an empty terrain set, at the end when `position` is `None`
pub fn add_terrain_set(data: &mut TileSetData, position: Option<usize>) -> usize {
    let position = position
        .unwrap_or(data.terrain_sets.len())
        .min(data.terrain_sets.len());
    data.terrain_sets.insert(position, TerrainSetData::default());

    let shift_from = position as i32;
    for_each_tile_record_mut(data, |record| {
        if record.terrain_set >= shift_from {
            record.terrain_set += 1;
        }
    });
    invalidate_terrain_index(data);
    position
}

pub fn move_terrain_set(data: &mut TileSetData, from: usize, to: usize) -> TileSetResult<()> {
    check_terrain_set(data, from)?;
    check_terrain_set(data, to)?;
    if from == to {
        return Ok(());
    }

    let terrain_set = data.terrain_sets.remove(from);
    data.terrain_sets.insert(to, terrain_set);
    for_each_tile_record_mut(data, |record| {
        if record.terrain_set >= 0 {
            record.terrain_set = shifted_by_move(record.terrain_set as usize, from, to) as i32;
        }
    });
    invalidate_terrain_index(data);
    Ok(())
}

/// Remove a terrain set; tiles using it leave terrain matching
pub fn remove_terrain_set(data: &mut TileSetData, terrain_set: usize) -> TileSetResult<TerrainSetData> {
    check_terrain_set(data, terrain_set)?;
    let removed = data.terrain_sets.remove(terrain_set);

    let removed_index = terrain_set as i32;
    for_each_tile_record_mut(data, |record| {
        if record.terrain_set == removed_index {
            assign_terrain_set(record, NO_TERRAIN_SET);
        } else if record.terrain_set > removed_index {
            record.terrain_set -= 1;
        }
    });
    invalidate_terrain_index(data);
    Ok(removed)
}

/// Change the matching mode, clearing bits the new mode doesn't have
pub fn set_terrain_set_mode(
    data: &mut TileSetData,
    terrain_set: usize,
    mode: TerrainMode,
) -> TileSetResult<()> {
    check_terrain_set(data, terrain_set)?;
    data.terrain_sets[terrain_set].mode = mode;

    let valid = valid_peering_bits(data.geometry.tile_shape, data.geometry.tile_offset_axis, mode);
    let target = terrain_set as i32;
    for_each_tile_record_mut(data, |record| {
        if record.terrain_set == target {
            clear_invalid_peering_bits(record, &valid);
        }
    });
    invalidate_terrain_index(data);
    Ok(())
}

pub fn get_terrain_set_mode(data: &TileSetData, terrain_set: usize) -> TileSetResult<TerrainMode> {
    check_terrain_set(data, terrain_set)?;
    Ok(data.terrain_sets[terrain_set].mode)
}

// ---------------------------------------------------------------------------
// Terrains
// ---------------------------------------------------------------------------

pub fn get_terrains_count(data: &TileSetData, terrain_set: usize) -> TileSetResult<usize> {
    check_terrain_set(data, terrain_set)?;
    Ok(data.terrain_sets[terrain_set].terrains.len())
}

/// Insert a terrain, at the end when `position` is `None`. Returns its position.
pub fn add_terrain(
    data: &mut TileSetData,
    terrain_set: usize,
    position: Option<usize>,
    name: &str,
) -> TileSetResult<usize> {
    check_terrain_set(data, terrain_set)?;
    let terrains = &mut data.terrain_sets[terrain_set].terrains;
    let position = position.unwrap_or(terrains.len());
    check_insert_position(position, terrains.len(), "terrain position")?;

    let color = TERRAIN_PALETTE[terrains.len() % TERRAIN_PALETTE.len()];
    terrains.insert(
        position,
        TerrainData {
            name: name.to_string(),
            color,
        },
    );

    let target = terrain_set as i32;
    for_each_tile_record_mut(data, |record| {
        if record.terrain_set == target {
            remap_peering_bits(record, |t| Some(if t >= position { t + 1 } else { t }));
        }
    });
    invalidate_terrain_index(data);
    Ok(position)
}

pub fn move_terrain(
    data: &mut TileSetData,
    terrain_set: usize,
    from: usize,
    to: usize,
) -> TileSetResult<()> {
    check_terrain(data, terrain_set, from)?;
    check_terrain(data, terrain_set, to)?;
    if from == to {
        return Ok(());
    }

    let terrains = &mut data.terrain_sets[terrain_set].terrains;
    let terrain = terrains.remove(from);
    terrains.insert(to, terrain);

    let target = terrain_set as i32;
    for_each_tile_record_mut(data, |record| {
        if record.terrain_set == target {
            remap_peering_bits(record, |t| Some(shifted_by_move(t, from, to)));
        }
    });
    invalidate_terrain_index(data);
    Ok(())
}

/// Remove a terrain; peering bits using it become -1
pub fn remove_terrain(
    data: &mut TileSetData,
    terrain_set: usize,
    terrain: usize,
) -> TileSetResult<TerrainData> {
    check_terrain(data, terrain_set, terrain)?;
    let removed = data.terrain_sets[terrain_set].terrains.remove(terrain);

    let target = terrain_set as i32;
    for_each_tile_record_mut(data, |record| {
        if record.terrain_set == target {
            remap_peering_bits(record, |t| match t {
                t if t == terrain => None,
                t if t > terrain => Some(t - 1),
                t => Some(t),
            });
        }
    });
    invalidate_terrain_index(data);
    Ok(removed)
}

pub fn set_terrain_name(
    data: &mut TileSetData,
    terrain_set: usize,
    terrain: usize,
    name: &str,
) -> TileSetResult<()> {
    check_terrain(data, terrain_set, terrain)?;
    data.terrain_sets[terrain_set].terrains[terrain].name = name.to_string();
    Ok(())
}

pub fn set_terrain_color(
    data: &mut TileSetData,
    terrain_set: usize,
    terrain: usize,
    color: [f32; 4],
) -> TileSetResult<()> {
    check_terrain(data, terrain_set, terrain)?;
    data.terrain_sets[terrain_set].terrains[terrain].color = color;
    Ok(())
}

pub fn get_terrain(data: &TileSetData, terrain_set: usize, terrain: usize) -> TileSetResult<&TerrainData> {
    check_terrain(data, terrain_set, terrain)?;
    Ok(&data.terrain_sets[terrain_set].terrains[terrain])
}

/// Is `terrain` an acceptable peering value in `terrain_set` (-1 or an existing terrain)
pub fn is_terrain_in_range(data: &TileSetData, terrain_set: usize, terrain: i32) -> bool {
    terrain == NO_TERRAIN
        || (terrain >= 0
            && data
                .terrain_sets
                .get(terrain_set)
                .is_some_and(|set| (terrain as usize) < set.terrains.len()))
}
