//! Weighted random selection among tiles sharing a terrain pattern.

use super::terrain_index_operations::settle_terrain_index;
use super::terrains_pattern::TerrainsPattern;
use crate::constants::DEFAULT_PROBABILITY;
use crate::error::{TileSetError, TileSetResult};
use crate::source::{as_atlas, TileSetSource};
use crate::tile_identity::TileIdentity;
use crate::tile_set::TileSetData;
use rand::Rng;
use std::collections::BTreeMap;

/// Pick from `(item, weight)` pairs with a draw `r` in `[0, total]`
///
/// Walks the entries in order, returning the first whose running weight
/// reaches `r`. Falls back to the last entry if rounding leaves `r` above
/// the final sum. `None` only for an empty slice.
///
/// Sums in `f64`: any number of finite `f32` weights stays finite.
pub fn select_weighted<T: Copy>(entries: &[(T, f32)], r: f64) -> Option<T> {
    let mut cumulative = 0.0f64;
    for (item, weight) in entries {
        cumulative += f64::from(*weight);
        if cumulative >= r {
            return Some(*item);
        }
    }
    entries.last().map(|(item, _)| *item)
}

/// Selection weight of a tile: its probability, or 1.0 for the empty cell
/// and for tiles that can't be resolved
pub fn tile_weight(sources: &BTreeMap<i32, TileSetSource>, tile: &TileIdentity) -> f32 {
    if tile.is_empty_cell() {
        return DEFAULT_PROBABILITY;
    }
    sources
        .get(&tile.source_id)
        .and_then(as_atlas)
        .and_then(|atlas| atlas.tiles.get(&tile.coords))
        .and_then(|placed| placed.alternatives.get(&tile.alternative))
        .map_or(DEFAULT_PROBABILITY, |record| record.probability)
}

/// Matching tiles with their weights, in index order
pub fn weighted_matches(
    data: &mut TileSetData,
    terrain_set: i32,
    pattern: &TerrainsPattern,
) -> TileSetResult<Vec<(TileIdentity, f32)>> {
    let (index, sources) = settle_terrain_index(data);
    let map = usize::try_from(terrain_set)
        .ok()
        .and_then(|i| index.per_terrain_set.get(i))
        .ok_or_else(|| TileSetError::not_found("terrain set", terrain_set))?;

    Ok(map
        .get(pattern)
        .map(|tiles| {
            tiles
                .iter()
                .map(|tile| (*tile, tile_weight(sources, tile)))
                .collect()
        })
        .unwrap_or_default())
}

/// Deterministic selection with a caller-supplied draw in `[0, total]`
pub fn select_tile_from_terrains_pattern(
    data: &mut TileSetData,
    terrain_set: i32,
    pattern: &TerrainsPattern,
    r: f64,
) -> TileSetResult<TileIdentity> {
    let entries = weighted_matches(data, terrain_set, pattern)?;
    select_weighted(&entries, r).ok_or(TileSetError::EmptyMatch { terrain_set })
}

/// Random tile matching `pattern`, weighted by tile probability
pub fn get_random_tile_from_terrains_pattern<R: Rng>(
    data: &mut TileSetData,
    terrain_set: i32,
    pattern: &TerrainsPattern,
    rng: &mut R,
) -> TileSetResult<TileIdentity> {
    let entries = weighted_matches(data, terrain_set, pattern)?;
    if entries.is_empty() {
        return Err(TileSetError::EmptyMatch { terrain_set });
    }

    let total: f64 = entries.iter().map(|(_, weight)| f64::from(*weight)).sum();
    let r = rng.gen_range(0.0..=total);
    select_weighted(&entries, r).ok_or(TileSetError::EmptyMatch { terrain_set })
}
