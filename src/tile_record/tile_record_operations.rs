//! Tile Record Operations - Pure DOP Functions
//!
//! Raw reads and writes on a single record. Checks that need tile set
//! context (bit validity, terrain ranges) happen in the tile_set and terrain
//! modules before these are called.

use super::tile_record_data::TileRecord;
use crate::constants::{CELL_NEIGHBOR_COUNT, NO_TERRAIN};
use crate::error::{TileSetError, TileSetResult};
use crate::geometry::CellNeighbor;

/// Create a record with default values
pub fn create_tile_record() -> TileRecord {
    TileRecord::default()
}

/// Set the selection weight
pub fn set_probability(record: &mut TileRecord, probability: f32) -> TileSetResult<()> {
    if !probability.is_finite() || probability < 0.0 {
        return Err(TileSetError::invalid_argument(
            "probability",
            probability,
            "must be a finite value >= 0",
        ));
    }
    record.probability = probability;
    Ok(())
}

/// Switch terrain set, clearing every peering bit when it changes
pub fn assign_terrain_set(record: &mut TileRecord, terrain_set: i32) {
    if record.terrain_set == terrain_set {
        return;
    }
    record.terrain_set = terrain_set;
    clear_peering_bits(record);
}

pub fn clear_peering_bits(record: &mut TileRecord) {
    record.terrain_peering_bits = [NO_TERRAIN; CELL_NEIGHBOR_COUNT];
}

pub fn write_peering_bit(record: &mut TileRecord, bit: CellNeighbor, terrain: i32) {
    record.terrain_peering_bits[bit.index()] = terrain;
}

pub fn peering_bit(record: &TileRecord, bit: CellNeighbor) -> i32 {
    record.terrain_peering_bits[bit.index()]
}

/// True when at least one peering bit carries a terrain
pub fn has_any_terrain(record: &TileRecord) -> bool {
    record.terrain_peering_bits.iter().any(|t| *t >= 0)
}

/// Reset bits the current geometry/mode no longer allows
pub fn clear_invalid_peering_bits(record: &mut TileRecord, valid_bits: &[bool; CELL_NEIGHBOR_COUNT]) {
    for (value, valid) in record.terrain_peering_bits.iter_mut().zip(valid_bits.iter()) {
        if !*valid {
            *value = NO_TERRAIN;
        }
    }
}

/// Rewrite terrain indices through `remap`; `None` clears the bit
pub fn remap_peering_bits<F>(record: &mut TileRecord, remap: F)
where
    F: Fn(usize) -> Option<usize>,
{
    for value in record.terrain_peering_bits.iter_mut() {
        if *value >= 0 {
            *value = remap(*value as usize).map_or(NO_TERRAIN, |t| t as i32);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probability_rejects_negative() {
        let mut record = create_tile_record();
        assert!(set_probability(&mut record, -0.5).is_err());
        assert!(set_probability(&mut record, f32::NAN).is_err());
        assert_eq!(record.probability, 1.0);
        set_probability(&mut record, 0.0).expect("zero weight is allowed");
        assert_eq!(record.probability, 0.0);
    }

    #[test]
    fn test_terrain_set_change_clears_bits() {
        let mut record = create_tile_record();
        assign_terrain_set(&mut record, 0);
        write_peering_bit(&mut record, CellNeighbor::RightSide, 2);
        assign_terrain_set(&mut record, 0);
        assert_eq!(peering_bit(&record, CellNeighbor::RightSide), 2);

        assign_terrain_set(&mut record, 1);
        assert!(!has_any_terrain(&record));
    }

    #[test]
    fn test_remap_drops_removed_terrain() {
        let mut record = create_tile_record();
        write_peering_bit(&mut record, CellNeighbor::RightSide, 0);
        write_peering_bit(&mut record, CellNeighbor::TopSide, 1);
        write_peering_bit(&mut record, CellNeighbor::LeftSide, 2);

        // remove terrain 1
        remap_peering_bits(&mut record, |t| match t {
            1 => None,
            t if t > 1 => Some(t - 1),
            t => Some(t),
        });
        assert_eq!(peering_bit(&record, CellNeighbor::RightSide), 0);
        assert_eq!(peering_bit(&record, CellNeighbor::TopSide), -1);
        assert_eq!(peering_bit(&record, CellNeighbor::LeftSide), 1);
    }
}
