//! Terrain pattern value type.
//!
//! A pattern is the terrain assigned to each of the 16 peering positions.
//! Which positions exist is fixed at construction from the tile shape, offset
//! axis and terrain mode; values at positions that don't exist are ignored by
//! ordering, equality and hashing.

use crate::constants::{CELL_NEIGHBOR_COUNT, NO_TERRAIN};
use crate::error::{TileSetError, TileSetResult};
use crate::geometry::{valid_peering_bits, CellNeighbor, TerrainMode, TileSetGeometry};
use crate::tile_record::TileRecord;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, Copy)]
pub struct TerrainsPattern {
    valid_bit: [bool; CELL_NEIGHBOR_COUNT],
    bits: [i32; CELL_NEIGHBOR_COUNT],
    not_empty_terrains_count: usize,
}

impl TerrainsPattern {
    /// Empty (erase) pattern over the given validity mask
    pub fn new(valid_bit: [bool; CELL_NEIGHBOR_COUNT]) -> Self {
        Self {
            valid_bit,
            bits: [NO_TERRAIN; CELL_NEIGHBOR_COUNT],
            not_empty_terrains_count: 0,
        }
    }

    /// Empty pattern for a terrain set using `mode` in this geometry
    pub fn for_terrain_set(geometry: &TileSetGeometry, mode: TerrainMode) -> Self {
        Self::new(valid_peering_bits(
            geometry.tile_shape,
            geometry.tile_offset_axis,
            mode,
        ))
    }

    /// Pattern read from a record's peering bits. Bits that don't exist in
    /// this geometry are dropped.
    pub fn from_record(geometry: &TileSetGeometry, mode: TerrainMode, record: &TileRecord) -> Self {
        let mut pattern = Self::for_terrain_set(geometry, mode);
        for (i, terrain) in record.terrain_peering_bits.iter().enumerate() {
            if pattern.valid_bit[i] && *terrain >= 0 {
                pattern.write(i, *terrain);
            }
        }
        pattern
    }

    fn write(&mut self, index: usize, terrain: i32) {
        let was_set = self.bits[index] >= 0;
        let is_set = terrain >= 0;
        match (was_set, is_set) {
            (false, true) => self.not_empty_terrains_count += 1,
            (true, false) => self.not_empty_terrains_count -= 1,
            _ => {}
        }
        self.bits[index] = terrain;
    }

    pub fn is_valid_bit(&self, bit: CellNeighbor) -> bool {
        self.valid_bit[bit.index()]
    }

    pub fn valid_bits(&self) -> &[bool; CELL_NEIGHBOR_COUNT] {
        &self.valid_bit
    }

    pub fn set_terrain(&mut self, bit: CellNeighbor, terrain: i32) -> TileSetResult<()> {
        if !self.is_valid_bit(bit) {
            return Err(TileSetError::invalid_argument(
                "peering_bit",
                bit,
                "not a peering bit of this terrain set",
            ));
        }
        if terrain < NO_TERRAIN {
            return Err(TileSetError::invalid_argument(
                "terrain",
                terrain,
                "must be >= -1",
            ));
        }
        self.write(bit.index(), terrain);
        Ok(())
    }

    pub fn get_terrain(&self, bit: CellNeighbor) -> TileSetResult<i32> {
        if !self.is_valid_bit(bit) {
            return Err(TileSetError::invalid_argument(
                "peering_bit",
                bit,
                "not a peering bit of this terrain set",
            ));
        }
        Ok(self.bits[bit.index()])
    }

    /// True when no valid bit carries a terrain
    pub fn is_erase_pattern(&self) -> bool {
        self.not_empty_terrains_count == 0
    }

    /// Terrains of the valid bits, in position order
    pub fn get_terrains_as_array(&self) -> Vec<i32> {
        self.bits
            .iter()
            .zip(self.valid_bit.iter())
            .filter(|(_, valid)| **valid)
            .map(|(terrain, _)| *terrain)
            .collect()
    }

    /// Inverse of [`TerrainsPattern::get_terrains_as_array`]
    ///
    /// Validated fully before anything is written.
    pub fn set_terrains_from_array(&mut self, terrains: &[i32]) -> TileSetResult<()> {
        let valid_count = self.valid_bit.iter().filter(|v| **v).count();
        if terrains.len() != valid_count {
            return Err(TileSetError::invalid_argument(
                "terrains",
                terrains.len(),
                &format!("expected {} values, one per valid peering bit", valid_count),
            ));
        }
        if let Some(bad) = terrains.iter().find(|t| **t < NO_TERRAIN) {
            return Err(TileSetError::invalid_argument("terrain", bad, "must be >= -1"));
        }

        let valid_indices: Vec<usize> = (0..CELL_NEIGHBOR_COUNT)
            .filter(|i| self.valid_bit[*i])
            .collect();
        for (index, terrain) in valid_indices.into_iter().zip(terrains.iter()) {
            self.write(index, *terrain);
        }
        Ok(())
    }

    fn masked_bits(&self) -> impl Iterator<Item = i32> + '_ {
        self.bits
            .iter()
            .zip(self.valid_bit.iter())
            .filter(|(_, valid)| **valid)
            .map(|(terrain, _)| *terrain)
    }
}

impl Ord for TerrainsPattern {
    /// Validity masks first, then terrains at valid positions
    fn cmp(&self, other: &Self) -> Ordering {
        self.valid_bit
            .cmp(&other.valid_bit)
            .then_with(|| self.masked_bits().cmp(other.masked_bits()))
    }
}

impl PartialOrd for TerrainsPattern {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for TerrainsPattern {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TerrainsPattern {}

impl Hash for TerrainsPattern {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.valid_bit.hash(state);
        for terrain in self.masked_bits() {
            terrain.hash(state);
        }
    }
}
