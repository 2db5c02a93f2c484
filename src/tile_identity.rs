//! Tile identity - (source, atlas coords, alternative) composite key.

use crate::constants::{INVALID_ATLAS_COORDS, INVALID_SOURCE, INVALID_TILE_ALTERNATIVE};
use glam::IVec2;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Identifies one alternative of one tile in one source
///
/// `Ord` compares the raw tuple (source, x, y, alternative) and is what
/// map/set keys use. [`cmp_row_major`] gives the row-major order used when
/// serializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileIdentity {
    pub source_id: i32,
    pub coords: IVec2,
    pub alternative: i32,
}

impl TileIdentity {
    /// The "no tile" identity, used for the synthetic empty cell of each terrain set
    pub const EMPTY: TileIdentity = TileIdentity {
        source_id: INVALID_SOURCE,
        coords: INVALID_ATLAS_COORDS,
        alternative: INVALID_TILE_ALTERNATIVE,
    };

    pub const fn new(source_id: i32, coords: IVec2, alternative: i32) -> Self {
        Self {
            source_id,
            coords,
            alternative,
        }
    }

    pub fn is_empty_cell(&self) -> bool {
        self.source_id == INVALID_SOURCE || self.coords == INVALID_ATLAS_COORDS
    }
}

impl Default for TileIdentity {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Ord for TileIdentity {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.source_id, self.coords.x, self.coords.y, self.alternative).cmp(&(
            other.source_id,
            other.coords.x,
            other.coords.y,
            other.alternative,
        ))
    }
}

impl PartialOrd for TileIdentity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Row-major coordinate order: y, then x
pub fn cmp_coords_row_major(a: IVec2, b: IVec2) -> Ordering {
    (a.y, a.x).cmp(&(b.y, b.x))
}

/// Row-major order over identities, ties broken by source then alternative
pub fn cmp_row_major(a: &TileIdentity, b: &TileIdentity) -> Ordering {
    cmp_coords_row_major(a.coords, b.coords)
        .then(a.source_id.cmp(&b.source_id))
        .then(a.alternative.cmp(&b.alternative))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_identity() {
        assert!(TileIdentity::EMPTY.is_empty_cell());
        assert!(!TileIdentity::new(0, IVec2::ZERO, 0).is_empty_cell());
        assert_eq!(TileIdentity::default(), TileIdentity::EMPTY);
    }

    #[test]
    fn test_key_order_is_raw_tuple() {
        let a = TileIdentity::new(0, IVec2::new(1, 0), 0);
        let b = TileIdentity::new(0, IVec2::new(0, 1), 0);
        // x before y in the raw tuple
        assert!(b < a);
        assert!(TileIdentity::EMPTY < b);
    }

    #[test]
    fn test_row_major_order() {
        let a = TileIdentity::new(0, IVec2::new(1, 0), 0);
        let b = TileIdentity::new(0, IVec2::new(0, 1), 0);
        assert_eq!(cmp_row_major(&a, &b), Ordering::Less);

        let mut ids = vec![b, a];
        ids.sort_by(cmp_row_major);
        assert_eq!(ids, vec![a, b]);
    }
}
