//! Peering bit validity - fixed lookup tables.
//!
//! Whether a bit exists depends only on (shape, offset axis, mode), never on
//! the tile carrying it.

use super::geometry_data::{CellNeighbor, TerrainMode, TileOffsetAxis, TileShape};
use crate::constants::CELL_NEIGHBOR_COUNT;

use CellNeighbor::*;

const SQUARE_SIDES: &[CellNeighbor] = &[RightSide, BottomSide, LeftSide, TopSide];
const SQUARE_CORNERS: &[CellNeighbor] = &[
    BottomRightCorner,
    BottomLeftCorner,
    TopLeftCorner,
    TopRightCorner,
];

const ISOMETRIC_SIDES: &[CellNeighbor] = &[
    BottomRightSide,
    BottomLeftSide,
    TopLeftSide,
    TopRightSide,
];
const ISOMETRIC_CORNERS: &[CellNeighbor] = &[RightCorner, BottomCorner, LeftCorner, TopCorner];

const HALF_OFFSET_HORIZONTAL_SIDES: &[CellNeighbor] = &[
    RightSide,
    BottomRightSide,
    BottomLeftSide,
    LeftSide,
    TopLeftSide,
    TopRightSide,
];
const HALF_OFFSET_HORIZONTAL_CORNERS: &[CellNeighbor] = &[
    BottomRightCorner,
    BottomCorner,
    BottomLeftCorner,
    TopLeftCorner,
    TopCorner,
    TopRightCorner,
];

const HALF_OFFSET_VERTICAL_SIDES: &[CellNeighbor] = &[
    BottomRightSide,
    BottomSide,
    BottomLeftSide,
    TopLeftSide,
    TopSide,
    TopRightSide,
];
const HALF_OFFSET_VERTICAL_CORNERS: &[CellNeighbor] = &[
    RightCorner,
    BottomRightCorner,
    BottomLeftCorner,
    LeftCorner,
    TopLeftCorner,
    TopRightCorner,
];

/// Side and corner positions that exist for a shape
pub fn neighbor_positions(
    shape: TileShape,
    offset_axis: TileOffsetAxis,
) -> (&'static [CellNeighbor], &'static [CellNeighbor]) {
    match (shape, offset_axis) {
        (TileShape::Square, _) => (SQUARE_SIDES, SQUARE_CORNERS),
        (TileShape::Isometric, _) => (ISOMETRIC_SIDES, ISOMETRIC_CORNERS),
        (_, TileOffsetAxis::Horizontal) => {
            (HALF_OFFSET_HORIZONTAL_SIDES, HALF_OFFSET_HORIZONTAL_CORNERS)
        }
        (_, TileOffsetAxis::Vertical) => (HALF_OFFSET_VERTICAL_SIDES, HALF_OFFSET_VERTICAL_CORNERS),
    }
}

/// Is `bit` a peering bit for this shape / axis / terrain mode
pub fn is_valid_peering_bit(
    shape: TileShape,
    offset_axis: TileOffsetAxis,
    mode: TerrainMode,
    bit: CellNeighbor,
) -> bool {
    let (sides, corners) = neighbor_positions(shape, offset_axis);
    let use_sides = matches!(
        mode,
        TerrainMode::MatchSides | TerrainMode::MatchCornersAndSides
    );
    let use_corners = matches!(
        mode,
        TerrainMode::MatchCorners | TerrainMode::MatchCornersAndSides
    );

    (use_sides && sides.contains(&bit)) || (use_corners && corners.contains(&bit))
}

/// Validity mask over all 16 positions
pub fn valid_peering_bits(
    shape: TileShape,
    offset_axis: TileOffsetAxis,
    mode: TerrainMode,
) -> [bool; CELL_NEIGHBOR_COUNT] {
    let mut valid = [false; CELL_NEIGHBOR_COUNT];
    for bit in CellNeighbor::ALL {
        valid[bit.index()] = is_valid_peering_bit(shape, offset_axis, mode, bit);
    }
    valid
}
