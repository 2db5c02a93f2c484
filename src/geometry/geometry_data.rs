//! Tile Geometry Data - Pure DOP
//!
//! NO METHODS beyond index helpers. Just data.
//! Validity rules live in geometry_operations.rs

use crate::constants::DEFAULT_TILE_SIZE;
use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Shape of a tile in the owning tile set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileShape {
    #[default]
    Square,
    Isometric,
    HalfOffsetSquare,
    Hexagon,
}

/// Axis along which half-offset and hexagon rows are shifted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileOffsetAxis {
    #[default]
    Horizontal,
    Vertical,
}

/// Which neighbor relations a terrain set matches on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerrainMode {
    #[default]
    MatchCornersAndSides,
    MatchCorners,
    MatchSides,
}

/// Peering bit positions, clockwise from the right side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum CellNeighbor {
    RightSide = 0,
    RightCorner = 1,
    BottomRightSide = 2,
    BottomRightCorner = 3,
    BottomSide = 4,
    BottomCorner = 5,
    BottomLeftSide = 6,
    BottomLeftCorner = 7,
    LeftSide = 8,
    LeftCorner = 9,
    TopLeftSide = 10,
    TopLeftCorner = 11,
    TopSide = 12,
    TopCorner = 13,
    TopRightSide = 14,
    TopRightCorner = 15,
}

impl CellNeighbor {
    pub const ALL: [CellNeighbor; 16] = [
        CellNeighbor::RightSide,
        CellNeighbor::RightCorner,
        CellNeighbor::BottomRightSide,
        CellNeighbor::BottomRightCorner,
        CellNeighbor::BottomSide,
        CellNeighbor::BottomCorner,
        CellNeighbor::BottomLeftSide,
        CellNeighbor::BottomLeftCorner,
        CellNeighbor::LeftSide,
        CellNeighbor::LeftCorner,
        CellNeighbor::TopLeftSide,
        CellNeighbor::TopLeftCorner,
        CellNeighbor::TopSide,
        CellNeighbor::TopCorner,
        CellNeighbor::TopRightSide,
        CellNeighbor::TopRightCorner,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Sides sit at even positions, corners at odd ones
    #[inline]
    pub fn is_side(self) -> bool {
        self.index() % 2 == 0
    }

    #[inline]
    pub fn is_corner(self) -> bool {
        !self.is_side()
    }

    /// Position across the tile
    #[inline]
    pub fn opposite(self) -> Self {
        Self::ALL[(self.index() + 8) % 16]
    }
}

/// Tile-set wide geometry every terrain pattern is derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileSetGeometry {
    pub tile_shape: TileShape,
    pub tile_offset_axis: TileOffsetAxis,
    /// Size of a cell in the rendered map, in pixels
    pub tile_size: IVec2,
}

impl Default for TileSetGeometry {
    fn default() -> Self {
        Self {
            tile_shape: TileShape::Square,
            tile_offset_axis: TileOffsetAxis::Horizontal,
            tile_size: DEFAULT_TILE_SIZE,
        }
    }
}
