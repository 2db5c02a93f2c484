//! Tile geometry: shapes, offset axes, terrain modes and peering bit tables.

pub mod geometry_data;
pub mod geometry_operations;

pub use geometry_data::{CellNeighbor, TerrainMode, TileOffsetAxis, TileSetGeometry, TileShape};
pub use geometry_operations::{is_valid_peering_bit, neighbor_positions, valid_peering_bits};
