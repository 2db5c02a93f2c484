//! Per-alternative tile data.

pub mod tile_record_data;
pub mod tile_record_operations;

pub use tile_record_data::TileRecord;
pub use tile_record_operations::{create_tile_record, set_probability};
