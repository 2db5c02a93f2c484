//! Shared constants for the tile atlas and terrain index.

/// Source id used when a cell holds no tile.
pub const INVALID_SOURCE: i32 = -1;

/// Atlas coordinates used when a cell holds no tile.
pub const INVALID_ATLAS_COORDS: glam::IVec2 = glam::IVec2::new(-1, -1);

/// Alternative id used when a cell holds no tile.
pub const INVALID_TILE_ALTERNATIVE: i32 = -1;

/// Terrain value meaning "no terrain assigned".
pub const NO_TERRAIN: i32 = -1;

/// Terrain set value meaning "tile takes no part in terrain matching".
pub const NO_TERRAIN_SET: i32 = -1;

/// Number of peering bit positions carried by every tile.
pub const CELL_NEIGHBOR_COUNT: usize = 16;

/// Alternative and scene ids wrap around at this bound when allocated.
pub const ALTERNATIVE_ID_WRAP: i32 = 1_073_741_823;

/// Alternative 0 is the base tile, present on every placed tile.
pub const BASE_ALTERNATIVE: i32 = 0;

pub const DEFAULT_PROBABILITY: f32 = 1.0;
pub const DEFAULT_FRAME_DURATION: f32 = 1.0;
pub const DEFAULT_ANIMATION_SPEED: f32 = 1.0;
pub const DEFAULT_TEXTURE_REGION_SIZE: glam::IVec2 = glam::IVec2::new(16, 16);
pub const DEFAULT_TILE_SIZE: glam::IVec2 = glam::IVec2::new(16, 16);

/// Border, in pixels, added on each side of a frame in the padded texture.
pub const TEXTURE_PADDING: i32 = 1;
