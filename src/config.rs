//! Tile set and atlas configuration.
//!
//! Loaded from TOML. Every field has a default, so a partial file such as
//!
//! ```toml
//! tile_shape = "isometric"
//!
//! [atlas]
//! texture_region_size = [32, 16]
//! use_texture_padding = false
//! ```
//!
//! is valid.

use crate::constants::{DEFAULT_TEXTURE_REGION_SIZE, DEFAULT_TILE_SIZE};
use crate::error::{TileSetError, TileSetResult};
use crate::geometry::{TileOffsetAxis, TileSetGeometry, TileShape};
use anyhow::Context;
use glam::IVec2;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a new atlas source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasSourceConfig {
    /// Pixels skipped at the top-left of the texture
    pub margins: IVec2,
    /// Pixels between two cells
    pub separation: IVec2,
    /// Size of one cell, in pixels
    pub texture_region_size: IVec2,
    /// Generate a padded texture to avoid filtering bleed
    pub use_texture_padding: bool,
}

impl Default for AtlasSourceConfig {
    fn default() -> Self {
        Self {
            margins: IVec2::ZERO,
            separation: IVec2::ZERO,
            texture_region_size: DEFAULT_TEXTURE_REGION_SIZE,
            use_texture_padding: true,
        }
    }
}

/// Configuration for a new tile set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileSetConfig {
    pub tile_shape: TileShape,
    pub tile_offset_axis: TileOffsetAxis,
    pub tile_size: IVec2,
    /// Defaults for atlas sources created from this config
    pub atlas: AtlasSourceConfig,
}

impl Default for TileSetConfig {
    fn default() -> Self {
        Self {
            tile_shape: TileShape::Square,
            tile_offset_axis: TileOffsetAxis::Horizontal,
            tile_size: DEFAULT_TILE_SIZE,
            atlas: AtlasSourceConfig::default(),
        }
    }
}

impl TileSetConfig {
    pub fn geometry(&self) -> TileSetGeometry {
        TileSetGeometry {
            tile_shape: self.tile_shape,
            tile_offset_axis: self.tile_offset_axis,
            tile_size: self.tile_size,
        }
    }
}

/// Parse a TOML config string and validate it
pub fn parse_config(text: &str) -> TileSetResult<TileSetConfig> {
    let config: TileSetConfig =
        toml::from_str(text).map_err(|e| TileSetError::Config(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Load and validate a TOML config file
pub fn load_config(path: impl AsRef<Path>) -> anyhow::Result<TileSetConfig> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading tile set config {}", path.display()))?;
    let config = parse_config(&text)
        .with_context(|| format!("parsing tile set config {}", path.display()))?;
    log::info!("[config::load_config] Loaded tile set config from {}", path.display());
    Ok(config)
}

pub fn validate_config(config: &TileSetConfig) -> TileSetResult<()> {
    if config.tile_size.x <= 0 || config.tile_size.y <= 0 {
        return Err(TileSetError::invalid_argument(
            "tile_size",
            config.tile_size,
            "must be positive",
        ));
    }
    validate_atlas_source_config(&config.atlas)
}

pub fn validate_atlas_source_config(config: &AtlasSourceConfig) -> TileSetResult<()> {
    validate_margins(config.margins)?;
    validate_separation(config.separation)?;
    validate_texture_region_size(config.texture_region_size)
}

pub fn validate_margins(margins: IVec2) -> TileSetResult<()> {
    if margins.x < 0 || margins.y < 0 {
        return Err(TileSetError::invalid_argument(
            "margins",
            margins,
            "must not be negative",
        ));
    }
    Ok(())
}

pub fn validate_separation(separation: IVec2) -> TileSetResult<()> {
    if separation.x < 0 || separation.y < 0 {
        return Err(TileSetError::invalid_argument(
            "separation",
            separation,
            "must not be negative",
        ));
    }
    Ok(())
}

pub fn validate_texture_region_size(size: IVec2) -> TileSetResult<()> {
    if size.x <= 0 || size.y <= 0 {
        return Err(TileSetError::invalid_argument(
            "texture_region_size",
            size,
            "must be positive",
        ));
    }
    Ok(())
}
