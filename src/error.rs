//! Error handling for the tile atlas.
//!
//! Every failure is local and recoverable. Operations validate completely
//! before mutating, so an `Err` always means nothing changed.

use thiserror::Error;

/// Main error type for atlas, terrain and tile set operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TileSetError {
    /// Geometry check failed (overlap, out of grid)
    #[error("Invalid placement: {0}")]
    InvalidPlacement(String),

    #[error("Not found: {resource_type} '{id}'")]
    NotFound { resource_type: String, id: String },

    #[error("Duplicate id: {resource_type} '{id}'")]
    DuplicateId { resource_type: String, id: String },

    #[error("Invalid argument: {field} = {value} ({reason})")]
    InvalidArgument {
        field: String,
        value: String,
        reason: String,
    },

    #[error("No tile matches the requested pattern in terrain set {terrain_set}")]
    EmptyMatch { terrain_set: i32 },

    #[error("Serialization error in {context}: {error}")]
    Serialization { context: String, error: String },

    #[error("Invalid config: {0}")]
    Config(String),
}

/// Type alias for Results in the tile atlas
pub type TileSetResult<T> = Result<T, TileSetError>;

impl TileSetError {
    pub fn not_found(resource_type: &str, id: impl std::fmt::Debug) -> Self {
        TileSetError::NotFound {
            resource_type: resource_type.to_string(),
            id: format!("{:?}", id),
        }
    }

    pub fn duplicate_id(resource_type: &str, id: impl std::fmt::Debug) -> Self {
        TileSetError::DuplicateId {
            resource_type: resource_type.to_string(),
            id: format!("{:?}", id),
        }
    }

    pub fn invalid_argument(field: &str, value: impl std::fmt::Debug, reason: &str) -> Self {
        TileSetError::InvalidArgument {
            field: field.to_string(),
            value: format!("{:?}", value),
            reason: reason.to_string(),
        }
    }
}

/// Convert Option to Result with context
pub trait OptionExt<T> {
    fn ok_or_tile_set<F>(self, f: F) -> TileSetResult<T>
    where
        F: FnOnce() -> TileSetError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_tile_set<F>(self, f: F) -> TileSetResult<T>
    where
        F: FnOnce() -> TileSetError,
    {
        self.ok_or_else(f)
    }
}
