//! Tile animation operations.
//!
//! Columns, separation and frame count decide which cells a tile covers, so
//! changing any of them is validated like a resize before it is committed.

use super::atlas_data::{AnimationMode, AtlasSourceData};
use super::atlas_operations::{check_room_for_tile, get_tile, get_tile_mut, recache_tile};
use super::padding_operations::queue_padded_texture_update;
use crate::constants::DEFAULT_FRAME_DURATION;
use crate::error::{TileSetError, TileSetResult};
use glam::IVec2;

/// Validate a new frame layout for the tile at `origin`, then commit it
fn apply_frame_layout(
    data: &mut AtlasSourceData,
    origin: IVec2,
    columns: i32,
    separation: IVec2,
    frames_count: usize,
) -> TileSetResult<()> {
    let size = get_tile(data, origin)?.size_in_atlas;
    check_room_for_tile(data, origin, size, columns, separation, frames_count, Some(origin))?;

    let tile = get_tile_mut(data, origin)?;
    tile.animation_columns = columns;
    tile.animation_separation = separation;
    tile.animation_frames_durations.resize(frames_count, DEFAULT_FRAME_DURATION);

    recache_tile(data, origin);
    queue_padded_texture_update(data);
    Ok(())
}

pub fn set_tile_animation_columns(
    data: &mut AtlasSourceData,
    origin: IVec2,
    columns: i32,
) -> TileSetResult<()> {
    if columns < 0 {
        return Err(TileSetError::invalid_argument(
            "animation_columns",
            columns,
            "must not be negative",
        ));
    }
    let tile = get_tile(data, origin)?;
    let (separation, frames) = (tile.animation_separation, tile.animation_frames_durations.len());
    apply_frame_layout(data, origin, columns, separation, frames)
}

pub fn set_tile_animation_separation(
    data: &mut AtlasSourceData,
    origin: IVec2,
    separation: IVec2,
) -> TileSetResult<()> {
    if separation.x < 0 || separation.y < 0 {
        return Err(TileSetError::invalid_argument(
            "animation_separation",
            separation,
            "must not be negative",
        ));
    }
    let tile = get_tile(data, origin)?;
    let (columns, frames) = (tile.animation_columns, tile.animation_frames_durations.len());
    apply_frame_layout(data, origin, columns, separation, frames)
}

/// Resize the frame list; new frames last 1.0
pub fn set_tile_animation_frames_count(
    data: &mut AtlasSourceData,
    origin: IVec2,
    frames_count: usize,
) -> TileSetResult<()> {
    if frames_count == 0 {
        return Err(TileSetError::invalid_argument(
            "animation_frames_count",
            frames_count,
            "a tile needs at least one frame",
        ));
    }
    let tile = get_tile(data, origin)?;
    let (columns, separation) = (tile.animation_columns, tile.animation_separation);
    apply_frame_layout(data, origin, columns, separation, frames_count)
}

pub fn set_tile_animation_speed(
    data: &mut AtlasSourceData,
    origin: IVec2,
    speed: f32,
) -> TileSetResult<()> {
    if !speed.is_finite() || speed <= 0.0 {
        return Err(TileSetError::invalid_argument(
            "animation_speed",
            speed,
            "must be > 0",
        ));
    }
    get_tile_mut(data, origin)?.animation_speed = speed;
    Ok(())
}

pub fn set_tile_animation_mode(
    data: &mut AtlasSourceData,
    origin: IVec2,
    mode: AnimationMode,
) -> TileSetResult<()> {
    get_tile_mut(data, origin)?.animation_mode = mode;
    Ok(())
}

pub fn set_tile_animation_frame_duration(
    data: &mut AtlasSourceData,
    origin: IVec2,
    frame: usize,
    duration: f32,
) -> TileSetResult<()> {
    if !duration.is_finite() || duration <= 0.0 {
        return Err(TileSetError::invalid_argument(
            "frame_duration",
            duration,
            "must be > 0",
        ));
    }
    let slot = get_tile_mut(data, origin)?
        .animation_frames_durations
        .get_mut(frame)
        .ok_or_else(|| TileSetError::not_found("animation frame", frame))?;
    *slot = duration;
    Ok(())
}

pub fn get_tile_animation_frame_duration(
    data: &AtlasSourceData,
    origin: IVec2,
    frame: usize,
) -> TileSetResult<f32> {
    get_tile(data, origin)?
        .animation_frames_durations
        .get(frame)
        .copied()
        .ok_or_else(|| TileSetError::not_found("animation frame", frame))
}

pub fn get_tile_animation_frames_count(data: &AtlasSourceData, origin: IVec2) -> TileSetResult<usize> {
    Ok(get_tile(data, origin)?.animation_frames_durations.len())
}

/// Length of one animation loop in seconds, at the tile's speed
pub fn get_tile_animation_total_duration(data: &AtlasSourceData, origin: IVec2) -> TileSetResult<f32> {
    let tile = get_tile(data, origin)?;
    let sum: f32 = tile.animation_frames_durations.iter().sum();
    Ok(sum / tile.animation_speed)
}
