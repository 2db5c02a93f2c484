//! Atlas Operations - Pure DOP Functions
//!
//! Placement, removal and lookup of tiles in the atlas grid, plus the
//! cell -> origin reverse cache. Every mutation validates first and only
//! then touches data, so a rejected call leaves the atlas unchanged.

use super::atlas_data::{AtlasSourceData, PackedRect, PlacedTile};
use super::padding_operations::queue_padded_texture_update;
use crate::config::{
    validate_atlas_source_config, validate_margins, validate_separation,
    validate_texture_region_size, AtlasSourceConfig,
};
use crate::constants::{
    BASE_ALTERNATIVE, DEFAULT_ANIMATION_SPEED, DEFAULT_FRAME_DURATION,
};
use crate::error::{OptionExt, TileSetError, TileSetResult};
use crate::invalidatable::Invalidatable;
use crate::tile_identity::cmp_coords_row_major;
use crate::tile_record::create_tile_record;
use glam::IVec2;
use image::RgbaImage;
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;

/// Create new atlas source data
pub fn create_atlas_source(
    config: &AtlasSourceConfig,
    texture: Option<RgbaImage>,
) -> TileSetResult<AtlasSourceData> {
    validate_atlas_source_config(config)?;

    Ok(AtlasSourceData {
        texture,
        margins: config.margins,
        separation: config.separation,
        texture_region_size: config.texture_region_size,
        use_texture_padding: config.use_texture_padding,
        tiles: FxHashMap::default(),
        tile_ids: Vec::new(),
        coords_mapping_cache: FxHashMap::default(),
        padded_texture: Invalidatable::new(None),
    })
}

/// Fresh tile: base alternative 0 and a single 1.0s frame
pub fn create_placed_tile(size_in_atlas: IVec2) -> PlacedTile {
    let mut alternatives = BTreeMap::new();
    alternatives.insert(BASE_ALTERNATIVE, create_tile_record());

    PlacedTile {
        size_in_atlas,
        animation_columns: 0,
        animation_separation: IVec2::ZERO,
        animation_speed: DEFAULT_ANIMATION_SPEED,
        animation_mode: Default::default(),
        animation_frames_durations: vec![DEFAULT_FRAME_DURATION],
        alternatives,
        next_alternative_id: 1,
    }
}

// ---------------------------------------------------------------------------
// Atlas-wide parameters
// ---------------------------------------------------------------------------

pub fn texture_size(data: &AtlasSourceData) -> IVec2 {
    data.texture
        .as_ref()
        .map(|t| IVec2::new(t.width() as i32, t.height() as i32))
        .unwrap_or(IVec2::ZERO)
}

/// Number of whole cells that fit: (texture - margins) / (region + separation), floored at 0
pub fn compute_grid_size(
    texture_size: IVec2,
    margins: IVec2,
    separation: IVec2,
    texture_region_size: IVec2,
) -> IVec2 {
    let valid_area = texture_size - margins;
    let stride = texture_region_size + separation;
    let axis = |area: i32, stride: i32| if stride > 0 { (area / stride).max(0) } else { 0 };
    IVec2::new(axis(valid_area.x, stride.x), axis(valid_area.y, stride.y))
}

pub fn get_atlas_grid_size(data: &AtlasSourceData) -> IVec2 {
    compute_grid_size(
        texture_size(data),
        data.margins,
        data.separation,
        data.texture_region_size,
    )
}

pub fn set_texture(data: &mut AtlasSourceData, texture: Option<RgbaImage>) {
    data.texture = texture;
    queue_padded_texture_update(data);
}

pub fn set_margins(data: &mut AtlasSourceData, margins: IVec2) -> TileSetResult<()> {
    validate_margins(margins)?;
    data.margins = margins;
    queue_padded_texture_update(data);
    Ok(())
}

pub fn set_separation(data: &mut AtlasSourceData, separation: IVec2) -> TileSetResult<()> {
    validate_separation(separation)?;
    data.separation = separation;
    queue_padded_texture_update(data);
    Ok(())
}

pub fn set_texture_region_size(data: &mut AtlasSourceData, size: IVec2) -> TileSetResult<()> {
    validate_texture_region_size(size)?;
    data.texture_region_size = size;
    queue_padded_texture_update(data);
    Ok(())
}

pub fn set_use_texture_padding(data: &mut AtlasSourceData, use_texture_padding: bool) {
    if data.use_texture_padding == use_texture_padding {
        return;
    }
    data.use_texture_padding = use_texture_padding;
    queue_padded_texture_update(data);
}

// ---------------------------------------------------------------------------
// Frame geometry
// ---------------------------------------------------------------------------

/// Top-left cell of animation frame `frame`
pub fn frame_coords(
    origin: IVec2,
    size: IVec2,
    animation_columns: i32,
    animation_separation: IVec2,
    frame: usize,
) -> IVec2 {
    let frame = frame as i32;
    let offset = if animation_columns > 0 {
        IVec2::new(frame % animation_columns, frame / animation_columns)
    } else {
        IVec2::new(frame, 0)
    };
    origin + (size + animation_separation) * offset
}

/// Every cell covered by every frame of a tile layout, generated lazily
///
/// The arithmetic is unchecked: only call this on layouts that passed
/// [`layout_fits_grid`].
pub fn covered_cells(
    origin: IVec2,
    size: IVec2,
    animation_columns: i32,
    animation_separation: IVec2,
    frames_count: usize,
) -> impl Iterator<Item = IVec2> {
    (0..frames_count).flat_map(move |frame| {
        let base = frame_coords(origin, size, animation_columns, animation_separation, frame);
        (0..size.y).flat_map(move |y| (0..size.x).map(move |x| base + IVec2::new(x, y)))
    })
}

/// Cells covered by an already placed tile
pub fn tile_covered_cells(origin: IVec2, tile: &PlacedTile) -> Vec<IVec2> {
    covered_cells(
        origin,
        tile.size_in_atlas,
        tile.animation_columns,
        tile.animation_separation,
        tile.animation_frames_durations.len(),
    )
    .collect()
}

/// Exclusive far corner of a layout's bounding box, `None` on overflow
fn layout_far_corner(
    origin: IVec2,
    size: IVec2,
    animation_columns: i32,
    animation_separation: IVec2,
    frames_count: usize,
) -> Option<(i64, i64)> {
    let last_frame = i64::try_from(frames_count.checked_sub(1)?).ok()?;
    let (offset_x, offset_y) = if animation_columns > 0 {
        let columns = i64::from(animation_columns);
        (last_frame.min(columns - 1), last_frame / columns)
    } else {
        (last_frame, 0)
    };

    let axis = |origin: i32, size: i32, separation: i32, offset: i64| {
        (i64::from(size) + i64::from(separation))
            .checked_mul(offset)?
            .checked_add(i64::from(origin))?
            .checked_add(i64::from(size))
    };
    Some((
        axis(origin.x, size.x, animation_separation.x, offset_x)?,
        axis(origin.y, size.y, animation_separation.y, offset_y)?,
    ))
}

/// Does every frame of a layout lie inside the grid
///
/// Checks the bounding box of the last row and column of frames, so no cell
/// is enumerated and no coordinate can overflow.
pub fn layout_fits_grid(
    origin: IVec2,
    size: IVec2,
    animation_columns: i32,
    animation_separation: IVec2,
    frames_count: usize,
    grid_size: IVec2,
) -> bool {
    if frames_count == 0 {
        return true;
    }
    if origin.x < 0 || origin.y < 0 || size.x <= 0 || size.y <= 0 {
        return false;
    }
    if animation_separation.x < 0 || animation_separation.y < 0 || animation_columns < 0 {
        return false;
    }
    layout_far_corner(origin, size, animation_columns, animation_separation, frames_count)
        .is_some_and(|(x, y)| x <= i64::from(grid_size.x) && y <= i64::from(grid_size.y))
}

// ---------------------------------------------------------------------------
// Placement validation
// ---------------------------------------------------------------------------

/// Validate a candidate layout, explaining the first failure
///
/// Cells already owned by `ignored_tile` count as free, so a tile can be
/// checked against its own previous footprint.
pub fn check_room_for_tile(
    data: &AtlasSourceData,
    origin: IVec2,
    size: IVec2,
    animation_columns: i32,
    animation_separation: IVec2,
    frames_count: usize,
    ignored_tile: Option<IVec2>,
) -> TileSetResult<()> {
    let grid_size = get_atlas_grid_size(data);
    if !layout_fits_grid(
        origin,
        size,
        animation_columns,
        animation_separation,
        frames_count,
        grid_size,
    ) {
        return Err(TileSetError::InvalidPlacement(format!(
            "tile at {} of size {} with {} frames leaves the atlas grid {}",
            origin, size, frames_count, grid_size
        )));
    }

    for cell in covered_cells(origin, size, animation_columns, animation_separation, frames_count) {
        if let Some(owner) = data.coords_mapping_cache.get(&cell) {
            if Some(*owner) != ignored_tile {
                return Err(TileSetError::InvalidPlacement(format!(
                    "cell {} is already used by the tile at {}",
                    cell, owner
                )));
            }
        }
    }
    Ok(())
}

pub fn has_room_for_tile(
    data: &AtlasSourceData,
    origin: IVec2,
    size: IVec2,
    animation_columns: i32,
    animation_separation: IVec2,
    frames_count: usize,
    ignored_tile: Option<IVec2>,
) -> bool {
    check_room_for_tile(
        data,
        origin,
        size,
        animation_columns,
        animation_separation,
        frames_count,
        ignored_tile,
    )
    .is_ok()
}

fn validate_origin(origin: IVec2) -> TileSetResult<()> {
    if origin.x < 0 || origin.y < 0 {
        return Err(TileSetError::invalid_argument(
            "atlas_coords",
            origin,
            "must not be negative",
        ));
    }
    Ok(())
}

fn validate_size_in_atlas(size: IVec2) -> TileSetResult<()> {
    if size.x <= 0 || size.y <= 0 {
        return Err(TileSetError::invalid_argument(
            "size_in_atlas",
            size,
            "must be positive",
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Reverse cache
// ---------------------------------------------------------------------------

/// Map every cell covered by the tile at `origin` back to it
pub(crate) fn add_tile_to_cache(data: &mut AtlasSourceData, origin: IVec2) {
    let Some(tile) = data.tiles.get(&origin) else {
        return;
    };
    for cell in tile_covered_cells(origin, tile) {
        data.coords_mapping_cache.insert(cell, origin);
    }
}

/// Drop every cache entry pointing at `origin`
pub(crate) fn remove_tile_from_cache(data: &mut AtlasSourceData, origin: IVec2) {
    data.coords_mapping_cache.retain(|_, owner| *owner != origin);
}

/// Recompute one tile's cache entries from its current geometry
pub(crate) fn recache_tile(data: &mut AtlasSourceData, origin: IVec2) {
    remove_tile_from_cache(data, origin);
    add_tile_to_cache(data, origin);
}

/// Rebuild the whole reverse cache from the tile table
pub fn rebuild_coords_mapping_cache(data: &mut AtlasSourceData) {
    data.coords_mapping_cache.clear();
    for origin in data.tile_ids.clone() {
        add_tile_to_cache(data, origin);
    }
    log::debug!(
        "[atlas_operations::rebuild_coords_mapping_cache] {} cells mapped for {} tiles",
        data.coords_mapping_cache.len(),
        data.tile_ids.len()
    );
}

fn insert_tile_id(data: &mut AtlasSourceData, origin: IVec2) {
    let index = data
        .tile_ids
        .binary_search_by(|probe| cmp_coords_row_major(*probe, origin))
        .unwrap_or_else(|i| i);
    data.tile_ids.insert(index, origin);
}

fn remove_tile_id(data: &mut AtlasSourceData, origin: IVec2) {
    data.tile_ids.retain(|id| *id != origin);
}

// ---------------------------------------------------------------------------
// Tile lifecycle
// ---------------------------------------------------------------------------

/// Place a new tile with one base alternative and one frame
pub fn create_tile(data: &mut AtlasSourceData, origin: IVec2, size: IVec2) -> TileSetResult<()> {
    validate_size_in_atlas(size)?;
    validate_origin(origin)?;
    check_room_for_tile(data, origin, size, 0, IVec2::ZERO, 1, None)?;

    data.tiles.insert(origin, create_placed_tile(size));
    insert_tile_id(data, origin);
    add_tile_to_cache(data, origin);
    queue_padded_texture_update(data);

    log::debug!(
        "[atlas_operations::create_tile] Created tile at {} with size {}",
        origin,
        size
    );
    Ok(())
}

/// Move and/or resize a tile; `None` keeps the current value
pub fn move_tile_in_atlas(
    data: &mut AtlasSourceData,
    origin: IVec2,
    new_origin: Option<IVec2>,
    new_size: Option<IVec2>,
) -> TileSetResult<()> {
    let tile = get_tile(data, origin)?;
    let new_origin = new_origin.unwrap_or(origin);
    let new_size = new_size.unwrap_or(tile.size_in_atlas);

    if new_origin == origin && new_size == tile.size_in_atlas {
        return Ok(());
    }

    validate_origin(new_origin)?;
    validate_size_in_atlas(new_size)?;
    check_room_for_tile(
        data,
        new_origin,
        new_size,
        tile.animation_columns,
        tile.animation_separation,
        tile.animation_frames_durations.len(),
        Some(origin),
    )?;

    remove_tile_from_cache(data, origin);
    if let Some(mut tile) = data.tiles.remove(&origin) {
        tile.size_in_atlas = new_size;
        data.tiles.insert(new_origin, tile);
    }
    remove_tile_id(data, origin);
    insert_tile_id(data, new_origin);
    add_tile_to_cache(data, new_origin);
    queue_padded_texture_update(data);

    log::debug!(
        "[atlas_operations::move_tile_in_atlas] Moved tile {} -> {} (size {})",
        origin,
        new_origin,
        new_size
    );
    Ok(())
}

/// Remove a tile and every alternative it owns
pub fn remove_tile(data: &mut AtlasSourceData, origin: IVec2) -> TileSetResult<PlacedTile> {
    if !data.tiles.contains_key(&origin) {
        return Err(TileSetError::not_found("tile", origin));
    }

    remove_tile_from_cache(data, origin);
    remove_tile_id(data, origin);
    let tile = data
        .tiles
        .remove(&origin)
        .ok_or_tile_set(|| TileSetError::not_found("tile", origin))?;
    queue_padded_texture_update(data);

    log::debug!("[atlas_operations::remove_tile] Removed tile at {}", origin);
    Ok(tile)
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

pub fn has_tile(data: &AtlasSourceData, origin: IVec2) -> bool {
    data.tiles.contains_key(&origin)
}

pub fn get_tile(data: &AtlasSourceData, origin: IVec2) -> TileSetResult<&PlacedTile> {
    data.tiles
        .get(&origin)
        .ok_or_tile_set(|| TileSetError::not_found("tile", origin))
}

pub(crate) fn get_tile_mut(
    data: &mut AtlasSourceData,
    origin: IVec2,
) -> TileSetResult<&mut PlacedTile> {
    data.tiles
        .get_mut(&origin)
        .ok_or_tile_set(|| TileSetError::not_found("tile", origin))
}

/// Origin of the tile covering `cell`, in any frame
pub fn get_tile_at_coords(data: &AtlasSourceData, cell: IVec2) -> Option<IVec2> {
    data.coords_mapping_cache.get(&cell).copied()
}

pub fn get_tile_size_in_atlas(data: &AtlasSourceData, origin: IVec2) -> TileSetResult<IVec2> {
    Ok(get_tile(data, origin)?.size_in_atlas)
}

pub fn get_tiles_count(data: &AtlasSourceData) -> usize {
    data.tile_ids.len()
}

pub fn get_tile_id(data: &AtlasSourceData, index: usize) -> TileSetResult<IVec2> {
    data.tile_ids
        .get(index)
        .copied()
        .ok_or_tile_set(|| TileSetError::not_found("tile index", index))
}

/// Pixel rectangle of one frame of a tile in the source texture
pub fn get_tile_texture_region(
    data: &AtlasSourceData,
    origin: IVec2,
    frame: usize,
) -> TileSetResult<PackedRect> {
    let tile = get_tile(data, origin)?;
    if frame >= tile.animation_frames_durations.len() {
        return Err(TileSetError::not_found("animation frame", frame));
    }

    let cell = frame_coords(
        origin,
        tile.size_in_atlas,
        tile.animation_columns,
        tile.animation_separation,
        frame,
    );
    let position = data.margins + cell * (data.texture_region_size + data.separation);
    let size = tile_pixel_size(data, tile);

    Ok(PackedRect {
        x: position.x as u32,
        y: position.y as u32,
        width: size.x as u32,
        height: size.y as u32,
    })
}

/// Pixel size of a (possibly multi-cell) tile, including inner separations
pub fn tile_pixel_size(data: &AtlasSourceData, tile: &PlacedTile) -> IVec2 {
    data.texture_region_size * tile.size_in_atlas
        + data.separation * (tile.size_in_atlas - IVec2::ONE)
}

// ---------------------------------------------------------------------------
// Tiles outside the texture
// ---------------------------------------------------------------------------

fn tile_fits_grid(origin: IVec2, tile: &PlacedTile, grid_size: IVec2) -> bool {
    layout_fits_grid(
        origin,
        tile.size_in_atlas,
        tile.animation_columns,
        tile.animation_separation,
        tile.animation_frames_durations.len(),
        grid_size,
    )
}

/// Origins of tiles that would not fit if the atlas parameters changed
pub fn get_tiles_to_be_removed_on_change(
    data: &AtlasSourceData,
    margins: IVec2,
    separation: IVec2,
    texture_region_size: IVec2,
) -> Vec<IVec2> {
    let grid_size = compute_grid_size(texture_size(data), margins, separation, texture_region_size);
    data.tile_ids
        .iter()
        .copied()
        .filter(|origin| {
            data.tiles
                .get(origin)
                .is_some_and(|tile| !tile_fits_grid(*origin, tile, grid_size))
        })
        .collect()
}

pub fn has_tiles_outside_texture(data: &AtlasSourceData) -> bool {
    !get_tiles_to_be_removed_on_change(data, data.margins, data.separation, data.texture_region_size)
        .is_empty()
}

/// Remove every tile that no longer fits, returning their origins
pub fn clear_tiles_outside_texture(data: &mut AtlasSourceData) -> TileSetResult<Vec<IVec2>> {
    let outside =
        get_tiles_to_be_removed_on_change(data, data.margins, data.separation, data.texture_region_size);
    for origin in &outside {
        remove_tile(data, *origin)?;
    }
    if !outside.is_empty() {
        log::info!(
            "[atlas_operations::clear_tiles_outside_texture] Removed {} tiles",
            outside.len()
        );
    }
    Ok(outside)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atlas_4x4() -> AtlasSourceData {
        create_atlas_source(&AtlasSourceConfig::default(), Some(RgbaImage::new(64, 64)))
            .expect("Failed to create atlas")
    }

    #[test]
    fn test_grid_size() {
        let atlas = atlas_4x4();
        assert_eq!(get_atlas_grid_size(&atlas), IVec2::new(4, 4));

        assert_eq!(
            compute_grid_size(IVec2::new(70, 40), IVec2::new(2, 2), IVec2::new(1, 1), IVec2::new(16, 16)),
            IVec2::new(4, 2)
        );
        assert_eq!(
            compute_grid_size(IVec2::new(4, 4), IVec2::new(8, 8), IVec2::ZERO, IVec2::new(16, 16)),
            IVec2::ZERO
        );
    }

    #[test]
    fn test_no_texture_means_empty_grid() {
        let mut atlas = create_atlas_source(&AtlasSourceConfig::default(), None)
            .expect("Failed to create atlas");
        assert_eq!(get_atlas_grid_size(&atlas), IVec2::ZERO);
        assert!(matches!(
            create_tile(&mut atlas, IVec2::ZERO, IVec2::ONE),
            Err(TileSetError::InvalidPlacement(_))
        ));
    }

    #[test]
    fn test_create_tile_rejects_bad_arguments() {
        let mut atlas = atlas_4x4();
        assert!(matches!(
            create_tile(&mut atlas, IVec2::ZERO, IVec2::new(0, 1)),
            Err(TileSetError::InvalidArgument { .. })
        ));
        assert!(matches!(
            create_tile(&mut atlas, IVec2::new(-1, 0), IVec2::ONE),
            Err(TileSetError::InvalidArgument { .. })
        ));
        assert!(matches!(
            create_tile(&mut atlas, IVec2::new(3, 3), IVec2::new(2, 1)),
            Err(TileSetError::InvalidPlacement(_))
        ));
        assert!(atlas.tiles.is_empty());
        assert!(atlas.coords_mapping_cache.is_empty());
    }

    #[test]
    fn test_multi_cell_tile_blocks_overlap() {
        let mut atlas = atlas_4x4();
        create_tile(&mut atlas, IVec2::ZERO, IVec2::new(2, 1)).expect("Failed to create tile");

        assert_eq!(get_tile_at_coords(&atlas, IVec2::new(0, 0)), Some(IVec2::ZERO));
        assert_eq!(get_tile_at_coords(&atlas, IVec2::new(1, 0)), Some(IVec2::ZERO));
        assert_eq!(get_tile_at_coords(&atlas, IVec2::new(2, 0)), None);

        assert!(matches!(
            create_tile(&mut atlas, IVec2::new(1, 0), IVec2::ONE),
            Err(TileSetError::InvalidPlacement(_))
        ));
        create_tile(&mut atlas, IVec2::new(2, 0), IVec2::ONE).expect("Failed to create tile");
    }

    #[test]
    fn test_tile_ids_are_row_major() {
        let mut atlas = atlas_4x4();
        for origin in [IVec2::new(0, 2), IVec2::new(3, 0), IVec2::new(1, 0), IVec2::new(0, 1)] {
            create_tile(&mut atlas, origin, IVec2::ONE).expect("Failed to create tile");
        }
        assert_eq!(
            atlas.tile_ids,
            vec![IVec2::new(1, 0), IVec2::new(3, 0), IVec2::new(0, 1), IVec2::new(0, 2)]
        );
        assert_eq!(get_tiles_count(&atlas), 4);
        assert_eq!(get_tile_id(&atlas, 2).expect("index 2 exists"), IVec2::new(0, 1));
        assert!(get_tile_id(&atlas, 4).is_err());
    }

    #[test]
    fn test_move_and_resize() {
        let mut atlas = atlas_4x4();
        create_tile(&mut atlas, IVec2::ZERO, IVec2::ONE).expect("Failed to create tile");
        create_tile(&mut atlas, IVec2::new(3, 3), IVec2::ONE).expect("Failed to create tile");

        // Growing over its own old footprint is allowed
        move_tile_in_atlas(&mut atlas, IVec2::ZERO, None, Some(IVec2::new(2, 2)))
            .expect("Failed to resize tile");
        assert_eq!(get_tile_at_coords(&atlas, IVec2::new(1, 1)), Some(IVec2::ZERO));

        move_tile_in_atlas(&mut atlas, IVec2::ZERO, Some(IVec2::new(1, 0)), None)
            .expect("Failed to move tile");
        assert!(!has_tile(&atlas, IVec2::ZERO));
        assert_eq!(get_tile_at_coords(&atlas, IVec2::new(0, 0)), None);
        assert_eq!(get_tile_at_coords(&atlas, IVec2::new(2, 1)), Some(IVec2::new(1, 0)));
        assert_eq!(atlas.coords_mapping_cache.len(), 5);
    }

    #[test]
    fn test_rejected_move_leaves_atlas_untouched() {
        let mut atlas = atlas_4x4();
        create_tile(&mut atlas, IVec2::ZERO, IVec2::ONE).expect("Failed to create tile");
        create_tile(&mut atlas, IVec2::new(2, 0), IVec2::ONE).expect("Failed to create tile");
        let cache_before = atlas.coords_mapping_cache.clone();

        let result = move_tile_in_atlas(&mut atlas, IVec2::ZERO, None, Some(IVec2::new(3, 1)));
        assert!(matches!(result, Err(TileSetError::InvalidPlacement(_))));
        assert_eq!(atlas.coords_mapping_cache, cache_before);
        assert_eq!(get_tile_size_in_atlas(&atlas, IVec2::ZERO).expect("tile exists"), IVec2::ONE);

        assert!(matches!(
            move_tile_in_atlas(&mut atlas, IVec2::new(1, 1), Some(IVec2::ZERO), None),
            Err(TileSetError::NotFound { .. })
        ));
    }

    #[test]
    fn test_oversized_layouts_rejected_without_enumerating() {
        let mut atlas = atlas_4x4();
        create_tile(&mut atlas, IVec2::ZERO, IVec2::ONE).expect("Failed to create tile");
        let cache_before = atlas.coords_mapping_cache.clone();

        assert!(matches!(
            create_tile(&mut atlas, IVec2::new(1, 0), IVec2::new(65536, 65536)),
            Err(TileSetError::InvalidPlacement(_))
        ));
        assert!(matches!(
            create_tile(&mut atlas, IVec2::new(i32::MAX, 0), IVec2::ONE),
            Err(TileSetError::InvalidPlacement(_))
        ));
        assert!(matches!(
            move_tile_in_atlas(&mut atlas, IVec2::ZERO, Some(IVec2::new(i32::MAX, 0)), Some(IVec2::new(2, 1))),
            Err(TileSetError::InvalidPlacement(_))
        ));
        assert!(matches!(
            move_tile_in_atlas(&mut atlas, IVec2::ZERO, None, Some(IVec2::new(i32::MAX, i32::MAX))),
            Err(TileSetError::InvalidPlacement(_))
        ));

        assert_eq!(get_tiles_count(&atlas), 1);
        assert_eq!(atlas.coords_mapping_cache, cache_before);
        assert_eq!(get_tile_size_in_atlas(&atlas, IVec2::ZERO).expect("tile exists"), IVec2::ONE);
    }

    #[test]
    fn test_layout_fits_grid_bounds() {
        let grid = IVec2::new(4, 4);
        assert!(layout_fits_grid(IVec2::ZERO, IVec2::new(4, 4), 0, IVec2::ZERO, 1, grid));
        assert!(!layout_fits_grid(IVec2::new(1, 0), IVec2::new(4, 1), 0, IVec2::ZERO, 1, grid));
        // 2 columns, 4 frames of 1x1 with a 1-cell gap: far corner is (3, 3)
        assert!(layout_fits_grid(IVec2::ZERO, IVec2::ONE, 2, IVec2::ONE, 4, grid));
        assert!(!layout_fits_grid(IVec2::ZERO, IVec2::ONE, 2, IVec2::ONE, 5, grid));
        assert!(!layout_fits_grid(IVec2::ZERO, IVec2::ONE, 0, IVec2::new(i32::MAX, 0), 2, grid));
        assert!(!layout_fits_grid(IVec2::ZERO, IVec2::ONE, 0, IVec2::ZERO, usize::MAX, grid));
        assert!(!layout_fits_grid(IVec2::new(-1, 0), IVec2::ONE, 0, IVec2::ZERO, 1, grid));
    }

    #[test]
    fn test_texture_region() {
        let config = AtlasSourceConfig {
            margins: IVec2::new(2, 3),
            separation: IVec2::new(1, 1),
            ..Default::default()
        };
        let mut atlas = create_atlas_source(&config, Some(RgbaImage::new(128, 128)))
            .expect("Failed to create atlas");
        create_tile(&mut atlas, IVec2::new(1, 2), IVec2::new(2, 1)).expect("Failed to create tile");

        let region = get_tile_texture_region(&atlas, IVec2::new(1, 2), 0).expect("frame 0 exists");
        assert_eq!(
            region,
            PackedRect {
                x: 2 + 17,
                y: 3 + 34,
                width: 33,
                height: 16
            }
        );
        assert!(get_tile_texture_region(&atlas, IVec2::new(1, 2), 1).is_err());
    }

    #[test]
    fn test_tiles_outside_texture() {
        let mut atlas = atlas_4x4();
        create_tile(&mut atlas, IVec2::ZERO, IVec2::ONE).expect("Failed to create tile");
        create_tile(&mut atlas, IVec2::new(3, 0), IVec2::ONE).expect("Failed to create tile");

        let doomed =
            get_tiles_to_be_removed_on_change(&atlas, IVec2::ZERO, IVec2::ZERO, IVec2::new(32, 32));
        assert_eq!(doomed, vec![IVec2::new(3, 0)]);
        assert!(!has_tiles_outside_texture(&atlas));

        set_texture_region_size(&mut atlas, IVec2::new(32, 32)).expect("valid size");
        assert!(has_tiles_outside_texture(&atlas));
        assert_eq!(
            clear_tiles_outside_texture(&mut atlas).expect("Failed to clear tiles"),
            vec![IVec2::new(3, 0)]
        );
        assert!(clear_tiles_outside_texture(&mut atlas).expect("nothing left to clear").is_empty());
        assert_eq!(get_tiles_count(&atlas), 1);
        assert_eq!(get_tile_at_coords(&atlas, IVec2::new(3, 0)), None);
    }

    #[test]
    fn test_invalid_atlas_parameters() {
        let mut atlas = atlas_4x4();
        assert!(set_margins(&mut atlas, IVec2::new(-1, 0)).is_err());
        assert!(set_separation(&mut atlas, IVec2::new(0, -2)).is_err());
        assert!(set_texture_region_size(&mut atlas, IVec2::ZERO).is_err());
        assert_eq!(atlas.texture_region_size, IVec2::new(16, 16));
    }
}
