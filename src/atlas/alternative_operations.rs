//! Alternative tile operations.
//!
//! Alternative 0 is the base tile: it always exists and can't be removed or
//! renamed. Other ids are allocated from a per-tile counter
//! that skips ids in use and wraps at `ALTERNATIVE_ID_WRAP`.

use super::atlas_data::{AtlasSourceData, PlacedTile};
use super::atlas_operations::{get_tile, get_tile_mut};
use crate::constants::{ALTERNATIVE_ID_WRAP, BASE_ALTERNATIVE};
use crate::error::{TileSetError, TileSetResult};
use crate::tile_record::{create_tile_record, TileRecord};
use glam::IVec2;

/// Advance the counter past every id already in use
fn compute_next_alternative_id(tile: &mut PlacedTile) {
    while tile.alternatives.contains_key(&tile.next_alternative_id) {
        tile.next_alternative_id = (tile.next_alternative_id % ALTERNATIVE_ID_WRAP) + 1;
    }
}

fn reject_base_alternative(alternative: i32, action: &str) -> TileSetResult<()> {
    if alternative == BASE_ALTERNATIVE {
        return Err(TileSetError::invalid_argument(
            "alternative",
            alternative,
            &format!("the base tile can't be {}", action),
        ));
    }
    Ok(())
}

/// Create an alternative, optionally with a chosen id. Returns the id used.
pub fn create_alternative_tile(
    data: &mut AtlasSourceData,
    origin: IVec2,
    alternative_id_override: Option<i32>,
) -> TileSetResult<i32> {
    let tile = get_tile_mut(data, origin)?;

    let id = match alternative_id_override {
        Some(id) if id < 0 => {
            return Err(TileSetError::invalid_argument(
                "alternative",
                id,
                "must not be negative",
            ))
        }
        Some(id) if tile.alternatives.contains_key(&id) => {
            return Err(TileSetError::duplicate_id("alternative", (origin, id)))
        }
        Some(id) => id,
        None => tile.next_alternative_id,
    };

    tile.alternatives.insert(id, create_tile_record());
    compute_next_alternative_id(tile);
    Ok(id)
}

pub fn remove_alternative_tile(
    data: &mut AtlasSourceData,
    origin: IVec2,
    alternative: i32,
) -> TileSetResult<TileRecord> {
    reject_base_alternative(alternative, "removed")?;
    get_tile_mut(data, origin)?
        .alternatives
        .remove(&alternative)
        .ok_or_else(|| TileSetError::not_found("alternative", (origin, alternative)))
}

/// Give an alternative a new id
pub fn set_alternative_tile_id(
    data: &mut AtlasSourceData,
    origin: IVec2,
    alternative: i32,
    new_id: i32,
) -> TileSetResult<()> {
    reject_base_alternative(alternative, "renamed")?;
    if new_id <= BASE_ALTERNATIVE {
        return Err(TileSetError::invalid_argument(
            "alternative",
            new_id,
            "must be > 0",
        ));
    }

    let tile = get_tile_mut(data, origin)?;
    if !tile.alternatives.contains_key(&alternative) {
        return Err(TileSetError::not_found("alternative", (origin, alternative)));
    }
    if alternative == new_id {
        return Ok(());
    }
    if tile.alternatives.contains_key(&new_id) {
        return Err(TileSetError::duplicate_id("alternative", (origin, new_id)));
    }

    if let Some(record) = tile.alternatives.remove(&alternative) {
        tile.alternatives.insert(new_id, record);
    }
    compute_next_alternative_id(tile);
    Ok(())
}

pub fn get_next_alternative_tile_id(data: &AtlasSourceData, origin: IVec2) -> TileSetResult<i32> {
    Ok(get_tile(data, origin)?.next_alternative_id)
}

pub fn has_alternative_tile(data: &AtlasSourceData, origin: IVec2, alternative: i32) -> bool {
    data.tiles
        .get(&origin)
        .is_some_and(|tile| tile.alternatives.contains_key(&alternative))
}

/// Alternative ids of a tile, ascending
pub fn get_alternative_ids(data: &AtlasSourceData, origin: IVec2) -> TileSetResult<Vec<i32>> {
    Ok(get_tile(data, origin)?.alternatives.keys().copied().collect())
}

pub fn get_tile_record(
    data: &AtlasSourceData,
    origin: IVec2,
    alternative: i32,
) -> TileSetResult<&TileRecord> {
    get_tile(data, origin)?
        .alternatives
        .get(&alternative)
        .ok_or_else(|| TileSetError::not_found("alternative", (origin, alternative)))
}

pub fn get_tile_record_mut(
    data: &mut AtlasSourceData,
    origin: IVec2,
    alternative: i32,
) -> TileSetResult<&mut TileRecord> {
    get_tile_mut(data, origin)?
        .alternatives
        .get_mut(&alternative)
        .ok_or_else(|| TileSetError::not_found("alternative", (origin, alternative)))
}

/// Flip/transpose an alternative; the base tile is never transformed
pub fn set_alternative_tile_transform(
    data: &mut AtlasSourceData,
    origin: IVec2,
    alternative: i32,
    flip_h: bool,
    flip_v: bool,
    transpose: bool,
) -> TileSetResult<()> {
    reject_base_alternative(alternative, "transformed")?;
    let record = get_tile_record_mut(data, origin, alternative)?;
    record.flip_h = flip_h;
    record.flip_v = flip_v;
    record.transpose = transpose;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::atlas_operations::{create_atlas_source, create_tile};
    use crate::config::AtlasSourceConfig;
    use image::RgbaImage;

    fn atlas_with_tile() -> AtlasSourceData {
        let mut atlas =
            create_atlas_source(&AtlasSourceConfig::default(), Some(RgbaImage::new(64, 64)))
                .expect("Failed to create atlas");
        create_tile(&mut atlas, IVec2::ZERO, IVec2::ONE).expect("Failed to create tile");
        atlas
    }

    #[test]
    fn test_new_tile_has_base_alternative() {
        let atlas = atlas_with_tile();
        assert_eq!(get_alternative_ids(&atlas, IVec2::ZERO).expect("tile exists"), vec![0]);
        assert_eq!(get_next_alternative_tile_id(&atlas, IVec2::ZERO).expect("tile exists"), 1);
    }

    #[test]
    fn test_allocation_skips_used_ids() {
        let mut atlas = atlas_with_tile();
        assert_eq!(create_alternative_tile(&mut atlas, IVec2::ZERO, Some(2)).expect("free id"), 2);
        assert_eq!(create_alternative_tile(&mut atlas, IVec2::ZERO, None).expect("allocates"), 1);
        // 1 and 2 are taken, so the counter moves on to 3
        assert_eq!(get_next_alternative_tile_id(&atlas, IVec2::ZERO).expect("tile exists"), 3);
        assert_eq!(create_alternative_tile(&mut atlas, IVec2::ZERO, None).expect("allocates"), 3);
    }

    #[test]
    fn test_allocation_wraps_around() {
        let mut atlas = atlas_with_tile();
        atlas.tiles.get_mut(&IVec2::ZERO).expect("tile exists").next_alternative_id =
            ALTERNATIVE_ID_WRAP;
        assert_eq!(
            create_alternative_tile(&mut atlas, IVec2::ZERO, None).expect("allocates"),
            ALTERNATIVE_ID_WRAP
        );
        assert_eq!(get_next_alternative_tile_id(&atlas, IVec2::ZERO).expect("tile exists"), 1);
    }

    #[test]
    fn test_duplicate_and_invalid_overrides() {
        let mut atlas = atlas_with_tile();
        assert!(matches!(
            create_alternative_tile(&mut atlas, IVec2::ZERO, Some(0)),
            Err(TileSetError::DuplicateId { .. })
        ));
        assert!(matches!(
            create_alternative_tile(&mut atlas, IVec2::ZERO, Some(-3)),
            Err(TileSetError::InvalidArgument { .. })
        ));
        assert!(matches!(
            create_alternative_tile(&mut atlas, IVec2::new(1, 1), None),
            Err(TileSetError::NotFound { .. })
        ));
    }

    #[test]
    fn test_rename_rules() {
        let mut atlas = atlas_with_tile();
        create_alternative_tile(&mut atlas, IVec2::ZERO, None).expect("allocates 1");
        create_alternative_tile(&mut atlas, IVec2::ZERO, None).expect("allocates 2");

        assert!(matches!(
            set_alternative_tile_id(&mut atlas, IVec2::ZERO, 0, 5),
            Err(TileSetError::InvalidArgument { .. })
        ));
        assert!(matches!(
            set_alternative_tile_id(&mut atlas, IVec2::ZERO, 1, 2),
            Err(TileSetError::DuplicateId { .. })
        ));
        set_alternative_tile_id(&mut atlas, IVec2::ZERO, 1, 7).expect("free target");
        assert_eq!(get_alternative_ids(&atlas, IVec2::ZERO).expect("tile exists"), vec![0, 2, 7]);
        assert_eq!(get_next_alternative_tile_id(&atlas, IVec2::ZERO).expect("tile exists"), 3);
    }

    #[test]
    fn test_base_tile_is_protected() {
        let mut atlas = atlas_with_tile();
        assert!(remove_alternative_tile(&mut atlas, IVec2::ZERO, 0).is_err());
        assert!(set_alternative_tile_transform(&mut atlas, IVec2::ZERO, 0, true, false, false).is_err());

        let id = create_alternative_tile(&mut atlas, IVec2::ZERO, None).expect("allocates");
        set_alternative_tile_transform(&mut atlas, IVec2::ZERO, id, true, false, true)
            .expect("non-base alternative");
        let record = get_tile_record(&atlas, IVec2::ZERO, id).expect("alternative exists");
        assert!(record.flip_h && record.transpose && !record.flip_v);

        remove_alternative_tile(&mut atlas, IVec2::ZERO, id).expect("alternative exists");
        assert!(!has_alternative_tile(&atlas, IVec2::ZERO, id));
    }
}
