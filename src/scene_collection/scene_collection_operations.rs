//! Scene Collection Operations - Pure DOP Functions

use super::scene_collection_data::{SceneCollectionSourceData, SceneTile};
use crate::error::{OptionExt, TileSetError, TileSetResult};

pub fn create_scene_collection_source() -> SceneCollectionSourceData {
    SceneCollectionSourceData::default()
}

fn compute_next_scene_id(data: &mut SceneCollectionSourceData) {
    while data.scenes.contains_key(&data.next_scene_id) {
        data.next_scene_id += 1;
    }
}

/// Register a scene, returning its id
pub fn create_scene_tile(
    data: &mut SceneCollectionSourceData,
    scene_path: &str,
    id_override: Option<i32>,
) -> TileSetResult<i32> {
    let id = match id_override {
        Some(id) if id < 0 => {
            return Err(TileSetError::invalid_argument("scene_id", id, "must not be negative"))
        }
        Some(id) if data.scenes.contains_key(&id) => {
            return Err(TileSetError::duplicate_id("scene tile", id))
        }
        Some(id) => id,
        None => data.next_scene_id,
    };

    data.scenes.insert(
        id,
        SceneTile {
            scene_path: scene_path.to_string(),
            display_placeholder: false,
        },
    );
    compute_next_scene_id(data);
    Ok(id)
}

pub fn remove_scene_tile(data: &mut SceneCollectionSourceData, id: i32) -> TileSetResult<SceneTile> {
    data.scenes
        .remove(&id)
        .ok_or_tile_set(|| TileSetError::not_found("scene tile", id))
}

pub fn set_scene_tile_id(
    data: &mut SceneCollectionSourceData,
    id: i32,
    new_id: i32,
) -> TileSetResult<()> {
    if new_id < 0 {
        return Err(TileSetError::invalid_argument("scene_id", new_id, "must not be negative"));
    }
    if !data.scenes.contains_key(&id) {
        return Err(TileSetError::not_found("scene tile", id));
    }
    if id == new_id {
        return Ok(());
    }
    if data.scenes.contains_key(&new_id) {
        return Err(TileSetError::duplicate_id("scene tile", new_id));
    }

    if let Some(scene) = data.scenes.remove(&id) {
        data.scenes.insert(new_id, scene);
    }
    compute_next_scene_id(data);
    Ok(())
}

pub fn set_scene_tile_scene(
    data: &mut SceneCollectionSourceData,
    id: i32,
    scene_path: &str,
) -> TileSetResult<()> {
    get_scene_tile_mut(data, id)?.scene_path = scene_path.to_string();
    Ok(())
}

pub fn set_scene_tile_display_placeholder(
    data: &mut SceneCollectionSourceData,
    id: i32,
    display_placeholder: bool,
) -> TileSetResult<()> {
    get_scene_tile_mut(data, id)?.display_placeholder = display_placeholder;
    Ok(())
}

pub fn get_scene_tile(data: &SceneCollectionSourceData, id: i32) -> TileSetResult<&SceneTile> {
    data.scenes
        .get(&id)
        .ok_or_tile_set(|| TileSetError::not_found("scene tile", id))
}

fn get_scene_tile_mut(data: &mut SceneCollectionSourceData, id: i32) -> TileSetResult<&mut SceneTile> {
    data.scenes
        .get_mut(&id)
        .ok_or_tile_set(|| TileSetError::not_found("scene tile", id))
}

pub fn get_next_scene_tile_id(data: &SceneCollectionSourceData) -> i32 {
    data.next_scene_id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_allocated_past_overrides() {
        let mut scenes = create_scene_collection_source();
        assert_eq!(create_scene_tile(&mut scenes, "res://tree.tscn", Some(1)).expect("free id"), 1);
        assert_eq!(create_scene_tile(&mut scenes, "res://rock.tscn", None).expect("allocates"), 0);
        assert_eq!(get_next_scene_tile_id(&scenes), 2);
        assert!(matches!(
            create_scene_tile(&mut scenes, "res://bush.tscn", Some(0)),
            Err(TileSetError::DuplicateId { .. })
        ));
    }

    #[test]
    fn test_rename_and_remove() {
        let mut scenes = create_scene_collection_source();
        create_scene_tile(&mut scenes, "res://a.tscn", None).expect("allocates");
        create_scene_tile(&mut scenes, "res://b.tscn", None).expect("allocates");

        assert!(set_scene_tile_id(&mut scenes, 0, 1).is_err());
        set_scene_tile_id(&mut scenes, 0, 5).expect("free target");
        assert_eq!(get_scene_tile(&scenes, 5).expect("renamed").scene_path, "res://a.tscn");

        set_scene_tile_display_placeholder(&mut scenes, 5, true).expect("scene exists");
        assert!(get_scene_tile(&scenes, 5).expect("scene exists").display_placeholder);

        remove_scene_tile(&mut scenes, 5).expect("scene exists");
        assert!(matches!(remove_scene_tile(&mut scenes, 5), Err(TileSetError::NotFound { .. })));
        assert_eq!(get_next_scene_tile_id(&scenes), 2);
    }
}
