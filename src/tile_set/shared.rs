//! Thread-safe tile set handle.
//!
//! The tile set itself is single-threaded. Embedders that share it wrap it
//! in a lock and hand background readers an immutable index snapshot
//! instead of a live reference.

use super::tile_set_data::TileSetData;
use crate::terrain::{get_terrain_index, TerrainPatternIndex};
use parking_lot::RwLock;
use std::sync::Arc;

/// Thread-safe shared tile set (Arc<RwLock<>>)
pub type SharedTileSet = Arc<RwLock<TileSetData>>;

pub fn create_shared_tile_set(data: TileSetData) -> SharedTileSet {
    Arc::new(RwLock::new(data))
}

/// Settle the terrain index under the write lock and return a copy of it
///
/// The copy stays valid after the lock is released, so previews can read it
/// while the tile set keeps changing.
pub fn snapshot_terrain_index(shared: &SharedTileSet) -> Arc<TerrainPatternIndex> {
    let mut data = shared.write();
    Arc::new(get_terrain_index(&mut data).clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TileSetConfig;
    use crate::terrain::add_terrain_set;
    use crate::tile_set::create_tile_set;

    #[test]
    fn test_snapshot_survives_later_edits() {
        let data = create_tile_set(&TileSetConfig::default()).expect("Failed to create tile set");
        let shared = create_shared_tile_set(data);
        add_terrain_set(&mut shared.write(), None);

        let snapshot = snapshot_terrain_index(&shared);
        assert_eq!(snapshot.per_terrain_set.len(), 1);

        add_terrain_set(&mut shared.write(), None);
        assert_eq!(snapshot.per_terrain_set.len(), 1);
        assert_eq!(snapshot_terrain_index(&shared).per_terrain_set.len(), 2);
    }

    #[test]
    fn test_snapshot_from_other_thread() {
        let data = create_tile_set(&TileSetConfig::default()).expect("Failed to create tile set");
        let shared = create_shared_tile_set(data);
        add_terrain_set(&mut shared.write(), None);

        let handle = {
            let shared = Arc::clone(&shared);
            std::thread::spawn(move || snapshot_terrain_index(&shared).per_terrain_set.len())
        };
        assert_eq!(handle.join().expect("Failed to join snapshot thread"), 1);
    }
}
