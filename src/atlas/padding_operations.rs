//! Padded texture synthesis.
//!
//! The padded texture lays every cell out on a stride of
//! `texture_region_size + 2` and surrounds each frame with a 1px copy of its
//! own edge pixels, so linear filtering never samples a neighbor frame.
//!
//! Regeneration is deferred: mutations only mark the texture stale and the
//! work runs once at the next settle point (`update_padded_texture` or a
//! runtime texture read).

use super::atlas_data::{AtlasSourceData, FramePlacement, PackedRect};
use super::atlas_operations::{
    frame_coords, get_atlas_grid_size, get_tile, get_tile_texture_region, tile_pixel_size,
};
use crate::constants::TEXTURE_PADDING;
use crate::error::{TileSetError, TileSetResult};
use glam::IVec2;
use image::RgbaImage;
use rayon::prelude::*;

/// Mark the padded texture stale
pub fn queue_padded_texture_update(data: &mut AtlasSourceData) {
    data.padded_texture.invalidate();
}

/// Size of one padded cell
fn padded_cell_stride(texture_region_size: IVec2) -> IVec2 {
    texture_region_size + IVec2::splat(TEXTURE_PADDING * 2)
}

/// Pixel size of the padded texture for a grid
pub fn padded_texture_size(grid_size: IVec2, texture_region_size: IVec2) -> (u32, u32) {
    let size = grid_size * padded_cell_stride(texture_region_size);
    (size.x.max(0) as u32, size.y.max(0) as u32)
}

/// Top-left of a frame interior in the padded texture
pub fn padded_frame_position(frame_cell: IVec2, texture_region_size: IVec2) -> IVec2 {
    frame_cell * padded_cell_stride(texture_region_size) + IVec2::splat(TEXTURE_PADDING)
}

/// Source and destination of every frame of every tile, row-major
pub fn collect_frame_placements(data: &AtlasSourceData) -> Vec<FramePlacement> {
    let mut placements = Vec::new();
    for origin in &data.tile_ids {
        let Some(tile) = data.tiles.get(origin) else {
            continue;
        };
        for frame in 0..tile.animation_frames_durations.len() {
            let Ok(source) = get_tile_texture_region(data, *origin, frame) else {
                continue;
            };
            let cell = frame_coords(
                *origin,
                tile.size_in_atlas,
                tile.animation_columns,
                tile.animation_separation,
                frame,
            );
            let destination = padded_frame_position(cell, data.texture_region_size);
            placements.push(FramePlacement {
                source,
                destination_x: destination.x as u32,
                destination_y: destination.y as u32,
            });
        }
    }
    placements
}

/// Copy of `rect` with a 1px border replicating its edges
///
/// Border pixels take the nearest edge pixel, which also sets each corner to
/// the matching corner of the source rectangle. Returns `None` when the
/// rectangle has no pixels inside the source.
pub fn extrude_frame(source: &RgbaImage, rect: &PackedRect) -> Option<RgbaImage> {
    let x0 = rect.x.min(source.width());
    let y0 = rect.y.min(source.height());
    let width = rect.width.min(source.width() - x0);
    let height = rect.height.min(source.height() - y0);
    if width == 0 || height == 0 {
        return None;
    }

    let pad = TEXTURE_PADDING as u32;
    Some(RgbaImage::from_fn(width + pad * 2, height + pad * 2, |x, y| {
        let sx = x.saturating_sub(pad).min(width - 1);
        let sy = y.saturating_sub(pad).min(height - 1);
        *source.get_pixel(x0 + sx, y0 + sy)
    }))
}

/// Build a padded texture from a source image and frame placements
///
/// Pure: the source is never written. Frames are extruded in parallel and
/// then composited in placement order.
pub fn synthesize_padded_texture(
    source: &RgbaImage,
    width: u32,
    height: u32,
    placements: &[FramePlacement],
) -> RgbaImage {
    let frames: Vec<(&FramePlacement, RgbaImage)> = placements
        .par_iter()
        .filter_map(|placement| match extrude_frame(source, &placement.source) {
            Some(frame) => Some((placement, frame)),
            None => {
                log::warn!(
                    "[padding_operations::synthesize_padded_texture] Frame {:?} lies outside the texture, skipped",
                    placement.source
                );
                None
            }
        })
        .collect();

    let mut padded = RgbaImage::new(width, height);
    let pad = TEXTURE_PADDING as i64;
    for (placement, frame) in &frames {
        image::imageops::replace(
            &mut padded,
            frame,
            placement.destination_x as i64 - pad,
            placement.destination_y as i64 - pad,
        );
    }
    padded
}

fn build_padded_texture(data: &AtlasSourceData) -> Option<RgbaImage> {
    if !data.use_texture_padding {
        return None;
    }
    let source = data.texture.as_ref()?;

    let (width, height) = padded_texture_size(get_atlas_grid_size(data), data.texture_region_size);
    let placements = collect_frame_placements(data);
    log::debug!(
        "[padding_operations::build_padded_texture] Regenerating {}x{} padded texture for {} frames",
        width,
        height,
        placements.len()
    );
    Some(synthesize_padded_texture(source, width, height, &placements))
}

/// Settle point: regenerate the padded texture if it is stale
pub fn update_padded_texture(data: &mut AtlasSourceData) {
    if !data.padded_texture.is_dirty() {
        return;
    }
    let rebuilt = build_padded_texture(data);
    data.padded_texture.get_or_rebuild(|| rebuilt);
}

/// Texture renderers should sample: padded when enabled, else the source
pub fn get_runtime_texture(data: &mut AtlasSourceData) -> Option<&RgbaImage> {
    update_padded_texture(data);
    if data.use_texture_padding {
        data.padded_texture.peek().and_then(|texture| texture.as_ref())
    } else {
        data.texture.as_ref()
    }
}

/// Region of a frame in the runtime texture
pub fn get_runtime_tile_texture_region(
    data: &AtlasSourceData,
    origin: IVec2,
    frame: usize,
) -> TileSetResult<PackedRect> {
    if !data.use_texture_padding {
        return get_tile_texture_region(data, origin, frame);
    }

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
    let position = padded_frame_position(cell, data.texture_region_size);
    let size = tile_pixel_size(data, tile);

    Ok(PackedRect {
        x: position.x as u32,
        y: position.y as u32,
        width: size.x as u32,
        height: size.y as u32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::animation_operations::set_tile_animation_frames_count;
    use crate::atlas::atlas_operations::{create_atlas_source, create_tile, move_tile_in_atlas};
    use crate::config::AtlasSourceConfig;
    use image::Rgba;

    /// 4x4 texture of 2x2 cells, every pixel encodes its own position
    fn gradient_texture() -> RgbaImage {
        RgbaImage::from_fn(4, 4, |x, y| Rgba([x as u8, y as u8, 0, 255]))
    }

    fn small_atlas() -> AtlasSourceData {
        let config = AtlasSourceConfig {
            texture_region_size: IVec2::new(2, 2),
            ..Default::default()
        };
        create_atlas_source(&config, Some(gradient_texture())).expect("Failed to create atlas")
    }

    #[test]
    fn test_extrude_replicates_edges_and_corners() {
        let source = gradient_texture();
        let rect = PackedRect { x: 2, y: 0, width: 2, height: 2 };
        let frame = extrude_frame(&source, &rect).expect("rect inside texture");

        assert_eq!(frame.dimensions(), (4, 4));
        // interior
        assert_eq!(frame.get_pixel(1, 1), source.get_pixel(2, 0));
        assert_eq!(frame.get_pixel(2, 2), source.get_pixel(3, 1));
        // edges
        assert_eq!(frame.get_pixel(1, 0), source.get_pixel(2, 0));
        assert_eq!(frame.get_pixel(3, 2), source.get_pixel(3, 1));
        // corners
        assert_eq!(frame.get_pixel(0, 0), source.get_pixel(2, 0));
        assert_eq!(frame.get_pixel(3, 0), source.get_pixel(3, 0));
        assert_eq!(frame.get_pixel(0, 3), source.get_pixel(2, 1));
        assert_eq!(frame.get_pixel(3, 3), source.get_pixel(3, 1));
    }

    #[test]
    fn test_extrude_outside_texture() {
        let source = gradient_texture();
        let rect = PackedRect { x: 8, y: 0, width: 2, height: 2 };
        assert!(extrude_frame(&source, &rect).is_none());
    }

    #[test]
    fn test_padded_layout() {
        let mut atlas = small_atlas();
        create_tile(&mut atlas, IVec2::new(1, 0), IVec2::ONE).expect("Failed to create tile");

        let padded = get_runtime_texture(&mut atlas).expect("padding enabled").clone();
        assert_eq!(padded.dimensions(), (8, 8));

        let region = get_runtime_tile_texture_region(&atlas, IVec2::new(1, 0), 0)
            .expect("frame 0 exists");
        assert_eq!(region, PackedRect { x: 5, y: 1, width: 2, height: 2 });

        let source = gradient_texture();
        assert_eq!(padded.get_pixel(5, 1), source.get_pixel(2, 0));
        assert_eq!(padded.get_pixel(4, 0), source.get_pixel(2, 0));
        assert_eq!(padded.get_pixel(7, 3), source.get_pixel(3, 1));
        // empty cell stays transparent
        assert_eq!(padded.get_pixel(1, 1), &Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_animation_frames_are_padded() {
        let mut atlas = small_atlas();
        create_tile(&mut atlas, IVec2::ZERO, IVec2::ONE).expect("Failed to create tile");
        set_tile_animation_frames_count(&mut atlas, IVec2::ZERO, 2).expect("Failed to set frames");

        assert_eq!(collect_frame_placements(&atlas).len(), 2);
        let region = get_runtime_tile_texture_region(&atlas, IVec2::ZERO, 1).expect("frame 1 exists");
        assert_eq!((region.x, region.y), (5, 1));
    }

    #[test]
    fn test_updates_are_coalesced() {
        let mut atlas = small_atlas();
        create_tile(&mut atlas, IVec2::ZERO, IVec2::ONE).expect("Failed to create tile");
        move_tile_in_atlas(&mut atlas, IVec2::ZERO, Some(IVec2::new(1, 1)), None)
            .expect("Failed to move tile");
        create_tile(&mut atlas, IVec2::ZERO, IVec2::ONE).expect("Failed to create tile");

        assert!(atlas.padded_texture.is_dirty());
        update_padded_texture(&mut atlas);
        update_padded_texture(&mut atlas);
        get_runtime_texture(&mut atlas);
        assert_eq!(atlas.padded_texture.rebuild_count(), 1);
    }

    #[test]
    fn test_padding_disabled_uses_source() {
        let mut atlas = small_atlas();
        atlas.use_texture_padding = false;
        create_tile(&mut atlas, IVec2::new(1, 1), IVec2::ONE).expect("Failed to create tile");

        assert_eq!(get_runtime_texture(&mut atlas).map(|t| t.dimensions()), Some((4, 4)));
        let region = get_runtime_tile_texture_region(&atlas, IVec2::new(1, 1), 0)
            .expect("frame 0 exists");
        assert_eq!(region, PackedRect { x: 2, y: 2, width: 2, height: 2 });
    }
}
