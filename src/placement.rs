//! Source grid (top-left origin, Y down) to placement space (bottom-left origin, Y up).
//!
//! Tiles are placed in pixels. Colliders are placed in cells, i.e. pixel
//! coordinates divided by the map's tile size.

use crate::ir_map::MapInfo;
use macroquad::math::{vec2, Vec2};

/// Box colliders are centred on their cell.
pub const BOX_COLLIDER_OFFSET: Vec2 = Vec2::new(0.5, 0.5);

/// `(row, column)` of a row-major cell index, row 0 being the top of the source grid.
#[inline]
pub fn cell_coords(index: usize, layer_width: u32) -> (u32, u32) {
    let width = layer_width.max(1) as usize;
    ((index / width) as u32, (index % width) as u32)
}

/// World position of a tile cell.
///
/// The top source row lands at `layer_height * tile_height`, the bottom row at
/// `tile_height`.
#[inline]
pub fn tile_world_position(row: u32, column: u32, layer_height: u32, info: &MapInfo) -> Vec2 {
    vec2(
        column as f32 * info.tile_width as f32,
        (layer_height as f32 - row as f32) * info.tile_height as f32,
    )
}

/// Position of a tile-stamped object.
#[inline]
pub fn point_collider_position(x: f32, y: f32, info: &MapInfo) -> Vec2 {
    vec2(
        x / info.tile_width as f32,
        (info.height as f32 + 1.0) - y / info.tile_height as f32,
    )
}

/// Position of a sized object.
#[inline]
pub fn box_collider_position(x: f32, y: f32, info: &MapInfo) -> Vec2 {
    vec2(
        x / info.tile_width as f32,
        (info.height as f32 - 1.0) - y / info.tile_height as f32,
    )
}

/// Pixel size converted to cells.
#[inline]
pub fn box_collider_size(width: f32, height: f32, info: &MapInfo) -> Vec2 {
    vec2(
        width / info.tile_width as f32,
        height / info.tile_height as f32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const INFO: MapInfo = MapInfo {
        width: 3,
        height: 2,
        tile_width: 32,
        tile_height: 32,
    };

    #[test]
    fn cell_coords_are_row_major() {
        assert_eq!(cell_coords(0, 3), (0, 0));
        assert_eq!(cell_coords(2, 3), (0, 2));
        assert_eq!(cell_coords(5, 3), (1, 2));
    }

    #[test]
    fn tiles_flip_y() {
        assert_eq!(tile_world_position(0, 0, 2, &INFO), vec2(0.0, 64.0));
        assert_eq!(tile_world_position(1, 2, 2, &INFO), vec2(64.0, 32.0));
    }

    #[test]
    fn non_square_tiles_scale_each_axis() {
        let info = MapInfo {
            tile_width: 16,
            tile_height: 8,
            ..INFO
        };
        assert_eq!(tile_world_position(0, 1, 2, &info), vec2(16.0, 16.0));
    }

    #[test]
    fn collider_positions_are_in_cells() {
        assert_eq!(point_collider_position(32.0, 64.0, &INFO), vec2(1.0, 1.0));
        assert_eq!(box_collider_position(0.0, 32.0, &INFO), vec2(0.0, 0.0));
        assert_eq!(box_collider_position(16.0, 0.0, &INFO), vec2(0.5, 1.0));
        assert_eq!(box_collider_size(64.0, 16.0, &INFO), vec2(2.0, 0.5));
    }
}
