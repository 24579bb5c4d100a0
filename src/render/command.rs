use crate::ir_map::{Gid, MapInfo};
use crate::map::{Collider, ColliderKind, MapLayout};
use crate::scene::{build_scene, SceneBuilder};
use macroquad::math::{vec2, Rect, Vec2};

/// One tile to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    /// Index into [`DrawList::layers`].
    pub layer_index: usize,
    /// Tile image.
    pub gid: Gid,
    /// Top-left corner in Y-up pixels.
    pub dest: Vec2,
    /// Sorting order of the owning layer or group.
    pub sort_order: i32,
}

/// Collider outline in Y-up pixel space; `rect.x/y` is the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugShape {
    /// Index into [`DrawList::layers`].
    pub layer_index: usize,
    /// Outline in pixels.
    pub rect: Rect,
    /// Selects the trigger outline colour.
    pub is_trigger: bool,
    /// Sorting order of the owning group.
    pub sort_order: i32,
}

/// A [`SceneBuilder`] that records what to draw.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    /// Layer and group names in creation order.
    pub layers: Vec<String>,
    /// Layer tiles and stamped object tiles.
    pub tiles: Vec<DrawCommand>,
    /// Collider outlines.
    pub shapes: Vec<DebugShape>,
    tile_size: Vec2,
}

impl DrawList {
    /// An empty list for a map with `info`'s tile size.
    pub fn new(info: &MapInfo) -> Self {
        Self {
            tile_size: vec2(info.tile_width as f32, info.tile_height as f32),
            ..Default::default()
        }
    }

    /// Records a whole layout, ordered by sorting order. Ties keep creation order.
    pub fn from_layout(layout: &MapLayout) -> Self {
        let mut list = Self::new(layout.info());
        build_scene(layout, &mut list);
        list.tiles.sort_by_key(|c| c.sort_order);
        list.shapes.sort_by_key(|s| s.sort_order);
        list
    }

    // Colliders live in cells; outlines are drawn in pixels.
    fn collider_rect(&self, collider: &Collider) -> Rect {
        let (min, size) = match collider.kind {
            ColliderKind::Box { size, offset } => (collider.position + offset - size * 0.5, size),
            // one cell anchored at its position
            ColliderKind::Point { .. } => (collider.position, Vec2::ONE),
        };
        let min = min * self.tile_size;
        let size = size * self.tile_size;
        Rect::new(min.x, min.y, size.x, size.y)
    }
}

impl SceneBuilder for DrawList {
    type LayerHandle = usize;

    fn create_layer(&mut self, name: &str) -> usize {
        self.layers.push(name.to_owned());
        self.layers.len() - 1
    }

    fn place_tile(&mut self, layer: &usize, gid: Gid, position: Vec2, sort_order: i32) {
        self.tiles.push(DrawCommand {
            layer_index: *layer,
            gid,
            dest: position,
            sort_order,
        });
    }

    fn place_collider(&mut self, layer: &usize, collider: &Collider, sort_order: i32) {
        if let Some(gid) = collider.gid().filter(|gid| !gid.is_empty()) {
            // point positions are the stamped tile's top-left corner in cells
            self.tiles.push(DrawCommand {
                layer_index: *layer,
                gid,
                dest: collider.position * self.tile_size,
                sort_order,
            });
        }

        let rect = self.collider_rect(collider);
        self.shapes.push(DebugShape {
            layer_index: *layer,
            rect,
            is_trigger: collider.is_trigger,
            sort_order,
        });
    }
}
