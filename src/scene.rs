//! Seams to the host engine.
//!
//! The decoder only produces a [`MapLayout`]. Turning it into sprites and physics
//! bodies is the job of a [`SceneBuilder`]; turning a [`Gid`] into an image is the
//! job of an [`ImageResolver`].

use crate::ir_map::Gid;
use crate::map::{Collider, MapLayout};
use log::warn;
use macroquad::math::Vec2;
use std::collections::BTreeSet;

/// Looks up the image behind a tile id.
pub trait ImageResolver {
    /// Engine-side image reference.
    type Handle;

    /// `None` for [`Gid::EMPTY`] and for ids the resolver does not know.
    fn resolve_gid(&self, gid: Gid) -> Option<Self::Handle>;

    /// Native pixel size of the image, if known.
    fn native_size(&self, _gid: Gid) -> Option<Vec2> {
        None
    }
}

/// Receives placement calls for a layout.
pub trait SceneBuilder {
    /// Container that placed tiles and colliders are attached to.
    type LayerHandle;

    /// Called once per tile layer and once per object group.
    fn create_layer(&mut self, name: &str) -> Self::LayerHandle;

    /// `position` is the tile's top-left corner in Y-up pixels.
    fn place_tile(&mut self, layer: &Self::LayerHandle, gid: Gid, position: Vec2, sort_order: i32);

    /// `sort_order` is the group's, for drawing stamped tiles.
    fn place_collider(&mut self, layer: &Self::LayerHandle, collider: &Collider, sort_order: i32);
}

/// Drives `builder` through a layout: tile layers first, then collider groups, each
/// in document order.
pub fn build_scene<B: SceneBuilder>(layout: &MapLayout, builder: &mut B) {
    for layer in layout.layers() {
        let handle = builder.create_layer(&layer.name);
        for tile in &layer.tiles {
            builder.place_tile(&handle, tile.gid, tile.position, layer.sorting_order);
        }
    }

    for group in layout.collider_groups() {
        let handle = builder.create_layer(&group.name);
        for collider in &group.colliders {
            builder.place_collider(&handle, collider, group.sorting_order);
        }
    }
}

/// A used tile whose image does not match the map's declared tile size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileSizeMismatch {
    /// Offending tile.
    pub gid: Gid,
    /// Tile size from `<map>`.
    pub declared: Vec2,
    /// Size reported by the resolver.
    pub native: Vec2,
}

/// Advisory check of declared tile size against native image sizes.
///
/// Each distinct gid is reported once. Mismatches are logged and returned; they are
/// never an error.
pub fn check_tile_sizes<R: ImageResolver>(layout: &MapLayout, resolver: &R) -> Vec<TileSizeMismatch> {
    let info = layout.info();
    let declared = Vec2::new(info.tile_width as f32, info.tile_height as f32);

    let used: BTreeSet<Gid> = layout
        .layers()
        .iter()
        .flat_map(|l| l.tiles.iter().map(|t| t.gid))
        .chain(layout.colliders().filter_map(Collider::gid))
        .filter(|gid| !gid.is_empty())
        .collect();

    let mut out = Vec::new();
    for gid in used {
        let Some(native) = resolver.native_size(gid) else {
            continue;
        };
        if native != declared {
            warn!(
                "tile {} is {}x{} px but the map declares {}x{}; check the atlas' pixels-per-unit",
                gid.0, native.x, native.y, declared.x, declared.y
            );
            out.push(TileSizeMismatch {
                gid,
                declared,
                native,
            });
        }
    }
    out
}
