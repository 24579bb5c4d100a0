use crate::error::MapError;
use crate::ir_map::*;
use crate::loader::tmx_loader::{decode_tmx_to_ir, load_map_file};
use crate::placement::*;
use crate::properties::Properties;
use log::debug;
use macroquad::math::Vec2;
use serde::{Serialize, Serializer};
use std::path::Path;

fn ser_vec2<S: Serializer>(v: &Vec2, s: S) -> Result<S::Ok, S::Error> {
    [v.x, v.y].serialize(s)
}

/// A non-empty cell of a tile layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TilePlacement {
    /// Row-major index into the source grid.
    pub index: usize,
    /// Source row, 0 is the top.
    pub row: u32,
    /// Source column, 0 is the left.
    pub column: u32,
    /// Top-left corner in Y-up pixel space.
    #[serde(serialize_with = "ser_vec2")]
    pub position: Vec2,
    /// Never [`Gid::EMPTY`].
    pub gid: Gid,
}

/// A tile layer, ready to be handed to a scene builder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerPlacement {
    /// Layer name, possibly empty.
    pub name: String,
    /// Width in cells.
    pub width: u32,
    /// Height in cells.
    pub height: u32,
    /// Render order hint for every tile of the layer.
    pub sorting_order: i32,
    /// Custom layer properties.
    pub properties: Properties,
    /// Empty cells are omitted.
    pub tiles: Vec<TilePlacement>,
}

impl LayerPlacement {
    /// Scene-object name of a tile: `Tile_{column}_{n}` with `n` counting rows up from
    /// the bottom, starting at 1.
    pub fn tile_name(&self, tile: &TilePlacement) -> String {
        format!("Tile_{}_{}", tile.column, self.height.saturating_sub(tile.row))
    }
}

/// Shape of a collider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColliderKind {
    /// Stamped from a tile; the host may also draw `gid` at the collider.
    Point {
        /// Image of the stamped tile.
        gid: Gid,
    },
    /// Axis-aligned box, in cells.
    Box {
        /// Width and height in cells.
        #[serde(serialize_with = "ser_vec2")]
        size: Vec2,
        /// Centre relative to `position`.
        #[serde(serialize_with = "ser_vec2")]
        offset: Vec2,
    },
}

/// One collider descriptor. Positions are in cells, Y up.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Collider {
    /// Name of the object that produced it.
    pub object: String,
    /// `type` of that object.
    pub object_type: Option<String>,
    /// Point or box.
    #[serde(flatten)]
    pub kind: ColliderKind,
    /// Anchor in cells.
    #[serde(serialize_with = "ser_vec2")]
    pub position: Vec2,
    /// `true`: event-only, `false`: solid.
    pub is_trigger: bool,
}

impl Collider {
    /// Box size in cells, `None` for point colliders.
    pub fn size(&self) -> Option<Vec2> {
        match self.kind {
            ColliderKind::Box { size, .. } => Some(size),
            ColliderKind::Point { .. } => None,
        }
    }

    /// Stamped tile, `None` for box colliders.
    pub fn gid(&self) -> Option<Gid> {
        match self.kind {
            ColliderKind::Point { gid } => Some(gid),
            ColliderKind::Box { .. } => None,
        }
    }
}

/// An object group with its colliders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColliderPlacement {
    /// Group name, possibly empty.
    pub name: String,
    /// Render order hint for stamped tiles of the group.
    pub sorting_order: i32,
    /// Custom group properties.
    pub properties: Properties,
    /// Per object: point collider first, then box collider.
    pub colliders: Vec<Collider>,
}

/// Fully resolved map: what to place and where.
///
/// Built in one pass from a decoded document and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapLayout {
    info: MapInfo,
    layers: Vec<LayerPlacement>,
    collider_groups: Vec<ColliderPlacement>,
}

fn place_layer(layer: LayerInfo, info: &MapInfo) -> LayerPlacement {
    let tiles = layer
        .cells
        .iter()
        .enumerate()
        .filter(|(_, cell)| !cell.gid.is_empty())
        .map(|(index, cell)| {
            let (row, column) = cell_coords(index, layer.width);
            TilePlacement {
                index,
                row,
                column,
                position: tile_world_position(row, column, layer.height, info),
                gid: cell.gid,
            }
        })
        .collect();

    LayerPlacement {
        name: layer.name,
        width: layer.width,
        height: layer.height,
        sorting_order: layer.sorting_order,
        properties: layer.properties,
        tiles,
    }
}

fn object_colliders(obj: &ObjectSpec, info: &MapInfo, out: &mut Vec<Collider>) {
    let collider = |kind, position| Collider {
        object: obj.name.clone(),
        object_type: obj.kind.clone(),
        kind,
        position,
        is_trigger: obj.is_triggered,
    };

    if let Some(gid) = obj.gid {
        out.push(collider(
            ColliderKind::Point { gid },
            point_collider_position(obj.x, obj.y, info),
        ));
    }
    if let Some((w, h)) = obj.size() {
        out.push(collider(
            ColliderKind::Box {
                size: box_collider_size(w, h, info),
                offset: BOX_COLLIDER_OFFSET,
            },
            box_collider_position(obj.x, obj.y, info),
        ));
    }
}

fn place_object_group(group: ObjectGroupInfo, info: &MapInfo) -> ColliderPlacement {
    let mut colliders = Vec::new();
    for obj in &group.objects {
        object_colliders(obj, info, &mut colliders);
    }

    ColliderPlacement {
        name: group.name,
        sorting_order: group.sorting_order,
        properties: group.properties,
        colliders,
    }
}

impl MapLayout {
    /// Decodes TMX text into a layout.
    pub fn decode(text: &str) -> Result<Self, MapError> {
        decode_tmx_to_ir(text).map(Self::from_ir)
    }

    /// Reads and decodes a `.tmx` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapError> {
        load_map_file(path).map(Self::from_ir)
    }

    /// Places every layer and object group of a decoded map.
    pub fn from_ir(ir: IrMap) -> Self {
        let info = ir.info;

        let layers: Vec<_> = ir
            .layers
            .into_iter()
            .map(|layer| place_layer(layer, &info))
            .collect();

        let collider_groups: Vec<_> = ir
            .object_groups
            .into_iter()
            .map(|group| place_object_group(group, &info))
            .collect();

        let layout = Self {
            info,
            layers,
            collider_groups,
        };
        debug!(
            "assembled layout: {} tiles in {} layers, {} colliders in {} groups",
            layout.tile_count(),
            layout.layers.len(),
            layout.colliders().count(),
            layout.collider_groups.len()
        );
        layout
    }

    /// `<map>` metadata.
    pub fn info(&self) -> &MapInfo {
        &self.info
    }

    /// Tile layers in document order, which is also creation order.
    pub fn layers(&self) -> &[LayerPlacement] {
        &self.layers
    }

    /// Object groups in document order.
    pub fn collider_groups(&self) -> &[ColliderPlacement] {
        &self.collider_groups
    }

    /// Every collider of every group, in document order.
    pub fn colliders(&self) -> impl Iterator<Item = &Collider> {
        self.collider_groups.iter().flat_map(|g| g.colliders.iter())
    }

    /// Non-empty tiles over all layers.
    pub fn tile_count(&self) -> usize {
        self.layers.iter().map(|l| l.tiles.len()).sum()
    }

    /// Pretty-printed JSON snapshot of the layout.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
