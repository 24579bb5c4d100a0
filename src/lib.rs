#![warn(missing_docs)]

//! Tiled TMX decoder producing engine-agnostic tile & collider layouts.
//!
//! ```no_run
//! let layout = tmx_layout::decode(&std::fs::read_to_string("level.tmx")?)?;
//! for layer in layout.layers() {
//!     println!("{}: {} tiles", layer.name, layer.tiles.len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod ir_map;
mod loader {
    pub mod tmx_loader;
}
mod map;
mod placement;
mod properties;
pub mod render;
mod scene;

pub use error::{MapError, PropertyType};
pub use ir_map::{Gid, GridCell, IrMap, LayerInfo, MapInfo, ObjectGroupInfo, ObjectSpec};
pub use loader::tmx_loader::{decode_tmx_to_ir, load_map_file};
pub use map::{
    Collider, ColliderKind, ColliderPlacement, LayerPlacement, MapLayout, TilePlacement,
};
pub use placement::{
    box_collider_position, box_collider_size, point_collider_position, tile_world_position,
    BOX_COLLIDER_OFFSET,
};
pub use properties::{FromProperty, Properties};
pub use scene::{build_scene, check_tile_sizes, ImageResolver, SceneBuilder, TileSizeMismatch};

/// Decodes TMX text into a [`MapLayout`].
pub fn decode(text: &str) -> Result<MapLayout, MapError> {
    MapLayout::decode(text)
}
