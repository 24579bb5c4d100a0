use crate::ir_map::Gid;
use crate::scene::ImageResolver;
use anyhow::Context;
use macroquad::prelude::*;
use serde::Deserialize;

/// A single image cut into a regular grid of tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct AtlasGrid {
    /// Tile width in image pixels.
    pub tile_w: u32,
    /// Tile height in image pixels.
    pub tile_h: u32,
    /// Tiles per image row.
    pub columns: u32,
    /// Number of tiles in the image.
    pub tilecount: u32,
    /// Gap between tiles, 0 if not used.
    #[serde(default)]
    pub spacing: u32,
    /// Border around the grid, 0 if not used.
    #[serde(default)]
    pub margin: u32,
}


// `None` when the grid would not fit in `u32`.
fn offset(margin: u32, index: u32, size: u32, spacing: u32) -> Option<u32> {
    size.checked_add(spacing)?
        .checked_mul(index)?
        .checked_add(margin)
}

impl AtlasGrid {
    /// Source rectangle of `gid` inside the atlas image.
    pub fn source_rect(&self, gid: Gid) -> Option<Rect> {
        let local = u32::try_from(gid.index()?).ok()?;
        if local >= self.tilecount || self.columns == 0 {
            return None;
        }

        let col = local % self.columns;
        let row = local / self.columns;
        let sx = offset(self.margin, col, self.tile_w, self.spacing)?;
        let sy = offset(self.margin, row, self.tile_h, self.spacing)?;

        Some(Rect::new(
            sx as f32,
            sy as f32,
            self.tile_w as f32,
            self.tile_h as f32,
        ))
    }
}

impl ImageResolver for AtlasGrid {
    type Handle = Rect;

    fn resolve_gid(&self, gid: Gid) -> Option<Rect> {
        self.source_rect(gid)
    }

    fn native_size(&self, gid: Gid) -> Option<Vec2> {
        self.source_rect(gid).map(|r| r.size())
    }
}

/// An [`AtlasGrid`] backed by a loaded texture.
pub struct TextureAtlas {
    /// The atlas image.
    pub texture: Texture2D,
    /// How `texture` is cut into tiles.
    pub grid: AtlasGrid,
}

impl TextureAtlas {
    /// Switches `texture` to nearest filtering.
    pub fn new(texture: Texture2D, grid: AtlasGrid) -> Self {
        texture.set_filter(FilterMode::Nearest);
        Self { texture, grid }
    }

    /// Loads the atlas image from `path`.
    pub async fn load(path: &str, grid: AtlasGrid) -> anyhow::Result<Self> {
        let tex: Texture2D = load_texture(path)
            .await
            .with_context(|| format!("Loading texture {}", path))?;
        Ok(Self::new(tex, grid))
    }
}

impl ImageResolver for TextureAtlas {
    type Handle = Rect;

    fn resolve_gid(&self, gid: Gid) -> Option<Rect> {
        self.grid.resolve_gid(gid)
    }

    fn native_size(&self, gid: Gid) -> Option<Vec2> {
        self.grid.native_size(gid)
    }
}
