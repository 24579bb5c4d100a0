// src/ir_map.rs
use crate::properties::Properties;
use serde::Serialize;

/// Tile-graphic id, already shifted to zero-based (`raw - 1`).
///
/// A raw id of `0` becomes [`Gid::EMPTY`], meaning "render nothing".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Gid(pub i64);

impl Gid {
    /// The empty cell.
    pub const EMPTY: Gid = Gid(-1);

    /// Shifts a raw TMX id down by one.
    #[inline]
    pub fn from_raw(raw: u32) -> Self {
        Gid(i64::from(raw) - 1)
    }
    /// `true` for [`Gid::EMPTY`].
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 < 0
    }
    /// Zero-based index into an image table, `None` for empty cells.
    #[inline]
    pub fn index(self) -> Option<usize> {
        usize::try_from(self.0).ok()
    }
}

/// `<map>` metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MapInfo {
    /// Grid width in cells.
    pub width: u32,
    /// Grid height in cells.
    pub height: u32,
    /// Cell width in source pixels.
    pub tile_width: u32,
    /// Cell height in source pixels.
    pub tile_height: u32,
}

/// One `<tile>` entry of a layer's `<data>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    /// Zero-based id, [`Gid::EMPTY`] for `gid="0"`.
    pub gid: Gid,
}

/// A decoded `<layer>`.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerInfo {
    /// `name` attribute, empty when absent.
    pub name: String,
    /// Layer width in cells.
    pub width: u32,
    /// Layer height in cells.
    pub height: u32,
    /// `sortingOrder` property, `0` when absent.
    pub sorting_order: i32,
    /// The layer's own `<properties>`.
    pub properties: Properties,
    /// Row-major, first cell is the top-left of the source grid.
    pub cells: Vec<GridCell>,
}

/// A decoded `<object>`. Coordinates are in source pixels, Y down.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectSpec {
    /// `name` attribute, empty when absent.
    pub name: String,
    /// `type` (or `class`) attribute.
    pub kind: Option<String>,
    /// Stamped tile, when the object has a `gid`.
    pub gid: Option<Gid>,
    /// Left edge.
    pub x: f32,
    /// Top edge, or bottom edge for tile objects.
    pub y: f32,
    /// Pixel width, if given.
    pub width: Option<f32>,
    /// Pixel height, if given.
    pub height: Option<f32>,
    /// `isTriggered` property, `false` when absent.
    pub is_triggered: bool,
    /// The object's own `<properties>`.
    pub properties: Properties,
}

impl ObjectSpec {
    /// Pixel size, present only when both `width` and `height` were given.
    pub fn size(&self) -> Option<(f32, f32)> {
        Some((self.width?, self.height?))
    }
}

/// A decoded `<objectgroup>`.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectGroupInfo {
    /// `name` attribute, empty when absent.
    pub name: String,
    /// `sortingOrder` property, `0` when absent.
    pub sorting_order: i32,
    /// The group's own `<properties>`.
    pub properties: Properties,
    /// Document order.
    pub objects: Vec<ObjectSpec>,
}

/// Canonical, format-agnostic map.
#[derive(Debug, Clone, PartialEq)]
pub struct IrMap {
    /// `<map>` metadata.
    pub info: MapInfo,
    /// Draw order is document order.
    pub layers: Vec<LayerInfo>,
    /// Document order.
    pub object_groups: Vec<ObjectGroupInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_gid_is_shifted_down_by_one() {
        assert_eq!(Gid::from_raw(3), Gid(2));
        assert_eq!(Gid::from_raw(1), Gid(0));
        assert_eq!(Gid::from_raw(0), Gid::EMPTY);
        assert!(Gid::from_raw(0).is_empty());
        assert_eq!(Gid::from_raw(0).index(), None);
        assert_eq!(Gid::from_raw(u32::MAX), Gid(i64::from(u32::MAX) - 1));
    }

    #[test]
    fn object_size_needs_both_dimensions() {
        let mut obj = ObjectSpec {
            name: "wall".into(),
            kind: None,
            gid: None,
            x: 0.0,
            y: 0.0,
            width: Some(32.0),
            height: None,
            is_triggered: false,
            properties: Properties::default(),
        };
        assert_eq!(obj.size(), None);
        obj.height = Some(16.0);
        assert_eq!(obj.size(), Some((32.0, 16.0)));
    }
}
