use anyhow::Context;
use macroquad::math::{vec2, Vec2};
use serde::Deserialize;
use std::path::Path;

fn one() -> f32 {
    1.0
}
fn two() -> f32 {
    2.0
}
fn default_true() -> bool {
    true
}
fn solid_color() -> [u8; 4] {
    [255, 64, 64, 255]
}
fn trigger_color() -> [u8; 4] {
    [64, 200, 255, 255]
}

/// How the Macroquad adapter puts a layout on screen.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RenderConfig {
    /// Screen pixels per map pixel.
    #[serde(default = "one")]
    pub scale: f32,
    /// Screen position of the world origin. Defaults to the bottom-left of the window.
    #[serde(default)]
    pub origin: Option<[f32; 2]>,
    /// Draw collider outlines.
    #[serde(default = "default_true")]
    pub show_colliders: bool,
    /// RGBA outline of solid colliders.
    #[serde(default = "solid_color")]
    pub solid_color: [u8; 4],
    /// RGBA outline of trigger colliders.
    #[serde(default = "trigger_color")]
    pub trigger_color: [u8; 4],
    /// Outline width in screen pixels.
    #[serde(default = "two")]
    pub line_thickness: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            scale: one(),
            origin: None,
            show_colliders: default_true(),
            solid_color: solid_color(),
            trigger_color: trigger_color(),
            line_thickness: two(),
        }
    }
}

impl RenderConfig {
    /// Parses a JSON config; missing keys take their defaults.
    pub fn from_json_str(txt: &str) -> serde_json::Result<Self> {
        serde_json::from_str(txt)
    }

    /// Reads and parses a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let p = path.as_ref();
        let txt = std::fs::read_to_string(p)
            .with_context(|| format!("Reading render config {}", p.display()))?;
        Self::from_json_str(&txt).with_context(|| format!("Parsing render config {}", p.display()))
    }

    /// Maps a Y-up world point onto Y-down screen space.
    pub fn to_screen(&self, world: Vec2, origin: Vec2) -> Vec2 {
        vec2(origin.x + world.x * self.scale, origin.y - world.y * self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let cfg = RenderConfig::from_json_str("{}").expect("config");
        assert_eq!(cfg, RenderConfig::default());
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = RenderConfig::from_json_str(
            r#"{ "scale": 3.0, "origin": [10.0, 500.0], "show_colliders": false }"#,
        )
        .expect("config");
        assert_eq!(cfg.scale, 3.0);
        assert_eq!(cfg.origin, Some([10.0, 500.0]));
        assert!(!cfg.show_colliders);
        assert_eq!(cfg.line_thickness, 2.0);
    }

    #[test]
    fn world_y_up_becomes_screen_y_down() {
        let cfg = RenderConfig {
            scale: 2.0,
            ..Default::default()
        };
        let origin = vec2(0.0, 600.0);
        assert_eq!(cfg.to_screen(vec2(16.0, 32.0), origin), vec2(32.0, 536.0));
    }

    #[test]
    fn unknown_types_are_rejected() {
        assert!(RenderConfig::from_json_str(r#"{ "scale": "big" }"#).is_err());
    }
}
