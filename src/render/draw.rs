use super::atlas::TextureAtlas;
use super::command::DrawList;
use super::config::RenderConfig;
use crate::scene::ImageResolver;
use macroquad::prelude::*;

fn color([r, g, b, a]: [u8; 4]) -> Color {
    Color::from_rgba(r, g, b, a)
}

/// Draws a recorded layout. Must be called from inside a Macroquad frame.
pub fn draw_list(list: &DrawList, atlas: &TextureAtlas, config: &RenderConfig) {
    let origin = config
        .origin
        .map(Vec2::from)
        .unwrap_or_else(|| vec2(0.0, screen_height()));

    for cmd in &list.tiles {
        let Some(src) = atlas.resolve_gid(cmd.gid) else {
            continue;
        };
        let top_left = config.to_screen(cmd.dest, origin);

        draw_texture_ex(
            &atlas.texture,
            top_left.x,
            top_left.y,
            WHITE,
            DrawTextureParams {
                source: Some(src),
                dest_size: Some(src.size() * config.scale),
                ..Default::default()
            },
        );
    }

    if !config.show_colliders {
        return;
    }

    for shape in &list.shapes {
        let r = shape.rect;
        // screen top-left is the world top-left
        let top_left = config.to_screen(vec2(r.x, r.y + r.h), origin);
        let c = if shape.is_trigger {
            color(config.trigger_color)
        } else {
            color(config.solid_color)
        };
        draw_rectangle_lines(
            top_left.x,
            top_left.y,
            r.w * config.scale,
            r.h * config.scale,
            config.line_thickness,
            c,
        );
    }
}
