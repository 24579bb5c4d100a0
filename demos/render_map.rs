use macroquad::prelude::*;
use tmx_layout::render::{draw_list, AtlasGrid, DrawList, RenderConfig, TextureAtlas};
use tmx_layout::{check_tile_sizes, MapLayout};

const TILE: u16 = 16;
const COLUMNS: u16 = 4;
const ROWS: u16 = 2;

fn window_conf() -> Conf {
    Conf {
        window_title: "TMX Layout".into(),
        window_width: 1280,
        window_height: 720,
        ..Default::default()
    }
}

/// A flat-coloured 4x2 atlas so the demo needs no image files.
fn procedural_atlas() -> TextureAtlas {
    let palette: [[u8; 3]; 8] = [
        [40, 44, 70],
        [90, 160, 70],
        [140, 100, 60],
        [230, 200, 60],
        [250, 220, 90],
        [200, 80, 80],
        [80, 80, 200],
        [200, 200, 200],
    ];
    let (w, h) = (TILE * COLUMNS, TILE * ROWS);
    let mut bytes = Vec::with_capacity(w as usize * h as usize * 4);
    for y in 0..h {
        for x in 0..w {
            let idx = (y / TILE) * COLUMNS + x / TILE;
            let [r, g, b] = palette[idx as usize];
            // darken the cell border so tiles are distinguishable
            let edge = x % TILE == 0 || y % TILE == 0;
            let k = if edge { 2 } else { 1 };
            bytes.extend_from_slice(&[r / k, g / k, b / k, 255]);
        }
    }

    TextureAtlas::new(
        Texture2D::from_rgba8(w, h, &bytes),
        AtlasGrid {
            tile_w: TILE as u32,
            tile_h: TILE as u32,
            columns: COLUMNS as u32,
            tilecount: (COLUMNS * ROWS) as u32,
            spacing: 0,
            margin: 0,
        },
    )
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    let layout = MapLayout::load("assets/demo.tmx").expect("Failed to load map");
    let atlas = procedural_atlas();
    check_tile_sizes(&layout, &atlas);

    let list = DrawList::from_layout(&layout);
    let config = RenderConfig {
        scale: 4.0,
        ..Default::default()
    };

    println!("layers={}", layout.layers().len());
    println!("colliders={}", layout.colliders().count());

    loop {
        clear_background(BLACK);

        draw_list(&list, &atlas, &config);

        draw_text(
            &format!("FPS: {}", get_fps()),
            screen_width() - 135.0,
            55.0,
            30.0,
            RED,
        );

        next_frame().await;
    }
}
