//! Macroquad adapter: a [`SceneBuilder`](crate::SceneBuilder) that records draw
//! commands and an [`ImageResolver`](crate::ImageResolver) over a grid atlas.

mod atlas;
mod command;
mod config;
mod draw;

pub use atlas::{AtlasGrid, TextureAtlas};
pub use command::{DebugShape, DrawCommand, DrawList};
pub use config::RenderConfig;
pub use draw::draw_list;
