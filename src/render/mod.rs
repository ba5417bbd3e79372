//! Tile rendering and strip composition
//!
//! A tile is one QR code on a white background with a centered caption
//! beneath it; the strip is the horizontal concatenation of all tiles.

mod compose;
mod text;
mod tile;

pub use compose::concat_horizontal;
pub use text::{draw_centered_text, measure_text_width};
pub use tile::build_tile;
