//! Horizontal strip composition

use image::{Rgb, RgbImage, imageops};

/// Concatenate tiles left to right with `padding` pixels of white on
/// the outer left and right edges.
///
/// The output width is the sum of tile widths plus `2 * padding`; the
/// height is the maximum tile height. Tiles are pasted at y = 0.
pub fn concat_horizontal(tiles: &[RgbImage], padding: u32) -> RgbImage {
    if tiles.is_empty() {
        return RgbImage::from_pixel(1, 1, Rgb([255, 255, 255]));
    }

    let total_width: u32 = tiles.iter().map(|t| t.width()).sum::<u32>() + padding * 2;
    let max_height = tiles.iter().map(|t| t.height()).max().unwrap_or(1);

    let mut strip = RgbImage::from_pixel(total_width, max_height, Rgb([255, 255, 255]));

    let mut x_offset = padding;
    for tile in tiles {
        imageops::replace(&mut strip, tile, x_offset as i64, 0);
        x_offset += tile.width();
    }

    strip
}
