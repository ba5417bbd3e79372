//! Single labeled tile rendering

use crate::config::LayoutOptions;
use crate::error::Result;
use crate::font::CaptionFont;
use crate::render::text::draw_centered_text;
use ab_glyph::PxScale;
use image::{DynamicImage, GrayImage, Rgb, RgbImage, imageops};

/// Vertical gap between the QR bottom edge and the caption baseline area.
const CAPTION_OFFSET: u32 = 10;

/// Render one tile: the QR bitmap on a white background with the label
/// drawn centered in the caption band below it.
pub fn build_tile(
    qr: &GrayImage,
    label: &str,
    layout: &LayoutOptions,
    caption: &CaptionFont,
) -> Result<RgbImage> {
    let mut tile = RgbImage::from_pixel(
        layout.tile_width(),
        layout.tile_height(),
        Rgb([255, 255, 255]),
    );

    let qr_rgb = DynamicImage::ImageLuma8(qr.clone()).to_rgb8();
    imageops::replace(
        &mut tile,
        &qr_rgb,
        layout.padding as i64,
        layout.padding as i64,
    );

    if !label.is_empty() {
        let font = caption.font()?;
        let scale = PxScale::from(caption.size);
        let text_y = (layout.qr_size + layout.padding + CAPTION_OFFSET) as i32;
        draw_centered_text(&mut tile, &font, scale, text_y, label, Rgb([0, 0, 0]));
    }

    Ok(tile)
}
