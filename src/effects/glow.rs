//! Per-letter glow sprite

use image::{Rgba, RgbaImage};

use super::LetterBox;
use crate::config::SignConfig;
use crate::font::GlyphMask;
use crate::raster::{self, Sprite};

/// Blurred white glyph on a square canvas, positioned over the letter box
///
/// The canvas side is `glow_factor` × the larger box dimension. Its alpha
/// never exceeds `SignConfig::glow_alpha`.
pub fn glow_sprite(mask: Option<&GlyphMask>, letter: &LetterBox, config: &SignConfig) -> Sprite {
    let size = ((letter.width.max(letter.height) * config.effects.glow_factor) as u32).max(1);
    let mut canvas = RgbaImage::new(size, size);

    if let Some(mask) = mask {
        let x = (size / 2) as i64 - (letter.width / 2.0).floor() as i64;
        let y = (size / 2) as i64 - (letter.height / 2.0).floor() as i64;
        raster::fill_mask(&mut canvas, mask, x, y, Rgba([255, 255, 255, config.glow_alpha()]));
    }

    let blurred = raster::gaussian_blur(&canvas, config.glow_sigma());

    let side = size as f32;
    let x = (letter.x - (side - letter.width) / 2.0) as i64;
    let y = (letter.top() - (side - letter.height) / 2.0) as i64 - config.effects.lift;
    Sprite::new(blurred, x, y)
}
