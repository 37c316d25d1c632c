//! Shaded, stretched and tilted glyph sprite

use image::{Rgba, RgbaImage};
use rand::Rng;

use super::{LetterBox, gleam};
use crate::config::SignConfig;
use crate::font::GlyphMask;
use crate::raster::{self, Sprite};

/// Random per-letter wear
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flaw {
    /// Glyph offset inside the scratch canvas
    pub offset_x: i64,
    pub offset_y: i64,
    /// Glyph alpha
    pub opacity: u8,
    /// Multiplier applied to the stretched size
    pub size_variation: f32,
}

impl Flaw {
    /// Draw offset, opacity and size variation, in that order
    pub fn roll<R: Rng + ?Sized>(letter: &LetterBox, config: &SignConfig, rng: &mut R) -> Self {
        let effects = &config.effects;
        let jitter = |rng: &mut R, extent: f32| {
            ((rng.random::<f32>() - 0.5) * 2.0 * effects.flaw_jitter * extent) as i64
        };
        let offset_x = jitter(&mut *rng, letter.width);
        let offset_y = jitter(&mut *rng, letter.height);

        let (low, high) = effects.opacity_range;
        let opacity_factor = low + rng.random::<f32>() * (high - low);
        let opacity = (effects.base_alpha as f32 * opacity_factor).clamp(0.0, 255.0) as u8;

        let variation = effects.size_variation;
        let size_variation = 1.0 - variation + rng.random::<f32>() * 2.0 * variation;

        Self {
            offset_x,
            offset_y,
            opacity,
            size_variation,
        }
    }
}

/// Three stacked passes, one pixel apart, lighter on top and darker below
fn gradient_canvas(
    mask: Option<&GlyphMask>,
    letter: &LetterBox,
    config: &SignConfig,
    flaw: &Flaw,
) -> RgbaImage {
    let (fw, fh) = config.effects.gradient_factor;
    let width = ((letter.width * fw) as u32).max(1);
    let height = ((letter.height * fh) as u32).max(1);
    let mut canvas = RgbaImage::new(width, height);

    let Some(mask) = mask else {
        return canvas;
    };

    let x = (width / 2) as i64 - (letter.width / 2.0).floor() as i64 + flaw.offset_x;
    let y = (height / 2) as i64 - (letter.height / 2.0).floor() as i64 + flaw.offset_y;
    for (dy, shade) in [-1, 0, 1].into_iter().zip(config.effects.shades) {
        raster::fill_mask(
            &mut canvas,
            mask,
            x,
            y + dy,
            Rgba([shade, shade, shade, flaw.opacity]),
        );
    }
    canvas
}

/// Build the glyph sprite for one letter
///
/// The shaded glyph is resized to the box width and `vertical_stretch` × the
/// box height (both scaled by the flaw's size variation), tilted without
/// growing, then centred on a larger transparent canvas. A gleam may be added
/// before the sprite is handed back.
pub fn glyph_sprite<R: Rng + ?Sized>(
    mask: Option<&GlyphMask>,
    letter: &LetterBox,
    config: &SignConfig,
    rng: &mut R,
) -> Sprite {
    let flaw = Flaw::roll(letter, config, rng);
    let effects = &config.effects;

    let (sw, sh) = effects.sprite_factor;
    let width = ((letter.width * sw) as u32).max(1);
    let height = ((letter.height * sh) as u32).max(1);
    let mut canvas = RgbaImage::new(width, height);
    let (cx, cy) = ((width / 2) as i64, (height / 2) as i64);

    let shaded = gradient_canvas(mask, letter, config, &flaw);
    let stretched = raster::resize(
        &shaded,
        (letter.width * flaw.size_variation) as u32,
        (letter.height * effects.vertical_stretch * flaw.size_variation) as u32,
    );
    let tilted = raster::rotate_about_center(&stretched, config.rotation_degrees);
    raster::paste(
        &mut canvas,
        &tilted,
        cx - (tilted.width() / 2) as i64,
        cy - (tilted.height() / 2) as i64,
    );

    if rng.random_bool(effects.gleam_probability.clamp(0.0, 1.0)) {
        if let Some(spot) = gleam::gleam_sprite(letter, (cx, cy), effects.gleam_peak_alpha, rng) {
            spot.paste_onto(&mut canvas);
        }
    }

    let x = (letter.x - ((width as f32 - letter.width) / 2.0).floor()) as i64;
    let y = (letter.top() - ((height as f32 - letter.height) / 2.0).floor()) as i64 - effects.lift;
    Sprite::new(canvas, x, y)
}
