//! Sign compositing
//!
//! Walks the planned rows letter by letter, drawing outlines and glyph sprites
//! onto a copy of the background while glow sprites collect on a separate
//! transparent layer. The glow layer is composited over the result once, at
//! the end.

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageFormat, RgbaImage};
use rand::Rng;
use tracing::debug;

use crate::config::SignConfig;
use crate::effects::{LetterSprites, synthesize_letter};
use crate::error::RenderError;
use crate::font::SignFont;
use crate::layout::{RowLayout, SECTION_COUNT, SignLayout, SignText, distribute_words};
use crate::raster::{self, Sprite};

/// Transparent accumulator for letter glows
pub struct GlowLayer {
    image: RgbaImage,
}

impl GlowLayer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    /// Merge one glow sprite into the layer
    pub fn accumulate(&mut self, sprite: Sprite) {
        sprite.paste_onto(&mut self.image);
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Composite the layer "over" `target`, consuming it
    pub fn composite_onto(self, target: &mut RgbaImage) {
        raster::alpha_composite(target, &self.image);
    }
}

/// Working state of one render
pub struct Compositor<'a> {
    config: &'a SignConfig,
    canvas: RgbaImage,
    glow: GlowLayer,
}

impl<'a> Compositor<'a> {
    /// Start from a copy of `base`
    pub fn new(base: &RgbaImage, config: &'a SignConfig) -> Self {
        let (width, height) = base.dimensions();
        Self {
            config,
            canvas: base.clone(),
            glow: GlowLayer::new(width, height),
        }
    }

    /// Draw one letter's layers
    pub fn draw_letter(&mut self, sprites: LetterSprites) {
        let LetterSprites {
            outline,
            glow,
            glyph,
            ..
        } = sprites;
        outline.draw(
            &mut self.canvas,
            self.config.outline_width,
            self.config.effects.outline_color,
        );
        self.glow.accumulate(glow);
        glyph.paste_onto(&mut self.canvas);
    }

    /// Synthesize and draw every letter of a row, left to right
    pub fn draw_row<R: Rng + ?Sized>(&mut self, row: &RowLayout, center_y: f32, rng: &mut R) {
        for slot in &row.slots {
            if let Some(sprites) = synthesize_letter(slot, center_y, &row.font, self.config, rng) {
                self.draw_letter(sprites);
            }
        }
    }

    /// The glow collected so far
    pub fn glow_layer(&self) -> &GlowLayer {
        &self.glow
    }

    /// Apply the glow layer and hand back the finished image
    pub fn finish(self) -> RgbaImage {
        let Self {
            mut canvas, glow, ..
        } = self;
        glow.composite_onto(&mut canvas);
        canvas
    }
}

/// Result of rendering onto an in-memory background
pub struct RenderedSign {
    pub image: RgbaImage,
    /// Section strings after word distribution
    pub rows: [String; SECTION_COUNT],
    /// Fitted rows, `None` for empty sections
    pub layouts: [Option<RowLayout>; SECTION_COUNT],
}

/// Render `text` onto a copy of `base`
pub fn render_onto<R: Rng + ?Sized>(
    base: &RgbaImage,
    text: &SignText,
    font: &SignFont,
    config: &SignConfig,
    rng: &mut R,
) -> RenderedSign {
    let (width, height) = base.dimensions();
    let layout = SignLayout::new(width, height, &config.layout);
    let rows = distribute_words(text);
    let layouts = layout.plan_rows(&rows, font, config.letter_spacing);

    let mut compositor = Compositor::new(base, config);
    for (section, row) in layout.sections.iter().zip(&layouts) {
        let Some(row) = row else {
            continue;
        };
        debug!(
            "Section {}: {:?} at {}px, x={:.1}",
            row.section,
            row.text,
            row.font.size(),
            row.start_x
        );
        compositor.draw_row(row, section.center_y(), rng);
    }

    RenderedSign {
        image: compositor.finish(),
        rows,
        layouts,
    }
}

/// Whether images saved in `format` keep an alpha channel
pub fn format_keeps_alpha(format: ImageFormat) -> bool {
    !matches!(format, ImageFormat::Jpeg)
}

/// Encode `image` for `path` and write it
///
/// Formats without alpha get an opaque copy. The file is only touched once
/// encoding has succeeded.
pub fn save_image(image: RgbaImage, path: &Path) -> Result<(), RenderError> {
    let encode_err = |source| RenderError::Encode {
        path: path.to_path_buf(),
        source,
    };
    let format = ImageFormat::from_path(path).map_err(encode_err)?;

    let image = if format_keeps_alpha(format) {
        DynamicImage::ImageRgba8(image)
    } else {
        DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(image).to_rgb8())
    };

    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), format)
        .map_err(encode_err)?;

    std::fs::write(path, &bytes).map_err(|source| RenderError::Write {
        path: path.to_path_buf(),
        source,
    })
}
