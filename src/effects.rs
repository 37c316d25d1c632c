//! Letter effect synthesizer
//!
//! Builds the layered look of one sign letter:
//!
//! - `outline`: tilted thin box around the letter
//! - `glow`: blurred white copy of the glyph for the glow layer
//! - `glyph`: three-shade glyph, jittered, stretched and tilted
//! - `gleam`: occasional radial highlight on the glyph sprite
//!
//! Geometry (box, outline, sprite positions) depends only on the row layout.
//! Jitter, opacity, size variation and gleams are drawn from the caller's RNG.

pub mod gleam;
pub mod glow;
pub mod glyph;
pub mod outline;

pub use outline::Outline;

use rand::Rng;

use crate::config::SignConfig;
use crate::font::SignFont;
use crate::layout::LetterSlot;
use crate::raster::Sprite;

/// The nominal box a letter is centred in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LetterBox {
    /// Left edge (the row cursor)
    pub x: f32,
    /// Vertical centre of the section
    pub center_y: f32,
    /// Advance width at the row's font size
    pub width: f32,
    /// Letter height derived from the base font size
    pub height: f32,
}

impl LetterBox {
    pub fn new(slot: &LetterSlot, center_y: f32, config: &SignConfig) -> Self {
        Self {
            x: slot.x,
            center_y,
            width: slot.width,
            height: config.letter_height(),
        }
    }

    /// Top edge of the box
    pub fn top(&self) -> f32 {
        self.center_y - self.height / 2.0
    }
}

/// Everything one letter contributes to the sign
#[derive(Debug)]
pub struct LetterSprites {
    pub ch: char,
    pub outline: Outline,
    /// Pasted onto the glow layer
    pub glow: Sprite,
    /// Pasted onto the working image
    pub glyph: Sprite,
}

/// Synthesize the effect layers for one letter, or `None` for spaces
pub fn synthesize_letter<R: Rng + ?Sized>(
    slot: &LetterSlot,
    center_y: f32,
    font: &SignFont,
    config: &SignConfig,
    rng: &mut R,
) -> Option<LetterSprites> {
    if slot.is_space() {
        return None;
    }

    let letter = LetterBox::new(slot, center_y, config);
    let mask = font.rasterize(slot.ch);

    let outline = Outline::around(&letter, &config.effects, config.rotation_degrees);
    let glow = glow::glow_sprite(mask.as_ref(), &letter, config);
    let glyph = glyph::glyph_sprite(mask.as_ref(), &letter, config, rng);

    Some(LetterSprites {
        ch: slot.ch,
        outline,
        glow,
        glyph,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn slot(ch: char) -> LetterSlot {
        LetterSlot {
            ch,
            x: 200.0,
            width: 30.0,
        }
    }

    #[test]
    fn test_spaces_produce_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        let config = SignConfig::default();
        let font = SignFont::builtin(40);
        assert!(synthesize_letter(&slot(' '), 100.0, &font, &config, &mut rng).is_none());
    }

    #[test]
    fn test_letter_box_uses_base_font_height() {
        let config = SignConfig::default();
        let letter = LetterBox::new(&slot('A'), 100.0, &config);
        assert_eq!(letter.height, 32.0);
        assert_eq!(letter.top(), 84.0);
    }

    #[test]
    fn test_letter_layers_are_placed_around_the_box() {
        let mut rng = StdRng::seed_from_u64(7);
        let config = SignConfig::default();
        let font = SignFont::builtin(40);
        let sprites = synthesize_letter(&slot('A'), 100.0, &font, &config, &mut rng).unwrap();

        assert_eq!(sprites.ch, 'A');
        // Glow canvas: 1.5 × max(30, 32) = 48, centred on the box
        assert_eq!(sprites.glow.image.dimensions(), (48, 48));
        assert_eq!(sprites.glow.x, 191);
        // Glyph canvas: 1.5 × 30 by 1.8 × 32
        assert_eq!(sprites.glyph.image.dimensions(), (45, 57));
        assert!(sprites.glyph.x < 200 && sprites.glyph.y < 84);
    }

    #[test]
    fn test_geometry_is_seed_independent() {
        let config = SignConfig::default();
        let font = SignFont::builtin(40);
        let a = synthesize_letter(
            &slot('K'),
            90.0,
            &font,
            &config,
            &mut StdRng::seed_from_u64(1),
        )
        .unwrap();
        let b = synthesize_letter(
            &slot('K'),
            90.0,
            &font,
            &config,
            &mut StdRng::seed_from_u64(99),
        )
        .unwrap();

        assert_eq!(a.outline, b.outline);
        assert_eq!((a.glow.x, a.glow.y), (b.glow.x, b.glow.y));
        assert_eq!(a.glow.image, b.glow.image);
        assert_eq!((a.glyph.x, a.glyph.y), (b.glyph.x, b.glyph.y));
    }
}
