//! Radial highlight on a letter

use image::{Rgba, RgbaImage};
use rand::Rng;

use super::LetterBox;
use crate::raster::{self, Sprite};

/// A small white spot, brightest in the middle
///
/// Concentric discs are painted from the outside in, each replacing the last,
/// so alpha climbs toward `peak_alpha` at the centre. The spot sits right of
/// and above `center` (the glyph canvas centre). `None` when the letter is too
/// small for a visible spot.
pub fn gleam_sprite<R: Rng + ?Sized>(
    letter: &LetterBox,
    center: (i64, i64),
    peak_alpha: u8,
    rng: &mut R,
) -> Option<Sprite> {
    let size = (letter.width * 0.5) as u32;
    let side = size as f32;
    let spot_x = (side * (0.3 + rng.random::<f32>() * 0.4)) as i64;
    let spot_y = (side * (0.3 + rng.random::<f32>() * 0.4)) as i64;
    let radius = (side * (0.1 + rng.random::<f32>() * 0.15)) as i64;

    if size == 0 || radius == 0 {
        return None;
    }

    let mut canvas = RgbaImage::new(size, size);
    for r in (1..=radius).rev() {
        let alpha = (peak_alpha as f32 * (1.0 - r as f32 / radius as f32)) as u8;
        raster::fill_disc(&mut canvas, spot_x, spot_y, r, Rgba([255, 255, 255, alpha]));
    }

    let x = center.0 + (letter.width * 0.2) as i64;
    let y = center.1 - (letter.height * 0.3) as i64;
    Some(Sprite::new(canvas, x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn letter(width: f32) -> LetterBox {
        LetterBox {
            x: 0.0,
            center_y: 40.0,
            width,
            height: 32.0,
        }
    }

    #[test]
    fn test_gleam_brightens_toward_centre() {
        let mut rng = StdRng::seed_from_u64(11);
        let sprite = gleam_sprite(&letter(60.0), (45, 28), 200, &mut rng).unwrap();
        assert_eq!(sprite.image.dimensions(), (30, 30));
        assert_eq!((sprite.x, sprite.y), (57, 19));

        let peak = raster::max_alpha(&sprite.image);
        assert!(peak > 0 && peak < 200);
        // The outermost ring is fully transparent
        let brightest = sprite
            .image
            .enumerate_pixels()
            .max_by_key(|(_, _, p)| p[3])
            .map(|(x, y, _)| (x, y))
            .unwrap();
        assert!((9..=21).contains(&brightest.0) && (9..=21).contains(&brightest.1));
    }

    #[test]
    fn test_tiny_letters_get_no_gleam() {
        let mut rng = StdRng::seed_from_u64(2);
        assert!(gleam_sprite(&letter(1.0), (0, 0), 200, &mut rng).is_none());
    }
}
